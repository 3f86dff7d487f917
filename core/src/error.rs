//! Error types for the HelloBlock client.
//!
//! # Design
//! Every operation fails the same three ways: the round trip itself broke
//! (`Transport`), the body was not the JSON we expected (`Decode`), or the
//! service answered with a non-success envelope (`Remote`). `Decode` keeps
//! the offending text so a bad response can be diagnosed from the error
//! alone.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the response body could not be read.
    #[error("error calling {url}: {reason}")]
    Transport { url: String, reason: String },

    /// The body (or the envelope's `data`) did not decode into the expected shape.
    #[error("could not process JSON {body}: {reason}")]
    Decode { body: String, reason: String },

    /// The envelope decoded but its status was not `success`.
    #[error("error from helloblock.io: {message}: {}", .details.join(", "))]
    Remote { message: String, details: Vec<String> },

    /// The outgoing form body could not be encoded.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    pub(crate) fn decode(body: &str, err: serde_json::Error) -> Self {
        ApiError::Decode {
            body: body.to_string(),
            reason: err.to_string(),
        }
    }
}
