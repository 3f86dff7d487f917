//! The JSON envelope every HelloBlock response is wrapped in.
//!
//! # Design
//! Decoding happens in two stages. The envelope is decoded first with `data`
//! left as a raw JSON fragment; only once `status` is `success` is that
//! fragment decoded into the endpoint's own type. A failed call therefore
//! never depends on what the service put in `data`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::value::RawValue;

use crate::error::ApiError;

pub const STATUS_SUCCESS: &str = "success";

#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<Vec<String>>,
    #[serde(default)]
    data: Option<Box<RawValue>>,
}

impl Envelope {
    pub fn parse(body: &str) -> Result<Self, ApiError> {
        serde_json::from_str(body).map_err(|e| ApiError::decode(body, e))
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }

    pub fn details(&self) -> &[String] {
        self.details.as_deref().unwrap_or_default()
    }

    /// Raw `data` text, `null` when the service sent none.
    pub fn raw_data(&self) -> &str {
        self.data.as_deref().map(RawValue::get).unwrap_or("null")
    }

    /// Check the status and decode `data` into `T`.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        if !self.is_success() {
            return Err(ApiError::Remote {
                message: self.message.unwrap_or_default(),
                details: self.details.unwrap_or_default(),
            });
        }
        let raw = self.raw_data();
        serde_json::from_str(raw).map_err(|e| ApiError::decode(raw, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        n: u32,
    }

    #[test]
    fn success_decodes_data() {
        let envelope = Envelope::parse(r#"{"status":"success","data":{"n":7}}"#).unwrap();
        assert!(envelope.is_success());
        assert_eq!(envelope.message(), "");
        assert!(envelope.details().is_empty());
        assert_eq!(envelope.into_data::<Payload>().unwrap(), Payload { n: 7 });
    }

    #[test]
    fn failure_ignores_data_shape() {
        let envelope = Envelope::parse(
            r#"{"status":"fail","message":"bad address","details":["malformed"],"data":[1,2]}"#,
        )
        .unwrap();
        let err = envelope.into_data::<Payload>().unwrap_err();
        match err {
            ApiError::Remote { message, details } => {
                assert_eq!(message, "bad address");
                assert_eq!(details, vec!["malformed".to_string()]);
            }
            other => panic!("expected Remote, got {other:?}"),
        }
    }

    #[test]
    fn null_message_and_details_are_empty() {
        let envelope =
            Envelope::parse(r#"{"status":"error","message":null,"details":null}"#).unwrap();
        assert_eq!(envelope.message(), "");
        assert!(envelope.details().is_empty());
        assert_eq!(envelope.raw_data(), "null");
    }

    #[test]
    fn any_status_other_than_success_is_remote() {
        for status in ["error", "", "Success"] {
            let body = format!(
                r#"{{"status":"{status}","message":"nope","details":["d1","d2"],"data":{{"n":1}}}}"#
            );
            let envelope = Envelope::parse(&body).unwrap();
            assert!(!envelope.is_success(), "{status:?}");
            match envelope.into_data::<Payload>().unwrap_err() {
                ApiError::Remote { message, details } => {
                    assert_eq!(message, "nope");
                    assert_eq!(details, vec!["d1".to_string(), "d2".to_string()]);
                }
                other => panic!("{status:?}: expected Remote, got {other:?}"),
            }
        }
    }

    #[test]
    fn missing_status_is_decode_error() {
        let err = Envelope::parse(r#"{"data":{}}"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode { ref body, .. } if body == r#"{"data":{}}"#));
    }

    #[test]
    fn wrong_data_shape_reports_raw_fragment() {
        let envelope = Envelope::parse(r#"{"status":"success","data":{"n":"seven"}}"#).unwrap();
        match envelope.into_data::<Payload>().unwrap_err() {
            ApiError::Decode { body, .. } => assert_eq!(body, r#"{"n":"seven"}"#),
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[test]
    fn missing_data_is_decode_error() {
        let envelope = Envelope::parse(r#"{"status":"success"}"#).unwrap();
        assert!(matches!(
            envelope.into_data::<Payload>(),
            Err(ApiError::Decode { .. })
        ));
    }
}
