//! Server response envelope.
//!
//! Every endpoint wraps its payload as `{ code, message, data }`. Code 200
//! carries the payload, 401 means the session is no longer valid, anything
//! else is an application-level failure whose message is surfaced as-is.

use serde::Deserialize;

use crate::error::ApiError;

pub const CODE_OK: i32 = 200;
pub const CODE_UNAUTHORIZED: i32 = 401;

#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub code: i32,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, mapping failure codes to typed errors.
    pub fn into_result(self) -> Result<T, ApiError> {
        match self.code {
            CODE_OK => self
                .data
                .ok_or_else(|| ApiError::payload("envelope carried no data")),
            CODE_UNAUTHORIZED => Err(ApiError::auth(non_empty(self.message, "session expired"))),
            code => Err(ApiError::server(code, self.message)),
        }
    }

    /// Like [`Envelope::into_result`] for endpoints whose success carries no
    /// payload (the server sends `data: null`).
    pub fn into_unit(self) -> Result<(), ApiError> {
        match self.code {
            CODE_OK => Ok(()),
            CODE_UNAUTHORIZED => Err(ApiError::auth(non_empty(self.message, "session expired"))),
            code => Err(ApiError::server(code, self.message)),
        }
    }
}

fn non_empty(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Envelope<String> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn ok_envelope_yields_data() {
        let env = decode(r#"{"code":200,"message":"ok","data":"tok-123"}"#);
        assert_eq!(env.into_result().unwrap(), "tok-123");
    }

    #[test]
    fn ok_envelope_without_data_is_a_payload_error() {
        let env = decode(r#"{"code":200,"message":"ok"}"#);
        assert!(matches!(env.into_result(), Err(ApiError::Payload(_))));
    }

    #[test]
    fn unauthorized_maps_to_auth_error() {
        let env = decode(r#"{"code":401,"message":"token expired","data":null}"#);
        let err = env.into_result().unwrap_err();
        assert!(err.is_auth());
        assert_eq!(err.to_string(), "authentication failed: token expired");
    }

    #[test]
    fn unauthorized_with_blank_message_gets_a_fallback() {
        let env = decode(r#"{"code":401,"message":""}"#);
        let err = env.into_unit().unwrap_err();
        assert_eq!(err.to_string(), "authentication failed: session expired");
    }

    #[test]
    fn other_codes_surface_the_server_message() {
        let env = decode(r#"{"code":500,"message":"boom","data":null}"#);
        match env.into_result() {
            Err(ApiError::Server { code, message }) => {
                assert_eq!(code, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn unit_envelope_accepts_null_data() {
        let env: Envelope<serde_json::Value> = serde_json::from_str(
            r#"{"code":200,"message":"logged out","data":null}"#,
        )
        .unwrap();
        assert!(env.into_unit().is_ok());
    }
}
