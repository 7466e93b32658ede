/*!
 * Response envelope.
 *
 * Every response body looks like one of
 *
 * ```json
 * { "opstat": "ok", "response": <payload> }
 * { "opstat": "error", "err": { "code": "<string>", "msg": "<string>" } }
 * ```
 *
 * The presence of `err` decides the outcome; `opstat` is only carried along
 * for the error report.
 */

use serde_json::Value;

use crate::errors::GengoError;
use crate::protocol::fields;

/// An `err` object reported by the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceFailure {
    pub opstat: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
}

impl From<ServiceFailure> for GengoError {
    fn from(failure: ServiceFailure) -> Self {
        GengoError::Service {
            opstat: failure.opstat,
            code: failure.code,
            message: failure.message,
        }
    }
}

/// A parsed response envelope
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// The `response` payload of a successful call
    Success(Value),
    /// The service rejected the call
    Failure(ServiceFailure),
}

impl Envelope {
    /// Parse a raw response body
    pub fn parse(raw: &str) -> Result<Self, GengoError> {
        let json: Value = serde_json::from_str(raw)
            .map_err(|e| GengoError::protocol(format!("Response is not valid JSON: {}", e)))?;

        let obj = fields::object(&json, "response envelope")?;
        let opstat = fields::text(obj, "opstat");

        match obj.get("err") {
            Some(Value::Object(err)) => Ok(Self::Failure(ServiceFailure {
                opstat,
                code: fields::text(err, "code"),
                message: fields::text(err, "msg"),
            })),
            Some(Value::Null) | None => match obj.get("response") {
                Some(payload) => Ok(Self::Success(payload.clone())),
                None => Err(GengoError::protocol(
                    "Envelope has neither 'err' nor 'response'",
                )),
            },
            Some(other) => Err(GengoError::protocol(format!(
                "Envelope 'err' is not an object: {}",
                other
            ))),
        }
    }

    /// The success payload, or the service failure as an error
    pub fn into_result(self) -> Result<Value, GengoError> {
        match self {
            Self::Success(payload) => Ok(payload),
            Self::Failure(failure) => Err(failure.into()),
        }
    }
}

/// Parse a raw body and return its success payload
pub fn unpack(raw: &str) -> Result<Value, GengoError> {
    Envelope::parse(raw)?.into_result()
}

/// Unpack and take one property of the payload object
pub fn unpack_property(raw: &str, key: &str) -> Result<Value, GengoError> {
    let payload = unpack(raw)?;
    let obj = fields::object(&payload, "response payload")?;
    fields::property(obj, key).cloned()
}
