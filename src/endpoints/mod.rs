/*!
 * Method groups, one per API area.
 *
 * Each group borrows the client's transport, builds the request path and
 * payload, and turns the unpacked envelope into typed values.
 */

use serde_json::Value;

use crate::client::Transport;
use crate::errors::GengoError;
use crate::protocol::envelope::unpack;
use crate::protocol::{QueryParams, fields};

pub mod account;
pub mod glossary;
pub mod job;
pub mod jobs;
pub mod order;
pub mod service;

pub use account::AccountApi;
pub use glossary::GlossaryApi;
pub use job::{Approval, JobApi, Rejection, RejectionReason, Stars};
pub use jobs::JobsApi;
pub use order::OrderApi;
pub use service::ServiceApi;

/// GET and unpack the success payload
pub(crate) async fn fetch(
    transport: &dyn Transport,
    path: &str,
    params: QueryParams,
    authenticated: bool,
) -> Result<Value, GengoError> {
    let raw = transport.get(path, params, authenticated).await?;
    unpack(&raw)
}

/// GET, unpack and take one property of the payload object
pub(crate) async fn fetch_property(
    transport: &dyn Transport,
    path: &str,
    key: &str,
) -> Result<Value, GengoError> {
    let payload = fetch(transport, path, QueryParams::new(), true).await?;
    take_property(payload, key)
}

pub(crate) fn take_property(payload: Value, key: &str) -> Result<Value, GengoError> {
    let Value::Object(mut obj) = payload else {
        return Err(GengoError::protocol("Expected response payload to be an object"));
    };

    obj.remove(key)
        .ok_or_else(|| GengoError::protocol(format!("Property '{}' not found", key)))
}

/// Parse every element of an array payload
pub(crate) fn parse_list<T>(
    value: &Value,
    what: &str,
    parse: impl Fn(&Value) -> Result<T, GengoError>,
) -> Result<Vec<T>, GengoError> {
    fields::array(value, what)?.iter().map(parse).collect()
}

/// Object ids in paths must be positive
pub(crate) fn check_id(id: i64, what: &str) -> Result<(), GengoError> {
    if id <= 0 {
        return Err(GengoError::validation(format!("Invalid {} id: {}", what, id)));
    }
    Ok(())
}
