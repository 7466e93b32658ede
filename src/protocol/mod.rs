/*!
 * Wire protocol shared by every endpoint.
 *
 * - `signing`: HMAC request signatures and auth parameters
 * - `query`: strict percent-encoded query strings
 * - `envelope`: the `{opstat, response|err}` response wrapper
 * - `fields`: lenient and strict readers for payload properties
 */

pub mod envelope;
pub mod fields;
pub mod query;
pub mod signing;

pub use envelope::{Envelope, ServiceFailure, unpack};
pub use query::{QueryParams, encode_query};
pub use signing::{Credentials, Signer};
