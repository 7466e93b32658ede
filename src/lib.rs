/*!
 * # gengo - Gengo translation API client
 *
 * A Rust client library for the Gengo human translation API.
 *
 * ## Features
 *
 * - HMAC-SHA1 request signing
 * - Strict percent-encoded query strings, as the API signs against
 * - Uniform unpacking of the `{opstat, response|err}` envelope
 * - Batch job submission with duplicate detection:
 *   - jobs are keyed `job_1`, `job_2`, ... in submission order
 *   - duplicates reported by the service are paired with the drafts that
 *     caused them
 * - Quotes for text and uploaded files
 * - Job lifecycle: approve, reject, revise, comments, revisions
 * - Account, order and glossary lookups
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `protocol`: Wire protocol shared by every endpoint:
 *   - `protocol::signing`: Request signatures and auth parameters
 *   - `protocol::query`: Query string encoding
 *   - `protocol::envelope`: Response envelope
 *   - `protocol::fields`: Payload field readers
 * - `jobs`: Job drafts, batch encoding and submission reconciliation
 * - `client`: `GengoClient` and the `Transport` seam:
 *   - `client::http`: reqwest transport
 *   - `client::mock`: In-memory transport for tests
 * - `endpoints`: Method groups, one per API area
 * - `payloads`: Typed endpoint payloads
 * - `errors`: Custom error types for the library
 *
 * ## Example
 *
 * ```no_run
 * use gengo::{GengoClient, JobDraft};
 *
 * # async fn run() -> Result<(), gengo::GengoError> {
 * let client = GengoClient::new("private-key", "public-key")?;
 * let job = JobDraft::text("greeting", "Hello, world", "en", "ja");
 * let confirmation = client.jobs().submit(false, false, vec![job]).await?;
 *
 * for dup in &confirmation.duplicates {
 *     println!("{} already exists as {} jobs", dup.job.slug(), dup.existing_jobs.len());
 * }
 * # Ok(())
 * # }
 * ```
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod client;
pub mod endpoints;
pub mod errors;
pub mod jobs;
pub mod payloads;
pub mod protocol;

// Re-export main types for easier usage
pub use app_config::{ClientMode, Config};
pub use client::{GengoClient, HttpTransport, MockTransport, Transport};
pub use errors::{GengoError, JobError};
pub use jobs::{
    Confirmation, DuplicateSubmission, FileQuoteRequest, FileUpload, JobDraft, JobSpec,
    SubmittedJob, TranslationStatus, TranslationTier,
};
pub use protocol::{Credentials, QueryParams, Signer};
