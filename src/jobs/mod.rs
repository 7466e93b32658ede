/*!
 * Translation jobs: the draft/submitted model, batch encoding of
 * submissions, and reconciliation of the service's answer.
 */

pub mod batch;
pub mod confirmation;
pub mod model;
pub mod upload;

pub use batch::{EncodedBatch, SubmissionMapping, batch_key, encode_batch, encode_job_list};
pub use confirmation::{Confirmation, DuplicateSubmission};
pub use model::{
    JobDraft, JobSource, JobSpec, JobType, SubmittedJob, TranslationStatus, TranslationTier,
};
pub use upload::{FileQuoteRequest, FileUpload};
