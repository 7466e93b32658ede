/*!
 * Batch encoding of job submissions.
 *
 * Each job in a submission gets a synthetic key, `job_1`, `job_2`, ... in
 * input order. The service echoes these keys when it reports duplicates, so
 * the encoder also returns a `SubmissionMapping` from key back to the draft.
 */

use serde_json::{Map, Value, json};

use crate::errors::{GengoError, JobError};
use crate::jobs::model::{JobDraft, JobSpec};

/// Prefix of the synthetic batch keys
pub const BATCH_KEY_PREFIX: &str = "job_";

/// Batch key for a 1-based ordinal
pub fn batch_key(ordinal: usize) -> String {
    format!("{}{}", BATCH_KEY_PREFIX, ordinal)
}

/// Batch key to draft, in submission order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionMapping {
    entries: Vec<(String, JobDraft)>,
}

impl SubmissionMapping {
    /// Draft submitted under `key`
    pub fn get(&self, key: &str) -> Option<&JobDraft> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, job)| job)
    }

    /// 1-based position of `key` in the submission
    pub fn ordinal_of(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key).map(|i| i + 1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &JobDraft)> {
        self.entries.iter().map(|(k, job)| (k.as_str(), job))
    }
}

/// The `jobs` object of a submission plus its correlation table
#[derive(Debug, Clone)]
pub struct EncodedBatch {
    pub jobs: Map<String, Value>,
    pub mapping: SubmissionMapping,
}

impl EncodedBatch {
    /// Full request payload for `translate/jobs`
    pub fn submission_payload(&self, as_group: bool, allow_fork: bool) -> Value {
        json!({
            "jobs": Value::Object(self.jobs.clone()),
            "as_group": u8::from(as_group),
            "allow_fork": u8::from(allow_fork),
        })
    }
}

/// Encode jobs for submission
///
/// Fails on the first invalid or already-submitted job, and when no jobs
/// were given.
pub fn encode_batch<I>(jobs: I) -> Result<EncodedBatch, GengoError>
where
    I: IntoIterator,
    I::Item: Into<JobSpec>,
{
    let mut encoded = Map::new();
    let mut entries = Vec::new();

    for (index, job) in jobs.into_iter().enumerate() {
        let draft = match job.into() {
            JobSpec::Draft(draft) => draft,
            JobSpec::Submitted(submitted) => {
                return Err(JobError::AlreadySubmitted(submitted.id()).into());
            }
        };

        let key = batch_key(index + 1);
        encoded.insert(key.clone(), draft.to_wire()?);
        entries.push((key, draft));
    }

    if encoded.is_empty() {
        return Err(GengoError::validation("At least one job is required"));
    }

    Ok(EncodedBatch {
        jobs: encoded,
        mapping: SubmissionMapping { entries },
    })
}

/// Encode jobs as a plain array, as the quote endpoint expects
pub fn encode_job_list<I>(jobs: I) -> Result<Vec<Value>, GengoError>
where
    I: IntoIterator,
    I::Item: Into<JobSpec>,
{
    jobs.into_iter()
        .map(|job| match job.into() {
            JobSpec::Draft(draft) => draft.to_wire(),
            JobSpec::Submitted(submitted) => {
                Err(JobError::AlreadySubmitted(submitted.id()).into())
            }
        })
        .collect()
}
