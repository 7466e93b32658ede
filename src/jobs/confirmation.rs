/*!
 * Submission reconciliation.
 *
 * A submission answer carries the order totals and, under `jobs`, one array
 * of existing jobs per batch key the service considered a duplicate. Those
 * keys are resolved against the `SubmissionMapping` built at encode time.
 *
 * Unknown keys, non-array values and empty arrays are skipped with a
 * warning. An array item that is not a job object fails the whole answer.
 *
 * Numeric totals are read leniently: an absent or unparseable `group_id`,
 * `job_count`, `order_id` or `credits_used` is zero.
 */

use log::warn;
use serde_json::Value;

use crate::errors::GengoError;
use crate::jobs::batch::SubmissionMapping;
use crate::jobs::model::{JobDraft, SubmittedJob};
use crate::protocol::fields;

/// A submitted draft the service matched against existing jobs
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateSubmission {
    /// Batch key the draft was sent under
    pub key: String,
    /// 1-based position of the draft in the submission
    pub ordinal: usize,
    /// The draft as submitted
    pub job: JobDraft,
    /// Jobs already on the service that match it; never empty
    pub existing_jobs: Vec<SubmittedJob>,
}

/// Result of a job submission
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    pub job_count: i64,
    pub group_id: i64,
    pub order_id: i64,
    /// Parsed for arithmetic; not exact for decimal amounts
    pub credits_used: f64,
    /// `credits_used` exactly as the service sent it
    pub credits_used_text: Option<String>,
    pub currency: Option<String>,
    /// In the order the service listed them
    pub duplicates: Vec<DuplicateSubmission>,
}

impl Confirmation {
    /// Build a confirmation from a success payload
    pub fn reconcile(mapping: &SubmissionMapping, response: &Value) -> Result<Self, GengoError> {
        let obj = fields::object(response, "submission response")?;

        let mut duplicates = Vec::new();

        if let Some(Value::Object(reported)) = obj.get("jobs") {
            for (key, value) in reported {
                let Value::Array(items) = value else {
                    warn!("Ignoring non-array duplicate report for {}", key);
                    continue;
                };

                let (Some(job), Some(ordinal)) = (mapping.get(key), mapping.ordinal_of(key)) else {
                    warn!("Ignoring duplicate report for unknown batch key {}", key);
                    continue;
                };

                if items.is_empty() {
                    warn!("Ignoring empty duplicate report for {}", key);
                    continue;
                }

                // A malformed entry fails the whole reconciliation
                let existing_jobs = items
                    .iter()
                    .map(SubmittedJob::from_json)
                    .collect::<Result<Vec<_>, _>>()?;

                duplicates.push(DuplicateSubmission {
                    key: key.clone(),
                    ordinal,
                    job: job.clone(),
                    existing_jobs,
                });
            }
        }

        Ok(Self {
            job_count: fields::lenient_i64(obj, "job_count"),
            group_id: fields::lenient_i64(obj, "group_id"),
            order_id: fields::lenient_i64(obj, "order_id"),
            credits_used: fields::lenient_f64(obj, "credits_used"),
            credits_used_text: fields::text(obj, "credits_used"),
            currency: fields::text(obj, "currency"),
            duplicates,
        })
    }

    /// True when the jobs were required to share a translator
    pub fn has_group_id(&self) -> bool {
        self.group_id != 0
    }

    /// Duplicates re-sorted into submission order
    pub fn duplicates_in_submission_order(&self) -> Vec<&DuplicateSubmission> {
        let mut sorted: Vec<&DuplicateSubmission> = self.duplicates.iter().collect();
        sorted.sort_by_key(|dup| dup.ordinal);
        sorted
    }
}
