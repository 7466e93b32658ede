use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::client::Transport;
use crate::endpoints::{check_id, fetch, fetch_property, parse_list};
use crate::errors::GengoError;
use crate::jobs::{Confirmation, JobSpec, SubmittedJob, TranslationStatus, encode_batch};
use crate::payloads::{JobGroup, TimestampedId};
use crate::protocol::QueryParams;
use crate::protocol::envelope::unpack;
use crate::protocol::signing::unix_timestamp;

const URI_JOBS: &str = "translate/jobs";
const URI_JOBS_GROUP: &str = "translate/jobs/group";

/// Job submission and bulk lookups
#[derive(Debug, Clone, Copy)]
pub struct JobsApi<'a> {
    transport: &'a dyn Transport,
}

impl<'a> JobsApi<'a> {
    pub(crate) fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Submit jobs for translation
    ///
    /// `as_group` asks for one translator for all jobs; `allow_fork` lets the
    /// service split the group if no single translator is available. Jobs the
    /// service already knows come back as duplicates instead of new jobs.
    pub async fn submit<I>(
        &self,
        as_group: bool,
        allow_fork: bool,
        jobs: I,
    ) -> Result<Confirmation, GengoError>
    where
        I: IntoIterator,
        I::Item: Into<JobSpec>,
    {
        let batch = encode_batch(jobs)?;
        let payload = batch.submission_payload(as_group, allow_fork);
        debug!("Submitting {} jobs", batch.mapping.len());

        let raw = self.transport.post_json(URI_JOBS, payload, &[]).await?;
        let response = unpack(&raw)?;
        let confirmation = Confirmation::reconcile(&batch.mapping, &response)?;

        info!(
            "Order {} accepted {} jobs ({} duplicates)",
            confirmation.order_id,
            confirmation.job_count,
            confirmation.duplicates.len()
        );

        Ok(confirmation)
    }

    /// Most recent jobs, newest first
    ///
    /// A `count` of zero or less returns nothing without contacting the
    /// service.
    pub async fn recent(
        &self,
        status: Option<TranslationStatus>,
        after: Option<DateTime<Utc>>,
        count: i64,
    ) -> Result<Vec<TimestampedId>, GengoError> {
        let mut params = QueryParams::new();

        if let Some(status) = status {
            if status == TranslationStatus::Unknown {
                return Err(GengoError::validation(
                    "Cannot request jobs with unknown status",
                ));
            }
            params.insert("status", status.as_str());
        }

        if let Some(after) = after {
            let ts = unix_timestamp(after);
            if ts <= 0 {
                return Err(GengoError::validation(
                    "Cannot request jobs created before the Unix epoch",
                ));
            }
            params.insert("timestamp_after", ts.to_string());
        }

        if count <= 0 {
            return Ok(Vec::new());
        }
        params.insert("count", count.to_string());

        let payload = fetch(self.transport, URI_JOBS, params, true).await?;
        parse_list(&payload, "recent jobs", |item| {
            TimestampedId::from_json(item, "job_id", "ctime")
        })
    }

    /// Look up jobs by id
    pub async fn by_ids(&self, ids: &[i64]) -> Result<Vec<SubmittedJob>, GengoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        for id in ids {
            check_id(*id, "job")?;
        }

        let joined = ids
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let path = format!("{}/{}", URI_JOBS, joined);

        let jobs = fetch_property(self.transport, &path, "jobs").await?;
        parse_list(&jobs, "jobs", SubmittedJob::from_json)
    }

    /// Jobs submitted together as a group
    pub async fn group(&self, group_id: i64) -> Result<JobGroup, GengoError> {
        check_id(group_id, "group")?;

        let path = format!("{}/{}", URI_JOBS_GROUP, group_id);
        let payload = fetch(self.transport, &path, QueryParams::new(), true).await?;
        JobGroup::from_json(&payload)
    }
}
