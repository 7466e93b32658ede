use serde::Serialize;
use serde_json::json;

use crate::client::Transport;
use crate::endpoints::{check_id, fetch, fetch_property, parse_list, take_property};
use crate::errors::GengoError;
use crate::jobs::SubmittedJob;
use crate::payloads::{Comment, Feedback, Revision, TimestampedId};
use crate::protocol::QueryParams;
use crate::protocol::envelope::unpack;

fn job_path(job_id: i64) -> String {
    format!("translate/job/{}", job_id)
}

/// Rating given when approving a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stars {
    #[default]
    Unspecified,
    One,
    Two,
    Three,
    Four,
    Five,
}

impl Stars {
    pub fn value(&self) -> u8 {
        match self {
            Self::Unspecified => 0,
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
        }
    }
}

/// Why a translation is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RejectionReason {
    #[default]
    Quality,
    Incomplete,
    Other,
}

impl RejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Incomplete => "incomplete",
            Self::Other => "other",
        }
    }
}

/// Approval of a reviewable job
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Approval {
    rating: Stars,
    for_translator: Option<String>,
    for_gengo: Option<String>,
    public: bool,
}

#[derive(Serialize)]
struct ApprovalPayload<'a> {
    action: &'static str,
    rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    for_translator: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    for_mygengo: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    public: Option<u8>,
}

impl Approval {
    pub fn new(rating: Stars) -> Self {
        Self {
            rating,
            ..Default::default()
        }
    }

    /// Comment passed on to the translator
    pub fn for_translator(mut self, comment: impl Into<String>) -> Self {
        self.for_translator = Some(comment.into());
        self
    }

    /// Comment for Gengo staff; `public` allows it to be shared
    pub fn for_gengo(mut self, comment: impl Into<String>, public: bool) -> Self {
        self.for_gengo = Some(comment.into());
        self.public = public;
        self
    }

    fn payload(&self) -> ApprovalPayload<'_> {
        ApprovalPayload {
            action: "approve",
            rating: self.rating.value(),
            for_translator: self.for_translator.as_deref(),
            for_mygengo: self.for_gengo.as_deref(),
            public: self.for_gengo.as_ref().map(|_| u8::from(self.public)),
        }
    }
}

/// Rejection of a reviewable job
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub reason: RejectionReason,
    /// Explanation for the translator; required
    pub comment: String,
    /// Text of the job's captcha image; required
    pub captcha: String,
    /// Put the job back in the queue instead of cancelling it
    pub requeue: bool,
}

impl Rejection {
    pub fn new(
        reason: RejectionReason,
        comment: impl Into<String>,
        captcha: impl Into<String>,
    ) -> Self {
        Self {
            reason,
            comment: comment.into(),
            captcha: captcha.into(),
            requeue: true,
        }
    }

    pub fn cancel(mut self) -> Self {
        self.requeue = false;
        self
    }
}

/// Operations on a single job
#[derive(Debug, Clone, Copy)]
pub struct JobApi<'a> {
    transport: &'a dyn Transport,
}

impl<'a> JobApi<'a> {
    pub(crate) fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Fetch a job; with `machine_translation` a machine preview fills in
    /// the translated body until a human translation exists
    pub async fn get(&self, job_id: i64, machine_translation: bool) -> Result<SubmittedJob, GengoError> {
        check_id(job_id, "job")?;

        let params = QueryParams::new().with("pre_mt", u8::from(machine_translation).to_string());
        let payload = fetch(self.transport, &job_path(job_id), params, true).await?;
        SubmittedJob::from_json(&take_property(payload, "job")?)
    }

    pub async fn approve(&self, job_id: i64, approval: &Approval) -> Result<(), GengoError> {
        check_id(job_id, "job")?;

        let payload = serde_json::to_value(approval.payload())?;
        self.put(&job_path(job_id), payload).await
    }

    pub async fn reject(&self, job_id: i64, rejection: &Rejection) -> Result<(), GengoError> {
        check_id(job_id, "job")?;

        if rejection.comment.trim().is_empty() {
            return Err(GengoError::validation("Rejection comment not provided"));
        }
        if rejection.captcha.trim().is_empty() {
            return Err(GengoError::validation("Captcha text not provided"));
        }

        let payload = json!({
            "action": "reject",
            "reason": rejection.reason.as_str(),
            "comment": rejection.comment,
            "captcha": rejection.captcha,
            "follow_up": if rejection.requeue { "requeue" } else { "cancel" },
        });
        self.put(&job_path(job_id), payload).await
    }

    /// Send the job back to the translator for corrections
    pub async fn revise(&self, job_id: i64, comment: &str) -> Result<(), GengoError> {
        check_id(job_id, "job")?;

        if comment.trim().is_empty() {
            return Err(GengoError::validation("Revision comment not provided"));
        }

        let payload = json!({"action": "revise", "comment": comment});
        self.put(&job_path(job_id), payload).await
    }

    /// Cancel a job that has not been started
    pub async fn delete(&self, job_id: i64) -> Result<(), GengoError> {
        check_id(job_id, "job")?;

        let raw = self.transport.delete(&job_path(job_id)).await?;
        unpack(&raw).map(|_| ())
    }

    /// Comment thread, oldest first
    pub async fn comments(&self, job_id: i64) -> Result<Vec<Comment>, GengoError> {
        check_id(job_id, "job")?;

        let path = format!("{}/comments", job_path(job_id));
        let thread = fetch_property(self.transport, &path, "thread").await?;
        parse_list(&thread, "thread", Comment::from_json)
    }

    pub async fn post_comment(&self, job_id: i64, body: &str) -> Result<(), GengoError> {
        check_id(job_id, "job")?;

        if body.trim().is_empty() {
            return Err(GengoError::validation("Comment body not provided"));
        }

        let path = format!("{}/comment", job_path(job_id));
        let raw = self
            .transport
            .post_json(&path, json!({"body": body}), &[])
            .await?;
        unpack(&raw).map(|_| ())
    }

    pub async fn feedback(&self, job_id: i64) -> Result<Feedback, GengoError> {
        check_id(job_id, "job")?;

        let path = format!("{}/feedback", job_path(job_id));
        let feedback = fetch_property(self.transport, &path, "feedback").await?;
        Feedback::from_json(&feedback)
    }

    /// Revision ids with their creation times
    pub async fn revisions(&self, job_id: i64) -> Result<Vec<TimestampedId>, GengoError> {
        check_id(job_id, "job")?;

        let path = format!("{}/revisions", job_path(job_id));
        let revisions = fetch_property(self.transport, &path, "revisions").await?;
        parse_list(&revisions, "revisions", |item| {
            TimestampedId::from_json(item, "rev_id", "ctime")
        })
    }

    pub async fn revision(&self, job_id: i64, revision_id: i64) -> Result<Revision, GengoError> {
        check_id(job_id, "job")?;
        check_id(revision_id, "revision")?;

        let path = format!("{}/revision/{}", job_path(job_id), revision_id);
        let revision = fetch_property(self.transport, &path, "revision").await?;
        Revision::from_json(&revision)
    }

    /// JPEG preview of the translation
    pub async fn preview_image(&self, job_id: i64) -> Result<Vec<u8>, GengoError> {
        check_id(job_id, "job")?;

        let path = format!("{}/preview", job_path(job_id));
        self.transport.get_bytes(&path, true).await
    }

    async fn put(&self, path: &str, payload: serde_json::Value) -> Result<(), GengoError> {
        let raw = self.transport.put(path, payload).await?;
        unpack(&raw).map(|_| ())
    }
}
