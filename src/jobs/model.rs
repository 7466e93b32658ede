/*!
 * Job types.
 *
 * A job is either a `JobDraft`, built locally and freely editable until it
 * is handed to the batch encoder, or a `SubmittedJob`, a read-only record
 * parsed from the service. `JobSpec` is the union of the two.
 */

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::errors::{GengoError, JobError};
use crate::protocol::fields;

/// Translation quality/price level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TranslationTier {
    #[default]
    Standard,
    Machine,
    Pro,
    Ultra,
    /// Sentinel for values the client does not recognise
    Unknown,
}

impl TranslationTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Machine => "machine",
            Self::Pro => "pro",
            Self::Ultra => "ultra",
            Self::Unknown => "unknown",
        }
    }

    /// Case-insensitive parse; unrecognised values map to `Unknown`
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "standard" => Self::Standard,
            "machine" => Self::Machine,
            "pro" => Self::Pro,
            "ultra" => Self::Ultra,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for TranslationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the source text reaches the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobType {
    #[default]
    Text,
    File,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::File => "file",
        }
    }

    /// Anything but `file` is a text job
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("file") {
            Self::File
        } else {
            Self::Text
        }
    }
}

/// Job status as reported by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslationStatus {
    Available,
    Pending,
    Reviewable,
    Revising,
    Approved,
    Cancelled,
    Unknown,
}

impl TranslationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Pending => "pending",
            Self::Reviewable => "reviewable",
            Self::Revising => "revising",
            Self::Approved => "approved",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "available" => Self::Available,
            "pending" => Self::Pending,
            "reviewable" => Self::Reviewable,
            "revising" => Self::Revising,
            "approved" => Self::Approved,
            "cancelled" => Self::Cancelled,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for TranslationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of the text to translate
#[derive(Debug, Clone, PartialEq)]
pub enum JobSource {
    /// Text submitted inline with the job
    Text { body: String },
    /// A file previously uploaded for a quote, referenced by its identifier
    File { identifier: String },
}

impl JobSource {
    pub fn job_type(&self) -> JobType {
        match self {
            Self::Text { .. } => JobType::Text,
            Self::File { .. } => JobType::File,
        }
    }
}

/// A job that has not been submitted yet
#[derive(Debug, Clone, PartialEq)]
pub struct JobDraft {
    slug: String,
    source: JobSource,
    source_language: String,
    target_language: String,
    tier: TranslationTier,
    auto_approve: bool,
    force: bool,
    callback_url: Option<Url>,
    comment: Option<String>,
    custom_data: Option<String>,
    glossary_id: Option<i64>,
    purpose: Option<String>,
    tone: Option<String>,
    max_chars: Option<u32>,
    position: Option<u32>,
}

/// Wire form of a job inside a submission or quote payload
#[derive(Debug, Serialize)]
struct WireJob<'a> {
    #[serde(rename = "type")]
    job_type: &'static str,
    slug: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    body_src: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<&'a str>,
    lc_src: &'a str,
    lc_tgt: &'a str,
    tier: &'static str,
    auto_approve: u8,
    force: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_data: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    callback_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    glossary_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    purpose: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_chars: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<u32>,
}

impl JobDraft {
    fn with_source(
        slug: impl Into<String>,
        source: JobSource,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            source,
            source_language: source_language.into(),
            target_language: target_language.into(),
            tier: TranslationTier::default(),
            auto_approve: false,
            force: false,
            callback_url: None,
            comment: None,
            custom_data: None,
            glossary_id: None,
            purpose: None,
            tone: None,
            max_chars: None,
            position: None,
        }
    }

    /// Create a text job
    pub fn text(
        slug: impl Into<String>,
        body: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self::with_source(
            slug,
            JobSource::Text { body: body.into() },
            source_language,
            target_language,
        )
    }

    /// Create a job for a file previously uploaded for a quote
    pub fn file(
        slug: impl Into<String>,
        identifier: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self::with_source(
            slug,
            JobSource::File { identifier: identifier.into() },
            source_language,
            target_language,
        )
    }

    /// Set the pricing tier
    pub fn tier(mut self, tier: TranslationTier) -> Self {
        self.tier = tier;
        self
    }

    /// Approve automatically once translated
    pub fn auto_approve(mut self, auto_approve: bool) -> Self {
        self.auto_approve = auto_approve;
        self
    }

    /// Skip the duplicate check
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Set the status callback; the URL must be absolute
    pub fn callback_url(mut self, url: &str) -> Result<Self, JobError> {
        let parsed =
            Url::parse(url).map_err(|_| JobError::CallbackUrlNotAbsolute(url.to_string()))?;
        self.callback_url = Some(parsed);
        Ok(self)
    }

    /// Comment for the translator
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Opaque data returned with the job
    pub fn custom_data(mut self, custom_data: impl Into<String>) -> Self {
        self.custom_data = Some(custom_data.into());
        self
    }

    pub fn glossary_id(mut self, glossary_id: i64) -> Self {
        self.glossary_id = Some(glossary_id);
        self
    }

    pub fn purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }

    pub fn tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = Some(tone.into());
        self
    }

    /// Upper bound on translated length
    pub fn max_chars(mut self, max_chars: u32) -> Self {
        self.max_chars = Some(max_chars);
        self
    }

    /// Ordering hint within a group
    pub fn position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn source(&self) -> &JobSource {
        &self.source
    }

    pub fn job_type(&self) -> JobType {
        self.source.job_type()
    }

    /// Inline body text, for text jobs
    pub fn body(&self) -> Option<&str> {
        match &self.source {
            JobSource::Text { body } => Some(body),
            JobSource::File { .. } => None,
        }
    }

    /// File identifier, for file jobs
    pub fn file_identifier(&self) -> Option<&str> {
        match &self.source {
            JobSource::File { identifier } => Some(identifier),
            JobSource::Text { .. } => None,
        }
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    pub fn translation_tier(&self) -> TranslationTier {
        self.tier
    }

    pub fn is_auto_approve(&self) -> bool {
        self.auto_approve
    }

    pub fn is_forced(&self) -> bool {
        self.force
    }

    pub fn callback(&self) -> Option<&Url> {
        self.callback_url.as_ref()
    }

    /// Check the job can be sent; the first broken rule wins
    pub fn validate(&self) -> Result<(), JobError> {
        if self.tier == TranslationTier::Unknown {
            return Err(JobError::UnknownTier);
        }

        match &self.source {
            JobSource::File { identifier } if identifier.trim().is_empty() => {
                return Err(JobError::MissingFileIdentifier);
            }
            JobSource::Text { body } if body.trim().is_empty() => {
                return Err(JobError::MissingBody);
            }
            _ => {}
        }

        if self.slug.trim().is_empty() {
            return Err(JobError::MissingSlug);
        }

        if self.source_language.trim().is_empty() {
            return Err(JobError::MissingSourceLanguage);
        }

        if self.target_language.trim().is_empty() {
            return Err(JobError::MissingTargetLanguage);
        }

        Ok(())
    }

    /// Validate and serialize to the wire object
    pub fn to_wire(&self) -> Result<Value, GengoError> {
        self.validate()?;

        let wire = WireJob {
            job_type: self.job_type().as_str(),
            slug: &self.slug,
            body_src: self.body(),
            identifier: self.file_identifier(),
            lc_src: &self.source_language,
            lc_tgt: &self.target_language,
            tier: self.tier.as_str(),
            auto_approve: u8::from(self.auto_approve),
            force: u8::from(self.force),
            comment: self.comment.as_deref(),
            custom_data: self.custom_data.as_deref(),
            callback_url: self.callback_url.as_ref().map(Url::as_str),
            glossary_id: self.glossary_id,
            purpose: self.purpose.as_deref(),
            tone: self.tone.as_deref(),
            max_chars: self.max_chars,
            position: self.position,
        };

        Ok(serde_json::to_value(wire)?)
    }
}

/// A job known to the service
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedJob {
    id: i64,
    slug: Option<String>,
    body: Option<String>,
    body_translated: Option<String>,
    source_language: Option<String>,
    target_language: Option<String>,
    job_type: JobType,
    tier: TranslationTier,
    status: TranslationStatus,
    auto_approve: bool,
    force: bool,
    comment: Option<String>,
    custom_data: Option<String>,
    callback_url: Option<Url>,
    file_url: Option<Url>,
    captcha_url: Option<Url>,
    created: Option<DateTime<Utc>>,
    credits: f64,
    currency: Option<String>,
    unit_count: i64,
    eta: Option<Duration>,
}

impl SubmittedJob {
    /// Parse a job object; unparseable numeric fields default to zero
    pub fn from_json(value: &Value) -> Result<Self, GengoError> {
        let obj = fields::object(value, "job")?;
        let url = |key: &str| fields::text(obj, key).and_then(|s| Url::parse(&s).ok());

        let eta = fields::text(obj, "eta")
            .and_then(|s| s.trim().parse::<i64>().ok())
            .and_then(|secs| u64::try_from(secs).ok())
            .map(Duration::from_secs);

        Ok(Self {
            id: fields::lenient_i64(obj, "job_id"),
            slug: fields::text(obj, "slug"),
            body: fields::text(obj, "body_src"),
            body_translated: fields::text(obj, "body_tgt"),
            source_language: fields::text(obj, "lc_src"),
            target_language: fields::text(obj, "lc_tgt"),
            job_type: fields::text(obj, "type")
                .map(|s| JobType::parse(&s))
                .unwrap_or_default(),
            tier: fields::text(obj, "tier")
                .map(|s| TranslationTier::parse(&s))
                .unwrap_or(TranslationTier::Unknown),
            status: fields::text(obj, "status")
                .map(|s| TranslationStatus::parse(&s))
                .unwrap_or(TranslationStatus::Unknown),
            auto_approve: fields::flag(obj, "auto_approve"),
            force: fields::flag(obj, "force"),
            comment: fields::text(obj, "comment"),
            custom_data: fields::text(obj, "custom_data"),
            callback_url: url("callback_url"),
            file_url: url("tgt_file_link"),
            captcha_url: url("captcha_url"),
            created: fields::lenient_timestamp(obj, "ctime"),
            credits: fields::lenient_f64(obj, "credits"),
            currency: fields::text(obj, "currency"),
            unit_count: fields::lenient_i64(obj, "unit_count"),
            eta,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Current translation, or a machine preview when requested
    pub fn body_translated(&self) -> Option<&str> {
        self.body_translated.as_deref()
    }

    pub fn source_language(&self) -> Option<&str> {
        self.source_language.as_deref()
    }

    pub fn target_language(&self) -> Option<&str> {
        self.target_language.as_deref()
    }

    pub fn job_type(&self) -> JobType {
        self.job_type
    }

    pub fn tier(&self) -> TranslationTier {
        self.tier
    }

    pub fn status(&self) -> TranslationStatus {
        self.status
    }

    pub fn is_auto_approve(&self) -> bool {
        self.auto_approve
    }

    pub fn is_forced(&self) -> bool {
        self.force
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn custom_data(&self) -> Option<&str> {
        self.custom_data.as_deref()
    }

    pub fn callback_url(&self) -> Option<&Url> {
        self.callback_url.as_ref()
    }

    /// Link to the translated file, for file jobs
    pub fn file_url(&self) -> Option<&Url> {
        self.file_url.as_ref()
    }

    /// Captcha image required to reject the job
    pub fn captcha_url(&self) -> Option<&Url> {
        self.captcha_url.as_ref()
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }

    /// Credits charged so far
    pub fn credits(&self) -> f64 {
        self.credits
    }

    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    pub fn unit_count(&self) -> i64 {
        self.unit_count
    }

    /// Estimated time until the translation is done
    pub fn eta(&self) -> Option<Duration> {
        self.eta
    }
}

/// Either a local draft or a server-confirmed job
#[derive(Debug, Clone, PartialEq)]
pub enum JobSpec {
    Draft(JobDraft),
    Submitted(SubmittedJob),
}

impl From<JobDraft> for JobSpec {
    fn from(draft: JobDraft) -> Self {
        Self::Draft(draft)
    }
}

impl From<SubmittedJob> for JobSpec {
    fn from(job: SubmittedJob) -> Self {
        Self::Submitted(job)
    }
}
