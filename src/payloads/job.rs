use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt;

use crate::errors::GengoError;
use crate::protocol::fields;

/// Who wrote a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorType {
    Translator,
    SeniorTranslator,
    Customer,
    Unknown,
}

impl AuthorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Translator => "translator",
            Self::SeniorTranslator => "senior translator",
            Self::Customer => "customer",
            Self::Unknown => "unknown",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "translator" => Self::Translator,
            "senior translator" | "seniortranslator" => Self::SeniorTranslator,
            "customer" => Self::Customer,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for AuthorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a job's comment thread
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub body: String,
    pub author: AuthorType,
    pub created: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn from_json(value: &Value) -> Result<Self, GengoError> {
        let obj = fields::object(value, "comment")?;

        Ok(Self {
            body: fields::text(obj, "body").unwrap_or_default(),
            author: fields::text(obj, "author")
                .map(|a| AuthorType::parse(&a))
                .unwrap_or(AuthorType::Unknown),
            created: fields::lenient_timestamp(obj, "ctime"),
        })
    }
}

/// Rating and comment left when a job was approved
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub rating: f64,
    pub for_translator: Option<String>,
}

impl Feedback {
    pub fn from_json(value: &Value) -> Result<Self, GengoError> {
        let obj = fields::object(value, "feedback")?;

        Ok(Self {
            rating: fields::lenient_f64(obj, "rating"),
            for_translator: fields::text(obj, "for_translator"),
        })
    }
}

/// A past version of a translation
#[derive(Debug, Clone, PartialEq)]
pub struct Revision {
    pub created: Option<DateTime<Utc>>,
    pub body: Option<String>,
}

impl Revision {
    pub fn from_json(value: &Value) -> Result<Self, GengoError> {
        let obj = fields::object(value, "revision")?;

        Ok(Self {
            created: fields::lenient_timestamp(obj, "ctime"),
            body: fields::text(obj, "body_tgt"),
        })
    }
}

/// An id paired with a creation time, as listed by `recent` and `revisions`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimestampedId {
    pub id: i64,
    pub created: Option<DateTime<Utc>>,
}

impl TimestampedId {
    /// Parse leniently, reading the id and timestamp from the given keys
    pub fn from_json(value: &Value, id_key: &str, created_key: &str) -> Result<Self, GengoError> {
        let obj = fields::object(value, "timestamped id")?;

        Ok(Self {
            id: fields::lenient_i64(obj, id_key),
            created: fields::lenient_timestamp(obj, created_key),
        })
    }
}

/// Jobs submitted together as a group
#[derive(Debug, Clone, PartialEq)]
pub struct JobGroup {
    pub created: DateTime<Utc>,
    pub job_ids: Vec<i64>,
}

impl JobGroup {
    pub fn from_json(value: &Value) -> Result<Self, GengoError> {
        let obj = fields::object(value, "job group")?;

        let job_ids = match obj.get("jobs") {
            Some(jobs) => fields::array(jobs, "jobs")?
                .iter()
                .map(|job| fields::object(job, "job").and_then(|o| fields::strict_i64(o, "job_id")))
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            created: fields::strict_timestamp(obj, "ctime")?,
            job_ids,
        })
    }
}
