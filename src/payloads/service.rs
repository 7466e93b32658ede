use serde_json::Value;
use std::time::Duration;

use crate::errors::GengoError;
use crate::jobs::{JobType, TranslationTier};
use crate::protocol::fields;

/// A language the service translates from or to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub name: String,
    pub localized_name: String,
    /// Language code, as used in `lc_src`/`lc_tgt`
    pub code: String,
    /// `word` or `character`
    pub unit_type: String,
}

impl Language {
    pub fn from_json(value: &Value) -> Result<Self, GengoError> {
        let obj = fields::object(value, "language")?;

        Ok(Self {
            name: fields::text(obj, "language").unwrap_or_default(),
            localized_name: fields::text(obj, "localized_name").unwrap_or_default(),
            code: fields::text(obj, "lc").unwrap_or_default(),
            unit_type: fields::text(obj, "unit_type").unwrap_or_default(),
        })
    }
}

/// A supported source/target combination with its unit price
#[derive(Debug, Clone, PartialEq)]
pub struct LanguagePair {
    pub source_language: String,
    pub target_language: String,
    pub tier: TranslationTier,
    pub currency: Option<String>,
    pub unit_price: f64,
}

impl LanguagePair {
    pub fn from_json(value: &Value) -> Result<Self, GengoError> {
        let obj = fields::object(value, "language pair")?;

        Ok(Self {
            source_language: fields::text(obj, "lc_src").unwrap_or_default(),
            target_language: fields::text(obj, "lc_tgt").unwrap_or_default(),
            tier: fields::text(obj, "tier")
                .map(|t| TranslationTier::parse(&t))
                .unwrap_or(TranslationTier::Unknown),
            currency: fields::text(obj, "currency"),
            unit_price: fields::strict_f64(obj, "unit_price")?,
        })
    }
}

/// Price estimate for one job
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub unit_count: i64,
    pub credits: f64,
    pub currency: Option<String>,
    /// Identifier to submit a quoted file with
    pub identifier: Option<String>,
    pub source_language: Option<String>,
    pub eta: Duration,
    pub job_type: JobType,
}

impl Quote {
    pub fn from_json(value: &Value) -> Result<Self, GengoError> {
        let obj = fields::object(value, "quote")?;

        let eta = fields::strict_i64(obj, "eta")?;
        let eta = u64::try_from(eta)
            .map(Duration::from_secs)
            .map_err(|_| GengoError::protocol(format!("Quote eta is negative: {}", eta)))?;

        Ok(Self {
            unit_count: fields::strict_i64(obj, "unit_count")?,
            credits: fields::strict_f64(obj, "credits")?,
            currency: fields::text(obj, "currency"),
            identifier: fields::text(obj, "identifier"),
            source_language: fields::text(obj, "lc_src"),
            eta,
            job_type: fields::text(obj, "type")
                .map(|t| JobType::parse(&t))
                .unwrap_or_default(),
        })
    }
}

/// Quote for an uploaded file, with the text the service extracted
#[derive(Debug, Clone, PartialEq)]
pub struct FileQuote {
    pub quote: Quote,
    pub body: Option<String>,
    pub title: Option<String>,
}

impl FileQuote {
    pub fn from_json(value: &Value) -> Result<Self, GengoError> {
        let quote = Quote::from_json(value)?;
        let obj = fields::object(value, "file quote")?;

        Ok(Self {
            quote,
            body: fields::text(obj, "body"),
            title: fields::text(obj, "title"),
        })
    }
}

/// Items of a `jobs` property that is either an array or a keyed object
pub(crate) fn job_entries<'a>(payload: &'a Value) -> Result<Vec<&'a Value>, GengoError> {
    let obj = fields::object(payload, "quote response")?;

    match fields::property(obj, "jobs")? {
        Value::Array(items) => Ok(items.iter().collect()),
        Value::Object(items) => Ok(items.values().collect()),
        other => Err(GengoError::protocol(format!(
            "Expected 'jobs' to be an array or object, got {}",
            other
        ))),
    }
}
