use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use crate::errors::GengoError;
use crate::protocol::fields;

/// Glossary timestamps are formatted text, not Unix seconds
const GLOSSARY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Language reference inside a glossary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageIdAndCode {
    pub id: i64,
    pub code: String,
}

/// A customer glossary
#[derive(Debug, Clone, PartialEq)]
pub struct Glossary {
    pub id: i64,
    pub customer_user_id: i64,
    pub created: Option<DateTime<Utc>>,
    pub source_language: LanguageIdAndCode,
    pub target_languages: Vec<LanguageIdAndCode>,
    pub unit_count: i64,
    pub is_public: bool,
    pub status: i64,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl Glossary {
    pub fn from_json(value: &Value) -> Result<Self, GengoError> {
        let obj = fields::object(value, "glossary")?;

        let created = fields::text(obj, "ctime").and_then(|s| parse_time(&s));

        // Each target language is a `[id, code]` pair
        let target_languages = match obj.get("target_languages") {
            Some(list) => fields::array(list, "target_languages")?
                .iter()
                .filter_map(|pair| match pair.as_array().map(Vec::as_slice) {
                    Some([id, code, ..]) => Some(LanguageIdAndCode {
                        id: id
                            .as_i64()
                            .or_else(|| id.as_str().and_then(|s| s.parse().ok()))
                            .unwrap_or(0),
                        code: code.as_str().unwrap_or_default().to_string(),
                    }),
                    _ => None,
                })
                .collect(),
            None => Vec::new(),
        };

        Ok(Self {
            id: fields::strict_i64(obj, "id")?,
            customer_user_id: fields::lenient_i64(obj, "customer_user_id"),
            created,
            source_language: LanguageIdAndCode {
                id: fields::lenient_i64(obj, "source_language_id"),
                code: fields::text(obj, "source_language_code").unwrap_or_default(),
            },
            target_languages,
            unit_count: fields::lenient_i64(obj, "unit_count"),
            is_public: fields::flag(obj, "is_public"),
            status: fields::lenient_i64(obj, "status"),
            title: fields::text(obj, "title"),
            description: fields::text(obj, "description"),
        })
    }
}

fn parse_time(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), GLOSSARY_TIME_FORMAT)
        .ok()
        .map(|t| t.and_utc())
}
