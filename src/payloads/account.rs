use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::errors::GengoError;
use crate::jobs::TranslationTier;
use crate::protocol::fields;

/// Account balance
#[derive(Debug, Clone, PartialEq)]
pub struct Balance {
    pub credits: f64,
    pub currency: Option<String>,
}

impl Balance {
    pub fn from_json(value: &Value) -> Result<Self, GengoError> {
        let obj = fields::object(value, "balance")?;

        Ok(Self {
            credits: fields::strict_f64(obj, "credits")?,
            currency: fields::text(obj, "currency"),
        })
    }
}

/// Lifetime account statistics
#[derive(Debug, Clone, PartialEq)]
pub struct AccountStats {
    pub credits_spent: f64,
    pub currency: Option<String>,
    pub user_since: DateTime<Utc>,
}

impl AccountStats {
    pub fn from_json(value: &Value) -> Result<Self, GengoError> {
        let obj = fields::object(value, "account stats")?;

        Ok(Self {
            credits_spent: fields::strict_f64(obj, "credits_spent")?,
            currency: fields::text(obj, "currency"),
            user_since: fields::strict_timestamp(obj, "user_since")?,
        })
    }
}

/// A translator the account prefers for a language pair
#[derive(Debug, Clone, PartialEq)]
pub struct PreferredTranslator {
    pub id: i64,
    pub number_of_jobs: i64,
    pub last_login: Option<DateTime<Utc>>,
}

impl PreferredTranslator {
    pub fn from_json(value: &Value) -> Result<Self, GengoError> {
        let obj = fields::object(value, "preferred translator")?;

        Ok(Self {
            id: fields::lenient_i64(obj, "id"),
            number_of_jobs: fields::lenient_i64(obj, "number_of_jobs"),
            last_login: fields::lenient_timestamp(obj, "last_login"),
        })
    }
}

/// Preferred translators for one language pair and tier
#[derive(Debug, Clone, PartialEq)]
pub struct PreferredTranslatorGroup {
    pub source_language: String,
    pub target_language: String,
    pub tier: TranslationTier,
    pub translators: Vec<PreferredTranslator>,
}

impl PreferredTranslatorGroup {
    pub fn from_json(value: &Value) -> Result<Self, GengoError> {
        let obj = fields::object(value, "preferred translator group")?;

        let translators = match obj.get("translators") {
            Some(list) => fields::array(list, "translators")?
                .iter()
                .map(PreferredTranslator::from_json)
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            source_language: fields::text(obj, "lc_src").unwrap_or_default(),
            target_language: fields::text(obj, "lc_tgt").unwrap_or_default(),
            tier: fields::text(obj, "tier")
                .map(|t| TranslationTier::parse(&t))
                .unwrap_or(TranslationTier::Unknown),
            translators,
        })
    }
}
