use serde_json::Value;

use crate::errors::GengoError;
use crate::protocol::fields;

/// An order and the status of its jobs
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_id: i64,
    pub currency: Option<String>,
    pub total_credits: f64,
    pub total_units: i64,
    /// Jobs must share one translator
    pub as_group: bool,
    /// Jobs not yet processed by the service
    pub queued_jobs: i64,
    pub total_jobs: i64,
    pub available_jobs: Vec<i64>,
    pub pending_jobs: Vec<i64>,
    pub reviewable_jobs: Vec<i64>,
    pub approved_jobs: Vec<i64>,
    pub revising_jobs: Vec<i64>,
}

impl Order {
    pub fn from_json(value: &Value) -> Result<Self, GengoError> {
        let obj = fields::object(value, "order")?;

        Ok(Self {
            order_id: fields::strict_i64(obj, "order_id")?,
            currency: fields::text(obj, "currency"),
            total_credits: fields::strict_f64(obj, "total_credits")?,
            total_units: fields::strict_i64(obj, "total_units")?,
            as_group: fields::flag(obj, "as_group"),
            queued_jobs: fields::strict_i64(obj, "jobs_queued")?,
            total_jobs: fields::strict_i64(obj, "total_jobs")?,
            available_jobs: fields::int_list(obj, "jobs_available"),
            pending_jobs: fields::int_list(obj, "jobs_pending"),
            reviewable_jobs: fields::int_list(obj, "jobs_reviewable"),
            approved_jobs: fields::int_list(obj, "jobs_approved"),
            revising_jobs: fields::int_list(obj, "jobs_revising"),
        })
    }
}
