/*!
 * Stateful fake of the job submission endpoint.
 *
 * Remembers every accepted job and reports a resubmitted job (same body and
 * language pair, `force` off) as a duplicate of the stored one, the way the
 * real service does.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value, json};

use gengo::{FileUpload, GengoError, QueryParams, Transport};

#[derive(Debug, Default)]
struct FakeState {
    next_job_id: i64,
    next_order_id: i64,
    jobs: Vec<Value>,
}

/// In-memory Gengo that only knows `translate/jobs` and `translate/job/{id}`
#[derive(Debug, Default)]
pub struct FakeGengo {
    state: Mutex<FakeState>,
}

impl FakeGengo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored_jobs(&self) -> usize {
        self.state.lock().jobs.len()
    }

    fn submit(&self, payload: &Value) -> Value {
        let mut state = self.state.lock();
        let mut duplicates = Map::new();
        let mut accepted = 0;

        let Some(jobs) = payload["jobs"].as_object() else {
            return json!({"opstat": "error", "err": {"code": 1350, "msg": "jobs missing"}});
        };

        for (key, job) in jobs {
            let same = |stored: &&Value| {
                stored["body_src"] == job["body_src"]
                    && stored["lc_src"] == job["lc_src"]
                    && stored["lc_tgt"] == job["lc_tgt"]
            };

            let matches: Vec<Value> = if job["force"] == 1 {
                Vec::new()
            } else {
                state.jobs.iter().filter(same).cloned().collect()
            };

            if matches.is_empty() {
                state.next_job_id += 1;
                let mut stored = job.clone();
                stored["job_id"] = json!(state.next_job_id.to_string());
                stored["status"] = json!("available");
                stored["ctime"] = json!(1_370_000_000 + state.next_job_id);
                state.jobs.push(stored);
                accepted += 1;
            } else {
                duplicates.insert(key.clone(), Value::Array(matches));
            }
        }

        state.next_order_id += 1;
        let group_id = if payload["as_group"] == 1 { "77" } else { "0" };

        let mut response = json!({
            "order_id": state.next_order_id.to_string(),
            "job_count": accepted.to_string(),
            "credits_used": format!("{:.2}", 0.05 * accepted as f64),
            "currency": "USD",
            "group_id": group_id,
        });
        if !duplicates.is_empty() {
            response["jobs"] = Value::Object(duplicates);
        }

        json!({"opstat": "ok", "response": response})
    }

    fn job(&self, path: &str) -> Value {
        let id = path.trim_start_matches("translate/job/");
        let state = self.state.lock();

        match state.jobs.iter().find(|job| job["job_id"] == id) {
            Some(job) => json!({"opstat": "ok", "response": {"job": job}}),
            None => json!({"opstat": "error", "err": {"code": "2250", "msg": "Not found"}}),
        }
    }
}

#[async_trait]
impl Transport for FakeGengo {
    async fn get(
        &self,
        path: &str,
        _params: QueryParams,
        _authenticated: bool,
    ) -> Result<String, GengoError> {
        if path.starts_with("translate/job/") {
            return Ok(self.job(path).to_string());
        }
        Err(GengoError::Transport(format!("Unsupported path {}", path)))
    }

    async fn post_form(&self, path: &str, _fields: QueryParams) -> Result<String, GengoError> {
        Err(GengoError::Transport(format!("Unsupported path {}", path)))
    }

    async fn post_json(
        &self,
        path: &str,
        payload: Value,
        _files: &[FileUpload],
    ) -> Result<String, GengoError> {
        match path {
            "translate/jobs" => Ok(self.submit(&payload).to_string()),
            _ => Err(GengoError::Transport(format!("Unsupported path {}", path))),
        }
    }

    async fn put(&self, path: &str, _payload: Value) -> Result<String, GengoError> {
        Err(GengoError::Transport(format!("Unsupported path {}", path)))
    }

    async fn delete(&self, path: &str) -> Result<String, GengoError> {
        Err(GengoError::Transport(format!("Unsupported path {}", path)))
    }

    async fn get_bytes(&self, path: &str, _authenticated: bool) -> Result<Vec<u8>, GengoError> {
        Err(GengoError::Transport(format!("Unsupported path {}", path)))
    }
}
