/*!
 * Common test utilities for the gengo test suite
 */

use anyhow::Result;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use gengo::{GengoClient, MockTransport};

// Re-export the fake service module
pub mod fake_service;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    std::fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Route library logs to the test output; repeated calls are ignored
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Client over a fresh mock transport
pub fn mock_client() -> (Arc<MockTransport>, GengoClient) {
    init_test_logging();
    let mock = Arc::new(MockTransport::new());
    let client = GengoClient::with_transport(mock.clone());
    (mock, client)
}

/// Success envelope as a raw body
pub fn ok_body(payload: Value) -> String {
    json!({"opstat": "ok", "response": payload}).to_string()
}

/// A job object as the service reports it
pub fn existing_job(id: i64, slug: &str, body: &str) -> Value {
    json!({
        "job_id": id.to_string(),
        "slug": slug,
        "body_src": body,
        "lc_src": "en",
        "lc_tgt": "ja",
        "unit_count": "2",
        "tier": "standard",
        "credits": "0.10",
        "currency": "USD",
        "status": "available",
        "eta": "25",
        "ctime": 1_370_000_000
    })
}

/// Preferred translators, as returned by `account/preferred_translators`
pub fn preferred_translators_fixture() -> Value {
    json!([
        {
            "lc_src": "en",
            "lc_tgt": "ja",
            "tier": "standard",
            "translators": [
                {"id": 8596, "number_of_jobs": 1, "last_login": 1371188014},
                {"id": 24123, "number_of_jobs": 2, "last_login": 1372822132}
            ]
        },
        {
            "lc_src": "ja",
            "lc_tgt": "en",
            "tier": "pro",
            "translators": [
                {"id": 14765, "number_of_jobs": 10, "last_login": 1372906112},
                {"id": 3627, "number_of_jobs": 1, "last_login": 1372907423}
            ]
        }
    ])
}
