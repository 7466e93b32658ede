/*!
 * File uploads for file quotes.
 *
 * A file is first sent to the quote endpoint; the identifier the quote
 * returns is then used to submit a `JobDraft::file` job.
 */

use std::path::Path;

use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::{GengoError, JobError};
use crate::jobs::model::{JobType, TranslationTier};

/// File content sent as one multipart part
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    file_key: String,
    file_name: String,
    content: Bytes,
}

impl FileUpload {
    /// Wrap in-memory content; the file key defaults to a random UUID
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Result<Self, GengoError> {
        let file_name = file_name.into();
        if file_name.trim().is_empty() {
            return Err(GengoError::validation("File name not provided"));
        }

        Ok(Self {
            file_key: Uuid::new_v4().to_string(),
            file_name,
            content: content.into(),
        })
    }

    /// Read a file from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GengoError> {
        let path = path.as_ref();
        let content = std::fs::read(path).map_err(|e| {
            GengoError::validation(format!("Cannot read file {}: {}", path.display(), e))
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self::new(file_name, content)
    }

    /// Use a caller-chosen file key
    pub fn with_file_key(mut self, file_key: impl Into<String>) -> Self {
        self.file_key = file_key.into();
        self
    }

    /// Key linking the multipart part to its job description
    pub fn file_key(&self) -> &str {
        &self.file_key
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

/// A file to be quoted, with the job attributes the quote needs
#[derive(Debug, Clone, PartialEq)]
pub struct FileQuoteRequest {
    upload: FileUpload,
    slug: String,
    source_language: String,
    target_language: String,
    tier: TranslationTier,
}

#[derive(Debug, Serialize)]
struct WireFileJob<'a> {
    #[serde(rename = "type")]
    job_type: &'static str,
    file_key: &'a str,
    slug: &'a str,
    lc_src: &'a str,
    lc_tgt: &'a str,
    tier: &'static str,
}

impl FileQuoteRequest {
    pub fn new(
        upload: FileUpload,
        slug: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            upload,
            slug: slug.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
            tier: TranslationTier::default(),
        }
    }

    pub fn tier(mut self, tier: TranslationTier) -> Self {
        self.tier = tier;
        self
    }

    pub fn upload(&self) -> &FileUpload {
        &self.upload
    }

    /// Validate and serialize to the wire object
    pub fn to_wire(&self) -> Result<Value, GengoError> {
        if self.tier == TranslationTier::Unknown {
            return Err(JobError::UnknownTier.into());
        }
        if self.slug.trim().is_empty() {
            return Err(JobError::MissingSlug.into());
        }
        if self.source_language.trim().is_empty() {
            return Err(JobError::MissingSourceLanguage.into());
        }
        if self.target_language.trim().is_empty() {
            return Err(JobError::MissingTargetLanguage.into());
        }

        let wire = WireFileJob {
            job_type: JobType::File.as_str(),
            file_key: self.upload.file_key(),
            slug: &self.slug,
            lc_src: &self.source_language,
            lc_tgt: &self.target_language,
            tier: self.tier.as_str(),
        };

        Ok(serde_json::to_value(wire)?)
    }
}
