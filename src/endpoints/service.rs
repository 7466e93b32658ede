use serde_json::{Value, json};

use crate::client::Transport;
use crate::endpoints::{fetch, parse_list};
use crate::errors::GengoError;
use crate::jobs::{FileQuoteRequest, JobSpec, encode_job_list};
use crate::payloads::service::job_entries;
use crate::payloads::{FileQuote, Language, LanguagePair, Quote};
use crate::protocol::QueryParams;
use crate::protocol::envelope::unpack;

const URI_LANGUAGES: &str = "translate/service/languages";
const URI_LANGUAGE_PAIRS: &str = "translate/service/language_pairs";
const URI_QUOTE: &str = "translate/service/quote";
const URI_QUOTE_FILES: &str = "translate/service/quote/file";

/// Languages, language pairs and quotes
#[derive(Debug, Clone, Copy)]
pub struct ServiceApi<'a> {
    transport: &'a dyn Transport,
}

impl<'a> ServiceApi<'a> {
    pub(crate) fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Every language the service supports
    pub async fn languages(&self) -> Result<Vec<Language>, GengoError> {
        let payload = fetch(self.transport, URI_LANGUAGES, QueryParams::new(), false).await?;
        parse_list(&payload, "languages", Language::from_json)
    }

    /// Every supported language pair
    pub async fn language_pairs(&self) -> Result<Vec<LanguagePair>, GengoError> {
        self.fetch_pairs(QueryParams::new()).await
    }

    /// Language pairs translating from `source_language`
    pub async fn language_pairs_from(
        &self,
        source_language: &str,
    ) -> Result<Vec<LanguagePair>, GengoError> {
        if source_language.trim().is_empty() {
            return Err(GengoError::validation("Source language not provided"));
        }

        self.fetch_pairs(QueryParams::new().with("lc_src", source_language)).await
    }

    async fn fetch_pairs(&self, params: QueryParams) -> Result<Vec<LanguagePair>, GengoError> {
        let payload = fetch(self.transport, URI_LANGUAGE_PAIRS, params, false).await?;
        parse_list(&payload, "language pairs", LanguagePair::from_json)
    }

    /// Price estimate for text jobs, in input order
    pub async fn quote<I>(&self, as_group: bool, jobs: I) -> Result<Vec<Quote>, GengoError>
    where
        I: IntoIterator,
        I::Item: Into<JobSpec>,
    {
        let wire = encode_job_list(jobs)?;
        if wire.is_empty() {
            return Err(GengoError::validation("At least one job is required"));
        }

        let payload = json!({
            "jobs": Value::Array(wire),
            "as_group": u8::from(as_group),
        });

        let raw = self.transport.post_json(URI_QUOTE, payload, &[]).await?;
        let response = unpack(&raw)?;
        job_entries(&response)?
            .into_iter()
            .map(Quote::from_json)
            .collect()
    }

    /// Upload files and quote them; each quote carries the identifier to
    /// submit the file with
    pub async fn quote_files(
        &self,
        requests: &[FileQuoteRequest],
    ) -> Result<Vec<FileQuote>, GengoError> {
        if requests.is_empty() {
            return Err(GengoError::validation("At least one file is required"));
        }

        let wire = requests
            .iter()
            .map(FileQuoteRequest::to_wire)
            .collect::<Result<Vec<_>, _>>()?;
        let uploads: Vec<_> = requests.iter().map(|r| r.upload().clone()).collect();

        let payload = json!({ "jobs": Value::Array(wire) });

        let raw = self.transport.post_json(URI_QUOTE_FILES, payload, &uploads).await?;
        let response = unpack(&raw)?;
        job_entries(&response)?
            .into_iter()
            .map(FileQuote::from_json)
            .collect()
    }
}
