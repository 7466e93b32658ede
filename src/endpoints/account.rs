use crate::client::Transport;
use crate::endpoints::{fetch, parse_list};
use crate::errors::GengoError;
use crate::payloads::{AccountStats, Balance, PreferredTranslatorGroup};
use crate::protocol::QueryParams;

const URI_BALANCE: &str = "account/balance";
const URI_STATS: &str = "account/stats";
const URI_PREFERRED_TRANSLATORS: &str = "account/preferred_translators";

/// Account information
#[derive(Debug, Clone, Copy)]
pub struct AccountApi<'a> {
    transport: &'a dyn Transport,
}

impl<'a> AccountApi<'a> {
    pub(crate) fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Credits left on the account
    pub async fn balance(&self) -> Result<Balance, GengoError> {
        let payload = fetch(self.transport, URI_BALANCE, QueryParams::new(), true).await?;
        Balance::from_json(&payload)
    }

    /// Lifetime spending and sign-up date
    pub async fn stats(&self) -> Result<AccountStats, GengoError> {
        let payload = fetch(self.transport, URI_STATS, QueryParams::new(), true).await?;
        AccountStats::from_json(&payload)
    }

    /// Preferred translators, grouped by language pair and tier
    pub async fn preferred_translators(&self) -> Result<Vec<PreferredTranslatorGroup>, GengoError> {
        let payload =
            fetch(self.transport, URI_PREFERRED_TRANSLATORS, QueryParams::new(), true).await?;
        parse_list(&payload, "preferred translators", PreferredTranslatorGroup::from_json)
    }
}
