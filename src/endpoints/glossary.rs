use crate::client::Transport;
use crate::endpoints::{check_id, fetch, parse_list};
use crate::errors::GengoError;
use crate::payloads::Glossary;
use crate::protocol::QueryParams;

const URI_GLOSSARY: &str = "translate/glossary/";

/// Customer glossaries
#[derive(Debug, Clone, Copy)]
pub struct GlossaryApi<'a> {
    transport: &'a dyn Transport,
}

impl<'a> GlossaryApi<'a> {
    pub(crate) fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    pub async fn all(&self) -> Result<Vec<Glossary>, GengoError> {
        let payload = fetch(self.transport, URI_GLOSSARY, QueryParams::new(), true).await?;
        parse_list(&payload, "glossaries", Glossary::from_json)
    }

    pub async fn get(&self, glossary_id: i64) -> Result<Glossary, GengoError> {
        check_id(glossary_id, "glossary")?;

        let path = format!("{}{}", URI_GLOSSARY, glossary_id);
        let payload = fetch(self.transport, &path, QueryParams::new(), true).await?;
        Glossary::from_json(&payload)
    }
}
