//! Browse node lookup command.

use crate::amazon::{AmazonApi, AmazonClient, BrowseNode, Params, ProductApi};
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{Context, Result};
use tracing::info;

/// Looks up browse nodes with their ancestry and children.
pub struct BrowseCommand {
    config: Config,
}

impl BrowseCommand {
    /// Creates a new browse command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Looks up the nodes and returns formatted output.
    pub async fn execute(&self, node_ids: &[u64], response_group: Option<&str>) -> Result<String> {
        let client = AmazonClient::new(&self.config).await.context("Failed to create API client")?;

        self.execute_with_client(&client, node_ids, response_group).await
    }

    /// Looks up the nodes with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl ProductApi,
        node_ids: &[u64],
        response_group: Option<&str>,
    ) -> Result<String> {
        if node_ids.is_empty() {
            anyhow::bail!("No browse node ids given");
        }

        let joined = node_ids.iter().map(u64::to_string).collect::<Vec<_>>().join(",");
        info!("Looking up browse nodes: {}", joined);

        let mut params = Params::new().with("BrowseNodeId", &joined);
        if let Some(group) = response_group {
            params.set("ResponseGroup", group);
        }

        let api = AmazonApi::with_client(client, self.config.max_pages);
        let nodes = api.browse_node_lookup(&params).await?;

        let summaries: Vec<_> = nodes.iter().map(BrowseNode::summary).collect();
        Ok(Formatter::new(self.config.format).format_browse_nodes(&summaries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amazon::mock::MockProductApi;
    use crate::config::OutputFormat;

    const NODE_XML: &str = "<BrowseNodeLookupResponse><BrowseNodes>\
        <Request><IsValid>True</IsValid></Request>\
        <BrowseNode><BrowseNodeId>2642129011</BrowseNodeId><Name>eBook Readers</Name>\
        <Children><BrowseNode><BrowseNodeId>1</BrowseNodeId><Name>Covers</Name></BrowseNode></Children>\
        <Ancestors><BrowseNode><BrowseNodeId>172282</BrowseNodeId><Name>Electronics</Name></BrowseNode></Ancestors>\
        </BrowseNode></BrowseNodes></BrowseNodeLookupResponse>";

    fn make_test_config() -> Config {
        Config { delay_ms: 0, format: OutputFormat::Table, ..Config::default() }
    }

    #[tokio::test]
    async fn test_browse_table() {
        let client = MockProductApi::new(vec![NODE_XML.to_string()]);
        let output = BrowseCommand::new(make_test_config())
            .execute_with_client(&client, &[2642129011], None)
            .await
            .unwrap();

        assert!(output.contains("ID:       2642129011"));
        assert!(output.contains("Name:     eBook Readers"));
        assert!(output.contains("Children: Covers"));
        assert!(output.contains("Total: 1 nodes"));
        assert_eq!(client.params(0).get("ResponseGroup"), Some("BrowseNodeInfo"));
    }

    #[tokio::test]
    async fn test_browse_multiple_ids_and_group() {
        let client = MockProductApi::new(vec![NODE_XML.to_string()]);
        BrowseCommand::new(make_test_config())
            .execute_with_client(&client, &[1, 2], Some("TopSellers"))
            .await
            .unwrap();

        let params = client.params(0);
        assert_eq!(params.get("BrowseNodeId"), Some("1,2"));
        assert_eq!(params.get("ResponseGroup"), Some("TopSellers"));
    }

    #[tokio::test]
    async fn test_browse_error() {
        let xml = "<BrowseNodeLookupResponse><BrowseNodes><Request><IsValid>True</IsValid><Errors><Error>\
                   <Code>AWS.InvalidParameterValue</Code><Message>bad node</Message>\
                   </Error></Errors></Request></BrowseNodes></BrowseNodeLookupResponse>";
        let client = MockProductApi::new(vec![xml.to_string()]);
        let err = BrowseCommand::new(make_test_config())
            .execute_with_client(&client, &[0], None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("AWS.InvalidParameterValue"));
    }

    #[tokio::test]
    async fn test_browse_requires_ids() {
        let client = MockProductApi::new(Vec::new());
        assert!(BrowseCommand::new(make_test_config()).execute_with_client(&client, &[], None).await.is_err());
    }
}
