//! Rules stored in a Supabase table, read over PostgREST.

use async_trait::async_trait;
use forty_rules_net::{HttpClient, RestApiClient};

use super::{DataUnavailable, RulesSource};
use crate::config::SourceConfig;
use crate::model::{Rule, sort_by_id};

const TARGET: &str = "forty_rules::source";

enum SourceState {
    /// Construction failed; every fetch reports this error without a request.
    Unavailable(DataUnavailable),
    Ready { client: RestApiClient, table: String },
}

/// Reads `GET {url}/rest/v1/{table}?select=*&order=id.asc`.
///
/// Rows whose text is blank are dropped with a warning.
///
/// An unconfigured source is still a valid value: it fails fast on every
/// fetch, naming the missing variables.
pub struct SupabaseRulesSource {
    state: SourceState,
}

impl SupabaseRulesSource {
    /// Build the source from configuration.
    pub fn new(config: &SourceConfig) -> Self {
        let state = match (&config.url, &config.anon_key) {
            (Some(url), Some(key)) => match Self::build_client(url, key, config) {
                Ok(client) => SourceState::Ready {
                    client,
                    table: config.table.clone(),
                },
                Err(err) => {
                    tracing::error!(target: TARGET, error = %err, "Failed to create rules client");
                    SourceState::Unavailable(err)
                }
            },
            _ => {
                let missing = config.missing();
                tracing::warn!(target: TARGET, ?missing, "Rules source is not configured");
                SourceState::Unavailable(DataUnavailable::NotConfigured { missing })
            }
        };

        Self { state }
    }

    fn build_client(
        url: &str,
        key: &str,
        config: &SourceConfig,
    ) -> Result<RestApiClient, DataUnavailable> {
        let base_url = format!("{}/rest/v1", url.trim_end_matches('/'));
        let client = RestApiClient::builder(base_url)
            .http_client_builder(HttpClient::builder().timeout(config.timeout))
            .api_key("apikey", key)
            .bearer_auth(key)
            .accept_json()
            .build()?;
        Ok(client)
    }

    /// Whether fetches will reach the network.
    pub fn is_configured(&self) -> bool {
        matches!(self.state, SourceState::Ready { .. })
    }
}

#[async_trait]
impl RulesSource for SupabaseRulesSource {
    async fn fetch_all_rules(&self) -> Result<Vec<Rule>, DataUnavailable> {
        let (client, table) = match &self.state {
            SourceState::Unavailable(err) => return Err(err.clone()),
            SourceState::Ready { client, table } => (client, table),
        };

        tracing::debug!(target: TARGET, base_url = client.base_url(), %table, "Fetching rules");

        let mut rules: Vec<Rule> = client
            .get(table)
            .query("select", "*")
            .query("order", "id.asc")
            .json_response()
            .await
            .inspect_err(|err| {
                tracing::warn!(target: TARGET, error = %err, "Rules fetch failed");
            })?;

        let fetched = rules.len();
        rules.retain(Rule::has_text);
        if rules.len() < fetched {
            tracing::warn!(
                target: TARGET,
                skipped = fetched - rules.len(),
                "Skipping rules without text"
            );
        }

        sort_by_id(&mut rules);
        tracing::info!(target: TARGET, count = rules.len(), "Rules fetched");
        Ok(rules)
    }
}

impl std::fmt::Debug for SupabaseRulesSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.state {
            SourceState::Unavailable(err) => f
                .debug_struct("SupabaseRulesSource")
                .field("unavailable", err)
                .finish(),
            SourceState::Ready { client, table } => f
                .debug_struct("SupabaseRulesSource")
                .field("base_url", &client.base_url())
                .field("table", table)
                .finish(),
        }
    }
}
