use crate::{parse_json_results, ClientConfig, SparqlClientError};
use cqcheck_validation::{QueryExecutionError, QueryExecutor, QueryResultSet};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;

const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Error bodies of the endpoint are cut after this many characters.
const MAX_BODY_EXCERPT: usize = 300;

/// Executes queries against a SPARQL 1.1 protocol endpoint (e.g., a GraphDB repository).
///
/// Every query is sent once as an URL-encoded `POST` request. Failed requests are not retried.
#[derive(Debug, Clone)]
pub struct SparqlClient {
    config: ClientConfig,
    http: Client,
}

impl SparqlClient {
    pub fn new(config: ClientConfig) -> Result<Self, SparqlClientError> {
        let http = Client::builder()
            .user_agent(concat!("cqcheck/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(SparqlClientError::ClientBuild)?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Executes `query` and returns all result rows.
    pub fn query(&self, query: &str) -> Result<QueryResultSet, SparqlClientError> {
        let endpoint = &self.config.endpoint;
        tracing::debug!("Sending query to {endpoint}");

        let request_error = |error| SparqlClientError::Request {
            endpoint: endpoint.clone(),
            error,
        };
        let response = self
            .http
            .post(endpoint.clone())
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .form(&[("query", query)])
            .send()
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SparqlClientError::Status {
                status,
                body: excerpt(&body),
            });
        }

        let body = response.bytes().map_err(request_error)?;
        Ok(parse_json_results(&body)?)
    }
}

impl QueryExecutor for SparqlClient {
    fn execute(&self, query: &str) -> Result<QueryResultSet, QueryExecutionError> {
        Ok(self.query(query)?)
    }
}

fn excerpt(body: &str) -> String {
    let body = body.split_whitespace().collect::<Vec<_>>().join(" ");
    match body.char_indices().nth(MAX_BODY_EXCERPT) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body,
    }
}
