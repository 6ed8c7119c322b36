use crate::SparqlClientError;
use reqwest::Url;
use std::time::Duration;

/// The repository queried when no endpoint is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:7200/repositories/pinakes";

/// Holds the configuration of a [SparqlClient](crate::SparqlClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// The SPARQL query endpoint.
    pub endpoint: Url,
    /// The maximum duration of a single query. If [None], the endpoint decides.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            timeout: None,
        }
    }

    /// Creates a configuration for the endpoint at `url`.
    pub fn parse(url: &str) -> Result<Self, SparqlClientError> {
        let endpoint = Url::parse(url).map_err(|error| SparqlClientError::InvalidEndpoint {
            url: url.to_owned(),
            message: error.to_string(),
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(SparqlClientError::InvalidEndpoint {
                url: url.to_owned(),
                message: "only http and https are supported".to_owned(),
            });
        }
        Ok(Self::new(endpoint))
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_endpoint() {
        let config = ClientConfig::parse(DEFAULT_ENDPOINT).unwrap();
        assert_eq!(config.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn parse_rejects_invalid_urls() {
        assert!(matches!(
            ClientConfig::parse("not a url"),
            Err(SparqlClientError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            ClientConfig::parse("ftp://example.org/sparql"),
            Err(SparqlClientError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn with_timeout() {
        let config = ClientConfig::parse("https://example.org/sparql")
            .unwrap()
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }
}
