use cqcheck_validation::QueryExecutionError;
use reqwest::{StatusCode, Url};
use sparesults::QueryResultsParseError;

/// An error raised by the [SparqlClient](crate::SparqlClient).
#[derive(Debug, thiserror::Error)]
pub enum SparqlClientError {
    /// The endpoint is not a valid HTTP(S) URL.
    #[error("Invalid endpoint URL '{url}': {message}")]
    InvalidEndpoint { url: String, message: String },
    /// The HTTP client could not be initialized.
    #[error("Could not create the HTTP client")]
    ClientBuild(#[source] reqwest::Error),
    /// The request could not be sent or the response could not be read.
    #[error("Could not query {endpoint}")]
    Request {
        endpoint: Url,
        #[source]
        error: reqwest::Error,
    },
    /// The endpoint rejected the query (e.g., because of a syntax error).
    #[error("The endpoint responded with {status}: {body}")]
    Status { status: StatusCode, body: String },
    /// The response is not a valid SPARQL JSON result.
    #[error("Invalid query results")]
    Results(#[from] QueryResultsParseError),
}

impl From<SparqlClientError> for QueryExecutionError {
    fn from(error: SparqlClientError) -> Self {
        QueryExecutionError::with_source("Query execution failed", error)
    }
}
