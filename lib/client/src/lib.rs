//! A blocking [SPARQL 1.1 Protocol](https://www.w3.org/TR/sparql11-protocol/) client.
//!
//! [SparqlClient] implements [QueryExecutor](cqcheck_validation::QueryExecutor) such that
//! competency questions can be validated against a remote endpoint (e.g., GraphDB).

mod client;
mod config;
mod error;
mod results;

pub use client::SparqlClient;
pub use config::{ClientConfig, DEFAULT_ENDPOINT};
pub use error::SparqlClientError;
pub use results::{parse_json_results, BOOLEAN_VARIABLE};
