use std::collections::HashMap;
use std::error::Error;

/// One row of a query result, mapping variable names (without `?`) to raw values.
///
/// A raw value is the lexical form of the bound term: the IRI for IRIs, the label for blank
/// nodes, and the lexical value for literals. Unbound variables are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultBinding {
    values: HashMap<String, String>,
}

impl ResultBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, variable: impl Into<String>, value: impl Into<String>) {
        self.values.insert(variable.into(), value.into());
    }

    pub fn get(&self, variable: &str) -> Option<&str> {
        self.values.get(variable).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResultBinding {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// The result of executing a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResultSet {
    /// The projected variables, in the order reported by the endpoint.
    pub variables: Vec<String>,
    /// The result rows.
    pub rows: Vec<ResultBinding>,
}

/// An error raised while executing a query against the knowledge graph.
///
/// The validator does not distinguish between transport errors and errors reported by the
/// endpoint. Both lead to an error verdict.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct QueryExecutionError {
    message: String,
    #[source]
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl QueryExecutionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// A single-line description of the error including all of its causes.
    pub fn diagnostic(&self) -> String {
        let mut diagnostic = self.message.clone();
        let mut source = Error::source(self);
        while let Some(error) = source {
            diagnostic.push_str(": ");
            diagnostic.push_str(&error.to_string());
            source = error.source();
        }
        diagnostic.lines().collect::<Vec<_>>().join(" ")
    }
}

/// Executes queries against a knowledge graph.
///
/// Implementations perform exactly one attempt per call and do not retry.
pub trait QueryExecutor {
    /// Executes `query` and returns all of its result rows.
    fn execute(&self, query: &str) -> Result<QueryResultSet, QueryExecutionError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn binding_lookup() {
        let binding: ResultBinding = [("livro", "http://ex.org/Livro1")].into_iter().collect();
        assert_eq!(binding.get("livro"), Some("http://ex.org/Livro1"));
        assert_eq!(binding.get("autor"), None);
        assert_eq!(binding.len(), 1);
    }

    #[test]
    fn diagnostic_includes_causes_on_one_line() {
        let error = QueryExecutionError::with_source(
            "Failed to query http://localhost:7200",
            io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused\n(os error 111)"),
        );
        assert_eq!(
            error.diagnostic(),
            "Failed to query http://localhost:7200: connection refused (os error 111)"
        );
        assert_eq!(error.to_string(), "Failed to query http://localhost:7200");
    }

    #[test]
    fn diagnostic_follows_nested_sources() {
        let error = QueryExecutionError::with_source(
            "Query execution failed",
            QueryExecutionError::with_source("Could not query http://localhost:7200", "timed out"),
        );
        assert_eq!(
            error.diagnostic(),
            "Query execution failed: Could not query http://localhost:7200: timed out"
        );
    }

    #[test]
    fn diagnostic_without_source() {
        assert_eq!(QueryExecutionError::new("boom").diagnostic(), "boom");
    }
}
