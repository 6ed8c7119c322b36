//! Checks an ontology against its competency questions.
//!
//! Competency questions are read from a spreadsheet (exported as CSV). For every question with a
//! SPARQL query, a query artifact (`<id>.rq`) is [generated](generate::generate_artifacts). The
//! artifacts are then [validated](validate::validate_directory) by executing them against a
//! SPARQL endpoint and comparing the results with the expected answers.

pub mod error;
pub mod generate;
pub mod sheet;
pub mod validate;

pub mod model {
    pub use cqcheck_model::*;
}

pub mod query {
    pub use cqcheck_query::*;
}

pub mod validation {
    pub use cqcheck_validation::*;
}

pub mod client {
    pub use cqcheck_client::*;
}
