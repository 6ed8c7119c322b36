//! Validates competency questions against a knowledge graph.
//!
//! A [Validator] executes the query of each question through a [QueryExecutor], collects the
//! obtained answers, and compares them with the expected answers. The outcome of a question is a
//! [Verdict]. The verdicts of a batch are collected in a [ValidationReport].

mod executor;
mod report;
mod validator;
mod verdict;

pub use executor::*;
pub use report::*;
pub use validator::*;
pub use verdict::*;
