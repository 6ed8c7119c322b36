//! Turns authored SPARQL queries into canonical, single-variable queries.
//!
//! The entry point is [derive_query]. The resulting [CanonicalQuery] can be written to a query
//! artifact with [render_artifact] and read back with [parse_artifact].

mod artifact;
mod derive;
mod lexer;

pub use artifact::*;
pub use derive::*;
