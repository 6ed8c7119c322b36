use cqcheck_validation::{QueryResultSet, ResultBinding};
use oxrdf::Term;
use sparesults::{
    QueryResultsFormat, QueryResultsParseError, QueryResultsParser,
    ReaderQueryResultsParserOutput,
};

/// The variable that holds the result of an `ASK` query.
pub const BOOLEAN_VARIABLE: &str = "boolean";

/// Parses a [SPARQL JSON result](https://www.w3.org/TR/sparql11-results-json/).
///
/// Every bound term is reduced to the raw value of the JSON serialization. A boolean result is
/// returned as a single row binding [BOOLEAN_VARIABLE].
pub fn parse_json_results(body: &[u8]) -> Result<QueryResultSet, QueryResultsParseError> {
    let parser = QueryResultsParser::from_format(QueryResultsFormat::Json).for_reader(body)?;
    match parser {
        ReaderQueryResultsParserOutput::Solutions(solutions) => {
            let variables = solutions
                .variables()
                .iter()
                .map(|v| v.as_str().to_owned())
                .collect();
            let mut rows = Vec::new();
            for solution in solutions {
                let solution = solution?;
                rows.push(
                    solution
                        .iter()
                        .map(|(variable, term)| (variable.as_str(), raw_value(term)))
                        .collect::<ResultBinding>(),
                );
            }
            Ok(QueryResultSet { variables, rows })
        }
        ReaderQueryResultsParserOutput::Boolean(value) => Ok(QueryResultSet {
            variables: vec![BOOLEAN_VARIABLE.to_owned()],
            rows: vec![[(BOOLEAN_VARIABLE, value.to_string())].into_iter().collect()],
        }),
    }
}

fn raw_value(term: &Term) -> String {
    match term {
        Term::NamedNode(node) => node.as_str().to_owned(),
        Term::BlankNode(node) => node.as_str().to_owned(),
        Term::Literal(literal) => literal.value().to_owned(),
        #[allow(unreachable_patterns, reason = "Quoted triples require the rdf-star feature")]
        other => other.to_string(),
    }
}
