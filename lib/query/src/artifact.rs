//! The query artifact (`.rq` file) written for each competency question.
//!
//! Layout:
//! ```text
//! # <question label>
//! # Resposta esperada: <answer>      (zero or more)
//! PREFIX ex: <entity namespace>
//! PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
//! PREFIX xsd: <http://www.w3.org/2001/XMLSchema#>
//!
//! <canonical query>
//! ```
//!
//! The prefix declarations and the answer marker are read by other tools. Do not change them.

use crate::CanonicalQuery;

/// The default namespace bound to the `ex:` prefix.
pub const DEFAULT_ENTITY_NAMESPACE: &str =
    "http://www.semanticweb.org/kely/ontologies/2023/11/pinakes#";
pub const RDF_NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

/// Marks a comment line holding one expected answer.
pub const EXPECTED_ANSWER_MARKER: &str = "# Resposta esperada: ";

/// The keyword that starts the query part of an artifact.
const QUERY_START: &str = "PREFIX";

/// The prefix declarations of a query artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPrefixes {
    /// The namespace bound to `ex:`.
    pub entity_namespace: String,
}

impl Default for ArtifactPrefixes {
    fn default() -> Self {
        Self {
            entity_namespace: DEFAULT_ENTITY_NAMESPACE.to_owned(),
        }
    }
}

impl ArtifactPrefixes {
    fn declarations(&self) -> [String; 3] {
        [
            format!("{QUERY_START} ex: <{}>", self.entity_namespace),
            format!("{QUERY_START} rdf: <{RDF_NAMESPACE}>"),
            format!("{QUERY_START} xsd: <{XSD_NAMESPACE}>"),
        ]
    }
}

/// Renders the artifact of a single competency question.
///
/// `expected_answers` are written as they are, one annotation line each. Line breaks within the
/// label or the answers are replaced by spaces such that they remain comments.
pub fn render_artifact(
    label: &str,
    expected_answers: &[String],
    query: &CanonicalQuery,
    prefixes: &ArtifactPrefixes,
) -> String {
    let mut lines = Vec::with_capacity(expected_answers.len() + 6);
    lines.push(format!("# {}", single_line(label)));
    lines.extend(
        expected_answers
            .iter()
            .map(|answer| format!("{EXPECTED_ANSWER_MARKER}{}", single_line(answer))),
    );
    lines.extend(prefixes.declarations());
    lines.push(String::new());
    lines.push(query.text().to_owned());
    lines.join("\n")
}

fn single_line(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join(" ")
}

/// The parts of a query artifact that are needed to validate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArtifact<'artifact> {
    /// The expected answers as annotated in the header (not normalized).
    pub expected_answers: Vec<&'artifact str>,
    /// The query to execute: everything from the first line that starts with `PREFIX`.
    ///
    /// Empty if the artifact has no such line.
    pub query: &'artifact str,
}

/// Splits a query artifact into its header annotations and the executable query.
pub fn parse_artifact(artifact: &str) -> ParsedArtifact<'_> {
    let mut offset = 0;
    let mut expected_answers = Vec::new();
    for line in artifact.split_inclusive('\n') {
        if line.starts_with(QUERY_START) {
            return ParsedArtifact {
                expected_answers,
                query: &artifact[offset..],
            };
        }
        if let Some(answer) = line.trim_end().strip_prefix(EXPECTED_ANSWER_MARKER) {
            expected_answers.push(answer);
        }
        offset += line.len();
    }
    ParsedArtifact {
        expected_answers,
        query: "",
    }
}

#[cfg(test)]
#[allow(clippy::non_ascii_literal)]
mod tests {
    use super::*;
    use crate::derive_query;
    use insta::assert_snapshot;

    #[test]
    fn render_artifact_layout() {
        let query = derive_query(Some(
            "# all books\nSELECT ?titulo ?autor WHERE {\n  ?l ex:titulo ?titulo .\n}",
        ));
        let rendered = render_artifact(
            "QC1-Qual é o título do livro?",
            &["Dom Casmurro".to_owned(), "\"a;b\"@pt".to_owned()],
            &query,
            &ArtifactPrefixes::default(),
        );
        assert_snapshot!(rendered, @r#"
        # QC1-Qual é o título do livro?
        # Resposta esperada: Dom Casmurro
        # Resposta esperada: "a;b"@pt
        PREFIX ex: <http://www.semanticweb.org/kely/ontologies/2023/11/pinakes#>
        PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
        PREFIX xsd: <http://www.w3.org/2001/XMLSchema#>

        SELECT ?titulo WHERE {
        ?l ex:titulo ?titulo .
        }
        "#);
    }

    #[test]
    fn render_artifact_without_answers_or_query() {
        let rendered = render_artifact(
            "QC2\nsegunda linha",
            &[],
            &derive_query(None),
            &ArtifactPrefixes {
                entity_namespace: "http://example.org/onto#".to_owned(),
            },
        );
        assert_eq!(
            rendered,
            "# QC2 segunda linha\n\
             PREFIX ex: <http://example.org/onto#>\n\
             PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>\n\
             PREFIX xsd: <http://www.w3.org/2001/XMLSchema#>\n\
             \n"
        );
    }

    #[test]
    fn parse_rendered_artifact() {
        let query = derive_query(Some("SELECT ?a WHERE { ?a a ex:Livro }"));
        let rendered = render_artifact(
            "QC3-Livros",
            &["ex:Livro1".to_owned(), "ex:Livro2".to_owned()],
            &query,
            &ArtifactPrefixes::default(),
        );

        let parsed = parse_artifact(&rendered);
        assert_eq!(parsed.expected_answers, vec!["ex:Livro1", "ex:Livro2"]);
        assert!(parsed.query.starts_with("PREFIX ex: <"));
        assert!(parsed.query.ends_with("\n\nSELECT ?a WHERE { ?a a ex:Livro }"));
    }

    #[test]
    fn parse_artifact_without_prefix_has_empty_query() {
        let parsed = parse_artifact("# QC4\nSELECT ?a WHERE { ?a ?p ?o }\n");
        assert!(parsed.query.is_empty());
        assert!(parsed.expected_answers.is_empty());
    }

    #[test]
    fn parse_artifact_query_starts_at_first_prefix_line() {
        let parsed = parse_artifact(
            "# QC5\r\n# Resposta esperada: x\r\n PREFIX a: <a:>\r\nPREFIX b: <b:>\r\nASK {}",
        );
        assert_eq!(parsed.expected_answers, vec!["x"]);
        assert_eq!(parsed.query, "PREFIX b: <b:>\r\nASK {}");
    }
}
