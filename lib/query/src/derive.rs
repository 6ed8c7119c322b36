use crate::lexer::{Lexer, Token, TokenKind};
use std::fmt;
use std::ops::Range;

/// The principal variable of a query whose projection could not be determined.
pub const DEFAULT_PRINCIPAL_VARIABLE: &str = "resultado";

/// A cleaned SPARQL query whose projection has been reduced to a single variable.
///
/// Created by [derive_query].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalQuery {
    text: String,
    principal_variable: String,
    projection_rewritten: bool,
}

impl CanonicalQuery {
    /// The full query text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The lines of the query. None of them is empty or a comment.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    /// The single variable the query is meant to project (without `?`).
    pub fn principal_variable(&self) -> &str {
        &self.principal_variable
    }

    /// Whether the projection was rewritten to [Self::principal_variable].
    ///
    /// This can be false even if a principal variable was found, e.g., if the projection spans
    /// multiple lines.
    pub fn is_projection_rewritten(&self) -> bool {
        self.projection_rewritten
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for CanonicalQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Removes blank lines and comment lines (starting with `#` or `//`) from a query.
///
/// The remaining lines are trimmed and joined with `\n` in their original order.
pub fn clean_query(raw_query: Option<&str>) -> String {
    raw_query
        .unwrap_or_default()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Derives a [CanonicalQuery] from an authored query.
///
/// The principal variable is the first variable of the first `SELECT` clause that consists only
/// of variables and is followed by `WHERE`. If there is none, [DEFAULT_PRINCIPAL_VARIABLE] is
/// used.
///
/// The first `SELECT ... WHERE` span whose projection fits on a single line is then replaced by
/// `SELECT ?<principal> WHERE`. If there is no such span, the cleaned query is returned as is,
/// even if a principal variable was found. Keywords within string literals, IRIs, and comments
/// are never considered. The query is not validated otherwise.
///
/// ```
/// use cqcheck_query::derive_query;
///
/// let query = derive_query(Some("SELECT ?titulo ?autor WHERE { ?l ex:titulo ?titulo }"));
/// assert_eq!(query.text(), "SELECT ?titulo WHERE { ?l ex:titulo ?titulo }");
/// ```
pub fn derive_query(raw_query: Option<&str>) -> CanonicalQuery {
    let text = clean_query(raw_query);
    let tokens = Lexer::new(&text).lex();

    let principal_variable = find_principal_variable(&text, &tokens).unwrap_or_else(|| {
        tracing::debug!(
            "No variable-only projection found, using '{DEFAULT_PRINCIPAL_VARIABLE}'"
        );
        DEFAULT_PRINCIPAL_VARIABLE
    });
    let principal_variable = principal_variable.to_owned();

    let Some(span) = find_projection_span(&text, &tokens) else {
        if !text.is_empty() {
            tracing::debug!("No single-line SELECT ... WHERE span found, projection kept");
        }
        return CanonicalQuery {
            text,
            principal_variable,
            projection_rewritten: false,
        };
    };

    let text = format!(
        "{}SELECT ?{principal_variable} WHERE{}",
        &text[..span.start],
        &text[span.end..]
    );
    CanonicalQuery {
        text,
        principal_variable,
        projection_rewritten: true,
    }
}

fn select_positions<'a>(text: &'a str, tokens: &'a [Token]) -> impl Iterator<Item = usize> + 'a {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| token.is_keyword(text, "SELECT"))
        .map(|(idx, _)| idx)
}

fn find_principal_variable<'a>(text: &'a str, tokens: &[Token]) -> Option<&'a str> {
    select_positions(text, tokens).find_map(|select| {
        let projection = &tokens[select + 1..];
        let variables = projection
            .iter()
            .take_while(|token| token.kind == TokenKind::Variable)
            .count();
        let followed_by_where = projection
            .get(variables)
            .is_some_and(|token| token.is_keyword(text, "WHERE"));
        if variables > 0 && followed_by_where {
            projection[0].variable_name(text)
        } else {
            None
        }
    })
}

fn find_projection_span(text: &str, tokens: &[Token]) -> Option<Range<usize>> {
    select_positions(text, tokens).find_map(|select| {
        let select_token = tokens[select];
        let where_token = tokens[select + 1..]
            .iter()
            .find(|token| token.is_keyword(text, "WHERE"))?;
        let projection = text[select_token.end..where_token.start].trim();
        (!projection.is_empty() && !projection.contains('\n'))
            .then_some(select_token.start..where_token.end)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_reduces_projection_to_first_variable() {
        let query = derive_query(Some(
            "SELECT ?titulo ?autor WHERE { ?l ex:titulo ?titulo ; ex:autor ?autor . }",
        ));
        assert_eq!(
            query.text(),
            "SELECT ?titulo WHERE { ?l ex:titulo ?titulo ; ex:autor ?autor . }"
        );
        assert_eq!(query.principal_variable(), "titulo");
        assert!(query.is_projection_rewritten());
    }

    #[test]
    fn derive_is_case_insensitive() {
        let query = derive_query(Some("select ?a ?b where { ?a ex:p ?b }"));
        assert_eq!(query.text(), "SELECT ?a WHERE { ?a ex:p ?b }");
    }

    #[test]
    fn derive_without_select_keeps_query() {
        let query = derive_query(Some("ASK { ?s a ex:Livro }"));
        assert_eq!(query.text(), "ASK { ?s a ex:Livro }");
        assert_eq!(query.principal_variable(), DEFAULT_PRINCIPAL_VARIABLE);
        assert!(!query.is_projection_rewritten());
    }

    #[test]
    fn derive_absent_query_is_empty() {
        let query = derive_query(None);
        assert!(query.is_empty());
        assert_eq!(query.principal_variable(), DEFAULT_PRINCIPAL_VARIABLE);
    }

    #[test]
    fn derive_removes_comment_and_blank_lines() {
        let query = derive_query(Some(
            "# note\nPREFIX ex: <http://ex.org/>\n\n   // note2\n  SELECT ?a WHERE {\n\t?a a ex:Livro .\n}\n",
        ));
        assert_eq!(
            query.lines().collect::<Vec<_>>(),
            vec![
                "PREFIX ex: <http://ex.org/>",
                "SELECT ?a WHERE {",
                "?a a ex:Livro .",
                "}"
            ]
        );
    }

    #[test]
    fn derive_projection_with_modifier_falls_back_to_default() {
        let query = derive_query(Some("SELECT DISTINCT ?a ?b WHERE { ?a ex:p ?b }"));
        assert_eq!(query.principal_variable(), DEFAULT_PRINCIPAL_VARIABLE);
        assert_eq!(query.text(), "SELECT ?resultado WHERE { ?a ex:p ?b }");
    }

    #[test]
    fn derive_multiline_projection_is_not_rewritten() {
        let query = derive_query(Some("SELECT ?a\n?b\nWHERE { ?a ex:p ?b }"));
        assert_eq!(query.principal_variable(), "a");
        assert!(!query.is_projection_rewritten());
        assert_eq!(query.text(), "SELECT ?a\n?b\nWHERE { ?a ex:p ?b }");
    }

    #[test]
    fn derive_where_on_next_line_is_rewritten() {
        let query = derive_query(Some("SELECT ?a ?b\nWHERE { ?a ex:p ?b }"));
        assert_eq!(query.text(), "SELECT ?a WHERE { ?a ex:p ?b }");
    }

    #[test]
    fn derive_without_where_keeps_projection() {
        let query = derive_query(Some("SELECT ?a ?b { ?a ex:p ?b }"));
        assert_eq!(query.principal_variable(), DEFAULT_PRINCIPAL_VARIABLE);
        assert_eq!(query.text(), "SELECT ?a ?b { ?a ex:p ?b }");
    }

    #[test]
    fn derive_ignores_keywords_in_literals() {
        let raw = "ASK { ?s ex:nota \"SELECT ?x WHERE\" }";
        let query = derive_query(Some(raw));
        assert_eq!(query.text(), raw);
        assert_eq!(query.principal_variable(), DEFAULT_PRINCIPAL_VARIABLE);
    }

    #[test]
    fn derive_only_rewrites_first_select() {
        let query = derive_query(Some(
            "SELECT (COUNT(?l) AS ?n) WHERE { { SELECT ?l ?a WHERE { ?l ex:autor ?a } } }",
        ));
        assert_eq!(query.principal_variable(), "l");
        assert_eq!(
            query.text(),
            "SELECT ?l WHERE { { SELECT ?l ?a WHERE { ?l ex:autor ?a } } }"
        );
    }

    #[test]
    fn derive_keeps_prefix_lines_before_select() {
        let query = derive_query(Some(
            "PREFIX ex: <http://ex.org/where#>\nSELECT ?nome ?idade WHERE { ?p ex:nome ?nome }",
        ));
        assert_eq!(
            query.text(),
            "PREFIX ex: <http://ex.org/where#>\nSELECT ?nome WHERE { ?p ex:nome ?nome }"
        );
    }
}
