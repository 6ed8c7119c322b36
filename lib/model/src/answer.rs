use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// The prefix of the local entity namespace, as used in the authored answers.
pub const ENTITY_PREFIX: &str = "ex:";

/// The separator between answers in a raw answer list.
pub const ANSWER_SEPARATOR: char = ';';

/// Language tags (`@pt-BR`) and datatype suffixes (`^^xsd:integer`, `^^<...>`).
///
/// Not anchored, as annotations may appear in the middle of a token.
#[allow(clippy::expect_used, reason = "Constant pattern")]
static ANNOTATIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@\S+|\^\^xsd:\w+|\^\^<[^>\s]*>").expect("annotation pattern is valid")
});

/// Reduces a raw answer token to its comparable form.
///
/// The following transformations are applied in order:
/// 1. Language tags and datatype suffixes are removed.
/// 2. Surrounding double quotes and angle brackets are removed.
/// 3. The [ENTITY_PREFIX] is removed. Otherwise, an HTTP(S) IRI is reduced to its local name
///    (the text after the last `/` and then after the last `#`).
///
/// The transformations are repeated until the token no longer changes, so nested forms such as
/// `ex:"A"` or `http://ex.org/ex:A` reduce completely. The function is therefore idempotent. The
/// empty string indicates that there is no token.
///
/// ```
/// use cqcheck_model::normalize_answer;
///
/// assert_eq!(normalize_answer("ex:Livro"), "Livro");
/// assert_eq!(normalize_answer("\"Dom Casmurro\"@pt-BR"), "Dom Casmurro");
/// assert_eq!(normalize_answer("http://example.org/onto#Autor"), "Autor");
/// assert_eq!(normalize_answer("\"42\"^^xsd:integer"), "42");
/// ```
pub fn normalize_answer(token: &str) -> String {
    let mut token = normalize_once(token);
    loop {
        let next = normalize_once(&token);
        if next == token {
            return token;
        }
        token = next;
    }
}

fn normalize_once(token: &str) -> String {
    let token = ANNOTATIONS.replace_all(token.trim(), "");
    let token = token.trim().trim_matches('"').trim();
    let token = token
        .strip_prefix('<')
        .and_then(|t| t.strip_suffix('>'))
        .unwrap_or(token);

    let token = if let Some(local) = token.strip_prefix(ENTITY_PREFIX) {
        local
    } else if is_http_iri(token) {
        local_name(token)
    } else {
        token
    };
    token.trim().to_owned()
}

/// Splits a raw answer list into display tokens.
///
/// The list is split on [ANSWER_SEPARATOR], except for separators within a double-quoted span.
/// A separator is considered to be outside any quotes if an even number of `"` follows it.
/// Unbalanced quotes therefore never fail the split; they are kept as literal characters.
///
/// Each token is trimmed and stripped of one layer of surrounding double quotes. Empty tokens
/// are dropped.
/// The tokens are *not* normalized, see [ExpectedAnswers::parse] for that.
pub fn split_answers(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let mut separators = Vec::new();
    let mut quotes_after = 0_usize;
    for (idx, c) in raw.char_indices().rev() {
        if c == '"' {
            quotes_after += 1;
        } else if c == ANSWER_SEPARATOR && quotes_after % 2 == 0 {
            separators.push(idx);
        }
    }

    let mut tokens = Vec::with_capacity(separators.len() + 1);
    let mut start = 0;
    for idx in separators.into_iter().rev().chain([raw.len()]) {
        let token = strip_quote_pair(&raw[start..idx]);
        if !token.is_empty() {
            tokens.push(token.to_owned());
        }
        start = idx + ANSWER_SEPARATOR.len_utf8();
    }
    tokens
}

fn strip_quote_pair(token: &str) -> &str {
    let token = token.trim();
    token
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .map_or(token, str::trim)
}

fn is_http_iri(token: &str) -> bool {
    let lower = token.get(..8).unwrap_or(token).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn local_name(iri: &str) -> &str {
    let segment = iri.rsplit('/').next().unwrap_or(iri);
    segment.rsplit('#').next().unwrap_or(segment)
}

/// The expected answers of a single competency question, in normalized form.
///
/// The order of the answers is kept for display purposes. Comparisons are set-based.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedAnswers {
    answers: Vec<String>,
}

impl ExpectedAnswers {
    /// Parses a raw answer list. Tokens that normalize to the empty string are discarded.
    pub fn parse(raw: Option<&str>) -> Self {
        split_answers(raw)
            .iter()
            .map(|token| normalize_answer(token))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.answers.iter().map(String::as_str)
    }
}

impl FromIterator<String> for ExpectedAnswers {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            answers: iter.into_iter().filter(|a| !a.is_empty()).collect(),
        }
    }
}

impl fmt::Display for ExpectedAnswers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.answers.join("; "))
    }
}

#[cfg(test)]
#[allow(clippy::non_ascii_literal)]
mod tests {
    use super::*;

    #[test]
    fn normalize_entity_prefix() {
        assert_eq!(normalize_answer("ex:Livro"), "Livro");
        assert_eq!(normalize_answer("  ex:Livro  "), "Livro");
    }

    #[test]
    fn normalize_language_tagged_literal() {
        assert_eq!(normalize_answer("\"Dom Casmurro\"@pt-BR"), "Dom Casmurro");
        assert_eq!(normalize_answer("\"Dom Casmurro@pt-BR\""), "Dom Casmurro");
    }

    #[test]
    fn normalize_typed_literal() {
        assert_eq!(normalize_answer("\"42\"^^xsd:integer"), "42");
        assert_eq!(
            normalize_answer("\"1899\"^^<http://www.w3.org/2001/XMLSchema#gYear>"),
            "1899"
        );
    }

    #[test]
    fn normalize_annotation_in_the_middle() {
        assert_eq!(normalize_answer("Machado@pt de Assis"), "Machado de Assis");
    }

    #[test]
    fn normalize_iri_to_local_name() {
        assert_eq!(normalize_answer("http://example.org/onto#Autor"), "Autor");
        assert_eq!(normalize_answer("https://example.org/livros/Livro1"), "Livro1");
        assert_eq!(normalize_answer("<http://example.org/onto#Autor>"), "Autor");
        assert_eq!(normalize_answer("HTTP://EXAMPLE.ORG/X"), "X");
    }

    #[test]
    fn normalize_iri_with_trailing_slash_is_empty() {
        assert_eq!(normalize_answer("http://example.org/"), "");
    }

    #[test]
    fn normalize_does_not_touch_plain_values() {
        assert_eq!(normalize_answer("Capitu"), "Capitu");
        assert_eq!(normalize_answer("httpbin"), "httpbin");
        assert_eq!(normalize_answer("Ex:Livro"), "Ex:Livro");
    }

    #[test]
    fn normalize_nested_forms() {
        assert_eq!(normalize_answer("ex:\"A\""), "A");
        assert_eq!(normalize_answer("http://ex.org/ex:A"), "A");
        assert_eq!(normalize_answer("ex:ex:Livro"), "Livro");
    }

    #[test]
    fn normalize_empty() {
        assert_eq!(normalize_answer(""), "");
        assert_eq!(normalize_answer("   "), "");
        assert_eq!(normalize_answer("\"\""), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        let tokens = [
            "ex:Livro",
            "\"Dom Casmurro\"@pt-BR",
            "http://example.org/onto#Autor",
            "\"42\"^^xsd:integer",
            "<https://example.org/a/b>",
            "\"\"\"quoted\"\"\"",
            "  espaços  ",
            "ex:\"A\"",
            "http://ex.org/ex:A",
            "<ex:Livro>",
            "",
        ];
        for token in tokens {
            let once = normalize_answer(token);
            assert_eq!(normalize_answer(&once), once, "not idempotent for {token:?}");
        }
    }

    #[test]
    fn split_respects_quoted_separators() {
        assert_eq!(split_answers(Some("\"a;b\"; c")), vec!["a;b", "c"]);
    }

    #[test]
    fn split_drops_empty_tokens() {
        assert_eq!(split_answers(Some(" ; ex:A;;\"\"; ex:B ;")), vec!["ex:A", "ex:B"]);
        assert!(split_answers(Some("")).is_empty());
        assert!(split_answers(None).is_empty());
    }

    #[test]
    fn split_keeps_annotations() {
        assert_eq!(
            split_answers(Some("\"Dom Casmurro\"@pt-BR; \"1899\"^^xsd:gYear")),
            vec!["\"Dom Casmurro\"@pt-BR", "\"1899\"^^xsd:gYear"]
        );
    }

    #[test]
    fn split_with_unbalanced_quote_does_not_fail() {
        // The separator after the lone quote has no quotes following it.
        assert_eq!(split_answers(Some("a\"b; c")), vec!["a\"b", "c"]);
        // The separator before the lone quote is followed by an odd number of quotes.
        assert_eq!(split_answers(Some("a; b\"c")), vec!["a; b\"c"]);
    }

    #[test]
    fn split_multibyte_text() {
        assert_eq!(
            split_answers(Some("\"Memórias Póstumas\";Iaiá Garcia")),
            vec!["Memórias Póstumas", "Iaiá Garcia"]
        );
    }

    #[test]
    fn expected_answers_are_normalized() {
        let answers = ExpectedAnswers::parse(Some(
            "ex:Livro1; \"Dom Casmurro\"@pt-BR; http://example.org/onto#Autor; \"\"",
        ));
        assert_eq!(
            answers.iter().collect::<Vec<_>>(),
            vec!["Livro1", "Dom Casmurro", "Autor"]
        );
        assert_eq!(answers.to_string(), "Livro1; Dom Casmurro; Autor");
    }

    #[test]
    fn expected_answers_drop_tokens_normalizing_to_empty() {
        let answers = ExpectedAnswers::parse(Some("http://example.org/; ex:A"));
        assert_eq!(answers.len(), 1);
        assert!(ExpectedAnswers::parse(None).is_empty());
    }
}
