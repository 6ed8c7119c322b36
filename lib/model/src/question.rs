use std::borrow::Borrow;
use std::fmt;

/// The identifier of a competency question (e.g., `QC1`).
///
/// Identifiers are ordered lexicographically, which is the order in which questions are
/// validated and reported.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuestionId {
    value: String,
}

impl QuestionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Extracts the identifier from a question label.
    ///
    /// The identifier is the text before the first `-`, trimmed. For example, the label
    /// `"QC1-Qual é o título do livro?"` yields `QC1`. A label without `-` is its own identifier.
    /// Returns [None] if the resulting identifier would be empty.
    pub fn from_label(label: &str) -> Option<Self> {
        let id = label.split('-').next().unwrap_or_default().trim();
        (!id.is_empty()).then(|| Self::new(id))
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl Borrow<str> for QuestionId {
    fn borrow(&self) -> &str {
        &self.value
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A row of the competency question sheet, as supplied by the row source.
///
/// Absent cells are represented as [None].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub id: QuestionId,
    pub label: String,
    pub raw_query: Option<String>,
    pub raw_answers: Option<String>,
}

impl RawRow {
    /// Creates a row from its label. Returns [None] if no identifier can be extracted from the
    /// label.
    pub fn try_new(
        label: impl Into<String>,
        raw_query: Option<String>,
        raw_answers: Option<String>,
    ) -> Option<Self> {
        let label = label.into();
        let id = QuestionId::from_label(&label)?;
        Some(Self {
            id,
            label,
            raw_query,
            raw_answers,
        })
    }
}
