use cqcheck_model::{ExpectedAnswers, QuestionId};
use std::collections::BTreeSet;
use std::fmt;

/// The normalized values obtained from the result of a query. Duplicates collapse.
pub type ObtainedAnswers = BTreeSet<String>;

/// The outcome category of a validated question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerdictStatus {
    /// Every expected answer has been obtained.
    Correct,
    /// At least one expected answer is missing from the query result.
    Different,
    /// The query could not be executed.
    Error,
}

impl VerdictStatus {
    /// The label used in reports.
    #[allow(clippy::non_ascii_literal)]
    pub fn label(self) -> &'static str {
        match self {
            VerdictStatus::Correct => "✅ CORRETO",
            VerdictStatus::Different => "⚠️ DIFERENTE",
            VerdictStatus::Error => "❌ ERRO",
        }
    }
}

impl fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The outcome of validating a single competency question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    question: QuestionId,
    status: VerdictStatus,
    expected: ExpectedAnswers,
    obtained: ObtainedAnswers,
    variables: Vec<String>,
    diagnostic: Option<String>,
}

impl Verdict {
    /// Creates the verdict of a question whose query was executed.
    ///
    /// The status is [VerdictStatus::Correct] iff every expected answer is contained in
    /// `obtained`. This is trivially the case if there are no expected answers.
    pub fn evaluated(
        question: QuestionId,
        expected: ExpectedAnswers,
        obtained: ObtainedAnswers,
        variables: Vec<String>,
    ) -> Self {
        let status = if expected.iter().all(|answer| obtained.contains(answer)) {
            VerdictStatus::Correct
        } else {
            VerdictStatus::Different
        };
        Self {
            question,
            status,
            expected,
            obtained,
            variables,
            diagnostic: None,
        }
    }

    /// Creates the verdict of a question whose query could not be executed.
    pub fn error(
        question: QuestionId,
        expected: ExpectedAnswers,
        diagnostic: impl Into<String>,
    ) -> Self {
        Self {
            question,
            status: VerdictStatus::Error,
            expected,
            obtained: ObtainedAnswers::new(),
            variables: Vec::new(),
            diagnostic: Some(diagnostic.into()),
        }
    }

    pub fn question(&self) -> &QuestionId {
        &self.question
    }

    pub fn status(&self) -> VerdictStatus {
        self.status
    }

    pub fn expected(&self) -> &ExpectedAnswers {
        &self.expected
    }

    pub fn obtained(&self) -> &ObtainedAnswers {
        &self.obtained
    }

    /// The variables of the query result. Empty for errors.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Describes why the query could not be executed. Only present for errors.
    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected(answers: &[&str]) -> ExpectedAnswers {
        answers.iter().map(|a| (*a).to_owned()).collect()
    }

    fn obtained(answers: &[&str]) -> ObtainedAnswers {
        answers.iter().map(|a| (*a).to_owned()).collect()
    }

    #[test]
    fn superset_is_correct() {
        let verdict = Verdict::evaluated(
            QuestionId::new("QC1"),
            expected(&["Livro1", "Livro2"]),
            obtained(&["Livro1", "Livro2", "Livro3"]),
            vec!["livro".to_owned()],
        );
        assert_eq!(verdict.status(), VerdictStatus::Correct);
    }

    #[test]
    fn missing_answer_is_different() {
        let verdict = Verdict::evaluated(
            QuestionId::new("QC1"),
            expected(&["Livro1", "Livro2"]),
            obtained(&["Livro1"]),
            vec!["livro".to_owned()],
        );
        assert_eq!(verdict.status(), VerdictStatus::Different);
    }

    #[test]
    fn no_expected_answers_is_correct() {
        let verdict = Verdict::evaluated(
            QuestionId::new("QC1"),
            ExpectedAnswers::default(),
            obtained(&["Livro3"]),
            Vec::new(),
        );
        assert_eq!(verdict.status(), VerdictStatus::Correct);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let verdict = Verdict::evaluated(
            QuestionId::new("QC1"),
            expected(&["livro1"]),
            obtained(&["Livro1"]),
            Vec::new(),
        );
        assert_eq!(verdict.status(), VerdictStatus::Different);
    }

    #[test]
    fn error_keeps_expected_answers() {
        let verdict = Verdict::error(QuestionId::new("QC9"), expected(&["A"]), "timeout");
        assert_eq!(verdict.status(), VerdictStatus::Error);
        assert_eq!(verdict.expected().len(), 1);
        assert!(verdict.obtained().is_empty());
        assert_eq!(verdict.diagnostic(), Some("timeout"));
    }
}
