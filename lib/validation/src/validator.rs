use crate::{ObtainedAnswers, QueryExecutor, QueryResultSet, ValidationReport, Verdict};
use cqcheck_model::{normalize_answer, ExpectedAnswers, QuestionId};

/// A single question to validate.
#[derive(Debug, Clone)]
pub struct ValidationTask {
    pub question: QuestionId,
    /// The query to execute.
    pub query: String,
    pub expected: ExpectedAnswers,
}

/// Normalizes all values of a query result into a set of answers.
///
/// Only the given variables are considered. Values that normalize to the empty string are
/// ignored.
pub fn collect_obtained(results: &QueryResultSet) -> ObtainedAnswers {
    results
        .rows
        .iter()
        .flat_map(|row| results.variables.iter().filter_map(|v| row.get(v)))
        .map(normalize_answer)
        .filter(|value| !value.is_empty())
        .collect()
}

/// Validates competency questions by executing their queries.
#[derive(Debug, Clone)]
pub struct Validator<E> {
    executor: E,
}

impl<E: QueryExecutor> Validator<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Executes `query` once and compares the result with `expected`.
    ///
    /// Execution failures do not propagate. They result in a verdict with
    /// [VerdictStatus::Error](crate::VerdictStatus::Error).
    pub fn validate(
        &self,
        question: QuestionId,
        query: &str,
        expected: ExpectedAnswers,
    ) -> Verdict {
        tracing::debug!("Executing query of {question}");
        match self.executor.execute(query) {
            Ok(results) => {
                let obtained = collect_obtained(&results);
                tracing::debug!(
                    "{question}: {} rows, {} distinct answers",
                    results.rows.len(),
                    obtained.len()
                );
                Verdict::evaluated(question, expected, obtained, results.variables)
            }
            Err(error) => {
                let diagnostic = error.diagnostic();
                tracing::warn!("Query of {question} failed: {diagnostic}");
                Verdict::error(question, expected, diagnostic)
            }
        }
    }

    /// Validates all `tasks` in the order of their question identifiers.
    ///
    /// A failing question does not stop the validation of the remaining ones.
    pub fn validate_all(&self, tasks: impl IntoIterator<Item = ValidationTask>) -> ValidationReport {
        let mut tasks = tasks.into_iter().collect::<Vec<_>>();
        tasks.sort_by(|a, b| a.question.cmp(&b.question));

        let mut report = ValidationReport::new();
        for task in tasks {
            report.push(self.validate(task.question, &task.query, task.expected));
        }
        report
    }
}
