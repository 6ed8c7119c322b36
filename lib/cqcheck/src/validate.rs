//! Validates a directory of query artifacts.

use crate::error::ValidationError;
use crate::generate::ARTIFACT_EXTENSION;
use cqcheck_model::{normalize_answer, ExpectedAnswers, QuestionId, RawRow};
use cqcheck_query::parse_artifact;
use cqcheck_validation::{QueryExecutor, ValidationReport, Validator, Verdict};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// The file the report is written to if nothing else is configured.
pub const DEFAULT_REPORT_FILE: &str = "relatorio_validacao_avancado.txt";

/// Where the expected answers of a question come from.
#[derive(Debug, Clone)]
pub enum ExpectedAnswerSource {
    /// Answers taken from the spreadsheet, keyed by question. Missing questions expect nothing.
    Sheet(HashMap<QuestionId, ExpectedAnswers>),
    /// Answers annotated in the header of each artifact.
    Annotations,
}

impl ExpectedAnswerSource {
    /// Collects the expected answers of all rows that have answers.
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a RawRow>) -> Self {
        Self::Sheet(
            rows.into_iter()
                .filter_map(|row| {
                    let answers = row.raw_answers.as_deref()?;
                    Some((row.id.clone(), ExpectedAnswers::parse(Some(answers))))
                })
                .collect(),
        )
    }

    fn for_question(&self, question: &QuestionId, annotations: &[&str]) -> ExpectedAnswers {
        match self {
            Self::Sheet(answers) => answers.get(question).cloned().unwrap_or_default(),
            Self::Annotations => annotations
                .iter()
                .map(|answer| normalize_answer(answer))
                .collect(),
        }
    }
}

/// Lists the query artifacts in `directory`, ordered by question identifier.
pub fn list_artifacts(directory: &Path) -> Result<Vec<(QuestionId, PathBuf)>, ValidationError> {
    let list_error = |error| ValidationError::ListArtifacts {
        path: directory.to_owned(),
        error,
    };

    let mut artifacts = Vec::new();
    for entry in fs::read_dir(directory).map_err(list_error)? {
        let path = entry.map_err(list_error)?.path();
        if !path.is_file() || path.extension() != Some(OsStr::new(ARTIFACT_EXTENSION)) {
            continue;
        }
        if let Some(stem) = path.file_stem() {
            artifacts.push((QuestionId::new(stem.to_string_lossy()), path));
        }
    }
    artifacts.sort_by(|(a, _), (b, _)| a.cmp(b));
    Ok(artifacts)
}

/// Executes every query artifact in `directory` once and compares the result with the expected
/// answers.
///
/// The query of an artifact starts at its first `PREFIX` line. An artifact that cannot be read
/// results in an error verdict for its question.
pub fn validate_directory<E: QueryExecutor>(
    directory: &Path,
    expected: &ExpectedAnswerSource,
    validator: &Validator<E>,
) -> Result<ValidationReport, ValidationError> {
    let artifacts = list_artifacts(directory)?;
    tracing::info!(
        "Validating {} query artifacts from {}",
        artifacts.len(),
        directory.display()
    );

    let mut report = ValidationReport::new();
    for (question, path) in artifacts {
        let verdict = match fs::read_to_string(&path) {
            Ok(artifact) => {
                let parsed = parse_artifact(&artifact);
                let answers = expected.for_question(&question, &parsed.expected_answers);
                validator.validate(question, parsed.query, answers)
            }
            Err(error) => {
                tracing::warn!("Could not read {}: {error}", path.display());
                let answers = expected.for_question(&question, &[]);
                Verdict::error(
                    question,
                    answers,
                    format!("Could not read {}: {error}", path.display()),
                )
            }
        };
        tracing::info!("{}: {}", verdict.question(), verdict.status());
        report.push(verdict);
    }
    Ok(report)
}
