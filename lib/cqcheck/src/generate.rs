//! Writes one query artifact per competency question.

use crate::error::GenerationError;
use cqcheck_model::{split_answers, QuestionId, RawRow};
use cqcheck_query::{derive_query, render_artifact, ArtifactPrefixes};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// The directory that holds the query artifacts if nothing else is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "competencias";
/// The file extension of query artifacts.
pub const ARTIFACT_EXTENSION: &str = "rq";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationOptions {
    pub prefixes: ArtifactPrefixes,
}

/// The outcome of [generate_artifacts].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    /// The written artifacts, in the order in which their questions first appear.
    pub written: Vec<PathBuf>,
    /// The number of rows without a query.
    pub skipped: usize,
}

/// The path of the artifact of `question` in `directory`.
pub fn artifact_path(directory: &Path, question: &QuestionId) -> PathBuf {
    directory.join(format!("{question}.{ARTIFACT_EXTENSION}"))
}

/// Derives the canonical query of every row that has a query and writes its artifact to
/// `output_dir`.
///
/// Existing artifacts are overwritten. If several rows share a question identifier, the last one
/// wins.
pub fn generate_artifacts<'a>(
    rows: impl IntoIterator<Item = &'a RawRow>,
    output_dir: &Path,
    options: &GenerationOptions,
) -> Result<GenerationSummary, GenerationError> {
    fs::create_dir_all(output_dir).map_err(|error| GenerationError::CreateDirectory {
        path: output_dir.to_owned(),
        error,
    })?;

    let mut summary = GenerationSummary::default();
    let mut seen = HashSet::new();
    for row in rows {
        let Some(raw_query) = row.raw_query.as_deref() else {
            tracing::debug!("Skipping {}: no query", row.id);
            summary.skipped += 1;
            continue;
        };
        let first_occurrence = seen.insert(&row.id);
        if !first_occurrence {
            tracing::warn!("{} appears more than once, overwriting its artifact", row.id);
        }

        let query = derive_query(Some(raw_query));
        if query.is_empty() {
            tracing::warn!("The query of {} only consists of comments", row.id);
        }
        let answers = split_answers(row.raw_answers.as_deref());
        let artifact = render_artifact(&row.label, &answers, &query, &options.prefixes);

        let path = artifact_path(output_dir, &row.id);
        fs::write(&path, artifact).map_err(|error| GenerationError::Write {
            path: path.clone(),
            error,
        })?;
        tracing::debug!("Wrote {}", path.display());
        if first_occurrence {
            summary.written.push(path);
        }
    }

    tracing::info!(
        "Generated {} query artifacts in {} ({} questions without query)",
        summary.written.len(),
        output_dir.display(),
        summary.skipped
    );
    Ok(summary)
}
