use std::io;
use std::path::PathBuf;

/// An error raised while loading the competency questions from a spreadsheet.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    /// The spreadsheet file could not be opened.
    #[error("Could not open the sheet {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        error: io::Error,
    },
    /// A configured column is not present in the header row.
    #[error("The sheet has no column named '{0}'")]
    MissingColumn(String),
    /// The content is not valid CSV.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// An error raised while writing query artifacts.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Could not create the output directory {}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        error: io::Error,
    },
    #[error("Could not write the query artifact {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        error: io::Error,
    },
}

/// An error that aborts a validation run.
///
/// Failures of individual questions do not abort a run. They are reported as error verdicts.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Could not list the query artifacts in {}", path.display())]
    ListArtifacts {
        path: PathBuf,
        #[source]
        error: io::Error,
    },
}
