use clap::{Parser, Subcommand, ValueHint};
use cqcheck::client::DEFAULT_ENDPOINT;
use cqcheck::generate::DEFAULT_OUTPUT_DIR;
use cqcheck::query::DEFAULT_ENTITY_NAMESPACE;
use cqcheck::sheet::{DEFAULT_ANSWERS_COLUMN, DEFAULT_LABEL_COLUMN, DEFAULT_QUERY_COLUMN};
use cqcheck::validate::DEFAULT_REPORT_FILE;
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "cqcheck")]
/// Derives SPARQL queries for ontology competency questions and validates their answers
pub struct Args {
    /// Only log warnings and errors
    ///
    /// The log output can also be configured with the RUST_LOG environment variable.
    #[arg(short, long, global = true)]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Derive a query artifact (<id>.rq) for every competency question of a sheet
    Generate {
        /// CSV export of the competency question sheet
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        sheet: PathBuf,
        #[command(flatten)]
        format: SheetFormatArgs,
        /// Directory the query artifacts are written to
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR, value_hint = ValueHint::DirPath)]
        output_dir: PathBuf,
        #[command(flatten)]
        generation: GenerationArgs,
    },
    /// Execute the query artifacts against a SPARQL endpoint and compare the answers
    Validate {
        /// CSV export of the competency question sheet that holds the expected answers
        ///
        /// If no sheet is given, the answers annotated in the query artifacts are used.
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        sheet: Option<PathBuf>,
        #[command(flatten)]
        format: SheetFormatArgs,
        /// Directory that holds the query artifacts
        #[arg(long, default_value = DEFAULT_OUTPUT_DIR, value_hint = ValueHint::DirPath)]
        queries: PathBuf,
        #[command(flatten)]
        validation: ValidationArgs,
    },
    /// Generate the query artifacts of a sheet, then validate them
    Run {
        /// CSV export of the competency question sheet
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        sheet: PathBuf,
        #[command(flatten)]
        format: SheetFormatArgs,
        /// Directory the query artifacts are written to
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR, value_hint = ValueHint::DirPath)]
        output_dir: PathBuf,
        #[command(flatten)]
        generation: GenerationArgs,
        #[command(flatten)]
        validation: ValidationArgs,
    },
}

/// How the competency question sheet is laid out.
#[derive(clap::Args)]
pub struct SheetFormatArgs {
    /// Field delimiter of the sheet
    ///
    /// Spreadsheets exported with a Portuguese locale often use ';'.
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,
    /// Name of the column holding the question label
    #[arg(long, default_value = DEFAULT_LABEL_COLUMN)]
    pub label_column: String,
    /// Name of the column holding the SPARQL query
    #[arg(long, default_value = DEFAULT_QUERY_COLUMN)]
    pub query_column: String,
    /// Name of the column holding the expected answers
    #[arg(long, default_value = DEFAULT_ANSWERS_COLUMN)]
    pub answers_column: String,
}

#[derive(clap::Args)]
pub struct GenerationArgs {
    /// Namespace bound to the `ex:` prefix in the query artifacts
    #[arg(long, default_value = DEFAULT_ENTITY_NAMESPACE, value_hint = ValueHint::Url)]
    pub namespace: String,
}

#[derive(clap::Args)]
pub struct ValidationArgs {
    /// URL of the SPARQL query endpoint
    #[arg(short, long, default_value = DEFAULT_ENDPOINT, value_hint = ValueHint::Url)]
    pub endpoint: String,
    /// Maximum duration of a single query in seconds
    ///
    /// By default the endpoint decides.
    #[arg(long)]
    pub timeout: Option<u64>,
    /// File the validation report is written to
    #[arg(short, long, default_value = DEFAULT_REPORT_FILE, value_hint = ValueHint::FilePath)]
    pub report: PathBuf,
    /// Exit with a failure if a question is not answered correctly
    #[arg(long)]
    pub strict: bool,
}
