use crate::cli::{Args, Command, GenerationArgs, SheetFormatArgs, ValidationArgs};
use anyhow::{bail, Context};
use clap::Parser;
use cqcheck::client::{ClientConfig, SparqlClient};
use cqcheck::generate::{generate_artifacts, GenerationOptions};
use cqcheck::model::RawRow;
use cqcheck::query::ArtifactPrefixes;
use cqcheck::sheet::{load_rows, SheetColumns, SheetOptions};
use cqcheck::validate::{validate_directory, ExpectedAnswerSource};
use cqcheck::validation::Validator;
use std::fs::File;
use std::io::{self, stdout, BufWriter, Write};
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod cli;

pub fn main() -> anyhow::Result<()> {
    let matches = Args::parse();
    init_logging(matches.quiet);
    match matches.command {
        Command::Generate {
            sheet,
            format,
            output_dir,
            generation,
        } => {
            let rows = load_sheet(&sheet, format)?;
            generate(&rows, &output_dir, generation)
        }
        Command::Validate {
            sheet,
            format,
            queries,
            validation,
        } => {
            let expected = if let Some(sheet) = sheet {
                ExpectedAnswerSource::from_rows(&load_sheet(&sheet, format)?)
            } else {
                ExpectedAnswerSource::Annotations
            };
            validate(&queries, &expected, validation)
        }
        Command::Run {
            sheet,
            format,
            output_dir,
            generation,
            validation,
        } => {
            let rows = load_sheet(&sheet, format)?;
            generate(&rows, &output_dir, generation)?;
            validate(
                &output_dir,
                &ExpectedAnswerSource::from_rows(&rows),
                validation,
            )
        }
    }
}

fn init_logging(quiet: bool) {
    let default_directive = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_sheet(path: &Path, format: SheetFormatArgs) -> anyhow::Result<Vec<RawRow>> {
    let delimiter = u8::try_from(format.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| format!("The delimiter '{}' is not an ASCII character", format.delimiter))?;
    let options = SheetOptions {
        columns: SheetColumns {
            label: format.label_column,
            query: format.query_column,
            answers: format.answers_column,
        },
        delimiter,
    };
    load_rows(path, &options)
        .with_context(|| format!("Could not load the competency questions from {}", path.display()))
}

fn generate(rows: &[RawRow], output_dir: &Path, args: GenerationArgs) -> anyhow::Result<()> {
    let options = GenerationOptions {
        prefixes: ArtifactPrefixes {
            entity_namespace: args.namespace,
        },
    };
    generate_artifacts(rows, output_dir, &options)?;
    Ok(())
}

fn validate(
    queries: &Path,
    expected: &ExpectedAnswerSource,
    args: ValidationArgs,
) -> anyhow::Result<()> {
    let mut config = ClientConfig::parse(&args.endpoint)?;
    if let Some(timeout) = args.timeout {
        config = config.with_timeout(Duration::from_secs(timeout));
    }
    let validator = Validator::new(SparqlClient::new(config)?);
    let report = validate_directory(queries, expected, &validator)?;

    let file = File::create(&args.report).with_context(|| {
        format!("Could not create the report file {}", args.report.display())
    })?;
    report
        .write_to(BufWriter::new(file))
        .with_context(|| format!("Could not write the report to {}", args.report.display()))?;
    tracing::info!("Report written to {}", args.report.display());

    let summary = report.summary();
    writeln!(stdout().lock(), "{summary}")?;
    if args.strict && !report.all_correct() {
        bail!(
            "{} of {} competency questions are not answered correctly",
            summary.total - summary.correct,
            summary.total
        )
    }
    Ok(())
}
