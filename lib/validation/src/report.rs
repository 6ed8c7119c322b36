//! Validation reports: verdict aggregation and rendering.

use crate::{Verdict, VerdictStatus};
use std::fmt;
use std::io::{self, Write};

const SEPARATOR_WIDTH: usize = 80;

/// Counts of verdicts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    pub total: usize,
    pub correct: usize,
    pub different: usize,
    pub errors: usize,
}

impl ValidationSummary {
    /// The share of correct questions in percent. [None] if no question was validated.
    #[allow(clippy::cast_precision_loss, reason = "Question counts are small")]
    pub fn success_rate(&self) -> Option<f64> {
        (self.total > 0).then(|| self.correct as f64 / self.total as f64 * 100.0)
    }
}

impl fmt::Display for ValidationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Total: {} | Corretas: {} | Diferentes: {} | Erros: {}",
            self.total, self.correct, self.different, self.errors
        )?;
        match self.success_rate() {
            Some(rate) => write!(f, "Taxa de acerto: {rate:.1}%"),
            None => write!(f, "Taxa de acerto: N/A"),
        }
    }
}

/// The verdicts of a validation run, in the order in which they were produced.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    verdicts: Vec<Verdict>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a verdict to this report.
    pub fn push(&mut self, verdict: Verdict) {
        self.verdicts.push(verdict);
    }

    pub fn verdicts(&self) -> &[Verdict] {
        &self.verdicts
    }

    pub fn summary(&self) -> ValidationSummary {
        let mut summary = ValidationSummary {
            total: self.verdicts.len(),
            ..ValidationSummary::default()
        };
        for verdict in &self.verdicts {
            match verdict.status() {
                VerdictStatus::Correct => summary.correct += 1,
                VerdictStatus::Different => summary.different += 1,
                VerdictStatus::Error => summary.errors += 1,
            }
        }
        summary
    }

    /// Returns true if every question was answered correctly.
    pub fn all_correct(&self) -> bool {
        self.verdicts
            .iter()
            .all(|v| v.status() == VerdictStatus::Correct)
    }

    /// Writes the textual report.
    pub fn write_to(&self, mut writer: impl Write) -> io::Result<()> {
        write!(writer, "{self}")?;
        writer.flush()
    }
}

#[allow(clippy::non_ascii_literal)]
impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RELATÓRIO DE VALIDAÇÃO AVANÇADO")?;
        writeln!(f, "{}", "=".repeat(SEPARATOR_WIDTH))?;
        writeln!(f)?;

        for verdict in &self.verdicts {
            writeln!(f, "{}:", verdict.question())?;
            writeln!(f, "Status: {}", verdict.status())?;
            writeln!(f, "Esperado: {}", verdict.expected())?;
            match verdict.diagnostic() {
                Some(diagnostic) => writeln!(f, "Detalhes: {diagnostic}")?,
                None => {
                    let obtained = verdict
                        .obtained()
                        .iter()
                        .map(String::as_str)
                        .collect::<Vec<_>>();
                    writeln!(f, "Obtido: {}", obtained.join("; "))?;
                }
            }
            writeln!(f, "{}", "-".repeat(SEPARATOR_WIDTH))?;
        }

        writeln!(f)?;
        writeln!(f, "RESUMO FINAL:")?;
        writeln!(f, "{}", self.summary())
    }
}
