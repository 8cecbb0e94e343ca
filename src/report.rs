//! Result table and the text report built from it.

use std::io::Write;

use crate::candidate::Candidate;
use crate::error::BenchError;
use crate::maps::{KeyValueMap, OrderedDict};

/// Width of the case label column.
pub const LABEL_WIDTH: usize = 30;

/// Shown in place of a value for entries that were not measured.
pub const PLACEHOLDER: &str = "--------";

/// Seconds per candidate, in [`Candidate::ALL`] order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Measurements([Option<f64>; 3]);

impl Measurements {
    pub fn get(&self, candidate: Candidate) -> Option<f64> {
        self.0[candidate.slot()]
    }

    pub fn set(&mut self, candidate: Candidate, seconds: Option<f64>) {
        self.0[candidate.slot()] = seconds;
    }

    pub fn as_slice(&self) -> &[Option<f64>] {
        &self.0
    }

    /// `candidate` relative to the reference candidate. `None` only when
    /// either side was not measured; the runner never records a zero
    /// reference.
    pub fn ratio(&self, candidate: Candidate) -> Option<f64> {
        let reference = self.get(Candidate::REFERENCE)?;
        let value = self.get(candidate)?;
        Some(value / reference)
    }
}

/// One line of the summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub label: String,
    pub baseline: Option<f64>,
    pub third: Option<f64>,
}

impl SummaryRow {
    pub fn render(&self) -> String {
        format!(
            "{} {} {:>8} {}",
            self.label,
            format_value(self.baseline),
            "1.000",
            format_value(self.third)
        )
    }
}

/// Case label to measurements, in the order cases were run.
#[derive(Debug, Default)]
pub struct ResultTable {
    rows: OrderedDict<String, Measurements>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a full row. A label seen before keeps its position.
    pub fn insert(&mut self, label: impl Into<String>, measurements: Measurements) {
        self.rows.set(label.into(), measurements);
    }

    pub fn get(&self, label: &str) -> Option<&Measurements> {
        self.rows.get(&label.to_string())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Measurements)> {
        self.rows
            .iter()
            .map(|(label, measurements)| (label.as_str(), measurements))
    }

    pub fn summary(&self) -> Vec<SummaryRow> {
        self.iter()
            .map(|(label, measurements)| SummaryRow {
                label: label.to_string(),
                baseline: measurements.ratio(Candidate::BASELINE),
                third: measurements.ratio(Candidate::THIRD),
            })
            .collect()
    }

    /// Header followed by one ratio line per case.
    pub fn write_summary<W: Write>(&self, out: &mut W) -> Result<(), BenchError> {
        writeln!(out, "{}", header())?;
        for row in self.summary() {
            writeln!(out, "{}", row.render())?;
        }
        out.flush()?;
        Ok(())
    }
}

pub fn header() -> String {
    let labels: Vec<&str> = Candidate::ALL.iter().map(|c| c.label()).collect();
    format!("{} {}", "-".repeat(LABEL_WIDTH + 3), labels.join(" "))
}

/// Display label of a case: the name past its first `_`, padded.
pub fn case_label(name: &str) -> String {
    let stripped = name.split_once('_').map_or(name, |(_, rest)| rest);
    format!("{:<width$}", stripped, width = LABEL_WIDTH)
}

pub fn format_value(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:8.3}"),
        None => PLACEHOLDER.to_string(),
    }
}
