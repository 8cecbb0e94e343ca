use std::io::Write;

use tracing::{debug, info};

use crate::candidate::Candidate;
use crate::clock::Clock;
use crate::config::DiscoveryConfig;
use crate::error::BenchError;
use crate::registry::Registry;
use crate::report::{self, Measurements, ResultTable};
use crate::timer::Timer;

/// Times every selected case on every candidate and reports the ratios.
pub struct Runner<'r, C> {
    registry: &'r Registry,
    timer: Timer<C>,
    discovery: DiscoveryConfig,
    requested: Vec<String>,
}

impl<'r, C: Clock> Runner<'r, C> {
    /// `requested` empty means every case matching the discovery prefix.
    /// An empty skip marker would match every case name and is rejected.
    pub fn new(
        registry: &'r Registry,
        timer: Timer<C>,
        discovery: DiscoveryConfig,
        requested: Vec<String>,
    ) -> Result<Self, BenchError> {
        if discovery.baseline_skip_marker.is_empty() {
            return Err(BenchError::InvalidDiscovery(
                "baseline skip marker must not be empty".to_string(),
            ));
        }
        Ok(Self {
            registry,
            timer,
            discovery,
            requested,
        })
    }

    pub fn select_cases(&self) -> Vec<String> {
        if self.requested.is_empty() {
            self.registry.discover(&self.discovery.prefix)
        } else {
            self.requested.clone()
        }
    }

    fn skips(&self, name: &str, candidate: Candidate) -> bool {
        candidate.is_baseline() && name.contains(self.discovery.baseline_skip_marker.as_str())
    }

    /// Seconds taken by the fastest trial, or `None` when the case is marked
    /// inapplicable to the candidate.
    pub fn run_case(&self, name: &str, candidate: Candidate) -> Result<Option<f64>, BenchError> {
        if self.skips(name, candidate) {
            debug!(case = name, candidate = %candidate, "skipped");
            return Ok(None);
        }
        let case = self.registry.lookup(name)?;
        let elapsed = self
            .timer
            .min_of(|| case.run(candidate))
            .map_err(|source| BenchError::CaseFailed {
                case: name.to_string(),
                candidate,
                source: Box::new(source),
            })?;
        let seconds = elapsed.as_secs_f64();
        debug!(case = name, candidate = %candidate, seconds, "measured");
        Ok(Some(seconds))
    }

    /// Run every selected case, writing a progress line per case. A case the
    /// reference candidate ran in no measurable time has no ratios and ends
    /// the run.
    pub fn measure<W: Write>(&self, out: &mut W) -> Result<ResultTable, BenchError> {
        let cases = self.select_cases();
        info!(
            cases = cases.len(),
            loops = self.timer.loops(),
            repeat = self.timer.repeat(),
            "starting benchmark run"
        );
        writeln!(
            out,
            "loop: {} minof {}",
            self.timer.loops(),
            self.timer.repeat()
        )?;
        writeln!(out, "{:?}", self.requested)?;
        writeln!(out, "{}", report::header())?;

        let mut table = ResultTable::new();
        for name in &cases {
            let label = report::case_label(name);
            write!(out, "{label}")?;
            out.flush()?;
            let mut measurements = Measurements::default();
            for candidate in Candidate::ALL {
                let seconds = self.run_case(name, candidate)?;
                write!(out, " {}", report::format_value(seconds))?;
                out.flush()?;
                measurements.set(candidate, seconds);
            }
            writeln!(out)?;
            if measurements.get(Candidate::REFERENCE) == Some(0.0) {
                return Err(BenchError::ZeroReference { case: name.clone() });
            }
            table.insert(label, measurements);
        }
        Ok(table)
    }

    /// Measure, then write the summary. Nothing of the summary is written
    /// unless every case completed.
    pub fn execute<W: Write>(&self, out: &mut W) -> Result<ResultTable, BenchError> {
        let table = self.measure(out)?;
        table.write_summary(out)?;
        info!(cases = table.len(), "benchmark run finished");
        Ok(table)
    }
}
