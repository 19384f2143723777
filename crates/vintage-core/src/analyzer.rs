//! The pipeline instance: owns the staged tables for one analysis run and
//! enforces stage ordering.
//!
//! Stages advance `Empty → Loaded → Normalized → Accumulated → Pivoted`.
//! Invoking a stage before its prerequisite fails with `PipelineState` and
//! leaves held state untouched. Re-running an earlier stage is permitted
//! (e.g. reloading corrected input) and discards downstream results. The
//! terminal state supports repeated quarterly/summary calls.

use std::io;

use crate::pivot::VintageMatrix;
use crate::quarterly::PerformanceSeries;
use crate::types::{BookTable, MergedRecord, MonthKey, ObservationTable, SummaryRecord};
use crate::{everbad, loader, merge, pivot, quarterly, summary};
use crate::{VintageError, VintageResult};

#[derive(Debug, Default)]
pub struct VintageAnalyzer {
    observations: Option<ObservationTable>,
    book: Option<BookTable>,
    merged: Option<Vec<MergedRecord>>,
    accumulated: bool,
    vintage: Option<VintageMatrix>,
    filled: Option<VintageMatrix>,
}

impl VintageAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load both sources from CSV readers. On failure nothing is replaced.
    pub fn load_csv<R, S>(&mut self, observations: R, book: S) -> VintageResult<()>
    where
        R: io::Read,
        S: io::Read,
    {
        let observations = loader::read_observations(observations)?;
        let book = loader::read_book(book)?;
        self.load_records(observations, book);
        Ok(())
    }

    /// Load pre-built tables, e.g. from a non-CSV collaborator.
    pub fn load_records(&mut self, observations: ObservationTable, book: BookTable) {
        self.observations = Some(observations);
        self.book = Some(book);
        self.discard_from_normalized();
    }

    /// Join, parse months, derive vintage offsets, filter and sort.
    pub fn normalize(&mut self) -> VintageResult<()> {
        let (Some(observations), Some(book)) = (&self.observations, &self.book) else {
            return Err(stage_error("normalize", "load"));
        };
        let merged = merge::normalize(observations, book)?;
        self.merged = Some(merged);
        self.accumulated = false;
        self.discard_from_pivoted();
        Ok(())
    }

    /// Apply the per-account ever-bad latch across the merged table.
    pub fn compute_ever_bad(&mut self) -> VintageResult<()> {
        let Some(merged) = self.merged.as_mut() else {
            return Err(stage_error("compute_ever_bad", "normalize"));
        };
        everbad::compute_ever_bad(merged);
        self.accumulated = true;
        self.discard_from_pivoted();
        Ok(())
    }

    /// Pivot into the cohort × vintage matrix and its forward-filled variant.
    pub fn build_vintage_table(&mut self) -> VintageResult<()> {
        let merged = self.accumulated_merged("build_vintage_table")?;
        let table = pivot::build_vintage_table(merged);
        self.filled = Some(table.forward_filled());
        self.vintage = Some(table);
        Ok(())
    }

    /// Sum the filled matrix over the requested cohort months.
    /// Repeatable; a `NoMatchingCohorts` failure does not disturb state.
    pub fn quarterly_performance(&self, cohorts: &[MonthKey]) -> VintageResult<PerformanceSeries> {
        quarterly::quarterly_performance(self.filled_table()?, cohorts)
    }

    /// Summary statistics over the accumulated merged table. Repeatable.
    pub fn summarize(&self) -> VintageResult<SummaryRecord> {
        summary::summarize(self.accumulated_merged("summarize")?)
    }

    /// The accumulated merged table, for export collaborators.
    pub fn merged(&self) -> VintageResult<&[MergedRecord]> {
        self.accumulated_merged("merged")
    }

    pub fn vintage_table(&self) -> VintageResult<&VintageMatrix> {
        self.vintage
            .as_ref()
            .ok_or_else(|| stage_error("vintage_table", "build_vintage_table"))
    }

    pub fn filled_table(&self) -> VintageResult<&VintageMatrix> {
        self.filled
            .as_ref()
            .ok_or_else(|| stage_error("filled_table", "build_vintage_table"))
    }

    /// Convenience driver: load both CSV sources and run every stage.
    pub fn run_full<R, S>(&mut self, observations: R, book: S) -> VintageResult<()>
    where
        R: io::Read,
        S: io::Read,
    {
        self.load_csv(observations, book)?;
        self.normalize()?;
        self.compute_ever_bad()?;
        self.build_vintage_table()
    }

    fn accumulated_merged(&self, attempted: &'static str) -> VintageResult<&[MergedRecord]> {
        match &self.merged {
            Some(merged) if self.accumulated => Ok(merged),
            _ => Err(stage_error(attempted, "compute_ever_bad")),
        }
    }

    fn discard_from_normalized(&mut self) {
        self.merged = None;
        self.accumulated = false;
        self.discard_from_pivoted();
    }

    fn discard_from_pivoted(&mut self) {
        self.vintage = None;
        self.filled = None;
    }
}

fn stage_error(attempted: &'static str, required: &'static str) -> VintageError {
    VintageError::PipelineState {
        attempted,
        required,
    }
}
