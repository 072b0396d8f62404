//! Stage functions and the batch orchestrator.
//!
//! `DISCOVER → (per file) IMPORT → EXTRACT → AGGREGATE → RENDER → MARK_PROCESSED`
//!
//! Every stage can be called on its own. The batch runs files strictly one
//! after another; a failure inside one file is recorded in its outcome and the
//! next file is processed as usual.

use crate::core::aggregator::build_timesheet;
use crate::core::classifier::RowExtractor;
use crate::core::extractor::extract_events;
use crate::errors::{AppError, AppResult};
use crate::models::event::AttendanceEvent;
use crate::models::timesheet::TimesheetSummary;
use crate::store::{
    DatasetStore, DocumentHandle, DocumentStore, EVENTS_DATASET, RAW_DATASET, TIMESHEET_DATASET,
    TableFormatter,
};
use crate::ui::messages::{info, step, warning};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExtractSummary {
    pub rows: usize,
    pub events: usize,
    pub orphans: usize,
    pub unrecognized: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FileStats {
    pub rows: usize,
    pub events: usize,
    pub employees: usize,
    pub days: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FileOutcome {
    pub file: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<FileStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

pub struct Pipeline<'a, S: DatasetStore, E: RowExtractor> {
    datasets: &'a mut S,
    extractor: E,
    formatter: Option<&'a dyn TableFormatter>,
}

impl<'a, S: DatasetStore, E: RowExtractor> Pipeline<'a, S, E> {
    pub fn new(datasets: &'a mut S, extractor: E) -> Self {
        Self {
            datasets,
            extractor,
            formatter: None,
        }
    }

    /// Attach the presentation step run after every successful aggregation.
    pub fn with_formatter(mut self, formatter: &'a dyn TableFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Copy the document's first sheet into the raw dataset.
    pub fn import<D: DocumentHandle + ?Sized>(&mut self, doc: &D) -> AppResult<usize> {
        if !self.datasets.has_table(RAW_DATASET)? {
            return Err(AppError::MissingDataset(RAW_DATASET.to_string()));
        }

        let rows = doc.read_as_table()?;
        self.datasets.write_table(RAW_DATASET, &rows)?;
        Ok(rows.len())
    }

    /// Raw dataset → event table.
    pub fn extract(&mut self) -> AppResult<ExtractSummary> {
        let raw = self.datasets.read_table(RAW_DATASET)?;
        if !self.datasets.has_table(EVENTS_DATASET)? {
            return Err(AppError::MissingDataset(EVENTS_DATASET.to_string()));
        }

        let extraction = extract_events(&raw, &self.extractor);

        let mut table = Vec::with_capacity(extraction.events.len() + 1);
        table.push(AttendanceEvent::header_row());
        table.extend(extraction.events.iter().map(AttendanceEvent::to_row));
        self.datasets.write_table(EVENTS_DATASET, &table)?;

        if extraction.orphans > 0 {
            warning(format!(
                "{} event row(s) found before any employee header were skipped",
                extraction.orphans
            ));
        }

        Ok(ExtractSummary {
            rows: extraction.rows,
            events: extraction.events.len(),
            orphans: extraction.orphans,
            unrecognized: extraction.unrecognized,
        })
    }

    /// Event table → timesheet matrix. The matrix is only written once it has
    /// been fully computed.
    pub fn aggregate(&mut self) -> AppResult<TimesheetSummary> {
        if !self.datasets.has_table(EVENTS_DATASET)? {
            return Err(AppError::NoEvents(EVENTS_DATASET.to_string()));
        }
        if !self.datasets.has_table(TIMESHEET_DATASET)? {
            return Err(AppError::MissingDataset(TIMESHEET_DATASET.to_string()));
        }

        let events = self.datasets.read_table(EVENTS_DATASET)?;
        let timesheet = build_timesheet(&events, EVENTS_DATASET)?;

        self.datasets
            .write_table(TIMESHEET_DATASET, &timesheet.to_rows())?;

        Ok(timesheet.summary())
    }

    /// Run the attached formatter, if any.
    pub fn render(&self) -> AppResult<()> {
        match self.formatter {
            Some(f) => f.format(&*self.datasets),
            None => Ok(()),
        }
    }

    /// Import → extract → aggregate → render for one document.
    fn run_document<D: DocumentHandle>(&mut self, doc: &D) -> AppResult<FileStats> {
        let rows = self.import(doc)?;
        step("import", format!("{rows} row(s)"));

        let extracted = self.extract()?;
        step("extract", format!("{} event(s)", extracted.events));

        let summary = self.aggregate()?;
        step(
            "aggregate",
            format!("{} employee(s), {} day(s)", summary.employees, summary.days),
        );

        self.render()?;
        if self.formatter.is_some() {
            step("render", "report updated");
        }

        Ok(FileStats {
            rows,
            events: extracted.events,
            employees: summary.employees,
            days: summary.days,
        })
    }

    /// Process every pending document of `store`, one at a time.
    pub fn process_pending<D: DocumentStore>(&mut self, store: &D) -> AppResult<BatchReport> {
        let docs = store.list_unprocessed()?;
        let mut report = BatchReport::default();

        for mut doc in docs {
            let file = doc.name().to_string();
            info(format!("Processing file: {file}"));

            let outcome = self
                .run_document(&doc)
                .and_then(|stats| doc.mark_processed().map(|_| stats));

            match outcome {
                Ok(stats) => {
                    report.succeeded += 1;
                    report.results.push(FileOutcome {
                        file,
                        ok: true,
                        stats: Some(stats),
                        error: None,
                    });
                }
                Err(e) => {
                    warning(format!("Failed to process {file}: {e}"));
                    report.failed += 1;
                    report.results.push(FileOutcome {
                        file,
                        ok: false,
                        stats: None,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        Ok(report)
    }
}
