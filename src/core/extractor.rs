//! Raw sheet → flat list of attendance events.

use crate::core::classifier::{RowClass, RowEvent, RowExtractor, classify, trim_row};
use crate::core::codec::parse_optional_duration;
use crate::models::event::AttendanceEvent;
use crate::models::event_kind::EventKind;
use serde::Serialize;

/// Employee section currently in effect while walking the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseContext {
    pub employee: String,
    pub badge_key: String,
}

/// What a single step of the walk produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Header,
    Noise,
    Event(AttendanceEvent),
    /// Event fields found, but no employee section is open.
    Orphan,
    /// Candidate row none of the extractors could read.
    Unrecognized,
}

impl ParseContext {
    /// Consume one raw row. Header rows replace the context, every other row
    /// leaves it untouched.
    pub fn step<E: RowExtractor + ?Sized>(self, row: &[String], extractor: &E) -> (Self, Step) {
        let row = trim_row(row);

        match classify(&row) {
            RowClass::Header {
                employee,
                badge_key,
            } => (
                ParseContext {
                    employee,
                    badge_key,
                },
                Step::Header,
            ),
            RowClass::Noise => (self, Step::Noise),
            RowClass::Candidate => {
                let step = match extractor.extract(&row) {
                    None => Step::Unrecognized,
                    Some(_) if self.employee.is_empty() => Step::Orphan,
                    Some(found) => Step::Event(self.resolve(found)),
                };
                (self, step)
            }
        }
    }

    fn resolve(&self, found: RowEvent) -> AttendanceEvent {
        let minutes = match found.kind {
            EventKind::Full => parse_optional_duration(found.duration.as_deref()),
            EventKind::EntryOnly | EventKind::ExitOnly => 0,
        };

        AttendanceEvent {
            employee_name: self.employee.clone(),
            badge_key: self.badge_key.clone(),
            date: found.date,
            entry_time: found.entry_time,
            exit_time: found.exit_time,
            minutes,
            kind: found.kind,
        }
    }
}

/// Result of one extraction pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Extraction {
    pub events: Vec<AttendanceEvent>,
    pub rows: usize,
    pub headers: usize,
    pub noise: usize,
    pub orphans: usize,
    pub unrecognized: usize,
}

/// Walk all rows top to bottom, carrying the employee context along.
pub fn extract_events<R, E>(rows: &[R], extractor: &E) -> Extraction
where
    R: AsRef<[String]>,
    E: RowExtractor + ?Sized,
{
    let init = (ParseContext::default(), Extraction::default());

    let (_, mut out) = rows.iter().fold(init, |(ctx, mut acc), row| {
        let (ctx, step) = ctx.step(row.as_ref(), extractor);
        match step {
            Step::Header => acc.headers += 1,
            Step::Noise => acc.noise += 1,
            Step::Event(ev) => acc.events.push(ev),
            Step::Orphan => acc.orphans += 1,
            Step::Unrecognized => acc.unrecognized += 1,
        }
        (ctx, acc)
    });

    out.rows = rows.len();
    out
}
