use crate::period::PeriodId;
use crate::time::TimeOfDay;
use crate::timetable::conflict::ConflictReport;
use std::io;
use thiserror::Error;

/// Text that could not be read as a time or a school day.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("invalid time '{0}', expected HH:MM")]
    InvalidTime(String),
    #[error("invalid day '{0}', expected Monday..Friday")]
    InvalidDay(String),
    #[error("'{0}' is a weekend day; only Monday..Friday can be scheduled")]
    WeekendDay(String),
}

/// A candidate period that fails form validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PeriodError {
    #[error("missing {0}")]
    MissingField(&'static str),
    #[error("start {start} must be before end {end}")]
    InvalidTimeRange { start: TimeOfDay, end: TimeOfDay },
}

#[derive(Debug, Error)]
pub enum TimetableError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("malformed timetable file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid period: {0}")]
    Invalid(#[from] PeriodError),
    #[error("period {0} already exists")]
    DuplicatePeriod(PeriodId),
    #[error("no period with id {0}")]
    UnknownPeriod(PeriodId),
    #[error("period {id} conflicts with {report}")]
    Conflict { id: PeriodId, report: ConflictReport },
}
