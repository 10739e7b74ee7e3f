//! Overlap checks for a candidate period against periods already on a timetable.
//!
//! Every check is a single linear scan over `existing`. A period never
//! conflicts with itself: entries sharing the candidate's id are skipped, so
//! re-checking a period that is already placed reports nothing.
//!
//! The candidate must satisfy `start_time < end_time`. An empty or inverted
//! interval is not rejected here and gives meaningless answers; run
//! [`validate_period`](crate::validation::validate_period) first.
//!
//! Teacher and room checks only see the periods they are given. Passing one
//! class's timetable will not catch a teacher booked in another class.

use crate::period::{Period, PeriodId};
use crate::time::TimeOfDay;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    Time,
    Teacher,
    Room,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictKind::Time => write!(f, "time"),
            ConflictKind::Teacher => write!(f, "teacher"),
            ConflictKind::Room => write!(f, "room"),
        }
    }
}

/// Ids of the existing periods a candidate collides with, per axis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictReport {
    pub time: Vec<PeriodId>,
    pub teacher: Vec<PeriodId>,
    pub room: Vec<PeriodId>,
}

impl ConflictReport {
    pub fn is_clear(&self) -> bool {
        self.time.is_empty() && self.teacher.is_empty() && self.room.is_empty()
    }

    pub fn kinds(&self) -> Vec<ConflictKind> {
        [
            (ConflictKind::Time, &self.time),
            (ConflictKind::Teacher, &self.teacher),
            (ConflictKind::Room, &self.room),
        ]
        .into_iter()
        .filter(|(_, ids)| !ids.is_empty())
        .map(|(kind, _)| kind)
        .collect()
    }

    pub fn ids(&self, kind: ConflictKind) -> &[PeriodId] {
        match kind {
            ConflictKind::Time => &self.time,
            ConflictKind::Teacher => &self.teacher,
            ConflictKind::Room => &self.room,
        }
    }
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clear() {
            return write!(f, "no conflicts");
        }
        let parts = self
            .kinds()
            .into_iter()
            .map(|kind| format!("{}: {}", kind, self.ids(kind).join(", ")))
            .collect::<Vec<_>>();
        write!(f, "{}", parts.join("; "))
    }
}

fn overlapping<'a>(existing: &'a [Period], candidate: &'a Period) -> impl Iterator<Item = &'a Period> {
    existing.iter().filter(move |p| {
        p.id != candidate.id
            && p.day == candidate.day
            && TimeOfDay::is_overlapping(&p.interval(), &candidate.interval())
    })
}

/// Any other period on the same day overlaps the candidate.
pub fn has_time_conflict(existing: &[Period], candidate: &Period) -> bool {
    overlapping(existing, candidate).next().is_some()
}

/// An overlapping period is taught by the candidate's teacher.
pub fn has_teacher_conflict(existing: &[Period], candidate: &Period) -> bool {
    overlapping(existing, candidate).any(|p| p.teacher_id == candidate.teacher_id)
}

/// An overlapping period uses the candidate's room. Room labels compare exactly.
pub fn has_room_conflict(existing: &[Period], candidate: &Period) -> bool {
    overlapping(existing, candidate).any(|p| p.room == candidate.room)
}

/// All three checks at once, keeping the ids of the offending periods in
/// `existing` order.
pub fn find_conflicts(existing: &[Period], candidate: &Period) -> ConflictReport {
    overlapping(existing, candidate).fold(ConflictReport::default(), |mut report, p| {
        report.time.push(p.id.clone());
        if p.teacher_id == candidate.teacher_id {
            report.teacher.push(p.id.clone());
        }
        if p.room == candidate.room {
            report.room.push(p.id.clone());
        }
        report
    })
}
