use crate::day::DayOfWeek;
use crate::error::TimetableError;
use crate::period::{Period, PeriodId, RoomId, TeacherId};
use crate::timetable::conflict::{ConflictReport, find_conflicts};
use crate::validation::validate_period;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What to do when an added or moved period conflicts with the timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Store it anyway and hand back the report.
    Warn,
    Reject,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimetableFile {
    class_name: Arc<str>,
    periods: Vec<Period>,
}

/// One class's weekly periods, kept sorted by day and start time.
pub struct Timetable {
    pub class_name: Arc<str>,
    periods: Vec<Period>,
    periods_index: HashMap<PeriodId, usize>,
}

impl Timetable {
    /// Period ids must be unique.
    pub fn new(class_name: Arc<str>, periods: Vec<Period>) -> Timetable {
        let mut timetable = Timetable {
            class_name,
            periods,
            periods_index: HashMap::new(),
        };
        timetable.reindex();
        timetable
    }

    pub fn load_from_file(path: &Path) -> Result<Self, TimetableError> {
        let data = std::fs::read_to_string(path)?;
        let raw: TimetableFile = serde_json::from_str(&data)?;
        let mut seen = HashSet::new();
        for period in &raw.periods {
            validate_period(period)?;
            if !seen.insert(period.id.clone()) {
                return Err(TimetableError::DuplicatePeriod(period.id.clone()));
            }
        }
        info!(path = %path.display(), class = %raw.class_name, periods = raw.periods.len(), "loaded timetable");
        Ok(Timetable::new(raw.class_name, raw.periods))
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), TimetableError> {
        let raw = TimetableFile {
            class_name: self.class_name.clone(),
            periods: self.periods.clone(),
        };
        std::fs::write(path, serde_json::to_string_pretty(&raw)?)?;
        info!(path = %path.display(), periods = self.periods.len(), "saved timetable");
        Ok(())
    }

    fn reindex(&mut self) {
        self.periods
            .sort_by(|a, b| (a.day, a.start_time, &a.id).cmp(&(b.day, b.start_time, &b.id)));
        self.periods_index = self
            .periods
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();
        self.assert_invariants();
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Period> {
        self.periods_index.get(id).map(|i| &self.periods[*i])
    }

    pub fn periods_on(&self, day: DayOfWeek) -> impl Iterator<Item = &Period> {
        self.periods.iter().filter(move |p| p.day == day)
    }

    pub fn teachers(&self) -> Vec<TeacherId> {
        self.periods
            .iter()
            .map(|p| p.teacher_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn rooms(&self) -> Vec<RoomId> {
        self.periods
            .iter()
            .map(|p| p.room.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn check(&self, candidate: &Period) -> ConflictReport {
        find_conflicts(&self.periods, candidate)
    }

    fn admit(&self, period: &Period, policy: ConflictPolicy) -> Result<ConflictReport, TimetableError> {
        validate_period(period)?;
        let report = self.check(period);
        if !report.is_clear() {
            if policy == ConflictPolicy::Reject {
                debug!(id = %period.id, %report, "rejected conflicting period");
                return Err(TimetableError::Conflict {
                    id: period.id.clone(),
                    report,
                });
            }
            warn!(id = %period.id, %report, "storing conflicting period");
        }
        Ok(report)
    }

    pub fn add(&mut self, period: Period, policy: ConflictPolicy) -> Result<ConflictReport, TimetableError> {
        if self.periods_index.contains_key(&period.id) {
            return Err(TimetableError::DuplicatePeriod(period.id));
        }
        let report = self.admit(&period, policy)?;
        info!(id = %period.id, day = %period.day, start = %period.start_time, end = %period.end_time, "added period");
        self.periods.push(period);
        self.reindex();
        Ok(report)
    }

    /// Replace the stored period with the same id.
    pub fn update(&mut self, period: Period, policy: ConflictPolicy) -> Result<ConflictReport, TimetableError> {
        let Some(idx) = self.periods_index.get(&period.id).copied() else {
            return Err(TimetableError::UnknownPeriod(period.id));
        };
        let report = self.admit(&period, policy)?;
        info!(id = %period.id, day = %period.day, start = %period.start_time, end = %period.end_time, "updated period");
        self.periods[idx] = period;
        self.reindex();
        Ok(report)
    }

    pub fn remove(&mut self, id: &str) -> Result<Period, TimetableError> {
        let Some(idx) = self.periods_index.get(id).copied() else {
            return Err(TimetableError::UnknownPeriod(Arc::from(id)));
        };
        let removed = self.periods.remove(idx);
        info!(id = %removed.id, "removed period");
        self.reindex();
        Ok(removed)
    }

    /// Conflicts among the periods already stored, e.g. from a hand-edited file.
    pub fn audit(&self) -> Vec<(PeriodId, ConflictReport)> {
        self.periods
            .iter()
            .map(|p| (p.id.clone(), self.check(p)))
            .filter(|(_, report)| !report.is_clear())
            .collect()
    }

    #[cfg(debug_assertions)]
    fn assert_invariants(&self) {
        debug_assert!(
            self.periods
                .windows(2)
                .all(|ps| (ps[0].day, ps[0].start_time) <= (ps[1].day, ps[1].start_time)),
            "Day <-> start time ordering violated"
        );
        debug_assert_eq!(
            self.periods_index.len(),
            self.periods.len(),
            "Duplicate period ids"
        );
        debug_assert!(
            self.periods_index
                .iter()
                .all(|(id, i)| self.periods.get(*i).map_or(false, |p| p.id == *id)),
            "Period index out of sync"
        );
    }

    #[cfg(not(debug_assertions))]
    fn assert_invariants(&self) {}
}
