use crate::day::DayOfWeek;
use crate::time::TimeOfDay;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tabled::Tabled;

pub type PeriodId = Arc<str>;
pub type SubjectId = Arc<str>;
pub type TeacherId = Arc<str>;
pub type RoomId = Arc<str>;

/// One weekly occurrence of a subject, taught by a teacher in a room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    #[serde(alias = "_id")]
    #[tabled(rename = "ID")]
    pub id: PeriodId,
    #[tabled(rename = "Day")]
    pub day: DayOfWeek,
    #[tabled(rename = "Start")]
    pub start_time: TimeOfDay,
    #[tabled(rename = "End")]
    pub end_time: TimeOfDay,
    #[serde(alias = "subject")]
    #[tabled(rename = "Subject")]
    pub subject_id: SubjectId,
    #[serde(alias = "teacher")]
    #[tabled(rename = "Teacher")]
    pub teacher_id: TeacherId,
    #[tabled(rename = "Room")]
    pub room: RoomId,
}

impl Period {
    pub fn interval(&self) -> (TimeOfDay, TimeOfDay) {
        (self.start_time, self.end_time)
    }

    pub fn length_minutes(&self) -> u16 {
        self.start_time.minutes_until(self.end_time)
    }

    /// The same period placed on another day and time.
    pub fn moved_to(&self, day: DayOfWeek, start_time: TimeOfDay, end_time: TimeOfDay) -> Period {
        Period {
            day,
            start_time,
            end_time,
            ..self.clone()
        }
    }
}
