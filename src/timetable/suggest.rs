use crate::period::{Period, RoomId, TeacherId};
use crate::time::TimeOfDay;
use crate::timetable::conflict::{has_room_conflict, has_teacher_conflict, has_time_conflict};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeSlot {
    /// Back-to-back slots of `length_minutes` from `first_start`, keeping only
    /// those that end by `last_end`.
    pub fn daily(first_start: TimeOfDay, last_end: TimeOfDay, length_minutes: u16) -> Vec<TimeSlot> {
        let mut slots = vec![];
        if length_minutes == 0 {
            return slots;
        }
        let mut start = first_start;
        while let Some(end) = start.checked_add_minutes(length_minutes) {
            if end > last_end {
                break;
            }
            slots.push(TimeSlot { start, end });
            start = end;
        }
        slots
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Slots on the candidate's day where it could sit without any conflict.
pub fn suggest_slots(existing: &[Period], candidate: &Period, slots: &[TimeSlot]) -> Vec<TimeSlot> {
    slots
        .iter()
        .filter(|slot| {
            let moved = candidate.moved_to(candidate.day, slot.start, slot.end);
            !has_time_conflict(existing, &moved)
                && !has_teacher_conflict(existing, &moved)
                && !has_room_conflict(existing, &moved)
        })
        .copied()
        .collect()
}

/// Teachers who are free for the candidate's day and time.
pub fn suggest_teachers(existing: &[Period], candidate: &Period, teachers: &[TeacherId]) -> Vec<TeacherId> {
    teachers
        .iter()
        .filter(|teacher| {
            let reassigned = Period {
                teacher_id: Arc::clone(teacher),
                ..candidate.clone()
            };
            !has_teacher_conflict(existing, &reassigned)
        })
        .cloned()
        .collect()
}

/// Rooms that are free for the candidate's day and time.
pub fn suggest_rooms(existing: &[Period], candidate: &Period, rooms: &[RoomId]) -> Vec<RoomId> {
    rooms
        .iter()
        .filter(|room| {
            let reassigned = Period {
                room: Arc::clone(room),
                ..candidate.clone()
            };
            !has_room_conflict(existing, &reassigned)
        })
        .cloned()
        .collect()
}
