use crate::day::DayOfWeek;
use crate::period::Period;
use crate::time::TimeOfDay;
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::sample::select;
use proptest::strategy::Just;
use std::sync::Arc;

pub fn id(s: &str) -> Arc<str> {
    Arc::from(s)
}

pub fn t(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

pub fn period(
    period_id: &str,
    day: DayOfWeek,
    start: &str,
    end: &str,
    teacher_id: &str,
    room: &str,
) -> Period {
    Period {
        id: id(period_id),
        day,
        start_time: t(start),
        end_time: t(end),
        subject_id: id("MATH"),
        teacher_id: id(teacher_id),
        room: id(room),
    }
}

pub fn arb_id(prefix: &'static str) -> impl Strategy<Value = Arc<str>> {
    prop_oneof![
        Just(Arc::from(format!("{}_1", prefix))),
        Just(Arc::from(format!("{}_2", prefix))),
        Just(Arc::from(format!("{}_3", prefix))),
    ]
}

pub fn arb_day() -> impl Strategy<Value = DayOfWeek> {
    select(DayOfWeek::ALL.to_vec())
}

/// Periods between 07:00 and 18:00, 5 minutes to 2 hours long.
pub fn arb_period() -> impl Strategy<Value = Period> {
    (
        arb_id("P"),
        arb_day(),
        420..960u16,
        5..=120u16,
        arb_id("T"),
        arb_id("R"),
    )
        .prop_map(|(pid, day, start, len, teacher, room)| Period {
            id: pid,
            day,
            start_time: TimeOfDay::from_minutes(start).unwrap(),
            end_time: TimeOfDay::from_minutes(start + len).unwrap(),
            subject_id: id("MATH"),
            teacher_id: teacher,
            room,
        })
}
