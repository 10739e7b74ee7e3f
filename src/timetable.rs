pub mod conflict;
pub mod suggest;
pub mod timetable;
