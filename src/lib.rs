pub mod command;
pub mod day;
pub mod error;
pub mod period;
pub mod time;
pub mod timetable;
pub mod validation;
