use crate::day::DayOfWeek;
use crate::error::ParseError;
use crate::period::{Period, PeriodId, RoomId, TeacherId};
use crate::time::TimeOfDay;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

pub const COMMANDS: [&str; 11] = [
    "ls", "check", "add", "mv", "rm", "audit", "suggest", "save", "help", "exit", "quit",
];

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A candidate checked without being stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Probe {
    pub id: Option<PeriodId>,
    pub day: DayOfWeek,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub teacher_id: TeacherId,
    pub room: RoomId,
}

impl Probe {
    /// Without an id the probe can collide with every stored period.
    pub fn to_period(&self) -> Period {
        Period {
            id: self.id.clone().unwrap_or_else(|| Arc::from("")),
            day: self.day,
            start_time: self.start_time,
            end_time: self.end_time,
            subject_id: Arc::from(""),
            teacher_id: self.teacher_id.clone(),
            room: self.room.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List(Option<DayOfWeek>),
    Check(Probe),
    Add(Period),
    Move {
        id: PeriodId,
        day: DayOfWeek,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
    },
    Remove(PeriodId),
    Audit,
    Suggest(PeriodId),
    Save(Option<PathBuf>),
    Help,
    Exit,
}

const CHECK_USAGE: &str = "check <day> <start> <end> <teacher> <room> [id]";
const ADD_USAGE: &str = "add <id> <day> <start> <end> <subject> <teacher> <room>";
const MOVE_USAGE: &str = "mv <id> <day> <start> <end>";

pub fn parse(line: &str) -> Result<Command, CommandError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((name, args)) = parts.split_first() else {
        return Err(CommandError::Empty);
    };
    match *name {
        "ls" => match args {
            [] => Ok(Command::List(None)),
            [day] => Ok(Command::List(Some(day.parse()?))),
            _ => Err(CommandError::Usage("ls [day]")),
        },
        "check" => match args {
            [day, start, end, teacher, room, rest @ ..] if rest.len() <= 1 => Ok(Command::Check(Probe {
                id: rest.first().map(|id| Arc::from(*id)),
                day: day.parse()?,
                start_time: start.parse()?,
                end_time: end.parse()?,
                teacher_id: Arc::from(*teacher),
                room: Arc::from(*room),
            })),
            _ => Err(CommandError::Usage(CHECK_USAGE)),
        },
        "add" => match args {
            [id, day, start, end, subject, teacher, room] => Ok(Command::Add(Period {
                id: Arc::from(*id),
                day: day.parse()?,
                start_time: start.parse()?,
                end_time: end.parse()?,
                subject_id: Arc::from(*subject),
                teacher_id: Arc::from(*teacher),
                room: Arc::from(*room),
            })),
            _ => Err(CommandError::Usage(ADD_USAGE)),
        },
        "mv" => match args {
            [id, day, start, end] => Ok(Command::Move {
                id: Arc::from(*id),
                day: day.parse()?,
                start_time: start.parse()?,
                end_time: end.parse()?,
            }),
            _ => Err(CommandError::Usage(MOVE_USAGE)),
        },
        "rm" => match args {
            [id] => Ok(Command::Remove(Arc::from(*id))),
            _ => Err(CommandError::Usage("rm <id>")),
        },
        "audit" => Ok(Command::Audit),
        "suggest" => match args {
            [id] => Ok(Command::Suggest(Arc::from(*id))),
            _ => Err(CommandError::Usage("suggest <id>")),
        },
        "save" => match args {
            [] => Ok(Command::Save(None)),
            [path] => Ok(Command::Save(Some(PathBuf::from(*path)))),
            _ => Err(CommandError::Usage("save [file]")),
        },
        "help" | "?" => Ok(Command::Help),
        "exit" | "quit" => Ok(Command::Exit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}
