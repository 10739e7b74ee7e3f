use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command as Process, Stdio};
use tabled::settings::Style;
use timetable::command::{self, COMMANDS, Command};
use timetable::period::Period;
use timetable::time::TimeOfDay;
use timetable::timetable::conflict::{
    ConflictKind, ConflictReport, has_room_conflict, has_teacher_conflict, has_time_conflict,
};
use timetable::timetable::suggest::{TimeSlot, suggest_rooms, suggest_slots, suggest_teachers};
use timetable::timetable::timetable::{ConflictPolicy, Timetable};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Args {
    /// Path to the JSON timetable file
    #[arg(short, long, value_name = "FILE", default_value = "data/default.json")]
    timetable: PathBuf,

    /// Refuse conflicting periods instead of storing them with a warning
    #[arg(long)]
    strict: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, value_name = "FILTER", default_value = "warn")]
    log_level: String,

    /// Start of the school day offered by `suggest`
    #[arg(long, value_name = "HH:MM", default_value = "08:00")]
    day_start: TimeOfDay,

    /// End of the school day offered by `suggest`
    #[arg(long, value_name = "HH:MM", default_value = "16:00")]
    day_end: TimeOfDay,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: format!("{} ", cmd),
            })
            .collect();

        Ok((0, candidates))
    }
}

fn paginate(content: String) -> std::io::Result<()> {
    let mut pager = Process::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Process::new("more").stdin(Stdio::piped()).spawn())?;

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // Broken pipe is common if the user quits the pager early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(e);
            }
        }
    }

    // Wait for the user to close the pager before returning to the ">> " prompt
    pager.wait().map(|_| ())
}

fn print_periods(periods: &[&Period]) {
    if periods.is_empty() {
        println!("No matching periods found.");
        return;
    }
    let mut table = tabled::Table::new(periods);
    table.with(Style::rounded());
    table.with(tabled::settings::Alignment::left());
    if periods.len() > 20 {
        if let Err(e) = paginate(table.to_string()) {
            error!(error = %e, "pager failed");
            println!("{}", table);
        }
    } else {
        println!("{}", table);
    }
}

fn verdict(label: &str, conflict: bool) -> String {
    if conflict {
        format!("{:<8} {}", label, "CONFLICT".red().bold())
    } else {
        format!("{:<8} {}", label, "ok".green())
    }
}

fn print_report(report: &ConflictReport) {
    if report.is_clear() {
        println!("{}", "No conflicts.".green());
        return;
    }
    for kind in report.kinds() {
        let ids = report.ids(kind).join(", ");
        let line = match kind {
            ConflictKind::Time => format!("Time slot taken by {}", ids),
            ConflictKind::Teacher => format!("Teacher already teaching in {}", ids),
            ConflictKind::Room => format!("Room already used by {}", ids),
        };
        println!("{}", line.yellow());
    }
}

fn run(command: Command, timetable: &mut Timetable, args: &Args, policy: ConflictPolicy) -> bool {
    match command {
        Command::List(day) => {
            let periods: Vec<&Period> = match day {
                Some(day) => timetable.periods_on(day).collect(),
                None => timetable.periods().iter().collect(),
            };
            print_periods(&periods);
        }
        Command::Check(probe) => {
            let candidate = probe.to_period();
            let periods = timetable.periods();
            println!("{}", verdict("time", has_time_conflict(periods, &candidate)));
            println!("{}", verdict("teacher", has_teacher_conflict(periods, &candidate)));
            println!("{}", verdict("room", has_room_conflict(periods, &candidate)));
            print_report(&timetable.check(&candidate));
        }
        Command::Add(period) => match timetable.add(period, policy) {
            Ok(report) => {
                println!("Period added.");
                print_report(&report);
            }
            Err(e) => println!("{}", e.to_string().red()),
        },
        Command::Move {
            id,
            day,
            start_time,
            end_time,
        } => {
            let Some(moved) = timetable
                .get(&id)
                .map(|p| p.moved_to(day, start_time, end_time))
            else {
                println!("{}", format!("No period with id {}", id).red());
                return true;
            };
            match timetable.update(moved, policy) {
                Ok(report) => {
                    println!("Period moved.");
                    print_report(&report);
                }
                Err(e) => println!("{}", e.to_string().red()),
            }
        }
        Command::Remove(id) => match timetable.remove(&id) {
            Ok(removed) => println!("Removed {} ({} {}-{}).", removed.id, removed.day, removed.start_time, removed.end_time),
            Err(e) => println!("{}", e.to_string().red()),
        },
        Command::Audit => {
            let findings = timetable.audit();
            if findings.is_empty() {
                println!("{}", "Timetable has no conflicts.".green());
            }
            for (id, report) in findings {
                println!("{}: {}", id.bold(), report.to_string().yellow());
            }
        }
        Command::Suggest(id) => {
            let Some(period) = timetable.get(&id) else {
                println!("{}", format!("No period with id {}", id).red());
                return true;
            };
            let periods = timetable.periods();
            let slots = TimeSlot::daily(args.day_start, args.day_end, period.length_minutes());
            let free_slots = suggest_slots(periods, period, &slots)
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>();
            let free_teachers = suggest_teachers(periods, period, &timetable.teachers());
            let free_rooms = suggest_rooms(periods, period, &timetable.rooms());
            println!("Free {} slots: {}", period.day, free_slots.join(", "));
            println!("Free teachers:  {}", free_teachers.join(", "));
            println!("Free rooms:     {}", free_rooms.join(", "));
        }
        Command::Save(path) => {
            let path = path.unwrap_or_else(|| args.timetable.clone());
            match timetable.save_to_file(&path) {
                Ok(()) => println!("Saved {} periods to {}.", timetable.len(), path.display()),
                Err(e) => println!("{}", e.to_string().red()),
            }
        }
        Command::Help => {
            println!("\nAvailable Commands:");
            println!("  ls [day]                                  - List all periods or the periods of one day");
            println!("  check <day> <start> <end> <teacher> <room> [id]");
            println!("                                            - Check a candidate period; pass [id] to exclude an existing period");
            println!("  add <id> <day> <start> <end> <subject> <teacher> <room>");
            println!("                                            - Add a period");
            println!("  mv <id> <day> <start> <end>               - Move a period to another day or time");
            println!("  rm <id>                                   - Remove a period");
            println!("  audit                                     - Report conflicts among stored periods");
            println!("  suggest <id>                              - Free slots, teachers and rooms for a period");
            println!("  save [file]                               - Write the timetable (default: loaded file)");
            println!("  help / ?                                  - Show this help menu");
            println!("  exit / quit                               - Exit\n");
        }
        Command::Exit => return false,
    }
    true
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)))
        .with_writer(std::io::stderr)
        .init();

    let mut timetable = Timetable::load_from_file(&args.timetable)?;
    let policy = if args.strict {
        ConflictPolicy::Reject
    } else {
        ConflictPolicy::Warn
    };
    println!(
        "Loaded {} periods for class {} from {}",
        timetable.len(),
        timetable.class_name,
        args.timetable.display()
    );
    let findings = timetable.audit();
    if !findings.is_empty() {
        println!(
            "{}",
            format!("{} periods already conflict; run 'audit' for details.", findings.len()).yellow()
        );
    }

    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
    };

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                rl.add_history_entry(trimmed)?;

                match command::parse(trimmed) {
                    Ok(command) => {
                        debug!(?command, "running command");
                        if !run(command, &mut timetable, &args, policy) {
                            break;
                        }
                    }
                    Err(e) => println!("{}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}
