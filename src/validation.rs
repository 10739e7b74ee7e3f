use crate::error::PeriodError;
use crate::period::Period;

/// Precondition checks a candidate must pass before it is handed to the
/// conflict checker or stored. The checker itself never calls this.
pub fn validate_period(period: &Period) -> Result<(), PeriodError> {
    let required = [
        ("id", &period.id),
        ("subject", &period.subject_id),
        ("teacher", &period.teacher_id),
        ("room", &period.room),
    ];
    if let Some((name, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
        return Err(PeriodError::MissingField(*name));
    }
    if period.start_time >= period.end_time {
        return Err(PeriodError::InvalidTimeRange {
            start: period.start_time,
            end: period.end_time,
        });
    }
    Ok(())
}
