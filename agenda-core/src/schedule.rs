//! Booking rules for event start times and text fields.

use chrono::{Duration, NaiveDateTime, Timelike};

use crate::error::{AgendaError, AgendaResult};

/// Canonical date-time text form, used on the wire and on disk.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// How far ahead an event may be booked.
const MAX_DAYS_AHEAD: i64 = 365 * 2;

const OPENING_HOUR: u32 = 8;
const CLOSING_HOUR: u32 = 22;

pub fn parse_start(text: &str) -> AgendaResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, DATETIME_FORMAT).map_err(|_| {
        AgendaError::validation(format!(
            "Fecha '{text}' inválida, el formato debe ser YYYY-MM-DD HH:MM:SS"
        ))
    })
}

pub fn format_start(start: &NaiveDateTime) -> String {
    start.format(DATETIME_FORMAT).to_string()
}

/// Strip `\n` from a title. Other whitespace, `\r` included, is kept.
pub fn clean_title(title: &str) -> String {
    title.replace('\n', "")
}

pub fn check_text_fields(title: &str, description: &str) -> AgendaResult<()> {
    if title.trim().is_empty() || description.trim().is_empty() {
        return Err(AgendaError::validation("Los campos no pueden estar vacíos"));
    }
    Ok(())
}

/// Window, opening hours, then the even-hour mark, in that order.
pub fn check_start(start: &NaiveDateTime, now: &NaiveDateTime) -> AgendaResult<()> {
    if start < now {
        return Err(AgendaError::validation(
            "La fecha y hora del evento no puede ser menor a la fecha y hora actual",
        ));
    }

    if *start > *now + Duration::days(MAX_DAYS_AHEAD) {
        return Err(AgendaError::validation(
            "La fecha y hora del evento no puede ser mayor a dos años desde la fecha y hora actual",
        ));
    }

    let seconds = start.num_seconds_from_midnight();
    if seconds < OPENING_HOUR * 3600 || seconds > CLOSING_HOUR * 3600 {
        return Err(AgendaError::validation(
            "La hora del evento debe ser entre las 8:00 am y las 10:00 pm",
        ));
    }

    if start.hour() % 2 != 0 || start.minute() != 0 || start.second() != 0 || start.nanosecond() != 0
    {
        return Err(AgendaError::validation(
            "La hora del evento debe ser múltiplo de 2, y los minutos y segundos deben ser ceros",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{at, fixed_now};

    fn message(result: AgendaResult<()>) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn test_parse_and_format_roundtrip() {
        let text = "2030-03-10 14:00:00";
        assert_eq!(format_start(&parse_start(text).unwrap()), text);
    }

    #[test]
    fn test_parse_rejects_other_formats() {
        assert!(parse_start("2030-03-10T14:00:00").is_err());
        assert!(parse_start("2030-03-10 14:00").is_err());
        assert!(parse_start("10/03/2030 14:00:00").is_err());
        assert!(parse_start("2030-02-30 14:00:00").is_err());
    }

    #[test]
    fn test_clean_title_strips_newlines() {
        assert_eq!(clean_title("Feria\nde\nciencia"), "Feriadeciencia");
        assert_eq!(clean_title("Feria\r\n"), "Feria\r");
        assert_eq!(clean_title("\n\n"), "");
    }

    #[test]
    fn test_text_fields_must_not_be_blank() {
        assert!(check_text_fields("Charla", "Sobre Rust").is_ok());
        assert!(check_text_fields("   ", "Sobre Rust").is_err());
        assert_eq!(
            message(check_text_fields("Charla", "\t")),
            "Los campos no pueden estar vacíos"
        );
    }

    #[test]
    fn test_start_in_the_past() {
        let now = fixed_now();
        assert!(message(check_start(&at(2029, 12, 31, 10, 0, 0), &now)).contains("menor"));
        // Earlier on the same day, at an otherwise valid hour.
        assert!(check_start(&at(2030, 1, 1, 8, 0, 0), &now).is_err());
    }

    #[test]
    fn test_start_more_than_two_years_ahead() {
        let now = fixed_now();
        // now + 730 days is 2032-01-01 09:30.
        assert!(check_start(&at(2032, 1, 1, 8, 0, 0), &now).is_ok());
        assert!(message(check_start(&at(2032, 1, 1, 10, 0, 0), &now)).contains("dos años"));
        assert!(check_start(&at(2032, 1, 2, 10, 0, 0), &now).is_err());
    }

    #[test]
    fn test_opening_hours_are_inclusive() {
        let now = fixed_now();
        assert!(check_start(&at(2030, 3, 10, 8, 0, 0), &now).is_ok());
        assert!(check_start(&at(2030, 3, 10, 22, 0, 0), &now).is_ok());
        assert!(message(check_start(&at(2030, 3, 10, 6, 0, 0), &now)).contains("8:00 am"));
        assert!(message(check_start(&at(2030, 3, 10, 22, 0, 1), &now)).contains("10:00 pm"));
        assert!(check_start(&at(2030, 3, 10, 0, 0, 0), &now).is_err());
    }

    #[test]
    fn test_only_even_hour_marks() {
        let now = fixed_now();
        for hour in (8..=22).step_by(2) {
            assert!(check_start(&at(2030, 3, 10, hour, 0, 0), &now).is_ok(), "{hour}:00");
        }
        for hour in (9..=21).step_by(2) {
            assert!(check_start(&at(2030, 3, 10, hour, 0, 0), &now).is_err(), "{hour}:00");
        }
        assert!(message(check_start(&at(2030, 3, 10, 10, 30, 0), &now)).contains("múltiplo de 2"));
        assert!(check_start(&at(2030, 3, 10, 10, 0, 15), &now).is_err());
    }
}
