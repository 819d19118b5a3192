//! Calendar navigation, weekday queries, and event creation.

use chrono::{Datelike, Days, NaiveDate};

use crate::intent::CommandIntent;
use crate::words::{
    join_raw, match_any_phrase, parse_day, parse_month, parse_weekday, parse_year,
    skip_optional, Word, MONTH_NAMES, WEEKDAY_NAMES,
};
use crate::Utterance;

/// Matches the three calendar patterns in order: navigate, query, add-event.
pub fn match_calendar(utterance: &Utterance<'_>) -> Option<CommandIntent> {
    let words = &utterance.words;
    let today = utterance.now.date();
    match_navigate(words)
        .or_else(|| match_query(words, today))
        .or_else(|| match_add_event(words, today.year()))
}

/// `open <month> <yyyy> calendar`
fn match_navigate(words: &[Word<'_>]) -> Option<CommandIntent> {
    (0..words.len()).find_map(|at| {
        if !words[at].is("open") {
            return None;
        }
        let month = parse_month(&words.get(at + 1)?.norm)?;
        let year = parse_year(&words.get(at + 2)?.norm)?;
        words
            .get(at + 3)?
            .is("calendar")
            .then_some(CommandIntent::CalendarNavigate { month, year })
    })
}

/// `what day is on <date>` / `what is the date on <date>`
fn match_query(words: &[Word<'_>], today: NaiveDate) -> Option<CommandIntent> {
    let rest = (0..words.len()).find_map(|at| {
        if !words[at].is("what") {
            return None;
        }
        match_any_phrase(words, at + 1, &["day is on", "is the date on"])
    })?;
    let date_words = &words[rest..];

    explicit_date(date_words)
        .or_else(|| next_weekday(date_words, today))
        .map(|date| CommandIntent::CalendarQuery { date })
}

/// First `<d>[st|nd|rd|th] <month> <yyyy>` that names a real day.
fn explicit_date(words: &[Word<'_>]) -> Option<NaiveDate> {
    (0..words.len()).find_map(|at| {
        let day = parse_day(&words[at].norm)?;
        let month = parse_month(&words.get(at + 1)?.norm)?;
        let year = parse_year(&words.get(at + 2)?.norm)?;
        NaiveDate::from_ymd_opt(year, month + 1, day)
    })
}

/// `next <weekday>`, always strictly after `today`.
fn next_weekday(words: &[Word<'_>], today: NaiveDate) -> Option<NaiveDate> {
    let target = (0..words.len()).find_map(|at| {
        if !words[at].is("next") {
            return None;
        }
        parse_weekday(&words.get(at + 1)?.norm)
    })?;
    let current = today.weekday().num_days_from_sunday();
    let mut days_until = i64::from(target) - i64::from(current);
    if days_until <= 0 {
        days_until += 7;
    }
    today.checked_add_days(Days::new(days_until as u64))
}

/// `(add|create) [new] event [-:] <title> [is] on <d> <month> [yyyy]`
fn match_add_event(words: &[Word<'_>], current_year: i32) -> Option<CommandIntent> {
    (0..words.len()).find_map(|at| {
        if !words[at].is_any(&["add", "create"]) {
            return None;
        }
        let event_at = skip_optional(words, at + 1, "new");
        if !words.get(event_at)?.is("event") {
            return None;
        }
        let mut title_start = event_at + 1;
        while words.get(title_start).is_some_and(|word| word.norm.is_empty()) {
            title_start += 1;
        }
        event_title_and_date(&words[title_start..], current_year)
    })
}

fn event_title_and_date(words: &[Word<'_>], current_year: i32) -> Option<CommandIntent> {
    (1..words.len()).find_map(|on_at| {
        if !words[on_at].is("on") {
            return None;
        }
        let day = parse_day(&words.get(on_at + 1)?.norm)?;
        let month = parse_month(&words.get(on_at + 2)?.norm)?;
        let year = words
            .get(on_at + 3)
            .and_then(|word| parse_year(&word.norm))
            .unwrap_or(current_year);
        let date = NaiveDate::from_ymd_opt(year, month + 1, day)?;

        let mut title_end = on_at;
        if title_end > 1 && words[title_end - 1].is("is") {
            title_end -= 1;
        }
        let title = join_raw(&words[..title_end]).trim().to_string();
        (!title.is_empty()).then_some(CommandIntent::CalendarAddEvent { title, date })
    })
}

/// English month name for a zero-based month.
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month as usize)
        .copied()
        .unwrap_or_default()
}

/// Formats a date as `Tuesday, January 29, 2030`.
pub fn describe_date(date: NaiveDate) -> String {
    let weekday = WEEKDAY_NAMES[date.weekday().num_days_from_sunday() as usize];
    format!(
        "{weekday}, {} {}, {}",
        month_name(date.month0()),
        date.day(),
        date.year()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_utterance;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// 2025-01-15 is a Wednesday.
    fn on_wednesday(text: &str) -> CommandIntent {
        parse_utterance(text, date(2025, 1, 15).and_hms_opt(10, 30, 0).unwrap())
    }

    #[test]
    fn open_month_year_calendar_navigates() {
        assert_eq!(
            on_wednesday("open november 2023 calendar"),
            CommandIntent::CalendarNavigate {
                month: 10,
                year: 2023
            }
        );
        assert_eq!(
            on_wednesday("please open sept 2026 calendar"),
            CommandIntent::CalendarNavigate {
                month: 8,
                year: 2026
            }
        );
    }

    #[test]
    fn next_weekday_is_strictly_in_the_future() {
        assert_eq!(
            on_wednesday("what day is on next monday"),
            CommandIntent::CalendarQuery {
                date: date(2025, 1, 20)
            }
        );
        assert_eq!(
            on_wednesday("what is the date on next wednesday"),
            CommandIntent::CalendarQuery {
                date: date(2025, 1, 22)
            }
        );
        assert_eq!(
            on_wednesday("what day is on next thursday"),
            CommandIntent::CalendarQuery {
                date: date(2025, 1, 16)
            }
        );
    }

    #[test]
    fn explicit_dates_parse_ordinals() {
        assert_eq!(
            on_wednesday("what day is on 29th january 2030"),
            CommandIntent::CalendarQuery {
                date: date(2030, 1, 29)
            }
        );
        assert_eq!(describe_date(date(2030, 1, 29)), "Tuesday, January 29, 2030");
    }

    #[test]
    fn impossible_dates_do_not_match() {
        assert_eq!(
            match_calendar(&crate::Utterance::new(
                "what day is on 31st february 2030",
                date(2025, 1, 15).and_hms_opt(0, 0, 0).unwrap()
            )),
            None
        );
    }

    #[test]
    fn add_event_defaults_to_current_year() {
        assert_eq!(
            on_wednesday("add new event - my birthday is on 28th december"),
            CommandIntent::CalendarAddEvent {
                title: "my birthday".to_string(),
                date: date(2025, 12, 28)
            }
        );
        assert_eq!(
            on_wednesday("create event: launch party on 3 mar 2026"),
            CommandIntent::CalendarAddEvent {
                title: "launch party".to_string(),
                date: date(2026, 3, 3)
            }
        );
    }

    #[test]
    fn add_event_needs_a_title() {
        assert_eq!(
            match_calendar(&crate::Utterance::new(
                "add event on 3 march",
                date(2025, 1, 15).and_hms_opt(0, 0, 0).unwrap()
            )),
            None
        );
    }
}
