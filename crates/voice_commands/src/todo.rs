//! To-do creation with optional `at H[:MM] am|pm`, `tomorrow` and `today` phrases.

use chrono::{Days, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::intent::CommandIntent;
use crate::words::{join_raw, match_any_phrase, skip_optional, Word};
use crate::Utterance;

const ADD_VERBS: &[&str] = &["add", "create", "new"];
const LIST_NAMES: &[&str] = &["todo", "to-do", "to do"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    fn parse(word: &str) -> Option<Self> {
        match word {
            "am" | "a.m" => Some(Self::Am),
            "pm" | "p.m" => Some(Self::Pm),
            _ => None,
        }
    }

    fn split_suffix(word: &str) -> Option<(&str, Self)> {
        ["a.m", "p.m", "am", "pm"].iter().find_map(|suffix| {
            let clock = word.strip_suffix(suffix)?;
            Some((clock, Self::parse(suffix)?))
        })
    }

    fn to_24h(self, hour: u32) -> u32 {
        match (self, hour) {
            (Self::Am, 12) => 0,
            (Self::Am, hour) => hour,
            (Self::Pm, 12) => 12,
            (Self::Pm, hour) => hour + 12,
        }
    }
}

/// Matches `(add|create|new) [in] [the] (todo|to do|to-do) [list] [-:] <task>`.
pub fn match_todo(utterance: &Utterance<'_>) -> Option<CommandIntent> {
    let words = &utterance.words;
    let task_at = (0..words.len()).find_map(|at| {
        if !words[at].is_any(ADD_VERBS) {
            return None;
        }
        let next = skip_optional(words, at + 1, "in");
        let next = skip_optional(words, next, "the");
        let next = match_any_phrase(words, next, LIST_NAMES)?;
        if next >= words.len() {
            return None;
        }
        // `add todo list` names a task called "list".
        let after_list = skip_optional(words, next, "list");
        Some(if after_list < words.len() {
            after_list
        } else {
            next
        })
    })?;

    let (title, deadline) = parse_task(words[task_at..].to_vec(), utterance.now)?;
    Some(CommandIntent::TodoAdd { title, deadline })
}

fn parse_task(
    mut task: Vec<Word<'_>>,
    now: NaiveDateTime,
) -> Option<(String, Option<NaiveDateTime>)> {
    let time = take_time_phrase(&mut task);
    let mut deadline = time.map(|time| now.date().and_time(time));

    if take_word(&mut task, "tomorrow") {
        let next_day = deadline.unwrap_or(now).checked_add_days(Days::new(1))?;
        deadline = Some(match time {
            Some(_) => next_day,
            None => next_day.date().and_time(NaiveTime::from_hms_opt(9, 0, 0)?),
        });
    }

    if take_word(&mut task, "today") {
        let base = deadline.unwrap_or(now);
        deadline = Some(match time {
            Some(_) => base,
            None => {
                base.date().and_time(NaiveTime::from_hms_opt(base.hour(), 0, 0)?)
                    + TimeDelta::hours(1)
            }
        });
    }

    let title = join_raw(&task)
        .trim_matches(|ch: char| ch == '-' || ch == ':' || ch == ',' || ch.is_whitespace())
        .to_string();
    (!title.is_empty()).then_some((title, deadline))
}

/// Removes the first `at H[:MM] am|pm` phrase and returns its time of day.
fn take_time_phrase(task: &mut Vec<Word<'_>>) -> Option<NaiveTime> {
    let (at, consumed, time) = (0..task.len()).find_map(|at| {
        if !task[at].is("at") {
            return None;
        }
        let clock_word = task.get(at + 1)?;
        if let Some((clock, meridiem)) = Meridiem::split_suffix(&clock_word.norm) {
            return Some((at, 2, clock_time(clock, meridiem)?));
        }
        let meridiem = Meridiem::parse(&task.get(at + 2)?.norm)?;
        Some((at, 3, clock_time(&clock_word.norm, meridiem)?))
    })?;
    task.drain(at..at + consumed);
    Some(time)
}

/// Parses `H` or `H:MM` on a 12-hour clock.
fn clock_time(clock: &str, meridiem: Meridiem) -> Option<NaiveTime> {
    let (hour, minute) = match clock.split_once(':') {
        Some((hour, minute)) if minute.len() == 2 => (hour, minute.parse::<u32>().ok()?),
        Some(_) => return None,
        None => (clock, 0),
    };
    if hour.is_empty() || hour.len() > 2 || !hour.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour: u32 = hour.parse().ok()?;
    if !(1..=12).contains(&hour) {
        return None;
    }
    NaiveTime::from_hms_opt(meridiem.to_24h(hour), minute, 0)
}

fn take_word(task: &mut Vec<Word<'_>>, word: &str) -> bool {
    match task.iter().position(|candidate| candidate.is(word)) {
        Some(index) => {
            task.remove(index);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_utterance;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .unwrap()
    }

    fn todo(text: &str) -> CommandIntent {
        parse_utterance(text, at(15, 10, 30))
    }

    fn added(title: &str, deadline: Option<NaiveDateTime>) -> CommandIntent {
        CommandIntent::TodoAdd {
            title: title.to_string(),
            deadline,
        }
    }

    #[test]
    fn tomorrow_defaults_to_nine_am() {
        assert_eq!(
            todo("add in the todo list buy milk tomorrow"),
            added("buy milk", Some(at(16, 9, 0)))
        );
    }

    #[test]
    fn explicit_time_sets_today() {
        assert_eq!(
            todo("add to do - call mom at 5 pm"),
            added("call mom", Some(at(15, 17, 0)))
        );
        assert_eq!(
            todo("new todo standup at 9:15am"),
            added("standup", Some(at(15, 9, 15)))
        );
        assert_eq!(
            todo("add todo lunch at 12 p.m."),
            added("lunch", Some(at(15, 12, 0)))
        );
    }

    #[test]
    fn time_and_day_phrases_compose() {
        assert_eq!(
            todo("add todo list dentist at 10 am tomorrow"),
            added("dentist", Some(at(16, 10, 0)))
        );
        assert_eq!(
            todo("add todo pay rent at 12 am tomorrow"),
            added("pay rent", Some(at(16, 0, 0)))
        );
    }

    #[test]
    fn today_without_time_rounds_to_next_hour() {
        assert_eq!(
            todo("add the todo water plants today"),
            added("water plants", Some(at(15, 11, 0)))
        );
    }

    #[test]
    fn no_time_phrase_means_no_deadline() {
        assert_eq!(todo("create todo: read a book"), added("read a book", None));
    }

    #[test]
    fn out_of_range_hours_stay_in_the_title() {
        assert_eq!(
            todo("add todo meet at 13 pm"),
            added("meet at 13 pm", None)
        );
    }

    #[test]
    fn empty_task_is_not_a_todo() {
        assert!(!matches!(todo("add todo tomorrow"), CommandIntent::TodoAdd { .. }));
        assert!(!matches!(todo("add todo"), CommandIntent::TodoAdd { .. }));
    }
}
