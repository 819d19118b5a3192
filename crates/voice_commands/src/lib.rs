//! Free-text voice command grammar.
//!
//! [`parse_utterance`] classifies a transcript into a [`CommandIntent`] by trying sub-grammars
//! in a fixed order (paint, calendar, todo, wallpaper, arithmetic, close-all, then generic app
//! open/close). The first sub-grammar that matches wins. Everything here is pure: the current
//! local time is passed in so relative dates are deterministic.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod app_names;
pub mod arithmetic;
pub mod calendar;
pub mod intent;
pub mod paint;
pub mod system;
pub mod todo;
pub mod words;

use chrono::NaiveDateTime;

pub use app_names::{extract_app, CLOSE_VERBS, FILLER_WORDS, OPEN_VERBS};
pub use calendar::{describe_date, month_name};
pub use intent::{ArithmeticExpression, ArithmeticOperator, CommandIntent};
pub use words::{Word, MONTH_NAMES, WEEKDAY_NAMES};

/// A lowercase transcript split into words, with the local time it was heard at.
#[derive(Debug, Clone)]
pub struct Utterance<'a> {
    /// Lowercase transcript.
    pub text: &'a str,
    /// Words of [`Utterance::text`].
    pub words: Vec<Word<'a>>,
    /// Local wall-clock time used for relative dates.
    pub now: NaiveDateTime,
}

impl<'a> Utterance<'a> {
    /// Splits an already-lowercase transcript.
    pub fn new(text: &'a str, now: NaiveDateTime) -> Self {
        Self {
            text,
            words: words::split_words(text),
            now,
        }
    }
}

/// A sub-grammar: returns an intent or declines.
pub type Matcher = fn(&Utterance<'_>) -> Option<CommandIntent>;

/// Sub-grammars in precedence order.
pub const MATCHERS: [(&str, Matcher); 7] = [
    ("paint", paint::match_paint),
    ("calendar", calendar::match_calendar),
    ("todo", todo::match_todo),
    ("wallpaper", system::match_wallpaper),
    ("arithmetic", arithmetic::match_arithmetic),
    ("close-all", system::match_close_all),
    ("app", app_names::match_app_command),
];

/// Classifies `text` heard at local time `now`.
pub fn parse_utterance(text: &str, now: NaiveDateTime) -> CommandIntent {
    let lowered = text.trim().to_lowercase();
    let utterance = Utterance::new(&lowered, now);
    MATCHERS
        .iter()
        .find_map(|(_, matcher)| matcher(&utterance))
        .unwrap_or(CommandIntent::Unrecognized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use desktop_app_contract::{AppId, PaintCommand, PaintShape};
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> CommandIntent {
        let now = NaiveDate::from_ymd_opt(2025, 1, 15)
            .and_then(|day| day.and_hms_opt(10, 30, 0))
            .unwrap();
        parse_utterance(text, now)
    }

    #[test]
    fn transcripts_are_lowercased() {
        assert_eq!(parse("  Open CALCULATOR "), CommandIntent::OpenApp(AppId::Calculator));
    }

    #[test]
    fn paint_outranks_everything() {
        assert_eq!(
            parse("open paint and draw a heart"),
            CommandIntent::Paint(PaintCommand::Shape(PaintShape::Heart))
        );
    }

    #[test]
    fn calendar_outranks_generic_open() {
        assert!(matches!(
            parse("open may 2025 calendar"),
            CommandIntent::CalendarNavigate { month: 4, year: 2025 }
        ));
    }

    #[test]
    fn wallpaper_outranks_arithmetic_and_apps() {
        assert_eq!(parse("set the wallpaper"), CommandIntent::WallpaperCycle);
    }

    #[test]
    fn arithmetic_outranks_close_all() {
        assert!(matches!(parse("close all 2 plus 2"), CommandIntent::Arithmetic(_)));
    }

    #[test]
    fn close_all_outranks_generic_close() {
        assert_eq!(parse("close all the calculator windows"), CommandIntent::CloseAll);
    }

    #[test]
    fn nothing_matches() {
        assert_eq!(parse("what a lovely day"), CommandIntent::Unrecognized);
        assert_eq!(parse(""), CommandIntent::Unrecognized);
    }
}
