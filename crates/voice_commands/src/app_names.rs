//! App-name extraction and open/close verb classification.

use desktop_app_contract::AppId;

use crate::intent::CommandIntent;
use crate::words::{contains_any, Word};
use crate::Utterance;

/// Words dropped before synonym containment is tested.
pub const FILLER_WORDS: &[&str] = &[
    "please", "hey", "the", "a", "an", "now", "fast", "quickly", "right", "just", "let's",
    "lets", "with", "me",
];

/// Verbs that request an app be opened.
pub const OPEN_VERBS: &[&str] = &["open", "launch", "start", "run", "show", "load", "play"];

/// Verbs that request an app be closed. These win over [`OPEN_VERBS`].
pub const CLOSE_VERBS: &[&str] = &["close", "exit", "quit", "shut", "stop", "end", "kill"];

/// Finds the first app whose synonym is contained in the filler-stripped utterance.
pub fn extract_app(words: &[Word<'_>]) -> Option<AppId> {
    let cleaned = words
        .iter()
        .filter(|word| !word.norm.is_empty() && !word.is_any(FILLER_WORDS))
        .map(|word| word.norm.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    AppId::ALL.into_iter().find(|app| {
        app.voice_synonyms()
            .iter()
            .any(|synonym| cleaned.contains(synonym))
    })
}

/// Generic `open <app>` / `close <app>`. Without a known verb the request opens the app.
pub fn match_app_command(utterance: &Utterance<'_>) -> Option<CommandIntent> {
    let app = extract_app(&utterance.words)?;
    if contains_any(&utterance.words, CLOSE_VERBS) {
        Some(CommandIntent::CloseApp(app))
    } else {
        Some(CommandIntent::OpenApp(app))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::split_words;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn app(text: &str) -> Option<AppId> {
        extract_app(&split_words(text))
    }

    fn command(text: &str) -> Option<CommandIntent> {
        let now = NaiveDate::from_ymd_opt(2025, 1, 1)
            .and_then(|day| day.and_hms_opt(0, 0, 0))
            .unwrap();
        match_app_command(&Utterance::new(text, now))
    }

    #[test]
    fn synonyms_resolve_to_one_app() {
        for text in ["open tic tac toe", "play ttt", "launch tic tac", "open tic-tac-toe"] {
            assert_eq!(app(text), Some(AppId::TicTacToe), "{text}");
        }
        assert_eq!(app("open the file manager"), Some(AppId::Files));
        assert_eq!(app("hey open the to do"), Some(AppId::Todo));
        assert_eq!(app("open minesweeper"), None);
    }

    #[test]
    fn filler_words_are_removed_before_matching() {
        assert_eq!(app("please just open a task manager quickly"), Some(AppId::TaskManager));
        assert_eq!(app("let's play some music"), Some(AppId::Music));
    }

    #[test]
    fn close_takes_precedence_over_open() {
        assert_eq!(
            command("close open calculator"),
            Some(CommandIntent::CloseApp(AppId::Calculator))
        );
        assert_eq!(
            command("stop the music"),
            Some(CommandIntent::CloseApp(AppId::Music))
        );
    }

    #[test]
    fn missing_verb_defaults_to_open() {
        assert_eq!(command("calculator"), Some(CommandIntent::OpenApp(AppId::Calculator)));
        assert_eq!(command("open notes"), Some(CommandIntent::OpenApp(AppId::Notes)));
    }
}
