//! Desktop-wide commands: wallpaper cycling and closing every window.

use crate::intent::CommandIntent;
use crate::words::{skip_optional, Word};
use crate::Utterance;

/// `(change|switch|set|next) [the] wallpaper`
pub fn match_wallpaper(utterance: &Utterance<'_>) -> Option<CommandIntent> {
    verb_then(&utterance.words, &["change", "switch", "set", "next"], |words, at| {
        words
            .get(skip_optional(words, at, "the"))
            .is_some_and(|word| word.is("wallpaper"))
    })
    .then_some(CommandIntent::WallpaperCycle)
}

/// `(close|shut|exit|quit) (all|everything)`
pub fn match_close_all(utterance: &Utterance<'_>) -> Option<CommandIntent> {
    verb_then(&utterance.words, &["close", "shut", "exit", "quit"], |words, at| {
        words
            .get(at)
            .is_some_and(|word| word.is_any(&["all", "everything"]))
    })
    .then_some(CommandIntent::CloseAll)
}

fn verb_then(
    words: &[Word<'_>],
    verbs: &[&str],
    rest: impl Fn(&[Word<'_>], usize) -> bool,
) -> bool {
    (0..words.len()).any(|at| words[at].is_any(verbs) && rest(words, at + 1))
}
