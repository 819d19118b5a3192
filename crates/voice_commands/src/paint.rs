//! Paint canvas commands: clear, shapes, drawings, digits and letters.

use desktop_app_contract::{PaintCommand, PaintDrawing, PaintShape};

use crate::intent::CommandIntent;
use crate::words::{contains_any, match_phrase, number_word, position_of, skip_optional, Word};
use crate::Utterance;

const CLEAR_VERBS: &[&str] = &["clear", "erase", "clean"];
const DRAW_VERBS: &[&str] = &["draw", "make", "create"];

/// Drawings in match order, each with the words or phrases that name it.
const DRAWINGS: [(PaintDrawing, &[&str]); 5] = [
    (PaintDrawing::Cat, &["cat"]),
    (PaintDrawing::Smiley, &["smiley", "smile", "happy face"]),
    (PaintDrawing::House, &["house", "home"]),
    (PaintDrawing::Tree, &["tree"]),
    (PaintDrawing::Sun, &["sun"]),
];

/// Matches canvas commands. Everything but "clear canvas" needs a draw verb.
pub fn match_paint(utterance: &Utterance<'_>) -> Option<CommandIntent> {
    parse_paint(&utterance.words).map(CommandIntent::Paint)
}

fn parse_paint(words: &[Word<'_>]) -> Option<PaintCommand> {
    if is_clear_canvas(words) {
        return Some(PaintCommand::Clear);
    }
    if !contains_any(words, DRAW_VERBS) {
        return None;
    }

    if let Some(shape) = PaintShape::ALL
        .into_iter()
        .find(|shape| contains_any(words, &[shape.noun()]))
    {
        return Some(PaintCommand::Shape(shape));
    }

    if let Some(drawing) = DRAWINGS.iter().find_map(|(drawing, names)| {
        names
            .iter()
            .any(|name| (0..words.len()).any(|at| match_phrase(words, at, name).is_some()))
            .then_some(*drawing)
    }) {
        return Some(PaintCommand::Drawing {
            drawing,
            text: None,
        });
    }

    if let Some(digits) = glyph_after(words, "number", |word| {
        number_word(word)
            .map(str::to_string)
            .or_else(|| {
                (!word.is_empty() && word.bytes().all(|b| b.is_ascii_digit()))
                    .then(|| word.to_string())
            })
    }) {
        return Some(PaintCommand::Drawing {
            drawing: PaintDrawing::Number,
            text: Some(digits),
        });
    }

    glyph_after(words, "letter", |word| {
        let mut chars = word.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) if letter.is_ascii_lowercase() => {
                Some(letter.to_ascii_uppercase().to_string())
            }
            _ => None,
        }
    })
    .map(|letter| PaintCommand::Drawing {
        drawing: PaintDrawing::Letter,
        text: Some(letter),
    })
}

fn is_clear_canvas(words: &[Word<'_>]) -> bool {
    (0..words.len()).any(|at| {
        words[at].is_any(CLEAR_VERBS)
            && words
                .get(skip_optional(words, at + 1, "the"))
                .is_some_and(|word| word.is("canvas"))
    })
}

/// Reads the word following `keyword` through `glyph`, trying each occurrence of the keyword.
fn glyph_after(
    words: &[Word<'_>],
    keyword: &str,
    glyph: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    let mut from = 0;
    while let Some(at) = position_of(words, from, &[keyword]) {
        if let Some(text) = words.get(at + 1).and_then(|word| glyph(&word.norm)) {
            return Some(text);
        }
        from = at + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::split_words;
    use pretty_assertions::assert_eq;

    fn paint(text: &str) -> Option<PaintCommand> {
        parse_paint(&split_words(text))
    }

    fn drawing(drawing: PaintDrawing, text: Option<&str>) -> Option<PaintCommand> {
        Some(PaintCommand::Drawing {
            drawing,
            text: text.map(str::to_string),
        })
    }

    #[test]
    fn clear_canvas_needs_no_draw_verb() {
        assert_eq!(paint("clear the canvas"), Some(PaintCommand::Clear));
        assert_eq!(paint("please erase canvas"), Some(PaintCommand::Clear));
        assert_eq!(paint("clean the kitchen"), None);
    }

    #[test]
    fn shapes_follow_fixed_order() {
        assert_eq!(
            paint("draw a circle"),
            Some(PaintCommand::Shape(PaintShape::Circle))
        );
        assert_eq!(
            paint("make a star and a circle"),
            Some(PaintCommand::Shape(PaintShape::Circle))
        );
        assert_eq!(
            paint("create a line"),
            Some(PaintCommand::Shape(PaintShape::Line))
        );
        assert_eq!(paint("a circle"), None);
    }

    #[test]
    fn drawings_accept_synonyms() {
        assert_eq!(paint("draw a happy face"), drawing(PaintDrawing::Smiley, None));
        assert_eq!(paint("draw a smile"), drawing(PaintDrawing::Smiley, None));
        assert_eq!(paint("draw my home"), drawing(PaintDrawing::House, None));
        assert_eq!(paint("draw the sun"), drawing(PaintDrawing::Sun, None));
        assert_eq!(paint("draw a cat"), drawing(PaintDrawing::Cat, None));
    }

    #[test]
    fn numbers_are_normalized_to_digits() {
        assert_eq!(paint("draw number five"), drawing(PaintDrawing::Number, Some("5")));
        assert_eq!(paint("draw the number ten"), drawing(PaintDrawing::Number, Some("10")));
        assert_eq!(paint("draw number 42"), drawing(PaintDrawing::Number, Some("42")));
    }

    #[test]
    fn letters_are_uppercased() {
        assert_eq!(paint("draw letter b"), drawing(PaintDrawing::Letter, Some("B")));
        assert_eq!(paint("make the letter z"), drawing(PaintDrawing::Letter, Some("Z")));
    }

    #[test]
    fn bare_articles_are_not_letters() {
        assert_eq!(paint("make a new todo"), None);
        assert_eq!(paint("draw letter bee"), None);
    }
}
