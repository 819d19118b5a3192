//! Spoken and symbolic binary arithmetic.

use crate::intent::{ArithmeticExpression, ArithmeticOperator, CommandIntent};
use crate::words::{match_any_phrase, match_phrase, parse_number, Word};
use crate::Utterance;

/// Spoken operator phrases, tried group by group in this order.
const WORD_OPERATORS: [(ArithmeticOperator, &[&str]); 4] = [
    (
        ArithmeticOperator::Multiply,
        &["into", "times", "multiplied by", "multiply"],
    ),
    (ArithmeticOperator::Add, &["plus", "add", "added to"]),
    (ArithmeticOperator::Subtract, &["minus", "subtract", "less"]),
    (
        ArithmeticOperator::Divide,
        &["divided by", "divide by", "over"],
    ),
];

const PERCENT_WORDS: &[&str] = &["percentage", "percent", "%"];

/// Matches `N <op> M` phrasings anywhere in the utterance.
pub fn match_arithmetic(utterance: &Utterance<'_>) -> Option<CommandIntent> {
    parse_expression(utterance.text, &utterance.words).map(CommandIntent::Arithmetic)
}

fn parse_expression(text: &str, words: &[Word<'_>]) -> Option<ArithmeticExpression> {
    WORD_OPERATORS
        .iter()
        .find_map(|(operator, phrases)| {
            find_binary(words, |at| match_any_phrase(words, at, phrases)).map(|(lhs, rhs)| {
                ArithmeticExpression {
                    lhs,
                    operator: *operator,
                    rhs,
                }
            })
        })
        .or_else(|| find_percent_of(words))
        .or_else(|| find_symbolic(text))
}

/// Finds `<number> <operator phrase> <number>`, where `operator` returns the index after the phrase.
fn find_binary(
    words: &[Word<'_>],
    operator: impl Fn(usize) -> Option<usize>,
) -> Option<(f64, f64)> {
    (0..words.len()).find_map(|index| {
        let lhs = parse_number(&words[index].norm)?;
        let after = operator(index + 1)?;
        let rhs = parse_number(&words.get(after)?.norm)?;
        Some((lhs, rhs))
    })
}

fn find_percent_of(words: &[Word<'_>]) -> Option<ArithmeticExpression> {
    let spelled = find_binary(words, |at| {
        let after = match_any_phrase(words, at, PERCENT_WORDS)?;
        match_phrase(words, after, "of")
    });
    // "25% of 200" arrives as a single `25%` word.
    let attached = || {
        (0..words.len()).find_map(|index| {
            let lhs = parse_number(words[index].norm.strip_suffix('%')?)?;
            let after = match_phrase(words, index + 1, "of")?;
            let rhs = parse_number(&words.get(after)?.norm)?;
            Some((lhs, rhs))
        })
    };

    spelled
        .or_else(attached)
        .map(|(lhs, rhs)| ArithmeticExpression {
            lhs,
            operator: ArithmeticOperator::PercentOf,
            rhs,
        })
}

/// Scans raw text for `N <sym> M` with optional spaces, e.g. `12*3` or `5 ÷ 2`.
fn find_symbolic(text: &str) -> Option<ArithmeticExpression> {
    text.char_indices()
        .filter(|(_, ch)| ch.is_ascii_digit())
        .find_map(|(start, _)| symbolic_at(&text[start..]))
}

fn symbolic_at(text: &str) -> Option<ArithmeticExpression> {
    let (lhs, rest) = take_number(text)?;
    let rest = rest.trim_start();
    let mut chars = rest.chars();
    let operator = ArithmeticOperator::from_symbol(chars.next()?)?;
    let (rhs, _) = take_number(chars.as_str().trim_start())?;
    Some(ArithmeticExpression { lhs, operator, rhs })
}

/// Splits a leading `\d+(\.\d+)?` off `text`.
fn take_number(text: &str) -> Option<(f64, &str)> {
    let whole = text.bytes().take_while(u8::is_ascii_digit).count();
    if whole == 0 {
        return None;
    }
    let mut end = whole;
    if text[end..].starts_with('.') {
        let fraction = text[end + 1..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if fraction > 0 {
            end += 1 + fraction;
        }
    }
    let value = text[..end].parse().ok()?;
    Some((value, &text[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_utterance;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn expression(text: &str) -> Option<ArithmeticExpression> {
        let now = NaiveDate::from_ymd_opt(2025, 1, 1)
            .and_then(|day| day.and_hms_opt(12, 0, 0))
            .unwrap();
        match parse_utterance(text, now) {
            CommandIntent::Arithmetic(expression) => Some(expression),
            _ => None,
        }
    }

    fn value(text: &str) -> f64 {
        expression(text)
            .map(|e| e.to_command().evaluate().unwrap())
            .unwrap()
    }

    #[test]
    fn spoken_operators_evaluate() {
        assert_eq!(value("9 into 2"), 18.0);
        assert_eq!(value("4 plus 4"), 8.0);
        assert_eq!(value("20 divided by 4"), 5.0);
        assert_eq!(value("25 percent of 200"), 50.0);
        assert_eq!(value("what is 10 minus 3"), 7.0);
        assert_eq!(value("calculate 3 multiplied by 1.5"), 4.5);
        assert_eq!(value("what's 12 over 4"), 3.0);
        assert_eq!(value("40 percentage of 50"), 20.0);
        assert_eq!(value("10% of 90"), 9.0);
    }

    #[test]
    fn multiply_outranks_add_when_both_appear() {
        let parsed = expression("2 plus 3 times 4").unwrap();
        assert_eq!(parsed.operator, ArithmeticOperator::Multiply);
        assert_eq!((parsed.lhs, parsed.rhs), (3.0, 4.0));
    }

    #[test]
    fn symbolic_forms_with_and_without_spaces() {
        assert_eq!(value("12*3"), 36.0);
        assert_eq!(value("tell me 7 - 2"), 5.0);
        assert_eq!(value("9 ÷ 3"), 3.0);
        assert_eq!(value("6×7"), 42.0);
        assert_eq!(expression("5 + 5").unwrap().to_command().expression, "5 + 5");
    }

    #[test]
    fn expression_is_canonicalized() {
        assert_eq!(
            expression("9 into 2").unwrap().to_command().expression,
            "9 * 2"
        );
        assert_eq!(
            expression("25 percent of 200").unwrap().to_command().expression,
            "25 % 200"
        );
    }

    #[test]
    fn zero_divisor_is_left_to_the_consumer() {
        let parsed = expression("8 divided by 0").unwrap();
        assert_eq!(parsed.rhs, 0.0);
    }

    #[test]
    fn lone_numbers_do_not_match() {
        assert_eq!(expression("open 2 calculators"), None);
        assert_eq!(expression("plus four"), None);
    }
}
