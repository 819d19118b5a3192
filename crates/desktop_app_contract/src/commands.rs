//! Typed voice-command payloads and the single-slot mailboxes that carry them to apps.
//!
//! Each [`CommandDomain`] owns one [`CommandSlot`]. A write overwrites any unconsumed
//! command (last write wins) and a consumer takes the command exactly once.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Apps that accept typed voice commands.
pub enum CommandDomain {
    /// Calculator expression slot.
    Calculator,
    /// Calendar navigation/add-event slot.
    Calendar,
    /// Paint canvas slot.
    Paint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Timestamped command payload as stored in a slot.
pub struct CommandEnvelope<T> {
    /// Command payload.
    pub payload: T,
    /// Unix milliseconds at write time.
    pub timestamp_ms: u64,
}

impl<T> CommandEnvelope<T> {
    /// Wraps a payload with its write timestamp.
    pub fn new(payload: T, timestamp_ms: u64) -> Self {
        Self {
            payload,
            timestamp_ms,
        }
    }

    /// Transforms the payload, keeping the original timestamp.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CommandEnvelope<U> {
        CommandEnvelope {
            payload: f(self.payload),
            timestamp_ms: self.timestamp_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A binary arithmetic expression in canonical `"<a> <op> <b>"` form.
pub struct CalculatorCommand {
    /// Space separated operands and operator. The operator is one of `+ - * / %`.
    pub expression: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
/// Failures raised while evaluating a [`CalculatorCommand`].
pub enum CalculationError {
    #[error("expression is not `<number> <op> <number>`")]
    /// Expression did not have two numeric operands around a known operator.
    Malformed,
    #[error("Cannot divide by zero")]
    /// Right-hand operand of a division was zero.
    DivideByZero,
}

impl CalculatorCommand {
    /// Creates a command from its parts.
    pub fn new(lhs: f64, operator: char, rhs: f64) -> Self {
        Self {
            expression: format!("{lhs} {operator} {rhs}"),
        }
    }

    /// Evaluates the expression. `a % b` is read as "a percent of b".
    pub fn evaluate(&self) -> Result<f64, CalculationError> {
        let mut tokens = self.expression.split_whitespace();
        let (Some(lhs), Some(operator), Some(rhs)) = (tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(CalculationError::Malformed);
        };
        let lhs: f64 = lhs.parse().map_err(|_| CalculationError::Malformed)?;
        let rhs: f64 = rhs.parse().map_err(|_| CalculationError::Malformed)?;

        match operator {
            "+" => Ok(lhs + rhs),
            "-" => Ok(lhs - rhs),
            "*" | "×" => Ok(lhs * rhs),
            "/" | "÷" if rhs == 0.0 => Err(CalculationError::DivideByZero),
            "/" | "÷" => Ok(lhs / rhs),
            "%" => Ok((lhs / 100.0) * rhs),
            _ => Err(CalculationError::Malformed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Commands consumed by the calendar app.
pub enum CalendarCommand {
    /// Show the given month.
    Navigate {
        /// Zero-based month (`0` is January).
        month: u32,
        /// Calendar year.
        year: i32,
    },
    /// Create an event and show its month.
    AddEvent {
        /// Event title.
        title: String,
        /// Event day.
        date: NaiveDate,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Primitive shapes the paint canvas can draw.
pub enum PaintShape {
    /// Circle.
    Circle,
    /// Square.
    Square,
    /// Triangle.
    Triangle,
    /// Five-pointed star.
    Star,
    /// Heart.
    Heart,
    /// Straight line.
    Line,
}

impl PaintShape {
    /// Shapes in grammar precedence order.
    pub const ALL: [PaintShape; 6] = [
        Self::Circle,
        Self::Square,
        Self::Triangle,
        Self::Star,
        Self::Heart,
        Self::Line,
    ];

    /// Lowercase noun for this shape.
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Square => "square",
            Self::Triangle => "triangle",
            Self::Star => "star",
            Self::Heart => "heart",
            Self::Line => "line",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Composite drawings. `Number` and `Letter` carry their glyph in [`PaintCommand::Drawing`].
pub enum PaintDrawing {
    /// Cat face.
    Cat,
    /// Smiley face.
    Smiley,
    /// House.
    House,
    /// Tree.
    Tree,
    /// Sun.
    Sun,
    /// A digit glyph.
    Number,
    /// An uppercase letter glyph.
    Letter,
}

impl PaintDrawing {
    /// Lowercase noun for this drawing.
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Cat => "cat",
            Self::Smiley => "smiley",
            Self::House => "house",
            Self::Tree => "tree",
            Self::Sun => "sun",
            Self::Number => "number",
            Self::Letter => "letter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Commands consumed by the paint app.
pub enum PaintCommand {
    /// Wipe the canvas.
    Clear,
    /// Draw a primitive shape.
    Shape(PaintShape),
    /// Draw a composite drawing.
    Drawing {
        /// Drawing kind.
        drawing: PaintDrawing,
        /// Glyph for number/letter drawings.
        text: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A command addressed to one of the per-domain slots.
pub enum SlotCommand {
    /// Calculator slot payload.
    Calculator(CalculatorCommand),
    /// Calendar slot payload.
    Calendar(CalendarCommand),
    /// Paint slot payload.
    Paint(PaintCommand),
}

impl SlotCommand {
    /// Slot this command is written to.
    pub const fn domain(&self) -> CommandDomain {
        match self {
            Self::Calculator(_) => CommandDomain::Calculator,
            Self::Calendar(_) => CommandDomain::Calendar,
            Self::Paint(_) => CommandDomain::Paint,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Single-value, overwrite-on-write, consume-and-clear mailbox.
pub struct CommandSlot<T> {
    pending: Option<CommandEnvelope<T>>,
}

impl<T> Default for CommandSlot<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T: Clone> CommandSlot<T> {
    /// Stores `envelope`, returning the unconsumed envelope it replaced.
    pub fn write(&mut self, envelope: CommandEnvelope<T>) -> Option<CommandEnvelope<T>> {
        self.pending.replace(envelope)
    }

    /// Removes and returns the pending envelope.
    pub fn take(&mut self) -> Option<CommandEnvelope<T>> {
        self.pending.take()
    }

    /// Returns the pending envelope without consuming it.
    pub fn peek(&self) -> Option<&CommandEnvelope<T>> {
        self.pending.as_ref()
    }

    /// Whether an unconsumed command is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// One [`CommandSlot`] per [`CommandDomain`].
pub struct CommandSlots {
    calculator: CommandSlot<CalculatorCommand>,
    calendar: CommandSlot<CalendarCommand>,
    paint: CommandSlot<PaintCommand>,
}

impl CommandSlots {
    /// Routes `envelope` to its domain slot, returning any overwritten command.
    pub fn write(
        &mut self,
        envelope: CommandEnvelope<SlotCommand>,
    ) -> Option<CommandEnvelope<SlotCommand>> {
        let timestamp_ms = envelope.timestamp_ms;
        match envelope.payload {
            SlotCommand::Calculator(payload) => self
                .calculator
                .write(CommandEnvelope::new(payload, timestamp_ms))
                .map(|old| old.map(SlotCommand::Calculator)),
            SlotCommand::Calendar(payload) => self
                .calendar
                .write(CommandEnvelope::new(payload, timestamp_ms))
                .map(|old| old.map(SlotCommand::Calendar)),
            SlotCommand::Paint(payload) => self
                .paint
                .write(CommandEnvelope::new(payload, timestamp_ms))
                .map(|old| old.map(SlotCommand::Paint)),
        }
    }

    /// Consumes the pending command for `domain`.
    pub fn take(&mut self, domain: CommandDomain) -> Option<CommandEnvelope<SlotCommand>> {
        match domain {
            CommandDomain::Calculator => self.calculator.take().map(|e| e.map(SlotCommand::Calculator)),
            CommandDomain::Calendar => self.calendar.take().map(|e| e.map(SlotCommand::Calendar)),
            CommandDomain::Paint => self.paint.take().map(|e| e.map(SlotCommand::Paint)),
        }
    }

    /// Clones the pending command for `domain` without consuming it.
    pub fn peek(&self, domain: CommandDomain) -> Option<CommandEnvelope<SlotCommand>> {
        match domain {
            CommandDomain::Calculator => self
                .calculator
                .peek()
                .cloned()
                .map(|e| e.map(SlotCommand::Calculator)),
            CommandDomain::Calendar => self
                .calendar
                .peek()
                .cloned()
                .map(|e| e.map(SlotCommand::Calendar)),
            CommandDomain::Paint => self.paint.peek().cloned().map(|e| e.map(SlotCommand::Paint)),
        }
    }

    /// Whether `domain` holds an unconsumed command.
    pub fn is_pending(&self, domain: CommandDomain) -> bool {
        match domain {
            CommandDomain::Calculator => self.calculator.is_pending(),
            CommandDomain::Calendar => self.calendar.is_pending(),
            CommandDomain::Paint => self.paint.is_pending(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn paint(command: PaintCommand, ts: u64) -> CommandEnvelope<SlotCommand> {
        CommandEnvelope::new(SlotCommand::Paint(command), ts)
    }

    #[test]
    fn second_write_overwrites_unconsumed_command() {
        let mut slots = CommandSlots::default();
        assert_eq!(slots.write(paint(PaintCommand::Shape(PaintShape::Circle), 1)), None);

        let overwritten = slots.write(paint(PaintCommand::Clear, 2));
        assert_eq!(
            overwritten,
            Some(paint(PaintCommand::Shape(PaintShape::Circle), 1))
        );
        assert_eq!(
            slots.take(CommandDomain::Paint),
            Some(paint(PaintCommand::Clear, 2))
        );
    }

    #[test]
    fn take_consumes_exactly_once() {
        let mut slots = CommandSlots::default();
        slots.write(CommandEnvelope::new(
            SlotCommand::Calculator(CalculatorCommand::new(4.0, '+', 4.0)),
            7,
        ));

        assert!(slots.is_pending(CommandDomain::Calculator));
        assert!(slots.peek(CommandDomain::Calculator).is_some());
        assert!(slots.take(CommandDomain::Calculator).is_some());
        assert!(slots.take(CommandDomain::Calculator).is_none());
        assert!(!slots.is_pending(CommandDomain::Calculator));
    }

    #[test]
    fn domains_do_not_share_a_slot() {
        let mut slots = CommandSlots::default();
        slots.write(paint(PaintCommand::Clear, 1));
        slots.write(CommandEnvelope::new(
            SlotCommand::Calendar(CalendarCommand::Navigate {
                month: 4,
                year: 2025,
            }),
            2,
        ));

        assert!(slots.is_pending(CommandDomain::Paint));
        assert!(slots.is_pending(CommandDomain::Calendar));
        assert!(!slots.is_pending(CommandDomain::Calculator));
    }

    #[test]
    fn expression_formats_without_trailing_zero() {
        assert_eq!(CalculatorCommand::new(9.0, '*', 2.0).expression, "9 * 2");
        assert_eq!(CalculatorCommand::new(2.5, '/', 0.5).expression, "2.5 / 0.5");
    }

    #[test]
    fn evaluate_covers_every_operator() {
        assert_eq!(CalculatorCommand::new(9.0, '*', 2.0).evaluate(), Ok(18.0));
        assert_eq!(CalculatorCommand::new(4.0, '+', 4.0).evaluate(), Ok(8.0));
        assert_eq!(CalculatorCommand::new(10.0, '-', 3.0).evaluate(), Ok(7.0));
        assert_eq!(CalculatorCommand::new(20.0, '/', 4.0).evaluate(), Ok(5.0));
        assert_eq!(CalculatorCommand::new(25.0, '%', 200.0).evaluate(), Ok(50.0));
    }

    #[test]
    fn evaluate_rejects_zero_divisor_and_garbage() {
        assert_eq!(
            CalculatorCommand::new(1.0, '/', 0.0).evaluate(),
            Err(CalculationError::DivideByZero)
        );
        let garbage = CalculatorCommand {
            expression: "one plus".to_string(),
        };
        assert_eq!(garbage.evaluate(), Err(CalculationError::Malformed));
    }
}
