//! Typed classification results.

use chrono::{NaiveDate, NaiveDateTime};
use desktop_app_contract::{AppId, CalculatorCommand, PaintCommand};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Binary operators recognized by the arithmetic grammar.
pub enum ArithmeticOperator {
    /// `a + b`
    Add,
    /// `a - b`
    Subtract,
    /// `a * b`
    Multiply,
    /// `a / b`
    Divide,
    /// `a` percent of `b`, i.e. `(a / 100) * b`.
    PercentOf,
}

impl ArithmeticOperator {
    /// Canonical symbol written into calculator expressions.
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
            Self::PercentOf => '%',
        }
    }

    /// Maps a symbolic operator, accepting `×` and `÷`.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Some(match symbol {
            '+' => Self::Add,
            '-' => Self::Subtract,
            '*' | '×' => Self::Multiply,
            '/' | '÷' => Self::Divide,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// `lhs <operator> rhs` with non-negative operands.
pub struct ArithmeticExpression {
    /// Left operand.
    pub lhs: f64,
    /// Operator.
    pub operator: ArithmeticOperator,
    /// Right operand.
    pub rhs: f64,
}

impl ArithmeticExpression {
    /// Calculator slot payload for this expression.
    pub fn to_command(self) -> CalculatorCommand {
        CalculatorCommand::new(self.lhs, self.operator.symbol(), self.rhs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// What an utterance asks the desktop to do.
pub enum CommandIntent {
    /// Open (or focus) an app.
    OpenApp(AppId),
    /// Close an app's window.
    CloseApp(AppId),
    /// Close every window.
    CloseAll,
    /// Evaluate an expression in the calculator.
    Arithmetic(ArithmeticExpression),
    /// Add a to-do task.
    TodoAdd {
        /// Task title with time phrases removed.
        title: String,
        /// Local due time.
        deadline: Option<NaiveDateTime>,
    },
    /// Show a month in the calendar.
    CalendarNavigate {
        /// Zero-based month.
        month: u32,
        /// Year.
        year: i32,
    },
    /// Answer which weekday a date falls on.
    CalendarQuery {
        /// Date asked about.
        date: NaiveDate,
    },
    /// Add a calendar event.
    CalendarAddEvent {
        /// Event title.
        title: String,
        /// Event day.
        date: NaiveDate,
    },
    /// Draw on (or clear) the paint canvas.
    Paint(PaintCommand),
    /// Advance to the next wallpaper.
    WallpaperCycle,
    /// Nothing matched.
    Unrecognized,
}
