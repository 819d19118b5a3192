//! Apps that own a command slot: calculator, calendar and paint.

use chrono::{Datelike, NaiveDate};
use desktop_app_contract::{
    AppMountContext, CalculatorCommand, CalendarCommand, CalendarEvent, DataMutation,
    PaintCommand, SlotCommand,
};
use leptos::*;
use platform_host::{local_now, next_monotonic_timestamp_ms};
use voice_commands::month_name;

use super::acknowledge_mount;

/// Runs `apply` for each command that lands in this app's slot, then consumes it.
fn on_slot_command(context: &AppMountContext, apply: impl Fn(SlotCommand) + 'static) {
    let pending = context.pending_command;
    let services = context.services;
    create_effect(move |_| {
        let Some(envelope) = pending.get() else {
            return;
        };
        apply(envelope.payload);
        services.consume_command();
    });
}

#[derive(Debug, Clone, Default, PartialEq)]
struct CalculatorState {
    entry: String,
    pending: Option<(f64, char)>,
    history: Vec<String>,
    error: Option<String>,
}

impl CalculatorState {
    fn display(&self) -> String {
        match (&self.error, self.entry.is_empty()) {
            (Some(error), _) => error.clone(),
            (None, true) => "0".to_string(),
            (None, false) => self.entry.clone(),
        }
    }

    fn press_digit(&mut self, digit: char) {
        self.error = None;
        if digit == '.' && self.entry.contains('.') {
            return;
        }
        self.entry.push(digit);
    }

    fn press_operator(&mut self, operator: char) {
        let Ok(value) = self.entry.parse::<f64>() else {
            if let Some((lhs, _)) = self.pending {
                self.pending = Some((lhs, operator));
            }
            return;
        };
        if self.pending.is_some() {
            self.equals();
            let Ok(chained) = self.entry.parse::<f64>() else {
                return;
            };
            self.pending = Some((chained, operator));
        } else {
            self.pending = Some((value, operator));
        }
        self.entry.clear();
    }

    fn equals(&mut self) {
        let (Some((lhs, operator)), Ok(rhs)) = (self.pending, self.entry.parse::<f64>()) else {
            return;
        };
        self.pending = None;
        self.apply(&CalculatorCommand::new(lhs, operator, rhs));
    }

    fn clear(&mut self) {
        *self = Self {
            history: std::mem::take(&mut self.history),
            ..Self::default()
        };
    }

    fn apply(&mut self, command: &CalculatorCommand) {
        match command.evaluate() {
            Ok(value) => {
                self.entry = value.to_string();
                self.error = None;
                self.history
                    .push(format!("{} = {value}", command.expression));
            }
            Err(err) => {
                self.entry.clear();
                self.error = Some(err.to_string());
            }
        }
    }
}

pub(super) fn mount_calculator_app(context: AppMountContext) -> View {
    view! { <CalculatorApp context=context /> }.into_view()
}

#[component]
fn CalculatorApp(context: AppMountContext) -> impl IntoView {
    let calculator = create_rw_signal(CalculatorState::default());

    on_slot_command(&context, move |command| {
        if let SlotCommand::Calculator(command) = command {
            calculator.update(|state| state.apply(&command));
        }
    });
    acknowledge_mount(context.services);

    let digit = move |digit: char| {
        view! {
            <button class="calc-btn" on:click=move |_| calculator.update(|s| s.press_digit(digit))>
                {digit.to_string()}
            </button>
        }
    };
    let operator = move |symbol: char| {
        view! {
            <button class="calc-btn operator" on:click=move |_| calculator.update(|s| s.press_operator(symbol))>
                {symbol.to_string()}
            </button>
        }
    };

    view! {
        <div class="app calculator">
            <div class="calc-history">
                <For
                    each=move || calculator.get().history.into_iter().enumerate().rev().take(5)
                    key=|(index, _)| *index
                    let:entry
                >
                    <div class="calc-history-item">{entry.1}</div>
                </For>
            </div>
            <div class="calc-display">{move || calculator.get().display()}</div>
            <div class="calc-keypad">
                <button class="calc-btn function" on:click=move |_| calculator.update(CalculatorState::clear)>"C"</button>
                {operator('%')}
                {operator('/')}
                {operator('*')}
                {digit('7')}{digit('8')}{digit('9')}{operator('-')}
                {digit('4')}{digit('5')}{digit('6')}{operator('+')}
                {digit('1')}{digit('2')}{digit('3')}
                <button class="calc-btn equals" on:click=move |_| calculator.update(CalculatorState::equals)>"="</button>
                {digit('0')}{digit('.')}
            </div>
        </div>
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CalendarView {
    year: i32,
    /// Zero-based month.
    month: u32,
    selected: Option<NaiveDate>,
}

impl CalendarView {
    fn showing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
            selected: None,
        }
    }

    fn step(&mut self, delta: i32) {
        let index = self.year * 12 + self.month as i32 + delta;
        self.year = index.div_euclid(12);
        self.month = index.rem_euclid(12) as u32;
    }

    /// Applies a slot command and returns the event to create, if any.
    fn apply(&mut self, command: CalendarCommand, event_id: String) -> Option<CalendarEvent> {
        match command {
            CalendarCommand::Navigate { month, year } => {
                self.year = year;
                self.month = month.min(11);
                None
            }
            CalendarCommand::AddEvent { title, date } => {
                *self = Self {
                    selected: Some(date),
                    ..Self::showing(date)
                };
                Some(CalendarEvent::all_day(event_id, title, date))
            }
        }
    }
}

/// Day cells for a Sunday-first month grid. Leading cells before the 1st are `None`.
fn month_grid(year: i32, month: u32) -> Vec<Option<u32>> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month + 1, 1) else {
        return Vec::new();
    };
    let next_first = if month == 11 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 2, 1)
    };
    let days = next_first
        .map(|next| (next - first).num_days() as u32)
        .unwrap_or(31);
    let leading = first.weekday().num_days_from_sunday() as usize;

    std::iter::repeat(None)
        .take(leading)
        .chain((1..=days).map(Some))
        .collect()
}

pub(super) fn mount_calendar_app(context: AppMountContext) -> View {
    view! { <CalendarApp context=context /> }.into_view()
}

#[component]
fn CalendarApp(context: AppMountContext) -> impl IntoView {
    let calendar = create_rw_signal(CalendarView::showing(local_now().date()));
    let services = context.services;
    let events = context.data;

    on_slot_command(&context, move |command| {
        let SlotCommand::Calendar(command) = command else {
            return;
        };
        let event_id = next_monotonic_timestamp_ms().to_string();
        if let Some(event) = calendar
            .try_update(|view| view.apply(command, event_id))
            .flatten()
        {
            services.mutate(DataMutation::AddEvent(event));
        }
    });
    acknowledge_mount(services);

    let cells = move || {
        let view = calendar.get();
        month_grid(view.year, view.month)
            .into_iter()
            .enumerate()
            .collect::<Vec<_>>()
    };
    let events_on = move |day: u32| {
        let view = calendar.get_untracked();
        events.with(|data| {
            data.events
                .iter()
                .filter(|event| {
                    event.date.year() == view.year
                        && event.date.month0() == view.month
                        && event.date.day() == day
                })
                .map(|event| event.title.clone())
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="app calendar">
            <div class="calendar-header">
                <button class="calendar-nav" on:click=move |_| calendar.update(|v| v.step(-1))>"‹"</button>
                <h2>{move || {
                    let view = calendar.get();
                    format!("{} {}", month_name(view.month), view.year)
                }}</h2>
                <button class="calendar-nav" on:click=move |_| calendar.update(|v| v.step(1))>"›"</button>
            </div>
            <div class="calendar-grid">
                {move || {
                    cells()
                        .into_iter()
                        .map(|(_, cell)| match cell {
                            None => view! { <div class="calendar-cell empty" /> }.into_view(),
                            Some(day) => {
                                let selected = calendar.with(|v| {
                                    v.selected.is_some_and(|date| {
                                        date.year() == v.year && date.month0() == v.month && date.day() == day
                                    })
                                });
                                let titles = events_on(day);
                                view! {
                                    <div class=if selected { "calendar-cell selected" } else { "calendar-cell" }>
                                        <span class="calendar-day">{day}</span>
                                        {titles
                                            .into_iter()
                                            .map(|title| view! { <span class="calendar-event">{title}</span> })
                                            .collect_view()}
                                    </div>
                                }
                                    .into_view()
                            }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

/// Label shown for a drawn item.
fn paint_label(command: &PaintCommand) -> Option<String> {
    match command {
        PaintCommand::Clear => None,
        PaintCommand::Shape(shape) => Some(shape.noun().to_string()),
        PaintCommand::Drawing {
            text: Some(text), ..
        } => Some(text.clone()),
        PaintCommand::Drawing { drawing, .. } => Some(drawing.noun().to_string()),
    }
}

fn apply_paint(canvas: &mut Vec<String>, command: &PaintCommand) {
    match paint_label(command) {
        Some(label) => canvas.push(label),
        None => canvas.clear(),
    }
}

pub(super) fn mount_paint_app(context: AppMountContext) -> View {
    view! { <PaintApp context=context /> }.into_view()
}

#[component]
fn PaintApp(context: AppMountContext) -> impl IntoView {
    let canvas = create_rw_signal(Vec::<String>::new());

    on_slot_command(&context, move |command| {
        if let SlotCommand::Paint(command) = command {
            canvas.update(|items| apply_paint(items, &command));
        }
    });
    acknowledge_mount(context.services);

    view! {
        <div class="app paint">
            <div class="paint-toolbar">
                <button class="app-action" on:click=move |_| canvas.update(Vec::clear)>"Clear"</button>
                <span>{move || format!("{} items", canvas.with(Vec::len))}</span>
            </div>
            <div class="paint-canvas">
                <For
                    each=move || canvas.get().into_iter().enumerate()
                    key=|(index, label)| (*index, label.clone())
                    let:item
                >
                    <div class=format!("paint-item paint-{}", item.1.to_lowercase())>{item.1}</div>
                </For>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::{PaintDrawing, PaintShape};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn calculator_keypad_chains_operations() {
        let mut calc = CalculatorState::default();
        calc.press_digit('1');
        calc.press_digit('2');
        calc.press_operator('+');
        calc.press_digit('3');
        calc.press_operator('*');
        calc.press_digit('2');
        calc.equals();
        assert_eq!(calc.display(), "30");
        assert_eq!(calc.history, vec!["12 + 3 = 15", "15 * 2 = 30"]);
    }

    #[test]
    fn calculator_reports_division_by_zero() {
        let mut calc = CalculatorState::default();
        calc.apply(&CalculatorCommand::new(8.0, '/', 0.0));
        assert_eq!(calc.display(), "Cannot divide by zero");
        calc.press_digit('4');
        assert_eq!(calc.display(), "4");
    }

    #[test]
    fn voice_percent_reads_as_percent_of() {
        let mut calc = CalculatorState::default();
        calc.apply(&CalculatorCommand::new(20.0, '%', 50.0));
        assert_eq!(calc.display(), "10");
    }

    #[test]
    fn month_grid_starts_on_sunday() {
        // March 2025 starts on a Saturday.
        let grid = month_grid(2025, 2);
        assert_eq!(grid.iter().take_while(|cell| cell.is_none()).count(), 6);
        assert_eq!(grid.last(), Some(&Some(31)));
        assert_eq!(month_grid(2024, 1).last(), Some(&Some(29)));
    }

    #[test]
    fn calendar_commands_move_the_view() {
        let date = NaiveDate::from_ymd_opt(2030, 1, 29).expect("valid date");
        let mut view = CalendarView::showing(NaiveDate::from_ymd_opt(2025, 12, 1).expect("valid date"));
        view.step(1);
        assert_eq!((view.year, view.month), (2026, 0));

        assert_eq!(
            view.apply(CalendarCommand::Navigate { month: 4, year: 2027 }, "1".to_string()),
            None
        );
        assert_eq!((view.year, view.month), (2027, 4));

        let event = view.apply(
            CalendarCommand::AddEvent {
                title: "dentist".to_string(),
                date,
            },
            "42".to_string(),
        );
        assert_eq!(event, Some(CalendarEvent::all_day("42", "dentist", date)));
        assert_eq!(view.selected, Some(date));
        assert_eq!((view.year, view.month), (2030, 0));
    }

    #[test]
    fn paint_clear_wipes_canvas() {
        let mut canvas = Vec::new();
        apply_paint(&mut canvas, &PaintCommand::Shape(PaintShape::Star));
        apply_paint(
            &mut canvas,
            &PaintCommand::Drawing {
                drawing: PaintDrawing::Letter,
                text: Some("A".to_string()),
            },
        );
        assert_eq!(canvas, vec!["star", "A"]);
        apply_paint(&mut canvas, &PaintCommand::Clear);
        assert!(canvas.is_empty());
    }
}
