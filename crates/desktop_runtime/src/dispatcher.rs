//! Turns a classified [`CommandIntent`] into reducer actions and one feedback message.
//!
//! Planning is pure: the caller supplies the current state, clock readings and jitter, then
//! dispatches [`DispatchPlan::actions`] in order and schedules [`DispatchPlan::deferred`].

use chrono::{DateTime, NaiveDateTime, Utc};
use desktop_app_contract::{
    AppId, CalendarCommand, CommandEnvelope, DataMutation, PaintCommand, PaintDrawing,
    SlotCommand, TodoPriority, TodoTask, VOICE_TODO_CATEGORY,
};
use platform_host::ViewportSize;
use voice_commands::{describe_date, month_name, CommandIntent};

use crate::{
    config::{DeliveryMode, VoiceTimings},
    feedback::FeedbackMessage,
    model::{DesktopState, OpenWindowRequest},
    reducer::DesktopAction,
};

#[derive(Debug, Clone, Copy, PartialEq)]
/// Inputs a plan depends on besides the intent.
pub struct DispatchContext {
    pub viewport: ViewportSize,
    /// Placement jitter for a window the plan may open.
    pub jitter: (i32, i32),
    pub now_utc: DateTime<Utc>,
    /// Monotonic timestamp for slot envelopes and new record ids.
    pub timestamp_ms: u64,
    pub timings: VoiceTimings,
}

#[derive(Debug, Clone, PartialEq)]
/// An action to dispatch after a delay.
pub struct DeferredAction {
    pub delay_ms: u32,
    pub action: DesktopAction,
}

#[derive(Debug, Clone, PartialEq)]
/// Everything one utterance does.
pub struct DispatchPlan {
    pub actions: Vec<DesktopAction>,
    pub deferred: Vec<DeferredAction>,
    pub feedback: FeedbackMessage,
}

impl DispatchPlan {
    fn feedback_only(feedback: FeedbackMessage) -> Self {
        Self {
            actions: Vec::new(),
            deferred: Vec::new(),
            feedback,
        }
    }
}

/// Plans the side effects of `intent` against the current desktop `state`.
pub fn plan_intent(
    intent: CommandIntent,
    state: &DesktopState,
    context: &DispatchContext,
) -> DispatchPlan {
    let timings = context.timings;
    match intent {
        CommandIntent::Paint(command) => {
            let text = paint_feedback(&command);
            deliver(
                state,
                context,
                AppId::Paint,
                SlotCommand::Paint(command),
                FeedbackMessage::clear_after(text, timings.feedback_medium_ms),
            )
        }
        CommandIntent::CalendarNavigate { month, year } => deliver(
            state,
            context,
            AppId::Calendar,
            SlotCommand::Calendar(CalendarCommand::Navigate { month, year }),
            FeedbackMessage::clear_after(
                format!("Opening {} {year}", month_name(month)),
                timings.feedback_medium_ms,
            ),
        ),
        CommandIntent::CalendarQuery { date } => DispatchPlan::feedback_only(
            FeedbackMessage::clear_after(describe_date(date), timings.feedback_long_ms),
        ),
        CommandIntent::CalendarAddEvent { title, date } => {
            let feedback = FeedbackMessage::clear_after(
                format!("Event added: \"{title}\""),
                timings.feedback_medium_ms,
            );
            deliver(
                state,
                context,
                AppId::Calendar,
                SlotCommand::Calendar(CalendarCommand::AddEvent { title, date }),
                feedback,
            )
        }
        CommandIntent::TodoAdd { title, deadline } => plan_todo(state, context, title, deadline),
        CommandIntent::WallpaperCycle => DispatchPlan {
            actions: vec![DesktopAction::CycleWallpaper],
            deferred: Vec::new(),
            feedback: FeedbackMessage::clear_after("Wallpaper changed!", timings.feedback_short_ms),
        },
        CommandIntent::Arithmetic(expression) => {
            let command = SlotCommand::Calculator(expression.to_command());
            let mut actions = open_if_missing(state, context, AppId::Calculator);
            let envelope = CommandEnvelope::new(command, context.timestamp_ms);
            actions.push(match timings.delivery {
                DeliveryMode::Ready => DesktopAction::DeliverCommand { envelope },
                DeliveryMode::Delayed => DesktopAction::WriteCommandSlot { envelope },
            });
            DispatchPlan {
                actions,
                deferred: Vec::new(),
                feedback: FeedbackMessage::clear_after("Calculating...", timings.feedback_short_ms),
            }
        }
        CommandIntent::CloseAll => DispatchPlan {
            actions: vec![DesktopAction::CloseAllWindows],
            deferred: Vec::new(),
            feedback: FeedbackMessage::clear_after(
                "Closing all apps...",
                timings.feedback_short_ms,
            ),
        },
        CommandIntent::CloseApp(app_id) => match state.first_window_of(app_id) {
            Some(window) => DispatchPlan {
                actions: vec![DesktopAction::CloseWindow {
                    window_id: window.id,
                }],
                deferred: Vec::new(),
                feedback: FeedbackMessage::clear_after(
                    format!("Closing {}...", app_id.title()),
                    timings.feedback_short_ms,
                ),
            },
            None => DispatchPlan::feedback_only(FeedbackMessage::clear_after(
                format!("{} is not open", app_id.title()),
                timings.feedback_short_ms,
            )),
        },
        CommandIntent::OpenApp(app_id) => DispatchPlan {
            actions: vec![DesktopAction::OpenWindow(open_request(context, app_id))],
            deferred: Vec::new(),
            feedback: FeedbackMessage::clear_after(
                format!("Opening {}...", app_id.title()),
                timings.feedback_short_ms,
            ),
        },
        CommandIntent::Unrecognized => DispatchPlan::feedback_only(FeedbackMessage::clear_after(
            "App not recognized",
            timings.feedback_short_ms,
        )),
    }
}

fn open_request(context: &DispatchContext, app_id: AppId) -> OpenWindowRequest {
    OpenWindowRequest::new(app_id, context.viewport).with_jitter(context.jitter.0, context.jitter.1)
}

fn open_if_missing(
    state: &DesktopState,
    context: &DispatchContext,
    app_id: AppId,
) -> Vec<DesktopAction> {
    if state.is_app_running(app_id) {
        Vec::new()
    } else {
        vec![DesktopAction::OpenWindow(open_request(context, app_id))]
    }
}

/// Opens `app_id` when needed and routes `command` to its slot using the configured delivery mode.
fn deliver(
    state: &DesktopState,
    context: &DispatchContext,
    app_id: AppId,
    command: SlotCommand,
    feedback: FeedbackMessage,
) -> DispatchPlan {
    let was_running = state.is_app_running(app_id);
    let mut actions = open_if_missing(state, context, app_id);
    let envelope = CommandEnvelope::new(command, context.timestamp_ms);
    let mut deferred = Vec::new();
    match context.timings.delivery {
        DeliveryMode::Ready => actions.push(DesktopAction::DeliverCommand { envelope }),
        DeliveryMode::Delayed => deferred.push(DeferredAction {
            delay_ms: if was_running {
                context.timings.settle_when_open_ms
            } else {
                context.timings.settle_after_open_ms
            },
            action: DesktopAction::WriteCommandSlot { envelope },
        }),
    }
    DispatchPlan {
        actions,
        deferred,
        feedback,
    }
}

fn plan_todo(
    state: &DesktopState,
    context: &DispatchContext,
    title: String,
    deadline: Option<NaiveDateTime>,
) -> DispatchPlan {
    let feedback = FeedbackMessage::clear_after(
        format!("Added to To-Do: \"{title}\""),
        context.timings.feedback_medium_ms,
    );
    let task = TodoTask {
        id: context.timestamp_ms.to_string(),
        title,
        description: String::new(),
        completed: false,
        priority: TodoPriority::Medium,
        deadline,
        created_at: context.now_utc,
        category: VOICE_TODO_CATEGORY.to_string(),
    };
    let mut actions = vec![DesktopAction::MutateData {
        mutation: DataMutation::AddTodo(task),
        now: context.now_utc,
    }];
    actions.extend(open_if_missing(state, context, AppId::Todo));
    DispatchPlan {
        actions,
        deferred: Vec::new(),
        feedback,
    }
}

fn paint_feedback(command: &PaintCommand) -> String {
    match command {
        PaintCommand::Clear => "Clearing canvas...".to_string(),
        PaintCommand::Shape(shape) => format!("Drawing {}...", shape.noun()),
        PaintCommand::Drawing {
            drawing: PaintDrawing::Number | PaintDrawing::Letter,
            text,
        } => format!("Drawing \"{}\"...", text.as_deref().unwrap_or_default()),
        PaintCommand::Drawing { drawing, .. } => format!("Drawing {}...", drawing.noun()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use desktop_app_contract::{CalculatorCommand, PaintShape};
    use pretty_assertions::assert_eq;
    use voice_commands::{ArithmeticExpression, ArithmeticOperator};

    use super::*;
    use crate::{
        feedback::FeedbackExpiry,
        model::{InteractionState, WindowId},
        reducer::reduce_desktop,
    };

    fn context(delivery: DeliveryMode) -> DispatchContext {
        DispatchContext {
            viewport: ViewportSize::new(1280, 800),
            jitter: (0, 0),
            now_utc: DateTime::<Utc>::UNIX_EPOCH,
            timestamp_ms: 1_700,
            timings: VoiceTimings {
                delivery,
                ..VoiceTimings::default()
            },
        }
    }

    fn run(state: &mut DesktopState, plan: &DispatchPlan) {
        let mut interaction = InteractionState::default();
        for action in &plan.actions {
            reduce_desktop(state, &mut interaction, action.clone()).expect("reduce");
        }
    }

    #[test]
    fn paint_opens_app_and_waits_for_mount() {
        let mut state = DesktopState::default();
        let plan = plan_intent(
            CommandIntent::Paint(PaintCommand::Shape(PaintShape::Circle)),
            &state,
            &context(DeliveryMode::Ready),
        );
        assert_eq!(plan.feedback.text, "Drawing circle...");
        assert_eq!(plan.feedback.expiry, FeedbackExpiry::ClearAfter(2000));
        assert_eq!(plan.actions.len(), 2);

        run(&mut state, &plan);
        let window_id = state.first_window_of(AppId::Paint).expect("paint window").id;
        assert!(state.stashed.is_pending(desktop_app_contract::CommandDomain::Paint));

        reduce_desktop(
            &mut state,
            &mut InteractionState::default(),
            DesktopAction::AppMounted { window_id },
        )
        .expect("mount");
        assert_eq!(
            state
                .slots
                .peek(desktop_app_contract::CommandDomain::Paint)
                .map(|envelope| envelope.payload),
            Some(SlotCommand::Paint(PaintCommand::Shape(PaintShape::Circle)))
        );
    }

    #[test]
    fn delayed_mode_uses_two_tier_settle_delay() {
        let mut state = DesktopState::default();
        let intent = CommandIntent::CalendarNavigate { month: 2, year: 2025 };

        let plan = plan_intent(intent.clone(), &state, &context(DeliveryMode::Delayed));
        assert_eq!(plan.feedback.text, "Opening March 2025");
        assert_eq!(plan.deferred[0].delay_ms, 300);
        run(&mut state, &plan);

        let plan = plan_intent(intent, &state, &context(DeliveryMode::Delayed));
        assert_eq!(plan.actions, Vec::new());
        assert_eq!(plan.deferred[0].delay_ms, 50);
    }

    #[test]
    fn drawing_feedback_quotes_glyphs() {
        let state = DesktopState::default();
        let ctx = context(DeliveryMode::Ready);
        let number = plan_intent(
            CommandIntent::Paint(PaintCommand::Drawing {
                drawing: PaintDrawing::Number,
                text: Some("5".to_string()),
            }),
            &state,
            &ctx,
        );
        let cat = plan_intent(
            CommandIntent::Paint(PaintCommand::Drawing {
                drawing: PaintDrawing::Cat,
                text: None,
            }),
            &state,
            &ctx,
        );
        let clear = plan_intent(CommandIntent::Paint(PaintCommand::Clear), &state, &ctx);
        assert_eq!(number.feedback.text, "Drawing \"5\"...");
        assert_eq!(cat.feedback.text, "Drawing cat...");
        assert_eq!(clear.feedback.text, "Clearing canvas...");
    }

    #[test]
    fn calendar_query_only_answers() {
        let state = DesktopState::default();
        let date = NaiveDate::from_ymd_opt(2030, 1, 29).unwrap();
        let plan = plan_intent(
            CommandIntent::CalendarQuery { date },
            &state,
            &context(DeliveryMode::Ready),
        );
        assert_eq!(plan.actions, Vec::new());
        assert_eq!(plan.feedback.text, "Tuesday, January 29, 2030");
        assert_eq!(plan.feedback.expiry, FeedbackExpiry::ClearAfter(4000));
    }

    #[test]
    fn todo_is_added_before_the_app_opens() {
        let mut state = DesktopState::default();
        let deadline = NaiveDate::from_ymd_opt(2025, 1, 16)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let plan = plan_intent(
            CommandIntent::TodoAdd {
                title: "buy milk".to_string(),
                deadline: Some(deadline),
            },
            &state,
            &context(DeliveryMode::Ready),
        );
        assert_eq!(plan.feedback.text, "Added to To-Do: \"buy milk\"");
        run(&mut state, &plan);

        let task = &state.todos[0];
        assert_eq!(task.id, "1700");
        assert_eq!(task.priority, TodoPriority::Medium);
        assert_eq!(task.category, "Personal");
        assert_eq!(task.deadline, Some(deadline));
        assert!(state.is_app_running(AppId::Todo));
    }

    #[test]
    fn arithmetic_goes_to_the_calculator() {
        let mut state = DesktopState::default();
        let plan = plan_intent(
            CommandIntent::Arithmetic(ArithmeticExpression {
                lhs: 9.0,
                operator: ArithmeticOperator::Multiply,
                rhs: 2.0,
            }),
            &state,
            &context(DeliveryMode::Ready),
        );
        assert_eq!(plan.feedback, FeedbackMessage::clear_after("Calculating...", 1500));
        run(&mut state, &plan);
        assert_eq!(
            state
                .stashed
                .peek(desktop_app_contract::CommandDomain::Calculator)
                .map(|envelope| envelope.payload),
            Some(SlotCommand::Calculator(CalculatorCommand::new(9.0, '*', 2.0)))
        );
    }

    #[test]
    fn close_reports_missing_app() {
        let mut state = DesktopState::default();
        let ctx = context(DeliveryMode::Ready);
        let plan = plan_intent(CommandIntent::CloseApp(AppId::Music), &state, &ctx);
        assert_eq!(plan.feedback.text, "Music is not open");
        assert_eq!(plan.actions, Vec::new());

        let open = plan_intent(CommandIntent::OpenApp(AppId::Music), &state, &ctx);
        run(&mut state, &open);
        let plan = plan_intent(CommandIntent::CloseApp(AppId::Music), &state, &ctx);
        assert_eq!(plan.feedback.text, "Closing Music...");
        assert_eq!(
            plan.actions,
            vec![DesktopAction::CloseWindow {
                window_id: WindowId(1)
            }]
        );
    }

    #[test]
    fn fixed_messages() {
        let state = DesktopState::default();
        let ctx = context(DeliveryMode::Ready);
        for (intent, text) in [
            (CommandIntent::WallpaperCycle, "Wallpaper changed!"),
            (CommandIntent::CloseAll, "Closing all apps..."),
            (CommandIntent::Unrecognized, "App not recognized"),
            (CommandIntent::OpenApp(AppId::TicTacToe), "Opening Tic Tac Toe..."),
        ] {
            assert_eq!(plan_intent(intent, &state, &ctx).feedback.text, text);
        }
    }
}
