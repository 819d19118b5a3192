//! Voice assistant wiring: speech engine callbacks, listener directives, command dispatch and
//! the feedback toast.

use std::rc::Rc;

use leptos::*;
use platform_host::{
    local_now, next_monotonic_timestamp_ms, random_offset, utc_now, SpeechErrorKind, SpeechEvent,
};
use voice_commands::parse_utterance;

use crate::{
    dispatcher::{plan_intent, DispatchContext},
    feedback::FeedbackMessage,
    runtime_context::DesktopRuntimeContext,
    voice::{ListenerDirective, ListenerEvent},
};

/// Subscribes to the speech engine and schedules the automatic first start.
pub fn install(runtime: DesktopRuntimeContext) {
    let host = runtime.host.get_value();
    host.speech().set_listener(Rc::new(move |event| {
        handle_speech_event(runtime, event);
    }));
    host.schedule(
        runtime.timings.auto_start_delay_ms,
        Box::new(move || handle_listener_event(runtime, ListenerEvent::AutoStart)),
    );
}

/// Translates an engine callback into a listener event.
pub fn handle_speech_event(runtime: DesktopRuntimeContext, event: SpeechEvent) {
    let event = match event {
        SpeechEvent::Result(text) => ListenerEvent::Result(text),
        SpeechEvent::Error(kind) => {
            if !matches!(kind, SpeechErrorKind::NoSpeech | SpeechErrorKind::Aborted) {
                logging::warn!("speech recognition error: {kind:?}");
            }
            ListenerEvent::Error(kind)
        }
        SpeechEvent::End => ListenerEvent::End,
    };
    handle_listener_event(runtime, event);
}

/// Feeds `event` to the listener and carries out its directives in order.
pub fn handle_listener_event(runtime: DesktopRuntimeContext, event: ListenerEvent) {
    let Some(directives) = runtime.voice.try_update(|voice| voice.handle(event)) else {
        return;
    };
    let host = runtime.host.get_value();
    for directive in directives {
        match directive {
            ListenerDirective::StartEngine => {
                if let Err(err) = host.speech().start() {
                    logging::warn!("{err}");
                    handle_listener_event(runtime, ListenerEvent::StartFailed);
                    return;
                }
            }
            ListenerDirective::StopEngine => host.speech().stop(),
            ListenerDirective::ScheduleRestart {
                delay_ms,
                generation,
            } => {
                host.schedule(
                    delay_ms,
                    Box::new(move || {
                        handle_listener_event(runtime, ListenerEvent::RestartTimer { generation })
                    }),
                );
            }
            ListenerDirective::ClearTranscript => runtime.transcript.set(None),
            ListenerDirective::Dispatch(text) => {
                runtime.transcript.set(Some(text.clone()));
                submit_utterance(runtime, &text);
            }
            ListenerDirective::Feedback(message) => show_feedback(runtime, message),
        }
    }
}

/// Classifies `text` and applies the resulting plan.
pub fn submit_utterance(runtime: DesktopRuntimeContext, text: &str) {
    let intent = parse_utterance(text, local_now());
    logging::log!("voice command {text:?} -> {intent:?}");

    let span = runtime
        .state
        .with_untracked(|state| state.metrics.placement_jitter);
    let context = DispatchContext {
        viewport: runtime.viewport.get_untracked(),
        jitter: (random_offset(span), random_offset(span)),
        now_utc: utc_now(),
        timestamp_ms: next_monotonic_timestamp_ms(),
        timings: runtime.timings,
    };
    let plan = runtime
        .state
        .with_untracked(|state| plan_intent(intent, state, &context));

    for action in plan.actions {
        runtime.dispatch_action(action);
    }
    let host = runtime.host.get_value();
    for deferred in plan.deferred {
        let action = deferred.action;
        host.schedule(
            deferred.delay_ms,
            Box::new(move || runtime.dispatch_action(action)),
        );
    }
    show_feedback(runtime, plan.feedback);
}

/// Shows `message` and schedules its expiry. Older timers never touch a newer message.
pub fn show_feedback(runtime: DesktopRuntimeContext, message: FeedbackMessage) {
    let delay_ms = message.delay_ms();
    let Some(ticket) = runtime.feedback.try_update(|feedback| feedback.show(message)) else {
        return;
    };
    runtime.host.get_value().schedule(
        delay_ms,
        Box::new(move || {
            runtime.feedback.try_update(|feedback| feedback.expire(ticket));
        }),
    );
}
