//! Continuous-listening state machine for the voice assistant.
//!
//! The engine itself lives behind [`platform_host::SpeechRecognitionService`]. This module only
//! decides what to do with its callbacks: the runtime feeds in [`ListenerEvent`]s and carries out
//! the returned [`ListenerDirective`]s in order. When a [`ListenerDirective::StartEngine`] fails
//! the runtime skips the rest of that batch and reports [`ListenerEvent::StartFailed`].

use platform_host::SpeechErrorKind;

use crate::{config::VoiceTimings, feedback::FeedbackMessage};

pub const LISTENING_HINT: &str = "Always listening... (Say \"open\" or \"close\" + app name)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerEvent {
    /// Mic button pressed.
    Toggle,
    /// First start after the assistant mounts.
    AutoStart,
    /// A finalized transcript.
    Result(String),
    Error(SpeechErrorKind),
    /// The engine session ended.
    End,
    /// The last [`ListenerDirective::StartEngine`] failed.
    StartFailed,
    /// A restart scheduled under `generation` is due.
    RestartTimer { generation: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerDirective {
    StartEngine,
    StopEngine,
    /// Send [`ListenerEvent::RestartTimer`] with `generation` after the delay.
    ScheduleRestart { delay_ms: u32, generation: u64 },
    ClearTranscript,
    /// Show the transcript and run it through the grammar.
    Dispatch(String),
    Feedback(FeedbackMessage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StartOrigin {
    Toggle,
    Auto,
    Restart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceListener {
    supported: bool,
    listening: bool,
    pending_restart: bool,
    /// Bumped on every toggle. Restart timers from an older generation are ignored.
    restart_generation: u64,
    last_start: StartOrigin,
    timings: VoiceTimings,
}

impl VoiceListener {
    pub fn new(supported: bool, timings: VoiceTimings) -> Self {
        Self {
            supported,
            listening: false,
            pending_restart: false,
            restart_generation: 0,
            last_start: StartOrigin::Auto,
            timings,
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn is_supported(&self) -> bool {
        self.supported
    }

    pub fn handle(&mut self, event: ListenerEvent) -> Vec<ListenerDirective> {
        let medium = self.timings.feedback_medium_ms;
        match event {
            ListenerEvent::Toggle if !self.supported => vec![ListenerDirective::Feedback(
                FeedbackMessage::clear_after("Speech recognition not supported", medium),
            )],
            ListenerEvent::Toggle if self.listening => {
                self.listening = false;
                self.cancel_restart();
                vec![
                    ListenerDirective::StopEngine,
                    ListenerDirective::Feedback(FeedbackMessage::clear_after(
                        "Stopped listening",
                        medium,
                    )),
                ]
            }
            ListenerEvent::Toggle => {
                self.listening = true;
                self.cancel_restart();
                self.last_start = StartOrigin::Toggle;
                vec![
                    ListenerDirective::ClearTranscript,
                    ListenerDirective::Feedback(FeedbackMessage::replace_after(
                        LISTENING_HINT,
                        medium,
                        "Listening...",
                    )),
                    ListenerDirective::StartEngine,
                ]
            }
            ListenerEvent::AutoStart => {
                if !self.supported || self.listening {
                    return Vec::new();
                }
                self.listening = true;
                self.last_start = StartOrigin::Auto;
                vec![
                    ListenerDirective::StartEngine,
                    ListenerDirective::Feedback(FeedbackMessage::clear_after(
                        "Voice Assistant Active",
                        medium,
                    )),
                ]
            }
            ListenerEvent::Result(text) => {
                let text = text.trim().to_lowercase();
                if text.is_empty() {
                    return Vec::new();
                }
                vec![ListenerDirective::Dispatch(text)]
            }
            ListenerEvent::Error(SpeechErrorKind::NoSpeech) => Vec::new(),
            ListenerEvent::Error(SpeechErrorKind::Aborted) | ListenerEvent::End => {
                self.schedule_restart(self.timings.restart_delay_ms)
            }
            ListenerEvent::Error(_) => vec![ListenerDirective::Feedback(
                FeedbackMessage::clear_after("Error: Could not understand", medium),
            )],
            ListenerEvent::StartFailed => match self.last_start {
                StartOrigin::Restart => self.schedule_restart(self.timings.restart_retry_ms),
                StartOrigin::Toggle => {
                    self.listening = false;
                    vec![ListenerDirective::Feedback(FeedbackMessage::clear_after(
                        "Error starting voice recognition",
                        medium,
                    ))]
                }
                StartOrigin::Auto => {
                    self.listening = false;
                    Vec::new()
                }
            },
            ListenerEvent::RestartTimer { generation } => {
                if generation != self.restart_generation {
                    return Vec::new();
                }
                self.pending_restart = false;
                if !self.listening {
                    return Vec::new();
                }
                self.last_start = StartOrigin::Restart;
                vec![ListenerDirective::StartEngine]
            }
        }
    }

    fn schedule_restart(&mut self, delay_ms: u32) -> Vec<ListenerDirective> {
        if !self.listening || self.pending_restart {
            return Vec::new();
        }
        self.pending_restart = true;
        vec![ListenerDirective::ScheduleRestart {
            delay_ms,
            generation: self.restart_generation,
        }]
    }

    fn cancel_restart(&mut self) {
        self.pending_restart = false;
        self.restart_generation = self.restart_generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::FeedbackExpiry;
    use pretty_assertions::assert_eq;

    fn listener() -> VoiceListener {
        VoiceListener::new(true, VoiceTimings::default())
    }

    fn feedback_texts(directives: &[ListenerDirective]) -> Vec<String> {
        directives
            .iter()
            .filter_map(|directive| match directive {
                ListenerDirective::Feedback(message) => Some(message.text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn toggle_starts_then_stops() {
        let mut voice = listener();
        let on = voice.handle(ListenerEvent::Toggle);
        assert!(voice.is_listening());
        assert_eq!(on.last(), Some(&ListenerDirective::StartEngine));
        assert_eq!(
            on[1],
            ListenerDirective::Feedback(FeedbackMessage {
                text: LISTENING_HINT.to_string(),
                expiry: FeedbackExpiry::ReplaceAfter(2000, "Listening...".to_string()),
            })
        );

        let off = voice.handle(ListenerEvent::Toggle);
        assert!(!voice.is_listening());
        assert_eq!(off[0], ListenerDirective::StopEngine);
        assert_eq!(feedback_texts(&off), vec!["Stopped listening".to_string()]);
    }

    #[test]
    fn unsupported_engine_never_starts() {
        let mut voice = VoiceListener::new(false, VoiceTimings::default());
        assert!(!voice.is_supported());
        assert_eq!(voice.handle(ListenerEvent::AutoStart), Vec::new());
        assert_eq!(
            feedback_texts(&voice.handle(ListenerEvent::Toggle)),
            vec!["Speech recognition not supported".to_string()]
        );
        assert!(!voice.is_listening());
    }

    #[test]
    fn results_are_normalized() {
        let mut voice = listener();
        assert_eq!(
            voice.handle(ListenerEvent::Result("  Open Calculator ".to_string())),
            vec![ListenerDirective::Dispatch("open calculator".to_string())]
        );
        assert_eq!(voice.handle(ListenerEvent::Result("   ".to_string())), Vec::new());
    }

    #[test]
    fn session_end_restarts_only_while_listening() {
        let mut voice = listener();
        assert_eq!(voice.handle(ListenerEvent::End), Vec::new());

        voice.handle(ListenerEvent::AutoStart);
        assert_eq!(
            voice.handle(ListenerEvent::End),
            vec![ListenerDirective::ScheduleRestart {
                delay_ms: 50,
                generation: 0
            }]
        );
        assert_eq!(voice.handle(ListenerEvent::Error(SpeechErrorKind::Aborted)), Vec::new());
        assert_eq!(
            voice.handle(ListenerEvent::RestartTimer { generation: 0 }),
            vec![ListenerDirective::StartEngine]
        );
        assert_eq!(
            voice.handle(ListenerEvent::StartFailed),
            vec![ListenerDirective::ScheduleRestart {
                delay_ms: 500,
                generation: 0
            }]
        );
        assert!(voice.is_listening());

        voice.handle(ListenerEvent::Toggle);
        assert_eq!(
            voice.handle(ListenerEvent::RestartTimer { generation: 0 }),
            Vec::new()
        );
    }

    #[test]
    fn toggling_discards_scheduled_restart() {
        let mut voice = listener();
        voice.handle(ListenerEvent::AutoStart);
        voice.handle(ListenerEvent::End);

        voice.handle(ListenerEvent::Toggle);
        voice.handle(ListenerEvent::Toggle);
        assert!(voice.is_listening());
        assert_eq!(
            voice.handle(ListenerEvent::RestartTimer { generation: 0 }),
            Vec::new()
        );

        assert_eq!(
            voice.handle(ListenerEvent::End),
            vec![ListenerDirective::ScheduleRestart {
                delay_ms: 50,
                generation: 2
            }]
        );
        assert_eq!(
            voice.handle(ListenerEvent::RestartTimer { generation: 2 }),
            vec![ListenerDirective::StartEngine]
        );
    }

    #[test]
    fn engine_errors_keep_listening() {
        let mut voice = listener();
        voice.handle(ListenerEvent::AutoStart);
        assert_eq!(voice.handle(ListenerEvent::Error(SpeechErrorKind::NoSpeech)), Vec::new());
        assert_eq!(
            feedback_texts(&voice.handle(ListenerEvent::Error(SpeechErrorKind::Network))),
            vec!["Error: Could not understand".to_string()]
        );
        assert!(voice.is_listening());
    }

    #[test]
    fn failed_manual_start_reports_and_resets() {
        let mut voice = listener();
        voice.handle(ListenerEvent::Toggle);
        assert_eq!(
            feedback_texts(&voice.handle(ListenerEvent::StartFailed)),
            vec!["Error starting voice recognition".to_string()]
        );
        assert!(!voice.is_listening());

        voice.handle(ListenerEvent::AutoStart);
        assert_eq!(voice.handle(ListenerEvent::StartFailed), Vec::new());
        assert!(!voice.is_listening());
    }
}
