//! Continuous speech-recognition contract.
//!
//! An engine delivers finalized transcripts, error codes and session-end notifications to a single
//! listener. Restart policy lives in the runtime, not in the engine.

use std::{cell::RefCell, rc::Rc};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Engine error codes, following the Web Speech API names.
pub enum SpeechErrorKind {
    /// No speech was detected before the engine timed out.
    NoSpeech,
    /// The session was aborted, usually by another start/stop.
    Aborted,
    /// Microphone capture failed.
    AudioCapture,
    /// Recognition service was unreachable.
    Network,
    /// User or policy denied microphone access.
    NotAllowed,
    /// Any other engine-specific code.
    Other(String),
}

impl SpeechErrorKind {
    /// Maps an engine error code such as `"no-speech"`.
    pub fn from_code(code: &str) -> Self {
        match code {
            "no-speech" => Self::NoSpeech,
            "aborted" => Self::Aborted,
            "audio-capture" => Self::AudioCapture,
            "network" => Self::Network,
            "not-allowed" | "service-not-allowed" => Self::NotAllowed,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Notifications raised by a running recognition session.
pub enum SpeechEvent {
    /// A finalized transcript.
    Result(String),
    /// The engine reported an error. The session may still end afterwards.
    Error(SpeechErrorKind),
    /// The session ended.
    End,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Failures starting a recognition session.
pub enum SpeechError {
    /// The host has no recognition engine.
    #[error("speech recognition is not supported on this host")]
    Unsupported,
    /// The engine refused to start, typically because a session is already running.
    #[error("failed to start speech recognition: {0}")]
    StartFailed(String),
}

/// Callback receiving [`SpeechEvent`]s.
pub type SpeechListener = Rc<dyn Fn(SpeechEvent)>;

/// Host speech-recognition engine configured for continuous, final-only, `en-US` recognition.
pub trait SpeechRecognitionService {
    /// Whether an engine is available.
    fn is_supported(&self) -> bool;

    /// Replaces the event listener.
    fn set_listener(&self, listener: SpeechListener);

    /// Starts a session.
    ///
    /// # Errors
    ///
    /// Returns [`SpeechError`] when unsupported or when the engine refuses to start.
    fn start(&self) -> Result<(), SpeechError>;

    /// Stops the current session, if any.
    fn stop(&self);
}

#[derive(Debug, Clone, Copy, Default)]
/// Engine for hosts without speech support.
pub struct NoopSpeechRecognition;

impl SpeechRecognitionService for NoopSpeechRecognition {
    fn is_supported(&self) -> bool {
        false
    }

    fn set_listener(&self, _listener: SpeechListener) {}

    fn start(&self) -> Result<(), SpeechError> {
        Err(SpeechError::Unsupported)
    }

    fn stop(&self) {}
}

#[derive(Default)]
struct ScriptedState {
    listener: Option<SpeechListener>,
    running: bool,
    starts: usize,
    stops: usize,
    failing_starts: usize,
}

#[derive(Clone, Default)]
/// In-process engine driven by test code through [`ScriptedSpeechRecognition::emit`].
pub struct ScriptedSpeechRecognition {
    state: Rc<RefCell<ScriptedState>>,
}

impl ScriptedSpeechRecognition {
    /// Makes the next `count` calls to `start` fail.
    pub fn fail_next_starts(&self, count: usize) {
        self.state.borrow_mut().failing_starts = count;
    }

    /// Delivers `event` to the listener. `End` also marks the session stopped.
    pub fn emit(&self, event: SpeechEvent) {
        let listener = {
            let mut state = self.state.borrow_mut();
            if event == SpeechEvent::End {
                state.running = false;
            }
            state.listener.clone()
        };
        if let Some(listener) = listener {
            listener(event);
        }
    }

    /// Whether a session is currently running.
    pub fn is_running(&self) -> bool {
        self.state.borrow().running
    }

    /// Successful `start` calls so far.
    pub fn start_count(&self) -> usize {
        self.state.borrow().starts
    }

    /// `stop` calls so far.
    pub fn stop_count(&self) -> usize {
        self.state.borrow().stops
    }
}

impl SpeechRecognitionService for ScriptedSpeechRecognition {
    fn is_supported(&self) -> bool {
        true
    }

    fn set_listener(&self, listener: SpeechListener) {
        self.state.borrow_mut().listener = Some(listener);
    }

    fn start(&self) -> Result<(), SpeechError> {
        let mut state = self.state.borrow_mut();
        if state.failing_starts > 0 {
            state.failing_starts -= 1;
            return Err(SpeechError::StartFailed("engine busy".to_string()));
        }
        if state.running {
            return Err(SpeechError::StartFailed("already started".to_string()));
        }
        state.running = true;
        state.starts += 1;
        Ok(())
    }

    fn stop(&self) {
        let mut state = self.state.borrow_mut();
        state.running = false;
        state.stops += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn error_codes_map_to_kinds() {
        assert_eq!(SpeechErrorKind::from_code("no-speech"), SpeechErrorKind::NoSpeech);
        assert_eq!(SpeechErrorKind::from_code("aborted"), SpeechErrorKind::Aborted);
        assert_eq!(
            SpeechErrorKind::from_code("service-not-allowed"),
            SpeechErrorKind::NotAllowed
        );
        assert_eq!(
            SpeechErrorKind::from_code("bad-grammar"),
            SpeechErrorKind::Other("bad-grammar".to_string())
        );
    }

    #[test]
    fn noop_engine_is_unsupported() {
        assert!(!NoopSpeechRecognition.is_supported());
        assert_eq!(NoopSpeechRecognition.start(), Err(SpeechError::Unsupported));
    }

    #[test]
    fn scripted_engine_delivers_events_and_tracks_sessions() {
        let engine = ScriptedSpeechRecognition::default();
        let heard = Rc::new(RefCell::new(Vec::new()));
        let sink = heard.clone();
        engine.set_listener(Rc::new(move |event| sink.borrow_mut().push(event)));

        engine.start().expect("start");
        assert!(engine.start().is_err());
        engine.emit(SpeechEvent::Result("open notes".to_string()));
        engine.emit(SpeechEvent::End);

        assert!(!engine.is_running());
        assert_eq!(engine.start_count(), 1);
        assert_eq!(
            *heard.borrow(),
            vec![
                SpeechEvent::Result("open notes".to_string()),
                SpeechEvent::End
            ]
        );
    }

    #[test]
    fn scripted_failures_are_consumed() {
        let engine = ScriptedSpeechRecognition::default();
        engine.fail_next_starts(1);
        assert!(engine.start().is_err());
        assert!(engine.start().is_ok());
    }
}
