//! Web Speech API adapter.
//!
//! Browsers expose the engine as `SpeechRecognition` or the prefixed `webkitSpeechRecognition`
//! constructor. web-sys only binds it behind unstable cfg flags, so the object is driven through
//! `js_sys::Reflect`.

use std::{cell::RefCell, rc::Rc};

use platform_host::{SpeechError, SpeechListener, SpeechRecognitionService};

#[cfg(target_arch = "wasm32")]
use platform_host::{SpeechErrorKind, SpeechEvent};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

/// Recognition language.
pub const RECOGNITION_LANG: &str = "en-US";

#[derive(Default)]
struct WebSpeechState {
    listener: Option<SpeechListener>,
    #[cfg(target_arch = "wasm32")]
    recognition: Option<JsValue>,
    #[cfg(target_arch = "wasm32")]
    handlers: Vec<Closure<dyn FnMut(JsValue)>>,
}

impl WebSpeechState {
    #[cfg(target_arch = "wasm32")]
    fn notify(state: &Rc<RefCell<Self>>, event: SpeechEvent) {
        let listener = state.borrow().listener.clone();
        if let Some(listener) = listener {
            listener(event);
        }
    }
}

#[derive(Clone, Default)]
/// Continuous, final-results-only recognition through the browser engine.
///
/// On non-wasm targets the engine is never available.
pub struct WebSpeechRecognition {
    state: Rc<RefCell<WebSpeechState>>,
}

impl WebSpeechRecognition {
    /// Creates the adapter and, when the browser has an engine, the underlying recognition object.
    pub fn new() -> Self {
        let adapter = Self::default();
        #[cfg(target_arch = "wasm32")]
        adapter.install();
        adapter
    }

    #[cfg(target_arch = "wasm32")]
    fn install(&self) {
        let Some(recognition) = construct_recognition() else {
            return;
        };
        let set = |name: &str, value: &JsValue| {
            let _ = js_sys::Reflect::set(&recognition, &JsValue::from_str(name), value);
        };
        set("continuous", &JsValue::TRUE);
        set("interimResults", &JsValue::FALSE);
        set("lang", &JsValue::from_str(RECOGNITION_LANG));

        let weak = Rc::downgrade(&self.state);
        let on_result = Closure::<dyn FnMut(JsValue)>::wrap(Box::new({
            let weak = weak.clone();
            move |event: JsValue| {
                let (Some(state), Some(transcript)) = (weak.upgrade(), last_transcript(&event))
                else {
                    return;
                };
                WebSpeechState::notify(&state, SpeechEvent::Result(transcript));
            }
        }));
        let on_error = Closure::<dyn FnMut(JsValue)>::wrap(Box::new({
            let weak = weak.clone();
            move |event: JsValue| {
                let Some(state) = weak.upgrade() else {
                    return;
                };
                let code = js_sys::Reflect::get(&event, &JsValue::from_str("error"))
                    .ok()
                    .and_then(|value| value.as_string())
                    .unwrap_or_default();
                let kind = SpeechErrorKind::from_code(&code);
                WebSpeechState::notify(&state, SpeechEvent::Error(kind));
            }
        }));
        let on_end = Closure::<dyn FnMut(JsValue)>::wrap(Box::new(move |_event: JsValue| {
            if let Some(state) = weak.upgrade() {
                WebSpeechState::notify(&state, SpeechEvent::End);
            }
        }));

        set("onresult", on_result.as_ref());
        set("onerror", on_error.as_ref());
        set("onend", on_end.as_ref());

        let mut state = self.state.borrow_mut();
        state.handlers = vec![on_result, on_error, on_end];
        state.recognition = Some(recognition);
    }

    #[cfg(target_arch = "wasm32")]
    fn call(&self, method: &str) -> Result<(), SpeechError> {
        let recognition = self
            .state
            .borrow()
            .recognition
            .clone()
            .ok_or(SpeechError::Unsupported)?;
        let function = js_sys::Reflect::get(&recognition, &JsValue::from_str(method))
            .ok()
            .and_then(|value| value.dyn_into::<js_sys::Function>().ok())
            .ok_or_else(|| SpeechError::StartFailed(format!("`{method}` is not callable")))?;
        function
            .call0(&recognition)
            .map(|_| ())
            .map_err(|e| SpeechError::StartFailed(format!("{e:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
fn construct_recognition() -> Option<JsValue> {
    let window = web_sys::window()?;
    let constructor = ["SpeechRecognition", "webkitSpeechRecognition"]
        .into_iter()
        .filter_map(|name| js_sys::Reflect::get(&window, &JsValue::from_str(name)).ok())
        .find_map(|value| value.dyn_into::<js_sys::Function>().ok())?;
    js_sys::Reflect::construct(&constructor, &js_sys::Array::new()).ok()
}

/// Transcript of the first alternative of the newest result in a `SpeechRecognitionEvent`.
#[cfg(target_arch = "wasm32")]
fn last_transcript(event: &JsValue) -> Option<String> {
    let results = js_sys::Reflect::get(event, &JsValue::from_str("results")).ok()?;
    let length = js_sys::Reflect::get(&results, &JsValue::from_str("length"))
        .ok()?
        .as_f64()? as u32;
    let newest = js_sys::Reflect::get_u32(&results, length.checked_sub(1)?).ok()?;
    let alternative = js_sys::Reflect::get_u32(&newest, 0).ok()?;
    js_sys::Reflect::get(&alternative, &JsValue::from_str("transcript"))
        .ok()?
        .as_string()
}

impl SpeechRecognitionService for WebSpeechRecognition {
    fn is_supported(&self) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            self.state.borrow().recognition.is_some()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            false
        }
    }

    fn set_listener(&self, listener: SpeechListener) {
        self.state.borrow_mut().listener = Some(listener);
    }

    fn start(&self) -> Result<(), SpeechError> {
        #[cfg(target_arch = "wasm32")]
        {
            self.call("start")
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Err(SpeechError::Unsupported)
        }
    }

    fn stop(&self) {
        #[cfg(target_arch = "wasm32")]
        {
            let _ = self.call("stop");
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn native_targets_have_no_engine() {
        let engine = WebSpeechRecognition::new();
        engine.set_listener(Rc::new(|_| {}));
        assert!(!engine.is_supported());
        assert_eq!(engine.start(), Err(SpeechError::Unsupported));
        engine.stop();
    }
}
