use super::*;
use crate::{assistant::handle_listener_event, voice::ListenerEvent};

#[component]
pub(super) fn VoiceAssistant() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let listening = create_memo(move |_| runtime.voice.with(|voice| voice.is_listening()));
    let feedback = move || {
        runtime
            .feedback
            .with(|feedback| feedback.text().map(str::to_string))
    };
    let transcript = move || runtime.transcript.get();

    view! {
        <button
            class=move || if listening.get() { "voice-assistant-btn listening" } else { "voice-assistant-btn" }
            title=move || {
                if listening.get() {
                    "Click to stop listening"
                } else {
                    "Click to start voice commands"
                }
            }
            aria-pressed=move || listening.get().to_string()
            on:click=move |_| handle_listener_event(runtime, ListenerEvent::Toggle)
        >
            <span class=move || if listening.get() { "icon-mic" } else { "icon-mic-off" } aria-hidden="true" />
            <Show when=move || listening.get() fallback=|| ()>
                <span class="pulse-ring" />
            </Show>
        </button>

        <Show when=move || feedback().is_some() || transcript().is_some() fallback=|| ()>
            <div class="voice-feedback" role="status" aria-live="polite">
                {move || feedback().map(|text| view! { <div class="feedback-text">{text}</div> })}
                {move || {
                    transcript()
                        .map(|text| view! { <div class="transcript-text">{format!("\"{text}\"")}</div> })
                }}
            </div>
        </Show>
    }
}
