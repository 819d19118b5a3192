//! `setTimeout`-backed [`TaskScheduler`].

use platform_host::{DeferredTask, TaskScheduler};

#[derive(Debug, Clone, Copy, Default)]
/// Schedules tasks with `window.setTimeout`. Non-wasm targets drop tasks.
pub struct WebScheduler;

impl TaskScheduler for WebScheduler {
    fn schedule(&self, delay_ms: u32, task: DeferredTask) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::{closure::Closure, JsCast};

            let window = web_sys::window().ok_or_else(|| "no window object".to_string())?;
            let callback = Closure::once_into_js(move || task());
            let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);
            window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    callback.unchecked_ref(),
                    timeout,
                )
                .map(|_| ())
                .map_err(|err| format!("setTimeout failed: {err:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (delay_ms, task);
            Ok(())
        }
    }
}
