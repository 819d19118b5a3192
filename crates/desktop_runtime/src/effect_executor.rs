//! Drains [`crate::RuntimeEffect`]s queued by the dispatch callback.

use leptos::*;

use crate::runtime_context::DesktopRuntimeContext;

/// Installs a reactive effect that hands each queued persistence or diagnostic effect to the host.
pub fn install(runtime: DesktopRuntimeContext) {
    create_effect(move |_| {
        let batch = runtime.effects.get();
        if batch.is_empty() {
            return;
        }
        // Swap the queue out first: effects may dispatch, which appends to a fresh queue.
        runtime.effects.set(Vec::new());

        let host = runtime.host.get_value();
        batch
            .into_iter()
            .for_each(|effect| host.run_runtime_effect(runtime, effect));
    });
}
