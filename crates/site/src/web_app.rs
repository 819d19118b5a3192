use desktop_runtime::{DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="SnackOS" />
        <Meta name="description" content="A voice-controlled desktop in the browser." />

        <main class="site-root">
            <DesktopEntry />
        </main>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    let host_services = platform_host_web::build_host_services();
    logging::log!(
        "desktop host: {}",
        platform_host_web::host_strategy_name()
    );

    view! {
        <DesktopProvider host_services=host_services>
            <DesktopShell />
        </DesktopProvider>
    }
}
