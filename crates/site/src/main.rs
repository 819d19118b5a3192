//! Binary entrypoint for the browser-hosted SnackOS desktop.

#[cfg(all(target_arch = "wasm32", feature = "csr"))]
fn main() {
    site::mount();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!(
        "site_app targets the browser. Build it for wasm32 with the `csr` feature (for example with `trunk serve`)."
    );
}
