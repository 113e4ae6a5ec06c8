//! Frontend configuration helpers

use latch_core::AuthOptions;
use web_sys::window;

/// Origin of the current page, or an empty string outside a browser
pub fn page_origin() -> String {
    window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}

/// Fill an empty base URL with the page origin so endpoints resolve against
/// the serving host.
pub fn resolve_options(options: AuthOptions) -> AuthOptions {
    if options.base_url.is_empty() {
        options.with_base_url(page_origin())
    } else {
        options
    }
}
