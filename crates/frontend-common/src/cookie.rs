//! Cookie jar backed by `document.cookie`

use latch_core::{CookieJar, CoreError, CoreResult};
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

/// The browser's cookie jar for the current document
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentCookieJar;

impl DocumentCookieJar {
    pub const fn new() -> Self {
        Self
    }
}

fn html_document() -> CoreResult<HtmlDocument> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| CoreError::cookie_jar("no document available"))?
        .dyn_into::<HtmlDocument>()
        .map_err(|_| CoreError::cookie_jar("document is not an HTML document"))
}

impl CookieJar for DocumentCookieJar {
    fn cookie_string(&self) -> CoreResult<String> {
        html_document()?
            .cookie()
            .map_err(|error| CoreError::cookie_jar(format!("{error:?}")))
    }

    fn write(&self, cookie: &str) -> CoreResult<()> {
        html_document()?
            .set_cookie(cookie)
            .map_err(|error| CoreError::cookie_jar(format!("{error:?}")))
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use latch_core::cookie::{CookieOptions, erase_cookie, get_cookie, set_cookie};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn document_cookie_round_trip() {
        let jar = DocumentCookieJar::new();
        set_cookie(&jar, "latchTest", "a; b=c", &CookieOptions::new()).unwrap();
        assert_eq!(get_cookie(&jar, "latchTest").as_deref(), Some("a; b=c"));

        erase_cookie(&jar, "latchTest").unwrap();
        assert_eq!(get_cookie(&jar, "latchTest"), None);
    }
}
