mod app;
mod components;

use app::App;

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    latch_frontend_common::logging::init();
    yew::Renderer::<App>::new().render();
}
