mod analysis;
mod api;
mod auth;
mod components;
mod error;
mod session;

use analysis::AnalysisPage;
use auth::AuthContext;
use components::auth_button::AuthButton;
use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    let token = use_state(auth::stored_token);

    let on_token_change = {
        let token = token.clone();
        Callback::from(move |new_token: Option<String>| {
            auth::persist_token(new_token.as_deref());
            token.set(new_token);
        })
    };

    let auth_ctx = AuthContext {
        token: (*token).clone(),
        on_token_change,
    };

    html! {
        <div class="container">
            { components::header::render_header() }
            <div class="top-right">
                <AuthButton auth={auth_ctx} />
            </div>

            <main class="main-content">
                <AnalysisPage />
            </main>

            <footer class="app-footer">
                <p>{"Farm Vision Dashboard | Rust + WASM"}</p>
            </footer>
        </div>
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<App>::new().render();
}
