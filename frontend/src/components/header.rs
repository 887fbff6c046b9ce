use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-seedling"></i> {" Farm Vision Dashboard"}</h1>
            <p class="subtitle">{"Upload farm images for AI-powered object detection"}</p>
        </header>
    }
}
