use crate::analysis::{AnalysisPage, Msg};
use crate::components::preview_area;
use crate::components::utils::{debounce, first_image_file};
use crate::session::SessionStatus;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

pub fn render_upload_section(page: &AnalysisPage, ctx: &Context<AnalysisPage>) -> Html {
    let link = ctx.link();

    let handle_change = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let picked = input.files().as_ref().and_then(first_image_file);

        input.set_value("");

        match picked {
            Some(file) => Msg::InputSelected(file),
            None => Msg::IntakeRejected("No valid image file selected.".into()),
        }
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);

    let trigger_file_input = Callback::from(|_| {
        if let Some(input) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("file-input"))
        {
            if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
                html_input.click();
            }
        }
    });

    let handle_prompts = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::PromptsChanged(input.value())
    });

    let submitting = page.session.status() == SessionStatus::Submitting;
    let can_submit = page.session.input().is_some() && !submitting;

    html! {
        <div class="upload-section">
            <input
                type="file"
                id="file-input"
                accept="image/*"
                style="display: none;"
                onchange={handle_change}
            />

            <div
                id="drop-zone"
                class={classes!("upload-area", page.is_dragging.then_some("drag-over"))}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={debounce(300, {
                    let trigger_file_input = trigger_file_input.clone();
                    move || trigger_file_input.emit(())
                })}
            >
                { preview_area::render_preview(page) }
            </div>

            <div class="prompt-field">
                <label for="prompt-input">{"Detection Prompts"}</label>
                <input
                    id="prompt-input"
                    type="text"
                    value={page.session.prompts().to_string()}
                    oninput={handle_prompts}
                    placeholder="apple, orange, tomato, pest, disease..."
                />
                <p class="field-hint">{"Comma-separated list of objects to detect in the image"}</p>
            </div>

            <div class="button-container">
                <button
                    class="analyze-btn"
                    disabled={!can_submit}
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.callback(|_| Msg::Submit).emit(())
                    })}
                >
                    { render_submit_button_content(submitting) }
                </button>
                <button
                    class="analyze-btn"
                    style="background-color: var(--danger-color);"
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.callback(|_| Msg::Reset).emit(())
                    })}
                >
                    <i class="fa-solid fa-trash"></i>{" Clear"}
                </button>
            </div>
        </div>
    }
}

fn render_submit_button_content(submitting: bool) -> Html {
    if submitting {
        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Analyzing..."}</> }
    } else {
        html! { <><i class="fa-solid fa-magnifying-glass"></i>{" Analyze Image"}</> }
    }
}
