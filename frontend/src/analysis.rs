use crate::api;
use crate::components;
use crate::error::AnalysisError;
use crate::session::{AnalysisSession, SubmitTicket};
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::AnalysisResponse;
use wasm_bindgen_futures::spawn_local;
use web_sys::DragEvent;
use yew::prelude::*;

/// The selected upload plus its object-URL preview. Revoking happens on drop,
/// so replacing the input releases the previous preview URL.
pub struct SelectedImage {
    pub file: GlooFile,
    pub preview: ObjectUrl,
}

impl SelectedImage {
    pub fn new(file: GlooFile) -> Self {
        let preview = ObjectUrl::from(file.clone());
        Self { file, preview }
    }
}

pub enum Msg {
    // Input capture
    InputSelected(GlooFile),
    IntakeRejected(String),
    PromptsChanged(String),
    HandleDrop(DragEvent),
    SetDragging(bool),

    // Analysis operations
    Submit,
    AnalysisOutcome(SubmitTicket, Result<AnalysisResponse, AnalysisError>),
    Reset,
}

/// One upload-analyze-review cycle, driven by [`AnalysisSession`].
pub struct AnalysisPage {
    pub(crate) session: AnalysisSession<SelectedImage>,
    pub(crate) is_dragging: bool,
    pub(crate) intake_error: Option<String>,
}

impl Component for AnalysisPage {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            session: AnalysisSession::new(),
            is_dragging: false,
            intake_error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::InputSelected(file) => self.handle_input_selected(file),
            Msg::IntakeRejected(message) => {
                self.intake_error = Some(message);
                true
            }
            Msg::PromptsChanged(text) => {
                self.session.set_prompts(text);
                true
            }
            Msg::HandleDrop(event) => self.handle_drop(ctx, event),
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }
            Msg::Submit => self.handle_submit(ctx),
            Msg::AnalysisOutcome(ticket, outcome) => {
                let applied = self.session.complete(ticket, outcome);
                if applied {
                    log::info!("Analysis completed: {}", self.session.status().as_str());
                }
                applied
            }
            Msg::Reset => {
                self.session.reset();
                self.intake_error = None;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="analysis-page">
                { components::upload_section::render_upload_section(self, ctx) }
                { components::utils::render_error_message(self.display_error()) }
                { components::results::render_results(&self.session) }
            </div>
        }
    }
}

impl AnalysisPage {
    fn handle_input_selected(&mut self, file: GlooFile) -> bool {
        log::info!("Selected image: {}", file.name());
        self.session.select_input(SelectedImage::new(file));
        self.intake_error = None;
        true
    }

    fn handle_drop(&mut self, ctx: &Context<Self>, event: DragEvent) -> bool {
        event.prevent_default();
        self.is_dragging = false;

        if let Some(file_list) = event.data_transfer().and_then(|dt| dt.files()) {
            match components::utils::first_image_file(&file_list) {
                Some(file) => ctx.link().send_message(Msg::InputSelected(file)),
                None => {
                    self.intake_error = Some("No valid image file in the drop.".to_string());
                }
            }
        }

        true
    }

    fn handle_submit(&mut self, ctx: &Context<Self>) -> bool {
        // Submitting with nothing selected is silently ignored.
        let Some(file) = self.session.input().map(|img| img.file.clone()) else {
            return false;
        };
        let Some(ticket) = self.session.begin_submit() else {
            return false;
        };
        let prompts = self.session.prompts().to_string();

        let link = ctx.link().clone();
        spawn_local(async move {
            let outcome = api::submit_analysis(&file, &prompts).await;
            link.send_message(Msg::AnalysisOutcome(ticket, outcome));
        });

        true
    }

    /// Preview source for rendering: the server-annotated image when one was
    /// returned, otherwise the object URL of the raw upload.
    pub(crate) fn preview_src(&self) -> Option<String> {
        self.session
            .annotated_image()
            .map(str::to_string)
            .or_else(|| self.session.input().map(|img| img.preview.to_string()))
    }

    fn display_error(&self) -> Option<&str> {
        self.session.error().or(self.intake_error.as_deref())
    }
}
