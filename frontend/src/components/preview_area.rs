use crate::analysis::AnalysisPage;
use yew::prelude::*;

/// Content of the drop zone: the current preview (annotated once analyzed) or
/// the upload placeholder.
pub fn render_preview(page: &AnalysisPage) -> Html {
    match page.preview_src() {
        Some(src) => {
            let caption = page
                .session
                .input()
                .map(|img| format!("Image loaded - {}", img.file.name()));

            html! {
                <div class="preview">
                    <img
                        id="image-preview"
                        src={src}
                        alt="Image Preview"
                        style="max-width: 100%; max-height: 400px; object-fit: contain;"
                    />
                    {
                        if let Some(caption) = caption {
                            html! { <p class="preview-caption">{ caption }</p> }
                        } else {
                            html! {}
                        }
                    }
                </div>
            }
        }
        None => html! {
            <div class="upload-placeholder">
                <i class="fa-solid fa-camera"></i>
                <p>{"Drop your image here, or click to browse"}</p>
                <p class="file-types">{"Supported formats: JPG, PNG, WEBP, GIF"}</p>
            </div>
        },
    }
}
