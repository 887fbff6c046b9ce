use crate::analysis::SelectedImage;
use crate::session::AnalysisSession;
use shared::Prediction;
use yew::prelude::*;

pub fn render_results(session: &AnalysisSession<SelectedImage>) -> Html {
    if !session.has_analyzed() {
        return html! {
            <div class="results-container empty">
                <h3>{"No Analysis Yet"}</h3>
                <p>{"Upload an image and click \"Analyze\" to see detection results"}</p>
            </div>
        };
    }

    let predictions = session.predictions();

    html! {
        <div class="results-container">
            <div class="result-header">
                <h2>
                    <i class="fa-solid fa-bullseye"></i>
                    { format!(" {} Objects Detected", predictions.len()) }
                </h2>
            </div>
            {
                if predictions.is_empty() {
                    html! {
                        <p class="no-results-message">
                            {"No objects detected matching your prompts"}
                        </p>
                    }
                } else {
                    html! {
                        <div class="prediction-grid">
                            { for predictions.iter().map(render_prediction_card) }
                        </div>
                    }
                }
            }
        </div>
    }
}

fn render_prediction_card(prediction: &Prediction) -> Html {
    html! {
        <div class="prediction-card">
            <div class="prediction-crop">
                <img src={prediction.crop.clone()} alt={prediction.label.clone()} />
            </div>
            <span class="prediction-label">{ &prediction.label }</span>
            <span class="prediction-score">
                { format!("{:.0}% match", prediction.score * 100.0) }
            </span>
        </div>
    }
}
