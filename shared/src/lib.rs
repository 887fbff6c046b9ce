use serde::{Deserialize, Serialize};

/// One detection reported by the prediction endpoint.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub score: f32,
    /// Pixel coordinates [x0, y0, x1, y1] of the detection in the uploaded image.
    #[serde(rename = "box", default)]
    pub bounding_box: Option<[f32; 4]>,
    /// Data URL of the cropped detection.
    pub crop: String,
}

/// Body returned by `POST /predict`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AnalysisResponse {
    pub predictions: Vec<Prediction>,
    #[serde(default)]
    pub count: Option<usize>,
    /// Server-annotated copy of the upload (bounding boxes drawn in), as a data URL.
    #[serde(default)]
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_response() {
        let body = r#"{
            "predictions": [
                {"label": "apple", "score": 0.92, "box": [10.0, 20.0, 110.0, 120.0], "crop": "data:image/jpeg;base64,AAAA"}
            ],
            "count": 1,
            "image": "data:image/jpeg;base64,BBBB"
        }"#;

        let response: AnalysisResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.predictions.len(), 1);
        assert_eq!(response.predictions[0].label, "apple");
        assert_eq!(response.predictions[0].score, 0.92);
        assert_eq!(
            response.predictions[0].bounding_box,
            Some([10.0, 20.0, 110.0, 120.0])
        );
        assert_eq!(response.count, Some(1));
        assert!(response.image.is_some());
    }

    #[test]
    fn optional_fields_default_to_none() {
        let body = r#"{"predictions": [{"label": "pest", "score": 0.71, "crop": "c.png"}]}"#;

        let response: AnalysisResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.count, None);
        assert_eq!(response.image, None);
        assert_eq!(response.predictions[0].bounding_box, None);
    }

    #[test]
    fn empty_prediction_list_is_valid() {
        let response: AnalysisResponse = serde_json::from_str(r#"{"predictions": []}"#).unwrap();
        assert!(response.predictions.is_empty());
    }
}
