//! Pure mapping from session state to a view description.
//!
//! Nothing here touches a rendering surface; panel visibility and content
//! are described as data so the state machine is testable on its own.

use serde::Serialize;

use plantguard_core::{DiagnosisRecord, ViewState};

/// What the page should show right now.
#[derive(Debug, Serialize)]
pub struct ViewModel {
    /// One of "empty", "previewing", "loading", "result", "error".
    pub view: &'static str,
    /// Data URI of the current image, when one is held.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    /// Whether the analyze control is enabled.
    pub can_analyze: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<DiagnosisRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn view_model(state: &ViewState) -> ViewModel {
    match state {
        ViewState::Empty => ViewModel {
            view: "empty",
            preview: None,
            can_analyze: false,
            report: None,
            error: None,
        },
        ViewState::Previewing(image) => ViewModel {
            view: "previewing",
            preview: Some(image.to_data_uri()),
            can_analyze: true,
            report: None,
            error: None,
        },
        ViewState::Loading(image) => ViewModel {
            view: "loading",
            preview: Some(image.to_data_uri()),
            can_analyze: false,
            report: None,
            error: None,
        },
        // Result and Error keep the preview up so the Remove control (and
        // with it reset) stays reachable.
        ViewState::Result { image, record } => ViewModel {
            view: "result",
            preview: Some(image.to_data_uri()),
            can_analyze: false,
            report: Some(record.clone()),
            error: None,
        },
        ViewState::Error { image, message } => ViewModel {
            view: "error",
            preview: Some(image.to_data_uri()),
            can_analyze: false,
            report: None,
            error: Some(message.clone()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plantguard_core::EncodedImage;

    #[test]
    fn empty_state_disables_analyze() {
        let vm = view_model(&ViewState::Empty);
        assert_eq!(vm.view, "empty");
        assert!(!vm.can_analyze);
        assert!(vm.preview.is_none());
    }

    #[test]
    fn previewing_exposes_data_uri_and_enables_analyze() {
        let state = ViewState::Previewing(EncodedImage {
            media_type: "image/png".into(),
            data: "aGk=".into(),
        });
        let vm = view_model(&state);
        assert_eq!(vm.view, "previewing");
        assert!(vm.can_analyze);
        assert_eq!(vm.preview.as_deref(), Some("data:image/png;base64,aGk="));
    }

    fn png() -> EncodedImage {
        EncodedImage {
            media_type: "image/png".into(),
            data: "aGk=".into(),
        }
    }

    #[test]
    fn error_state_carries_message_and_preview() {
        let state = ViewState::Error {
            image: png(),
            message: "Not a plant".into(),
        };
        let vm = view_model(&state);
        assert_eq!(vm.view, "error");
        assert_eq!(vm.error.as_deref(), Some("Not a plant"));
        assert!(vm.report.is_none());
        assert_eq!(vm.preview.as_deref(), Some("data:image/png;base64,aGk="));
    }

    #[test]
    fn result_state_keeps_preview_for_reset() {
        let record: DiagnosisRecord =
            serde_json::from_str(r#"{"status":"Healthy","diseaseName":"None"}"#).unwrap();
        let state = ViewState::Result {
            image: png(),
            record,
        };
        let vm = view_model(&state);
        assert_eq!(vm.view, "result");
        assert!(vm.report.is_some());
        assert!(!vm.can_analyze);
        assert_eq!(vm.preview.as_deref(), Some("data:image/png;base64,aGk="));
    }

    #[test]
    fn view_model_serializes_without_empty_fields() {
        let json = serde_json::to_value(view_model(&ViewState::Empty)).unwrap();
        assert!(json.get("report").is_none());
        assert!(json.get("error").is_none());
        assert_eq!(json["view"], "empty");
    }
}
