//! Session state machine.
//!
//! The page-visible lifecycle is Empty → Previewing → Loading → Result or
//! Error, with reset returning to Empty from anywhere. The session owns the
//! single current-image slot, so there is no hidden shared state to race on.

use tracing::debug;

use crate::error::DiagnosisError;
use crate::types::{DiagnosisRecord, EncodedImage, HealthStatus};

/// Which panel of the page is live. Exactly one at a time.
///
/// Result and Error keep the image so the page can leave the preview (and
/// its Remove control) visible; reset stays reachable from every state.
#[derive(Debug, Clone)]
pub enum ViewState {
    Empty,
    Previewing(EncodedImage),
    Loading(EncodedImage),
    Result {
        image: EncodedImage,
        record: DiagnosisRecord,
    },
    Error {
        image: EncodedImage,
        message: String,
    },
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Previewing(_) => "previewing",
            Self::Loading(_) => "loading",
            Self::Result { .. } => "result",
            Self::Error { .. } => "error",
        }
    }
}

/// A single user's diagnosis session: the current image and view state.
#[derive(Debug)]
pub struct Session {
    state: ViewState,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: ViewState::Empty,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Current image, if one is held (every state but Empty).
    pub fn image(&self) -> Option<&EncodedImage> {
        match &self.state {
            ViewState::Empty => None,
            ViewState::Previewing(img)
            | ViewState::Loading(img)
            | ViewState::Result { image: img, .. }
            | ViewState::Error { image: img, .. } => Some(img),
        }
    }

    /// Store a freshly encoded image: Empty → Previewing.
    ///
    /// Choosing a new file requires a reset first, so any other starting
    /// state is rejected.
    pub fn preview(&mut self, image: EncodedImage) -> Result<(), DiagnosisError> {
        match self.state {
            ViewState::Empty => {
                debug!(media_type = %image.media_type, "image previewed");
                self.state = ViewState::Previewing(image);
                Ok(())
            }
            _ => Err(DiagnosisError::InvalidTransition {
                from: self.state.name(),
                action: "preview an image",
            }),
        }
    }

    /// Previewing → Loading. Returns the image to analyze; while Loading,
    /// further submissions are rejected, which keeps one request in flight.
    pub fn begin_analysis(&mut self) -> Result<EncodedImage, DiagnosisError> {
        match &self.state {
            ViewState::Previewing(img) => {
                let image = img.clone();
                self.state = ViewState::Loading(image.clone());
                debug!("analysis started");
                Ok(image)
            }
            _ => Err(DiagnosisError::InvalidTransition {
                from: self.state.name(),
                action: "submit for analysis",
            }),
        }
    }

    /// Loading → Result or Error, depending on the pipeline's outcome.
    ///
    /// A record with `status: Error` is the model declining (not a plant,
    /// say) and lands in the Error view with the model's own message.
    pub fn finish(
        &mut self,
        outcome: Result<DiagnosisRecord, DiagnosisError>,
    ) -> Result<(), DiagnosisError> {
        let image = match &self.state {
            ViewState::Loading(img) => img.clone(),
            _ => {
                return Err(DiagnosisError::InvalidTransition {
                    from: self.state.name(),
                    action: "finish analysis",
                })
            }
        };
        self.state = match outcome {
            Ok(record) if record.status == HealthStatus::Error => ViewState::Error {
                image,
                message: record.decline_message(),
            },
            Ok(record) => {
                debug!(status = %record.status, "diagnosis ready");
                ViewState::Result { image, record }
            }
            Err(err) => ViewState::Error {
                image,
                message: err.to_string(),
            },
        };
        Ok(())
    }

    /// Return to Empty, dropping the image and any prior report or error.
    pub fn reset(&mut self) {
        debug!(from = self.state.name(), "session reset");
        self.state = ViewState::Empty;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png() -> EncodedImage {
        EncodedImage {
            media_type: "image/png".into(),
            data: "aGVsbG8=".into(),
        }
    }

    fn healthy() -> DiagnosisRecord {
        serde_json::from_str(r#"{"status":"Healthy","diseaseName":"None"}"#).unwrap()
    }

    #[test]
    fn happy_path_reaches_result() {
        let mut session = Session::new();
        session.preview(png()).unwrap();
        assert_eq!(session.state().name(), "previewing");

        let image = session.begin_analysis().unwrap();
        assert_eq!(image.media_type, "image/png");
        assert_eq!(session.state().name(), "loading");

        session.finish(Ok(healthy())).unwrap();
        assert_eq!(session.state().name(), "result");
    }

    #[test]
    fn submit_without_preview_is_rejected() {
        let mut session = Session::new();
        let err = session.begin_analysis().unwrap_err();
        assert!(matches!(err, DiagnosisError::InvalidTransition { .. }));
        assert_eq!(session.state().name(), "empty");
    }

    #[test]
    fn preview_requires_reset_after_result() {
        let mut session = Session::new();
        session.preview(png()).unwrap();
        session.begin_analysis().unwrap();
        session.finish(Ok(healthy())).unwrap();

        assert!(session.preview(png()).is_err());
        session.reset();
        assert!(session.preview(png()).is_ok());
    }

    #[test]
    fn model_decline_maps_to_error_view() {
        let mut session = Session::new();
        session.preview(png()).unwrap();
        session.begin_analysis().unwrap();

        let record: DiagnosisRecord =
            serde_json::from_str(r#"{"status":"Error","diseaseName":"Not a plant"}"#)
                .unwrap();
        session.finish(Ok(record)).unwrap();
        match session.state() {
            ViewState::Error { message, .. } => assert_eq!(message, "Not a plant"),
            other => panic!("expected error view, got {}", other.name()),
        }
    }

    #[test]
    fn pipeline_failure_maps_to_error_view() {
        let mut session = Session::new();
        session.preview(png()).unwrap();
        session.begin_analysis().unwrap();
        session.finish(Err(DiagnosisError::EmptyResponse)).unwrap();
        match session.state() {
            ViewState::Error { message, .. } => {
                assert_eq!(message, "empty response from AI")
            }
            other => panic!("expected error view, got {}", other.name()),
        }
    }

    #[test]
    fn result_and_error_keep_the_image() {
        let mut session = Session::new();
        session.preview(png()).unwrap();
        session.begin_analysis().unwrap();
        session.finish(Ok(healthy())).unwrap();
        assert_eq!(session.image(), Some(&png()));

        let mut session = Session::new();
        session.preview(png()).unwrap();
        session.begin_analysis().unwrap();
        session.finish(Err(DiagnosisError::EmptyResponse)).unwrap();
        assert_eq!(session.image(), Some(&png()));
    }

    #[test]
    fn reset_clears_result() {
        let mut session = Session::new();
        session.preview(png()).unwrap();
        session.begin_analysis().unwrap();
        session.finish(Ok(healthy())).unwrap();

        session.reset();
        assert_eq!(session.state().name(), "empty");
        assert!(session.image().is_none());
    }
}
