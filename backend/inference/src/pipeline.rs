//! Diagnosis pipeline: encoded image in, diagnosis record out.

use std::sync::Arc;

use tracing::info;

use plantguard_core::{DiagnosisError, DiagnosisRecord, EncodedImage};

use crate::normalize::normalize;
use crate::prompt::DIAGNOSIS_PROMPT;
use crate::provider::{VisionProvider, VisionRequest};

pub struct DiagnosisPipeline {
    provider: Arc<dyn VisionProvider>,
}

impl DiagnosisPipeline {
    pub fn new(provider: Arc<dyn VisionProvider>) -> Self {
        Self { provider }
    }

    /// Send the image with the fixed diagnostic prompt and normalize the
    /// reply. One awaited call, no retries; every failure is a
    /// `DiagnosisError` for the caller to surface.
    pub async fn analyze(
        &self,
        image: &EncodedImage,
    ) -> Result<DiagnosisRecord, DiagnosisError> {
        let request = VisionRequest {
            prompt: DIAGNOSIS_PROMPT.to_string(),
            media_type: image.media_type.clone(),
            data: image.data.clone(),
        };

        info!(provider = self.provider.name(), "analyzing image");
        let text = self.provider.generate(&request).await?;
        normalize(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockProvider;
    use plantguard_core::HealthStatus;

    fn image() -> EncodedImage {
        EncodedImage {
            media_type: "image/jpeg".into(),
            data: "aGVsbG8=".into(),
        }
    }

    #[tokio::test]
    async fn analyze_returns_record_for_valid_reply() {
        let pipeline = DiagnosisPipeline::new(Arc::new(MockProvider::with_reply(
            r#"{"status":"Healthy","diseaseName":"None","symptoms":[],
                "treatment":[],"prevention":[],"description":"Looks good"}"#,
        )));
        let record = pipeline.analyze(&image()).await.unwrap();
        assert_eq!(record.status, HealthStatus::Healthy);
        assert_eq!(record.description, "Looks good");
        assert!(record.treatment.is_empty());
    }

    #[tokio::test]
    async fn analyze_tolerates_fenced_reply() {
        let pipeline = DiagnosisPipeline::new(Arc::new(MockProvider::with_reply(
            "```json\n{\"status\":\"Diseased\",\"diseaseName\":\"Blight\"}\n```",
        )));
        let record = pipeline.analyze(&image()).await.unwrap();
        assert_eq!(record.disease_name, "Blight");
    }

    #[tokio::test]
    async fn analyze_propagates_provider_failure() {
        let pipeline = DiagnosisPipeline::new(Arc::new(MockProvider::failing(|| {
            DiagnosisError::EmptyResponse
        })));
        let err = pipeline.analyze(&image()).await.unwrap_err();
        assert!(matches!(err, DiagnosisError::EmptyResponse));
    }

    #[tokio::test]
    async fn analyze_propagates_malformed_reply() {
        let pipeline =
            DiagnosisPipeline::new(Arc::new(MockProvider::with_reply("sorry, no idea")));
        let err = pipeline.analyze(&image()).await.unwrap_err();
        assert!(matches!(err, DiagnosisError::MalformedJson(_)));
    }
}
