pub mod error;
pub mod state;
pub mod types;

pub use error::DiagnosisError;
pub use state::{Session, ViewState};
pub use types::{DiagnosisRecord, EncodedImage, HealthStatus};
