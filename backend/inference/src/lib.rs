pub mod normalize;
pub mod pipeline;
pub mod prompt;
pub mod provider;

pub use normalize::normalize;
pub use pipeline::DiagnosisPipeline;
pub use provider::{GeminiProvider, MockProvider, VisionProvider, VisionRequest};
