pub mod mime_detect;
pub mod upload;

pub use mime_detect::{detect_mime_type, is_image};
pub use upload::{encode_image, reset, submit_file};
