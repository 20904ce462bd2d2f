//! Upload/preview manager.
//!
//! Validates an incoming file's media type, base64-encodes its bytes, and
//! drives the session from Empty to Previewing. No network activity happens
//! here.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};
use bytes::Bytes;
use tracing::info;

use plantguard_core::{DiagnosisError, EncodedImage, Session};

use crate::mime_detect::{detect_mime_type, is_image};

/// Encode raw image bytes as base64 with their media type.
pub fn encode_image(media_type: &str, bytes: &[u8]) -> EncodedImage {
    EncodedImage {
        media_type: media_type.to_string(),
        data: STANDARD.encode(bytes),
    }
}

/// Accept a file for preview.
///
/// The declared MIME wins when present; otherwise it is detected from the
/// filename extension. Non-image types fail with `InvalidMediaType` and the
/// session is left untouched.
pub fn submit_file(
    session: &mut Session,
    filename: &str,
    declared_mime: Option<&str>,
    bytes: Bytes,
) -> Result<(), DiagnosisError> {
    let mime = match declared_mime {
        Some(m) if !m.is_empty() && m != "application/octet-stream" => m.to_string(),
        _ => detect_mime_type(Path::new(filename)).to_string(),
    };

    if !is_image(&mime) {
        return Err(DiagnosisError::InvalidMediaType(mime));
    }

    info!(filename, mime = %mime, size = bytes.len(), "accepted upload");
    session.preview(encode_image(&mime, &bytes))
}

/// Clear the current image and any prior report, returning to Empty.
pub fn reset(session: &mut Session) {
    session.reset();
}
