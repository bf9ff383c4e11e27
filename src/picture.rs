use std::{future::Future, io::Cursor, path::Path};

use base64::Engine;
use image::{ImageError, ImageReader};

use crate::error::AppError;

/// Number of characters of a data-URI token kept when displaying it
const DISPLAY_TOKEN_PREFIX: usize = 32;
/// Leading bytes searched for an `<svg` root element
const SVG_SNIFF_LEN: usize = 1024;
const SVG_MIME: &str = "image/svg+xml";

/// Converts raw picture bytes into a displayable token
pub trait PictureEncoder {
    /// Encodes `bytes` into a data-URI token
    fn encode(&self, bytes: Vec<u8>) -> impl Future<Output = Result<String, AppError>>;
}

/// Encodes images as `data:<mime>;base64,<payload>`
#[derive(Debug, Default, Clone, Copy)]
pub struct DataUriEncoder;

impl PictureEncoder for DataUriEncoder {
    async fn encode(&self, bytes: Vec<u8>) -> Result<String, AppError> {
        to_data_uri(&bytes)
    }
}

/// Builds a base64 data-URI for an image payload
pub fn to_data_uri(bytes: &[u8]) -> Result<String, AppError> {
    if bytes.is_empty() {
        return Err(AppError::UnsupportedImage("empty file".to_string()));
    }
    let mime = detect_image_mime(bytes)?;
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{mime};base64,{payload}"))
}

/// Detects the image MIME type of a picture payload
///
/// Raster formats are guessed from magic bytes and their header must decode
/// when a decoder is compiled in. SVG is recognised from its root element.
pub fn detect_image_mime(bytes: &[u8]) -> Result<&'static str, AppError> {
    if is_svg(bytes) {
        return Ok(SVG_MIME);
    }

    let format = image::guess_format(bytes)
        .map_err(|_| AppError::UnsupportedImage("not an image file".to_string()))?;

    match ImageReader::with_format(Cursor::new(bytes), format).into_dimensions() {
        Ok(_) | Err(ImageError::Unsupported(_)) => Ok(format.to_mime_type()),
        Err(e) => Err(AppError::UnsupportedImage(format!(
            "unreadable {} image: {e}",
            format.extensions_str().first().copied().unwrap_or("unknown")
        ))),
    }
}

/// Whether the payload is an SVG document
fn is_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(SVG_SNIFF_LEN)];
    let text = String::from_utf8_lossy(head);
    let text = text.trim_start_matches('\u{FEFF}').trim_start();

    if text.starts_with("<svg") {
        return true;
    }
    (text.starts_with("<?xml") || text.starts_with("<!--") || text.starts_with("<!DOCTYPE svg"))
        && text.contains("<svg")
}

/// Reads a picture file picked by the user
pub async fn read_picture_file(path: &Path) -> Result<Vec<u8>, AppError> {
    Ok(tokio::fs::read(path).await?)
}

/// Shortens data-URI tokens so they fit on one line
pub fn display_token(token: &str) -> String {
    let char_count = token.chars().count();
    if token.starts_with("data:") && char_count > DISPLAY_TOKEN_PREFIX {
        let prefix: String = token.chars().take(DISPLAY_TOKEN_PREFIX).collect();
        format!("{prefix}... ({char_count} chars)")
    } else {
        token.to_string()
    }
}
