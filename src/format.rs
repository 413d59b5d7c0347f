//! Response formatting for the art endpoint.
//!
//! The model is instructed to emit ASCII art, the separator token, then a
//! one-sentence description. Splitting that back apart is the only reshaping
//! this service does; definitions pass through untouched.

use crate::models::ArtResponse;
use crate::{Error, Result};

/// Token the art prompt asks the model to place between art and description.
pub const SEPARATOR: &str = "---SEPARATOR---";

/// Split raw model output on the first separator occurrence.
///
/// A missing separator is not an error: the whole text becomes `art` and
/// `text` stays empty. A genuinely empty art segment is [`Error::EmptyArt`],
/// even when a description follows the separator.
pub fn split_art(raw: &str) -> Result<ArtResponse> {
    let (art, text) = match raw.split_once(SEPARATOR) {
        Some((art, text)) => (art.trim(), text.trim()),
        None => (raw.trim(), ""),
    };

    if art.is_empty() {
        return Err(Error::EmptyArt);
    }

    Ok(ArtResponse {
        art: art.to_string(),
        text: text.to_string(),
    })
}
