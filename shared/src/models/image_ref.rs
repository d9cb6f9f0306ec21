//! Image Reference Model

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

/// Reference to an uploaded image
///
/// `Url` points at the image store. `Inline` carries the base64-encoded
/// bytes directly and is the fallback produced when the image store is
/// unreachable, so an outage never blocks a task submission or a payout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageRef {
    Url { url: String },
    Inline { data: String },
}

impl ImageRef {
    pub fn url(url: impl Into<String>) -> Self {
        ImageRef::Url { url: url.into() }
    }

    /// Base64-encode raw bytes into an inline reference
    pub fn inline_from_bytes(bytes: &[u8]) -> Self {
        ImageRef::Inline {
            data: BASE64.encode(bytes),
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, ImageRef::Inline { .. })
    }

    /// An empty url or empty payload carries no proof value
    pub fn is_empty(&self) -> bool {
        match self {
            ImageRef::Url { url } => url.trim().is_empty(),
            ImageRef::Inline { data } => data.is_empty(),
        }
    }
}
