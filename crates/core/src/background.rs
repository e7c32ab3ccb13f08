//! Slide background normalization.

use crate::raw::RawRecord;
use crate::types::{Background, BackgroundImage, ImageSize};

/// Color of a slide whose background is missing or unreadable.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";

/// Map a raw background record to a typed background.
///
/// An `image` background needs a non-empty `image` source; anything else,
/// including malformed input, becomes a solid fill.
pub fn normalize_background(raw: RawRecord<'_>) -> Background {
    if raw.str("type") == Some("image") {
        if let Some(src) = raw.non_empty_str("image") {
            return Background::Image {
                image: BackgroundImage {
                    src: src.to_string(),
                    size: raw
                        .str("imageSize")
                        .map(ImageSize::from_keyword)
                        .unwrap_or_default(),
                },
            };
        }
    }

    Background::Solid {
        color: raw
            .color("themeColor")
            .unwrap_or(DEFAULT_BACKGROUND_COLOR)
            .to_string(),
    }
}
