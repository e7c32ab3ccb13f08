//! Core slide model, export normalization, and rich-text markup generation
//! for importing slides from an external editor export.

pub mod background;
pub mod convert;
pub mod element;
pub mod error;
pub mod id;
pub mod markup;
pub mod raw;
pub mod types;

pub use background::normalize_background;
pub use convert::{parse_document, ConversionStats, SlideConverter};
pub use element::ElementNormalizer;
pub use error::{Error, Result};
pub use id::{IdGenerator, NanoIdGenerator};
pub use markup::{serialize_content, ContentNode, MarkupSerializer, SpanStyle};
pub use raw::RawRecord;
pub use types::{
    Background, BackgroundImage, Element, ElementKind, ImageSize, ShapeElement, ShapeText,
    ShapeTextAlign, Slide, SlideDocument, TextElement, ThemeDefaults,
};
