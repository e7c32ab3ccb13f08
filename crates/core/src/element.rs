//! Slide element normalization.
//!
//! Dispatches on the export's `type` discriminant and fills every missing
//! geometric or styling field with a fixed default. Kinds outside
//! [`ElementKind`] are reported as `None` so callers can skip them.

use std::fmt;
use std::sync::Arc;

use crate::id::{IdGenerator, NanoIdGenerator, ELEMENT_ID_LENGTH};
use crate::markup::MarkupSerializer;
use crate::raw::RawRecord;
use crate::types::{Element, ElementKind, ShapeElement, ShapeText, TextElement, ThemeDefaults};

/// Path of the default square shape, drawn in a 200x200 view box.
pub const DEFAULT_SHAPE_PATH: &str = "M 0 0 L 200 0 L 200 200 L 0 200 Z";

/// Fill of a shape that names none.
pub const DEFAULT_SHAPE_FILL: &str = "#5b9bd5";

const DEFAULT_VIEW_BOX: (f64, f64) = (200.0, 200.0);
const DEFAULT_TEXT_SIZE: (f64, f64) = (100.0, 50.0);
const DEFAULT_SHAPE_SIZE: (f64, f64) = (100.0, 100.0);
const DEFAULT_LINE_HEIGHT: f64 = 1.2;

/// Normalizer from raw export elements to typed elements.
#[derive(Clone)]
pub struct ElementNormalizer {
    ids: Arc<dyn IdGenerator>,
    markup: MarkupSerializer,
}

impl fmt::Debug for ElementNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementNormalizer")
            .field("markup", &self.markup)
            .finish_non_exhaustive()
    }
}

impl Default for ElementNormalizer {
    fn default() -> Self {
        Self {
            ids: Arc::new(NanoIdGenerator::new()),
            markup: MarkupSerializer::new(),
        }
    }
}

impl ElementNormalizer {
    /// Create a normalizer with random ids and verbatim markup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different id source for elements without an id.
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Use a differently configured serializer for text content.
    pub fn with_markup_serializer(mut self, markup: MarkupSerializer) -> Self {
        self.markup = markup;
        self
    }

    /// Normalize one raw element.
    ///
    /// Returns `None` when the element's kind is not recognized.
    pub fn normalize(&self, raw: RawRecord<'_>, theme: &ThemeDefaults) -> Option<Element> {
        let kind = raw.str("type").and_then(ElementKind::from_type)?;

        let element = match kind {
            ElementKind::Text => Element::Text(self.normalize_text(raw, theme)),
            ElementKind::Shape => Element::Shape(self.normalize_shape(raw, theme)),
        };
        Some(element)
    }

    fn normalize_text(&self, raw: RawRecord<'_>, theme: &ThemeDefaults) -> TextElement {
        let (width, height) = DEFAULT_TEXT_SIZE;
        TextElement {
            id: self.element_id(raw),
            left: raw.f64("left").unwrap_or(0.0),
            top: raw.f64("top").unwrap_or(0.0),
            width: raw.f64("width").unwrap_or(width),
            height: raw.f64("height").unwrap_or(height),
            content: self.markup.serialize_value(raw.get("content")),
            rotate: raw.f64("rotate").unwrap_or(0.0),
            default_font_name: raw
                .str("defaultFontName")
                .unwrap_or(theme.font_name.as_str())
                .to_string(),
            default_color: raw
                .color("defaultColor")
                .unwrap_or(theme.font_color.as_str())
                .to_string(),
            line_height: raw.f64("lineHeight").unwrap_or(DEFAULT_LINE_HEIGHT),
            word_space: raw.f64("wordSpace").unwrap_or(0.0),
            vertical: raw.bool("vertical").unwrap_or(false),
        }
    }

    fn normalize_shape(&self, raw: RawRecord<'_>, theme: &ThemeDefaults) -> ShapeElement {
        let (width, height) = DEFAULT_SHAPE_SIZE;
        // Theme fill wins over a plain fill.
        let fill = raw
            .color("themeFill")
            .or_else(|| raw.str("fill"))
            .unwrap_or(DEFAULT_SHAPE_FILL);

        ShapeElement {
            id: self.element_id(raw),
            left: raw.f64("left").unwrap_or(0.0),
            top: raw.f64("top").unwrap_or(0.0),
            width: raw.f64("width").unwrap_or(width),
            height: raw.f64("height").unwrap_or(height),
            view_box: raw.f64_pair("viewBox").unwrap_or(DEFAULT_VIEW_BOX),
            path: raw.str("path").unwrap_or(DEFAULT_SHAPE_PATH).to_string(),
            fill: fill.to_string(),
            fixed_ratio: raw.bool("fixedRatio").unwrap_or(false),
            rotate: raw.f64("rotate").unwrap_or(0.0),
            opacity: raw.f64("opacity").unwrap_or(1.0),
            path_formula: raw.str("pathFormula").map(str::to_string),
            // The export stores a single keypoint; the model holds a list.
            // A zero keypoint means "none".
            keypoints: raw.f64("keypoint").filter(|k| *k != 0.0).map(|k| vec![k]),
            text: ShapeText::from_theme(theme),
        }
    }

    fn element_id(&self, raw: RawRecord<'_>) -> String {
        match raw.non_empty_str("id") {
            Some(id) => id.to_string(),
            None => self.ids.generate(ELEMENT_ID_LENGTH),
        }
    }
}
