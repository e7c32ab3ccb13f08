//! Domain types for the typed slide model consumed by the renderer.

use serde::{Deserialize, Serialize};

/// Theme-level fallbacks for text styling, resolved by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeDefaults {
    /// Font used when an element names none.
    pub font_name: String,

    /// Text color used when an element names none.
    pub font_color: String,
}

impl ThemeDefaults {
    /// Create theme defaults from a font name and color.
    pub fn new(font_name: impl Into<String>, font_color: impl Into<String>) -> Self {
        Self {
            font_name: font_name.into(),
            font_color: font_color.into(),
        }
    }
}

impl Default for ThemeDefaults {
    fn default() -> Self {
        Self {
            font_name: String::new(),
            font_color: "#333".to_string(),
        }
    }
}

/// How a background image is fitted to the slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    #[default]
    Cover,
    Contain,
    Repeat,
    /// Any other sizing keyword, passed through untouched.
    #[serde(untagged)]
    Other(String),
}

impl ImageSize {
    /// Parse a sizing keyword from the export.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "cover" => Self::Cover,
            "contain" => Self::Contain,
            "repeat" => Self::Repeat,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Image source of an image background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundImage {
    pub src: String,
    pub size: ImageSize,
}

/// Slide background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Background {
    Image { image: BackgroundImage },
    Solid { color: String },
}

/// The element kinds this importer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Text,
    Shape,
}

impl ElementKind {
    /// Detect the kind from the export's `type` discriminant.
    pub fn from_type(kind: &str) -> Option<Self> {
        match kind {
            "text" => Some(Self::Text),
            "shape" => Some(Self::Shape),
            _ => None,
        }
    }
}

/// A rich-text box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub id: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Flat markup produced from the export's content tree.
    pub content: String,
    pub rotate: f64,
    pub default_font_name: String,
    pub default_color: String,
    pub line_height: f64,
    pub word_space: f64,
    pub vertical: bool,
}

/// Placement of the text inside a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeTextAlign {
    Top,
    Middle,
    Bottom,
}

/// Text block carried by every shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeText {
    pub content: String,
    pub default_font_name: String,
    pub default_color: String,
    pub align: ShapeTextAlign,
}

impl ShapeText {
    /// An empty, vertically centered text block styled from the theme.
    pub fn from_theme(theme: &ThemeDefaults) -> Self {
        Self {
            content: String::new(),
            default_font_name: theme.font_name.clone(),
            default_color: theme.font_color.clone(),
            align: ShapeTextAlign::Middle,
        }
    }
}

/// A vector shape drawn from an SVG path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeElement {
    pub id: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub view_box: (f64, f64),
    pub path: String,
    pub fill: String,
    pub fixed_ratio: bool,
    pub rotate: f64,
    pub opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keypoints: Option<Vec<f64>>,
    pub text: ShapeText,
}

/// A typed slide element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Text(TextElement),
    Shape(ShapeElement),
}

impl Element {
    /// The element's identifier.
    pub fn id(&self) -> &str {
        match self {
            Element::Text(text) => &text.id,
            Element::Shape(shape) => &shape.id,
        }
    }
}

/// A converted slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub id: String,
    pub background: Background,
    pub elements: Vec<Element>,
}

/// Every slide converted from one export document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideDocument {
    pub slides: Vec<Slide>,
}

impl SlideDocument {
    /// Total number of elements across all slides.
    pub fn element_count(&self) -> usize {
        self.slides.iter().map(|s| s.elements.len()).sum()
    }
}
