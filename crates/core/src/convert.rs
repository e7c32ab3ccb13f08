//! Whole-document conversion built from the background and element normalizers.
//!
//! A document is either a bare array of raw slides or an object with a
//! `slides` array and an optional `theme`. One bad slide or element never
//! aborts the batch: it is defaulted or skipped and counted.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::background::normalize_background;
use crate::element::ElementNormalizer;
use crate::id::{IdGenerator, NanoIdGenerator, ELEMENT_ID_LENGTH};
use crate::markup::MarkupSerializer;
use crate::raw::RawRecord;
use crate::types::{Slide, SlideDocument, ThemeDefaults};
use crate::{Error, Result};

/// Counts gathered while converting a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Slides produced.
    pub slides: usize,
    /// Elements produced.
    pub elements: usize,
    /// Raw elements skipped because their kind was not recognized.
    pub skipped: usize,
}

impl ConversionStats {
    fn add(&mut self, other: ConversionStats) {
        self.slides += other.slides;
        self.elements += other.elements;
        self.skipped += other.skipped;
    }
}

/// Parse export JSON, checking that the top level can hold slides.
pub fn parse_document(input: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(input)?;
    match value {
        Value::Array(_) | Value::Object(_) => Ok(value),
        other => Err(Error::InvalidDocument(format!(
            "expected an array of slides or an object with `slides`, found {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Converter from raw export slides to typed slides.
#[derive(Clone)]
pub struct SlideConverter {
    ids: Arc<dyn IdGenerator>,
    elements: ElementNormalizer,
}

impl fmt::Debug for SlideConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlideConverter")
            .field("elements", &self.elements)
            .finish_non_exhaustive()
    }
}

impl Default for SlideConverter {
    fn default() -> Self {
        let ids: Arc<dyn IdGenerator> = Arc::new(NanoIdGenerator::new());
        Self {
            elements: ElementNormalizer::new().with_id_generator(Arc::clone(&ids)),
            ids,
        }
    }
}

impl SlideConverter {
    /// Create a converter with random ids and verbatim markup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different id source for slides and elements without an id.
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.elements = self.elements.with_id_generator(Arc::clone(&ids));
        self.ids = ids;
        self
    }

    /// Use a differently configured serializer for text content.
    pub fn with_markup_serializer(mut self, markup: MarkupSerializer) -> Self {
        self.elements = self.elements.with_markup_serializer(markup);
        self
    }

    /// Convert one raw slide.
    pub fn convert_slide(&self, raw: RawRecord<'_>, theme: &ThemeDefaults) -> Slide {
        self.convert_slide_with_stats(raw, theme).0
    }

    fn convert_slide_with_stats(
        &self,
        raw: RawRecord<'_>,
        theme: &ThemeDefaults,
    ) -> (Slide, ConversionStats) {
        let id = match raw.non_empty_str("id") {
            Some(id) => id.to_string(),
            None => self.ids.generate(ELEMENT_ID_LENGTH),
        };
        let background =
            normalize_background(raw.record("background").unwrap_or_else(RawRecord::empty));

        let mut stats = ConversionStats {
            slides: 1,
            ..ConversionStats::default()
        };
        let mut elements = Vec::new();

        for value in raw.array("elements").into_iter().flatten() {
            let element_raw = RawRecord::new(value);
            match self.elements.normalize(element_raw, theme) {
                Some(element) => elements.push(element),
                None => {
                    log::debug!(
                        "Skipping element of unrecognized type {:?} on slide {}",
                        element_raw.get("type"),
                        id
                    );
                    stats.skipped += 1;
                }
            }
        }
        stats.elements = elements.len();

        log::debug!(
            "Converted slide {} with {} elements ({} skipped)",
            id,
            stats.elements,
            stats.skipped
        );

        (
            Slide {
                id,
                background,
                elements,
            },
            stats,
        )
    }

    /// Convert a list of raw slides in order.
    pub fn convert_slides(&self, raw_slides: &[Value], theme: &ThemeDefaults) -> Vec<Slide> {
        self.convert_slides_with_stats(raw_slides, theme).0
    }

    fn convert_slides_with_stats(
        &self,
        raw_slides: &[Value],
        theme: &ThemeDefaults,
    ) -> (Vec<Slide>, ConversionStats) {
        let mut stats = ConversionStats::default();
        let slides = raw_slides
            .iter()
            .map(|value| {
                let (slide, slide_stats) =
                    self.convert_slide_with_stats(RawRecord::new(value), theme);
                stats.add(slide_stats);
                slide
            })
            .collect();
        (slides, stats)
    }

    /// Convert a whole export document.
    ///
    /// A `theme` embedded in the document overrides `fallback_theme` field by
    /// field.
    pub fn convert_document(
        &self,
        document: &Value,
        fallback_theme: &ThemeDefaults,
    ) -> (SlideDocument, ConversionStats) {
        let (raw_slides, theme) = match document {
            Value::Array(items) => (items.as_slice(), fallback_theme.clone()),
            other => {
                let raw = RawRecord::new(other);
                let slides = raw.array("slides").map(Vec::as_slice).unwrap_or_default();
                (slides, document_theme(raw, fallback_theme))
            }
        };

        if raw_slides.is_empty() {
            log::warn!("Export document contains no slides");
        }

        let (slides, stats) = self.convert_slides_with_stats(raw_slides, &theme);
        (SlideDocument { slides }, stats)
    }
}

fn document_theme(raw: RawRecord<'_>, fallback: &ThemeDefaults) -> ThemeDefaults {
    let Some(theme) = raw.record("theme") else {
        return fallback.clone();
    };
    ThemeDefaults {
        font_name: theme
            .str("fontName")
            .unwrap_or(fallback.font_name.as_str())
            .to_string(),
        font_color: theme
            .str("fontColor")
            .unwrap_or(fallback.font_color.as_str())
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Background, Element};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingIds(AtomicUsize);

    impl IdGenerator for CountingIds {
        fn generate(&self, _len: usize) -> String {
            format!("gen-{}", self.0.fetch_add(1, Ordering::SeqCst))
        }
    }

    fn converter() -> SlideConverter {
        SlideConverter::new().with_id_generator(Arc::new(CountingIds::default()))
    }

    fn theme() -> ThemeDefaults {
        ThemeDefaults::new("Fallback", "#010101")
    }

    #[test]
    fn test_convert_slide() {
        let raw = json!({
            "id": "slide-1",
            "background": { "type": "solid", "themeColor": { "color": "#eee" } },
            "elements": [
                { "type": "text", "id": "t", "content": [{ "type": "span", "text": "Hi" }] },
                { "type": "image", "src": "a.png" },
                { "type": "shape", "id": "s" }
            ]
        });

        let slide = converter().convert_slide(RawRecord::new(&raw), &theme());

        assert_eq!(slide.id, "slide-1");
        assert_eq!(
            slide.background,
            Background::Solid {
                color: "#eee".to_string()
            }
        );
        let ids: Vec<&str> = slide.elements.iter().map(Element::id).collect();
        assert_eq!(ids, vec!["t", "s"]);
    }

    #[test]
    fn test_slide_defaults() {
        let raw = json!({});
        let slide = converter().convert_slide(RawRecord::new(&raw), &theme());

        assert_eq!(slide.id, "gen-0");
        assert_eq!(
            slide.background,
            Background::Solid {
                color: "#ffffff".to_string()
            }
        );
        assert!(slide.elements.is_empty());
    }

    #[test]
    fn test_ids_are_shared_between_slides_and_elements() {
        let raw = json!([{ "elements": [{ "type": "text" }] }, {}]);
        let slides = converter().convert_slides(raw.as_array().unwrap(), &theme());

        assert_eq!(slides[0].id, "gen-0");
        assert_eq!(slides[0].elements[0].id(), "gen-1");
        assert_eq!(slides[1].id, "gen-2");
    }

    #[test]
    fn test_convert_document_array() {
        let document = json!([
            { "id": "a", "elements": [{ "type": "text" }, { "type": "video" }] },
            "not a slide"
        ]);

        let (converted, stats) = converter().convert_document(&document, &theme());

        assert_eq!(converted.slides.len(), 2);
        assert_eq!(converted.element_count(), 1);
        assert_eq!(
            stats,
            ConversionStats {
                slides: 2,
                elements: 1,
                skipped: 1
            }
        );
        match &converted.slides[0].elements[0] {
            Element::Text(text) => assert_eq!(text.default_font_name, "Fallback"),
            other => panic!("expected text element, got {:?}", other),
        }
    }

    #[test]
    fn test_document_theme_overrides_fallback() {
        let document = json!({
            "theme": { "fontName": "Embedded" },
            "slides": [{ "elements": [{ "type": "text" }, { "type": "shape" }] }]
        });

        let (converted, _) = converter().convert_document(&document, &theme());

        match &converted.slides[0].elements[..] {
            [Element::Text(text), Element::Shape(shape)] => {
                assert_eq!(text.default_font_name, "Embedded");
                assert_eq!(text.default_color, "#010101");
                assert_eq!(shape.text.default_font_name, "Embedded");
            }
            other => panic!("unexpected elements {:?}", other),
        }
    }

    #[test]
    fn test_document_without_slides() {
        let (converted, stats) = converter().convert_document(&json!({ "title": "x" }), &theme());
        assert!(converted.slides.is_empty());
        assert_eq!(stats, ConversionStats::default());
    }

    #[test]
    fn test_parse_document() {
        assert!(parse_document("[]").is_ok());
        assert!(parse_document(r#"{"slides": []}"#).is_ok());
        assert!(matches!(parse_document("{"), Err(Error::JsonError(_))));
        assert!(matches!(parse_document("42"), Err(Error::InvalidDocument(_))));
    }

    #[test]
    fn test_converted_document_serializes() {
        let document = json!([{ "id": "s1", "elements": [{ "type": "shape", "id": "e1", "keypoint": 0.5 }] }]);
        let (converted, _) = converter().convert_document(&document, &theme());

        let value = serde_json::to_value(&converted).unwrap();
        assert_eq!(value["slides"][0]["background"]["type"], "solid");
        assert_eq!(value["slides"][0]["elements"][0]["type"], "shape");
        assert_eq!(value["slides"][0]["elements"][0]["keypoints"], json!([0.5]));
    }
}
