use std::path::Path;

use parley::fontique::{Blob, Collection, CollectionOptions, SourceCache};

use crate::foundation::{
    core::Rgba8,
    error::{CounterError, CounterResult},
};

/// Parley-backed text shaping for a single font file.
///
/// The font is registered once at construction into a collection with system fonts disabled, so
/// every [`TextLayoutEngine::layout_plain`] call shapes against that one face. Characters the
/// font lacks come out as its `.notdef` glyph rather than a substitute from another font.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    family_name: String,
    font_blob: Blob<u8>,
}

impl TextLayoutEngine {
    /// Read and register the font at `path`.
    pub fn from_font_file(path: &Path) -> CounterResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            CounterError::font_load(format!("cannot open font '{}': {e}", path.display()))
        })?;
        Self::from_font_bytes(bytes).map_err(|e| match e {
            CounterError::FontLoad(msg) => {
                CounterError::font_load(format!("'{}': {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Register a font from in-memory TrueType/OpenType bytes.
    pub fn from_font_bytes(bytes: Vec<u8>) -> CounterResult<Self> {
        let mut font_ctx = parley::FontContext {
            collection: Collection::new(CollectionOptions {
                shared: false,
                system_fonts: false,
            }),
            source_cache: SourceCache::default(),
        };
        let font_blob = Blob::from(bytes);

        let families = font_ctx.collection.register_fonts(font_blob.clone(), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| CounterError::font_load("no font families registered from font bytes"))?;

        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CounterError::font_load("registered font family has no name"))?
            .to_string();

        tracing::debug!(family = %family_name, bytes = font_blob.len(), "registered font");

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font_blob,
        })
    }

    /// Family name resolved from the font's name table.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Raw bytes of the registered font.
    pub fn font_bytes(&self) -> &[u8] {
        self.font_blob.data()
    }

    /// The registered face. Every glyph run produced by this engine references it.
    pub fn font_data(&self) -> parley::FontData {
        parley::FontData::new(self.font_blob.clone(), 0)
    }

    /// Shape and lay out a single unwrapped line of text.
    pub fn layout_plain(
        &mut self,
        text: &str,
        size_px: f32,
        brush: Rgba8,
    ) -> CounterResult<parley::Layout<Rgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CounterError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Extent of a laid-out line, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextExtent {
    /// Advance width of the line.
    pub width: f32,
    /// Line height (ascent + descent + leading).
    pub height: f32,
}

impl TextExtent {
    /// Measure a Parley layout.
    pub fn of(layout: &parley::Layout<Rgba8>) -> Self {
        Self {
            width: layout.width(),
            height: layout.height(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;
