use image::RgbaImage;

use crate::{
    foundation::{
        core::{Canvas, Rgba8},
        error::{CounterError, CounterResult},
    },
    text::layout::TextExtent,
};

/// CPU rasterizer that draws a laid-out line of text centered on a transparent canvas.
pub struct TextRasterizer {
    canvas: Canvas,
    width: u16,
    height: u16,
}

impl TextRasterizer {
    /// Bind a rasterizer to `canvas`.
    pub fn new(canvas: Canvas) -> CounterResult<Self> {
        let (width, height) = canvas.dims_u16()?;
        Ok(Self {
            canvas,
            width,
            height,
        })
    }

    /// Canvas this rasterizer draws on.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Draw `layout` centered on a fully transparent canvas and return straight-alpha pixels.
    ///
    /// Each run is drawn with the face Parley shaped it with, at the run's line offset and
    /// baseline.
    pub fn draw_centered(&self, layout: &parley::Layout<Rgba8>) -> CounterResult<RgbaImage> {
        let extent = TextExtent::of(layout);
        let (x, y) = centered_origin(self.canvas, extent);

        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((x, y)));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(run.run().font())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.render_to_pixmap(&mut pixmap);

        let mut data = pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut data);

        RgbaImage::from_raw(self.canvas.width, self.canvas.height, data)
            .ok_or_else(|| CounterError::validation("rasterized buffer does not match canvas size"))
    }
}

/// Top-left draw position that centers a box of `extent` on `canvas`, floored to whole pixels.
///
/// Text wider or taller than the canvas gets a negative origin and is clipped symmetrically.
pub fn centered_origin(canvas: Canvas, extent: TextExtent) -> (f64, f64) {
    let x = ((f64::from(canvas.width) - f64::from(extent.width)) / 2.0).floor();
    let y = ((f64::from(canvas.height) - f64::from(extent.height)) / 2.0).floor();
    (x, y)
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        if a == 255 {
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
