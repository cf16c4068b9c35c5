use std::collections::HashMap;

use kurbo::{Affine, BezPath, PathEl, Shape};

use crate::foundation::core::{Rect, Rgba8, RoundedRect};
use crate::foundation::error::{CardError, CardResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::layout::geometry::CardGeometry;
use crate::layout::solver::ParagraphGeometry;
use crate::render::backend::{ExportRaster, RenderRequest, Renderer, raster_size};
use crate::text::engine::{FontSource, LINE_HEIGHT, TextBrush, TextLayoutEngine};

const PATH_TOLERANCE: f64 = 0.1;

/// Author line opacity applied on top of the theme's text alpha.
pub const AUTHOR_OPACITY: f64 = 0.75;
/// Extra tracking of the author line, in em.
pub const AUTHOR_LETTER_SPACING_EM: f32 = 0.05;
/// Em dash leading the author line.
pub const AUTHOR_DASH: char = '\u{2014}';

/// CPU raster renderer powered by `vello_cpu`.
///
/// Draw order: transparent clear, rounded frame, rounded card, then paragraphs and the
/// optional author line clipped to the card's content box.
pub struct CpuRenderer {
    engine: TextLayoutEngine,
    ctx: Option<vello_cpu::RenderContext>,
    fonts: HashMap<(u64, u32), vello_cpu::peniko::FontData>,
}

impl Default for CpuRenderer {
    fn default() -> Self {
        Self::new(FontSource::Generic)
    }
}

impl CpuRenderer {
    pub fn new(source: FontSource) -> Self {
        Self {
            engine: TextLayoutEngine::new(source),
            ctx: None,
            fonts: HashMap::new(),
        }
    }

    /// Borrow the text engine (font status, diagnostics).
    pub fn engine(&self) -> &TextLayoutEngine {
        &self.engine
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> CardResult<R>,
    ) -> CardResult<R> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn draw_paragraph(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        para: &ParagraphGeometry,
        origin: Affine,
        content_width: f64,
        brush: TextBrush,
    ) -> CardResult<()> {
        if para.text.is_empty() {
            return Ok(());
        }
        let layout = self.engine.layout_paragraph(
            &para.text,
            para.font_size as f32,
            content_width as f32,
            brush,
        )?;
        let pitch = para.font_size as f32 * LINE_HEIGHT;
        self.fill_layout(ctx, &layout, origin, pitch, brush);
        Ok(())
    }

    /// Draw the dashed author line right-aligned on the last line box of the content area.
    fn draw_author(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        author: &str,
        geometry: &CardGeometry,
        scale: Affine,
        color: Rgba8,
    ) -> CardResult<()> {
        let size = geometry.author_font_size();
        let mut brush = TextBrush::from(color);
        brush.a = (f64::from(brush.a) * AUTHOR_OPACITY).round() as u8;

        let line = format!("{AUTHOR_DASH} {author}");
        let layout =
            self.engine
                .layout_line(&line, size as f32, AUTHOR_LETTER_SPACING_EM, brush)?;
        let pitch = size * f64::from(LINE_HEIGHT);
        let content = geometry.content_rect();
        let x = content.x1 - f64::from(layout.width());
        let origin = scale * Affine::translate((x, content.y1 - pitch));
        self.fill_layout(ctx, &layout, origin, pitch as f32, brush);
        Ok(())
    }

    fn fill_layout(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        layout: &parley::Layout<TextBrush>,
        origin: Affine,
        pitch: f32,
        brush: TextBrush,
    ) {
        ctx.set_transform(affine_to_cpu(origin));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            brush.r, brush.g, brush.b, brush.a,
        ));
        for (i, line) in layout.lines().enumerate() {
            let m = line.metrics();
            // Center the glyph box inside a line box of `pitch`, like CSS half-leading.
            let baseline = i as f32 * pitch + (pitch - (m.ascent + m.descent)) * 0.5 + m.ascent;
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let shift = baseline - run.baseline();
                let run_font = run.run().font();
                let font = self
                    .fonts
                    .entry((run_font.data.id(), run_font.index))
                    .or_insert_with(|| {
                        vello_cpu::peniko::FontData::new(
                            vello_cpu::peniko::Blob::from(run_font.data.data().to_vec()),
                            run_font.index,
                        )
                    })
                    .clone();
                let glyphs: Vec<vello_cpu::Glyph> = run
                    .positioned_glyphs()
                    .map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y + shift,
                    })
                    .collect();
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs.into_iter());
            }
        }
    }
}

impl Renderer for CpuRenderer {
    #[tracing::instrument(
        skip(self, req),
        fields(paragraphs = req.layout.paragraphs.len(), scale = req.scale)
    )]
    fn render(&mut self, req: &RenderRequest<'_>) -> CardResult<ExportRaster> {
        let g = req.geometry;
        let (width, height) = raster_size(g.frame_size(), req.scale)?;
        self.engine.ensure_fonts();

        let scale = Affine::scale(req.scale);
        let content = g.content_rect();
        let text_brush = TextBrush::from(req.theme.text_color);

        let mut data = self.with_ctx_mut(width, height, |this, ctx| {
            ctx.set_transform(affine_to_cpu(scale));
            fill_rounded(
                ctx,
                g.frame_rect(),
                g.frame_radius,
                req.theme.border_background,
            );
            fill_rounded(ctx, g.card_rect(), g.card_radius, req.theme.card_background);

            ctx.push_clip_layer(&bezpath_to_cpu(&content.to_path(PATH_TOLERANCE)));
            for para in &req.layout.paragraphs {
                let origin = scale * Affine::translate((content.x0, content.y0 + para.top));
                this.draw_paragraph(ctx, para, origin, content.width(), text_brush)?;
            }
            if let Some(author) = req.author.map(str::trim).filter(|a| !a.is_empty()) {
                this.draw_author(ctx, author, g, scale, req.theme.text_color)?;
            }
            ctx.pop_layer();

            ctx.flush();
            let mut pixmap = vello_cpu::Pixmap::new(width, height);
            ctx.render_to_pixmap(&mut pixmap);
            Ok(pixmap.data_as_u8_slice().to_vec())
        })?;

        unpremultiply_rgba8_in_place(&mut data);
        ExportRaster::new(u32::from(width), u32::from(height), data)
            .map_err(|e| CardError::render(format!("capture produced a malformed surface: {e}")))
    }
}

fn fill_rounded(ctx: &mut vello_cpu::RenderContext, rect: Rect, radius: f64, color: Rgba8) {
    let shape = RoundedRect::from_rect(rect, radius);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
    ctx.fill_path(&bezpath_to_cpu(&shape.to_path(PATH_TOLERANCE)));
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
