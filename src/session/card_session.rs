use crate::export::png::encode_png;
use crate::export::sink::{
    ClipboardImage, ClipboardSink, DownloadSink, ExportError, ExportMode, ExportOpts,
    ExportReport, InMemoryClipboard,
};
use crate::export::trim::trim_transparent;
use crate::foundation::core::{HostContext, Orientation};
use crate::foundation::error::{CardError, CardResult};
use crate::layout::geometry::CardGeometry;
use crate::layout::sampler::SeededRng;
use crate::layout::solver::{ParagraphGeometry, SolvedLayout, SolverConfig, solve_layout};
use crate::render::backend::{RenderRequest, Renderer, export_scale};
use crate::render::cpu::CpuRenderer;
use crate::text::engine::FontSource;
use crate::text::measure::{ParleyMeasurer, TextMeasurer};
use crate::text::split::split_paragraphs;
use crate::theme::catalog::Theme;

/// Options for constructing a [`CardSession`].
#[derive(Clone, Debug)]
pub struct SessionOpts {
    /// Card width in CSS pixels; the height follows from `orientation`.
    pub card_width: f64,
    pub orientation: Orientation,
    pub theme: Theme,
    pub host: HostContext,
    /// Attribution shown in the card's bottom-right corner.
    pub author: Option<String>,
    /// Fixed seed for reproducible draws. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Face used by the default measurer and renderer.
    pub font: FontSource,
    pub solver: SolverConfig,
    pub export: ExportOpts,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            card_width: 800.0,
            orientation: Orientation::default(),
            theme: Theme::default(),
            host: HostContext::default(),
            author: None,
            seed: None,
            font: FontSource::default(),
            solver: SolverConfig::default(),
            export: ExportOpts::default(),
        }
    }
}

/// Inputs of one layout pass, stamped with the session generation it was started at.
#[derive(Clone, Debug)]
pub struct LayoutPass {
    pub generation: u64,
    pub geometry: CardGeometry,
    pub paragraphs: Vec<String>,
}

#[derive(Clone, Debug)]
struct Committed {
    geometry: CardGeometry,
    layout: SolvedLayout,
}

/// Host-facing card state: text, theme, orientation and size, plus the last accepted layout.
///
/// Every mutation bumps the generation and drops the committed layout; a pass started before
/// the bump is discarded on commit.
pub struct CardSession {
    text: String,
    author: Option<String>,
    theme: Theme,
    orientation: Orientation,
    card_width: f64,
    host: HostContext,
    solver: SolverConfig,
    export: ExportOpts,
    rng: SeededRng,
    generation: u64,
    committed: Option<Committed>,
    measurer: Box<dyn TextMeasurer>,
    renderer: Box<dyn Renderer>,
    clipboard: Box<dyn ClipboardSink>,
}

impl CardSession {
    /// Session with the Parley measurer, the CPU renderer and an in-memory clipboard.
    pub fn new(opts: SessionOpts) -> Self {
        let measurer = Box::new(ParleyMeasurer::new(opts.font.clone()));
        let renderer = Box::new(CpuRenderer::new(opts.font.clone()));
        Self {
            text: String::new(),
            author: normalize_author(opts.author),
            theme: opts.theme,
            orientation: opts.orientation,
            card_width: opts.card_width,
            host: opts.host,
            solver: opts.solver,
            export: opts.export,
            rng: SeededRng::from_optional_seed(opts.seed),
            generation: 0,
            committed: None,
            measurer,
            renderer,
            clipboard: Box::new(InMemoryClipboard::new()),
        }
    }

    pub fn with_measurer(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.measurer = Box::new(measurer);
        self.invalidate();
        self
    }

    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn with_clipboard(mut self, clipboard: impl ClipboardSink + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn host(&self) -> HostContext {
        self.host
    }

    pub fn export_opts(&self) -> &ExportOpts {
        &self.export
    }

    pub fn export_opts_mut(&mut self) -> &mut ExportOpts {
        &mut self.export
    }

    /// Current generation; bumped by every mutation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Last accepted layout, if it is still current.
    pub fn committed_layout(&self) -> Option<&SolvedLayout> {
        self.committed.as_ref().map(|c| &c.layout)
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.invalidate();
    }

    /// Set or remove the author line. Blank input removes it.
    pub fn set_author(&mut self, author: Option<String>) {
        self.author = normalize_author(author);
        self.invalidate();
    }

    /// Empty both the text and the author line.
    pub fn clear(&mut self) {
        self.author = None;
        self.set_text(String::new());
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.invalidate();
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        self.invalidate();
    }

    pub fn toggle_orientation(&mut self) {
        self.set_orientation(self.orientation.toggled());
    }

    /// New container width (CSS pixels), e.g. after a host resize.
    pub fn resize(&mut self, card_width: f64) {
        self.card_width = card_width;
        self.invalidate();
    }

    pub fn set_host(&mut self, host: HostContext) {
        self.host = host;
        self.invalidate();
    }

    /// Force a fresh draw. A seed makes the draw reproducible.
    pub fn randomize(&mut self, seed: Option<u64>) -> CardResult<&SolvedLayout> {
        if let Some(seed) = seed {
            self.rng = SeededRng::from_seed(seed);
        }
        self.invalidate();
        self.relayout()
    }

    fn invalidate(&mut self) {
        self.generation += 1;
        self.committed = None;
    }

    /// Card geometry for the current width and orientation.
    pub fn geometry(&self) -> CardResult<CardGeometry> {
        CardGeometry::new(self.card_width, self.orientation)
    }

    /// Capture the inputs of a layout pass at the current generation.
    pub fn begin_layout(&self) -> CardResult<LayoutPass> {
        if !self.host.fonts_ready {
            return Err(CardError::measurement_unavailable(
                "fonts are still loading",
            ));
        }
        Ok(LayoutPass {
            generation: self.generation,
            geometry: self.geometry()?,
            paragraphs: split_paragraphs(&self.text),
        })
    }

    /// Solve `pass` with the session's measurer and random source.
    pub fn run_layout(&mut self, pass: &LayoutPass) -> CardResult<SolvedLayout> {
        solve_layout(
            &pass.paragraphs,
            pass.geometry.container(),
            self.measurer.as_mut(),
            &mut self.rng,
            &self.solver,
        )
    }

    /// Adopt `layout` unless the session changed since `pass` began. Returns whether it was kept.
    pub fn commit_layout(&mut self, pass: LayoutPass, layout: SolvedLayout) -> bool {
        if pass.generation != self.generation {
            tracing::debug!(
                pass = pass.generation,
                current = self.generation,
                "discarding stale layout"
            );
            return false;
        }
        self.committed = Some(Committed {
            geometry: pass.geometry,
            layout,
        });
        true
    }

    /// Lay out the current state unless a current layout is already committed.
    pub fn relayout(&mut self) -> CardResult<&SolvedLayout> {
        if self.committed.is_none() {
            let pass = self.begin_layout()?;
            let layout = self.run_layout(&pass)?;
            self.commit_layout(pass, layout);
        }
        self.committed
            .as_ref()
            .map(|c| &c.layout)
            .ok_or_else(|| CardError::measurement_unavailable("layout was superseded"))
    }

    /// Replace text, theme and orientation, then lay out with a fresh draw.
    #[tracing::instrument(skip(self, text, theme), fields(theme = %theme.name))]
    pub fn layout(
        &mut self,
        text: &str,
        theme: &Theme,
        orientation: Orientation,
        seed: Option<u64>,
    ) -> CardResult<Vec<ParagraphGeometry>> {
        self.text = text.to_owned();
        self.theme = theme.clone();
        self.orientation = orientation;
        let solved = self.randomize(seed)?;
        Ok(solved.paragraphs.clone())
    }

    /// Whether copy is offered: never on mobile hosts, and only with a working clipboard.
    pub fn can_copy(&self) -> bool {
        !self.host.mobile && self.clipboard.is_available()
    }

    /// Capture, trim and deliver the current card.
    #[tracing::instrument(skip(self, mode), fields(mode = mode.as_str()))]
    pub fn export(&mut self, mode: ExportMode) -> Result<ExportReport, ExportError> {
        if mode == ExportMode::Copy && !self.can_copy() {
            let reason = if self.host.mobile {
                "copy is not offered on mobile hosts"
            } else {
                "no clipboard service"
            };
            return Err(ExportError::ClipboardUnavailable(reason.to_owned()));
        }
        self.relayout().map_err(ExportError::NotLaidOut)?;
        let Some(committed) = self.committed.as_ref() else {
            return Err(ExportError::NotLaidOut(CardError::measurement_unavailable(
                "no committed layout",
            )));
        };

        let geometry = committed.geometry;
        let scale = export_scale(
            geometry.frame_size(),
            geometry.orientation,
            self.export.scale_cap(mode),
        );
        let raster = self
            .renderer
            .render(&RenderRequest {
                layout: &committed.layout,
                geometry: &geometry,
                theme: &self.theme,
                author: self.author.as_deref(),
                scale,
            })
            .map_err(ExportError::RenderCaptureFailure)?;

        let trimmed = trim_transparent(&raster, self.export.trim_margin);
        let png = encode_png(&trimmed.raster).map_err(ExportError::Encode)?;

        let path = match mode {
            ExportMode::Download => Some(DownloadSink::from_opts(&self.export).save(&png)?),
            ExportMode::Copy => {
                let image = ClipboardImage {
                    width: trimmed.raster.width,
                    height: trimmed.raster.height,
                    rgba: trimmed.raster.data.clone(),
                    png: png.clone(),
                };
                self.clipboard.write_image(&image).inspect_err(|e| {
                    tracing::warn!(error = %e, "copy failed");
                })?;
                tracing::info!("card copied to clipboard");
                None
            }
        };

        Ok(ExportReport {
            mode,
            scale,
            width: trimmed.raster.width,
            height: trimmed.raster.height,
            trim: trimmed.bounds,
            png_bytes: png.len(),
            path,
        })
    }
}

fn normalize_author(author: Option<String>) -> Option<String> {
    author.filter(|a| !a.trim().is_empty())
}

#[cfg(test)]
#[path = "../../tests/unit/session/card_session.rs"]
mod tests;
