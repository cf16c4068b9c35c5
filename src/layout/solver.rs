use serde::{Deserialize, Serialize};

use crate::foundation::error::{CardError, CardResult};
use crate::layout::geometry::{CONTENT_PADDING_RATIO, Container};
use crate::layout::sampler::{RandomSource, base_font_size, sample_font_sizes};
use crate::text::measure::TextMeasurer;

/// Tunables of the auto-fit search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Horizontal and vertical card padding, relative to container width.
    pub padding_ratio: f64,
    /// Extra top/bottom inset, relative to container height.
    pub virtual_padding_ratio: f64,
    /// Minimum inter-paragraph gap, relative to the inner height.
    pub min_gap_ratio: f64,
    /// Per-attempt font size multiplier on overflow.
    pub shrink_factor: f64,
    /// Attempts before falling back to the deterministic layout.
    pub max_attempts: u32,
    /// Line pitch of the fallback stack, relative to the fallback size.
    pub fallback_line_height: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            padding_ratio: CONTENT_PADDING_RATIO,
            virtual_padding_ratio: 0.05,
            min_gap_ratio: 0.05,
            shrink_factor: 0.9,
            max_attempts: 100,
            fallback_line_height: 1.5,
        }
    }
}

/// Solved placement of one paragraph, relative to the card content box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParagraphGeometry {
    pub index: usize,
    pub text: String,
    pub font_size: f64,
    pub top: f64,
    /// Measured height at `font_size`. Fallback layouts keep the last measurement.
    pub height: f64,
}

impl ParagraphGeometry {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// How the solver terminated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutOutcome {
    /// No paragraphs; nothing to place.
    Empty,
    /// A non-overflowing layout was found after `attempts` shrink steps.
    Accepted { attempts: u32 },
    /// Overflow was never resolved; uniform fallback sizes and stacked offsets were used.
    Fallback,
}

/// Derived vertical metrics for one container.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    pub base_font_size: f64,
    pub min_font_size: f64,
    pub content_width: f64,
    /// Top plus bottom card padding.
    pub vertical_padding: f64,
    /// Container height minus `vertical_padding`.
    pub inner_height: f64,
    pub virtual_padding: f64,
    pub min_gap: f64,
    /// Paragraph bottoms must not exceed this.
    pub overflow_bound: f64,
}

impl LayoutMetrics {
    pub fn new(container: Container, config: &SolverConfig) -> Self {
        let base = base_font_size(container.width, container.height);
        let padding = container.width * config.padding_ratio;
        let vertical_padding = 2.0 * padding;
        let inner_height = container.height - vertical_padding;
        let virtual_padding = container.height * config.virtual_padding_ratio;
        Self {
            base_font_size: base,
            min_font_size: base / 4.0,
            content_width: (container.width - 2.0 * padding).max(0.0),
            vertical_padding,
            inner_height,
            virtual_padding,
            min_gap: inner_height * config.min_gap_ratio,
            overflow_bound: container.height - vertical_padding - virtual_padding,
        }
    }
}

/// Result of one solver run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolvedLayout {
    pub container: Container,
    pub metrics: LayoutMetrics,
    pub paragraphs: Vec<ParagraphGeometry>,
    pub outcome: LayoutOutcome,
}

/// Per-iteration solver state.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutAttempt {
    pub attempt: u32,
    pub font_sizes: Vec<f64>,
    pub heights: Vec<f64>,
    pub tops: Vec<f64>,
    pub overflow: bool,
}

enum Step {
    Sampling,
    Measuring { attempt: u32, font_sizes: Vec<f64> },
    OverflowCheck(LayoutAttempt),
    Shrink(LayoutAttempt),
    Accept(LayoutAttempt),
    Fallback(LayoutAttempt),
}

/// Auto-fit search over font sizes and vertical offsets.
pub struct LayoutSolver<'a> {
    config: &'a SolverConfig,
    measurer: &'a mut dyn TextMeasurer,
    rng: &'a mut dyn RandomSource,
}

impl<'a> LayoutSolver<'a> {
    pub fn new(
        config: &'a SolverConfig,
        measurer: &'a mut dyn TextMeasurer,
        rng: &'a mut dyn RandomSource,
    ) -> Self {
        Self {
            config,
            measurer,
            rng,
        }
    }

    /// Run the search to completion.
    ///
    /// Fails only when the container cannot be measured; overflow is never an error and ends
    /// in [`LayoutOutcome::Fallback`] after `max_attempts` shrink steps.
    #[tracing::instrument(skip(self, paragraphs), fields(paragraphs = paragraphs.len()))]
    pub fn solve(
        &mut self,
        paragraphs: &[String],
        container: Container,
    ) -> CardResult<SolvedLayout> {
        if !container.is_measurable() {
            return Err(CardError::measurement_unavailable(format!(
                "container {}x{} is not sized yet",
                container.width, container.height
            )));
        }
        let metrics = LayoutMetrics::new(container, self.config);

        if paragraphs.is_empty() {
            return Ok(SolvedLayout {
                container,
                metrics,
                paragraphs: Vec::new(),
                outcome: LayoutOutcome::Empty,
            });
        }

        let mut step = Step::Sampling;
        loop {
            step = match step {
                Step::Sampling => Step::Measuring {
                    attempt: 0,
                    font_sizes: sample_font_sizes(
                        metrics.base_font_size,
                        paragraphs.len(),
                        self.rng,
                    ),
                },
                Step::Measuring {
                    attempt,
                    font_sizes,
                } => {
                    let heights = self.measure_all(paragraphs, &font_sizes, &metrics);
                    let tops = self.place(&heights, &metrics);
                    Step::OverflowCheck(LayoutAttempt {
                        attempt,
                        font_sizes,
                        heights,
                        tops,
                        overflow: false,
                    })
                }
                Step::OverflowCheck(mut a) => {
                    a.overflow = a
                        .tops
                        .iter()
                        .zip(&a.heights)
                        .any(|(top, h)| top + h > metrics.overflow_bound);
                    tracing::trace!(attempt = a.attempt, overflow = a.overflow, "layout attempt");
                    if !a.overflow {
                        Step::Accept(a)
                    } else if a.attempt + 1 < self.config.max_attempts {
                        Step::Shrink(a)
                    } else {
                        Step::Fallback(a)
                    }
                }
                Step::Shrink(a) => Step::Measuring {
                    attempt: a.attempt + 1,
                    font_sizes: a
                        .font_sizes
                        .iter()
                        .map(|s| (s * self.config.shrink_factor).max(metrics.min_font_size))
                        .collect(),
                },
                Step::Accept(a) => {
                    tracing::debug!(attempts = a.attempt, "layout accepted");
                    return Ok(SolvedLayout {
                        container,
                        metrics,
                        paragraphs: collect_geometry(paragraphs, &a.font_sizes, &a.tops, &a.heights),
                        outcome: LayoutOutcome::Accepted { attempts: a.attempt },
                    });
                }
                Step::Fallback(a) => {
                    tracing::info!(
                        attempts = self.config.max_attempts,
                        "overflow unresolved, using fallback layout"
                    );
                    let size = metrics.base_font_size / 2.0;
                    let pitch = size * self.config.fallback_line_height;
                    let sizes = vec![size; paragraphs.len()];
                    let tops: Vec<f64> = (0..paragraphs.len())
                        .map(|i| metrics.virtual_padding + (i as f64) * pitch)
                        .collect();
                    return Ok(SolvedLayout {
                        container,
                        metrics,
                        paragraphs: collect_geometry(paragraphs, &sizes, &tops, &a.heights),
                        outcome: LayoutOutcome::Fallback,
                    });
                }
            };
        }
    }

    fn measure_all(
        &mut self,
        paragraphs: &[String],
        font_sizes: &[f64],
        metrics: &LayoutMetrics,
    ) -> Vec<f64> {
        paragraphs
            .iter()
            .zip(font_sizes)
            .map(|(text, &size)| {
                let h = self.measurer.measure(text, size, metrics.content_width);
                if h.is_finite() { h.max(0.0) } else { 0.0 }
            })
            .collect()
    }

    /// Fresh random vertical placement; nothing carries over from earlier attempts.
    fn place(&mut self, heights: &[f64], metrics: &LayoutMetrics) -> Vec<f64> {
        let total: f64 = heights.iter().sum();
        let available = metrics.inner_height - total - 2.0 * metrics.virtual_padding;
        let gaps = heights.len().saturating_sub(1).max(1) as f64;
        let max_gap = available / gaps;

        let mut tops = Vec::with_capacity(heights.len());
        let mut y = metrics.virtual_padding;
        for (i, h) in heights.iter().enumerate() {
            if i > 0 {
                y += self.rng.uniform(0.0, max_gap).max(metrics.min_gap);
            }
            tops.push(y);
            y += h;
        }
        tops
    }
}

fn collect_geometry(
    paragraphs: &[String],
    sizes: &[f64],
    tops: &[f64],
    heights: &[f64],
) -> Vec<ParagraphGeometry> {
    paragraphs
        .iter()
        .enumerate()
        .map(|(index, text)| ParagraphGeometry {
            index,
            text: text.clone(),
            font_size: sizes[index],
            top: tops[index],
            height: heights[index],
        })
        .collect()
}

/// Convenience wrapper around [`LayoutSolver::solve`].
pub fn solve_layout(
    paragraphs: &[String],
    container: Container,
    measurer: &mut dyn TextMeasurer,
    rng: &mut dyn RandomSource,
    config: &SolverConfig,
) -> CardResult<SolvedLayout> {
    LayoutSolver::new(config, measurer, rng).solve(paragraphs, container)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/solver.rs"]
mod tests;
