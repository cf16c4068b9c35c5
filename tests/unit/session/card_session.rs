use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use super::*;
use crate::export::png::decode_png;
use crate::layout::solver::LayoutOutcome;
use crate::render::backend::ExportRaster;
use crate::text::measure::MonospaceMeasurer;
use crate::theme::catalog::find_theme;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "text2card_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn session(seed: u64) -> CardSession {
    CardSession::new(SessionOpts {
        seed: Some(seed),
        ..SessionOpts::default()
    })
    .with_measurer(MonospaceMeasurer::default())
}

/// Clipboard whose contents outlive the session that owns it.
#[derive(Clone, Default)]
struct SharedClipboard {
    images: Rc<RefCell<Vec<ClipboardImage>>>,
}

impl ClipboardSink for SharedClipboard {
    fn is_available(&self) -> bool {
        true
    }

    fn write_image(&mut self, image: &ClipboardImage) -> Result<(), ExportError> {
        self.images.borrow_mut().push(image.clone());
        Ok(())
    }
}

struct BrokenRenderer;

impl Renderer for BrokenRenderer {
    fn render(&mut self, _req: &RenderRequest<'_>) -> CardResult<ExportRaster> {
        Err(CardError::render("surface lost"))
    }
}

#[test]
fn empty_text_lays_out_nothing_but_still_exports_the_frame() {
    let dir = temp_dir("session_empty_export");
    let mut s = session(1);
    s.export_opts_mut().download_dir = dir.clone();

    let paragraphs = s
        .layout("", &Theme::default(), Orientation::Landscape, Some(1))
        .unwrap();
    assert!(paragraphs.is_empty());
    assert_eq!(s.committed_layout().unwrap().outcome, LayoutOutcome::Empty);

    let report = s.export(ExportMode::Download).unwrap();
    let path = report.path.clone().unwrap();
    assert_eq!(path, dir.join("Text2Card.png"));
    let decoded = decode_png(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!((decoded.width, decoded.height), (report.width, report.height));
    assert!(report.trim.is_some());
    assert!(report.scale <= 3.0);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn three_paragraphs_fit_the_landscape_card() {
    let mut s = session(2);
    let paragraphs = s
        .layout(
            "Line1\n\nLine2\n\nLine3",
            &Theme::default(),
            Orientation::Landscape,
            Some(7),
        )
        .unwrap();
    let layout = s.committed_layout().unwrap();
    let b = layout.metrics.base_font_size;

    assert_eq!(paragraphs.len(), 3);
    assert_eq!(paragraphs[1].text, "Line2");
    for p in &paragraphs {
        assert!(p.font_size >= b / 4.0 - 1e-9 && p.font_size <= 2.0 * b + 1e-9);
    }
    for w in paragraphs.windows(2) {
        assert!(w[1].top >= w[0].top + w[0].height);
    }
}

#[test]
fn switching_to_portrait_redraws_with_portrait_ratio() {
    let mut s = session(3);
    let theme = Theme::default();
    let text = "alpha\n\nbeta";
    let landscape = s.layout(text, &theme, Orientation::Landscape, None).unwrap();
    let portrait = s.layout(text, &theme, Orientation::Portrait, None).unwrap();

    let container = s.committed_layout().unwrap().container;
    assert!((container.height / container.width - 1.414).abs() < 1e-9);
    assert_ne!(landscape, portrait);
}

#[test]
fn fixed_seed_reproduces_the_draw() {
    let theme = Theme::default();
    let a = session(9)
        .layout("a\n\nb\n\nc", &theme, Orientation::Landscape, Some(42))
        .unwrap();
    let b = session(10)
        .layout("a\n\nb\n\nc", &theme, Orientation::Landscape, Some(42))
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn randomize_without_seed_draws_again() {
    let mut s = session(4);
    s.set_text("one\n\ntwo\n\nthree");
    let first = s.relayout().unwrap().paragraphs.clone();
    let second = s.randomize(None).unwrap().paragraphs.clone();
    assert_ne!(first, second);
}

#[test]
fn mutations_invalidate_the_committed_layout() {
    let mut s = session(5);
    s.set_text("hello");
    s.relayout().unwrap();
    let g = s.generation();

    s.set_theme(find_theme("Green").unwrap());
    assert!(s.committed_layout().is_none());
    assert!(s.generation() > g);

    s.relayout().unwrap();
    s.resize(640.0);
    assert!(s.committed_layout().is_none());
    s.relayout().unwrap();
    s.toggle_orientation();
    assert_eq!(s.orientation(), Orientation::Portrait);
    assert!(s.committed_layout().is_none());
}

#[test]
fn stale_pass_is_discarded_on_commit() {
    let mut s = session(6);
    s.set_text("first");
    let pass = s.begin_layout().unwrap();
    let layout = s.run_layout(&pass).unwrap();

    s.set_text("second");
    assert!(!s.commit_layout(pass, layout));
    assert!(s.committed_layout().is_none());

    let pass = s.begin_layout().unwrap();
    let layout = s.run_layout(&pass).unwrap();
    assert!(s.commit_layout(pass, layout));
    assert_eq!(s.committed_layout().unwrap().paragraphs[0].text, "second");
}

#[test]
fn layout_waits_for_fonts() {
    let mut s = session(7);
    s.set_host(HostContext {
        fonts_ready: false,
        mobile: false,
    });
    assert!(matches!(
        s.relayout(),
        Err(CardError::MeasurementUnavailable(_))
    ));
    assert!(matches!(
        s.export(ExportMode::Download),
        Err(ExportError::NotLaidOut(_))
    ));
}

#[test]
fn unsized_container_is_not_laid_out() {
    let mut s = session(8);
    s.resize(0.0);
    assert!(matches!(
        s.relayout(),
        Err(CardError::MeasurementUnavailable(_))
    ));
}

#[test]
fn copy_is_not_offered_on_mobile() {
    let clip = SharedClipboard::default();
    let mut s = session(11).with_clipboard(clip.clone());
    s.set_host(HostContext {
        fonts_ready: true,
        mobile: true,
    });
    assert!(!s.can_copy());
    let err = s.export(ExportMode::Copy).unwrap_err();
    assert!(matches!(err, ExportError::ClipboardUnavailable(_)));
    assert!(clip.images.borrow().is_empty());
}

#[test]
fn copy_writes_trimmed_png_at_copy_scale() {
    let clip = SharedClipboard::default();
    let mut s = session(12).with_clipboard(clip.clone());
    s.set_text("");
    let report = s.export(ExportMode::Copy).unwrap();

    assert!(report.path.is_none());
    assert!(report.scale <= 2.0);
    let images = clip.images.borrow();
    assert_eq!(images.len(), 1);
    let decoded = decode_png(&images[0].png).unwrap();
    assert_eq!(decoded.width, report.width);
    assert_eq!(decoded.data, images[0].rgba);
}

#[test]
fn failed_copy_leaves_session_untouched() {
    let mut s = session(13).with_clipboard(InMemoryClipboard::failing("denied"));
    s.set_text("keep me");
    s.relayout().unwrap();
    let g = s.generation();
    let before = s.committed_layout().cloned();

    let err = s.export(ExportMode::Copy).unwrap_err();
    assert!(matches!(err, ExportError::ClipboardWriteFailure(_)));
    assert!(err.user_notice().contains("Download"));
    assert_eq!(s.generation(), g);
    assert_eq!(s.committed_layout().cloned(), before);
    assert_eq!(s.text(), "keep me");
}

#[test]
fn render_failure_is_a_capture_failure() {
    let mut s = session(14).with_renderer(BrokenRenderer);
    s.set_text("x");
    let err = s.export(ExportMode::Download).unwrap_err();
    assert!(matches!(err, ExportError::RenderCaptureFailure(_)));
}

#[test]
fn clear_empties_the_text() {
    let mut s = session(15);
    s.set_text("something");
    s.clear();
    assert_eq!(s.text(), "");
    assert!(s.relayout().unwrap().paragraphs.is_empty());
}

/// Records the author of every render request.
#[derive(Clone, Default)]
struct RecordingRenderer {
    seen: Rc<RefCell<Vec<Option<String>>>>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, req: &RenderRequest<'_>) -> CardResult<ExportRaster> {
        self.seen.borrow_mut().push(req.author.map(str::to_owned));
        Ok(ExportRaster::transparent(4, 4))
    }
}

#[test]
fn author_changes_invalidate_the_layout() {
    let mut s = session(16);
    s.set_text("quote");
    s.relayout().unwrap();
    let g = s.generation();

    s.set_author(Some("John Krakauer".to_owned()));
    assert_eq!(s.author(), Some("John Krakauer"));
    assert!(s.committed_layout().is_none());
    assert!(s.generation() > g);

    s.set_author(Some("  ".to_owned()));
    assert_eq!(s.author(), None);
}

#[test]
fn export_hands_the_author_to_the_renderer() {
    let dir = temp_dir("session_author_export");
    let renderer = RecordingRenderer::default();
    let mut s = CardSession::new(SessionOpts {
        seed: Some(17),
        author: Some("Ann".to_owned()),
        ..SessionOpts::default()
    })
    .with_measurer(MonospaceMeasurer::default())
    .with_renderer(renderer.clone());
    s.export_opts_mut().download_dir = dir.clone();
    s.set_text("hello");

    s.export(ExportMode::Download).unwrap();
    s.set_author(None);
    s.export(ExportMode::Download).unwrap();

    assert_eq!(*renderer.seen.borrow(), vec![Some("Ann".to_owned()), None]);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn clear_also_drops_the_author() {
    let mut s = session(18);
    s.set_author(Some("Someone".to_owned()));
    s.clear();
    assert_eq!(s.author(), None);
}
