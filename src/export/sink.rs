use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::export::trim::{DEFAULT_TRIM_MARGIN, TrimBounds};
use crate::foundation::error::CardError;
use crate::render::backend::{COPY_SCALE_CAP, DOWNLOAD_SCALE_CAP};

/// Fixed file name of every download.
pub const EXPORT_FILE_NAME: &str = "Text2Card.png";

/// Where an export goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportMode {
    /// PNG file under a fixed name.
    Download,
    /// PNG image on the clipboard.
    Copy,
}

impl ExportMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Download => "download",
            Self::Copy => "copy",
        }
    }
}

/// Export tunables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportOpts {
    /// Transparent margin kept around the trimmed content.
    pub trim_margin: u32,
    /// Directory downloads are written to.
    pub download_dir: PathBuf,
    pub file_name: String,
    pub download_scale_cap: f64,
    pub copy_scale_cap: f64,
}

impl Default for ExportOpts {
    fn default() -> Self {
        Self {
            trim_margin: DEFAULT_TRIM_MARGIN,
            download_dir: PathBuf::from("."),
            file_name: EXPORT_FILE_NAME.to_owned(),
            download_scale_cap: DOWNLOAD_SCALE_CAP,
            copy_scale_cap: COPY_SCALE_CAP,
        }
    }
}

impl ExportOpts {
    /// Scale cap for `mode`.
    pub fn scale_cap(&self, mode: ExportMode) -> f64 {
        match mode {
            ExportMode::Download => self.download_scale_cap,
            ExportMode::Copy => self.copy_scale_cap,
        }
    }
}

/// Errors of one export action. Session state is never changed by a failed export.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    /// Nothing has been laid out yet (unsized container or stale state).
    #[error("nothing to export: {0}")]
    NotLaidOut(#[source] CardError),

    /// Snapshot capture failed.
    #[error("render capture failed: {0}")]
    RenderCaptureFailure(#[source] CardError),

    /// PNG encoding failed.
    #[error("png encoding failed: {0}")]
    Encode(#[source] CardError),

    /// The host cannot take clipboard images (mobile host, no clipboard service).
    #[error("clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    /// The clipboard rejected the image.
    #[error("clipboard write failed: {0}")]
    ClipboardWriteFailure(String),

    /// Writing the download failed.
    #[error("failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// Short message suitable for showing to the person who triggered the export.
    pub fn user_notice(&self) -> &'static str {
        match self {
            Self::NotLaidOut(_) => "The card is not ready yet, please try again.",
            Self::ClipboardUnavailable(_) => {
                "Copying images is not supported here, please use Download instead."
            }
            Self::ClipboardWriteFailure(_) => {
                "Copy failed, please try again or use Download instead."
            }
            Self::RenderCaptureFailure(_) | Self::Encode(_) | Self::Io { .. } => {
                "Export failed, please try again."
            }
        }
    }
}

/// Outcome of a successful export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportReport {
    pub mode: ExportMode,
    /// Capture scale (device pixels per CSS pixel).
    pub scale: f64,
    /// Final (trimmed) size in pixels.
    pub width: u32,
    pub height: u32,
    /// Crop box in capture coordinates; `None` when the capture was fully transparent.
    pub trim: Option<TrimBounds>,
    pub png_bytes: usize,
    /// Written file, for downloads.
    pub path: Option<PathBuf>,
}

/// Writes downloads under a fixed name, replacing the previous file atomically.
#[derive(Clone, Debug)]
pub struct DownloadSink {
    dir: PathBuf,
    file_name: String,
}

impl DownloadSink {
    pub fn new(dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file_name: file_name.into(),
        }
    }

    pub fn from_opts(opts: &ExportOpts) -> Self {
        Self::new(&opts.download_dir, &opts.file_name)
    }

    /// Final path of the download.
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    /// Write `png` and return the final path.
    ///
    /// The file is staged next to the target and renamed into place, so a failed write never
    /// leaves a truncated image behind.
    #[tracing::instrument(skip(self, png), fields(bytes = png.len()))]
    pub fn save(&self, png: &[u8]) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| io_at(&self.dir, e))?;

        let target = self.path();
        let staging = self.dir.join(format!(".{}.part", self.file_name));
        if let Err(e) = std::fs::write(&staging, png) {
            let _ = std::fs::remove_file(&staging);
            return Err(io_at(&staging, e));
        }
        if let Err(e) = std::fs::rename(&staging, &target) {
            let _ = std::fs::remove_file(&staging);
            return Err(io_at(&target, e));
        }
        tracing::info!(path = %target.display(), "card downloaded");
        Ok(target)
    }
}

fn io_at(path: &Path, source: std::io::Error) -> ExportError {
    ExportError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Image handed to a clipboard: raw straight-alpha pixels plus their PNG encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClipboardImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
    pub png: Vec<u8>,
}

/// Destination for copied card images.
pub trait ClipboardSink {
    /// Whether images can be written at all; queried before any capture work.
    fn is_available(&self) -> bool;

    /// Replace the clipboard contents with `image`.
    fn write_image(&mut self, image: &ClipboardImage) -> Result<(), ExportError>;
}

impl<C: ClipboardSink + ?Sized> ClipboardSink for Box<C> {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn write_image(&mut self, image: &ClipboardImage) -> Result<(), ExportError> {
        (**self).write_image(image)
    }
}

/// Process-local clipboard for headless hosts and tests.
#[derive(Clone, Debug)]
pub struct InMemoryClipboard {
    available: bool,
    fail_with: Option<String>,
    contents: Option<ClipboardImage>,
    writes: usize,
}

impl Default for InMemoryClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryClipboard {
    pub fn new() -> Self {
        Self {
            available: true,
            fail_with: None,
            contents: None,
            writes: 0,
        }
    }

    /// A clipboard that reports itself unavailable.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// A clipboard whose writes always fail with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            fail_with: Some(reason.into()),
            ..Self::new()
        }
    }

    pub fn contents(&self) -> Option<&ClipboardImage> {
        self.contents.as_ref()
    }

    /// Number of successful writes.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ClipboardSink for InMemoryClipboard {
    fn is_available(&self) -> bool {
        self.available
    }

    fn write_image(&mut self, image: &ClipboardImage) -> Result<(), ExportError> {
        if !self.available {
            return Err(ExportError::ClipboardUnavailable(
                "in-memory clipboard disabled".to_owned(),
            ));
        }
        if let Some(reason) = &self.fail_with {
            return Err(ExportError::ClipboardWriteFailure(reason.clone()));
        }
        self.contents = Some(image.clone());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/sink.rs"]
mod tests;
