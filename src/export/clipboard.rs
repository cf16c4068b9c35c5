use std::borrow::Cow;

use crate::export::sink::{ClipboardImage, ClipboardSink, ExportError};

/// Desktop clipboard backed by `arboard`.
///
/// Opening the clipboard can fail (headless session, missing display server); the sink then
/// reports itself unavailable instead of erroring at construction.
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
    open_error: Option<String>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        match arboard::Clipboard::new() {
            Ok(inner) => Self {
                inner: Some(inner),
                open_error: None,
            },
            Err(e) => {
                tracing::warn!(error = %e, "system clipboard unavailable");
                Self {
                    inner: None,
                    open_error: Some(e.to_string()),
                }
            }
        }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardSink for SystemClipboard {
    fn is_available(&self) -> bool {
        self.inner.is_some()
    }

    fn write_image(&mut self, image: &ClipboardImage) -> Result<(), ExportError> {
        let Some(clipboard) = self.inner.as_mut() else {
            return Err(ExportError::ClipboardUnavailable(
                self.open_error
                    .clone()
                    .unwrap_or_else(|| "clipboard not open".to_owned()),
            ));
        };
        clipboard
            .set_image(arboard::ImageData {
                width: image.width as usize,
                height: image.height as usize,
                bytes: Cow::Borrowed(&image.rgba),
            })
            .map_err(|e| ExportError::ClipboardWriteFailure(e.to_string()))
    }
}
