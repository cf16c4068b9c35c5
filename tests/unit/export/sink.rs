use super::*;

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

fn image() -> ClipboardImage {
    ClipboardImage {
        width: 1,
        height: 1,
        rgba: vec![1, 2, 3, 255],
        png: vec![0x89, b'P', b'N', b'G'],
    }
}

#[test]
fn default_opts_match_export_constants() {
    let opts = ExportOpts::default();
    assert_eq!(opts.trim_margin, 60);
    assert_eq!(opts.file_name, "Text2Card.png");
    assert_eq!(opts.scale_cap(ExportMode::Download), 3.0);
    assert_eq!(opts.scale_cap(ExportMode::Copy), 2.0);
}

#[test]
fn download_writes_fixed_name_and_overwrites() {
    let dir = temp_dir("download_overwrite");
    let sink = DownloadSink::new(&dir, EXPORT_FILE_NAME);

    let first = sink.save(b"first").unwrap();
    assert_eq!(first, dir.join("Text2Card.png"));
    let second = sink.save(b"second").unwrap();
    assert_eq!(first, second);
    assert_eq!(std::fs::read(&second).unwrap(), b"second");

    let leftovers: Vec<_> = std::fs::read_dir(&dir)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers.len(), 1);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn download_into_a_file_path_is_an_io_error() {
    let dir = temp_dir("download_blocked");
    std::fs::create_dir_all(&dir).unwrap();
    let blocker = dir.join("not_a_dir");
    std::fs::write(&blocker, b"x").unwrap();

    let err = DownloadSink::new(&blocker, EXPORT_FILE_NAME)
        .save(b"png")
        .unwrap_err();
    assert!(matches!(err, ExportError::Io { .. }));
    assert_eq!(err.user_notice(), "Export failed, please try again.");
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn in_memory_clipboard_keeps_last_image() {
    let mut clip = InMemoryClipboard::new();
    assert!(clip.is_available());
    clip.write_image(&image()).unwrap();
    clip.write_image(&image()).unwrap();
    assert_eq!(clip.writes(), 2);
    assert_eq!(clip.contents(), Some(&image()));
}

#[test]
fn failing_clipboard_reports_write_failure_with_download_hint() {
    let mut clip = InMemoryClipboard::failing("denied");
    let err = clip.write_image(&image()).unwrap_err();
    assert!(matches!(err, ExportError::ClipboardWriteFailure(ref r) if r == "denied"));
    assert!(err.user_notice().contains("Download"));
    assert!(clip.contents().is_none());
}

#[test]
fn unavailable_clipboard_refuses_writes() {
    let mut clip: Box<dyn ClipboardSink> = Box::new(InMemoryClipboard::unavailable());
    assert!(!clip.is_available());
    assert!(matches!(
        clip.write_image(&image()),
        Err(ExportError::ClipboardUnavailable(_))
    ));
}

#[test]
fn export_mode_serializes_snake_case() {
    assert_eq!(serde_json::to_string(&ExportMode::Copy).unwrap(), "\"copy\"");
    assert_eq!(ExportMode::Download.as_str(), "download");
}
