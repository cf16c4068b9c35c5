use super::*;

#[test]
fn raster_new_checks_length() {
    assert!(ExportRaster::new(2, 2, vec![0; 16]).is_ok());
    let err = ExportRaster::new(2, 2, vec![0; 15]).unwrap_err();
    assert!(matches!(err, CardError::Validation(_)));
}

#[test]
fn pixel_reads_row_major() {
    let mut r = ExportRaster::transparent(3, 2);
    let i = (3 + 2) * 4;
    r.data[i..i + 4].copy_from_slice(&[1, 2, 3, 4]);
    assert_eq!(r.pixel(2, 1), Some([1, 2, 3, 4]));
    assert_eq!(r.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(r.pixel(3, 0), None);
    assert!(!r.is_empty());
    assert!(ExportRaster::transparent(0, 5).is_empty());
}

#[test]
fn landscape_download_scale_fits_target() {
    let g = CardGeometry::new(800.0, Orientation::Landscape).unwrap();
    let frame = g.frame_size();
    let s = export_scale(frame, Orientation::Landscape, DOWNLOAD_SCALE_CAP);
    let expected = (1920.0 / frame.width).min(1187.0 / frame.height);
    assert!((s - expected).abs() < 1e-12);
    let (w, h) = raster_size(frame, s).unwrap();
    assert!(u32::from(w) <= 1920 && u32::from(h) <= 1188);
}

#[test]
fn small_cards_hit_the_cap() {
    let frame = Size::new(100.0, 62.0);
    assert_eq!(
        export_scale(frame, Orientation::Landscape, DOWNLOAD_SCALE_CAP),
        3.0
    );
    assert_eq!(export_scale(frame, Orientation::Landscape, COPY_SCALE_CAP), 2.0);
}

#[test]
fn portrait_uses_portrait_target() {
    let g = CardGeometry::new(400.0, Orientation::Portrait).unwrap();
    let frame = g.frame_size();
    let s = export_scale(frame, Orientation::Portrait, DOWNLOAD_SCALE_CAP);
    let expected = (1080.0 / frame.width).min(1527.0 / frame.height);
    assert!((s - expected).abs() < 1e-12);
}

#[test]
fn raster_size_rounds_up_and_rejects_bad_scales() {
    assert_eq!(raster_size(Size::new(10.5, 3.2), 2.0).unwrap(), (21, 7));
    assert!(raster_size(Size::new(10.0, 10.0), 0.0).is_err());
    assert!(raster_size(Size::new(10.0, 10.0), f64::NAN).is_err());
    assert!(matches!(
        raster_size(Size::new(70_000.0, 10.0), 1.0),
        Err(CardError::Render(_))
    ));
}
