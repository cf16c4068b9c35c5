use super::*;

#[test]
fn landscape_card_dimensions() {
    let g = CardGeometry::new(800.0, Orientation::Landscape).unwrap();
    assert!((g.card_height - 800.0 / 1.618).abs() < 1e-9);
    assert_eq!(g.frame_padding, 24.0);
    assert_eq!(g.content_padding, 48.0);
    let frame = g.frame_size();
    assert_eq!(frame.width, 848.0);
    assert!((frame.height - (g.card_height + 48.0)).abs() < 1e-9);
}

#[test]
fn portrait_card_is_taller_than_wide() {
    let g = CardGeometry::new(500.0, Orientation::Portrait).unwrap();
    assert!((g.card_height / g.card_width - 1.414).abs() < 1e-9);
}

#[test]
fn content_rect_is_inset_by_padding() {
    let g = CardGeometry::new(1000.0, Orientation::Landscape).unwrap();
    let card = g.card_rect();
    let content = g.content_rect();
    assert_eq!(content.x0, card.x0 + 60.0);
    assert_eq!(content.y0, card.y0 + 60.0);
    assert_eq!(content.width(), 1000.0 - 120.0);
}

#[test]
fn container_matches_card_box() {
    let g = CardGeometry::new(640.0, Orientation::Landscape).unwrap();
    let c = g.container();
    assert_eq!(c.width, g.card_width);
    assert_eq!(c.height, g.card_height);
    assert!(c.is_measurable());
}

#[test]
fn unusable_width_is_unmeasurable() {
    assert!(matches!(
        CardGeometry::new(0.0, Orientation::Landscape),
        Err(CardError::MeasurementUnavailable(_))
    ));
    assert!(CardGeometry::new(f64::NAN, Orientation::Portrait).is_err());
    assert!(!Container::new(10.0, f64::INFINITY).is_measurable());
}

#[test]
fn author_size_follows_smaller_side() {
    let landscape = CardGeometry::new(800.0, Orientation::Landscape).unwrap();
    assert!((landscape.author_font_size() - landscape.card_height * 0.028).abs() < 1e-9);

    let portrait = CardGeometry::new(800.0, Orientation::Portrait).unwrap();
    assert!((portrait.author_font_size() - 800.0 * 0.028 * 0.95).abs() < 1e-9);
}

#[test]
fn author_line_fits_in_the_bottom_inset() {
    for orientation in [Orientation::Landscape, Orientation::Portrait] {
        let g = CardGeometry::new(640.0, orientation).unwrap();
        let pitch = g.author_font_size() * 1.5;
        assert!(pitch < g.card_height * 0.05, "{orientation:?}");
    }
}
