use super::*;

#[test]
fn landscape_and_portrait_ratios() {
    let w = 800.0;
    assert!((Orientation::Landscape.height_for_width(w) - 494.4375).abs() < 1e-3);
    let portrait = Orientation::Portrait.height_for_width(w);
    assert!((portrait / w - 1.414).abs() < 1e-9);
}

#[test]
fn export_targets_follow_orientation() {
    assert_eq!(Orientation::Landscape.export_target(), (1920, 1187));
    assert_eq!(Orientation::Portrait.export_target(), (1080, 1527));
}

#[test]
fn toggled_flips_orientation() {
    assert_eq!(Orientation::Landscape.toggled(), Orientation::Portrait);
    assert_eq!(Orientation::Portrait.toggled(), Orientation::Landscape);
}

#[test]
fn rgb_literal_and_hex_output() {
    let c = Rgba8::from_rgb_u32(0x013365);
    assert_eq!(c, Rgba8::new(0x01, 0x33, 0x65, 255));
    assert_eq!(c.to_hex(), "#013365");
    assert_eq!(Rgba8::new(1, 2, 3, 4).to_hex(), "#01020304");
}
