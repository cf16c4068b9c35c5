use super::*;

#[test]
fn parses_long_and_short_forms() {
    assert_eq!(parse_hex("#013365").unwrap(), Rgba8::new(0x01, 0x33, 0x65, 255));
    assert_eq!(parse_hex("#fff").unwrap(), Rgba8::new(255, 255, 255, 255));
    assert_eq!(parse_hex("1E3A8A").unwrap(), Rgba8::from_rgb_u32(0x1e3a8a));
    assert_eq!(parse_hex("#0000ff80").unwrap(), Rgba8::new(0, 0, 255, 0x80));
    assert_eq!(parse_hex("#f008").unwrap(), Rgba8::new(255, 0, 0, 0x88));
}

#[test]
fn rejects_malformed_hex() {
    for bad in ["", "#12", "#12345", "#gggggg", "#ééé"] {
        assert!(
            matches!(parse_hex(bad), Err(CardError::Validation(_))),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn from_str_delegates_to_parser() {
    let c: Rgba8 = "#87CEEB".parse().unwrap();
    assert_eq!(c.to_hex(), "#87ceeb");
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Wrapper {
    #[serde(with = "hex")]
    c: Rgba8,
}

#[test]
fn serde_adapter_accepts_every_representation() {
    let w: Wrapper = serde_json::from_str(r##"{"c":"#abc"}"##).unwrap();
    assert_eq!(w.c, Rgba8::new(0xaa, 0xbb, 0xcc, 255));

    let w: Wrapper = serde_json::from_str(r#"{"c":{"r":1,"g":2,"b":3}}"#).unwrap();
    assert_eq!(w.c, Rgba8::new(1, 2, 3, 255));

    let w: Wrapper = serde_json::from_str(r#"{"c":[1,2,3,4]}"#).unwrap();
    assert_eq!(w.c, Rgba8::new(1, 2, 3, 4));

    assert!(serde_json::from_str::<Wrapper>(r#"{"c":[1,2]}"#).is_err());
}

#[test]
fn serde_adapter_writes_hex() {
    let json = serde_json::to_string(&Wrapper {
        c: Rgba8::new(0, 0x80, 0xff, 255),
    })
    .unwrap();
    assert_eq!(json, r##"{"c":"#0080ff"}"##);
}

#[test]
fn sign_characters_are_not_hex_digits() {
    assert!(parse_hex("#+1+1+1").is_err());
    assert!("+f+f+f".parse::<Rgba8>().is_err());
    assert!(parse_hex("#-12345").is_err());
    assert!(parse_hex("#1 2").is_err());
}
