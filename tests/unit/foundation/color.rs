use super::*;

#[test]
fn parses_six_digit_hex() {
    let c = Rgba8::from_hex("#ff8000").unwrap();
    assert_eq!(c, Rgba8::rgb(0xff, 0x80, 0x00));
    assert_eq!(c.a, 255);
}

#[test]
fn parses_eight_digit_hex_and_is_case_insensitive() {
    let c = Rgba8::from_hex("#FF8000CC").unwrap();
    assert_eq!(c, Rgba8::rgba(0xff, 0x80, 0x00, 0xcc));
    assert_eq!(Rgba8::from_hex("ff8000").unwrap(), Rgba8::rgb(0xff, 0x80, 0x00));
}

#[test]
fn rejects_malformed_hex() {
    assert!(Rgba8::from_hex("#ff80").is_err());
    assert!(Rgba8::from_hex("#gggggg").is_err());
    assert!(Rgba8::from_hex("").is_err());
}

#[test]
fn rejects_multibyte_input_without_panicking() {
    // "é" is two bytes, so these land on the 6- and 8-byte length arms
    // without sitting on char boundaries.
    assert!(Rgba8::from_hex("aaaé.").is_err());
    assert!(Rgba8::from_hex("#aaaé.").is_err());
    assert!(Rgba8::from_hex("aaaaaé.").is_err());
    assert!(serde_json::from_value::<Rgba8>(serde_json::json!("aaaé.")).is_err());
}

#[test]
fn to_hex_drops_alpha_only_when_opaque() {
    assert_eq!(Rgba8::rgb(0, 0, 0).to_hex(), "#000000");
    assert_eq!(Rgba8::rgba(0xff, 0xff, 0xff, 0x80).to_hex(), "#ffffff80");
    assert_eq!(Rgba8::rgba(0xff, 0xff, 0xff, 0x80).to_hex_rgb(), "#ffffff");
}

#[test]
fn serde_round_trips_as_hex_strings() {
    let c = Rgba8::rgba(0x12, 0x34, 0x56, 0x78);
    let json = serde_json::to_value(c).unwrap();
    assert_eq!(json, serde_json::json!("#12345678"));
    let back: Rgba8 = serde_json::from_value(json).unwrap();
    assert_eq!(back, c);
}
