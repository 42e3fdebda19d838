use super::*;

#[test]
fn hex_forms_parse() {
    assert_eq!(parse_hex("#fff").unwrap(), Color::WHITE);
    assert_eq!(parse_hex("00FF00").unwrap(), Color::GREEN);
    assert_eq!(
        parse_hex("#10203040").unwrap(),
        Color::rgba(0x10, 0x20, 0x30, 0x40)
    );
    assert!(parse_hex("#12345").is_err());
    assert!(parse_hex("#zzzzzz").is_err());
}

#[test]
fn deserializes_every_representation() {
    let c: Color = serde_json::from_str("\"#000000\"").unwrap();
    assert_eq!(c, Color::BLACK);

    let c: Color = serde_json::from_str(r#"{"r":1,"g":2,"b":3}"#).unwrap();
    assert_eq!(c, Color::rgba(1, 2, 3, 255));

    let c: Color = serde_json::from_str("[4,5,6,7]").unwrap();
    assert_eq!(c, Color::rgba(4, 5, 6, 7));

    assert!(serde_json::from_str::<Color>("[1,2]").is_err());
}
