use super::*;

#[test]
fn parses_hex_forms() {
    assert_eq!(Rgba8::parse("#ff0000").unwrap(), Rgba8::rgb(255, 0, 0));
    assert_eq!(Rgba8::parse("#F00").unwrap(), Rgba8::rgb(255, 0, 0));
    let c = Rgba8::parse("#0000ff80").unwrap();
    assert_eq!((c.b, c.a), (255, 128));
    let c = Rgba8::parse("#0f08").unwrap();
    assert_eq!((c.g, c.a), (255, 136));
    assert!(Rgba8::parse("#12345").is_err());
    assert!(Rgba8::parse("#gg0000").is_err());
}

#[test]
fn parses_functional_forms() {
    assert_eq!(
        Rgba8::parse("rgb(10, 20, 30)").unwrap(),
        Rgba8::rgb(10, 20, 30)
    );
    let c = Rgba8::parse("rgba(255, 0, 0, 0.5)").unwrap();
    assert_eq!((c.r, c.a), (255, 128));
    assert_eq!(
        Rgba8::parse("hsl(0, 100%, 50%)").unwrap(),
        Rgba8::rgb(255, 0, 0)
    );
    assert_eq!(
        Rgba8::parse("hsl(240deg 100% 50%)").unwrap(),
        Rgba8::rgb(0, 0, 255)
    );
    assert_eq!(
        Rgba8::parse("hsl(120, 100%, 25%)").unwrap(),
        Rgba8::rgb(0, 128, 0)
    );
    assert_eq!(
        Rgba8::parse("hsl(-330, 0%, 50%)").unwrap(),
        Rgba8::rgb(128, 128, 128)
    );
    assert!(Rgba8::parse("rgb(1, 2)").is_err());
    assert!(Rgba8::parse("lab(1, 2, 3)").is_err());
}

#[test]
fn parses_named_colors_case_insensitively() {
    assert_eq!(Rgba8::parse("White").unwrap(), Rgba8::rgb(255, 255, 255));
    assert_eq!(Rgba8::parse("transparent").unwrap().a, 0);
    assert!(Rgba8::parse("not-a-color").is_err());
}

#[test]
fn palette_color_serializes_value_as_color() {
    let c = PaletteColor::new("c0", "#abcdef");
    let v = serde_json::to_value(&c).unwrap();
    assert_eq!(v, serde_json::json!({"id": "c0", "color": "#abcdef"}));

    let de: PaletteColor =
        serde_json::from_value(serde_json::json!({"id": "c1", "value": "#000"})).unwrap();
    assert_eq!(de.value, "#000");
}

#[test]
fn rgb_distance_ignores_alpha() {
    let a = Rgba8::rgb(10, 20, 30);
    let b = Rgba8 {
        r: 12,
        g: 15,
        b: 30,
        a: 0,
    };
    assert_eq!(a.rgb_distance(b), 5);
}
