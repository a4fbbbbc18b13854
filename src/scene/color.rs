use crate::foundation::error::{MeshError, MeshResult};

/// One palette entry. Ids are unique within a palette; values may repeat.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PaletteColor {
    /// Stable identifier.
    pub id: String,
    /// Hex or CSS color.
    #[serde(rename = "color", alias = "value")]
    pub value: String,
}

impl PaletteColor {
    /// Create a palette entry.
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a hex or CSS color: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()`,
    /// `hsl()`, `hsla()`, `transparent` or a basic named color.
    pub fn parse(s: &str) -> MeshResult<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).map_err(MeshError::validation);
        }
        let lower = s.to_ascii_lowercase();
        if let Some((name, args)) = split_function(&lower) {
            return parse_function(name, args).map_err(MeshError::validation);
        }
        named(&lower)
            .ok_or_else(|| MeshError::validation(format!("unrecognized color \"{s}\"")))
    }

    /// Max per-channel absolute difference, ignoring alpha.
    pub fn rgb_distance(self, other: Self) -> u8 {
        let d = |a: u8, b: u8| a.abs_diff(b);
        d(self.r, other.r).max(d(self.g, other.g)).max(d(self.b, other.b))
    }
}

fn parse_hex(s: &str) -> Result<Rgba8, String> {
    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }
    fn hex_nibble(c: &str) -> Result<u8, String> {
        let v = u8::from_str_radix(c, 16).map_err(|_| format!("invalid hex digit \"{c}\""))?;
        Ok(v * 17)
    }

    if !s.is_ascii() {
        return Err("hex color must be ascii".to_owned());
    }
    let (r, g, b, a) = match s.len() {
        3 | 4 => {
            let r = hex_nibble(&s[0..1])?;
            let g = hex_nibble(&s[1..2])?;
            let b = hex_nibble(&s[2..3])?;
            let a = if s.len() == 4 {
                hex_nibble(&s[3..4])?
            } else {
                255
            };
            (r, g, b, a)
        }
        6 | 8 => {
            let r = hex_byte(&s[0..2])?;
            let g = hex_byte(&s[2..4])?;
            let b = hex_byte(&s[4..6])?;
            let a = if s.len() == 8 {
                hex_byte(&s[6..8])?
            } else {
                255
            };
            (r, g, b, a)
        }
        _ => {
            return Err("hex color must be #RGB, #RGBA, #RRGGBB or #RRGGBBAA".to_owned());
        }
    };
    Ok(Rgba8 { r, g, b, a })
}

fn split_function(s: &str) -> Option<(&str, &str)> {
    let open = s.find('(')?;
    let inner = s[open + 1..].strip_suffix(')')?;
    Some((s[..open].trim(), inner))
}

fn parse_function(name: &str, args: &str) -> Result<Rgba8, String> {
    let parts: Vec<&str> = args
        .split([',', ' ', '/'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(format!("{name}() expects 3 or 4 components"));
    }
    let alpha = match parts.get(3) {
        Some(p) => parse_unit(p, 1.0)?,
        None => 1.0,
    };
    let to_u8 = |x: f64| (x.clamp(0.0, 1.0) * 255.0).round() as u8;
    match name {
        "rgb" | "rgba" => Ok(Rgba8 {
            r: to_u8(parse_unit(parts[0], 255.0)?),
            g: to_u8(parse_unit(parts[1], 255.0)?),
            b: to_u8(parse_unit(parts[2], 255.0)?),
            a: to_u8(alpha),
        }),
        "hsl" | "hsla" => {
            let h = parts[0]
                .trim_end_matches("deg")
                .parse::<f64>()
                .map_err(|_| format!("invalid hue \"{}\"", parts[0]))?;
            let s = parse_unit(parts[1], 100.0)?;
            let l = parse_unit(parts[2], 100.0)?;
            let (r, g, b) = hsl_to_rgb(h, s, l);
            Ok(Rgba8 {
                r: to_u8(r),
                g: to_u8(g),
                b: to_u8(b),
                a: to_u8(alpha),
            })
        }
        _ => Err(format!("unsupported color function \"{name}\"")),
    }
}

/// Parse a number or percentage into `0..1`, dividing bare numbers by `scale`.
fn parse_unit(s: &str, scale: f64) -> Result<f64, String> {
    if let Some(pct) = s.strip_suffix('%') {
        let v = pct
            .parse::<f64>()
            .map_err(|_| format!("invalid percentage \"{s}\""))?;
        return Ok(v / 100.0);
    }
    let v = s
        .parse::<f64>()
        .map_err(|_| format!("invalid number \"{s}\""))?;
    Ok(v / scale)
}

/// HSL to RGB in `0..=1`, using the per-channel hue offset form.
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let h = h.rem_euclid(360.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    let a = s * l.min(1.0 - l);
    let channel = |n: f64| {
        let k = (n + h / 30.0) % 12.0;
        l - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0)
    };
    (channel(0.0), channel(8.0), channel(4.0))
}

fn named(s: &str) -> Option<Rgba8> {
    let c = match s {
        "transparent" => Rgba8 {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        },
        "black" => Rgba8::rgb(0, 0, 0),
        "white" => Rgba8::rgb(255, 255, 255),
        "red" => Rgba8::rgb(255, 0, 0),
        "lime" => Rgba8::rgb(0, 255, 0),
        "green" => Rgba8::rgb(0, 128, 0),
        "blue" => Rgba8::rgb(0, 0, 255),
        "yellow" => Rgba8::rgb(255, 255, 0),
        "cyan" | "aqua" => Rgba8::rgb(0, 255, 255),
        "magenta" | "fuchsia" => Rgba8::rgb(255, 0, 255),
        "gray" | "grey" => Rgba8::rgb(128, 128, 128),
        "silver" => Rgba8::rgb(192, 192, 192),
        "maroon" => Rgba8::rgb(128, 0, 0),
        "olive" => Rgba8::rgb(128, 128, 0),
        "purple" => Rgba8::rgb(128, 0, 128),
        "teal" => Rgba8::rgb(0, 128, 128),
        "navy" => Rgba8::rgb(0, 0, 128),
        "orange" => Rgba8::rgb(255, 165, 0),
        "pink" => Rgba8::rgb(255, 192, 203),
        "coral" => Rgba8::rgb(255, 127, 80),
        "gold" => Rgba8::rgb(255, 215, 0),
        "indigo" => Rgba8::rgb(75, 0, 130),
        "violet" => Rgba8::rgb(238, 130, 238),
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/color.rs"]
mod tests;
