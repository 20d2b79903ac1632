use crate::foundation::math::{clamp01, lerp};

/// Straight-alpha sRGB color with normalized `0..1` channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
    /// Alpha channel.
    pub a: f64,
}

impl Rgba {
    /// Build a color from normalized channels.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    fn from_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            f64::from(a) / 255.0,
        )
    }

    /// Parse a CSS color: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()`,
    /// `hsl()`, `hsla()` or a basic named color.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        if let Some(args) = func_args(&s, "rgba").or_else(|| func_args(&s, "rgb")) {
            return parse_rgb_args(&args);
        }
        if let Some(args) = func_args(&s, "hsla").or_else(|| func_args(&s, "hsl")) {
            return parse_hsl_args(&args);
        }
        named(&s)
    }

    /// CSS serialization: `#rrggbb` when opaque, `rgba(r, g, b, a)` otherwise.
    pub fn to_css(self) -> String {
        fn to_u8(x: f64) -> u8 {
            (clamp01(x) * 255.0).round() as u8
        }
        let (r, g, b) = (to_u8(self.r), to_u8(self.g), to_u8(self.b));
        let a = clamp01(self.a);
        if a >= 1.0 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            let a = (a * 1000.0).round() / 1000.0;
            format!("rgba({r}, {g}, {b}, {a})")
        }
    }

    /// Interpolate in OKLab space; alpha blends linearly.
    pub fn mix_oklab(self, other: Self, t: f64) -> Self {
        let a = Oklab::from_srgb(self);
        let b = Oklab::from_srgb(other);
        let mixed = Oklab {
            l: lerp(a.l, b.l, t),
            a: lerp(a.a, b.a, t),
            b: lerp(a.b, b.b, t),
        };
        let mut out = mixed.to_srgb();
        out.a = lerp(self.a, other.a, t);
        out
    }
}

/// Blend two CSS colors at `t`.
///
/// Parseable colors blend perceptually; otherwise the result cuts from `from` to `to`
/// at `t = 0.5`.
pub fn blend_css_colors(from: &str, to: &str, t: f64) -> String {
    if t <= 0.0 {
        return from.to_owned();
    }
    if t >= 1.0 {
        return to.to_owned();
    }
    match (Rgba::parse(from), Rgba::parse(to)) {
        (Some(a), Some(b)) => a.mix_oklab(b, t).to_css(),
        _ => {
            tracing::warn!(from, to, "unparseable color, falling back to a hard cut");
            if t < 0.5 { from.to_owned() } else { to.to_owned() }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Oklab {
    l: f64,
    a: f64,
    b: f64,
}

impl Oklab {
    fn from_srgb(c: Rgba) -> Self {
        let r = srgb_to_linear(c.r);
        let g = srgb_to_linear(c.g);
        let b = srgb_to_linear(c.b);

        let l = (0.412_221_470_8 * r + 0.536_332_536_3 * g + 0.051_445_992_9 * b).cbrt();
        let m = (0.211_903_498_2 * r + 0.680_699_545_1 * g + 0.107_396_956_6 * b).cbrt();
        let s = (0.088_302_461_9 * r + 0.281_718_837_6 * g + 0.629_978_700_5 * b).cbrt();

        Self {
            l: 0.210_454_255_3 * l + 0.793_617_785_0 * m - 0.004_072_046_8 * s,
            a: 1.977_998_495_1 * l - 2.428_592_205_0 * m + 0.450_593_709_9 * s,
            b: 0.025_904_037_1 * l + 0.782_771_766_2 * m - 0.808_675_766_0 * s,
        }
    }

    fn to_srgb(self) -> Rgba {
        let l = (self.l + 0.396_337_777_4 * self.a + 0.215_803_757_3 * self.b).powi(3);
        let m = (self.l - 0.105_561_345_8 * self.a - 0.063_854_172_8 * self.b).powi(3);
        let s = (self.l - 0.089_484_177_5 * self.a - 1.291_485_548_0 * self.b).powi(3);

        let r = 4.076_741_662_1 * l - 3.307_711_591_3 * m + 0.230_969_929_2 * s;
        let g = -1.268_438_004_6 * l + 2.609_757_401_1 * m - 0.341_319_396_5 * s;
        let b = -0.004_196_086_3 * l - 0.703_418_614_7 * m + 1.707_614_701_0 * s;

        Rgba::new(
            linear_to_srgb(r),
            linear_to_srgb(g),
            linear_to_srgb(b),
            1.0,
        )
    }
}

fn srgb_to_linear(c: f64) -> f64 {
    let c = clamp01(c);
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f64) -> f64 {
    let c = clamp01(c);
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    fn nibble(c: u8) -> Option<u8> {
        (c as char).to_digit(16).map(|d| d as u8)
    }
    fn byte(pair: &[u8]) -> Option<u8> {
        Some(nibble(pair[0])? * 16 + nibble(pair[1])?)
    }

    let bytes = hex.as_bytes();
    match bytes.len() {
        3 | 4 => {
            let mut ch = [255u8; 4];
            for (i, &c) in bytes.iter().enumerate() {
                let n = nibble(c)?;
                ch[i] = n * 16 + n;
            }
            Some(Rgba::from_u8(ch[0], ch[1], ch[2], ch[3]))
        }
        6 | 8 => {
            let mut ch = [255u8; 4];
            for (i, pair) in bytes.chunks(2).enumerate() {
                ch[i] = byte(pair)?;
            }
            Some(Rgba::from_u8(ch[0], ch[1], ch[2], ch[3]))
        }
        _ => None,
    }
}

fn func_args(s: &str, name: &str) -> Option<Vec<String>> {
    let inner = s.strip_prefix(name)?.trim_start().strip_prefix('(')?;
    let inner = inner.strip_suffix(')')?;
    let args: Vec<String> = inner
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .map(str::to_owned)
        .collect();
    Some(args)
}

fn parse_alpha(arg: Option<&String>) -> Option<f64> {
    match arg {
        None => Some(1.0),
        Some(a) => match a.strip_suffix('%') {
            Some(pct) => pct.parse::<f64>().ok().map(|v| clamp01(v / 100.0)),
            None => a.parse::<f64>().ok().map(clamp01),
        },
    }
}

fn parse_rgb_args(args: &[String]) -> Option<Rgba> {
    if !(3..=4).contains(&args.len()) {
        return None;
    }
    let mut ch = [0.0; 3];
    for (i, a) in args.iter().take(3).enumerate() {
        ch[i] = match a.strip_suffix('%') {
            Some(pct) => pct.parse::<f64>().ok()? / 100.0,
            None => a.parse::<f64>().ok()? / 255.0,
        };
    }
    let alpha = parse_alpha(args.get(3))?;
    Some(Rgba::new(
        clamp01(ch[0]),
        clamp01(ch[1]),
        clamp01(ch[2]),
        alpha,
    ))
}

fn parse_hsl_args(args: &[String]) -> Option<Rgba> {
    if !(3..=4).contains(&args.len()) {
        return None;
    }
    let h = args[0].trim_end_matches("deg").parse::<f64>().ok()?;
    let s = args[1].strip_suffix('%')?.parse::<f64>().ok()? / 100.0;
    let l = args[2].strip_suffix('%')?.parse::<f64>().ok()? / 100.0;
    let a = parse_alpha(args.get(3))?;
    Some(hsla_to_rgba(h, s, l, a))
}

fn hsla_to_rgba(h: f64, s: f64, l: f64, a: f64) -> Rgba {
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    let s = clamp01(s);
    let l = clamp01(l);

    if s == 0.0 {
        return Rgba::new(l, l, l, a);
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    Rgba::new(
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
        a,
    )
}

fn named(s: &str) -> Option<Rgba> {
    let (r, g, b, a) = match s {
        "black" => (0, 0, 0, 255),
        "white" => (255, 255, 255, 255),
        "red" => (255, 0, 0, 255),
        "green" => (0, 128, 0, 255),
        "lime" => (0, 255, 0, 255),
        "blue" => (0, 0, 255, 255),
        "yellow" => (255, 255, 0, 255),
        "cyan" | "aqua" => (0, 255, 255, 255),
        "magenta" | "fuchsia" => (255, 0, 255, 255),
        "gray" | "grey" => (128, 128, 128, 255),
        "orange" => (255, 165, 0, 255),
        "purple" => (128, 0, 128, 255),
        "transparent" => (0, 0, 0, 0),
        _ => return None,
    };
    Some(Rgba::from_u8(r, g, b, a))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/color.rs"]
mod tests;
