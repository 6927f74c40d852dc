use std::fmt;

/// Border color of an embed preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const DEFAULT_EMBED_COLOR: Rgb = Rgb::new(0x8f, 0xb6, 0x77);

pub fn color_to_int(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) + ((g as u32) << 8) + b as u32
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_int(self) -> u32 {
        color_to_int(self.r, self.g, self.b)
    }

    /// Bits above the low 24 are ignored.
    pub fn from_int(color: u32) -> Self {
        Self {
            r: ((color >> 16) & 0xff) as u8,
            g: ((color >> 8) & 0xff) as u8,
            b: (color & 0xff) as u8,
        }
    }

    /// Reads a computed style value such as `rgb(12, 34, 56)` by taking the first three
    /// runs of digits.
    pub fn parse_css(value: &str) -> Option<Self> {
        let mut channels = value
            .split(|c: char| !c.is_ascii_digit())
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<u8>().ok());

        let r = channels.next()??;
        let g = channels.next()??;
        let b = channels.next()??;

        Some(Self { r, g, b })
    }

    /// Accepts exactly `#rrggbb`.
    pub fn parse_hex(value: &str) -> Option<Self> {
        let hex = value.strip_prefix('#')?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        u32::from_str_radix(hex, 16).ok().map(Self::from_int)
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        DEFAULT_EMBED_COLOR
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}
