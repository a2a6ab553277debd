use std::str::FromStr;

use log::warn;
use thiserror::Error;

/// An opaque 24-bit color
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);
    pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);

    /// Parses `name`, falling back to white for colors we don't know
    pub fn named_or_white(name: &str) -> Rgb {
        name.parse().unwrap_or_else(|e| {
            warn!("{}, using white", e);
            Rgb::WHITE
        })
    }

    pub fn bytes(&self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::WHITE
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown color {0:?}")]
pub struct UnknownColor(String);

const NAMED_COLORS: [(&str, Rgb); 16] = [
    ("white", Rgb(0xFF, 0xFF, 0xFF)),
    ("black", Rgb(0x00, 0x00, 0x00)),
    ("red", Rgb(0xFF, 0x00, 0x00)),
    ("green", Rgb(0x00, 0xFF, 0x00)),
    ("blue", Rgb(0x00, 0x00, 0xFF)),
    ("yellow", Rgb(0xFF, 0xFF, 0x00)),
    ("cyan", Rgb(0x00, 0xFF, 0xFF)),
    ("magenta", Rgb(0xFF, 0x00, 0xFF)),
    ("orange", Rgb(0xFF, 0xA5, 0x00)),
    ("amber", Rgb(0xFF, 0xBF, 0x00)),
    ("purple", Rgb(0xA0, 0x20, 0xF0)),
    ("pink", Rgb(0xFF, 0xC0, 0xCB)),
    ("lime", Rgb(0x32, 0xCD, 0x32)),
    ("gold", Rgb(0xFF, 0xD7, 0x00)),
    ("gray", Rgb(0xBE, 0xBE, 0xBE)),
    ("grey", Rgb(0xBE, 0xBE, 0xBE)),
];

impl FromStr for Rgb {
    type Err = UnknownColor;

    /// Accepts a color name (case insensitive) or `#RRGGBB`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownColor(s.to_string());
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(unknown());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| unknown());
            return Ok(Rgb(channel(0)?, channel(2)?, channel(4)?));
        }
        let name = s.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, rgb)| *rgb)
            .ok_or_else(unknown)
    }
}
