use core::fmt;
use serde::{Deserialize, Serialize};

/// 24-bit RGB color, formats as `#rrggbb`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(u32);

impl Color {
    pub const fn from_rgb(rgb: u32) -> Self {
        Self(rgb & 0x00ff_ffff)
    }

    pub const fn rgb(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

/// Default palette, 22 colors picked to be easy to tell apart.
pub const PALETTE: [Color; 22] = [
    Color::from_rgb(0xe6194b),
    Color::from_rgb(0x3cb44b),
    Color::from_rgb(0xffe119),
    Color::from_rgb(0x4363d8),
    Color::from_rgb(0xf58231),
    Color::from_rgb(0x911eb4),
    Color::from_rgb(0x46f0f0),
    Color::from_rgb(0xf032e6),
    Color::from_rgb(0xbcf60c),
    Color::from_rgb(0xfabebe),
    Color::from_rgb(0x008080),
    Color::from_rgb(0xe6beff),
    Color::from_rgb(0x9a6324),
    Color::from_rgb(0xfffac8),
    Color::from_rgb(0x800000),
    Color::from_rgb(0xaaffc3),
    Color::from_rgb(0x808000),
    Color::from_rgb(0xffd8b1),
    Color::from_rgb(0x000075),
    Color::from_rgb(0x808080),
    Color::from_rgb(0xffffff),
    Color::from_rgb(0x000000),
];
