use std::fmt;

/// A display color attached to a response id. Opaque to the model; renderers
/// turn it into whatever their backend draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorToken {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorToken {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

pub const PASTEL_PALETTE: [ColorToken; 12] = [
    ColorToken::rgb(0xff, 0xb3, 0xba),
    ColorToken::rgb(0xff, 0xdf, 0xba),
    ColorToken::rgb(0xff, 0xff, 0xba),
    ColorToken::rgb(0xba, 0xff, 0xc9),
    ColorToken::rgb(0xba, 0xe1, 0xff),
    ColorToken::rgb(0xd7, 0xba, 0xff),
    ColorToken::rgb(0xff, 0xc8, 0xdd),
    ColorToken::rgb(0xcd, 0xe7, 0xb0),
    ColorToken::rgb(0xa3, 0xd8, 0xf4),
    ColorToken::rgb(0xf7, 0xd6, 0xa8),
    ColorToken::rgb(0xc5, 0xce, 0xff),
    ColorToken::rgb(0xb5, 0xea, 0xd7),
];
