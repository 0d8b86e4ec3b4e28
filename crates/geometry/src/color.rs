use rand::Rng;

/// An 8-bit RGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// A random color with every channel at or above `floor`.
    ///
    /// The floor keeps generated colors away from full black so markers stay
    /// visible against dark edge lines.
    pub fn random(floor: u8, rng: &mut impl Rng) -> Self {
        Self {
            r: rng.random_range(floor..=u8::MAX),
            g: rng.random_range(floor..=u8::MAX),
            b: rng.random_range(floor..=u8::MAX),
        }
    }

    /// `#rrggbb` hex token, always 7 characters.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// RGBA components scaled to [0, 1] for GPU upload.
    pub fn as_rgba_f32(self) -> [f32; 4] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            1.0,
        ]
    }
}
