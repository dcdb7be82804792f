use serde::{Deserialize, Serialize};

pub const PALETTE_SIZE: usize = 256;

/// One palette entry. Palettes carry no alpha, every color is fully opaque.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xFF]
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct C3Vector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl C3Vector {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        C3Vector { x, y, z }
    }

    pub fn dot(self, other: C3Vector) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}
