use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn hex(self) -> u32 {
        ((self.0 as u32) << 16) | ((self.1 as u32) << 8) | self.2 as u32
    }

    /// Rough perceived brightness, used to pick a readable label color.
    pub fn is_dark(self) -> bool {
        let luma = 0.299_f64.mul_add(
            f64::from(self.0),
            0.587_f64.mul_add(f64::from(self.1), 0.114 * f64::from(self.2)),
        );
        luma < 140.0
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06x}", self.hex())
    }
}

pub const SEGMENT_COLORS: [Rgb; 7] = [
    Rgb(0xea, 0x38, 0x4c), // red
    Rgb(0x1a, 0x1a, 0x1a), // black
    Rgb(0x66, 0xbb, 0x6a), // green
    Rgb(0x1e, 0xae, 0xdb), // blue
    Rgb(0x8b, 0x5c, 0xf6), // purple
    Rgb(0xf9, 0x73, 0x16), // orange
    Rgb(0xd9, 0x46, 0xef), // pink
];

pub const CONFETTI_COLORS: [Rgb; 8] = [
    Rgb(0xea, 0x38, 0x4c),
    Rgb(0x66, 0xbb, 0x6a),
    Rgb(0x1e, 0xae, 0xdb),
    Rgb(0x8b, 0x5c, 0xf6),
    Rgb(0xf9, 0x73, 0x16),
    Rgb(0xd9, 0x46, 0xef),
    Rgb(0xff, 0xeb, 0x3b),
    Rgb(0x00, 0xbc, 0xd4),
];

pub const fn segment_color(index: usize) -> Rgb {
    SEGMENT_COLORS[index % SEGMENT_COLORS.len()]
}
