//! Pure Business Logic Functions
//!
//! Funktionen ohne Hardware-Dependencies (testbar!)

use rgb::RGB8;

/// Durchläuft eine feste Farbpalette zyklisch
///
/// # Beispiele
///
/// ```
/// # use rgb::RGB8;
/// # use ws2812_core::PaletteCycle;
/// const PALETTE: [RGB8; 2] = [RGB8 { r: 10, g: 0, b: 0 }, RGB8 { r: 0, g: 10, b: 0 }];
/// let mut cycle = PaletteCycle::new(&PALETTE);
/// assert_eq!(cycle.next_color(), Some(RGB8 { r: 10, g: 0, b: 0 }));
/// assert_eq!(cycle.next_color(), Some(RGB8 { r: 0, g: 10, b: 0 }));
/// assert_eq!(cycle.next_color(), Some(RGB8 { r: 10, g: 0, b: 0 }));
/// ```
#[derive(Debug, Clone)]
pub struct PaletteCycle<'a> {
    palette: &'a [RGB8],
    position: usize,
}

impl<'a> PaletteCycle<'a> {
    pub const fn new(palette: &'a [RGB8]) -> Self {
        Self {
            palette,
            position: 0,
        }
    }

    /// Nächste Farbe, `None` bei leerer Palette
    pub fn next_color(&mut self) -> Option<RGB8> {
        let color = self.palette.get(self.position).copied()?;
        self.position = (self.position + 1) % self.palette.len();
        Some(color)
    }
}
