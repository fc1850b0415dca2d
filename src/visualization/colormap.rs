//! 256-entry lookup tables mapping unit values to RGB

/// Number of colormap levels
pub const LEVELS: usize = 256;

/// Precomputed RGB lookup table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Colormap {
    name: &'static str,
    table: [[u8; 3]; LEVELS],
}

fn channel_to_byte(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}

// Piecewise-linear blue -> cyan -> yellow -> red ramp
fn jet_rgb(t: f64) -> [f64; 3] {
    if t < 0.125 {
        [0.0, 0.0, 4.0f64.mul_add(t, 0.5)]
    } else if t < 0.375 {
        [0.0, 4.0 * (t - 0.125), 1.0]
    } else if t < 0.625 {
        let rise = 4.0 * (t - 0.375);
        [rise, 1.0, 1.0 - rise]
    } else if t < 0.875 {
        [1.0, 1.0 - 4.0 * (t - 0.625), 0.0]
    } else {
        [1.0 - 4.0 * (t - 0.875), 0.0, 0.0]
    }
}

impl Colormap {
    /// Simplified "jet" gradient: dark blue at 0 through red to dark red at 1
    pub fn jet() -> Self {
        let mut table = [[0u8; 3]; LEVELS];
        for (index, entry) in table.iter_mut().enumerate() {
            let t = index as f64 / (LEVELS - 1) as f64;
            *entry = jet_rgb(t).map(channel_to_byte);
        }
        Self { name: "jet", table }
    }

    /// Name reported alongside rendered overlays
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Table index for a value, truncating `clamp(value, 0, 1) * 255`
    pub fn level(value: f64) -> usize {
        if value.is_nan() {
            return 0;
        }
        (value.clamp(0.0, 1.0) * (LEVELS - 1) as f64) as usize
    }

    /// Color at a table index; indices past the end map to the last entry
    pub fn color_at(&self, level: usize) -> [u8; 3] {
        self.table
            .get(level.min(LEVELS - 1))
            .copied()
            .unwrap_or([0, 0, 0])
    }

    /// Color for a unit-range value
    pub fn color(&self, value: f64) -> [u8; 3] {
        self.color_at(Self::level(value))
    }
}
