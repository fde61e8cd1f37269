use serde::{Deserialize, Serialize};

/// Maps an escape iteration to an RGB color.
///
/// Only escaped pixels are colored; pixels that stay bounded keep the
/// grid's zeroed black.
pub trait Palette: Sync {
    fn color(&self, iteration: u32) -> [u8; 3];
}

/// Smooth escape-time palette: three cosine bands over `ln(iteration)`.
///
/// Each channel is `round(255 · (1 + cos(f · ln i)) / 2)` for its own
/// frequency `f`. Working in log space keeps the bands wide at deep zooms,
/// where escape counts run into the thousands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CosinePalette {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl CosinePalette {
    pub const DEFAULT_RED: f64 = 3.32;
    pub const DEFAULT_GREEN: f64 = 0.774;
    pub const DEFAULT_BLUE: f64 = 0.412;

    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }
}

impl Default for CosinePalette {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RED, Self::DEFAULT_GREEN, Self::DEFAULT_BLUE)
    }
}

#[inline]
fn cosine_channel(frequency: f64, log_iter: f64) -> u8 {
    let v = 255.0 * (1.0 + (frequency * log_iter).cos()) / 2.0;
    // NaN (from a NaN frequency) saturates to 0 in the cast.
    v.round().clamp(0.0, 255.0) as u8
}

impl Palette for CosinePalette {
    #[inline]
    fn color(&self, iteration: u32) -> [u8; 3] {
        let log_iter = (iteration as f64).ln();
        [
            cosine_channel(self.red, log_iter),
            cosine_channel(self.green, log_iter),
            cosine_channel(self.blue, log_iter),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_colorable_iteration() {
        assert_eq!(CosinePalette::default().color(2), [42, 237, 250]);
        assert_eq!(CosinePalette::default().color(3), [16, 212, 242]);
    }

    #[test]
    fn deep_iterations_stay_in_range() {
        let p = CosinePalette::default();
        assert_eq!(p.color(100), [11, 11, 87]);
        assert_eq!(p.color(6000), [23, 242, 12]);
        // u8 already bounds the channels; this just exercises the extremes.
        let _ = p.color(u32::MAX);
    }

    #[test]
    fn log_of_one_is_pure_white() {
        // ln(1) = 0 puts every band at its peak. The kernel never reaches
        // this because no point escapes at i = 1.
        assert_eq!(CosinePalette::default().color(1), [255, 255, 255]);
    }

    #[test]
    fn frequencies_are_independent() {
        let p = CosinePalette::new(0.0, 0.774, 0.412);
        // cos(0) = 1 on the red band for every iteration.
        for i in [2, 17, 999] {
            assert_eq!(p.color(i)[0], 255);
        }
    }

    #[test]
    fn serde_round_trip_keeps_frequencies() {
        let json = serde_json::to_string(&CosinePalette::default()).unwrap();
        assert!(json.contains("3.32"), "{json}");
        let back: CosinePalette = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CosinePalette::default());
    }
}
