//! Tests for colormap lookup tables

#[cfg(test)]
mod tests {
    use slicescan::visualization::Colormap;
    use slicescan::visualization::colormap::LEVELS;

    // Tests values are clamped and truncated onto table levels
    // Verified by rounding instead of truncating
    #[test]
    fn test_level_mapping() {
        assert_eq!(Colormap::level(0.0), 0);
        assert_eq!(Colormap::level(1.0), LEVELS - 1);
        assert_eq!(Colormap::level(0.5), 127);
        assert_eq!(Colormap::level(-3.0), 0);
        assert_eq!(Colormap::level(7.0), 255);
        assert_eq!(Colormap::level(f64::NAN), 0);
    }

    // Tests the jet ramp runs from dark blue through green to dark red
    // Verified by reversing the gradient
    #[test]
    fn test_jet_endpoints() {
        let jet = Colormap::jet();

        assert_eq!(jet.name(), "jet");
        assert_eq!(jet.color(0.0), [0, 0, 127]);
        assert_eq!(jet.color(1.0), [127, 0, 0]);

        let [r, g, b] = jet.color(0.5);
        assert_eq!(g, 255);
        assert!(r > 100 && b > 100);
    }

    // Tests exact entries at each breakpoint and inside every piece
    // Verified by swapping the green and blue channels of the cyan rise
    #[test]
    fn test_jet_piecewise_entries() {
        let jet = Colormap::jet();
        let expected: [(usize, [u8; 3]); 13] = [
            (16, [0, 0, 191]),
            (31, [0, 0, 251]),
            (32, [0, 0, 255]),
            (64, [0, 128, 255]),
            (95, [0, 252, 255]),
            (96, [1, 255, 253]),
            (128, [129, 255, 125]),
            (159, [253, 255, 1]),
            (160, [255, 252, 0]),
            (192, [255, 124, 0]),
            (223, [255, 0, 0]),
            (224, [251, 0, 0]),
            (240, [187, 0, 0]),
        ];

        for (level, color) in expected {
            assert_eq!(jet.color_at(level), color, "level {level}");
        }
    }

    // Tests out-of-range table indices saturate at the last entry
    // Verified by returning black past the end
    #[test]
    fn test_color_at_saturates() {
        let jet = Colormap::jet();
        assert_eq!(jet.color_at(10_000), jet.color_at(LEVELS - 1));
    }
}
