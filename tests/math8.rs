mod tests {
    use ws28xx_clockless::math8::{nscale8x3, scale8};

    #[test]
    fn test_scale8() {
        assert_eq!(scale8(255, 128), 128);
        assert_eq!(scale8(0, 128), 0);
        assert_eq!(scale8(128, 128), 64);
        assert_eq!(scale8(128, 255), 128);
        assert_eq!(scale8(128, 0), 0);
    }

    #[test]
    fn test_scale8_identity() {
        // 255 must be a true no-op for every input byte
        for value in 0..=255u8 {
            assert_eq!(scale8(value, 255), value);
        }
    }

    #[test]
    fn test_scale8_zero() {
        for value in 0..=255u8 {
            assert_eq!(scale8(value, 0), 0);
        }
    }

    #[test]
    fn test_nscale8x3() {
        let mut channels = [255, 128, 0];
        nscale8x3(&mut channels, 128);
        assert_eq!(channels, [128, 64, 0]);

        let mut channels = [10, 20, 30];
        nscale8x3(&mut channels, 255);
        assert_eq!(channels, [10, 20, 30]);
    }
}
