mod tests {
    use ws28xx_clockless::{ColorOrder, Rgb};

    const COLOR: Rgb = Rgb { r: 1, g: 2, b: 3 };

    const ALL: [ColorOrder; 6] = [
        ColorOrder::Rgb,
        ColorOrder::Rbg,
        ColorOrder::Grb,
        ColorOrder::Gbr,
        ColorOrder::Brg,
        ColorOrder::Bgr,
    ];

    #[test]
    fn test_channels() {
        assert_eq!(ColorOrder::Rgb.channels(COLOR), [1, 2, 3]);
        assert_eq!(ColorOrder::Grb.channels(COLOR), [2, 1, 3]);
        assert_eq!(ColorOrder::Bgr.channels(COLOR), [3, 2, 1]);
    }

    #[test]
    fn test_assemble_inverts_channels() {
        for order in ALL {
            assert_eq!(order.assemble(order.channels(COLOR)), COLOR);
        }
    }

    #[test]
    fn test_default_is_grb() {
        // WS2812-family wire order
        assert_eq!(ColorOrder::default(), ColorOrder::Grb);
    }
}
