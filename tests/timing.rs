mod tests {
    use ws28xx_clockless::{ChipsetTiming, Duration};

    // At 1 GHz one cycle is one nanosecond, so the presets must reproduce
    // their datasheet phase durations directly.
    const NS_HZ: u32 = 1_000_000_000;

    #[test]
    fn test_ws2812_datasheet_period() {
        let timing = ChipsetTiming::ws2812(NS_HZ);
        assert_eq!((timing.t1, timing.t2, timing.t3), (250, 625, 375));
        assert_eq!(timing.bit_period(), 1250);
    }

    #[test]
    fn test_preset_periods() {
        assert_eq!(ChipsetTiming::ws2811(NS_HZ).bit_period(), 1280);
        assert_eq!(ChipsetTiming::sk6812(NS_HZ).bit_period(), 1200);
        assert_eq!(ChipsetTiming::tm1803(NS_HZ).bit_period(), 2500);
    }

    #[test]
    fn test_cycle_resolution_at_240mhz() {
        // ESP32 core clock; 1250 ns works out to exactly 300 cycles
        let timing = ChipsetTiming::ws2812(240_000_000);
        assert_eq!((timing.t1, timing.t2, timing.t3), (60, 150, 90));
        assert_eq!(timing.bit_period(), 300);
    }

    #[test]
    fn test_ns_conversion_rounds_to_nearest() {
        // 350 ns at 16 MHz is 5.6 cycles and must round up, not truncate
        let timing = ChipsetTiming::from_ns(350, 350, 350, 50, 16_000_000);
        assert_eq!(timing.t1, 6);
    }

    #[test]
    fn test_frame_duration_estimate() {
        let timing = ChipsetTiming::ws2812(NS_HZ);
        // 10 pixels x 24 bits x 1250 ns = 300 us
        assert_eq!(timing.frame_duration(10), Duration::from_micros(300));
        assert_eq!(timing.frame_duration(0), Duration::from_micros(0));
    }

    #[test]
    fn test_reset_durations() {
        assert_eq!(ChipsetTiming::ws2812(NS_HZ).reset, Duration::from_micros(280));
        assert_eq!(ChipsetTiming::ws2811(NS_HZ).reset, Duration::from_micros(50));
    }
}
