mod tests {
    use ws28xx_clockless::sim::{SimLine, SimPin, SimTimer, Transition, decode_frame};
    use ws28xx_clockless::{
        ChipsetTiming, ClocklessController, ColorOrder, Duration, FULL_BRIGHTNESS, Instant, Rgb,
        scale8,
    };

    // One simulated cycle per nanosecond keeps durations readable.
    const HZ: u32 = 1_000_000_000;
    const T1: u32 = 250;
    const T2: u32 = 625;
    const T3: u32 = 375;
    // Short latch so back-to-back shows stay fast on the host.
    const RESET_US: u64 = 50;

    const CAP: usize = 1024;
    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };

    fn timing() -> ChipsetTiming {
        ChipsetTiming::from_cycles(T1, T2, T3, RESET_US, HZ)
    }

    fn controller(
        line: &SimLine<CAP>,
    ) -> ClocklessController<SimPin<'_, CAP>, SimTimer<'_, CAP>> {
        let mut controller =
            ClocklessController::new(line.pin(), line.timer(), timing(), ColorOrder::Grb);
        controller.init();
        controller
    }

    fn rising_edges(transitions: &[Transition]) -> usize {
        transitions.iter().filter(|t| t.level).count()
    }

    /// Edge sequence relative to the frame's first rising edge
    fn normalized(transitions: &[Transition]) -> Vec<(u64, bool)> {
        let base = transitions.first().map_or(0, |t| t.cycle);
        transitions
            .iter()
            .map(|t| (t.cycle - base, t.level))
            .collect()
    }

    #[test]
    fn test_zero_length_buffer_is_a_no_op() {
        let line = SimLine::<CAP>::new();
        let mut controller = controller(&line);

        controller.show(&[], FULL_BRIGHTNESS);
        controller.show_color(RED, 0, FULL_BRIGHTNESS);
        controller.clear_leds(0);

        assert!(line.transitions().is_empty());
        assert_eq!(controller.transmitted(), Duration::from_micros(0));
    }

    #[test]
    fn test_scenario_a_ten_red_pixels_full_scale() {
        let line = SimLine::<CAP>::new();
        let mut controller = controller(&line);
        let pixels = [RED; 10];

        controller.show(&pixels, FULL_BRIGHTNESS);

        let transitions = line.transitions();
        assert!(!line.overflowed());
        // 10 pixels x 24 bits, one rising edge per bit period
        assert_eq!(rising_edges(&transitions), 240);

        let decoded: heapless::Vec<Rgb, 16> =
            decode_frame(&transitions, line.clock(), &timing(), ColorOrder::Grb);
        assert_eq!(decoded.as_slice(), &pixels);
    }

    #[test]
    fn test_scenario_b_half_scale() {
        let line = SimLine::<CAP>::new();
        let mut controller = controller(&line);
        let pixels = [RED; 10];

        controller.show(&pixels, 128);

        let decoded: heapless::Vec<Rgb, 16> =
            decode_frame(&line.transitions(), line.clock(), &timing(), ColorOrder::Grb);
        let expected = Rgb {
            r: scale8(255, 128),
            g: 0,
            b: 0,
        };
        assert_eq!(decoded.as_slice(), &[expected; 10]);
    }

    #[test]
    fn test_phase_durations_are_exact() {
        let line = SimLine::<CAP>::new();
        let mut controller = controller(&line);

        controller.show(&[RED], FULL_BRIGHTNESS);

        let transitions = line.transitions();
        assert_eq!(transitions.len(), 48);

        // GRB wire order: 8 zero bits, 8 one bits, 8 zero bits
        for bit in 0..24 {
            let rise = transitions[2 * bit];
            let fall = transitions[2 * bit + 1];
            assert!(rise.level && !fall.level);
            assert_eq!(fall.cycle - rise.cycle, u64::from(T1), "bit {bit} high phase");

            let low_end = transitions
                .get(2 * bit + 2)
                .map_or(line.clock(), |next| next.cycle);
            let expected_low = if (8..16).contains(&bit) { T3 } else { T2 };
            assert_eq!(
                low_end - fall.cycle,
                u64::from(expected_low),
                "bit {bit} low phase"
            );
        }
    }

    #[test]
    fn test_scale_zero_still_clocks_out_data() {
        let line = SimLine::<CAP>::new();
        let mut controller = controller(&line);

        controller.show(&[RED; 10], 0);

        // Scaling affects amplitude, never timing: full cadence, all-dark data
        let transitions = line.transitions();
        assert_eq!(rising_edges(&transitions), 240);
        let decoded: heapless::Vec<Rgb, 16> =
            decode_frame(&transitions, line.clock(), &timing(), ColorOrder::Grb);
        assert_eq!(decoded.as_slice(), &[Rgb::new(0, 0, 0); 10]);
    }

    #[test]
    fn test_show_is_idempotent() {
        let line = SimLine::<CAP>::new();
        let mut controller = controller(&line);
        let pixels = [Rgb::new(37, 113, 211); 4];

        controller.show(&pixels, 200);
        let first = normalized(&line.transitions());

        line.clear();
        controller.show(&pixels, 200);
        let second = normalized(&line.transitions());

        assert_eq!(first, second);
    }

    #[test]
    fn test_show_color_applies_inline_scaling() {
        let line = SimLine::<CAP>::new();
        let mut controller = controller(&line);
        let color = Rgb::new(200, 100, 50);

        controller.show_color(color, 3, 128);

        let decoded: heapless::Vec<Rgb, 8> =
            decode_frame(&line.transitions(), line.clock(), &timing(), ColorOrder::Grb);
        let expected = Rgb {
            r: scale8(200, 128),
            g: scale8(100, 128),
            b: scale8(50, 128),
        };
        assert_eq!(decoded.as_slice(), &[expected; 3]);
    }

    #[test]
    fn test_clear_leds_emits_black_frame() {
        let line = SimLine::<CAP>::new();
        let mut controller = controller(&line);

        controller.show(&[RED; 5], FULL_BRIGHTNESS);
        line.clear();
        controller.clear_leds(5);

        let decoded: heapless::Vec<Rgb, 8> =
            decode_frame(&line.transitions(), line.clock(), &timing(), ColorOrder::Grb);
        assert_eq!(decoded.as_slice(), &[Rgb::new(0, 0, 0); 5]);
        assert!(!line.level());
    }

    #[test]
    fn test_minimum_wait_between_frames() {
        let line = SimLine::<CAP>::new();
        let mut controller = controller(&line);

        controller.show(&[RED; 2], FULL_BRIGHTNESS);
        let after_first = Instant::now();
        controller.show(&[RED; 2], FULL_BRIGHTNESS);

        // The second call must block until the latch time has elapsed.
        // Allow a little slack for the gap between show() returning and
        // the timestamp being taken.
        assert!(after_first.elapsed() >= Duration::from_micros(RESET_US - 10));
    }

    #[test]
    fn test_transmitted_time_advances_by_frame_estimate() {
        let line = SimLine::<CAP>::new();
        let mut controller = controller(&line);

        controller.show(&[RED; 10], FULL_BRIGHTNESS);
        // 10 px x 24 bits x 1250 cycles at 1 GHz
        assert_eq!(controller.transmitted(), Duration::from_micros(300));

        controller.show(&[RED; 10], FULL_BRIGHTNESS);
        assert_eq!(controller.transmitted(), Duration::from_micros(600));
    }
}
