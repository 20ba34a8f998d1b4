mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_light_smoothing::{Rgb, SmoothingError, SmoothingState, TargetUpdate};

    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
    const SETTLING: Duration = Duration::from_millis(1000);

    fn ms(value: u64) -> Instant {
        Instant::from_millis(value)
    }

    #[test]
    fn test_first_target_activates() {
        let mut state = SmoothingState::<8>::new();
        assert!(!state.is_active());

        let update = state.set_target(&[RED, BLUE], ms(100), SETTLING);
        assert_eq!(update, Ok(TargetUpdate::Activated));
        assert!(state.is_active());
        assert_eq!(state.led_count(), 2);
        assert_eq!(state.previous_time(), ms(100));
        assert_eq!(state.target_time(), ms(1100));
        assert_eq!(state.target(), &[RED, BLUE]);
    }

    #[test]
    fn test_immediate_tick_after_activation_is_unchanged() {
        let mut state = SmoothingState::<8>::new();
        let frame = [RED, BLUE, Rgb::new(10, 20, 30)];
        state.set_target(&frame, ms(0), SETTLING).unwrap();

        let mut out = [BLACK; 8];
        let count = state.compute_frame(ms(0), &mut out);
        assert_eq!(count, 3);
        assert_eq!(&out[..count], &frame);
    }

    #[test]
    fn test_retarget_keeps_previous() {
        let mut state = SmoothingState::<4>::new();
        state.set_target(&[BLACK], ms(0), SETTLING).unwrap();

        let update = state.set_target(&[RED], ms(300), SETTLING);
        assert_eq!(update, Ok(TargetUpdate::Retargeted));
        assert_eq!(state.previous_time(), ms(0));
        assert_eq!(state.target_time(), ms(1300));
        assert_eq!(state.target(), &[RED]);
        assert_eq!(state.previous()[0].to_rgb(), BLACK);
    }

    #[test]
    fn test_deadline_reached_snaps_to_target() {
        let mut state = SmoothingState::<4>::new();
        state.set_target(&[BLACK, BLACK], ms(0), SETTLING).unwrap();
        state.set_target(&[RED, BLUE], ms(10), SETTLING).unwrap();

        let mut out = [BLACK; 4];
        let count = state.compute_frame(ms(1010), &mut out);
        assert_eq!(&out[..count], &[RED, BLUE]);
        assert_eq!(state.previous_time(), ms(1010));

        let count = state.compute_frame(ms(5000), &mut out);
        assert_eq!(&out[..count], &[RED, BLUE]);
        assert_eq!(state.previous_time(), ms(5000));
    }

    #[test]
    fn test_blend_converges_without_overshoot() {
        let mut state = SmoothingState::<4>::new();
        state.set_target(&[BLACK], ms(0), SETTLING).unwrap();
        state.set_target(&[RED], ms(0), SETTLING).unwrap();

        let mut out = [BLACK; 4];
        let mut last_red = 0;
        for t in (50..1000).step_by(50) {
            state.compute_frame(ms(t), &mut out);
            assert!(out[0].r >= last_red, "red went back at {t} ms");
            assert!(out[0].r < 255, "target reached early at {t} ms");
            assert_eq!(out[0].g, 0);
            assert_eq!(out[0].b, 0);
            last_red = out[0].r;
        }
        assert!(last_red > 200);

        state.compute_frame(ms(1000), &mut out);
        assert_eq!(out[0], RED);
    }

    #[test]
    fn test_blend_fraction_shrinking_window() {
        let mut state = SmoothingState::<4>::new();
        state.set_target(&[BLACK], ms(0), SETTLING).unwrap();
        state.set_target(&[RED], ms(0), SETTLING).unwrap();

        // Half of the window elapsed
        let k = state.blend_fraction(ms(500)).unwrap();
        assert!((k - 0.5).abs() < 1e-6);

        let mut out = [BLACK; 4];
        state.compute_frame(ms(500), &mut out);
        assert_eq!(out[0].r, 128);

        // The window now starts at 500 ms, so 250 ms is again half of it
        let k = state.blend_fraction(ms(750)).unwrap();
        assert!((k - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_repeated_target_does_not_double_count() {
        let mut once = SmoothingState::<4>::new();
        once.set_target(&[BLACK], ms(0), SETTLING).unwrap();
        once.set_target(&[RED], ms(100), SETTLING).unwrap();

        let mut twice = SmoothingState::<4>::new();
        twice.set_target(&[BLACK], ms(0), SETTLING).unwrap();
        twice.set_target(&[RED], ms(100), SETTLING).unwrap();
        twice.set_target(&[RED], ms(100), SETTLING).unwrap();

        let mut out_once = [BLACK; 4];
        let mut out_twice = [BLACK; 4];
        once.compute_frame(ms(400), &mut out_once);
        twice.compute_frame(ms(400), &mut out_twice);
        assert_eq!(out_once, out_twice);
        assert_eq!(once.target_time(), twice.target_time());
    }

    #[test]
    fn test_zero_settling_time_snaps() {
        let mut state = SmoothingState::<4>::new();
        state.set_target(&[BLACK], ms(0), Duration::from_millis(0)).unwrap();
        assert_eq!(state.blend_fraction(ms(0)), None);

        let mut out = [BLUE; 4];
        state.compute_frame(ms(0), &mut out);
        assert_eq!(out[0], BLACK);

        state.set_target(&[RED], ms(20), Duration::from_millis(0)).unwrap();
        state.compute_frame(ms(20), &mut out);
        assert_eq!(out[0], RED);
    }

    #[test]
    fn test_clock_going_backwards_does_not_extrapolate() {
        let mut state = SmoothingState::<4>::new();
        state.set_target(&[BLACK], ms(500), SETTLING).unwrap();
        state.set_target(&[RED], ms(500), SETTLING).unwrap();

        assert_eq!(state.blend_fraction(ms(100)), Some(0.0));

        let mut out = [BLUE; 4];
        state.compute_frame(ms(100), &mut out);
        assert_eq!(out[0], BLACK);
    }

    #[test]
    fn test_deadline_saturates_at_end_of_time() {
        let mut state = SmoothingState::<4>::new();
        let late = Instant::from_ticks(u64::MAX - 10);
        state.set_target(&[RED], late, SETTLING).unwrap();
        assert_eq!(state.target_time(), Instant::MAX);

        let mut out = [BLACK; 4];
        state.compute_frame(late, &mut out);
        assert_eq!(out[0], RED);
    }

    #[test]
    fn test_rejects_invalid_frames() {
        let mut state = SmoothingState::<2>::new();
        assert_eq!(
            state.set_target(&[], ms(0), SETTLING),
            Err(SmoothingError::EmptyFrame)
        );
        assert_eq!(
            state.set_target(&[RED, RED, RED], ms(0), SETTLING),
            Err(SmoothingError::TooManyLeds {
                capacity: 2,
                actual: 3
            })
        );
        assert!(!state.is_active());

        state.set_target(&[RED, RED], ms(0), SETTLING).unwrap();
        assert_eq!(
            state.set_target(&[BLUE], ms(10), SETTLING),
            Err(SmoothingError::LengthMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(state.target(), &[RED, RED]);
        assert_eq!(state.target_time(), ms(1000));
    }

    #[test]
    fn test_reset_returns_to_uninitialized() {
        let mut state = SmoothingState::<4>::new();
        state.set_target(&[RED, RED], ms(0), SETTLING).unwrap();
        state.reset();

        assert!(!state.is_active());
        assert_eq!(state.led_count(), 0);
        assert_eq!(state.previous_time(), ms(0));
        assert_eq!(state.target_time(), ms(0));

        let mut out = [BLUE; 4];
        assert_eq!(state.compute_frame(ms(10), &mut out), 0);
        assert_eq!(out, [BLUE; 4]);

        // A different length is a fresh session, not a mismatch
        let update = state.set_target(&[BLUE], ms(20), SETTLING);
        assert_eq!(update, Ok(TargetUpdate::Activated));
    }
}
