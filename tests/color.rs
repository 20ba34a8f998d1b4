mod tests {
    use myrtio_light_smoothing::color::{Rgb, RgbF, channel_to_u8};

    #[test]
    fn test_channel_to_u8_rounds_and_clamps() {
        assert_eq!(channel_to_u8(12.49), 12);
        assert_eq!(channel_to_u8(12.5), 13);
        assert_eq!(channel_to_u8(-3.0), 0);
        assert_eq!(channel_to_u8(300.0), 255);
        assert_eq!(channel_to_u8(f32::NAN), 0);
    }

    #[test]
    fn test_approach() {
        let mut color = RgbF::from(Rgb::new(0, 100, 200));
        color.approach(Rgb::new(200, 100, 0), 0.5);
        assert_eq!(color, RgbF::new(100.0, 100.0, 100.0));
        assert_eq!(color.to_rgb(), Rgb::new(100, 100, 100));

        color.approach(Rgb::new(200, 100, 0), 0.0);
        assert_eq!(color.to_rgb(), Rgb::new(100, 100, 100));

        color.approach(Rgb::new(200, 100, 0), 1.0);
        assert_eq!(color.to_rgb(), Rgb::new(200, 100, 0));
    }
}
