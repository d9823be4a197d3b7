mod config_tests {
    use std::time::Duration;

    use crate::ads1x15::{Gain, Variant};
    use crate::config::{parse_config, parse_int};
    use crate::detector::DetectorConfig;

    #[test]
    fn defaults_match_the_board() {
        let args = parse_config(["gas-detection"]).unwrap();

        assert_eq!(args.converter, Variant::Ads1115);
        assert_eq!(args.pin, 0);
        assert_eq!(args.address, 0x48);
        assert_eq!(args.bus, 1);
        assert_eq!(args.gain, Gain::One);
        assert_eq!(args.ro, None);
        assert!(!args.timestamps);
        assert_eq!(args.pause(), Duration::from_millis(250));
        assert_eq!(args.detector_config(), DetectorConfig::default());
    }

    #[test]
    fn accepts_original_flag_spelling() {
        let args = parse_config(["gas-detection", "--convertor", "ads1015"]).unwrap();
        assert_eq!(args.converter, Variant::Ads1015);
    }

    #[test]
    fn integer_flags_take_prefixed_literals() {
        let args = parse_config([
            "gas-detection",
            "--address",
            "0x49",
            "--pin",
            "0b11",
            "--bus",
            "0o2",
        ])
        .unwrap();

        assert_eq!(args.address, 0x49);
        assert_eq!(args.pin, 3);
        assert_eq!(args.bus, 2);
    }

    #[test]
    fn ro_skips_calibration_and_knobs_reach_config() {
        let args = parse_config([
            "gas-detection",
            "--ro",
            "4.807",
            "--gain",
            "2/3",
            "--load-resistance",
            "10",
            "--clean-air-factor",
            "3.6",
            "--scale-max",
            "4.096",
            "--read-samples",
            "8",
            "--read-interval",
            "20",
        ])
        .unwrap();

        assert_eq!(args.ro, Some(4.807));
        assert_eq!(args.gain, Gain::TwoThirds);
        let config = args.detector_config();
        assert_eq!(config.load_resistance, 10.0);
        assert_eq!(config.clean_air_factor, 3.6);
        assert_eq!(config.scale_max, 4.096);
        assert_eq!(config.reading.count, 8);
        assert_eq!(config.reading.interval, Duration::from_millis(20));
        assert_eq!(config.calibration, DetectorConfig::default().calibration);
    }

    #[test]
    fn rejects_pins_past_p3() {
        assert!(parse_config(["gas-detection", "--pin", "4"]).is_err());
    }

    #[test]
    fn rejects_oversized_address() {
        assert!(parse_config(["gas-detection", "--address", "0x10000"]).is_err());
    }

    #[test]
    fn parses_integer_literals() {
        assert_eq!(parse_int("72"), Ok(72));
        assert_eq!(parse_int("0x48"), Ok(0x48));
        assert_eq!(parse_int("0X4a"), Ok(0x4a));
        assert_eq!(parse_int("0b1001000"), Ok(72));
        assert_eq!(parse_int("0o110"), Ok(72));
        assert_eq!(parse_int("0"), Ok(0));
    }

    #[test]
    fn rejects_malformed_literals() {
        for input in ["", "0x", "48h", "0b102", "-1", "0x1g"] {
            assert!(parse_int(input).is_err(), "{input}");
        }
    }
}
