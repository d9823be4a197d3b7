mod curve_tests {
    use crate::curve::{percentage_for_ratio, Gas, GasCurve, CO_CURVE, LPG_CURVE};
    use crate::error::ErrorKind;

    #[test]
    fn unit_ratio_with_zero_intercept_is_ten_to_x0() {
        let curve = GasCurve::new(2.5, 0.0, -0.4);
        let ppm = percentage_for_ratio(1.0, &curve).unwrap();
        assert!((ppm - 10f64.powf(2.5)).abs() < 1e-9);
    }

    #[test]
    fn non_positive_ratio_is_domain_error() {
        for ratio in [0.0, -3.2, f64::NAN] {
            let err = percentage_for_ratio(ratio, &CO_CURVE).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Domain);
        }
    }

    #[test]
    fn clean_air_ratio_reference_values() {
        let rs = 5.0 * (1023.0 - 100.0) / 100.0;
        let ratio = rs / (rs / 9.6);

        let co = percentage_for_ratio(ratio, &CO_CURVE).unwrap();
        assert!((co - 0.004988535056049012).abs() < 1e-6);

        let lpg = percentage_for_ratio(ratio, &LPG_CURVE).unwrap();
        assert!((lpg - 0.007852915670552919).abs() < 1e-6);
    }

    #[test]
    fn lower_ratio_means_more_gas() {
        // negative slopes: resistance drops as concentration rises
        for gas in Gas::ALL {
            let high = percentage_for_ratio(0.5, &gas.curve()).unwrap();
            let low = percentage_for_ratio(5.0, &gas.curve()).unwrap();
            assert!(high > low, "{gas}");
        }
    }

    #[test]
    fn gas_codes_follow_report_order() {
        for (i, gas) in Gas::ALL.iter().enumerate() {
            assert_eq!(gas.index(), i);
        }
        assert_eq!(Gas::Propane.label(), "PROPANE");
        assert_eq!(Gas::Smoke.curve(), GasCurve::new(2.30724, 0.53268, -0.44082));
    }
}
