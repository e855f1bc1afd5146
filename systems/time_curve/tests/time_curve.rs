use accurate_clocks_core::{
    CalibrationTable, CurveAlgorithm, CurveError, CURVE_POINTS, TICKS_PER_DAY,
};
use accurate_clocks_system_time_curve::{generate_curve, generate_curve_with, sun_angle};

#[test]
fn default_curve_spans_one_cycle() {
    let curve = generate_curve().expect("default calibration produces a curve");
    let values = curve.values();

    assert_eq!(values[0], 0.0, "12:00 must map to the curve start");
    assert_eq!(values[CURVE_POINTS - 1], 1.0, "closing 12:00 must map to the end");
    assert!(
        (values[12] - 0.5).abs() < 1e-12,
        "00:00 should map to the midpoint, got {}",
        values[12],
    );
}

#[test]
fn default_curve_is_monotonic() {
    let curve = generate_curve().expect("default calibration produces a curve");
    for (index, pair) in curve.values().windows(2).enumerate() {
        assert!(
            pair[0] <= pair[1],
            "curve decreases between points {index} and {}: {} -> {}",
            index + 1,
            pair[0],
            pair[1],
        );
    }
}

#[test]
fn default_curve_matches_sun_angle_of_hour_ticks() {
    let curve = generate_curve().expect("default calibration produces a curve");
    for index in 1..CURVE_POINTS - 1 {
        let tick = (index as f64 + 6.0) * 1000.0;
        let expected = sun_angle(tick);
        assert!(
            (curve.values()[index] - expected).abs() < 1e-12,
            "point {index} should equal the sun angle at tick {tick}",
        );
    }
}

#[test]
fn curve_generation_is_repeatable() {
    let first = generate_curve().expect("first generation succeeds");
    let second = generate_curve().expect("second generation succeeds");
    assert_eq!(first, second, "regeneration must not drift");
}

#[test]
fn afternoon_hours_land_before_linear_positions() {
    let curve = generate_curve().expect("default calibration produces a curve");
    let linear_one_pm = 1.0 / 24.0;
    assert!(
        curve.values()[1] < linear_one_pm,
        "the sun moves slowly after noon, so 13:00 lands early on the curve",
    );
}

#[test]
fn measured_linear_curve_is_monotonic_with_fixed_points() {
    let curve = generate_curve_with(CurveAlgorithm::MeasuredLinear, &CalibrationTable::MEASURED)
        .expect("measured calibration produces a curve");
    let values = curve.values();

    assert_eq!(values[0], 0.0);
    assert_eq!(values[12], 0.5);
    assert_eq!(values[CURVE_POINTS - 1], 1.0);
    assert!(
        values.windows(2).all(|pair| pair[0] <= pair[1]),
        "legacy curve should not decrease: {values:?}",
    );
}

#[test]
fn measured_linear_curve_places_two_pm_at_tick_8000() {
    let curve = generate_curve_with(CurveAlgorithm::MeasuredLinear, &CalibrationTable::MEASURED)
        .expect("measured calibration produces a curve");

    // 14:00 is measured at tick 8645 on an even face; tick 8000 falls inside the 13:00 segment.
    let two_pm = curve.values()[2] * 24.0;
    let expected = 1.0 + (8000.0 - 7400.0) / (8645.0 - 7400.0) - 24.0 / 1440.0;
    assert!(
        (two_pm - expected).abs() < 1e-9,
        "14:00 should sit at {expected} fake hours, got {two_pm}",
    );
}

#[test]
fn algorithms_agree_on_the_midpoint_only() {
    let sun = generate_curve().expect("sun-angle curve");
    let measured =
        generate_curve_with(CurveAlgorithm::MeasuredLinear, &CalibrationTable::MEASURED)
            .expect("measured curve");

    assert!((sun.values()[12] - measured.values()[12]).abs() < 1e-12);
    assert_ne!(
        sun, measured,
        "the two forms are independent approximations"
    );
}

#[test]
fn bad_calibration_edit_is_reported_with_hour_labels() {
    let mut ticks = *CalibrationTable::MEASURED.raw_ticks();
    ticks[14] = 20_400;
    let table = CalibrationTable::new(ticks, CalibrationTable::MEASURED.wrap_start());

    let error = generate_curve_with(CurveAlgorithm::MeasuredLinear, &table)
        .expect_err("a tick pushed past its neighbour must be rejected");

    match &error {
        CurveError::NonMonotonic {
            from_label,
            to_label,
            from,
            to,
        } => {
            assert!(to < from, "reported values should decrease");
            assert_eq!(from_label, "01:00");
            assert_eq!(to_label, "02:00");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn sun_angle_thresholds_stay_within_one_day() {
    let curve = generate_curve().expect("default calibration produces a curve");
    for hour in 0..24 {
        let threshold = curve.threshold(hour, 59);
        assert!(
            (0.0..=TICKS_PER_DAY).contains(&threshold),
            "threshold {threshold} for hour {hour} leaves the day",
        );
    }
}

#[test]
fn duplicated_calibration_tick_is_fatal() {
    let mut ticks = *CalibrationTable::MEASURED.raw_ticks();
    ticks[1] = 8000;
    ticks[2] = 8000;
    let table = CalibrationTable::new(ticks, CalibrationTable::MEASURED.wrap_start());

    let error = generate_curve_with(CurveAlgorithm::MeasuredLinear, &table)
        .expect_err("two equal ticks leave no segment to interpolate");

    match &error {
        CurveError::NonFinite { label, value } => {
            assert_eq!(label, "14:00");
            assert!(value.is_nan(), "reported value should be the NaN");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn out_of_range_calibration_tick_is_fatal() {
    let mut ticks = *CalibrationTable::HOUR_BOUNDARIES.raw_ticks();
    ticks[22] = 30_000;
    let table = CalibrationTable::new(ticks, CalibrationTable::HOUR_BOUNDARIES.wrap_start());

    assert_eq!(
        generate_curve_with(CurveAlgorithm::SunAngle, &table),
        Err(CurveError::TickOutOfRange {
            index: 22,
            tick: 30_000
        })
    );
}
