#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that derives the normalized time curve from a calibration table.
//!
//! The curve describes where, inside a linear 24-hour frame that starts at
//! 12:00, each real clock hour boundary falls once Minecraft's uneven sun
//! speed is accounted for.

use std::f64::consts::PI;

use accurate_clocks_core::{
    inv_interp, CalibrationTable, CurveAlgorithm, CurveError, NormalizedCurve, CURVE_POINTS,
    HALF_DAY_HOURS, HOURS_PER_DAY, TICKS_PER_DAY,
};

/// Amount subtracted from measured points so that tick `X000` shows `HH:00` rather than `HH-1:59`.
pub const CORRECTION: f64 = 1.0 / 1440.0;

/// Generates the production curve: the sun-angle form over the nominal hour boundaries.
pub fn generate_curve() -> Result<NormalizedCurve, CurveError> {
    generate_curve_for(CurveAlgorithm::SunAngle)
}

/// Generates a curve with the algorithm's own calibration table.
pub fn generate_curve_for(algorithm: CurveAlgorithm) -> Result<NormalizedCurve, CurveError> {
    generate_curve_with(algorithm, &algorithm.calibration_table())
}

/// Generates a curve using the requested algorithm and calibration table.
///
/// The table is only read; calling this repeatedly with the same inputs yields
/// the same curve.
pub fn generate_curve_with(
    algorithm: CurveAlgorithm,
    table: &CalibrationTable,
) -> Result<NormalizedCurve, CurveError> {
    table.validate()?;
    let values = match algorithm {
        CurveAlgorithm::SunAngle => sun_angle_values(table)?,
        CurveAlgorithm::MeasuredLinear => measured_linear_values(table),
    };
    NormalizedCurve::from_values(values)
}

/// Celestial angle the game reports for a tick, in `[0, 1)`.
///
/// The phase is shifted by a quarter day so that tick 6000 (noon) maps to 0.
#[must_use]
pub fn sun_angle(tick: f64) -> f64 {
    let phase = (tick.rem_euclid(TICKS_PER_DAY) / TICKS_PER_DAY - 0.25).rem_euclid(1.0);
    let eased = 1.0 - ((PI * phase).cos() + 1.0) / 2.0;
    phase + (eased - phase) / 3.0
}

fn sun_angle_values(table: &CalibrationTable) -> Result<[f64; CURVE_POINTS], CurveError> {
    let ticks = table.adjusted_ticks();
    let mut raw = [0.0; CURVE_POINTS];
    for (value, tick) in raw.iter_mut().zip(ticks) {
        *value = sun_angle(f64::from(tick));
    }

    let unwrapped = unwrap_cycle(raw);
    let mut normalized = normalize(unwrapped)?;
    normalized[0] = 0.0;
    normalized[CURVE_POINTS - 1] = 1.0;
    Ok(normalized)
}

/// Lifts values that wrapped past 1.0 so the sequence keeps increasing.
fn unwrap_cycle(values: [f64; CURVE_POINTS]) -> [f64; CURVE_POINTS] {
    let mut unwrapped = values;
    let mut offset = 0.0;
    for index in 1..CURVE_POINTS {
        if values[index] + offset < unwrapped[index - 1] {
            offset += 1.0;
        }
        unwrapped[index] = values[index] + offset;
    }
    unwrapped
}

fn normalize(values: [f64; CURVE_POINTS]) -> Result<[f64; CURVE_POINTS], CurveError> {
    let start = values[0];
    let end = values[CURVE_POINTS - 1];
    if end <= start {
        return Err(CurveError::Degenerate { start, end });
    }

    let span = end - start;
    Ok(values.map(|value| (value - start) / span))
}

fn measured_linear_values(table: &CalibrationTable) -> [f64; CURVE_POINTS] {
    let ticks = table.adjusted_ticks().map(f64::from);
    let hours = f64::from(HOURS_PER_DAY);
    let half_day = HALF_DAY_HOURS as usize;
    let mut result = [0.0; CURVE_POINTS];

    for index in 1..half_day {
        let target = target_tick(index);
        result[index] =
            ((index - 1) as f64 + inv_interp(ticks[index - 1], ticks[index], target)) / hours;
    }

    result[half_day] = 0.5;

    for index in half_day + 1..CURVE_POINTS - 1 {
        let target = target_tick(index);
        result[index] =
            (index as f64 + inv_interp(ticks[index], ticks[index + 1], target)) / hours;
    }

    result[CURVE_POINTS - 1] = 1.0;

    for value in &mut result[1..half_day] {
        *value -= CORRECTION;
    }
    // 10:00 and 11:00 sit right on a tick boundary without the extra nudge.
    result[22] -= CORRECTION / 4.0;
    result[23] -= CORRECTION / 4.0;

    result
}

fn target_tick(index: usize) -> f64 {
    (index as f64 + 6.0) * 1000.0
}
