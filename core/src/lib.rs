#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Accurate Clocks pack generator.
//!
//! This crate defines the vocabulary that connects the pure systems with the
//! packaging adapters. The time-curve system turns a [`CalibrationTable`] into
//! a validated [`NormalizedCurve`], the threshold system expands that curve
//! into [`ThresholdTables`], and adapters serialize the resulting
//! [`ThresholdEntry`] values into resource-pack item states. Nothing in this
//! crate performs I/O.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of game ticks in one in-game day.
pub const TICKS_PER_DAY: f64 = 24_000.0;

/// Integer form of [`TICKS_PER_DAY`] used for raw calibration ticks.
pub const TICKS_PER_DAY_U32: u32 = 24_000;

/// Number of hours displayed across a full clock cycle.
pub const HOURS_PER_DAY: u32 = 24;

/// Offset between fake hours and display hours.
pub const HALF_DAY_HOURS: u32 = 12;

/// Number of minutes in each displayed hour.
pub const MINUTES_PER_HOUR: u32 = 60;

/// Number of hour boundaries in a curve, including the closing 12:00.
pub const CURVE_POINTS: usize = 25;

/// Number of entries in every range-dispatch table.
pub const ENTRIES_PER_TABLE: usize = (HOURS_PER_DAY * MINUTES_PER_HOUR) as usize;

/// Tolerance applied when checking that a curve never decreases.
pub const MONOTONIC_EPSILON: f64 = 1e-9;

/// Game ticks recorded at each real-clock hour boundary, starting at 12:00.
///
/// Point 0 and point 24 both describe 12:00 and close the cycle. Ticks from
/// [`CalibrationTable::wrap_start`] onwards belong to the following day and are
/// shifted by a full day before use. The table itself is never mutated; every
/// consumer works on the copy returned by [`CalibrationTable::adjusted_ticks`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalibrationTable {
    ticks: [u32; CURVE_POINTS],
    wrap_start: usize,
}

impl CalibrationTable {
    /// Manually measured ticks at which an evenly spaced clock face shows `HH:00`.
    pub const MEASURED: Self = Self::new(
        [
            6000,  // 12:00
            7400,
            8645,
            9781,
            10837,
            11834,
            12786, // 18:00
            13702,
            14591,
            15460,
            16314,
            17160,
            18000, // 00:00
            18841,
            19687,
            20541,
            21410,
            22299,
            23215, // 06:00
            167,
            1164,
            2220,
            3356,
            4569,
            6000,  // 12:00
        ],
        19,
    );

    /// Nominal ticks at which each real hour starts: `(hour + 6) * 1000` wrapped to one day.
    pub const HOUR_BOUNDARIES: Self = Self::new(
        [
            6000, 7000, 8000, 9000, 10000, 11000, 12000, 13000, 14000, 15000, 16000, 17000, 18000,
            19000, 20000, 21000, 22000, 23000, 0, 1000, 2000, 3000, 4000, 5000, 6000,
        ],
        18,
    );

    /// Creates a calibration table from raw ticks and the first index that wraps past midnight.
    #[must_use]
    pub const fn new(ticks: [u32; CURVE_POINTS], wrap_start: usize) -> Self {
        Self { ticks, wrap_start }
    }

    /// Raw ticks as recorded, before the day wraparound is applied.
    #[must_use]
    pub const fn raw_ticks(&self) -> &[u32; CURVE_POINTS] {
        &self.ticks
    }

    /// Index of the first tick that belongs to the following day.
    #[must_use]
    pub const fn wrap_start(&self) -> usize {
        self.wrap_start
    }

    /// Checks that every raw tick lies within one day and the wrap start is in bounds.
    pub fn validate(&self) -> Result<(), CurveError> {
        if self.wrap_start > CURVE_POINTS {
            return Err(CurveError::WrapStartOutOfRange {
                wrap_start: self.wrap_start,
            });
        }
        match self
            .ticks
            .iter()
            .enumerate()
            .find(|(_, tick)| **tick >= TICKS_PER_DAY_U32)
        {
            Some((index, &tick)) => Err(CurveError::TickOutOfRange { index, tick }),
            None => Ok(()),
        }
    }

    /// Returns a copy of the ticks with one day added from [`Self::wrap_start`] onwards.
    ///
    /// Ticks that would overflow saturate; [`Self::validate`] rejects such tables.
    #[must_use]
    pub fn adjusted_ticks(&self) -> [u32; CURVE_POINTS] {
        let mut adjusted = self.ticks;
        for tick in adjusted.iter_mut().skip(self.wrap_start) {
            *tick = tick.saturating_add(TICKS_PER_DAY_U32);
        }
        adjusted
    }
}

impl Default for CalibrationTable {
    fn default() -> Self {
        Self::HOUR_BOUNDARIES
    }
}

/// Strategy used to turn a calibration table into a normalized curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CurveAlgorithm {
    /// Evaluates the game's celestial-angle easing at every hour boundary.
    #[default]
    SunAngle,
    /// Linearly inverts measured ticks and applies fixed per-hour corrections.
    MeasuredLinear,
}

impl CurveAlgorithm {
    /// Calibration table the algorithm is designed to consume.
    #[must_use]
    pub const fn calibration_table(self) -> CalibrationTable {
        match self {
            Self::SunAngle => CalibrationTable::HOUR_BOUNDARIES,
            Self::MeasuredLinear => CalibrationTable::MEASURED,
        }
    }
}

impl fmt::Display for CurveAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SunAngle => write!(f, "sun-angle"),
            Self::MeasuredLinear => write!(f, "measured-linear"),
        }
    }
}

/// Errors raised while deriving a normalized curve.
///
/// Every variant points at a bad calibration edit and is never recovered from.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CurveError {
    /// Two adjacent curve points decrease.
    #[error(
        "time curve is non-monotonic between {from_label} and {to_label}: {from:.7} -> {to:.7}"
    )]
    NonMonotonic {
        /// Label of the earlier hour boundary, formatted as `HH:00`.
        from_label: String,
        /// Label of the later hour boundary, formatted as `HH:00`.
        to_label: String,
        /// Value of the earlier point.
        from: f64,
        /// Value of the later point.
        to: f64,
    },
    /// A curve point is NaN or infinite, typically from two equal calibration ticks.
    #[error("time curve point at {label} is not finite: {value}")]
    NonFinite {
        /// Label of the hour boundary, formatted as `HH:00`.
        label: String,
        /// Offending value.
        value: f64,
    },
    /// A raw calibration tick lies outside a single day.
    #[error("calibration tick {tick} at index {index} must be below 24000")]
    TickOutOfRange {
        /// Position of the tick in the table.
        index: usize,
        /// Offending raw tick.
        tick: u32,
    },
    /// The wraparound index points past the end of the table.
    #[error("calibration wrap start {wrap_start} exceeds the 25 curve points")]
    WrapStartOutOfRange {
        /// Offending wrap start.
        wrap_start: usize,
    },
    /// The unwrapped curve does not advance, so it cannot be rescaled.
    #[error("cannot normalize time curve: end {end} must be greater than start {start}")]
    Degenerate {
        /// First unwrapped value.
        start: f64,
        /// Last unwrapped value.
        end: f64,
    },
    /// The curve does not start at exactly 0.0 and end at exactly 1.0.
    #[error("time curve must span 0.0 to 1.0, found {first} to {last}")]
    Endpoints {
        /// First value of the curve.
        first: f64,
        /// Last value of the curve.
        last: f64,
    },
}

/// Monotonic sequence of 25 fractional-day values, one per fake hour boundary.
///
/// `0.0` marks 12:00 and `1.0` marks 12:00 of the next cycle. The only way to
/// obtain a curve is through [`NormalizedCurve::from_values`], which enforces
/// both the endpoints and monotonicity.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedCurve([f64; CURVE_POINTS]);

impl NormalizedCurve {
    /// Validates the provided values and wraps them into a curve.
    pub fn from_values(values: [f64; CURVE_POINTS]) -> Result<Self, CurveError> {
        let first = values[0];
        let last = values[CURVE_POINTS - 1];
        if first != 0.0 || last != 1.0 {
            return Err(CurveError::Endpoints { first, last });
        }

        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(CurveError::NonFinite {
                label: hour_label(index),
                value,
            });
        }

        for index in 1..CURVE_POINTS {
            let from = values[index - 1];
            let to = values[index];
            if to + MONOTONIC_EPSILON < from {
                return Err(CurveError::NonMonotonic {
                    from_label: hour_label(index - 1),
                    to_label: hour_label(index),
                    from,
                    to,
                });
            }
        }

        Ok(Self(values))
    }

    /// All curve points in fake-hour order.
    #[must_use]
    pub const fn values(&self) -> &[f64; CURVE_POINTS] {
        &self.0
    }

    /// Curve value at the provided hour boundary, if it exists.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// Threshold, in ticks, at which the given fake hour and minute begin.
    ///
    /// Fake hours outside `0..24` are clamped to the last segment.
    #[must_use]
    pub fn threshold(&self, fake_hour: u32, minute: u32) -> f64 {
        let hour = (fake_hour.min(HOURS_PER_DAY - 1)) as usize;
        let lower = self.0[hour] * TICKS_PER_DAY;
        let upper = self.0[hour + 1] * TICKS_PER_DAY;
        interp(lower, upper, f64::from(minute) / f64::from(MINUTES_PER_HOUR))
    }
}

/// How the fallback range-dispatch table assigns models to thresholds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackMode {
    /// Fallback entries mirror the daytime entries exactly.
    #[default]
    Same,
    /// Fallback entries keep the thresholds but permute the models randomly.
    Shuffle,
}

/// Single minute of displayed time paired with its activation threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdEntry {
    /// Hour shown on the clock face, in `0..24`.
    pub display_hour: u32,
    /// Minute shown on the clock face, in `0..60`.
    pub display_minute: u32,
    /// Time property value, in ticks, at which the entry becomes active.
    pub threshold: f64,
    /// Opaque reference to the model rendered for this entry.
    pub model_reference: String,
}

/// Daytime and fallback range-dispatch tables built from the same thresholds.
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdTables {
    /// Entries selected by the real in-world daytime.
    pub daytime: Vec<ThresholdEntry>,
    /// Entries selected when no real daytime is available.
    pub fallback: Vec<ThresholdEntry>,
}

/// Displayed clock time with minute resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime {
    hour: u32,
    minute: u32,
}

impl ClockTime {
    /// Creates a clock time, wrapping values that exceed a day or an hour.
    #[must_use]
    pub const fn new(hour: u32, minute: u32) -> Self {
        Self {
            hour: hour % HOURS_PER_DAY,
            minute: minute % MINUTES_PER_HOUR,
        }
    }

    /// Hour component in `0..24`.
    #[must_use]
    pub const fn hour(&self) -> u32 {
        self.hour
    }

    /// Minute component in `0..60`.
    #[must_use]
    pub const fn minute(&self) -> u32 {
        self.minute
    }

    /// Minutes elapsed since 00:00.
    #[must_use]
    pub const fn minute_of_day(&self) -> u32 {
        self.hour * MINUTES_PER_HOUR + self.minute
    }

    /// Iterates every minute of a day from 00:00 to 23:59.
    pub fn every_minute() -> impl Iterator<Item = Self> {
        (0..HOURS_PER_DAY)
            .flat_map(|hour| (0..MINUTES_PER_HOUR).map(move |minute| Self::new(hour, minute)))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_time(self.hour, self.minute))
    }
}

/// Converts a fake hour index into the hour shown on the clock face.
#[must_use]
pub const fn display_hour(fake_hour: u32) -> u32 {
    if fake_hour < HALF_DAY_HOURS {
        fake_hour + HALF_DAY_HOURS
    } else {
        fake_hour - HALF_DAY_HOURS
    }
}

/// Labels a curve index with the wall-clock hour it represents, as `HH:00`.
#[must_use]
pub fn hour_label(index: usize) -> String {
    let hour = display_hour((index % HOURS_PER_DAY as usize) as u32);
    format!("{hour:02}:00")
}

/// Formats an hour and minute as the four-digit `HHMM` stem used in model names.
#[must_use]
pub fn format_time(hour: u32, minute: u32) -> String {
    format!("{hour:02}{minute:02}")
}

/// Builds the model reference for a displayed time below `prefix`.
#[must_use]
pub fn clock_model_name(prefix: &str, hour: u32, minute: u32) -> String {
    format!("{prefix}clock_{}", format_time(hour, minute))
}

/// Linear interpolation between `lower` and `upper` at fraction `t`.
#[must_use]
pub fn interp(lower: f64, upper: f64, t: f64) -> f64 {
    (1.0 - t) * lower + t * upper
}

/// Fraction at which `value` lies between `lower` and `upper`.
#[must_use]
pub fn inv_interp(lower: f64, upper: f64, value: f64) -> f64 {
    (value - lower) / (upper - lower)
}
