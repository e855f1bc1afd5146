#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that expands a normalized curve into per-minute threshold tables.

use accurate_clocks_core::{
    display_hour, CurveError, FallbackMode, NormalizedCurve, ThresholdEntry, ThresholdTables,
    ENTRIES_PER_TABLE, HOURS_PER_DAY, MINUTES_PER_HOUR,
};
use accurate_clocks_system_time_curve::generate_curve;
use rand::{seq::SliceRandom, Rng};

/// Builds the daytime and fallback range-dispatch tables for one clock variant.
///
/// `model_name` receives the *display* hour and minute of every entry. The
/// `rng` is only consulted when `fallback_mode` is [`FallbackMode::Shuffle`].
pub fn build_threshold_tables<F, R>(
    curve: &NormalizedCurve,
    mut model_name: F,
    fallback_mode: FallbackMode,
    rng: &mut R,
) -> ThresholdTables
where
    F: FnMut(u32, u32) -> String,
    R: Rng + ?Sized,
{
    let daytime = build_entries(curve, &mut model_name);
    let mut fallback = daytime.clone();
    if fallback_mode == FallbackMode::Shuffle {
        shuffle_models(&mut fallback, rng);
    }

    ThresholdTables { daytime, fallback }
}

/// Generates the default curve and builds the tables from it.
pub fn build_threshold_tables_from_scratch<F, R>(
    model_name: F,
    fallback_mode: FallbackMode,
    rng: &mut R,
) -> Result<ThresholdTables, CurveError>
where
    F: FnMut(u32, u32) -> String,
    R: Rng + ?Sized,
{
    let curve = generate_curve()?;
    Ok(build_threshold_tables(
        &curve,
        model_name,
        fallback_mode,
        rng,
    ))
}

fn build_entries<F>(curve: &NormalizedCurve, model_name: &mut F) -> Vec<ThresholdEntry>
where
    F: FnMut(u32, u32) -> String,
{
    let mut entries = Vec::with_capacity(ENTRIES_PER_TABLE);
    for fake_hour in 0..HOURS_PER_DAY {
        let hour = display_hour(fake_hour);
        for minute in 0..MINUTES_PER_HOUR {
            entries.push(ThresholdEntry {
                display_hour: hour,
                display_minute: minute,
                threshold: curve.threshold(fake_hour, minute),
                model_reference: model_name(hour, minute),
            });
        }
    }
    entries
}

/// Permutes model references across entries while leaving thresholds in place.
fn shuffle_models<R>(entries: &mut [ThresholdEntry], rng: &mut R)
where
    R: Rng + ?Sized,
{
    let mut models: Vec<(u32, u32, String)> = entries
        .iter_mut()
        .map(|entry| {
            (
                entry.display_hour,
                entry.display_minute,
                std::mem::take(&mut entry.model_reference),
            )
        })
        .collect();
    models.shuffle(rng);

    for (entry, (hour, minute, model)) in entries.iter_mut().zip(models) {
        entry.display_hour = hour;
        entry.display_minute = minute;
        entry.model_reference = model;
    }
}
