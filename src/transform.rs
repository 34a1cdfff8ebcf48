use crate::date::parse_date;
use crate::error::{ClimateError, Result};
use crate::structs::{ClimateRecord, DatedRecord, MonthYearKey, NormalizedDate, month_name};
use log::{debug, warn};
use serde::Serialize;
use std::collections::BTreeMap;

/// Longest bar `render_bar` will produce.
pub const MAX_BAR_LEN: usize = 1000;

const POSITIVE_GLYPH: char = '*';
const NEGATIVE_GLYPH: char = '-';

/// Total precipitation per month/year, in chronological order.
pub type PrecipitationBuckets = BTreeMap<MonthYearKey, f64>;

/// Yearly means of the minimum temperature for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyMeans {
    pub month: i32,
    pub year_start: i32,
    pub year_end: i32,
    /// Mean per year; years without matching records are absent.
    pub means: BTreeMap<i32, f64>,
    /// Years of the window that had no matching records.
    pub missing_years: Vec<i32>,
}

/// Parses every record's date once, dropping records whose date is malformed.
///
/// The result is shared by the range view and both aggregations so that
/// each record is parsed a single time per session.
///
/// # Arguments
///
/// * `records` - Records as produced by the loader
///
/// # Returns
///
/// Returns the records with a parsable date, in input order, paired with
/// their `NormalizedDate`.
pub fn normalize_records(records: &[ClimateRecord]) -> Vec<DatedRecord<'_>> {
    let dated: Vec<DatedRecord<'_>> = records
        .iter()
        .filter_map(|record| match parse_date(&record.date) {
            Ok(date) => Some(DatedRecord { record, date }),
            Err(e) => {
                debug!("Skipping record: {}", e);
                None
            }
        })
        .collect();

    debug!(
        "Normalized {} of {} record dates",
        dated.len(),
        records.len()
    );
    dated
}

/// Returns true when the date's month/year falls in `[start, end]`, both ends inclusive.
pub fn in_range(date: &NormalizedDate, start: MonthYearKey, end: MonthYearKey) -> bool {
    let key = date.key();
    start <= key && key <= end
}

/// Selects the records whose month/year lies within `[start, end]`.
///
/// An inverted range selects nothing.
pub fn filter_range<'a>(
    records: &[DatedRecord<'a>],
    start: MonthYearKey,
    end: MonthYearKey,
) -> Vec<DatedRecord<'a>> {
    records
        .iter()
        .filter(|dated| in_range(&dated.date, start, end))
        .copied()
        .collect()
}

/// Sums daily precipitation per month/year.
///
/// # Arguments
///
/// * `records` - Records with parsed dates
///
/// # Returns
///
/// Returns a map from `MonthYearKey` to total precipitation. Months without
/// any record have no entry, so an empty input yields an empty map.
pub fn accumulate_precipitation(records: &[DatedRecord<'_>]) -> PrecipitationBuckets {
    let mut buckets = PrecipitationBuckets::new();
    for dated in records {
        *buckets.entry(dated.date.key()).or_insert(0.0) += dated.record.precipitation;
    }
    debug!("Accumulated precipitation into {} buckets", buckets.len());
    buckets
}

/// Finds the month/year with the largest total.
///
/// Among equal totals the chronologically earliest key wins. NaN totals
/// never win.
///
/// # Errors
///
/// Returns `ClimateError::EmptyAggregate` when there is no bucket with a
/// comparable total.
pub fn find_max(buckets: &PrecipitationBuckets) -> Result<(MonthYearKey, f64)> {
    let mut best: Option<(MonthYearKey, f64)> = None;
    for (&key, &total) in buckets {
        if total.is_nan() {
            continue;
        }
        match best {
            Some((_, best_total)) if total <= best_total => {}
            _ => best = Some((key, total)),
        }
    }
    best.ok_or_else(|| {
        ClimateError::EmptyAggregate("no precipitation data to rank".to_string())
    })
}

/// Computes, for every year of `[year_start, year_end]`, the mean minimum
/// temperature of the records dated in `target_month` of that year.
///
/// Years without a single matching record are logged at warn level, left
/// out of `means` and listed in `missing_years`.
///
/// # Arguments
///
/// * `records` - Records with parsed dates
/// * `target_month` - Calendar month to average (1-12)
/// * `year_start` - First year of the window (inclusive)
/// * `year_end` - Last year of the window (inclusive)
///
/// # Returns
///
/// Returns a `MonthlyMeans`. An inverted window produces no means and no
/// missing years.
pub fn monthly_min_means(
    records: &[DatedRecord<'_>],
    target_month: i32,
    year_start: i32,
    year_end: i32,
) -> MonthlyMeans {
    let mut sums: BTreeMap<i32, (f64, u32)> = BTreeMap::new();
    for dated in records {
        let date = dated.date;
        if date.month == target_month && (year_start..=year_end).contains(&date.year) {
            let (sum, count) = sums.entry(date.year).or_insert((0.0, 0));
            *sum += dated.record.temp_min;
            *count += 1;
        }
    }

    let label = month_name(target_month)
        .map(str::to_string)
        .unwrap_or_else(|| format!("month {target_month}"));
    let mut means = BTreeMap::new();
    let mut missing_years = Vec::new();
    for year in year_start..=year_end {
        match sums.get(&year) {
            Some(&(sum, count)) => {
                means.insert(year, sum / f64::from(count));
            }
            None => {
                warn!("No data for {} of {}.", label, year);
                missing_years.push(year);
            }
        }
    }

    MonthlyMeans {
        month: target_month,
        year_start,
        year_end,
        means,
        missing_years,
    }
}

/// Arithmetic mean of the per-year means.
///
/// # Errors
///
/// Returns `ClimateError::EmptyAggregate` when no year has a mean.
pub fn overall_mean(means: &BTreeMap<i32, f64>) -> Result<f64> {
    if means.is_empty() {
        return Err(ClimateError::EmptyAggregate(
            "no yearly averages to combine".to_string(),
        ));
    }
    Ok(means.values().sum::<f64>() / means.len() as f64)
}

/// Draws a text bar of `floor(|value| * scale)` glyphs, `*` for
/// non-negative values and `-` for negative ones.
///
/// The length is capped at `MAX_BAR_LEN`; a NaN value or a negative scale
/// gives an empty bar.
pub fn render_bar(value: f64, scale: f64) -> String {
    let glyph = if value >= 0.0 {
        POSITIVE_GLYPH
    } else {
        NEGATIVE_GLYPH
    };
    // float-to-int casts saturate: NaN and negatives become 0
    let len = ((value.abs() * scale).floor() as usize).min(MAX_BAR_LEN);
    std::iter::repeat_n(glyph, len).collect()
}
