use crate::error::ClimateError;
use log::{Log, Metadata, Record as LogRecord};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Simple logger implementation
///
/// Writes to stderr so that report output on stdout stays clean.
pub struct SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &LogRecord) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Month names accepted by the yearly-average prompt, January first.
pub static MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Maps a free-text month name to its number (1-12).
///
/// Surrounding whitespace and letter case are ignored.
pub fn month_from_name(name: &str) -> Option<i32> {
    let normalized = name.trim().to_lowercase();
    MONTHS
        .iter()
        .position(|&month| month == normalized)
        .map(|index| index as i32 + 1)
}

/// Name of month `month` (1-12) in the `MONTHS` table.
pub fn month_name(month: i32) -> Option<&'static str> {
    usize::try_from(month - 1)
        .ok()
        .and_then(|index| MONTHS.get(index))
        .copied()
}

/// One day of climate observations as read from the input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimateRecord {
    pub date: String,
    pub precipitation: f64,
    pub temp_max: f64,
    pub temp_min: f64,
    pub humidity: f64,
    pub wind: f64,
}

/// Calendar date extracted from a record's raw date text.
///
/// Fields are not range checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NormalizedDate {
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

impl NormalizedDate {
    pub fn new(year: i32, month: i32, day: i32) -> Self {
        Self { year, month, day }
    }

    pub fn key(&self) -> MonthYearKey {
        MonthYearKey::new(self.year, self.month)
    }
}

/// Month/year grouping key, ordered chronologically (year first, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthYearKey {
    pub year: i32,
    pub month: i32,
}

impl MonthYearKey {
    pub fn new(year: i32, month: i32) -> Self {
        Self { year, month }
    }

    /// Integer encoding `year * 100 + month`, e.g. `202001`.
    pub fn code(&self) -> i64 {
        i64::from(self.year) * 100 + i64::from(self.month)
    }
}

impl fmt::Display for MonthYearKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

/// A record paired with its parsed date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatedRecord<'a> {
    pub record: &'a ClimateRecord,
    pub date: NormalizedDate,
}

/// Column subset shown by the interval view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    All,
    Precipitation,
    Temperatures,
    HumidityWind,
}

impl FromStr for DisplayMode {
    type Err = ClimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::All),
            "2" => Ok(Self::Precipitation),
            "3" => Ok(Self::Temperatures),
            "4" => Ok(Self::HumidityWind),
            other => Err(ClimateError::InvalidInput(format!(
                "unknown option {other:?}"
            ))),
        }
    }
}

/// Output format for computed results
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Configuration for the analysis session
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub year_start: i32,
    pub year_end: i32,
    pub bar_scale: f64,
    pub format: OutputFormat,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            year_start: 2006,
            year_end: 2016,
            bar_scale: 5.0,
            format: OutputFormat::Text,
        }
    }
}
