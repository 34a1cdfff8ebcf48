pub mod date;
pub mod error;
pub mod load;
pub mod report;
pub mod session;
pub mod structs;
pub mod transform;

// Re-export public API
pub use date::parse_date;
pub use error::{ClimateError, DateFormatError, Result};
pub use load::{load_records, read_records};
pub use session::{Console, run_session};
pub use structs::{
    AnalysisConfig, ClimateRecord, DatedRecord, DisplayMode, MONTHS, MonthYearKey,
    NormalizedDate, OutputFormat, SimpleLogger, month_from_name, month_name,
};
pub use transform::{
    MonthlyMeans, PrecipitationBuckets, accumulate_precipitation, filter_range, find_max,
    in_range, monthly_min_means, normalize_records, overall_mean, render_bar,
};
