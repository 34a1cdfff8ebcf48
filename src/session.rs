use crate::error::{ClimateError, Result};
use crate::report::{write_chart, write_interval, write_overall_mean, write_rainiest};
use crate::structs::{
    AnalysisConfig, ClimateRecord, DatedRecord, DisplayMode, MonthYearKey, month_from_name,
};
use crate::transform::{
    accumulate_precipitation, filter_range, find_max, monthly_min_means, normalize_records,
    overall_mean,
};
use chrono::Month;
use log::debug;
use std::io::{BufRead, Write};

/// Terminal streams used by a session: answers are read from `input`,
/// questions and notices go to `prompt`, results go to `out`.
pub struct Console<R, P, W> {
    pub input: R,
    pub prompt: P,
    pub out: W,
}

/// Runs the interactive analysis over `records`.
///
/// Steps, in order: interval view, rainiest month, yearly averages of the
/// minimum temperature for a named month, their bar chart and their
/// overall average. Invalid answers abandon only the step they belong to,
/// except the month name which the last three steps depend on.
///
/// # Errors
///
/// Returns error only when reading or writing the console fails.
pub fn run_session<R: BufRead, P: Write, W: Write>(
    records: &[ClimateRecord],
    config: &AnalysisConfig,
    console: &mut Console<R, P, W>,
) -> Result<()> {
    let dated = normalize_records(records);

    let view = interval_view(console, &dated, config);
    recover(console, view)?;

    rainiest_month(console, &dated, config)?;

    let answer = ask_month_name(console);
    let Some((month, month_name)) = recover(console, answer)? else {
        return Ok(());
    };

    let means = monthly_min_means(&dated, month, config.year_start, config.year_end);
    write_chart(
        &mut console.out,
        &means,
        &month_name,
        config.bar_scale,
        config.format,
    )?;

    let mean = match overall_mean(&means.means) {
        Ok(mean) => Some(mean),
        Err(ClimateError::EmptyAggregate(reason)) => {
            debug!("Overall mean unavailable: {}", reason);
            None
        }
        Err(e) => return Err(e),
    };
    write_overall_mean(&mut console.out, mean, &month_name, &means, config.format)
}

fn interval_view<R: BufRead, P: Write, W: Write>(
    console: &mut Console<R, P, W>,
    dated: &[DatedRecord<'_>],
    config: &AnalysisConfig,
) -> Result<()> {
    writeln!(console.prompt, "\n=== Interval view ===")?;
    let start_month = ask_integer(console, "Start month (1-12): ")?;
    let start_year = ask_integer(console, "Start year: ")?;
    let end_month = ask_integer(console, "End month (1-12): ")?;
    let end_year = ask_integer(console, "End year: ")?;
    // both bounds are read before either month is checked
    let start_month = validate_month(start_month)?;
    let end_month = validate_month(end_month)?;

    writeln!(console.prompt, "\nSelect the data to display:")?;
    writeln!(console.prompt, "1) All data")?;
    writeln!(console.prompt, "2) Precipitation only")?;
    writeln!(console.prompt, "3) Temperatures only (max and min)")?;
    writeln!(console.prompt, "4) Humidity and wind only")?;
    let mode: DisplayMode = ask_line(console, "Option: ")?.parse()?;

    let start = MonthYearKey::new(start_year, start_month);
    let end = MonthYearKey::new(end_year, end_month);
    let selected = filter_range(dated, start, end);
    debug!(
        "Interval {}..={} selected {} records",
        start,
        end,
        selected.len()
    );
    write_interval(&mut console.out, &selected, mode, config.format)
}

fn rainiest_month<R: BufRead, P: Write, W: Write>(
    console: &mut Console<R, P, W>,
    dated: &[DatedRecord<'_>],
    config: &AnalysisConfig,
) -> Result<()> {
    let buckets = accumulate_precipitation(dated);
    let rainiest = match find_max(&buckets) {
        Ok(found) => Some(found),
        Err(ClimateError::EmptyAggregate(reason)) => {
            debug!("Rainiest month unavailable: {}", reason);
            None
        }
        Err(e) => return Err(e),
    };
    write_rainiest(&mut console.out, rainiest, config.format)
}

fn ask_month_name<R: BufRead, P: Write, W: Write>(
    console: &mut Console<R, P, W>,
) -> Result<(i32, String)> {
    let answer = ask_line(console, "\nEnter the month name (e.g. 'agosto'): ")?;
    let name = answer.trim().to_lowercase();
    match month_from_name(&name) {
        Some(month) => Ok((month, name)),
        None => Err(ClimateError::InvalidInput(format!(
            "unknown month name {name:?}"
        ))),
    }
}

/// Prints user-facing failures and turns them into `None`; console errors
/// are passed through.
fn recover<R, P: Write, W, T>(
    console: &mut Console<R, P, W>,
    step: Result<T>,
) -> Result<Option<T>> {
    match step {
        Ok(value) => Ok(Some(value)),
        Err(e @ (ClimateError::InvalidInput(_) | ClimateError::EmptyAggregate(_))) => {
            writeln!(console.prompt, "{}", e)?;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn ask_line<R: BufRead, P: Write, W: Write>(
    console: &mut Console<R, P, W>,
    question: &str,
) -> Result<String> {
    write!(console.prompt, "{}", question)?;
    console.prompt.flush()?;

    let mut line = String::new();
    if console.input.read_line(&mut line)? == 0 {
        return Err(ClimateError::InvalidInput(
            "unexpected end of input".to_string(),
        ));
    }
    Ok(line.trim().to_string())
}

fn ask_integer<R: BufRead, P: Write, W: Write>(
    console: &mut Console<R, P, W>,
    question: &str,
) -> Result<i32> {
    let answer = ask_line(console, question)?;
    answer.parse().map_err(|_| {
        ClimateError::InvalidInput(format!("{answer:?} is not a whole number"))
    })
}

fn validate_month(number: i32) -> Result<i32> {
    u8::try_from(number)
        .ok()
        .and_then(|n| Month::try_from(n).ok())
        .map(|month| month.number_from_month() as i32)
        .ok_or_else(|| ClimateError::InvalidInput(format!("month {number} is not in 1-12")))
}
