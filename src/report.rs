use crate::error::Result;
use crate::structs::{DatedRecord, DisplayMode, MonthYearKey, OutputFormat};
use crate::transform::{MonthlyMeans, render_bar};
use serde::Serialize;
use serde_json::{Value, json};
use std::io::Write;

/// Writes the records of an interval view, limited to the columns of `mode`.
///
/// # Arguments
/// * `out` - Destination for the table
/// * `records` - Records selected by the range filter
/// * `mode` - Column subset to show
/// * `format` - Text table or JSON array
///
/// # Errors
/// Returns error if writing to `out` fails.
pub fn write_interval<W: Write>(
    out: &mut W,
    records: &[DatedRecord<'_>],
    mode: DisplayMode,
    format: OutputFormat,
) -> Result<()> {
    if format == OutputFormat::Json {
        let rows: Vec<Value> = records.iter().map(|d| interval_json(d, mode)).collect();
        return write_json(out, &rows);
    }

    writeln!(out, "\n--- Selected data ---")?;
    match mode {
        DisplayMode::All => {
            writeln!(out, "Date\t\tPrecipitation\tTemp Max\tTemp Min\tHumidity\tWind")?;
            for d in records {
                let r = d.record;
                writeln!(
                    out,
                    "{}\t{:.2}\t\t{:.2}\t\t{:.2}\t\t{:.2}\t{:.2}",
                    r.date, r.precipitation, r.temp_max, r.temp_min, r.humidity, r.wind
                )?;
            }
        }
        DisplayMode::Precipitation => {
            writeln!(out, "Date\t\tPrecipitation")?;
            for d in records {
                writeln!(out, "{}\t{:.2}", d.record.date, d.record.precipitation)?;
            }
        }
        DisplayMode::Temperatures => {
            writeln!(out, "Date\t\tTemp Max\tTemp Min")?;
            for d in records {
                let r = d.record;
                writeln!(out, "{}\t{:.2}\t\t{:.2}", r.date, r.temp_max, r.temp_min)?;
            }
        }
        DisplayMode::HumidityWind => {
            writeln!(out, "Date\t\tHumidity\tWind")?;
            for d in records {
                let r = d.record;
                writeln!(out, "{}\t{:.2}\t{:.2}", r.date, r.humidity, r.wind)?;
            }
        }
    }
    Ok(())
}

fn interval_json(dated: &DatedRecord<'_>, mode: DisplayMode) -> Value {
    let r = dated.record;
    match mode {
        DisplayMode::All => json!(r),
        DisplayMode::Precipitation => json!({
            "date": r.date,
            "precipitation": r.precipitation,
        }),
        DisplayMode::Temperatures => json!({
            "date": r.date,
            "temp_max": r.temp_max,
            "temp_min": r.temp_min,
        }),
        DisplayMode::HumidityWind => json!({
            "date": r.date,
            "humidity": r.humidity,
            "wind": r.wind,
        }),
    }
}

/// Writes the month/year with the highest accumulated precipitation, or a
/// "no data" notice when there is none.
pub fn write_rainiest<W: Write>(
    out: &mut W,
    rainiest: Option<(MonthYearKey, f64)>,
    format: OutputFormat,
) -> Result<()> {
    match (format, rainiest) {
        (OutputFormat::Json, Some((key, total))) => write_json(
            out,
            &json!({ "rainiest_month": key.to_string(), "key": key.code(), "total_mm": total }),
        ),
        (OutputFormat::Json, None) => write_json(out, &json!({ "rainiest_month": null })),
        (OutputFormat::Text, Some((key, total))) => {
            writeln!(
                out,
                "\nRainiest month: {} with a total of {:.2} mm of precipitation",
                key, total
            )?;
            Ok(())
        }
        (OutputFormat::Text, None) => {
            writeln!(out, "No data available for precipitation analysis.")?;
            Ok(())
        }
    }
}

/// Writes the yearly means as a text bar chart, one line per year.
///
/// # Arguments
/// * `out` - Destination for the chart
/// * `means` - Result of the yearly-average computation
/// * `month_name` - Month label used in the title
/// * `scale` - Glyphs per degree
/// * `format` - Text chart or JSON document
///
/// # Errors
/// Returns error if writing to `out` fails.
pub fn write_chart<W: Write>(
    out: &mut W,
    means: &MonthlyMeans,
    month_name: &str,
    scale: f64,
    format: OutputFormat,
) -> Result<()> {
    if format == OutputFormat::Json {
        return write_json(out, means);
    }

    for year in &means.missing_years {
        writeln!(out, "No data for {} of {}.", month_name, year)?;
    }
    writeln!(
        out,
        "\nAverage minimum temperature for {} ({}-{}):",
        capitalize(month_name),
        means.year_start,
        means.year_end
    )?;
    if means.means.is_empty() {
        writeln!(out, "Not enough data to draw the chart.")?;
        return Ok(());
    }
    for (year, mean) in &means.means {
        writeln!(out, "{}: {:.2}°C | {}", year, mean, render_bar(*mean, scale))?;
    }
    Ok(())
}

/// Writes the mean of the yearly means, or a notice when it cannot be computed.
pub fn write_overall_mean<W: Write>(
    out: &mut W,
    mean: Option<f64>,
    month_name: &str,
    means: &MonthlyMeans,
    format: OutputFormat,
) -> Result<()> {
    match (format, mean) {
        (OutputFormat::Json, mean) => write_json(
            out,
            &json!({
                "month": month_name,
                "year_start": means.year_start,
                "year_end": means.year_end,
                "overall_mean": mean,
            }),
        ),
        (OutputFormat::Text, Some(mean)) => {
            writeln!(
                out,
                "\nOverall average minimum temperature for {} ({}-{}): {:.2}°C",
                month_name, means.year_start, means.year_end, mean
            )?;
            Ok(())
        }
        (OutputFormat::Text, None) => {
            writeln!(out, "Could not compute the overall average: no data.")?;
            Ok(())
        }
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::ClimateRecord;
    use crate::transform::{monthly_min_means, normalize_records};

    fn sample() -> Vec<ClimateRecord> {
        vec![
            ClimateRecord {
                date: "01/08/2006".to_string(),
                precipitation: 1.0,
                temp_max: 20.0,
                temp_min: 2.0,
                humidity: 70.0,
                wind: 3.0,
            },
            ClimateRecord {
                date: "2008-08-01".to_string(),
                precipitation: 0.5,
                temp_max: 10.0,
                temp_min: -1.5,
                humidity: 90.0,
                wind: 1.0,
            },
        ]
    }

    fn render<F: FnOnce(&mut Vec<u8>) -> Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_interval_columns() {
        let records = sample();
        let dated = normalize_records(&records);

        let text = render(|out| {
            write_interval(out, &dated, DisplayMode::Precipitation, OutputFormat::Text)
        });
        assert!(text.contains("Date\t\tPrecipitation\n"));
        assert!(text.contains("01/08/2006\t1.00\n"));
        assert!(!text.contains("Humidity"));

        let text =
            render(|out| write_interval(out, &dated, DisplayMode::All, OutputFormat::Text));
        assert!(text.contains("Date\t\tPrecipitation\tTemp Max\tTemp Min\tHumidity\tWind\n"));
        assert!(text.contains("2008-08-01\t0.50\t\t10.00\t\t-1.50\t\t90.00\t1.00\n"));

        let json = render(|out| {
            write_interval(out, &dated, DisplayMode::HumidityWind, OutputFormat::Json)
        });
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[1]["humidity"], 90.0);
        assert!(value[1].get("temp_min").is_none());
    }

    #[test]
    fn test_chart_lines() {
        let records = sample();
        let means = monthly_min_means(&normalize_records(&records), 8, 2006, 2008);

        let text =
            render(|out| write_chart(out, &means, "agosto", 5.0, OutputFormat::Text));
        assert!(text.contains("Average minimum temperature for Agosto (2006-2008):"));
        assert!(text.contains("2006: 2.00°C | **********\n"));
        assert!(text.contains("2008: -1.50°C | -------\n"));
        assert!(!text.contains("2007:"));
        assert!(text.contains("No data for agosto of 2007.\n"));
    }

    #[test]
    fn test_chart_without_data() {
        let records: Vec<ClimateRecord> = Vec::new();
        let means = monthly_min_means(&normalize_records(&records), 1, 2006, 2007);
        let text =
            render(|out| write_chart(out, &means, "janeiro", 5.0, OutputFormat::Text));
        assert!(text.contains("Not enough data to draw the chart."));
    }

    #[test]
    fn test_rainiest_messages() {
        let key = MonthYearKey::new(2020, 1);
        let text = render(|out| write_rainiest(out, Some((key, 10.0)), OutputFormat::Text));
        assert!(text.contains("Rainiest month: 01/2020 with a total of 10.00 mm"));

        let text = render(|out| write_rainiest(out, None, OutputFormat::Text));
        assert!(text.contains("No data available"));

        let json = render(|out| write_rainiest(out, Some((key, 10.0)), OutputFormat::Json));
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["key"], 202001);
        assert_eq!(value["rainiest_month"], "01/2020");
    }
}
