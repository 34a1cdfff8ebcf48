use climate::{AnalysisConfig, Console, OutputFormat, read_records, run_session};
use serde_json::Value;

const DATA: &str = "\
data,precipitacao,temp_max,temp_min,umidade,vento
01/08/2006,3.0,20.0,10.0,70.0,2.0
15/08/2006,7.0,22.0,20.0,75.0,3.0
2007-08-05,1.0,18.0,5.0,80.0,1.0
01/09/2007,12.5,25.0,14.0,60.0,4.0
garbage,99.0,1.0,1.0,1.0,1.0
02/09/2007,short
";

fn run(input: &str, config: &AnalysisConfig) -> (String, String) {
    let records = read_records(DATA.as_bytes()).unwrap();
    let mut console = Console {
        input: input.as_bytes(),
        prompt: Vec::new(),
        out: Vec::new(),
    };
    run_session(&records, config, &mut console).unwrap();
    (
        String::from_utf8(console.prompt).unwrap(),
        String::from_utf8(console.out).unwrap(),
    )
}

fn window(year_start: i32, year_end: i32, format: OutputFormat) -> AnalysisConfig {
    AnalysisConfig {
        year_start,
        year_end,
        format,
        ..AnalysisConfig::default()
    }
}

#[test]
fn test_full_text_session() {
    let config = window(2006, 2008, OutputFormat::Text);
    let (prompt, out) = run("8\n2006\n8\n2007\n2\nagosto\n", &config);

    assert!(prompt.contains("=== Interval view ==="));
    assert!(out.contains("Date\t\tPrecipitation\n"));
    assert!(out.contains("01/08/2006\t3.00\n"));
    assert!(out.contains("2007-08-05\t1.00\n"));
    assert!(!out.contains("01/09/2007\t"));
    assert!(!out.contains("garbage"));

    assert!(out.contains("Rainiest month: 09/2007 with a total of 12.50 mm"));

    assert!(out.contains("Average minimum temperature for Agosto (2006-2008):"));
    assert!(out.contains(&format!("2006: 15.00°C | {}\n", "*".repeat(75))));
    assert!(out.contains(&format!("2007: 5.00°C | {}\n", "*".repeat(25))));
    assert!(!out.contains("2008:"));
    assert!(out.contains("Overall average minimum temperature for agosto (2006-2008): 10.00°C"));
}

#[test]
fn test_invalid_interval_input_skips_only_that_step() {
    let config = window(2006, 2007, OutputFormat::Text);
    let (prompt, out) = run("13\n2006\n8\n2006\njaneiro\n", &config);

    assert!(prompt.contains("month 13 is not in 1-12"));
    assert!(!out.contains("Selected data"));
    assert!(out.contains("Rainiest month"));
    assert!(out.contains("Average minimum temperature for Janeiro"));
    assert!(out.contains("Not enough data to draw the chart."));
    assert!(out.contains("Could not compute the overall average: no data."));
}

#[test]
fn test_out_of_range_month_keeps_later_answers_aligned() {
    let config = window(2006, 2008, OutputFormat::Text);
    let (prompt, out) = run("13\n2006\n8\n2006\nagosto\n", &config);

    assert!(prompt.contains("month 13 is not in 1-12"));
    assert!(!prompt.contains("unknown month name"));
    assert!(!out.contains("Selected data"));
    assert!(out.contains("No data for agosto of 2008."));
    assert!(out.contains("Average minimum temperature for Agosto (2006-2008):"));
    assert!(out.contains("Overall average minimum temperature for agosto (2006-2008): 10.00°C"));
}

#[test]
fn test_unknown_month_name_ends_session() {
    let config = window(2006, 2016, OutputFormat::Text);
    let (prompt, out) = run("1\n2006\n12\n2006\n1\naugust\n", &config);

    assert!(out.contains("Date\t\tPrecipitation\tTemp Max\tTemp Min\tHumidity\tWind"));
    assert!(prompt.contains("unknown month name \"august\""));
    assert!(!out.contains("Average minimum temperature"));
    assert!(!out.contains("Overall average"));
}

#[test]
fn test_json_session() {
    let config = window(2006, 2007, OutputFormat::Json);
    let (_, out) = run("1\n2020\n12\n2020\n3\nAGOSTO\n", &config);

    let docs: Vec<Value> = serde_json::Deserializer::from_str(&out)
        .into_iter::<Value>()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(docs.len(), 4);
    assert_eq!(docs[0], Value::Array(Vec::new()));
    assert_eq!(docs[1]["key"], 200709);
    assert_eq!(docs[2]["means"]["2006"], 15.0);
    assert_eq!(docs[2]["means"]["2007"], 5.0);
    assert_eq!(docs[2]["missing_years"], Value::Array(Vec::new()));
    assert_eq!(docs[3]["overall_mean"], 10.0);
}
