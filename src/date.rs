use crate::error::DateFormatError;
use crate::structs::NormalizedDate;

/// A date layout: field separator plus the order in which the three
/// integer fields appear.
struct DateLayout {
    separator: char,
    build: fn([i32; 3]) -> NormalizedDate,
}

/// Layouts tried in priority order: `dd/mm/yyyy`, then `yyyy-mm-dd`.
const LAYOUTS: [DateLayout; 2] = [
    DateLayout {
        separator: '/',
        build: day_first,
    },
    DateLayout {
        separator: '-',
        build: year_first,
    },
];

/// Parses a raw date in either `dd/mm/yyyy` or `yyyy-mm-dd` form.
///
/// Each field may carry surrounding whitespace and a sign. Day and month
/// ranges are not validated.
///
/// # Errors
///
/// Returns `DateFormatError` holding the original text when no layout matches.
pub fn parse_date(raw: &str) -> Result<NormalizedDate, DateFormatError> {
    LAYOUTS
        .iter()
        .find_map(|layout| {
            split_fields(raw, layout.separator).map(|fields| (layout.build)(fields))
        })
        .ok_or_else(|| DateFormatError(raw.to_string()))
}

fn day_first([day, month, year]: [i32; 3]) -> NormalizedDate {
    NormalizedDate::new(year, month, day)
}

fn year_first([year, month, day]: [i32; 3]) -> NormalizedDate {
    NormalizedDate::new(year, month, day)
}

fn split_fields(raw: &str, separator: char) -> Option<[i32; 3]> {
    let mut parts = raw.split(separator);
    let mut fields = [0; 3];
    for field in fields.iter_mut() {
        *field = parts.next()?.trim().parse().ok()?;
    }
    match parts.next() {
        Some(_) => None,
        None => Some(fields),
    }
}
