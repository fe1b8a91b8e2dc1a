//! Template filters for resume values.
//!
//! The formatting functions are plain `&str` functions; [`register_filters`]
//! wires them into a minijinja environment as `latex`, `date`, `full_date`,
//! `study`, `fluency` and `fluency_label`.

use crate::sanitize::escape;
use chrono::NaiveDate;
use minijinja::value::{Kwargs, Value};
use minijinja::{Environment, Error};

/// Rendered for an empty date, i.e. an ongoing position.
pub const PRESENT: &str = "Present";

/// Rendered for a date that cannot be parsed.
pub const UNKNOWN_DATE: &str = "???";

/// Ordered fluency table; longer phrases come before phrases they contain.
const FLUENCY: &[(&str, f64, &str)] = &[
    ("native", 1.0, "Native Speaker"),
    ("full professional", 0.8, "Fluent"),
    ("professional", 0.6, "Conversational"),
    ("limited", 0.4, "Limited"),
    ("elementary", 0.2, "Elementary"),
];

const UNKNOWN_FLUENCY_LABEL: &str = "0.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Precision {
    Year,
    Month,
    Day,
}

/// Parses `YYYY-MM-DD`, `YYYY-MM` or `YYYY`. Missing parts default to 1.
///
/// A time part after `T` (`2021-03-14T09:30:00Z`) is accepted and dropped.
fn parse_date(text: &str) -> Option<(NaiveDate, Precision)> {
    let text = text.trim();
    let text = match text.split_once('T') {
        Some((date, _)) if date.len() == 10 => date,
        _ => text,
    };

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some((date, Precision::Day));
    }

    if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", text), "%Y-%m-%d") {
        return Some((date, Precision::Month));
    }

    if text.len() == 4 && text.bytes().all(|b| b.is_ascii_digit()) {
        let year = text.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1).map(|d| (d, Precision::Year));
    }

    None
}

/// Formats a resume date as month and year.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM`, `YYYY` and full ISO datetimes. Empty
/// input means "still ongoing" and yields [`PRESENT`]. Unparseable input
/// yields [`UNKNOWN_DATE`] and a warning.
///
/// ```
/// use texume::filters::format_date;
///
/// assert_eq!(format_date("2021-03-14", false), "Mar 2021");
/// assert_eq!(format_date("2021-03", true), "March 2021");
/// assert_eq!(format_date("", false), "Present");
/// ```
pub fn format_date(text: &str, full_month: bool) -> String {
    if text.trim().is_empty() {
        return PRESENT.to_string();
    }

    match parse_date(text) {
        Some((date, Precision::Year)) => date.format("%Y").to_string(),
        Some((date, _)) if full_month => date.format("%B %Y").to_string(),
        Some((date, _)) => date.format("%b %Y").to_string(),
        None => {
            tracing::warn!(date = text, "could not parse date");
            UNKNOWN_DATE.to_string()
        }
    }
}

/// Formats a resume date as `YYYY.MM.DD`.
pub fn format_full_date(text: &str) -> String {
    if text.trim().is_empty() {
        return PRESENT.to_string();
    }

    match parse_date(text) {
        Some((date, _)) => date.format("%Y.%m.%d").to_string(),
        None => {
            tracing::warn!(date = text, "could not parse date");
            UNKNOWN_DATE.to_string()
        }
    }
}

/// Joins degree type and area of study.
///
/// A joint programme lists several degrees and areas separated by `/`, with
/// a qualifier after the last degree that applies to all of them:
///
/// ```
/// use texume::filters::study_type;
///
/// assert_eq!(study_type("BSc", "Physics"), "BSc, Physics");
/// assert_eq!(
///     study_type("BA/MEng with Honors", "Math/CS"),
///     "BA with Honors, Math; MEng with Honors, CS"
/// );
/// ```
///
/// When only one side has a `/`, the part counts differ, or any part is
/// blank, the plain `"{type}, {area}"` form is used.
pub fn study_type(kind: &str, area: &str) -> String {
    if kind.contains('/') && area.contains('/') {
        let degrees: Vec<&str> = kind.split('/').map(str::trim).collect();
        let areas: Vec<&str> = area.split('/').map(str::trim).collect();

        let has_blank = degrees.iter().chain(&areas).any(|part| part.is_empty());

        if let Some((last, heads)) = degrees.split_last()
            && degrees.len() == areas.len()
            && !has_blank
        {
            let (last_degree, qualifier) = match last.split_once(' ') {
                Some((degree, rest)) => (degree, rest.trim()),
                None => (*last, ""),
            };

            return heads
                .iter()
                .copied()
                .chain(std::iter::once(last_degree))
                .zip(areas)
                .map(|(degree, area)| {
                    if qualifier.is_empty() {
                        format!("{}, {}", degree, area)
                    } else {
                        format!("{} {}, {}", degree, qualifier, area)
                    }
                })
                .collect::<Vec<_>>()
                .join("; ");
        }
    }

    format!("{}, {}", kind, area)
}

fn fluency_entry(text: &str) -> Option<&'static (&'static str, f64, &'static str)> {
    let lower = text.to_lowercase();
    FLUENCY.iter().find(|(phrase, _, _)| lower.contains(phrase))
}

/// Numeric fluency in `[0, 1]`; unknown descriptors score 0.
pub fn fluency(text: &str) -> f64 {
    fluency_entry(text).map_or(0.0, |(_, score, _)| *score)
}

/// Display label for a fluency descriptor.
pub fn fluency_label(text: &str) -> &'static str {
    fluency_entry(text).map_or(UNKNOWN_FLUENCY_LABEL, |(_, _, label)| *label)
}

/// Undefined and none count as empty text; other values use their display form.
fn text_of(value: &Value) -> String {
    if value.is_undefined() || value.is_none() {
        String::new()
    } else if let Some(s) = value.as_str() {
        s.to_string()
    } else {
        value.to_string()
    }
}

/// Registers the resume filters on a minijinja environment.
pub fn register_filters(env: &mut Environment<'_>) {
    env.add_filter("latex", |value: Value| -> String { escape(&text_of(&value)) });

    env.add_filter(
        "date",
        |value: Value, kwargs: Kwargs| -> Result<String, Error> {
            let full: Option<bool> = kwargs.get("full")?;
            kwargs.assert_all_used()?;
            Ok(format_date(&text_of(&value), full.unwrap_or(false)))
        },
    );

    env.add_filter("full_date", |value: Value| -> String {
        format_full_date(&text_of(&value))
    });

    env.add_filter("study", |kind: Value, area: Value| -> String {
        study_type(&text_of(&kind), &text_of(&area))
    });

    env.add_filter("fluency", |value: Value| -> f64 { fluency(&text_of(&value)) });

    env.add_filter("fluency_label", |value: Value| -> String {
        fluency_label(&text_of(&value)).to_string()
    });
}
