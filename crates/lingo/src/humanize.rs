//! Date and time humanization over the resolver's lookup operation.
//!
//! Pure formatting helpers: they call [`Resolver::l`] for every
//! user-visible word and otherwise hold no state. No negotiation or
//! caching happens here.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};

use crate::resolver::Resolver;
use crate::types::Arg;

/// Options for [`when`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WhenOptions {
    /// Use abbreviated unit labels instead of pluralized ones.
    pub abbrev: bool,
}

const NO_ARGS: &[Arg] = &[];

/// Relative phrasing for an event date, measured from today.
///
/// See [`when_at`] for the exact rules.
pub fn when(resolver: &Resolver, event: &str, options: &WhenOptions) -> String {
    when_at(resolver, event, Local::now().date_naive(), options)
}

/// Relative phrasing for an event date, measured from `today`.
///
/// A difference of -1, 0 or +1 days yields the yesterday/today/tomorrow
/// messages. Anything else breaks the absolute difference into year,
/// month, week and day units (365/30/7-day buckets), renders the two most
/// significant nonzero units as `"<qty> <label>."`, joins them with
/// `" & "` and prefixes the future or past range marker. Unit labels gain
/// an `_ABBREV` suffix when abbreviation is requested, else `_PLURAL`
/// when the quantity is above one.
pub fn when_at(
    resolver: &Resolver,
    event: &str,
    today: NaiveDate,
    options: &WhenOptions,
) -> String {
    let Some(event_date) = parse_date(event) else {
        return "when: error".to_string();
    };

    let days = (event_date - today).num_days();
    match days {
        -1 => return resolver.l("DATETIME_RANGE_YESTERDAY", NO_ARGS),
        0 => return resolver.l("DATETIME_RANGE_TODAY", NO_ARGS),
        1 => return resolver.l("DATETIME_RANGE_TOMORROW", NO_ARGS),
        _ => {}
    }

    let units = [
        ("DATETIME_UNIT_YEAR", 365),
        ("DATETIME_UNIT_MONTH", 30),
        ("DATETIME_UNIT_WEEK", 7),
        ("DATETIME_UNIT_DAY", 1),
    ];

    let mut remaining = days.unsigned_abs();
    let mut parts = Vec::new();
    for (base_label, unit_days) in units {
        let qty = remaining.div_euclid(unit_days);
        remaining = remaining.rem_euclid(unit_days);
        if qty == 0 {
            continue;
        }

        let label = if options.abbrev {
            format!("{base_label}_ABBREV")
        } else if qty > 1 {
            format!("{base_label}_PLURAL")
        } else {
            base_label.to_string()
        };
        parts.push(format!("{qty} {}.", resolver.l(&label, NO_ARGS)));
    }

    let prefix = if days >= 0 {
        resolver.l("DATETIME_RANGE_PREFIX_FUTURE", NO_ARGS)
    } else {
        resolver.l("DATETIME_RANGE_PREFIX_PAST", NO_ARGS)
    };

    let significant: Vec<String> = parts.into_iter().take(2).collect();
    format!("{prefix} {}", significant.join(" & "))
}

/// Human-readable date rendering.
///
/// See [`date_at`] for the exact rules.
pub fn date(resolver: &Resolver, date_string: &str, short: bool) -> String {
    date_at(resolver, date_string, short, Local::now().year())
}

/// Human-readable date rendering against an explicit current year.
///
/// The empty-date sentinel (`""` or `"0000-00-00"`) yields the empty-value
/// message. A bare 4-digit year is returned unchanged. Otherwise a
/// `YYYY-MM-DD` string renders as `"<day> <month name>"`, with the year
/// appended unless `short` is set and the year is the current one.
/// Anything unsplittable passes through unchanged.
pub fn date_at(resolver: &Resolver, date_string: &str, short: bool, current_year: i32) -> String {
    if date_string.is_empty() || date_string == "0000-00-00" {
        return resolver.l("DATETIME_VALUE_EMPTY", NO_ARGS);
    }

    if date_string.len() == 4 && date_string.chars().all(|c| c.is_ascii_digit()) {
        return date_string.to_string();
    }

    let mut pieces = date_string.split('-');
    let (Some(year), Some(month), Some(day)) = (pieces.next(), pieces.next(), pieces.next())
    else {
        return date_string.to_string();
    };

    let day_number = match day.parse::<u32>() {
        Ok(d) => d.to_string(),
        Err(_) => day.to_string(),
    };
    let month_label = resolver.l(&format!("DATETIME_CALENDAR_MONTH_{month}"), NO_ARGS);
    let rendered = format!("{day_number} {month_label}");

    if short && year == current_year.to_string() {
        rendered
    } else {
        format!("{rendered} {year}")
    }
}

/// The month name for a date string.
pub fn month(resolver: &Resolver, date_string: &str) -> String {
    match parse_date(date_string) {
        Some(d) => resolver.l(&format!("DATETIME_CALENDAR_MONTH_{:02}", d.month()), NO_ARGS),
        None => date_string.to_string(),
    }
}

/// The weekday name for a date string (ISO weekday numbering, 1-7).
pub fn day(resolver: &Resolver, date_string: &str) -> String {
    match parse_date(date_string) {
        Some(d) => resolver.l(
            &format!("DATETIME_CALENDAR_DAY_{}", d.weekday().number_from_monday()),
            NO_ARGS,
        ),
        None => date_string.to_string(),
    }
}

/// Clock-time rendering; `short` truncates `H:MM:SS` to `H:MM`.
pub fn time(time_string: &str, short: bool) -> String {
    if short {
        time_string.get(..5).unwrap_or(time_string).to_string()
    } else {
        time_string.to_string()
    }
}

/// A duration in seconds rendered as `"<h>h <m>m <s>s"`.
pub fn seconds(total: u64) -> String {
    let hours = total.div_euclid(3600);
    let minutes = total.rem_euclid(3600).div_euclid(60);
    let secs = total.rem_euclid(60);
    format!("{hours}h {minutes}m {secs}s")
}

/// Label for a model type, via the `MODEL_<type>_INSTANCE` key convention.
pub fn instance_label(resolver: &Resolver, model_type: &str) -> String {
    resolver.l(&format!("MODEL_{model_type}_INSTANCE"), NO_ARGS)
}

/// Label for a model field, via the `MODEL_<type>_FIELD_<field>` key
/// convention.
pub fn field_label(resolver: &Resolver, model_type: &str, field_name: &str) -> String {
    resolver.l(&format!("MODEL_{model_type}_FIELD_{field_name}"), NO_ARGS)
}

/// Parse a `YYYY-MM-DD` date, tolerating a trailing clock time.
fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}
