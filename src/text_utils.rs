use std::ops::Index;

use chrono::{DateTime, FixedOffset, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DATE_TIME_REGEX: Regex = Regex::new(
        r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[Tt]|[ \t]+)(\d{1,2}):(\d{1,2}):(\d{1,2})(\.\d+)?[ \t]*(Z|z|([+-])(\d{1,2})(?::?(\d{2}))?)?$"
    ).unwrap();
}

fn to_int<T: std::str::FromStr>(num_str: &str, date_str: &str) -> Result<T, String> {
    match num_str.parse::<T>() {
        Ok(x) => Ok(x),
        Err(_) => Err(format!("Error parsing {} from the date {}", num_str, date_str)),
    }
}

/// Parses the calendar date out of the date forms found in post headers:
/// `2024-01-01`, RFC 3339 (`2024-01-01T10:00:00+09:00`) and YAML timestamps
/// such as `2024-01-01 10:00:00.000` or `2024-01-01 10:00:00 +09:00`.
/// Times are dropped, a value with a zone keeps the date of its own zone.
pub fn parse_calendar_date(buf: &str) -> Result<NaiveDate, String> {
    let buf = buf.trim();

    if let Ok(date) = NaiveDate::parse_from_str(buf, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(date_time) = DateTime::parse_from_rfc3339(buf) {
        return Ok(date_time.date_naive());
    }

    let Some(caps) = DATE_TIME_REGEX.captures(buf) else {
        return Err(format!("Unable to parse date {}", buf));
    };

    let y: i32 = to_int(caps.index(1), buf)?;
    let m: u32 = to_int(caps.index(2), buf)?;
    let d: u32 = to_int(caps.index(3), buf)?;
    let h: u32 = to_int(caps.index(4), buf)?;
    let mn: u32 = to_int(caps.index(5), buf)?;
    let s: u32 = to_int(caps.index(6), buf)?;

    let Some(date) = NaiveDate::from_ymd_opt(y, m, d) else {
        return Err(format!("Date out of range {}", buf));
    };
    if date.and_hms_opt(h, mn, s).is_none() {
        return Err(format!("Time out of range {}", buf));
    }

    if let Some(sign) = caps.get(9) {
        let oh: i32 = to_int(caps.index(10), buf)?;
        let om: i32 = match caps.get(11) {
            Some(mins) => to_int(mins.as_str(), buf)?,
            None => 0,
        };
        let secs = (oh * 60 + om) * 60;
        let secs = if sign.as_str() == "-" { -secs } else { secs };
        if om > 59 || FixedOffset::east_opt(secs).is_none() {
            return Err(format!("Offset out of range {}", buf));
        }
    }

    Ok(date)
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// File name friendly version of a title: ascii, lowercase, words joined by `-`.
pub fn slug_from_title(title: &str) -> String {
    let ascii = unidecode::unidecode(title);
    let words: Vec<String> = ascii
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_ascii_lowercase())
        .collect();

    words.join("-")
}
