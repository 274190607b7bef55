//! The blog post schema and its validator.
//!
//! Each field is declared once as a [`FieldSpec`] constant. `BLOG_SCHEMA`
//! lists them in checking order and [`validate`] builds a [`BlogPost`] from
//! the same constants, so the checked fields and the typed result can not
//! drift apart.

use chrono::NaiveDate;
use serde_yaml::Value;

use crate::content::{BlogPost, RawMetadata};
use crate::error::SchemaError;
use crate::text_utils::parse_calendar_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
    TextList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    const fn required(name: &'static str, kind: FieldKind) -> Self {
        FieldSpec { name, kind, required: true }
    }

    const fn optional(name: &'static str, kind: FieldKind) -> Self {
        FieldSpec { name, kind, required: false }
    }
}

pub const TITLE: FieldSpec = FieldSpec::required("title", FieldKind::Text);
pub const DESCRIPTION: FieldSpec = FieldSpec::optional("description", FieldKind::Text);
pub const DATE: FieldSpec = FieldSpec::required("date", FieldKind::Date);
pub const TAGS: FieldSpec = FieldSpec::optional("tags", FieldKind::TextList);
pub const IMAGE: FieldSpec = FieldSpec::optional("image", FieldKind::Text);

pub const BLOG_SCHEMA: &[FieldSpec] = &[TITLE, DESCRIPTION, DATE, TAGS, IMAGE];

fn check_text(field: &FieldSpec, value: &Value) -> Result<String, SchemaError> {
    let Some(text) = value.as_str() else {
        return Err(SchemaError::wrong_type(field.name));
    };
    // A required text must carry something besides whitespace
    if field.required && text.trim().is_empty() {
        return Err(SchemaError::missing(field.name));
    }
    Ok(text.to_string())
}

fn check_date(field: &FieldSpec, value: &Value) -> Result<NaiveDate, SchemaError> {
    value
        .as_str()
        .and_then(|s| parse_calendar_date(s).ok())
        .ok_or(SchemaError::invalid_date(field.name))
}

fn check_text_list(field: &FieldSpec, value: &Value) -> Result<Vec<String>, SchemaError> {
    let Some(items) = value.as_sequence() else {
        return Err(SchemaError::wrong_type(field.name));
    };

    let mut list = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str() {
            Some(s) => list.push(s.to_string()),
            None => return Err(SchemaError::wrong_type(field.name)),
        }
    }
    Ok(list)
}

fn required<T>(
    field: &FieldSpec,
    raw: &RawMetadata,
    check: fn(&FieldSpec, &Value) -> Result<T, SchemaError>,
) -> Result<T, SchemaError> {
    match raw.get(field.name) {
        Some(value) => check(field, value),
        None => Err(SchemaError::missing(field.name)),
    }
}

fn optional<T>(
    field: &FieldSpec,
    raw: &RawMetadata,
    check: fn(&FieldSpec, &Value) -> Result<T, SchemaError>,
) -> Result<Option<T>, SchemaError> {
    raw.get(field.name).map(|value| check(field, value)).transpose()
}

/// Validates a raw metadata mapping against `BLOG_SCHEMA`.
///
/// Fields are checked in schema order and the first violation is returned.
/// Keys the schema does not know are ignored. Absent optional fields stay
/// `None`.
pub fn validate(raw: &RawMetadata) -> Result<BlogPost, SchemaError> {
    Ok(BlogPost {
        title: required(&TITLE, raw, check_text)?,
        description: optional(&DESCRIPTION, raw, check_text)?,
        date: required(&DATE, raw, check_date)?,
        tags: optional(&TAGS, raw, check_text_list)?,
        image: optional(&IMAGE, raw, check_text)?,
    })
}

/// Keys present in `raw` that the schema does not declare.
pub fn unknown_keys(raw: &RawMetadata) -> Vec<&str> {
    raw.keys()
        .map(|k| k.as_str())
        .filter(|k| !BLOG_SCHEMA.iter().any(|field| field.name == *k))
        .collect()
}


#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use crate::text_utils::format_date;

    use super::*;

    fn calendar_date() -> impl Strategy<Value = NaiveDate> {
        (1970i32..2100, 1u32..=12, 1u32..=28)
            .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn metadata(title: &str, date: &NaiveDate, tags: &[String]) -> RawMetadata {
        let mut raw = RawMetadata::new();
        raw.insert("title".to_string(), Value::String(title.to_string()));
        raw.insert("date".to_string(), Value::String(format_date(date)));
        if !tags.is_empty() {
            let tags = tags.iter().map(|t| Value::String(t.clone())).collect();
            raw.insert("tags".to_string(), Value::Sequence(tags));
        }
        raw
    }

    /// The metadata a post is written back out as.
    fn to_metadata(post: &BlogPost) -> RawMetadata {
        let mut raw = metadata(&post.title, &post.date, post.tags());
        if let Some(description) = &post.description {
            raw.insert("description".to_string(), Value::String(description.clone()));
        }
        if let Some(image) = &post.image {
            raw.insert("image".to_string(), Value::String(image.clone()));
        }
        raw
    }

    proptest! {
        /// Any non-blank title with a valid date is accepted and kept as given.
        #[test]
        fn valid_metadata_is_accepted(
            title in "\\PC*[^\\s]\\PC*",
            date in calendar_date(),
            tags in prop::collection::vec("[a-z0-9-]{1,12}", 0..5),
        ) {
            let post = validate(&metadata(&title, &date, &tags)).unwrap();
            prop_assert_eq!(&post.title, &title);
            prop_assert_eq!(post.date, date);
            prop_assert_eq!(post.tags(), &tags[..]);
        }

        /// Writing a validated post back out and validating it again gives
        /// the same post.
        #[test]
        fn validated_post_round_trips(
            title in "[A-Za-z0-9][A-Za-z0-9 ]{0,40}",
            date in calendar_date(),
            tags in prop::collection::vec("[a-z]{1,8}", 1..4),
        ) {
            let post = validate(&metadata(&title, &date, &tags)).unwrap();
            prop_assert_eq!(validate(&to_metadata(&post)), Ok(post));
        }

        /// Validation is a pure function of the mapping.
        #[test]
        fn validate_is_deterministic(
            title in "\\PC{0,20}",
            date in "\\PC{0,12}",
            extra in "[a-z]{1,8}",
        ) {
            let mut raw = RawMetadata::new();
            raw.insert("title".to_string(), Value::String(title));
            raw.insert("date".to_string(), Value::String(date));
            raw.insert(format!("x-{}", extra), Value::Bool(true));
            prop_assert_eq!(validate(&raw), validate(&raw));
        }
    }
}
