use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{NaiveDate, ParseError};
use serde::Deserialize;

/// A bare TOML date such as `compatibility_date = 2024-11-01`.
/// Quoted dates are accepted as well.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TomlDate(pub NaiveDate);

impl<'de> Deserialize<'de> for TomlDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
    {
        use serde::de::Error;
        let text = match toml::Value::deserialize(deserializer)? {
            toml::Value::Datetime(value) => value.to_string(),
            toml::Value::String(text) => text,
            other => return Err(Error::custom(format!("expected a date, found {}", other.type_str()))),
        };
        TomlDate::from_str(&text).map_err(Error::custom)
    }
}

impl FromStr for TomlDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let naive = NaiveDate::from_str(s)?;
        Ok(Self(naive))
    }
}

impl Display for TomlDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    pub struct Site {
        pub compatibility_date: TomlDate,
    }

    #[test]
    fn test_bare_date() {
        let cfg: Site = toml::from_str("compatibility_date = 2024-11-01").unwrap();
        assert_eq!(cfg.compatibility_date, TomlDate(NaiveDate::from_ymd_opt(2024, 11, 1).unwrap()));
        assert_eq!(cfg.compatibility_date.to_string(), "2024-11-01");
    }

    #[test]
    fn test_quoted_date() {
        let cfg: Site = toml::from_str(r#"compatibility_date = "2024-11-01""#).unwrap();
        assert_eq!(cfg.compatibility_date, TomlDate(NaiveDate::from_ymd_opt(2024, 11, 1).unwrap()));
    }

    #[test]
    fn test_date_time_is_rejected() {
        let res = toml::from_str::<Site>("compatibility_date = 2024-11-01T10:00:00");
        assert!(res.is_err());
        let res = toml::from_str::<Site>("compatibility_date = \"soon\"");
        assert!(res.is_err());
    }
}
