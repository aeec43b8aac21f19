//! Tolerant serde helpers for profile fields.
//!
//! A malformed value (wrong type, out of range) must not make the whole
//! profile unreadable. These helpers turn such values into `None` or drop
//! them from lists so the remaining settings still apply.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use tracing::warn;

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Value(T),
    Malformed(IgnoredAny),
}

impl<T> Lenient<T> {
    fn into_option(self) -> Option<T> {
        match self {
            Lenient::Value(value) => Some(value),
            Lenient::Malformed(_) => {
                warn!("Skipping malformed profile value");
                None
            }
        }
    }
}

/// Use with `#[serde(default, deserialize_with = "lenient::value")]` on `Option<T>` fields
pub fn value<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Lenient<T>>::deserialize(deserializer)?.and_then(Lenient::into_option))
}

/// Use with `#[serde(default, deserialize_with = "lenient::list")]` on `Vec<T>` fields
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let entries = Option::<Vec<Lenient<T>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries
        .into_iter()
        .filter_map(Lenient::into_option)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, Debug)]
    struct Probe {
        #[serde(default, deserialize_with = "value")]
        number: Option<i32>,
        #[serde(default, deserialize_with = "list")]
        numbers: Vec<i32>,
    }

    #[test]
    fn test_wrong_type_becomes_none() {
        let probe: Probe = toml::from_str("number = \"eight\"").unwrap();
        assert_eq!(probe.number, None);
        assert!(probe.numbers.is_empty());
    }

    #[test]
    fn test_out_of_range_becomes_none() {
        let probe: Probe = toml::from_str("number = 99999999999").unwrap();
        assert_eq!(probe.number, None);
    }

    #[test]
    fn test_list_keeps_valid_entries() {
        let probe: Probe = toml::from_str("number = 4\nnumbers = [1, \"x\", 3]").unwrap();
        assert_eq!(probe.number, Some(4));
        assert_eq!(probe.numbers, vec![1, 3]);
    }
}
