use chrono::NaiveDate;
use std::{env, path::PathBuf, str::FromStr};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/harvest.json";
pub const DEFAULT_STORE_KEY: &str = "colheitaOvos";
/// Cookie-class limit for `key + value`.
pub const DEFAULT_STORE_CAPACITY: usize = 4096;

/// How record dates and report filenames are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateLocale {
    #[default]
    PtBr,
    EnUs,
    Iso,
}

impl DateLocale {
    pub fn format(self, date: NaiveDate) -> String {
        let pattern = match self {
            DateLocale::PtBr => "%d/%m/%Y",
            DateLocale::EnUs => "%-m/%-d/%Y",
            DateLocale::Iso => "%Y-%m-%d",
        };
        date.format(pattern).to_string()
    }
}

impl FromStr for DateLocale {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pt-br" | "pt_br" | "pt" => Ok(DateLocale::PtBr),
            "en-us" | "en_us" | "en" => Ok(DateLocale::EnUs),
            "iso" => Ok(DateLocale::Iso),
            other => Err(format!("unknown locale '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_path: PathBuf,
    pub locale: DateLocale,
    pub store_key: String,
    pub store_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            locale: DateLocale::default(),
            store_key: DEFAULT_STORE_KEY.to_string(),
            store_capacity: DEFAULT_STORE_CAPACITY,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: parse_or("PORT", lookup("PORT"), defaults.port),
            data_path: lookup("HARVEST_DATA_PATH")
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            locale: parse_or("HARVEST_LOCALE", lookup("HARVEST_LOCALE"), defaults.locale),
            store_key: lookup("HARVEST_STORE_KEY")
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(defaults.store_key),
            store_capacity: parse_or(
                "HARVEST_STORE_CAPACITY",
                lookup("HARVEST_STORE_CAPACITY"),
                defaults.store_capacity,
            ),
        }
    }
}

fn parse_or<T: FromStr>(name: &str, value: Option<String>, default: T) -> T {
    match value {
        Some(raw) => match raw.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!("ignoring invalid {name}={raw:?}, using default");
                default
            }
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn locale_formats_dates() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(DateLocale::PtBr.format(date), "05/01/2026");
        assert_eq!(DateLocale::EnUs.format(date), "1/5/2026");
        assert_eq!(DateLocale::Iso.format(date), "2026-01-05");
    }

    #[test]
    fn config_reads_overrides_and_ignores_garbage() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("PORT", "9000"),
            ("HARVEST_DATA_PATH", "/tmp/eggs.json"),
            ("HARVEST_LOCALE", "en-US"),
            ("HARVEST_STORE_CAPACITY", "lots"),
        ]);
        let config = AppConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.port, 9000);
        assert_eq!(config.data_path, PathBuf::from("/tmp/eggs.json"));
        assert_eq!(config.locale, DateLocale::EnUs);
        assert_eq!(config.store_key, DEFAULT_STORE_KEY);
        assert_eq!(config.store_capacity, DEFAULT_STORE_CAPACITY);
    }
}
