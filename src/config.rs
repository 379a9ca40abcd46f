//! Constants and environment settings.

/// Zones planned per label when nothing else is given.
pub const DEFAULT_AZS: usize = 3;
/// Prefix length of each tail reservation block.
pub const TAIL_RESERVATION_MASK: u8 = 28;
/// Number of tail reservation blocks, independent of the zone count.
pub const TAIL_RESERVATION_COUNT: usize = 3;
/// Label whose blocks go at the end of the VPC.
pub const DEFAULT_TAIL_LABEL: &str = "TGW";
/// Physical resource ids are this prefix followed by the VPC network.
pub const PHYSICAL_ID_PREFIX: &str = "subnet-calc-";
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

pub const ENV_AZS: &str = "SUBNET_CALC_AZS";
pub const ENV_TAIL_LABEL: &str = "SUBNET_CALC_TAIL_LABEL";

/// Runtime settings, read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub azs: usize,
    /// `None` turns the tail reservation off.
    pub tail_label: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            azs: DEFAULT_AZS,
            tail_label: Some(DEFAULT_TAIL_LABEL.to_string()),
        }
    }
}

impl Settings {
    pub fn from_env() -> Settings {
        Settings::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup, used by [`Settings::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Settings
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();
        if let Some(azs) = lookup(ENV_AZS) {
            match azs.trim().parse::<usize>() {
                Ok(n) if n > 0 => settings.azs = n,
                _ => log::warn!(
                    "Ignoring {ENV_AZS}='{azs}', using default {}",
                    DEFAULT_AZS
                ),
            }
        }
        if let Some(label) = lookup(ENV_TAIL_LABEL) {
            let label = label.trim();
            settings.tail_label = if label.is_empty() {
                None
            } else {
                Some(label.to_string())
            };
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::from_lookup(lookup(&[]));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.azs, 3);
        assert_eq!(settings.tail_label.as_deref(), Some("TGW"));
    }

    #[test]
    fn test_settings_overrides() {
        let settings = Settings::from_lookup(lookup(&[(ENV_AZS, "2"), (ENV_TAIL_LABEL, "Transit")]));
        assert_eq!(settings.azs, 2);
        assert_eq!(settings.tail_label.as_deref(), Some("Transit"));
    }

    #[test]
    fn test_settings_bad_values() {
        let settings = Settings::from_lookup(lookup(&[(ENV_AZS, "zero"), (ENV_TAIL_LABEL, " ")]));
        assert_eq!(settings.azs, DEFAULT_AZS);
        assert_eq!(settings.tail_label, None);
        let settings = Settings::from_lookup(lookup(&[(ENV_AZS, "0")]));
        assert_eq!(settings.azs, DEFAULT_AZS);
    }
}
