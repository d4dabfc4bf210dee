// Schema of the optional `setup-venv.yaml` file kept next to a project's `setup.py`.
// Every field is optional; command-line flags take precedence over the file.

use serde::{Deserialize, Deserializer};

/// Default Python version when neither the CLI nor the config names one.
pub const DEFAULT_PYTHON: &str = "2.7";

/// Seconds to wait after creating an environment on platforms whose creation tool
/// returns before it has finished.
pub const DEFAULT_CREATION_WAIT_SECS: u64 = 10;

/// Project-level provisioning settings.
///
/// Example:
/// ```yaml
/// python: "3.1"
/// upgrade: true
/// activepython: false
/// packages:
///   - nose
/// creation_wait_secs: 5
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct VenvConfig {
    /// Python version in `X.Y` form. An unquoted `2.7` is accepted too.
    #[serde(deserialize_with = "version_string")]
    pub python: String,
    /// Upgrade already installed packages.
    pub upgrade: bool,
    /// Require ActivePython (runs its activation step first).
    pub activepython: bool,
    /// Extra packages installed after the packaging library is upgraded.
    /// `setup.py develop` does not pull in extras, so they are listed here.
    pub packages: Vec<String>,
    pub creation_wait_secs: u64,
}

impl Default for VenvConfig {
    fn default() -> Self {
        VenvConfig {
            python: DEFAULT_PYTHON.to_string(),
            upgrade: false,
            activepython: false,
            packages: Vec::new(),
            creation_wait_secs: DEFAULT_CREATION_WAIT_SECS,
        }
    }
}

/// Accepts `python: "2.7"` as well as the unquoted `python: 2.7`, which YAML reads as a float.
fn version_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawVersion {
        Text(String),
        Number(f64),
    }

    Ok(match RawVersion::deserialize(deserializer)? {
        RawVersion::Text(text) => text,
        RawVersion::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unquoted_version_is_read_as_text() {
        let config: VenvConfig = serde_yaml::from_str("python: 2.6\n").unwrap();
        assert_eq!(config.python, "2.6");
    }

    #[test]
    fn empty_mapping_is_all_defaults() {
        let config: VenvConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, VenvConfig::default());
    }
}
