use crate::libs::errors::{Result, VenvError};
use crate::schemas::config::VenvConfig;
use crate::{log_debug, log_warn};
use colored::Colorize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the project config looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "setup-venv.yaml";

/// Loads the provisioning config.
///
/// An explicitly given path must exist. Without one, `setup-venv.yaml` in
/// `project_root` is used when present, and the defaults otherwise.
///
/// # Arguments
/// * `explicit`: Path passed with `--config`, if any.
/// * `project_root`: Directory searched for the default config file.
///
/// # Returns
/// * `Ok(VenvConfig)` with defaults filled in for every missing field.
/// * `Err(VenvError)` if the file cannot be read or is not valid YAML for the schema.
pub fn load_config(explicit: Option<&Path>, project_root: &Path) -> Result<VenvConfig> {
    let (path, required): (PathBuf, bool) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => (project_root.join(CONFIG_FILE_NAME), false),
    };

    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound && !required => {
            log_debug!("No {} in {}; using defaults", CONFIG_FILE_NAME, project_root.display());
            return Ok(VenvConfig::default());
        }
        Err(e) => return Err(VenvError::fs("read", &path)(e)),
    };

    // An empty file deserializes to `null`, which is not a mapping.
    if contents.trim().is_empty() {
        log_warn!("Config {} is empty; using defaults", path.display().to_string().yellow());
        return Ok(VenvConfig::default());
    }

    let config: VenvConfig =
        serde_yaml::from_str(&contents).map_err(|source| VenvError::Config { path: path.clone(), source })?;
    log_debug!(
        "Loaded config from {}: {:?}",
        path.display().to_string().green(),
        config
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_a_file() {
        let root = TempDir::new().unwrap();
        assert_eq!(load_config(None, root.path()).unwrap(), VenvConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let root = TempDir::new().unwrap();
        fs::write(
            root.path().join(CONFIG_FILE_NAME),
            "python: \"3.1\"\npackages:\n  - nose\n  - coverage\n",
        )
        .unwrap();

        let config = load_config(None, root.path()).unwrap();
        assert_eq!(config.python, "3.1");
        assert_eq!(config.packages, vec!["nose", "coverage"]);
        assert!(!config.upgrade);
        assert_eq!(config.creation_wait_secs, 10);
    }

    #[test]
    fn explicit_path_must_exist() {
        let root = TempDir::new().unwrap();
        let err = load_config(Some(&root.path().join("nope.yaml")), root.path()).unwrap_err();
        assert!(matches!(err, VenvError::Fs { action: "read", .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let root = TempDir::new().unwrap();
        let path = root.path().join("custom.yaml");
        fs::write(&path, "pyver: 2.7\n").unwrap();
        let err = load_config(Some(&path), root.path()).unwrap_err();
        assert!(matches!(err, VenvError::Config { .. }));
    }
}
