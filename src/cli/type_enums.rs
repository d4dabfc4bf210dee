use std::fmt;
use std::str::FromStr;

/// The operating system family the environment is being built on.
/// Each variant selects one row of the platform capability table
/// (see `libs::utilities::platform::PlatformProfile`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows, // ActivePython layout, `Scripts\` directory, `.exe` binaries
    MacOs,   // python.org framework builds under /Library/Frameworks
    Unix,    // everything else, interpreters looked up on PATH
}

/// Implementation of string parsing for Platform enum.
/// Allows converting `--platform` / `SETUP_VENV_PLATFORM` values to a Platform.
impl FromStr for Platform {
    type Err = String;

    /// Parses a string into a Platform enum variant.
    ///
    /// # Arguments
    /// * `s` - The string to parse (case-insensitive, common aliases accepted)
    ///
    /// # Returns
    /// * `Ok(Platform)` if the string names a known platform
    /// * `Err(String)` with error message if no match found
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "windows" | "win32" | "win64" => Ok(Platform::Windows),
            "macos" | "darwin" | "osx" => Ok(Platform::MacOs),
            "unix" | "linux" => Ok(Platform::Unix),
            _ => {
                let valid = ["windows", "macos", "unix"].join(", ");
                Err(format!("Invalid platform '{s}'. Must be one of: {valid}"))
            }
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Platform::Windows => write!(f, "windows"),
            Platform::MacOs => write!(f, "macos"),
            Platform::Unix => write!(f, "unix"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases_case_insensitively() {
        assert_eq!("Darwin".parse::<Platform>(), Ok(Platform::MacOs));
        assert_eq!("win32".parse::<Platform>(), Ok(Platform::Windows));
        assert_eq!("linux".parse::<Platform>(), Ok(Platform::Unix));
    }

    #[test]
    fn rejects_unknown_platform() {
        let err = "beos".parse::<Platform>().unwrap_err();
        assert!(err.contains("windows, macos, unix"));
    }
}
