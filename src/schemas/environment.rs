// Transient values passed between the resolver, the provisioner and the installers.
// None of these are persisted; they live for a single command invocation.

use std::fmt;

/// A requested Python version in `X.Y` form (e.g. "2.7").
///
/// Only character positions are inspected: the major digit is character 0 and the
/// minor digit is character 2. Anything else in the string is carried along verbatim
/// in the full form. Multi-digit minors such as "3.10" are not special-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSpec(String);

impl VersionSpec {
    pub fn new(version: impl Into<String>) -> Self {
        VersionSpec(version.into())
    }

    /// The full version string as given (e.g. "2.7").
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Character 0 of the version, or an empty string when missing.
    pub fn major(&self) -> String {
        self.0.chars().nth(0).map(String::from).unwrap_or_default()
    }

    /// Character 2 of the version, or an empty string when missing.
    pub fn minor(&self) -> String {
        self.0.chars().nth(2).map(String::from).unwrap_or_default()
    }

    /// Major and minor glued together (e.g. "27"), as used by Windows executable names.
    pub fn nodot(&self) -> String {
        format!("{}{}", self.major(), self.minor())
    }

    pub fn is_python3(&self) -> bool {
        self.major() == "3"
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which virtualenv creation tool was invoked.
/// This is what `init` reports back to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolVariant {
    /// `virtualenv`, used for every major version except 3.
    Virtualenv,
    /// `virtualenv5`, the Python 3 fork.
    Virtualenv5,
}

impl ToolVariant {
    /// Picks the variant from the major version digit.
    pub fn for_version(version: &VersionSpec) -> Self {
        if version.is_python3() {
            ToolVariant::Virtualenv5
        } else {
            ToolVariant::Virtualenv
        }
    }

    /// Executable name of the creation tool.
    pub fn program(self) -> &'static str {
        match self {
            ToolVariant::Virtualenv => "virtualenv",
            ToolVariant::Virtualenv5 => "virtualenv5",
        }
    }

    /// The "use distribute" option. `virtualenv5` neither supports nor needs it.
    pub fn packaging_option(self) -> Option<&'static str> {
        match self {
            ToolVariant::Virtualenv => Some("--distribute"),
            ToolVariant::Virtualenv5 => None,
        }
    }
}

impl fmt::Display for ToolVariant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// The installer chosen for a single `install_package` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallerChoice {
    /// ActiveState PyPM, found on PATH.
    Pypm,
    /// The environment's own pip.
    Pip,
    /// easy_install, run through the environment's interpreter.
    EasyInstall,
}

impl fmt::Display for InstallerChoice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InstallerChoice::Pypm => write!(f, "pypm"),
            InstallerChoice::Pip => write!(f, "pip"),
            InstallerChoice::EasyInstall => write!(f, "easy_install"),
        }
    }
}

/// Result of probing for the vendor package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The probe command ran and succeeded.
    Present,
    /// The probe command ran but exited non-zero.
    Absent,
    /// The probe command could not be started at all.
    Unavailable,
}

impl ProbeOutcome {
    pub fn is_present(self) -> bool {
        self == ProbeOutcome::Present
    }
}
