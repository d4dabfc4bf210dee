// Per-platform capability table.
// Every place that used to branch on the operating system looks its answer up
// in a `PlatformProfile` instead, so platform differences are listed in one spot.

use crate::cli::type_enums::Platform;
use crate::libs::interpreter;
use crate::schemas::environment::VersionSpec;
use std::path::{Path, PathBuf};

/// What differs between platforms when building and using a virtualenv.
pub struct PlatformProfile {
    /// Name of the directory inside an environment that holds its executables.
    pub scripts_dir: &'static str,
    /// Suffix appended to executable names.
    pub exe_suffix: &'static str,
    /// Glob templates, relative to the user's home directory, matching readline shims
    /// in the user-level site-packages. `{ver}` is replaced by "X.Y", `{nodot}` by "XY".
    pub readline_shims: &'static [&'static str],
    /// Whether the system pywin32 package has to be linked into new environments.
    pub links_vendor_com_package: bool,
    /// Whether the creation tool returns before it has finished its work.
    pub creation_detaches: bool,
    /// Builds the system interpreter name or path for a version.
    pub interpreter: fn(&VersionSpec) -> String,
}

static WINDOWS: PlatformProfile = PlatformProfile {
    scripts_dir: "Scripts",
    exe_suffix: ".exe",
    readline_shims: &[
        "AppData/Roaming/Python/Python{nodot}/site-packages/pyreadline*",
        "AppData/Roaming/Python/Python{nodot}/site-packages/readline*",
    ],
    links_vendor_com_package: true,
    creation_detaches: true,
    interpreter: interpreter::windows_python,
};

static MACOS: PlatformProfile = PlatformProfile {
    scripts_dir: "bin",
    exe_suffix: "",
    readline_shims: &[
        "Library/Python/{ver}/lib/python/site-packages/readline*",
        ".local/lib/python{ver}/site-packages/readline*",
    ],
    links_vendor_com_package: false,
    creation_detaches: false,
    interpreter: interpreter::framework_python,
};

static UNIX: PlatformProfile = PlatformProfile {
    scripts_dir: "bin",
    exe_suffix: "",
    readline_shims: &[".local/lib/python{ver}/site-packages/readline*"],
    links_vendor_com_package: false,
    creation_detaches: false,
    interpreter: interpreter::path_python,
};

impl Platform {
    /// The capability row for this platform.
    pub fn profile(self) -> &'static PlatformProfile {
        match self {
            Platform::Windows => &WINDOWS,
            Platform::MacOs => &MACOS,
            Platform::Unix => &UNIX,
        }
    }
}

impl PlatformProfile {
    /// `name` with the platform's executable suffix (e.g. "pip.exe").
    pub fn executable(&self, name: &str) -> String {
        format!("{name}{}", self.exe_suffix)
    }

    /// Path of an executable inside an environment (e.g. `env/bin/pip`).
    pub fn env_script(&self, env_dir: &Path, name: &str) -> PathBuf {
        env_dir.join(self.scripts_dir).join(self.executable(name))
    }

    /// The environment's own interpreter.
    pub fn env_python(&self, env_dir: &Path) -> PathBuf {
        self.env_script(env_dir, "python")
    }

    /// Readline shim glob patterns for `version`, anchored at `home`.
    pub fn readline_shim_patterns(&self, home: &Path, version: &VersionSpec) -> Vec<String> {
        self.readline_shims
            .iter()
            .map(|template| {
                let relative = template
                    .replace("{ver}", version.as_str())
                    .replace("{nodot}", &version.nodot());
                // glob needs escaped metacharacters in the literal home part.
                let anchor = glob::Pattern::escape(&home.to_string_lossy());
                format!("{anchor}/{relative}")
            })
            .collect()
    }
}

/// Detects the platform this binary was built for.
pub fn detect_platform() -> Platform {
    match std::env::consts::OS {
        "windows" => Platform::Windows,
        "macos" => Platform::MacOs,
        _ => Platform::Unix,
    }
}
