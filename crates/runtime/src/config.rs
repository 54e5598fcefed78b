use std::{
    env,
    ffi::OsString,
    fmt,
    path::{Path, PathBuf},
};

pub const PROGRAM_NAME: &str = "reap";
pub const PROGRAM_LOG_LEVEL: &str = "REAP_LOG_LEVEL";
/// Environment override for the rule file location.
pub const PROGRAM_CONFIG: &str = "REAP_CONFIG";
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Where the rule file path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Argument,
    Environment,
    WorkingDir,
    UserDir,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConfigSource::Argument => "--config",
            ConfigSource::Environment => PROGRAM_CONFIG,
            ConfigSource::WorkingDir => "working directory",
            ConfigSource::UserDir => "user config directory",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    pub path: PathBuf,
    pub source: ConfigSource,
}

/// Per-user configuration directory, e.g. `~/.config/reap`.
pub fn user_config_dir() -> Option<PathBuf> {
    // Check XDG_CONFIG_HOME first so it also applies on macOS
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return Some(PathBuf::from(xdg_config).join(PROGRAM_NAME));
    }

    dirs::config_dir().map(|p| p.join(PROGRAM_NAME))
}

/// Locate the rule file.
///
/// Order: explicit argument, `REAP_CONFIG`, `config.json` in the working
/// directory, `config.json` in the user config directory. When nothing exists
/// the working directory candidate is returned so the caller reports a
/// sensible "not found" path.
pub fn resolve_config_path(explicit: Option<&Path>) -> ConfigLocation {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve_from(
        explicit,
        env::var_os(PROGRAM_CONFIG),
        &cwd,
        user_config_dir().as_deref(),
    )
}

fn resolve_from(
    explicit: Option<&Path>,
    env_value: Option<OsString>,
    cwd: &Path,
    user_dir: Option<&Path>,
) -> ConfigLocation {
    if let Some(path) = explicit {
        return ConfigLocation {
            path: path.to_path_buf(),
            source: ConfigSource::Argument,
        };
    }

    if let Some(value) = env_value
        && !value.is_empty()
    {
        return ConfigLocation {
            path: PathBuf::from(value),
            source: ConfigSource::Environment,
        };
    }

    let local = cwd.join(CONFIG_FILE_NAME);
    if local.is_file() {
        return ConfigLocation {
            path: local,
            source: ConfigSource::WorkingDir,
        };
    }

    if let Some(dir) = user_dir {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return ConfigLocation {
                path: candidate,
                source: ConfigSource::UserDir,
            };
        }
    }

    ConfigLocation {
        path: local,
        source: ConfigSource::WorkingDir,
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
