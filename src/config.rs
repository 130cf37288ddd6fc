use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{error::AppError, git::GitCli};

/// Profiles file used when neither `--config-file` nor `user.profiles` is set
pub const DEFAULT_PROFILES_PATH: &str = "~/.git_profiles";

/// Git config key remembering where the profiles file lives
pub const PROFILES_PATH_KEY: &str = "user.profiles";

/// Runtime settings built once from the command line
#[derive(Debug, Clone)]
pub struct Settings {
    /// Repository that project scope refers to
    pub project_path: PathBuf,
    /// Explicit profiles file, if given
    pub config_file: Option<PathBuf>,
    pub verbose: bool,
    pub debug: bool,
}

impl Settings {
    /// Log filter directive implied by the verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "trace"
        } else if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

/// Expands a leading `~` to the user's home directory
pub fn expand_home(path: &Path) -> Result<PathBuf, AppError> {
    match path.strip_prefix("~") {
        Ok(rest) => {
            let home_dir: PathBuf = dirs::home_dir().ok_or(AppError::HomeDirNotFound)?;
            Ok(home_dir.join(rest))
        }
        Err(_) => Ok(path.to_path_buf()),
    }
}

/// Works out which profiles file to use.
///
/// An explicit path wins. Otherwise the path stored under `user.profiles` in
/// git's config is used, and when that is unset the default is recorded in
/// the global config so later runs find it.
pub fn resolve_profiles_path(explicit: Option<&Path>, git: &GitCli) -> Result<PathBuf, AppError> {
    if let Some(path) = explicit {
        return expand_home(path);
    }

    match git.get_value(PROFILES_PATH_KEY)? {
        Some(stored) => {
            debug!("profiles path from git config: {stored}");
            expand_home(Path::new(&stored))
        }
        None => {
            info!("recording {DEFAULT_PROFILES_PATH} as {PROFILES_PATH_KEY} in the global git config");
            git.set_global_value(PROFILES_PATH_KEY, DEFAULT_PROFILES_PATH)?;
            expand_home(Path::new(DEFAULT_PROFILES_PATH))
        }
    }
}
