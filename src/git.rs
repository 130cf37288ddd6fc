use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
    process::{Command, Output},
};

use tracing::{debug, trace};

use crate::{
    error::AppError,
    identity::{Identity, IdentityBackend, Scope},
};

/// `git config` exit status meaning "key not set"
const EXIT_KEY_NOT_FOUND: i32 = 1;

/// `IdentityBackend` that shells out to the `git` executable
#[derive(Debug, Clone)]
pub struct GitCli {
    project_path: PathBuf,
    envs: Vec<(OsString, OsString)>,
}

impl GitCli {
    /// # Arguments
    /// * `project_path` - Repository that project scope refers to
    pub fn new(project_path: impl Into<PathBuf>) -> Self {
        Self {
            project_path: project_path.into(),
            envs: Vec::new(),
        }
    }

    /// Adds an environment variable to every git invocation, e.g.
    /// `GIT_CONFIG_GLOBAL` to point global scope at another file
    pub fn env(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.envs
            .push((key.as_ref().to_os_string(), value.as_ref().to_os_string()));
        self
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    /// Gets a config value as git resolves it from every level
    ///
    /// # Arguments
    /// * `key` - Git config key such as `user.profiles`
    pub fn get_value(&self, key: &str) -> Result<Option<String>, AppError> {
        let output = self.run(None, &["config", "--get", key])?;
        value_from_output(output)
    }

    /// Sets a config value in the global config
    ///
    /// # Arguments
    /// * `key` - Git config key to set
    /// * `value` - Value to set for key
    pub fn set_global_value(&self, key: &str, value: &str) -> Result<(), AppError> {
        let output = self.run(None, &["config", "--global", key, value])?;
        check_status(output).map(drop)
    }

    /// Checks if the project path is inside a Git work tree
    pub fn is_inside_git_repo(&self) -> Result<bool, AppError> {
        let output = self.run(
            Some(self.project_path.as_path()),
            &["rev-parse", "--is-inside-work-tree"],
        )?;

        if !output.status.success() {
            return Ok(false);
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim() == "true")
    }

    fn read_key(&self, scope: Scope, key: &str) -> Result<Option<String>, AppError> {
        let output = self.run(
            self.cwd(scope),
            &["config", scope_flag(scope), "--get", key],
        )?;
        value_from_output(output)
    }

    fn write_key(&self, scope: Scope, key: &str, value: &str) -> Result<(), AppError> {
        let output = self.run(self.cwd(scope), &["config", scope_flag(scope), key, value])?;
        check_status(output).map(drop)
    }

    /// Any `user.*` key set at `scope`, judged by exit status alone
    fn has_user_keys(&self, scope: Scope) -> Result<bool, AppError> {
        let output = self.run(
            self.cwd(scope),
            &["config", scope_flag(scope), "--get-regexp", r"^user\."],
        )?;
        Ok(value_from_output(output)?.is_some())
    }

    fn ensure_repo(&self, scope: Scope) -> Result<(), AppError> {
        if scope == Scope::Project && !self.is_inside_git_repo()? {
            return Err(AppError::NotInGitRepository);
        }
        Ok(())
    }

    fn cwd(&self, scope: Scope) -> Option<&Path> {
        match scope {
            Scope::Project => Some(self.project_path.as_path()),
            Scope::Global => None,
        }
    }

    fn run(&self, cwd: Option<&Path>, args: &[&str]) -> Result<Output, AppError> {
        let mut command = Command::new("git");
        if let Some(dir) = cwd {
            command.arg("-C").arg(dir);
        }
        command.args(args);
        command.envs(self.envs.iter().map(|(k, v)| (k, v)));
        // git translates its diagnostics; keep them in one language
        command.env("LC_ALL", "C").env_remove("LANGUAGE");

        debug!("running {command:?}");
        let output = command.output()?;
        trace!(
            "git exited with {} (stdout: {:?}, stderr: {:?})",
            output.status,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        Ok(output)
    }
}

impl IdentityBackend for GitCli {
    fn read_identity(&self, scope: Scope) -> Result<Identity, AppError> {
        if scope == Scope::Project && !self.is_inside_git_repo()? {
            debug!("{} is not a git work tree", self.project_path.display());
            return Ok(Identity::default());
        }

        Ok(Identity {
            name: self.read_key(scope, "user.name")?,
            email: self.read_key(scope, "user.email")?,
        })
    }

    fn write_identity(&mut self, scope: Scope, name: &str, email: &str) -> Result<(), AppError> {
        self.ensure_repo(scope)?;
        self.write_key(scope, "user.name", name)?;
        self.write_key(scope, "user.email", email)
    }

    fn clear_identity(&mut self, scope: Scope) -> Result<(), AppError> {
        self.ensure_repo(scope)?;
        if !self.has_user_keys(scope)? {
            debug!("no user section in the {scope} config");
            return Ok(());
        }

        let output = self.run(
            self.cwd(scope),
            &["config", scope_flag(scope), "--remove-section", "user"],
        )?;
        check_status(output).map(drop)
    }
}

fn scope_flag(scope: Scope) -> &'static str {
    match scope {
        Scope::Project => "--local",
        Scope::Global => "--global",
    }
}

fn check_status(output: Output) -> Result<Output, AppError> {
    if !output.status.success() {
        return Err(AppError::GitCommand(
            String::from_utf8(output.stderr)?.trim().to_string(),
        ));
    }
    Ok(output)
}

fn value_from_output(output: Output) -> Result<Option<String>, AppError> {
    if output.status.code() == Some(EXIT_KEY_NOT_FOUND) {
        return Ok(None);
    }

    let output = check_status(output)?;
    let value = String::from_utf8(output.stdout)?.trim().to_string();
    Ok(Some(value).filter(|v| !v.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_flags() {
        assert_eq!(scope_flag(Scope::Project), "--local");
        assert_eq!(scope_flag(Scope::Global), "--global");
    }

    #[test]
    fn project_scope_runs_in_project_path() {
        let git = GitCli::new("/srv/repo");
        assert_eq!(git.cwd(Scope::Project), Some(Path::new("/srv/repo")));
        assert_eq!(git.cwd(Scope::Global), None);
    }
}
