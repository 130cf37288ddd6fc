use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    cli::Commands,
    config::Settings,
    error::AppError,
    identity::{EffectiveIdentity, IdentityBackend, Scope},
    menu::ProfilePicker,
    profile::Profile,
    storage::ProfileStore,
};

/// Everything `list` shows
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub project_path: PathBuf,
    pub active: EffectiveIdentity,
    pub profiles: BTreeMap<String, Profile>,
}

/// Result of a command, rendered by `output`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Listing { listing: Listing, json: bool },
    Saved { profile: String },
    Deleted { profile: String },
    /// `set` named a profile that is not in the file
    MissingProfile { profile: String },
    /// `del` named a profile that is not in the file
    NothingToDelete { profile: String },
    /// A prompt was needed but there is nothing to choose from
    NoProfiles,
    Applied {
        scope: Scope,
        repository: String,
        profile: Profile,
    },
    Cleared { scope: Scope, repository: String },
}

/// Runs one command against the profiles file and the identity backend
pub fn execute(
    command: Commands,
    settings: &Settings,
    store: &mut ProfileStore,
    backend: &mut dyn IdentityBackend,
    picker: &dyn ProfilePicker,
) -> Result<Outcome, AppError> {
    debug!("executing {command:?}");

    match command {
        Commands::List { json } => list(settings, store, backend, json),
        Commands::Add {
            profile,
            name,
            email,
        } => {
            let profile = profile.trim().to_string();
            store.upsert(&profile, &name, &email)?;
            info!("saved profile '{profile}' to {}", store.path().display());
            Ok(Outcome::Saved { profile })
        }
        Commands::Delete { profile } => {
            let Some(profile) = choose(profile, store, picker, "select profile to delete:")? else {
                return Ok(Outcome::NoProfiles);
            };
            match store.delete(&profile) {
                Ok(_) => Ok(Outcome::Deleted { profile }),
                Err(AppError::ProfileNotFound(profile)) => Ok(Outcome::NothingToDelete { profile }),
                Err(err) => Err(err),
            }
        }
        Commands::Set { target, profile } => {
            let Some(key) = choose(profile, store, picker, "select profile to set:")? else {
                return Ok(Outcome::NoProfiles);
            };
            let Some(profile) = store.get(&key).cloned() else {
                return Ok(Outcome::MissingProfile { profile: key });
            };

            let scope = target.scope();
            backend.write_identity(scope, &profile.name, &profile.email)?;
            info!("applied profile '{key}' to the {scope} config");
            Ok(Outcome::Applied {
                scope,
                repository: repository_name(&settings.project_path),
                profile,
            })
        }
        Commands::Remove { target } => {
            let scope = target.scope();
            backend.clear_identity(scope)?;
            Ok(Outcome::Cleared {
                scope,
                repository: repository_name(&settings.project_path),
            })
        }
    }
}

fn list(
    settings: &Settings,
    store: &ProfileStore,
    backend: &dyn IdentityBackend,
    json: bool,
) -> Result<Outcome, AppError> {
    let active = EffectiveIdentity::read(backend)?;
    let profiles = store
        .list()
        .into_iter()
        .map(|(key, profile)| (key.to_string(), profile.clone()))
        .collect();

    Ok(Outcome::Listing {
        listing: Listing {
            project_path: absolute(&settings.project_path),
            active,
            profiles,
        },
        json,
    })
}

/// Uses the named profile, or asks for one when none was given.
///
/// Returns `None` when a prompt is needed but the file has no profiles.
fn choose(
    profile: Option<String>,
    store: &ProfileStore,
    picker: &dyn ProfilePicker,
    prompt: &str,
) -> Result<Option<String>, AppError> {
    if let Some(profile) = profile {
        return Ok(Some(profile.trim().to_string()));
    }
    if store.is_empty() {
        return Ok(None);
    }

    let keys: Vec<String> = store.sorted().into_iter().map(|(key, _)| key.to_string()).collect();
    picker.pick(prompt, keys).map(Some)
}

fn absolute(path: &Path) -> PathBuf {
    fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn repository_name(path: &Path) -> String {
    let path = absolute(path);
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
