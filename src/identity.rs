use std::fmt;

use serde::Serialize;

use crate::error::AppError;

/// Git config level an identity is read from or written to
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Repository-local config (`git config --local`)
    Project,
    /// User-wide config (`git config --global`)
    Global,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Project => f.write_str("project"),
            Scope::Global => f.write_str("global"),
        }
    }
}

/// user.name / user.email at a single scope; unset keys are `None`
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Identity {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

/// Reads and writes the committer identity kept by the version-control tool
pub trait IdentityBackend {
    fn read_identity(&self, scope: Scope) -> Result<Identity, AppError>;

    fn write_identity(&mut self, scope: Scope, name: &str, email: &str) -> Result<(), AppError>;

    /// Drops the whole `user` section; a missing section is not an error
    fn clear_identity(&mut self, scope: Scope) -> Result<(), AppError>;
}

/// A resolved value and the scope it came from
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: String,
    pub scope: Scope,
}

/// Identity a commit would use after applying scope precedence
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectiveIdentity {
    pub name: Option<Resolved>,
    pub email: Option<Resolved>,
}

impl EffectiveIdentity {
    /// Project values override global ones, field by field
    pub fn resolve(project: Identity, global: Identity) -> Self {
        fn pick(project: Option<String>, global: Option<String>) -> Option<Resolved> {
            project
                .map(|value| Resolved {
                    value,
                    scope: Scope::Project,
                })
                .or_else(|| {
                    global.map(|value| Resolved {
                        value,
                        scope: Scope::Global,
                    })
                })
        }

        Self {
            name: pick(project.name, global.name),
            email: pick(project.email, global.email),
        }
    }

    /// Reads both scopes from `backend` and resolves them
    pub fn read(backend: &dyn IdentityBackend) -> Result<Self, AppError> {
        let project = backend.read_identity(Scope::Project)?;
        let global = backend.read_identity(Scope::Global)?;
        Ok(Self::resolve(project, global))
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().map(|r| r.value.as_str())
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_ref().map(|r| r.value.as_str())
    }

    /// True when any field is supplied by the project config
    pub fn uses_project(&self) -> bool {
        [&self.name, &self.email]
            .into_iter()
            .flatten()
            .any(|r| r.scope == Scope::Project)
    }
}
