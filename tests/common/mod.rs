#![allow(dead_code)]

use std::cell::RefCell;

use git_user::{
    AppError,
    identity::{Identity, IdentityBackend, Scope},
    menu::ProfilePicker,
};

/// In-memory stand-in for `git config`
#[derive(Debug, Default)]
pub struct FakeGit {
    pub project: Identity,
    pub global: Identity,
}

impl FakeGit {
    pub fn with_global(name: &str, email: &str) -> Self {
        Self {
            project: Identity::default(),
            global: Identity {
                name: Some(name.to_string()),
                email: Some(email.to_string()),
            },
        }
    }

    fn slot(&mut self, scope: Scope) -> &mut Identity {
        match scope {
            Scope::Project => &mut self.project,
            Scope::Global => &mut self.global,
        }
    }
}

impl IdentityBackend for FakeGit {
    fn read_identity(&self, scope: Scope) -> Result<Identity, AppError> {
        Ok(match scope {
            Scope::Project => self.project.clone(),
            Scope::Global => self.global.clone(),
        })
    }

    fn write_identity(&mut self, scope: Scope, name: &str, email: &str) -> Result<(), AppError> {
        *self.slot(scope) = Identity {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
        };
        Ok(())
    }

    fn clear_identity(&mut self, scope: Scope) -> Result<(), AppError> {
        *self.slot(scope) = Identity::default();
        Ok(())
    }
}

/// Picker that answers with a fixed choice, or aborts like Esc would
#[derive(Debug, Default)]
pub struct ScriptedPicker {
    pub answer: Option<String>,
    pub offered: RefCell<Vec<String>>,
}

impl ScriptedPicker {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            offered: RefCell::default(),
        }
    }
}

impl ProfilePicker for ScriptedPicker {
    fn pick(&self, _prompt: &str, profiles: Vec<String>) -> Result<String, AppError> {
        *self.offered.borrow_mut() = profiles;
        self.answer
            .clone()
            .ok_or(AppError::Inquire(inquire::InquireError::OperationCanceled))
    }
}
