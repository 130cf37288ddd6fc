//! # git-user
//!
//! Save multiple Git identities (name + email) as named profiles and apply
//! one of them to a single repository or to the global Git config.
//!
//! ## Modules
//!
//! - [`storage`] - Profiles file (INI sections of `name`/`email`)
//! - [`identity`] - Scopes, identity precedence and the backend trait
//! - [`git`] - Backend that shells out to `git config`
//! - [`commands`] - Command dispatch producing an [`commands::Outcome`]
//! - [`output`] - Terminal rendering of outcomes

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod identity;
pub mod menu;
pub mod output;
pub mod profile;
pub mod storage;
pub mod validation;

pub use error::AppError;
pub use profile::Profile;
