use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{config::Settings, identity::Scope};

/// Allows you to save multiple user profiles and set them as project defaults
#[derive(Parser, Debug)]
#[command(name = "git-user", version)]
pub struct Cli {
    /// Subcommand chosen to execute (defaults to `list`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// The project to set/get the user for
    #[arg(short, long, global = true, default_value = ".")]
    pub path: PathBuf,

    /// The path to the profiles file (default: ~/.git_profiles)
    #[arg(short, long, global = true)]
    pub config_file: Option<PathBuf>,

    /// Writes all messages to the console
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short = 'D', long, global = true, hide = true)]
    pub debug: bool,
}

impl Cli {
    /// Splits the parsed arguments into settings and the command to run
    pub fn into_parts(self) -> (Settings, Commands) {
        let settings = Settings {
            project_path: self.path,
            config_file: self.config_file,
            verbose: self.verbose,
            debug: self.debug,
        };
        let command = self.command.unwrap_or(Commands::List { json: false });
        (settings, command)
    }
}

// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Lists the active user and all saved profiles
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Adds a profile, or replaces one with the same name
    #[command(visible_alias = "edit")]
    Add {
        /// The profile name
        profile: String,
        /// The user name
        name: String,
        /// The user email
        email: String,
    },
    /// Deletes a profile
    #[command(name = "del", visible_alias = "delete")]
    Delete {
        /// The profile to delete (prompts when omitted)
        profile: Option<String>,
    },
    /// Sets the profile for the current project
    Set {
        #[command(flatten)]
        target: Target,
        /// The profile to set (prompts when omitted)
        profile: Option<String>,
    },
    /// Removes the user from the current project
    #[command(name = "remove", visible_alias = "unset", alias = "rem")]
    Remove {
        #[command(flatten)]
        target: Target,
    },
}

/// Scope selection shared by `set` and `remove`
#[derive(Args, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    /// Use the global config instead of the project's
    #[arg(short, long = "global")]
    pub global: bool,
}

impl Target {
    pub fn scope(self) -> Scope {
        if self.global {
            Scope::Global
        } else {
            Scope::Project
        }
    }
}
