use std::fmt::Write;

use colored::Colorize;

use crate::{
    commands::{Listing, Outcome},
    error::AppError,
    identity::Scope,
};

/// How the tool is invoked through git (`git user ...`)
pub const APP: &str = "git user";

/// Formats an outcome as the text printed to stdout
pub fn render(outcome: &Outcome) -> Result<String, AppError> {
    let text = match outcome {
        Outcome::Listing { listing, json: true } => serde_json::to_string_pretty(listing)?,
        Outcome::Listing { listing, json: false } => render_listing(listing),
        Outcome::Saved { profile } => format!("Added profile \"{profile}\""),
        Outcome::Deleted { profile } => format!("Deleted profile \"{profile}\""),
        Outcome::MissingProfile { profile } => format!(
            "There is no profile named \"{profile}\" in the config.\n\
             You can add the profile with:\n  \"{APP} add {profile} <name> <email>\""
        ),
        Outcome::NothingToDelete { profile } => format!(
            "There is no profile named \"{profile}\" in the config.\n\
             Type \"{APP} list\" to see the saved profiles."
        ),
        Outcome::NoProfiles => no_profiles_hint(),
        Outcome::Applied {
            scope: Scope::Global,
            profile,
            ..
        } => format!(
            "The global user has been set to \"{} <{}>\"",
            profile.name, profile.email
        ),
        Outcome::Applied {
            scope: Scope::Project,
            repository,
            profile,
        } => format!(
            "The user for the \"{repository}\" repository has been set to \"{} <{}>\"",
            profile.name, profile.email
        ),
        Outcome::Cleared {
            scope: Scope::Global,
            ..
        } => "Removed user info from the global config".to_string(),
        Outcome::Cleared {
            scope: Scope::Project,
            repository,
        } => format!("Removed user info from \"{repository}\""),
    };
    Ok(text)
}

fn render_listing(listing: &Listing) -> String {
    let mut out = String::new();
    let active = &listing.active;

    if active.uses_project() {
        out.push_str("Project Profile:\n");
        let _ = writeln!(
            out,
            "  Path: {}",
            listing.project_path.display().to_string().green()
        );
    } else {
        out.push_str("Global Profile:\n");
    }

    let name = active.name().map_or_else(|| "N/A".red(), |name| name.green());
    let email = active.email().map_or_else(|| "N/A".red(), |email| email.blue());
    let _ = writeln!(out, "  User: {name} <{email}>");
    out.push('\n');

    if listing.profiles.is_empty() {
        out.push_str(&no_profiles_hint());
        return out;
    }

    out.push_str("Saved Profiles:");
    for (key, profile) in &listing.profiles {
        let _ = write!(out, "\n  {}: {} <{}>", key.yellow(), profile.name, profile.email);
    }
    out
}

fn no_profiles_hint() -> String {
    format!(
        "There are no profiles in your config.\n  \
         Add a profile with \"{APP} add <profile> <name> <email>\"\n\
         Type \"{APP} --help\" for more info."
    )
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, path::PathBuf};

    use super::*;
    use crate::{
        identity::{EffectiveIdentity, Identity},
        profile::Profile,
    };

    fn plain() {
        colored::control::set_override(false);
    }

    fn listing(project: Identity, global: Identity, profiles: &[(&str, Profile)]) -> Listing {
        Listing {
            project_path: PathBuf::from("/srv/widgets"),
            active: EffectiveIdentity::resolve(project, global),
            profiles: profiles
                .iter()
                .map(|(key, profile)| (key.to_string(), profile.clone()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn listing_shows_project_header_and_sorted_profiles() {
        plain();
        let project = Identity {
            name: Some("Ada".to_string()),
            email: Some("ada@work.com".to_string()),
        };
        let listing = listing(
            project,
            Identity::default(),
            &[
                ("work", Profile::new("A", "a@x.com")),
                ("home", Profile::new("B", "b@y.org")),
            ],
        );

        let text = render(&Outcome::Listing { listing, json: false }).unwrap();
        assert_eq!(
            text,
            "Project Profile:\n  Path: /srv/widgets\n  User: Ada <ada@work.com>\n\n\
             Saved Profiles:\n  home: B <b@y.org>\n  work: A <a@x.com>"
        );
    }

    #[test]
    fn listing_marks_missing_fields() {
        plain();
        let global = Identity {
            name: Some("Global".to_string()),
            email: None,
        };
        let text = render(&Outcome::Listing {
            listing: listing(Identity::default(), global, &[]),
            json: false,
        })
        .unwrap();

        assert!(text.starts_with("Global Profile:\n  User: Global <N/A>\n\n"));
        assert!(text.contains("There are no profiles in your config."));
    }

    #[test]
    fn json_listing() {
        let text = render(&Outcome::Listing {
            listing: listing(
                Identity::default(),
                Identity {
                    name: Some("G".to_string()),
                    email: Some("g@x.org".to_string()),
                },
                &[("work", Profile::new("A", "a@x.com"))],
            ),
            json: true,
        })
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["active"]["name"]["value"], "G");
        assert_eq!(value["active"]["name"]["scope"], "global");
        assert_eq!(value["profiles"]["work"]["email"], "a@x.com");
    }

    #[test]
    fn missing_profile_suggests_add() {
        plain();
        let text = render(&Outcome::MissingProfile {
            profile: "oss".to_string(),
        })
        .unwrap();
        assert!(text.contains("\"git user add oss <name> <email>\""));
    }

    #[test]
    fn applied_and_cleared_messages() {
        plain();
        let profile = Profile::new("A", "a@x.com");
        let project = render(&Outcome::Applied {
            scope: Scope::Project,
            repository: "widgets".to_string(),
            profile: profile.clone(),
        })
        .unwrap();
        assert_eq!(
            project,
            "The user for the \"widgets\" repository has been set to \"A <a@x.com>\""
        );

        let global = render(&Outcome::Cleared {
            scope: Scope::Global,
            repository: "widgets".to_string(),
        })
        .unwrap();
        assert_eq!(global, "Removed user info from the global config");
    }
}
