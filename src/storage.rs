use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    config::expand_home,
    error::AppError,
    profile::Profile,
    validation::{validate_display_name, validate_email, validate_profile_key},
};

/// Profiles file backing a catalog of saved identities.
///
/// Entries keep the order they appear in the file; every mutation rewrites the
/// whole file.
#[derive(Debug)]
pub struct ProfileStore {
    path: PathBuf,
    profiles: Vec<(String, Profile)>,
}

impl ProfileStore {
    /// Loads the profiles file at `path`, expanding a leading `~`.
    ///
    /// A missing file is an empty store.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = expand_home(path.as_ref())?;

        let profiles = match fs::read_to_string(&path) {
            Ok(contents) => parse(&path, &contents)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("profiles file {} does not exist yet", path.display());
                Vec::new()
            }
            Err(err) => return Err(err.into()),
        };

        debug!("loaded {} profile(s) from {}", profiles.len(), path.display());
        Ok(Self { path, profiles })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Looks up a profile; surrounding whitespace in `key` is ignored as in `upsert`
    pub fn get(&self, key: &str) -> Option<&Profile> {
        let key = key.trim();
        self.profiles
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, profile)| profile)
    }

    /// All profiles by key, in no particular order
    pub fn list(&self) -> HashMap<&str, &Profile> {
        self.profiles
            .iter()
            .map(|(key, profile)| (key.as_str(), profile))
            .collect()
    }

    /// All profiles sorted by key, for display
    pub fn sorted(&self) -> Vec<(&str, &Profile)> {
        let mut entries: Vec<(&str, &Profile)> = self
            .profiles
            .iter()
            .map(|(key, profile)| (key.as_str(), profile))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Inserts or replaces a profile and saves the file.
    ///
    /// A replaced profile keeps its position in the file.
    pub fn upsert(&mut self, key: &str, name: &str, email: &str) -> Result<(), AppError> {
        let (key, name, email) = (key.trim(), name.trim(), email.trim());
        validate_profile_key(key)?;
        validate_display_name(name)?;
        validate_email(email)?;

        let profile = Profile::new(name, email);
        match self.profiles.iter_mut().find(|(existing, _)| existing == key) {
            Some((_, existing)) => *existing = profile,
            None => self.profiles.push((key.to_string(), profile)),
        }
        self.save()
    }

    /// Removes a profile and saves the file
    pub fn delete(&mut self, key: &str) -> Result<Profile, AppError> {
        let key = key.trim();
        let index = self
            .profiles
            .iter()
            .position(|(existing, _)| existing == key)
            .ok_or_else(|| AppError::ProfileNotFound(key.to_string()))?;

        let (_, removed) = self.profiles.remove(index);
        self.save()?;
        Ok(removed)
    }

    fn save(&self) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, render(&self.profiles))?;
        debug!("wrote {} profile(s) to {}", self.profiles.len(), self.path.display());
        Ok(())
    }
}

/// Section under construction while parsing
struct Section {
    key: String,
    line: usize,
    name: Option<String>,
    email: Option<String>,
}

impl Section {
    fn finish(self, path: &Path) -> Result<(String, Profile), AppError> {
        let missing = |key: &'static str| AppError::MissingKey {
            path: path.to_path_buf(),
            profile: self.key.clone(),
            key,
        };
        let name = self.name.clone().ok_or_else(|| missing("name"))?;
        let email = self.email.clone().ok_or_else(|| missing("email"))?;
        Ok((self.key, Profile { name, email }))
    }
}

fn parse(path: &Path, contents: &str) -> Result<Vec<(String, Profile)>, AppError> {
    let corrupt = |line: usize, message: String| AppError::Corrupt {
        path: path.to_path_buf(),
        line,
        message,
    };

    let mut profiles: Vec<(String, Profile)> = Vec::new();
    let mut current: Option<Section> = None;

    for (index, raw) in contents.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with(['#', ';']) {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let key = header
                .strip_suffix(']')
                .ok_or_else(|| corrupt(line_no, "unterminated section header".to_string()))?
                .trim();
            if key.is_empty() {
                return Err(corrupt(line_no, "empty profile name".to_string()));
            }

            if let Some(done) = current.take() {
                profiles.push(done.finish(path)?);
            }
            if profiles.iter().any(|(existing, _)| existing == key) {
                return Err(corrupt(line_no, format!("duplicate profile '{key}'")));
            }
            current = Some(Section {
                key: key.to_string(),
                line: line_no,
                name: None,
                email: None,
            });
            continue;
        }

        let (field, value) = line
            .split_once(['=', ':'])
            .ok_or_else(|| corrupt(line_no, "expected 'key = value'".to_string()))?;
        let field = field.trim().to_ascii_lowercase();
        let value = value.trim().to_string();

        let section = current
            .as_mut()
            .ok_or_else(|| corrupt(line_no, format!("'{field}' appears before any profile")))?;
        let slot = match field.as_str() {
            "name" => &mut section.name,
            "email" => &mut section.email,
            _ => {
                return Err(corrupt(
                    line_no,
                    format!("unknown key '{field}' in profile '{}'", section.key),
                ));
            }
        };
        if slot.is_some() {
            return Err(corrupt(
                line_no,
                format!(
                    "duplicate '{field}' in profile '{}' (opened on line {})",
                    section.key, section.line
                ),
            ));
        }
        *slot = Some(value);
    }

    if let Some(done) = current.take() {
        profiles.push(done.finish(path)?);
    }
    Ok(profiles)
}

fn render(profiles: &[(String, Profile)]) -> String {
    let mut out = String::new();
    for (key, profile) in profiles {
        out.push_str(&format!(
            "[{key}]\nname = {}\nemail = {}\n\n",
            profile.name, profile.email
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(contents: &str) -> Result<Vec<(String, Profile)>, AppError> {
        parse(Path::new("profiles"), contents)
    }

    #[test]
    fn parses_sections_in_file_order() {
        let profiles = parse_str(
            "# saved identities\n[work]\nname = A\nemail = a@x.com\n\n[home]\nname: B\nEMAIL = b@y.org\n",
        )
        .unwrap();

        assert_eq!(
            profiles,
            vec![
                ("work".to_string(), Profile::new("A", "a@x.com")),
                ("home".to_string(), Profile::new("B", "b@y.org")),
            ]
        );
    }

    #[test]
    fn keeps_equals_signs_inside_values() {
        let profiles = parse_str("[odd]\nname = A = B\nemail = a@x.com\n").unwrap();
        assert_eq!(profiles[0].1.name, "A = B");
    }

    #[test]
    fn empty_file_has_no_profiles() {
        assert!(parse_str("").unwrap().is_empty());
        assert!(parse_str("\n; nothing here\n").unwrap().is_empty());
    }

    #[test]
    fn missing_email_is_reported() {
        let err = parse_str("[work]\nname = A\n").unwrap_err();
        assert!(matches!(
            err,
            AppError::MissingKey { ref profile, key: "email", .. } if profile == "work"
        ));
    }

    #[test]
    fn key_outside_section_is_corrupt() {
        let err = parse_str("name = A\n").unwrap_err();
        assert!(matches!(err, AppError::Corrupt { line: 1, .. }));
    }

    #[test]
    fn unknown_and_duplicate_keys_are_corrupt() {
        let unknown = parse_str("[work]\nname = A\nemail = a@x.com\nsigningkey = 42\n").unwrap_err();
        assert!(matches!(unknown, AppError::Corrupt { line: 4, .. }));

        let duplicate = parse_str("[work]\nname = A\nname = B\nemail = a@x.com\n").unwrap_err();
        assert!(matches!(duplicate, AppError::Corrupt { line: 3, .. }));
    }

    #[test]
    fn empty_section_name_is_corrupt() {
        let err = parse_str("[ ]\nname = A\nemail = a@x.com\n").unwrap_err();
        assert!(matches!(err, AppError::Corrupt { line: 1, .. }));
    }

    #[test]
    fn duplicate_section_is_corrupt() {
        let err = parse_str("[w]\nname = A\nemail = a@x.com\n[w]\nname = B\nemail = b@y.org\n")
            .unwrap_err();
        assert!(matches!(err, AppError::Corrupt { line: 4, .. }));
    }

    #[test]
    fn rendered_output_parses_back() {
        let profiles = vec![
            ("work".to_string(), Profile::new("Ada Lovelace", "ada@work.com")),
            ("home".to_string(), Profile::new("Ada", "ada@home.org")),
        ];
        let text = render(&profiles);
        assert!(text.starts_with("[work]\nname = Ada Lovelace\nemail = ada@work.com\n\n"));
        assert_eq!(parse_str(&text).unwrap(), profiles);
    }
}
