//! Two-layer identity model
//!
//! An [`Identity`] is the Master Standard (user-agnostic behavioral text)
//! composed with one user [`Profile`]. The standard is always loaded first,
//! then the profile. Either both load or the caller gets an error; there is
//! no partially loaded identity.
//!
//! ```no_run
//! use mirrordna::identity::IdentityLoader;
//!
//! let loader = IdentityLoader::default();
//! let identity = loader.load(None)?;
//! let prompt = identity.build_system_prompt("Summarize today's notes.");
//! # Ok::<(), mirrordna::identity::IdentityError>(())
//! ```

pub mod error;
pub mod profile;
pub mod standard;

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::config::Config;

pub use error::{AssetKind, IdentityError, IdentityResult};
pub use profile::Profile;
pub use standard::StandardText;

/// Profile used when the caller does not name one
pub const DEFAULT_PROFILE: &str = "profile_paul_v16.yaml";

/// Location of the Master Standard, relative to the repository root
pub const DEFAULT_STANDARD_PATH: &str = "spec/mirror/MirrorDNA_Master_Standard_v16.md";

/// Directory holding profile files, relative to the repository root
pub const DEFAULT_PROFILES_DIR: &str = "spec/mirror/profiles";

const PROFILE_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Standard + Profile, composed once and never mutated
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    standard: StandardText,
    profile: Profile,
    profile_name: String,
}

impl Identity {
    pub fn new(standard: StandardText, profile: Profile, profile_name: impl Into<String>) -> Self {
        Self {
            standard,
            profile,
            profile_name: profile_name.into(),
        }
    }

    pub fn standard(&self) -> &str {
        self.standard.as_str()
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Name the profile was selected by
    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    pub fn profile_summary(&self) -> String {
        self.profile.summary()
    }

    /// Standard, then profile summary, then task instructions.
    ///
    /// The task section is left out entirely when `task_instructions` is empty.
    pub fn build_system_prompt(&self, task_instructions: &str) -> String {
        let mut parts = vec![
            self.standard.as_str().to_string(),
            "\n---\n".to_string(),
            "# MirrorDNA Profile".to_string(),
            self.profile_summary(),
        ];

        if !task_instructions.is_empty() {
            parts.push("\n---\n".to_string());
            parts.push("# Task Instructions".to_string());
            parts.push(task_instructions.to_string());
        }

        parts.join("\n")
    }
}

/// Resolves and reads identity assets.
///
/// Holds paths only. Every call goes back to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityLoader {
    standard_path: PathBuf,
    profiles_dir: PathBuf,
    default_profile: String,
}

impl Default for IdentityLoader {
    fn default() -> Self {
        Self::new(DEFAULT_STANDARD_PATH, DEFAULT_PROFILES_DIR)
    }
}

impl IdentityLoader {
    pub fn new(standard_path: impl Into<PathBuf>, profiles_dir: impl Into<PathBuf>) -> Self {
        Self {
            standard_path: standard_path.into(),
            profiles_dir: profiles_dir.into(),
            default_profile: DEFAULT_PROFILE.to_string(),
        }
    }

    pub fn with_default_profile(mut self, name: impl Into<String>) -> Self {
        self.default_profile = name.into();
        self
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Config::expand_path(&config.paths.standard),
            Config::expand_path(&config.paths.profiles),
        )
        .with_default_profile(config.default_profile.clone())
    }

    pub fn standard_path(&self) -> &Path {
        &self.standard_path
    }

    pub fn profiles_dir(&self) -> &Path {
        &self.profiles_dir
    }

    pub fn default_profile(&self) -> &str {
        &self.default_profile
    }

    /// Load the standard and the named profile (or the default profile)
    pub fn load(&self, profile_name: Option<&str>) -> IdentityResult<Identity> {
        let name = profile_name.unwrap_or(self.default_profile.as_str());

        let standard = self.load_standard()?;
        let profile = self.load_profile(name)?;

        log::info!(
            "Loaded identity: standard={} profile={} user={}",
            self.standard_path.display(),
            name,
            profile.user_name
        );

        Ok(Identity::new(standard, profile, name))
    }

    pub fn load_standard(&self) -> IdentityResult<StandardText> {
        standard::load_standard(&self.standard_path)
    }

    pub fn load_profile(&self, name: &str) -> IdentityResult<Profile> {
        let path = self.profile_path(name)?;
        profile::load_profile(&path)
    }

    /// Resolve a profile name to a file under the profiles directory.
    ///
    /// A name without an extension also matches `<name>.yaml` / `<name>.yml`.
    /// Names that are not a single plain path component are rejected.
    pub fn profile_path(&self, name: &str) -> IdentityResult<PathBuf> {
        let mut components = Path::new(name).components();
        let is_plain = matches!((components.next(), components.next()), (Some(Component::Normal(_)), None));
        if !is_plain {
            log::warn!("Rejecting profile name that is not a plain file name: {:?}", name);
            return Err(IdentityError::missing(AssetKind::Profile, self.profiles_dir.join(name)));
        }

        let path = self.profiles_dir.join(name);
        if path.extension().is_none() && !path.is_file() {
            for ext in PROFILE_EXTENSIONS {
                let candidate = path.with_extension(ext);
                if candidate.is_file() {
                    return Ok(candidate);
                }
            }
        }

        Ok(path)
    }

    /// File names of all profiles in the profiles directory, sorted
    pub fn list_profiles(&self) -> IdentityResult<Vec<String>> {
        if !self.profiles_dir.is_dir() {
            return Err(IdentityError::missing(AssetKind::Profile, &self.profiles_dir));
        }

        let entries = fs::read_dir(&self.profiles_dir).map_err(|source| IdentityError::Unreadable {
            kind: AssetKind::Profile,
            path: self.profiles_dir.clone(),
            source,
        })?;

        let mut names: Vec<String> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| {
                path.extension()
                    .map(|e| PROFILE_EXTENSIONS.iter().any(|ext| e == *ext))
                    .unwrap_or(false)
            })
            .filter_map(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();

        names.sort();
        Ok(names)
    }
}

/// Load an identity from the default locations
pub fn load_identity(profile_name: Option<&str>) -> IdentityResult<Identity> {
    IdentityLoader::default().load(profile_name)
}
