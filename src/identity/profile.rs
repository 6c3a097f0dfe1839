//! User profile overlay
//!
//! A profile is a YAML mapping of user-specific parameters layered on top of
//! the standard.
//!
//! # Format
//!
//! ```yaml
//! profile_version: 16
//! user_id: paul
//! user_name: Paul
//! role: Founder
//! timezone: Asia/Kolkata
//! cognitive_mode: deep
//! core_projects:
//!   - MirrorDNA
//!   - ActiveMirrorOS
//! overrides:
//!   tone: direct
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::path::Path;

use super::error::{AssetKind, IdentityError, IdentityResult, read_asset};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Display name
    pub user_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    pub timezone: String,

    pub cognitive_mode: String,

    #[serde(default)]
    pub core_projects: Vec<String>,

    /// Tone/style overrides, kept in file order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub overrides: IndexMap<String, Value>,

    #[serde(default)]
    pub glyphs_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drift_tolerance: Option<f64>,

    /// Any other top-level keys
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Profile {
    /// Build a profile with only the required fields set
    pub fn new(user_name: impl Into<String>, timezone: impl Into<String>, cognitive_mode: impl Into<String>) -> Self {
        Self {
            profile_version: None,
            user_id: None,
            user_name: user_name.into(),
            role: None,
            timezone: timezone.into(),
            cognitive_mode: cognitive_mode.into(),
            core_projects: Vec::new(),
            overrides: IndexMap::new(),
            glyphs_enabled: false,
            drift_tolerance: None,
            extra: IndexMap::new(),
        }
    }

    /// Parse profile YAML. `path` is only used for error reporting.
    pub fn parse(content: &str, path: &Path) -> IdentityResult<Self> {
        let value: Value = serde_yaml::from_str(content)
            .map_err(|e| IdentityError::malformed(path, format!("invalid YAML: {}", e)))?;

        if !value.is_mapping() {
            return Err(IdentityError::malformed(path, "profile root must be a mapping"));
        }

        let profile: Profile = serde_yaml::from_value(value).map_err(|e| IdentityError::malformed(path, e.to_string()))?;
        profile.validate(path)?;

        Ok(profile)
    }

    fn validate(&self, path: &Path) -> IdentityResult<()> {
        for (field, value) in [
            ("user_name", &self.user_name),
            ("timezone", &self.timezone),
            ("cognitive_mode", &self.cognitive_mode),
        ] {
            if value.trim().is_empty() {
                return Err(IdentityError::malformed(path, format!("field `{}` must not be empty", field)));
            }
        }

        if self.drift_tolerance.is_some_and(|t| !t.is_finite()) {
            return Err(IdentityError::malformed(path, "field `drift_tolerance` must be a finite number"));
        }

        Ok(())
    }

    /// Compact, line-oriented rendering used inside system prompts.
    ///
    /// Field order is fixed and does not depend on the order in the file.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "Profile Version: {}",
            self.profile_version
                .map(|v| v.to_string())
                .unwrap_or_else(|| "Unknown".to_string())
        ));
        lines.push(format!("User ID: {}", self.user_id.as_deref().unwrap_or("Unknown")));
        lines.push(format!("User: {}", self.user_name));
        lines.push(format!("Role: {}", self.role.as_deref().unwrap_or("Unknown")));
        lines.push(format!("Timezone: {}", self.timezone));
        lines.push(format!("Cognitive Mode: {}", self.cognitive_mode));

        if !self.core_projects.is_empty() {
            lines.push(format!("Core Projects: {}", self.core_projects.join(", ")));
        }

        if !self.overrides.is_empty() {
            lines.push("Overrides:".to_string());
            for (key, value) in &self.overrides {
                lines.push(format!("  - {}: {}", key, render_value(value)));
            }
        }

        if self.glyphs_enabled {
            lines.push("Glyphs: Enabled".to_string());
        }

        lines.push(format!("Drift Tolerance: {:?}", self.drift_tolerance.unwrap_or(0.0)));

        for (key, value) in &self.extra {
            lines.push(format!("{}: {}", key, render_value(value)));
        }

        lines.join("\n")
    }
}

/// Read and parse a profile file
pub fn load_profile(path: &Path) -> IdentityResult<Profile> {
    log::debug!("Loading profile from {}", path.display());
    let content = read_asset(AssetKind::Profile, path)?;
    Profile::parse(&content, path)
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(items) => items.iter().map(render_value).collect::<Vec<_>>().join(", "),
        Value::Tagged(tagged) => render_value(&tagged.value),
        Value::Mapping(_) => serde_json::to_string(value).unwrap_or_else(|_| format!("{:?}", value)),
    }
}
