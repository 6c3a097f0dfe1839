//! Master Standard document
//!
//! The standard is user-agnostic behavioral text. Its content is opaque to the
//! loader and is carried through to the system prompt verbatim.

use std::fmt;
use std::path::Path;

use super::error::{AssetKind, IdentityResult, read_asset};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardText(String);

impl StandardText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for StandardText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StandardText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read the standard document from disk
pub fn load_standard(path: &Path) -> IdentityResult<StandardText> {
    log::debug!("Loading standard from {}", path.display());
    let text = read_asset(AssetKind::Standard, path)?;
    Ok(StandardText(text))
}
