//! Identity loading errors

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Which of the two identity layers an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Standard,
    Profile,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Standard => write!(f, "Standard"),
            AssetKind::Profile => write!(f, "Profile"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("{kind} not found: {}", path.display())]
    MissingAsset { kind: AssetKind, path: PathBuf },

    #[error("Malformed profile {}: {reason}", path.display())]
    MalformedProfile { path: PathBuf, reason: String },

    #[error("Failed to read {kind} at {}: {source}", path.display())]
    Unreadable {
        kind: AssetKind,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl IdentityError {
    pub fn missing(kind: AssetKind, path: impl Into<PathBuf>) -> Self {
        IdentityError::MissingAsset { kind, path: path.into() }
    }

    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        IdentityError::MalformedProfile {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn is_missing_asset(&self) -> bool {
        matches!(self, IdentityError::MissingAsset { .. })
    }

    pub fn is_malformed_profile(&self) -> bool {
        matches!(self, IdentityError::MalformedProfile { .. })
    }
}

pub type IdentityResult<T> = std::result::Result<T, IdentityError>;

/// Read a text asset, mapping "not found" to `MissingAsset`
pub(crate) fn read_asset(kind: AssetKind, path: &std::path::Path) -> IdentityResult<String> {
    if !path.is_file() {
        return Err(IdentityError::missing(kind, path));
    }

    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => IdentityError::missing(kind, path),
        _ => IdentityError::Unreadable {
            kind,
            path: path.to_path_buf(),
            source,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_asset_missing() {
        let temp = TempDir::new().unwrap();
        let err = read_asset(AssetKind::Profile, &temp.path().join("nope.yaml")).unwrap_err();
        assert!(err.is_missing_asset());
        assert!(err.to_string().starts_with("Profile not found"));
    }

    #[test]
    fn test_read_asset_directory_is_missing() {
        let temp = TempDir::new().unwrap();
        let err = read_asset(AssetKind::Standard, temp.path()).unwrap_err();
        assert!(err.is_missing_asset());
    }

    #[test]
    fn test_read_asset_invalid_utf8_is_unreadable() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("standard.md");
        std::fs::write(&path, [0xff, 0xfe, 0xfd]).unwrap();

        let err = read_asset(AssetKind::Standard, &path).unwrap_err();
        assert!(matches!(err, IdentityError::Unreadable { kind: AssetKind::Standard, .. }));
    }

    #[test]
    fn test_malformed_message_includes_reason() {
        let err = IdentityError::malformed("p.yaml", "missing field `user_name`");
        assert!(err.is_malformed_profile());
        assert_eq!(err.to_string(), "Malformed profile p.yaml: missing field `user_name`");
    }
}
