//! MirrorDNA identity loading
//!
//! Composes the user-agnostic Master Standard with a per-user profile into a
//! system prompt. See [`identity`] for the loader and [`config`] for where
//! the assets are looked up.

pub mod config;
pub mod identity;

pub use config::Config;
pub use identity::{Identity, IdentityError, IdentityLoader, Profile, StandardText, load_identity};
