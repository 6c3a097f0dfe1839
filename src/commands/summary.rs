//! Print the profile summary

use eyre::{Context, Result};

use crate::cli::OutputFormat;
use mirrordna::config::Config;
use mirrordna::identity::IdentityLoader;

pub fn run(profile: Option<&str>, format: OutputFormat, config: &Config) -> Result<()> {
    let loader = IdentityLoader::from_config(config);
    let identity = loader.load(profile).context("Failed to load identity")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(identity.profile())?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(identity.profile())?),
        OutputFormat::Text => println!("{}", identity.profile_summary()),
    }

    Ok(())
}
