//! Profile inspection commands

use colored::*;
use eyre::{Context, Result};
use serde::Serialize;

use crate::cli::{OutputFormat, ProfileAction};
use mirrordna::config::Config;
use mirrordna::identity::{IdentityLoader, Profile};

pub fn run(action: ProfileAction, config: &Config) -> Result<()> {
    let loader = IdentityLoader::from_config(config);

    match action {
        ProfileAction::List { format } => list_profiles(&loader, OutputFormat::resolve(format)),
        ProfileAction::Show { name, format } => show_profile(&loader, &name, OutputFormat::resolve(format)),
        ProfileAction::Validate { name } => validate(&loader, &name),
    }
}

#[derive(Serialize)]
struct ProfileListing {
    name: String,
    default: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn list_profiles(loader: &IdentityLoader, format: OutputFormat) -> Result<()> {
    let names = loader.list_profiles().context("Failed to list profiles")?;

    let listings: Vec<ProfileListing> = names
        .into_iter()
        .map(|name| {
            let (user_name, error) = match loader.load_profile(&name) {
                Ok(profile) => (Some(profile.user_name), None),
                Err(e) => (None, Some(e.to_string())),
            };
            ProfileListing {
                default: name == loader.default_profile(),
                name,
                user_name,
                error,
            }
        })
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&listings)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&listings)?),
        OutputFormat::Text => {
            println!("{}", "Available Profiles:".bold());
            println!();

            if listings.is_empty() {
                println!(
                    "  {} No profiles found in {}",
                    "(none)".dimmed(),
                    loader.profiles_dir().display()
                );
            }

            for listing in &listings {
                let marker = if listing.default { " (default)".cyan().to_string() } else { String::new() };
                match (&listing.user_name, &listing.error) {
                    (Some(user), _) => {
                        println!("  {} {}{}", "●".green(), listing.name.bold(), marker);
                        println!("    User: {}", user);
                    }
                    (None, Some(error)) => {
                        println!("  {} {}{}", "●".red(), listing.name.bold(), marker);
                        println!("    {}", error.dimmed());
                    }
                    (None, None) => println!("  {} {}{}", "●".yellow(), listing.name.bold(), marker),
                }
            }
        }
    }

    Ok(())
}

fn show_profile(loader: &IdentityLoader, name: &str, format: OutputFormat) -> Result<()> {
    let profile = loader
        .load_profile(name)
        .with_context(|| format!("Failed to load profile '{}'", name))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&profile)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&profile)?),
        OutputFormat::Text => print_profile(name, &profile),
    }

    Ok(())
}

fn print_profile(name: &str, profile: &Profile) {
    println!("{} {}", "Profile:".bold(), name.cyan());
    println!();
    for line in profile.summary().lines() {
        match line.split_once(": ") {
            Some((label, value)) if !line.starts_with(' ') => println!("  {}: {}", label.bold(), value),
            _ => println!("  {}", line),
        }
    }
}

fn validate(loader: &IdentityLoader, name: &str) -> Result<()> {
    let names = if name == "all" {
        loader.list_profiles().context("Failed to list profiles")?
    } else {
        vec![name.to_string()]
    };

    let mut failures = 0;

    match loader.load_standard() {
        Ok(standard) => println!(
            "  {} standard ({} bytes) {}",
            "✓".green(),
            standard.len(),
            loader.standard_path().display().to_string().dimmed()
        ),
        Err(e) => {
            failures += 1;
            println!("  {} standard: {}", "✗".red(), e);
        }
    }

    for profile_name in &names {
        match loader.load_profile(profile_name) {
            Ok(profile) => println!("  {} {} ({})", "✓".green(), profile_name, profile.user_name),
            Err(e) => {
                failures += 1;
                log::warn!("Profile {} failed validation: {}", profile_name, e);
                println!("  {} {}: {}", "✗".red(), profile_name, e);
            }
        }
    }

    println!();
    if failures > 0 {
        eyre::bail!("{} asset(s) failed validation", failures);
    }

    println!("{} All {} profile(s) valid", "✓".green(), names.len());
    Ok(())
}
