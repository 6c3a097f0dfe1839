//! Print the composed system prompt

use eyre::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use mirrordna::config::Config;
use mirrordna::identity::IdentityLoader;

pub fn run(profile: Option<&str>, task: Option<String>, task_file: Option<PathBuf>, config: &Config) -> Result<()> {
    let instructions = match (task, task_file) {
        (Some(text), _) => text,
        (None, Some(path)) => read_task_file(&path)?,
        (None, None) => String::new(),
    };

    let loader = IdentityLoader::from_config(config);
    let identity = loader.load(profile).context("Failed to load identity")?;

    log::debug!(
        "Building system prompt for profile {} ({} bytes of task instructions)",
        identity.profile_name(),
        instructions.len()
    );

    println!("{}", identity.build_system_prompt(&instructions));
    Ok(())
}

fn read_task_file(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        return io::read_to_string(io::stdin()).context("Failed to read task instructions from stdin");
    }

    fs::read_to_string(path).with_context(|| format!("Failed to read task file: {}", path.display()))
}
