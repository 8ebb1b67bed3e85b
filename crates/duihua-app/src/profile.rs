use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use duihua_config::Config;
use serde::{Deserialize, Serialize};

fn profiles_dir(home: &Path) -> PathBuf {
    home.join("profiles")
}

fn read_profile(file: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(file)
        .with_context(|| format!("reading profile {}", file.display()))?;
    let profile: Profile = serde_json::from_str(&data)
        .with_context(|| format!("parsing profile {}", file.display()))?;
    Ok(profile.value)
}

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Create the profiles folder and a main profile from defaults if missing
pub fn init_user_config(home: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(profiles_dir(home))
        .with_context(|| format!("creating {}", profiles_dir(home).display()))?;

    let main_profile = profiles_dir(home).join("main.json");

    if !main_profile.exists() {
        let profile = Profile {
            name: "main".into(),
            value: Config::default(),
        };
        fs::write(&main_profile, serde_json::to_string_pretty(&profile)?)?;
        tracing::info!("Created main profile at {}", main_profile.display());
    }

    Ok(())
}

/// Load a user profile by name, defaulting to main if name not found
pub fn load_user_profile(home: &Path, name: &str) -> anyhow::Result<Config> {
    let profile_file = profiles_dir(home).join(format!("{name}.json"));

    if profile_file.exists() {
        return read_profile(&profile_file);
    }

    tracing::warn!("Profile {name} not found, falling back to main profile or defaults");
    let main_file = profiles_dir(home).join("main.json");
    if main_file.exists() {
        read_profile(&main_file)
    } else {
        Ok(Config::default())
    }
}
