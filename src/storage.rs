use std::{fs, path::{Path, PathBuf}};

use tracing::debug;

use crate::{error::AppError, profile::Profile, validation::validate_profile};

/// Seed profile file in user's home directory
const GLOBAL_SEED_FILE: &str = "profile_card.json";

/// Gets the path to the seed profile file in the home directory
pub fn get_global_seed_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(GLOBAL_SEED_FILE))
}

/// Loads the profile the card starts with
///
/// An explicit path must exist. Without one the home directory seed is used
/// when present, otherwise the built-in default profile.
pub fn load_seed(explicit: Option<&Path>) -> Result<Profile, AppError> {
    if let Some(path) = explicit {
        return read_seed_file(path);
    }

    match get_global_seed_path() {
        Some(path) if path.exists() => read_seed_file(&path),
        _ => {
            debug!("no seed file found, using default profile");
            Ok(Profile::default())
        }
    }
}

/// Reads and validates a JSON seed profile
///
/// # Arguments
/// * `path` - Path of the JSON file to read
pub fn read_seed_file(path: &Path) -> Result<Profile, AppError> {
    let file_contents = fs::read_to_string(path)?;
    let profile: Profile = serde_json::from_str(&file_contents)?;

    let failures = validate_profile(&profile);
    if !failures.is_empty() {
        let reasons: Vec<String> = failures
            .iter()
            .map(|(field, err)| format!("{field}: {err}"))
            .collect();
        return Err(AppError::InvalidSeed(reasons.join(" ")));
    }

    debug!(path = %path.display(), "loaded seed profile");
    Ok(profile)
}
