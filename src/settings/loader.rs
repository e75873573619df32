//! Loader for the first person settings file.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::CharacterSettings;

/// Error type for settings loading failures.
#[derive(Debug)]
pub struct SettingsLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for SettingsLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parses settings text. `.json` paths are read as JSON, anything else as RON.
pub fn parse_settings(
    file_name: &str,
    contents: &str,
) -> Result<CharacterSettings, SettingsLoadError> {
    let parsed: Result<CharacterSettings, String> = if file_name.ends_with(".json") {
        serde_json::from_str(contents).map_err(|e| e.to_string())
    } else {
        ron_options().from_str(contents).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| SettingsLoadError {
        file: file_name.to_string(),
        message: format!("Parse error: {}", message),
    })
}

/// Load character settings from a RON or JSON file.
pub fn load_settings(path: &Path) -> Result<CharacterSettings, SettingsLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| SettingsLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_settings(&file_name, &contents)
}
