//! Bindings domain: the input settings store and its RON persistence.

use bevy::prelude::*;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::bindings::{ActionMapping, AxisMapping, InputKey, KeyBindingRepository};

pub const DEFAULT_INPUT_CONFIG_PATH: &str = "config/input.ron";

/// Error type for reading or writing the key mapping file.
#[derive(Debug)]
pub struct BindingStoreError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for BindingStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to access {}: {}", self.file, self.message)
    }
}

/// On-disk layout of the key mapping file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
struct KeyMappingsFile {
    action_mappings: Vec<ActionMapping>,
    axis_mappings: Vec<AxisMapping>,
}

/// Global action/axis mapping store.
///
/// Mutations only take effect for lookups after
/// [`KeyBindingRepository::force_rebuild_keymaps`].
#[derive(Resource, Debug, Default)]
pub struct InputSettings {
    action_mappings: Vec<ActionMapping>,
    axis_mappings: Vec<AxisMapping>,
    /// File the mappings are saved to. Nothing is written when unset.
    config_path: Option<PathBuf>,
    action_keymap: HashMap<String, Vec<InputKey>>,
    axis_keymap: HashMap<String, Vec<(InputKey, f32)>>,
}

impl InputSettings {
    pub fn with_config_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
            ..Default::default()
        }
    }

    /// Loads mappings from `path` and keeps saving there.
    /// A missing file yields an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, BindingStoreError> {
        let path = path.into();
        let mut settings = Self::with_config_path(path.clone());

        if !path.exists() {
            return Ok(settings);
        }

        let file_name = path.display().to_string();
        let contents = fs::read_to_string(&path).map_err(|e| BindingStoreError {
            file: file_name.clone(),
            message: format!("IO error: {}", e),
        })?;
        let file: KeyMappingsFile = ron::from_str(&contents).map_err(|e| BindingStoreError {
            file: file_name,
            message: format!("Parse error: {}", e),
        })?;

        settings.action_mappings = file.action_mappings;
        settings.axis_mappings = file.axis_mappings;
        settings.force_rebuild_keymaps();
        Ok(settings)
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Keys bound to `action` as of the last keymap rebuild.
    pub fn action_keys(&self, action: &str) -> &[InputKey] {
        self.action_keymap
            .get(action)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Keys and scales bound to `axis` as of the last keymap rebuild.
    pub fn axis_keys(&self, axis: &str) -> &[(InputKey, f32)] {
        self.axis_keymap
            .get(axis)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl KeyBindingRepository for InputSettings {
    fn action_mappings(&self) -> Vec<ActionMapping> {
        self.action_mappings.clone()
    }

    fn axis_mappings(&self) -> Vec<AxisMapping> {
        self.axis_mappings.clone()
    }

    fn add_action_mapping(&mut self, mapping: ActionMapping) {
        if !self.action_mappings.contains(&mapping) {
            self.action_mappings.push(mapping);
        }
    }

    fn remove_action_mapping(&mut self, mapping: &ActionMapping) {
        self.action_mappings.retain(|m| m != mapping);
    }

    fn add_axis_mapping(&mut self, mapping: AxisMapping) {
        if !self.axis_mappings.contains(&mapping) {
            self.axis_mappings.push(mapping);
        }
    }

    fn remove_axis_mapping(&mut self, mapping: &AxisMapping) {
        self.axis_mappings.retain(|m| m != mapping);
    }

    fn save_key_mappings(&mut self) -> Result<(), BindingStoreError> {
        let Some(path) = &self.config_path else {
            return Ok(());
        };
        let file_name = path.display().to_string();

        let file = KeyMappingsFile {
            action_mappings: self.action_mappings.clone(),
            axis_mappings: self.axis_mappings.clone(),
        };
        let contents =
            ron::ser::to_string_pretty(&file, PrettyConfig::default()).map_err(|e| {
                BindingStoreError {
                    file: file_name.clone(),
                    message: format!("Serialize error: {}", e),
                }
            })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| BindingStoreError {
                file: file_name.clone(),
                message: format!("IO error: {}", e),
            })?;
        }
        fs::write(path, contents).map_err(|e| BindingStoreError {
            file: file_name,
            message: format!("IO error: {}", e),
        })
    }

    fn force_rebuild_keymaps(&mut self) {
        self.action_keymap.clear();
        self.axis_keymap.clear();

        for mapping in &self.action_mappings {
            self.action_keymap
                .entry(mapping.action.clone())
                .or_default()
                .push(mapping.key);
        }
        for mapping in &self.axis_mappings {
            self.axis_keymap
                .entry(mapping.axis.clone())
                .or_default()
                .push((mapping.key, mapping.scale));
        }
    }
}
