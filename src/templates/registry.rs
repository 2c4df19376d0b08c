//! Template registry for loading and looking up ship templates
//!
//! Handles TOML file loading, validation against the shield segment bound,
//! and name-keyed lookup for object construction.

use ahash::AHashMap;
use std::path::Path;

use super::schema::ShipTemplate;
use crate::defense::constants::MAX_SHIELD_COUNT;

/// Error type for template operations
#[derive(Debug)]
pub enum TemplateError {
    /// File I/O error
    IoError(std::io::Error),
    /// TOML parsing error
    ParseError(String),
    /// Template not found
    NotFound(String),
    /// Validation failed
    ValidationError(Vec<String>),
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::IoError(e) => write!(f, "I/O error: {}", e),
            TemplateError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            TemplateError::NotFound(name) => write!(f, "Template not found: {}", name),
            TemplateError::ValidationError(errors) => {
                write!(f, "Validation errors: {}", errors.join(", "))
            }
        }
    }
}

impl std::error::Error for TemplateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TemplateError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TemplateError {
    fn from(e: std::io::Error) -> Self {
        TemplateError::IoError(e)
    }
}

/// Registry of ship templates keyed by their meta id
pub struct TemplateRegistry {
    templates: AHashMap<String, ShipTemplate>,
}

impl TemplateRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            templates: AHashMap::new(),
        }
    }

    /// Validate and register a template, replacing any previous entry with
    /// the same id
    pub fn register(&mut self, template: ShipTemplate) -> Result<(), TemplateError> {
        let errors = validate(&template);
        if !errors.is_empty() {
            return Err(TemplateError::ValidationError(errors));
        }
        self.templates.insert(template.meta.id.clone(), template);
        Ok(())
    }

    /// Look up a template by id
    pub fn get(&self, id: &str) -> Option<&ShipTemplate> {
        self.templates.get(id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Load a template from a TOML file
    pub fn load_file(&mut self, path: &Path) -> Result<(), TemplateError> {
        let content = std::fs::read_to_string(path)?;
        let template: ShipTemplate = toml::from_str(&content)
            .map_err(|e| TemplateError::ParseError(format!("{}: {}", path.display(), e)))?;
        self.register(template)
    }

    /// Load all .toml files from a directory recursively
    pub fn load_directory(&mut self, path: &Path) -> Result<usize, TemplateError> {
        let mut loaded = 0;
        self.load_directory_recursive(path, &mut loaded)?;
        Ok(loaded)
    }

    fn load_directory_recursive(
        &mut self,
        path: &Path,
        loaded: &mut usize,
    ) -> Result<(), TemplateError> {
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let entry_path = entry.path();
            if entry_path.is_dir() {
                self.load_directory_recursive(&entry_path, loaded)?;
            } else if entry_path.extension().is_some_and(|ext| ext == "toml") {
                self.load_file(&entry_path)?;
                *loaded += 1;
            }
        }
        Ok(())
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(template: &ShipTemplate) -> Vec<String> {
    let mut errors = Vec::new();
    if template.meta.id.is_empty() {
        errors.push("meta.id must not be empty".to_string());
    }
    if template.defense.hull_max < 0.0 {
        errors.push(format!(
            "defense.hull_max must not be negative (got {})",
            template.defense.hull_max
        ));
    }
    if template.defense.shield_max.len() > MAX_SHIELD_COUNT {
        errors.push(format!(
            "defense.shield_max has {} segments, maximum is {}",
            template.defense.shield_max.len(),
            MAX_SHIELD_COUNT
        ));
    }
    if template.defense.shield_max.iter().any(|&max| max < 0.0) {
        errors.push("defense.shield_max entries must not be negative".to_string());
    }
    if template.defense.shield_recharge_rate < 0.0 {
        errors.push("defense.shield_recharge_rate must not be negative".to_string());
    }
    errors
}
