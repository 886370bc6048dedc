//! `.jats-digest.toml` configuration files
//!
//! Configuration files can be placed in:
//! - User home directory: ~/.jats-digest.toml (user defaults)
//! - Project directory: ./.jats-digest.toml (project defaults)
//! - Custom location via --config flag (replaces both)
//!
//! Precedence order (highest to lowest):
//! 1. Command-line arguments (--max-authors, --format, etc.)
//! 2. Project config (./.jats-digest.toml)
//! 3. User config (~/.jats-digest.toml)
//! 4. Built-in defaults

use anyhow::{Context, Result};
use colored::Colorize;
use jats_digest_core::{EmptySectionPolicy, ExtractionOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the home and current directories.
pub const CONFIG_FILE_NAME: &str = ".jats-digest.toml";

/// Template written by `config init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# jats-digest configuration file
# See: https://github.com/dropbox/dKNOW/jats-digest

# Digest extraction limits
[extraction]
# Maximum number of authors listed
# max_authors = 5

# Maximum number of body sections summarized
# max_body_sections = 5

# Maximum number of paragraphs taken from each body section
# max_paragraphs_per_section = 3

# Found-but-empty title/abstract: "omit" drops the heading, "keep" emits it
# empty_sections = "omit"

# Instruction prefix placed before the digest by `jats-digest prompt`
[prompt]
# instruction = "You are a careful scientific reviewer."
# instruction_file = "instructions.txt"

# Output settings
[output]
# Output format: text or json
# format = "text"

# Compact JSON output (no pretty-printing)
# compact = false
"#;

/// Configuration file structure for .jats-digest.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction: Option<ExtractionConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<PromptConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_authors: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_body_sections: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_paragraphs_per_section: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_sections: Option<EmptySectionPolicy>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Instruction text; wins over `instruction_file` when both are set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format (text, json)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub compact: Option<bool>,
}

/// Overlay `$field` of `$from` onto `$into` when set
macro_rules! overlay {
    ($into:expr, $from:expr, $($field:ident),+) => {
        $(
            if let Some(value) = $from.$field {
                $into.$field = Some(value);
            }
        )+
    };
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            // TOML errors include line/column information, preserve it
            eprintln!(
                "{} Failed to parse config file: {}",
                "Error:".red().bold(),
                path.display()
            );
            eprintln!("{} {}", "Parse error:".yellow().bold(), e);
            eprintln!();
            eprintln!("{} Configuration file syntax:", "Help:".cyan().bold());
            eprintln!("  [extraction]");
            eprintln!("  max_authors = 5");
            eprintln!("  empty_sections = \"omit\"  # omit or keep");
            eprintln!();
            eprintln!("  Run `jats-digest config init` for a complete template");
            anyhow::anyhow!("Failed to parse config file: {e}")
        })?;

        Ok(config)
    }

    /// Effective configuration: the explicit file if given, otherwise the
    /// merge of the user and project files.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None => {
                let (user_config, project_config) = Self::discover_configs();
                Ok(Self::merge(user_config, project_config))
            }
        }
    }

    /// Find and load configuration files
    /// Returns (`user_config`, `project_config`)
    pub fn discover_configs() -> (Option<Self>, Option<Self>) {
        let user_config = Self::user_config_path().and_then(|path| Self::load_optional(&path, "user"));
        let project_config = Self::load_optional(&Self::project_config_path(), "project");
        (user_config, project_config)
    }

    pub fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
    }

    pub fn project_config_path() -> PathBuf {
        PathBuf::from(CONFIG_FILE_NAME)
    }

    /// Load a discovered file; a broken file is reported and skipped
    fn load_optional(config_path: &Path, kind: &str) -> Option<Self> {
        if !config_path.exists() {
            return None;
        }
        match Self::load_from_file(config_path) {
            Ok(config) => {
                log::debug!("loaded {kind} config from {}", config_path.display());
                Some(config)
            }
            Err(e) => {
                eprintln!(
                    "{} Failed to load {} config from {}: {}",
                    "Warning:".yellow().bold(),
                    kind,
                    config_path.display(),
                    e
                );
                None
            }
        }
    }

    /// Merge multiple configs with precedence
    /// CLI args > project config > user config > defaults
    pub fn merge(user_config: Option<Self>, project_config: Option<Self>) -> Self {
        let mut merged = Self::default();
        for config in [user_config, project_config].into_iter().flatten() {
            merged.overlay(config);
        }
        merged
    }

    fn overlay(&mut self, other: Self) {
        if let Some(extraction) = other.extraction {
            let merged = self.extraction.get_or_insert_with(ExtractionConfig::default);
            overlay!(
                merged,
                extraction,
                max_authors,
                max_body_sections,
                max_paragraphs_per_section,
                empty_sections
            );
        }
        if let Some(prompt) = other.prompt {
            let merged = self.prompt.get_or_insert_with(PromptConfig::default);
            overlay!(merged, prompt, instruction, instruction_file);
        }
        if let Some(output) = other.output {
            let merged = self.output.get_or_insert_with(OutputConfig::default);
            overlay!(merged, output, format, compact);
        }
    }

    /// Extraction options from config values over built-in defaults
    pub fn extraction_options(&self) -> ExtractionOptions {
        let mut options = ExtractionOptions::default();
        let Some(extraction) = &self.extraction else {
            return options;
        };
        if let Some(max_authors) = extraction.max_authors {
            options = options.with_max_authors(max_authors);
        }
        if let Some(max_body_sections) = extraction.max_body_sections {
            options = options.with_max_body_sections(max_body_sections);
        }
        if let Some(max_paragraphs) = extraction.max_paragraphs_per_section {
            options = options.with_max_paragraphs_per_section(max_paragraphs);
        }
        if let Some(policy) = extraction.empty_sections {
            options = options.with_empty_sections(policy);
        }
        options
    }

    /// Instruction prefix stored in config, reading `instruction_file` if needed
    pub fn instruction(&self) -> Result<Option<String>> {
        let Some(prompt) = &self.prompt else {
            return Ok(None);
        };
        if let Some(instruction) = &prompt.instruction {
            return Ok(Some(instruction.clone()));
        }
        prompt
            .instruction_file
            .as_deref()
            .map(|path| {
                fs::read_to_string(path).with_context(|| {
                    format!("Failed to read instruction file: {}", path.display())
                })
            })
            .transpose()
    }

    pub fn output_format(&self) -> Option<&str> {
        self.output.as_ref().and_then(|output| output.format.as_deref())
    }

    pub fn compact(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|output| output.compact)
            .unwrap_or(false)
    }
}
