//! CLI configuration loading

use anyhow::{Context, Result};
use std::path::Path;

use autoassist_core::AppConfig;

/// Loads the shared configuration file and applies command-line overrides.
pub fn load(path: &Path, annotator_url: Option<&str>, seed: Option<u64>) -> Result<AppConfig> {
    let mut config = AppConfig::load_from_file(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    if let Some(url) = annotator_url {
        config.annotator.url = url.to_string();
    }
    if let Some(seed) = seed {
        config.nlp.template_seed = Some(seed);
    }

    Ok(config)
}
