//! Validate a content directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use health_content::ContentFactory;

/// Validate a content directory
#[derive(Parser)]
pub struct Check {
    /// Directory holding catalog.ron and health.toml
    #[arg(short, long, value_name = "DIR", env = "HEALTH_CONTENT_DIR")]
    content: PathBuf,
}

impl Check {
    pub fn execute(self) -> Result<()> {
        let factory = ContentFactory::new(&self.content);
        let content = factory
            .load()
            .with_context(|| format!("Invalid content in {}", self.content.display()))?;

        let encounters = self.content.join("encounters");
        let mut checked = 0usize;
        if encounters.is_dir() {
            let mut paths = std::fs::read_dir(&encounters)
                .with_context(|| format!("Failed to list {}", encounters.display()))?
                .map(|entry| entry.map(|e| e.path()))
                .collect::<std::io::Result<Vec<_>>>()?;
            paths.sort();

            for path in paths
                .iter()
                .filter(|p| p.extension().is_some_and(|ext| ext == "ron"))
            {
                factory
                    .load_encounter(path, &content.catalog)
                    .with_context(|| format!("Invalid encounter {}", path.display()))?;
                checked += 1;
            }
        }

        println!(
            "ok: {} damage types, {} damage sources, {} heal sources, {} steps, {} lifesteal mappings, {} encounters",
            content.catalog.damage_types().count(),
            content.catalog.damage_sources().count(),
            content.catalog.heal_sources().count(),
            content.config.default_strategy.len(),
            content.config.lifesteal.len(),
            checked,
        );
        Ok(())
    }
}
