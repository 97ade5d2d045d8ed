//! Run an encounter script.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use health_content::ContentFactory;

use crate::runner::EncounterRunner;

/// Run an encounter script
#[derive(Parser)]
pub struct Run {
    /// Directory holding catalog.ron and health.toml
    #[arg(short, long, value_name = "DIR", env = "HEALTH_CONTENT_DIR")]
    content: PathBuf,

    /// Encounter file, absolute or relative to the content directory
    #[arg(short, long, value_name = "FILE")]
    encounter: PathBuf,

    /// Print one JSON object per action instead of text
    #[arg(long)]
    json: bool,
}

impl Run {
    pub fn execute(self) -> Result<()> {
        let factory = ContentFactory::new(&self.content);
        let content = factory
            .load()
            .with_context(|| format!("Failed to load content from {}", self.content.display()))?;
        let encounter = factory
            .load_encounter(&self.encounter, &content.catalog)
            .with_context(|| format!("Failed to load encounter {}", self.encounter.display()))?;

        tracing::info!(
            encounter = %encounter.name,
            actions = encounter.script.len(),
            "running encounter"
        );

        let mut runner = EncounterRunner::new(&content.config, encounter);
        let reports = runner.run()?;

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for report in &reports {
            if self.json {
                serde_json::to_writer(&mut out, report)?;
                writeln!(out)?;
            } else {
                writeln!(out, "{report}")?;
            }
        }
        Ok(())
    }
}
