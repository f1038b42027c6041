//! `docpress build` command implementation.

use std::path::PathBuf;

use clap::Args;
use docpress_compiler::SiteCompiler;
use docpress_config::{CliSettings, Config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover docpress.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Docs root directory holding pages/ and assets/ (overrides config).
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Website root to copy style.css from (overrides config).
    #[arg(long)]
    website_root: Option<PathBuf>,

    /// Site title shown in the compiled shell (overrides config).
    #[arg(long)]
    title: Option<String>,

    /// Enable verbose output (show per-stage logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the compile aborts.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            root: self.root,
            website_root: self.website_root,
            title: self.title,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Building docs from {}",
            config.docs_resolved.root.display()
        ));

        let summary = SiteCompiler::new(&config.docs_resolved.root)
            .with_website_root(config.website_root.clone())
            .with_title(&config.site.title)
            .compile()?;

        output.success(&format!("Built {}", summary.html_path.display()));
        output.success(&format!(
            "Built {} ({} pages)",
            summary.data_path.display(),
            summary.page_count
        ));
        Ok(())
    }
}
