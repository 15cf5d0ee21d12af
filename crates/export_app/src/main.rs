//! `markdown-export`: writes the LLM-readable markdown mirror of the site.
mod settings;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use export_core::RunSummary;
use export_engine::{ExportConfig, ExportPipeline};
use export_logging::{export_error, export_info, export_warn};
use log::LevelFilter;

fn main() -> ExitCode {
    let root = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("Error: cannot determine working directory: {err}");
            return ExitCode::FAILURE;
        }
    };

    let (settings, settings_error) = match settings::load_settings(&root) {
        Ok(settings) => (settings, None),
        Err(err) => (settings::Settings::default(), Some(err)),
    };
    export_logging::initialize(settings.log_destination(), LevelFilter::Info);
    if let Some(err) = settings_error {
        export_warn!("{}; using defaults", err);
    }

    match run(&root, &settings) {
        Ok(summary) => {
            for line in summary.report_lines() {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            export_error!("Error generating markdown pages: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(root: &Path, settings: &settings::Settings) -> anyhow::Result<RunSummary> {
    let config = settings.apply(ExportConfig::for_project_root(root), root);
    export_info!("Reading sources below {:?}", root);
    ExportPipeline::new(config)
        .run()
        .context("markdown export aborted")
}
