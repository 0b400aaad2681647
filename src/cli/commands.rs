use crate::analyzers::RentalAnalyzer;
use crate::cli::args::{Cli, Commands, InputArgs};
use crate::config::PipelineSettings;
use crate::error::Result;
use crate::processors::{IntegrityChecker, Pipeline};
use crate::utils::progress::ProgressReporter;
use std::io::Write;
use tracing::info;

pub async fn run(cli: Cli, settings: PipelineSettings) -> Result<()> {
    match cli.command {
        Commands::Run { input, json } => {
            let settings = apply_overrides(settings, &input);
            let progress = ProgressReporter::new_spinner("Loading datasets...", cli.quiet || json);

            let reader = settings.concurrent_reader();
            let (daily, hourly) = reader
                .read_datasets(&settings.day_path, &settings.hour_path)
                .await?;

            progress.set_message("Aggregating...");
            let pipeline = Pipeline::new();
            let data = pipeline.run(&daily, &hourly);
            progress.finish_and_clear();

            if json {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                serde_json::to_writer_pretty(&mut handle, &data)?;
                writeln!(handle)?;
            } else {
                println!("{}", RentalAnalyzer::new().detailed_summary(&data));
            }
        }

        Commands::Validate { input, tolerance } => {
            let settings = apply_overrides(settings, &input);
            let progress = ProgressReporter::new_spinner("Validating datasets...", cli.quiet);

            let reader = settings.concurrent_reader();
            let (daily, hourly) = reader
                .read_datasets(&settings.day_path, &settings.hour_path)
                .await?;
            let data = Pipeline::new().run(&daily, &hourly);

            let checker = IntegrityChecker::new().with_divergence_tolerance(tolerance);
            let report = checker.check(&daily, &hourly, &data.merged);
            progress.finish_with_message("Validation complete");

            println!("\n{}", checker.generate_summary(&report));

            if report.is_clean() {
                println!("✅ All data passed validation checks");
            } else {
                println!("⚠️  Found {} validation issues", report.violations.len());
            }
            info!(violations = report.violations.len(), "Validation finished");
        }
    }

    Ok(())
}

/// Command-line flags take precedence over file and environment settings.
fn apply_overrides(mut settings: PipelineSettings, input: &InputArgs) -> PipelineSettings {
    if let Some(ref day) = input.day {
        settings.day_path = day.clone();
    }
    if let Some(ref hour) = input.hour {
        settings.hour_path = hour.clone();
    }
    settings.strict_validation |= input.strict;
    settings.use_mmap |= input.mmap;
    settings
}
