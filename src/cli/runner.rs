use std::fs;
use std::path::Path;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use iconfit::{
    IconTarget, NormalizeParams, NormalizeReport, TrimThreshold, normalize_icon,
    normalize_icon_set, process_directory_to_path, write_report_json,
};

use super::args::CliArgs;
use super::errors::AppError;

/// Config file (if any) overlaid with explicit flags
fn build_params(args: &CliArgs) -> Result<NormalizeParams, AppError> {
    let mut params = match &args.config {
        Some(path) => {
            info!("Loading parameters from {:?}", path);
            NormalizeParams::from_json_file(path)?
        }
        None => NormalizeParams::default(),
    };

    if let Some(size) = args.size {
        params.canvas = size;
    }
    if let Some(color) = args.background {
        params.background = color;
    }
    if let Some(tolerance) = args.tolerance {
        params.threshold = TrimThreshold::tolerance(tolerance);
    }
    if let Some(gain) = args.gain {
        params.threshold.gain = gain;
    }
    if let Some(bias) = args.bias {
        params.threshold.bias = bias;
    }
    if args.no_trim {
        params.trim = false;
    }
    if let Some(filter) = args.filter {
        params.filter = filter;
    }
    if let Some(quality) = args.quality {
        params.jpeg_quality = quality;
    }

    params.validate()?;
    Ok(params)
}

fn summarize(reports: &[NormalizeReport]) -> Result<(), AppError> {
    let total: usize = reports.iter().map(|r| r.outcomes.len()).sum();
    let mut failed = 0;

    for report in reports {
        for path in report.succeeded() {
            info!("Wrote {:?}", path);
        }
        for (path, err) in report.failed() {
            warn!("Failed {:?}: {}", path, err);
            eprintln!("error: {}: {}", path.display(), err);
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(AppError::OutputsFailed { failed, total });
    }
    Ok(())
}

fn write_report(reports: &[NormalizeReport], path: Option<&Path>) -> Result<(), AppError> {
    if let Some(path) = path {
        write_report_json(reports, path)?;
    }
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .init();
    }

    let params = build_params(&args)?;
    let batch_mode = args.batch || args.input_dir.is_some();

    if batch_mode {
        let input_dir = args.input_dir.as_deref().ok_or(AppError::MissingArgument {
            arg: "--input-dir".to_string(),
        })?;
        let output_dir = args.output_dir.as_deref().ok_or(AppError::MissingArgument {
            arg: "--output-dir".to_string(),
        })?;

        info!("Starting batch processing from directory: {:?}", input_dir);
        info!("Output directory: {:?}", output_dir);

        let report = process_directory_to_path(input_dir, output_dir, &params, args.batch)?;

        info!("Batch processing complete!");
        info!("Processed: {}", report.processed);
        info!("Skipped: {}", report.skipped);
        info!("Errors: {}", report.errors);

        if report.errors > 0 {
            return Err(AppError::BatchFailed {
                errors: report.errors,
            }
            .into());
        }
        return Ok(());
    }

    let input = args.input.as_deref().ok_or(AppError::MissingArgument {
        arg: "--input".to_string(),
    })?;

    let reports = if let Some(dir) = args.web_app_dir.as_deref() {
        fs::create_dir_all(dir)?;
        normalize_icon_set(input, &IconTarget::web_app(dir), &params)?
    } else {
        if args.outputs.is_empty() {
            return Err(AppError::MissingArgument {
                arg: "--output (or --web-app-dir)".to_string(),
            }
            .into());
        }
        vec![normalize_icon(input, &args.outputs, &params)?]
    };

    write_report(&reports, args.report.as_deref())?;
    summarize(&reports)?;
    info!("Successfully processed: {:?}", input);
    Ok(())
}
