//! High-level, ergonomic library API: normalize a source image to one or more
//! destination files, to an in-memory buffer, or to a set of icon sizes, plus
//! a batch helper for directories. Prefer these entrypoints over the low-level
//! processing modules when integrating iconfit.
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::params::NormalizeParams;
use crate::core::processing::pipeline::{
    NormalizedIcon, TrimmedContent, fit_and_compose, normalize_image, trim_stage,
};
use crate::core::processing::resize::ScaleResult;
use crate::core::processing::save::{DestinationOutcome, save_to_destinations};
use crate::core::processing::trim::BoundingBox;
use crate::error::{Error, Result};
use crate::io::reader::load_image;
use crate::types::CanvasSize;

/// Per-run result: what was computed and how every destination fared
#[derive(Debug)]
pub struct NormalizeReport {
    pub source: PathBuf,
    pub source_size: (u32, u32),
    pub canvas: CanvasSize,
    pub trimmed: BoundingBox,
    pub fit: ScaleResult,
    pub outcomes: Vec<DestinationOutcome>,
}

impl NormalizeReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &Path> {
        self.outcomes
            .iter()
            .filter(|o| o.is_ok())
            .map(|o| o.path.as_path())
    }

    pub fn failed(&self) -> impl Iterator<Item = (&Path, &Error)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.path.as_path(), e)))
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.is_ok())
    }

    /// Some, but not all, destinations failed
    pub fn is_partial_failure(&self) -> bool {
        !self.is_success() && self.outcomes.iter().any(|o| o.is_ok())
    }

    pub fn is_total_failure(&self) -> bool {
        !self.outcomes.is_empty() && self.outcomes.iter().all(|o| !o.is_ok())
    }

    /// Collapse into a single result; any failed destination yields
    /// `Error::DestinationsFailed` listing both the failures and the successes.
    pub fn into_result(self) -> Result<()> {
        if self.is_success() {
            return Ok(());
        }
        let mut failed = Vec::new();
        let mut succeeded = Vec::new();
        for outcome in self.outcomes {
            match outcome.result {
                Ok(()) => succeeded.push(outcome.path),
                Err(e) => failed.push((outcome.path, e.to_string())),
            }
        }
        Err(Error::DestinationsFailed { failed, succeeded })
    }
}

/// One output size of an icon set and the files it is written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconTarget {
    pub size: CanvasSize,
    pub destinations: Vec<PathBuf>,
}

impl IconTarget {
    pub fn new(size: CanvasSize, destinations: Vec<PathBuf>) -> Self {
        Self { size, destinations }
    }

    /// Standard web-app pair: `pwa-icon.png` (512) and `apple-touch-icon.png` (180)
    pub fn web_app(dir: &Path) -> Vec<IconTarget> {
        vec![
            IconTarget::new(CanvasSize::square(512), vec![dir.join("pwa-icon.png")]),
            IconTarget::new(CanvasSize::square(180), vec![dir.join("apple-touch-icon.png")]),
        ]
    }
}

fn report_for(
    source: &Path,
    icon: &NormalizedIcon,
    canvas: CanvasSize,
    outcomes: Vec<DestinationOutcome>,
) -> NormalizeReport {
    NormalizeReport {
        source: source.to_path_buf(),
        source_size: icon.source_size,
        canvas,
        trimmed: icon.trimmed,
        fit: icon.fit,
        outcomes,
    }
}

fn log_outcomes(report: &NormalizeReport) {
    let ok = report.succeeded().count();
    let total = report.outcomes.len();
    if report.is_success() {
        info!("Wrote {} destination(s) for {:?}", total, report.source);
    } else {
        warn!(
            "{} of {} destination(s) failed for {:?}",
            total - ok,
            total,
            report.source
        );
    }
}

/// Load `source`, normalize it per `params`, and write the canvas to every
/// destination (format chosen by extension).
///
/// Loading, trimming, fitting and compositing errors abort before any file is
/// written. Destination errors are collected in the returned report; use
/// [`NormalizeReport::into_result`] for a single pass/fail result.
pub fn normalize_icon(
    source: &Path,
    destinations: &[PathBuf],
    params: &NormalizeParams,
) -> Result<NormalizeReport> {
    if destinations.is_empty() {
        return Err(Error::NoDestinations);
    }
    let icon = normalize_icon_to_buffer(source, params)?;
    let outcomes = save_to_destinations(&icon.canvas, destinations, params.jpeg_quality);
    let report = report_for(source, &icon, params.canvas, outcomes);
    log_outcomes(&report);
    Ok(report)
}

/// Load and normalize `source` without writing anything
pub fn normalize_icon_to_buffer(source: &Path, params: &NormalizeParams) -> Result<NormalizedIcon> {
    params.validate()?;
    let image = load_image(source)?;
    normalize_image(image, params)
}

/// Decode and trim once, then fit, compose and write every target size.
/// `params.canvas` is ignored in favour of each target's size.
pub fn normalize_icon_set(
    source: &Path,
    targets: &[IconTarget],
    params: &NormalizeParams,
) -> Result<Vec<NormalizeReport>> {
    if targets.is_empty() || targets.iter().any(|t| t.destinations.is_empty()) {
        return Err(Error::NoDestinations);
    }
    params.validate()?;
    for target in targets {
        target.size.validate()?;
    }

    let content: TrimmedContent = trim_stage(load_image(source)?, params);

    // Compose everything up front so a fatal error leaves no outputs behind
    let icons = targets
        .iter()
        .map(|t| fit_and_compose(&content, t.size, params))
        .collect::<Result<Vec<_>>>()?;

    let reports = targets
        .iter()
        .zip(icons)
        .map(|(target, icon)| {
            let outcomes =
                save_to_destinations(&icon.canvas, &target.destinations, params.jpeg_quality);
            let report = report_for(source, &icon, target.size, outcomes);
            log_outcomes(&report);
            report
        })
        .collect();

    Ok(reports)
}

/// Counters from a directory run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

const SOURCE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "webp", "ico", "tga", "ppm", "pgm", "qoi",
];

fn is_source_image(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| SOURCE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
}

/// Return the entries of `input_dir` in name order
pub fn iterate_source_entries(input_dir: &Path) -> Result<std::vec::IntoIter<PathBuf>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(input_dir)? {
        entries.push(entry?.path());
    }
    entries.sort();
    Ok(entries.into_iter())
}

fn canonical_or_given(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Refuse outputs that would replace a source of this run or an output it
/// already produced.
fn check_output(
    output_path: &Path,
    sources: &HashSet<PathBuf>,
    claimed: &HashSet<PathBuf>,
) -> Result<()> {
    let conflict = |reason: &str| Error::OutputConflict {
        path: output_path.to_path_buf(),
        reason: reason.to_string(),
    };
    if claimed.contains(output_path) {
        return Err(conflict("another source in this run maps to the same output"));
    }
    if output_path.exists() && sources.contains(&canonical_or_given(output_path)) {
        return Err(conflict("it is a source image of this run"));
    }
    Ok(())
}

/// Normalize every raster image in `input_dir` into `<output_dir>/<stem>.png`.
/// Non-image entries are skipped. Sources that would overwrite an input image
/// or an output already written by this run fail with `Error::OutputConflict`.
/// If `continue_on_error` is false, the first error (fatal or destination) is
/// returned.
pub fn process_directory_to_path(
    input_dir: &Path,
    output_dir: &Path,
    params: &NormalizeParams,
    continue_on_error: bool,
) -> Result<BatchReport> {
    params.validate()?;
    std::fs::create_dir_all(output_dir)?;

    let mut report = BatchReport::default();
    let mut images = Vec::new();
    for path in iterate_source_entries(input_dir)? {
        if is_source_image(&path) && path.file_stem().is_some() {
            images.push(path);
        } else {
            info!("Skipping non-image entry: {:?}", path);
            report.skipped += 1;
        }
    }

    let sources: HashSet<PathBuf> = images.iter().map(|p| canonical_or_given(p)).collect();
    let mut claimed: HashSet<PathBuf> = HashSet::new();

    for path in images {
        let Some(stem) = path.file_stem() else {
            continue;
        };
        let output_path = output_dir.join(format!("{}.png", stem.to_string_lossy()));
        info!("Processing: {:?} -> {:?}", path, output_path);

        let result = check_output(&output_path, &sources, &claimed).and_then(|()| {
            claimed.insert(output_path.clone());
            normalize_icon(&path, &[output_path], params)?.into_result()
        });

        match result {
            Ok(()) => report.processed += 1,
            Err(e) => {
                warn!("Error processing {:?}: {}", path, e);
                report.errors += 1;
                if !continue_on_error {
                    return Err(e);
                }
            }
        }
    }

    info!(
        "Batch complete: processed={} skipped={} errors={}",
        report.processed, report.skipped, report.errors
    );
    Ok(report)
}
