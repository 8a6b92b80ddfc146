use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::api::NormalizeReport;
use crate::core::processing::resize::ScaleResult;
use crate::core::processing::trim::BoundingBox;
use crate::error::{Error, Result};
use crate::types::{CanvasSize, OutputFormat};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationRecord {
    pub path: PathBuf,
    pub format: Option<OutputFormat>,
    pub ok: bool,
    pub error: Option<String>,
}

/// Serializable summary of one normalization run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub generated_at: String,
    pub source: PathBuf,
    pub source_width: u32,
    pub source_height: u32,
    pub canvas: CanvasSize,
    pub trimmed: BoundingBox,
    pub fit: ScaleResult,
    pub destinations: Vec<DestinationRecord>,
}

impl From<&NormalizeReport> for ReportRecord {
    fn from(report: &NormalizeReport) -> Self {
        let destinations = report
            .outcomes
            .iter()
            .map(|o| DestinationRecord {
                path: o.path.clone(),
                format: o.format,
                ok: o.result.is_ok(),
                error: o.result.as_ref().err().map(|e| e.to_string()),
            })
            .collect();

        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            source: report.source.clone(),
            source_width: report.source_size.0,
            source_height: report.source_size.1,
            canvas: report.canvas,
            trimmed: report.trimmed,
            fit: report.fit,
            destinations,
        }
    }
}

/// Write one or more run summaries as a pretty-printed JSON array
pub fn write_report_json(reports: &[NormalizeReport], output: &Path) -> Result<()> {
    let records: Vec<ReportRecord> = reports.iter().map(ReportRecord::from).collect();
    let json_string = serde_json::to_string_pretty(&records)
        .map_err(|e| Error::encode(output, e))?;
    std::fs::write(output, json_string).map_err(|source| Error::Write {
        path: output.to_path_buf(),
        source,
    })?;
    info!("Wrote run report: {:?}", output);
    Ok(())
}
