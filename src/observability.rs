use std::fs;
use std::path::Path;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::store::EditMode;

// ── Edit metrics ────────────────────────────────────────────────

/// Counter: single-cell edits. Labels: status (ok, rejected).
pub const CELL_EDITS_TOTAL: &str = "roomgrid_cell_edits_total";

/// Counter: bulk writes. Labels: mode (single, range, pattern, paste).
pub const BULK_EDITS_TOTAL: &str = "roomgrid_bulk_edits_total";

/// Histogram: dates written per bulk write.
pub const BULK_DATES_WRITTEN: &str = "roomgrid_bulk_dates_written";

// ── Session state ───────────────────────────────────────────────

/// Gauge: journaled changes not yet saved.
pub const PENDING_CHANGES: &str = "roomgrid_pending_changes";

/// Install the Prometheus recorder when a metrics file is configured.
/// No-op (metrics macros stay silent) if path is None.
pub fn init(path: Option<&Path>) -> Result<Option<PrometheusHandle>, Box<dyn std::error::Error>> {
    let Some(path) = path else { return Ok(None) };
    let handle = PrometheusBuilder::new().install_recorder()?;
    tracing::info!("metrics snapshot: {}", path.display());
    Ok(Some(handle))
}

/// Write the current metrics in Prometheus text format.
pub fn write_snapshot(handle: &PrometheusHandle, path: &Path) -> std::io::Result<()> {
    fs::write(path, handle.render())
}

/// Map an EditMode to a short label for metrics and logs.
pub fn mode_label(mode: EditMode) -> &'static str {
    match mode {
        EditMode::Single => "single",
        EditMode::Range => "range",
        EditMode::Pattern => "pattern",
    }
}
