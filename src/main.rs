use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use roomgrid::calendar::{CalendarMonth, CalendarView};
use roomgrid::model::{AvailabilityData, Month, MonthStats, Room, RoomCounts};
use roomgrid::store::{AvailabilityStore, BulkEdit, EmptySelection, JournalMode, StoreOptions};
use roomgrid::{catalog, observability};

#[derive(Serialize)]
struct Report {
    month: Month,
    room_counts: RoomCounts,
    stats: MonthStats,
    calendar: CalendarMonth,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let catalog_path = std::env::var("ROOMGRID_CATALOG").ok();
    let availability_path = std::env::var("ROOMGRID_AVAILABILITY").ok();
    let bulk_path = std::env::var("ROOMGRID_BULK").ok();
    let output_path = std::env::var("ROOMGRID_OUTPUT").ok();
    let metrics_path = std::env::var("ROOMGRID_METRICS").ok().map(PathBuf::from);
    let today: NaiveDate = match std::env::var("ROOMGRID_TODAY") {
        Ok(s) => s.parse()?,
        Err(_) => chrono::Local::now().date_naive(),
    };
    let month: Month = match std::env::var("ROOMGRID_MONTH") {
        Ok(s) => s.parse()?,
        Err(_) => Month::of(today),
    };
    let reject_empty_bulk = std::env::var("ROOMGRID_REJECT_EMPTY_BULK")
        .ok()
        .and_then(|s| s.parse::<bool>().ok())
        .unwrap_or(false);
    let count_only_journal = std::env::var("ROOMGRID_COUNT_ONLY_JOURNAL")
        .ok()
        .and_then(|s| s.parse::<bool>().ok())
        .unwrap_or(false);

    let metrics_handle = observability::init(metrics_path.as_deref())?;

    let rooms: Vec<Room> = match &catalog_path {
        Some(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
        None => catalog::mock_rooms(),
    };
    let seed: AvailabilityData = match &availability_path {
        Some(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
        None => catalog::mock_availability(),
    };

    let counts = RoomCounts::from_catalog(&rooms);
    let options = StoreOptions {
        empty_selection: if reject_empty_bulk {
            EmptySelection::Reject
        } else {
            EmptySelection::Ignore
        },
        journal: if count_only_journal {
            JournalMode::CountOnly
        } else {
            JournalMode::Events
        },
    };
    let mut store = AvailabilityStore::with_options(counts, options);
    let corrected = store.seed(seed);

    info!("roomgrid report for {month}");
    info!("  catalog: {}", catalog_path.as_deref().unwrap_or("built-in"));
    info!("  availability: {}", availability_path.as_deref().unwrap_or("built-in"));
    info!("  rooms: {} ({} types)", rooms.len(), store.room_counts().iter().count());
    info!("  seeded days: {} ({corrected} clamped)", store.data().len());

    if let Some(path) = &bulk_path {
        let edits: Vec<BulkEdit> = serde_json::from_reader(BufReader::new(File::open(path)?))?;
        for edit in &edits {
            let written = store.apply_bulk(edit)?;
            info!("  bulk {}: {} dates", observability::mode_label(edit.mode), written.len());
        }
    }

    if let Some(path) = &output_path
        && store.has_unsaved_changes()
    {
        let mut out = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut out, store.data())?;
        out.flush()?;
        let changes = store.unsaved_count();
        store.mark_saved();
        info!("  saved {changes} changes to {path}");
    }

    let report = Report {
        month,
        room_counts: store.room_counts().clone(),
        stats: store.month_stats(month),
        calendar: CalendarView::new(month, today).render(&store),
    };
    serde_json::to_writer_pretty(std::io::stdout().lock(), &report)?;
    println!();

    if let (Some(handle), Some(path)) = (&metrics_handle, &metrics_path) {
        observability::write_snapshot(handle, path)?;
    }
    Ok(())
}
