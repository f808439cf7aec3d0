use std::time::{Duration, Instant};

use chrono::NaiveDate;

use roomgrid::calendar::CalendarView;
use roomgrid::model::*;
use roomgrid::presets::Preset;
use roomgrid::store::{AvailabilityStore, BulkEdit, DateRange, WeekdayPattern};

fn percentile(sorted: &[Duration], p: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let idx = ((sorted.len() as f64) * p / 100.0) as usize;
    sorted[idx.min(sorted.len() - 1)]
}

fn print_latency(label: &str, latencies: &mut [Duration]) {
    if latencies.is_empty() {
        return;
    }
    latencies.sort();
    let total: Duration = latencies.iter().sum();
    let avg = total / latencies.len() as u32;
    println!("  {label}:");
    println!(
        "    n={}, avg={:.3}ms, p50={:.3}ms, p95={:.3}ms, p99={:.3}ms, max={:.3}ms",
        latencies.len(),
        avg.as_secs_f64() * 1000.0,
        percentile(latencies, 50.0).as_secs_f64() * 1000.0,
        percentile(latencies, 95.0).as_secs_f64() * 1000.0,
        percentile(latencies, 99.0).as_secs_f64() * 1000.0,
        latencies[latencies.len() - 1].as_secs_f64() * 1000.0,
    );
}

fn counts() -> RoomCounts {
    RoomCounts::from_iter([
        (RoomType::Standard, 40),
        (RoomType::Deluxe, 20),
        (RoomType::Suite, 8),
        (RoomType::Family, 12),
    ])
}

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid start date")
}

fn phase1_cell_edits(store: &mut AvailabilityStore) {
    let n = 100_000;
    let types = RoomType::ALL;
    let mut latencies = Vec::with_capacity(n);
    let begin = Instant::now();

    for i in 0..n {
        let date = start() + chrono::Days::new((i % 1_095) as u64);
        let room_type = types[i % types.len()];
        let cap = store.room_counts().get(room_type).unwrap_or(0);
        let t = Instant::now();
        store
            .set(date, room_type, (i as i64) % (i64::from(cap) + 1))
            .expect("in-range set");
        latencies.push(t.elapsed());
    }

    let elapsed = begin.elapsed();
    let ops = n as f64 / elapsed.as_secs_f64();
    println!("  {n} cell edits in {:.2}s = {ops:.0} ops/sec", elapsed.as_secs_f64());
    print_latency("set", &mut latencies);
    store.mark_saved();
}

fn phase2_bulk_edits(store: &mut AvailabilityStore) {
    let counts = store.room_counts().clone();
    let presets = [Preset::HighSeason, Preset::LowSeason, Preset::WeekendSpecial];
    let patterns = [
        WeekdayPattern::All,
        WeekdayPattern::Weekdays,
        WeekdayPattern::Weekends,
    ];
    let mut latencies = Vec::new();
    let mut dates_written = 0usize;
    let begin = Instant::now();

    for i in 0..300 {
        let from = start() + chrono::Days::new((i * 3) as u64);
        let to = from + chrono::Days::new(89);
        let Ok(range) = DateRange::new(from, to) else {
            continue;
        };
        let edit = BulkEdit::pattern(
            range,
            patterns[i % patterns.len()].clone(),
            presets[i % presets.len()].snapshot(&counts),
        );
        let t = Instant::now();
        dates_written += store.apply_bulk(&edit).map(|d| d.len()).unwrap_or(0);
        latencies.push(t.elapsed());
    }

    let elapsed = begin.elapsed();
    println!(
        "  {} bulk edits, {dates_written} days written in {:.2}s",
        latencies.len(),
        elapsed.as_secs_f64()
    );
    print_latency("apply_bulk (90-day range)", &mut latencies);
    store.mark_saved();
}

fn phase3_reads(store: &AvailabilityStore) {
    let mut stats_latencies = Vec::new();
    let mut render_latencies = Vec::new();
    let today = start();

    for _ in 0..20 {
        let mut month = Month::of(start());
        for _ in 0..36 {
            let t = Instant::now();
            let stats = store.month_stats(month);
            stats_latencies.push(t.elapsed());
            std::hint::black_box(stats);

            let t = Instant::now();
            let cal = CalendarView::new(month, today).render(store);
            render_latencies.push(t.elapsed());
            std::hint::black_box(cal);

            match month.succ() {
                Some(next) => month = next,
                None => break,
            }
        }
    }

    print_latency("month_stats", &mut stats_latencies);
    print_latency("render", &mut render_latencies);
}

fn phase4_copy_paste(store: &mut AvailabilityStore) {
    let mut latencies = Vec::new();
    let mut month = Month::of(start());
    for _ in 0..35 {
        let Some(next) = month.succ() else {
            break;
        };
        let t = Instant::now();
        let clip = store.copy_month(month);
        store.paste_month(next, &clip);
        latencies.push(t.elapsed());
        month = next;
    }
    print_latency("copy + paste month", &mut latencies);
    store.mark_saved();
}

fn main() {
    println!("=== roomgrid stress benchmark ===");
    println!("rooms: {}\n", counts().total());

    let mut store = AvailabilityStore::new(counts());

    println!("[phase 1] single-cell write throughput");
    phase1_cell_edits(&mut store);

    println!("\n[phase 2] bulk pattern edits");
    phase2_bulk_edits(&mut store);

    println!("\n[phase 3] month reads over three years");
    phase3_reads(&store);

    println!("\n[phase 4] month copy/paste chain");
    phase4_copy_paste(&mut store);

    println!("\n=== benchmark complete ===");
}
