//! two_locos: two locomotives sharing one stretch of track.
//!
//! Locomotive 7 circles an outer loop, locomotive 42 an inner loop; both
//! pass through checkpoints 24 → 23 → 16 in that order until they invert.
//! Every two laps each of them stops, reverses, and restarts, so the two
//! meet head-on whenever exactly one of them is inverted.
//!
//! ```text
//! RUST_LOG=info cargo run -p two_locos              # embedded layout
//! RUST_LOG=debug cargo run -p two_locos -- my.csv   # custom layout
//! ```

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Result, ensure};

use tc_core::RunConfig;
use tc_route::load_layout_reader;
use tc_sim::RunBuilder;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:                  u64 = 42;
const TOTAL_LAPS:            u32 = 6;
const LAPS_BEFORE_INVERSION: u32 = 2;
const STEP_MILLIS:           u64 = 40;
const JITTER_MILLIS:         u64 = 60;
const REPORT_PATH:           &str = "output/two_locos/reports.json";

// ── Layout CSV ────────────────────────────────────────────────────────────────

// Agent 7: outer loop, 12 checkpoints, lap end 30.
// Agent 42: inner loop, 11 checkpoints, lap end 13.
// Shared run 24, 23, 16, listed in the same order for both.
const LAYOUT_CSV: &str = "\
agent_id,kind,id,value\n\
7,checkpoint,1,\n\
7,checkpoint,2,\n\
7,checkpoint,3,\n\
7,checkpoint,25,\n\
7,checkpoint,24,\n\
7,checkpoint,23,\n\
7,checkpoint,16,\n\
7,checkpoint,15,\n\
7,checkpoint,10,\n\
7,checkpoint,4,\n\
7,checkpoint,6,\n\
7,checkpoint,30,\n\
7,shared,24,\n\
7,shared,23,\n\
7,shared,16,\n\
7,switch,8,diverted\n\
7,switch,9,straight\n\
42,checkpoint,5,\n\
42,checkpoint,34,\n\
42,checkpoint,33,\n\
42,checkpoint,28,\n\
42,checkpoint,22,\n\
42,checkpoint,24,\n\
42,checkpoint,23,\n\
42,checkpoint,16,\n\
42,checkpoint,19,\n\
42,checkpoint,14,\n\
42,checkpoint,13,\n\
42,shared,24,\n\
42,shared,23,\n\
42,shared,16,\n\
42,switch,8,straight\n\
42,switch,9,diverted\n\
";

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== two_locos: shared segment controller ===");
    println!(
        "Laps: {TOTAL_LAPS}  |  Inversion every {LAPS_BEFORE_INVERSION} laps  |  Seed: {SEED}"
    );
    println!();

    // 1. Load the layout.
    let layout = match std::env::args().nth(1) {
        Some(path) => tc_route::load_layout_csv(Path::new(&path))?,
        None => load_layout_reader(Cursor::new(LAYOUT_CSV))?,
    };
    for (agent, route) in &layout {
        let b = route.boundaries();
        log::info!(
            "{agent}: announce {} | entry {} | exit {} | lap end {}",
            b.announce,
            b.entry,
            b.exit,
            route.lap_end(),
        );
    }

    // 2. Run config.
    let config = RunConfig {
        laps_before_inversion: LAPS_BEFORE_INVERSION,
        total_laps:            Some(TOTAL_LAPS),
        step_millis:           STEP_MILLIS,
        jitter_millis:         JITTER_MILLIS,
        seed:                  SEED,
    };

    // 3. Build and run.
    let runner = RunBuilder::new(config).routes(layout).build()?;
    let track = Arc::clone(runner.driver());

    let t0 = Instant::now();
    let reports = runner.run()?;
    let elapsed = t0.elapsed();

    // 4. Summary.
    println!("Run complete in {:.3} s", elapsed.as_secs_f64());
    println!();
    println!("{:<14} {:>5} {:>11} {:>7} {:>6}", "Agent", "Laps", "Inversions", "Grants", "Waits");
    println!("{}", "-".repeat(47));
    for r in &reports {
        println!(
            "{:<14} {:>5} {:>11} {:>7} {:>6}",
            r.agent.to_string(),
            r.laps,
            r.inversions,
            r.grants,
            r.waits,
        );
    }
    println!();
    println!("Track commands issued: {}", track.commands().len());
    println!("Max locomotives on shared segment: {}", track.max_on_shared());

    ensure!(track.max_on_shared() <= 1, "collision on the shared segment");

    // 5. Write reports.
    std::fs::create_dir_all("output/two_locos")?;
    std::fs::write(REPORT_PATH, serde_json::to_string_pretty(&reports)?)?;
    println!("Reports written to {REPORT_PATH}");

    Ok(())
}
