//! Month-step throughput for the ozone engine.
//!
//! Seeds random grids of several sizes and densities and reports the time
//! per simulated month. Use with `--release` for meaningful results.

#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use rand::RngCore;
use rand::SeedableRng;
use std::time::Instant;
use ozone_life::ozone::{Grid, OzoneConfig, OzoneEngine, Result};

struct Scenario {
    name: &'static str,
    size: usize,
    density: f64,
    months: u64,
    seed: u64,
}

fn seed_grid(size: usize, density: f64, seed: u64) -> Result<Grid> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let threshold = (u64::MAX as f64 * density) as u64;
    let mut holes = Vec::new();
    for row in 0..size {
        for col in 0..size {
            if rng.next_u64() <= threshold {
                holes.push((row, col));
            }
        }
    }
    Grid::with_holes(size, size, holes)
}

fn run_scenario(s: &Scenario) -> Result<(f64, usize)> {
    let engine = OzoneEngine::new(OzoneConfig::default().rows(s.size).cols(s.size))?;
    let grid = seed_grid(s.size, s.density, s.seed)?;

    let start = Instant::now();
    let out = engine.simulate(&grid, s.months)?;
    let total_ms = start.elapsed().as_secs_f64() * 1000.0;
    Ok((total_ms, out.population()))
}

fn main() -> Result<()> {
    let scenarios = [
        Scenario {
            name: "ozone-15",
            size: 15,
            density: 0.30,
            months: 100_000,
            seed: 0xA1,
        },
        Scenario {
            name: "small-sparse",
            size: 128,
            density: 0.10,
            months: 500,
            seed: 0xB2,
        },
        Scenario {
            name: "small-dense",
            size: 128,
            density: 0.42,
            months: 500,
            seed: 0xC3,
        },
        Scenario {
            name: "large-dense",
            size: 1024,
            density: 0.42,
            months: 50,
            seed: 0xD4,
        },
    ];

    println!(
        "{:<14} {:>8} {:>10} {:>12} {:>12} {:>10}",
        "Scenario", "Size", "Months", "Total(ms)", "Avg(ms)", "Pop"
    );
    println!("{}", "-".repeat(72));

    for s in &scenarios {
        let (total_ms, pop) = run_scenario(s)?;
        let avg_ms = total_ms / s.months as f64;
        println!(
            "{:<14} {:>8} {:>10} {:>12.1} {:>12.6} {:>10}",
            s.name,
            format!("{}x{}", s.size, s.size),
            s.months,
            total_ms,
            avg_ms,
            pop
        );
    }
    Ok(())
}
