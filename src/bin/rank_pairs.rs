//! Rank every pair of reference plants by hybridization success
//!
//! Usage: cargo run --release --bin rank_pairs [DATA_FILE] [LIMIT]
//!
//! Without a data file the built-in table is used.

use breeding_assistant::{BreedingData, CompatibilityScorer};
use std::path::Path;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);

    let data = match args.next() {
        Some(path) => BreedingData::load(Path::new(&path))?,
        None => BreedingData::builtin()?,
    };
    let limit = match args.next() {
        Some(raw) => raw.parse::<usize>()?,
        None => usize::MAX,
    };

    println!("Scoring {} plants...\n", data.len());
    let start = Instant::now();
    let scorer = CompatibilityScorer::new();
    let pairs = scorer.rank_pairs(&data);
    let elapsed = start.elapsed();

    println!("{:<5} {:<28} {:>8} {:>11}  {}", "Rank", "Pair", "Success", "Confidence", "Compatibility");
    println!("{}", "-".repeat(72));
    for (i, pair) in pairs.iter().take(limit).enumerate() {
        let label = format!("{} × {}", pair.plant_a, pair.plant_b);
        println!(
            "{:<5} {:<28} {:>7}% {:>11.2}  {}",
            i + 1,
            label,
            pair.success_rate,
            pair.confidence,
            pair.compatibility.label()
        );
    }

    println!("\n{} pairs ranked in {:?}", pairs.len(), elapsed);
    Ok(())
}
