use std::{collections::BTreeMap, path::PathBuf};

use spategt_core::GameLabel;
use spategt_stats::histogram::Histogram;

use crate::data;

/// Sensitive fractions outside these bounds mean one subpopulation has
/// effectively taken over; such samples distort cross-game comparisons.
const NEAR_FIXATION_LOW: f32 = 0.05;
const NEAR_FIXATION_HIGH: f32 = 0.95;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SummarizeArg {
    /// Feature table to summarize
    #[arg(long)]
    input: PathBuf,
}

pub(crate) fn run(arg: &SummarizeArg) -> anyhow::Result<()> {
    let records = data::read_feature_table_file(&arg.input)?;

    let mut by_game: BTreeMap<String, usize> = BTreeMap::new();
    for record in &records {
        *by_game.entry(record.game.to_string()).or_insert(0) += 1;
    }

    println!("Samples: {}", records.len());
    println!("By game:");
    for (game, count) in &by_game {
        println!("  {game}: {count}");
    }

    let fractions: Vec<f32> = records
        .iter()
        .filter_map(|r| r.proportion_sensitive)
        .collect();
    if !fractions.is_empty() {
        let low = fractions.iter().filter(|&&f| f < NEAR_FIXATION_LOW).count();
        let high = fractions
            .iter()
            .filter(|&&f| f > NEAR_FIXATION_HIGH)
            .count();
        println!("Sensitive fraction:");
        println!("  Below {NEAR_FIXATION_LOW}: {low}");
        println!("  Above {NEAR_FIXATION_HIGH}: {high}");

        // Same fixed bins for every table, so histograms stay comparable
        // across runs and games.
        let histogram = Histogram::new(&fractions, 0.0, 1.1, 0.1);
        println!("  Histogram:");
        for (bin, frequency) in histogram.bins.iter().zip(histogram.frequencies()) {
            println!(
                "    [{:.1}, {:.1}): {:>5} ({:.1}%)",
                bin.range.start,
                bin.range.end,
                bin.count,
                frequency * 100.0
            );
        }
    }

    let unknown = records
        .iter()
        .filter(|r| r.game == GameLabel::Unknown)
        .count();
    if unknown > 0 {
        eprintln!("Warning: {unknown} rows carry the unknown game label");
    }

    Ok(())
}
