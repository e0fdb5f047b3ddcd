use std::path::PathBuf;

use chrono::Utc;
use rayon::prelude::*;
use spategt_analysis::{
    extract::{DEFAULT_MIN_COUNT, FeatureExtractor, FeatureRow, SampleSkip},
    params::StatisticCatalog,
};
use spategt_core::DataType;

use crate::{
    data,
    schema::{ExtractionManifest, SkipCounts},
    util::{Output, read_json_file},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ExtractArg {
    /// Directory holding payoff.csv and per-sample files <source>/<sample>.csv
    #[arg(long)]
    data_dir: PathBuf,
    /// Scale regime of the data source
    #[arg(long)]
    data_type: DataType,
    /// Feature table output path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Run manifest output path (JSON)
    #[arg(long)]
    manifest: Option<PathBuf>,
    /// Statistic parameter table (JSON) replacing the built-in one
    #[arg(long)]
    params: Option<PathBuf>,
    /// Statistic subset to extract; repeatable, defaults to the whole catalog
    #[arg(long = "feature")]
    features: Vec<String>,
    /// Seed for window-placement randomness
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Minimum viable subpopulation size
    #[arg(long, default_value_t = DEFAULT_MIN_COUNT)]
    min_count: usize,
}

enum SampleOutcome {
    Row(Box<FeatureRow>),
    MissingFile,
    Skipped(SampleSkip),
}

pub(crate) fn run(arg: &ExtractArg) -> anyhow::Result<()> {
    let catalog: StatisticCatalog = match &arg.params {
        Some(path) => read_json_file("statistic parameter", path)?,
        None => StatisticCatalog::builtin(),
    };
    catalog.validate(arg.data_type)?;

    let names: Vec<String> = if arg.features.is_empty() {
        catalog.names().map(str::to_string).collect()
    } else {
        arg.features.clone()
    };
    let extractor = FeatureExtractor::new(&catalog, arg.data_type, &names, arg.seed, arg.min_count)?;

    let payoffs = data::read_payoff_file(&arg.data_dir.join("payoff.csv"))?;
    eprintln!(
        "Extracting {} statistics from {} samples ({})",
        names.len(),
        payoffs.len(),
        arg.data_type
    );

    let outcomes: Vec<SampleOutcome> = payoffs
        .par_iter()
        .map(|((source, sample), payoff)| {
            let path = arg.data_dir.join(source).join(format!("{sample}.csv"));
            let missing = match path.metadata() {
                Ok(meta) => meta.len() == 0,
                Err(_) => true,
            };
            if missing {
                eprintln!("  {source}/{sample}: missing or empty file, skipped");
                return Ok(SampleOutcome::MissingFile);
            }
            let point_sample =
                data::read_sample_file(&path, source, sample, arg.data_type)?;
            match extractor.extract(&point_sample, payoff) {
                Ok(row) => Ok(SampleOutcome::Row(Box::new(row))),
                Err(skip) => {
                    eprintln!("  {source}/{sample}: {skip}");
                    Ok(SampleOutcome::Skipped(skip))
                }
            }
        })
        .collect::<anyhow::Result<_>>()?;

    let mut rows = Vec::new();
    let mut skipped = SkipCounts::default();
    for outcome in outcomes {
        match outcome {
            SampleOutcome::Row(row) => rows.push(*row),
            SampleOutcome::MissingFile => skipped.missing_file += 1,
            SampleOutcome::Skipped(SampleSkip::Extinct { .. }) => skipped.extinct += 1,
            SampleOutcome::Skipped(SampleSkip::UnknownGame) => skipped.unknown_game += 1,
            SampleOutcome::Skipped(
                SampleSkip::Statistic { .. } | SampleSkip::EmptyDistribution { .. },
            ) => skipped.statistic += 1,
        }
    }
    rows.sort_by(|a, b| {
        (&a.source_id, &a.sample_id).cmp(&(&b.source_id, &b.sample_id))
    });

    let output = Output::from_output_path(arg.output.clone())?;
    let output_path = output.display_path();
    data::write_feature_table(output, &rows)?;

    if arg.manifest.is_some() {
        let manifest = ExtractionManifest {
            tool: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            generated_at: Utc::now(),
            data_type: arg.data_type,
            seed: arg.seed,
            min_count: arg.min_count,
            statistics: names,
            processed: rows.len(),
            skipped,
        };
        Output::save_json(&manifest, arg.manifest.clone())?;
    }

    eprintln!();
    eprintln!("Feature table written to {output_path}");
    eprintln!("  Processed: {} samples", rows.len());
    eprintln!("  Skipped:   {} samples", skipped.total());
    eprintln!("    Missing file: {}", skipped.missing_file);
    eprintln!("    Extinct:      {}", skipped.extinct);
    eprintln!("    Unknown game: {}", skipped.unknown_game);
    eprintln!("    Statistic:    {}", skipped.statistic);

    Ok(())
}
