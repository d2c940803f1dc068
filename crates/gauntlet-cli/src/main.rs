// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use chrono::Local;
use clap::{Parser, ValueEnum};
use gauntlet_model::{loading::InstanceLoader, manifest::ProblemClass};
use gauntlet_session::{
    allocator::SessionBuilder,
    category::TrainingCategory,
    competitor::Competitor,
    config::{SessionConfig, TimeScaling},
    driver::SessionDriver,
    report::SessionReport,
};
use gauntlet_strategies::{
    annealing::AnnealingHyperHeuristic, hill_climbing::NextAscentHillClimber,
    random::RandomSearch,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CompetitorKind {
    /// Uniform random search.
    Random,
    /// Next-ascent hill climbing with random restarts.
    Nahc,
    /// Simulated-annealing hyper-heuristic (trains).
    Sahh,
}

/// Evaluates a competitor on a problem class under evaluation and time budgets.
#[derive(Debug, Parser)]
#[command(name = "gauntlet", version, about, long_about = None)]
struct Cli {
    /// Directory containing `classFolder.txt` and the problem-class folders.
    #[arg(long, env = "GAUNTLET_ROOT", default_value = "resources")]
    root: PathBuf,

    /// Problem-class folder under the root; overrides `classFolder.txt`.
    #[arg(long)]
    class: Option<String>,

    #[arg(long, value_enum, default_value_t = CompetitorKind::Nahc)]
    competitor: CompetitorKind,

    /// Training category (none, short, long). Only `sahh` trains; defaults
    /// to `short` for it and `none` otherwise.
    #[arg(long)]
    category: Option<TrainingCategory>,

    /// Seed for the competitor's random number generator.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Wall-clock time per instance in milliseconds.
    #[arg(long, default_value_t = 250_000)]
    base_time_ms: u64,

    /// Scale training time by the evaluation multiplier (LONG = 10x)
    /// instead of the time multiplier (LONG = 2x).
    #[arg(long)]
    legacy_time_scaling: bool,

    /// Print the report without writing it to `<class>/results/`.
    #[arg(long)]
    no_write: bool,
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn make_competitor(
    kind: CompetitorKind,
    category: Option<TrainingCategory>,
    seed: u64,
) -> Result<Box<dyn Competitor>, String> {
    let rng = ChaCha8Rng::seed_from_u64(seed);
    let competitor: Box<dyn Competitor> = match kind {
        CompetitorKind::Random => Box::new(RandomSearch::new(rng)),
        CompetitorKind::Nahc => Box::new(NextAscentHillClimber::new(rng)),
        CompetitorKind::Sahh => Box::new(AnnealingHyperHeuristic::new(
            category.unwrap_or(TrainingCategory::Short),
            rng,
        )),
    };

    match category {
        Some(requested) if requested != competitor.training_category() => Err(format!(
            "competitor '{}' runs in category {}, not {}",
            competitor.name(),
            competitor.training_category(),
            requested
        )),
        _ => Ok(competitor),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    enable_tracing();
    let cli = Cli::parse();

    let mut competitor = make_competitor(cli.competitor, cli.category, cli.seed)?;
    let category = competitor.training_category();

    let class = match &cli.class {
        Some(name) => ProblemClass::open(cli.root.join(name))?,
        None => ProblemClass::resolve(&cli.root)?,
    };
    tracing::info!(
        class = class.name(),
        competitor = competitor.name(),
        category = %category,
        "loading problem class"
    );

    let loader = InstanceLoader::new();
    let training = if category.has_training() {
        class.load_training(&loader)?
    } else {
        Vec::new()
    };
    let testing = class.load_testing(&loader)?;

    let session = SessionBuilder::new(category)
        .with_training(training)
        .with_testing(testing)
        .build()?;

    let scaling = if cli.legacy_time_scaling {
        TimeScaling::EvaluationMultiplier
    } else {
        TimeScaling::TimeMultiplier
    };
    let config = SessionConfig::new()
        .with_base_time_per_instance(Duration::from_millis(cli.base_time_ms))
        .with_time_scaling(scaling);

    let outcome = SessionDriver::new(config).run(&session, &mut competitor)?;
    let report = SessionReport::new(
        competitor.name(),
        class.name(),
        category,
        outcome,
        &Local::now(),
    );

    if let Some(stats) = report.testing_stats() {
        tracing::info!("testing {}", stats);
    }
    if !cli.no_write {
        let path = report.write_to_class_dir(class.dir())?;
        tracing::info!(path = %path.display(), "wrote result file");
    }

    println!("{}", report.to_json()?);
    Ok(())
}
