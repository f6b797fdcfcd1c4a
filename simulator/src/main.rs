mod config;
mod input;

use std::{io::stdin, path::PathBuf, time::Instant};

use anyhow::{bail, Context as _};
use clap::{Args, Parser, Subcommand};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

use pareto_selection::{
    extract_frontier, ArrayVec, Candidate, Criterion, Direction, Weight, MAX_CRITERIA,
};
use product_comparison::{ComparisonRequest, ComparisonResult, ParetoChartData};

use crate::config::{parse_criterion, ChartAxes, ComparisonConfig};

#[derive(Parser)]
#[command(name = "pareto-simulator")]
#[command(about = "Pareto frontier product comparison and extraction benchmarks")]
struct Cli {
    #[arg(long, global = true, help = "Enable debug logging")]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compare products read as CSV from stdin and print the result as JSON.
    Compare(CompareArgs),
    /// Time frontier extraction over random candidate sets.
    Simulate(SimulateArgs),
}

#[derive(Args)]
struct CompareArgs {
    /// TOML file holding the comparison request.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Category to compare. Overrides the config.
    #[arg(long)]
    category: Option<String>,
    /// Criterion as attribute:direction:weight, e.g. price:min:0.6. Replaces the config criteria.
    #[arg(long = "criterion", value_parser = parse_criterion)]
    criteria: Vec<Criterion>,
    #[arg(long)]
    limit: Option<usize>,
    /// Attribute plotted on the chart x axis.
    #[arg(long, requires = "chart_y")]
    chart_x: Option<String>,
    /// Attribute plotted on the chart y axis.
    #[arg(long, requires = "chart_x")]
    chart_y: Option<String>,
}

#[derive(Args)]
struct SimulateArgs {
    #[arg(long, default_value = "100")]
    candidates: usize,
    #[arg(long, default_value = "4")]
    criteria: usize,
    #[arg(long, default_value = "1000")]
    rounds: usize,
    /// Probability for a candidate to lack a value for a criterion.
    #[arg(long, default_value = "0.1")]
    missing_rate: f64,
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    match cli.command {
        Command::Compare(args) => compare(args),
        Command::Simulate(args) => simulate(args),
    }
}

fn init_logger(verbose: bool) {
    let default = if verbose {
        "pareto_selection=debug,product_comparison=debug,pareto_simulator=debug,info"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareOutput {
    #[serde(flatten)]
    result: ComparisonResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    chart: Option<ParetoChartData>,
}

fn compare(args: CompareArgs) -> anyhow::Result<()> {
    let (mut request, config_chart) = match &args.config {
        Some(path) => {
            let config = ComparisonConfig::from_file(path)?;
            (config.request, config.chart)
        }
        None => (ComparisonRequest::new("", Vec::new()), None),
    };
    if let Some(category) = args.category {
        request.category_id = category;
    }
    if !args.criteria.is_empty() {
        request.criteria = args.criteria;
    }
    if args.limit.is_some() {
        request.limit = args.limit;
    }
    let chart = match (args.chart_x, args.chart_y) {
        (Some(x), Some(y)) => Some(ChartAxes { x, y }),
        _ => config_chart,
    };

    let listings = input::read_listings(stdin().lock(), &request.category_id)?;
    let result = product_comparison::compare(listings, &request).context("invalid comparison")?;
    tracing::info!(
        products = result.total_products,
        frontier = result.pareto_frontier.len(),
        "compared products"
    );
    let chart = chart.map(|axes| ParetoChartData::new(&result, &axes.x, &axes.y));
    let output = CompareOutput { result, chart };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

const ATTRIBUTES: [&str; MAX_CRITERIA] = ["c0", "c1", "c2", "c3", "c4", "c5", "c6", "c7", "c8", "c9"];

struct SyntheticCandidate {
    id: usize,
    values: ArrayVec<Option<f64>, MAX_CRITERIA>,
}

impl Candidate for SyntheticCandidate {
    type Id = usize;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn attribute(&self, key: &str) -> Option<f64> {
        let index = ATTRIBUTES.iter().position(|a| *a == key)?;
        self.values.get(index).copied().flatten()
    }
}

fn simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if !(1..=MAX_CRITERIA).contains(&args.criteria) {
        bail!("criteria must be within 1..={MAX_CRITERIA}");
    }
    if !(0.0..=1.0).contains(&args.missing_rate) {
        bail!("missing rate must be within [0, 1]");
    }
    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let criteria = ATTRIBUTES[..args.criteria]
        .iter()
        .map(|attribute| -> anyhow::Result<Criterion> {
            let direction = if rng.gen_bool(0.5) {
                Direction::Maximize
            } else {
                Direction::Minimize
            };
            let weight = Weight::new(rng.gen_range(0.05..=1.0)).context("weight")?;
            Ok(Criterion::new(*attribute, weight, direction))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    tracing::debug!(?criteria, "generated criteria");

    let mut total_extraction_μs = 0;
    let mut total_frontier: usize = 0;
    let mut total_dominators: usize = 0;
    for _ in 0..args.rounds {
        let candidates: Vec<SyntheticCandidate> = (0..args.candidates)
            .map(|id| SyntheticCandidate {
                id,
                values: (0..args.criteria)
                    .map(|_| {
                        (!rng.gen_bool(args.missing_rate)).then(|| rng.gen_range(0.0..1000.0))
                    })
                    .collect(),
            })
            .collect();

        let t0 = Instant::now();
        let frontier = extract_frontier(&candidates, &criteria);
        total_extraction_μs += Instant::now().duration_since(t0).as_micros();

        if frontier.total_count() != candidates.len() {
            bail!("frontier lost candidates");
        }
        total_frontier += frontier.frontier.len();
        total_dominators += frontier
            .dominated
            .iter()
            .map(|entry| entry.dominated_by.len())
            .sum::<usize>();
    }

    let rounds = args.rounds.max(1) as f64;
    println!("avg_extraction_μs: {}", total_extraction_μs as f64 / rounds);
    println!("avg_frontier_size: {:.2}", total_frontier as f64 / rounds);
    println!(
        "frontier_share: {:.4}",
        total_frontier as f64 / (rounds * args.candidates.max(1) as f64)
    );
    println!(
        "avg_dominators: {:.2}",
        total_dominators as f64 / (rounds * args.candidates.max(1) as f64)
    );
    Ok(())
}
