use crate::config::PartitionSettings;
use crate::graph::ParallelEdgePolicy;
use crate::rollup::CentralityAggregation;
use crate::seeding::SeedStrategy;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "partmap")]
#[command(
    about = "Partition a monolith's dependency graph into candidate microservices",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Partition a system dependency graph with weighted label propagation
    Partition(PartitionArgs),

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct PartitionArgs {
    /// Path to the system dependency graph JSON
    #[arg(short = 'i', long = "app-dependency-graph")]
    pub app_dependency_graph: PathBuf,

    /// The maximum number of partitions
    #[arg(short = 'k', long = "max-partitions", allow_negative_numbers = true)]
    pub max_partitions: Option<i64>,

    /// Initial labelling strategy
    #[arg(long, value_enum)]
    pub strategy: Option<SeedStrategy>,

    /// Path to a class-to-partition seed JSON file (implies --strategy file)
    #[arg(short = 's', long = "seed-partitions")]
    pub seed_partitions: Option<PathBuf>,

    /// Seed for the random number generator
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop propagation after this many passes
    #[arg(long = "max-passes")]
    pub max_passes: Option<usize>,

    /// How parallel edges between two nodes weigh a vote
    #[arg(long = "parallel-edges", value_enum)]
    pub parallel_edges: Option<ParallelEdgePolicy>,

    /// Directory to write partitions.json into
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Skip writing the class-level view
    #[arg(long = "no-class-view")]
    pub no_class_view: bool,

    /// How member centralities combine in the class-level view
    #[arg(long = "class-centrality", value_enum)]
    pub class_centrality: Option<CentralityAggregation>,

    /// Print a partition summary to stdout
    #[arg(long)]
    pub summary: bool,

    /// Configuration file (defaults to a discovered .partmap.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl PartitionArgs {
    /// Layer command-line flags over settings from the configuration file
    pub fn apply_to(&self, base: PartitionSettings) -> PartitionSettings {
        let strategy = match (self.strategy, &self.seed_partitions) {
            (Some(strategy), _) => strategy,
            (None, Some(_)) => SeedStrategy::File,
            (None, None) => base.strategy,
        };

        PartitionSettings {
            max_partitions: self.max_partitions.unwrap_or(base.max_partitions),
            strategy,
            seed: self.seed.unwrap_or(base.seed),
            max_passes: self.max_passes.unwrap_or(base.max_passes),
            parallel_edges: self.parallel_edges.unwrap_or(base.parallel_edges),
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
