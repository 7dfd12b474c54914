use anyhow::{ensure, Context, Result};
use clap::Parser;
use serde::Deserialize;

use crate::common::{CollectiveState, Position};
use crate::grid::Neighborhood;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DistanceKind {
    #[default]
    Float,
    Integer,
}

#[derive(Parser, Debug)]
#[command(
    name = "collective-astar",
    about = "Shortest synchronized paths for entities moving jointly on a grid.",
    version = "0.1"
)]
pub struct Cli {
    #[arg(long, help = "Path to a YAML config file")]
    pub config: Option<String>,

    #[arg(long, help = "Path to the map file")]
    pub map_path: Option<String>,

    #[arg(
        long,
        help = "Start cells as row,col pairs, e.g. 0,0,2,2",
        value_delimiter = ','
    )]
    pub starts: Vec<usize>,

    #[arg(
        long,
        help = "Goal cells as row,col pairs, e.g. 2,2,0,0",
        value_delimiter = ','
    )]
    pub goals: Vec<usize>,

    #[arg(long, help = "Number of random agents when no starts are given")]
    pub num_agents: Option<usize>,

    #[arg(long, help = "Seed for the random number generator")]
    pub seed: Option<u64>,

    #[arg(long, value_enum, help = "Cell adjacency")]
    pub neighborhood: Option<Neighborhood>,

    #[arg(long, value_enum, help = "Distance arithmetic")]
    pub distance: Option<DistanceKind>,

    #[arg(long, help = "Give up after this many expanded states")]
    pub max_expansions: Option<usize>,

    #[arg(long, help = "Write the path as JSON to this file")]
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub map_path: String,
    pub starts: Vec<Position>,
    pub goals: Vec<Position>,
    pub num_agents: usize,
    pub seed: u64,
    pub neighborhood: Neighborhood,
    pub distance: DistanceKind,
    pub max_expansions: Option<usize>,
    pub output_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            map_path: "map_file/test/test.map".to_string(),
            starts: Vec::new(),
            goals: Vec::new(),
            num_agents: 2,
            seed: 0,
            neighborhood: Neighborhood::default(),
            distance: DistanceKind::default(),
            max_expansions: None,
            output_path: None,
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("invalid config yaml")
    }

    pub fn override_from_command_line(mut self, cli: &Cli) -> Result<Self> {
        if let Some(map_path) = &cli.map_path {
            self.map_path = map_path.clone();
        }
        if !cli.starts.is_empty() {
            self.starts = positions_from_coordinates(&cli.starts).context("invalid --starts")?;
        }
        if !cli.goals.is_empty() {
            self.goals = positions_from_coordinates(&cli.goals).context("invalid --goals")?;
        }
        if let Some(num_agents) = cli.num_agents {
            self.num_agents = num_agents;
        }
        if let Some(seed) = cli.seed {
            self.seed = seed;
        }
        if let Some(neighborhood) = cli.neighborhood {
            self.neighborhood = neighborhood;
        }
        if let Some(distance) = cli.distance {
            self.distance = distance;
        }
        if cli.max_expansions.is_some() {
            self.max_expansions = cli.max_expansions;
        }
        if cli.output_path.is_some() {
            self.output_path = cli.output_path.clone();
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(!self.map_path.is_empty(), "map path must not be empty");
        ensure!(
            self.starts.len() == self.goals.len(),
            "got {} starts but {} goals",
            self.starts.len(),
            self.goals.len()
        );
        ensure!(
            !self.starts.is_empty() || self.num_agents > 0,
            "either starts/goals or a positive number of agents is required"
        );
        if let Some(max_expansions) = self.max_expansions {
            ensure!(max_expansions > 0, "max expansions must be positive");
        }
        Ok(())
    }
}

fn positions_from_coordinates(coordinates: &[usize]) -> Result<Vec<Position>> {
    Ok(CollectiveState::from_coordinates(coordinates)?
        .positions()
        .to_vec())
}
