use collective_astar::algorithm::{calculate_cost, AStar};
use collective_astar::common::{CollectiveState, FloatHandler, IntegerHandler, NumberHandler, Path};
use collective_astar::config::{Cli, Config, DistanceKind};
use collective_astar::grid::CollectiveGridSpace;
use collective_astar::map::load_map;
use collective_astar::scenario::Scenario;
use collective_astar::space::{HeuristicSpace, InputPlan};

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct Report<'a, N> {
    path: &'a Path<CollectiveState>,
    cost: N,
    states_visited: usize,
    max_open_set_size: usize,
    cache_hits: usize,
    cache_misses: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let config = if let Some(config_file) = cli.config.as_ref() {
        let config_str = std::fs::read_to_string(config_file)
            .with_context(|| format!("failed to read config file: {config_file}"))?;
        Config::from_yaml_str(&config_str)
            .with_context(|| format!("error with config file: {config_file}"))?
    } else {
        info!("No config file specified, using default config");
        Config::default()
    }
    .override_from_command_line(&cli)?;
    config.validate()?;

    let grid = load_map(&config.map_path)?;
    debug!("map {}x{}:\n{grid}", grid.rows(), grid.cols());
    let scenario = if config.starts.is_empty() {
        let mut rng = StdRng::seed_from_u64(config.seed);
        Scenario::generate_randomly(&grid, config.num_agents, &mut rng)?
    } else {
        Scenario::new(config.starts.clone(), config.goals.clone())?
    };

    let space = CollectiveGridSpace::new(grid, config.neighborhood);
    let start = space
        .collective_state(&scenario.starts)
        .context("invalid start state")?;
    let goal = space
        .collective_state(&scenario.goals)
        .context("invalid goal state")?;
    let plan = InputPlan::new(&space, start, goal)?;

    match config.distance {
        DistanceKind::Float => solve::<FloatHandler>(&config, &plan),
        DistanceKind::Integer => solve::<IntegerHandler>(&config, &plan),
    }
}

fn solve<H>(config: &Config, plan: &InputPlan<'_, CollectiveGridSpace>) -> anyhow::Result<()>
where
    H: NumberHandler,
    H::Number: Serialize,
    CollectiveGridSpace: HeuristicSpace<H::Number>,
{
    let mut astar = AStar::<H>::new();
    if let Some(limit) = config.max_expansions {
        astar = astar.with_expansion_limit(limit);
    }

    let Some(path) = astar.calculate_path(plan) else {
        warn!("no path between {:?} and {:?}", plan.start, plan.goal);
        return Ok(());
    };

    let cost = calculate_cost::<H, _>(&path, plan.state_space);
    let stats = astar.stats();
    let (cache_hits, cache_misses) = plan.state_space.cache_stats();
    let report = Report {
        path: &path,
        cost,
        states_visited: stats.states_visited,
        max_open_set_size: stats.max_open_set_size,
        cache_hits,
        cache_misses,
    };

    let output = serde_json::to_string_pretty(&report)?;
    match &config.output_path {
        Some(output_path) => {
            std::fs::write(output_path, output)
                .with_context(|| format!("failed to write output file: {output_path}"))?;
            info!("path written to {output_path}");
        }
        None => println!("{output}"),
    }
    Ok(())
}
