//! `search-arena`: run pathfinding algorithms on a key maze, or compare
//! minimax with alpha-beta on a Connect-Four position.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;

use search_arena::adversarial::{
    alphabeta_search, minimax_search, EvaluatorKind, PerformanceTracker, SearchStats,
};
use search_arena::config::AppConfig;
use search_arena::game::{random_opening, Board, GameComplexity};
use search_arena::maze::{KeyMaze, Pos};
use search_arena::search::{Algorithm, ResultSummary};

#[derive(Parser)]
#[command(name = "search-arena", about = "Compare state-space search algorithms")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "search-arena.toml", global = true)]
    config: PathBuf,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run pathfinding algorithms on a maze
    Maze {
        /// ASCII maze file (`#` wall, `.` open, `S` start, `G` goal, `K` key)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Side of the built-in open maze used when no file is given
        #[arg(long, default_value_t = 10)]
        size: usize,

        /// Comma-separated algorithm keys, e.g. bfs,astar_manhattan,minmax
        #[arg(long, value_delimiter = ',')]
        algorithms: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare minimax and alpha-beta on one position
    Connect {
        /// Comma-separated columns played so far, first player first
        #[arg(long, value_delimiter = ',')]
        moves: Vec<usize>,

        /// Play this many random plies instead of using --moves
        #[arg(long)]
        random_plies: Option<usize>,

        /// Seed for --random-plies
        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long, default_value_t = 6)]
        rows: usize,

        #[arg(long, default_value_t = 7)]
        cols: usize,

        /// Override the configured search depth
        #[arg(long)]
        depth: Option<usize>,

        /// Override the configured evaluator: threats or windows
        #[arg(long)]
        evaluator: Option<EvaluatorKind>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the default configuration as TOML
    DefaultConfig,
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn load_config(path: &Path) -> Result<AppConfig> {
    AppConfig::load_or_default(path)
        .with_context(|| format!("loading config from {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.command {
        Command::DefaultConfig => {
            print!("{}", AppConfig::default_toml());
            Ok(())
        }
        Command::Maze {
            file,
            size,
            algorithms,
            json,
        } => {
            let config = load_config(&cli.config)?;
            run_maze(&config, file, size, &algorithms, json)
        }
        Command::Connect {
            moves,
            random_plies,
            seed,
            rows,
            cols,
            depth,
            evaluator,
            json,
        } => {
            let mut config = load_config(&cli.config)?;
            if let Some(depth) = depth {
                config.adversarial.max_depth = depth;
            }
            if let Some(evaluator) = evaluator {
                config.adversarial.evaluator = evaluator;
            }
            config.validate().context("invalid search settings")?;

            let board = match random_plies {
                Some(plies) => {
                    let mut board = Board::with_size(rows, cols);
                    random_opening(&mut board, plies, &mut StdRng::seed_from_u64(seed));
                    board
                }
                None => Board::from_moves(rows, cols, &moves)
                    .with_context(|| format!("replaying moves {moves:?}"))?,
            };
            run_connect(&config, board, json)
        }
    }
}

#[derive(Serialize)]
struct MazeRow {
    algorithm: String,
    name: String,
    #[serde(flatten)]
    summary: ResultSummary,
}

fn run_maze(
    config: &AppConfig,
    file: Option<PathBuf>,
    size: usize,
    keys: &[String],
    json: bool,
) -> Result<()> {
    let maze = match file {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading maze {}", path.display()))?;
            text.parse::<KeyMaze>()
                .with_context(|| format!("parsing maze {}", path.display()))?
        }
        None => {
            if size < 2 {
                bail!("built-in maze size must be at least 2, got {size}");
            }
            let middle = size / 2;
            KeyMaze::open(
                size,
                size,
                Pos::new(0, 0),
                Pos::new(size - 1, size - 1),
                Pos::new(middle, middle),
            )?
        }
    };

    let algorithms = if keys.is_empty() {
        Algorithm::default_suite()
    } else {
        keys.iter()
            .map(|key| key.parse::<Algorithm>())
            .collect::<Result<Vec<_>, _>>()?
    };

    let info = maze.info();
    info!(
        rows = info.rows,
        cols = info.cols,
        walls = info.wall_count,
        algorithms = algorithms.len(),
        "running maze comparison"
    );

    let mut rows = Vec::with_capacity(algorithms.len());
    for algorithm in algorithms {
        let result = algorithm
            .run(&maze, config)
            .with_context(|| format!("running {}", algorithm.key()))?;
        rows.push(MazeRow {
            algorithm: algorithm.key(),
            name: algorithm.display_name(),
            summary: result.summary(),
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{}x{} maze, {} walls ({:.1}% density)",
        info.rows,
        info.cols,
        info.wall_count,
        info.wall_density * 100.0
    );
    println!(
        "{:<20} {:>7} {:>6} {:>8} {:>10} {:>10} {:>10} {:>9}",
        "algorithm", "success", "length", "cost", "expanded", "generated", "time (ms)", "mem (MB)"
    );
    for row in &rows {
        let s = &row.summary;
        println!(
            "{:<20} {:>7} {:>6} {:>8.1} {:>10} {:>10} {:>10.3} {:>9.3}",
            row.name,
            s.success,
            s.path_length,
            s.path_cost,
            s.nodes_expanded,
            s.nodes_generated,
            s.runtime * 1000.0,
            s.memory_peak
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct ConnectReport {
    moves_played: usize,
    depth: usize,
    evaluator: EvaluatorKind,
    complexity: GameComplexity,
    minimax: SearchStats<usize>,
    alphabeta: SearchStats<usize>,
}

fn run_connect(config: &AppConfig, mut board: Board, json: bool) -> Result<()> {
    let depth = config.adversarial.max_depth;
    let evaluator = config.adversarial.evaluator;

    let (mm_move, mm) = minimax_search(&mut board, depth, &evaluator);
    let (ab_move, ab) = alphabeta_search(&mut board, depth, &evaluator);
    if mm_move != ab_move {
        bail!("minimax chose {mm_move:?} but alpha-beta chose {ab_move:?}");
    }

    if json {
        let report = ConnectReport {
            moves_played: board.move_count(),
            depth,
            evaluator,
            complexity: board.complexity_estimate(),
            minimax: mm.stats(),
            alphabeta: ab.stats(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let complexity = board.complexity_estimate();
    println!("{board}");
    println!();
    println!(
        "branching factor {}, at most {} plies, <= {:.3e} configurations",
        complexity.branching_factor, complexity.maximum_depth, complexity.state_space_upper_bound
    );
    println!(
        "{} to move, depth {depth}, evaluator {evaluator}",
        board.current_player().name()
    );
    match mm_move {
        Some(col) => println!("best column: {col}"),
        None => println!("no move: the game is over"),
    }
    print_tracker("minimax", &mm);
    print_tracker("alpha-beta", &ab);
    Ok(())
}

fn print_tracker(label: &str, tracker: &PerformanceTracker<usize>) {
    println!(
        "{label:<10} expanded {:>9}  pruned {:>7}  max depth {}  {:.3} ms",
        tracker.nodes_expanded(),
        tracker.nodes_pruned(),
        tracker.max_depth_reached(),
        tracker.elapsed_time() * 1000.0
    );
}
