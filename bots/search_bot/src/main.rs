use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use jump61::{Board, SearchConfig, SearchResult, Searcher};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, trace};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Prints the move the computer would play in a given position.
#[derive(Parser)]
struct Args {
    /// Number of rows and columns of the board
    #[arg(short, long, default_value_t = 6)]
    size: usize,

    /// How many plies to search
    #[arg(short, long, default_value_t = 4)]
    depth: u32,

    /// Moves to play before searching, as space separated "row:col" pairs.
    /// The sides alternate, starting with red.
    #[arg(short, long, value_delimiter = ' ')]
    moves: Vec<Square>,

    /// Stop the search after visiting this many positions
    #[arg(long)]
    max_nodes: Option<u64>,

    /// Stop the search after this many milliseconds
    #[arg(long)]
    movetime_ms: Option<u64>,

    /// Play a uniformly random legal move instead of searching
    #[arg(long, default_value_t = false)]
    random: bool,

    /// RNG seed for --random
    #[arg(long)]
    seed: Option<u64>,

    /// Print the result as JSON instead of "row col"
    #[arg(long, default_value_t = false)]
    json: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

/// A 1-based row and column.
#[derive(Clone, Copy, Debug)]
struct Square {
    row: usize,
    col: usize,
}

impl FromStr for Square {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .split_once(':')
            .ok_or_else(|| anyhow::anyhow!("Expected \"row:col\", got '{}'", s))?;
        Ok(Square {
            row: row.trim().parse()?,
            col: col.trim().parse()?,
        })
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);

    if args.size < 2 {
        anyhow::bail!("The board needs at least 2 rows and columns, got {}", args.size);
    }
    let mut board = Board::new(args.size);
    board.set_notifier(|board: &Board| trace!("Board changed\n{}", board));
    for square in &args.moves {
        let side = board.whose_move();
        board.add_spot(side, square.row, square.col)?;
    }
    eprintln!("{}", board.to_display_string());

    if let Some(winner) = board.winner() {
        anyhow::bail!("The game is already won by {}", winner);
    }
    let side = board.whose_move();

    let result = if args.random {
        let seed = args.seed.unwrap_or_else(rand::random);
        info!(seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let moves: Vec<usize> = board.legal_moves(side).collect();
        let &best_move = moves
            .choose(&mut rng)
            .ok_or_else(|| anyhow::anyhow!("No legal move for {}", side))?;
        SearchResult {
            best_move,
            value: jump61::static_eval(&board),
            nodes: 0,
            complete: true,
        }
    } else {
        let config = SearchConfig {
            depth: args.depth,
            max_nodes: args.max_nodes,
            movetime: args.movetime_ms.map(Duration::from_millis),
        };
        debug!(?config, side = %side, "Searching");
        Searcher::new(config).choose_move(&board, side)?
    };

    if args.json {
        println!("{}", serde_json::to_string(&result)?);
    } else {
        println!("{}", board.move_string(result.best_move));
    }
    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
