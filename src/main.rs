use anyhow::{Context, Result};
use clap::Parser;
use gamesearch::board::{ConnectGame, GameKind, GameResult};
use gamesearch::search::{
    search_root_parallel, Location, Move, SearchOptions, SearchResult, Searchable, Searcher, StrategyKind, TreeRecorder,
};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "gamesearch", version, about = "Computer-vs-computer game driven by the game-tree search engine")]
struct Args {
    /// Game to play: tictactoe or gomoku
    #[arg(long, default_value = "tictactoe")]
    game: String,

    /// Board size (gomoku only)
    #[arg(long, default_value_t = 9)]
    size: usize,

    /// JSON search options; command line flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Strategy for player 1
    #[arg(long)]
    strategy: Option<String>,

    /// Strategy for player 2 (defaults to player 1's)
    #[arg(long)]
    opponent: Option<String>,

    /// Plies to look ahead
    #[arg(long)]
    look_ahead: Option<i32>,

    /// Disable alpha-beta pruning
    #[arg(long, default_value_t = false)]
    no_alpha_beta: bool,

    /// Extend the search past the horizon while a line is threatened
    #[arg(long, default_value_t = false)]
    quiescence: bool,

    /// Split the root across threads (0 or 1 = sequential)
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Moves to play before stopping (0 = until the game ends)
    #[arg(long, default_value_t = 0)]
    max_moves: usize,

    /// Opening stones as row,col pairs, alternating sides from player 1
    #[arg(long, value_delimiter = ';')]
    opening: Vec<String>,

    /// Write the first search's tree as JSON
    #[arg(long)]
    dump_tree: Option<PathBuf>,
}

fn options_from(args: &Args) -> Result<SearchOptions> {
    let mut opts = match &args.config {
        Some(path) => SearchOptions::from_json_file(path)?,
        None => SearchOptions::default(),
    };
    if let Some(s) = &args.strategy { opts.strategy = s.parse()?; }
    if let Some(d) = args.look_ahead { opts.look_ahead = d; }
    if args.no_alpha_beta { opts.alpha_beta = false; }
    if args.quiescence { opts.quiescence = true; }
    opts.validate()?;
    Ok(opts)
}

fn describe(result: Option<GameResult>) -> &'static str {
    match result {
        Some(GameResult::Player1Wins) => "X wins",
        Some(GameResult::Player2Wins) => "O wins",
        Some(GameResult::Draw) => "draw",
        None => "unfinished",
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let kind: GameKind = args.game.parse()?;
    let p1_opts = options_from(&args)?;
    let mut p2_opts = p1_opts.clone();
    if let Some(s) = &args.opponent { p2_opts.strategy = s.parse::<StrategyKind>()?; }
    info!("{} with {} vs {} at look_ahead={}", kind, p1_opts.strategy, p2_opts.strategy, p1_opts.look_ahead);

    let mut game: ConnectGame = kind.build(args.size)?;
    let mut last: Option<Move<Location>> = None;
    for text in &args.opening {
        let loc: Location = text.parse()?;
        let m = game.play(loc, last.as_ref()).with_context(|| format!("opening stone {text}"))?;
        last = Some(m);
    }

    // Each side keeps its searcher, and so its transposition table, for the whole game
    let mut p1 = Searcher::new(p1_opts.clone());
    let mut p2 = Searcher::new(p2_opts.clone());
    let pool = if args.threads > 1 {
        Some(rayon::ThreadPoolBuilder::new().num_threads(args.threads).build()?)
    } else {
        None
    };
    let mut dump = args.dump_tree.clone();
    let mut played = 0usize;

    while !game.done(last.as_ref(), true) {
        if args.max_moves > 0 && played >= args.max_moves { break; }
        println!("\n{}", game);
        let p1_turn = last.as_ref().map_or(true, |m| !m.player1);
        let (searcher, opts) = if p1_turn { (&mut p1, &p1_opts) } else { (&mut p2, &p2_opts) };

        let t0 = Instant::now();
        let result: SearchResult<Location> = if let Some(path) = dump.take() {
            let mut recorder = TreeRecorder::new();
            let r = searcher.search_observed(&mut game, last.as_ref(), &mut recorder);
            std::fs::write(&path, recorder.to_json_pretty()?).with_context(|| format!("writing {}", path.display()))?;
            info!("wrote {} tree nodes to {}", recorder.len(), path.display());
            r
        } else if let Some(pool) = &pool {
            pool.install(|| search_root_parallel(&game, last.as_ref(), opts, None))
        } else {
            searcher.search(&mut game, last.as_ref())
        };
        let dt = t0.elapsed();

        let Some(best) = result.best_move else {
            println!("no move available");
            break;
        };
        println!(
            "{} plays {} value={} moves={} elapsed={:.3}s",
            if best.player1 { "X" } else { "O" },
            best.action,
            result.value,
            result.moves_considered,
            dt.as_secs_f64()
        );
        let m = game.play(best.action, last.as_ref())?;
        last = Some(m);
        played += 1;
    }

    println!("\n{}", game);
    println!("result: {}", describe(game.result()));
    Ok(())
}
