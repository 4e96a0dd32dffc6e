use anyhow::Result;
use clap::Parser;
use gamesearch::board::GameKind;
use gamesearch::search::{Location, Move, SearchOptions, Searcher, StrategyKind};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "gamesearch-bench", version, about = "Compare search strategies on one position")]
struct Args {
    /// Game: tictactoe or gomoku
    #[arg(long, default_value = "gomoku")]
    game: String,

    /// Board size (gomoku only)
    #[arg(long, default_value_t = 9)]
    size: usize,

    /// Plies to look ahead
    #[arg(long, default_value_t = 3)]
    look_ahead: i32,

    /// Comma separated strategies (default: all)
    #[arg(long, value_delimiter = ',')]
    strategies: Vec<String>,

    /// Searches per strategy
    #[arg(long, default_value_t = 3)]
    repeat: usize,

    /// Opening stones as row,col pairs, alternating sides from player 1
    #[arg(long, value_delimiter = ';', default_value = "4,4;4,5;3,4")]
    opening: Vec<String>,

    /// Search with quiescence
    #[arg(long, default_value_t = false)]
    quiescence: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let kind: GameKind = args.game.parse()?;
    let strategies: Vec<StrategyKind> = if args.strategies.is_empty() {
        StrategyKind::ALL.to_vec()
    } else {
        args.strategies.iter().map(|s| s.parse::<StrategyKind>()).collect::<Result<Vec<_>, _>>()?
    };

    let mut game = kind.build(args.size)?;
    let mut last: Option<Move<Location>> = None;
    for text in &args.opening {
        let m = game.play(text.parse()?, last.as_ref())?;
        last = Some(m);
    }
    println!("{}", game);

    let pb = ProgressBar::new((strategies.len() * args.repeat) as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")?.progress_chars("##-"));

    let mut rows = Vec::new();
    for kind in &strategies {
        let mut opts = SearchOptions::new(*kind, args.look_ahead);
        opts.quiescence = args.quiescence;
        opts.validate()?;
        pb.set_message(kind.name());
        let mut total = 0u64;
        let mut best = None;
        let mut value = 0;
        let t0 = Instant::now();
        for _ in 0..args.repeat {
            // Fresh searcher each time so memory strategies start cold
            let mut searcher = Searcher::new(opts.clone());
            let r = searcher.search(&mut game, last.as_ref());
            total += r.moves_considered;
            best = r.best_move.map(|m| m.action);
            value = r.value;
            pb.inc(1);
        }
        let secs = t0.elapsed().as_secs_f64() / args.repeat.max(1) as f64;
        rows.push((*kind, best, value, total / args.repeat.max(1) as u64, secs));
    }
    pb.finish_and_clear();

    println!("{:<18} {:>8} {:>7} {:>10} {:>10}", "strategy", "best", "value", "moves", "seconds");
    for (kind, best, value, moves, secs) in rows {
        let best = best.map_or_else(|| "-".to_string(), |l| l.to_string());
        println!("{:<18} {:>8} {:>7} {:>10} {:>10.4}", kind.name(), best, value, moves, secs);
    }
    Ok(())
}
