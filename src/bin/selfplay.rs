// Standalone selfplay tool: lets the engine play full games against random spawns
//
// Usage:
//   cargo run --release --bin selfplay -- [options]
//
// Options:
//   --games <n>        Number of games to play (default: 1)
//   --seed <s>         Seed of the first game; game i uses seed + i (default: 0)
//   --depth <d>        Override search.search_depth
//   --config <path>    Path to Engine.toml (default: Engine.toml)

use log::info;
use std::env;
use std::process;
use std::time::Instant;

use capped_2048_ai::config::Config;
use capped_2048_ai::engine::Engine;
use capped_2048_ai::game::Game;

struct Options {
    games: u32,
    seed: u64,
    depth: Option<u8>,
    config_path: String,
}

fn print_usage() {
    eprintln!("2048 Selfplay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  selfplay [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --games <n>         Number of games to play (default: 1)");
    eprintln!("  --seed <s>          Seed of the first game (default: 0)");
    eprintln!("  --depth <d>         Override the configured search depth");
    eprintln!("  --config <path>     Path to Engine.toml (default: Engine.toml)");
    eprintln!("  --help              Show this help message");
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, String> {
    let raw = value.ok_or_else(|| format!("{} requires an argument", flag))?;
    raw.parse::<T>()
        .map_err(|_| format!("Invalid value '{}' for {}", raw, flag))
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        games: 1,
        seed: 0,
        depth: None,
        config_path: "Engine.toml".to_string(),
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                options.games = parse_value("--games", args.get(i + 1))?;
                i += 1;
            }
            "--seed" => {
                options.seed = parse_value("--seed", args.get(i + 1))?;
                i += 1;
            }
            "--depth" => {
                options.depth = Some(parse_value("--depth", args.get(i + 1))?);
                i += 1;
            }
            "--config" => {
                options.config_path = parse_value("--config", args.get(i + 1))?;
                i += 1;
            }
            other => return Err(format!("Unknown option '{}'", other)),
        }
        i += 1;
    }

    Ok(options)
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "warn");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.contains(&"--help".to_string()) {
        print_usage();
        process::exit(0);
    }

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            process::exit(1);
        }
    };

    let mut config = match Config::from_file(&options.config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    if let Some(depth) = options.depth {
        config = config.with_search_depth(depth);
        if let Err(e) = config.validate() {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }

    let engine = Engine::new(config.clone());
    let mut max_tiles = Vec::with_capacity(options.games as usize);
    let start_time = Instant::now();

    for game_index in 0..options.games {
        let seed = options.seed + game_index as u64;
        let mut game = Game::new(&config, seed);

        while !game.is_over() {
            match engine.choose_move(game.board()) {
                Some(direction) => game.step(direction),
                None => break,
            };
        }

        info!("Game {} final board:\n{}", game_index, game.board());
        println!(
            "game {:>3}  seed {:>6}  moves {:>5}  max tile {:>5}  tile sum {:>6}",
            game_index,
            seed,
            game.moves(),
            game.board().max_tile(),
            game.board().tile_sum()
        );
        max_tiles.push(game.board().max_tile());
    }

    if max_tiles.is_empty() {
        return;
    }

    let reached_cap = max_tiles
        .iter()
        .filter(|&&tile| tile >= config.search.merge_cap)
        .count();
    println!();
    println!("Games played:        {}", max_tiles.len());
    println!(
        "Reached merge cap:   {} ({:.1}%)",
        reached_cap,
        reached_cap as f64 * 100.0 / max_tiles.len() as f64
    );
    println!(
        "Best max tile:       {}",
        max_tiles.iter().max().copied().unwrap_or(0)
    );
    println!("Total time:          {:.1}s", start_time.elapsed().as_secs_f64());
}
