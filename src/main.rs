//! Binary entrypoint for the terminal player.
//!
//! Commands:
//! - `play [WORLD] [--wait] [--timeout <s>] [--assets <dir>]` - load a world
//!   description and run the click loop
//! - `check [WORLD]` - load a world description, print a summary and any
//!   advisory warnings

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};

// Use the library crate modules instead of redefining them here.
use pnc_adventure::engine::{ItemMatch, Outcome, SceneSnapshot, find_item};
use pnc_adventure::world::{ActionKind, validate_world};
use pnc_adventure::{GameState, load_world_from_file};

#[derive(Parser)]
#[command(name = "pnc_adventure")]
#[command(about = "A point-and-click adventure player for generated worlds")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a generated world in the terminal
    Play {
        /// World description file produced by the generation pipeline
        #[arg(default_value = "game_data.json")]
        world: PathBuf,

        /// Wait for the description file to appear instead of failing
        #[arg(short, long)]
        wait: bool,

        /// Seconds to wait before giving up
        #[arg(short, long, default_value_t = 60)]
        timeout: u64,

        /// Directory holding the generated scene images
        #[arg(long, default_value = ".")]
        assets: PathBuf,
    },
    /// Load a world description and report whether it is playable
    Check {
        /// World description file to inspect
        #[arg(default_value = "game_data.json")]
        world: PathBuf,
    },
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Play {
            world,
            wait,
            timeout,
            assets,
        } => play(&world, wait, timeout, &assets),
        Commands::Check { world } => check(&world),
    }
}

fn play(path: &Path, wait: bool, timeout: u64, assets: &Path) -> io::Result<()> {
    if wait {
        wait_for_artifact(path, Duration::from_secs(timeout));
    }

    let world = match load_world_from_file(path) {
        Ok(w) => {
            println!("Using world file: {}", path.display());
            w
        }
        Err(e) => {
            eprintln!("Failed to load world file '{}': {e}", path.display());
            std::process::exit(1);
        }
    };

    let mut game = GameState::new(world);

    println!();
    println!("Actions: talk, use, look, pick up. Type an action to arm it,");
    println!("then an item name. 'hint' for a hint, 'look' to redraw, 'quit' to exit.\n");

    if let Some(snap) = game.snapshot() {
        render_scene(&snap, assets);
    }

    let stdin = io::stdin();
    let mut armed = ActionKind::Look;

    loop {
        print!("[{armed}] > ");
        io::stdout().flush()?;

        let mut input = String::new();
        let bytes_read = stdin.read_line(&mut input)?;
        if bytes_read == 0 {
            println!("\nGoodbye.");
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let lower = input.to_lowercase();

        if lower == "quit" || lower == "exit" {
            println!("Goodbye.");
            break;
        }

        if lower == "help" {
            print_help();
            continue;
        }

        if lower == "hint" {
            println!("{}", game.hint_line());
            continue;
        }

        // "look" alone arms the action and redraws the scene.
        if lower == "look" || lower == "l" {
            armed = ActionKind::Look;
            if let Some(snap) = game.snapshot() {
                render_scene(&snap, assets);
            }
            continue;
        }

        // Any other bare action word arms it for the next item.
        if let Ok(action) = lower.parse::<ActionKind>() {
            armed = action;
            println!("({armed} armed)");
            continue;
        }

        // "<action> <item>" in one line, else the armed action on the rest.
        let (action, target) = match split_action(&lower) {
            Some((action, rest)) => (action, rest),
            None => (armed, lower.as_str()),
        };

        let resolved: Option<String> = {
            let Some(scene) = game.world().scenes.get(game.current_scene()) else {
                eprintln!("Error: you are in an unknown scene '{}'", game.current_scene());
                break;
            };

            match find_item(scene, target) {
                ItemMatch::One(item) => Some(item.name.clone()),
                ItemMatch::Many(candidates) => {
                    let names: Vec<&str> =
                        candidates.iter().map(|i| i.name.as_str()).collect();
                    println!("Which one? ({})", names.join(", "));
                    None
                }
                // let the engine report the miss in-world
                ItemMatch::None => Some(target.to_string()),
            }
        };

        let Some(item_name) = resolved else {
            continue;
        };

        let outcome = game.apply_interaction(action, &item_name);
        println!("{}", outcome.line());

        if let Outcome::Entered { .. } = outcome {
            if let Some(snap) = game.snapshot() {
                render_scene(&snap, assets);
            }
        }
    }

    Ok(())
}

fn check(path: &Path) -> io::Result<()> {
    let world = match load_world_from_file(path) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Failed to load world file '{}': {e}", path.display());
            std::process::exit(1);
        }
    };

    let item_count: usize = world.scenes.values().map(|s| s.items.len()).sum();
    let passage_count: usize = world
        .scenes
        .values()
        .flat_map(|s| s.items.values())
        .filter(|i| i.leads_to.is_some())
        .count();
    let locked_count = world.scenes.values().filter(|s| s.locked).count();

    println!("World file: {}", path.display());
    println!("  scenes:  {} ({} locked)", world.scenes.len(), locked_count);
    println!("  items:   {item_count} ({passage_count} passages)");
    println!("  puzzles: {}", world.puzzles.len());
    println!("  start:   {}", world.start_scene);

    let warnings = validate_world(&world);
    if warnings.is_empty() {
        println!("No warnings.");
    } else {
        println!();
        for w in &warnings {
            println!("warning: {}", w.message);
        }
    }

    Ok(())
}

/// Poll for the description file; the generation pipeline writes it last.
fn wait_for_artifact(path: &Path, timeout: Duration) {
    if path.exists() {
        return;
    }

    println!("Waiting for '{}'...", path.display());
    let deadline = Instant::now() + timeout;

    while !path.exists() {
        if Instant::now() >= deadline {
            eprintln!(
                "Gave up waiting for '{}' after {} second(s).",
                path.display(),
                timeout.as_secs()
            );
            std::process::exit(1);
        }
        thread::sleep(Duration::from_millis(100));
    }
}

/// Split "<action> <item>" when the line starts with an action word
/// followed by a space. "pick up" is two words; labels never collide.
fn split_action(line: &str) -> Option<(ActionKind, &str)> {
    for action in ActionKind::ALL {
        let label = action.label();
        if let Some(rest) = line.strip_prefix(label) {
            if rest.starts_with(' ') {
                let rest = rest.trim_start();
                if !rest.is_empty() {
                    return Some((action, rest));
                }
            }
        }
    }
    None
}

fn render_scene(snap: &SceneSnapshot, assets: &Path) {
    println!("\n== {} ==", snap.scene);
    if !snap.description.trim().is_empty() {
        println!("{}", snap.description.trim());
    }

    let image_path = assets.join(&snap.image);
    if image_path.is_file() {
        println!("(backdrop: {})", image_path.display());
    } else {
        println!("(backdrop: {}, not found)", snap.image);
    }

    if snap.items.is_empty() {
        println!("Nothing here catches your eye.");
        return;
    }

    println!("You can see:");
    for item in &snap.items {
        let mut line = format!("  {}", item.name);
        if let Some(passage) = &item.passage {
            if passage.locked {
                line.push_str(&format!(" (a way to {}, locked)", passage.to));
            } else {
                line.push_str(&format!(" (a way to {})", passage.to));
            }
        }
        println!("{line}");
    }
}

fn print_help() {
    println!("Commands:");
    println!("  talk / use / look / pick up   arm an action for the next item");
    println!("  <action> <item>               apply an action in one line");
    println!("  <item>                        apply the armed action to an item");
    println!("  look (alone)                  also redraws the current scene");
    println!("  hint                          show the current scene's hint");
    println!("  quit                          leave the game");
}

fn init_logging(verbosity: u8) {
    // Default to warnings so the play screen stays clean.
    let base_level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(base_level).init();
}
