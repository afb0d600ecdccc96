//! CLI entry point for versecraft
//!
//! Plays a content directory in the terminal.

use std::path::PathBuf;
use std::process;
use versecraft::application::App;
use versecraft::config::AppConfig;

struct PlayArgs {
    content_dir: PathBuf,
    screen: Option<String>,
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = &args[1];

    match command.as_str() {
        "play" => match parse_play_args(&args[2..]) {
            Ok(play) => {
                if let Err(err) = run_play(play).await {
                    eprintln!("Error: Player mode failed");
                    eprintln!("Reason: {:#}", err);
                    process::exit(1);
                }
            }
            Err(message) => {
                eprintln!("Error: {}", message);
                eprintln!();
                print_usage();
                process::exit(1);
            }
        },
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Error: Unknown command '{}'", command);
            eprintln!();
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    println!("versecraft - Screen navigation and branching story player");
    println!();
    println!("USAGE:");
    println!("    versecraft play <content-dir> [--screen <id>] [--config <file>]");
    println!();
    println!("COMMANDS:");
    println!("    play <dir>    Play a content directory in the terminal");
    println!("    --help, -h    Show this help message");
    println!();
    println!("OPTIONS:");
    println!("    --screen <id>     Start on this screen instead of the registry's start screen");
    println!("    --config <file>   JSON configuration file");
    println!();
    println!("ENVIRONMENT:");
    println!("    VERSECRAFT_CONTENT_ROOT   Overrides the content directory");
    println!("    RUST_LOG                  Log filter (default: info)");
}

fn parse_play_args(args: &[String]) -> Result<PlayArgs, String> {
    let mut content_dir = None;
    let mut screen = None;
    let mut config = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--screen" => {
                screen = Some(iter.next().ok_or("--screen needs a screen id")?.clone());
            }
            "--config" => {
                config = Some(PathBuf::from(iter.next().ok_or("--config needs a file")?));
            }
            other if other.starts_with("--") => {
                return Err(format!("Unknown option '{}'", other));
            }
            other => {
                if content_dir.is_some() {
                    return Err(format!("Unexpected argument '{}'", other));
                }
                content_dir = Some(PathBuf::from(other));
            }
        }
    }

    Ok(PlayArgs {
        content_dir: content_dir.ok_or("Missing content directory")?,
        screen,
        config,
    })
}

async fn run_play(args: PlayArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    config.content.root = args.content_dir;
    let config = config.with_env();

    let app = App::from_config(&config);
    app.boot(args.screen.as_deref()).await?;
    versecraft::cli::play::run_play(&app).await
}
