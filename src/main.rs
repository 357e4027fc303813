use clap::{Parser, Subcommand};
use seed_nav::browser::{run_bridge, run_navigation};
use seed_nav::core::action::Action;
use seed_nav::core::config::{self, ResolvedConfig};
use seed_nav::{MemoryHost, Navigator, Route, RoutingMode, path_to_route, route_to_href};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "seed-nav", about = "Route parsing and history navigation for seed browsers")]
struct Args {
    /// Use fragment routing (`/#/seeds/...`) instead of path routing
    #[arg(long, global = true)]
    hash: bool,

    /// Log at debug level regardless of config
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write logs here instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Config file to use instead of ~/.seed-nav/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the route a URL resolves to
    Parse { url: String },
    /// Print the link for a route given as JSON
    Serialize { json: String },
    /// Open the first URL, then follow each next URL; `back` goes back
    Replay {
        #[arg(required = true)]
        steps: Vec<String>,
    },
    /// Print the JSON Schema of the route stored on history entries
    Schema,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match &args.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config()?,
    };
    let cli_mode = args.hash.then_some(RoutingMode::Hash);
    let config = config::resolve(&file_config, cli_mode);

    init_logging(&config.log_level, args.verbose, args.log_file.as_deref());
    log::info!("seed-nav starting in {:?} routing mode", config.mode);

    match args.command {
        Command::Parse { url } => {
            let route = path_to_route(&url, config.mode).unwrap_or_else(|| Route::not_found(url));
            println!("{}", serde_json::to_string_pretty(&route)?);
        }
        Command::Serialize { json } => {
            let route: Route = serde_json::from_str(&json)?;
            println!("{}", route_to_href(&route, config.mode));
        }
        Command::Replay { steps } => replay(&config, &steps).await?,
        Command::Schema => {
            let schema = schemars::schema_for!(Route);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }
    Ok(())
}

fn init_logging(level: &str, verbose: bool, log_file: Option<&Path>) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        level.parse().unwrap_or(LevelFilter::Info)
    };
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    match log_file {
        Some(path) => match File::create(path) {
            Ok(file) => {
                let _ = WriteLogger::init(level, log_config, file);
            }
            Err(e) => eprintln!("Cannot open log file {}: {}", path.display(), e),
        },
        None => {
            let _ = WriteLogger::init(level, log_config, std::io::stderr());
        }
    }
}

async fn replay(config: &ResolvedConfig, steps: &[String]) -> Result<(), Box<dyn Error>> {
    let Some((first, rest)) = steps.split_first() else {
        return Err("replay needs a starting URL".into());
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    let host = MemoryHost::with_origin(&config.origin, first).with_signals(tx);
    let mut nav = Navigator::new(host, config);
    nav.initialize()?;

    let (action_tx, mut actions) = mpsc::unbounded_channel();
    for step in rest {
        let action = if step == "back" {
            Action::Pop
        } else {
            let route = path_to_route(step, nav.mode()).unwrap_or_else(|| Route::not_found(step));
            Action::Push(route)
        };
        action_tx.send(action)?;
    }
    drop(action_tx);

    let mut handled = run_navigation(&mut nav, &mut rx, &mut actions).await;
    // Close the feed so the bridge stops after the remaining popstates.
    drop(nav.host_mut().take_signals());
    handled += run_bridge(&mut nav, &mut rx).await;
    log::debug!("Replay handled {} actions and browser signals", handled);

    let stack: Vec<String> = nav
        .history()
        .entries()
        .map(|route| route_to_href(route, nav.mode()))
        .collect();
    let browser: Vec<&str> = nav
        .host()
        .entries()
        .iter()
        .map(|entry| entry.url.as_str())
        .collect();
    let report = serde_json::json!({
        "active": nav.active_route(),
        "stack": stack,
        "browser": browser,
        "cursor": nav.host().cursor(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
