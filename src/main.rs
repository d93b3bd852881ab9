//! computer-use - mouse, keyboard and screen control for agents
//!
//! Main entry point for the CLI application.

use clap::{Parser, Subcommand};
use computer_use::tools::computer::TOOL_NAME;
use computer_use::{Config, Server, ToolRegistry};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Mouse, keyboard and screen control for agents
#[derive(Parser, Debug)]
#[command(name = "computer-use")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Screen width in pixels (overrides WIDTH)
    #[arg(long, global = true)]
    width: Option<u32>,

    /// Screen height in pixels (overrides HEIGHT)
    #[arg(long, global = true)]
    height: Option<u32>,

    /// X display number (overrides DISPLAY_NUM)
    #[arg(long, global = true)]
    display_num: Option<u32>,

    /// Directory screenshots are written to
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Report coordinates and screenshots in screen space
    #[arg(long, global = true)]
    no_scaling: bool,

    /// Enable debug output
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the tool descriptor advertised to the agent
    Describe,

    /// Run a single action and print the result
    Run {
        /// Action name, e.g. screenshot or mouse_move
        #[arg(long, short = 'a')]
        action: String,

        /// Text for key and type
        #[arg(long, short = 't')]
        text: Option<String>,

        /// Coordinate as X,Y in API space
        #[arg(long, short = 'c', allow_hyphen_values = true)]
        coordinate: Option<String>,
    },

    /// Serve JSON action requests line by line on stdin
    Serve,
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Build configuration with CLI overrides applied last
fn build_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = Config::load_layered()?;

    if let Some(width) = args.width {
        config.display.width = width;
    }
    if let Some(height) = args.height {
        config.display.height = height;
    }
    if let Some(display_num) = args.display_num {
        config.display.display_num = Some(display_num);
    }
    if let Some(ref dir) = args.output_dir {
        config.tool.output_dir = dir.clone();
    }
    if args.no_scaling {
        config.tool.scaling_enabled = false;
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let config = build_config(&args)?;
    let registry = ToolRegistry::with_computer(&config)?;

    match args.command {
        Command::Describe => {
            println!("{}", serde_json::to_string_pretty(&registry.all_params())?);
        }
        Command::Run {
            action,
            text,
            coordinate,
        } => {
            let mut input = serde_json::json!({ "action": action });
            if let Some(text) = text {
                input["text"] = serde_json::Value::String(text);
            }
            if let Some(coordinate) = coordinate {
                input["coordinate"] = serde_json::from_str(&format!("[{}]", coordinate))
                    .map_err(|e| anyhow::anyhow!("Invalid coordinate {:?}: {}", coordinate, e))?;
            }

            let result = registry.run(TOOL_NAME, input).await?;
            println!("{}", serde_json::to_string(&result)?);
            if result.is_error() {
                std::process::exit(1);
            }
        }
        Command::Serve => {
            Server::new(registry).run().await?;
        }
    }

    Ok(())
}
