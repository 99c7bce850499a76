use anyhow::Context;
use clap::{Parser, Subcommand};
use echoblocks::blocks::{Block, EchoBlock, Page};
use echoblocks::config::{Config, OutputFormat};
use echoblocks::render::terminal::TerminalPreview;
use echoblocks::{Phase, schema};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Render and preview echo and hero content blocks.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The path to the configuration file.
    #[arg(short, long, env = "ECHOBLOCKS_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log more, repeat for even more.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render every block in a page.
    Render {
        /// The page to render.
        page: PathBuf,

        /// The output format.
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// The animation phase to render at, in [0, 1).
        #[arg(short, long)]
        phase: Option<f64>,
    },

    /// Preview a page in the terminal.
    Preview {
        /// The page to preview.
        page: PathBuf,

        /// Stop after this many milliseconds.
        #[arg(short, long)]
        duration_ms: Option<u64>,

        /// Print the page once instead of animating it.
        #[arg(long = "static")]
        print_static: bool,
    },

    /// Render a single echo block.
    Echo {
        /// The text to echo.
        #[arg(short, long)]
        text: Option<String>,

        /// How many times to repeat it.
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        count: Option<i64>,

        /// The color palette.
        #[arg(short, long)]
        mood: Option<String>,

        /// The animation phase to render at, in [0, 1).
        #[arg(short, long)]
        phase: Option<f64>,

        /// The output format.
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Print the CMS block templates as JSON.
    Schema {
        /// Only print the template with this name.
        #[arg(short, long)]
        block: Option<String>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(false).init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::discover(cli.config.as_deref())?;
    match cli.command {
        Command::Render { page, format, phase } => {
            let page = Page::load(&page)?;
            let phase = Phase::new(phase.unwrap_or(config.render.phase));
            let output = echoblocks::render::render_page(&page, phase, format.unwrap_or(config.render.format))?;
            print!("{output}");
        }
        Command::Preview { page, duration_ms, print_static } => {
            let page = Page::load(&page)?;
            let mut preview_config = config.preview;
            if let Some(duration) = duration_ms {
                preview_config.duration_millis = duration;
            }
            let mut preview = TerminalPreview::new(page, preview_config);
            let mut stdout = io::stdout();
            if print_static {
                preview.print_static(&mut stdout)?;
            } else {
                preview.run(&mut stdout).context("running preview")?;
            }
        }
        Command::Echo { text, count, mood, phase, format } => {
            let block = EchoBlock { text, count, mood, background: None };
            let page = Page { title: None, blocks: vec![Block::Echo(block)] };
            let phase = Phase::new(phase.unwrap_or(config.render.phase));
            let output = echoblocks::render::render_page(&page, phase, format.unwrap_or(config.render.format))?;
            print!("{output}");
        }
        Command::Schema { block } => {
            let templates = schema::all_templates();
            let output = match block {
                Some(name) => {
                    let template = templates
                        .into_iter()
                        .find(|template| template.name == name)
                        .with_context(|| format!("no block template named '{name}'"))?;
                    serde_json::to_string_pretty(&template)?
                }
                None => serde_json::to_string_pretty(&templates)?,
            };
            println!("{output}");
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
