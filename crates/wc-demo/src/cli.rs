use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wc_widget::Preset;

use crate::error::{DemoError, Result};
use crate::page::{PageScript, render_report, run_page};

#[derive(Debug, Parser)]
#[command(
    name = "wc-demo",
    about = "Simulated host page for shadow widgets",
    version
)]
pub struct Cli {
    /// Log filter (e.g. `info`, `wc_widget=debug`). Overrides RUST_LOG.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Define, mount, and drive one widget instance.
    Run(RunArgs),

    /// Print built-in preset names, tags, and observed attributes.
    #[command(name = "list-presets")]
    ListPresets,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Built-in preset (`component` or `component-name`).
    #[arg(long, default_value = "component")]
    pub preset: Preset,

    /// JSON widget config; overrides --preset.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Observed attribute values to set after mounting, in order.
    #[arg(long = "set-attribute", value_name = "VALUE")]
    pub attributes: Vec<String>,

    /// Number of button clicks.
    #[arg(long, default_value_t = 1)]
    pub clicks: u32,

    /// Unmount and mount again, then click once more.
    #[arg(long)]
    pub remount: bool,

    /// Skip the final unmount.
    #[arg(long)]
    pub keep_mounted: bool,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

impl RunArgs {
    #[must_use]
    pub fn script(&self) -> PageScript {
        PageScript {
            preset: self.preset,
            config: self.config.clone(),
            attributes: self.attributes.clone(),
            clicks: self.clicks,
            remount: self.remount,
            keep_mounted: self.keep_mounted,
        }
    }
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run(args) => {
            let report = run_page(&args.script())?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_report(&report));
            }
            Ok(())
        }
        Commands::ListPresets => {
            for preset in Preset::ALL {
                println!(
                    "{:<16} <{}> observes \"{}\"",
                    preset.name(),
                    preset.tag_name(),
                    preset.observed_attribute()
                );
            }
            Ok(())
        }
    }
}

fn init_logging(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level)
            .map_err(|err| DemoError::invalid(format!("--log-level {level:?}: {err}")))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| DemoError::Logging {
            message: err.to_string(),
        })
}
