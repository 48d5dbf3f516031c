use clap::Parser;
use skychart_lib::{
    config::{ChartConfig, ConfigError, ConfigFile},
    pipeline::{Pipeline, RunOutcome},
    render::{ChartStyle, Listing, PngChart, Renderer, SkyChartWindow},
};
use std::{error::Error, path::PathBuf, process::ExitCode};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Plot the stars of a constellation from the stars catalog API
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Configuration toml file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Catalog API key.
    ///
    /// Read from the API_NINJAS_KEY environment variable, or the local .env
    /// file, when not provided.
    #[arg(long)]
    api_key: Option<String>,

    /// Constellation to query
    #[arg(short = 'n', long)]
    constellation: Option<String>,

    /// Catalog endpoint
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout, e.g. "30s". Waits indefinitely when not set.
    #[arg(long)]
    timeout: Option<String>,

    /// Write the chart to this PNG file instead of opening a window
    #[arg(short = 'o', long, conflicts_with = "dry_run")]
    output: Option<PathBuf>,

    /// Fetch and convert, then list the stars instead of drawing them
    #[arg(long)]
    dry_run: bool,
}

impl Opts {
    fn overrides(&self) -> ConfigFile {
        ConfigFile {
            api_key: self.api_key.clone(),
            constellation: self.constellation.clone(),
            base_url: self.base_url.clone(),
            timeout: self.timeout.clone(),
            ..Default::default()
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let opts = Opts::parse();

    let cfg = match ChartConfig::load(opts.config.as_ref(), opts.overrides()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{e}");
            eprintln!("Configuration error: {e}");
            let mut cause = e.source();
            while let Some(c) = cause {
                eprintln!("  caused by: {c}");
                cause = c.source();
            }
            return ExitCode::from(ConfigError::EXIT_CODE);
        }
    };
    debug!(
        base_url = cfg.base_url.as_str(),
        constellation = cfg.constellation.as_str(),
        timeout = ?cfg.timeout,
        "Configuration"
    );

    let pipeline = match Pipeline::from_config(&cfg) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(e.exit_code() as u8);
        }
    };

    let style = ChartStyle::with_title(cfg.title.as_str());
    let mut renderer: Box<dyn Renderer> = if opts.dry_run {
        Box::new(Listing::stdout())
    } else if let Some(path) = opts.output.as_ref() {
        Box::new(PngChart::new(path, style))
    } else {
        Box::new(SkyChartWindow::new(style))
    };

    match pipeline.run(renderer.as_mut()) {
        Ok(report) => {
            debug!(
                records = report.records,
                failures = report.failures.len(),
                outcome = ?report.outcome,
                "Run complete"
            );
            if let (RunOutcome::Plotted(n), Some(path)) = (report.outcome, opts.output.as_ref()) {
                println!("Wrote {n} stars to '{}'", path.display());
            }
            ExitCode::SUCCESS
        }
        // Already reported by the pipeline
        Err(e) => ExitCode::from(e.exit_code() as u8),
    }
}
