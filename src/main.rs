mod app;
mod config;
mod error;
mod gui;
mod input;
mod portfolio;
mod report;
mod simulation;

use anyhow::Result;
use app::App;
use clap::{Parser, ValueEnum};
use config::AnalyzerConfig;
use error::AnalysisError;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, ValueEnum)]
enum GuiRendererChoice {
    Wgpu,
    Glow,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Portfolio Analyzer: expected return, risk and Sharpe ratio for a weighted basket",
    after_help = "EXAMPLES:
    # Launch the form
    cargo run --release

    # One-shot report on stdout
    cargo run --release -- --tickers AAPL,MSFT,GOOGL --weights 0.4,0.3,0.3 --returns 0.10,0.08,0.12

    # Same, as JSON
    cargo run --release -- --tickers AAPL,MSFT --weights 0.5,0.5 --returns 0.10,0.20 --json"
)]
struct Args {
    /// Comma-separated stock names (e.g., AAPL,MSFT,GOOGL)
    #[arg(long, requires_all = ["weights", "returns"])]
    tickers: Option<String>,

    /// Comma-separated weights, one per stock, summing to 1.0
    #[arg(long, requires_all = ["tickers", "returns"])]
    weights: Option<String>,

    /// Comma-separated expected annual returns, one per stock (e.g., 0.10,0.08)
    #[arg(long, requires_all = ["tickers", "weights"])]
    returns: Option<String>,

    /// Print the result as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Risk-free annual rate for the Sharpe ratio (default: 0.02)
    #[arg(long)]
    risk_free_rate: Option<f64>,

    /// Launch the desktop form even if input flags are given
    #[arg(long)]
    gui: bool,

    /// GUI renderer backend (wgpu|glow). Useful for RDP compatibility.
    #[arg(long, value_enum, default_value_t = GuiRendererChoice::Wgpu)]
    gui_renderer: GuiRendererChoice,

    /// Enable GUI safe mode for remote desktop (disables vsync/MSAA and hardware acceleration).
    #[arg(long)]
    gui_safe_mode: bool,
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("portfolio_analyzer=info,wgpu_core=error,wgpu_hal=error")
    });
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let config = AnalyzerConfig::default().with_risk_free_rate(args.risk_free_rate);

    if !args.gui {
        if let (Some(tickers), Some(weights), Some(returns)) =
            (&args.tickers, &args.weights, &args.returns)
        {
            run_cli(tickers, weights, returns, args.json, &config);
            return Ok(());
        }
    }

    run_gui(&args, config)
}

/// Prints the report, or logs the failure once and exits with status 1.
fn run_cli(tickers: &str, weights: &str, returns: &str, json: bool, config: &AnalyzerConfig) {
    match cli_output(tickers, weights, returns, json, config) {
        Ok(out) => println!("{}", out),
        Err(e) => {
            error!("Portfolio analysis failed ({:?}): {}", e.kind(), e);
            std::process::exit(1);
        }
    }
}

fn cli_output(
    tickers: &str,
    weights: &str,
    returns: &str,
    json: bool,
    config: &AnalyzerConfig,
) -> std::result::Result<String, AnalysisError> {
    let result = portfolio::analyze(tickers, weights, returns, config)?;
    if json {
        report::render_json(&result)
    } else {
        Ok(report::render_report(&result))
    }
}

fn run_gui(args: &Args, config: AnalyzerConfig) -> Result<()> {
    let mut options = eframe::NativeOptions::default();
    options.viewport = egui::ViewportBuilder::default()
        .with_title(config::WINDOW_TITLE)
        .with_inner_size([config::WINDOW_WIDTH, config::WINDOW_HEIGHT]);
    options.renderer = match args.gui_renderer {
        GuiRendererChoice::Wgpu => eframe::Renderer::Wgpu,
        GuiRendererChoice::Glow => eframe::Renderer::Glow,
    };

    if args.gui_safe_mode {
        options.vsync = false;
        options.multisampling = 0;
        options.depth_buffer = 0;
        options.stencil_buffer = 0;
        options.hardware_acceleration = eframe::HardwareAcceleration::Off;
    }

    info!(
        "Launching GUI with renderer: {:?}, safe_mode={}",
        args.gui_renderer,
        args.gui_safe_mode
    );

    let mut app = App::new(config);
    if let Some(t) = &args.tickers {
        app.tickers = t.clone();
    }
    if let Some(w) = &args.weights {
        app.weights = w.clone();
    }
    if let Some(r) = &args.returns {
        app.returns = r.clone();
    }

    eframe::run_native(
        config::WINDOW_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(gui::GuiApp::new(app)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI exited with error: {}", e))
}
