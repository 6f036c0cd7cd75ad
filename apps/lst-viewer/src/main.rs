//! Yearly LST archive viewer and forecaster.
//!
//! Scans a directory of yearly ESA CCI LST NetCDF files once at startup,
//! then lists the available years, renders a chosen year's raster as a PNG
//! map, or fits an ARIMA(1,1,1) model to the yearly spatial means and
//! renders a forecast chart.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use lst_archive::YearCatalog;
use lst_viewer::commands;
use lst_viewer::config::ViewerConfig;

#[derive(Parser, Debug)]
#[command(name = "lst-viewer")]
#[command(about = "Yearly land-surface-temperature viewer and ARIMA forecaster")]
struct Args {
    /// Directory containing the yearly .nc files
    #[arg(short, long, env = "LST_DATA_DIR")]
    data_dir: PathBuf,

    /// Name of the raster variable inside the files
    #[arg(long, env = "LST_VARIABLE", default_value = lst_reader::DEFAULT_VARIABLE)]
    variable: String,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the years available in the archive
    Years,

    /// Render one year's LST raster as a PNG map
    Map {
        /// Year to plot
        #[arg(short, long)]
        year: i32,

        /// Output PNG path
        #[arg(short, long, default_value = "map.png")]
        out: PathBuf,

        /// JSON style file overriding the built-in thermal ramp
        #[arg(long)]
        style: Option<PathBuf>,
    },

    /// Forecast the yearly mean LST with ARIMA(1,1,1)
    Forecast {
        /// Output PNG path
        #[arg(short, long, default_value = "forecast.png")]
        out: PathBuf,

        /// Years to forecast beyond the last observed year
        #[arg(long, default_value_t = 10)]
        horizon: usize,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Keep libnetcdf's HDF5 layer from spamming stderr before the first
    // file is touched.
    lst_reader::silence_hdf5_errors();

    let config = ViewerConfig {
        data_dir: args.data_dir,
        variable: args.variable,
    };

    info!(dir = %config.data_dir.display(), "scanning LST archive");
    let catalog = YearCatalog::scan(&config.data_dir)?;

    match args.command {
        Command::Years => commands::years(&catalog),
        Command::Map { year, out, style } => {
            commands::map(&config, &catalog, year, style.as_deref(), &out)
        }
        Command::Forecast { out, horizon } => {
            commands::forecast(&config, &catalog, horizon, &out)
        }
    }
}
