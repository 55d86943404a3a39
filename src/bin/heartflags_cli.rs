//! HeartFlags CLI
//!
//! Commands: list, flag, heart, animate, gallery, pngs
//! SVG goes to --output or stdout; summaries are JSON on stdout.
//! Returns non-zero on any failure.

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, error, info, LevelFilter};

use heartflags_core::{
    export::{write_svg, DEFAULT_SUFFIX},
    markup, Catalog, Config, Encoder, FlagSpec, HeartError, Node, PngExporter, RandomIds,
    ResvgRasterizer, SequentialIds,
};

#[derive(Parser, Debug)]
#[command(name = "heartflags-cli")]
#[command(about = "HeartFlags CLI - flag-in-heart icon generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List catalog flags
    List,

    /// Render a flag banner
    Flag {
        name: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a flag clipped to the heart
    Heart {
        name: String,
        /// Clip identifier (random when omitted)
        #[arg(long)]
        id: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render the animated heart for a flag
    Animate {
        name: String,
        /// Outline stroke color
        #[arg(long, default_value = "grey")]
        stroke: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render every catalog flag as a gallery
    Gallery {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rasterize every catalog flag to PNG
    Pngs {
        #[arg(short, long, default_value = DEFAULT_SUFFIX)]
        suffix: String,

        #[arg(short, long, value_enum, default_value_t = EncoderArg::Heart)]
        encoder: EncoderArg,

        /// Target directory (must exist)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum EncoderArg {
    Heart,
    Flag,
}

impl From<EncoderArg> for Encoder {
    fn from(arg: EncoderArg) -> Self {
        match arg {
            EncoderArg::Heart => Encoder::Heart,
            EncoderArg::Flag => Encoder::Flag,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = LevelFilter::from_str(&cli.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", cli.log_level);
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();
    let command = &cli.command;
    debug!(command:?; "Parsed arguments");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            let output = serde_json::json!({
                "success": false,
                "error": e.to_string(),
            });
            println!("{}", output);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), HeartError> {
    let config = Config::load_or_default(cli.config.as_deref())?;

    match &cli.command {
        Commands::List => {
            let catalog = config.catalog()?;
            let flags: Vec<_> = catalog
                .specs()
                .map(|spec| serde_json::json!({
                    "name": spec.name,
                    "stripes": spec.stripe_count(),
                    "symbol": !spec.symbol.is_none(),
                }))
                .collect();
            let output = serde_json::json!({
                "fingerprint": catalog.fingerprint(),
                "flags": flags,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Commands::Flag { name, output } => {
            let catalog = config.catalog()?;
            let spec = find(&catalog, name)?;
            emit(&spec.frame(config.stripes), output.as_ref())?;
        }

        Commands::Heart { name, id, output } => {
            let catalog = config.catalog()?;
            let spec = find(&catalog, name)?;
            let scene = config.assembler()?.heart_flag(spec, id.as_deref());
            emit(&scene, output.as_ref())?;
        }

        Commands::Animate { name, stroke, output } => {
            let catalog = config.catalog()?;
            let spec = find(&catalog, name)?;
            let mut ids = RandomIds;
            let scene = config.assembler()?.animated_flag_heart(spec, stroke, &mut ids);
            emit(&scene, output.as_ref())?;
        }

        Commands::Gallery { output } => {
            let specs: Vec<FlagSpec> = config.catalog()?.into_iter().map(|(_, s)| s).collect();
            let mut ids = SequentialIds::new("gallery");
            let scene = config.assembler()?.gallery(&specs, &config.layout()?, &mut ids)?;
            emit(&scene, output.as_ref())?;
        }

        Commands::Pngs { suffix, encoder, out_dir } => {
            let specs: Vec<FlagSpec> = config.catalog()?.into_iter().map(|(_, s)| s).collect();
            let dir = out_dir.clone().unwrap_or_else(|| config.png_dir.clone());
            let assembler = config.assembler()?;
            let rasterizer = ResvgRasterizer::new();
            let exporter = PngExporter::new(&assembler, &rasterizer, config.raster);
            let files = exporter.write_pngs(&specs, &dir, suffix, (*encoder).into())?;
            let output = serde_json::json!({
                "success": true,
                "files": files,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn find<'a>(catalog: &'a Catalog, name: &str) -> Result<&'a FlagSpec, HeartError> {
    catalog
        .get(name)
        .ok_or_else(|| HeartError::UnknownFlag(name.to_string()))
}

fn emit(scene: &Node, output: Option<&PathBuf>) -> Result<(), HeartError> {
    match output {
        Some(path) => write_svg(scene, path)?,
        None => println!("{}", markup::to_markup(scene)),
    }
    info!("Rendered scene");
    Ok(())
}
