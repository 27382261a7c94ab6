use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use quiver_import_config::Config;
use quiver_import_engine::{ConvertOptions, Converter};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "quiver-import",
    version,
    about = "Convert Markdown files into a Quiver notebook"
)]
struct Cli {
    /// Config file to use instead of ~/.config/quiver-import/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log every copied image and skipped line
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(flatten)]
    conversion: ConversionFlags,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ConversionFlags {
    /// Keep lines containing a [TOC] marker
    #[arg(long, global = true)]
    keep_toc: bool,

    /// Don't reduce `##` headers by one level
    #[arg(long, global = true)]
    keep_headers: bool,

    /// Copy each image once per note, even if it is referenced repeatedly
    #[arg(long, global = true)]
    dedupe_images: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Convert every .md file in a folder into a .qvnotebook directory
    Notebook {
        /// Folder containing the .md files
        input_dir: PathBuf,

        /// Notebook directory to create (add .qvnotebook for easy importing)
        output: Option<PathBuf>,

        /// Display name of the notebook
        #[arg(short, long)]
        name: String,
    },

    /// Convert a single .md file into a .qvnote directory
    Note {
        /// Markdown file to convert
        file: PathBuf,

        /// Directory the .qvnote directory is created in
        output: Option<PathBuf>,
    },

    /// Write a config file with the default settings
    InitConfig {
        /// Where to write it (defaults to the standard config location)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = Config::load_from_path(&config_path)
        .with_context(|| format!("Failed to load config file '{}'", config_path.display()))?
        .unwrap_or_default();
    if cli.config.is_some() {
        log::debug!("Using config file {}", config_path.display());
    }

    let options = conversion_options(&config, &cli.conversion);

    match cli.command {
        Command::Notebook {
            input_dir,
            output,
            name,
        } => {
            let output_root = resolve_output(output, &config)?;
            let summary = Converter::new(options)
                .convert_notebook(&input_dir, &output_root, &name)
                .with_context(|| format!("Failed to convert '{}'", input_dir.display()))?;
            println!(
                "{} notes written to {}",
                summary.note_dirs.len(),
                output_root.display()
            );
        }
        Command::Note { file, output } => {
            let output_root = resolve_output(output, &config)?;
            let note_dir = Converter::new(options)
                .convert_single(&file, &output_root)
                .with_context(|| format!("Failed to convert '{}'", file.display()))?;
            println!("{}", note_dir.display());
        }
        Command::InitConfig { path } => {
            let path = path.unwrap_or(config_path);
            init_config(&path)?;
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        log::LevelFilter::Error
    } else if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // RUST_LOG still wins over the flags
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Command-line flags can only switch behaviour away from the config.
fn conversion_options(config: &Config, flags: &ConversionFlags) -> ConvertOptions {
    let mut options = config.convert_options();
    if flags.keep_toc {
        options.strip_toc = false;
    }
    if flags.keep_headers {
        options.reduce_headers = false;
    }
    if flags.dedupe_images {
        options.dedupe_images = true;
    }
    options
}

fn resolve_output(output: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    match output.or_else(|| config.output_root.clone()) {
        Some(path) => Ok(path),
        None => bail!("No output path given and no output_root set in the config file"),
    }
}

fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("Config file '{}' already exists", path.display());
    }
    Config::default()
        .save_to_path(path)
        .with_context(|| format!("Failed to write config file '{}'", path.display()))
}
