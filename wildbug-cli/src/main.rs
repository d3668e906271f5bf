//! WildBug CLI - WPX container tool
//!
//! Lists, inspects, extracts and packs WildBug WPX resource containers,
//! and dumps the pixel planes of WBM bitmaps.

mod commands;
mod utils;

use clap::{ArgAction, Parser, Subcommand};
use commands::{cmd_extract, cmd_image, cmd_info, cmd_list, cmd_pack};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "wildbug")]
#[command(author, version, about = "WildBug WPX container tool")]
#[command(long_about = "
Reads and writes the WPX resource containers of the WildBug engine and
decodes all 16 variants of the WPX codec.

Examples:
  wildbug list sys.wbm
  wildbug list --json data.wsc
  wildbug info sys.wbm
  wildbug extract sys.wbm -o out 16 17
  wildbug image sys.wbm -o planes
  wildbug pack new.wbm --type BMP 16=info.bin 17=pixels.bin
")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the entries of a container
    #[command(alias = "l")]
    List {
        /// Container file
        file: PathBuf,

        /// Required type tag (e.g. BMP)
        #[arg(short = 't', long = "type")]
        type_name: Option<String>,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Show header information
    #[command(alias = "i")]
    Info {
        /// Container file
        file: PathBuf,

        /// Required type tag (e.g. BMP)
        #[arg(short = 't', long = "type")]
        type_name: Option<String>,
    },

    /// Decode entries to <id>.bin files
    #[command(alias = "x")]
    Extract {
        /// Container file
        file: PathBuf,

        /// Required type tag (e.g. BMP)
        #[arg(short = 't', long = "type")]
        type_name: Option<String>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Entry ids to extract (all if empty)
        ids: Vec<u8>,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// Decode the pixel and alpha planes of a WBM bitmap
    Image {
        /// WBM file
        file: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Create a stored container from files
    #[command(alias = "c")]
    Pack {
        /// Output container file
        output: PathBuf,

        /// Type tag, up to 4 ASCII characters
        #[arg(short = 't', long = "type")]
        type_name: String,

        /// Entries as ID=PATH
        #[arg(required = true, value_parser = utils::parse_entry_arg)]
        entries: Vec<(u8, PathBuf)>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::List {
            file,
            type_name,
            json,
        } => cmd_list(&file, type_name.as_deref(), json),
        Commands::Info { file, type_name } => cmd_info(&file, type_name.as_deref()),
        Commands::Extract {
            file,
            type_name,
            output,
            ids,
            no_progress,
        } => cmd_extract(&file, type_name.as_deref(), &output, &ids, !no_progress),
        Commands::Image { file, output } => cmd_image(&file, &output),
        Commands::Pack {
            output,
            type_name,
            entries,
        } => cmd_pack(&output, &type_name, &entries),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
