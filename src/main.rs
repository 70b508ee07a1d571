use clap::{Args, Parser, Subcommand};
use geojsonlib::{GeometryParser, MAX_NESTING_DEPTH};
use log::LevelFilter;

mod cli_commands;

/// Validate GeoJSON geometries and convert them to other representations
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase logging verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Maximum nesting of geometry collections
    #[arg(long, default_value_t = MAX_NESTING_DEPTH, global = true)]
    max_depth: usize,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a geometry and print a summary of it
    Inspect(InputArgs),

    /// Print the WKT representation of a geometry
    Wkt(InputArgs),

    /// Re-encode a geometry as normalized GeoJSON
    Format {
        #[command(flatten)]
        input: InputArgs,

        /// Indent the output
        #[arg(long)]
        pretty: bool,

        /// Write the result to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// GeoJSON geometry object, or a path when --file is given
    input: String,

    /// Read the geometry from the file at INPUT
    #[arg(short, long)]
    file: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    if let Err(msg) = run(cli) {
        eprintln!("{msg}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let parser = GeometryParser::new().with_max_depth(cli.max_depth);
    match cli.command {
        Commands::Inspect(args) => {
            let text = cli_commands::read_input(args.input, args.file)?;
            cli_commands::parse_show_detail(text, &parser)
        }
        Commands::Wkt(args) => {
            let text = cli_commands::read_input(args.input, args.file)?;
            cli_commands::show_wkt(text, &parser)
        }
        Commands::Format {
            input,
            pretty,
            output,
        } => {
            let text = cli_commands::read_input(input.input, input.file)?;
            cli_commands::format_geojson(text, &parser, pretty, output)
        }
    }
}
