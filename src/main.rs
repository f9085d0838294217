//! XR Persona CLI
//!
//! Usage:
//!   xr-persona [OPTIONS] [PERSONA]
//!
//! Options:
//!   -s, --stylesheet <FILE>  Stylesheet file for the color palette (TOML format)
//!       --set <FIELD=VALUE>  Override one field (repeatable)
//!       --random             Start from a random example persona
//!       --svg / --png        Export files instead of printing the SVG
//!       --list-options       Show every enumerated field and its options
//!   -h, --help               Print help

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use xr_persona::persona::option_catalogue;
use xr_persona::{
    ExportConfig, Exporter, FormUpdate, PersonaForm, RenderConfig, Session, Stylesheet,
};

#[derive(Parser)]
#[command(name = "xr-persona")]
#[command(about = "Generate persona cards for XR experience design")]
struct Cli {
    /// Persona file (TOML); defaults are used when omitted
    input: Option<PathBuf>,

    /// Stylesheet file for the color palette (TOML format)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Override a field, e.g. --set name=Themba --set accessibility="Reduced motion"
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    sets: Vec<String>,

    /// Start from a random example persona
    #[arg(long)]
    random: bool,

    /// Seed for --random
    #[arg(long, requires = "random")]
    seed: Option<u64>,

    /// Write <name>-persona.svg into the output directory
    #[arg(long)]
    svg: bool,

    /// Write <name>-persona.png into the output directory
    #[arg(long)]
    png: bool,

    /// Output directory for exported files
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Resolution multiplier for PNG export
    #[arg(long, default_value_t = 1)]
    scale: u32,

    /// Give up on PNG export if the SVG has not decoded within this many milliseconds
    #[arg(long, default_value_t = 5000)]
    timeout_ms: u64,

    /// Print a data: URI instead of raw SVG
    #[arg(long)]
    data_uri: bool,

    /// Print the effective persona as TOML and exit
    #[arg(long)]
    dump: bool,

    /// Show every enumerated field and its options
    #[arg(long)]
    list_options: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.list_options {
        print_options();
        return;
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let stylesheet = match &cli.stylesheet {
        Some(path) => Stylesheet::from_file(path)
            .with_context(|| format!("loading stylesheet '{}'", path.display()))?,
        None => Stylesheet::default(),
    };

    let form = if cli.random {
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        xr_persona::random_persona(&mut rng)
    } else {
        match &cli.input {
            Some(path) => PersonaForm::from_file(path)
                .with_context(|| format!("loading persona '{}'", path.display()))?,
            None => PersonaForm::default(),
        }
    };

    let updates = cli
        .sets
        .iter()
        .map(|s| FormUpdate::parse_assignment(s))
        .collect::<Result<Vec<_>, _>>()?;

    let mut session = Session::new(RenderConfig::new().with_stylesheet(stylesheet));
    session.replace_form(form);
    for update in updates {
        session.update(update);
    }

    if cli.dump {
        print!("{}", session.form().to_toml_string()?);
        return Ok(());
    }

    let image = session.render();

    if !cli.svg && !cli.png {
        if cli.data_uri {
            println!("{}", image.to_data_uri());
        } else {
            println!("{}", image.svg());
        }
        return Ok(());
    }

    let config = ExportConfig::new()
        .with_out_dir(&cli.out_dir)
        .with_scale(cli.scale)
        .with_decode_timeout(Duration::from_millis(cli.timeout_ms));
    let mut exporter = Exporter::new(config);

    if cli.svg {
        if let Some(path) = session.export_svg(&mut exporter)? {
            println!("{}", path.display());
        }
    }
    if cli.png {
        if let Some(path) = session.export_png(&mut exporter)? {
            println!("{}", path.display());
        }
    }

    Ok(())
}

fn print_options() {
    for field in option_catalogue() {
        println!("{} ({})", field.field, field.label);
        for option in &field.options {
            println!("    {}", option);
        }
    }
    println!();
    println!("Free text: name, title, cultural_context, motive1, motive2, motive3");
    println!("Color:     primary_color (#rgb or #rrggbb)");
    println!("Toggles:   accessibility, interaction (repeat --set to add several)");
}
