use autotable::demos::{self, DEMOS};
use autotable::{AutoTableError, ConfigError, GlobalDefaults, TableOptions, load_layer, resolve};
use clap::{Parser, Subcommand};
use std::env;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Resolve layered table options and run the demonstration tables")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the demonstration tables
    List,
    /// Run one demonstration through the dry-run engine
    Run {
        name: String,
        /// Seed for the sample data
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// JSON file installed as the global defaults layer
        #[arg(long)]
        defaults: Option<PathBuf>,
    },
    /// Resolve JSON option layers and print the effective configuration
    Resolve {
        #[arg(long)]
        global: Option<PathBuf>,
        #[arg(long)]
        document: Option<PathBuf>,
        #[arg(long)]
        call: Option<PathBuf>,
    },
}

fn load(path: Option<&PathBuf>) -> Result<Option<TableOptions>, ConfigError> {
    path.map(load_layer).transpose()
}

fn main() -> Result<(), AutoTableError> {
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "autotable=info");
        }
    }
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Command::List => {
            for demo in DEMOS {
                println!("{:<14} {}", demo.name, demo.description);
            }
        }
        Command::Run {
            name,
            seed,
            defaults,
        } => {
            let Some(demo) = demos::find(&name) else {
                eprintln!("Unknown demo '{}'. Run `autotable-demo list` to see them all.", name);
                std::process::exit(1);
            };
            let mut global = GlobalDefaults::new();
            global.set(load(defaults.as_ref())?);

            let report = demos::run_demo(demo, &mut global, seed)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Resolve {
            global,
            document,
            call,
        } => {
            let global = load(global.as_ref())?;
            let document = load(document.as_ref())?;
            let call = load(call.as_ref())?;
            let config = resolve(global.as_ref(), document.as_ref(), call.as_ref())?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }
    Ok(())
}
