#[macro_use]
extern crate clap;

use {
    anyhow::{bail, Result},
    clap::ArgMatches,
    hydrus_deck::{read_deck, write_deck, Parameters},
    log::{error, info},
    simplelog::{Config as LogConfig, LevelFilter, TermLogger, TerminalMode},
    std::fs::File,
};

#[quit::main]
fn main() {
    let matches = clap_app!(hydrus_deck =>
        (version: crate_version!())
        (about: "Reads and writes HYDRUS-2D input decks.")
        (@arg PARAMETERS: -p --parameters +takes_value "Path to a YAML file of case parameters, defaults are used when absent.")
        (@subcommand write =>
            (about: "Writes the deck for the case parameters into a directory.")
            (@arg DIR: +required "Output directory, created if missing.")
        )
        (@subcommand read =>
            (about: "Reads a deck and prints its parameters as YAML.")
            (@arg DIR: +required "Directory containing the deck files.")
        )
        (@subcommand mesh =>
            (about: "Prints the node and element counts of the case grid.")
        )
    )
    .get_matches();

    TermLogger::init(
        LevelFilter::Debug,
        LogConfig::default(),
        TerminalMode::Mixed,
    )
    .unwrap_or_else(|e| {
        eprintln!("Failed to initialize logger: {}", e);
        quit::with_code(1);
    });

    let params = match matches.value_of("PARAMETERS") {
        Some(path) => {
            let file = File::open(path).unwrap_or_else(|e| {
                error!("Failed to open {}: \"{}\"", path, e);
                quit::with_code(1);
            });

            let params = serde_yaml::from_reader::<_, Parameters>(file).unwrap_or_else(|e| {
                error!("Failed to parse parameters from {}: \"{}\"", path, e);
                quit::with_code(1);
            });

            info!("Successfully loaded case parameters from \"{}\"", path);

            params
        }
        None => Parameters::default(),
    };

    run_subcommand(matches.subcommand(), params).unwrap_or_else(|e| {
        error!("Error: \"{}\"", e);
        quit::with_code(1);
    });
}

fn run_subcommand(subcmd: (&str, Option<&ArgMatches>), params: Parameters) -> Result<()> {
    let (name, args) = match subcmd {
        ("", _) => bail!("No subcommand selected"),
        (name, args) => (name, args),
    };
    let dir = args.and_then(|args| args.value_of("DIR"));

    info!("Starting {}", name);

    match (name, dir) {
        ("write", Some(dir)) => write_deck(dir, &params)?,
        ("read", Some(dir)) => {
            let params = read_deck(dir)?;
            print!("{}", serde_yaml::to_string(&params)?);
        }
        ("mesh", _) => {
            let mesh = params.domain.mesh()?;
            println!(
                "{} x {} grid: {} nodes, {} elements",
                mesh.nx,
                mesh.nz,
                mesh.node_count(),
                mesh.element_count()
            );
        }
        _ => {
            // Should be unreachable due to clap catching this error
            bail!("Unrecognized subcommand");
        }
    }

    info!("Finished {}", name);

    Ok(())
}
