use clap::{Parser, Subcommand};
use vnet_assign::app::{run_assignment, CliError};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct AssignAppArguments {
    #[command(subcommand)]
    app: App,
}

#[derive(Subcommand)]
pub enum App {
    /// assign an OD matrix on a multi-modal network
    Assign {
        #[arg(long, help = "path to .toml or .json file with the assignment parameters")]
        configuration_file: String,
        #[arg(long, help = "output directory, overrides the one in the parameters file")]
        output_directory: Option<String>,
    },
}

pub fn run(app: &App) -> Result<(), CliError> {
    env_logger::init();
    match app {
        App::Assign {
            configuration_file,
            output_directory,
        } => {
            let summary = run_assignment(configuration_file, output_directory.as_ref())?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
            eprintln!("finished.");
            Ok(())
        }
    }
}

fn main() {
    let args = AssignAppArguments::parse();
    if let Err(e) = run(&args.app) {
        log::error!("vnet-assign failed: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
