use clap::Parser;
use colored::Colorize;
use env_logger::Env;
use log::{error, info};
use std::path::PathBuf;

mod libdeck;

use crate::libdeck::dataset::Dataset;

#[derive(Parser, Debug)]
#[command(name = "datacheck")]
#[command(version, about = "Validate a swipedeck dataset file", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "error")]
    log_level: String,
    file: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level)).init();

    let file = match args.file {
        Some(f) => f,
        None => {
            error!("{}", "Dataset file not specified!".red());
            std::process::exit(1);
        }
    };
    info!("{}", format!("Checking dataset {:?}", file).cyan());

    let dataset = match Dataset::load_from_path(&file) {
        Ok(dataset) => dataset,
        Err(err) => {
            error!("{}", format!("{}", err).red());
            std::process::exit(1);
        }
    };

    for class in dataset.classes() {
        let colors = dataset.palette().colors(&class.subject);
        println!(
            "{} {} questions, subject {} [{}]",
            format!("{} ({}):", class.class_name, class.id).bold(),
            class.questions.len(),
            class.subject,
            colors.primary
        );
        if class.questions.is_empty() {
            println!(
                "{}",
                "  warning: no questions; a session on this class completes immediately".yellow()
            );
        }
    }
    println!(
        "{}",
        format!("OK: {} classes.", dataset.classes().len()).green()
    );
}
