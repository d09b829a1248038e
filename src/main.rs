use clap::Parser;
use colored::Colorize;
use env_logger::Env;
use log::debug;
use std::path::PathBuf;
use thiserror::Error;

mod libdeck;

#[cfg(all(feature = "cli", not(feature = "gui")))]
mod cli;
#[cfg(feature = "gui")]
mod gui;

use crate::libdeck::dataset::{ClassObj, Dataset, DatasetError};
use crate::libdeck::deck::Session;

#[derive(Parser, Debug)]
#[command(name = "swipedeck")]
#[command(version, about, long_about = None)]
struct Args {
    /// Dataset file; the built-in classes are used when omitted.
    #[arg(short, long, value_name = "FILE")]
    data: Option<PathBuf>,
    /// Id of the class to study; picked at random when omitted.
    #[arg(short, long)]
    class: Option<String>,
    #[arg(short, long, default_value = "error")]
    log_level: String,
}

#[derive(Debug, Error)]
enum Error {
    #[error("no classes in the dataset!")]
    NoClasses,
    #[error("no class with id {0:?}")]
    UnknownClass(String),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[cfg(feature = "gui")]
    #[error(transparent)]
    Gui(#[from] eframe::Error),
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level)).init();

    let dataset = match &args.data {
        Some(path) => Dataset::load_from_path(path)?,
        None => Dataset::builtin(),
    };

    let class = pick_class(&dataset, args.class.as_deref())?;
    debug!(
        "[Setup] Picked class {:?} with {} questions",
        class.id,
        class.questions.len()
    );
    let colors = dataset.palette().colors(&class.subject);

    println!(
        "{}",
        format!(
            "==========> {}: {} ({} questions) <==========",
            class.subname,
            class.class_name,
            class.questions.len()
        )
        .cyan()
    );

    let session = Session::start(&class.questions);

    cfg_if::cfg_if! {
        if #[cfg(feature = "gui")] {
            gui::init_gui(session, class.clone(), colors)?;
        } else if #[cfg(feature = "cli")] {
            cli::cli_loop(session, &colors);
        } else {
            compile_error!("enable at least one of the `gui` or `cli` features");
        }
    }

    Ok(())
}

fn pick_class<'a>(dataset: &'a Dataset, id: Option<&str>) -> Result<&'a ClassObj, Error> {
    match id {
        Some(id) => dataset
            .class_by_id(id)
            .ok_or_else(|| Error::UnknownClass(id.to_string())),
        None => dataset.random_class().ok_or(Error::NoClasses),
    }
}
