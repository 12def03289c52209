mod commands;
mod output;

use clap::{Parser, Subcommand};
use dosequiz_core::config::DATA_DIR_ENV;
use dosequiz_core::{Store, StoreConfig};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dosequiz",
    version,
    about = "Quiz trainer for medication dosing rules"
)]
struct Cli {
    /// Directory holding drugs.json and situations.json
    #[arg(long, global = true, env = DATA_DIR_ENV, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Seed for question selection (reproducible quizzes)
    #[arg(long, global = true, hide = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show and edit registered substances
    Substances {
        #[command(subcommand)]
        action: CollectionAction,
    },
    /// Show and edit registered situations
    Situations {
        #[command(subcommand)]
        action: CollectionAction,
    },
    /// Start an interactive quiz
    Quiz {
        #[command(subcommand)]
        kind: QuizKind,
    },
    /// Grade a single answer without a quiz session
    Check {
        #[command(subcommand)]
        kind: CheckKind,
    },
}

#[derive(Subcommand)]
enum CollectionAction {
    /// List the collection
    List,
    /// Write the whole collection as an editable form
    Export {
        /// Write the form to a file instead of stdout
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Replace the whole collection with the contents of an edited form
    Save {
        /// Path to the edited form
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum QuizKind {
    /// Dose questions for random substances, or one chosen substance
    Dose {
        /// Quiz on this substance only
        #[arg(short, long)]
        drug: Option<String>,

        /// Stop after this many questions
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
    /// Pick the substances that apply to a random situation
    Situation {
        /// Stop after this many questions
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
}

#[derive(Subcommand)]
enum CheckKind {
    /// Grade a dose for a substance and patient weight
    Dose {
        #[arg(long)]
        drug: String,

        /// Patient weight in kg
        #[arg(long)]
        weight: u32,

        /// Dose as typed, '.' or ',' as decimal separator
        #[arg(long)]
        dose: String,

        /// Unit of the dose (e.g. "mg", "µg/kgKG/h")
        #[arg(long)]
        unit: String,
    },
    /// Grade the substances chosen for a situation
    Situation {
        /// Position of the situation as shown by `situations list`
        #[arg(long)]
        index: usize,

        /// Chosen substances (names or list numbers), comma-separated
        #[arg(long, default_value = "")]
        answer: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = cli
        .data_dir
        .map(StoreConfig::from_data_dir)
        .unwrap_or_default();
    tracing::debug!(
        substances = %config.substances_path.display(),
        situations = %config.situations_path.display(),
        "using collection files"
    );
    let store = Store::new(config);

    let mut rng: Box<dyn RngCore> = match cli.seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    };

    let result = store.ensure_files().and_then(|()| match cli.command {
        Commands::Substances { action } => match action {
            CollectionAction::List => commands::substances::list(&store),
            CollectionAction::Export { out } => commands::substances::export(&store, out),
            CollectionAction::Save { file } => commands::substances::save(&store, &file),
        },
        Commands::Situations { action } => match action {
            CollectionAction::List => commands::situations::list(&store),
            CollectionAction::Export { out } => commands::situations::export(&store, out),
            CollectionAction::Save { file } => commands::situations::save(&store, &file),
        },
        Commands::Quiz { kind } => {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut out = std::io::stdout();
            match kind {
                QuizKind::Dose { drug, count } => commands::quiz::dose(
                    &store,
                    drug,
                    count,
                    &mut input,
                    &mut out,
                    &mut *rng,
                ),
                QuizKind::Situation { count } => {
                    commands::quiz::situation(&store, count, &mut input, &mut out, &mut *rng)
                }
            }
        }
        Commands::Check { kind } => match kind {
            CheckKind::Dose {
                drug,
                weight,
                dose,
                unit,
            } => commands::check::dose(&store, &drug, weight, &dose, &unit),
            CheckKind::Situation { index, answer } => {
                commands::check::situation(&store, index, &answer)
            }
        },
    });

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
