use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use sryem::services::ExamStore;
use sryem::Result;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sryem")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "GIFT question bank toolkit for exam composition", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Question bank directory
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    /// Exam document path
    #[arg(long, global = true, default_value = sryem::services::exam_service::DEFAULT_EXAM_FILE)]
    exam_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the question bank
    Search {
        /// Filter by question type (e.g. MultipleChoice, TrueFalse)
        #[arg(short = 't', long = "type")]
        question_type: Option<String>,

        /// Keyword matched against title and text
        #[arg(short, long)]
        keyword: Option<String>,
    },

    /// Show question bank statistics
    Stats,

    /// List the question types present in the bank
    Types,

    /// Exam composition operations
    #[command(subcommand)]
    Exam(ExamCommands),

    /// Teacher vCard operations
    #[command(subcommand)]
    Vcard(VcardCommands),

    /// Take the current exam interactively
    Simulate {
        /// Save the results report to this file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show the type profile of the exam or of a bank file/directory
    Profile {
        /// A .gift file or directory; defaults to the current exam
        target: Option<PathBuf>,
    },

    /// Compare the exam profile against a bank file or directory
    Compare {
        /// A .gift file or directory to compare against
        against: PathBuf,
    },

    /// Validate an external GIFT file and copy it into the bank
    Import {
        /// Path to the .gift file
        path: PathBuf,
    },

    /// Validate a GIFT file and copy it to a destination
    Export {
        /// Source .gift file
        source: PathBuf,

        /// Destination file or directory
        destination: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ExamCommands {
    /// Start a new exam
    Init {
        /// Exam title
        title: String,
    },

    /// Add a question from the bank
    Add {
        /// Bank file holding the question
        file: String,

        /// Question title
        title: String,
    },

    /// Remove a question by position (1-based)
    Remove {
        index: usize,
    },

    /// Move a question between positions (1-based)
    Move {
        from: usize,
        to: usize,
    },

    /// List the questions of the exam
    List,

    /// Validate the exam composition
    Validate,

    /// Show exam statistics
    Stats,

    /// Delete the current exam
    Clear,

    /// Generate the GIFT file
    Generate {
        /// Output file or directory (defaults to the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Preview the generated GIFT content
    Preview,
}

#[derive(Subcommand)]
enum VcardCommands {
    /// Generate a vCard file for the exam's teacher
    Generate {
        /// Output file or directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Preview the vCard content
    Preview,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let store = ExamStore::new(&cli.exam_file);

    match cli.command {
        Commands::Search {
            question_type,
            keyword,
        } => sryem::cli::bank::run_search(
            &cli.data_dir,
            question_type.as_deref(),
            keyword.as_deref(),
        ),
        Commands::Stats => sryem::cli::bank::run_stats(&cli.data_dir),
        Commands::Types => sryem::cli::bank::run_types(&cli.data_dir),

        Commands::Exam(command) => match command {
            ExamCommands::Init { title } => sryem::cli::exam::run_init(&store, &title),
            ExamCommands::Add { file, title } => {
                sryem::cli::exam::run_add(&store, &cli.data_dir, &file, &title)
            }
            ExamCommands::Remove { index } => sryem::cli::exam::run_remove(&store, index),
            ExamCommands::Move { from, to } => sryem::cli::exam::run_move(&store, from, to),
            ExamCommands::List => sryem::cli::exam::run_list(&store),
            ExamCommands::Validate => sryem::cli::exam::run_validate(&store),
            ExamCommands::Stats => sryem::cli::exam::run_stats(&store),
            ExamCommands::Clear => sryem::cli::exam::run_clear(&store),
            ExamCommands::Generate { output } => {
                sryem::cli::exam::run_generate(&store, output.as_deref())
            }
            ExamCommands::Preview => sryem::cli::exam::run_preview(&store),
        },

        Commands::Vcard(command) => match command {
            VcardCommands::Generate { output } => {
                sryem::cli::vcard::run_generate(&store, output.as_deref())
            }
            VcardCommands::Preview => sryem::cli::vcard::run_preview(&store),
        },

        Commands::Simulate { save } => sryem::cli::simulate::run(&store, save.as_deref()),
        Commands::Profile { target } => {
            sryem::cli::profile::run_profile(&store, target.as_deref())
        }
        Commands::Compare { against } => sryem::cli::profile::run_compare(&store, &against),
        Commands::Import { path } => sryem::cli::transfer::run_import(&path, &cli.data_dir),
        Commands::Export {
            source,
            destination,
        } => sryem::cli::transfer::run_export(&source, &destination),

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}
