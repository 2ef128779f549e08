use clap::{Parser, Subcommand};
use dictsync_cli::{
    JsonFileStore, LanguageSelection, load_config,
    export::run_export_command,
    import::{read_expected_changes, run_import_command},
    list::{run_languages_command, run_list_command},
    validation::validate_store_path,
    view::{render_changes, saved_summary},
};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a dictsync.toml (defaults to ./dictsync.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug details to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Export the dictionary to a CSV file with one column per language.
    Export {
        /// The JSON dictionary store
        #[arg(short, long)]
        store: Option<PathBuf>,

        /// Culture name of a language to include, in column order (repeatable)
        #[arg(short, long = "lang")]
        lang: Vec<String>,

        /// Include every known language
        #[arg(long, conflicts_with = "lang")]
        all_languages: bool,

        /// Output file or directory (defaults to translations-YYYY-MM-DD.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Text encoding: ascii, utf-8, utf-16, utf-32, windows-1252, iso-8859-1
        #[arg(long)]
        encoding: Option<String>,

        /// Field delimiter: , ; tab | ^ ~
        #[arg(long)]
        delimiter: Option<String>,
    },

    /// Import translations from an edited CSV file.
    ///
    /// Without --confirm the changes are only previewed.
    Import {
        /// The CSV file to import
        #[arg(short, long)]
        input: PathBuf,

        /// The JSON dictionary store
        #[arg(short, long)]
        store: Option<PathBuf>,

        /// Replace existing translations that differ
        #[arg(long = "override")]
        override_existing: bool,

        /// Text encoding of the input (defaults to ascii)
        #[arg(long)]
        encoding: Option<String>,

        /// Field delimiter of the input
        #[arg(long)]
        delimiter: Option<String>,

        /// Save the changes
        #[arg(long)]
        confirm: bool,

        /// Change set from an earlier preview; refuse to save if it no longer matches
        #[arg(long, requires = "confirm")]
        expect: Option<PathBuf>,

        /// Print the change set as JSON
        #[arg(long)]
        json: bool,

        /// Display full values without truncation
        #[arg(long)]
        full: bool,
    },

    /// List the dictionary as an indented tree.
    List {
        /// The JSON dictionary store
        #[arg(short, long)]
        store: Option<PathBuf>,

        /// Print as JSON
        #[arg(long)]
        json: bool,

        /// Display full values without truncation
        #[arg(long)]
        full: bool,
    },

    /// List the known languages.
    Languages {
        /// The JSON dictionary store
        #[arg(short, long)]
        store: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn open_store(path: PathBuf) -> Result<JsonFileStore, String> {
    validate_store_path(&path)?;
    Ok(JsonFileStore::new(path))
}

fn run(args: Args) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;

    match args.commands {
        Commands::Export {
            store,
            lang,
            all_languages,
            output,
            encoding,
            delimiter,
        } => {
            let store = open_store(config.store_path(store))?;
            let options = config.export_options(encoding.as_deref(), delimiter.as_deref())?;
            let selection =
                LanguageSelection::from_sources(all_languages, lang, config.export_languages());
            let today = chrono::Local::now().date_naive();
            let (path, rows) =
                run_export_command(&store, &selection, output.as_deref(), &options, today)?;
            println!("✅ Exported {} row(s) to {}", rows, path.display());
        }
        Commands::Import {
            input,
            store,
            override_existing,
            encoding,
            delimiter,
            confirm,
            expect,
            json,
            full,
        } => {
            let mut store = open_store(config.store_path(store))?;
            let options = config.import_options(
                encoding.as_deref(),
                delimiter.as_deref(),
                override_existing,
                confirm,
            )?;
            let expected = expect.as_deref().map(read_expected_changes).transpose()?;
            let changes = run_import_command(&mut store, &input, options, expected.as_ref())?;

            if json {
                let text = serde_json::to_string_pretty(&changes)
                    .map_err(|e| format!("Error serializing to JSON: {}", e))?;
                println!("{}", text);
            } else {
                print!("{}", render_changes(&changes, full));
                if !changes.is_empty() {
                    if confirm {
                        println!("✅ {}", saved_summary(&changes));
                    } else {
                        println!("Preview only: run again with --confirm to save these changes");
                    }
                }
            }
        }
        Commands::List { store, json, full } => {
            let store = open_store(config.store_path(store))?;
            print!("{}", run_list_command(&store, json, full)?);
        }
        Commands::Languages { store } => {
            let store = open_store(config.store_path(store))?;
            print!("{}", run_languages_command(&store)?);
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
