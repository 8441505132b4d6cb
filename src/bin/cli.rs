use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

use metashell::catalog::SchemaIntrospector;
use metashell::common::types::DEFAULT_CATALOG_FILE;
use metashell::shell::demo::{seed_company, COMPANY_DB};
use metashell::shell::input::{parse_foreign_key, parse_value, split_column_definitions};
use metashell::shell::normalize_db_name;
use metashell::{
    ConnectionError, CreateTableOutcome, DdlExecutor, DmlExecutor, MirrorStats, Row, Session, Shell, ShellConfig,
};

type LineEditor = Editor<(), DefaultHistory>;

#[derive(Parser)]
#[command(author, version, about = "metashell - create, fill and inspect databases with a mirrored metadata catalog")]
struct Cli {
    /// Directory holding the database files
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// Catalog database file (relative paths resolve inside the data directory)
    #[arg(short, long, default_value = DEFAULT_CATALOG_FILE)]
    catalog: PathBuf,

    /// Have the engine enforce foreign keys when rows are inserted
    #[arg(long)]
    enforce_foreign_keys: bool,

    /// Log at debug level (otherwise RUST_LOG applies)
    #[arg(short, long)]
    verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive menu
    Shell,

    /// Mirror an existing database into the catalog
    Mirror {
        /// Database name (".db" is appended when missing)
        database: String,
    },

    /// Print the schema metadata of an existing database
    Show {
        database: String,
    },

    /// Print every row of every table of an existing database
    Data {
        database: String,
    },

    /// Print the whole catalog as JSON
    Dump,

    /// Create the COMPANY demo database and mirror it
    Seed,
}

impl Cli {
    fn config(&self) -> ShellConfig {
        ShellConfig {
            data_dir: self.data_dir.clone(),
            catalog_file: self.catalog.clone(),
            enforce_foreign_keys: self.enforce_foreign_keys,
            ..ShellConfig::default()
        }
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    let _ = builder.try_init();
}

/// Schema report for every table of the session's database
fn render_metadata(session: &Session) -> Result<String> {
    let schema = SchemaIntrospector::new(session).introspect()?;
    Ok(schema.to_string())
}

/// Every row of every table of the session's database
fn render_table_data(session: &Session) -> Result<String> {
    let dml = DmlExecutor::new(session);
    let mut out = String::new();
    for table_name in session.table_names()? {
        out.push_str(&format!("\nTable: {}\n", table_name));
        let result = dml.select_all(&table_name)?;
        if result.is_empty() {
            out.push_str(&format!("No data found in table {}.\n", table_name));
        } else {
            out.push_str(&result.to_string_table());
        }
    }
    Ok(out)
}

fn describe_stats(stats: &MirrorStats) -> String {
    if stats.is_empty() {
        "Catalog already up to date.".to_string()
    } else {
        format!(
            "Catalog updated: {} database, {} table, {} column, {} foreign key row(s) added.",
            stats.databases, stats.tables, stats.columns, stats.foreign_keys
        )
    }
}

/// Read one line; `None` on Ctrl-C / Ctrl-D
fn read_line(rl: &mut LineEditor, prompt: &str) -> Result<Option<String>> {
    match rl.readline(prompt) {
        Ok(line) => {
            let _ = rl.add_history_entry(line.as_str());
            Ok(Some(line))
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Read a name, treating `back` and Ctrl-C / Ctrl-D as going back
fn read_name(rl: &mut LineEditor, prompt: &str) -> Result<Option<String>> {
    match read_line(rl, prompt)? {
        Some(line) if !line.trim().eq_ignore_ascii_case("back") => Ok(Some(line.trim().to_string())),
        _ => Ok(None),
    }
}

fn print_databases(shell: &Shell) {
    println!("\nExisting Databases:");
    match shell.databases() {
        Ok(names) => names.iter().for_each(|name| println!("{}", name)),
        Err(err) => println!("Error listing {}: {}", shell.config().data_dir.display(), err),
    }
}

/// Open an existing database, printing a notice when it is not there
fn open_or_report(shell: &Shell, name: &str) -> Result<Option<Session>> {
    match shell.open_existing(name) {
        Ok(session) => Ok(Some(session)),
        Err(ConnectionError::NotFound(_)) => {
            println!("Database '{}' not found.", normalize_db_name(name));
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

fn create_database(shell: &Shell, rl: &mut LineEditor) -> Result<()> {
    let Some(name) = read_name(rl, "Enter the name of the new database: ")? else {
        return Ok(());
    };
    if name.is_empty() {
        return Ok(());
    }
    let session = shell.open_new(&name)?;
    let ddl = DdlExecutor::new(&session);

    while let Some(table_name) = read_name(rl, "Enter table name (or 'back' to go back): ")? {
        if table_name.is_empty() {
            continue;
        }
        let columns = match read_line(rl, "Enter columns (comma-separated): ")? {
            Some(line) => split_column_definitions(&line),
            None => break,
        };

        let mut foreign_keys = Vec::new();
        while let Some(line) = read_line(rl, "Enter foreign key (column,table,referenced_column; leave blank to finish): ")? {
            if line.trim().is_empty() {
                break;
            }
            match parse_foreign_key(&line) {
                Ok(fk) => foreign_keys.push(fk),
                Err(err) => println!("{} Try again.", err),
            }
        }

        match ddl.create_table(&table_name, &columns, &foreign_keys) {
            Ok(CreateTableOutcome::Created) => println!("Table {} created successfully.", table_name),
            Ok(CreateTableOutcome::AlreadyExists) => println!("Table {} already exists.", table_name),
            Err(err) => println!("{}", err),
        }
    }

    let stats = shell.refresh_catalog(&session)?;
    println!("{}", describe_stats(&stats));
    Ok(())
}

fn show_metadata(shell: &Shell, rl: &mut LineEditor) -> Result<()> {
    loop {
        print_databases(shell);
        let Some(name) = read_name(rl, "Enter the name of the existing database (or 'back' to go back): ")? else {
            return Ok(());
        };
        if let Some(session) = open_or_report(shell, &name)? {
            println!("{}", render_metadata(&session)?);
        }
    }
}

fn insert_data(shell: &Shell, rl: &mut LineEditor) -> Result<()> {
    loop {
        print_databases(shell);
        let Some(name) = read_name(rl, "Enter the name of the existing database (or 'back' to go back): ")? else {
            return Ok(());
        };
        let Some(session) = open_or_report(shell, &name)? else {
            continue;
        };
        println!("{}", render_metadata(&session)?);

        let Some(table_name) = read_name(rl, "Enter the name of the existing table to insert data: ")? else {
            continue;
        };
        let dml = DmlExecutor::new(&session);
        let columns = match dml.column_names(&table_name) {
            Ok(columns) => columns,
            Err(err) if err.is_validation() => {
                println!("Table '{}' not found.", table_name);
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        let mut row = Row::new();
        for column in columns {
            let Some(raw) = read_line(rl, &format!("Enter value for column '{}': ", column))? else {
                return Ok(());
            };
            row.set(column, parse_value(&raw));
        }

        match dml.insert_row(&table_name, &row) {
            Ok(_) => println!("Data inserted successfully."),
            Err(err) => println!("{}", err),
        }
    }
}

fn show_data(shell: &Shell, rl: &mut LineEditor) -> Result<()> {
    loop {
        print_databases(shell);
        let Some(name) = read_name(rl, "Enter the name of the existing database (or 'back' to go back): ")? else {
            return Ok(());
        };
        if let Some(session) = open_or_report(shell, &name)? {
            print!("{}", render_table_data(&session)?);
        }
    }
}

fn print_menu() {
    println!("\nDatabase Management Menu:");
    println!("1. Create a new database");
    println!("2. Show metadata of an existing database");
    println!("3. Insert data into an existing table");
    println!("4. Show data of an existing database");
    println!("5. Exit");
}

fn run_shell(shell: &Shell) -> Result<()> {
    // Make sure the catalog exists before anything is mirrored into it
    shell.open_catalog().context("Failed to open catalog")?;

    let history_file = shell.config().history_file.clone();
    let mut rl = LineEditor::new()?;
    if let Err(err) = rl.load_history(&history_file) {
        log::debug!("No prompt history loaded: {}", err);
    }

    loop {
        print_menu();
        let Some(choice) = read_line(&mut rl, "Enter your choice (1/2/3/4/5): ")? else {
            println!("Bye.");
            break;
        };
        let outcome = match choice.trim() {
            "1" => create_database(shell, &mut rl),
            "2" => show_metadata(shell, &mut rl),
            "3" => insert_data(shell, &mut rl),
            "4" => show_data(shell, &mut rl),
            "5" => {
                println!("Bye.");
                break;
            }
            _ => {
                println!("Invalid choice. Please enter a valid option (1/2/3/4/5).");
                Ok(())
            }
        };
        if let Err(err) = outcome {
            println!("Error: {:#}", err);
        }
    }

    if let Err(err) = rl.save_history(&history_file) {
        log::debug!("Could not save prompt history: {}", err);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let shell = Shell::new(cli.config());

    match &cli.command {
        Some(Commands::Shell) | None => {
            run_shell(&shell)?;
        }
        Some(Commands::Mirror { database }) => {
            let session = shell.open_existing(database)?;
            let stats = shell
                .refresh_catalog(&session)
                .with_context(|| format!("Failed to mirror {}", session.name()))?;
            println!("{}", describe_stats(&stats));
        }
        Some(Commands::Show { database }) => {
            let session = shell.open_existing(database)?;
            println!("{}", render_metadata(&session)?);
        }
        Some(Commands::Data { database }) => {
            let session = shell.open_existing(database)?;
            print!("{}", render_table_data(&session)?);
        }
        Some(Commands::Dump) => {
            let catalog = shell.open_catalog()?;
            let snapshot = catalog.snapshot()?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Some(Commands::Seed) => {
            let session = shell.open_new(COMPANY_DB)?;
            if seed_company(&session)? {
                println!("Created {}", session.path().display());
            } else {
                println!("{} already seeded", session.path().display());
            }
            let stats = shell.refresh_catalog(&session)?;
            println!("{}", describe_stats(&stats));
        }
    }

    Ok(())
}
