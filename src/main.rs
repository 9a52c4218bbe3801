//! Command-line interface for xt

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use log::{debug, LevelFilter};

#[cfg(feature = "cli")]
use std::io;
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use std::str::FromStr;

#[cfg(feature = "cli")]
use xt::events::NullSink;
#[cfg(feature = "cli")]
use xt::limits::Limits;
#[cfg(feature = "cli")]
use xt::output::{render_json, render_result, ConsoleSink, Styler};
#[cfg(feature = "cli")]
use xt::query::{PathQuery, DEFAULT_LIMIT};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "xt")]
#[command(
    author,
    version,
    about = "XML Schema Tools",
    long_about = "XML Schema Tools displays information about an XML Schema."
)]
struct Cli {
    /// Path to the entry XSD schema file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Element to find paths to
    #[arg(value_name = "ELEMENT")]
    element: String,

    /// Limit the number of results. Only the shortest results are shown. Use "--limit 0" to show all results.
    #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,

    /// If set, searching "elem" only finds "elem". Otherwise "parent/elem" is also found.
    #[arg(short, long)]
    exact: bool,

    /// Output additional information about the parsed XML Schema.
    #[arg(short, long)]
    verbose: bool,

    /// Output the results as JSON
    #[arg(long)]
    json: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Resource limits for loading the schema set
    #[arg(long, default_value = "default", value_parser = ["default", "strict", "permissive"])]
    limits: String,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    let log_level = LevelFilter::from_str(&cli.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", cli.log_level);
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    debug!(cli:?; "Parsed arguments");

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let colored = !cli.no_color && !cli.json && atty::is(atty::Stream::Stdout);
    let styler = Styler::new(colored);

    let query = PathQuery::new(cli.element.as_str())
        .exact(cli.exact)
        .limit(cli.limit);
    let limits = Limits::preset(&cli.limits).unwrap_or_default();

    // With --json, stdout carries only the document and the trace goes to stderr
    let result = match (cli.verbose, cli.json) {
        (true, true) => {
            let sink = ConsoleSink::new(io::stderr().lock(), Styler::plain());
            xt::find_paths_with(&cli.file, &query, &limits, sink)?
        }
        (true, false) => {
            let sink = ConsoleSink::new(io::stdout().lock(), styler);
            let result = xt::find_paths_with(&cli.file, &query, &limits, sink)?;
            println!();
            result
        }
        (false, _) => xt::find_paths_with(&cli.file, &query, &limits, NullSink)?,
    };

    if cli.json {
        println!("{}", render_json(&result)?);
    } else {
        print!("{}", render_result(&result, &styler));
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
