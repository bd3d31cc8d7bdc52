//! Bead Abacus - CLI Entry Point
//!
//! Commands:
//! - `abacus tui` - Interactive abacus (default)
//! - `abacus show <value>` - Print the abacus holding a value
//! - `abacus convert <value>` - Print the per-row digits of a value
//! - `abacus snapshot <value>` - Print the abacus state as JSON
//! - `abacus test` - Built-in self-test

use std::path::PathBuf;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use abacus::{load_config, AbacusConfig, BeadModel, ConfigError};

#[derive(Parser)]
#[command(name = "abacus")]
#[command(author = "Yigit")]
#[command(version = "0.1.0")]
#[command(about = "An interactive place-value abacus with a selectable base (2-16)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Numeric base, 2 to 16 (overrides the config file)
    #[arg(short, long, global = true)]
    base: Option<u8>,

    /// Number of rows, 1 to 16 (overrides the config file)
    #[arg(short, long, global = true)]
    rows: Option<usize>,

    /// JSON config file with `base` and `rows`
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive abacus in the terminal
    Tui,
    /// Print the abacus holding a value
    Show {
        /// Value to lay out (clamped to the abacus range)
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Print each row's digit and bead split for a value
    Convert {
        /// Value to lay out (clamped to the abacus range)
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Print the abacus state for a value as JSON
    Snapshot {
        /// Value to lay out (clamped to the abacus range)
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Run the built-in self-test
    Test,
}

fn main() {
    let cli = Cli::parse();

    let interactive = matches!(cli.command, Some(Commands::Tui) | None);
    let target = log_target(interactive, cli.log_file.as_ref());
    if interactive && cli.verbose > 0 && target == LogTarget::Discard {
        eprintln!("ℹ️  Logs are hidden while the abacus is on screen; use --log-file to keep them.");
    }

    if let Err(e) = init_logging(cli.verbose, target) {
        eprintln!("❌ Failed to open log file: {}", e);
        std::process::exit(1);
    }

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    debug!(base = config.base, rows = config.rows, "configuration resolved");

    match cli.command {
        Some(Commands::Tui) | None => run_tui(&config),
        Some(Commands::Show { value }) => {
            let model = model_with_value(&config, value);
            println!("{}", model);
        }
        Some(Commands::Convert { value }) => {
            convert_value(&config, value);
        }
        Some(Commands::Snapshot { value }) => {
            let model = model_with_value(&config, value);
            match serde_json::to_string_pretty(&model.snapshot()) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("❌ Failed to serialize snapshot: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Test) => {
            run_self_test();
        }
    }
}

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LogTarget {
    Stderr,
    File(PathBuf),
    /// The terminal UI owns the screen.
    Discard,
}

fn log_target(interactive: bool, log_file: Option<&PathBuf>) -> LogTarget {
    match log_file {
        Some(path) => LogTarget::File(path.clone()),
        None if interactive => LogTarget::Discard,
        None => LogTarget::Stderr,
    }
}

fn init_logging(verbose: u8, target: LogTarget) -> std::io::Result<()> {
    use tracing_subscriber::EnvFilter;

    let default_level = match verbose {
        0 => "abacus=warn",
        1 => "abacus=debug",
        _ => "abacus=trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match target {
        LogTarget::File(path) => {
            let file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(std::sync::Mutex::new(file)).init();
        }
        LogTarget::Stderr => builder.with_writer(std::io::stderr).init(),
        LogTarget::Discard => builder.with_ansi(false).with_writer(std::io::sink).init(),
    }
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<AbacusConfig, ConfigError> {
    let base_config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AbacusConfig::default(),
    };
    base_config.with_overrides(cli.base, cli.rows)
}

fn model_with_value(config: &AbacusConfig, value: i64) -> BeadModel {
    let mut model = BeadModel::from_config(config);
    let shown = model.change_value(value);
    if shown as i128 != value as i128 {
        warn!(requested = value, shown, max = model.max_value(), "value clamped to abacus range");
    }
    model
}

fn run_tui(config: &AbacusConfig) {
    #[cfg(feature = "tui")]
    {
        if let Err(e) = abacus::run_abacus(BeadModel::from_config(config)) {
            eprintln!("❌ Terminal error: {}", e);
            std::process::exit(1);
        }
    }

    #[cfg(not(feature = "tui"))]
    {
        let _ = config;
        eprintln!("❌ Built without the `tui` feature");
        std::process::exit(1);
    }
}

fn convert_value(config: &AbacusConfig, value: i64) {
    let model = model_with_value(config, value);
    let base = model.base();

    println!("━━━ {} in base {} ({} rows) ━━━", model.value(), base, model.row_count());
    println!();
    for (i, row) in model.rows().iter().enumerate().rev() {
        println!(
            "row {:>2}  ×{:<20} digit {}  active {:>2}  inactive {:>2}",
            i,
            model.place_value(i),
            base.digit_char(row.active()),
            row.active(),
            row.inactive(),
        );
    }
    println!();
    let row_digits: String = abacus::bead::convert::digits_msb_first(model.rows())
        .into_iter()
        .map(|d| base.digit_char(d))
        .collect();
    println!("Rows:   {}", row_digits);
    println!("Digits: {}", base.format_value(model.value()));
    println!("Max by increment: {}", model.max_value());
    println!("All beads active: {}", abacus::bead::full_value(base, model.row_count()));
}

fn run_self_test() {
    use abacus::{bead, Base, Direction};

    println!("━━━ Abacus Self-Test ━━━");
    println!();

    let mut passed = 0;
    let mut failed = 0;

    // Test 1: Decimal layout
    print!("Decimal layout of 235... ");
    let mut model = BeadModel::new(10, 3);
    model.change_value(235);
    let digits: Vec<u8> = model.rows().iter().map(|r| r.active()).collect();
    if digits == [5, 3, 2] {
        println!("✓");
        passed += 1;
    } else {
        println!("✗ (got {:?}, expected [5, 3, 2])", digits);
        failed += 1;
    }

    // Test 2: Binary counting
    print!("Binary count to 5... ");
    let mut model = BeadModel::new(2, 4);
    for _ in 0..5 {
        model.change_value(1);
    }
    let digits: Vec<u8> = model.rows().iter().map(|r| r.active()).collect();
    if model.value() == 5 && digits == [1, 0, 1, 0] {
        println!("✓");
        passed += 1;
    } else {
        println!("✗ (got {} {:?})", model.value(), digits);
        failed += 1;
    }

    // Test 3: Round trip in every base
    print!("Value/row round trip... ");
    let mut ok = true;
    for radix in Base::MIN..=Base::MAX {
        let base = Base::new(radix);
        let max = bead::max_value(base, 4);
        for v in [0, 1, max / 2, max] {
            let rows = bead::value_to_rows(v, base, 4);
            if bead::rows_to_value(&rows, base) != v {
                ok = false;
            }
        }
    }
    if ok { println!("✓"); passed += 1; }
    else { println!("✗"); failed += 1; }

    // Test 4: Clamping
    print!("Value clamping... ");
    let mut model = BeadModel::new(10, 3);
    let low = model.change_value(-5);
    let high = model.change_value(i64::MAX);
    if low == 0 && high == 900 {
        println!("✓");
        passed += 1;
    } else {
        println!("✗ (got {} and {}, expected 0 and 900)", low, high);
        failed += 1;
    }

    // Test 5: Bead moves
    print!("Bead moves... ");
    let mut model = BeadModel::new(10, 1);
    model.change_value(7);
    let one = model.move_bead(0, Direction::TowardActive, false);
    let all = model.move_bead(0, Direction::TowardActive, true);
    let none = model.move_bead(0, Direction::TowardActive, false);
    if one == Ok(true) && all == Ok(true) && none == Ok(false) && model.value() == 9 {
        println!("✓");
        passed += 1;
    } else {
        println!("✗ (value {})", model.value());
        failed += 1;
    }

    // Test 6: Base change clears
    print!("Base change clears abacus... ");
    let mut model = BeadModel::new(10, 3);
    model.change_value(50);
    model.decrement_base();
    if model.base().get() == 9 && model.value() == 0 && model.rows().iter().all(|r| r.inactive() == 8) {
        println!("✓");
        passed += 1;
    } else {
        println!("✗");
        failed += 1;
    }

    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed == 0 {
        println!("✓ All tests passed!");
    } else {
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interactive_logs_never_reach_stderr() {
        assert_eq!(log_target(true, None), LogTarget::Discard);
        assert_eq!(log_target(false, None), LogTarget::Stderr);

        let path = PathBuf::from("abacus.log");
        assert_eq!(log_target(true, Some(&path)), LogTarget::File(path.clone()));
        assert_eq!(log_target(false, Some(&path)), LogTarget::File(path));
    }

    #[test]
    fn test_default_command_is_interactive() {
        let cli = Cli::try_parse_from(["abacus", "-v"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 1);

        let cli = Cli::try_parse_from(["abacus", "tui"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Tui)));
    }

    #[test]
    fn test_value_is_positional() {
        let cli = Cli::try_parse_from(["abacus", "show", "235", "--base", "10"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Show { value: 235 })));
        assert_eq!(cli.base, Some(10));

        let cli = Cli::try_parse_from(["abacus", "snapshot", "-7"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Snapshot { value: -7 })));

        assert!(Cli::try_parse_from(["abacus", "show", "--value", "5"]).is_err());
    }
}
