//! Vesper driver CLI.
//!
//! Loads a serialized host syntax tree (JSON produced by an external
//! parser), lowers it against the default registry, and runs an entry
//! function. Parsing host source text is not this program's job.

use std::process::exit;

use vesper_ir::ast::SourceUnit;
use vesper_lower::lower_unit;
use vesper_rt::{default_registry, format_value, SharedInterner, Value};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "run" => {
            let Some(options) = RunOptions::parse(&args[2..]) else {
                eprintln!("Usage: vesper run <unit.json> [--entry=<name>] [--trace]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --entry=<name>   Entry function (default: main)");
                eprintln!("  --trace          Verbose compiler/evaluator logging");
                exit(1);
            };
            init_tracing(options.trace);
            match run_file(&options.path, &options.entry) {
                Ok(results) => {
                    if !results.is_empty() {
                        let interner = SharedInterner::new();
                        let rendered: Vec<String> = results
                            .iter()
                            .map(|v| format_value(v, &interner))
                            .collect();
                        println!("{}", rendered.join(" "));
                    }
                }
                Err(message) => {
                    eprintln!("error: {message}");
                    exit(1);
                }
            }
        }
        "check" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: vesper check <unit.json>");
                exit(1);
            };
            init_tracing(false);
            match check_file(path) {
                Ok(funcs) => println!("ok: {funcs} function(s)"),
                Err(message) => {
                    eprintln!("error: {message}");
                    exit(1);
                }
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("unknown command: {other}");
            print_usage();
            exit(1);
        }
    }
}

struct RunOptions {
    path: String,
    entry: String,
    trace: bool,
}

impl RunOptions {
    fn parse(args: &[String]) -> Option<Self> {
        let mut path = None;
        let mut entry = "main".to_owned();
        let mut trace = false;
        for arg in args {
            if let Some(name) = arg.strip_prefix("--entry=") {
                entry = name.to_owned();
            } else if arg == "--trace" {
                trace = true;
            } else if !arg.starts_with('-') && path.is_none() {
                path = Some(arg.clone());
            } else {
                return None;
            }
        }
        Some(RunOptions {
            path: path?,
            entry,
            trace,
        })
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_env("VESPER_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Deserialize one compilation unit from disk.
fn load_unit(path: &str) -> Result<SourceUnit, String> {
    let text =
        std::fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    let unit: SourceUnit =
        serde_json::from_str(&text).map_err(|e| format!("cannot parse {path}: {e}"))?;
    tracing::debug!(path, package = %unit.package, funcs = unit.funcs.len(), "loaded unit");
    Ok(unit)
}

/// Load, lower, and run `entry` with no arguments.
fn run_file(path: &str, entry: &str) -> Result<Vec<Value>, String> {
    let unit = load_unit(path)?;
    let registry = default_registry();
    let interner = SharedInterner::new();
    let package = lower_unit(&unit, &registry, &interner).map_err(|e| e.to_string())?;
    vesper_eval::run(&package, &registry, &interner, entry, vec![]).map_err(|e| e.to_string())
}

/// Load and lower only.
fn check_file(path: &str) -> Result<usize, String> {
    let unit = load_unit(path)?;
    let registry = default_registry();
    let interner = SharedInterner::new();
    let package = lower_unit(&unit, &registry, &interner).map_err(|e| e.to_string())?;
    Ok(package.len())
}

fn print_usage() {
    println!("Vesper - host-tree interpreter");
    println!();
    println!("Usage:");
    println!("  vesper run <unit.json> [--entry=<name>] [--trace]");
    println!("  vesper check <unit.json>");
    println!("  vesper help");
}
