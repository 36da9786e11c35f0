//! Paging Simulator - Main Entry Point
//!
//! Usage: paging-sim [OPTIONS] [script_file]
//!
//! Arguments:
//!   script_file - Requests to run (alloc/free/show); the reference run if omitted
//!
//! Options:
//!   -v, --verbose          Log every frame granted and released
//!   -q, --quiet            Only log warnings and errors
//!   --ram-size <N>         Bytes of simulated RAM
//!   --page-size <N>        Bytes per page
//!   --max-processes <N>    Process table slots
//!   --no-pause             Exit without waiting for enter
//!   -h, --help             Print help information

use std::env;
use std::io::{self, BufRead, Write};
use std::process;

use log::{LevelFilter, info};

use paging_sim::io::Script;
use paging_sim::{Allocator, MemoryConfig, logging};

/// Command-line configuration
struct Config {
    script_file: Option<String>,
    memory: MemoryConfig,
    log_level: LevelFilter,
    pause: bool,
}

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = logging::init(config.log_level) {
        eprintln!("{}", e);
    }

    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    if config.pause {
        pause();
    }
}

fn print_help(program: &str) {
    eprintln!("Paging Simulator - fixed-size page allocation over a simulated RAM");
    eprintln!();
    eprintln!("Usage: {} [OPTIONS] [script_file]", program);
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  script_file - Requests, one per line:");
    eprintln!("                alloc <id> <size> | free <id> | show | memory | processes");
    eprintln!("                Runs the reference scenario if omitted");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -v, --verbose          Log every frame granted and released");
    eprintln!("  -q, --quiet            Only log warnings and errors");
    eprintln!("  --ram-size <N>         Bytes of simulated RAM (default {})", paging_sim::RAM_SIZE);
    eprintln!("  --page-size <N>        Bytes per page (default {})", paging_sim::PAGE_SIZE);
    eprintln!("  --max-processes <N>    Process table slots (default {})", paging_sim::MAX_PROCESSES);
    eprintln!("  --no-pause             Exit without waiting for enter");
    eprintln!("  -h, --help             Print this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {}", program);
    eprintln!("  {} -v --no-pause requests.txt", program);
}

fn parse_args() -> Result<Config, String> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("paging-sim");

    let mut memory = MemoryConfig::default();
    let mut log_level = LevelFilter::Info;
    let mut pause = true;
    let mut positional: Vec<&String> = Vec::new();

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help(program);
                process::exit(0);
            }
            "-v" | "--verbose" => log_level = LevelFilter::Debug,
            "-q" | "--quiet" => log_level = LevelFilter::Warn,
            "--no-pause" => pause = false,
            "--ram-size" => memory.ram_size = parse_number(arg, iter.next())?,
            "--page-size" => memory.page_size = parse_number(arg, iter.next())?,
            "--max-processes" => memory.max_processes = parse_number(arg, iter.next())?,
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}\nUse --help for usage information.", arg));
            }
            _ => positional.push(arg),
        }
    }

    if positional.len() > 1 {
        print_help(program);
        return Err(format!("\nError: Expected at most 1 argument, got {}", positional.len()));
    }

    memory
        .validate()
        .map_err(|e| format!("Invalid memory configuration: {}", e))?;

    Ok(Config {
        script_file: positional.first().map(|s| s.to_string()),
        memory,
        log_level,
        pause,
    })
}

fn parse_number(option: &str, value: Option<&String>) -> Result<usize, String> {
    let value = value.ok_or_else(|| format!("Option {} needs a value", option))?;
    value
        .parse()
        .map_err(|_| format!("Invalid value for {}: {}", option, value))
}

/// Main logic separated from main() for cleaner error handling
fn run(config: &Config) -> Result<(), String> {
    let script = match &config.script_file {
        Some(path) => Script::from_file(path)?,
        None => Script::reference(),
    };

    let mut allocator = Allocator::new(config.memory);
    info!(
        "{} requests, {} pages of {} bytes, {} process slots",
        script.requests.len(),
        config.memory.num_pages(),
        config.memory.page_size,
        config.memory.max_processes
    );

    let summary = script.run(&mut allocator);
    info!(
        "allocated {}, refused {}, freed {}, not found {}",
        summary.allocated, summary.refused, summary.freed, summary.not_found
    );

    Ok(())
}

fn pause() {
    print!("press enter to exit...");
    // nothing useful to do if stdout or stdin are gone
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}
