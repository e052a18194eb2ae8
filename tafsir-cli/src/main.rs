// Command-line interface for the tafsir converter
//
// Turns the numbered plain-text part files of the German tafsir into JSON, and audits the result.
// All the work happens in tafsir-core; this binary parses arguments, loads configuration, sets up
// logging and maps failures to exit codes.
//
// Usage:
//  tafsir <input_dir> <output_dir>                - Convert (default)
//  tafsir convert <input_dir> <output_dir>        - Same as above (explicit)
//  tafsir validate <json_dir> [--report <file>]   - Check an output directory
//
// Global options:
//  --config <path>   Layered over ./tafsir.toml, which is layered over the built-in defaults
//  -q / -v           Errors only / debug output. RUST_LOG takes precedence over both.
//
// Exit codes: 0 on success, 1 on missing input, unwritable output, bad configuration, or an
// incomplete validation.

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use std::fs;
use std::path::Path;
use tafsir_config::{Loader, TafsirConfig, LOCAL_CONFIG_FILE};
use tafsir_core::{convert_directory, validate_directory};
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["convert", "validate", "help"];
const GLOBAL_FLAGS: &[&str] = &["-q", "--quiet", "-v", "--verbose"];
const GLOBAL_OPTIONS_WITH_VALUE: &[&str] = &["--config"];

fn build_cli() -> Command {
    Command::new("tafsir")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert plain-text tafsir files into structured JSON")
        .long_about(
            "tafsir converts the numbered part files of a plain-text tafsir into JSON records,\n\
            one per verse, written per chapter and as one combined file.\n\n\
            Commands:\n  \
            - convert:  Parse part files and write the JSON output (default)\n  \
            - validate: Check an output directory against the canonical verse counts\n\n\
            Examples:\n  \
            tafsir ./tafsir-txt ./tafsir-json                 # Convert\n  \
            tafsir validate ./tafsir-json --report report.txt # Audit the output",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a tafsir.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Only log errors")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log per-file details")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a directory of part files (default command)")
                .long_about(
                    "Reads every <prefix><N>.txt part file in INPUT_DIR in order of N and writes\n\
                    one JSON array per chapter plus the combined file into OUTPUT_DIR.\n\n\
                    Irregular lines never stop the conversion. They are logged as warnings\n\
                    and counted in the summary.\n\n\
                    Examples:\n  \
                    tafsir convert ./tafsir-txt ./tafsir-json\n  \
                    tafsir ./tafsir-txt ./tafsir-json            # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Directory holding the numbered part files")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("output")
                        .help("Directory for the JSON files")
                        .required(true)
                        .index(2)
                        .value_hint(ValueHint::DirPath),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Check an output directory for missing chapters and verses")
                .arg(
                    Arg::new("dir")
                        .help("Directory holding the JSON chapter files")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("report")
                        .long("report")
                        .value_name("FILE")
                        .help("Write a plain-text report to FILE")
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

/// Arguments with `convert` inserted before the first positional argument
///
/// Leading global options (and the value of `--config`) are skipped. Nothing is
/// injected when the first positional is a subcommand or an unknown flag comes first.
fn with_default_subcommand(args: &[String]) -> Option<Vec<String>> {
    let mut idx = 1;
    while let Some(arg) = args.get(idx) {
        if GLOBAL_FLAGS.contains(&arg.as_str()) || arg.starts_with("--config=") {
            idx += 1;
        } else if GLOBAL_OPTIONS_WITH_VALUE.contains(&arg.as_str()) {
            idx += 2;
        } else {
            break;
        }
    }

    let first = args.get(idx)?;
    if first.starts_with('-') || SUBCOMMANDS.contains(&first.as_str()) {
        return None;
    }
    let mut injected = args[..idx].to_vec();
    injected.push("convert".to_string());
    injected.extend_from_slice(&args[idx..]);
    Some(injected)
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => match with_default_subcommand(&args) {
            Some(injected) => match cli.try_get_matches_from(&injected) {
                Ok(m) => m,
                Err(e2) => e2.exit(),
            },
            None => e.exit(),
        },
    };

    init_logging(matches.get_flag("quiet"), matches.get_flag("verbose"));

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("convert", sub_matches)) => handle_convert_command(sub_matches, &config),
        Some(("validate", sub_matches)) => handle_validate_command(sub_matches, &config),
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn default_log_level(quiet: bool, verbose: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    }
}

fn init_logging(quiet: bool, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(quiet, verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_cli_config(explicit_path: Option<&str>) -> TafsirConfig {
    let loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Handle the convert command
fn handle_convert_command(matches: &ArgMatches, config: &TafsirConfig) {
    let input = matches
        .get_one::<String>("input")
        .expect("input is required");
    let output = matches
        .get_one::<String>("output")
        .expect("output is required");

    let options = config.convert_options();
    let report = convert_directory(
        Path::new(input),
        Path::new(output),
        &options,
        chrono::Utc::now(),
    )
    .unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    println!("Converted '{input}' into '{output}'");
    for line in report.summary_lines() {
        println!("{line}");
    }
}

/// Handle the validate command
fn handle_validate_command(matches: &ArgMatches, config: &TafsirConfig) {
    let dir = matches.get_one::<String>("dir").expect("dir is required");

    let report = validate_directory(Path::new(dir), &config.emit_options()).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    for line in report.summary_lines() {
        println!("{line}");
    }

    if let Some(path) = matches.get_one::<String>("report") {
        fs::write(path, report.render_text()).unwrap_or_else(|e| {
            eprintln!("Error writing file '{path}': {e}");
            std::process::exit(1);
        });
        println!("Report written to '{path}'");
    }

    if report.is_complete() {
        println!("All checks passed.");
    } else {
        eprintln!("Validation found missing chapters, verses or unreadable files");
        std::process::exit(1);
    }
}
