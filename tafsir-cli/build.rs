use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of build_cli() in src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("tafsir")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert plain-text tafsir files into structured JSON")
        .arg_required_else_help(true)
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
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "tafsir", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "tafsir", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "tafsir", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
