use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the argument surface from src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
fn completion_cli() -> Command {
    Command::new("mdtex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Markdown to LaTeX converter and typesetting driver")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an mdtex.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a Markdown document to LaTeX")
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("publish")
                .about("Convert the project documents and run the LaTeX toolchain")
                .arg(
                    Arg::new("project")
                        .help("Project directory")
                        .required(false)
                        .default_value(".")
                        .index(1)
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("engine")
                        .long("engine")
                        .value_name("PATH")
                        .help("Explicit LaTeX engine binary")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("pass")
                        .long("pass")
                        .short('p')
                        .help("Run one engine pass per occurrence")
                        .action(ArgAction::Count),
                )
                .arg(
                    Arg::new("skip-typeset")
                        .long("skip-typeset")
                        .help("Convert the documents without running LaTeX")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = completion_cli();

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "mdtex", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "mdtex", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "mdtex", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
