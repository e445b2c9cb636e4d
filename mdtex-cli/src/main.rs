// Command-line interface for mdtex
//
// This binary drives the Markdown to LaTeX pipeline: single documents are
// converted on demand, and whole projects are converted and handed to a
// LaTeX engine in one step.
//
// Converting takes one input file and writes LaTeX to stdout or to a file.
// Publishing converts the configured project documents (main plus appendix
// by default) and then runs the typesetting toolchain over the root
// document, unless --skip-typeset is given.
//
// Usage:
//  mdtex <input> [-o <file>]           - Convert a single document (default)
//  mdtex convert <input> [-o <file>]   - Same as above (explicit)
//  mdtex publish [<project>] [--engine <path>] [-p...] [--skip-typeset]
//                                      - Convert project documents and typeset
//
// Configuration:
//  Settings layer built-in defaults, then an optional mdtex.toml in the
//  project directory, then an explicit --config file.

use clap::{Arg, ArgAction, Command, ValueHint};
use mdtex::publish::{publish, publish_pair, PublishArtifact, PublishSpec};
use mdtex::typeset::{self, TypesetSpec, MAX_PASSES};
use mdtex::ConvertOptions;
use mdtex_config::{Loader, MdtexConfig};
use std::path::Path;

fn build_cli() -> Command {
    Command::new("mdtex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Markdown to LaTeX converter and typesetting driver")
        .long_about(
            "mdtex converts a dialect of Markdown into LaTeX fragments and can\n\
            drive a LaTeX engine over the result.\n\n\
            Commands:\n  \
            - convert: Turn one Markdown document into LaTeX (default)\n  \
            - publish: Convert the project documents and typeset them\n\n\
            Examples:\n  \
            mdtex notes.md                       # Convert to LaTeX (stdout)\n  \
            mdtex notes.md -o notes.tex          # Convert to a file\n  \
            mdtex publish                        # Convert and typeset the current project\n  \
            mdtex publish thesis --skip-typeset  # Convert the documents only",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
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
                .about("Convert a Markdown document to LaTeX (default command)")
                .long_about(
                    "Convert one Markdown document into a LaTeX fragment.\n\n\
                    The fragment carries no preamble; it is meant to be \\input\n\
                    into a surrounding LaTeX template. Output goes to stdout by\n\
                    default, or use -o to write a file.\n\n\
                    Examples:\n  \
                    mdtex convert notes.md               # Convert to stdout\n  \
                    mdtex convert notes.md -o notes.tex  # Convert to a file\n  \
                    mdtex notes.md                       # 'convert' is optional",
                )
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
                        .long_help(
                            "Path to write the generated LaTeX.\n\n\
                            If not specified, output is written to stdout.",
                        )
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("publish")
                .about("Convert the project documents and run the LaTeX toolchain")
                .long_about(
                    "Convert every configured project document to a .tex fragment\n\
                    next to its source, then run the LaTeX engine over the root\n\
                    document (the first configured source). A failing document\n\
                    does not stop its siblings from converting.\n\n\
                    Examples:\n  \
                    mdtex publish                   # Current directory\n  \
                    mdtex publish thesis            # Named project directory\n  \
                    mdtex publish -ppp              # Three engine passes\n  \
                    mdtex publish --skip-typeset    # Conversion only",
                )
                .arg(
                    Arg::new("project")
                        .help("Project directory (defaults to the current directory)")
                        .required(false)
                        .default_value(".")
                        .index(1)
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("engine")
                        .long("engine")
                        .value_name("PATH")
                        .help("Explicit LaTeX engine binary (skips discovery)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("pass")
                        .long("pass")
                        .short('p')
                        .help("Run one engine pass per occurrence (overrides configuration)")
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

fn main() {
    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            if should_inject_convert(&args) {
                // Inject "convert" as the subcommand
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);

                // Try parsing again with "convert" injected
                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                // Not a case where we should inject convert, show original error
                e.exit();
            }
        }
    };

    let config_path = matches.get_one::<String>("config").map(|s| s.as_str());

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let config = load_cli_config(Path::new("."), config_path);
            handle_convert_command(input, output, &config);
        }
        Some(("publish", sub_matches)) => {
            let project = sub_matches
                .get_one::<String>("project")
                .expect("project has a default");
            let engine = sub_matches.get_one::<String>("engine").map(|s| s.as_str());
            let cli_passes = sub_matches.get_count("pass");
            let skip_typeset = sub_matches.get_flag("skip-typeset");
            let config = load_cli_config(Path::new(project), config_path);
            handle_publish_command(Path::new(project), engine, cli_passes, skip_typeset, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Decide whether a failed parse should be retried with an injected
/// "convert" subcommand. True when the first argument looks like a file
/// rather than a flag or a known subcommand.
fn should_inject_convert(args: &[String]) -> bool {
    args.len() > 1
        && !args[1].starts_with('-')
        && args[1] != "convert"
        && args[1] != "publish"
        && args[1] != "help"
}

/// Handle the convert command
fn handle_convert_command(input: &str, output: Option<&str>, config: &MdtexConfig) {
    let options: ConvertOptions = (&config.convert).into();
    let mut spec = PublishSpec::new(Path::new(input)).with_options(options);
    if let Some(path) = output {
        spec = spec.with_output_path(path);
    }

    match publish(spec) {
        Ok(result) => {
            if let PublishArtifact::InMemory(latex) = result.artifact {
                print!("{latex}");
            }
        }
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}

/// Handle the publish command
fn handle_publish_command(
    project_dir: &Path,
    engine: Option<&str>,
    cli_passes: u8,
    skip_typeset: bool,
    config: &MdtexConfig,
) {
    let sources = &config.publish.sources;
    if sources.is_empty() {
        eprintln!("No project documents configured under [publish] sources");
        std::process::exit(1);
    }

    // A bad pass count is rejected before any fragment is written.
    let passes = resolve_passes(cli_passes, config.typeset.passes);
    if !skip_typeset && (passes == 0 || passes > MAX_PASSES) {
        eprintln!("Pass count must be between 1 and {MAX_PASSES}, got {passes}");
        std::process::exit(1);
    }

    let options: ConvertOptions = (&config.convert).into();
    if let Err(err) = publish_pair(project_dir, sources, &options) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    if skip_typeset {
        return;
    }

    let mut spec: TypesetSpec = (&config.typeset).into();
    if let Some(path) = engine {
        spec = spec.with_engine_path(path);
    }
    spec = spec.with_passes(passes);

    if let Err(err) = typeset::run(project_dir, typeset_root(sources), &spec) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

/// The engine runs over the first configured source document.
fn typeset_root(sources: &[String]) -> &str {
    sources
        .first()
        .map(|source| {
            Path::new(source)
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or(source.as_str())
        })
        .unwrap_or("main")
}

/// The -p flag wins over the configured pass count when given at all.
fn resolve_passes(cli_passes: u8, configured: u8) -> u8 {
    if cli_passes > 0 {
        cli_passes
    } else {
        configured
    }
}

fn load_cli_config(project_dir: &Path, explicit_path: Option<&str>) -> MdtexConfig {
    let loader = Loader::new().with_optional_file(project_dir.join("mdtex.toml"));
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
