// Command-line interface for stelm
//
// This binary feeds text files (or stdin) through the stelm markup engine.
//
// The main role for the stelm program is rendering: reading marked-up text and writing the HTML.
// The engine itself lives in the stelm-format crate and its settings in stelm-config; this crate
// only does the plumbing between files, configuration layers and the engine.
//
// Usage:
//  stelm <input> [--output <file>]          - Render to HTML (default)
//  stelm render <input> [--output <file>]   - Same as above (explicit)
//  stelm inspect <input> [<transform>]      - Show the fragments (defaults to "fragments-json")
//  stelm generate-config                    - Print the default configuration
//  stelm --list-units                       - List the formatters in the active queue
//
// An input of "-" reads from stdin.
//
// Extra Parameters:
//
// Engine settings can be overridden using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and applies them over the loaded configuration.
// Example:
//  stelm notes.txt --extra-substitutions --extra-max-depth 5

use stelm_cli::inspect;

use clap::{Arg, ArgAction, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use stelm_config::{Loader, StelmConfig, DEFAULT_TOML};
use stelm_format::Engine;

const SUBCOMMANDS: &[&str] = &["render", "inspect", "generate-config", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = args
                .get(i + 1)
                .is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("stelm")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render stelm inline markup to HTML")
        .long_about(
            "stelm is a command-line tool for rendering stelm inline markup.\n\n\
            Markup:\n  \
            *bold*  _italic_  -strike-  {{code}}  \\escape\n  \
            http://url  http://url|name  http://url|\"quoted name\"\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to override engine settings:\n  \
            max-depth, substitutions, hashtags, escape-input, tag-prefix.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            stelm notes.txt                          # Render to stdout\n  \
            stelm notes.txt -o notes.html            # Render to a file\n  \
            cat notes.txt | stelm -                  # Render stdin\n  \
            stelm notes.txt --extra-substitutions    # Also line breaks, dashes, rules",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-units")
                .long("list-units")
                .help("List the formatters in the active queue")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a stelm.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("render")
                .about("Render a file to HTML (default command)")
                .long_about(
                    "Render marked-up text to HTML.\n\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    stelm render notes.txt                   # Render to stdout\n  \
                    stelm render notes.txt -o notes.html     # Render to a file\n  \
                    stelm notes.txt                          # 'render' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path, or - for stdin")
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
            Command::new("inspect")
                .about("Inspect the fragments the engine produces")
                .long_about(
                    "View the output of the engine before it is joined into HTML.\n\n\
                    Transforms:\n  \
                    - fragments-json:    Fragments as a JSON array (default)\n  \
                    - fragments-simple:  One quoted fragment per line\n  \
                    - html:              Rendered HTML\n\n\
                    Examples:\n  \
                    stelm inspect notes.txt                    # JSON fragments\n  \
                    stelm inspect notes.txt fragments-simple   # One per line",
                )
                .arg(
                    Arg::new("path")
                        .help("Input file path, or - for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply. Defaults to 'fragments-json'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            inspect::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("generate-config")
                .about("Output the default configuration")
                .long_about(
                    "Outputs the built-in defaults as TOML.\n\n\
                    Save it as stelm.toml in the working directory (picked up automatically)\n\
                    or anywhere else and pass it with --config.\n\n\
                    Examples:\n  \
                    stelm generate-config > stelm.toml",
                ),
        )
}

fn main() {
    env_logger::init();

    // Try to parse args. If no subcommand is provided, inject "render"
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A bare input path (or "-" for stdin) means the default command
            let looks_like_input = cleaned_args.get(1).is_some_and(|first| {
                (first == "-" || !first.starts_with('-')) && !SUBCOMMANDS.contains(&first.as_str())
            });

            if looks_like_input {
                let mut new_args = vec![cleaned_args[0].clone(), "render".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.subcommand_name() == Some("generate-config") {
        print!("{DEFAULT_TOML}");
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    if let Some(unknown) = extra_params.keys().min() {
        eprintln!("Error: Unknown parameter --extra-{unknown}");
        std::process::exit(1);
    }

    let engine = config.build_engine().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    log::debug!("active units: {}", engine.queue().names().join(", "));

    if matches.get_flag("list-units") {
        handle_list_units_command(&engine);
        return;
    }

    match matches.subcommand() {
        Some(("render", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_render_command(input, output, &engine, &config);
        }
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or(inspect::DEFAULT_TRANSFORM);
            handle_inspect_command(path, transform, &engine, &config);
        }
        _ => {
            eprintln!("Error: Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Read a whole input, where "-" stands for stdin
fn read_input(path: &str) -> String {
    let result = if path == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source).map(|_| source)
    } else {
        fs::read_to_string(path)
    };

    result.unwrap_or_else(|e| {
        eprintln!("Error: Could not read '{path}': {e}");
        std::process::exit(1);
    })
}

/// Handle the render command
fn handle_render_command(input: &str, output: Option<&str>, engine: &Engine, config: &StelmConfig) {
    let source = read_input(input);
    let text = inspect::prepare_input(&source, config.engine.escape_input);
    let html = engine.render(&text);

    match output {
        Some(path) => {
            fs::write(path, html).unwrap_or_else(|e| {
                eprintln!("Error: Could not write '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{html}"),
    }
}

/// Handle the inspect command
fn handle_inspect_command(path: &str, transform: &str, engine: &Engine, config: &StelmConfig) {
    let source = read_input(path);

    let output =
        inspect::execute_transform(engine, &source, transform, config.engine.escape_input)
            .unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                std::process::exit(1);
            });

    print!("{output}");
}

/// Handle the list-units command
fn handle_list_units_command(engine: &Engine) {
    println!("Active units, in priority order:\n");
    for unit in engine.queue().iter() {
        println!("  {:<16} {}", unit.name(), unit.description());
    }
    println!("\nMaximum nesting depth: {}", engine.max_depth());
}

fn load_cli_config(explicit_path: Option<&str>) -> StelmConfig {
    let loader = Loader::new().with_optional_file("stelm.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Error: Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_config_overrides(config: &mut StelmConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = extra_params.remove("max-depth") {
        config.engine.max_depth = raw.parse().unwrap_or_else(|_| {
            eprintln!("Error: Invalid number '{raw}' for --extra-max-depth");
            std::process::exit(1);
        });
    }
    if let Some(raw) = take_override(extra_params, &["substitutions", "subs"]) {
        config.engine.substitutions = parse_bool_arg("substitutions", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["hashtags", "tags"]) {
        config.engine.hashtags = parse_bool_arg("hashtags", &raw);
    }
    if let Some(raw) = extra_params.remove("escape-input") {
        config.engine.escape_input = parse_bool_arg("escape-input", &raw);
    }
    if let Some(prefix) = take_override(extra_params, &["tag-prefix", "url-prefix"]) {
        config.hashtag.url_prefix = prefix;
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Error: Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
