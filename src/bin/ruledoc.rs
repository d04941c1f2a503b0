//! Command-line interface for ruledoc
//! Compiles comment-annotated rulesets into style guides.
//!
//! Usage:
//!   ruledoc `<input>` [`<output>`] [--format `<format>`]   - Compile one ruleset (stdout without `<output>`)
//!   ruledoc --dir `<dir>` [--out-dir `<dir>`]              - Compile every `*-ruleset.yaml` under a directory
//!   ruledoc --list-formats                               - List available output formats
//!
//! Configuration comes from `--config <file>` (or `./ruledoc.toml`), `RULEDOC_*`
//! environment variables and `--set key=value`, in increasing precedence.

use clap::{Arg, ArgAction, ArgMatches, Command};
use ruledoc::ruledoc::config::{Loader, RuledocConfig, LOCAL_CONFIG_FILE};
use ruledoc::ruledoc::{Result, StyleGuideLoader};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("ruledoc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate a style guide from a comment-annotated ruleset")
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .help("Path to the ruleset file")
                .required_unless_present_any(["dir", "list-formats"])
                .conflicts_with("dir")
                .index(1),
        )
        .arg(
            Arg::new("output")
                .help("Where to write the style guide (default: stdout)")
                .index(2),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (default: render.format from config, 'markdown')"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults (default: ./ruledoc.toml if present)"),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .value_name("KEY=VALUE")
                .help("Override a single config key, e.g. --set render.warn_color=orange")
                .value_parser(parse_override)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("dir")
                .long("dir")
                .help("Compile every ruleset file found under this directory"),
        )
        .arg(
            Arg::new("out-dir")
                .long("out-dir")
                .help("Directory for style guides generated with --dir (default: current directory)")
                .requires("dir"),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log more (repeat for debug output)")
                .action(ArgAction::Count),
        )
}

fn main() {
    let matches = cli().get_matches();
    init_tracing(matches.get_count("verbose"));

    if let Err(e) = run(&matches) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays reserved for the generated document.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ruledoc={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn parse_override(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

fn load_config(matches: &ArgMatches) -> Result<RuledocConfig> {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(LOCAL_CONFIG_FILE),
    };
    loader = loader.with_env();
    if let Some(overrides) = matches.get_many::<(String, String)>("set") {
        for (key, value) in overrides {
            loader = loader.set_override(key, value.as_str())?;
        }
    }
    Ok(loader.build()?)
}

fn run(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let loader = StyleGuideLoader::from_config(&config);

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&loader);
        return Ok(());
    }

    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or_else(|| loader.default_format());

    if let Some(dir) = matches.get_one::<String>("dir") {
        let out_dir = matches
            .get_one::<String>("out-dir")
            .map(String::as_str)
            .unwrap_or(".");
        return handle_dir_command(&loader, dir, out_dir, format);
    }

    let input = matches
        .get_one::<String>("input")
        .expect("input is required unless --dir or --list-formats is given");
    let output = matches.get_one::<String>("output").map(Path::new);

    if let Some(rendered) = loader.generate(input, output, format)? {
        print!("{rendered}");
    }
    Ok(())
}

fn handle_dir_command(loader: &StyleGuideLoader, dir: &str, out_dir: &str, format: &str) -> Result<()> {
    let written = loader.generate_all(dir, out_dir, format)?;
    if written.is_empty() {
        println!("No ruleset files found in {dir}");
    }
    for path in written {
        println!("Generated: {}", path.display());
    }
    Ok(())
}

fn handle_list_formats_command(loader: &StyleGuideLoader) {
    let registry = loader.registry();
    println!("Available output formats:\n");

    for name in registry.list_formats() {
        println!("  {name}");
        if let Some(formatter) = registry.get(&name) {
            println!("    {}", formatter.description());
        }
        println!();
    }
}
