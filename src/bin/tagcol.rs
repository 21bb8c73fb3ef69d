//! Command-line interface for tagcol
//!
//! Usage:
//!   tagcol --path `<file.go>` --structs `<A,B>` [--tag db] [--suf column] [--format go]
//!   tagcol --list-formats

use std::path::PathBuf;
use std::process;

use clap::builder::NonEmptyStringValueParser;
use clap::{Arg, ArgAction, ArgMatches, Command};
use tagcol::codegen::{run, RunOptions};
use tagcol::config::{Loader, TagcolConfig};
use tagcol::{CodegenError, RendererRegistry, RequestedTypes};
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let matches = Command::new("tagcol")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate Go column name lookups from struct tags")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .long("path")
                .help("Go source file containing the structs")
                .value_parser(clap::value_parser!(PathBuf))
                .required_unless_present("list-formats"),
        )
        .arg(
            Arg::new("structs")
                .long("structs")
                .help("Comma separated struct names, e.g. 'User,Person'")
                .value_parser(NonEmptyStringValueParser::new())
                .required_unless_present("list-formats"),
        )
        .arg(
            Arg::new("tag")
                .long("tag")
                .help("Tag key holding the column name [default: db]"),
        )
        .arg(
            Arg::new("suf")
                .long("suf")
                .help("Suffix for the generated file name [default: column]"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output renderer [default: go]"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output renderers")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let registry = RendererRegistry::with_defaults();

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&registry);
        return;
    }

    if let Err(err) = handle_generate_command(&matches, &registry) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Defaults, then `--config`, then individual flags
fn load_config(matches: &ArgMatches) -> Result<TagcolConfig, CodegenError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        loader = loader.with_file(path);
    }
    for (flag, key) in [
        ("tag", "generate.tag"),
        ("suf", "generate.suffix"),
        ("format", "generate.format"),
    ] {
        if let Some(value) = matches.get_one::<String>(flag) {
            loader = loader.set_override(key, value.as_str())?;
        }
    }
    Ok(loader.build()?)
}

fn handle_generate_command(matches: &ArgMatches, registry: &RendererRegistry) -> Result<(), CodegenError> {
    let config = load_config(matches)?;
    let renderer = registry.get(&config.generate.format)?;

    // Both are required by clap unless listing formats
    let (Some(path), Some(structs)) = (
        matches.get_one::<PathBuf>("path"),
        matches.get_one::<String>("structs"),
    ) else {
        return Ok(());
    };

    let options = RunOptions {
        path: path.clone(),
        requested: RequestedTypes::from_csv(structs),
        tag_key: config.generate.tag,
        suffix: config.generate.suffix,
    };
    let written = run(&options, renderer)?;
    println!("{}", written.display());
    Ok(())
}

fn handle_list_formats_command(registry: &RendererRegistry) {
    println!("Available output formats:\n");
    for (name, description) in registry.list_formats() {
        println!("  {name}");
        println!("    {description}");
        println!();
    }
}
