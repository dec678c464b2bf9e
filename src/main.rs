use anyhow::{Context, Result, anyhow};
use clap::Parser;
use colored::*;
use std::fs;
use std::io::{self, Read};

use snipfmt_lib::cli_types::{Cli, Commands, FmtArgs, SnippetArgs};
use snipfmt_lib::config::{CONFIG_FILE_NAME, Config, create_default_config};
use snipfmt_lib::document::DocumentFormatter;
use snipfmt_lib::exit_codes::{self, exit};
use snipfmt_lib::file_processor::{FileOutcome, find_files, process_file};
use snipfmt_lib::linter::RuleSet;
use snipfmt_lib::output::{OutputFormat, OutputFormatter, OutputWriter};
use snipfmt_lib::rules::all_rule_names;
use snipfmt_lib::snippet::SnippetFormatter;

fn init_logging(cli: &Cli) {
    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn read_input(file: Option<&str>) -> Result<String> {
    match file {
        None | Some("-") => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input).context("Failed to read stdin")?;
            Ok(input)
        }
        Some(path) => fs::read_to_string(path).with_context(|| format!("Failed to read {path}")),
    }
}

/// Load the configuration and apply the global command-line overrides
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(format) = &cli.output_format {
        config.global.output_format = format.parse().map_err(|e: String| anyhow!(e))?;
    }
    for section in config.unknown_rule_sections(&all_rule_names()) {
        log::warn!("Unknown rule section [{section}] in configuration");
    }
    Ok(config)
}

fn create_formatter(cli: &Cli, config: &Config) -> Box<dyn OutputFormatter> {
    config.global.output_format.create_formatter(!cli.no_color)
}

fn run_fmt(cli: &Cli, args: &FmtArgs) -> Result<i32> {
    let mut config = load_config(cli)?;
    if let Some(mode) = &args.mode {
        config.global.mode = mode.parse().map_err(|e: String| anyhow!(e))?;
    }
    if let Some(max_iterations) = args.max_iterations {
        config.global.max_iterations = max_iterations;
    }
    if let Some(exclude) = &args.exclude {
        config
            .global
            .exclude
            .extend(exclude.split(',').map(str::trim).filter(|p| !p.is_empty()).map(String::from));
    }

    let formatter = DocumentFormatter::from_config(&config);
    let output = create_formatter(cli, &config);
    let writer = OutputWriter::new(cli.quiet || config.global.output_format == OutputFormat::Json);

    if args.reads_stdin() {
        let input = read_input(None)?;
        return match formatter.format(&input) {
            Ok(document) => {
                for warning in &document.warnings {
                    log::warn!("<stdin>: {warning}");
                }
                writer.write(&document.text)?;
                Ok(exit_codes::for_run(0, usize::from(document.changed(&input)), args.check))
            }
            Err(e) => {
                writer.write(&format!("{}\n", output.format_error(&e, "<stdin>")))?;
                Ok(exit_codes::VIOLATIONS_FOUND)
            }
        };
    }

    let files = find_files(&args.paths, &config.global)?;
    let mut files_changed = 0;
    let mut files_failed = 0;

    for path in &files {
        let display = path.display().to_string();
        match process_file(path, &formatter, !args.check)? {
            FileOutcome::Formatted {
                changed, warnings, ..
            } => {
                for warning in warnings {
                    log::info!("{display}: {warning}");
                }
                if changed {
                    files_changed += 1;
                    let verb = if args.check { "Would reformat" } else { "Reformatted" };
                    writer.writeln(&format!("{verb} {display}"))?;
                }
            }
            FileOutcome::Failed(e) => {
                files_failed += 1;
                writer.write(&format!("{}\n", output.format_error(&e, &display)))?;
            }
        }
    }

    if let Some(summary) = output.format_summary(files.len(), files_changed, files_failed) {
        if config.global.output_format == OutputFormat::Json {
            writer.write(&format!("{summary}\n"))?;
        } else {
            writer.writeln(&summary)?;
        }
    }

    Ok(exit_codes::for_run(files_failed, files_changed, args.check))
}

fn run_snippet(cli: &Cli, args: &SnippetArgs) -> Result<i32> {
    let config = load_config(cli)?;
    let input = read_input(args.file.as_deref())?;
    let name = match args.file.as_deref() {
        None | Some("-") => "<stdin>",
        Some(path) => path,
    };

    let formatter = SnippetFormatter::from_config(&config);
    let writer = OutputWriter::new(cli.quiet);
    match formatter.format(&input) {
        Ok(text) => {
            writer.write(&format!("{text}\n"))?;
            Ok(exit_codes::SUCCESS)
        }
        Err(e) => {
            let output = create_formatter(cli, &config);
            writer.write(&format!("{}\n", output.format_error(&e, name)))?;
            Ok(exit_codes::VIOLATIONS_FOUND)
        }
    }
}

fn run_rules(cli: &Cli) -> Result<i32> {
    let config = load_config(cli)?;
    let writer = OutputWriter::new(false);
    for rules in [RuleSet::base(&config), RuleSet::tutorial(&config)] {
        writer.write(&format!("{} (v{}):\n", rules.name.bold(), rules.version))?;
        for rule in rules.rules() {
            writer.write(&format!("  {:<28} {}\n", rule.name().cyan(), rule.description()))?;
        }
    }
    Ok(exit_codes::SUCCESS)
}

fn run_init(cli: &Cli) -> Result<i32> {
    create_default_config(CONFIG_FILE_NAME)?;
    OutputWriter::new(cli.quiet).writeln(&format!("Created {CONFIG_FILE_NAME}"))?;
    Ok(exit_codes::SUCCESS)
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let result = match &cli.command {
        Commands::Fmt(args) => run_fmt(&cli, args),
        Commands::Snippet(args) => run_snippet(&cli, args),
        Commands::Rules => run_rules(&cli),
        Commands::Init => run_init(&cli),
    };

    match result {
        Ok(code) => exit::with_code(code),
        Err(e) => {
            let _ = OutputWriter::new(cli.quiet).write_error(&format!("{}: {e:#}", "Error".red().bold()));
            exit::tool_error();
        }
    }
}
