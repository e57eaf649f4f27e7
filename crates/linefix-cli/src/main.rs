use anyhow::{bail, Context, Result};
use clap::Parser;
use env_logger::{Builder, Env};
use linefix_core::{
    load_from_path, load_from_str, patch_file, run_preflight_checks, Outcome, RuleSet,
};
use log::debug;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "linefix", author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Run the built-in icon fix against src/lib/mockData.ts
    linefix

    # Apply a rule set to another file without writing it
    linefix --rules fixes.toml --file data/entries.ts --dry-run

    # Read the rule set from stdin
    cat fixes.toml | linefix --rules -

RULE SET:
    file = "src/lib/mockData.ts"
    done_message = "File rewritten successfully."

    [[rules]]
    marker = 'name: "Família & Visitas"'
    offset = 2
    guard = "icon:"
    replacement = '    icon: "👨‍👩‍👧",'
    message = "Patched line {line}""#)]
struct Args {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "TOML rule set, or - to read it from stdin [default: built-in icon fix]"
    )]
    rules: Option<PathBuf>,

    #[arg(
        short,
        long,
        value_name = "PATH",
        help = "File to patch [default: from rule set]"
    )]
    file: Option<PathBuf>,

    #[arg(long, help = "Apply rules in memory only, do not rewrite the file")]
    dry_run: bool,

    #[arg(long, help = "Exit with status 1 when any rule did not apply")]
    strict: bool,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load_rule_set(args: &Args) -> Result<RuleSet> {
    let mut rule_set = match &args.rules {
        Some(path) if path.as_os_str() == "-" => {
            if atty::is(atty::Stream::Stdin) {
                bail!("--rules - given but no data piped from stdin");
            }
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read rule set from stdin")?;
            load_from_str(&buffer)?
        }
        Some(path) => load_from_path(path)?,
        None => RuleSet::builtin(),
    };

    if let Some(file) = &args.file {
        rule_set.file = file.clone();
    }

    Ok(rule_set)
}

fn run(args: &Args, out: &mut impl Write) -> Result<bool> {
    let rule_set = load_rule_set(args)?;
    debug!(
        "Loaded {} rule(s) targeting {:?}",
        rule_set.rules.len(),
        rule_set.file
    );

    if rule_set.rules.is_empty() {
        writeln!(out, "No rules found in the rule set.")?;
        return Ok(true);
    }

    if let Err(errors) = run_preflight_checks(&rule_set.file, &rule_set.rules) {
        eprintln!("--- Preflight Checks Failed ---");
        for err in errors {
            eprintln!("{}", err);
        }
        eprintln!("Aborting. No files were modified.");
        return Ok(false);
    }

    let report = patch_file(&rule_set.file, &rule_set.rules, args.dry_run)?;

    for rule_report in &report.rules {
        if let Outcome::Patched { line } | Outcome::AlreadyApplied { line } = rule_report.outcome {
            writeln!(out, "{}", rule_report.rule.render_message(line))?;
        }
    }

    if report.written {
        writeln!(out, "{}", rule_set.done_message)?;
    } else {
        writeln!(out, "[DRY RUN] {:?} was not rewritten.", report.file_path)?;
    }

    Ok(!args.strict || report.all_applied())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args, &mut io::stdout().lock()) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
