//! Command-line interface for pygrammar
//! This binary tokenizes Python files and matches them against rules of the built-in grammar.
//!
//! Usage:
//!   pygrammar tokens `<path>` [--format `<format>`]                  - Print the token stream
//!   pygrammar match `<path>` --rule `<rule>` [--mock `<rule>`]...
//!                   [--partial] [--format `<format>`]               - Match a rule against a file
//!   pygrammar rules [`<rule>`]                                     - Print grammar rules as EBNF
//!
//! Configuration: a `pygrammar.toml` in the working directory is layered over the
//! built-in defaults when present. Global options: --config `<file>` layers another
//! TOML file on top, --no-memoize turns off the rule cache. Logging is controlled with
//! RUST_LOG.

use clap::{Arg, ArgAction, ArgMatches, Command};
use pygrammar::python::config::{GrammarConfig, Loader, CONFIG_FILE_NAME};
use pygrammar::python::formats::{self, Format};
use pygrammar::python::grammar::python_grammar;
use pygrammar::python::lexing;
use pygrammar::python::parsing::{MatchError, MatchResult, Matcher, ParseTree};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pygrammar=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let format_arg = Arg::new("format")
        .long("format")
        .short('f')
        .help("Output format: tree, json or yaml")
        .default_value("tree");

    let matches = Command::new("pygrammar")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tokenize Python source and match it against grammar rules")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("no-memoize")
                .long("no-memoize")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Disable the rule result cache"),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream of a file")
                .arg(
                    Arg::new("path")
                        .help("Path to the Python file")
                        .required(true)
                        .index(1),
                )
                .arg(format_arg.clone()),
        )
        .subcommand(
            Command::new("match")
                .about("Match a grammar rule against a file")
                .arg(
                    Arg::new("path")
                        .help("Path to the Python file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("rule")
                        .long("rule")
                        .short('r')
                        .help("Rule to match")
                        .default_value("file_input"),
                )
                .arg(
                    Arg::new("mock")
                        .long("mock")
                        .short('m')
                        .action(ArgAction::Append)
                        .help("Replace a rule with a placeholder matching its own name"),
                )
                .arg(
                    Arg::new("partial")
                        .long("partial")
                        .action(ArgAction::SetTrue)
                        .help("Accept a match of any prefix of the input"),
                )
                .arg(format_arg),
        )
        .subcommand(
            Command::new("rules")
                .about("Print grammar rules")
                .arg(Arg::new("rule").help("Only print this rule").index(1)),
        )
        .get_matches();

    let config = load_config(&matches).unwrap_or_else(|e| fail("Configuration error", e));

    match matches.subcommand() {
        Some(("tokens", tokens_matches)) => handle_tokens_command(tokens_matches, &config),
        Some(("match", match_matches)) => handle_match_command(match_matches, &config),
        Some(("rules", rules_matches)) => handle_rules_command(rules_matches),
        _ => unreachable!(),
    }
}

fn fail(context: &str, error: impl std::fmt::Display) -> ! {
    eprintln!("{context}: {error}");
    process::exit(1);
}

fn load_config(matches: &ArgMatches) -> Result<GrammarConfig, config::ConfigError> {
    let mut loader = Loader::new().with_optional_file(CONFIG_FILE_NAME);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if matches.get_flag("no-memoize") {
        loader = loader.set_override("engine.memoize", false)?;
    }
    loader.build()
}

fn read_source(matches: &ArgMatches) -> String {
    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or_default();
    std::fs::read_to_string(path).unwrap_or_else(|e| fail("Error reading file", e))
}

fn output_format(matches: &ArgMatches) -> Format {
    matches
        .get_one::<String>("format")
        .map(|name| name.parse::<Format>())
        .unwrap_or(Ok(Format::Tree))
        .unwrap_or_else(|e| fail("Invalid format", e))
}

/// Handle the tokens command
fn handle_tokens_command(matches: &ArgMatches, config: &GrammarConfig) {
    let source = read_source(matches);
    let format = output_format(matches);

    let tokens =
        lexing::lex(&source, &config.lexer).unwrap_or_else(|e| fail("Tokenization error", e));
    let output = formats::render_tokens(&tokens, format).unwrap_or_else(|e| fail("Output error", e));
    print!("{output}");
}

/// Handle the match command
fn handle_match_command(matches: &ArgMatches, config: &GrammarConfig) {
    let source = read_source(matches);
    let format = output_format(matches);
    let rule = matches
        .get_one::<String>("rule")
        .map(String::as_str)
        .unwrap_or("file_input");

    let mut grammar = python_grammar();
    for mock in matches.get_many::<String>("mock").into_iter().flatten() {
        grammar
            .mock(mock)
            .unwrap_or_else(|e| fail("Grammar error", e));
    }
    grammar
        .validate(rule)
        .unwrap_or_else(|e| fail("Grammar error", e));

    let tokens =
        lexing::lex(&source, &config.lexer).unwrap_or_else(|e| fail("Tokenization error", e));
    let mut matcher = Matcher::new(&grammar, &tokens).with_memoization(config.engine.memoize);
    let result = if matches.get_flag("partial") {
        matcher.match_rule(rule, 0)
    } else {
        matcher.match_entirely(rule)
    }
    .unwrap_or_else(|e| fail("Grammar error", e));

    let root = match result {
        MatchResult::Success(root) => root,
        MatchResult::Failure(failure) => fail("No match", MatchError::new(&failure, &tokens)),
    };
    let consumed = root.consumed();
    let tree = ParseTree { tokens, root };
    let output = formats::render_tree(&tree, format).unwrap_or_else(|e| fail("Output error", e));
    print!("{output}");
    tracing::info!(rule, consumed, "matched");
}

/// Handle the rules command
fn handle_rules_command(matches: &ArgMatches) {
    let grammar = python_grammar();
    match matches.get_one::<String>("rule") {
        Some(name) => match grammar.get(name) {
            Ok(rule) => println!("{} := {}", rule.name, rule.expression),
            Err(e) => fail("Grammar error", e),
        },
        None => {
            for rule in grammar.rules() {
                println!("{} := {}", rule.name, rule.expression);
            }
        }
    }
    tracing::debug!(rules = grammar.len(), "listed rules");
}
