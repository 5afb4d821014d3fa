use clap::{Parser, ValueEnum};
use kfg::{
    analyzer::Parser as _,
    analyzer::RootParser,
    config::{KfgConfig, Strictness},
    formatter::{AnsiTheme, Formatter, FormatterConfig, Layout, PlainTheme, Theme},
    preprocessor::{LexicalFilter, Preprocessor},
    tokenizer::token::{Token, Tokenizer},
    Ast, KfgError,
};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(author, version, about = "Parse a KFG file and print its contents", long_about = None)]
struct Cli {
    /// KFG file to parse
    file: PathBuf,

    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fail on invalid array and dictionary items instead of dropping them
    #[arg(long)]
    strict: bool,

    /// Treat tabs and carriage returns as spaces
    #[arg(long)]
    fold_whitespace: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
    format: Format,

    /// Colorize output
    #[arg(long, value_enum, default_value_t = Color::Auto)]
    color: Color,

    /// Enable debug mode
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Pretty,
    Inline,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Color {
    Auto,
    Always,
    Never,
}

impl Color {
    fn enabled(self) -> bool {
        match self {
            Color::Auto => io::stdout().is_terminal(),
            Color::Always => true,
            Color::Never => false,
        }
    }
}

fn load_config(cli: &Cli) -> Result<KfgConfig, KfgError> {
    let mut config = match &cli.config {
        Some(path) => KfgConfig::from_file(path)?,
        None => KfgConfig::default(),
    };
    if cli.strict {
        config.parser.strictness = Strictness::Strict;
    }
    if cli.fold_whitespace {
        config.tokenizer.fold_whitespace = true;
    }
    debug!("config: {:?}", config);
    Ok(config)
}

fn dump_tokens(stage: &str, tokens: &[Token]) {
    debug!("{} ({} tokens)", stage, tokens.len());
    for token in tokens {
        debug!("  {:<12} {:<10} {}", token.kind, token.position, token);
    }
}

fn render(cli: &Cli, ast: &Ast) -> Result<String, KfgError> {
    let layout = match cli.format {
        Format::Json => return Ok(serde_json::to_string_pretty(ast)?),
        Format::Pretty => Layout::Pretty,
        Format::Inline => Layout::Inline,
    };

    let theme: &dyn Theme = if cli.color.enabled() {
        &AnsiTheme
    } else {
        &PlainTheme
    };
    let formatter = Formatter::new(FormatterConfig {
        layout,
        ..FormatterConfig::default()
    })
    .with_theme(theme);
    Ok(formatter.format(ast))
}

fn run(cli: &Cli) -> Result<(), KfgError> {
    let config = load_config(cli)?;

    info!("Reading {}", cli.file.display());
    let source = std::fs::read(&cli.file)?;

    info!("Tokenizing");
    let tokens = Tokenizer::with_config(config.tokenizer).tokenize(&source);
    dump_tokens("raw tokens", &tokens);

    info!("Lexing");
    let tokens = LexicalFilter::new(config.filter).process(tokens);
    dump_tokens("filtered tokens", &tokens);

    info!("Parsing");
    let (_, ast) = RootParser::new(config.parser).parse(&tokens, 0)?;
    info!("Parsed {} assignments", ast.assignment_count());

    println!("{}", render(cli, &ast)?);
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // DEBUG in the environment behaves like --verbose
    let verbose = cli.verbose || std::env::var_os("DEBUG").is_some();
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
