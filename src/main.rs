//! scopetint - highlight a source file for the terminal or the web

use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use scopetint::{Config, HighlightError, Highlighter, Result, SemanticAnalyzer, Theme, TokenizeOptions};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Ansi,
    Html,
    Json,
}

/// Parsed command line
#[derive(Debug)]
struct Args {
    file: Option<String>,
    lang: Option<String>,
    theme: Option<PathBuf>,
    output: Output,
    semantic: bool,
    explain: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let Some(args) = parse_args(env::args().skip(1))? else {
        return Ok(());
    };
    let config = Config::load();

    let theme = match args.theme.as_ref().or(config.theme.as_ref()) {
        Some(path) => Theme::load(path)?,
        None => Theme::builtin_dark(),
    };
    let options = TokenizeOptions {
        explain: args.explain || config.explain,
        analyzer_flags: config.analyzer.flags.clone(),
        ..TokenizeOptions::default()
    };
    let highlighter = Highlighter::new(theme)
        .with_options(options)
        .with_background(config.background.clone());

    let file = args.file.as_deref().unwrap_or("-");
    let source = read_source(file)?;
    let lang = match args.lang {
        Some(lang) => lang,
        None => highlighter
            .registry()
            .detect_language(Path::new(file))
            .map(str::to_string)
            .ok_or_else(|| HighlightError::UnknownLanguage(file.to_string()))?,
    };

    let command = if args.semantic || config.semantic {
        Some(config.analyzer.command().ok_or_else(|| {
            HighlightError::Analyzer("semantic mode needs [analyzer] program in the config file".to_string())
        })?)
    } else {
        None
    };
    let analyzer = command.as_ref().map(|c| c as &dyn SemanticAnalyzer);

    match args.output {
        Output::Ansi => {
            let stdout = io::stdout();
            highlighter.code_to_ansi(&source, &lang, analyzer, &mut stdout.lock())?;
        }
        Output::Html => {
            println!("{}", highlighter.code_to_html(&source, &lang, analyzer)?);
        }
        Output::Json => {
            let lines = highlighter.code_to_tokens(&source, &lang, analyzer)?;
            println!("{}", serde_json::to_string_pretty(&lines)?);
        }
    }

    Ok(())
}

/// Parse arguments; `None` means help or version was printed
fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Option<Args>> {
    let mut parsed = Args {
        file: None,
        lang: None,
        theme: None,
        output: Output::Ansi,
        semantic: false,
        explain: false,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                print_version();
                return Ok(None);
            }
            "--lang" | "-l" => parsed.lang = Some(required(&arg, args.next())?),
            "--theme" | "-t" => parsed.theme = Some(PathBuf::from(required(&arg, args.next())?)),
            "--html" => parsed.output = Output::Html,
            "--json" => parsed.output = Output::Json,
            "--semantic" => parsed.semantic = true,
            "--explain" => parsed.explain = true,
            _ if arg.starts_with('-') && arg != "-" => {
                return Err(HighlightError::Usage(format!("unknown option: {arg}")));
            }
            _ => parsed.file = Some(arg),
        }
    }

    Ok(Some(parsed))
}

fn required(option: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| HighlightError::Usage(format!("{option} needs a value")))
}

fn read_source(file: &str) -> Result<String> {
    if file == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        Ok(fs::read_to_string(file)?)
    }
}

fn print_usage() {
    println!("scopetint {} - syntax highlighting with TextMate theme scopes", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: scopetint [OPTIONS] [FILE]");
    println!();
    println!("Reads standard input when FILE is missing or '-'.");
    println!();
    println!("Options:");
    println!("  -l, --lang ID      Language id or alias (default: from file extension)");
    println!("  -t, --theme FILE   Theme file, VS Code JSON or TOML");
    println!("      --html         Write an HTML <pre> block");
    println!("      --json         Write tokens as JSON");
    println!("      --semantic     Recolor with the configured semantic analyzer");
    println!("      --explain      Include scope explanations (JSON output)");
    println!("  -h, --help         Show this help message");
    println!("  -V, --version      Show version information");
    println!();
    println!("Configuration is read from ~/.scopetint.toml");
    println!("Set RUST_LOG=debug to see skipped semantic spans.");
}

fn print_version() {
    println!("scopetint {}", env!("CARGO_PKG_VERSION"));
}
