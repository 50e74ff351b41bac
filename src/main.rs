//! arbitrary-css - resolve arbitrary value classes from the command line

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use arbitrary_css::{Fragment, JsonTheme, Options, Registry, Resolver, ToCss, presets};

#[derive(Parser)]
#[command(name = "arbitrary-css")]
#[command(version, about = "Resolve arbitrary value utility classes", long_about = None)]
#[command(after_help = "EXAMPLES:
    arbitrary-css 'w-[13px]'                    Resolve with the built-in rules
    arbitrary-css 'bg-[#f00]/50' --json         Print the fragment as JSON
    arbitrary-css --registry rules.json 'mx-[4px]'")]
struct Cli {
    /// Classes to resolve
    #[arg(value_name = "CLASS", required = true)]
    classes: Vec<String>,

    /// JSON rule registry (defaults to the built-in rules)
    #[arg(long, value_name = "FILE")]
    registry: Option<String>,

    /// JSON theme for theme(...) references
    #[arg(long, value_name = "FILE")]
    theme: Option<String>,

    /// JSON resolver options
    #[arg(long, value_name = "FILE")]
    config: Option<String>,

    /// Print fragments as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Resolve every class, returning whether all of them succeeded.
fn run(cli: &Cli) -> arbitrary_css::Result<bool> {
    let registry = match &cli.registry {
        Some(path) => Registry::load(path)?,
        None => presets::registry(),
    };
    let theme = match &cli.theme {
        Some(path) => JsonTheme::load(path)?,
        None => JsonTheme::default(),
    };
    let options = match &cli.config {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };

    let resolver = Resolver::new(&registry, &theme).with_options(options);

    let mut all_ok = true;
    for class in &cli.classes {
        match resolver.resolve_class(class) {
            Ok(fragment) => print_fragment(class, &fragment, cli.json)?,
            Err(e) => {
                eprintln!("error: {e}");
                all_ok = false;
            }
        }
    }
    Ok(all_ok)
}

fn print_fragment(class: &str, fragment: &Fragment, json: bool) -> arbitrary_css::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(fragment)?);
    } else {
        println!(".{} {{", escape_class(class));
        for line in fragment.to_css_string().lines() {
            println!("  {line}");
        }
        println!("}}");
    }
    Ok(())
}

/// Escape characters that aren't valid in a class selector.
fn escape_class(class: &str) -> String {
    let mut out = String::with_capacity(class.len());
    for c in class.chars() {
        if !c.is_ascii_alphanumeric() && c != '-' && c != '_' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
