use selector_compiler::{logging, pipeline};
use std::env;

/// Output format for a scanned selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Info,
    Scan {
        selector: String,
        format: OutputFormat,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize global logging system
    logging::init_global_logging()?;

    // Validate pipeline configuration
    pipeline::validate_pipeline()?;

    let args: Vec<String> = env::args().collect();
    let program_name = args.first().map(String::as_str).unwrap_or("selectorc");

    let command = match parse_args(args.get(1..).unwrap_or(&[])) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("Usage: {} <selector> [--json]", program_name);
            eprintln!("       {} --help", program_name);
            std::process::exit(1);
        }
    };

    match command {
        Command::Help => print_help(program_name),
        Command::Info => println!("{}", pipeline::get_pipeline_info().report()),
        Command::Scan { selector, format } => scan_selector(&selector, format)?,
    }

    Ok(())
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut selector = None;
    let mut format = OutputFormat::Table;

    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--info" => return Ok(Command::Info),
            "--json" => format = OutputFormat::Json,
            option if option.starts_with("--") => {
                return Err(format!("Unknown option '{}'", option));
            }
            value => {
                if selector.is_some() {
                    return Err(format!("Unexpected extra argument '{}'", value));
                }
                selector = Some(value.to_string());
            }
        }
    }

    selector
        .map(|selector| Command::Scan { selector, format })
        .ok_or_else(|| "Missing selector argument".to_string())
}

fn print_help(program_name: &str) {
    println!("Selector Compiler v{}", env!("CARGO_PKG_VERSION"));
    println!("Tokenizes CSS selectors with the context-stack scanner");
    println!();
    println!("USAGE:");
    println!("    {} <selector> [--json]", program_name);
    println!();
    println!("OPTIONS:");
    println!("    --json      Print tokens and scan metrics as JSON");
    println!("    --info      Show compile-time limits and lexical contexts");
    println!("    --help      Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("    {} 'E > F'", program_name);
    println!("    {} 'div#id.class:has(span.title)' --json", program_name);
}

fn scan_selector(selector: &str, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    match pipeline::scan(selector) {
        Ok(report) => {
            match format {
                OutputFormat::Table => println!("{}", report.render_table()),
                OutputFormat::Json => println!("{}", report.to_json()?),
            }
            Ok(())
        }
        Err(error) => {
            eprint!("{}", pipeline::render_error(selector, &error));
            std::process::exit(1);
        }
    }
}
