//! calsflow CLI - check and normalize CALS tables through the grid model

#[cfg(feature = "cli")]
use calsflow::{
    dom, features::widths, CalsError, CalsOptions, CalsTableDefinition, WriteError,
};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "calsflow")]
#[command(version)]
#[command(about = "Check and normalize CALS XML tables", long_about = None)]
struct Cli {
    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Check mode - validate table structure without rewriting
    #[arg(long)]
    check: bool,

    /// Pretty print the output
    #[arg(short, long)]
    pretty: bool,

    /// Print each column's width as a percentage instead of rewriting
    #[arg(long)]
    report_widths: bool,

    /// Override a configuration option, e.g. --set entry.local_name=td
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let input = match cli.input_file {
        Some(ref path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let definition = match build_definition(&cli.set) {
        Ok(definition) => definition,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(2);
        }
    };

    match run(&cli, &definition, &input) {
        Ok(Some(output)) => write_output(cli.output.as_deref(), &output),
        Ok(None) => Ok(()),
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "cli")]
fn build_definition(overrides: &[String]) -> Result<CalsTableDefinition, CalsError> {
    let mut pairs = Vec::new();
    for entry in overrides {
        let Some((key, value)) = entry.split_once('=') else {
            return Err(CalsError::invalid(format!(
                "--set expects KEY=VALUE, got '{}'",
                entry
            )));
        };
        pairs.push((key.trim().to_string(), value.trim().to_string()));
    }
    let options = CalsOptions::from_pairs(pairs)?;
    Ok(CalsTableDefinition::new(&options)?)
}

#[cfg(feature = "cli")]
fn run(
    cli: &Cli,
    definition: &CalsTableDefinition,
    input: &str,
) -> Result<Option<String>, CalsError> {
    let mut doc = dom::parse(input)?;
    let tgroup = definition
        .find_first_tgroup(&doc)
        .ok_or_else(|| CalsError::invalid("document contains no table group"))?;
    let grid = definition.build_grid(&doc, tgroup)?;

    if cli.check {
        println!(
            "ok: {} columns x {} rows, {} header row(s)",
            grid.width(),
            grid.height(),
            grid.header_row_count()
        );
        return Ok(None);
    }

    if cli.report_widths {
        let all: Vec<String> = grid
            .column_specifications()
            .iter()
            .map(|c| c.column_width.clone())
            .collect();
        for column in grid.column_specifications() {
            println!(
                "{}\t{}\t{}",
                column.column_name,
                column.column_width,
                widths::width_to_percentage(&column.column_width, &all)
            );
        }
        return Ok(None);
    }

    if !doc.transact(|d| definition.synthesize(&grid, d, tgroup)) {
        return Err(CalsError::Write(WriteError::new(
            "table synthesis did not commit",
        )));
    }
    let rendered = if cli.pretty {
        dom::to_xml_pretty(&doc)
    } else {
        dom::to_xml(&doc)
    };
    Ok(Some(rendered))
}

#[cfg(feature = "cli")]
fn write_output(path: Option<&str>, output: &str) -> io::Result<()> {
    match path {
        Some(path) => fs::write(path, output),
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(output.as_bytes())?;
            if !output.ends_with('\n') {
                handle.write_all(b"\n")?;
            }
            Ok(())
        }
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install calsflow --features cli");
    eprintln!("  calsflow [OPTIONS] [INPUT_FILE]");
}
