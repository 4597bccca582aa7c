use std::error::Error;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use seifert::{
    AlexanderPolynomial, Analysis, AnalysisOptions, Invariants, analyse_pretzel, parse_pretzel,
    polynomial_to_string,
};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let options = AnalysisOptions {
        simplify: cli.simplify,
    };

    let result = if cli.inputs.is_empty() {
        run_interactive(&options)
    } else {
        cli.inputs
            .iter()
            .try_for_each(|input| run_input(input, &options))
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "seifert",
    about = "Seifert matrix, genus and Alexander polynomial of links given as braids or pretzels"
)]
struct Cli {
    /// Simplify each pretzel by braid relations before analysing it
    #[arg(short, long)]
    simplify: bool,

    /// Braids (`1 2 -1`) or pretzels (`A3bA`) to analyse. Reads lines from stdin if none given.
    inputs: Vec<String>,
}

fn run_interactive(options: &AnalysisOptions) -> Result<(), Box<dyn Error>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        eprint!("Enter braid or pretzel (send EOF to quit): ");
        let Some(line) = lines.next() else {
            break;
        };
        run_input(&line?, options)?;
    }
    eprintln!("Goodbye.");
    Ok(())
}

/// Parse and analyse one input. Unparsable input is reported and skipped, analysis failures
/// are returned.
fn run_input(input: &str, options: &AnalysisOptions) -> Result<(), Box<dyn Error>> {
    let pr = match parse_pretzel(input) {
        Ok(pr) => pr,
        Err(e) => {
            eprintln!("Failed to parse input ('{input}') as pretzel; skipping. ({e})");
            return Ok(());
        }
    };

    let analysis = analyse_pretzel(pr, options)?;
    write_analysis(&mut io::stdout().lock(), &analysis)?;
    Ok(())
}

fn write_analysis(out: &mut impl Write, analysis: &Analysis) -> io::Result<()> {
    let mut indent = "";

    if analysis.simplified {
        writeln!(out, "The pretzel has been simplified.")?;
    }
    if analysis.is_split() {
        write!(out, "The pretzel is a disjoint union of unrelated sub-pretzels")?;
        if analysis.options.simplify {
            writeln!(out, ".")?;
        } else {
            writeln!(out, ", and we have arranged it accordingly.")?;
        }
        if !analysis.partitioned.is_empty() {
            writeln!(out, "Input: {}", analysis.partitioned)?;
        }
        indent = "   ";
    }

    for component in &analysis.components {
        let label = if analysis.is_split() {
            "Pretzel component"
        } else {
            "Pretzel"
        };
        write!(out, "{indent}{label}: {}", component.twists)?;
        if component.simplified {
            write!(out, " Simplified: {}", component.pretzel)?;
        }
        writeln!(out)?;

        write_invariants(out, indent, &component.invariants)?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_invariants(out: &mut impl Write, indent: &str, inv: &Invariants) -> io::Result<()> {
    write!(out, "{indent}The pretzel is a ")?;
    if inv.is_knot() {
        write!(out, "knot")?;
    } else {
        write!(out, "link with {} components", inv.components)?;
    }
    writeln!(out, " whose Seifert surface has genus {}.", inv.genus)?;
    writeln!(out, "{indent}Seifert matrix: {}", inv.seifert_matrix.inline())?;

    match &inv.alexander {
        AlexanderPolynomial::Coefficients(coeffs) => writeln!(
            out,
            "{indent}Alexander polynomial: p(t) = {}",
            polynomial_to_string("t", coeffs)
        ),
        AlexanderPolynomial::Inexact => writeln!(
            out,
            "{indent}Not computing Alexander polynomial because the {0}x{0} Seifert matrix is too \
             large for exact interpolation.",
            inv.seifert_matrix.dim()
        ),
        AlexanderPolynomial::Splittable => writeln!(
            out,
            "{indent}Not computing Alexander polynomial because the link is splittable \
             (the Seifert surface is not connected)."
        ),
    }
}
