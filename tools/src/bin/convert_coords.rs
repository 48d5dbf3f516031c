use clap::Parser;
use skycoords::{parse_declination, parse_right_ascension};
use std::fs::File;
use std::io::{self, prelude::*, BufReader};
use std::path::PathBuf;

/// Convert catalog right ascension / declination pairs to decimal degrees
///
/// Each input line holds a right ascension and a declination separated by a
/// tab or '|', optionally preceded by a star name field.
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Don't report lines that fail to parse
    #[arg(short = 's', long)]
    skip_invalid: bool,

    /// Also print the sexagesimal fields as parsed
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Input file, stdin when not provided
    input: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse();

    let input: Box<dyn BufRead> = match opts.input.as_ref() {
        Some(p) => Box::new(BufReader::new(File::open(p)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let mut out = io::stdout().lock();

    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        match convert_line(&line, opts.verbose) {
            Ok(Some(converted)) => writeln!(&mut out, "{converted}")?,
            Ok(None) => (),
            Err(e) => {
                if !opts.skip_invalid {
                    eprintln!("line {}: {e}", idx + 1);
                }
            }
        }
    }

    Ok(())
}

/// Convert one input line. Blank and '#' comment lines yield `None`.
fn convert_line(line: &str, verbose: bool) -> Result<Option<String>, String> {
    if line.trim().is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split(['\t', '|']).map(str::trim).collect();
    let (name, ra, dec) = match fields.as_slice() {
        [ra, dec] => (None, *ra, *dec),
        [name, ra, dec, ..] => (Some(*name), *ra, *dec),
        _ => return Err("expected 2 or 3 fields".to_owned()),
    };

    let (ra, dec) = parse_right_ascension(ra)
        .and_then(|ra| Ok((ra, parse_declination(dec)?)))
        .map_err(|e| format!("{e} (RA: '{ra}', Dec: '{dec}')"))?;

    let mut converted = String::new();
    if let Some(n) = name {
        converted.push_str(n);
        converted.push(' ');
    }
    converted.push_str(&format!("{:.6} {:.6}", ra.to_degrees(), dec.to_degrees()));
    if verbose {
        converted.push_str(&format!(" # {ra} {dec}"));
    }
    Ok(Some(converted))
}
