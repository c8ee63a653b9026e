//! Command line front end for the morsel segmentation engine.
//!
//! Reads text from a file or standard input, tokenizes it line by line, and
//! prints the tokens in the selected output mode.

use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, IsTerminal, Write};
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use morsel::Tokenizer;

/// Output mode.
#[derive(Clone, Debug)]
enum OutputMode {
    /// Tokens joined by single spaces, one line of output per input line.
    Plain,
    /// One token per line.
    Line,
    /// One token per line with its byte offsets.
    Offset,
}

impl FromStr for OutputMode {
    type Err = &'static str;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "plain" => Ok(Self::Plain),
            "line" => Ok(Self::Line),
            "offset" => Ok(Self::Offset),
            _ => Err("Could not parse a mode"),
        }
    }
}

/// Command line arguments.
#[derive(Parser, Debug)]
#[clap(name = "tokenize", about = "Segments text into offset-anchored tokens")]
struct Args {
    /// Input file. Reads standard input when omitted.
    #[clap(short = 'i', long)]
    input: Option<PathBuf>,

    /// Directory holding replacement dictionary files.
    #[clap(short = 'd', long)]
    dict_dir: Option<PathBuf>,

    /// Output mode. Choices are plain, line, and offset.
    #[clap(short = 'O', long, default_value = "plain")]
    output_mode: OutputMode,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    eprintln!("Loading the dictionaries...");
    let tokenizer = match &args.dict_dir {
        Some(dir) => Tokenizer::from_dir(dir)?,
        None => Tokenizer::english()?,
    };
    eprintln!("Ready to tokenize");

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(std::io::stdin().lock())),
    };

    let is_tty = std::io::stdout().is_terminal();
    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());

    for line in reader.lines() {
        let line = line?;
        let tokens = tokenizer.tokenize(&line);
        match args.output_mode {
            OutputMode::Plain => {
                for (i, token) in tokens.iter().enumerate() {
                    if i != 0 {
                        out.write_all(b" ")?;
                    }
                    out.write_all(token.text.as_bytes())?;
                }
                out.write_all(b"\n")?;
            }
            OutputMode::Line => {
                for token in &tokens {
                    out.write_all(token.text.as_bytes())?;
                    out.write_all(b"\n")?;
                }
                out.write_all(b"\n")?;
            }
            OutputMode::Offset => {
                for token in &tokens {
                    writeln!(&mut out, "{}\t{}\t{}", token.text, token.start, token.end)?;
                }
                out.write_all(b"\n")?;
            }
        }
        if is_tty {
            out.flush()?;
        }
    }
    out.flush()?;

    Ok(())
}
