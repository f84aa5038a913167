use std::fs::File;
use std::io::{Read, stdin};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "jsonfsm-cli",
    about = "Decode a JSON document with the jsonfsm state-machine parser",
    version
)]
struct Args {
    /// Reject tokens after the document root closes
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Pretty-print the decoded document
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// Print the token stream instead of decoding
    #[arg(long, default_value_t = false)]
    tokens: bool,

    /// Input file (defaults to stdin)
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut buf = Vec::new();
    match &args.input {
        Some(path) => {
            let mut f = File::open(path)?;
            f.read_to_end(&mut buf)?;
        }
        None => {
            stdin().read_to_end(&mut buf)?;
        }
    }

    if args.tokens {
        for token in jsonfsm::tokenize(&buf)? {
            println!("{token:?}");
        }
        return Ok(());
    }

    let options = jsonfsm::Options {
        strict: args.strict,
    };
    let value = jsonfsm::decode_from_slice(&buf, &options)?;
    let json: serde_json::Value = value.into();
    if args.pretty {
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        println!("{}", serde_json::to_string(&json)?);
    }

    Ok(())
}
