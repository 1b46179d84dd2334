//! Command-line front end for coding files with the (72, 64) SEC-DED code.

use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::{info, warn};

use secded7264::{DecodeOptions, DecodeStats, Scheme};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let scheme = Arg::new("scheme")
        .short('s')
        .long("scheme")
        .help("Error correction scheme (none, secded7264)")
        .value_name("SCHEME")
        .default_value("secded7264");

    let output = Arg::new("output")
        .short('o')
        .long("output")
        .help("Output file (default: stdout)")
        .value_name("FILE");

    let matches = Command::new("secded7264")
        .version(env!("CARGO_PKG_VERSION"))
        .about("SEC-DED (72, 64) message encoder and decoder")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("encode")
                .visible_alias("e")
                .about("Encode a message")
                .arg(
                    Arg::new("input")
                        .help("Input file, or - for stdin (default: stdin)")
                        .index(1),
                )
                .arg(scheme.clone())
                .arg(output.clone()),
        )
        .subcommand(
            Command::new("decode")
                .visible_alias("d")
                .about("Decode one or more encoded messages, concatenating the results")
                .arg(
                    Arg::new("input")
                        .help("Input files, or - for stdin (default: stdin)")
                        .num_args(0..)
                        .index(1),
                )
                .arg(scheme)
                .arg(output)
                .arg(
                    Arg::new("no_correct")
                        .long("no-correct")
                        .help("Check codewords but pass data through uncorrected")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("demo")
                .about("Encode a sample message, corrupt it, and decode it"),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("encode", sub)) => encode(sub),
        Some(("decode", sub)) => decode(sub),
        Some(("demo", _)) => demo(),
        _ => Ok(()),
    }
}

fn encode(matches: &ArgMatches) -> Result<()> {
    let scheme = parse_scheme(matches)?;
    let msg = read_input(matches.get_one::<String>("input").map(String::as_str))?;

    let enc = scheme.encode(&msg);
    info!("encoded {} bytes to {} bytes with {}", msg.len(), enc.len(), scheme);

    write_output(matches.get_one::<String>("output"), &enc)
}

fn decode(matches: &ArgMatches) -> Result<()> {
    let scheme = parse_scheme(matches)?;

    let opts = if matches.get_flag("no_correct") {
        DecodeOptions::lazy()
    } else {
        DecodeOptions::default()
    };

    let inputs: Vec<&str> = matches
        .get_many::<String>("input")
        .map(|vals| vals.map(String::as_str).collect())
        .unwrap_or_else(|| vec!["-"]);

    let mut total = DecodeStats::default();
    let mut out = Vec::new();

    for input in inputs {
        let enc = read_input(Some(input))?;
        let mut dec = scheme
            .decode_with(&enc, opts)
            .with_context(|| format!("Failed to decode {}", input))?;

        info!("{}: decoded {} bytes to {} bytes, {} fixed, {} unrecoverable",
              input, enc.len(), dec.len(), dec.stats.fixed(), dec.stats.unrecoverable());

        out.extend_from_slice(&dec.data);
        total.merge(&mut dec.stats);
    }

    if total.unrecoverable() > 0 {
        warn!("{} of {} codewords had uncorrectable errors",
              total.unrecoverable(), total.words());
    }

    write_output(matches.get_one::<String>("output"), &out)
}

/// Reproduce the classic sample: two single bit errors, which are corrected, and one
/// double bit error, which is detected and passed through.
fn demo() -> Result<()> {
    let orig = b"this is some text that is test data\n";

    let mut enc = secded7264::encode(orig);

    enc[6] ^= 0x04;
    enc[14] ^= 0x20;
    enc[21] ^= 0x41;

    let dec = secded7264::decode(&enc)?;

    println!("Orig len {} to enc len {} to dec len {} with {} errors.",
             orig.len(), enc.len(), dec.len(), dec.num_errors());

    io::stdout().write_all(&dec.data)?;

    Ok(())
}

fn parse_scheme(matches: &ArgMatches) -> Result<Scheme> {
    let name = matches
        .get_one::<String>("scheme")
        .map(String::as_str)
        .unwrap_or("secded7264");

    Ok(name.parse::<Scheme>()?)
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        None | Some("-") => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
        Some(path) => fs::read(path).with_context(|| format!("Failed to read {}", path)),
    }
}

fn write_output(path: Option<&String>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, data).with_context(|| format!("Failed to write {}", path))
        }
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("Failed to write stdout")?;
            stdout.flush().context("Failed to flush stdout")
        }
    }
}
