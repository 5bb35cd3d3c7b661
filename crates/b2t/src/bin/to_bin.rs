use std::process;

use clap::Parser;
use tracing::error;

use b2t::cli;

/// Reads JSON text on stdin and writes it to stdout in a binary format.
#[derive(Parser, Debug)]
#[command(name = "to-bin", version, about)]
struct Args {
    /// Output format (cbor, msgpack, ubjson)
    #[arg(short, long, value_name = "FORMAT", default_value = "msgpack")]
    format: String,

    /// Debug logging on stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    cli::init_logging(args.verbose);

    let input = match cli::read_stdin() {
        Ok(input) => input,
        Err(e) => {
            eprintln!("to-bin: cannot read stdin: {e}");
            process::exit(1);
        }
    };
    let text = match String::from_utf8(input) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("to-bin: stdin is not UTF-8: {e}");
            process::exit(1);
        }
    };
    match cli::pack(&text, &args.format) {
        Ok(bytes) => {
            if let Err(e) = cli::write_stdout(&bytes) {
                error!(error = %e, "write failed");
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("to-bin: {e}");
            process::exit(1);
        }
    }
}
