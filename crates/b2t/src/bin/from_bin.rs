use std::process;

use clap::Parser;
use tracing::error;

use b2t::cli;

/// Reads a binary document on stdin and writes it to stdout as JSON.
#[derive(Parser, Debug)]
#[command(name = "from-bin", version, about)]
struct Args {
    /// Input format (cbor, msgpack, ubjson)
    #[arg(short, long, value_name = "FORMAT", default_value = "msgpack")]
    format: String,

    /// Pretty-print with this many spaces per level
    #[arg(short, long, value_name = "N")]
    indent: Option<usize>,

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
            eprintln!("from-bin: cannot read stdin: {e}");
            process::exit(1);
        }
    };
    match cli::unpack(&input, &args.format, args.indent) {
        Ok(mut text) => {
            text.push('\n');
            if let Err(e) = cli::write_stdout(text.as_bytes()) {
                error!(error = %e, "write failed");
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("from-bin: {e}");
            process::exit(1);
        }
    }
}
