//! Prints the blockhash of each image given on the command line.
//!
//! ```text
//! $ blockhash tests/data/landscape.png tests/data/rings16.png
//! 00e300ff063f0e7f007f007f00ff21f701ff0f3f0e0f0c077c972da44921db49  tests/data/landscape.png
//! 1f863fc330e360636073e233e631e6316033607370633fe33fc71f87860e801e  tests/data/rings16.png
//! ```

use anyhow::{bail, Context, Result};
use blockhash::{Blockhasher, Decoder, Hash, HashBits};
use clap::{ArgAction, Parser, ValueEnum};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Lowercase hex, four digits per 16 bits
    Hex,
    /// One 0 or 1 per block, row by row
    Bits,
}

#[derive(Debug, Parser)]
#[command(name = "blockhash", version, about = "Compute perceptual hashes of images")]
struct Args {
    /// Blocks along each side of the image, a power of two. The hash has bits² bits.
    #[arg(short, long, env = "BLOCKHASH_BITS", default_value_t = 16)]
    bits: u32,

    /// How to print each hash
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Hex)]
    format: OutputFormat,

    /// Decode every supported format, not only JPEG and PNG
    #[arg(long)]
    all_formats: bool,

    /// Sum blocks on all cores
    #[arg(long)]
    parallel: bool,

    /// Increase logging verbosity (-v, -vv, -vvv). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Image files to hash, `-` for stdin
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn format_hash(hash: &Hash, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Hex => hash.to_hex()?,
        OutputFormat::Bits => hash
            .bits()
            .iter()
            .map(|&b| if b == 1 { '1' } else { '0' })
            .collect(),
    })
}

fn hash_file(hasher: &Blockhasher, path: &Path) -> Result<Hash> {
    if path == Path::new("-") {
        return hasher
            .hash_reader(io::stdin().lock())
            .context("failed to hash stdin");
    }
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    hasher
        .hash_reader(BufReader::new(file))
        .with_context(|| format!("failed to hash {}", path.display()))
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let bits = HashBits::new(args.bits)?;
    if args.format == OutputFormat::Hex && !bits.is_hex_encodable() {
        bail!("a {bits}x{bits} hash has fewer than 16 bits and cannot be printed as hex, use --format bits");
    }

    let decoder = if args.all_formats {
        Decoder::all()
    } else {
        Decoder::default()
    };
    info!(formats = ?decoder.formats(), "registered decoders");

    let hasher = Blockhasher::with_bits(bits)
        .decoder(decoder)
        .parallel(args.parallel);

    let mut failed = 0usize;
    for path in &args.files {
        match hash_file(&hasher, path).and_then(|hash| format_hash(&hash, args.format)) {
            Ok(out) => println!("{out}  {}", path.display()),
            Err(err) => {
                error!("{err:#}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        error!(failed, total = args.files.len(), "some images could not be hashed");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
