use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::{debug, info};

pub mod encode;
pub mod error;
pub mod extract;
pub mod pe;

use encode::{Encoded, OutputFormat, SourceLang};
use extract::{BoundsPolicy, ExtractOptions, SizePolicy};

/// Extracts the raw bytes of a PE section as shellcode.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the PE file.
    input: PathBuf,

    /// Name of the section to extract.
    #[arg(short, long, default_value = ".text")]
    section: String,

    /// Output representation.
    #[arg(short, long, value_enum, default_value = "raw")]
    format: Format,

    /// Output path for the raw format. Defaults to the input path with a
    /// `.bin` extension.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write a C header next to the raw output.
    #[arg(long)]
    header: bool,

    /// Variable name used by the c and python formats.
    #[arg(long, default_value = "shellcode")]
    var_name: String,

    /// Bytes per row in the c format.
    #[arg(long, default_value_t = 12)]
    row_width: usize,

    /// How many bytes to show in the hexdump format.
    #[arg(long, default_value_t = 64)]
    dump_cap: usize,

    /// Extraction length policy.
    #[arg(long, value_enum, default_value = "min")]
    policy: Policy,

    /// Fail instead of clamping when the section's claimed size runs past
    /// the end of the file.
    #[arg(long)]
    strict_bounds: bool,

    /// Strip trailing zero padding from the extracted bytes.
    #[arg(long)]
    trim: bool,

    /// List the section table and exit.
    #[arg(long)]
    list: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Raw bytes written to a `.bin` file.
    Raw,
    /// Hex string on stdout.
    Hex,
    /// C array declaration on stdout.
    C,
    /// Python `bytes.fromhex` assignment on stdout.
    Python,
    /// Offset/hex/ascii preview on stdout.
    Hexdump,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Policy {
    /// min(virtual_size, size_of_raw_data)
    Min,
    /// virtual_size, even past the raw data
    Virtual,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let image = fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    if args.list {
        return list_sections(&image);
    }

    // Locate and extract the section
    //
    let section = pe::locate_section(&image, &args.section)?;
    debug!(
        "{} at {:#x}, raw size {:#x}, virtual size {:#x}",
        section.name(),
        section.pointer_to_raw_data,
        section.size_of_raw_data,
        section.virtual_size
    );

    let options = ExtractOptions {
        policy: match args.policy {
            Policy::Min => SizePolicy::MinOfSizes,
            Policy::Virtual => SizePolicy::VirtualSize,
        },
        bounds: if args.strict_bounds {
            BoundsPolicy::Strict
        } else {
            BoundsPolicy::Clamp
        },
        trim_trailing_zeros: args.trim,
    };

    let shellcode = extract::extract(&image, &section, &options)?;
    info!("extracted {} bytes from {}", shellcode.len(), section.name());

    // Encode and write the result
    //
    let format = match args.format {
        Format::Raw => OutputFormat::Binary,
        Format::Hex => OutputFormat::Hex,
        Format::C => OutputFormat::SourceArray {
            lang: SourceLang::C,
            var_name: args.var_name.clone(),
            row_width: args.row_width,
        },
        Format::Python => OutputFormat::SourceArray {
            lang: SourceLang::Python,
            var_name: args.var_name.clone(),
            row_width: args.row_width,
        },
        Format::Hexdump => OutputFormat::HexDump { cap: args.dump_cap },
    };

    match encode::encode(&shellcode, &format) {
        Encoded::Bytes(bytes) => write_raw(&args, &shellcode, &bytes)?,
        Encoded::Text(text) => println!("{text}"),
    }

    Ok(())
}

/// Writes the raw output file and, when requested, the companion C header.
fn write_raw(args: &Args, shellcode: &[u8], bytes: &[u8]) -> anyhow::Result<()> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("bin"));

    fs::write(&output, bytes).with_context(|| format!("failed to write {}", output.display()))?;
    info!("wrote {}", output.display());

    if args.header {
        let header_path = output.with_extension("h");
        let listing =
            encode::source_array(shellcode, SourceLang::C, &args.var_name, args.row_width);

        fs::write(&header_path, listing + "\n")
            .with_context(|| format!("failed to write {}", header_path.display()))?;
        info!("wrote {}", header_path.display());
    }

    Ok(())
}

/// Prints the section table on stdout.
fn list_sections(image: &[u8]) -> anyhow::Result<()> {
    for (i, section) in pe::section_headers(image)?.iter().enumerate() {
        println!(
            "{i:2}  {:<8}  vsize {:#10x}  rsize {:#10x}  raw {:#10x}",
            section.name(),
            section.virtual_size,
            section.size_of_raw_data,
            section.pointer_to_raw_data
        );
    }

    Ok(())
}
