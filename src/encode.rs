//! Renders extracted bytes into their output representations.

/// Target language for the source-array representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceLang {
    C,
    Python,
}

/// The supported output representations.
#[derive(Clone, Debug)]
pub enum OutputFormat {
    /// The bytes themselves, for writing straight to disk.
    Binary,

    /// Lowercase hex, two characters per byte, no separators.
    Hex,

    /// A source-embeddable array declaration plus a length constant.
    SourceArray {
        lang: SourceLang,
        var_name: String,
        row_width: usize,
    },

    /// A preview of the first `cap` bytes in classic offset/hex/ascii rows.
    HexDump { cap: usize },
}

/// An encoded representation, either raw bytes or printable text.
pub enum Encoded {
    Bytes(Vec<u8>),
    Text(String),
}

/// Renders `bytes` in the requested format.
pub fn encode(bytes: &[u8], format: &OutputFormat) -> Encoded {
    match format {
        OutputFormat::Binary => Encoded::Bytes(bytes.to_vec()),
        OutputFormat::Hex => Encoded::Text(hex::encode(bytes)),
        OutputFormat::SourceArray {
            lang,
            var_name,
            row_width,
        } => Encoded::Text(source_array(bytes, *lang, var_name, *row_width)),
        OutputFormat::HexDump { cap } => Encoded::Text(hex_dump(bytes, *cap)),
    }
}

/// Renders an array declaration named `var_name` plus a `<var_name>_len`
/// length constant.
pub fn source_array(bytes: &[u8], lang: SourceLang, var_name: &str, row_width: usize) -> String {
    match lang {
        SourceLang::C => c_array(bytes, var_name, row_width),
        SourceLang::Python => format!("{var_name} = bytes.fromhex(\"{}\")", hex::encode(bytes)),
    }
}

fn c_array(bytes: &[u8], var_name: &str, row_width: usize) -> String {
    let mut lines = vec![format!("unsigned char {var_name}[] = {{")];

    for row in bytes.chunks(row_width.max(1)) {
        let row_bytes = row
            .iter()
            .map(|b| format!("0x{b:02x}"))
            .collect::<Vec<_>>()
            .join(", ");

        lines.push(format!("    {row_bytes},"));
    }

    lines.push("};".to_string());
    lines.push(format!("unsigned int {var_name}_len = {};", bytes.len()));

    lines.join("\n")
}

/// Renders up to `cap` bytes in rows of 16: a 4-hex-digit offset, the hex
/// byte pairs padded to a fixed column, and a printable-ASCII rendering
/// where bytes outside `0x20..=0x7e` show as `.`.
pub fn hex_dump(bytes: &[u8], cap: usize) -> String {
    let shown = &bytes[..bytes.len().min(cap)];

    shown
        .chunks(16)
        .enumerate()
        .map(|(i, row)| {
            let hex_part = row
                .iter()
                .map(|b| format!("{b:02x}"))
                .collect::<Vec<_>>()
                .join(" ");

            let ascii_part: String = row
                .iter()
                .map(|&b| if (0x20..=0x7e).contains(&b) { b as char } else { '.' })
                .collect();

            format!("  {:04x}: {:<48} {}", i * 16, hex_part, ascii_part)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
