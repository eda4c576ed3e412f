//! Walks the PE headers of a loaded image and finds section table entries.
//!
//! Layout per the PE/COFF specification: DOS header, `e_lfanew` at `0x3c`,
//! `PE\0\0` signature, 20-byte COFF header, variable-size optional header,
//! then `number_of_sections` fixed 40-byte section table entries.

use crate::error::ExtractError;
use log::debug;
use pelite::image::{IMAGE_DOS_SIGNATURE, IMAGE_NT_HEADERS_SIGNATURE};

pub mod section;
#[cfg(test)]
pub(crate) mod testing;

pub use section::SectionHeader;
use section::SECTION_HEADER_SIZE;

/// File offset of the `e_lfanew` field in the DOS header.
const E_LFANEW_OFFSET: usize = 0x3c;

/// Size of the COFF header, excluding the 4-byte PE signature.
const COFF_HEADER_SIZE: usize = 20;

/// Reads a little-endian `u16`, checking bounds first.
pub(crate) fn read_u16(image: &[u8], offset: usize) -> Result<u16, ExtractError> {
    let bytes = image
        .get(offset..offset + 2)
        .ok_or(ExtractError::OutOfBounds { offset, len: 2 })?;

    Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Reads a little-endian `u32`, checking bounds first.
pub(crate) fn read_u32(image: &[u8], offset: usize) -> Result<u32, ExtractError> {
    let bytes = image
        .get(offset..offset + 4)
        .ok_or(ExtractError::OutOfBounds { offset, len: 4 })?;

    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Validates the DOS and PE signatures and returns the file offset of the
/// section table along with the number of entries in it.
fn walk_headers(image: &[u8]) -> Result<(usize, usize), ExtractError> {
    // IMAGE_DOS_HEADER
    //
    if read_u16(image, 0)? != IMAGE_DOS_SIGNATURE {
        return Err(ExtractError::InvalidDosHeader);
    }

    let e_lfanew = read_u32(image, E_LFANEW_OFFSET)? as usize;

    // PE signature
    //
    if read_u32(image, e_lfanew)? != IMAGE_NT_HEADERS_SIGNATURE {
        return Err(ExtractError::InvalidPeHeader);
    }

    // IMAGE_FILE_HEADER
    //
    let coff_offset = e_lfanew + 4;
    let number_of_sections = read_u16(image, coff_offset + 2)? as usize;
    let size_of_optional_header = read_u16(image, coff_offset + 16)? as usize;

    let section_table_offset = coff_offset + COFF_HEADER_SIZE + size_of_optional_header;

    debug!(
        "pe header at {:#x}, {} sections, section table at {:#x}",
        e_lfanew, number_of_sections, section_table_offset
    );

    Ok((section_table_offset, number_of_sections))
}

/// Finds the section table entry with the given name.
///
/// The comparison is exact and case-sensitive after stripping the entry's
/// trailing NUL padding. Section names are not guaranteed unique; the first
/// match wins.
pub fn locate_section(image: &[u8], name: &str) -> Result<SectionHeader, ExtractError> {
    let (section_table_offset, number_of_sections) = walk_headers(image)?;

    for i in 0..number_of_sections {
        let section = SectionHeader::parse(image, section_table_offset + i * SECTION_HEADER_SIZE)?;

        if section.trimmed_name() == name.as_bytes() {
            return Ok(section);
        }
    }

    Err(ExtractError::SectionNotFound(name.to_string()))
}

/// Parses the entire section table in file order.
pub fn section_headers(image: &[u8]) -> Result<Vec<SectionHeader>, ExtractError> {
    let (section_table_offset, number_of_sections) = walk_headers(image)?;

    (0..number_of_sections)
        .map(|i| SectionHeader::parse(image, section_table_offset + i * SECTION_HEADER_SIZE))
        .collect()
}
