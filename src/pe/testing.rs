//! Builds minimal synthetic PE images for the tests.

/// File offset of the PE signature in the generated images.
pub(crate) const E_LFANEW: u32 = 0x80;

/// File offset where `build_pe` places the payload bytes.
pub(crate) const PAYLOAD_OFFSET: u32 = 0x180;

pub(crate) struct SectionSpec {
    pub name: String,
    pub virtual_size: u32,
    pub size_of_raw_data: u32,
    pub pointer_to_raw_data: u32,
}

impl SectionSpec {
    pub(crate) fn new(
        name: &str,
        virtual_size: u32,
        size_of_raw_data: u32,
        pointer_to_raw_data: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            virtual_size,
            size_of_raw_data,
            pointer_to_raw_data,
        }
    }
}

/// Builds an image with valid DOS/PE signatures, no optional header, the
/// given section table and `payload` placed at [`PAYLOAD_OFFSET`].
pub(crate) fn build_pe(sections: &[SectionSpec], payload: &[u8]) -> Vec<u8> {
    let len = (PAYLOAD_OFFSET as usize + payload.len()).max(0x200);
    let mut image = vec![0u8; len];

    // IMAGE_DOS_HEADER
    //
    image[..2].copy_from_slice(b"MZ");
    image[0x3c..0x40].copy_from_slice(&E_LFANEW.to_le_bytes());

    // PE signature and COFF header; size_of_optional_header stays zero, so
    // the section table follows the COFF header directly.
    //
    let pe_offset = E_LFANEW as usize;
    image[pe_offset..pe_offset + 4].copy_from_slice(b"PE\0\0");

    let coff_offset = pe_offset + 4;
    image[coff_offset + 2..coff_offset + 4].copy_from_slice(&(sections.len() as u16).to_le_bytes());

    // Section table
    //
    let table_offset = coff_offset + 20;
    for (i, spec) in sections.iter().enumerate() {
        let entry = table_offset + i * 40;

        image[entry..entry + spec.name.len()].copy_from_slice(spec.name.as_bytes());
        image[entry + 8..entry + 12].copy_from_slice(&spec.virtual_size.to_le_bytes());
        image[entry + 16..entry + 20].copy_from_slice(&spec.size_of_raw_data.to_le_bytes());
        image[entry + 20..entry + 24].copy_from_slice(&spec.pointer_to_raw_data.to_le_bytes());
    }

    image[PAYLOAD_OFFSET as usize..PAYLOAD_OFFSET as usize + payload.len()]
        .copy_from_slice(payload);

    image
}
