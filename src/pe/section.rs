use crate::error::ExtractError;
use crate::pe::read_u32;

/// Size of one section table entry on disk.
pub(crate) const SECTION_HEADER_SIZE: usize = 40;

/// A single 40-byte entry of the PE section table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionHeader {
    /// The raw, NUL-padded name field.
    pub name: [u8; 8],

    /// Size of the section once mapped into memory.
    pub virtual_size: u32,

    /// Size of the section's data on disk.
    pub size_of_raw_data: u32,

    /// File offset of the section's data.
    pub pointer_to_raw_data: u32,
}

impl SectionHeader {
    /// Parses the section table entry starting at `offset`.
    pub(crate) fn parse(image: &[u8], offset: usize) -> Result<Self, ExtractError> {
        // Validate the whole record up front so a truncated table entry
        // is rejected rather than partially read.
        //
        let out_of_bounds = ExtractError::OutOfBounds {
            offset,
            len: SECTION_HEADER_SIZE,
        };

        if offset
            .checked_add(SECTION_HEADER_SIZE)
            .map_or(true, |end| end > image.len())
        {
            return Err(out_of_bounds);
        }

        let mut name = [0u8; 8];
        name.copy_from_slice(&image[offset..offset + 8]);

        Ok(Self {
            name,
            virtual_size: read_u32(image, offset + 8)?,
            size_of_raw_data: read_u32(image, offset + 16)?,
            pointer_to_raw_data: read_u32(image, offset + 20)?,
        })
    }

    /// Section name with the trailing NUL padding removed.
    pub fn name(&self) -> String {
        String::from_utf8_lossy(self.trimmed_name()).into_owned()
    }

    /// Name bytes up to, but not including, the trailing NUL padding.
    pub(crate) fn trimmed_name(&self) -> &[u8] {
        let end = self.name.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        &self.name[..end]
    }
}
