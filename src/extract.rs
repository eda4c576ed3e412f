//! Copies a located section's bytes out of the image.

use crate::error::ExtractError;
use crate::pe::SectionHeader;
use log::debug;

/// How many bytes to take from the section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizePolicy {
    /// `min(virtual_size, size_of_raw_data)`. Never reads the file-alignment
    /// padding past the raw data.
    MinOfSizes,

    /// `virtual_size`, even when that runs past the raw data into whatever
    /// follows it on disk.
    VirtualSize,
}

/// What to do when the read window runs past the end of the image,
/// as it does for truncated or packed files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundsPolicy {
    /// Shrink the window to the available bytes.
    Clamp,

    /// Fail with [`ExtractError::OutOfBounds`].
    Strict,
}

#[derive(Clone, Copy, Debug)]
pub struct ExtractOptions {
    pub policy: SizePolicy,
    pub bounds: BoundsPolicy,

    /// Strip all trailing zero bytes from the result. An all-zeros section
    /// trims down to an empty result.
    pub trim_trailing_zeros: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            policy: SizePolicy::MinOfSizes,
            bounds: BoundsPolicy::Clamp,
            trim_trailing_zeros: false,
        }
    }
}

/// Copies the section's bytes out of `image` according to `options`.
///
/// The result is an owned buffer, independent of `image`.
pub fn extract(
    image: &[u8],
    section: &SectionHeader,
    options: &ExtractOptions,
) -> Result<Vec<u8>, ExtractError> {
    let offset = section.pointer_to_raw_data as usize;

    let wanted = match options.policy {
        SizePolicy::MinOfSizes => section.virtual_size.min(section.size_of_raw_data),
        SizePolicy::VirtualSize => section.virtual_size,
    } as usize;

    if options.bounds == BoundsPolicy::Strict
        && offset
            .checked_add(wanted)
            .map_or(true, |end| end > image.len())
    {
        return Err(ExtractError::OutOfBounds {
            offset,
            len: wanted,
        });
    }

    let start = offset.min(image.len());
    let end = offset.saturating_add(wanted).min(image.len());

    if end - start < wanted {
        debug!(
            "section {} claims {} bytes, clamped to {} available",
            section.name(),
            wanted,
            end - start
        );
    }

    let mut data = image[start..end].to_vec();

    if options.trim_trailing_zeros {
        let keep = data.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        data.truncate(keep);
    }

    Ok(data)
}
