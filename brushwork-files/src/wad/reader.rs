use std::io::{Cursor, Read, Seek, SeekFrom};

use crate::ParserError;
use crate::common::reader::{Parseable, read_bytes, read_palette};
use crate::wad::types::{
    DIRECTORY_ENTRY_SIZE, FOURCC_WAD2, FOURCC_WAD3, HEADER_SIZE, ImageKind, LumpType, MIP_LEVELS, MipTexHeader,
    PaletteImage, PictureHeader, WADAsset, WADDirectoryEntry, WADHeader,
};

pub struct WADReader {}

impl WADReader {
    /// Reads the header and the entry directory. Entry data is only touched by [`WADReader::read_image`].
    pub fn parse_asset<R: Read + Seek>(rdr: &mut R) -> Result<WADAsset, ParserError> {
        let header = WADHeader::parse(rdr)?;
        if header.magic != FOURCC_WAD2 && header.magic != FOURCC_WAD3 {
            return Err(ParserError::InvalidMagicValue { magic: header.magic });
        }

        if header.num_entries < 0 {
            return Err(ParserError::FormatError {
                reason: "Negative directory entry count",
            });
        }

        if (header.directory_offset as i64) < HEADER_SIZE as i64 {
            return Err(ParserError::FormatError {
                reason: "Directory overlaps the header",
            });
        }

        // Counts and offsets come straight from the file, nothing may be allocated before they are bounded
        let stream_len = Self::stream_len(rdr)?;
        let directory_size = (header.num_entries as u64).checked_mul(DIRECTORY_ENTRY_SIZE as u64);
        Self::check_in_bounds(
            header.directory_offset as u64,
            directory_size,
            stream_len,
            "Directory exceeds the archive",
        )?;

        rdr.seek(SeekFrom::Start(header.directory_offset as u64))?;

        let mut directory = Vec::with_capacity(header.num_entries as usize);
        for _ in 0..header.num_entries {
            directory.push(WADDirectoryEntry::parse(rdr)?);
        }

        Ok(WADAsset { header, directory })
    }

    /// Reads and parses one indexed image. Only raw pictures and WAD3 mip textures are supported, everything
    /// else is an [`ParserError::UnsupportedLumpType`], so callers can skip the entry and carry on.
    pub fn read_image<R: Read + Seek>(rdr: &mut R, entry: &WADDirectoryEntry) -> Result<PaletteImage, ParserError> {
        let name = entry.name()?;
        let kind = match entry.kind() {
            LumpType::Picture => ImageKind::Picture,
            LumpType::MipTexture => ImageKind::MipMapped,
            _ => {
                return Err(ParserError::UnsupportedLumpType {
                    name,
                    lump_type: entry.lump_type,
                });
            }
        };

        if entry.compression != 0 {
            return Err(ParserError::FormatError {
                reason: "Compressed entries are not supported",
            });
        }

        if entry.offset < 0 || entry.disk_size < 0 {
            return Err(ParserError::FormatError {
                reason: "Entry with negative offset or size",
            });
        }

        let stream_len = Self::stream_len(rdr)?;
        Self::check_in_bounds(
            entry.offset as u64,
            Some(entry.disk_size as u64),
            stream_len,
            "Entry exceeds the archive",
        )?;

        rdr.seek(SeekFrom::Start(entry.offset as u64))?;
        let lump = read_bytes(rdr, entry.disk_size as usize)?;
        let mut cursor = Cursor::new(lump.as_slice());

        match kind {
            ImageKind::Picture => Self::parse_picture(&mut cursor, name),
            ImageKind::MipMapped => Self::parse_mip_texture(&mut cursor, name),
        }
    }

    fn parse_picture(cursor: &mut Cursor<&[u8]>, name: String) -> Result<PaletteImage, ParserError> {
        let header = PictureHeader::parse(cursor)?;
        let texel_count = Self::texel_count(header.width, header.height)?;
        Self::check_lump_remaining(cursor, texel_count)?;
        let pixels = read_bytes(cursor, texel_count)?;
        let palette = read_palette(cursor)?;

        Ok(PaletteImage {
            name,
            kind: ImageKind::Picture,
            width: header.width,
            height: header.height,
            palette,
            pixels,
        })
    }

    fn parse_mip_texture(cursor: &mut Cursor<&[u8]>, name: String) -> Result<PaletteImage, ParserError> {
        let header = MipTexHeader::parse(cursor)?;
        let texel_count = Self::texel_count(header.width, header.height)?;

        if header.mip_offsets[0] == 0 {
            // Offsets of 0 mean the texels live somewhere else (e.g. in a BSP), which can't happen inside an archive
            return Err(ParserError::FormatError {
                reason: "Mip texture without embedded texel data",
            });
        }

        cursor.seek(SeekFrom::Start(header.mip_offsets[0] as u64))?;
        Self::check_lump_remaining(cursor, texel_count)?;
        let pixels = read_bytes(cursor, texel_count)?;

        // The palette follows the smallest mip level, which is 1/8th of the size in each dimension
        let last_level = MIP_LEVELS - 1;
        let last_level_size = (header.width >> last_level) as u64 * (header.height >> last_level) as u64;
        cursor.seek(SeekFrom::Start(
            header.mip_offsets[last_level] as u64 + last_level_size,
        ))?;
        let palette = read_palette(cursor)?;

        Ok(PaletteImage {
            name,
            kind: ImageKind::MipMapped,
            width: header.width,
            height: header.height,
            palette,
            pixels,
        })
    }

    fn texel_count(width: u32, height: u32) -> Result<usize, ParserError> {
        if width == 0 || height == 0 {
            return Err(ParserError::FormatError {
                reason: "Image without texels",
            });
        }

        (width as usize)
            .checked_mul(height as usize)
            .ok_or(ParserError::FormatError {
                reason: "Image dimensions overflow",
            })
    }

    /// Length of the whole stream, the read position is left untouched.
    fn stream_len<R: Seek>(rdr: &mut R) -> Result<u64, ParserError> {
        let position = rdr.stream_position()?;
        let len = rdr.seek(SeekFrom::End(0))?;
        rdr.seek(SeekFrom::Start(position))?;
        Ok(len)
    }

    /// `size` is `None` when computing it already overflowed.
    fn check_in_bounds(
        start: u64,
        size: Option<u64>,
        stream_len: u64,
        reason: &'static str,
    ) -> Result<(), ParserError> {
        match size.and_then(|size| start.checked_add(size)) {
            Some(end) if end <= stream_len => Ok(()),
            _ => Err(ParserError::FormatError { reason }),
        }
    }

    fn check_lump_remaining(cursor: &Cursor<&[u8]>, texel_count: usize) -> Result<(), ParserError> {
        let remaining = (cursor.get_ref().len() as u64).saturating_sub(cursor.position());
        if texel_count as u64 > remaining {
            return Err(ParserError::FormatError {
                reason: "Texels exceed the entry",
            });
        }

        Ok(())
    }
}
