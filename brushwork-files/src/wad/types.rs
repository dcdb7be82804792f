use num_enum::FromPrimitive;
use brushwork_files_derive_parseable::Parse;

use crate::ParserError;
use crate::common::reader::read_fixed_string;
use crate::common::types::Rgb;

// https://developer.valvesoftware.com/wiki/WAD

pub const FOURCC_WAD2: u32 = u32::from_le_bytes(*b"WAD2");
pub const FOURCC_WAD3: u32 = u32::from_le_bytes(*b"WAD3");

pub const HEADER_SIZE: usize = 12;
pub const DIRECTORY_ENTRY_SIZE: usize = 32;
pub const MIP_LEVELS: usize = 4;

#[derive(Debug, Copy, Clone, Parse)]
pub struct WADHeader {
    pub magic: u32,
    pub num_entries: i32,
    pub directory_offset: i32,
}

#[derive(Debug, Clone, Parse)]
pub struct WADDirectoryEntry {
    /// absolute offset of the entry data in the file
    pub offset: i32,
    pub disk_size: i32,
    /// uncompressed size
    pub size: i32,
    pub lump_type: u8,
    pub compression: u8,
    pub padding: u16,
    pub name: [u8; 16],
}

impl WADDirectoryEntry {
    pub fn name(&self) -> Result<String, ParserError> {
        read_fixed_string(&self.name)
    }

    pub fn kind(&self) -> LumpType {
        LumpType::from(self.lump_type)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, FromPrimitive)]
#[repr(u8)]
pub enum LumpType {
    Palette = 0x40,
    ColorMap = 0x41,
    /// Raw indexed picture (qpic), carries its own palette in WAD3
    Picture = 0x42,
    /// Mip mapped indexed texture with a trailing palette (WAD3)
    MipTexture = 0x43,
    /// Quake's miptex, that relies on the external gfx/palette.lmp
    QuakeMipTexture = 0x44,
    ColorMap2 = 0x45,
    Font = 0x46,
    #[num_enum(catch_all)]
    Unknown(u8),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ImageKind {
    Picture,
    MipMapped,
}

/// The fixed size header in front of every mip texture lump.
#[derive(Debug, Clone, Parse)]
pub struct MipTexHeader {
    pub name: [u8; 16],
    pub width: u32,
    pub height: u32,
    /// relative to the start of the lump
    pub mip_offsets: [u32; MIP_LEVELS],
}

#[derive(Debug, Copy, Clone, Parse)]
pub struct PictureHeader {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug)]
pub struct WADAsset {
    pub header: WADHeader,
    pub directory: Vec<WADDirectoryEntry>,
}

/// An image exactly as it's stored: one palette index per texel, row-major, the first row being the
/// first one stored in the archive.
#[derive(Debug, Clone)]
pub struct PaletteImage {
    pub name: String,
    pub kind: ImageKind,
    pub width: u32,
    pub height: u32,
    pub palette: Vec<Rgb>,
    /// Mip level 0
    pub pixels: Vec<u8>,
}
