use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::ParserError;
use crate::common::types::Rgb;

pub(crate) trait Parseable<T> {
    fn parse<R: Read>(rdr: &mut R) -> Result<T, ParserError>;
}

impl Parseable<Rgb> for Rgb {
    fn parse<R: Read>(rdr: &mut R) -> Result<Rgb, ParserError> {
        Ok(Rgb {
            r: rdr.read_u8()?,
            g: rdr.read_u8()?,
            b: rdr.read_u8()?,
        })
    }
}

impl Parseable<u8> for u8 {
    fn parse<R: Read>(rdr: &mut R) -> Result<u8, ParserError> {
        Ok(rdr.read_u8()?)
    }
}

impl Parseable<u16> for u16 {
    fn parse<R: Read>(rdr: &mut R) -> Result<u16, ParserError> {
        Ok(rdr.read_u16::<LittleEndian>()?)
    }
}

impl Parseable<i32> for i32 {
    fn parse<R: Read>(rdr: &mut R) -> Result<i32, ParserError> {
        Ok(rdr.read_i32::<LittleEndian>()?)
    }
}

impl Parseable<u32> for u32 {
    fn parse<R: Read>(rdr: &mut R) -> Result<u32, ParserError> {
        Ok(rdr.read_u32::<LittleEndian>()?)
    }
}

impl<const N: usize> Parseable<[u8; N]> for [u8; N] {
    fn parse<R: Read>(rdr: &mut R) -> Result<[u8; N], ParserError> {
        let mut buf = [0u8; N];
        rdr.read_exact(&mut buf)?;
        Ok(buf)
    }
}

impl<const N: usize> Parseable<[u32; N]> for [u32; N] {
    fn parse<R: Read>(rdr: &mut R) -> Result<[u32; N], ParserError> {
        let mut buf = [0u32; N];
        rdr.read_u32_into::<LittleEndian>(&mut buf)?;
        Ok(buf)
    }
}

/// Names in the archive formats are stored in fixed size, NUL padded fields.
/// Everything after the first NUL is garbage from the authoring tool and is ignored.
pub(crate) fn read_fixed_string(raw: &[u8]) -> Result<String, ParserError> {
    let end = raw.iter().position(|&c| c == 0).unwrap_or(raw.len());
    Ok(String::from_utf8(raw[..end].to_vec())?)
}

pub(crate) fn read_bytes<R: Read>(rdr: &mut R, count: usize) -> Result<Vec<u8>, ParserError> {
    let mut data = vec![0; count];
    rdr.read_exact(&mut data)?;
    Ok(data)
}

pub(crate) fn read_palette<R: Read>(rdr: &mut R) -> Result<Vec<Rgb>, ParserError> {
    let color_count = rdr.read_u16::<LittleEndian>()?;
    if color_count as usize != crate::common::types::PALETTE_SIZE {
        return Err(ParserError::FormatError {
            reason: "Palette does not contain exactly 256 colors",
        });
    }

    (0..color_count).map(|_| Rgb::parse(rdr)).collect()
}
