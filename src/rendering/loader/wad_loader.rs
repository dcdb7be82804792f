use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use brushwork_files::ParserError;
use brushwork_files::wad::reader::WADReader;
use brushwork_files::wad::types::PaletteImage;
use glam::UVec2;
use log::{debug, trace, warn};
use thiserror::Error;

use crate::rendering::common::special_types::TextureSizes;
use crate::rendering::common::types::DecodedTexture;

#[derive(Error, Debug)]
pub enum WadLoadError {
    #[error("Could not open the texture archive {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse the texture archive {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParserError,
    },
}

pub struct WadLoader {}

impl WadLoader {
    /// Decodes every supported image of the archive into RGBA8. Textures are named after the archive's file stem
    /// and the lowercase entry name.
    pub fn load(path: &Path) -> Result<Vec<DecodedTexture>, WadLoadError> {
        let file = File::open(path).map_err(|source| WadLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let archive_name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();

        Self::load_from_reader(&archive_name, &mut BufReader::new(file)).map_err(|source| match source {
            ParserError::IOError(source) => WadLoadError::Io {
                path: path.to_path_buf(),
                source,
            },
            source => WadLoadError::Parse {
                path: path.to_path_buf(),
                source,
            },
        })
    }

    /// The texture dimensions of several archives, used to normalize texture coordinates. An archive that fails
    /// to load is reported and skipped, its textures fall back to `fallback`.
    pub fn collect_texture_sizes<P: AsRef<Path>>(archives: &[P], fallback: UVec2) -> TextureSizes {
        let mut sizes = TextureSizes::new(fallback);
        for archive in archives {
            match Self::load(archive.as_ref()) {
                Ok(textures) => sizes.extend_from_textures(&textures),
                Err(err) => warn!("Skipping texture archive: {}", err),
            }
        }

        sizes
    }

    /// Only a broken header or directory fails the whole archive. Single entries that can't be decoded are
    /// skipped.
    pub fn load_from_reader<R: Read + Seek>(
        archive_name: &str,
        rdr: &mut R,
    ) -> Result<Vec<DecodedTexture>, ParserError> {
        let asset = WADReader::parse_asset(rdr)?;
        trace!("{} has {} entries", archive_name, asset.directory.len());

        let mut textures = Vec::with_capacity(asset.directory.len());
        for entry in &asset.directory {
            match WADReader::read_image(rdr, entry) {
                Ok(image) => textures.push(Self::decode_image(archive_name, &image)),
                Err(err) => warn!("Skipping an entry of {}: {}", archive_name, err),
            }
        }

        if textures.is_empty() {
            warn!("{} does not contain any decodable texture", archive_name);
        } else {
            debug!("Decoded {} textures from {}", textures.len(), archive_name);
        }

        Ok(textures)
    }

    /// Expands the palette indices to RGBA8. Rows keep their stored order but the output is flipped vertically,
    /// so the first output row is the last stored one.
    pub fn decode_image(archive_name: &str, image: &PaletteImage) -> DecodedTexture {
        let entry_name = image.name.to_lowercase();
        let mut data = Vec::with_capacity(image.pixels.len() * 4);

        if image.width > 0 {
            for row in image.pixels.chunks_exact(image.width as usize).rev() {
                for &index in row {
                    let color = image.palette.get(index as usize).copied().unwrap_or_default();
                    data.extend_from_slice(&color.to_rgba());
                }
            }
        }

        DecodedTexture {
            name: format!("{}.{}", archive_name, entry_name),
            entry_name,
            width: image.width,
            height: image.height,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::rendering::loader::wad_loader::WadLoader;
    use brushwork_files::common::types::Rgb;
    use brushwork_files::wad::types::{ImageKind, PaletteImage};

    fn palette() -> Vec<Rgb> {
        let mut palette = vec![Rgb::default(); 256];
        palette[0] = Rgb { r: 255, g: 0, b: 0 };
        palette[1] = Rgb { r: 0, g: 0, b: 255 };
        palette
    }

    #[test]
    pub fn rows_are_flipped() {
        let image = PaletteImage {
            name: "RED_BLUE".to_string(),
            kind: ImageKind::Picture,
            width: 2,
            height: 2,
            palette: palette(),
            pixels: vec![0, 0, 1, 1],
        };

        let texture = WadLoader::decode_image("halflife", &image);
        assert_eq!(texture.data.len(), 16);
        assert_eq!(texture.pixel(0, 0), Some([0, 0, 255, 255]));
        assert_eq!(texture.pixel(1, 0), Some([0, 0, 255, 255]));
        assert_eq!(texture.pixel(0, 1), Some([255, 0, 0, 255]));
        assert_eq!(texture.pixel(1, 1), Some([255, 0, 0, 255]));
    }

    #[test]
    pub fn names_combine_archive_and_lowercase_entry() {
        let image = PaletteImage {
            name: "{Fence".to_string(),
            kind: ImageKind::MipMapped,
            width: 1,
            height: 1,
            palette: palette(),
            pixels: vec![1],
        };

        let texture = WadLoader::decode_image("decals", &image);
        assert_eq!(texture.name, "decals.{fence");
        assert_eq!(texture.entry_name, "{fence");
    }

    #[test]
    pub fn invalid_header_fails_the_archive() {
        let mut rdr = Cursor::new(b"PAK0\0\0\0\0\0\0\0\0".to_vec());
        assert!(WadLoader::load_from_reader("broken", &mut rdr).is_err());
    }
}
