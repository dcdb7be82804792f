use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use brushwork_files::ParserError;
use brushwork_files::map::reader::MapReader;
use brushwork_files::map::types::Entity;
use log::debug;
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LevelFormat {
    /// An entity tree whose brushes already carry their face vertex loops
    Json,
}

impl LevelFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("json") {
            Some(LevelFormat::Json)
        } else {
            None
        }
    }
}

#[derive(Error, Debug)]
pub enum LevelLoadError {
    #[error("There is no importer for the level format \"{extension}\"")]
    NoImporter { extension: String },

    #[error("Could not read the level {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse the level {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParserError,
    },
}

pub struct LevelLoader {}

impl LevelLoader {
    pub fn load(path: &Path) -> Result<Entity, LevelLoadError> {
        let format = LevelFormat::from_path(path).ok_or_else(|| LevelLoadError::NoImporter {
            extension: path
                .extension()
                .map(|ext| ext.to_string_lossy().to_string())
                .unwrap_or_default(),
        })?;

        let file = File::open(path).map_err(|source| LevelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let root = match format {
            LevelFormat::Json => MapReader::parse_asset(&mut BufReader::new(file)),
        }
        .map_err(|source| LevelLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Loaded {} as {:?}", path.display(), format);
        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use crate::rendering::loader::level_loader::{LevelFormat, LevelLoadError, LevelLoader};
    use std::path::Path;

    #[test]
    pub fn format_by_extension() {
        assert_eq!(LevelFormat::from_path(Path::new("maps/crossfire.json")), Some(LevelFormat::Json));
        assert_eq!(LevelFormat::from_path(Path::new("maps/CROSSFIRE.JSON")), Some(LevelFormat::Json));
        assert_eq!(LevelFormat::from_path(Path::new("maps/crossfire.bsp")), None);
        assert_eq!(LevelFormat::from_path(Path::new("maps/crossfire")), None);
    }

    #[test]
    pub fn unknown_extension_has_no_importer() {
        match LevelLoader::load(Path::new("does/not/matter.map")) {
            Err(LevelLoadError::NoImporter { extension }) => assert_eq!(extension, "map"),
            other => panic!("Expected NoImporter, got {:?}", other),
        }
    }
}
