use std::io::Read;

use crate::ParserError;
use crate::map::types::{Entity, WORLDSPAWN};

pub struct MapReader {}

impl MapReader {
    /// Reads a level dump, whose brushes already carry their resolved vertex loops, as JSON.
    pub fn parse_asset<R: Read>(rdr: &mut R) -> Result<Entity, ParserError> {
        let root: Entity = serde_json::from_reader(rdr)?;

        if !root.class_name.eq_ignore_ascii_case(WORLDSPAWN) {
            return Err(ParserError::FormatError {
                reason: "The root entity has to be the worldspawn",
            });
        }

        Ok(root)
    }
}
