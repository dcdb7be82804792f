use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use glam::UVec2;
use serde::{Deserialize, Serialize};

pub mod cli;

/// Which collision shapes are generated for the brushes of solid entities.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ColliderMode {
    /// Every brush becomes its bounding box, even if it's slanted
    BoxOnly,
    /// Every brush becomes a convex hull
    HullOnly,
    /// Boxes where every face is axis aligned, convex hulls otherwise
    #[default]
    BoxAndHull,
    /// One triangle mesh per entity, built from all of its brushes
    ConcaveAll,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Applied to every position after the texture coordinates have been projected
    pub scale: f32,
    pub entity_name_prefix: String,
    /// Faces whose texture name contains any of these (case insensitive) are not rendered
    pub excluded_texture_keywords: Vec<String>,
    /// Entities whose class name contains any of these don't collide
    pub nonsolid_entity_keywords: Vec<String>,
    /// Entities whose class name contains any of these get sensor colliders
    pub trigger_entity_keywords: Vec<String>,
    pub collider_mode: ColliderMode,
    /// Texel dimensions for textures that are not part of any loaded archive
    pub default_texture_size: UVec2,
    pub texture_scale: f32,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            scale: 1.0,
            entity_name_prefix: "entity".to_string(),
            excluded_texture_keywords: ["sky", "trigger", "clip", "skip", "water"]
                .map(String::from)
                .to_vec(),
            nonsolid_entity_keywords: vec!["illusionary".to_string()],
            trigger_entity_keywords: vec!["trigger".to_string()],
            collider_mode: ColliderMode::default(),
            default_texture_size: UVec2::ONE,
            texture_scale: 1.0,
        }
    }
}

impl ImportSettings {
    pub fn from_json_file(path: &Path) -> Result<Self, anyhow::Error> {
        let file = File::open(path).with_context(|| format!("Opening settings {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file)).with_context(|| format!("Parsing settings {}", path.display()))
    }

    pub fn is_excluded_texture(&self, texture_name: &str) -> bool {
        contains_keyword(&self.excluded_texture_keywords, texture_name)
    }

    pub fn is_nonsolid_entity(&self, class_name: &str) -> bool {
        contains_keyword(&self.nonsolid_entity_keywords, class_name)
    }

    pub fn is_trigger_entity(&self, class_name: &str) -> bool {
        contains_keyword(&self.trigger_entity_keywords, class_name)
    }
}

/// Case insensitive substring match against a keyword list
pub fn contains_keyword(keywords: &[String], name: &str) -> bool {
    let name = name.to_lowercase();
    keywords
        .iter()
        .any(|keyword| name.contains(&keyword.to_lowercase()))
}
