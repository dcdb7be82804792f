use crate::rendering::common::types::DecodedTexture;
use glam::UVec2;
use std::collections::HashMap;

/// Texel dimensions per texture name, used to normalize texture coordinates.
/// Textures that aren't known resolve to the fallback size.
#[derive(Debug, Clone)]
pub struct TextureSizes {
    sizes: HashMap<String, UVec2>,
    fallback: UVec2,
}

impl TextureSizes {
    pub fn new(fallback: UVec2) -> Self {
        Self {
            sizes: HashMap::new(),
            // A zero sized texture would divide by zero
            fallback: fallback.max(UVec2::ONE),
        }
    }

    pub fn insert(&mut self, texture_name: &str, size: UVec2) {
        self.sizes
            .insert(texture_name.to_lowercase(), size.max(UVec2::ONE));
    }

    pub fn extend_from_textures<'a>(&mut self, textures: impl IntoIterator<Item = &'a DecodedTexture>) {
        for texture in textures {
            self.insert(&texture.entry_name, texture.size());
        }
    }

    pub fn lookup(&self, texture_name: &str) -> UVec2 {
        self.sizes
            .get(&texture_name.to_lowercase())
            .copied()
            .unwrap_or(self.fallback)
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}
