/// The objects that are the result of an import, ready to be handed to a scene graph.
pub mod highlevel_types;
pub mod mesh_merger;
/// Types that are more specific than the generic render types, but not part of the importers.
pub mod special_types;
/// basic types (e.g. mesh) to abstract away from both the level format and whoever consumes the result.
pub mod types;
