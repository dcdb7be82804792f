use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::common::types::C3Vector;

pub const WORLDSPAWN: &str = "worldspawn";

/// The supporting plane of a face, `normal · p = distance` for every point on it.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize, Serialize)]
pub struct Plane {
    pub normal: C3Vector,
    pub distance: f32,
}

/// One texture projection axis: texel coordinate = `(p · axis) / scale + shift`
#[derive(Debug, Copy, Clone, PartialEq, Deserialize, Serialize)]
pub struct TextureAxis {
    pub axis: C3Vector,
    #[serde(default)]
    pub shift: f32,
    #[serde(default = "TextureAxis::default_scale")]
    pub scale: f32,
}

impl TextureAxis {
    fn default_scale() -> f32 {
        1.0
    }

    pub fn new(axis: C3Vector) -> Self {
        TextureAxis {
            axis,
            shift: 0.0,
            scale: 1.0,
        }
    }
}

/// A convex, planar polygon. The vertex loop is already resolved by whoever wrote the level dump,
/// it is neither re-validated nor re-ordered.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Face {
    pub vertices: Vec<C3Vector>,
    pub texture: String,
    pub u_axis: TextureAxis,
    pub v_axis: TextureAxis,
    pub plane: Plane,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Solid {
    pub id: u32,
    #[serde(default)]
    pub faces: Vec<Face>,
}

impl Solid {
    /// An axis aligned box with every face textured `texture`. Faces are wound counter-clockwise when
    /// looking at them from the outside.
    pub fn cuboid(id: u32, min: C3Vector, max: C3Vector, texture: &str) -> Solid {
        let (x0, y0, z0) = (min.x, min.y, min.z);
        let (x1, y1, z1) = (max.x, max.y, max.z);

        // normal, u axis, v axis, vertex loop
        let sides = [
            (
                C3Vector::new(1.0, 0.0, 0.0),
                C3Vector::new(0.0, 1.0, 0.0),
                C3Vector::new(0.0, 0.0, -1.0),
                [(x1, y0, z0), (x1, y1, z0), (x1, y1, z1), (x1, y0, z1)],
            ),
            (
                C3Vector::new(-1.0, 0.0, 0.0),
                C3Vector::new(0.0, 1.0, 0.0),
                C3Vector::new(0.0, 0.0, -1.0),
                [(x0, y0, z0), (x0, y0, z1), (x0, y1, z1), (x0, y1, z0)],
            ),
            (
                C3Vector::new(0.0, 1.0, 0.0),
                C3Vector::new(1.0, 0.0, 0.0),
                C3Vector::new(0.0, 0.0, -1.0),
                [(x0, y1, z0), (x0, y1, z1), (x1, y1, z1), (x1, y1, z0)],
            ),
            (
                C3Vector::new(0.0, -1.0, 0.0),
                C3Vector::new(1.0, 0.0, 0.0),
                C3Vector::new(0.0, 0.0, -1.0),
                [(x0, y0, z0), (x1, y0, z0), (x1, y0, z1), (x0, y0, z1)],
            ),
            (
                C3Vector::new(0.0, 0.0, 1.0),
                C3Vector::new(1.0, 0.0, 0.0),
                C3Vector::new(0.0, -1.0, 0.0),
                [(x0, y0, z1), (x1, y0, z1), (x1, y1, z1), (x0, y1, z1)],
            ),
            (
                C3Vector::new(0.0, 0.0, -1.0),
                C3Vector::new(1.0, 0.0, 0.0),
                C3Vector::new(0.0, -1.0, 0.0),
                [(x0, y0, z0), (x0, y1, z0), (x1, y1, z0), (x1, y0, z0)],
            ),
        ];

        let faces = sides
            .into_iter()
            .map(|(normal, u, v, corners)| {
                let vertices: Vec<C3Vector> = corners
                    .into_iter()
                    .map(|(x, y, z)| C3Vector::new(x, y, z))
                    .collect();
                Face {
                    plane: Plane {
                        normal,
                        distance: normal.dot(vertices[0]),
                    },
                    vertices,
                    texture: texture.to_owned(),
                    u_axis: TextureAxis::new(u),
                    v_axis: TextureAxis::new(v),
                }
            })
            .collect();

        Solid { id, faces }
    }
}

/// Entities own their brushes and nested entities, in file order.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeChild {
    Entity(Entity),
    Solid(Solid),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Entity {
    pub class_name: String,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default)]
    pub children: Vec<NodeChild>,
}

impl Entity {
    pub fn new(class_name: &str) -> Self {
        Entity {
            class_name: class_name.to_owned(),
            properties: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: NodeChild) -> Self {
        self.children.push(child);
        self
    }

    /// The direct brushes of this entity, brushes of nested entities are not included.
    pub fn solids(&self) -> impl Iterator<Item = &Solid> {
        self.children.iter().filter_map(|child| match child {
            NodeChild::Solid(solid) => Some(solid),
            NodeChild::Entity(_) => None,
        })
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.children.iter().filter_map(|child| match child {
            NodeChild::Entity(entity) => Some(entity),
            NodeChild::Solid(_) => None,
        })
    }
}
