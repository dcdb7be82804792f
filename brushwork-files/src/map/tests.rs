use std::io::Cursor;

use crate::ParserError;
use crate::common::types::C3Vector;
use crate::map::reader::MapReader;
use crate::map::types::{Entity, NodeChild, Solid};

#[test]
fn parse_nested_entities() -> Result<(), anyhow::Error> {
    let json = r#"{
        "class_name": "worldspawn",
        "properties": { "wad": "base.wad" },
        "children": [
            { "solid": { "id": 1, "faces": [] } },
            { "entity": { "class_name": "func_door", "children": [ { "solid": { "id": 2 } } ] } }
        ]
    }"#;

    let root = MapReader::parse_asset(&mut Cursor::new(json))?;
    assert_eq!(root.class_name, "worldspawn");
    assert_eq!(root.properties.get("wad").map(String::as_str), Some("base.wad"));
    assert_eq!(root.solids().map(|s| s.id).collect::<Vec<_>>(), vec![1]);

    let door = root.entities().next().expect("nested entity");
    assert_eq!(door.class_name, "func_door");
    assert_eq!(door.solids().map(|s| s.id).collect::<Vec<_>>(), vec![2]);
    Ok(())
}

#[test]
fn texture_axis_defaults() -> Result<(), anyhow::Error> {
    let json = r#"{
        "class_name": "worldspawn",
        "children": [ { "solid": { "id": 7, "faces": [ {
            "vertices": [ {"x": 0, "y": 0, "z": 0}, {"x": 1, "y": 0, "z": 0}, {"x": 1, "y": 1, "z": 0} ],
            "texture": "stone",
            "u_axis": { "axis": {"x": 1, "y": 0, "z": 0} },
            "v_axis": { "axis": {"x": 0, "y": -1, "z": 0}, "shift": 8 },
            "plane": { "normal": {"x": 0, "y": 0, "z": 1}, "distance": 0 }
        } ] } } ]
    }"#;

    let root = MapReader::parse_asset(&mut Cursor::new(json))?;
    let face = &root.solids().next().expect("solid").faces[0];
    assert_eq!(face.u_axis.scale, 1.0);
    assert_eq!(face.u_axis.shift, 0.0);
    assert_eq!(face.v_axis.shift, 8.0);
    Ok(())
}

#[test]
fn reject_non_worldspawn_root() {
    let json = r#"{ "class_name": "func_wall" }"#;
    let result = MapReader::parse_asset(&mut Cursor::new(json));
    assert!(matches!(result, Err(ParserError::FormatError { .. })));
}

#[test]
fn round_trip_through_json() -> Result<(), anyhow::Error> {
    let root = Entity::new("worldspawn").with_child(NodeChild::Solid(Solid::cuboid(
        3,
        C3Vector::new(0.0, 0.0, 0.0),
        C3Vector::new(1.0, 1.0, 1.0),
        "stone",
    )));

    let json = serde_json::to_string(&root)?;
    let parsed = MapReader::parse_asset(&mut Cursor::new(json))?;
    assert_eq!(parsed, root);
    Ok(())
}

#[test]
fn cuboid_faces_point_outwards() {
    let solid = Solid::cuboid(1, C3Vector::new(-1.0, -2.0, -3.0), C3Vector::new(1.0, 2.0, 3.0), "stone");
    assert_eq!(solid.faces.len(), 6);

    for face in &solid.faces {
        assert_eq!(face.vertices.len(), 4);
        for vertex in &face.vertices {
            assert_eq!(face.plane.normal.dot(*vertex), face.plane.distance);
        }
        // the origin is inside the box, so it lies behind every face
        assert!(face.plane.distance > 0.0);
    }
}
