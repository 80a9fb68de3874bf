use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use super::MetadataOptions;
use crate::atlas::Atlas;
use crate::error::SheetpackError;

/// Tiled tileset JSON. Every grid cell is a tile; sprites are attached to the
/// tile at their top-left cell.
#[derive(Serialize)]
struct Tileset {
    columns: u32,
    image: String,
    imageheight: u32,
    imagewidth: u32,
    margin: u32,
    name: String,
    spacing: u32,
    tilecount: u32,
    tileheight: u32,
    tilewidth: u32,
    #[serde(rename = "type")]
    kind: &'static str,
    tiles: Vec<Tile>,
}

#[derive(Serialize)]
struct Tile {
    id: u32,
    properties: Vec<Property>,
}

#[derive(Serialize)]
struct Property {
    name: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
    value: Value,
}

impl Property {
    fn string(name: &'static str, value: &str) -> Self {
        Self {
            name,
            kind: "string",
            value: Value::from(value),
        }
    }

    fn int(name: &'static str, value: u32) -> Self {
        Self {
            name,
            kind: "int",
            value: Value::from(value),
        }
    }
}

pub(super) fn render_tileset(atlas: &Atlas, options: &MetadataOptions) -> Result<String> {
    let tile_size = atlas.grid_size.ok_or(SheetpackError::TiledRequiresGrid)?;
    let columns = atlas.width / tile_size;
    let rows = atlas.height / tile_size;

    let mut tiles: Vec<Tile> = atlas
        .sprites
        .iter()
        .filter_map(|sprite| {
            let cell = sprite.grid?;
            let mut properties = vec![
                Property::string("filename", &sprite.file_name),
                Property::string("key", &sprite.key),
            ];
            if options.grid_metadata {
                properties.push(Property::int("cellsWide", cell.cells_wide));
                properties.push(Property::int("cellsHigh", cell.cells_high));
            }
            Some(Tile {
                id: cell.grid_y * columns + cell.grid_x,
                properties,
            })
        })
        .collect();
    tiles.sort_by_key(|t| t.id);

    let name = std::path::Path::new(options.image)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let tileset = Tileset {
        columns,
        image: options.image.to_string(),
        imageheight: atlas.height,
        imagewidth: atlas.width,
        margin: 0,
        name,
        spacing: 0,
        tilecount: columns * rows,
        tileheight: tile_size,
        tilewidth: tile_size,
        kind: "tileset",
        tiles,
    };

    Ok(serde_json::to_string_pretty(&tileset)?)
}
