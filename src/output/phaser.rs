use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;

use super::MetadataOptions;
use crate::atlas::Atlas;
use crate::sprite::PackedSprite;

#[derive(Serialize)]
struct HashSheet {
    frames: BTreeMap<String, PhaserFrame>,
    meta: Meta,
}

#[derive(Serialize)]
struct ArraySheet {
    frames: Vec<ArrayFrame>,
    meta: Meta,
}

#[derive(Serialize)]
struct ArrayFrame {
    filename: String,
    #[serde(flatten)]
    frame: PhaserFrame,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PhaserFrame {
    frame: Frame,
    rotated: bool,
    trimmed: bool,
    sprite_source_size: Frame,
    source_size: Size,
    /// Top-left cell and span, only with grid metadata enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    grid: Option<Frame>,
}

#[derive(Serialize)]
struct Frame {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

#[derive(Serialize)]
struct Size {
    w: u32,
    h: u32,
}

#[derive(Serialize)]
struct Meta {
    app: &'static str,
    version: &'static str,
    image: String,
    format: &'static str,
    size: Size,
    scale: String,
}

fn meta(atlas: &Atlas, options: &MetadataOptions) -> Meta {
    Meta {
        app: "sheetpack",
        version: env!("CARGO_PKG_VERSION"),
        image: options.image.to_string(),
        format: "RGBA8888",
        size: Size {
            w: atlas.width,
            h: atlas.height,
        },
        scale: options.scale.to_string(),
    }
}

fn sprite_to_frame(sprite: &PackedSprite, grid_metadata: bool) -> PhaserFrame {
    let trim = &sprite.trim_info;

    PhaserFrame {
        frame: Frame {
            x: sprite.x,
            y: sprite.y,
            w: sprite.width,
            h: sprite.height,
        },
        rotated: false,
        trimmed: trim.was_trimmed(),
        sprite_source_size: Frame {
            x: trim.offset_x,
            y: trim.offset_y,
            w: trim.trimmed_width,
            h: trim.trimmed_height,
        },
        source_size: Size {
            w: trim.source_width,
            h: trim.source_height,
        },
        grid: sprite.grid.filter(|_| grid_metadata).map(|cell| Frame {
            x: cell.grid_x,
            y: cell.grid_y,
            w: cell.cells_wide,
            h: cell.cells_high,
        }),
    }
}

/// Phaser JSON hash: `frames` is an object keyed by frame name
pub(super) fn render_hash(atlas: &Atlas, options: &MetadataOptions) -> Result<String> {
    let frames = atlas
        .sprites
        .iter()
        .map(|s| (s.key.clone(), sprite_to_frame(s, options.grid_metadata)))
        .collect();

    let sheet = HashSheet {
        frames,
        meta: meta(atlas, options),
    };
    Ok(serde_json::to_string_pretty(&sheet)?)
}

/// Phaser JSON array: `frames` is a list in placement order
pub(super) fn render_array(atlas: &Atlas, options: &MetadataOptions) -> Result<String> {
    let frames = atlas
        .sprites
        .iter()
        .map(|s| ArrayFrame {
            filename: s.key.clone(),
            frame: sprite_to_frame(s, options.grid_metadata),
        })
        .collect();

    let sheet = ArraySheet {
        frames,
        meta: meta(atlas, options),
    };
    Ok(serde_json::to_string_pretty(&sheet)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::packing::GridCell;
    use crate::sprite::TrimInfo;
    use serde_json::{Value, json};

    fn atlas() -> Atlas {
        let mut atlas = Atlas::new(64, 32);
        atlas.sprites.push(PackedSprite {
            key: "hero/idle".to_string(),
            file_name: "hero/idle.png".to_string(),
            x: 2,
            y: 2,
            width: 28,
            height: 30,
            trim_info: TrimInfo {
                offset_x: 2,
                offset_y: 1,
                source_width: 32,
                source_height: 32,
                trimmed_width: 28,
                trimmed_height: 30,
            },
            grid: Some(GridCell {
                grid_x: 0,
                grid_y: 0,
                cells_wide: 1,
                cells_high: 1,
            }),
        });
        atlas.sprites.push(PackedSprite {
            key: "coin".to_string(),
            file_name: "coin.png".to_string(),
            x: 34,
            y: 2,
            width: 16,
            height: 16,
            trim_info: TrimInfo::untrimmed(16, 16),
            grid: Some(GridCell {
                grid_x: 1,
                grid_y: 0,
                cells_wide: 1,
                cells_high: 1,
            }),
        });
        atlas
    }

    fn parse(rendered: Result<String>) -> Value {
        serde_json::from_str(&rendered.unwrap()).unwrap()
    }

    fn options(grid_metadata: bool) -> MetadataOptions<'static> {
        MetadataOptions {
            format: OutputFormat::PhaserHash,
            image: "sheet.png",
            scale: 0.5,
            grid_metadata,
        }
    }

    #[test]
    fn test_hash_frames_keyed_by_name() {
        let json = parse(render_hash(&atlas(), &options(false)));

        let idle = &json["frames"]["hero/idle"];
        assert_eq!(idle["frame"], json!({ "x": 2, "y": 2, "w": 28, "h": 30 }));
        assert_eq!(idle["trimmed"], true);
        assert_eq!(idle["rotated"], false);
        assert_eq!(idle["spriteSourceSize"], json!({ "x": 2, "y": 1, "w": 28, "h": 30 }));
        assert_eq!(idle["sourceSize"], json!({ "w": 32, "h": 32 }));
        assert!(idle.get("grid").is_none());

        let coin = &json["frames"]["coin"];
        assert_eq!(coin["trimmed"], false);
        assert_eq!(coin["spriteSourceSize"], json!({ "x": 0, "y": 0, "w": 16, "h": 16 }));

        assert_eq!(json["meta"]["image"], "sheet.png");
        assert_eq!(json["meta"]["size"], json!({ "w": 64, "h": 32 }));
        assert_eq!(json["meta"]["scale"], "0.5");
        assert_eq!(json["meta"]["format"], "RGBA8888");
    }

    #[test]
    fn test_array_keeps_placement_order() {
        let json = parse(render_array(&atlas(), &options(false)));
        let frames = json["frames"].as_array().unwrap();

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0]["filename"], "hero/idle");
        assert_eq!(frames[1]["filename"], "coin");
        assert_eq!(frames[1]["frame"]["x"], 34);
    }

    #[test]
    fn test_grid_metadata_included_when_requested() {
        let json = parse(render_array(&atlas(), &options(true)));

        assert_eq!(
            json["frames"][1]["grid"],
            json!({ "x": 1, "y": 0, "w": 1, "h": 1 })
        );
    }
}
