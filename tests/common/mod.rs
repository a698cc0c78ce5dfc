#![allow(dead_code)]

use std::fmt::Write;
use std::path::{Path, PathBuf};

pub const TILE: i32 = 32;

/// A map document with 32 px tiles, one gid-encoded layer filled with tile 1,
/// and a `Collisions` group holding `obstacles` as pixel rects `(x, y, w, h)`.
pub fn tmx(columns: i32, rows: i32, obstacles: &[(i32, i32, i32, i32)]) -> String {
    let mut doc = String::new();
    writeln!(
        doc,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.10" orientation="orthogonal" width="{columns}" height="{rows}" tilewidth="{TILE}" tileheight="{TILE}">
 <tileset firstgid="1" name="test" tilewidth="{TILE}" tileheight="{TILE}">
  <image source="tiles.png" width="128" height="128"/>
 </tileset>
 <layer id="1" name="Ground" width="{columns}" height="{rows}">
  <data>"#
    )
    .unwrap();
    for _ in 0..columns * rows {
        doc.push_str("   <tile gid=\"1\"/>\n");
    }
    doc.push_str("  </data>\n </layer>\n <objectgroup id=\"2\" name=\"Collisions\">\n");
    for (i, (x, y, w, h)) in obstacles.iter().enumerate() {
        writeln!(doc, r#"  <object id="{}" x="{x}" y="{y}" width="{w}" height="{h}"/>"#, i + 1).unwrap();
    }
    doc.push_str(" </objectgroup>\n</map>\n");
    doc
}

/// Pixel rect covering exactly the cell `(x, y)`.
pub fn block(x: i32, y: i32) -> (i32, i32, i32, i32) {
    (x * TILE, y * TILE, TILE, TILE)
}

pub fn write_map(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Path to a file shipped under `assets/`.
pub fn asset(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets").join(relative)
}
