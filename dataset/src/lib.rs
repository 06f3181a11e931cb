//! Folder ingestion: discovers images and pairs them with annotations
//! parsed from YOLO-style label files, COCO JSON or flat CSV/TXT tables.

mod common;

pub mod coco;
pub use coco::*;

pub mod flat;
pub use flat::*;

pub mod folder;
pub use folder::*;

pub mod yolo;
pub use yolo::*;
