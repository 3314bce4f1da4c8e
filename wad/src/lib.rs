//! Decoding and geometry generation for Doom WAD files with glBSP nodes.
//!
//! An [`Archive`] wraps the container format and its lump directory. From
//! it, [`Level`] decodes one map's classic lumps and [`GlLevel`] the GL
//! node extension. [`generate`] turns both into renderable meshes, and
//! [`LevelContext`] bundles everything a renderer needs for one map.

mod anim;
mod archive;
mod bank;
mod bsp;
mod context;
mod errors;
#[cfg(test)]
mod fixtures;
mod geom;
mod gl;
mod level;
mod name;
mod types;
pub mod util;

pub use crate::anim::FlatAnimations;
pub use crate::archive::{Archive, Lump};
pub use crate::bank::{TextureBank, WallTexture, UNTEXTURED_SIZE};
pub use crate::bsp::{locate_sector, partition_line, sector_of_seg};
pub use crate::context::LevelContext;
pub use crate::errors::{Error, ErrorKind, Result};
pub use crate::geom::{
    generate, DrawNode, DrawTree, LevelGeometry, Mesh, MeshVertex, TextureKind, WallEntry,
    WallKind, FLAT_TILE_SIZE, NO_TEXTURE,
};
pub use crate::gl::{from_fixed, parse_child_id, GlLevel, GL_VERTEX_BIT, LEAF_BIT, NO_LINEDEF};
pub use crate::level::{Level, PlayerStart, PLAYER_EYE_HEIGHT};
pub use crate::name::LumpName;
pub use crate::types::*;
