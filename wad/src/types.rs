use crate::name::LumpName;
use serde::Deserialize;

pub type WadCoord = i16;
pub type LightLevel = i16;
pub type LinedefFlags = u16;
pub type ThingType = u16;
pub type ThingFlags = u16;
pub type SpecialType = u16;
pub type SectorType = u16;

pub type VertexId = u16;
pub type LinedefId = u16;
pub type SectorId = u16;
pub type SidedefId = i16;
pub type ChildId = u16;

pub const HEADER_SIZE: usize = 12;
pub const DIR_ENTRY_SIZE: usize = 16;

pub const THING_SIZE: usize = 10;
pub const VERTEX_SIZE: usize = 4;
pub const LINEDEF_SIZE: usize = 14;
pub const SIDEDEF_SIZE: usize = 30;
pub const SECTOR_SIZE: usize = 26;

pub const GL_VERTEX_SIZE: usize = 8;
pub const GL_SEG_SIZE: usize = 10;
pub const GL_SUBSECTOR_SIZE: usize = 4;
pub const GL_NODE_SIZE: usize = 12;

/// The twelve byte header at offset zero of every WAD.
#[derive(Copy, Clone, Debug, Deserialize)]
pub struct WadHeader {
    pub identifier: [u8; 4],
    pub num_lumps: u32,
    pub directory_offset: u32,
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct WadDirEntry {
    pub offset: u32,
    pub size: u32,
    pub name: LumpName,
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct WadThing {
    pub x: WadCoord,
    pub y: WadCoord,
    pub angle: WadCoord,
    pub thing_type: ThingType,
    pub flags: ThingFlags,
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct WadVertex {
    pub x: WadCoord,
    pub y: WadCoord,
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct WadLinedef {
    pub start_vertex: VertexId,
    pub end_vertex: VertexId,
    pub flags: LinedefFlags,
    pub special_type: SpecialType,
    pub sector_tag: u16,
    pub front_side: SidedefId,
    pub back_side: SidedefId,
}

impl WadLinedef {
    pub fn impassable(&self) -> bool {
        self.flags & 0x0001 != 0
    }

    pub fn is_two_sided(&self) -> bool {
        self.flags & 0x0004 != 0
    }

    pub fn upper_unpegged(&self) -> bool {
        self.flags & 0x0008 != 0
    }

    pub fn lower_unpegged(&self) -> bool {
        self.flags & 0x0010 != 0
    }
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct WadSidedef {
    pub x_offset: WadCoord,
    pub y_offset: WadCoord,
    pub upper_texture: LumpName,
    pub lower_texture: LumpName,
    pub middle_texture: LumpName,
    pub sector: SectorId,
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct WadSector {
    pub floor_height: WadCoord,
    pub ceiling_height: WadCoord,
    pub floor_texture: LumpName,
    pub ceiling_texture: LumpName,
    pub light: LightLevel,
    pub sector_type: SectorType,
    pub tag: u16,
}

/// A GL_VERT entry: map coordinates in 16.16 fixed point.
#[derive(Copy, Clone, Debug, Deserialize)]
pub struct GlVertex {
    pub x: i32,
    pub y: i32,
}

/// A GL_SEGS entry. Vertex ids with the high bit set index the GL vertex
/// pool, the others the map's own VERTEXES lump. Segs along a BSP split
/// rather than a map line carry `NO_LINEDEF`; `partner` names the seg on
/// the other side of the line, or 0xffff for none.
#[derive(Copy, Clone, Debug, Deserialize)]
pub struct GlSeg {
    pub start_vertex: VertexId,
    pub end_vertex: VertexId,
    pub linedef: LinedefId,
    pub side: u16,
    pub partner: u16,
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct GlSubsector {
    pub num_segs: u16,
    pub first_seg: u16,
}

/// A GL_NODES entry. The partition line runs from `(x, y)` along
/// `(dx, dy)`; child ids with the high bit set are subsector leaves.
#[derive(Copy, Clone, Debug, Deserialize)]
pub struct GlNode {
    pub x: WadCoord,
    pub y: WadCoord,
    pub dx: WadCoord,
    pub dy: WadCoord,
    pub front: ChildId,
    pub back: ChildId,
}
