use crate::archive::{Archive, Lump};
use crate::errors::{Error, ErrorKind, Result};
use crate::name::LumpName;
use crate::types::{
    SectorId, VertexId, WadLinedef, WadSector, WadSidedef, WadThing, WadVertex, LINEDEF_SIZE,
    SECTOR_SIZE, SIDEDEF_SIZE, THING_SIZE, VERTEX_SIZE,
};
use crate::util::point_bounds;
use log::info;
use math::Pnt2f;

// Positional offsets of the map's sub-lumps relative to its marker.
pub const THINGS_OFFSET: usize = 1;
pub const LINEDEFS_OFFSET: usize = 2;
pub const SIDEDEFS_OFFSET: usize = 3;
pub const VERTEXES_OFFSET: usize = 4;
pub const SECTORS_OFFSET: usize = 8;

pub const PLAYER1_START: u16 = 1;
pub const PLAYER_EYE_HEIGHT: f32 = 41.0;

/// The classic lumps of one map, decoded.
#[derive(Debug)]
pub struct Level {
    pub name: LumpName,
    pub things: Vec<WadThing>,
    pub linedefs: Vec<WadLinedef>,
    pub sidedefs: Vec<WadSidedef>,
    pub vertices: Vec<WadVertex>,
    pub sectors: Vec<WadSector>,
}

impl Level {
    pub fn decode(archive: &Archive, name: LumpName) -> Result<Level> {
        let marker = archive
            .named_lump(name)
            .ok_or_else(|| Error::from(ErrorKind::map_not_found(name)))?;
        let start = marker.index();
        info!("Reading level {}...", name);

        let things = positional_lump(archive, name, start, THINGS_OFFSET)?
            .decode_vec(THING_SIZE)?;
        let linedefs = positional_lump(archive, name, start, LINEDEFS_OFFSET)?
            .decode_vec(LINEDEF_SIZE)?;
        let sidedefs = positional_lump(archive, name, start, SIDEDEFS_OFFSET)?
            .decode_vec(SIDEDEF_SIZE)?;
        let vertices = positional_lump(archive, name, start, VERTEXES_OFFSET)?
            .decode_vec(VERTEX_SIZE)?;
        let sectors = positional_lump(archive, name, start, SECTORS_OFFSET)?
            .decode_vec(SECTOR_SIZE)?;

        info!("    {:4} things", things.len());
        info!("    {:4} linedefs", linedefs.len());
        info!("    {:4} sidedefs", sidedefs.len());
        info!("    {:4} vertices", vertices.len());
        info!("    {:4} sectors", sectors.len());

        Ok(Level {
            name,
            things,
            linedefs,
            sidedefs,
            vertices,
            sectors,
        })
    }

    pub fn vertex(&self, id: VertexId) -> Option<Pnt2f> {
        self.vertices
            .get(id as usize)
            .map(|vertex| Pnt2f::new(f32::from(vertex.x), f32::from(vertex.y)))
    }

    pub fn front_sidedef(&self, linedef: &WadLinedef) -> Option<&WadSidedef> {
        if linedef.front_side < 0 {
            None
        } else {
            self.sidedefs.get(linedef.front_side as usize)
        }
    }

    pub fn back_sidedef(&self, linedef: &WadLinedef) -> Option<&WadSidedef> {
        if linedef.back_side < 0 {
            None
        } else {
            self.sidedefs.get(linedef.back_side as usize)
        }
    }

    pub fn sector(&self, id: SectorId) -> Option<&WadSector> {
        self.sectors.get(id as usize)
    }

    /// The axis-aligned bounds of the map's own vertices.
    pub fn bounds(&self) -> Option<(Pnt2f, Pnt2f)> {
        point_bounds(
            self.vertices
                .iter()
                .map(|vertex| Pnt2f::new(f32::from(vertex.x), f32::from(vertex.y))),
        )
    }

    /// The first player one start thing, if the map has one.
    pub fn player_start(&self) -> Option<PlayerStart> {
        self.things
            .iter()
            .find(|thing| thing.thing_type == PLAYER1_START)
            .map(|thing| PlayerStart {
                position: Pnt2f::new(f32::from(thing.x), f32::from(thing.y)),
                angle_degrees: f32::from(thing.angle),
                eye_height: PLAYER_EYE_HEIGHT,
            })
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlayerStart {
    pub position: Pnt2f,
    pub angle_degrees: f32,
    pub eye_height: f32,
}

fn positional_lump<'a>(
    archive: &'a Archive,
    map: LumpName,
    start: usize,
    offset: usize,
) -> Result<Lump<'a>> {
    archive
        .lump_by_index(start + offset)
        .ok_or_else(|| ErrorKind::missing_positional_lump(map, start + offset).into())
}
