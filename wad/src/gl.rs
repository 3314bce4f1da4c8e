use crate::archive::Archive;
use crate::errors::{Error, ErrorKind, Result};
use crate::level::Level;
use crate::name::LumpName;
use crate::types::{
    GlNode, GlSeg, GlSubsector, GlVertex, VertexId, GL_NODE_SIZE, GL_SEG_SIZE, GL_SUBSECTOR_SIZE,
    GL_VERTEX_SIZE,
};
use crate::util::point_bounds;
use failchain::ensure;
use log::info;
use math::Pnt2f;

// Positional offsets of the GL sub-lumps relative to the GL marker.
pub const GL_VERT_OFFSET: usize = 1;
pub const GL_SEGS_OFFSET: usize = 2;
pub const GL_SSECT_OFFSET: usize = 3;
pub const GL_NODES_OFFSET: usize = 4;

const GL_VERT_MAGIC: &[u8; 4] = b"gNd2";

/// Vertex ids in GL segs index the GL vertex pool when this bit is set.
pub const GL_VERTEX_BIT: u16 = 0x8000;

/// Node child ids refer to a subsector leaf when this bit is set.
pub const LEAF_BIT: u16 = 0x8000;

/// Segs produced by BSP splits have no matching linedef.
pub const NO_LINEDEF: u16 = 0xffff;

/// Splits a node child id into an index and whether it names a leaf.
pub fn parse_child_id(id: u16) -> (usize, bool) {
    ((id & !LEAF_BIT) as usize, id & LEAF_BIT != 0)
}

pub fn from_fixed(value: i32) -> f32 {
    value as f32 / 65536.0
}

/// The glBSP extension lumps of one map: the spatial index over its sectors.
#[derive(Debug)]
pub struct GlLevel {
    pub name: LumpName,
    pub vertices: Vec<Pnt2f>,
    pub segs: Vec<GlSeg>,
    pub subsectors: Vec<GlSubsector>,
    pub nodes: Vec<GlNode>,
}

impl GlLevel {
    pub fn decode(archive: &Archive, map_name: LumpName) -> Result<GlLevel> {
        let name = map_name.prefixed(b"GL_")?;
        let marker = archive
            .named_lump(name)
            .ok_or_else(|| Error::from(ErrorKind::map_not_found(name)))?;
        let start = marker.index();
        info!("Reading GL nodes {}...", name);

        let vertex_lump = archive
            .lump_by_index(start + GL_VERT_OFFSET)
            .ok_or_else(|| Error::from(ErrorKind::missing_positional_lump(name, start + GL_VERT_OFFSET)))?;
        let vertex_bytes = vertex_lump.bytes();
        ensure!(
            vertex_bytes.len() >= GL_VERT_MAGIC.len()
                && &vertex_bytes[..GL_VERT_MAGIC.len()] == GL_VERT_MAGIC,
            ErrorKind::unsupported_gl_magic(
                &vertex_bytes[..vertex_bytes.len().min(GL_VERT_MAGIC.len())]
            )
        );
        let vertices = vertex_lump
            .decode_vec_after_magic::<GlVertex>(GL_VERT_MAGIC.len(), GL_VERTEX_SIZE)?
            .into_iter()
            .map(|vertex| Pnt2f::new(from_fixed(vertex.x), from_fixed(vertex.y)))
            .collect::<Vec<_>>();

        let segs = positional_lump(archive, name, start, GL_SEGS_OFFSET)?
            .decode_vec::<GlSeg>(GL_SEG_SIZE)?;
        let subsectors = positional_lump(archive, name, start, GL_SSECT_OFFSET)?
            .decode_vec::<GlSubsector>(GL_SUBSECTOR_SIZE)?;
        let nodes = positional_lump(archive, name, start, GL_NODES_OFFSET)?
            .decode_vec::<GlNode>(GL_NODE_SIZE)?;

        info!("    {:4} GL vertices", vertices.len());
        info!("    {:4} GL segs", segs.len());
        info!("    {:4} subsectors", subsectors.len());
        info!("    {:4} nodes", nodes.len());

        Ok(GlLevel {
            name,
            vertices,
            segs,
            subsectors,
            nodes,
        })
    }

    /// Resolves a tagged seg vertex id against the GL pool or the map's own
    /// vertices.
    pub fn seg_vertex(&self, level: &Level, id: VertexId) -> Option<Pnt2f> {
        if id & GL_VERTEX_BIT != 0 {
            self.vertices.get((id & !GL_VERTEX_BIT) as usize).cloned()
        } else {
            level.vertex(id)
        }
    }

    /// The contiguous seg range of a subsector, if it is in bounds.
    pub fn subsector_segs(&self, subsector: &GlSubsector) -> Option<&[GlSeg]> {
        let first = subsector.first_seg as usize;
        let end = first + subsector.num_segs as usize;
        self.segs.get(first..end)
    }

    /// The axis-aligned bounds of the GL vertex pool.
    pub fn bounds(&self) -> Option<(Pnt2f, Pnt2f)> {
        point_bounds(self.vertices.iter().cloned())
    }
}

fn positional_lump<'a>(
    archive: &'a Archive,
    name: LumpName,
    start: usize,
    offset: usize,
) -> Result<crate::archive::Lump<'a>> {
    archive
        .lump_by_index(start + offset)
        .ok_or_else(|| ErrorKind::missing_positional_lump(name, start + offset).into())
}
