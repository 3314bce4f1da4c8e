use crate::bank::{TextureBank, UNTEXTURED_SIZE};
use crate::bsp::sector_of_seg;
use crate::errors::{Error, ErrorKind, Result};
use crate::gl::{parse_child_id, GlLevel, LEAF_BIT};
use crate::level::Level;
use crate::name::LumpName;
use crate::types::GlSubsector;
use crate::util::{is_sky_flat, is_untextured};
use failchain::{bail, ensure};
use log::warn;
use math::prelude::*;
use math::{vec2, Pnt2f, Vec2f};

/// Flats tile the map plane in steps of 64 units.
pub const FLAT_TILE_SIZE: f32 = 64.0;

/// Texture slot for quads and flats whose texture could not be resolved.
/// The renderer discards or flat-shades these, it never samples with them.
pub const NO_TEXTURE: i32 = -1;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TextureKind {
    Flat = 1,
    Wall = 2,
}

/// One vertex of generated level geometry, laid out for upload as-is.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MeshVertex {
    /// World position; the map plane maps to x and z, heights to y.
    pub position: [f32; 3],
    /// Tile-space UV, already rescaled into the texture's atlas cell.
    pub uv: [f32; 2],
    pub texture: i32,
    pub kind: i32,
    /// Sector brightness in `[0, 1)`.
    pub light: f32,
    /// The usable extent of the atlas cell, for wrapped sampling.
    pub uv_clamp: [f32; 2],
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }
}

/// The BSP tree re-expressed over meshes: internal nodes keep the child
/// order of the node lump, leaves carry the subsector's flat geometry.
/// Children are arena indices into `DrawTree::nodes`.
#[derive(Debug)]
pub enum DrawNode {
    Branch { front: usize, back: usize },
    Leaf { subsector: usize, mesh: Mesh },
}

#[derive(Debug)]
pub struct DrawTree {
    nodes: Vec<DrawNode>,
    root: usize,
}

impl DrawTree {
    pub fn root(&self) -> usize {
        self.root
    }

    pub fn node(&self, id: usize) -> &DrawNode {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Visits every leaf mesh, front child before back child.
    pub fn walk_leaves(&self, visit: &mut impl FnMut(usize, &Mesh)) {
        self.walk_from(self.root, visit);
    }

    fn walk_from(&self, id: usize, visit: &mut impl FnMut(usize, &Mesh)) {
        match &self.nodes[id] {
            DrawNode::Branch { front, back } => {
                self.walk_from(*front, visit);
                self.walk_from(*back, visit);
            }
            DrawNode::Leaf { subsector, mesh } => visit(*subsector, mesh),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WallKind {
    Lower,
    Middle,
    Upper,
}

/// One textured wall quad, kept per-linedef so flat animation and pruning
/// can address walls individually.
#[derive(Debug)]
pub struct WallEntry {
    pub linedef: usize,
    pub kind: WallKind,
    pub texture: i32,
    pub mesh: Mesh,
}

#[derive(Debug)]
pub struct LevelGeometry {
    pub tree: DrawTree,
    pub walls: Vec<WallEntry>,
}

/// Generates all static geometry for a level: one flats mesh per visible
/// subsector, hung off a draw tree mirroring the BSP, plus a wall quad
/// list built per linedef.
pub fn generate(level: &Level, gl: &GlLevel, bank: &TextureBank) -> Result<LevelGeometry> {
    let tree = build_tree(level, gl, bank)?;
    let walls = generate_walls(level, bank);
    Ok(LevelGeometry { tree, walls })
}

fn build_tree(level: &Level, gl: &GlLevel, bank: &TextureBank) -> Result<DrawTree> {
    if gl.nodes.is_empty() {
        bail!(ErrorKind::corrupt_bsp("the node lump is empty"));
    }
    // Child ids hold 15 bits; a larger lump would alias the leaf bit.
    ensure!(
        gl.nodes.len() <= LEAF_BIT as usize,
        ErrorKind::corrupt_bsp(format!("{} nodes overflow the child id space", gl.nodes.len()))
    );
    let mut builder = TreeBuilder {
        level,
        gl,
        bank,
        nodes: Vec::with_capacity(gl.nodes.len() + gl.subsectors.len()),
        num_branches: 0,
    };
    let root = builder.build((gl.nodes.len() - 1) as u16)?;
    Ok(DrawTree {
        nodes: builder.nodes,
        root,
    })
}

struct TreeBuilder<'a> {
    level: &'a Level,
    gl: &'a GlLevel,
    bank: &'a TextureBank,
    nodes: Vec<DrawNode>,
    num_branches: usize,
}

impl<'a> TreeBuilder<'a> {
    fn build(&mut self, child: u16) -> Result<usize> {
        let (index, is_leaf) = parse_child_id(child);
        if is_leaf {
            let subsector = self.gl.subsectors.get(index).ok_or_else(|| {
                Error::from(ErrorKind::corrupt_bsp(format!(
                    "subsector id {} out of range",
                    index
                )))
            })?;
            let mesh = flats_mesh(self.level, self.gl, self.bank, index, subsector)?;
            self.nodes.push(DrawNode::Leaf {
                subsector: index,
                mesh,
            });
        } else {
            self.num_branches += 1;
            ensure!(
                self.num_branches <= self.gl.nodes.len(),
                ErrorKind::corrupt_bsp("the node tree contains a cycle")
            );
            let node = *self.gl.nodes.get(index).ok_or_else(|| {
                Error::from(ErrorKind::corrupt_bsp(format!("node id {} out of range", index)))
            })?;
            let front = self.build(node.front)?;
            let back = self.build(node.back)?;
            self.nodes.push(DrawNode::Branch { front, back });
        }
        Ok(self.nodes.len() - 1)
    }
}

/// Triangulates a subsector's floor and ceiling by fanning out from its
/// first vertex. Degenerate subsectors and subsectors that name no sector
/// yield an empty mesh rather than an error.
fn flats_mesh(
    level: &Level,
    gl: &GlLevel,
    bank: &TextureBank,
    index: usize,
    subsector: &GlSubsector,
) -> Result<Mesh> {
    if subsector.num_segs < 3 {
        warn!(
            "Subsector {} has only {} segs, skipping it.",
            index, subsector.num_segs
        );
        return Ok(Mesh::default());
    }
    let segs = gl.subsector_segs(subsector).ok_or_else(|| {
        Error::from(ErrorKind::corrupt_bsp(format!(
            "subsector {} segs out of range",
            index
        )))
    })?;
    let sector = match segs
        .iter()
        .find_map(|seg| sector_of_seg(level, seg))
        .and_then(|id| level.sector(id))
    {
        Some(sector) => sector,
        None => {
            warn!("Subsector {} belongs to no sector, skipping it.", index);
            return Ok(Mesh::default());
        }
    };

    let mut ring = Vec::with_capacity(segs.len());
    for seg in segs {
        let vertex = gl.seg_vertex(level, seg.start_vertex).ok_or_else(|| {
            Error::from(ErrorKind::corrupt_bsp(format!(
                "seg vertex id {} out of range in subsector {}",
                seg.start_vertex, index
            )))
        })?;
        ring.push(vertex);
    }

    let light = f32::from(sector.light) / 256.0;
    let mut mesh = Mesh::default();
    push_flat_ring(
        &mut mesh,
        &ring,
        f32::from(sector.floor_height),
        flat_slot(bank, sector.floor_texture),
        light,
    );
    push_flat_ring(
        &mut mesh,
        &ring,
        f32::from(sector.ceiling_height),
        flat_slot(bank, sector.ceiling_texture),
        light,
    );
    Ok(mesh)
}

fn flat_slot(bank: &TextureBank, name: LumpName) -> i32 {
    // Sky flats are drawn by the renderer's sky pass, not sampled.
    if is_sky_flat(name) {
        return NO_TEXTURE;
    }
    match bank.flat_index(name) {
        Some(slot) => slot as i32,
        None => {
            warn!("Unknown flat {}, rendering untextured.", name);
            NO_TEXTURE
        }
    }
}

fn push_flat_ring(mesh: &mut Mesh, ring: &[Pnt2f], height: f32, texture: i32, light: f32) {
    let base = mesh.vertices.len() as u32;
    for point in ring {
        mesh.vertices.push(MeshVertex {
            position: [point.x, height, point.y],
            uv: [point.x / FLAT_TILE_SIZE, point.y / FLAT_TILE_SIZE],
            texture,
            kind: TextureKind::Flat as i32,
            light,
            uv_clamp: [1.0, 1.0],
        });
    }
    // A convex ring of n vertices fans into n - 2 triangles.
    for offset in 1..ring.len() as u32 - 1 {
        mesh.indices
            .extend_from_slice(&[base, base + offset, base + offset + 1]);
    }
}

// How the vertical texture origin is anchored on a wall quad.
enum Peg {
    // Tile from the top edge down.
    Top,
    // Tile so the bottom edge lands on the raw offset.
    Bottom,
    // Like `Top`, pushed down by a world-space distance.
    TopShifted(f32),
}

pub(crate) fn generate_walls(level: &Level, bank: &TextureBank) -> Vec<WallEntry> {
    let mut walls = Vec::new();
    for (index, linedef) in level.linedefs.iter().enumerate() {
        let (v1, v2) = match (
            level.vertex(linedef.start_vertex),
            level.vertex(linedef.end_vertex),
        ) {
            (Some(v1), Some(v2)) => (v1, v2),
            _ => {
                warn!("Linedef {} references missing vertices, skipping it.", index);
                continue;
            }
        };
        let front_sidedef = match level.front_sidedef(linedef) {
            Some(sidedef) => sidedef,
            None => {
                warn!("Linedef {} has no front sidedef, skipping it.", index);
                continue;
            }
        };
        let front_sector = match level.sector(front_sidedef.sector) {
            Some(sector) => sector,
            None => {
                warn!("Linedef {} fronts a missing sector, skipping it.", index);
                continue;
            }
        };
        let light = f32::from(front_sector.light) / 256.0;
        let offsets = vec2(
            f32::from(front_sidedef.x_offset),
            f32::from(front_sidedef.y_offset),
        );

        if !linedef.is_two_sided() {
            walls.push(wall_quad(
                bank,
                QuadSpec {
                    linedef: index,
                    kind: WallKind::Middle,
                    texture_name: front_sidedef.middle_texture,
                    v1,
                    v2,
                    low: f32::from(front_sector.floor_height),
                    high: f32::from(front_sector.ceiling_height),
                    offsets,
                    peg: if linedef.lower_unpegged() {
                        Peg::Bottom
                    } else {
                        Peg::Top
                    },
                    light,
                },
            ));
            continue;
        }

        let back_sector = match level
            .back_sidedef(linedef)
            .and_then(|sidedef| level.sector(sidedef.sector))
        {
            Some(sector) => sector,
            None => {
                warn!("Two-sided linedef {} has no back sector, skipping it.", index);
                continue;
            }
        };

        // A step up into the back sector exposes the front lower wall.
        if front_sector.floor_height < back_sector.floor_height {
            walls.push(wall_quad(
                bank,
                QuadSpec {
                    linedef: index,
                    kind: WallKind::Lower,
                    texture_name: front_sidedef.lower_texture,
                    v1,
                    v2,
                    low: f32::from(front_sector.floor_height),
                    high: f32::from(back_sector.floor_height),
                    offsets,
                    peg: if linedef.lower_unpegged() {
                        Peg::TopShifted(f32::from(
                            front_sector.ceiling_height - back_sector.floor_height,
                        ))
                    } else {
                        Peg::Top
                    },
                    light,
                },
            ));
        }

        // A drop in the ceiling exposes the front upper wall, except where
        // both sides open into the sky.
        if front_sector.ceiling_height > back_sector.ceiling_height
            && !(is_sky_flat(front_sector.ceiling_texture)
                && is_sky_flat(back_sector.ceiling_texture))
        {
            walls.push(wall_quad(
                bank,
                QuadSpec {
                    linedef: index,
                    kind: WallKind::Upper,
                    texture_name: front_sidedef.upper_texture,
                    v1,
                    v2,
                    low: f32::from(back_sector.ceiling_height),
                    high: f32::from(front_sector.ceiling_height),
                    offsets,
                    peg: if linedef.upper_unpegged() {
                        Peg::Top
                    } else {
                        Peg::Bottom
                    },
                    light,
                },
            ));
        }
    }
    walls
}

struct QuadSpec {
    linedef: usize,
    kind: WallKind,
    texture_name: LumpName,
    v1: Pnt2f,
    v2: Pnt2f,
    low: f32,
    high: f32,
    offsets: Vec2f,
    peg: Peg,
    light: f32,
}

fn wall_quad(bank: &TextureBank, spec: QuadSpec) -> WallEntry {
    let (slot, size, max_uv) = match bank.wall(spec.texture_name) {
        Some((slot, texture)) => (
            slot as i32,
            vec2(texture.width, texture.height),
            texture.max_uv,
        ),
        None => {
            if !is_untextured(spec.texture_name) {
                warn!(
                    "Unknown wall texture {} on linedef {}, rendering untextured.",
                    spec.texture_name, spec.linedef
                );
            }
            (
                NO_TEXTURE,
                vec2(UNTEXTURED_SIZE, UNTEXTURED_SIZE),
                vec2(1.0, 1.0),
            )
        }
    };

    let width = (spec.v2 - spec.v1).magnitude();
    let height = (spec.high - spec.low) / size.y;
    let base = spec.offsets.y / size.y;
    let (v_top, v_bottom) = match spec.peg {
        Peg::Top => (base, base + height),
        Peg::Bottom => (base - height, base),
        Peg::TopShifted(shift) => {
            let top = base + shift / size.y;
            (top, top + height)
        }
    };
    let u_left = spec.offsets.x / size.x;
    let u_right = u_left + width / size.x;

    let corners = [
        (spec.v1, spec.low, u_left, v_bottom),
        (spec.v2, spec.low, u_right, v_bottom),
        (spec.v2, spec.high, u_right, v_top),
        (spec.v1, spec.high, u_left, v_top),
    ];
    let mut mesh = Mesh::default();
    for &(point, elevation, u, v) in &corners {
        mesh.vertices.push(MeshVertex {
            position: [point.x, elevation, point.y],
            uv: [u * max_uv.x, v * max_uv.y],
            texture: slot,
            kind: TextureKind::Wall as i32,
            light: spec.light,
            uv_clamp: [max_uv.x, max_uv.y],
        });
    }
    mesh.indices.extend_from_slice(&[0, 1, 3, 1, 2, 3]);

    WallEntry {
        linedef: spec.linedef,
        kind: spec.kind,
        texture: slot,
        mesh,
    }
}
