//! Hand-built WADs and levels shared by the tests.

use crate::bank::{TextureBank, WallTexture};
use crate::gl::GlLevel;
use crate::level::Level;
use crate::name::LumpName;
use crate::types::{GlNode, GlSeg, GlSubsector, WadLinedef, WadSector, WadSidedef, WadVertex};
use byteorder::{LittleEndian, WriteBytesExt};
use math::vec2;
use std::str::FromStr;

pub fn name(value: &str) -> LumpName {
    LumpName::from_str(value).unwrap()
}

fn name_bytes(value: &str) -> [u8; 8] {
    *name(value).as_bytes()
}

/// Assembles a syntactically valid WAD from named lumps: header first, then
/// the lump payloads, then the directory.
pub struct WadBuilder {
    lumps: Vec<(LumpName, Vec<u8>)>,
}

impl WadBuilder {
    pub fn new() -> WadBuilder {
        WadBuilder { lumps: Vec::new() }
    }

    pub fn lump(&mut self, lump_name: &str, data: Vec<u8>) -> &mut WadBuilder {
        self.lumps.push((name(lump_name), data));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"IWAD");
        bytes
            .write_u32::<LittleEndian>(self.lumps.len() as u32)
            .unwrap();
        let payload_size: usize = self.lumps.iter().map(|(_, data)| data.len()).sum();
        let directory_offset = 12 + payload_size;
        bytes
            .write_u32::<LittleEndian>(directory_offset as u32)
            .unwrap();

        let mut offsets = Vec::with_capacity(self.lumps.len());
        for (_, data) in &self.lumps {
            offsets.push(bytes.len() as u32);
            bytes.extend_from_slice(data);
        }
        for ((lump_name, data), offset) in self.lumps.iter().zip(offsets) {
            bytes.write_u32::<LittleEndian>(offset).unwrap();
            bytes.write_u32::<LittleEndian>(data.len() as u32).unwrap();
            bytes.extend_from_slice(lump_name.as_bytes());
        }
        bytes
    }
}

fn thing_bytes(x: i16, y: i16, angle: i16, thing_type: u16, flags: u16) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.write_i16::<LittleEndian>(x).unwrap();
    bytes.write_i16::<LittleEndian>(y).unwrap();
    bytes.write_i16::<LittleEndian>(angle).unwrap();
    bytes.write_u16::<LittleEndian>(thing_type).unwrap();
    bytes.write_u16::<LittleEndian>(flags).unwrap();
    bytes
}

fn linedef_bytes(start: u16, end: u16, flags: u16, front: i16, back: i16) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.write_u16::<LittleEndian>(start).unwrap();
    bytes.write_u16::<LittleEndian>(end).unwrap();
    bytes.write_u16::<LittleEndian>(flags).unwrap();
    bytes.write_u16::<LittleEndian>(0).unwrap();
    bytes.write_u16::<LittleEndian>(0).unwrap();
    bytes.write_i16::<LittleEndian>(front).unwrap();
    bytes.write_i16::<LittleEndian>(back).unwrap();
    bytes
}

fn sidedef_bytes(middle: &str, sector: u16) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.write_i16::<LittleEndian>(0).unwrap();
    bytes.write_i16::<LittleEndian>(0).unwrap();
    bytes.extend_from_slice(&name_bytes("-"));
    bytes.extend_from_slice(&name_bytes("-"));
    bytes.extend_from_slice(&name_bytes(middle));
    bytes.write_u16::<LittleEndian>(sector).unwrap();
    bytes
}

fn vertex_bytes(x: i16, y: i16) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.write_i16::<LittleEndian>(x).unwrap();
    bytes.write_i16::<LittleEndian>(y).unwrap();
    bytes
}

fn sector_bytes(
    floor: i16,
    ceiling: i16,
    floor_texture: &str,
    ceiling_texture: &str,
    light: i16,
) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.write_i16::<LittleEndian>(floor).unwrap();
    bytes.write_i16::<LittleEndian>(ceiling).unwrap();
    bytes.extend_from_slice(&name_bytes(floor_texture));
    bytes.extend_from_slice(&name_bytes(ceiling_texture));
    bytes.write_i16::<LittleEndian>(light).unwrap();
    bytes.write_u16::<LittleEndian>(0).unwrap();
    bytes.write_u16::<LittleEndian>(0).unwrap();
    bytes
}

fn gl_seg_bytes(start: u16, end: u16, linedef: u16, side: u16) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.write_u16::<LittleEndian>(start).unwrap();
    bytes.write_u16::<LittleEndian>(end).unwrap();
    bytes.write_u16::<LittleEndian>(linedef).unwrap();
    bytes.write_u16::<LittleEndian>(side).unwrap();
    // No partner seg.
    bytes.write_u16::<LittleEndian>(0xffff).unwrap();
    bytes
}

/// A single square sector, 64 units on a side, with a complete set of GL
/// lumps. The lone BSP node partitions along the square's left edge: its
/// front child is the square's subsector, its back child a degenerate
/// subsector whose only seg follows the split and so has no linedef.
pub fn square_map_wad() -> Vec<u8> {
    square_map_wad_with_gl_magic(b"gNd2")
}

pub fn square_map_wad_with_gl_magic(magic: &[u8; 4]) -> Vec<u8> {
    let mut things = Vec::new();
    things.extend(thing_bytes(32, 32, 90, 1, 7));

    let mut linedefs = Vec::new();
    for side in 0..4u16 {
        linedefs.extend(linedef_bytes(side, (side + 1) % 4, 0x0001, side as i16, -1));
    }

    let mut sidedefs = Vec::new();
    for _ in 0..4 {
        sidedefs.extend(sidedef_bytes("STARTAN3", 0));
    }

    let mut vertices = Vec::new();
    for &(x, y) in &[(0, 0), (64, 0), (64, 64), (0, 64)] {
        vertices.extend(vertex_bytes(x, y));
    }

    let sectors = sector_bytes(0, 128, "FLAT5", "CEIL3_5", 160);

    let mut gl_vertices = Vec::new();
    gl_vertices.extend_from_slice(magic);
    gl_vertices.write_i32::<LittleEndian>(32 * 65536 + 65536 / 2).unwrap();
    gl_vertices.write_i32::<LittleEndian>(16 * 65536 + 65536 / 4).unwrap();

    let mut gl_segs = Vec::new();
    for side in 0..4u16 {
        gl_segs.extend(gl_seg_bytes(side, (side + 1) % 4, side, 0));
    }
    // The seg along the partition, with no linedef behind it.
    gl_segs.extend(gl_seg_bytes(0, 3, 0xffff, 0));

    let mut gl_subsectors = Vec::new();
    for &(num_segs, first_seg) in &[(4u16, 0u16), (1, 4)] {
        gl_subsectors.write_u16::<LittleEndian>(num_segs).unwrap();
        gl_subsectors.write_u16::<LittleEndian>(first_seg).unwrap();
    }

    let mut gl_nodes = Vec::new();
    for &value in &[0i16, 0, 0, 64] {
        gl_nodes.write_i16::<LittleEndian>(value).unwrap();
    }
    gl_nodes.write_u16::<LittleEndian>(0x8000).unwrap();
    gl_nodes.write_u16::<LittleEndian>(0x8001).unwrap();

    let mut builder = WadBuilder::new();
    builder
        .lump("MAP01", Vec::new())
        .lump("THINGS", things)
        .lump("LINEDEFS", linedefs)
        .lump("SIDEDEFS", sidedefs)
        .lump("VERTEXES", vertices)
        .lump("SEGS", Vec::new())
        .lump("SSECTORS", Vec::new())
        .lump("NODES", Vec::new())
        .lump("SECTORS", sectors)
        .lump("GL_MAP01", Vec::new())
        .lump("GL_VERT", gl_vertices)
        .lump("GL_SEGS", gl_segs)
        .lump("GL_SSECT", gl_subsectors)
        .lump("GL_NODES", gl_nodes);
    builder.build()
}

fn plain_sidedef(y_offset: i16, upper: &str, lower: &str, middle: &str, sector: u16) -> WadSidedef {
    WadSidedef {
        x_offset: 0,
        y_offset,
        upper_texture: name(upper),
        lower_texture: name(lower),
        middle_texture: name(middle),
        sector,
    }
}

fn plain_sector(floor: i16, ceiling: i16, light: i16) -> WadSector {
    WadSector {
        floor_height: floor,
        ceiling_height: ceiling,
        floor_texture: name("FLAT5"),
        ceiling_texture: name("FLAT5"),
        light,
        sector_type: 0,
        tag: 0,
    }
}

/// Two sectors joined by a single two-sided linedef: the back sector's
/// floor steps up to 24 and its ceiling drops to 96. `extra_flags` are
/// OR'd onto the linedef, `y_offset` lands on the front sidedef.
pub fn two_sector_level(y_offset: i16, extra_flags: &[u16]) -> Level {
    let flags = extra_flags.iter().fold(0x0004, |flags, &flag| flags | flag);
    Level {
        name: name("MAP01"),
        things: Vec::new(),
        linedefs: vec![WadLinedef {
            start_vertex: 0,
            end_vertex: 1,
            flags,
            special_type: 0,
            sector_tag: 0,
            front_side: 0,
            back_side: 1,
        }],
        sidedefs: vec![
            plain_sidedef(y_offset, "STARTAN3", "STEP6", "-", 0),
            plain_sidedef(0, "-", "-", "-", 1),
        ],
        vertices: vec![WadVertex { x: 0, y: 0 }, WadVertex { x: 64, y: 0 }],
        sectors: vec![plain_sector(0, 128, 160), plain_sector(24, 96, 160)],
    }
}

/// A single convex five-sided sector with its GL lumps built in memory,
/// plus a bank holding its textures.
pub fn pentagon_geometry() -> (Level, GlLevel, TextureBank) {
    let points = [(0, 0), (64, 0), (96, 48), (32, 96), (-32, 48)];
    let num_points = points.len() as u16;

    let level = Level {
        name: name("MAP01"),
        things: Vec::new(),
        linedefs: (0..num_points)
            .map(|side| WadLinedef {
                start_vertex: side,
                end_vertex: (side + 1) % num_points,
                flags: 0x0001,
                special_type: 0,
                sector_tag: 0,
                front_side: side as i16,
                back_side: -1,
            })
            .collect(),
        sidedefs: (0..num_points)
            .map(|_| plain_sidedef(0, "-", "-", "STARTAN3", 0))
            .collect(),
        vertices: points
            .iter()
            .map(|&(x, y)| WadVertex { x, y })
            .collect(),
        sectors: vec![plain_sector(0, 128, 160)],
    };

    let gl = GlLevel {
        name: name("GL_MAP01"),
        vertices: Vec::new(),
        segs: (0..num_points)
            .map(|side| GlSeg {
                start_vertex: side,
                end_vertex: (side + 1) % num_points,
                linedef: side,
                side: 0,
                partner: 0xffff,
            })
            .collect(),
        subsectors: vec![
            GlSubsector {
                num_segs: num_points,
                first_seg: 0,
            },
            GlSubsector {
                num_segs: 0,
                first_seg: 0,
            },
        ],
        nodes: vec![GlNode {
            x: 0,
            y: 0,
            dx: 64,
            dy: 0,
            front: 0x8001,
            back: 0x8000,
        }],
    };

    let mut bank = TextureBank::new();
    bank.insert_flat(name("FLAT5"));
    bank.insert_wall(
        name("STARTAN3"),
        WallTexture {
            width: 128.0,
            height: 128.0,
            max_uv: vec2(1.0, 1.0),
        },
    );
    (level, gl, bank)
}
