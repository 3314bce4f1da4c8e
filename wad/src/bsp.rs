use crate::errors::{Error, ErrorKind, Result};
use crate::gl::{parse_child_id, GlLevel, LEAF_BIT, NO_LINEDEF};
use crate::level::Level;
use crate::types::{GlNode, GlSeg, SectorId};
use failchain::{bail, ensure};
use math::{Line2f, Pnt2f};

/// The partition line of a node, with its displacement kept unnormalised so
/// the point classification below stays exact for integer coordinates.
pub fn partition_line(node: &GlNode) -> Line2f {
    Line2f::from_origin_and_displace(
        Pnt2f::new(f32::from(node.x), f32::from(node.y)),
        math::vec2(f32::from(node.dx), f32::from(node.dy)),
    )
}

/// The sector a seg fronts onto.
///
/// Segs on the back side of a two-sided linedef take the back sidedef's
/// sector; every other seg takes the front sidedef's. Returns `None` for
/// segs without a linedef or with dangling indices.
pub fn sector_of_seg(level: &Level, seg: &GlSeg) -> Option<SectorId> {
    if seg.linedef == NO_LINEDEF {
        return None;
    }
    let linedef = level.linedefs.get(seg.linedef as usize)?;
    let sidedef = if linedef.is_two_sided() && seg.side == 1 {
        level.back_sidedef(linedef)?
    } else {
        level.front_sidedef(linedef)?
    };
    Some(sidedef.sector)
}

/// Walks the node tree from the root down to the subsector containing
/// `point` and resolves which sector that subsector belongs to.
///
/// Points exactly on a partition line descend into the back child. Returns
/// `Ok(None)` when the leaf's first seg has no linedef to name a sector
/// with; structural defects in the tree fail with `CorruptBsp`.
pub fn locate_sector(level: &Level, gl: &GlLevel, point: Pnt2f) -> Result<Option<SectorId>> {
    if gl.nodes.is_empty() {
        bail!(ErrorKind::corrupt_bsp("the node lump is empty"));
    }
    // Child ids hold 15 bits; a larger lump would alias the leaf bit.
    ensure!(
        gl.nodes.len() <= LEAF_BIT as usize,
        ErrorKind::corrupt_bsp(format!("{} nodes overflow the child id space", gl.nodes.len()))
    );

    let mut child = (gl.nodes.len() - 1) as u16;
    // A well-formed tree never descends more levels than it has nodes.
    for _ in 0..=gl.nodes.len() {
        let (index, is_leaf) = parse_child_id(child);
        if is_leaf {
            return leaf_sector(level, gl, index);
        }
        let node = gl
            .nodes
            .get(index)
            .ok_or_else(|| Error::from(ErrorKind::corrupt_bsp(format!("node id {} out of range", index))))?;
        child = if partition_line(node).signed_distance(point) <= 0.0 {
            node.back
        } else {
            node.front
        };
    }
    bail!(ErrorKind::corrupt_bsp("the node tree contains a cycle"))
}

fn leaf_sector(level: &Level, gl: &GlLevel, index: usize) -> Result<Option<SectorId>> {
    let subsector = gl
        .subsectors
        .get(index)
        .ok_or_else(|| Error::from(ErrorKind::corrupt_bsp(format!("subsector id {} out of range", index))))?;
    let seg = gl.segs.get(subsector.first_seg as usize).ok_or_else(|| {
        Error::from(ErrorKind::corrupt_bsp(format!(
            "seg id {} out of range",
            subsector.first_seg
        )))
    })?;
    if seg.linedef == NO_LINEDEF {
        return Ok(None);
    }
    match sector_of_seg(level, seg) {
        Some(sector) => {
            ensure!(
                (sector as usize) < level.sectors.len(),
                ErrorKind::corrupt_bsp(format!("sector id {} out of range", sector))
            );
            Ok(Some(sector))
        }
        None => bail!(ErrorKind::corrupt_bsp(format!(
            "seg {} references a dangling linedef or sidedef",
            subsector.first_seg
        ))),
    }
}
