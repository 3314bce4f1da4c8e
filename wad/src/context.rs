use crate::anim::FlatAnimations;
use crate::archive::Archive;
use crate::bank::TextureBank;
use crate::bsp::locate_sector;
use crate::errors::Result;
use crate::geom::{self, LevelGeometry};
use crate::gl::GlLevel;
use crate::level::{Level, PlayerStart};
use crate::name::LumpName;
use crate::types::WadSector;
use log::info;
use math::Pnt2f;

/// Everything decoded and generated for one map, bundled for a renderer:
/// the classic lumps, the GL spatial index, the static geometry and the
/// flat animation state.
#[derive(Debug)]
pub struct LevelContext {
    pub level: Level,
    pub gl: GlLevel,
    pub geometry: LevelGeometry,
    pub animations: FlatAnimations,
    pub player_start: Option<PlayerStart>,
}

impl LevelContext {
    pub fn load(archive: &Archive, map_name: LumpName, bank: &TextureBank) -> Result<LevelContext> {
        let level = Level::decode(archive, map_name)?;
        let gl = GlLevel::decode(archive, map_name)?;
        let geometry = geom::generate(&level, &gl, bank)?;
        let animations = FlatAnimations::from_bank(bank);
        let player_start = level.player_start();

        let mut num_flat_triangles = 0;
        geometry
            .tree
            .walk_leaves(&mut |_, mesh| num_flat_triangles += mesh.num_triangles());
        info!(
            "Level {} ready: {} flat triangles, {} wall quads.",
            map_name,
            num_flat_triangles,
            geometry.walls.len()
        );

        Ok(LevelContext {
            level,
            gl,
            geometry,
            animations,
            player_start,
        })
    }

    /// The sector under `point`, or `None` where the BSP cannot name one.
    pub fn sector_at(&self, point: Pnt2f) -> Result<Option<&WadSector>> {
        Ok(locate_sector(&self.level, &self.gl, point)?
            .and_then(|sector| self.level.sector(sector)))
    }

    /// The walking height under `point`, for placing a camera or player.
    pub fn floor_height_at(&self, point: Pnt2f) -> Result<Option<f32>> {
        Ok(self
            .sector_at(point)?
            .map(|sector| f32::from(sector.floor_height)))
    }

    pub fn update(&mut self, delta_seconds: f32) {
        self.animations.update(delta_seconds);
    }
}
