use crate::name::LumpName;
use math::Vec2f;

use indexmap::IndexMap;

/// Nominal texel size assumed for quads whose texture is missing, so their
/// UVs stay finite.
pub const UNTEXTURED_SIZE: f32 = 64.0;

/// Metadata for one wall texture: its texel size and the fraction of its
/// atlas tile that holds real texels. UVs are scaled by `max_uv` so that
/// tile-space `1.0` lands on the last usable texel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WallTexture {
    pub width: f32,
    pub height: f32,
    pub max_uv: Vec2f,
}

/// The catalogue of textures a level's geometry may reference.
///
/// The renderer owns the pixels; the bank only maps names to the array
/// slots and sizes the mesh generator needs. Insertion order fixes the
/// slot indices.
#[derive(Default)]
pub struct TextureBank {
    flats: IndexMap<LumpName, ()>,
    walls: IndexMap<LumpName, WallTexture>,
}

impl TextureBank {
    pub fn new() -> TextureBank {
        TextureBank::default()
    }

    pub fn insert_flat(&mut self, name: LumpName) -> usize {
        let entry = self.flats.entry(name);
        let index = entry.index();
        entry.or_insert(());
        index
    }

    pub fn insert_wall(&mut self, name: LumpName, texture: WallTexture) -> usize {
        let entry = self.walls.entry(name);
        let index = entry.index();
        entry.or_insert(texture);
        index
    }

    pub fn flat_index(&self, name: LumpName) -> Option<usize> {
        self.flats.get_full(&name).map(|(index, _, _)| index)
    }

    pub fn wall(&self, name: LumpName) -> Option<(usize, &WallTexture)> {
        self.walls
            .get_full(&name)
            .map(|(index, _, texture)| (index, texture))
    }

    pub fn num_flats(&self) -> usize {
        self.flats.len()
    }

    pub fn num_walls(&self) -> usize {
        self.walls.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{TextureBank, WallTexture};
    use crate::fixtures::name;
    use math::vec2;

    #[test]
    fn slots_follow_insertion_order() {
        let mut bank = TextureBank::new();
        assert_eq!(bank.insert_flat(name("FLAT5")), 0);
        assert_eq!(bank.insert_flat(name("NUKAGE1")), 1);
        assert_eq!(bank.insert_flat(name("FLAT5")), 0);
        assert_eq!(bank.flat_index(name("NUKAGE1")), Some(1));
        assert_eq!(bank.flat_index(name("CEIL3_5")), None);
        assert_eq!(bank.num_flats(), 2);
    }

    #[test]
    fn walls_carry_their_sizes() {
        let mut bank = TextureBank::new();
        let texture = WallTexture {
            width: 128.0,
            height: 72.0,
            max_uv: vec2(0.5, 0.28125),
        };
        bank.insert_wall(name("STARTAN3"), texture);
        let (slot, stored) = bank.wall(name("STARTAN3")).unwrap();
        assert_eq!(slot, 0);
        assert_eq!(*stored, texture);
    }
}
