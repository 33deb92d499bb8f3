//! Builders for small door and trapdoor scenes.

use anyhow::{Context, Result};
use secretdoors_core::{BlockCatalog, BlockData, BlockPos, Face, SignText};
use secretdoors_world::MemoryWorld;

/// Incrementally places blocks into a fresh [`MemoryWorld`].
pub struct SceneBuilder {
    world: MemoryWorld,
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneBuilder {
    /// Empty scene classified by the built-in catalog.
    pub fn new() -> Self {
        Self::with_catalog(BlockCatalog::builtin())
    }

    /// Empty scene classified by `catalog`.
    pub fn with_catalog(catalog: BlockCatalog) -> Self {
        Self {
            world: MemoryWorld::new(catalog),
        }
    }

    /// Place a block from its descriptor string.
    pub fn block(&mut self, pos: BlockPos, descriptor: &str) -> Result<&mut Self> {
        let data = parse(descriptor)?;
        self.world.place(pos, data);
        Ok(self)
    }

    /// Place a sign and give it up to four lines of text.
    pub fn sign(&mut self, pos: BlockPos, descriptor: &str, lines: &[&str]) -> Result<&mut Self> {
        let data = parse(descriptor)?;
        anyhow::ensure!(
            self.world.catalog().is_any_sign(data.material()),
            "{descriptor} is not a sign"
        );
        self.world
            .place_sign(pos, data, SignText::from_lines(lines.iter().copied()));
        Ok(self)
    }

    /// Place a closed two-tall door with its lower half at `key`.
    pub fn door(&mut self, key: BlockPos, material: &str, facing: Face) -> Result<&mut Self> {
        for (pos, half) in [(key, "lower"), (key.up(), "upper")] {
            let descriptor = format!("{material}[facing={facing},half={half},hinge=left,open=false]");
            self.block(pos, &descriptor)?;
        }
        Ok(self)
    }

    /// Place a closed trapdoor hinged on the top half of its cell.
    pub fn trapdoor(&mut self, pos: BlockPos, material: &str, facing: Face) -> Result<&mut Self> {
        let descriptor = format!("{material}[facing={facing},half=top,open=false]");
        self.block(pos, &descriptor)
    }

    /// Mutable access to the world under construction.
    pub fn world_mut(&mut self) -> &mut MemoryWorld {
        &mut self.world
    }

    /// Finish the scene.
    pub fn build(self) -> MemoryWorld {
        self.world
    }
}

fn parse(descriptor: &str) -> Result<BlockData> {
    descriptor
        .parse()
        .with_context(|| format!("invalid block descriptor `{descriptor}`"))
}

/// Cell positions of a door structure with its key at `key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorLayout {
    /// Lower door half.
    pub key: BlockPos,
    /// Stored facing of the door.
    pub facing: Face,
    /// Lower concealing block, directly in front of the closed door.
    pub lower: BlockPos,
    /// Upper concealing block.
    pub upper: BlockPos,
}

impl DoorLayout {
    /// Layout for a door at `key` whose stored facing is `facing`.
    pub fn new(key: BlockPos, facing: Face) -> Self {
        let lower = key.relative(facing.opposite());
        Self {
            key,
            facing,
            lower,
            upper: lower.up(),
        }
    }

    /// Direction a closed door faces.
    pub fn door_face(&self) -> Face {
        self.facing.opposite()
    }

    /// Place the door plus two concealing blocks.
    pub fn place(
        &self,
        scene: &mut SceneBuilder,
        door: &str,
        upper: &str,
        lower: &str,
    ) -> Result<()> {
        scene
            .door(self.key, door, self.facing)?
            .block(self.upper, upper)?
            .block(self.lower, lower)?;
        Ok(())
    }
}

/// A ready-made oak door hidden behind stone bricks, facing `facing`.
pub fn door_scene(key: BlockPos, facing: Face) -> Result<(SceneBuilder, DoorLayout)> {
    let layout = DoorLayout::new(key, facing);
    let mut scene = SceneBuilder::new();
    layout.place(&mut scene, "oak_door", "stone_bricks", "stone_bricks")?;
    Ok((scene, layout))
}

/// A ready-made oak trapdoor under a dirt block. Returns the scene and the
/// concealing position.
pub fn trapdoor_scene(trapdoor: BlockPos) -> Result<(SceneBuilder, BlockPos)> {
    let mut scene = SceneBuilder::new();
    scene
        .trapdoor(trapdoor, "oak_trapdoor", Face::North)?
        .block(trapdoor.up(), "dirt")?;
    Ok((scene, trapdoor.up()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secretdoors_world::BlockStore;

    #[test]
    fn door_scene_places_both_halves_and_concealing_column() {
        let (scene, layout) = door_scene(BlockPos::new(0, 64, 0), Face::East).unwrap();
        let world = scene.build();
        assert_eq!(layout.lower, BlockPos::new(-1, 64, 0));
        assert_eq!(layout.door_face(), Face::West);
        assert_eq!(
            world.block_data(layout.key.up()).to_string(),
            "minecraft:oak_door[facing=east,half=upper,hinge=left,open=false]"
        );
        assert_eq!(world.block_type(layout.upper).to_string(), "minecraft:stone_bricks");
    }

    #[test]
    fn sign_rejects_non_sign_blocks() {
        let mut scene = SceneBuilder::new();
        assert!(scene.sign(BlockPos::new(0, 0, 0), "stone", &["x"]).is_err());
        assert!(scene.block(BlockPos::new(0, 0, 0), "oak_door[facing").is_err());
    }
}
