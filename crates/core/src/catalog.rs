//! Block classification table.
//!
//! Every "is this block a door / sign / torch" decision is a set-membership
//! lookup in a [`BlockCatalog`]. New content versions add rows to the table
//! (or to a JSON catalog file); the capture/restore logic never matches on
//! individual block names.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::material::{Material, MaterialError};

bitflags::bitflags! {
    /// Categories a block type belongs to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct BlockTraits: u16 {
        /// Two-tall door that can front a secret passage.
        const DOOR = 1 << 0;
        /// Trapdoor that can cover a secret passage.
        const TRAPDOOR = 1 << 1;
        /// Placed fixture mounted on a support block, exposing a `facing`.
        const WALL_FIXTURE = 1 << 2;
        /// Held item that becomes a fixture once placed.
        const PLACEABLE_ITEM = 1 << 3;
        /// Torch standing on top of its support.
        const FLOOR_TORCH = 1 << 4;
        /// Sign standing on top of its support.
        const STANDING_SIGN = 1 << 5;
        /// Sign mounted on the side of its support.
        const WALL_SIGN = 1 << 6;
        /// Sign hanging from a ceiling or bracket.
        const HANGING_SIGN = 1 << 7;
        /// Ordinary terrain that may hide a passage.
        const CONCEALING = 1 << 8;
        /// Openable only by redstone power, never by hand.
        const POWER_ONLY = 1 << 9;
        /// Any sign variant.
        const SIGN = Self::STANDING_SIGN.bits() | Self::WALL_SIGN.bits() | Self::HANGING_SIGN.bits();
    }
}

/// Errors raised while loading catalog additions.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read block catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse block catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid block name in catalog: {0}")]
    Name(#[from] MaterialError),
    #[error("unknown block trait `{trait_name}` on {block}")]
    UnknownTrait { block: String, trait_name: String },
}

/// One row of a JSON catalog file.
#[derive(Debug, Deserialize)]
pub struct CatalogEntry {
    /// Block type name (e.g., "minecraft:pale_oak_door").
    pub name: String,
    /// Trait names, case-insensitive (e.g., ["door"]).
    pub traits: Vec<String>,
}

const WOODS: [&str; 11] = [
    "oak", "spruce", "birch", "jungle", "acacia", "dark_oak", "mangrove", "cherry", "bamboo",
    "crimson", "warped",
];

const COPPER_STAGES: [&str; 8] = [
    "copper",
    "exposed_copper",
    "weathered_copper",
    "oxidized_copper",
    "waxed_copper",
    "waxed_exposed_copper",
    "waxed_weathered_copper",
    "waxed_oxidized_copper",
];

const COLORS: [&str; 16] = [
    "white",
    "orange",
    "magenta",
    "light_blue",
    "yellow",
    "lime",
    "pink",
    "gray",
    "light_gray",
    "cyan",
    "purple",
    "blue",
    "brown",
    "green",
    "red",
    "black",
];

const HEADS: [&str; 7] = [
    "skeleton_skull",
    "wither_skeleton_skull",
    "zombie_head",
    "player_head",
    "creeper_head",
    "dragon_head",
    "piglin_head",
];

const CONCEALING: [&str; 24] = [
    "stone",
    "cobblestone",
    "mossy_cobblestone",
    "dirt",
    "grass_block",
    "sand",
    "sandstone",
    "gravel",
    "stone_bricks",
    "mossy_stone_bricks",
    "cracked_stone_bricks",
    "bricks",
    "deepslate",
    "cobbled_deepslate",
    "deepslate_bricks",
    "andesite",
    "diorite",
    "granite",
    "netherrack",
    "nether_bricks",
    "end_stone",
    "bookshelf",
    "obsidian",
    "clay",
];

/// Classification table mapping block types to [`BlockTraits`].
#[derive(Debug, Clone, Default)]
pub struct BlockCatalog {
    traits: HashMap<Material, BlockTraits>,
}

impl BlockCatalog {
    /// A catalog with no rows; every lookup yields no traits.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table: every door, trapdoor, sign, torch and fixture
    /// variant plus a default set of concealing terrain blocks.
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        let mut add = |name: String, traits: BlockTraits| {
            // Built-in names are lowercase literals and always parse.
            if let Ok(material) = Material::parse(&name) {
                catalog.insert(material, traits);
            }
        };

        for wood in WOODS {
            add(format!("{wood}_door"), BlockTraits::DOOR);
            add(format!("{wood}_trapdoor"), BlockTraits::TRAPDOOR);
            add(format!("{wood}_planks"), BlockTraits::CONCEALING);
            add(
                format!("{wood}_sign"),
                BlockTraits::STANDING_SIGN | BlockTraits::WALL_FIXTURE | BlockTraits::PLACEABLE_ITEM,
            );
            add(
                format!("{wood}_wall_sign"),
                BlockTraits::WALL_SIGN | BlockTraits::WALL_FIXTURE,
            );
            add(
                format!("{wood}_hanging_sign"),
                BlockTraits::HANGING_SIGN | BlockTraits::WALL_FIXTURE | BlockTraits::PLACEABLE_ITEM,
            );
            add(
                format!("{wood}_wall_hanging_sign"),
                BlockTraits::HANGING_SIGN | BlockTraits::WALL_FIXTURE,
            );
            add(
                format!("{wood}_button"),
                BlockTraits::WALL_FIXTURE | BlockTraits::PLACEABLE_ITEM,
            );
        }
        for stage in COPPER_STAGES {
            add(format!("{stage}_door"), BlockTraits::DOOR);
            add(format!("{stage}_trapdoor"), BlockTraits::TRAPDOOR);
        }
        add("iron_trapdoor".into(), BlockTraits::TRAPDOOR | BlockTraits::POWER_ONLY);
        add("iron_door".into(), BlockTraits::POWER_ONLY);

        for torch in ["torch", "soul_torch", "redstone_torch"] {
            add(
                torch.into(),
                BlockTraits::FLOOR_TORCH | BlockTraits::PLACEABLE_ITEM,
            );
        }
        for torch in ["wall_torch", "soul_wall_torch", "redstone_wall_torch"] {
            add(torch.into(), BlockTraits::WALL_FIXTURE);
        }
        for fixture in [
            "lever",
            "stone_button",
            "polished_blackstone_button",
            "ladder",
            "tripwire_hook",
        ] {
            add(
                fixture.into(),
                BlockTraits::WALL_FIXTURE | BlockTraits::PLACEABLE_ITEM,
            );
        }
        for color in COLORS {
            add(format!("{color}_banner"), BlockTraits::PLACEABLE_ITEM);
            add(format!("{color}_wall_banner"), BlockTraits::WALL_FIXTURE);
        }
        for head in HEADS {
            add(head.into(), BlockTraits::PLACEABLE_ITEM);
            let wall = head
                .replacen("_skull", "_wall_skull", 1)
                .replacen("_head", "_wall_head", 1);
            add(wall, BlockTraits::WALL_FIXTURE);
        }
        for name in CONCEALING {
            add(name.into(), BlockTraits::CONCEALING);
        }
        catalog
    }

    /// Built-in table extended with the rows of a JSON catalog file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;
        let mut catalog = Self::builtin();
        catalog.extend_from_json_str(&contents)?;
        Ok(catalog)
    }

    /// Merge rows from a JSON array of [`CatalogEntry`].
    pub fn extend_from_json_str(&mut self, input: &str) -> Result<(), CatalogError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(input)?;
        for entry in entries {
            let material = Material::parse(&entry.name)?;
            let mut traits = BlockTraits::empty();
            for name in &entry.traits {
                let flag = BlockTraits::from_name(&name.to_ascii_uppercase()).ok_or_else(|| {
                    CatalogError::UnknownTrait {
                        block: entry.name.clone(),
                        trait_name: name.clone(),
                    }
                })?;
                traits |= flag;
            }
            self.insert(material, traits);
        }
        Ok(())
    }

    /// Add traits to a block type (union with any existing row).
    pub fn insert(&mut self, material: Material, traits: BlockTraits) {
        *self.traits.entry(material).or_default() |= traits;
    }

    pub fn traits(&self, material: &Material) -> BlockTraits {
        self.traits.get(material).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.traits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traits.is_empty()
    }

    fn has(&self, material: &Material, traits: BlockTraits) -> bool {
        self.traits(material).intersects(traits)
    }

    pub fn is_valid_door(&self, material: &Material) -> bool {
        self.has(material, BlockTraits::DOOR)
    }

    pub fn is_valid_trapdoor(&self, material: &Material) -> bool {
        self.has(material, BlockTraits::TRAPDOOR)
    }

    pub fn is_placeable_attachable(&self, item: &Material) -> bool {
        self.has(item, BlockTraits::PLACEABLE_ITEM)
    }

    pub fn is_attachable_item(&self, material: &Material) -> bool {
        self.has(material, BlockTraits::WALL_FIXTURE)
    }

    pub fn is_floor_torch(&self, material: &Material) -> bool {
        self.has(material, BlockTraits::FLOOR_TORCH)
    }

    pub fn is_standing_sign(&self, material: &Material) -> bool {
        self.has(material, BlockTraits::STANDING_SIGN)
    }

    pub fn is_wall_sign(&self, material: &Material) -> bool {
        self.has(material, BlockTraits::WALL_SIGN)
    }

    pub fn is_any_sign(&self, material: &Material) -> bool {
        self.has(material, BlockTraits::SIGN)
    }

    pub fn is_concealing(&self, material: &Material) -> bool {
        self.has(material, BlockTraits::CONCEALING)
    }

    /// True for doors and trapdoors the host lets a player open by hand.
    pub fn is_hand_operable(&self, material: &Material) -> bool {
        let traits = self.traits(material);
        traits.intersects(BlockTraits::DOOR | BlockTraits::TRAPDOOR)
            && !traits.contains(BlockTraits::POWER_ONLY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(name: &str) -> Material {
        Material::parse(name).unwrap()
    }

    #[test]
    fn builtin_classifies_doors_and_trapdoors() {
        let catalog = BlockCatalog::builtin();
        for name in ["oak_door", "bamboo_door", "waxed_oxidized_copper_door"] {
            assert!(catalog.is_valid_door(&m(name)), "{name}");
            assert!(!catalog.is_valid_trapdoor(&m(name)), "{name}");
        }
        for name in ["oak_trapdoor", "iron_trapdoor", "weathered_copper_trapdoor"] {
            assert!(catalog.is_valid_trapdoor(&m(name)), "{name}");
        }
        assert!(!catalog.is_valid_door(&m("iron_door")));
        assert!(!catalog.is_valid_door(&m("stone")));
    }

    #[test]
    fn sign_variants_are_distinguished() {
        let catalog = BlockCatalog::builtin();
        assert!(catalog.is_standing_sign(&m("oak_sign")));
        assert!(!catalog.is_wall_sign(&m("oak_sign")));
        assert!(catalog.is_wall_sign(&m("cherry_wall_sign")));
        assert!(catalog.is_any_sign(&m("warped_wall_hanging_sign")));
        assert!(!catalog.is_any_sign(&m("wall_torch")));
    }

    #[test]
    fn torches_split_floor_and_wall() {
        let catalog = BlockCatalog::builtin();
        assert!(catalog.is_floor_torch(&m("soul_torch")));
        assert!(!catalog.is_attachable_item(&m("torch")));
        assert!(catalog.is_attachable_item(&m("redstone_wall_torch")));
        assert!(!catalog.is_floor_torch(&m("wall_torch")));
    }

    #[test]
    fn placeable_items_cover_decor() {
        let catalog = BlockCatalog::builtin();
        for name in [
            "torch",
            "oak_sign",
            "birch_hanging_sign",
            "lever",
            "stone_button",
            "ladder",
            "red_banner",
            "creeper_head",
            "wither_skeleton_skull",
            "tripwire_hook",
        ] {
            assert!(catalog.is_placeable_attachable(&m(name)), "{name}");
        }
        assert!(!catalog.is_placeable_attachable(&m("wall_torch")));
        assert!(!catalog.is_placeable_attachable(&m("stone")));
        assert!(catalog.is_attachable_item(&m("creeper_wall_head")));
        assert!(catalog.is_attachable_item(&m("skeleton_wall_skull")));
    }

    #[test]
    fn unknown_blocks_have_no_traits() {
        let catalog = BlockCatalog::builtin();
        assert_eq!(catalog.traits(&m("mod:mystery")), BlockTraits::empty());
        assert!(BlockCatalog::empty().is_empty());
    }

    #[test]
    fn hand_operable_excludes_iron() {
        let catalog = BlockCatalog::builtin();
        assert!(catalog.is_hand_operable(&m("oak_door")));
        assert!(catalog.is_hand_operable(&m("oak_trapdoor")));
        assert!(!catalog.is_hand_operable(&m("iron_trapdoor")));
        assert!(!catalog.is_hand_operable(&m("iron_door")));
    }

    #[test]
    fn json_rows_extend_builtin() {
        let mut catalog = BlockCatalog::builtin();
        catalog
            .extend_from_json_str(
                r#"[
                    {"name": "pale_oak_door", "traits": ["door"]},
                    {"name": "stone", "traits": ["POWER_ONLY"]}
                ]"#,
            )
            .unwrap();
        assert!(catalog.is_valid_door(&m("pale_oak_door")));
        assert!(catalog.is_concealing(&m("stone")));
        assert!(catalog.traits(&m("stone")).contains(BlockTraits::POWER_ONLY));
    }

    #[test]
    fn json_rejects_unknown_trait() {
        let err = BlockCatalog::empty()
            .extend_from_json_str(r#"[{"name": "stone", "traits": ["sparkly"]}]"#)
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownTrait { .. }));
    }

    #[test]
    fn classification_is_stable() {
        let catalog = BlockCatalog::builtin();
        let door = m("oak_door");
        assert_eq!(catalog.is_valid_door(&door), catalog.is_valid_door(&door));
        assert_eq!(catalog.traits(&door), BlockCatalog::builtin().traits(&door));
    }
}
