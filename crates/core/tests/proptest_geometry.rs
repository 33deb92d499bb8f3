//! Property-based tests for block geometry
//!
//! Critical invariants:
//! - Stepping along a face and back along its opposite is the identity
//! - `relative_n` agrees with repeated single steps
//! - Descriptor text parses back to the same block

use proptest::prelude::*;
use secretdoors_core::{BlockData, BlockPos, Face};

fn pos_strategy() -> impl Strategy<Value = BlockPos> {
    (-30_000_000i32..30_000_000, -64i32..320, -30_000_000i32..30_000_000)
        .prop_map(|(x, y, z)| BlockPos::new(x, y, z))
}

fn face_strategy() -> impl Strategy<Value = Face> {
    prop::sample::select(Face::ALL.to_vec())
}

proptest! {
    #[test]
    fn opposite_step_returns_home(pos in pos_strategy(), face in face_strategy()) {
        prop_assert_eq!(pos.relative(face).relative(face.opposite()), pos);
        prop_assert_eq!(face.opposite().opposite(), face);
    }

    #[test]
    fn relative_n_matches_repeated_steps(
        pos in pos_strategy(),
        face in face_strategy(),
        distance in 0i32..8,
    ) {
        let mut stepped = pos;
        for _ in 0..distance {
            stepped = stepped.relative(face);
        }
        prop_assert_eq!(pos.relative_n(face, distance), stepped);
    }

    #[test]
    fn descriptor_text_parses_back(
        face in prop::sample::select(Face::HORIZONTAL.to_vec()),
        open in any::<bool>(),
        upper in any::<bool>(),
    ) {
        let half = if upper { "upper" } else { "lower" };
        let data: BlockData = format!("oak_door[facing={face},half={half},open={open}]")
            .parse()
            .unwrap();
        prop_assert_eq!(data.facing(), Some(face));
        prop_assert_eq!(data.is_open(), open);
        let reparsed: BlockData = data.to_string().parse().unwrap();
        prop_assert_eq!(reparsed, data);
    }
}
