//! Property-based tests for layout invariants using the `proptest` crate.

use proptest::prelude::*;

use enclosure_types::Aabb;
use footprint_registry::{ComponentKind, ConfigError, DimensionSet, FootprintRegistry};
use layout_engine::{resolve_layout, Layout};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Shell and placement constants around the reference enclosure, kept
/// inside the region where every layout resolves: the right column clears
/// the MCU antenna, the display sits high enough for its lower standoffs to
/// clear the driver fence, and padding plus wall keeps the posts off the
/// right-column fences.
fn arb_dims() -> impl Strategy<Value = DimensionSet> {
    (
        (1.5f64..2.8, 1.5f64..4.0, 40.0f64..70.0, 5.5f64..9.0),
        (9.0f64..15.0, -45.0f64..-30.0, 45.0f64..55.0, 0usize..6),
    )
        .prop_map(
            |((wall, floor, internal, padding), (offset_y, mcu_y, right_col_x, omit))| {
                let mut dims = DimensionSet::default();
                dims.shell.wall_th = wall;
                dims.shell.floor_th = floor;
                dims.shell.internal_height = internal;
                dims.shell.padding = padding;
                dims.layout.right_col_x = right_col_x;
                if let Some(d) = dims.display.as_mut() {
                    d.offset_y = offset_y;
                }
                if let Some(m) = dims.mcu.as_mut() {
                    m.anchor_y = mcu_y;
                }
                match omit {
                    0 => dims.display = None,
                    1 => dims.buttons = None,
                    2 => dims.mcu = None,
                    3 => dims.connector = None,
                    4 => dims.driver = None,
                    _ => {}
                }
                dims
            },
        )
}

fn resolve(dims: DimensionSet) -> Result<Layout, ConfigError> {
    resolve_layout(&FootprintRegistry::new(dims)?)
}

const TOL: f64 = 1e-9;

proptest! {
    #[test]
    fn generated_dimensions_resolve(dims in arb_dims()) {
        let result = resolve(dims);
        prop_assert!(result.is_ok(), "{:?}", result.err());
    }
}

// ---------------------------------------------------------------------------
// 1. Shell covers the ghosts plus padding and walls, and the right column
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn envelope_covers_padded_ghosts(dims in arb_dims()) {
        let margin = 2.0 * dims.shell.padding + 2.0 * dims.shell.wall_th;
        let depth = dims.shell.internal_height + dims.shell.floor_th;
        let layout = resolve(dims).unwrap();
        let env = &layout.envelope;
        let free = Aabb::union_all(
            layout
                .ghosts
                .iter()
                .filter(|g| g.component != ComponentKind::Connector)
                .filter_map(|g| g.bounds()),
        )
        .unwrap();
        prop_assert!(env.width + TOL >= free.size()[0] + margin);
        prop_assert!(env.length + TOL >= env.ghost_bounds.size()[1] + margin);
        prop_assert!(env.width + TOL >= env.provisional_width);
        prop_assert_eq!(env.depth, depth);
    }
}

proptest! {
    #[test]
    fn connector_sits_its_recess_inside_the_right_wall(dims in arb_dims()) {
        let layout = resolve(dims).unwrap();
        if let (Some(c), Some(ghost)) = (&layout.dims.connector, layout.ghost("connector")) {
            let outer_end = ghost.bounds().unwrap().max[0];
            prop_assert!((layout.envelope.width / 2.0 - c.recess - outer_end).abs() < TOL);
        }
    }
}

// ---------------------------------------------------------------------------
// 2. Every ghost lies inside the cavity
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn ghosts_inside_cavity(dims in arb_dims()) {
        let layout = resolve(dims).unwrap();
        let cavity = layout.envelope.cavity(&layout.dims);
        for ghost in &layout.ghosts {
            let b = ghost.bounds().unwrap();
            prop_assert!(cavity.contains_xy(&b), "{} escapes the cavity", ghost.name);
        }
    }
}

// ---------------------------------------------------------------------------
// 3. Flush fit: shoulder + PCB + recess == internal height
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn display_stack_is_flush(dims in arb_dims()) {
        let internal = dims.shell.internal_height;
        let layout = resolve(dims).unwrap();
        if let (Some(stack), Some(d)) = (&layout.display, &layout.dims.display) {
            let total = stack.shoulder_height + d.pcb_th + stack.recess;
            prop_assert!((total - internal).abs() < TOL);
        }
    }
}

// ---------------------------------------------------------------------------
// 4. Posts are mirror images and sit inside the outer shell
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn posts_are_symmetric(dims in arb_dims()) {
        let layout = resolve(dims).unwrap();
        let outer = layout.envelope.outer();
        let sw = layout.posts[0].position;
        let ne = layout.posts[3].position;
        prop_assert!((sw[0] + ne[0]).abs() < TOL);
        prop_assert!((sw[1] + ne[1]).abs() < TOL);
        for post in &layout.posts {
            prop_assert!(post.position[0].abs() < outer.max[0]);
            prop_assert!(post.position[1].abs() < outer.max[1]);
        }
    }
}

// ---------------------------------------------------------------------------
// 5. Resolution is deterministic
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn resolution_is_deterministic(dims in arb_dims()) {
        let a = resolve(dims.clone()).unwrap();
        let b = resolve(dims).unwrap();
        prop_assert_eq!(a.envelope, b.envelope);
        prop_assert_eq!(a.posts, b.posts);
        prop_assert_eq!(a.connector, b.connector);
    }
}
