use enclosure_types::Aabb;
use footprint_registry::{ComponentKind, ConfigError, DimensionSet, FootprintRegistry};
use tracing::{debug, info};

use crate::collision::{
    check_containment, check_floor_clearance, check_ghost_clearance, FloorFootprint,
};
use crate::envelope::{derive_envelope, ShellEnvelope};
use crate::ghosts::GhostVolume;
use crate::placement::{
    anchor_connector, fence_sites, place_components, post_sites, standoff_sites, DisplayStack,
    FenceSite, Site,
};

/// Every anchor and derived extent the synthesizer needs.
#[derive(Debug, Clone)]
pub struct Layout {
    pub dims: DimensionSet,
    pub envelope: ShellEnvelope,
    pub ghosts: Vec<GhostVolume>,
    pub display: Option<DisplayStack>,
    pub buttons: Vec<Site>,
    pub mcu: Option<Site>,
    pub connector: Option<Site>,
    pub driver: Option<Site>,
    pub posts: Vec<Site>,
    pub standoffs: Vec<Site>,
    pub fences: Vec<FenceSite>,
}

impl Layout {
    pub fn ghost(&self, name: &str) -> Option<&GhostVolume> {
        self.ghosts.iter().find(|g| g.name == name)
    }

    pub fn fence(&self, component: ComponentKind) -> Option<&FenceSite> {
        self.fences.iter().find(|f| f.component == component)
    }
}

/// Resolve anchors, the shell envelope and clearance checks. Pure: no kernel calls.
pub fn resolve_layout(registry: &FootprintRegistry) -> Result<Layout, ConfigError> {
    let dims = registry.dimensions().clone();
    let provisional_width = dims.provisional_width();
    debug!(provisional_width, "provisional shell width");

    let mut placed = place_components(&dims);
    anchor_connector(&dims, &mut placed, provisional_width);
    let mut envelope = derive_envelope(&dims, &placed.ghosts, provisional_width)?;
    if envelope.width > provisional_width {
        anchor_connector(&dims, &mut placed, envelope.width);
        envelope.ghost_bounds =
            Aabb::union_all(placed.ghosts.iter().filter_map(GhostVolume::bounds))
                .ok_or(ConfigError::EmptyGhostUnion)?;
    }
    info!(
        width = envelope.width,
        length = envelope.length,
        depth = envelope.depth,
        driver = ?envelope.driver,
        "shell envelope"
    );

    check_containment(&placed.ghosts, &envelope, &dims)?;
    let clearance = dims.fit.min_feature_clearance;
    check_ghost_clearance(&placed.ghosts, clearance)?;

    let posts = post_sites(&dims, envelope.width, envelope.length);
    let standoffs = standoff_sites(&dims);
    let fences = fence_sites(&dims, &placed);

    let mut floor = Vec::new();
    for post in &posts {
        floor.push(FloorFootprint::round(
            post.name.clone(),
            post.xy(),
            dims.posts.radius,
        ));
    }
    for standoff in &standoffs {
        floor.push(FloorFootprint::round(
            standoff.name.clone(),
            standoff.xy(),
            dims.standoffs.shoulder.base_radius(),
        ));
    }
    for fence in &fences {
        floor.push(FloorFootprint {
            name: fence.name.clone(),
            bounds: fence.outer_bounds(0.0, 0.0),
        });
    }
    check_floor_clearance(&floor, clearance)?;

    Ok(Layout {
        dims,
        envelope,
        ghosts: placed.ghosts,
        display: placed.display,
        buttons: placed.buttons,
        mcu: placed.mcu,
        connector: placed.connector,
        driver: placed.driver,
        posts,
        standoffs,
        fences,
    })
}
