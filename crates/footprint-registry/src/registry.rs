use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dimensions::DimensionSet;
use crate::errors::ConfigError;
use crate::validate::validate;

/// Every component the enclosure knows how to house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Display,
    Button,
    Microcontroller,
    Connector,
    MotorDriver,
}

impl ComponentKind {
    pub fn name(self) -> &'static str {
        match self {
            ComponentKind::Display => "display",
            ComponentKind::Button => "button",
            ComponentKind::Microcontroller => "mcu",
            ComponentKind::Connector => "connector",
            ComponentKind::MotorDriver => "driver",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Nominal size, clearance and declared anchor of one component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub kind: ComponentKind,
    /// W × H × T of the nominal part.
    pub size: [f64; 3],
    /// Added to the footprint before any void is carved for it.
    pub clearance: f64,
    /// Fixed XY anchor, or `None` when layout derives it.
    pub anchor: Option<[f64; 2]>,
}

/// Validated dimension set plus a lookup of configured component footprints.
#[derive(Debug, Clone)]
pub struct FootprintRegistry {
    dims: DimensionSet,
    footprints: BTreeMap<ComponentKind, Footprint>,
}

impl FootprintRegistry {
    /// Validate `dims` and index its components.
    pub fn new(dims: DimensionSet) -> Result<Self, ConfigError> {
        validate(&dims)?;

        let mut footprints = BTreeMap::new();
        let tol = dims.fit.fit_tolerance;
        if let Some(d) = &dims.display {
            footprints.insert(
                ComponentKind::Display,
                Footprint {
                    kind: ComponentKind::Display,
                    size: [d.pcb_w, d.pcb_h, d.pcb_th + d.screen_th],
                    clearance: d.window_clearance,
                    anchor: Some([0.0, d.offset_y]),
                },
            );
        }
        if let Some(b) = dims.buttons.as_ref().filter(|b| b.count > 0) {
            footprints.insert(
                ComponentKind::Button,
                Footprint {
                    kind: ComponentKind::Button,
                    size: [b.body_dia, b.body_dia, b.body_depth + b.cap_height],
                    clearance: b.hole_clearance,
                    anchor: None,
                },
            );
        }
        if let Some(m) = &dims.mcu {
            footprints.insert(
                ComponentKind::Microcontroller,
                Footprint {
                    kind: ComponentKind::Microcontroller,
                    size: [m.width, m.length, m.height],
                    clearance: tol,
                    anchor: Some([0.0, m.anchor_y]),
                },
            );
        }
        if let Some(c) = &dims.connector {
            footprints.insert(
                ComponentKind::Connector,
                Footprint {
                    kind: ComponentKind::Connector,
                    size: [c.length, c.width, c.height],
                    clearance: tol,
                    anchor: None,
                },
            );
        }
        if let Some(d) = &dims.driver {
            footprints.insert(
                ComponentKind::MotorDriver,
                Footprint {
                    kind: ComponentKind::MotorDriver,
                    size: [d.width, d.length, d.height],
                    clearance: tol,
                    anchor: Some([dims.layout.right_col_x, d.anchor_y]),
                },
            );
        }

        debug!(components = footprints.len(), "footprint registry built");
        Ok(Self { dims, footprints })
    }

    pub fn dimensions(&self) -> &DimensionSet {
        &self.dims
    }

    pub fn get(&self, kind: ComponentKind) -> Option<&Footprint> {
        self.footprints.get(&kind)
    }

    pub fn contains(&self, kind: ComponentKind) -> bool {
        self.footprints.contains_key(&kind)
    }

    /// Configured footprints in a stable order.
    pub fn footprints(&self) -> impl Iterator<Item = &Footprint> {
        self.footprints.values()
    }

    pub fn is_empty(&self) -> bool {
        self.footprints.is_empty()
    }
}
