use crate::error::ConnectionRejected;
use crate::graph::{GraphStore, INPUT_HANDLE, OUTPUT_HANDLE, Wire};
use crate::registry::BlockRegistry;
use ahash::AHashSet;
use tracing::{info, warn};

mod proximity;

pub use proximity::*;

/// Horizontal footprint of a block on the canvas; the snap anchor sits this far
/// to the right of a block's origin.
pub const BLOCK_WIDTH: f64 = 160.0;

/// Maximum distance on each axis between a dragged block and an anchor for the
/// block to snap.
pub const SNAP_DISTANCE: f64 = 40.0;

/// Tunables for the connection policy.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyConfig {
    pub block_width: f64,
    pub snap_distance: f64,
    /// When set, a wire whose target is already upstream of its source is refused.
    pub cycle_guard: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            block_width: BLOCK_WIDTH,
            snap_distance: SNAP_DISTANCE,
            cycle_guard: true,
        }
    }
}

/// Validates proposed wires against the single-input/single-output rule and
/// commits the ones that pass.
pub struct ConnectionPolicy<'a> {
    registry: &'a BlockRegistry,
    config: &'a PolicyConfig,
}

impl<'a> ConnectionPolicy<'a> {
    pub fn new(registry: &'a BlockRegistry, config: &'a PolicyConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &PolicyConfig {
        self.config
    }

    /// Inserts `wire` into the store if both of its ports are free.
    ///
    /// Occupancy is checked first, so an occupied port is always reported as
    /// such even when other checks would also fail. A handle other than
    /// `out` on the source or `in` on the target names a port the block does
    /// not have. Nothing is committed on rejection.
    pub fn propose_connection(
        &self,
        store: &mut GraphStore,
        wire: Wire,
    ) -> Result<(), ConnectionRejected> {
        match self.check(store, &wire) {
            Ok(()) => {
                info!(%wire, "connection accepted");
                store.insert_wire(wire);
                Ok(())
            }
            Err(reason) => {
                warn!(%wire, %reason, "connection rejected");
                Err(reason)
            }
        }
    }

    fn check(&self, store: &GraphStore, wire: &Wire) -> Result<(), ConnectionRejected> {
        let source = store
            .block(&wire.source_id)
            .ok_or_else(|| ConnectionRejected::UnknownBlock(wire.source_id.clone()))?;
        let target = store
            .block(&wire.target_id)
            .ok_or_else(|| ConnectionRejected::UnknownBlock(wire.target_id.clone()))?;

        if store
            .wire_at_target(&wire.target_id, &wire.target_handle)
            .is_some()
        {
            return Err(ConnectionRejected::TargetOccupied {
                block_id: wire.target_id.clone(),
                handle: wire.target_handle.clone(),
            });
        }
        if store
            .wire_at_source(&wire.source_id, &wire.source_handle)
            .is_some()
        {
            return Err(ConnectionRejected::SourceOccupied {
                block_id: wire.source_id.clone(),
                handle: wire.source_handle.clone(),
            });
        }

        if wire.source_id == wire.target_id {
            return Err(ConnectionRejected::SelfLoop(wire.source_id.clone()));
        }
        // A block exposes exactly one `out` and at most one `in` port.
        if wire.source_handle != OUTPUT_HANDLE || !self.registry.has_output_port(&source.kind) {
            return Err(ConnectionRejected::NoOutputPort(source.id.clone()));
        }
        if wire.target_handle != INPUT_HANDLE || !self.registry.has_input_port(&target.kind) {
            return Err(ConnectionRejected::NoInputPort(target.id.clone()));
        }

        if self.config.cycle_guard && is_upstream(store, &wire.target_id, &wire.source_id) {
            return Err(ConnectionRejected::WouldCreateCycle {
                source_id: wire.source_id.clone(),
                target_id: wire.target_id.clone(),
            });
        }

        Ok(())
    }
}

/// Returns true if `ancestor` is reached by walking incoming wires back from `start`.
fn is_upstream(store: &GraphStore, ancestor: &str, start: &str) -> bool {
    let mut visited = AHashSet::new();
    let mut current = start;
    while let Some(wire) = store.wire_into(current) {
        if wire.source_id == *ancestor {
            return true;
        }
        if !visited.insert(wire.source_id.as_str()) {
            // Already a cycle upstream; nothing new to find.
            return false;
        }
        current = wire.source_id.as_str();
    }
    false
}
