use super::{ConnectionPolicy, PolicyConfig};
use crate::error::ConnectionRejected;
use crate::graph::{BlockId, GraphStore, Position, Wire};
use tracing::debug;

/// What happened when a repositioned block was checked against its neighbors.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapOutcome {
    /// No block had an output anchor within reach; the dragged position stands.
    NoCandidate,
    /// The block was moved onto `anchor` and wired after `source_id`.
    Connected { source_id: BlockId, anchor: Position },
    /// The block was moved onto `anchor`, but the wire from `source_id` was refused.
    Rejected {
        source_id: BlockId,
        anchor: Position,
        reason: ConnectionRejected,
    },
}

/// Finds the first block (in store order) whose output anchor lies within
/// snapping reach of `moved`'s current position.
///
/// The first qualifying block wins, even when a later one is closer.
pub fn find_snap_anchor(
    store: &GraphStore,
    moved: &str,
    config: &PolicyConfig,
) -> Option<(BlockId, Position)> {
    let dragged = store.block(moved)?.position;

    store
        .list_blocks()
        .iter()
        .filter(|other| other.id != *moved)
        .find(|other| {
            let dx = dragged.x - (other.position.x + config.block_width);
            let dy = dragged.y - other.position.y;
            dx.abs() < config.snap_distance && dy.abs() < config.snap_distance
        })
        .map(|other| {
            let anchor = Position::new(other.position.x + config.block_width, other.position.y);
            (other.id.clone(), anchor)
        })
}

impl ConnectionPolicy<'_> {
    /// Snaps a just-moved block to the first neighbor whose output anchor is in
    /// reach and proposes a wire from that neighbor into it.
    ///
    /// The snapped position is kept even if the wire is rejected.
    pub fn snap_and_connect(&self, store: &mut GraphStore, moved: &str) -> SnapOutcome {
        let Some((source_id, anchor)) = find_snap_anchor(store, moved, self.config()) else {
            debug!(block = %moved, "no snap candidate");
            return SnapOutcome::NoCandidate;
        };

        debug!(block = %moved, source = %source_id, %anchor, "snapping to anchor");
        store.move_block(moved, anchor);

        match self.propose_connection(store, Wire::new(source_id.clone(), moved)) {
            Ok(()) => SnapOutcome::Connected { source_id, anchor },
            Err(reason) => SnapOutcome::Rejected {
                source_id,
                anchor,
                reason,
            },
        }
    }
}
