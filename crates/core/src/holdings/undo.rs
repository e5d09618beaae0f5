//! Single-slot undo for destructive holding mutations.
//!
//! After a delete, edit, or merge succeeds, the service records a
//! [`PendingAction`] capturing the inverse of what just happened. The slot
//! holds at most one action: any further mutation overwrites it, and one
//! undo consumes it. Undoing a merge restores only the surviving lot's
//! pre-merge field values; the duplicate lots deleted by the merge are not
//! resurrected.

use serde::{Deserialize, Serialize};

use super::holdings_model::{Holding, HoldingUpdate};

/// Inverse-operation record for the most recent destructive mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum PendingAction {
    /// A lot was deleted; the full record, re-insertable under its
    /// original identifier (which the delete freed). The re-insert gets a
    /// fresh creation stamp, so when further lots of the same ticker exist
    /// the restored lot ranks as the newest, not at its original position.
    Deleted(Holding),
    /// A lot was overwritten by an edit or a merge; its pre-mutation
    /// snapshot, re-appliable as an update.
    Replaced(Holding),
}

/// The collaborator call that reverses a recorded action.
#[derive(Debug, Clone, PartialEq)]
pub enum UndoOp {
    /// Re-insert a deleted lot, original identifier included.
    Reinsert(Holding),
    /// Restore a lot's prior field values.
    Restore {
        holding_id: String,
        owner_id: String,
        update: HoldingUpdate,
    },
}

/// Maps a recorded action to the repository call that reverses it.
pub fn undo_plan(action: PendingAction) -> UndoOp {
    match action {
        PendingAction::Deleted(holding) => UndoOp::Reinsert(holding),
        PendingAction::Replaced(snapshot) => UndoOp::Restore {
            holding_id: snapshot.id.clone(),
            owner_id: snapshot.owner_id.clone(),
            update: HoldingUpdate::from(&snapshot),
        },
    }
}
