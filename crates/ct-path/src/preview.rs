//! Interactive road preview.
//!
//! While the user drags a road tool, a new coarse path is requested every
//! time the cursor moves.  The solver does not deduplicate, so the preview
//! cancels its previous request before submitting the next one and only
//! accepts the resolution of the latest request.

use ct_core::{RequestId, TileCoord};

use crate::solver::{PathOutcome, PathSolver, Resolution};

#[derive(Debug, Clone, Default)]
pub struct RoadPreview {
    pending: Option<RequestId>,
    path:    Vec<TileCoord>,
}

impl RoadPreview {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any outstanding request with one for `from → to`.
    pub fn request<T>(
        &mut self,
        solver: &mut PathSolver<TileCoord, T>,
        from: TileCoord,
        to: TileCoord,
        token: T,
    ) -> RequestId {
        if let Some(stale) = self.pending.take() {
            solver.cancel(stale);
        }
        let id = solver.submit(from, to, token);
        self.pending = Some(id);
        id
    }

    /// Apply a planning resolution.  Returns `true` if it belonged to the
    /// current request; resolutions of older requests are ignored.
    pub fn accept<T>(&mut self, res: &Resolution<TileCoord, T>) -> bool {
        if self.pending != Some(res.id) {
            return false;
        }
        self.pending = None;
        self.path = match &res.outcome {
            PathOutcome::Found(p) => p.clone(),
            PathOutcome::NoPath => Vec::new(),
        };
        true
    }

    /// Cancel any outstanding request and forget the last path.
    pub fn clear<T>(&mut self, solver: &mut PathSolver<TileCoord, T>) {
        if let Some(stale) = self.pending.take() {
            solver.cancel(stale);
        }
        self.path.clear();
    }

    /// The most recently delivered preview path (empty if none).
    pub fn path(&self) -> &[TileCoord] {
        &self.path
    }

    pub fn pending(&self) -> Option<RequestId> {
        self.pending
    }
}
