//! Agent storage with stable handles.
//!
//! Agents live in a dense `Vec` for cache-friendly sweeps; an `FxHashMap`
//! maps each [`AgentId`] to its current slot.  Ids are allocated
//! monotonically and never reused, so a solver resolution that arrives after
//! its agent was removed simply finds nothing.

use ct_core::{AgentId, TileCoord};
use rustc_hash::FxHashMap;

use crate::Agent;

#[derive(Debug)]
pub struct AgentStore {
    agents:  Vec<Agent>,
    index:   FxHashMap<AgentId, usize>,
    next_id: AgentId,
}

impl AgentStore {
    pub fn new() -> Self {
        Self {
            agents:  Vec::new(),
            index:   FxHashMap::default(),
            next_id: AgentId(0),
        }
    }

    /// Spawn a resident of `home` and return its handle.
    pub fn spawn(&mut self, home: TileCoord, fatigue: f32, seed: u64) -> AgentId {
        let id = self.next_id;
        self.next_id = id.next();
        self.index.insert(id, self.agents.len());
        self.agents.push(Agent::new(id, home, fatigue, seed));
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.index.get(&id).map(|&i| &self.agents[i])
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.index.get(&id).map(|&i| &mut self.agents[i])
    }

    /// Agents in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        self.agents.iter_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agents.iter().map(|a| a.id)
    }

    /// Residents whose home is `tile`.
    pub fn residents_of(&self, tile: TileCoord) -> impl Iterator<Item = &Agent> {
        self.agents.iter().filter(move |a| a.home == tile)
    }

    /// Remove every agent flagged `marked_for_removal`, preserving the order
    /// of the rest, and return the removed agents.
    pub fn remove_marked(&mut self) -> Vec<Agent> {
        if !self.agents.iter().any(|a| a.marked_for_removal) {
            return Vec::new();
        }
        let (removed, kept): (Vec<Agent>, Vec<Agent>) =
            std::mem::take(&mut self.agents).into_iter().partition(|a| a.marked_for_removal);
        self.agents = kept;
        self.index = self.agents.iter().enumerate().map(|(i, a)| (a.id, i)).collect();
        removed
    }
}

impl Default for AgentStore {
    fn default() -> Self {
        Self::new()
    }
}
