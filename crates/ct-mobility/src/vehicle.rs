//! A single vehicle and its per-tick integration.

use std::collections::VecDeque;

use ct_core::{CellCoord, Point};

/// Result of one [`Vehicle::step`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MoveOutcome {
    EnRoute,
    /// The waypoint queue is empty.
    Arrived,
}

/// The physical mover of a Driving agent.
///
/// Owned by its agent; created when a path is delivered and dropped on
/// arrival.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    /// Continuous position in fine-grid units.
    pub position:     Point,
    /// Remaining waypoints, next one first.
    pub path:         VecDeque<CellCoord>,
    /// Cruising speed in fine cells per second, fixed for the vehicle's life.
    pub speed:        f32,
    /// Heading in radians (`atan2` convention, y grows southwards).
    pub heading:      f32,
    pub touch_radius: f32,
    /// Distance of the front/back probes from `position` along the heading.
    pub probe_offset: f32,
}

impl Vehicle {
    /// Place a vehicle on the first waypoint of `path`, facing the second.
    ///
    /// The first waypoint is the departure cell and is consumed immediately.
    pub fn new(path: Vec<CellCoord>, speed: f32, probe_offset: f32, touch_radius: f32) -> Self {
        let mut path: VecDeque<CellCoord> = path.into();
        let position = path.pop_front().map(CellCoord::to_point).unwrap_or_default();
        let heading = path
            .front()
            .map(|next| position.angle_to(next.to_point()))
            .unwrap_or(0.0);
        Self { position, path, speed, heading, touch_radius, probe_offset }
    }

    #[inline]
    pub fn front_probe(&self) -> Point {
        self.position.offset(Point::from_angle(self.heading), self.probe_offset)
    }

    #[inline]
    pub fn back_probe(&self) -> Point {
        self.position.offset(Point::from_angle(self.heading), -self.probe_offset)
    }

    #[inline]
    pub fn next_waypoint(&self) -> Option<CellCoord> {
        self.path.front().copied()
    }

    #[inline]
    pub fn is_arrived(&self) -> bool {
        self.path.is_empty()
    }

    /// Displacement this tick, in fine cells.
    #[inline]
    pub fn step_length(&self, dt_ms: f32, throttled: bool, throttle_factor: f32) -> f32 {
        let cruise = self.speed * dt_ms / 1000.0;
        if throttled { cruise * throttle_factor } else { cruise }
    }

    /// Move towards the next waypoint for `dt_ms` milliseconds.
    pub fn step(&mut self, dt_ms: f32, throttled: bool, throttle_factor: f32) -> MoveOutcome {
        let Some(next) = self.path.front().copied() else {
            return MoveOutcome::Arrived;
        };
        let target = next.to_point();
        let step = self.step_length(dt_ms, throttled, throttle_factor);
        let distance = self.position.distance(target);

        if distance > 0.0 {
            self.heading = self.position.angle_to(target);
            // Never overshoot the waypoint.
            self.position = self.position.offset(Point::from_angle(self.heading), step.min(distance));
        }
        if distance < step * 2.0 {
            self.path.pop_front();
        }

        if self.path.is_empty() { MoveOutcome::Arrived } else { MoveOutcome::EnRoute }
    }
}
