//! Represents a single burrow in the pool.
//!
//! # Actor Ownership
//! A `Burrow` is plain data. Once admitted into a pool it is owned by exactly one
//! [`BurrowActor`](crate::burrow_actor::BurrowActor) and only ever mutated inside that
//! actor's loop. Everything handed out by the pool is a snapshot (a clone).
//!
//! The JSON shape matches the bootstrap file format:
//!
//! ```json
//! { "name": "Burrow 1", "occupied": false, "depth": 2.5, "width": 1.2, "age": 10 }
//! ```
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Age (in ticks) at which a burrow collapses: 25 days of one-minute ticks.
pub const MAX_AGE: u32 = 25 * 24 * 60;

/// Depth assigned on the first tick to an occupied burrow that has no depth yet.
const SEED_DEPTH: f64 = 0.009;

/// Relative depth growth per tick while occupied.
const GROWTH_RATE: f64 = 0.009;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Burrow {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub occupied: bool,
    #[serde(default)]
    pub depth: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(rename = "age", default)]
    pub age_in_ticks: u32,
}

impl Burrow {
    /// Creates a new unoccupied Burrow.
    ///
    /// # Arguments
    /// * `name` - Identifier, unique within a pool (may be empty to let the pool assign one)
    /// * `depth` - Initial depth
    /// * `width` - Diameter of the burrow, fixed for its lifetime
    /// * `age_in_ticks` - Initial age
    pub fn new(name: impl Into<String>, depth: f64, width: f64, age_in_ticks: u32) -> Self {
        Self {
            name: name.into(),
            occupied: false,
            depth,
            width,
            age_in_ticks,
        }
    }

    /// Returns the same burrow marked as occupied.
    pub fn occupied(mut self) -> Self {
        self.occupied = true;
        self
    }

    /// `true` if nobody lives here and the burrow has not collapsed.
    pub fn is_available(&self) -> bool {
        !self.occupied && self.age_in_ticks < MAX_AGE
    }

    /// `true` once the burrow reached [`MAX_AGE`].
    pub fn is_collapsed(&self) -> bool {
        self.age_in_ticks >= MAX_AGE
    }

    /// Volume of the cylinder described by `depth` and `width` (the diameter).
    pub fn volume(&self) -> f64 {
        self.depth * PI * self.width.powi(2) / 4.0
    }

    /// Advances the burrow by one tick.
    ///
    /// No-op once the burrow has collapsed. An occupied burrow digs deeper by 0.9%
    /// of its current absolute depth, or starts at 0.009 when the depth is zero.
    pub fn advance_age(&mut self) {
        if self.age_in_ticks >= MAX_AGE {
            return;
        }

        self.age_in_ticks += 1;
        if self.occupied {
            if self.depth == 0.0 {
                self.depth = SEED_DEPTH;
            } else {
                self.depth += self.depth.abs() * GROWTH_RATE;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume() {
        let burrow = Burrow::new("b", 2.5, 1.2, 0);
        assert!((burrow.volume() - 2.83).abs() < 0.01);
    }

    #[test]
    fn test_volume_zero_dimensions() {
        assert_eq!(Burrow::new("flat", 0.0, 1.2, 0).volume(), 0.0);
        assert_eq!(Burrow::new("narrow", 2.0, 0.0, 0).volume(), 0.0);
    }

    #[test]
    fn test_occupied_zero_depth_is_seeded() {
        let mut burrow = Burrow::new("new", 0.0, 1.0, 0).occupied();
        burrow.advance_age();
        assert!((burrow.depth - 0.009).abs() < 1e-12);
    }

    #[test]
    fn test_occupied_depth_grows() {
        let mut burrow = Burrow::new("deep", 2.0, 1.0, 0).occupied();
        burrow.advance_age();
        assert!((burrow.depth - 2.018).abs() < 1e-9);
    }

    #[test]
    fn test_negative_depth_grows_towards_zero() {
        let mut burrow = Burrow::new("odd", -1.0, 1.0, 0).occupied();
        burrow.advance_age();
        assert!((burrow.depth - (-0.991)).abs() < 1e-9);
    }

    #[test]
    fn test_free_depth_never_changes() {
        let mut burrow = Burrow::new("free", 0.0, 1.0, 0);
        for _ in 0..500 {
            burrow.advance_age();
        }
        assert_eq!(burrow.depth, 0.0);

        let mut burrow = Burrow::new("free deep", 3.3, 1.0, 0);
        for _ in 0..500 {
            burrow.advance_age();
        }
        assert_eq!(burrow.depth, 3.3);
    }

    #[test]
    fn test_age_is_capped() {
        for (initial, ticks) in [(0, 10), (10, MAX_AGE), (MAX_AGE - 1, 5), (MAX_AGE, 3)] {
            let mut burrow = Burrow::new("b", 1.0, 1.0, initial);
            for _ in 0..ticks {
                burrow.advance_age();
            }
            assert_eq!(burrow.age_in_ticks, (initial + ticks).min(MAX_AGE));
        }
    }

    #[test]
    fn test_collapsed_burrow_does_not_dig() {
        let mut burrow = Burrow::new("old", 1.0, 1.0, MAX_AGE).occupied();
        burrow.advance_age();
        assert_eq!(burrow.depth, 1.0);
        assert_eq!(burrow.age_in_ticks, MAX_AGE);
    }

    #[test]
    fn test_is_available() {
        let cases = [
            (Burrow::new("one tick to collapse free", 0.0, 0.0, MAX_AGE - 1), true),
            (Burrow::new("one tick to collapse occupied", 0.0, 0.0, MAX_AGE - 1).occupied(), false),
            (Burrow::new("collapsing", 0.0, 0.0, MAX_AGE), false),
            (Burrow::new("long collapsed", 0.0, 0.0, MAX_AGE + 100), false),
            (Burrow::new("good free", 0.0, 0.0, 19), true),
            (Burrow::new("good occupied", 0.0, 0.0, 19).occupied(), false),
        ];

        for (burrow, expected) in cases {
            assert_eq!(burrow.is_available(), expected, "{}", burrow.name);
        }
    }

    #[test]
    fn test_aging_into_collapse() {
        let mut free = Burrow::new("free", 0.0, 0.0, 10);
        for _ in 0..(MAX_AGE - 11) {
            free.advance_age();
        }
        assert!(free.is_available());

        free.advance_age();
        assert!(!free.is_available());
        assert!(free.is_collapsed());
    }

    #[test]
    fn test_json_shape() {
        let burrow: Burrow =
            serde_json::from_str(r#"{"name":"Burrow 1","depth":2.5,"width":1.2,"age":10}"#)
                .unwrap();
        assert_eq!(burrow, Burrow::new("Burrow 1", 2.5, 1.2, 10));

        let json = serde_json::to_value(&burrow).unwrap();
        assert_eq!(json["age"], 10);
        assert_eq!(json["occupied"], false);
    }
}
