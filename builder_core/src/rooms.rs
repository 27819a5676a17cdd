//! # Rooms
//!
//! A [`Room`] is one room of a construction. Its kind selects the per-m²
//! finishing rate; windows and doors are priced the same for every kind.
//!
//! ```text
//! cost = area_m2 * rate[kind] + windows * 200 + doors * 150
//!
//! rate: LivingRoom 50, Kitchen 70, GuestRoom 60   ($/m²)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use builder_core::rooms::{make_room, RoomKind};
//!
//! let room = make_room("LivingRoom", 20.0, 2, 1).unwrap();
//! assert_eq!(room.kind(), RoomKind::LivingRoom);
//! assert_eq!(room.cost(), 1550.0);
//!
//! assert!(make_room("Attic", 10.0, 0, 1).is_err());
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{BuildError, BuildResult};

/// Cost of one window ($)
pub const WINDOW_COST: f64 = 200.0;

/// Cost of one door ($)
pub const DOOR_COST: f64 = 150.0;

/// Room kinds offered by the estimator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomKind {
    LivingRoom,
    Kitchen,
    GuestRoom,
}

impl RoomKind {
    /// All room kinds in menu order
    pub const ALL: [RoomKind; 3] = [RoomKind::LivingRoom, RoomKind::Kitchen, RoomKind::GuestRoom];

    /// The exact token a user types to pick this kind
    pub fn label(&self) -> &'static str {
        match self {
            RoomKind::LivingRoom => "LivingRoom",
            RoomKind::Kitchen => "Kitchen",
            RoomKind::GuestRoom => "GuestRoom",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            RoomKind::LivingRoom => "Living Room",
            RoomKind::Kitchen => "Kitchen",
            RoomKind::GuestRoom => "Guest Room",
        }
    }

    /// Finishing rate in $/m²
    pub fn rate_per_m2(&self) -> f64 {
        match self {
            RoomKind::LivingRoom => 50.0,
            RoomKind::Kitchen => 70.0,
            RoomKind::GuestRoom => 60.0,
        }
    }
}

impl FromStr for RoomKind {
    type Err = BuildError;

    /// Labels match exactly; `livingroom` or `Living Room` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoomKind::ALL
            .into_iter()
            .find(|kind| kind.label() == s)
            .ok_or_else(|| BuildError::invalid_room_type(s))
    }
}

impl std::fmt::Display for RoomKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A single room. Fields are fixed once the room is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    kind: RoomKind,
    area_m2: f64,
    windows: u32,
    doors: u32,
}

impl Room {
    /// Build a room of a known kind. Never fails.
    ///
    /// `area_m2` must be finite and not negative; callers check it before
    /// building the room.
    pub fn new(kind: RoomKind, area_m2: f64, windows: u32, doors: u32) -> Self {
        debug_assert!(
            area_m2.is_finite() && area_m2 >= 0.0,
            "room area must be finite and non-negative, got {}",
            area_m2
        );
        Room {
            kind,
            area_m2,
            windows,
            doors,
        }
    }

    pub fn kind(&self) -> RoomKind {
        self.kind
    }

    /// Floor area in m²
    pub fn area_m2(&self) -> f64 {
        self.area_m2
    }

    pub fn windows(&self) -> u32 {
        self.windows
    }

    pub fn doors(&self) -> u32 {
        self.doors
    }

    /// Room cost in $
    pub fn cost(&self) -> f64 {
        self.area_m2 * self.kind.rate_per_m2()
            + f64::from(self.windows) * WINDOW_COST
            + f64::from(self.doors) * DOOR_COST
    }
}

/// Build a room from its user-facing label.
///
/// # Returns
///
/// * `Ok(Room)` - The label names a known room kind
/// * `Err(BuildError::InvalidRoomType)` - Unknown label
pub fn make_room(label: &str, area_m2: f64, windows: u32, doors: u32) -> BuildResult<Room> {
    let kind: RoomKind = label.parse()?;
    Ok(Room::new(kind, area_m2, windows, doors))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_formula_all_kinds() {
        for kind in RoomKind::ALL {
            let room = Room::new(kind, 12.5, 3, 2);
            let expected = 12.5 * kind.rate_per_m2() + 3.0 * 200.0 + 2.0 * 150.0;
            assert!((room.cost() - expected).abs() < 1e-9, "{:?}", kind);
        }
    }

    #[test]
    fn test_living_room_example() {
        // 20*50 + 2*200 + 1*150 = 1550
        let room = Room::new(RoomKind::LivingRoom, 20.0, 2, 1);
        assert!((room.cost() - 1550.0).abs() < 1e-9);
    }

    #[test]
    fn test_rates() {
        assert_eq!(RoomKind::LivingRoom.rate_per_m2(), 50.0);
        assert_eq!(RoomKind::Kitchen.rate_per_m2(), 70.0);
        assert_eq!(RoomKind::GuestRoom.rate_per_m2(), 60.0);
    }

    #[test]
    fn test_empty_room_costs_nothing() {
        let room = Room::new(RoomKind::Kitchen, 0.0, 0, 0);
        assert_eq!(room.cost(), 0.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "room area must be finite")]
    fn test_nan_area_panics_in_debug() {
        let _ = Room::new(RoomKind::Kitchen, f64::NAN, 1, 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "room area must be finite")]
    fn test_negative_area_panics_in_debug() {
        let _ = Room::new(RoomKind::GuestRoom, -4.0, 0, 1);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("Kitchen".parse::<RoomKind>().unwrap(), RoomKind::Kitchen);
        assert_eq!("GuestRoom".parse::<RoomKind>().unwrap(), RoomKind::GuestRoom);
        assert!("kitchen".parse::<RoomKind>().is_err());
        assert!("Guest Room".parse::<RoomKind>().is_err());
    }

    #[test]
    fn test_make_room_unknown_label() {
        let err = make_room("Bathroom", 8.0, 1, 1).unwrap_err();
        assert_eq!(err, BuildError::invalid_room_type("Bathroom"));
    }

    #[test]
    fn test_accessors() {
        let room = make_room("GuestRoom", 14.0, 1, 2).unwrap();
        assert_eq!(room.kind(), RoomKind::GuestRoom);
        assert_eq!(room.area_m2(), 14.0);
        assert_eq!(room.windows(), 1);
        assert_eq!(room.doors(), 2);
        assert_eq!(room.kind().to_string(), "Guest Room");
    }
}
