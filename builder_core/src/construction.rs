//! # Constructions
//!
//! A [`Construction`] is one project being priced: a House or a Building with
//! a floor area, kind-specific attributes, and the rooms added to it.
//!
//! ## Kind Coefficients
//!
//! | Kind     | Area range (m²) | Labor ($/m²) | Time (days/m²) | Base ($/m²) | Labor in total |
//! |----------|-----------------|--------------|----------------|-------------|----------------|
//! | House    | 50 - 500        | 10           | 0.5            | 100         | no             |
//! | Building | 100 - 1000      | 15           | 0.8            | 200         | yes            |
//!
//! ```text
//! total_cost = total_room_cost + area * base [+ labor]
//! ```
//!
//! House totals leave labor out; Building totals include it.
//!
//! ## Example
//!
//! ```rust
//! use builder_core::construction::{make_construction, ExtraAttributes};
//! use builder_core::rooms::make_room;
//!
//! let extras = ExtraAttributes { color_scheme: "Blue".into(), ..Default::default() };
//! let mut house = make_construction("House", 100.0, extras).unwrap();
//! house.add_room(make_room("LivingRoom", 20.0, 2, 1).unwrap());
//!
//! assert_eq!(house.total_room_cost(), 1550.0);
//! assert_eq!(house.total_cost(), 11550.0);
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{BuildError, BuildResult};
use crate::rooms::{Room, RoomKind};

/// Construction kinds offered by the estimator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstructionKind {
    House,
    Building,
}

/// Per-kind pricing coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KindRates {
    /// Labor cost per m² ($)
    pub labor_usd_per_m2: f64,
    /// Build time per m² (days)
    pub days_per_m2: f64,
    /// Shell cost per m² added to the room total ($)
    pub base_usd_per_m2: f64,
    /// Whether labor is part of the quoted total
    pub labor_in_total: bool,
}

impl ConstructionKind {
    /// All construction kinds in menu order
    pub const ALL: [ConstructionKind; 2] = [ConstructionKind::House, ConstructionKind::Building];

    /// The exact token a user types to pick this kind
    pub fn label(&self) -> &'static str {
        match self {
            ConstructionKind::House => "House",
            ConstructionKind::Building => "Building",
        }
    }

    /// Allowed floor area (min, max) in m², both inclusive
    pub fn area_bounds_m2(&self) -> (f64, f64) {
        match self {
            ConstructionKind::House => (50.0, 500.0),
            ConstructionKind::Building => (100.0, 1000.0),
        }
    }

    /// Pricing coefficients for this kind
    pub fn rates(&self) -> KindRates {
        match self {
            ConstructionKind::House => KindRates {
                labor_usd_per_m2: 10.0,
                days_per_m2: 0.5,
                base_usd_per_m2: 100.0,
                labor_in_total: false,
            },
            ConstructionKind::Building => KindRates {
                labor_usd_per_m2: 15.0,
                days_per_m2: 0.8,
                base_usd_per_m2: 200.0,
                labor_in_total: true,
            },
        }
    }
}

impl FromStr for ConstructionKind {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConstructionKind::ALL
            .into_iter()
            .find(|kind| kind.label() == s)
            .ok_or_else(|| BuildError::invalid_construction_type(s))
    }
}

impl std::fmt::Display for ConstructionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Check that `area_m2` lies within the kind's inclusive bounds.
///
/// NaN is always out of range.
pub fn validate_area(kind: ConstructionKind, area_m2: f64) -> BuildResult<()> {
    let (min, max) = kind.area_bounds_m2();
    if (min..=max).contains(&area_m2) {
        Ok(())
    } else {
        Err(BuildError::area_out_of_range(kind.label(), area_m2, min, max))
    }
}

/// Check that a color scheme is non-empty and made of ASCII letters only.
pub fn validate_color_scheme(color_scheme: &str) -> BuildResult<()> {
    if !color_scheme.is_empty() && color_scheme.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(BuildError::invalid_color_scheme(color_scheme))
    }
}

/// Raw kind-specific attributes as collected from the user.
///
/// Taken as given. Buildings ignore `garage_size_cars` and `has_balcony`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraAttributes {
    pub color_scheme: String,
    pub num_floors: i32,
    pub garage_size_cars: i32,
    pub has_balcony: bool,
}

impl Default for ExtraAttributes {
    fn default() -> Self {
        ExtraAttributes {
            color_scheme: String::new(),
            num_floors: 1,
            garage_size_cars: 0,
            has_balcony: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseDetails {
    pub color_scheme: String,
    pub num_floors: i32,
    pub garage_size_cars: i32,
    pub has_balcony: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingDetails {
    pub num_floors: i32,
    pub color_scheme: String,
}

/// Kind tag plus the attributes only that kind carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConstructionDetails {
    House(HouseDetails),
    Building(BuildingDetails),
}

impl ConstructionDetails {
    fn from_extras(kind: ConstructionKind, extras: ExtraAttributes) -> Self {
        match kind {
            ConstructionKind::House => ConstructionDetails::House(HouseDetails {
                color_scheme: extras.color_scheme,
                num_floors: extras.num_floors,
                garage_size_cars: extras.garage_size_cars,
                has_balcony: extras.has_balcony,
            }),
            ConstructionKind::Building => ConstructionDetails::Building(BuildingDetails {
                num_floors: extras.num_floors,
                color_scheme: extras.color_scheme,
            }),
        }
    }

    pub fn kind(&self) -> ConstructionKind {
        match self {
            ConstructionDetails::House(_) => ConstructionKind::House,
            ConstructionDetails::Building(_) => ConstructionKind::Building,
        }
    }

    pub fn color_scheme(&self) -> &str {
        match self {
            ConstructionDetails::House(h) => &h.color_scheme,
            ConstructionDetails::Building(b) => &b.color_scheme,
        }
    }

    pub fn num_floors(&self) -> i32 {
        match self {
            ConstructionDetails::House(h) => h.num_floors,
            ConstructionDetails::Building(b) => b.num_floors,
        }
    }
}

/// A construction and the rooms it owns.
///
/// Area and color scheme are validated on creation and cannot change
/// afterwards. Rooms are kept in insertion order and can only be appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Construction {
    details: ConstructionDetails,
    area_m2: f64,
    rooms: Vec<Room>,
    #[serde(skip)]
    room_capacity: Option<usize>,
}

impl Construction {
    /// Create a construction of a known kind.
    ///
    /// # Returns
    ///
    /// * `Err(BuildError::AreaOutOfRange)` - Area outside the kind's bounds
    /// * `Err(BuildError::InvalidColorScheme)` - Empty or non-alphabetic color scheme
    pub fn new(kind: ConstructionKind, area_m2: f64, extras: ExtraAttributes) -> BuildResult<Self> {
        validate_area(kind, area_m2)?;
        validate_color_scheme(&extras.color_scheme)?;

        Ok(Construction {
            details: ConstructionDetails::from_extras(kind, extras),
            area_m2,
            rooms: Vec::new(),
            room_capacity: None,
        })
    }

    /// Limit how many rooms this construction keeps. `None` removes the limit.
    pub fn with_room_capacity(mut self, capacity: Option<usize>) -> Self {
        self.room_capacity = capacity;
        self
    }

    /// Append a room.
    ///
    /// Once a capacity is reached further rooms are dropped; the call still
    /// succeeds.
    pub fn add_room(&mut self, room: Room) {
        if let Some(capacity) = self.room_capacity {
            if self.rooms.len() >= capacity {
                warn!(
                    capacity,
                    kind = room.kind().label(),
                    "room capacity reached, room dropped"
                );
                return;
            }
        }
        debug!(kind = room.kind().label(), area_m2 = room.area_m2(), "room added");
        self.rooms.push(room);
    }

    pub fn kind(&self) -> ConstructionKind {
        self.details.kind()
    }

    pub fn details(&self) -> &ConstructionDetails {
        &self.details
    }

    /// Floor area in m²
    pub fn area_m2(&self) -> f64 {
        self.area_m2
    }

    /// Rooms in the order they were added
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn room_capacity(&self) -> Option<usize> {
        self.room_capacity
    }

    /// Sum of all room costs ($)
    pub fn total_room_cost(&self) -> f64 {
        self.rooms.iter().map(Room::cost).sum()
    }

    /// Labor cost ($)
    pub fn labor(&self) -> f64 {
        self.area_m2 * self.kind().rates().labor_usd_per_m2
    }

    /// Build time (days)
    pub fn time(&self) -> f64 {
        self.area_m2 * self.kind().rates().days_per_m2
    }

    /// Quoted total ($). Includes labor for Buildings only.
    pub fn total_cost(&self) -> f64 {
        let rates = self.kind().rates();
        let mut total = self.total_room_cost() + self.area_m2 * rates.base_usd_per_m2;
        if rates.labor_in_total {
            total += self.labor();
        }
        total
    }

    /// Snapshot of everything a report shows.
    pub fn report(&self) -> ConstructionReport {
        ConstructionReport {
            kind: self.kind(),
            area_m2: self.area_m2,
            room_count: self.room_count(),
            rooms: self.rooms.iter().map(RoomLine::from).collect(),
            total_room_cost_usd: self.total_room_cost(),
            labor_usd: self.labor(),
            time_days: self.time(),
            total_cost_usd: self.total_cost(),
            details: self.details.clone(),
        }
    }
}

/// Build a construction from its user-facing label.
///
/// # Returns
///
/// * `Err(BuildError::InvalidConstructionType)` - Label is not House or Building
/// * `Err(BuildError::AreaOutOfRange)` / `Err(BuildError::InvalidColorScheme)` - see [`Construction::new`]
pub fn make_construction(label: &str, area_m2: f64, extras: ExtraAttributes) -> BuildResult<Construction> {
    let kind: ConstructionKind = label.parse()?;
    Construction::new(kind, area_m2, extras)
}

/// One room as it appears in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomLine {
    pub kind: RoomKind,
    pub area_m2: f64,
    pub windows: u32,
    pub doors: u32,
    pub cost_usd: f64,
}

impl From<&Room> for RoomLine {
    fn from(room: &Room) -> Self {
        RoomLine {
            kind: room.kind(),
            area_m2: room.area_m2(),
            windows: room.windows(),
            doors: room.doors(),
            cost_usd: room.cost(),
        }
    }
}

/// Everything shown for a construction when a plan is presented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionReport {
    pub kind: ConstructionKind,
    pub area_m2: f64,
    pub room_count: usize,
    pub rooms: Vec<RoomLine>,
    pub total_room_cost_usd: f64,
    pub labor_usd: f64,
    pub time_days: f64,
    pub total_cost_usd: f64,
    pub details: ConstructionDetails,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extras(color: &str) -> ExtraAttributes {
        ExtraAttributes {
            color_scheme: color.to_string(),
            ..Default::default()
        }
    }

    fn test_house(area_m2: f64) -> Construction {
        Construction::new(ConstructionKind::House, area_m2, extras("Blue")).unwrap()
    }

    fn test_building(area_m2: f64) -> Construction {
        Construction::new(ConstructionKind::Building, area_m2, extras("Grey")).unwrap()
    }

    #[test]
    fn test_house_with_living_room() {
        let mut house = test_house(100.0);
        house.add_room(Room::new(RoomKind::LivingRoom, 20.0, 2, 1));

        assert!((house.total_room_cost() - 1550.0).abs() < 1e-9);
        assert!((house.total_cost() - 11550.0).abs() < 1e-9);
        assert!((house.labor() - 1000.0).abs() < 1e-9);
        assert!((house.time() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_building() {
        let building = test_building(200.0);
        assert_eq!(building.total_room_cost(), 0.0);
        assert!((building.labor() - 3000.0).abs() < 1e-9);
        assert!((building.time() - 160.0).abs() < 1e-9);
        assert!((building.total_cost() - 43000.0).abs() < 1e-9);
    }

    #[test]
    fn test_total_cost_formulas() {
        let rooms = [
            Room::new(RoomKind::Kitchen, 12.0, 1, 1),
            Room::new(RoomKind::GuestRoom, 15.5, 2, 1),
            Room::new(RoomKind::LivingRoom, 30.0, 4, 2),
        ];

        let mut house = test_house(250.0);
        let mut building = test_building(250.0);
        for room in &rooms {
            house.add_room(room.clone());
            building.add_room(room.clone());
        }

        let room_sum: f64 = rooms.iter().map(Room::cost).sum();
        assert!((house.total_room_cost() - room_sum).abs() < 1e-9);
        assert!((house.total_cost() - (room_sum + 250.0 * 100.0)).abs() < 1e-9);
        assert!((building.labor() - 250.0 * 15.0).abs() < 1e-9);
        assert!((building.total_cost() - (room_sum + 250.0 * 200.0 + building.labor())).abs() < 1e-9);
    }

    #[test]
    fn test_room_order_does_not_change_total() {
        let a = Room::new(RoomKind::Kitchen, 9.0, 1, 1);
        let b = Room::new(RoomKind::GuestRoom, 11.0, 0, 1);

        let mut forward = test_house(80.0);
        forward.add_room(a.clone());
        forward.add_room(b.clone());

        let mut backward = test_house(80.0);
        backward.add_room(b);
        backward.add_room(a);

        assert!((forward.total_room_cost() - backward.total_room_cost()).abs() < 1e-9);
        assert_eq!(forward.rooms()[0].kind(), RoomKind::Kitchen);
        assert_eq!(backward.rooms()[0].kind(), RoomKind::GuestRoom);
    }

    #[test]
    fn test_area_bounds_inclusive() {
        assert!(validate_area(ConstructionKind::House, 50.0).is_ok());
        assert!(validate_area(ConstructionKind::House, 500.0).is_ok());
        assert!(validate_area(ConstructionKind::House, 30.0).is_err());
        assert!(validate_area(ConstructionKind::House, 49.99).is_err());
        assert!(validate_area(ConstructionKind::House, 600.0).is_err());

        assert!(validate_area(ConstructionKind::Building, 100.0).is_ok());
        assert!(validate_area(ConstructionKind::Building, 1000.0).is_ok());
        assert!(validate_area(ConstructionKind::Building, 99.0).is_err());
        assert!(validate_area(ConstructionKind::Building, 1000.5).is_err());
        assert!(validate_area(ConstructionKind::Building, f64::NAN).is_err());
    }

    #[test]
    fn test_color_scheme_validation() {
        assert!(validate_color_scheme("Blue").is_ok());
        assert!(validate_color_scheme("OffWhite").is_ok());
        assert!(validate_color_scheme("Blue2").is_err());
        assert!(validate_color_scheme("").is_err());
        assert!(validate_color_scheme("Sky Blue").is_err());
        assert!(validate_color_scheme("Rosé").is_err());
    }

    #[test]
    fn test_make_construction_errors() {
        assert_eq!(
            make_construction("Shed", 100.0, extras("Blue")).unwrap_err(),
            BuildError::invalid_construction_type("Shed")
        );
        assert_eq!(
            make_construction("Building", 50.0, extras("Blue")).unwrap_err().error_code(),
            "AREA_OUT_OF_RANGE"
        );
        assert_eq!(
            make_construction("House", 120.0, extras("Blue2")).unwrap_err(),
            BuildError::invalid_color_scheme("Blue2")
        );
    }

    #[test]
    fn test_building_ignores_house_extras() {
        let attrs = ExtraAttributes {
            color_scheme: "Red".to_string(),
            num_floors: 7,
            garage_size_cars: 3,
            has_balcony: true,
        };
        let building = make_construction("Building", 300.0, attrs).unwrap();
        assert_eq!(
            building.details(),
            &ConstructionDetails::Building(BuildingDetails {
                num_floors: 7,
                color_scheme: "Red".to_string(),
            })
        );
        assert_eq!(building.details().color_scheme(), "Red");
        assert_eq!(building.details().num_floors(), 7);
    }

    #[test]
    fn test_room_capacity_drops_extra_rooms() {
        let mut house = test_house(100.0).with_room_capacity(Some(2));
        for _ in 0..5 {
            house.add_room(Room::new(RoomKind::Kitchen, 10.0, 0, 1));
        }
        assert_eq!(house.room_count(), 2);
        assert_eq!(house.room_capacity(), Some(2));
    }

    #[test]
    fn test_unbounded_by_default() {
        let mut building = test_building(500.0);
        for _ in 0..250 {
            building.add_room(Room::new(RoomKind::GuestRoom, 4.0, 1, 1));
        }
        assert_eq!(building.room_count(), 250);
    }

    #[test]
    fn test_report_snapshot() {
        let mut house = test_house(100.0);
        house.add_room(Room::new(RoomKind::LivingRoom, 20.0, 2, 1));

        let report = house.report();
        assert_eq!(report.kind, ConstructionKind::House);
        assert_eq!(report.room_count, 1);
        assert_eq!(report.rooms[0].cost_usd, 1550.0);
        assert_eq!(report.total_cost_usd, 11550.0);

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"type\":\"House\""));
        let roundtrip: ConstructionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, report);
    }
}
