//! # Materials Estimate
//!
//! Bulk material take-off for a construction, driven only by its floor area.
//! Each material has a fixed consumption per m² and a unit price:
//!
//! | Material | Quantity per m² | Unit   | Unit cost ($) |
//! |----------|-----------------|--------|---------------|
//! | Cement   | 0.1             | bags   | 10.0          |
//! | Bricks   | 2.0             | pieces | 0.5           |
//! | Paint    | 0.05            | liters | 5.0           |
//!
//! ## Example
//!
//! ```rust
//! use builder_core::materials::estimate_materials;
//!
//! let estimate = estimate_materials(100.0);
//! assert!((estimate.cement.quantity - 10.0).abs() < 1e-9);
//! assert!((estimate.bricks.cost_usd - 100.0).abs() < 1e-9);
//! assert!((estimate.paint.cost_usd - 25.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

/// Bulk materials priced by the estimator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BulkMaterial {
    Cement,
    Bricks,
    Paint,
}

impl BulkMaterial {
    /// All materials in report order
    pub const ALL: [BulkMaterial; 3] = [BulkMaterial::Cement, BulkMaterial::Bricks, BulkMaterial::Paint];

    /// Quantity consumed per m² of construction area
    pub fn quantity_per_m2(&self) -> f64 {
        match self {
            BulkMaterial::Cement => 0.1,
            BulkMaterial::Bricks => 2.0,
            BulkMaterial::Paint => 0.05,
        }
    }

    /// Price of one unit in $
    pub fn unit_cost_usd(&self) -> f64 {
        match self {
            BulkMaterial::Cement => 10.0,
            BulkMaterial::Bricks => 0.5,
            BulkMaterial::Paint => 5.0,
        }
    }

    /// Unit the quantity is counted in
    pub fn unit(&self) -> &'static str {
        match self {
            BulkMaterial::Cement => "bags",
            BulkMaterial::Bricks => "pieces",
            BulkMaterial::Paint => "liters",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            BulkMaterial::Cement => "Cement",
            BulkMaterial::Bricks => "Bricks",
            BulkMaterial::Paint => "Paint",
        }
    }
}

impl std::fmt::Display for BulkMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One line of a material estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialLine {
    pub material: BulkMaterial,
    /// Quantity in the material's unit
    pub quantity: f64,
    /// quantity * unit cost
    pub cost_usd: f64,
}

impl MaterialLine {
    fn for_area(material: BulkMaterial, area_m2: f64) -> Self {
        let quantity = area_m2 * material.quantity_per_m2();
        MaterialLine {
            material,
            quantity,
            cost_usd: quantity * material.unit_cost_usd(),
        }
    }
}

/// Materials needed for a given area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialEstimate {
    /// Area the estimate was computed for (m²)
    pub area_m2: f64,
    pub cement: MaterialLine,
    pub bricks: MaterialLine,
    pub paint: MaterialLine,
}

impl MaterialEstimate {
    /// Lines in report order
    pub fn lines(&self) -> [MaterialLine; 3] {
        [self.cement, self.bricks, self.paint]
    }

    /// Combined material cost in $
    pub fn total_cost_usd(&self) -> f64 {
        self.lines().iter().map(|line| line.cost_usd).sum()
    }
}

/// Estimate cement, bricks and paint for `area_m2`. Total for any area ≥ 0.
pub fn estimate_materials(area_m2: f64) -> MaterialEstimate {
    MaterialEstimate {
        area_m2,
        cement: MaterialLine::for_area(BulkMaterial::Cement, area_m2),
        bricks: MaterialLine::for_area(BulkMaterial::Bricks, area_m2),
        paint: MaterialLine::for_area(BulkMaterial::Paint, area_m2),
    }
}
