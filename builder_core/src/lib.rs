//! # builder_core - Construction Estimate Engine
//!
//! `builder_core` prices small construction projects. A project is a House or
//! a Building with a floor area, a few kind-specific attributes, and any
//! number of rooms. From those the engine derives room costs, labor, build
//! time, a quoted total, and a bulk materials estimate.
//!
//! ## Design Philosophy
//!
//! - **Pure model**: rooms, constructions and material estimates are plain
//!   values computed from validated inputs; nothing in the model prompts.
//! - **Tagged variants**: room and construction kinds are enums backed by
//!   coefficient tables instead of type hierarchies.
//! - **JSON-First**: reports, events and errors all serialize with serde.
//! - **Rich Errors**: every failure is a [`BuildError`] that knows whether it
//!   is recoverable.
//!
//! ## Quick Start
//!
//! ```rust
//! use builder_core::construction::{make_construction, ExtraAttributes};
//! use builder_core::materials::estimate_materials;
//! use builder_core::rooms::make_room;
//!
//! let extras = ExtraAttributes { color_scheme: "Grey".into(), num_floors: 4, ..Default::default() };
//! let building = make_construction("Building", 200.0, extras).unwrap();
//! assert_eq!(building.total_cost(), 43000.0);
//!
//! let estimate = estimate_materials(building.area_m2());
//! assert_eq!(estimate.cement.cost_usd, 200.0);
//! ```
//!
//! ## Modules
//!
//! - [`rooms`] - Room kinds and the room cost formula
//! - [`materials`] - Cement, brick and paint estimate
//! - [`construction`] - Houses and buildings, area rules, aggregate costs
//! - [`workflow`] - Interactive plan assembly over abstract prompter/reporter
//! - [`settings`] - Session settings loaded from JSON
//! - [`errors`] - Structured error types

pub mod construction;
pub mod errors;
pub mod materials;
pub mod rooms;
pub mod settings;
pub mod workflow;

// Re-export commonly used types at crate root for convenience
pub use construction::{make_construction, Construction, ConstructionKind, ExtraAttributes};
pub use errors::{BuildError, BuildResult};
pub use materials::{estimate_materials, MaterialEstimate};
pub use rooms::{make_room, Room, RoomKind};
pub use settings::Settings;
pub use workflow::{Event, Prompter, Question, Reporter, SessionOutcome, Workflow};
