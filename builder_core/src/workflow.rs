//! # Plan Assembly Workflow
//!
//! Drives one estimating session: pick a construction type, validate its
//! area, collect its attributes and rooms, show the estimate, then sign,
//! retry or quit.
//!
//! ```text
//!            ┌──────────────────────────── retry ─────────────────────────────┐
//!            ▼                                                                │
//! SelectType → ValidateArea → BuildConstruction → AddRooms ⟲ → Present → Decide ─┬─ sign → Signed
//!     │                                              │                           └─ quit → Declined
//!     └─ InvalidConstructionType (fatal)             └─ InvalidRoomType (fatal)
//! ```
//!
//! The workflow never reads a terminal or formats text. Questions go to a
//! [`Prompter`]; everything the user should see goes to a [`Reporter`] as an
//! [`Event`]. Recoverable errors (area out of range, bad color scheme,
//! unparsable numbers) are reported and the same question is asked again;
//! fatal errors end [`Workflow::run`] with `Err`.
//!
//! ## Example
//!
//! ```rust
//! use std::collections::VecDeque;
//! use builder_core::settings::Settings;
//! use builder_core::workflow::{Event, Prompter, Question, Reporter, SessionOutcome, Workflow};
//!
//! struct Script(VecDeque<&'static str>);
//! impl Prompter for Script {
//!     fn ask(&mut self, _question: &Question) -> Option<String> {
//!         self.0.pop_front().map(str::to_string)
//!     }
//! }
//!
//! struct Quiet;
//! impl Reporter for Quiet {
//!     fn report(&mut self, _event: &Event) {}
//! }
//!
//! let answers = ["Building", "200", "3", "Grey", "Kitchen", "0", "N", "Y"];
//! let mut workflow = Workflow::new(Script(answers.into_iter().collect()), Quiet, Settings::default());
//!
//! match workflow.run().unwrap() {
//!     SessionOutcome::Signed(contract) => assert_eq!(contract.construction.total_cost(), 43000.0),
//!     SessionOutcome::Declined { .. } => unreachable!(),
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, info_span};
use uuid::Uuid;

use crate::construction::{
    validate_area, validate_color_scheme, Construction, ConstructionKind, ConstructionReport,
    ExtraAttributes,
};
use crate::errors::{BuildError, BuildResult};
use crate::materials::{estimate_materials, MaterialEstimate};
use crate::rooms::{Room, RoomKind};
use crate::settings::Settings;

/// Every question the workflow can ask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Question {
    ConstructionType,
    Area { kind: ConstructionKind },
    ColorScheme { kind: ConstructionKind },
    NumFloors,
    GarageSize,
    HasBalcony,
    RoomType,
    RoomCount { kind: RoomKind },
    /// `index` is 1-based within the current batch
    RoomArea { kind: RoomKind, index: u32 },
    RoomWindows { kind: RoomKind, index: u32 },
    RoomDoors { kind: RoomKind, index: u32 },
    AddAnotherRoomType,
    PlanAcceptable,
    TryAnotherPlan,
}

impl Question {
    /// Short field name used in errors and logs
    pub fn field(&self) -> &'static str {
        match self {
            Question::ConstructionType => "construction_type",
            Question::Area { .. } => "area_m2",
            Question::ColorScheme { .. } => "color_scheme",
            Question::NumFloors => "num_floors",
            Question::GarageSize => "garage_size_cars",
            Question::HasBalcony => "has_balcony",
            Question::RoomType => "room_type",
            Question::RoomCount { .. } => "room_count",
            Question::RoomArea { .. } => "room_area_m2",
            Question::RoomWindows { .. } => "windows",
            Question::RoomDoors { .. } => "doors",
            Question::AddAnotherRoomType => "add_another_room_type",
            Question::PlanAcceptable => "plan_acceptable",
            Question::TryAnotherPlan => "try_another_plan",
        }
    }
}

/// Input provider.
pub trait Prompter {
    /// Ask `question` and return the raw answer, or `None` once input is
    /// exhausted.
    fn ask(&mut self, question: &Question) -> Option<String>;
}

/// Output sink.
pub trait Reporter {
    fn report(&mut self, event: &Event);
}

/// Something the user should be shown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum Event {
    /// An answer was refused; the question will be asked again
    Rejected(BuildError),
    /// Materials for the current plan
    Materials(MaterialEstimate),
    /// Full construction report for the current plan
    Plan(ConstructionReport),
    /// The plan was accepted
    Signed(SignedContract),
    /// The session is over (signed or declined)
    Farewell,
}

/// An accepted plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignedContract {
    pub id: Uuid,
    pub signed_at: DateTime<Utc>,
    /// 1-based attempt that was signed
    pub attempt: u32,
    pub construction: Construction,
    pub materials: MaterialEstimate,
}

impl SignedContract {
    fn new(attempt: u32, construction: Construction, materials: MaterialEstimate) -> Self {
        SignedContract {
            id: Uuid::new_v4(),
            signed_at: Utc::now(),
            attempt,
            construction,
            materials,
        }
    }
}

/// How a session ended without a fatal error.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Signed(SignedContract),
    /// The user rejected the last plan and chose not to try another
    Declined { attempts: u32 },
}

enum Decision {
    Sign,
    Retry,
    Quit,
}

/// `true` when the first non-blank character is `Y` or `y`.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim_start().chars().next(), Some('Y' | 'y'))
}

fn parse_count(field: &str, answer: &str) -> BuildResult<u32> {
    answer
        .parse()
        .map_err(|_| BuildError::invalid_input(field, answer, "Expected a whole number of 0 or more"))
}

fn parse_whole(field: &str, answer: &str) -> BuildResult<i32> {
    answer
        .parse()
        .map_err(|_| BuildError::invalid_input(field, answer, "Expected a whole number"))
}

fn parse_number(field: &str, answer: &str) -> BuildResult<f64> {
    match answer.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(BuildError::invalid_input(field, answer, "Expected a number")),
    }
}

fn parse_room_area(field: &str, answer: &str) -> BuildResult<f64> {
    let value = parse_number(field, answer)?;
    if value < 0.0 {
        return Err(BuildError::invalid_input(field, answer, "Area cannot be negative"));
    }
    Ok(value)
}

fn parse_flag(field: &str, answer: &str) -> BuildResult<bool> {
    match answer.to_ascii_lowercase().as_str() {
        "1" | "y" | "yes" | "true" => Ok(true),
        "0" | "n" | "no" | "false" => Ok(false),
        _ => Err(BuildError::invalid_input(field, answer, "Expected 1 for yes or 0 for no")),
    }
}

/// Session state handed to every step.
///
/// The construction being assembled lives only inside the running attempt,
/// so at most one exists at a time and a rejected plan is dropped before the
/// next one starts.
pub struct Workflow<P, R> {
    prompter: P,
    reporter: R,
    settings: Settings,
    attempt: u32,
}

impl<P: Prompter, R: Reporter> Workflow<P, R> {
    pub fn new(prompter: P, reporter: R, settings: Settings) -> Self {
        Workflow {
            prompter,
            reporter,
            settings,
            attempt: 0,
        }
    }

    /// Number of attempts started so far
    pub fn attempts(&self) -> u32 {
        self.attempt
    }

    /// Give back the prompter and reporter.
    pub fn into_parts(self) -> (P, R) {
        (self.prompter, self.reporter)
    }

    /// Run attempts until a plan is signed, the user quits, or a fatal error
    /// occurs.
    ///
    /// # Returns
    ///
    /// * `Ok(SessionOutcome)` - Session finished normally
    /// * `Err(BuildError::InvalidConstructionType)` - Unknown construction type
    /// * `Err(BuildError::InvalidRoomType)` - Unknown room type; the attempt's construction is discarded
    /// * `Err(BuildError::InputClosed)` - Prompter ran out of answers
    pub fn run(&mut self) -> BuildResult<SessionOutcome> {
        loop {
            self.attempt += 1;
            let span = info_span!("attempt", n = self.attempt);
            let _guard = span.enter();

            let construction = self.assemble()?;
            let materials = self.present(&construction);

            match self.decide()? {
                Decision::Sign => {
                    let contract = SignedContract::new(self.attempt, construction, materials);
                    info!(contract = %contract.id, total_cost_usd = contract.construction.total_cost(), "plan signed");
                    self.reporter.report(&Event::Signed(contract.clone()));
                    self.reporter.report(&Event::Farewell);
                    return Ok(SessionOutcome::Signed(contract));
                }
                Decision::Retry => {
                    debug!("plan rejected, starting over");
                    drop(construction);
                }
                Decision::Quit => {
                    info!(attempts = self.attempt, "plan declined");
                    self.reporter.report(&Event::Farewell);
                    return Ok(SessionOutcome::Declined {
                        attempts: self.attempt,
                    });
                }
            }
        }
    }

    /// Steps 1-4: type, area, attributes, rooms.
    fn assemble(&mut self) -> BuildResult<Construction> {
        let kind = self.select_type()?;
        let area_m2 = self.read_area(kind)?;
        let mut construction = self.build_construction(kind, area_m2)?;

        if let Err(err) = self.add_rooms(&mut construction) {
            info!(
                rooms = construction.room_count(),
                error = %err,
                "discarding construction"
            );
            drop(construction);
            return Err(err);
        }
        Ok(construction)
    }

    fn select_type(&mut self) -> BuildResult<ConstructionKind> {
        debug!("selecting construction type");
        let answer = self.answer(Question::ConstructionType)?;
        answer.parse()
    }

    fn read_area(&mut self, kind: ConstructionKind) -> BuildResult<f64> {
        debug!(%kind, "reading area");
        let question = Question::Area { kind };
        self.ask_until(question, |answer| {
            let area_m2 = parse_number(question.field(), answer)?;
            validate_area(kind, area_m2)?;
            Ok(area_m2)
        })
    }

    fn read_color_scheme(&mut self, kind: ConstructionKind) -> BuildResult<String> {
        self.ask_until(Question::ColorScheme { kind }, |answer| {
            validate_color_scheme(answer)?;
            Ok(answer.to_string())
        })
    }

    fn read_count(&mut self, question: Question) -> BuildResult<u32> {
        self.ask_until(question, |answer| parse_count(question.field(), answer))
    }

    fn read_whole(&mut self, question: Question) -> BuildResult<i32> {
        self.ask_until(question, |answer| parse_whole(question.field(), answer))
    }

    fn build_construction(&mut self, kind: ConstructionKind, area_m2: f64) -> BuildResult<Construction> {
        debug!(%kind, area_m2, "collecting attributes");
        let extras = match kind {
            ConstructionKind::House => {
                let color_scheme = self.read_color_scheme(kind)?;
                let num_floors = self.read_whole(Question::NumFloors)?;
                let garage_size_cars = self.read_whole(Question::GarageSize)?;
                let has_balcony =
                    self.ask_until(Question::HasBalcony, |answer| parse_flag(Question::HasBalcony.field(), answer))?;
                ExtraAttributes {
                    color_scheme,
                    num_floors,
                    garage_size_cars,
                    has_balcony,
                }
            }
            ConstructionKind::Building => {
                let num_floors = self.read_whole(Question::NumFloors)?;
                let color_scheme = self.read_color_scheme(kind)?;
                ExtraAttributes {
                    color_scheme,
                    num_floors,
                    ..ExtraAttributes::default()
                }
            }
        };

        Ok(Construction::new(kind, area_m2, extras)?.with_room_capacity(self.settings.room_capacity))
    }

    /// Room batches until the user stops. An unknown room type is fatal.
    fn add_rooms(&mut self, construction: &mut Construction) -> BuildResult<()> {
        loop {
            let label = self.answer(Question::RoomType)?;
            let kind: RoomKind = label.parse()?;
            let count = self.read_count(Question::RoomCount { kind })?;
            debug!(kind = kind.label(), count, "collecting room batch");

            for index in 1..=count {
                let area_question = Question::RoomArea { kind, index };
                let area_m2 = self.ask_until(area_question, |answer| parse_room_area(area_question.field(), answer))?;
                let windows = self.read_count(Question::RoomWindows { kind, index })?;
                let doors = self.read_count(Question::RoomDoors { kind, index })?;
                construction.add_room(Room::new(kind, area_m2, windows, doors));
            }

            if !self.ask_yes_no(Question::AddAnotherRoomType)? {
                return Ok(());
            }
        }
    }

    /// Step 5: materials first, then the construction report.
    fn present(&mut self, construction: &Construction) -> MaterialEstimate {
        let materials = estimate_materials(construction.area_m2());
        self.reporter.report(&Event::Materials(materials));
        self.reporter.report(&Event::Plan(construction.report()));
        materials
    }

    /// Step 6
    fn decide(&mut self) -> BuildResult<Decision> {
        if self.ask_yes_no(Question::PlanAcceptable)? {
            return Ok(Decision::Sign);
        }
        if self.ask_yes_no(Question::TryAnotherPlan)? {
            Ok(Decision::Retry)
        } else {
            Ok(Decision::Quit)
        }
    }

    fn answer(&mut self, question: Question) -> BuildResult<String> {
        self.prompter
            .ask(&question)
            .map(|answer| answer.trim().to_string())
            .ok_or_else(|| BuildError::input_closed(question.field()))
    }

    fn ask_yes_no(&mut self, question: Question) -> BuildResult<bool> {
        Ok(is_affirmative(&self.answer(question)?))
    }

    /// Ask until `parse` accepts the answer. Recoverable errors are reported
    /// and the question repeats; any other error is returned.
    fn ask_until<T>(&mut self, question: Question, parse: impl Fn(&str) -> BuildResult<T>) -> BuildResult<T> {
        loop {
            let answer = self.answer(question)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(err) if err.is_recoverable() => {
                    debug!(field = question.field(), %answer, code = err.error_code(), "answer rejected");
                    self.reporter.report(&Event::Rejected(err));
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("Y"));
        assert!(is_affirmative("y"));
        assert!(is_affirmative("yes"));
        assert!(is_affirmative("  Yep"));
        assert!(!is_affirmative("N"));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("ok"));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("doors", "3").unwrap(), 3);
        assert_eq!(parse_count("doors", "0").unwrap(), 0);
        assert!(parse_count("doors", "-1").is_err());
        assert!(parse_count("doors", "two").is_err());
        assert!(parse_count("doors", "1.5").is_err());
    }

    #[test]
    fn test_parse_whole_accepts_negatives() {
        assert_eq!(parse_whole("num_floors", "-1").unwrap(), -1);
        assert_eq!(parse_whole("garage_size", "0").unwrap(), 0);
        assert!(parse_whole("num_floors", "1.5").is_err());
        assert!(parse_whole("num_floors", "two").is_err());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("area_m2", "120.5").unwrap(), 120.5);
        assert!(parse_number("area_m2", "abc").is_err());
        assert!(parse_number("area_m2", "inf").is_err());
        assert!(parse_number("area_m2", "NaN").is_err());
    }

    #[test]
    fn test_parse_room_area() {
        assert_eq!(parse_room_area("room_area_m2", "0").unwrap(), 0.0);
        let err = parse_room_area("room_area_m2", "-4").unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("has_balcony", "1").unwrap());
        assert!(!parse_flag("has_balcony", "0").unwrap());
        assert!(parse_flag("has_balcony", "Yes").unwrap());
        assert!(!parse_flag("has_balcony", "false").unwrap());
        assert!(parse_flag("has_balcony", "2").is_err());
    }

    #[test]
    fn test_question_fields() {
        assert_eq!(Question::ConstructionType.field(), "construction_type");
        assert_eq!(
            Question::RoomArea {
                kind: RoomKind::Kitchen,
                index: 2
            }
            .field(),
            "room_area_m2"
        );
    }

    #[test]
    fn test_event_serialization() {
        let event = Event::Rejected(BuildError::invalid_color_scheme("Blue2"));
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event\":\"Rejected\""));
        assert!(json.contains("InvalidColorScheme"));
    }
}
