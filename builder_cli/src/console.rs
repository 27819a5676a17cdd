//! Console prompter and reporter.
//!
//! Answers are read as whitespace-separated tokens, so a whole session can be
//! typed on one line or piped in from a file. Prompts and reports go to the
//! same writer.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use builder_core::construction::{ConstructionDetails, ConstructionReport};
use builder_core::materials::MaterialEstimate;
use builder_core::settings::ReportFormat;
use builder_core::workflow::{Event, Prompter, Question, Reporter};
use builder_core::ConstructionKind;

/// Prompt shown for each question.
pub fn prompt_text(question: &Question) -> String {
    match question {
        Question::ConstructionType => "Enter the type of construction (House, Building): ".to_string(),
        Question::Area { kind } => {
            let (min, max) = kind.area_bounds_m2();
            format!("Enter the area to construct (in square meters, range: {} - {}): ", min, max)
        }
        Question::ColorScheme { kind } => format!(
            "Enter {} color scheme (alphabetic characters only): ",
            kind.label().to_lowercase()
        ),
        Question::NumFloors => "Enter number of floors: ".to_string(),
        Question::GarageSize => "Enter garage size (in cars): ".to_string(),
        Question::HasBalcony => "Does the house have a balcony? (1 for Yes, 0 for No): ".to_string(),
        Question::RoomType => "Enter room type (LivingRoom, Kitchen, GuestRoom): ".to_string(),
        Question::RoomCount { kind } => format!("Enter the number of {}s: ", kind.label()),
        Question::RoomArea { kind, index } => format!(
            "Enter details for {} {}:\nEnter room area (in square meters): ",
            kind.label(),
            index
        ),
        Question::RoomWindows { .. } => "Enter number of windows: ".to_string(),
        Question::RoomDoors { .. } => "Enter number of doors: ".to_string(),
        Question::AddAnotherRoomType => "Do you want to add another type of room? (Y/N): ".to_string(),
        Question::PlanAcceptable => "Is this plan within your desired cost range? (Y/N): ".to_string(),
        Question::TryAnotherPlan => "Would you like to try another plan? (Y/N): ".to_string(),
    }
}

/// Reads tokens from `input`, writing prompts to `output`.
pub struct ConsolePrompter<I, O> {
    input: I,
    output: O,
    pending: VecDeque<String>,
}

impl<I: BufRead, O: Write> ConsolePrompter<I, O> {
    pub fn new(input: I, output: O) -> Self {
        ConsolePrompter {
            input,
            output,
            pending: VecDeque::new(),
        }
    }

    fn next_token(&mut self) -> Option<String> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => self.pending.extend(line.split_whitespace().map(str::to_string)),
                Err(e) => {
                    tracing::error!(error = %e, "failed to read input");
                    return None;
                }
            }
        }
    }
}

impl<I: BufRead, O: Write> Prompter for ConsolePrompter<I, O> {
    fn ask(&mut self, question: &Question) -> Option<String> {
        let prompt = prompt_text(question);
        if let Err(e) = write!(self.output, "{}", prompt).and_then(|_| self.output.flush()) {
            tracing::error!(error = %e, "failed to write prompt");
        }
        self.next_token()
    }
}

/// Renders events as text (and optionally JSON) to `output`.
pub struct ConsoleReporter<O> {
    output: O,
    format: ReportFormat,
}

impl<O: Write> ConsoleReporter<O> {
    pub fn new(output: O, format: ReportFormat) -> Self {
        ConsoleReporter { output, format }
    }

    fn render(&mut self, event: &Event) -> io::Result<()> {
        match event {
            Event::Rejected(err) => writeln!(self.output, "{}", err)?,
            Event::Materials(estimate) => write_materials(&mut self.output, estimate)?,
            Event::Plan(report) => {
                write_report(&mut self.output, report)?;
                self.write_json(report)?;
            }
            Event::Signed(contract) => {
                writeln!(self.output, "Contract signed. Construction begins!")?;
                writeln!(self.output, "Contract ID: {}", contract.id)?;
                self.write_json(contract)?;
            }
            Event::Farewell => writeln!(self.output, "Thank you for considering our services. Goodbye!")?,
        }
        self.output.flush()
    }

    fn write_json<T: serde::Serialize>(&mut self, value: &T) -> io::Result<()> {
        if self.format != ReportFormat::Json {
            return Ok(());
        }
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        writeln!(self.output)?;
        writeln!(self.output, "JSON Output:")?;
        writeln!(self.output, "{}", json)
    }
}

impl<O: Write> Reporter for ConsoleReporter<O> {
    fn report(&mut self, event: &Event) {
        if let Err(e) = self.render(event) {
            tracing::error!(error = %e, "failed to write report");
        }
    }
}

fn write_materials(out: &mut impl Write, estimate: &MaterialEstimate) -> io::Result<()> {
    writeln!(out, "Estimated materials required:")?;
    for line in estimate.lines() {
        writeln!(
            out,
            "{}: {} {} (${})",
            line.material,
            line.quantity,
            line.material.unit(),
            line.cost_usd
        )?;
    }
    Ok(())
}

fn write_report(out: &mut impl Write, report: &ConstructionReport) -> io::Result<()> {
    writeln!(out, "Construction Type: {}", report.kind)?;
    writeln!(out, "Area: {} sq. m", report.area_m2)?;
    writeln!(out, "Number of Rooms: {}", report.room_count)?;
    for room in &report.rooms {
        writeln!(out, "Type: {}", room.kind)?;
        writeln!(out, "Area: {} sq. m", room.area_m2)?;
        writeln!(out, "Windows: {}", room.windows)?;
        writeln!(out, "Doors: {}", room.doors)?;
        writeln!(out, "Room Cost: ${}", room.cost_usd)?;
    }
    writeln!(out, "Total Room Cost: ${}", report.total_room_cost_usd)?;

    match &report.details {
        ConstructionDetails::House(house) => {
            writeln!(out, "House Color Scheme: {}", house.color_scheme)?;
            writeln!(out, "Number of Floors: {}", house.num_floors)?;
            writeln!(out, "Garage Size: {} cars", house.garage_size_cars)?;
            writeln!(out, "Has Balcony: {}", if house.has_balcony { "Yes" } else { "No" })?;
        }
        ConstructionDetails::Building(building) => {
            writeln!(out, "Building Color Scheme: {}", building.color_scheme)?;
            writeln!(out, "Number of Floors: {}", building.num_floors)?;
        }
    }

    writeln!(out, "Estimated Labor Cost: ${}", report.labor_usd)?;
    match report.kind {
        ConstructionKind::House => {
            writeln!(out, "Estimated Time Required: {} days", report.time_days)?;
            writeln!(out, "Estimated Cost: ${}", report.total_cost_usd)?;
        }
        ConstructionKind::Building => {
            writeln!(out, "Total Cost: ${}", report.total_cost_usd)?;
            writeln!(out, "Estimated Time Required: {} days", report.time_days)?;
        }
    }
    Ok(())
}
