//! Student session: validated inputs, derived plant, true design and the
//! latest simulation.

use log::info;
use rootlocus_types::{
    GainSet, GradeRecord, Reference, SimulationResult, SimulationSettings,
};
use thiserror::Error;

use crate::config::AppConfig;
use crate::design::{DesignError, GainDesign, GainSolver, PlantModel};
use crate::scoring::{RecordStore, ScoringClient};
use crate::simulation::{ResponseSimulator, SimulationError};
use crate::utils::constants::MIN_IDENTIFIER_LEN;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("identifier must be at least 10 digits, got {0:?}")]
    InvalidIdentifier(String),

    #[error("{field} must be a non-negative decimal number, got {value:?}")]
    NotANumber { field: &'static str, value: String },
}

/// Accepts identifiers of at least ten ASCII digits, ignoring surrounding
/// whitespace
pub fn validate_identifier(identifier: &str) -> Result<&str, InputError> {
    let identifier = identifier.trim();
    if identifier.len() >= MIN_IDENTIFIER_LEN && identifier.bytes().all(|b| b.is_ascii_digit()) {
        Ok(identifier)
    } else {
        Err(InputError::InvalidIdentifier(identifier.to_string()))
    }
}

/// Parses digits with at most one decimal point, e.g. `12`, `0.5`, `.5`, `3.`
pub fn parse_decimal(field: &'static str, text: &str) -> Result<f64, InputError> {
    let text = text.trim();
    let invalid = || InputError::NotANumber {
        field,
        value: text.to_string(),
    };

    let digits = text.bytes().filter(u8::is_ascii_digit).count();
    let points = text.bytes().filter(|&b| b == b'.').count();
    if digits == 0 || points > 1 || digits + points != text.len() {
        return Err(invalid());
    }
    text.parse().map_err(|_| invalid())
}

/// Result of logging in with an identifier
#[derive(Debug)]
pub enum LoginOutcome {
    /// The admin key: grading mode
    Admin,
    Student(Box<Session>),
}

pub fn login(config: &AppConfig, identifier: &str) -> crate::Result<LoginOutcome> {
    if config.is_admin(identifier.trim()) {
        info!("admin login");
        return Ok(LoginOutcome::Admin);
    }
    let session = Session::new(
        identifier,
        GainSolver::new(config.zero_convention),
        config.simulation.clone(),
    )?;
    Ok(LoginOutcome::Student(Box::new(session)))
}

#[derive(Debug, Clone)]
pub struct Session {
    identifier: String,
    model: PlantModel,
    design: Result<GainDesign, DesignError>,
    gains: GainSet,
    reference: Reference,
    settings: SimulationSettings,
    last_result: Option<SimulationResult>,
}

impl Session {
    /// Validate `identifier`, derive the plant and solve for the true gains
    ///
    /// A plant whose design fails still opens a session; the failure is
    /// reported when the true gains are needed.
    pub fn new(
        identifier: &str,
        solver: GainSolver,
        settings: SimulationSettings,
    ) -> crate::Result<Self> {
        let identifier = validate_identifier(identifier)?;
        let model = PlantModel::from_identifier(identifier)?;
        let design = solver.solve(model.plant(), model.target());

        info!(
            "session {}: G(s) = {}, overshoot {}%, settling time {} s",
            identifier,
            model.plant(),
            model.target().overshoot_percent,
            model.target().settling_time
        );

        Ok(Self {
            identifier: identifier.to_string(),
            model,
            design,
            gains: GainSet::default(),
            reference: Reference::default(),
            settings,
            last_result: None,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn model(&self) -> &PlantModel {
        &self.model
    }

    pub fn gains(&self) -> GainSet {
        self.gains
    }

    pub fn reference(&self) -> Reference {
        self.reference
    }

    pub fn last_result(&self) -> Option<&SimulationResult> {
        self.last_result.as_ref()
    }

    pub fn true_design(&self) -> Result<&GainDesign, DesignError> {
        self.design.as_ref().map_err(Clone::clone)
    }

    /// Numerator and denominator as polynomial strings in s
    pub fn plant_description(&self) -> (String, String) {
        let plant = self.model.plant();
        (plant.numerator_string(), plant.denominator_string())
    }

    /// Replace the student gains; all three must parse or nothing changes
    pub fn set_gains(&mut self, kp: &str, ki: &str, kd: &str) -> Result<GainSet, InputError> {
        let gains = GainSet::new(
            parse_decimal("Kp", kp)?,
            parse_decimal("Ki", ki)?,
            parse_decimal("Kd", kd)?,
        );
        self.gains = gains;
        Ok(gains)
    }

    pub fn set_reference(&mut self, set_point: &str, step_time: &str) -> Result<Reference, InputError> {
        let reference = Reference::new(
            parse_decimal("set point", set_point)?,
            parse_decimal("step time", step_time)?,
        );
        self.reference = reference;
        Ok(reference)
    }

    /// Simulate with the current gains and reference, replacing the last result
    pub fn simulate(&mut self) -> Result<&SimulationResult, SimulationError> {
        let result = ResponseSimulator::new(self.model.plant().clone(), self.settings.clone())
            .with_gains(self.gains)
            .with_reference(self.reference)
            .run()?;
        Ok(self.last_result.insert(result))
    }

    /// Score the current gains against the true design
    pub fn submit<S: RecordStore>(&self, client: &ScoringClient<S>) -> crate::Result<GradeRecord> {
        let truth = self.true_design()?.gains;
        Ok(client.submit(&self.identifier, &self.gains, &truth)?)
    }
}
