//! G-code rendering of a motion stream, applied at the device boundary.
//!
//! Arc convention: an instruction with `clockwise = true` has a positive
//! sweep, which turns counter-clockwise in the y-up device frame and is
//! written as `G03`. When `mirror_x` is set, x and `I` are negated and the
//! rotation is reversed, so the same instruction is written as `G02`. The
//! written program therefore traces the compiled geometry (mirrored, if
//! requested) exactly.
use crate::error::{CompileError, Result};

use super::MotionInstruction;

/// Length unit selected in the program preamble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    #[default]
    Millimeters,
    Inches,
}

impl Units {
    fn code(self) -> &'static str {
        match self {
            Self::Millimeters => "G21",
            Self::Inches => "G20",
        }
    }
}

/// Parameters for G-code output.
#[derive(Debug, Clone, PartialEq)]
pub struct GcodeConfig {
    /// Negate x (and `I`) for controllers whose horizontal axis is flipped.
    pub mirror_x: bool,
    /// Feed rate written in the preamble, if any.
    pub feed_rate: Option<f64>,
    pub units: Units,
    /// Digits after the decimal point.
    pub precision: usize,
    pub pen_down: String,
    pub pen_up: String,
}

impl Default for GcodeConfig {
    fn default() -> Self {
        Self {
            mirror_x: true,
            feed_rate: None,
            units: Units::Millimeters,
            precision: 4,
            pen_down: "S1000 M3".to_owned(),
            pen_up: "S0 M5".to_owned(),
        }
    }
}

/// Renders [`MotionInstruction`]s as G-code lines.
#[derive(Debug, Clone)]
pub struct GcodeWriter {
    config: GcodeConfig,
}

impl GcodeWriter {
    /// Creates a new writer.
    ///
    /// # Errors
    ///
    /// Returns `CompileError::InvalidInput` if the feed rate is not a positive
    /// finite number or the precision exceeds 12 digits.
    pub fn new(config: GcodeConfig) -> Result<Self> {
        if let Some(feed) = config.feed_rate {
            if !feed.is_finite() || feed <= 0.0 {
                return Err(CompileError::InvalidInput(format!(
                    "feed rate must be positive, got {feed}"
                ))
                .into());
            }
        }
        if config.precision > 12 {
            return Err(CompileError::InvalidInput(
                "precision must be at most 12 digits".to_owned(),
            )
            .into());
        }
        Ok(Self { config })
    }

    /// Returns the writer configuration.
    #[must_use]
    pub fn config(&self) -> &GcodeConfig {
        &self.config
    }

    /// Lines that set units and, if configured, the feed rate.
    #[must_use]
    pub fn preamble(&self) -> Vec<String> {
        let mut lines = vec![self.config.units.code().to_owned()];
        if let Some(feed) = self.config.feed_rate {
            lines.push(format!("F{}", self.number(feed)));
        }
        lines
    }

    /// Renders one instruction, with the pen down.
    #[must_use]
    pub fn instruction(&self, instruction: &MotionInstruction) -> String {
        self.render(instruction, false)
    }

    /// Renders a whole program: preamble followed by one line per instruction.
    ///
    /// The pen starts lowered. Linear moves made while it is lifted are
    /// written as rapid `G00` travel.
    #[must_use]
    pub fn program(&self, instructions: &[MotionInstruction]) -> String {
        let mut out = String::new();
        for line in self.preamble() {
            out.push_str(&line);
            out.push('\n');
        }
        let mut lifted = false;
        for instruction in instructions {
            out.push_str(&self.render(instruction, lifted));
            out.push('\n');
            match instruction {
                MotionInstruction::PenUp => lifted = true,
                MotionInstruction::PenDown => lifted = false,
                _ => {}
            }
        }
        out
    }

    fn render(&self, instruction: &MotionInstruction, lifted: bool) -> String {
        let sx = if self.config.mirror_x { -1.0 } else { 1.0 };
        match *instruction {
            MotionInstruction::PenUp => self.config.pen_up.clone(),
            MotionInstruction::PenDown => self.config.pen_down.clone(),
            MotionInstruction::LinearMove { x, y } => {
                let code = if lifted { "G00" } else { "G01" };
                format!("{code} X{} Y{}", self.number(sx * x), self.number(y))
            }
            MotionInstruction::ArcMove { x, y, i, j, clockwise } => {
                let code = if clockwise != self.config.mirror_x { "G03" } else { "G02" };
                format!(
                    "{code} X{} Y{} I{} J{}",
                    self.number(sx * x),
                    self.number(y),
                    self.number(sx * i),
                    self.number(j)
                )
            }
        }
    }

    /// Fixed precision with trailing zeros trimmed; never prints `-0`.
    fn number(&self, value: f64) -> String {
        let mut s = format!("{value:.prec$}", prec = self.config.precision);
        if s.contains('.') {
            let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
            s.truncate(trimmed);
        }
        if s == "-0" {
            s = "0".to_owned();
        }
        s
    }
}
