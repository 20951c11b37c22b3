//! Settling model selection and parameters.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SettlingError};
use crate::rheology::ViscosityModel;

/// Default deformation rate coefficient for the prescribed-rate models (1/s).
///
/// Observed snow deformation rates span roughly 1e-3 to 1e-6 1/s.
pub const DEFAULT_DEFORMATION_RATE: f64 = 1e-5;

/// Default deformation exponent of the viscous law.
pub const DEFAULT_GLEN_EXPONENT: f64 = 2.0;

/// Whether settling is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SettlingMode {
    /// Settling computed (`'Y'`).
    #[default]
    Enabled,
    /// Settling switched off, all fields zero (`'N'`).
    Disabled,
}

impl fmt::Display for SettlingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled => f.write_str("Y"),
            Self::Disabled => f.write_str("N"),
        }
    }
}

impl FromStr for SettlingMode {
    type Err = SettlingError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Y" => Ok(Self::Enabled),
            "N" => Ok(Self::Disabled),
            other => Err(SettlingError::invalid_option("SetVel", other)),
        }
    }
}

/// How the settling velocity is obtained.
///
/// | Model           | Stress | Viscosity | Velocity                          |
/// |-----------------|--------|-----------|-----------------------------------|
/// | `continuous`    | yes    | yes       | integrated viscous strain rate    |
/// | `crocus`        | yes    | yes       | same, 3-node two-layer stress     |
/// | `polynom`       | no     | no        | `-D · z`                          |
/// | `const`         | no     | no        | `-D`                              |
/// | `phi_dependent` | no     | no        | integrated `-D · (1 - φ/φ_max)`   |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VelocityModel {
    /// Viscous settling with continuous overburden integration.
    #[default]
    Continuous,
    /// Viscous settling of a two-layer pack on exactly three nodes.
    Crocus,
    /// Constant strain rate, velocity linear in height.
    Polynom,
    /// Constant velocity.
    Const,
    /// Strain rate reduced as ice fraction nears a height-dependent ceiling.
    PhiDependent,
}

impl VelocityModel {
    /// Option string as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Continuous => "continuous",
            Self::Crocus => "crocus",
            Self::Polynom => "polynom",
            Self::Const => "const",
            Self::PhiDependent => "phi_dependent",
        }
    }

    /// True if the model integrates stress and viscosity.
    pub fn is_viscous(self) -> bool {
        matches!(self, Self::Continuous | Self::Crocus)
    }
}

impl fmt::Display for VelocityModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VelocityModel {
    type Err = SettlingError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "continuous" => Ok(Self::Continuous),
            "crocus" => Ok(Self::Crocus),
            "polynom" => Ok(Self::Polynom),
            "const" => Ok(Self::Const),
            "phi_dependent" => Ok(Self::PhiDependent),
            other => Err(SettlingError::invalid_option("v_opt", other)),
        }
    }
}

/// Configuration for [`settling_vel`](super::settling_vel).
///
/// # Example
///
/// ```
/// use snow_settling::{SettlingConfig, VelocityModel, ViscosityModel};
///
/// let config = SettlingConfig::from_options("Y", "crocus", "eta_phi").unwrap();
/// assert_eq!(config.velocity_model, VelocityModel::Crocus);
///
/// let config = SettlingConfig::new(VelocityModel::Continuous, ViscosityModel::EtaPhiT)
///     .with_glen_exponent(3.0)
///     .with_plot(true);
/// assert!(config.plot);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SettlingConfig {
    /// Settling on or off
    pub settling: SettlingMode,
    /// Velocity model
    pub velocity_model: VelocityModel,
    /// Viscosity closure, used by the viscous models
    pub viscosity_model: ViscosityModel,
    /// Deformation rate coefficient D for the prescribed-rate models (1/s)
    pub deformation_rate: f64,
    /// Deformation exponent n of the viscous law
    pub glen_exponent: f64,
    /// Send the velocity profile to the diagnostic sink
    pub plot: bool,
}

impl Default for SettlingConfig {
    fn default() -> Self {
        Self::new(VelocityModel::default(), ViscosityModel::default())
    }
}

impl SettlingConfig {
    /// Create an enabled configuration with default parameters.
    pub fn new(velocity_model: VelocityModel, viscosity_model: ViscosityModel) -> Self {
        Self {
            settling: SettlingMode::Enabled,
            velocity_model,
            viscosity_model,
            deformation_rate: DEFAULT_DEFORMATION_RATE,
            glen_exponent: DEFAULT_GLEN_EXPONENT,
            plot: false,
        }
    }

    /// Configuration with settling switched off.
    pub fn disabled() -> Self {
        Self::default().with_settling(SettlingMode::Disabled)
    }

    /// Parse the three option strings (`SetVel`, `v_opt`, `viscosity`).
    ///
    /// Selectors are only read when they matter: with `SetVel = "N"` the
    /// other two are ignored, and `viscosity` is only read for the viscous
    /// models. Ignored selectors keep their defaults.
    ///
    /// # Errors
    /// - `InvalidOption` naming the first selector in use that is not recognised
    pub fn from_options(set_vel: &str, v_opt: &str, viscosity: &str) -> Result<Self> {
        let settling: SettlingMode = set_vel.parse()?;
        if settling == SettlingMode::Disabled {
            return Ok(Self::disabled());
        }

        let velocity_model: VelocityModel = v_opt.parse()?;
        let viscosity_model = if velocity_model.is_viscous() {
            viscosity.parse()?
        } else {
            ViscosityModel::default()
        };
        Ok(Self::new(velocity_model, viscosity_model))
    }

    /// Set settling on or off.
    pub fn with_settling(mut self, settling: SettlingMode) -> Self {
        self.settling = settling;
        self
    }

    /// Set the deformation rate coefficient.
    pub fn with_deformation_rate(mut self, deformation_rate: f64) -> Self {
        self.deformation_rate = deformation_rate;
        self
    }

    /// Set the deformation exponent.
    pub fn with_glen_exponent(mut self, n: f64) -> Self {
        self.glen_exponent = n;
        self
    }

    /// Enable or disable the diagnostic profile output.
    pub fn with_plot(mut self, plot: bool) -> Self {
        self.plot = plot;
        self
    }
}
