//! Snow viscosity closures.
//!
//! All variants share the Arrhenius-type law of Vionnet et al. (2012):
//!
//! ```text
//! η(T, φ) = η₀ ρᵢ φ / c_η · exp(a_η (T_fus - T) + b_η ρᵢ φ)
//! ```
//!
//! They differ in which of temperature and ice fraction are taken from the
//! actual fields and which are frozen at reference values.
//!
//! | Variant        | T used     | φ used      | Restriction |
//! |----------------|------------|-------------|-------------|
//! | `eta_constant` | `T_CONST`  | `PHI_CONST` | yes         |
//! | `eta_phi`      | `T_CONST`  | φ           | no          |
//! | `eta_T`        | T          | `PHI_CONST` | no          |
//! | `eta_phiT`     | T          | φ           | no          |
//!
//! # References
//!
//! - Vionnet, V. et al. (2012): The detailed snowpack scheme Crocus and its
//!   implementation in SURFEX v7.2. Geosci. Model Dev., 5, 773-791.

use std::fmt;
use std::str::FromStr;

use crate::constants::PhysicalConstants;
use crate::error::{Result, SettlingError};

/// Reference temperature for the frozen-temperature variants (K).
pub const T_CONST: f64 = 263.0;

/// Reference ice volume fraction for the frozen-fraction variants (-).
pub const PHI_CONST: f64 = 0.1125;

/// Selector for the viscosity closure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViscosityModel {
    /// Reference T and φ, with a growth restriction as φ approaches 1.
    #[default]
    EtaConstant,
    /// Actual φ, reference T.
    EtaPhi,
    /// Actual T, reference φ.
    EtaT,
    /// Actual T and φ.
    EtaPhiT,
}

impl ViscosityModel {
    /// Option string as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EtaConstant => "eta_constant",
            Self::EtaPhi => "eta_phi",
            Self::EtaT => "eta_T",
            Self::EtaPhiT => "eta_phiT",
        }
    }
}

impl fmt::Display for ViscosityModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViscosityModel {
    type Err = SettlingError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "eta_constant" => Ok(Self::EtaConstant),
            "eta_phi" => Ok(Self::EtaPhi),
            "eta_T" => Ok(Self::EtaT),
            "eta_phiT" => Ok(Self::EtaPhiT),
            other => Err(SettlingError::invalid_option("viscosity", other)),
        }
    }
}

/// Viscosity at a single (T, φ) point, without restriction.
#[inline]
pub fn viscosity_point(temperature: f64, phi: f64, constants: &PhysicalConstants) -> f64 {
    let c = constants;
    c.eta_0 * c.rho_i * phi / c.c_eta
        * (c.a_eta * (c.t_fus - temperature) + c.b_eta * c.rho_i * phi).exp()
}

/// Restriction multiplier that stops ice fraction from growing past ~0.95.
///
/// Stays at 1 for ordinary snow and grows steeply once `690 φ` exceeds 650.
#[inline]
pub fn growth_restriction(phi: f64) -> f64 {
    (690.0 * phi - 650.0).exp() + 1.0
}

/// Compute the snow viscosity field.
///
/// # Arguments
/// * `temperature` - Temperature at each node (K)
/// * `phi` - Ice volume fraction at each node (-)
/// * `model` - Which closure to apply
/// * `constants` - Physical parameters
///
/// # Errors
/// - `DimensionMismatch` if `temperature` and `phi` differ in length
///
/// # Example
/// ```
/// use snow_settling::{PhysicalConstants, ViscosityModel, choose_viscosity};
///
/// let constants = PhysicalConstants::default();
/// let eta = choose_viscosity(
///     &[260.0, 265.0],
///     &[0.2, 0.3],
///     ViscosityModel::EtaPhiT,
///     &constants,
/// )
/// .unwrap();
/// assert!(eta.iter().all(|&e| e > 0.0));
/// ```
pub fn choose_viscosity(
    temperature: &[f64],
    phi: &[f64],
    model: ViscosityModel,
    constants: &PhysicalConstants,
) -> Result<Vec<f64>> {
    if phi.len() != temperature.len() {
        return Err(SettlingError::dimension_mismatch(
            "phi",
            temperature.len(),
            phi.len(),
        ));
    }

    let points = temperature.iter().zip(phi);
    let eta: Vec<f64> = match model {
        ViscosityModel::EtaConstant => {
            let eta_ref = viscosity_point(T_CONST, PHI_CONST, constants);
            points.map(|(_, &p)| eta_ref * growth_restriction(p)).collect()
        }
        ViscosityModel::EtaPhi => points
            .map(|(_, &p)| viscosity_point(T_CONST, p, constants))
            .collect(),
        ViscosityModel::EtaT => points
            .map(|(&t, _)| viscosity_point(t, PHI_CONST, constants))
            .collect(),
        ViscosityModel::EtaPhiT => points
            .map(|(&t, &p)| viscosity_point(t, p, constants))
            .collect(),
    };

    tracing::trace!(%model, nz = eta.len(), "computed viscosity");
    Ok(eta)
}
