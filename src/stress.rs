//! Overburden stress integration.
//!
//! Each node below the surface carries the weight of the ice between it and
//! the next node up:
//!
//! ```text
//! Δσ_i = g φ_i ρᵢ Δz_i,   i = 0 .. nz-2
//! ```
//!
//! The two schemes differ in how the top increment is treated and in how
//! the increments are accumulated into nodal stress.

use std::fmt;

use crate::constants::PhysicalConstants;
use crate::error::{Result, SettlingError};
use crate::settling::VelocityModel;

/// Discretization used to turn stress increments into nodal stress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StressScheme {
    /// Reverse cumulative sum from the surface down, with no mass above the top node.
    Continuous,
    /// Lumped two-layer model on three nodes (bottom, interface, top).
    Crocus,
}

impl fmt::Display for StressScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continuous => f.write_str("continuous"),
            Self::Crocus => f.write_str("crocus"),
        }
    }
}

impl TryFrom<VelocityModel> for StressScheme {
    type Error = SettlingError;

    fn try_from(model: VelocityModel) -> Result<Self> {
        match model {
            VelocityModel::Continuous => Ok(Self::Continuous),
            VelocityModel::Crocus => Ok(Self::Crocus),
            other => Err(SettlingError::invalid_option("v_opt", other.as_str())),
        }
    }
}

/// Compute the vertical stress at every node.
///
/// # Arguments
/// * `dz` - Node distances, length `nz - 1`
/// * `phi` - Ice volume fraction, length `nz`
/// * `nz` - Number of computational nodes
/// * `scheme` - Stress discretization
/// * `constants` - Physical parameters
///
/// # Errors
/// - `DimensionMismatch` if `phi` or `dz` do not fit `nz`
/// - `InvalidGrid` if the column has too few nodes for the scheme
/// - `Monotonicity` if the resulting profile is not monotonic
///
/// # Example
/// ```
/// use snow_settling::{PhysicalConstants, StressScheme, sigma_cont_croc};
///
/// let constants = PhysicalConstants::default();
/// let sigma = sigma_cont_croc(
///     &[0.1, 0.1, 0.1],
///     &[0.4, 0.3, 0.2, 0.1],
///     4,
///     StressScheme::Continuous,
///     &constants,
/// )
/// .unwrap();
/// assert_eq!(sigma[3], 0.0);
/// assert!(sigma[0] > sigma[1] && sigma[1] > sigma[2]);
/// ```
pub fn sigma_cont_croc(
    dz: &[f64],
    phi: &[f64],
    nz: usize,
    scheme: StressScheme,
    constants: &PhysicalConstants,
) -> Result<Vec<f64>> {
    if phi.len() != nz {
        return Err(SettlingError::dimension_mismatch("phi", nz, phi.len()));
    }
    let min_nodes = match scheme {
        StressScheme::Continuous => 1,
        StressScheme::Crocus => 2,
    };
    if nz < min_nodes {
        return Err(SettlingError::InvalidGrid(format!(
            "{} stress needs at least {} computational nodes, got {}",
            scheme, min_nodes, nz
        )));
    }
    if dz.len() != nz - 1 {
        return Err(SettlingError::dimension_mismatch("dz", nz - 1, dz.len()));
    }

    let mut sigma_dz = vec![0.0; nz];
    for (i, (&p, &d)) in phi.iter().zip(dz).enumerate() {
        sigma_dz[i] = constants.overburden_increment(p, d);
    }

    let sigma = match scheme {
        StressScheme::Crocus => {
            let top = nz - 1;
            sigma_dz[top] = sigma_dz[1] / 2.0;

            let mut sigma = vec![0.0; nz];
            sigma[0] = sigma_dz.iter().sum();
            sigma[1] = sigma_dz[1..].iter().sum();
            sigma[top] = sigma_dz[top];
            sigma
        }
        StressScheme::Continuous => {
            sigma_dz[nz - 1] = 0.0;

            let mut sigma = vec![0.0; nz];
            let mut acc = 0.0;
            for i in (0..nz).rev() {
                acc += sigma_dz[i];
                sigma[i] = acc;
            }
            sigma
        }
    };

    check_monotonic(&sigma)?;

    tracing::trace!(%scheme, nz, bottom = sigma[0], "integrated overburden stress");
    Ok(sigma)
}

/// Check that a profile is entirely non-increasing or entirely non-decreasing.
///
/// # Errors
/// - `Monotonicity` otherwise, including when any difference is NaN
pub fn check_monotonic(sigma: &[f64]) -> Result<()> {
    let non_increasing = sigma.windows(2).all(|w| w[1] - w[0] <= 0.0);
    let non_decreasing = sigma.windows(2).all(|w| w[1] - w[0] >= 0.0);

    if non_increasing || non_decreasing {
        Ok(())
    } else {
        Err(SettlingError::Monotonicity(
            "Pressure is not monotonically increasing".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    /// Unit constants so increments are simply φ·Δz.
    fn unit_constants() -> PhysicalConstants {
        PhysicalConstants::default()
            .with_gravity(1.0)
            .with_ice_density(1.0)
    }

    #[test]
    fn test_continuous_reverse_cumsum() {
        let c = unit_constants();
        let sigma = sigma_cont_croc(
            &[1.0, 2.0, 1.0],
            &[0.4, 0.3, 0.2, 0.9],
            4,
            StressScheme::Continuous,
            &c,
        )
        .unwrap();

        // Increments: 0.4, 0.6, 0.2, 0 (top phi ignored)
        assert!((sigma[0] - 1.2).abs() < TOL);
        assert!((sigma[1] - 0.8).abs() < TOL);
        assert!((sigma[2] - 0.2).abs() < TOL);
        assert_eq!(sigma[3], 0.0);
    }

    #[test]
    fn test_continuous_single_node() {
        let c = PhysicalConstants::default();
        let sigma = sigma_cont_croc(&[], &[0.3], 1, StressScheme::Continuous, &c).unwrap();
        assert_eq!(sigma, vec![0.0]);
    }

    #[test]
    fn test_crocus_lumped_layers() {
        let c = unit_constants();
        let sigma =
            sigma_cont_croc(&[0.5, 0.5], &[0.3, 0.2, 0.1], 3, StressScheme::Crocus, &c).unwrap();

        // Increments: 0.15, 0.10, top = 0.05
        assert!((sigma[0] - 0.30).abs() < TOL);
        assert!((sigma[1] - 0.15).abs() < TOL);
        assert!((sigma[2] - 0.05).abs() < TOL);
    }

    #[test]
    fn test_crocus_needs_two_nodes() {
        let c = PhysicalConstants::default();
        let result = sigma_cont_croc(&[], &[0.3], 1, StressScheme::Crocus, &c);
        assert!(matches!(result, Err(SettlingError::InvalidGrid(_))));
    }

    #[test]
    fn test_stress_scales_with_gravity() {
        let dz = [0.2, 0.2];
        let phi = [0.3, 0.3, 0.3];
        let earth = PhysicalConstants::default();
        let moon = PhysicalConstants::default().with_gravity(earth.g / 6.0);

        let s_earth = sigma_cont_croc(&dz, &phi, 3, StressScheme::Continuous, &earth).unwrap();
        let s_moon = sigma_cont_croc(&dz, &phi, 3, StressScheme::Continuous, &moon).unwrap();

        assert!((s_earth[0] / s_moon[0] - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_phi_breaks_monotonicity() {
        let c = unit_constants();
        let result = sigma_cont_croc(
            &[1.0, 1.0, 1.0],
            &[0.3, -0.5, 0.3, 0.2],
            4,
            StressScheme::Continuous,
            &c,
        );
        match result {
            Err(SettlingError::Monotonicity(msg)) => {
                assert_eq!(msg, "Pressure is not monotonically increasing");
            }
            other => panic!("expected monotonicity error, got {:?}", other),
        }
    }

    #[test]
    fn test_check_monotonic() {
        assert!(check_monotonic(&[]).is_ok());
        assert!(check_monotonic(&[1.0]).is_ok());
        assert!(check_monotonic(&[3.0, 2.0, 2.0, 0.0]).is_ok());
        assert!(check_monotonic(&[0.0, 1.0, 1.0, 5.0]).is_ok());
        assert!(check_monotonic(&[1.0, 1.0, 1.0]).is_ok());
        assert!(check_monotonic(&[1.0, 2.0, 1.0]).is_err());
        assert!(check_monotonic(&[1.0, f64::NAN, 0.0]).is_err());
    }

    #[test]
    fn test_dimension_checks() {
        let c = PhysicalConstants::default();
        assert!(matches!(
            sigma_cont_croc(&[0.1], &[0.1, 0.1, 0.1], 3, StressScheme::Continuous, &c),
            Err(SettlingError::DimensionMismatch { field: "dz", .. })
        ));
        assert!(matches!(
            sigma_cont_croc(&[0.1, 0.1], &[0.1, 0.1], 3, StressScheme::Continuous, &c),
            Err(SettlingError::DimensionMismatch { field: "phi", .. })
        ));
        assert!(matches!(
            sigma_cont_croc(&[], &[], 0, StressScheme::Continuous, &c),
            Err(SettlingError::InvalidGrid(_))
        ));
    }

    #[test]
    fn test_scheme_from_velocity_model() {
        assert_eq!(
            StressScheme::try_from(VelocityModel::Continuous).unwrap(),
            StressScheme::Continuous
        );
        assert_eq!(
            StressScheme::try_from(VelocityModel::Crocus).unwrap(),
            StressScheme::Crocus
        );
        assert!(matches!(
            StressScheme::try_from(VelocityModel::Polynom),
            Err(SettlingError::InvalidOption { option: "v_opt", .. })
        ));
    }
}
