//! Settling velocity from a viscous deformation law.
//!
//! The local strain rate follows a Glen-type law,
//!
//! ```text
//! D_i = -(1/η_i) · σ_i · (n/2)
//! ```
//!
//! and the velocity is its integral from the base upward. The base node does
//! not move, so its rate is dropped from the integral but kept in the strain
//! rate returned to the caller, where it drives ice growth at the lowest node.

use crate::error::{Result, SettlingError};

/// Velocity and its vertical derivative at every node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VelocityProfile {
    /// Settling velocity (m/s), negative downward
    pub v: Vec<f64>,
    /// Vertical derivative of the velocity, i.e. the unclamped strain rate (1/s)
    pub v_dz: Vec<f64>,
}

impl VelocityProfile {
    /// All-zero profile with `nz` nodes.
    pub fn zeros(nz: usize) -> Self {
        Self {
            v: vec![0.0; nz],
            v_dz: vec![0.0; nz],
        }
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.v.len()
    }

    /// True if the profile has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.v.is_empty()
    }
}

/// Integrate per-segment rates upward from a base velocity of zero.
///
/// Returns `v` with `v[0] = 0` and `v[k + 1] = Σ_{i<=k} rate[i] · dz[i]`,
/// one node longer than `dz`.
pub(crate) fn integrate_upward(rate: &[f64], dz: &[f64]) -> Vec<f64> {
    debug_assert_eq!(rate.len(), dz.len());

    let mut v = Vec::with_capacity(dz.len() + 1);
    v.push(0.0);
    let mut acc = 0.0;
    for (&r, &d) in rate.iter().zip(dz) {
        acc += r * d;
        v.push(acc);
    }
    v
}

/// Compute settling velocity and strain rate from stress and viscosity.
///
/// # Arguments
/// * `sigma` - Vertical stress (Pa), length `nz`
/// * `eta` - Viscosity (Pa·s), length `nz`, assumed strictly positive
/// * `dz` - Node distances (m), length `nz - 1`
/// * `nz` - Number of computational nodes
/// * `n` - Deformation exponent; the law scales linearly by `n/2`
///
/// # Errors
/// - `InvalidGrid` if `nz` is zero
/// - `DimensionMismatch` if any field does not fit `nz`
///
/// # Example
/// ```
/// use snow_settling::velocity;
///
/// let profile = velocity(&[2.0, 1.0, 0.0], &[1.0, 1.0, 1.0], &[0.5, 0.5], 3, 2.0).unwrap();
/// assert_eq!(profile.v[0], 0.0);
/// assert_eq!(profile.v_dz[0], -2.0); // base strain rate is kept
/// assert_eq!(profile.v[1], -0.5);
/// ```
pub fn velocity(sigma: &[f64], eta: &[f64], dz: &[f64], nz: usize, n: f64) -> Result<VelocityProfile> {
    if nz == 0 {
        return Err(SettlingError::InvalidGrid(
            "Velocity needs at least 1 computational node".to_string(),
        ));
    }
    if sigma.len() != nz {
        return Err(SettlingError::dimension_mismatch("sigma", nz, sigma.len()));
    }
    if eta.len() != nz {
        return Err(SettlingError::dimension_mismatch("eta", nz, eta.len()));
    }
    if dz.len() != nz - 1 {
        return Err(SettlingError::dimension_mismatch("dz", nz - 1, dz.len()));
    }
    if eta.iter().any(|&e| e.is_nan() || e <= 0.0) {
        tracing::warn!("non-positive viscosity, settling velocity is not physical");
    }

    // NOTE: the stress enters linearly scaled by n/2, not raised to that power.
    let strain_rate: Vec<f64> = sigma
        .iter()
        .zip(eta)
        .map(|(&s, &e)| -1.0 / e * s * (n / 2.0))
        .collect();

    let mut base_fixed_rate = strain_rate.clone();
    base_fixed_rate[0] = 0.0;

    let v = integrate_upward(&base_fixed_rate[1..], dz);

    Ok(VelocityProfile {
        v,
        v_dz: strain_rate,
    })
}
