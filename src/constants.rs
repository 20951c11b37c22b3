//! Physical constants for snow settling.
//!
//! The viscosity closure follows Vionnet et al. (2012), with the
//! coefficients used by the snowpack model this crate was built for.
//!
//! # Units
//!
//! - Temperature: K
//! - Density: kg/m³
//! - Viscosity: Pa·s
//! - Gravitational acceleration: m/s²

/// Density of ice (kg/m³).
pub const RHO_ICE: f64 = 917.0;

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f64 = 9.81;

/// Melting temperature of ice (K).
pub const T_FUSION: f64 = 273.0;

/// Temperature coefficient of the viscosity closure (1/K).
pub const A_ETA: f64 = 0.1;

/// Density coefficient of the viscosity closure (m³/kg).
pub const B_ETA: f64 = 0.023;

/// Density scaling of the viscosity closure (kg/m³).
pub const C_ETA: f64 = 250.0;

/// Reference viscosity (Pa·s).
pub const ETA_0: f64 = 7.62237e6;

/// Immutable set of physical parameters used by every field computation.
///
/// Passed by reference so tests and sensitivity studies can swap in
/// alternate parameter sets without touching global state.
///
/// # Example
///
/// ```
/// use snow_settling::PhysicalConstants;
///
/// let constants = PhysicalConstants::default();
/// assert_eq!(constants.rho_i, 917.0);
///
/// // Lunar settling study
/// let moon = PhysicalConstants::default().with_gravity(1.62);
/// assert_eq!(moon.g, 1.62);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicalConstants {
    /// Temperature coefficient a_eta (1/K)
    pub a_eta: f64,
    /// Density coefficient b_eta (m³/kg)
    pub b_eta: f64,
    /// Reference viscosity eta_0 (Pa·s)
    pub eta_0: f64,
    /// Density scaling c_eta (kg/m³)
    pub c_eta: f64,
    /// Melting temperature T_fus (K)
    pub t_fus: f64,
    /// Gravitational acceleration g (m/s²)
    pub g: f64,
    /// Ice density rho_i (kg/m³)
    pub rho_i: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicalConstants {
    /// Create the standard snowpack parameter set.
    pub const fn new() -> Self {
        Self {
            a_eta: A_ETA,
            b_eta: B_ETA,
            eta_0: ETA_0,
            c_eta: C_ETA,
            t_fus: T_FUSION,
            g: GRAVITY,
            rho_i: RHO_ICE,
        }
    }

    /// Override gravitational acceleration.
    pub fn with_gravity(mut self, g: f64) -> Self {
        self.g = g;
        self
    }

    /// Override ice density.
    pub fn with_ice_density(mut self, rho_i: f64) -> Self {
        self.rho_i = rho_i;
        self
    }

    /// Override the melting temperature.
    pub fn with_fusion_temperature(mut self, t_fus: f64) -> Self {
        self.t_fus = t_fus;
        self
    }

    /// Override the viscosity closure coefficients.
    pub fn with_viscosity_coefficients(mut self, eta_0: f64, a_eta: f64, b_eta: f64, c_eta: f64) -> Self {
        self.eta_0 = eta_0;
        self.a_eta = a_eta;
        self.b_eta = b_eta;
        self.c_eta = c_eta;
        self
    }

    /// Weight of an ice layer per unit area (Pa) for a given ice fraction and thickness.
    #[inline]
    pub fn overburden_increment(&self, phi: f64, thickness: f64) -> f64 {
        self.g * phi * self.rho_i * thickness
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let c = PhysicalConstants::default();
        assert_eq!(c.a_eta, A_ETA);
        assert_eq!(c.b_eta, B_ETA);
        assert_eq!(c.eta_0, ETA_0);
        assert_eq!(c.c_eta, C_ETA);
        assert_eq!(c.t_fus, T_FUSION);
        assert_eq!(c.g, GRAVITY);
        assert_eq!(c.rho_i, RHO_ICE);
    }

    #[test]
    fn test_overrides_leave_other_fields() {
        let c = PhysicalConstants::new().with_gravity(1.0).with_ice_density(900.0);
        assert_eq!(c.g, 1.0);
        assert_eq!(c.rho_i, 900.0);
        assert_eq!(c.t_fus, T_FUSION);
    }

    #[test]
    fn test_overburden_increment() {
        let c = PhysicalConstants::new().with_gravity(10.0).with_ice_density(1000.0);
        // 0.5 m of half-ice: 10 * 0.5 * 1000 * 0.5
        assert!((c.overburden_increment(0.5, 0.5) - 2500.0).abs() < 1e-12);
    }
}
