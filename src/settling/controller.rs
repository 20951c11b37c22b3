//! Dispatch of the settling velocity models.

use crate::column::SnowColumn;
use crate::constants::PhysicalConstants;
use crate::error::{Result, SettlingError};
use crate::io::ProfileSink;
use crate::rheology::choose_viscosity;
use crate::stress::{StressScheme, sigma_cont_croc};
use crate::velocity::{VelocityProfile, integrate_upward, velocity};

use super::config::{SettlingConfig, SettlingMode, VelocityModel};

/// Ice fraction ceiling of the `phi_dependent` model at the base.
pub const PHI_MAX_BASE: f64 = 0.9;

/// Ice fraction ceiling of the `phi_dependent` model at the surface.
pub const PHI_MAX_TOP: f64 = 0.4;

/// Node count required by the `crocus` model.
pub const CROCUS_NODES: usize = 3;

/// Result of one settling computation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SettlingProfile {
    /// Settling velocity (m/s)
    pub v: Vec<f64>,
    /// Vertical derivative of the settling velocity (1/s)
    pub v_dz: Vec<f64>,
    /// Vertical stress (Pa); zero for models that do not integrate stress
    pub sigma: Vec<f64>,
}

impl SettlingProfile {
    /// All-zero profile with `nz` nodes.
    pub fn zeros(nz: usize) -> Self {
        Self {
            v: vec![0.0; nz],
            v_dz: vec![0.0; nz],
            sigma: vec![0.0; nz],
        }
    }

    fn from_velocity(velocity: VelocityProfile, sigma: Vec<f64>) -> Self {
        Self {
            v: velocity.v,
            v_dz: velocity.v_dz,
            sigma,
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

    /// Split into `(v, v_dz, sigma)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        (self.v, self.v_dz, self.sigma)
    }
}

/// Compute settling velocity, its vertical derivative and the vertical stress.
///
/// # Arguments
/// * `column` - Temperature, coordinates and ice fraction of the snowpack
/// * `config` - Model selection and parameters
/// * `constants` - Physical parameters
/// * `sink` - Receives `(coord, v)` when `config.plot` is set
///
/// # Errors
/// - `InvalidGrid` if `crocus` is used without exactly 3 nodes, or a model
///   needing node distances gets fewer than 2 or non-increasing coordinates
/// - `Monotonicity` if the stress profile is not monotonic
/// - `DimensionMismatch` if the column fields disagree in length
/// - any error returned by the sink
///
/// # Example
/// ```
/// use snow_settling::{
///     PhysicalConstants, SettlingConfig, SnowColumn, VelocityModel, ViscosityModel, settling_vel,
/// };
///
/// let coord = [0.0, 0.5, 1.0];
/// let column = SnowColumn::new(&[260.0, 261.0, 262.0], &coord, &[0.3, 0.25, 0.2]).unwrap();
/// let config = SettlingConfig::new(VelocityModel::Crocus, ViscosityModel::EtaPhi);
///
/// let profile = settling_vel(&column, &config, &PhysicalConstants::default(), None).unwrap();
/// assert_eq!(profile.v[0], 0.0);
/// assert!(profile.sigma[0] >= profile.sigma[1] && profile.sigma[1] >= profile.sigma[2]);
/// ```
pub fn settling_vel(
    column: &SnowColumn<'_>,
    config: &SettlingConfig,
    constants: &PhysicalConstants,
    sink: Option<&mut dyn ProfileSink>,
) -> Result<SettlingProfile> {
    let nz = column.nz();

    if config.settling == SettlingMode::Disabled {
        tracing::trace!(nz, "settling disabled");
        return Ok(SettlingProfile::zeros(nz));
    }

    tracing::debug!(
        model = %config.velocity_model,
        viscosity = %config.viscosity_model,
        nz,
        "computing settling velocity"
    );

    let d = config.deformation_rate;
    let profile = match config.velocity_model {
        VelocityModel::Continuous => viscous_settling(column, config, constants)?,
        VelocityModel::Crocus => {
            if nz != CROCUS_NODES {
                return Err(SettlingError::InvalidGrid(
                    "For crocus velocity only 3 computational nodes are allowed".to_string(),
                ));
            }
            viscous_settling(column, config, constants)?
        }
        VelocityModel::Polynom => {
            let d_rate = vec![-d; nz];
            let v = d_rate.iter().zip(column.coord).map(|(&r, &z)| r * z).collect();
            SettlingProfile {
                v,
                v_dz: d_rate,
                sigma: vec![0.0; nz],
            }
        }
        VelocityModel::Const => SettlingProfile {
            v: vec![-d; nz],
            v_dz: vec![0.0; nz],
            sigma: vec![0.0; nz],
        },
        VelocityModel::PhiDependent => SettlingProfile::from_velocity(
            phi_dependent_velocity(column, d)?,
            vec![0.0; nz],
        ),
    };

    if config.plot {
        match sink {
            Some(sink) => sink.record(column.coord, &profile.v)?,
            None => tracing::debug!("profile output requested but no sink given"),
        }
    }

    Ok(profile)
}

/// Same as [`settling_vel`], taking the model selectors as option strings.
///
/// With `set_vel = "N"` this returns `nz` zeros without reading any other
/// argument.
///
/// # Arguments
/// * `set_vel` - `"Y"` or `"N"`
/// * `v_opt` - `"continuous"`, `"crocus"`, `"polynom"`, `"const"` or `"phi_dependent"`
/// * `viscosity` - `"eta_constant"`, `"eta_phi"`, `"eta_T"` or `"eta_phiT"`
///
/// # Errors
/// - `InvalidOption` for an unknown selector
/// - `DimensionMismatch` if `nz` differs from the field lengths
/// - everything [`settling_vel`] returns
#[allow(clippy::too_many_arguments)]
pub fn settling_vel_from_options(
    temperature: &[f64],
    nz: usize,
    coord: &[f64],
    phi: &[f64],
    set_vel: &str,
    v_opt: &str,
    viscosity: &str,
    plot: bool,
    constants: &PhysicalConstants,
    sink: Option<&mut dyn ProfileSink>,
) -> Result<SettlingProfile> {
    let config = SettlingConfig::from_options(set_vel, v_opt, viscosity)?.with_plot(plot);
    if config.settling == SettlingMode::Disabled {
        return Ok(SettlingProfile::zeros(nz));
    }
    if coord.len() != nz {
        return Err(SettlingError::dimension_mismatch("coord", nz, coord.len()));
    }
    let column = SnowColumn::new(temperature, coord, phi)?;
    settling_vel(&column, &config, constants, sink)
}

/// Stress, viscosity and velocity pipeline shared by `continuous` and `crocus`.
fn viscous_settling(
    column: &SnowColumn<'_>,
    config: &SettlingConfig,
    constants: &PhysicalConstants,
) -> Result<SettlingProfile> {
    let nz = column.nz();
    let scheme = StressScheme::try_from(config.velocity_model)?;

    let dz = column.node_distance()?;
    let eta = choose_viscosity(column.temperature, column.phi, config.viscosity_model, constants)?;
    let sigma = sigma_cont_croc(&dz, column.phi, nz, scheme, constants)?;
    let profile = velocity(&sigma, &eta, &dz, nz, config.glen_exponent)?;

    Ok(SettlingProfile::from_velocity(profile, sigma))
}

/// Deformation rate reduced linearly as φ approaches a height-dependent ceiling.
///
/// The ceiling falls from [`PHI_MAX_BASE`] at z = 0 to [`PHI_MAX_TOP`] at the
/// top node.
fn phi_dependent_velocity(column: &SnowColumn<'_>, d: f64) -> Result<VelocityProfile> {
    let nz = column.nz();
    let dz = column.node_distance()?;
    let height = column.height();

    let strain_rate: Vec<f64> = column
        .coord
        .iter()
        .zip(column.phi)
        .map(|(&z, &p)| {
            let phi_max = (PHI_MAX_TOP - PHI_MAX_BASE) / height * z + PHI_MAX_BASE;
            let restrict = 1.0 - p / phi_max;
            -d * restrict
        })
        .collect();

    let mut base_fixed_rate = strain_rate.clone();
    base_fixed_rate[0] = 0.0;

    // Each segment uses the rate at its lower node.
    let v = integrate_upward(&base_fixed_rate[..nz - 1], &dz);

    Ok(VelocityProfile {
        v,
        v_dz: strain_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ProfileRecorder;
    use crate::rheology::ViscosityModel;

    const TOL: f64 = 1e-15;

    fn run(
        coord: &[f64],
        phi: &[f64],
        config: &SettlingConfig,
    ) -> Result<SettlingProfile> {
        let temperature = vec![263.0; coord.len()];
        let column = SnowColumn::new(&temperature, coord, phi)?;
        settling_vel(&column, config, &PhysicalConstants::default(), None)
    }

    #[test]
    fn test_disabled_returns_zeros() {
        for nz in [0, 1, 3, 10] {
            let coord: Vec<f64> = (0..nz).map(|i| i as f64).collect();
            let phi = vec![0.3; nz];
            let profile = run(&coord, &phi, &SettlingConfig::disabled()).unwrap();
            assert_eq!(profile, SettlingProfile::zeros(nz));
        }
    }

    #[test]
    fn test_crocus_rejects_other_node_counts() {
        let config = SettlingConfig::new(VelocityModel::Crocus, ViscosityModel::EtaPhi);
        for nz in [2, 4] {
            let coord: Vec<f64> = (0..nz).map(|i| i as f64 * 0.1).collect();
            match run(&coord, &vec![0.2; nz], &config) {
                Err(SettlingError::InvalidGrid(msg)) => {
                    assert_eq!(msg, "For crocus velocity only 3 computational nodes are allowed");
                }
                other => panic!("expected invalid grid, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_phi_dependent_profile() {
        let coord = [0.0, 0.5, 1.0];
        let phi = [0.45, 0.325, 0.2];
        let d = 1e-5;
        let config = SettlingConfig::new(VelocityModel::PhiDependent, ViscosityModel::EtaPhi);
        let profile = run(&coord, &phi, &config).unwrap();

        // phi_max = 0.9, 0.65, 0.4 -> restrict = 0.5, 0.5, 0.5
        for i in 0..3 {
            assert!((profile.v_dz[i] + 0.5 * d).abs() < TOL);
        }

        // Base rate dropped, second segment uses node 1
        assert_eq!(profile.v[0], 0.0);
        assert_eq!(profile.v[1], 0.0);
        assert!((profile.v[2] + 0.5 * d * 0.5).abs() < TOL);
        assert!(profile.sigma.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_phi_dependent_needs_two_nodes() {
        let config = SettlingConfig::new(VelocityModel::PhiDependent, ViscosityModel::EtaPhi);
        assert!(matches!(
            run(&[0.0], &[0.2], &config),
            Err(SettlingError::InvalidGrid(_))
        ));
    }

    #[test]
    fn test_continuous_single_node_is_invalid() {
        let config = SettlingConfig::new(VelocityModel::Continuous, ViscosityModel::EtaPhi);
        assert!(matches!(
            run(&[0.0], &[0.2], &config),
            Err(SettlingError::InvalidGrid(_))
        ));
    }

    #[test]
    fn test_custom_deformation_rate() {
        let config = SettlingConfig::new(VelocityModel::Const, ViscosityModel::EtaPhi)
            .with_deformation_rate(2e-6);
        let profile = run(&[0.0, 1.0], &[0.2, 0.2], &config).unwrap();
        assert_eq!(profile.v, vec![-2e-6, -2e-6]);
    }

    #[test]
    fn test_sink_receives_profile_when_plotting() {
        let coord = [0.0, 0.4, 1.0];
        let temperature = [263.0; 3];
        let phi = [0.3; 3];
        let column = SnowColumn::new(&temperature, &coord, &phi).unwrap();
        let constants = PhysicalConstants::default();
        let mut recorder = ProfileRecorder::new();

        let quiet = SettlingConfig::new(VelocityModel::Polynom, ViscosityModel::EtaPhi);
        settling_vel(&column, &quiet, &constants, Some(&mut recorder)).unwrap();
        assert!(recorder.profiles.is_empty());

        let loud = quiet.with_plot(true);
        let profile = settling_vel(&column, &loud, &constants, Some(&mut recorder)).unwrap();
        assert_eq!(recorder.profiles.len(), 1);
        assert_eq!(recorder.last().unwrap().0, coord.to_vec());
        assert_eq!(recorder.last().unwrap().1, profile.v);

        // No sink is not an error
        settling_vel(&column, &loud, &constants, None).unwrap();

        // Disabled settling never plots
        let off = loud.with_settling(SettlingMode::Disabled);
        settling_vel(&column, &off, &constants, Some(&mut recorder)).unwrap();
        assert_eq!(recorder.profiles.len(), 1);
    }

    #[test]
    fn test_into_parts() {
        let (v, v_dz, sigma) = SettlingProfile::zeros(2).into_parts();
        assert_eq!(v.len(), 2);
        assert_eq!(v_dz.len(), 2);
        assert_eq!(sigma.len(), 2);
    }
}
