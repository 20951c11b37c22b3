//! # snow-settling
//!
//! Settling (densification) of a layered snowpack.
//!
//! This crate computes, for one snowpack column at one timestep:
//! - Vertical overburden stress from the ice above each node
//! - Snow viscosity from temperature and ice volume fraction
//! - Settling velocity and strain rate from a viscous deformation law
//! - Simpler prescribed-rate velocity models for testing and comparison
//!
//! Every computation is a pure function of its input fields. Nodes are
//! ordered from the base of the snowpack (index 0) to the surface.
//!
//! # Example
//!
//! ```
//! use snow_settling::{PhysicalConstants, SettlingConfig, SnowColumn, settling_vel};
//!
//! let coord = [0.0, 0.1, 0.2, 0.3];
//! let temperature = [258.0, 259.0, 260.0, 261.0];
//! let phi = [0.35, 0.3, 0.25, 0.2];
//!
//! let column = SnowColumn::new(&temperature, &coord, &phi).unwrap();
//! let config = SettlingConfig::from_options("Y", "continuous", "eta_phiT").unwrap();
//! let profile = settling_vel(&column, &config, &PhysicalConstants::default(), None).unwrap();
//!
//! assert_eq!(profile.v[0], 0.0);
//! assert!(profile.v[3] < 0.0); // the surface moves down
//! ```

pub mod column;
pub mod constants;
pub mod error;
pub mod io;
pub mod rheology;
pub mod settling;
pub mod stress;
pub mod velocity;

pub use column::{SnowColumn, node_distance};
pub use constants::PhysicalConstants;
pub use error::{Result, SettlingError};
pub use io::{ProfileRecorder, ProfileSink, ProfileWriter};
pub use rheology::{PHI_CONST, T_CONST, ViscosityModel, choose_viscosity};
pub use settling::{
    SettlingConfig, SettlingMode, SettlingProfile, VelocityModel, settling_vel,
    settling_vel_from_options,
};
pub use stress::{StressScheme, check_monotonic, sigma_cont_croc};
pub use velocity::{VelocityProfile, velocity};
