//! Settling velocity models.
//!
//! [`settling_vel`] is the entry point. It selects one of five velocity
//! models, or returns zero fields when settling is switched off:
//!
//! - **continuous**: viscous settling under the full overburden, integrated
//!   from the surface down
//! - **crocus**: viscous settling of a two-layer pack on three nodes
//! - **polynom**: prescribed constant strain rate
//! - **const**: prescribed constant velocity
//! - **phi_dependent**: prescribed strain rate damped as the ice fraction
//!   approaches a height-dependent ceiling
//!
//! The viscous models run node distances, viscosity, stress and velocity
//! in that order. The prescribed models need neither stress nor viscosity
//! and return zero stress.

mod config;
mod controller;

pub use config::{
    DEFAULT_DEFORMATION_RATE, DEFAULT_GLEN_EXPONENT, SettlingConfig, SettlingMode, VelocityModel,
};
pub use controller::{
    CROCUS_NODES, PHI_MAX_BASE, PHI_MAX_TOP, SettlingProfile, settling_vel,
    settling_vel_from_options,
};
