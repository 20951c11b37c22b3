//! I/O utilities for diagnostic output.
//!
//! This module provides:
//! - **Profile sinks**: receivers for velocity profiles produced by
//!   [`settling_vel`](crate::settling_vel) when plotting is requested
//! - **Profile tables**: plain text `height velocity` tables in cm and cm/d
//!
//! # Example
//!
//! ```no_run
//! use snow_settling::io::{ProfileSink, ProfileWriter};
//!
//! let mut writer = ProfileWriter::new("v(z).dat");
//! writer.record(&[0.0, 0.5, 1.0], &[0.0, -1e-6, -2e-6]).unwrap();
//! ```

mod profile;

pub use profile::{
    DEFAULT_PROFILE_FILE, ProfileFileError, ProfileRecorder, ProfileSink, ProfileTable,
    ProfileWriter, read_velocity_profile, read_velocity_profile_file, write_velocity_profile,
};
