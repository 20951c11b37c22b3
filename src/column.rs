//! Snowpack column geometry and input fields.
//!
//! Nodes are ordered from the bottom of the snowpack (index 0) to the
//! surface (index nz-1). Heights are measured upward from the base.

use crate::error::{Result, SettlingError};

/// Distances between neighbouring nodes.
///
/// Returns `dz` with `dz[i] = coord[i + 1] - coord[i]`, so `dz.len() == nz - 1`.
///
/// # Errors
///
/// - `InvalidGrid` if fewer than two nodes are given
/// - `InvalidGrid` if the coordinates are not strictly increasing
///
/// # Example
///
/// ```
/// use snow_settling::node_distance;
///
/// let dz = node_distance(&[0.0, 0.25, 1.0]).unwrap();
/// assert_eq!(dz, vec![0.25, 0.75]);
/// ```
pub fn node_distance(coord: &[f64]) -> Result<Vec<f64>> {
    if coord.len() < 2 {
        return Err(SettlingError::InvalidGrid(format!(
            "Node distances need at least 2 computational nodes, got {}",
            coord.len()
        )));
    }

    let dz: Vec<f64> = coord.windows(2).map(|w| w[1] - w[0]).collect();

    if let Some(i) = dz.iter().position(|&d| d.is_nan() || d <= 0.0) {
        return Err(SettlingError::InvalidGrid(format!(
            "Node coordinates must be strictly increasing (coord[{}] = {}, coord[{}] = {})",
            i,
            coord[i],
            i + 1,
            coord[i + 1]
        )));
    }

    Ok(dz)
}

/// Borrowed view of one snowpack column at a single timestep.
///
/// Bundles the temperature, coordinate and ice-fraction fields and checks
/// that they agree in length. The node count `nz` is the number of
/// coordinates.
#[derive(Clone, Copy, Debug)]
pub struct SnowColumn<'a> {
    /// Temperature at each node (K)
    pub temperature: &'a [f64],
    /// Node heights above the base (m)
    pub coord: &'a [f64],
    /// Ice volume fraction at each node (-)
    pub phi: &'a [f64],
}

impl<'a> SnowColumn<'a> {
    /// Create a column view, validating field lengths against `coord`.
    ///
    /// # Errors
    /// - `DimensionMismatch` if `temperature` or `phi` differ in length from `coord`
    pub fn new(temperature: &'a [f64], coord: &'a [f64], phi: &'a [f64]) -> Result<Self> {
        let nz = coord.len();
        if temperature.len() != nz {
            return Err(SettlingError::dimension_mismatch(
                "temperature",
                nz,
                temperature.len(),
            ));
        }
        if phi.len() != nz {
            return Err(SettlingError::dimension_mismatch("phi", nz, phi.len()));
        }

        if let Some(&p) = phi.iter().find(|&&p| p > 1.0) {
            tracing::warn!(phi = p, "ice volume fraction above 1 is physically invalid");
        }

        Ok(Self {
            temperature,
            coord,
            phi,
        })
    }

    /// Number of computational nodes.
    #[inline]
    pub fn nz(&self) -> usize {
        self.coord.len()
    }

    /// Height of the top node, or 0 for an empty column.
    #[inline]
    pub fn height(&self) -> f64 {
        self.coord.last().copied().unwrap_or(0.0)
    }

    /// Node distances for this column.
    pub fn node_distance(&self) -> Result<Vec<f64>> {
        node_distance(self.coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_node_distance_uniform() {
        let coord: Vec<f64> = (0..5).map(|i| i as f64 * 0.1).collect();
        let dz = node_distance(&coord).unwrap();

        assert_eq!(dz.len(), 4);
        for d in dz {
            assert!((d - 0.1).abs() < TOL);
        }
    }

    #[test]
    fn test_node_distance_non_uniform() {
        let dz = node_distance(&[0.0, 0.5, 0.6, 1.6]).unwrap();
        assert!((dz[0] - 0.5).abs() < TOL);
        assert!((dz[1] - 0.1).abs() < TOL);
        assert!((dz[2] - 1.0).abs() < TOL);
    }

    #[test]
    fn test_node_distance_too_short() {
        assert!(matches!(
            node_distance(&[0.0]),
            Err(SettlingError::InvalidGrid(_))
        ));
        assert!(matches!(node_distance(&[]), Err(SettlingError::InvalidGrid(_))));
    }

    #[test]
    fn test_node_distance_rejects_non_increasing() {
        assert!(matches!(
            node_distance(&[0.0, 0.5, 0.5]),
            Err(SettlingError::InvalidGrid(_))
        ));
        assert!(matches!(
            node_distance(&[0.0, 0.5, 0.2]),
            Err(SettlingError::InvalidGrid(_))
        ));
        assert!(matches!(
            node_distance(&[0.0, f64::NAN]),
            Err(SettlingError::InvalidGrid(_))
        ));
    }

    #[test]
    fn test_column_length_validation() {
        let coord = [0.0, 0.5, 1.0];
        let t = [260.0, 261.0, 262.0];
        let phi = [0.3, 0.25];

        match SnowColumn::new(&t, &coord, &phi) {
            Err(SettlingError::DimensionMismatch {
                field,
                expected,
                actual,
            }) => {
                assert_eq!(field, "phi");
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("expected dimension mismatch, got {:?}", other),
        }

        assert!(SnowColumn::new(&t[..2], &coord, &[0.1, 0.1, 0.1]).is_err());
    }

    #[test]
    fn test_column_accessors() {
        let coord = [0.0, 0.5, 1.2];
        let column = SnowColumn::new(&[260.0; 3], &coord, &[0.2; 3]).unwrap();

        assert_eq!(column.nz(), 3);
        assert!((column.height() - 1.2).abs() < TOL);
        assert_eq!(column.node_distance().unwrap().len(), 2);
    }
}
