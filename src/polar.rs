//! Sampled drag polar.
//!
//! The aerodynamic sub-model seam: segments only need CD as a function of
//! CL. The polar is supplied by the caller as sampled vectors; lookups
//! interpolate linearly and refuse to extrapolate, so an operating point
//! outside the table surfaces as a segment computation error instead of a
//! silently wrong drag.

/// Drag polar sampled as matching CL/CD vectors, CL strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct Polar {
    cl: Vec<f64>,
    cd: Vec<f64>,
}

impl Polar {
    /// Build a polar from matching samples. Panics in debug builds if the
    /// vectors are mismatched or too short; callers own their tables.
    pub fn new(cl: Vec<f64>, cd: Vec<f64>) -> Self {
        debug_assert!(cl.len() == cd.len());
        debug_assert!(cl.len() >= 2);
        debug_assert!(cl.windows(2).all(|pair| pair[1] > pair[0]));
        Self { cl, cd }
    }

    /// Valid CL range of the table.
    pub fn cl_range(&self) -> (f64, f64) {
        (self.cl[0], self.cl[self.cl.len() - 1])
    }

    /// Interpolated drag coefficient, or `None` when `cl` falls outside the
    /// sampled range.
    pub fn cd(&self, cl: f64) -> Option<f64> {
        let (cl_min, cl_max) = self.cl_range();
        if cl < cl_min || cl > cl_max {
            return None;
        }
        let upper = self.cl.partition_point(|&sample| sample < cl);
        if upper == 0 {
            return Some(self.cd[0]);
        }
        let lower = upper - 1;
        if upper == self.cl.len() {
            return Some(self.cd[lower]);
        }
        let span = self.cl[upper] - self.cl[lower];
        let fraction = (cl - self.cl[lower]) / span;
        Some(self.cd[lower] + fraction * (self.cd[upper] - self.cd[lower]))
    }
}
