use nalgebra::Point2;

/// Occupation value that marks a site as permanently charged.
const FIXED_OCCUPATION: f64 = 1.0;

/// A dangling-bond site on the surface.
///
/// Sites are immutable once created. The location is stored in the design's
/// distance unit (ångström); conversion to metres happens in the precompute
/// stage, never here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Site {
    location: Point2<f64>,
    elec: f64,
}

impl Site {
    /// Creates a site at `(x, y)` with the given occupation flag.
    ///
    /// # Arguments
    ///
    /// * `x` - Horizontal position in ångström.
    /// * `y` - Vertical position in ångström.
    /// * `elec` - Occupation flag read from the design; `1` marks a fixed charge.
    pub fn new(x: f64, y: f64, elec: f64) -> Self {
        Self {
            location: Point2::new(x, y),
            elec,
        }
    }

    /// Creates a site whose occupation is left to the simulation.
    pub fn free(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0)
    }

    /// Creates a permanently occupied site.
    pub fn fixed(x: f64, y: f64) -> Self {
        Self::new(x, y, FIXED_OCCUPATION)
    }

    pub fn location(&self) -> Point2<f64> {
        self.location
    }

    pub fn x(&self) -> f64 {
        self.location.x
    }

    pub fn y(&self) -> f64 {
        self.location.y
    }

    pub fn elec(&self) -> f64 {
        self.elec
    }

    /// Returns `true` if the site is excluded from the free-site pool and
    /// contributes only a static field.
    pub fn is_fixed(&self) -> bool {
        self.elec == FIXED_OCCUPATION
    }
}

/// A static external charge contributing to the drive potential of every free site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedCharge {
    /// Location in ångström.
    pub location: Point2<f64>,
    /// Charge magnitude in units of the elementary charge.
    pub magnitude: f64,
}

impl FixedCharge {
    pub fn new(x: f64, y: f64, magnitude: f64) -> Self {
        Self {
            location: Point2::new(x, y),
            magnitude,
        }
    }
}

impl From<&Site> for FixedCharge {
    fn from(site: &Site) -> Self {
        Self {
            location: site.location(),
            magnitude: site.elec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_with_unit_occupation_is_fixed() {
        assert!(Site::fixed(1.0, 2.0).is_fixed());
        assert!(Site::new(1.0, 2.0, 1.0).is_fixed());
    }

    #[test]
    fn site_with_other_occupation_values_is_free() {
        assert!(!Site::free(1.0, 2.0).is_fixed());
        assert!(!Site::new(1.0, 2.0, -1.0).is_fixed());
        assert!(!Site::new(1.0, 2.0, 0.5).is_fixed());
    }

    #[test]
    fn fixed_charge_from_site_keeps_location_and_magnitude() {
        let site = Site::fixed(3.84, -7.68);
        let charge = FixedCharge::from(&site);
        assert_eq!(charge.location, Point2::new(3.84, -7.68));
        assert_eq!(charge.magnitude, 1.0);
    }
}
