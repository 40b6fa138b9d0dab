use crate::time::TimeFilter;

/// Radius range while every trip is shown
pub const UNFILTERED_RANGE: (f64, f64) = (0., 25.);
/// Radius range once a pivot is picked, fewer trips are left so differences get exaggerated
pub const FILTERED_RANGE: (f64, f64) = (3., 50.);

/// Square root scale from a traffic count to a marker radius, so that marker area rather than
/// radius grows with traffic.
///
/// Values aren't clamped, anything above `domain_max` just keeps growing.
/// # Examples
/// ```rust
/// use traffic_search::scale::{RadiusScale, UNFILTERED_RANGE};
/// let scale = RadiusScale::new(100, UNFILTERED_RANGE);
/// assert_eq!(scale.radius(25), 12.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusScale {
    domain_max: u32,
    range: (f64, f64),
}

impl RadiusScale {
    pub fn new(domain_max: u32, range: (f64, f64)) -> RadiusScale {
        RadiusScale { domain_max, range }
    }

    /// The range depends on whether the slider is set, the domain does not
    pub fn for_filter(domain_max: u32, filter: TimeFilter) -> RadiusScale {
        let range = if filter.is_active() {
            FILTERED_RANGE
        } else {
            UNFILTERED_RANGE
        };
        Self::new(domain_max, range)
    }

    pub fn with_range(self, range: (f64, f64)) -> RadiusScale {
        RadiusScale { range, ..self }
    }

    pub fn domain_max(&self) -> u32 {
        self.domain_max
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn radius(&self, value: u32) -> f64 {
        let (low, high) = self.range;
        if self.domain_max == 0 {
            // a degenerate domain maps everything to the middle of the range
            return low + (high - low) * 0.5;
        }
        let t = (f64::from(value) / f64::from(self.domain_max)).sqrt();
        low + (high - low) * t
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ends_of_the_domain() {
        let unfiltered = RadiusScale::new(400, UNFILTERED_RANGE);
        assert_relative_eq!(unfiltered.radius(0), 0.);
        assert_relative_eq!(unfiltered.radius(400), 25.);

        let filtered = unfiltered.with_range(FILTERED_RANGE);
        assert_relative_eq!(filtered.radius(0), 3.);
        assert_relative_eq!(filtered.radius(400), 50.);
    }

    #[test]
    fn square_root_not_linear() {
        let scale = RadiusScale::new(400, UNFILTERED_RANGE);
        // a quarter of the traffic gives half the radius
        assert_relative_eq!(scale.radius(100), 12.5);
        assert_relative_eq!(scale.radius(4), 2.5);
        let filtered = scale.with_range(FILTERED_RANGE);
        assert_relative_eq!(filtered.radius(100), 3. + 47. * 0.5);
    }

    #[test]
    fn not_clamped() {
        let scale = RadiusScale::new(100, UNFILTERED_RANGE);
        assert_relative_eq!(scale.radius(400), 50.);
    }

    #[test]
    fn empty_domain() {
        assert_relative_eq!(RadiusScale::new(0, UNFILTERED_RANGE).radius(0), 12.5);
        assert_relative_eq!(RadiusScale::new(0, FILTERED_RANGE).radius(0), 26.5);
    }

    #[test]
    fn range_follows_filter() {
        assert_eq!(
            RadiusScale::for_filter(10, TimeFilter::Any).range(),
            UNFILTERED_RANGE
        );
        assert_eq!(
            RadiusScale::for_filter(10, TimeFilter::from_slider(480).unwrap()).range(),
            FILTERED_RANGE
        );
        assert_eq!(
            RadiusScale::for_filter(10, TimeFilter::from_slider(480).unwrap()).domain_max(),
            10
        );
    }
}
