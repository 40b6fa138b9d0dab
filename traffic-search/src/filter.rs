use crate::time::TimeFilter;
use crate::traffic::Trip;

impl Trip {
    /// A trip is in the window if it either started or ended close enough to the pivot
    pub fn is_within(&self, filter: TimeFilter) -> bool {
        filter.accepts(self.started_minutes()) || filter.accepts(self.ended_minutes())
    }
}

/// Narrow down `trips` to those starting or ending within an hour of the pivot.
/// `TimeFilter::Any` lets everything through, order kept.
pub fn filter_trips_by_time<'t, I>(trips: I, filter: TimeFilter) -> impl Iterator<Item = &'t Trip>
where
    I: IntoIterator<Item = &'t Trip>,
{
    trips.into_iter().filter(move |trip| trip.is_within(filter))
}
