use geo_types::Coord;

use crate::data_types::route::GeoPoint;

/// Where a progress fraction lands on a segment's ordered stop sequence.
/// Stops are treated as evenly spaced in time along the segment; this mirrors
/// the stop-by-stop timeline, which has no per-stop distances to weight by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopProjection {
    pub lower: usize,
    pub upper: usize,
    pub frac: f64,
}

/// None when there are fewer than two stops: nothing to render between.
pub fn project_progress(stop_count: usize, progress: f64) -> Option<StopProjection> {
    if stop_count < 2 {
        return None;
    }

    let k = progress * (stop_count - 1) as f64;
    let lower = k.floor() as usize;
    let upper = k.ceil() as usize;

    Some(StopProjection {
        lower,
        upper,
        frac: k - lower as f64,
    })
}

/// Projects a progress fraction onto a segment's path polyline, blending the
/// two bracketing coordinates. Used to place the simulated marker on the map.
pub fn position_along_path(path: &[GeoPoint], progress: f64) -> Option<GeoPoint> {
    let projection = project_progress(path.len(), progress)?;

    let from: Coord = path[projection.lower].into();
    let to: Coord = path[projection.upper].into();

    let blended = Coord {
        x: from.x + (to.x - from.x) * projection.frac,
        y: from.y + (to.y - from.y) * projection.frac,
    };

    Some(blended.into())
}
