use crate::data_types::common::Priority;
use crate::data_types::route::Route;

/// Orders candidate routes by the user's priority. Deterministic: the sort is
/// stable, so routes with equal keys keep their input order and re-ranking an
/// already ranked list is a no-op.
pub fn rank_routes(mut routes: Vec<Route>, priority: Priority) -> Vec<Route> {
    routes.sort_by(|a, b| match priority {
        Priority::Fastest => a.total_duration.cmp(&b.total_duration),
        Priority::Cheapest => a.total_cost.total_cmp(&b.total_cost),
        Priority::Comfort => b.comfort_score.total_cmp(&a.comfort_score),
        Priority::Balanced => b.confidence_score.total_cmp(&a.confidence_score),
    });

    routes
}
