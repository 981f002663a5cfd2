use std::time::Duration;

use transit_live::data_types::common::{Priority, RoutePreferences, TransportMode};
use transit_live::data_types::route::{Route, RouteSegment};
use transit_live::transit::api::ApiConfig;
use transit_live::App;

#[tokio::main]
async fn main() {
    let config = ApiConfig::new("http://localhost:5000").expect("invalid telemetry base url");
    let mut app = App::with_api(config);

    let preferences = RoutePreferences {
        priority: Priority::Fastest,
    };
    let ranked = app.ranked_routes(sample_routes(), &preferences);
    let selected = ranked.into_iter().next().unwrap();
    println!("Selected: {} ({} min)", selected.route_name, selected.total_duration);

    app.set_active_route(Some(&selected));
    //app.set_live_tracking(true);

    let vehicles = app.simulated_vehicles();
    for _ in 0..3 {
        tokio::time::sleep(Duration::from_millis(2_000)).await;
        println!("simulated: {:#?}", *vehicles.borrow());
    }
}

fn sample_routes() -> Vec<Route> {
    let segments = vec![
        RouteSegment {
            mode: TransportMode::Walk,
            details: "Walk to Rajiv Chowk Station".to_string(),
            duration: 6,
            distance: Some(0.4),
            stops: None,
            realtime_info: None,
            path: None,
            stops_list: None,
        },
        RouteSegment {
            mode: TransportMode::Metro,
            details: "Yellow Line towards HUDA City Centre".to_string(),
            duration: 22,
            distance: Some(14.2),
            stops: Some(9),
            realtime_info: None,
            path: None,
            stops_list: None,
        },
    ];

    vec![
        Route {
            id: "route-1".to_string(),
            route_name: "Metro via Rajiv Chowk".to_string(),
            total_duration: 28,
            total_cost: 40.0,
            comfort_score: 8.0,
            confidence_score: 0.9,
            segments,
            summary: "Fast metro ride with a short walk".to_string(),
            realtime_info: None,
        },
        Route {
            id: "route-2".to_string(),
            route_name: "Direct bus".to_string(),
            total_duration: 45,
            total_cost: 25.0,
            comfort_score: 5.0,
            confidence_score: 0.8,
            segments: vec![RouteSegment {
                mode: TransportMode::Bus,
                details: "Bus 505".to_string(),
                duration: 45,
                distance: Some(16.0),
                stops: Some(18),
                realtime_info: Some("Running 10 minutes late".to_string()),
                path: None,
                stops_list: None,
            }],
            summary: "Cheaper, slower, single leg".to_string(),
            realtime_info: None,
        },
    ]
}
