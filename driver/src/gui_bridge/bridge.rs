use crate::generator::scatter::{build_click_scatter, ScatterConfig};
use crate::gui_bridge::model::SessionModel;
use crate::workflow::runner::Runner;
use anyhow::Result;
use serde::Deserialize;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

fn gui_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

#[derive(Debug)]
struct WarpError;

impl warp::reject::Reject for WarpError {}

#[derive(Debug, Deserialize)]
struct ClickRequest {
    lat: f64,
    lon: f64,
}

/// Bridge that hosts the session HTTP endpoint and processes incoming click
/// and scenario requests.
pub struct GuiBridge {
    state: Arc<RwLock<SessionModel>>,
}

impl GuiBridge {
    pub fn new(runner: Arc<Runner>) -> Self {
        let state = Arc::new(RwLock::new(SessionModel::default()));
        let state_for_filter = state.clone();
        let state_filter = warp::any().map(move || state_for_filter.clone());
        let runner_filter = warp::any().map(move || runner.clone());

        let get_route = warp::path("session")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: Arc<RwLock<SessionModel>>| warp::reply::json(&*state.read().unwrap()));

        let click_route = warp::path("click")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter.clone())
            .and(runner_filter.clone())
            .and_then(
                |click: ClickRequest,
                 state: Arc<RwLock<SessionModel>>,
                 runner: Arc<Runner>| async move {
                    match runner.execute_clicks(&[[click.lat, click.lon]]).await {
                        Ok(result) => {
                            let model = SessionModel::from_result(&result);
                            let mut guard = state.write().unwrap();
                            *guard = model;
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "features": result.feature_count,
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            eprintln!("click error: {}", err);
                            Err(warp::reject::custom(WarpError))
                        }
                    }
                },
            );

        let scenario_route = warp::path("scenario")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter)
            .and(runner_filter)
            .and_then(
                |config: ScatterConfig,
                 state: Arc<RwLock<SessionModel>>,
                 runner: Arc<Runner>| async move {
                    let clicks = build_click_scatter(&config);
                    match runner.execute_clicks(&clicks).await {
                        Ok(result) => {
                            let model = SessionModel::from_result(&result);
                            let mut guard = state.write().unwrap();
                            *guard = model;
                            if let Some(name) = config.scenario.as_ref() {
                                println!(
                                    "[GUI] Scenario {} -> results {}",
                                    name, result.result_count
                                );
                            }
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "results": result.result_count,
                                    "description": config.description.clone().unwrap_or_default()
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            eprintln!("scenario error: {}", err);
                            Err(warp::reject::custom(WarpError))
                        }
                    }
                },
            );

        thread::spawn(move || {
            let routes = get_route.or(click_route).or(scenario_route);
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(async move {
                warp::serve(routes).run(gui_bind_address()).await;
            });
        });

        Self { state }
    }

    pub fn publish(&self, model: &SessionModel) -> Result<()> {
        let mut guard = self.state.write().unwrap();
        *guard = model.clone();
        println!(
            "[GUI] results: {}, features: {}, total area km^2: {:.2}",
            guard.result_count, guard.feature_count, guard.total_area_km2
        );
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        println!("[GUI] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> SessionModel {
        self.state.read().unwrap().clone()
    }
}
