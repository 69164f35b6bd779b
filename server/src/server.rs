use std::convert::Infallible;

use chrono::Utc;
use serde::Serialize;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::config::config;
use crate::forecast::{self, ForecastPayload};
use crate::{db, repos};

pub async fn run(address: std::net::SocketAddr, database_url: &str) {
    let pool = db::pool(database_url)
        .await
        .expect(format!("Failed to connect to DB: {}", &database_url).as_str());

    let health_route = warp::path!("health")
        .and(with_db(pool.clone()))
        .and_then(health);

    let forecast_route = warp::path!("forecast")
        .and(warp::get())
        .and(with_db(pool.clone()))
        .and_then(get_forecast)
        .with(warp::compression::gzip());

    let cors = warp::cors().allow_any_origin().allow_methods(vec!["GET"]);

    let routes = health_route.or(forecast_route).recover(rejection).with(cors);

    warp::serve(routes).run(address).await
}

fn with_db(db_pool: db::Pool) -> impl Filter<Extract = (db::Pool,), Error = Infallible> + Clone {
    warp::any().map(move || db_pool.clone())
}

pub async fn health(pool: db::Pool) -> Result<impl Reply, Rejection> {
    db::health(&pool)
        .await
        .map_err(|e| warp::reject::custom(Error(e)))
        .map(|_| StatusCode::OK)
}

pub async fn get_forecast(pool: db::Pool) -> Result<impl Reply, Rejection> {
    let payload = build_forecast(&pool)
        .await
        .map_err(|e| warp::reject::custom(Error(e)))?;

    Ok(warp::reply::json(&ForecastResponse {
        status: "ok",
        forecast: payload,
    }))
}

async fn build_forecast(pool: &db::Pool) -> anyhow::Result<ForecastPayload> {
    let now = Utc::now();

    // The two reads are independent; run them on separate pooled connections.
    let (current_client, upcoming_client) = futures::try_join!(pool.get(), pool.get())?;
    let (current, upcoming) = futures::try_join!(
        repos::forecast_records::current_hour(&current_client, &now),
        repos::forecast_records::upcoming(&upcoming_client, &now),
    )?;

    let snapshot = forecast::today_snapshot(&current, now)?;
    let entries = forecast::week_sequence(&upcoming, now, config().forecast_timezone)?;

    Ok(ForecastPayload::assemble(snapshot, entries))
}

#[derive(Serialize)]
struct ForecastResponse {
    status: &'static str,
    forecast: ForecastPayload,
}

#[derive(Debug)]
struct Error(anyhow::Error);
impl warp::reject::Reject for Error {}

#[derive(Serialize)]
struct ErrorMessage {
    status: &'static str,
    message: &'static str,
}

pub async fn rejection(err: warp::Rejection) -> Result<impl Reply, Infallible> {
    log::error!("Error: {:?}", err);

    let json = warp::reply::json(&ErrorMessage {
        status: "error",
        message: "Failed to fetch forecast",
    });

    Ok(warp::reply::with_status(
        json,
        StatusCode::INTERNAL_SERVER_ERROR,
    ))
}
