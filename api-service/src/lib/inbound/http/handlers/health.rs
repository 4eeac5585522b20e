use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthData {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BannerData {
    pub message: &'static str,
    pub version: &'static str,
    pub health: &'static str,
}

pub async fn root() -> Json<BannerData> {
    Json(BannerData {
        message: "Welcome to TaimiLab API",
        version: env!("CARGO_PKG_VERSION"),
        health: "/health",
    })
}

pub async fn health() -> Json<HealthData> {
    Json(HealthData {
        status: "healthy",
        message: "TaimiLab API is running",
        timestamp: Utc::now(),
    })
}

pub async fn ready() -> Json<HealthData> {
    Json(HealthData {
        status: "ready",
        message: "API is ready to accept requests",
        timestamp: Utc::now(),
    })
}
