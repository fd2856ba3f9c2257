use axum::http::StatusCode;

pub struct HealthController {}

impl HealthController {
    pub async fn get() -> (StatusCode, &'static str) {
        (StatusCode::OK, "OK")
    }
}
