use std::sync::Arc;
use crate::{authentication::auth::JwtSettings, data_access::data_context::DataContext};

pub struct AppState {
    pub data_context: DataContext,
    pub jwt: JwtSettings,
}

pub type SharedState = Arc<AppState>;
