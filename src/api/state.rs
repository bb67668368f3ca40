//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::auth::AuthTokenGenerator;
use crate::infrastructure::user::UserFacade;

/// Application state shared by all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub user_facade: Arc<UserFacade>,
    pub token_generator: Arc<AuthTokenGenerator>,
}

impl AppState {
    pub fn new(user_facade: Arc<UserFacade>) -> Self {
        Self {
            user_facade,
            token_generator: Arc::new(AuthTokenGenerator::default()),
        }
    }
}
