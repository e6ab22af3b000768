use crate::config::Config;
use crate::db::user_repository::UserRepository;
use crate::services::mailer::Mailer;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn UserRepository>,
    pub mailer: Arc<dyn Mailer>,
    pub config: Arc<Config>,
}

#[cfg(test)]
pub(crate) fn test_state(
    db: Arc<dyn UserRepository>,
    mailer: Arc<dyn Mailer>,
) -> AppState {
    AppState {
        db,
        mailer,
        config: Arc::new(crate::config::test_config()),
    }
}
