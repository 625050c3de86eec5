use std::sync::Arc;

use scribe_auth::Hs256Jwt;
use scribe_infra::Database;

/// Shared, read-only application state.
///
/// The signing key is fixed for the life of the process; nothing here is
/// mutated after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub jwt: Arc<Hs256Jwt>,
}

impl AppState {
    pub fn new(db: Database, jwt: Hs256Jwt) -> Self {
        Self {
            db,
            jwt: Arc::new(jwt),
        }
    }
}
