use crate::auth::CredentialVerifier;
use crate::config::Config;
use crate::db::Store;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub config: Arc<Config>,
    pub admin: Arc<dyn CredentialVerifier>,
}
