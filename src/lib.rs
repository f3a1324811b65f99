pub mod api;
pub mod config;
pub mod error;
pub mod grid;
pub mod models;
pub mod services;
pub mod session;
pub mod store;

use tokio::sync::mpsc::UnboundedReceiver;

pub use error::ApiError;

// Shared state for one booking session: the screens get references to
// these, never ambient singletons.
pub struct AppState {
    pub config: config::Config,
    pub session: session::Session,
    pub api: api::ApiClient,
    pub store: store::BookingStore,
}

impl AppState {
    /// Wires config, session, API client and booking store together and
    /// hands back the notice channel the owning view should listen on.
    pub fn new(config: config::Config) -> (Self, UnboundedReceiver<store::LockNotice>) {
        let session = session::Session::new();
        let api = api::ApiClient::new(&config.api, session.clone());
        let (store, notices) = store::BookingStore::new(api.clone());

        (
            Self {
                config,
                session,
                api,
                store,
            },
            notices,
        )
    }
}
