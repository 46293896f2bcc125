use crate::config::Config;
use crate::engine::CertificateEngine;
use crate::roster::Roster;
use std::sync::Arc;

pub struct AppState {
    pub roster: Roster,
    pub engine: CertificateEngine,
    pub config: Arc<Config>,
}
