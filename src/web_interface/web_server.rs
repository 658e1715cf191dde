use std::net::SocketAddr;
use std::sync::Arc;

use log::info;
use warp::{Filter, Rejection, Reply};

use crate::data_capture::CaptureLog;
use crate::error_handling::types::WebError;
use crate::web_interface::routes::{asset_route, decoy_page_route, login_route};

/// Web server tying the decoy page and the capture endpoint together.
pub struct WebServer {
    capture_log: Arc<CaptureLog>,
}

impl WebServer {
    /// Create a new WebServer around an already-opened capture log.
    pub fn new(capture_log: Arc<CaptureLog>) -> Self {
        Self { capture_log }
    }

    /// The composed route set: decoy page, static assets, capture endpoint.
    pub fn routes(&self) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
        decoy_page_route()
            .or(asset_route())
            .or(login_route(self.capture_log.clone()))
    }

    /// Start serving on the given address; runs until the process stops.
    pub async fn start(&self, addr: SocketAddr) -> Result<(), WebError> {
        info!("Decoy listening on {}", addr);

        warp::serve(self.routes()).run(addr).await;

        Ok(())
    }
}
