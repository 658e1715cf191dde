use std::net::SocketAddr;
use std::sync::Arc;

use chrono::Utc;
use log::error;
use rust_embed::RustEmbed;
use serde_json::Value;
use warp::{http::StatusCode, reply, Filter, Rejection, Reply};

use crate::data_capture::{CaptureLog, CaptureRecord};
use crate::network::resolve_source_address;
use crate::web_interface::types::{LoginAttempt, LoginResponse};

/// Static presentation assets, embedded at build time. The request-handling
/// core never touches page markup; it only hands these bytes back.
#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";
const BODY_LIMIT: u64 = 64 * 1024;

/// GET / -> the decoy login page
pub fn decoy_page_route() -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path::end().and(warp::get()).and_then(|| async move {
        let res = match Assets::get("login.html") {
            Some(page) => reply::with_header(
                page.data.into_owned(),
                "Content-Type",
                "text/html; charset=utf-8",
            )
            .into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        };
        Ok::<_, Rejection>(res)
    })
}

/// GET /assets/:name -> any other embedded asset
pub fn asset_route() -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("assets" / String)
        .and(warp::get())
        .and_then(|name: String| async move {
            let res = match Assets::get(&name) {
                Some(file) => {
                    let mime = mime_guess::from_path(&name).first_or_octet_stream();
                    reply::with_header(file.data.into_owned(), "Content-Type", mime.to_string())
                        .into_response()
                }
                None => StatusCode::NOT_FOUND.into_response(),
            };
            Ok::<_, Rejection>(res)
        })
}

/// POST /login -> capture the attempt, then the fixed deny response
pub fn login_route(
    capture_log: Arc<CaptureLog>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path("login")
        .and(warp::path::end())
        .and(warp::post())
        .and(tolerant_json_body())
        .and(warp::header::optional::<String>(FORWARDED_FOR_HEADER))
        .and(warp::addr::remote())
        .and_then(
            move |body: Value, forwarded_for: Option<String>, peer: Option<SocketAddr>| {
                let capture_log = capture_log.clone();
                async move {
                    let attempt = LoginAttempt::from_value(&body);
                    let source_address = resolve_source_address(peer, forwarded_for.as_deref());
                    let record = CaptureRecord::new(
                        Utc::now(),
                        source_address,
                        attempt.username,
                        attempt.password,
                    );

                    // The append happens before the response is built; a
                    // sink failure is an operator problem, never a signal
                    // to the submitter.
                    if let Err(e) = capture_log.record(&record) {
                        error!("Capture record lost: {}", e);
                    }

                    Ok::<_, Rejection>(reply::with_status(
                        reply::json(&LoginResponse::deny()),
                        StatusCode::OK,
                    ))
                }
            },
        )
}

/// Decodes the submission body as JSON, degrading to `Value::Null` on any
/// failure (wrong content type, oversized, not JSON at all). Rejecting a
/// body outright would let a prober fingerprint the endpoint's validation.
fn tolerant_json_body() -> impl Filter<Extract = (Value,), Error = Rejection> + Clone {
    warp::body::content_length_limit(BODY_LIMIT)
        .and(warp::body::json())
        .or_else(|_| async { Ok::<(Value,), Rejection>((Value::Null,)) })
}
