use crate::error::SerializeError;
use crate::params::Params;
use crate::query::{query_string, QueryConfig};
use serde::{Deserialize, Serialize};
use surf::{http::Method, Request, Url};
use tracing::{event, Level};

/// Retry state attached to an outgoing request.
///
/// The API client's retry interceptor reads this to recognize a request it has already re-sent,
/// so that a failing request is retried at most once. It serializes under the field name
/// `_retry`, matching the request configuration of the other Flex SDKs. This crate only carries
/// the flag; deciding when to retry is up to the interceptor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryState {
    #[serde(rename = "_retry", default)]
    pub retry: bool,
}

/// Mark a request as a retry of an earlier attempt.
pub fn mark_retry(req: &mut Request) {
    req.set_ext(RetryState { retry: true });
}

/// Whether a request has been marked as a retry.
///
/// Requests that were never marked are first attempts.
pub fn is_retry(req: &Request) -> bool {
    req.ext::<RetryState>().map_or(false, |state| state.retry)
}

/// Build a request whose URL query carries `params`.
///
/// Any query already present on `url` is replaced. An empty parameter mapping leaves the URL
/// without a query.
pub fn request(method: Method, url: Url, params: &Params) -> Request {
    request_with_config(&QueryConfig::default(), method, url, params)
}

/// Like [request], serializing `params` according to `config`.
pub fn request_with_config(
    config: &QueryConfig,
    method: Method,
    mut url: Url,
    params: &Params,
) -> Request {
    let query = config.query_string(params);
    url.set_query(if query.is_empty() { None } else { Some(query.as_str()) });
    event!(
        Level::DEBUG,
        "--> building request {{method: {}, url: {}}}",
        method,
        url
    );
    Request::new(method, url)
}

/// Build a request from parameters given as a JSON object.
///
/// The parameters are classified before the request is created; an unsupported value fails the
/// call and no request is built.
pub fn request_from_json(
    method: Method,
    url: Url,
    params: serde_json::Value,
) -> Result<Request, SerializeError> {
    let params = Params::from_json(params)?;
    Ok(request(method, url, &params))
}

/// The query string a request would carry for `params`, for callers that assemble URLs
/// themselves.
pub fn query(params: &Params) -> Option<String> {
    if params.is_empty() {
        None
    } else {
        Some(query_string(params))
    }
}
