//! Request context structure for handling per-request information

use actix_web::HttpRequest;

/// Information taken from the inbound request that the service layer needs
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// Absolute base URL (scheme, host and port) used for data URLs
    pub base_url: String,
}

impl RequestContext {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    /// Build the context for `req`. A configured public base URL wins over the
    /// scheme and host the request arrived with.
    pub fn from_request(req: &HttpRequest, public_base_url: Option<&str>) -> Self {
        if let Some(base_url) = public_base_url {
            return Self::new(base_url.trim_end_matches('/').to_string());
        }
        let conn = req.connection_info();
        // The host value already carries a non-default port
        Self::new(format!("{}://{}", conn.scheme(), conn.host()))
    }
}
