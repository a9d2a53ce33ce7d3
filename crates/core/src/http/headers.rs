//! Request header sets.

/// Ordered list of header name/value pairs.
pub type Headers = Vec<(String, String)>;

/// Headers for the homepage fetch: only a user agent.
pub fn minimal_headers(user_agent: &str) -> Headers {
    vec![("User-Agent".to_string(), user_agent.to_string())]
}

/// Headers for backend API requests.
pub fn request_headers(user_agent: &str, referer: &str) -> Headers {
    let mut headers = minimal_headers(user_agent);
    headers.push(("Content-Type".to_string(), "application/json".to_string()));
    headers.push(("Accept".to_string(), "*/*".to_string()));
    headers.push(("Referer".to_string(), referer.to_string()));
    headers
}
