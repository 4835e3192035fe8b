use std::fmt;

pub const MAX_METHOD_LEN: usize = 7;
pub const MAX_URL_LEN: usize = 127;

/// One parsed request line. The method and url are truncated silently at
/// MAX_METHOD_LEN/MAX_URL_LEN bytes; anything past the second space of the
/// input (version, headers) is discarded.
#[derive(Debug)]
pub struct Request {
    pub method: String,
    pub url: String
}

#[derive(Debug, PartialEq)]
pub enum RequestError {
    MissingMethodDelimiter,
    MissingUrlDelimiter
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RequestError::MissingMethodDelimiter => write!(f, "Malformed request: missing method delimiter"),
            RequestError::MissingUrlDelimiter => write!(f, "Malformed request: missing url delimiter")
        }
    }
}

pub fn parse_request(raw: &[u8]) -> Result<Request, RequestError> {
    let method_end = match raw.iter().position(|&b| b == b' ') {
        Some(index) => index,
        None => return Err(RequestError::MissingMethodDelimiter)
    };
    let method = bounded_token(&raw[..method_end], MAX_METHOD_LEN);

    let rest = &raw[method_end + 1..];
    let url_end = match rest.iter().position(|&b| b == b' ') {
        Some(index) => index,
        None => return Err(RequestError::MissingUrlDelimiter)
    };
    let url = bounded_token(&rest[..url_end], MAX_URL_LEN);

    Ok(Request { method, url })
}

fn bounded_token(bytes: &[u8], max: usize) -> String {
    let end = if bytes.len() < max { bytes.len() } else { max };
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
