//! Symbolic HTTP status codes.
//!
//! One fixed table maps symbolic names to numeric codes and default
//! messages; both transcoding directions share it. Downstream consumers key
//! response maps by the numeric code as a string, so codes are kept as
//! strings here.

/// (symbol, numeric code, default message), standard HTTP semantics.
const STATUS_TABLE: &[(&str, &str, &str)] = &[
    ("CONTINUE", "100", "Continue"),
    ("SWITCHING_PROTOCOLS", "101", "Switching Protocols"),
    ("OK", "200", "OK"),
    ("CREATED", "201", "Created"),
    ("ACCEPTED", "202", "Accepted"),
    ("NON_AUTHORITATIVE_INFORMATION", "203", "Non-Authoritative Information"),
    ("NO_CONTENT", "204", "No Content"),
    ("RESET_CONTENT", "205", "Reset Content"),
    ("PARTIAL_CONTENT", "206", "Partial Content"),
    ("MULTIPLE_CHOICES", "300", "Multiple Choices"),
    ("MOVED_PERMANENTLY", "301", "Moved Permanently"),
    ("FOUND", "302", "Found"),
    ("SEE_OTHER", "303", "See Other"),
    ("NOT_MODIFIED", "304", "Not Modified"),
    ("USE_PROXY", "305", "Use Proxy"),
    ("TEMPORARY_REDIRECT", "307", "Temporary Redirect"),
    ("BAD_REQUEST", "400", "Bad Request"),
    ("UNAUTHORIZED", "401", "Unauthorized"),
    ("PAYMENT_REQUIRED", "402", "Payment Required"),
    ("FORBIDDEN", "403", "Forbidden"),
    ("NOT_FOUND", "404", "Not Found"),
    ("METHOD_NOT_ALLOWED", "405", "Method Not Allowed"),
    ("NOT_ACCEPTABLE", "406", "Not Acceptable"),
    ("PROXY_AUTHENTICATION_REQUIRED", "407", "Proxy Authentication Required"),
    ("REQUEST_TIMEOUT", "408", "Request Timeout"),
    ("CONFLICT", "409", "Conflict"),
    ("GONE", "410", "Gone"),
    ("LENGTH_REQUIRED", "411", "Length Required"),
    ("PRECONDITION_FAILED", "412", "Precondition Failed"),
    ("REQUEST_ENTITY_TOO_LARGE", "413", "Request Entity Too Large"),
    ("REQUEST_URI_TOO_LONG", "414", "Request-URI Too Long"),
    ("UNSUPPORTED_MEDIA_TYPE", "415", "Unsupported Media Type"),
    ("REQUESTED_RANGE_NOT_SATISFIABLE", "416", "Requested Range Not Satisfiable"),
    ("EXPECTATION_FAILED", "417", "Expectation Failed"),
    ("UNPROCESSABLE_ENTITY", "422", "Unprocessable Entity"),
    ("PRECONDITION_REQUIRED", "428", "Precondition Required"),
    ("TOO_MANY_REQUESTS", "429", "Too Many Requests"),
    ("INTERNAL_SERVER_ERROR", "500", "Internal Server Error"),
    ("NOT_IMPLEMENTED", "501", "Not Implemented"),
    ("BAD_GATEWAY", "502", "Bad Gateway"),
    ("SERVICE_UNAVAILABLE", "503", "Service Unavailable"),
    ("GATEWAY_TIMEOUT", "504", "Gateway Timeout"),
    ("HTTP_VERSION_NOT_SUPPORTED", "505", "HTTP Version Not Supported"),
];

/// Numeric code for a symbolic status name, as a string.
///
/// Unknown symbols pass through unchanged, so numeric-string keys produced
/// by the importer re-export losslessly.
pub fn status_code(symbol: &str) -> &str {
    STATUS_TABLE
        .iter()
        .find(|(sym, _, _)| *sym == symbol)
        .map(|(_, code, _)| *code)
        .unwrap_or(symbol)
}

/// Default human-readable message for a symbolic name or a numeric code
/// string. Unknown inputs pass through unchanged.
pub fn status_message(symbol_or_code: &str) -> &str {
    STATUS_TABLE
        .iter()
        .find(|(sym, code, _)| *sym == symbol_or_code || *code == symbol_or_code)
        .map(|(_, _, msg)| *msg)
        .unwrap_or(symbol_or_code)
}

/// Symbolic name for a numeric code string, when the table knows it.
pub fn status_symbol(code: &str) -> Option<&'static str> {
    STATUS_TABLE
        .iter()
        .find(|(_, c, _)| *c == code)
        .map(|(sym, _, _)| *sym)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_to_code() {
        assert_eq!(status_code("OK"), "200");
        assert_eq!(status_code("NO_CONTENT"), "204");
        assert_eq!(status_code("NOT_FOUND"), "404");
        assert_eq!(status_code("INTERNAL_SERVER_ERROR"), "500");
    }

    #[test]
    fn unknown_symbol_passes_through() {
        // Numeric keys from imported documents survive re-export.
        assert_eq!(status_code("404"), "404");
        assert_eq!(status_code("418"), "418");
    }

    #[test]
    fn message_by_symbol_or_code() {
        assert_eq!(status_message("NOT_FOUND"), "Not Found");
        assert_eq!(status_message("404"), "Not Found");
        assert_eq!(status_message("NO_CONTENT"), "No Content");
        assert_eq!(status_message("999"), "999");
    }

    #[test]
    fn code_to_symbol() {
        assert_eq!(status_symbol("200"), Some("OK"));
        assert_eq!(status_symbol("404"), Some("NOT_FOUND"));
        assert_eq!(status_symbol("999"), None);
    }

    #[test]
    fn table_is_internally_consistent() {
        for (sym, code, _) in STATUS_TABLE {
            assert_eq!(status_code(sym), *code);
            assert_eq!(status_symbol(code), Some(*sym));
        }
    }
}
