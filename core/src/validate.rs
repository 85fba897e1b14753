//! Status-code assertions for harness scenarios.

use crate::error::StatusMismatch;
use crate::http::HttpResponse;

/// Check `response.status` against `expected`.
///
/// With `should_be_equal` the status must equal `expected`, otherwise it must
/// differ from it. The error displays as `STATUS CODE: {status}: {reason}`.
pub fn validate_response_code(
    response: &HttpResponse,
    expected: u16,
    should_be_equal: bool,
) -> Result<(), StatusMismatch> {
    if (response.status == expected) == should_be_equal {
        return Ok(());
    }
    Err(StatusMismatch {
        status: response.status,
        reason: response.reason.clone(),
        expected,
        should_be_equal,
    })
}

/// Panicking form of [`validate_response_code`] for use inside tests.
#[track_caller]
pub fn assert_response_code(response: &HttpResponse, expected: u16, should_be_equal: bool) {
    if let Err(mismatch) = validate_response_code(response, expected, should_be_equal) {
        panic!("{mismatch}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, reason: &str) -> HttpResponse {
        HttpResponse {
            status,
            reason: reason.to_string(),
            headers: Vec::new(),
            body: String::new(),
        }
    }

    #[test]
    fn equal_passes_on_match() {
        assert!(validate_response_code(&response(200, "OK"), 200, true).is_ok());
    }

    #[test]
    fn equal_fails_with_status_and_reason() {
        let err = validate_response_code(&response(400, "Bad Request"), 200, true).unwrap_err();
        assert_eq!(err.to_string(), "STATUS CODE: 400: Bad Request");
        assert_eq!(err.expected, 200);
    }

    #[test]
    fn not_equal_inverts_the_check() {
        assert!(validate_response_code(&response(400, "Bad Request"), 200, false).is_ok());
        let err = validate_response_code(&response(200, "OK"), 200, false).unwrap_err();
        assert_eq!(err.to_string(), "STATUS CODE: 200: OK");
        assert!(!err.should_be_equal);
    }

    #[test]
    #[should_panic(expected = "STATUS CODE: 404: Not Found")]
    fn assert_panics_with_message() {
        assert_response_code(&response(404, "Not Found"), 200, true);
    }
}
