//! Status code check.

use crate::error::MatchError;

/// Compare an expected status code to an actual one.
pub fn match_status(expected: u16, actual: u16) -> Option<MatchError> {
    (expected != actual).then(|| MatchError::wrong_status(expected, actual))
}
