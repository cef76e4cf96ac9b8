/// Error codes signalling a stale or missing sequence token.
pub const CONFLICT_ERROR_CODES: [&str; 2] =
    ["DataAlreadyAcceptedException", "InvalidSequenceTokenException"];

pub fn is_conflict(code: &str) -> bool {
    CONFLICT_ERROR_CODES.contains(&code)
}

/// Extracts the next sequence token from a conflict error message.
///
/// The log service does not return the token as a structured field on this
/// path. Its message text ends in `": <token>"`; the token is everything after
/// the last colon, with surrounding spaces removed. Returns `None`, meaning the
/// next append omits the token, when the tail is empty, is the literal `null`,
/// or the message has no colon.
pub fn sequence_token_from_message(message: &str) -> Option<String> {
    let (_, tail) = message.rsplit_once(':')?;
    match tail.trim_matches(' ') {
        "" | "null" => None,
        token => Some(token.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_invalid_sequence_token_message() {
        let message = "The given sequenceToken is invalid. The next expected sequenceToken is: \
                       49612345678901234567890123456789012345678901234567890";

        assert_eq!(
            sequence_token_from_message(message),
            Some("49612345678901234567890123456789012345678901234567890".to_string())
        );
    }

    #[test]
    fn parses_data_already_accepted_message() {
        let message = "The given batch of log events has already been accepted. \
                       The next batch can be sent with sequenceToken: abc123";

        assert_eq!(
            sequence_token_from_message(message),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn token_is_taken_after_the_last_colon() {
        assert_eq!(
            sequence_token_from_message("stream a:b rejected: token: t9 "),
            Some("t9".to_string())
        );
    }

    #[test]
    fn null_token_means_append_without_token() {
        assert_eq!(
            sequence_token_from_message("The next expected sequenceToken is: null"),
            None
        );
    }

    #[test]
    fn message_without_token_means_append_without_token() {
        assert_eq!(sequence_token_from_message("sequence token rejected"), None);
        assert_eq!(sequence_token_from_message("next token is: "), None);
    }

    #[test]
    fn only_the_two_conflict_codes_are_recognised() {
        assert!(is_conflict("DataAlreadyAcceptedException"));
        assert!(is_conflict("InvalidSequenceTokenException"));
        assert!(!is_conflict("ResourceNotFoundException"));
        assert!(!is_conflict("ThrottlingException"));
    }
}
