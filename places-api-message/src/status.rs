string_enums! {
    /// Status code of an API response.
    ///
    /// Only `Ok`, and `ZeroResults` for searches, indicate a normal outcome. A non-OK status is
    /// still a successfully decoded response, and `error_message` usually explains it.
    #[derive(Clone, Debug)]
    pub enum Status {
        :Ok("OK"),
        :ZeroResults("ZERO_RESULTS"),
        :OverQueryLimit("OVER_QUERY_LIMIT"),
        :RequestDenied("REQUEST_DENIED"),
        :InvalidRequest("INVALID_REQUEST"),
        :NotFound("NOT_FOUND"),
        :UnknownError("UNKNOWN_ERROR"),
        /// The image has not changed since the ETag sent with the request.
        :NotModified("NOT_MODIFIED");
        /// A status not known to this library.
        :Custom(_),
    }
}

impl Status {
    pub fn is_ok(&self) -> bool {
        *self == Status::Ok
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::UnknownError
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        let s: Status = serde_json::from_str("\"OVER_QUERY_LIMIT\"").unwrap();
        assert_eq!(s, Status::OverQueryLimit);
        assert_eq!(s.to_string(), "OVER_QUERY_LIMIT");

        let s: Status = serde_json::from_str("\"SOMETHING_NEW\"").unwrap();
        assert_eq!(s, Status::Custom("SOMETHING_NEW".to_owned()));
        assert!(!s.is_ok());
    }
}
