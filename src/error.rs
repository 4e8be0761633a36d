use serde::{Deserialize, Serialize};

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// The class of a failure that is reported to the user.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// No transaction source was selected.
    Input,
    /// The transaction data could not be parsed.
    Parse,
    /// A file could not be read.
    Io,
    /// The report could not be rendered.
    Report,
}

serde_plain::derive_display_from_serialize!(ErrorType);
serde_plain::derive_fromstr_from_deserialize!(ErrorType);

/// Tags an error with an `ErrorType` so that callers can tell what kind of failure occurred.
pub(crate) trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| e.into().context(error_type))
    }
}

/// Finds the `ErrorType` that an error was tagged with, if any.
pub fn error_type(e: &Error) -> Option<ErrorType> {
    e.downcast_ref::<ErrorType>().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_pub_result_tags_error() {
        let result: std::result::Result<(), Error> = Err(anyhow!("bad amount"));
        let e = result.pub_result(ErrorType::Parse).unwrap_err();
        assert_eq!(error_type(&e), Some(ErrorType::Parse));
        assert_eq!(e.to_string(), "parse");
        assert_eq!(format!("{e:#}"), "parse: bad amount");
    }

    #[test]
    fn test_tag_survives_outer_context() {
        let result: std::result::Result<(), Error> = Err(anyhow!("no such file"));
        let e = result
            .pub_result(ErrorType::Io)
            .map_err(|e| e.context("loading transactions"))
            .unwrap_err();
        assert_eq!(error_type(&e), Some(ErrorType::Io));
    }

    #[test]
    fn test_untagged_error() {
        let e = anyhow!("something else");
        assert_eq!(error_type(&e), None);
    }

    #[test]
    fn test_error_type_display() {
        assert_eq!(ErrorType::Input.to_string(), "input");
        assert_eq!("io".parse::<ErrorType>().unwrap(), ErrorType::Io);
    }
}
