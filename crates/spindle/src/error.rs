use crate::options::Label;
use strum::AsRefStr;
use thiserror::Error;

/// Everything the wheel can refuse to do. Every variant leaves the wheel as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq, AsRefStr)]
pub enum WheelError {
    #[error("Option text must not be empty")]
    EmptyOption,
    #[error("Option text is longer than {max} characters")]
    TooLong { max: usize },
    #[error("'{0}' is already on the wheel")]
    DuplicateOption(Label),
    #[error("The wheel already holds the maximum of {max} options")]
    ListFull { max: usize },
    #[error("The wheel must keep at least {min} options")]
    BelowMinimum { min: usize },
    #[error("Spinning needs at least {min} options, the wheel has {found}")]
    InsufficientOptions { min: usize, found: usize },
    #[error("'{0}' is not on the wheel")]
    UnknownOption(Label),
    #[error("The wheel is still spinning")]
    SpinInProgress,
    #[error("Invalid wheel state: {0}")]
    InvalidState(&'static str),
    #[error("Invalid spin settings: {0}")]
    InvalidSettings(String),
}

impl WheelError {
    /// Stable identifier sent to clients, e.g. `DuplicateOption`.
    pub fn code(&self) -> &str {
        self.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_variant_names() {
        let cases = vec![
            (WheelError::EmptyOption, "EmptyOption"),
            (WheelError::TooLong { max: 3 }, "TooLong"),
            (WheelError::DuplicateOption(Label::new("A")), "DuplicateOption"),
            (WheelError::ListFull { max: 2 }, "ListFull"),
            (WheelError::BelowMinimum { min: 2 }, "BelowMinimum"),
            (
                WheelError::InsufficientOptions { min: 2, found: 1 },
                "InsufficientOptions",
            ),
            (WheelError::InvalidState("empty"), "InvalidState"),
            (
                WheelError::InvalidSettings("margin".into()),
                "InvalidSettings",
            ),
        ];

        for (error, code) in cases {
            assert_eq!(error.code(), code);
        }
    }

    #[test]
    fn test_messages_name_the_label() {
        let err = WheelError::DuplicateOption(Label::new("Alice"));
        assert_eq!(err.to_string(), "'Alice' is already on the wheel");
    }
}
