//! # Movement command module
//!
//! Movement command verbs understood by the vehicle firmware. Each verb maps
//! to a firmware endpoint of the same name.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// ENUMERATIONS
// ------------------------------------------------------------------------------------------------

/// A movement command verb.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MoveCommand {
    Forward,
    Backward,
    Left,
    Right,
    Stop,
}

/// Possible parsing errors.
#[derive(Debug, Error)]
#[error("`{0}` is not a recognised movement command")]
pub struct MoveCommandParseError(String);

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl MoveCommand {
    /// Get the firmware endpoint name for this command.
    pub fn endpoint(&self) -> &'static str {
        match self {
            MoveCommand::Forward => "forward",
            MoveCommand::Backward => "backward",
            MoveCommand::Left => "left",
            MoveCommand::Right => "right",
            MoveCommand::Stop => "stop",
        }
    }
}

impl fmt::Display for MoveCommand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.endpoint())
    }
}

impl FromStr for MoveCommand {
    type Err = MoveCommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forward" => Ok(MoveCommand::Forward),
            "backward" => Ok(MoveCommand::Backward),
            "left" => Ok(MoveCommand::Left),
            "right" => Ok(MoveCommand::Right),
            "stop" => Ok(MoveCommand::Stop),
            _ => Err(MoveCommandParseError(String::from(s))),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_endpoint_names() {
        assert_eq!(MoveCommand::Forward.endpoint(), "forward");
        assert_eq!(MoveCommand::Backward.endpoint(), "backward");
        assert_eq!(MoveCommand::Left.endpoint(), "left");
        assert_eq!(MoveCommand::Right.endpoint(), "right");
        assert_eq!(MoveCommand::Stop.endpoint(), "stop");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("forward".parse::<MoveCommand>().ok(), Some(MoveCommand::Forward));
        assert_eq!("stop".parse::<MoveCommand>().ok(), Some(MoveCommand::Stop));
        assert!("faster".parse::<MoveCommand>().is_err());
        assert!("".parse::<MoveCommand>().is_err());
    }
}
