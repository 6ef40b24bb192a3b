use std::fmt::Display;

pub trait ErrorType: Display + PartialEq {}

// Which command line definition an error came from
#[derive(Debug, PartialEq, Clone)]
pub struct Location {
    pub argument: &'static str,
    pub position: usize
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.position == 0 {
            write!(f, "{}", self.argument)
        } else {
            write!(f, "{} #{}", self.argument, self.position)
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Error<T> {
    pub fn at(argument: &'static str, position: usize, error: T) -> Self {
        Error {
            location: Location { argument, position },
            error
        }
    }
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1b[31;49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", self.location, self.error)
    }
}

pub type Errors<T> = Vec<Error<T>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Oops;

    impl Display for Oops {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "oops")
        }
    }

    impl ErrorType for Oops {}

    #[test]
    fn location_display() {
        assert_eq!(Location { argument: "--start", position: 0 }.to_string(), "--start");
        assert_eq!(Location { argument: "--production", position: 3 }.to_string(), "--production #3");
    }

    #[test]
    fn error_display_is_coloured() {
        let error = Error::at("--terminals", 2, Oops);
        assert_eq!(error.to_string(), "\x1b[31;49;1m[--terminals #2]\x1b[39;49;1m  oops\x1b[0m");
    }
}
