//! Prefix-dispatch over reserved `!` tokens. Not a full parser: whitespace
//! tokenization only, no quoting, no flags.

pub const TOO_MANY_ARGUMENTS: &str = "Sorry, too many arguments given to command.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddAssignment { name: String, due_date: String },
    DeleteAssignment { name: String },
    ViewAssignments,
    UpdateCourse { code: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Token 0 named a command and the argument count matched.
    Command(Command),
    /// Token 0 named a command but the argument count didn't fit it.
    BadArity,
    /// Not a command; the message goes to the chat engine verbatim.
    NotACommand,
}

impl Command {
    pub fn parse(text: &str) -> ParseOutcome {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let Some(&head) = tokens.first() else {
            return ParseOutcome::NotACommand;
        };

        let args = &tokens[1..];
        match head {
            "!addassignment" => match args {
                [name, due_date] => ParseOutcome::Command(Command::AddAssignment {
                    name: name.to_string(),
                    due_date: due_date.to_string(),
                }),
                _ => ParseOutcome::BadArity,
            },
            "!deleteassignment" => match args {
                [name] => ParseOutcome::Command(Command::DeleteAssignment {
                    name: name.to_string(),
                }),
                _ => ParseOutcome::BadArity,
            },
            "!viewassignments" => match args {
                [] => ParseOutcome::Command(Command::ViewAssignments),
                _ => ParseOutcome::BadArity,
            },
            "!updatecourse" => match args {
                [code] => ParseOutcome::Command(Command::UpdateCourse {
                    code: code.to_string(),
                }),
                _ => ParseOutcome::BadArity,
            },
            _ => ParseOutcome::NotACommand,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_dispatches_with_two_arguments() {
        assert_eq!(
            Command::parse("!addassignment Essay 2024-05-01"),
            ParseOutcome::Command(Command::AddAssignment {
                name: "Essay".to_string(),
                due_date: "2024-05-01".to_string(),
            })
        );
    }

    #[test]
    fn view_with_extra_arguments_is_bad_arity() {
        assert_eq!(
            Command::parse("!viewassignments extra args"),
            ParseOutcome::BadArity
        );
    }

    #[test]
    fn missing_arguments_are_bad_arity_too() {
        assert_eq!(Command::parse("!addassignment Essay"), ParseOutcome::BadArity);
        assert_eq!(Command::parse("!deleteassignment"), ParseOutcome::BadArity);
    }

    #[test]
    fn unknown_tokens_fall_through_to_the_engine() {
        assert_eq!(
            Command::parse("what classes do i have today"),
            ParseOutcome::NotACommand
        );
        assert_eq!(Command::parse("!shrug"), ParseOutcome::NotACommand);
        assert_eq!(Command::parse("   "), ParseOutcome::NotACommand);
    }

    #[test]
    fn update_course_takes_one_argument() {
        assert_eq!(
            Command::parse("!updatecourse ca116"),
            ParseOutcome::Command(Command::UpdateCourse {
                code: "ca116".to_string(),
            })
        );
    }
}
