//! Command bar parsing
//!
//! Accepted commands:
//! - `describe <topic>` / `d <topic>`
//! - `edit <topic>` / `e <topic>`
//! - `clear`
//! - `refresh`
//! - `quit` / `q`

/// A parsed command bar entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Describe(String),
    Edit(String),
    Clear,
    Refresh,
    Quit,
}

/// Parse one command line. The error is a message for the status line.
pub fn parse_command(input: &str) -> Result<Command, String> {
    let mut words = input.split_whitespace();
    let Some(verb) = words.next() else {
        return Err("Empty command".to_string());
    };
    let args: Vec<&str> = words.collect();

    let topic_arg = |name: &str| match args.as_slice() {
        [topic] => Ok(topic.to_string()),
        [] => Err(format!("Usage: {name} <topic>")),
        _ => Err(format!("{name} takes exactly one topic")),
    };
    let no_args = |cmd: Command| {
        if args.is_empty() {
            Ok(cmd)
        } else {
            Err(format!("{verb} takes no arguments"))
        }
    };

    match verb {
        "describe" | "d" => topic_arg("describe").map(Command::Describe),
        "edit" | "e" => topic_arg("edit").map(Command::Edit),
        "clear" | "c" => no_args(Command::Clear),
        "refresh" | "r" => no_args(Command::Refresh),
        "quit" | "q" => no_args(Command::Quit),
        other => Err(format!("Unknown command: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_describe() {
        assert_eq!(
            parse_command("describe orders"),
            Ok(Command::Describe("orders".into()))
        );
        assert_eq!(
            parse_command("  d   orders "),
            Ok(Command::Describe("orders".into()))
        );
    }

    #[test]
    fn test_parse_edit() {
        assert_eq!(parse_command("e payments"), Ok(Command::Edit("payments".into())));
    }

    #[test]
    fn test_parse_bare_commands() {
        assert_eq!(parse_command("clear"), Ok(Command::Clear));
        assert_eq!(parse_command("refresh"), Ok(Command::Refresh));
        assert_eq!(parse_command("q"), Ok(Command::Quit));
    }

    #[test]
    fn test_missing_topic() {
        assert_eq!(
            parse_command("describe"),
            Err("Usage: describe <topic>".to_string())
        );
    }

    #[test]
    fn test_extra_arguments_rejected() {
        assert!(parse_command("describe a b").is_err());
        assert!(parse_command("quit now").is_err());
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse_command("produce orders"),
            Err("Unknown command: produce".to_string())
        );
        assert!(parse_command("   ").is_err());
    }
}
