#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `:n [N]`
    Next(usize),
    /// `:p [N]`
    Prev(usize),
    /// `:x [N]`: list position `N`, or the first file.
    Index(Option<usize>),
    /// `:e [LIST]`: open a list of names, or re-open the current file.
    Examine(Option<String>),
    /// `:f`
    FileInfo,
    /// `:l NAME`
    Log(String),
    /// `:r`
    Reopen,
    Quit,
    Unknown(String),
}

pub fn parse_command(input: &str) -> Option<Command> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    };
    let argument = (!rest.is_empty()).then(|| rest.to_string());

    let parsed = match command {
        ":n" => match count(rest) {
            Some(n) => Command::Next(n),
            None => Command::Unknown(trimmed.to_string()),
        },
        ":p" => match count(rest) {
            Some(n) => Command::Prev(n),
            None => Command::Unknown(trimmed.to_string()),
        },
        ":x" => match argument {
            None => Command::Index(None),
            Some(arg) => match arg.parse() {
                Ok(index) => Command::Index(Some(index)),
                Err(_) => Command::Unknown(trimmed.to_string()),
            },
        },
        ":e" => Command::Examine(argument),
        ":f" => Command::FileInfo,
        ":l" => match argument {
            Some(name) => Command::Log(name),
            None => Command::Unknown(trimmed.to_string()),
        },
        ":r" => Command::Reopen,
        "q" | ":q" => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    };

    Some(parsed)
}

/// Repeat count; absent means one.
fn count(arg: &str) -> Option<usize> {
    if arg.is_empty() {
        return Some(1);
    }
    arg.parse().ok()
}
