use archiver_core::FormField;

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Refresh,
    List,
    Search(String),
    Select(String),
    Deselect,
    View,
    Rename(String),
    Set(String),
    Save,
    Cancel,
    Delete(String),
    Jobs,
    JobsRefresh,
    New,
    Field(FormField, String),
    Scopes,
    Submit,
    Back,
    Dismiss,
    Empty,
    Invalid(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "refresh" => Command::Refresh,
        "list" | "ls" => Command::List,
        "search" => Command::Search(rest.to_string()),
        "select" => required(rest, "select <name>", Command::Select),
        "deselect" => Command::Deselect,
        "view" => Command::View,
        "rename" => required(rest, "rename <name>", Command::Rename),
        // The buffer is sent as typed; blank values are rejected by the store.
        "set" => Command::Set(rest.to_string()),
        "save" => Command::Save,
        "cancel" => Command::Cancel,
        "delete" | "rm" => required(rest, "delete <name>", Command::Delete),
        "jobs" => match rest {
            "" => Command::Jobs,
            "refresh" => Command::JobsRefresh,
            other => Command::Invalid(format!("unknown jobs option '{other}'")),
        },
        "new" => Command::New,
        "field" => parse_field(rest),
        "scopes" => Command::Scopes,
        "submit" => Command::Submit,
        "back" => Command::Back,
        "dismiss" => Command::Dismiss,
        other => Command::Invalid(format!("unknown command '{other}', try 'help'")),
    }
}

fn required(rest: &str, usage: &str, build: fn(String) -> Command) -> Command {
    if rest.is_empty() {
        Command::Invalid(format!("usage: {usage}"))
    } else {
        build(rest.to_string())
    }
}

fn parse_field(rest: &str) -> Command {
    let (name, value) = match rest.split_once(char::is_whitespace) {
        Some((name, value)) => (name, value.trim()),
        None => (rest, ""),
    };
    let field = match name.to_ascii_lowercase().as_str() {
        "url" => FormField::Url,
        "name" => FormField::Name,
        "scope" | "scopetype" => FormField::Scope,
        "page_limit" | "pages" => FormField::PageLimit,
        "size_limit" | "size" => FormField::SizeLimit,
        "depth" => FormField::Depth,
        "" => return Command::Invalid("usage: field <field> <value>".to_string()),
        other => return Command::Invalid(format!("unknown field '{other}'")),
    };
    Command::Field(field, value.to_string())
}
