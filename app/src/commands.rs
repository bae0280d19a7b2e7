//! Form commands read from the terminal

use crate::state::AppState;
use chrono::NaiveDate;
use cover_model::{suggest, FieldName, InputKind};
use std::fmt::Write;
use std::sync::Arc;

pub const HELP: &str = "\
Commands:
  set <field> <value>   set a field by key or number (see `show`)
  show                  list the fields and their values
  departments [query]   list department suggestions
  export                generate the cover page PDF
  clear                 empty every field
  help                  show this help
  quit                  exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { field: FieldName, value: String },
    Show,
    Departments(String),
    Export,
    Clear,
    Help,
    Quit,
}

/// What the form loop should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Print(String),
    Nothing,
    Quit,
}

/// Parse one input line; blank lines give `Ok(None)`
pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = split_word(line);

    let command = match verb.to_ascii_lowercase().as_str() {
        "set" => {
            let (name, value) = split_word(rest);
            if name.is_empty() {
                return Err("usage: set <field> <value>".to_string());
            }
            let field = resolve_field(name)?;
            check_value(field, value)?;
            Command::Set {
                field,
                value: value.to_string(),
            }
        }
        "show" => Command::Show,
        "departments" | "depts" => Command::Departments(rest.to_string()),
        "export" | "download" => Command::Export,
        "clear" => Command::Clear,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command `{}`, try `help`", other)),
    };
    Ok(Some(command))
}

fn split_word(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (s, ""),
    }
}

/// A field by its 1-based form position or its key
fn resolve_field(name: &str) -> Result<FieldName, String> {
    if let Ok(n) = name.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| FieldName::ALL.get(i).copied())
            .ok_or_else(|| format!("no field number {}", n));
    }
    name.parse::<FieldName>().map_err(|e| e.to_string())
}

fn check_value(field: FieldName, value: &str) -> Result<(), String> {
    if field.input_kind() == InputKind::Date
        && !value.is_empty()
        && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err()
    {
        return Err(format!("{} must be a date like 2024-01-15", field.label()));
    }
    Ok(())
}

pub fn execute(state: &Arc<AppState>, command: Command) -> Outcome {
    match command {
        Command::Set { field, value } => {
            state.set_field(field, value);
            Outcome::Nothing
        }
        Command::Show => Outcome::Print(show(state)),
        Command::Departments(query) => Outcome::Print(departments(&query)),
        Command::Export => match state.start_export() {
            Some(_) => Outcome::Nothing,
            None => Outcome::Print("An export is already running, ignored".to_string()),
        },
        Command::Clear => {
            state.clear();
            Outcome::Print("Cleared all fields".to_string())
        }
        Command::Help => Outcome::Print(HELP.to_string()),
        Command::Quit => Outcome::Quit,
    }
}

fn show(state: &AppState) -> String {
    let info = state.snapshot();
    let mut out = String::new();
    for (i, (field, value)) in info.fields().enumerate() {
        let marker = if field.is_required() { "*" } else { " " };
        let _ = writeln!(
            out,
            "{:>2}. {:<22}{} {}",
            i + 1,
            field.form_label(),
            marker,
            value
        );
    }
    let _ = write!(out, "[{}]", state.pipeline.control().label());
    out
}

fn departments(query: &str) -> String {
    let matches = suggest(query);
    if matches.is_empty() {
        return format!("No departments match `{}`", query.trim());
    }
    matches
        .iter()
        .map(|dept| format!("{:<12} {}", dept.code, dept.name))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cover_render::SkiaRasterizer;
    use export_pipeline::ExportPipeline;
    use store::MemorySink;

    fn state() -> Arc<AppState> {
        let pipeline = ExportPipeline::new(
            Arc::new(SkiaRasterizer::new()),
            Arc::new(MemorySink::new()),
        );
        Arc::new(AppState::new(pipeline))
    }

    #[test]
    fn test_parse_set_by_key_and_number() {
        assert_eq!(
            parse("set studentName Jane Doe").unwrap(),
            Some(Command::Set {
                field: FieldName::StudentName,
                value: "Jane Doe".to_string()
            })
        );
        assert_eq!(
            parse("  set 2   CS101 ").unwrap(),
            Some(Command::Set {
                field: FieldName::CourseName,
                value: "CS101".to_string()
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse("set 0 x").is_err());
        assert!(parse("set 10 x").is_err());
        assert!(parse("set nickname x").is_err());
        assert!(parse("set").is_err());
        assert!(parse("frobnicate").is_err());
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn test_date_field_checks_format() {
        assert!(parse("set submissionDate 2024-01-15").is_ok());
        assert!(parse("set submissionDate").is_ok());
        assert!(parse("set submissionDate 15/01/2024").is_err());
    }

    #[test]
    fn test_set_show_clear() {
        let state = state();
        let set = parse("set 3 Jane Doe").unwrap().unwrap();
        assert_eq!(execute(&state, set), Outcome::Nothing);

        let Outcome::Print(shown) = execute(&state, Command::Show) else {
            panic!("show prints");
        };
        assert!(shown.contains(" 3. Student Name          * Jane Doe"));
        assert!(shown.contains("Submitted To"));
        assert!(shown.ends_with("[Download as PDF]"));

        execute(&state, Command::Clear);
        assert_eq!(state.snapshot().get(FieldName::StudentName), "");
    }

    #[test]
    fn test_departments() {
        assert_eq!(departments("").lines().count(), 14);
        assert!(departments("eng").starts_with("CSE"));
        assert_eq!(departments("zzz"), "No departments match `zzz`");
    }

    #[tokio::test]
    async fn test_export_while_busy_is_ignored() {
        let state = state();
        let _held = state.pipeline.control().try_acquire().unwrap();
        assert_eq!(
            execute(&state, Command::Export),
            Outcome::Print("An export is already running, ignored".to_string())
        );
    }
}
