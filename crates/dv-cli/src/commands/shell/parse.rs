//! Shell line parsing.

use std::path::PathBuf;

use dv_checks::FieldPath;
use dv_core::enums::ReportKind;
use dv_workflow::Section;

pub const HELP: &str = "\
commands:
  projects                     list projects
  select <id>                  select a project (starts a new session)
  upload <path>                upload a dataset
  goto <section>               upload | configure | run-checks | download
  show                         show the configuration form
  set <key> <value>            set a field (key may be group.child)
  nest <group> <child> <value> set a field inside a group
  toggle <key> <column> on|off include or exclude one column
  all <key> | none <key>       select every column or none
  defaults                     load the service's default configuration
  save                         submit the configuration
  run                          run the checks
  dashboard                    show the run summary
  download issues|summary      download a report
  status                       show readiness
  logout | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Help,
    Projects,
    Select(i64),
    Upload(PathBuf),
    Goto(Section),
    Show,
    Set { path: FieldPath, value: String },
    Toggle { path: FieldPath, column: String, included: bool },
    All(FieldPath),
    None(FieldPath),
    Defaults,
    Save,
    Run,
    Dashboard,
    Download(ReportKind),
    Status,
    Logout,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    let Some((word, rest)) = split_word(line) else {
        return Ok(None);
    };

    let command = match word {
        "help" | "?" => ShellCommand::Help,
        "projects" => ShellCommand::Projects,
        "select" => {
            let id = rest.trim();
            ShellCommand::Select(id.parse().map_err(|_| format!("'{id}' is not a project id"))?)
        }
        "upload" => ShellCommand::Upload(PathBuf::from(required(rest, "upload <path>")?)),
        "goto" => ShellCommand::Goto(required(rest, "goto <section>")?.parse()?),
        "show" => ShellCommand::Show,
        "set" => {
            let (key, value) = split_word(rest).ok_or("usage: set <key> <value>")?;
            ShellCommand::Set {
                path: FieldPath::parse(key),
                value: value.trim().to_string(),
            }
        }
        "nest" => {
            let (group, rest) = split_word(rest).ok_or("usage: nest <group> <child> <value>")?;
            let (child, value) = split_word(rest).ok_or("usage: nest <group> <child> <value>")?;
            ShellCommand::Set {
                path: FieldPath::nested(group, child),
                value: value.trim().to_string(),
            }
        }
        "toggle" => {
            let usage = "usage: toggle <key> <column> on|off";
            let (key, rest) = split_word(rest).ok_or(usage)?;
            let (column, state) = split_word(rest).ok_or(usage)?;
            let included = match state.trim() {
                "on" | "yes" | "true" => true,
                "off" | "no" | "false" => false,
                _ => return Err(usage.to_string()),
            };
            ShellCommand::Toggle {
                path: FieldPath::parse(key),
                column: column.to_string(),
                included,
            }
        }
        "all" => ShellCommand::All(FieldPath::parse(required(rest, "all <key>")?)),
        "none" => ShellCommand::None(FieldPath::parse(required(rest, "none <key>")?)),
        "defaults" => ShellCommand::Defaults,
        "save" => ShellCommand::Save,
        "run" => ShellCommand::Run,
        "dashboard" => ShellCommand::Dashboard,
        "download" => ShellCommand::Download(
            required(rest, "download issues|summary")?
                .parse()
                .map_err(|e: dv_core::CoreError| e.to_string())?,
        ),
        "status" => ShellCommand::Status,
        "logout" => ShellCommand::Logout,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Some(command))
}

fn split_word(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() {
        return None;
    }
    Some(text.split_once(char::is_whitespace).unwrap_or((text, "")))
}

fn required<'a>(rest: &'a str, usage: &str) -> Result<&'a str, String> {
    let rest = rest.trim();
    if rest.is_empty() {
        Err(format!("usage: {usage}"))
    } else {
        Ok(rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn set_keeps_the_rest_of_the_line() {
        assert_eq!(
            parse(r#"set category_validation {"gender": ["M", "F"]}"#),
            Ok(Some(ShellCommand::Set {
                path: FieldPath::top("category_validation"),
                value: r#"{"gender": ["M", "F"]}"#.to_string(),
            }))
        );
    }

    #[test]
    fn nest_addresses_a_group_child() {
        assert_eq!(
            parse("nest outlier_detection threshold 2.5"),
            Ok(Some(ShellCommand::Set {
                path: FieldPath::nested("outlier_detection", "threshold"),
                value: "2.5".to_string(),
            }))
        );
    }

    #[test]
    fn toggle_reads_on_and_off() {
        assert_eq!(
            parse("toggle unique_id_generation.columns_to_concat name on"),
            Ok(Some(ShellCommand::Toggle {
                path: FieldPath::nested("unique_id_generation", "columns_to_concat"),
                column: "name".to_string(),
                included: true,
            }))
        );
        assert!(parse("toggle text_columns name maybe").is_err());
    }

    #[test]
    fn sections_and_reports_parse() {
        assert_eq!(parse("goto run"), Ok(Some(ShellCommand::Goto(Section::RunChecks))));
        assert_eq!(
            parse("download summary"),
            Ok(Some(ShellCommand::Download(ReportKind::Summary)))
        );
        assert!(parse("goto nowhere").is_err());
    }

    #[test]
    fn bad_input_explains_itself() {
        assert_eq!(parse("select abc"), Err("'abc' is not a project id".to_string()));
        assert_eq!(parse("upload"), Err("usage: upload <path>".to_string()));
        assert!(parse("frobnicate").unwrap_err().contains("unknown command"));
    }
}
