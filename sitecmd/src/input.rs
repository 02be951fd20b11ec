//! `clap` adapter for [`CliInput`]

use clap::{ArgAction, ArgMatches};
use sitecmd_core::{CliInput, Value};
use std::collections::HashMap;

/// How a defined argument yields its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Flag,
    Single,
    Multiple,
}

#[derive(Debug, Clone, Copy)]
struct Definition {
    positional: bool,
    shape: Shape,
}

/// Parsed input of one command, read through its clap definition
#[derive(Debug, Clone)]
pub struct ClapInput {
    matches: ArgMatches,
    definitions: HashMap<String, Definition>,
}

impl ClapInput {
    /// Pair a command definition with the matches it produced
    pub fn new(definition: &clap::Command, matches: ArgMatches) -> Self {
        let definitions = definition
            .get_arguments()
            .filter_map(|arg| {
                let shape = match arg.get_action() {
                    ArgAction::SetTrue | ArgAction::SetFalse => Shape::Flag,
                    ArgAction::Append => Shape::Multiple,
                    ArgAction::Set => match arg.get_num_args() {
                        Some(range) if range.max_values() > 1 => Shape::Multiple,
                        _ => Shape::Single,
                    },
                    _ => return None,
                };
                Some((
                    arg.get_id().as_str().to_string(),
                    Definition {
                        positional: arg.is_positional(),
                        shape,
                    },
                ))
            })
            .collect();

        Self {
            matches,
            definitions,
        }
    }

    fn value(&self, name: &str) -> Value {
        let Some(definition) = self.definitions.get(name) else {
            return Value::Null;
        };

        match definition.shape {
            Shape::Flag => Value::Bool(
                self.matches
                    .try_get_one::<bool>(name)
                    .ok()
                    .flatten()
                    .copied()
                    .unwrap_or(false),
            ),
            Shape::Single => self
                .raw_values(name)
                .and_then(|mut values| values.pop())
                .map(Value::String)
                .unwrap_or(Value::Null),
            Shape::Multiple => match self.raw_values(name) {
                Some(values) => Value::List(values.into_iter().map(Value::String).collect()),
                None => Value::List(Vec::new()),
            },
        }
    }

    fn raw_values(&self, name: &str) -> Option<Vec<String>> {
        self.matches
            .try_get_raw(name)
            .ok()
            .flatten()
            .map(|raw| {
                raw.map(|value| value.to_string_lossy().into_owned())
                    .collect()
            })
    }
}

impl CliInput for ClapInput {
    fn has_argument(&self, name: &str) -> bool {
        self.definitions.get(name).is_some_and(|d| d.positional)
    }

    fn get_argument(&self, name: &str) -> Value {
        if self.has_argument(name) {
            self.value(name)
        } else {
            Value::Null
        }
    }

    fn has_option(&self, name: &str) -> bool {
        self.definitions.get(name).is_some_and(|d| !d.positional)
    }

    fn get_option(&self, name: &str) -> Value {
        if self.has_option(name) {
            self.value(name)
        } else {
            Value::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Arg;

    fn definition() -> clap::Command {
        clap::Command::new("sync:users")
            .arg(Arg::new("user"))
            .arg(Arg::new("limit").long("limit").default_value("10"))
            .arg(Arg::new("dry-run").long("dry-run").action(ArgAction::SetTrue))
            .arg(Arg::new("tag").long("tag").action(ArgAction::Append))
    }

    fn parse(args: &[&str]) -> ClapInput {
        let definition = definition();
        let matches = definition.clone().try_get_matches_from(args).unwrap();
        ClapInput::new(&definition, matches)
    }

    #[test]
    fn test_arguments_and_options_are_distinguished() {
        let input = parse(&["sync:users", "alice"]);
        assert!(input.has_argument("user"));
        assert!(!input.has_option("user"));
        assert!(input.has_option("limit"));
        assert!(!input.has_argument("limit"));
        assert!(!input.has_option("missing"));
    }

    #[test]
    fn test_values() {
        let input = parse(&[
            "sync:users",
            "alice",
            "--limit=25",
            "--dry-run",
            "--tag",
            "a",
            "--tag",
            "b",
        ]);
        assert_eq!(input.get_argument("user"), Value::from("alice"));
        assert_eq!(input.get_option("limit"), Value::from("25"));
        assert_eq!(input.get_option("dry-run"), Value::Bool(true));
        assert_eq!(
            input.get_option("tag"),
            Value::List(vec![Value::from("a"), Value::from("b")])
        );
    }

    #[test]
    fn test_absent_values() {
        let input = parse(&["sync:users"]);
        assert!(input.get_argument("user").is_null());
        assert_eq!(input.get_option("limit"), Value::from("10"));
        assert_eq!(input.get_option("dry-run"), Value::Bool(false));
        assert_eq!(input.get_option("tag"), Value::List(vec![]));
    }
}
