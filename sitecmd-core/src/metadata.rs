//! Command identity: names and descriptions
//!
//! A command's name and description come from, in order of preference, an
//! explicit value set on the command, a value inherited from a base
//! implementation, or inference from the command type itself:
//!
//! - the name is derived from the short type name (`SyncUsers` → `sync:users`)
//! - the description is derived from the type's documentation text
//!
//! A namespace can then qualify the raw name (`site` + `sync:users` →
//! `site:sync-users`).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static CAMEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z])([A-Z])").expect("valid boundary pattern"));

/// How documentation text is turned into a description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocStyle {
    /// Line by line: drops delimiters, blank lines and `@tag` lines
    #[default]
    Lines,
    /// Whole block: strips surrounding comment characters and whitespace only
    Block,
}

/// Structural facts about a command type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeInfo {
    /// Type name, possibly qualified with a module path
    pub type_name: &'static str,
    /// Raw documentation text attached to the type
    pub docs: &'static str,
}

impl TypeInfo {
    /// Type information for `T` with the given documentation text
    pub fn of<T: ?Sized>(docs: &'static str) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            docs,
        }
    }

    /// Type name without module path or generic arguments
    pub fn short_name(&self) -> &'static str {
        short_type_name(self.type_name)
    }
}

/// Naming and description sources of one command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    /// Name set on the command itself
    pub explicit_name: Option<String>,
    /// Group the command name is qualified with
    pub namespace: Option<String>,
    /// Description set on the command itself
    pub explicit_description: Option<String>,
    /// Name provided by a base implementation
    pub inherited_name: Option<String>,
    /// Description provided by a base implementation
    pub inherited_description: Option<String>,
    /// Description inference variant
    #[serde(default)]
    pub doc_style: DocStyle,
}

impl CommandDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.explicit_name = Some(name.into());
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.explicit_description = Some(description.into());
        self
    }

    pub fn inherit_name(mut self, name: impl Into<String>) -> Self {
        self.inherited_name = Some(name.into());
        self
    }

    pub fn inherit_description(mut self, description: impl Into<String>) -> Self {
        self.inherited_description = Some(description.into());
        self
    }

    pub fn doc_style(mut self, style: DocStyle) -> Self {
        self.doc_style = style;
        self
    }

    /// Name before namespace qualification
    pub fn resolve_raw_name(&self, info: &TypeInfo) -> Option<String> {
        non_empty(&self.explicit_name)
            .or_else(|| non_empty(&self.inherited_name))
            .map(str::to_string)
            .or_else(|| infer_name(info.short_name()))
    }

    /// Fully qualified name
    pub fn resolve_name(&self, info: &TypeInfo) -> Option<String> {
        compose_name(
            self.namespace.as_deref().unwrap_or_default(),
            self.resolve_raw_name(info).as_deref(),
        )
    }

    /// Description, possibly empty
    pub fn resolve_description(&self, info: &TypeInfo) -> String {
        non_empty(&self.explicit_description)
            .or_else(|| non_empty(&self.inherited_description))
            .map(str::to_string)
            .unwrap_or_else(|| infer_description(info.docs, self.doc_style))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Strip module path and generic arguments from a type name
///
/// `my_app::commands::SyncUsers` → `SyncUsers`,
/// `my_app::Wrapper<my_app::Inner>` → `Wrapper`.
pub fn short_type_name(type_name: &str) -> &str {
    let base = type_name.split('<').next().unwrap_or(type_name);
    base.rsplit("::").next().unwrap_or(base)
}

/// Infer a command name from a short type name
///
/// Every lowercase→uppercase boundary becomes a hyphen, the result is
/// lowercased, and the first hyphen becomes the group separator:
/// `SendEmailReport` → `send:email-report`.
pub fn infer_name(short_name: &str) -> Option<String> {
    if short_name.is_empty() {
        return None;
    }

    let hyphenated = CAMEL_BOUNDARY.replace_all(short_name, "$1-$2").to_lowercase();

    Some(hyphenated.replacen('-', ":", 1))
}

/// Infer a description from raw documentation text
pub fn infer_description(docs: &str, style: DocStyle) -> String {
    if docs.trim().is_empty() {
        return String::new();
    }

    match style {
        DocStyle::Lines => describe_lines(docs),
        DocStyle::Block => describe_block(docs),
    }
}

fn describe_lines(docs: &str) -> String {
    let mut lines: Vec<&str> = docs.lines().collect();

    // Delimiters may share a line with text, or be the whole comment
    if let Some(first) = lines.first_mut() {
        let line: &str = *first;
        if let Some(rest) = line.trim_start().strip_prefix("/**") {
            *first = rest;
        }
    }
    if let Some(last) = lines.last_mut() {
        let line: &str = *last;
        if let Some(rest) = line.trim_end().strip_suffix("*/") {
            *last = rest;
        }
    }

    lines
        .into_iter()
        .map(|line| line.trim_end().trim_start_matches([' ', '*', '\t', '\r', '\x0b', '\0']))
        .filter(|line| !line.is_empty() && !line.starts_with('@'))
        .collect::<Vec<_>>()
        .join(" ")
}

fn describe_block(docs: &str) -> String {
    docs.trim_start_matches(|c: char| c == '/' || c == '*' || c.is_whitespace())
        .trim_end_matches(|c: char| c == '/' || c == '*' || c.is_whitespace())
        .trim()
        .to_string()
}

/// Qualify a raw name with a namespace
///
/// An embedded colon in the raw name is demoted to a hyphen so the
/// namespace separator stays the only group separator.
pub fn compose_name(namespace: &str, raw_name: Option<&str>) -> Option<String> {
    let raw_name = raw_name?;

    if namespace.is_empty() {
        return Some(raw_name.to_string());
    }

    Some(format!("{}:{}", namespace, raw_name.replacen(':', "-", 1)))
}

/// Documentation text of an item, captured at compile time
///
/// Wraps a struct definition and records its `///` lines in the
/// `DOCS` associated constant.
///
/// ```
/// sitecmd_core::command_docs! {
///     /// Sync all users.
///     ///
///     /// @since 1.0
///     #[derive(Default)]
///     pub struct SyncUsers;
/// }
///
/// assert_eq!(SyncUsers::DOCS, " Sync all users.\n\n @since 1.0\n");
/// ```
#[macro_export]
macro_rules! command_docs {
    (@munch [$($doc:literal)*] [$($attr:tt)*] #[doc = $d:literal] $($rest:tt)*) => {
        $crate::command_docs!(@munch [$($doc)* $d] [$($attr)* #[doc = $d]] $($rest)*);
    };
    (@munch [$($doc:literal)*] [$($attr:tt)*] #[$m:meta] $($rest:tt)*) => {
        $crate::command_docs!(@munch [$($doc)*] [$($attr)* #[$m]] $($rest)*);
    };
    (@munch [$($doc:literal)*] [$($attr:tt)*] $vis:vis struct $name:ident $($body:tt)*) => {
        $($attr)*
        $vis struct $name $($body)*

        impl $name {
            /// Raw documentation text of this command
            pub const DOCS: &'static str = concat!($($doc, "\n"),*);
        }
    };
    ($($input:tt)*) => {
        $crate::command_docs!(@munch [] [] $($input)*);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SyncUsers;

    #[test]
    fn test_infer_name_two_words() {
        assert_eq!(infer_name("SyncUsers").as_deref(), Some("sync:users"));
    }

    #[test]
    fn test_infer_name_single_word() {
        assert_eq!(infer_name("Import").as_deref(), Some("import"));
    }

    #[test]
    fn test_infer_name_only_first_hyphen_becomes_colon() {
        assert_eq!(
            infer_name("SendEmailReport").as_deref(),
            Some("send:email-report")
        );
        assert_eq!(infer_name("ABTestRunner").as_deref(), Some("abtest:runner"));
    }

    #[test]
    fn test_infer_name_empty() {
        assert_eq!(infer_name(""), None);
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("app::commands::SyncUsers"), "SyncUsers");
        assert_eq!(short_type_name("app::Wrap<app::Inner>"), "Wrap");
        assert_eq!(short_type_name("Plain"), "Plain");
        assert_eq!(TypeInfo::of::<SyncUsers>("").short_name(), "SyncUsers");
    }

    #[test]
    fn test_compose_name() {
        assert_eq!(
            compose_name("site", Some("sync:users")).as_deref(),
            Some("site:sync-users")
        );
        assert_eq!(
            compose_name("", Some("sync:users")).as_deref(),
            Some("sync:users")
        );
        assert_eq!(compose_name("site", None), None);
        assert_eq!(
            compose_name("site", Some("import")).as_deref(),
            Some("site:import")
        );
        assert_eq!(
            compose_name("site", Some("a:b:c")).as_deref(),
            Some("site:a-b:c")
        );
    }

    #[test]
    fn test_compose_name_is_pure() {
        let first = compose_name("site", Some("sync:users"));
        let second = compose_name("site", Some("sync:users"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_describe_lines_drops_tags() {
        let docs = "/**\n * Sync all users.\n *\n * @since 1.0\n */";
        assert_eq!(infer_description(docs, DocStyle::Lines), "Sync all users.");
    }

    #[test]
    fn test_describe_lines_delimiters_sharing_a_line() {
        assert_eq!(
            infer_description("/** Sync all users. */", DocStyle::Lines),
            "Sync all users."
        );
        assert_eq!(
            infer_description("/** Sync all users.\n * More.\n */", DocStyle::Lines),
            "Sync all users. More."
        );
        assert_eq!(
            infer_description("/**\n * Sync all users.\n * More. */", DocStyle::Lines),
            "Sync all users. More."
        );
    }

    #[test]
    fn test_describe_lines_joins_rustdoc_lines() {
        let docs = " Sync all users\n across every site.\n\n @since 1.0\n";
        assert_eq!(
            infer_description(docs, DocStyle::Lines),
            "Sync all users across every site."
        );
    }

    #[test]
    fn test_describe_block_keeps_tags() {
        let docs = "/**\n * Sync all users.\n * @since 1.0\n */";
        let description = infer_description(docs, DocStyle::Block);
        assert!(description.starts_with("Sync all users."));
        assert!(description.ends_with("@since 1.0"));
    }

    #[test]
    fn test_describe_empty_docs() {
        assert_eq!(infer_description("", DocStyle::Lines), "");
        assert_eq!(infer_description("  \n ", DocStyle::Block), "");
    }

    #[test]
    fn test_resolution_order() {
        let info = TypeInfo::of::<SyncUsers>(" Inferred text.");

        let descriptor = CommandDescriptor::new();
        assert_eq!(descriptor.resolve_name(&info).as_deref(), Some("sync:users"));
        assert_eq!(descriptor.resolve_description(&info), "Inferred text.");

        let descriptor = CommandDescriptor::new()
            .inherit_name("base:name")
            .inherit_description("Inherited");
        assert_eq!(descriptor.resolve_name(&info).as_deref(), Some("base:name"));
        assert_eq!(descriptor.resolve_description(&info), "Inherited");

        let descriptor = descriptor.name("own").description("Own");
        assert_eq!(descriptor.resolve_name(&info).as_deref(), Some("own"));
        assert_eq!(descriptor.resolve_description(&info), "Own");
    }

    #[test]
    fn test_empty_explicit_name_falls_through() {
        let info = TypeInfo::of::<SyncUsers>("");
        let descriptor = CommandDescriptor::new().name("");
        assert_eq!(descriptor.resolve_name(&info).as_deref(), Some("sync:users"));
    }

    #[test]
    fn test_namespace_applies_to_inferred_name() {
        let info = TypeInfo::of::<SyncUsers>("");
        let descriptor = CommandDescriptor::new().namespace("site");
        assert_eq!(
            descriptor.resolve_name(&info).as_deref(),
            Some("site:sync-users")
        );
    }

    crate::command_docs! {
        /// Rebuild search indexes.
        ///
        /// @since 2.0
        #[allow(dead_code)]
        struct RebuildIndex {
            full: bool,
        }
    }

    #[test]
    fn test_command_docs_macro() {
        let info = TypeInfo::of::<RebuildIndex>(RebuildIndex::DOCS);
        let descriptor = CommandDescriptor::new();
        assert_eq!(
            descriptor.resolve_name(&info).as_deref(),
            Some("rebuild:index")
        );
        assert_eq!(descriptor.resolve_description(&info), "Rebuild search indexes.");
    }
}
