//! Shell dialects
//!
//! Each shell lists aliases and builtins with its own command lines and
//! quotes alias values its own way, so both live behind one trait.

use crate::alias::AliasRecord;

/// Per-shell command lines and alias-line grammar
pub trait ShellDialect: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Arguments that make the shell print `name=value` for every alias
    fn alias_list_args(&self) -> Vec<String>;

    /// Arguments that make the shell print one builtin name per line
    fn builtin_list_args(&self) -> Vec<String>;

    /// Parse one line of alias output. `None` means the line is not an alias.
    fn parse_alias_line(&self, line: &str) -> Option<AliasRecord>;
}

/// The Z shell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Zsh;

impl Zsh {
    /// Whether a shell path or name refers to zsh
    pub fn matches(shell: &str) -> bool {
        let file_name = shell.rsplit(['/', '\\']).next().unwrap_or(shell);
        file_name.to_lowercase().contains("zsh")
    }
}

fn is_alias_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | ':' | '-')
}

impl ShellDialect for Zsh {
    fn name(&self) -> &'static str {
        "zsh"
    }

    fn alias_list_args(&self) -> Vec<String> {
        vec!["-ic".to_string(), "alias".to_string()]
    }

    fn builtin_list_args(&self) -> Vec<String> {
        vec!["-ic".to_string(), r#"printf "%s\n" ${(k)builtins}"#.to_string()]
    }

    /// `name=value`, where the value is unwrapped only when the same quote
    /// character opens and closes it around at least one character. Anything
    /// else (`'ls`, `''`, `"a'`) is kept verbatim.
    fn parse_alias_line(&self, line: &str) -> Option<AliasRecord> {
        let (name, rest) = line.split_once('=')?;
        if name.is_empty() || !name.chars().all(is_alias_name_char) || rest.is_empty() {
            return None;
        }

        let value = match rest.as_bytes()[0] {
            q @ (b'\'' | b'"') if rest.len() >= 3 && rest.as_bytes()[rest.len() - 1] == q => {
                &rest[1..rest.len() - 1]
            }
            _ => rest,
        };

        Some(AliasRecord {
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}
