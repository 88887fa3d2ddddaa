//! Render a descriptor as the CommonJS module the bundler loads.
//!
//! Strings go through `serde_json` so escaping is always valid JavaScript;
//! match patterns become regex literals that match the same paths.

use serde_json::Value;

use crate::bundle::{LoaderSpec, MatchPattern};
use crate::config::BuildConfig;
use crate::error::{ConfigError, Result};

const INDENT: &str = "    ";

/// Render `config` as `webpack.config.js` source.
///
/// # Example
///
/// ```
/// use packspec_config::{webpack_module, BuildConfig};
///
/// let source = webpack_module(&BuildConfig::example().unwrap()).unwrap();
/// assert!(source.contains("test: /\\.css$/"));
/// assert!(source.contains("mode: \"production\""));
/// ```
///
/// # Errors
///
/// `ConfigError::InvalidPattern` when a rule uses regex syntax JavaScript
/// would read differently.
pub fn webpack_module(config: &BuildConfig) -> Result<String> {
    let mut lines = vec![
        "// Generated by packspec. Edit the descriptor, not this file.".to_string(),
        String::new(),
        "module.exports = {".to_string(),
    ];

    lines.push(format!("{INDENT}mode: {},", js_string(config.mode.as_str())));
    if let Some(devtool) = &config.devtool {
        lines.push(format!("{INDENT}devtool: {},", js_string(devtool.as_str())));
    }

    lines.push(format!("{INDENT}entry: {{"));
    let entries: Vec<String> = config
        .entry
        .iter()
        .map(|(name, path)| {
            format!(
                "{INDENT}{INDENT}{}: {}",
                js_string(name),
                js_string(&path.to_string_lossy())
            )
        })
        .collect();
    lines.push(entries.join(",\n"));
    lines.push(format!("{INDENT}}},"));

    lines.push(format!("{INDENT}output: {{"));
    lines.push(format!(
        "{INDENT}{INDENT}filename: {},",
        js_string(&config.output.filename)
    ));
    lines.push(format!(
        "{INDENT}{INDENT}path: {}",
        js_string(&config.output.path.to_string_lossy())
    ));
    lines.push(format!("{INDENT}}},"));

    lines.push(format!("{INDENT}module: {{"));
    lines.push(format!("{INDENT}{INDENT}rules: ["));
    let mut rules = Vec::with_capacity(config.module.rules.len());
    for rule in &config.module.rules {
        let pad = INDENT.repeat(4);
        let mut fields = vec![format!("{pad}test: {}", js_regex(&rule.test)?)];
        if let Some(exclude) = &rule.exclude {
            fields.push(format!("{pad}exclude: {}", js_regex(exclude)?));
        }
        let loaders: Vec<String> = rule.loaders.iter().map(js_loader).collect();
        fields.push(format!("{pad}use: [{}]", loaders.join(", ")));

        let outer = INDENT.repeat(3);
        rules.push(format!("{outer}{{\n{}\n{outer}}}", fields.join(",\n")));
    }
    if !rules.is_empty() {
        lines.push(rules.join(",\n"));
    }
    lines.push(format!("{INDENT}{INDENT}]"));
    lines.push(format!("{INDENT}}}"));

    lines.push("};".to_string());
    lines.push(String::new());
    Ok(lines.join("\n"))
}

fn js_string(value: &str) -> String {
    Value::String(value.to_string()).to_string()
}

fn js_loader(loader: &LoaderSpec) -> String {
    if loader.options().is_empty() {
        return js_string(loader.loader());
    }
    let options = Value::Object(
        loader
            .options()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
    );
    format!("{{ loader: {}, options: {} }}", js_string(loader.loader()), options)
}

/// Rewrite a match pattern as a JavaScript regex literal.
///
/// A leading `(?i)` becomes the `i` flag, `\A`/`\z` become `^`/`$` and
/// `(?P<name>` becomes `(?<name>`. Anything JavaScript would parse with a
/// different meaning is rejected.
pub(crate) fn js_regex(pattern: &MatchPattern) -> Result<String> {
    let unsupported = |construct: &str| ConfigError::InvalidPattern {
        pattern: pattern.as_str().to_string(),
        message: format!("{construct} has no JavaScript equivalent"),
    };

    let (source, flags) = match pattern.as_str().strip_prefix("(?i)") {
        Some(rest) => (rest, "i"),
        None => (pattern.as_str(), ""),
    };

    let mut body = String::with_capacity(source.len() + 2);
    let mut chars = source.chars().peekable();
    let mut in_class = false;

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                let Some(escaped) = chars.next() else {
                    return Err(unsupported("a trailing backslash"));
                };
                match escaped {
                    'A' if !in_class => body.push('^'),
                    'z' if !in_class => body.push('$'),
                    'p' | 'P' => return Err(unsupported("a Unicode class (\\p)")),
                    '<' | '>' => return Err(unsupported("a word start/end assertion")),
                    'b' | 'B' | 'x' if chars.peek() == Some(&'{') => {
                        return Err(unsupported(&format!("a braced \\{escaped} escape")));
                    }
                    other => {
                        body.push('\\');
                        body.push(other);
                    }
                }
            }
            '[' if in_class => {
                return Err(match chars.peek() {
                    Some(':') => unsupported("a POSIX class"),
                    _ => unsupported("a nested character class"),
                });
            }
            '[' => {
                in_class = true;
                body.push('[');
                if chars.peek() == Some(&'^') {
                    chars.next();
                    body.push('^');
                }
                // A leading `]` is a literal in Rust but closes an empty class in JavaScript.
                if chars.peek() == Some(&']') {
                    chars.next();
                    body.push_str("\\]");
                }
            }
            ']' if in_class => {
                in_class = false;
                body.push(']');
            }
            '&' | '-' | '~' if in_class && chars.peek() == Some(&ch) => {
                return Err(unsupported("a class set operation"));
            }
            '(' if !in_class && chars.peek() == Some(&'?') => {
                chars.next();
                match chars.peek() {
                    Some(':' | '<') => body.push_str("(?"),
                    Some('P') => {
                        chars.next();
                        if chars.peek() != Some(&'<') {
                            return Err(unsupported("a (?P group"));
                        }
                        body.push_str("(?");
                    }
                    _ => return Err(unsupported("an inline flag group")),
                }
            }
            '/' => body.push_str("\\/"),
            other => body.push(other),
        }
    }

    // `//` would open a line comment.
    if body.is_empty() {
        body.push_str("(?:)");
    }
    Ok(format!("/{body}/{flags}"))
}
