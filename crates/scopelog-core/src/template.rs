//! Message templates with positional arguments.
//!
//! A template is text with `{Name}` holes, e.g. `"Correlation {CorrelationID}"`.
//! Holes are filled positionally from the argument list at render time.
//! Parsing has a strict form for callers that want template errors surfaced,
//! and a lossy form for the enrichment path, which must never fail.

use crate::error::{Result, ScopeLogError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Renders a value to text the way properties appear in message output:
/// strings render unquoted, everything else via its JSON form.
pub fn render_value_to_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
enum Token {
    Text(String),
    Hole(String),
}

/// A parsed message template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageTemplate {
    text: String,
    tokens: Vec<Token>,
}

impl MessageTemplate {
    /// Parses `text`, rejecting unbalanced braces.
    pub fn parse(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let tokens = tokenize(&text)
            .ok_or_else(|| ScopeLogError::InvalidTemplate(text.clone()))?;
        Ok(Self { text, tokens })
    }

    /// Parses `text`, treating it as plain text if it is not a well-formed
    /// template. Never fails.
    pub fn parse_lossy(text: impl Into<String>) -> Self {
        let text = text.into();
        let tokens = tokenize(&text).unwrap_or_else(|| vec![Token::Text(text.clone())]);
        Self { text, tokens }
    }

    /// The original template text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Hole names in order of appearance.
    pub fn hole_names(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(|token| match token {
            Token::Hole(name) => Some(name.as_str()),
            Token::Text(_) => None,
        })
    }

    /// Fills holes positionally from `args`. A hole with no matching
    /// argument renders as its literal `{Name}` text.
    pub fn render(&self, args: &[Value]) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut next_arg = 0usize;
        for token in &self.tokens {
            match token {
                Token::Text(text) => out.push_str(text),
                Token::Hole(name) => {
                    match args.get(next_arg) {
                        Some(value) => out.push_str(&render_value_to_text(value)),
                        None => {
                            out.push('{');
                            out.push_str(name);
                            out.push('}');
                        }
                    }
                    next_arg += 1;
                }
            }
        }
        out
    }

    /// Pairs hole names with their positional arguments, in order. Surplus
    /// arguments are ignored, surplus holes are unmatched.
    pub fn named_args<'a>(&'a self, args: &'a [Value]) -> impl Iterator<Item = (&'a str, &'a Value)> {
        self.hole_names().zip(args.iter())
    }
}

impl std::fmt::Display for MessageTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

fn tokenize(text: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                literal.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                literal.push('}');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') | None => return None,
                        Some(ch) => name.push(ch),
                    }
                }
                if !literal.is_empty() {
                    tokens.push(Token::Text(std::mem::take(&mut literal)));
                }
                tokens.push(Token::Hole(name));
            }
            '}' => return None,
            ch => literal.push(ch),
        }
    }
    if !literal.is_empty() {
        tokens.push(Token::Text(literal));
    }
    Some(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_positional_args() {
        let template = MessageTemplate::parse("Correlation {CorrelationID}").expect("template");
        assert_eq!(template.render(&[json!(12345)]), "Correlation 12345");
    }

    #[test]
    fn strings_render_unquoted() {
        let template = MessageTemplate::parse("user {Name} logged in").expect("template");
        assert_eq!(template.render(&[json!("timmy")]), "user timmy logged in");
    }

    #[test]
    fn missing_args_leave_hole_text() {
        let template = MessageTemplate::parse("{A} and {B}").expect("template");
        assert_eq!(template.render(&[json!(1)]), "1 and {B}");
    }

    #[test]
    fn doubled_braces_escape() {
        let template = MessageTemplate::parse("literal {{braces}} and {Hole}").expect("template");
        assert_eq!(template.render(&[json!("x")]), "literal {braces} and x");
    }

    #[test]
    fn unbalanced_braces_are_rejected() {
        assert!(MessageTemplate::parse("oops {unclosed").is_err());
        assert!(MessageTemplate::parse("oops closed}").is_err());
    }

    #[test]
    fn parse_lossy_falls_back_to_plain_text() {
        let template = MessageTemplate::parse_lossy("oops {unclosed");
        assert_eq!(template.render(&[]), "oops {unclosed");
    }

    #[test]
    fn named_args_pair_holes_with_values() {
        let template = MessageTemplate::parse("{Tenant} {Request}").expect("template");
        let args = vec![json!("t1"), json!(7)];
        let pairs: Vec<_> = template.named_args(&args).collect();
        assert_eq!(pairs, vec![("Tenant", &json!("t1")), ("Request", &json!(7))]);
    }
}
