//! Shell replies and their text rendering

use std::fmt;

/// Reply to one shell command
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// OK
    Ok,
    /// "value" (quoted and escaped) or (nil)
    Value(Option<String>),
    /// (integer) 1
    Integer(i64),
    /// 1) "a"\n2) "b"
    List(Vec<String>),
    /// Preformatted block, printed as is
    Text(String),
    /// (error) ERR message
    Error(String),
}

impl Reply {
    /// Boolean result as a Redis-style integer
    pub fn flag(value: bool) -> Self {
        Reply::Integer(i64::from(value))
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ok => write!(f, "OK"),
            Reply::Value(Some(value)) => write!(f, "{:?}", value),
            Reply::Value(None) => write!(f, "(nil)"),
            Reply::Integer(i) => write!(f, "(integer) {}", i),
            Reply::List(items) if items.is_empty() => write!(f, "(empty list)"),
            Reply::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}) {:?}", i + 1, item)?;
                }
                Ok(())
            }
            Reply::Text(text) => write!(f, "{}", text),
            Reply::Error(e) => write!(f, "(error) ERR {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_scalars() {
        assert_eq!(Reply::Ok.to_string(), "OK");
        assert_eq!(Reply::Value(Some("v 1".into())).to_string(), "\"v 1\"");
        assert_eq!(Reply::Value(None).to_string(), "(nil)");
        assert_eq!(Reply::flag(true).to_string(), "(integer) 1");
        assert_eq!(Reply::flag(false).to_string(), "(integer) 0");
    }

    #[test]
    fn test_render_list() {
        assert_eq!(Reply::List(vec![]).to_string(), "(empty list)");
        assert_eq!(
            Reply::List(vec!["b".into(), "a".into()]).to_string(),
            "1) \"b\"\n2) \"a\""
        );
    }

    #[test]
    fn test_render_escapes_quotes() {
        assert_eq!(
            Reply::Value(Some("say \"hi\"".into())).to_string(),
            r#""say \"hi\"""#
        );
        assert_eq!(
            Reply::List(vec!["a\\b".into(), "x\"".into()]).to_string(),
            "1) \"a\\\\b\"\n2) \"x\\\"\""
        );
    }

    #[test]
    fn test_render_error() {
        assert_eq!(
            Reply::Error("unknown command 'X'".into()).to_string(),
            "(error) ERR unknown command 'X'"
        );
    }
}
