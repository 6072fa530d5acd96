/// A context value substituted into a message template.
///
/// Every argument is itself resolved through the message lookup before
/// substitution, so an argument may name another catalog key that expands
/// to further text. Plain text that matches no key passes through
/// unchanged, which makes `Arg::Text` safe for arbitrary user data.
///
/// # Example
///
/// ```
/// use lingo::Arg;
///
/// // Plain text, passed through lookup and substituted as-is when
/// // it matches no catalog key.
/// let name: Arg = "World".into();
///
/// // A nested message with its own context.
/// let nested = Arg::message("USER_TITLE", vec!["Alice".into()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// A literal value. Resolved through lookup with empty context, so a
    /// value that happens to be a catalog key expands to its template.
    Text(String),

    /// A message key with its own ordered context, resolved recursively.
    Message {
        /// The catalog key to resolve.
        key: String,
        /// Context substituted into the nested template.
        context: Vec<Arg>,
    },
}

impl Arg {
    /// Create a nested message argument.
    pub fn message(key: impl Into<String>, context: Vec<Arg>) -> Self {
        Arg::Message {
            key: key.into(),
            context,
        }
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Text(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Text(s)
    }
}
