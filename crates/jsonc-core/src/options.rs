//! Configuration for [`stringify_with`](crate::stringify_with) and
//! [`parse_with`](crate::parse_with).

/// Default bound on array/object nesting, for both directions.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Indentation unit for pretty-printed output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Indent {
    /// Compact output, no whitespace at all.
    #[default]
    None,
    /// `n` spaces per nesting level. Zero means compact.
    Spaces(usize),
    /// A literal string used verbatim as one level. Empty means compact.
    Token(String),
}

impl Indent {
    /// The string for one indentation level, or `None` in compact mode.
    pub fn unit(&self) -> Option<String> {
        match self {
            Indent::None | Indent::Spaces(0) => None,
            Indent::Spaces(n) => Some(" ".repeat(*n)),
            Indent::Token(t) if t.is_empty() => None,
            Indent::Token(t) => Some(t.clone()),
        }
    }

    /// Interpret a command-line argument: a decimal integer is a space count,
    /// `tab` is a single tab, anything else is a literal token.
    pub fn from_arg(arg: &str) -> Indent {
        if let Ok(n) = arg.parse::<usize>() {
            return Indent::Spaces(n);
        }
        if arg == "tab" {
            return Indent::Token("\t".to_string());
        }
        Indent::Token(arg.to_string())
    }
}

impl From<usize> for Indent {
    fn from(n: usize) -> Self {
        Indent::Spaces(n)
    }
}

impl From<&str> for Indent {
    fn from(token: &str) -> Self {
        Indent::Token(token.to_string())
    }
}

impl From<String> for Indent {
    fn from(token: String) -> Self {
        Indent::Token(token)
    }
}

/// Options for the serializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringifyOptions {
    pub indent: Indent,
    /// Maximum number of nested containers before failing with `DepthLimit`.
    pub max_depth: usize,
    /// When set, objects emit only these keys, in this order.
    pub property_list: Option<Vec<String>>,
}

impl Default for StringifyOptions {
    fn default() -> Self {
        Self {
            indent: Indent::None,
            max_depth: DEFAULT_MAX_DEPTH,
            property_list: None,
        }
    }
}

impl StringifyOptions {
    /// Compact output with default limits.
    pub fn compact() -> Self {
        Self::default()
    }

    /// Pretty output with the given indentation.
    pub fn pretty(indent: impl Into<Indent>) -> Self {
        Self::default().with_indent(indent)
    }

    pub fn with_indent(mut self, indent: impl Into<Indent>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Restrict object output to `keys`. Duplicates keep their first position.
    pub fn with_property_list<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let mut list: Vec<String> = Vec::new();
        for key in keys {
            let key = key.into();
            if !list.contains(&key) {
                list.push(key);
            }
        }
        self.property_list = Some(list);
        self
    }
}

/// Options for the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of nested containers before failing with `DepthLimit`.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
