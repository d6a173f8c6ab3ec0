//! Terminal and file lines want different layouts: terminal may want `{level} {name}  {msg}`
//! while files need `{timestamp} {level} {name}  {msg}`. Templates make this configurable
//! instead of hardcoded per output.

/// Closed set of known substitution tokens. Unknown `{names}` pass through as literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Timestamp,
    Level,
    Name,
    Thread,
    Msg,
}

impl Placeholder {
    /// Template parsing needs to match brace-delimited names against known placeholders.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::Level => "level",
            Self::Name => "name",
            Self::Thread => "thread",
            Self::Msg => "msg",
        }
    }

    pub const ALL: &'static [Self] = &[
        Self::Timestamp,
        Self::Level,
        Self::Name,
        Self::Thread,
        Self::Msg,
    ];
}

/// Parsing into segments once avoids re-scanning the template on every log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatSegment {
    /// Whitespace, separators, and unknown `{names}` pass through untouched.
    Literal(String),
    /// Known tokens are substituted at render time.
    Placeholder(Placeholder),
}

/// Pre-parsed template: parse once, render many.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatTemplate {
    segments: Vec<FormatSegment>,
}

impl FormatTemplate {
    /// Turns `"{level} {name}  {msg}"` into a segment list.
    #[must_use]
    pub fn parse(template: &str) -> Self {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}').map(|c| open + c) else {
                break;
            };

            current.push_str(&rest[..open]);
            let name = &rest[open + 1..close];

            if let Some(ph) = Self::match_placeholder(name) {
                if !current.is_empty() {
                    segments.push(FormatSegment::Literal(std::mem::take(&mut current)));
                }
                segments.push(FormatSegment::Placeholder(ph));
            } else {
                current.push_str(&rest[open..=close]);
            }

            rest = &rest[close + 1..];
        }

        current.push_str(rest);
        if !current.is_empty() {
            segments.push(FormatSegment::Literal(current));
        }

        Self { segments }
    }

    fn match_placeholder(name: &str) -> Option<Placeholder> {
        Placeholder::ALL.iter().copied().find(|ph| ph.as_str() == name)
    }

    #[must_use]
    pub fn segments(&self) -> &[FormatSegment] {
        &self.segments
    }

    /// Lets outputs skip work (reading the clock, naming the thread) the template never shows.
    #[must_use]
    pub fn uses(&self, placeholder: Placeholder) -> bool {
        self.segments
            .iter()
            .any(|s| *s == FormatSegment::Placeholder(placeholder))
    }

    /// Substitutes values into the pre-parsed segments. Runs for every log line.
    #[must_use]
    pub fn render(&self, values: &FormatValues<'_>) -> String {
        let mut result = String::with_capacity(values.msg.len() + 64);

        for segment in &self.segments {
            match segment {
                FormatSegment::Literal(s) => result.push_str(s),
                FormatSegment::Placeholder(ph) => result.push_str(match ph {
                    Placeholder::Timestamp => values.timestamp,
                    Placeholder::Level => values.level,
                    Placeholder::Name => values.name,
                    Placeholder::Thread => values.thread,
                    Placeholder::Msg => values.msg,
                }),
            }
        }

        result
    }
}

impl Default for FormatTemplate {
    fn default() -> Self {
        Self::parse("{level} {name}  {msg}")
    }
}

/// Typed value bag ensures every placeholder has a corresponding field.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatValues<'a> {
    pub timestamp: &'a str,
    pub level: &'a str,
    pub name: &'a str,
    pub thread: &'a str,
    pub msg: &'a str,
}

impl<'a> FormatValues<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn timestamp(mut self, timestamp: &'a str) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub const fn level(mut self, level: &'a str) -> Self {
        self.level = level;
        self
    }

    /// Logger name, usually the category's dotted type path.
    #[must_use]
    pub const fn name(mut self, name: &'a str) -> Self {
        self.name = name;
        self
    }

    #[must_use]
    pub const fn thread(mut self, thread: &'a str) -> Self {
        self.thread = thread;
        self
    }

    #[must_use]
    pub const fn msg(mut self, msg: &'a str) -> Self {
        self.msg = msg;
        self
    }
}
