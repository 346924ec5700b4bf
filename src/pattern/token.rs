use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SegmentToken {
    Static(String),
    Dynamic(String),
    Optional(String),
    Catchall(String),
    Group(String),
}

impl SegmentToken {
    pub fn value(&self) -> &str {
        match self {
            Self::Static(v)
            | Self::Dynamic(v)
            | Self::Optional(v)
            | Self::Catchall(v)
            | Self::Group(v) => v,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    pub fn is_param(&self) -> bool {
        matches!(self, Self::Dynamic(_) | Self::Optional(_) | Self::Catchall(_))
    }
}

pub type SegmentTokens = SmallVec<[SegmentToken; 2]>;

/// Tokens of one segment plus the characters the lexer dropped from params.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenizedSegment {
    pub tokens: SegmentTokens,
    pub ignored: Vec<char>,
}

impl TokenizedSegment {
    /// True when the segment contributes nothing to path or name.
    pub fn is_transparent(&self) -> bool {
        self.tokens.iter().all(SegmentToken::is_group)
    }

    /// Label used when building route names; groups contribute nothing.
    pub fn label(&self) -> String {
        self.tokens
            .iter()
            .filter(|t| !t.is_group())
            .map(SegmentToken::value)
            .collect()
    }
}
