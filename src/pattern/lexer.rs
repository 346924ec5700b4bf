use super::{SegmentError, SegmentResult, SegmentToken, SegmentTokens, TokenizedSegment};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Initial,
    Static,
    Dynamic,
    Optional,
    Catchall,
    Group,
}

impl LexState {
    fn is_bracket(self) -> bool {
        matches!(self, Self::Dynamic | Self::Optional | Self::Catchall)
    }
}

#[inline]
fn is_param_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

struct SegmentLexer<'a> {
    segment: &'a str,
    state: LexState,
    buffer: String,
    tokens: SegmentTokens,
    ignored: Vec<char>,
}

impl<'a> SegmentLexer<'a> {
    fn new(segment: &'a str) -> Self {
        Self {
            segment,
            state: LexState::Initial,
            buffer: String::new(),
            tokens: SegmentTokens::new(),
            ignored: Vec::new(),
        }
    }

    fn run(mut self) -> SegmentResult<TokenizedSegment> {
        let chars: Vec<char> = self.segment.chars().collect();
        let mut i = 0usize;

        while i < chars.len() {
            let c = chars[i];
            let prev = i.checked_sub(1).map(|p| chars[p]);

            match self.state {
                LexState::Initial => {
                    self.buffer.clear();
                    match c {
                        '[' => self.state = LexState::Dynamic,
                        '(' => self.state = LexState::Group,
                        '?' if matches!(self.tokens.last(), Some(SegmentToken::Dynamic(_))) => {
                            self.promote_last_to_optional();
                        }
                        _ => {
                            // reprocess the same character as literal text
                            self.state = LexState::Static;
                            continue;
                        }
                    }
                }
                LexState::Static => match c {
                    '[' => {
                        self.flush();
                        self.state = LexState::Dynamic;
                    }
                    '(' => {
                        self.flush();
                        self.state = LexState::Group;
                    }
                    _ => self.buffer.push(c),
                },
                LexState::Dynamic | LexState::Optional | LexState::Catchall | LexState::Group => {
                    self.step_enclosed(c, prev)?;
                }
            }

            i += 1;
        }

        if self.state == LexState::Dynamic {
            return Err(SegmentError::UnfinishedParam {
                segment: self.segment.to_string(),
                buffer: self.buffer.clone(),
            });
        }

        self.flush();
        self.check_catchall()?;

        Ok(TokenizedSegment {
            tokens: self.tokens,
            ignored: self.ignored,
        })
    }

    fn step_enclosed(&mut self, c: char, prev: Option<char>) -> SegmentResult<()> {
        if self.buffer == "..." {
            self.buffer.clear();
            self.state = LexState::Catchall;
        }

        if c == '[' && self.state == LexState::Dynamic {
            self.state = LexState::Optional;
        }

        if c == ']'
            && self.state.is_bracket()
            && (self.state != LexState::Optional || prev == Some(']'))
        {
            if self.buffer.is_empty() {
                return Err(SegmentError::EmptyParam {
                    segment: self.segment.to_string(),
                });
            }
            self.flush();
            self.state = LexState::Initial;
        } else if c == ')' && self.state == LexState::Group {
            if self.buffer.is_empty() {
                return Err(SegmentError::EmptyGroup {
                    segment: self.segment.to_string(),
                });
            }
            self.flush();
            self.state = LexState::Initial;
        } else if is_param_char(c) {
            self.buffer.push(c);
        } else if self.state.is_bracket() && c != '[' && c != ']' {
            // reported by the caller once the file is known
            self.ignored.push(c);
        }

        Ok(())
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let value = std::mem::take(&mut self.buffer);
        let token = match self.state {
            LexState::Static | LexState::Initial => SegmentToken::Static(value),
            LexState::Dynamic => SegmentToken::Dynamic(value),
            LexState::Optional => SegmentToken::Optional(value),
            LexState::Catchall => SegmentToken::Catchall(value),
            LexState::Group => SegmentToken::Group(value),
        };
        self.tokens.push(token);
    }

    fn promote_last_to_optional(&mut self) {
        match self.tokens.pop() {
            Some(SegmentToken::Dynamic(name)) => self.tokens.push(SegmentToken::Optional(name)),
            Some(other) => self.tokens.push(other),
            None => {}
        }
    }

    fn check_catchall(&self) -> SegmentResult<()> {
        let params = self.tokens.iter().filter(|t| t.is_param()).count();
        if params < 2 {
            return Ok(());
        }
        match self
            .tokens
            .iter()
            .find(|t| matches!(t, SegmentToken::Catchall(_)))
        {
            Some(catchall) => Err(SegmentError::CatchallNotAlone {
                segment: self.segment.to_string(),
                name: catchall.value().to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Splits one file-name segment (extension and mode suffix already removed)
/// into typed tokens.
#[tracing::instrument(level = "trace", skip(segment), fields(segment = %segment))]
pub fn tokenize_segment(segment: &str) -> SegmentResult<TokenizedSegment> {
    SegmentLexer::new(segment).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(segment: &str) -> Vec<SegmentToken> {
        tokenize_segment(segment)
            .expect("segment should tokenize")
            .tokens
            .into_vec()
    }

    #[test]
    fn literal_segment_is_single_static_token() {
        assert_eq!(tokens("about"), vec![SegmentToken::Static("about".into())]);
    }

    #[test]
    fn mixed_static_and_dynamic() {
        assert_eq!(
            tokens("user-[id]"),
            vec![
                SegmentToken::Static("user-".into()),
                SegmentToken::Dynamic("id".into())
            ]
        );
    }

    #[test]
    fn static_after_param_restarts_buffer() {
        assert_eq!(
            tokens("[id]-edit"),
            vec![
                SegmentToken::Dynamic("id".into()),
                SegmentToken::Static("-edit".into())
            ]
        );
    }

    #[test]
    fn question_suffix_marks_optional() {
        assert_eq!(tokens("[id]?"), vec![SegmentToken::Optional("id".into())]);
    }

    #[test]
    fn question_mark_without_param_stays_literal() {
        assert_eq!(tokens("?a"), vec![SegmentToken::Static("?a".into())]);
    }

    #[test]
    fn empty_segment_has_no_tokens() {
        let out = tokenize_segment("").expect("empty segment is allowed");
        assert!(out.tokens.is_empty());
        assert!(out.is_transparent());
    }
}
