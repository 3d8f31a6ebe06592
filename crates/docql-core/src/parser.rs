//! Recursive-descent parser for the document text format.
//!
//! Grammar:
//!
//! ```text
//! value   := string | number | object | array | "true" | "false" | "null"
//! object  := '{' (pair (',' pair)*)? '}'
//! pair    := string ':' value
//! array   := '[' (value (',' value)*)? ']'
//! string  := '"' chars '"'          (no escape processing)
//! number  := '-'? digit+ ('.' digit+)?
//! ```
//!
//! Strings end at the first `"` after the opening quote; backslashes are kept
//! verbatim. Numbers containing `.` become floats, all others integers.
//! Input after the first complete value is ignored unless
//! [`ParseOptions::require_full_input`] is set.

use crate::cursor::{Cursor, WHITESPACE};
use crate::error::SyntaxError;
use crate::value::{Map, Number, Value};

type Result<T> = std::result::Result<T, SyntaxError>;

/// Default bound on container nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Knobs for [`parse_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of nested objects/arrays. Deeper input fails with
    /// [`SyntaxError::DepthLimitExceeded`] instead of exhausting the stack.
    pub max_depth: usize,
    /// Reject anything but whitespace after the top-level value.
    pub require_full_input: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            require_full_input: false,
        }
    }
}

impl ParseOptions {
    /// Default limits, but trailing input is an error.
    pub fn strict() -> Self {
        Self {
            require_full_input: true,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Parse `text` into a [`Value`] with default options.
///
/// ```
/// use docql_core::{parse, Value};
///
/// let value = parse(r#"{"name": "Alice", "scores": [95, 87.5]}"#).unwrap();
/// assert_eq!(value.get("name"), Some(&Value::from("Alice")));
/// ```
pub fn parse(text: &str) -> Result<Value> {
    parse_with(text, &ParseOptions::default())
}

/// Parse `text` into a [`Value`].
///
/// Surrounding whitespace is ignored. Error offsets are byte offsets into
/// `text` as given.
pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Value> {
    let text = text.trim_end_matches(WHITESPACE);
    let mut parser = Parser {
        cursor: Cursor::new(text),
        options,
        depth: 0,
    };

    let value = parser.parse_value()?;

    if options.require_full_input {
        parser.cursor.skip_whitespace();
        if !parser.cursor.is_eof() {
            return Err(SyntaxError::TrailingCharacters {
                offset: parser.cursor.pos(),
            });
        }
    }

    tracing::trace!(bytes = text.len(), kind = value.kind(), "parsed value");
    Ok(value)
}

struct Parser<'a, 'o> {
    cursor: Cursor<'a>,
    options: &'o ParseOptions,
    depth: usize,
}

impl Parser<'_, '_> {
    fn parse_value(&mut self) -> Result<Value> {
        self.cursor.skip_whitespace();
        let offset = self.cursor.pos();
        match self.cursor.peek() {
            None => Err(SyntaxError::UnexpectedEnd { offset }),
            Some('"') => self.parse_string().map(Value::String),
            Some(c) if c == '-' || c.is_ascii_digit() => self.parse_number(),
            Some('{') => self.parse_object(),
            Some('[') => self.parse_array(),
            Some(c) => self.parse_keyword(c, offset),
        }
    }

    fn parse_keyword(&mut self, first: char, offset: usize) -> Result<Value> {
        if self.cursor.eat_str("true") {
            Ok(Value::Bool(true))
        } else if self.cursor.eat_str("false") {
            Ok(Value::Bool(false))
        } else if self.cursor.eat_str("null") {
            Ok(Value::Null)
        } else {
            Err(SyntaxError::UnexpectedCharacter {
                character: first,
                offset,
            })
        }
    }

    /// Expects the cursor on an opening quote.
    fn parse_string(&mut self) -> Result<String> {
        let offset = self.cursor.pos();
        self.expect('"')?;
        self.cursor
            .take_until('"')
            .map(str::to_string)
            .ok_or(SyntaxError::UnterminatedString { offset })
    }

    fn parse_number(&mut self) -> Result<Value> {
        let offset = self.cursor.pos();
        let literal = self
            .cursor
            .take_while(|c| c.is_ascii_digit() || c == '-' || c == '.');

        let invalid = || SyntaxError::NumberFormat {
            literal: literal.to_string(),
            offset,
        };

        if !is_well_formed_number(literal) {
            return Err(invalid());
        }
        if literal.contains('.') {
            literal
                .parse::<f64>()
                .map(|f| Value::Number(Number::Float(f)))
                .map_err(|_| invalid())
        } else {
            literal
                .parse::<i64>()
                .map(|i| Value::Number(Number::Integer(i)))
                .map_err(|_| invalid())
        }
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.enter('{')?;
        let mut map = Map::new();

        self.cursor.skip_whitespace();
        if !self.cursor.eat('}') {
            loop {
                self.cursor.skip_whitespace();
                if self.cursor.peek() != Some('"') {
                    return Err(self.unexpected());
                }
                let key = self.parse_string()?;

                self.cursor.skip_whitespace();
                if !self.cursor.eat(':') {
                    return Err(SyntaxError::ExpectedColon {
                        offset: self.cursor.pos(),
                        found: self.cursor.peek(),
                    });
                }

                let value = self.parse_value()?;
                map.insert(key, value);

                self.cursor.skip_whitespace();
                if self.cursor.eat(',') {
                    continue;
                }
                if self.cursor.eat('}') {
                    break;
                }
                return Err(self.unexpected());
            }
        }

        self.depth -= 1;
        Ok(Value::Object(map))
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.enter('[')?;
        let mut items = Vec::new();

        self.cursor.skip_whitespace();
        if !self.cursor.eat(']') {
            loop {
                items.push(self.parse_value()?);

                self.cursor.skip_whitespace();
                if self.cursor.eat(',') {
                    continue;
                }
                if self.cursor.eat(']') {
                    break;
                }
                return Err(self.unexpected());
            }
        }

        self.depth -= 1;
        Ok(Value::Array(items))
    }

    /// Consume a container's opening delimiter and account for its depth.
    fn enter(&mut self, open: char) -> Result<()> {
        let offset = self.cursor.pos();
        self.expect(open)?;
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(SyntaxError::DepthLimitExceeded {
                limit: self.options.max_depth,
                offset,
            });
        }
        Ok(())
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        if self.cursor.eat(expected) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    /// Error for whatever sits under the cursor.
    fn unexpected(&self) -> SyntaxError {
        let offset = self.cursor.pos();
        match self.cursor.peek() {
            Some(character) => SyntaxError::UnexpectedCharacter { character, offset },
            None => SyntaxError::UnexpectedEnd { offset },
        }
    }
}

/// `-? digit+ ('.' digit+)?`
fn is_well_formed_number(literal: &str) -> bool {
    let unsigned = literal.strip_prefix('-').unwrap_or(literal);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(int_part) && frac_part.is_none_or(all_digits)
}
