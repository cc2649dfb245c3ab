//! A lenient decoder for literal expressions such as `[(0, 1), [1, '2'],]`.
//!
//! Lists and tuples decode to JSON arrays so the result can share the edge coercion rules
//! with the strict JSON path. Only the outermost value remembers whether it was a `[...]`
//! list. Dicts and sets are accepted syntactically but decode to an empty object, since they
//! never count as an edge. `NaN` and `Infinity` decode to null.

use serde_json::{Map, Number, Value};

/// A decoded literal, keeping a bracketed list apart from every other shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    List(Vec<Value>),
    /// Any other value; tuples show up here as arrays.
    Other(Value),
}

impl Literal {
    pub fn into_value(self) -> Value {
        match self {
            Literal::List(items) => Value::Array(items),
            Literal::Other(value) => value,
        }
    }
}

pub fn parse_literal(text: &str) -> Option<Literal> {
    let mut parser = Parser {
        chars: text.chars().collect(),
        pos: 0,
    };
    let literal = parser.literal()?;
    parser.skip_trivia();
    (parser.pos == parser.chars.len()).then_some(literal)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.pos += 1;
            } else if c == '#' {
                while let Some(c) = self.bump() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_trivia();
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn literal(&mut self) -> Option<Literal> {
        self.skip_trivia();
        match self.peek()? {
            '[' => {
                self.pos += 1;
                self.sequence(']').map(Literal::List)
            }
            '(' => {
                self.pos += 1;
                self.parenthesized()
            }
            _ => self.scalar().map(Literal::Other),
        }
    }

    fn value(&mut self) -> Option<Value> {
        self.literal().map(Literal::into_value)
    }

    fn scalar(&mut self) -> Option<Value> {
        match self.peek()? {
            '{' => {
                self.pos += 1;
                self.braced()
            }
            '\'' | '"' => self.string().map(Value::String),
            '+' | '-' => self.signed(),
            c if c.is_ascii_digit() || c == '.' => self.number(),
            c if c.is_alphabetic() || c == '_' => self.name(),
            _ => None,
        }
    }

    fn sequence(&mut self, close: char) -> Option<Vec<Value>> {
        let mut items = vec![];
        loop {
            if self.eat(close) {
                return Some(items);
            }
            items.push(self.value()?);
            if self.eat(',') {
                continue;
            }
            return self.eat(close).then_some(items);
        }
    }

    // `(x)` is just `x`; a comma makes it a tuple.
    fn parenthesized(&mut self) -> Option<Literal> {
        if self.eat(')') {
            return Some(Literal::Other(Value::Array(vec![])));
        }
        let first = self.literal()?;
        if self.eat(')') {
            return Some(first);
        }
        if !self.eat(',') {
            return None;
        }
        let mut items = vec![first.into_value()];
        items.extend(self.sequence(')')?);
        Some(Literal::Other(Value::Array(items)))
    }

    fn braced(&mut self) -> Option<Value> {
        loop {
            if self.eat('}') {
                return Some(Value::Object(Map::new()));
            }
            self.value()?;
            if self.eat(':') {
                self.value()?;
            }
            if self.eat(',') {
                continue;
            }
            return self.eat('}').then(|| Value::Object(Map::new()));
        }
    }

    fn string(&mut self) -> Option<String> {
        let quote = self.bump()?;
        let mut out = String::new();
        loop {
            match self.bump()? {
                c if c == quote => return Some(out),
                '\n' => return None,
                '\\' => match self.bump()? {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    '0' => out.push('\0'),
                    '\n' => {}
                    c @ ('\\' | '\'' | '"') => out.push(c),
                    c => {
                        out.push('\\');
                        out.push(c);
                    }
                },
                c => out.push(c),
            }
        }
    }

    // Signs bind to numeric literals and `Infinity` only.
    fn signed(&mut self) -> Option<Value> {
        let sign = self.bump()?;
        self.skip_trivia();
        if self.peek().is_some_and(char::is_alphabetic) {
            return (self.word() == "Infinity").then_some(Value::Null);
        }
        if !self.peek().is_some_and(|c| c.is_ascii_digit() || c == '.') {
            return None;
        }
        let value = self.number()?;
        if sign == '+' {
            return Some(value);
        }
        let Value::Number(number) = value else {
            return None;
        };
        let negated = match number.as_i64().and_then(i64::checked_neg) {
            Some(i) => Number::from(i),
            None => Number::from_f64(-number.as_f64()?)?,
        };
        Some(Value::Number(negated))
    }

    fn number(&mut self) -> Option<Value> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            let exponent_sign = (c == '+' || c == '-')
                && matches!(self.chars[self.pos - 1], 'e' | 'E')
                && !self.chars[start..].starts_with(&['0', 'x'])
                && !self.chars[start..].starts_with(&['0', 'X']);
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || exponent_sign {
                self.pos += 1;
            } else {
                break;
            }
        }
        let literal: String = self.chars[start..self.pos]
            .iter()
            .filter(|&&c| c != '_')
            .collect();
        let lower = literal.to_ascii_lowercase();

        let radix = match lower.get(..2) {
            Some("0x") => Some(16),
            Some("0o") => Some(8),
            Some("0b") => Some(2),
            _ => None,
        };
        if let Some(radix) = radix {
            let magnitude = u128::from_str_radix(&lower[2..], radix).ok()?;
            return match i64::try_from(magnitude) {
                Ok(i) => Some(Value::Number(i.into())),
                Err(_) => Number::from_f64(magnitude as f64).map(Value::Number),
            };
        }

        if !lower.contains(['.', 'e']) {
            if let Ok(i) = lower.parse::<i64>() {
                return Some(Value::Number(i.into()));
            }
            if !lower.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
        }
        let f = lower.parse::<f64>().ok()?;
        Number::from_f64(f).map(Value::Number)
    }

    fn word(&mut self) -> String {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn name(&mut self) -> Option<Value> {
        match self.word().as_str() {
            "True" => Some(Value::Bool(true)),
            "False" => Some(Value::Bool(false)),
            // JSON writers emit these for non-finite floats; they never coerce to an id.
            "None" | "NaN" | "Infinity" => Some(Value::Null),
            _ => None,
        }
    }
}
