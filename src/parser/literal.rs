//! JavaScript object literal bodies
//!
//! Hand-written and formatter-generated leaf modules use plain object
//! literals rather than JSON: bare identifier keys, single-quoted strings,
//! trailing commas and comments. Only literal values are understood; any
//! expression (spread, reference, call) rejects the whole body.

use crate::types::{KeyNode, KeyTree};

/// Parse `{ ... }` (optionally followed by `;`) into a tree. Scalar values
/// other than strings keep their source text; `null` and `undefined` become
/// empty strings.
pub(crate) fn parse_object_literal(text: &str) -> Option<KeyTree> {
    let mut cursor = Cursor::new(text);
    cursor.skip_trivia();
    let tree = cursor.object()?;
    cursor.skip_trivia();
    if cursor.peek() == Some(';') {
        cursor.bump();
        cursor.skip_trivia();
    }
    cursor.at_end().then_some(tree)
}

struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn eat(&mut self, expected: char) -> Option<()> {
        (self.bump()? == expected).then_some(())
    }

    /// Whitespace, `// line` and `/* block */` comments
    fn skip_trivia(&mut self) {
        loop {
            match (self.peek(), self.peek_at(1)) {
                (Some(c), _) if c.is_whitespace() => self.pos += 1,
                (Some('/'), Some('/')) => {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.pos += 1;
                    }
                }
                (Some('/'), Some('*')) => {
                    self.pos += 2;
                    while !self.at_end() && !(self.peek() == Some('*') && self.peek_at(1) == Some('/')) {
                        self.pos += 1;
                    }
                    self.pos = (self.pos + 2).min(self.chars.len());
                }
                _ => return,
            }
        }
    }

    fn object(&mut self) -> Option<KeyTree> {
        self.eat('{')?;
        let mut tree = KeyTree::new();
        loop {
            self.skip_trivia();
            if self.peek() == Some('}') {
                self.bump();
                return Some(tree);
            }

            let key = self.key()?;
            self.skip_trivia();
            self.eat(':')?;
            self.skip_trivia();
            let value = self.value()?;
            tree.insert(key, value);

            self.skip_trivia();
            match self.bump()? {
                ',' => continue,
                '}' => return Some(tree),
                _ => return None,
            }
        }
    }

    fn key(&mut self) -> Option<String> {
        match self.peek()? {
            quote @ ('\'' | '"') => self.string(quote),
            _ => {
                let word = self.word();
                (!word.is_empty()).then_some(word)
            }
        }
    }

    fn value(&mut self) -> Option<KeyNode> {
        match self.peek()? {
            '{' => self.object().map(KeyNode::Tree),
            quote @ ('\'' | '"' | '`') => self.string(quote).map(KeyNode::Leaf),
            _ => match self.word().as_str() {
                "" => None,
                "null" | "undefined" => Some(KeyNode::Leaf(String::new())),
                scalar => Some(KeyNode::Leaf(scalar.to_string())),
            },
        }
    }

    /// Identifier, number or keyword
    fn word(&mut self) -> String {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || matches!(c, '_' | '$' | '.' | '-' | '+'))
        {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn string(&mut self, quote: char) -> Option<String> {
        self.eat(quote)?;
        let mut out = String::new();
        loop {
            match self.bump()? {
                c if c == quote => return Some(out),
                '$' if quote == '`' && self.peek() == Some('{') => return None,
                '\n' if quote != '`' => return None,
                '\\' => match self.bump()? {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    'b' => out.push('\u{8}'),
                    'f' => out.push('\u{c}'),
                    'v' => out.push('\u{b}'),
                    '0' => out.push('\0'),
                    'u' => out.push(self.unicode_escape()?),
                    '\r' => {
                        if self.peek() == Some('\n') {
                            self.bump();
                        }
                    }
                    '\n' => {}
                    other => out.push(other),
                },
                c => out.push(c),
            }
        }
    }

    /// `\uXXXX` (with surrogate pairs) or `\u{X...}`, after the `u`
    fn unicode_escape(&mut self) -> Option<char> {
        if self.peek() == Some('{') {
            self.bump();
            let start = self.pos;
            while self.peek().is_some_and(|c| c != '}') {
                self.pos += 1;
            }
            let digits: String = self.chars[start..self.pos].iter().collect();
            self.eat('}')?;
            return char::from_u32(u32::from_str_radix(&digits, 16).ok()?);
        }

        let high = self.hex4()?;
        if (0xD800..0xDC00).contains(&high) {
            if self.peek() == Some('\\') && self.peek_at(1) == Some('u') {
                self.pos += 2;
                let low = self.hex4()?;
                let code = 0x10000 + ((high - 0xD800) << 10) + (low.checked_sub(0xDC00)?);
                return char::from_u32(code);
            }
            return None;
        }
        char::from_u32(high)
    }

    fn hex4(&mut self) -> Option<u32> {
        let end = self.pos + 4;
        let digits: String = self.chars.get(self.pos..end)?.iter().collect();
        self.pos = end;
        u32::from_str_radix(&digits, 16).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf<'a>(tree: &'a KeyTree, key: &str) -> Option<&'a str> {
        tree.get(key).and_then(KeyNode::as_leaf)
    }

    #[test]
    fn test_bare_keys_single_quotes_trailing_comma() {
        let tree = parse_object_literal("{\n  Name: 'Name',\n  Save: 'Save',\n}").unwrap();
        let keys: Vec<&str> = tree.keys().collect();
        assert_eq!(keys, vec!["Name", "Save"]);
        assert_eq!(leaf(&tree, "Save"), Some("Save"));
    }

    #[test]
    fn test_escapes_and_quote_mixing() {
        let tree = parse_object_literal(
            r#"{ 'It\'s': "say \"hi\"", Line: 'a\nb', Smile: '😀', Dollar: `$5` }"#,
        )
        .unwrap();
        assert_eq!(leaf(&tree, "It's"), Some("say \"hi\""));
        assert_eq!(leaf(&tree, "Line"), Some("a\nb"));
        assert_eq!(leaf(&tree, "Smile"), Some("😀"));
        assert_eq!(leaf(&tree, "Dollar"), Some("$5"));
    }

    #[test]
    fn test_comments_scalars_and_nesting() {
        let source = "{\n  // header\n  Count: 3, /* flag */ On: true,\n  Empty: null,\n  Group: { A: 'x', },\n};";
        let tree = parse_object_literal(source).unwrap();
        assert_eq!(leaf(&tree, "Count"), Some("3"));
        assert_eq!(leaf(&tree, "On"), Some("true"));
        assert_eq!(leaf(&tree, "Empty"), Some(""));
        assert_eq!(tree.leaf_count(), 4);
    }

    #[test]
    fn test_expressions_rejected() {
        assert!(parse_object_literal("{ ...base, Title: 'x' }").is_none());
        assert!(parse_object_literal("{ Title: t('x') }").is_none());
        assert!(parse_object_literal("{ Title: `Hi ${name}` }").is_none());
        assert!(parse_object_literal("{ Index, about }").is_none());
        assert!(parse_object_literal("{ Title: 'x' } extra").is_none());
    }
}
