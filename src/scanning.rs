use std::str::CharIndices;

pub fn is_operator(character: char) -> bool {
    match character {
        '+' | '-' | '*' | '/' | '^' => true,
        _ => false
    }
}

fn is_identifier_start(character: char) -> bool {
    character.is_ascii_alphabetic()
}

fn is_identifier_part(character: char) -> bool {
    character.is_ascii_alphanumeric()
}

fn is_digits(string: &str) -> bool {
    !string.is_empty() && string.chars().all(|c| c.is_ascii_digit())
}

/// `-?digits(.digits)?`
pub fn is_number(string: &str) -> bool {
    let unsigned = string.strip_prefix('-').unwrap_or(string);
    match unsigned.split_once('.') {
        Some((whole, fraction)) => is_digits(whole) && is_digits(fraction),
        None => is_digits(unsigned),
    }
}

/// `[a-zA-Z][a-zA-Z0-9]*`
pub fn is_identifier(string: &str) -> bool {
    let mut chars = string.chars();
    chars.next().is_some_and(is_identifier_start) && chars.all(is_identifier_part)
}

pub fn strip_whitespace(string: &str) -> String {
    string.chars().filter(|c| !c.is_whitespace()).collect()
}

fn count<P: Fn(char) -> bool>(string: &str, predicate: P) -> usize {
    string.chars().take_while(|&c| predicate(c)).count()
}

/// The identifier at the very start of `string`, if there is one.
pub fn leading_identifier(string: &str) -> Option<&str> {
    if !string.starts_with(is_identifier_start) {
        return None;
    }
    // identifier characters are ascii, so the count is also a byte length
    Some(&string[..count(string, is_identifier_part)])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub index: usize,
    pub character: char,
    pub depth: i32,
}

/// Walks a string while tracking parenthesis depth. The depth reported for a
/// character already includes that character, so `(` is reported at depth 1
/// and its matching `)` at depth 0.
pub struct BalanceScanner<'a> {
    chars: CharIndices<'a>,
    depth: i32,
}

impl<'a> BalanceScanner<'a> {
    pub fn new(string: &'a str) -> Self {
        Self{chars: string.char_indices(), depth: 0}
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }
}

impl Iterator for BalanceScanner<'_> {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, character) = self.chars.next()?;
        match character {
            '(' => self.depth += 1,
            ')' => self.depth -= 1,
            _ => {}
        }
        Some(Position{index, character, depth: self.depth})
    }
}

/// Byte index of the `)` matching the `(` at `open`.
pub fn find_closing(string: &str, open: usize) -> Option<usize> {
    debug_assert!(string[open..].starts_with('('));
    BalanceScanner::new(&string[open..])
        .find(|position| position.depth == 0)
        .map(|position| open + position.index)
}

/// Whether the whole of `string` is a single `( ... )` group.
pub fn is_wrapped(string: &str) -> bool {
    string.starts_with('(') && find_closing(string, 0) == Some(string.len() - 1)
}

/// First occurrence of `name(` that is not the tail of a longer identifier.
pub fn find_call(string: &str, name: &str) -> Option<usize> {
    string.match_indices(name)
        .map(|(index, _)| index)
        .find(|&index| {
            let before = string[..index].chars().next_back();
            string[index + name.len()..].starts_with('(') && !before.is_some_and(is_identifier_part)
        })
}

/// Replaces every whole identifier equal to `name`; identifiers that merely
/// contain `name` are left alone.
pub fn replace_identifier(template: &str, name: &str, replacement: &str) -> String {
    fn flush(output: &mut String, word: &mut String, name: &str, replacement: &str) {
        if word == name {
            output.push_str(replacement);
        } else {
            output.push_str(word);
        }
        word.clear();
    }

    let mut output = String::with_capacity(template.len());
    let mut word = String::new();
    for character in template.chars() {
        if is_identifier_part(character) {
            word.push(character);
            continue;
        }
        flush(&mut output, &mut word, name, replacement);
        output.push(character);
    }
    flush(&mut output, &mut word, name, replacement);
    output
}
