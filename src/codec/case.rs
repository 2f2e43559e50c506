//! Segment case conversion for generated directories and identifiers.
//!
//! Word boundaries: any non-alphanumeric character, a lower→upper
//! transition (`userInfo`), the end of an acronym (`HTMLParser`), and a
//! letter↔digit transition (`item2`).

/// Reserved segment that is never case-converted
pub const RESERVED_SEGMENT: &str = "Index";

/// Split a name into its words
pub fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(&prev) = i.checked_sub(1).and_then(|p| chars.get(p)) {
            let next = chars.get(i + 1).copied();
            let boundary = prev.is_alphanumeric()
                && ((prev.is_lowercase() && ch.is_uppercase())
                    || (prev.is_uppercase()
                        && ch.is_uppercase()
                        && next.is_some_and(char::is_lowercase))
                    || (prev.is_ascii_digit() != ch.is_ascii_digit()));
            if boundary && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(ch);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// `UserInfo` → `user-info`
pub fn to_kebab_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// `user-info` → `userInfo`
pub fn to_camel_case(s: &str) -> String {
    let mut result = String::new();
    for (i, word) in split_words(s).iter().enumerate() {
        let lower = word.to_lowercase();
        if i == 0 {
            result.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    result
}

/// Directory name for a non-terminal key segment
pub fn directory_name(segment: &str) -> String {
    if segment == RESERVED_SEGMENT {
        segment.to_string()
    } else {
        to_kebab_case(segment)
    }
}

/// Identifier a generated index module binds a child directory to
pub fn module_identifier(dir_name: &str) -> String {
    if dir_name == RESERVED_SEGMENT {
        dir_name.to_string()
    } else {
        to_camel_case(dir_name)
    }
}
