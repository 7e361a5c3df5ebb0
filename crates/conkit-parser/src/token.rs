//! Command-line tokenization.
//!
//! Splits a raw command line into argument tokens the way a shell
//! would, for the cases where arguments arrive as a single string
//! (interactive prompts, test fixtures) rather than pre-split from the
//! operating system.
//!
//! Rules: whitespace separates tokens; double quotes group text and
//! honour `\"` and `\\` escapes; single quotes group text verbatim;
//! adjacent quoted and unquoted fragments concatenate into one token.
//! An unterminated quote runs to the end of the line.

/// Tokenizes a raw command line.
///
/// # Example
///
/// ```
/// use conkit_parser::tokenize;
///
/// assert_eq!(tokenize(r#"copy "my file.txt" dest"#), vec!["copy", "my file.txt", "dest"]);
/// assert_eq!(tokenize(r#"say "she said \"hi\"""#), vec!["say", r#"she said "hi""#]);
/// ```
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ch if ch.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            '"' => {
                in_token = true;
                while let Some(&next) = chars.peek() {
                    match next {
                        '"' => {
                            chars.next();
                            break;
                        }
                        '\\' => {
                            chars.next();
                            match chars.peek() {
                                Some('"') | Some('\\') => {
                                    current.push(chars.next().unwrap_or('\\'));
                                }
                                _ => current.push('\\'),
                            }
                        }
                        _ => {
                            current.push(next);
                            chars.next();
                        }
                    }
                }
            }
            '\'' => {
                in_token = true;
                for next in chars.by_ref() {
                    if next == '\'' {
                        break;
                    }
                    current.push(next);
                }
            }
            _ => {
                in_token = true;
                current.push(c);
            }
        }
    }

    if in_token {
        tokens.push(current);
    }
    tokens
}
