//! Best-effort shell-word tokenizer.
//!
//! Only good enough to pull path arguments out of a command line: quotes
//! group words, backslash escapes the next character, and whitespace
//! separates tokens. No expansion, globbing, or operator handling.

/// Split a command line into shell-like words.
///
/// - `'...'` and `"..."` group characters into one word; the quotes are dropped.
/// - `\` escapes the next character everywhere, including inside quotes.
/// - An unterminated quote runs to the end of input.
/// - Runs of whitespace never yield empty tokens, and `""` on its own
///   contributes nothing.
pub fn tokenize(command: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut escape = false;

    for ch in command.chars() {
        if escape {
            current.push(ch);
            escape = false;
            continue;
        }
        if ch == '\\' {
            escape = true;
            continue;
        }
        if let Some(open) = quote {
            if ch == open {
                quote = None;
            } else {
                current.push(ch);
            }
            continue;
        }
        match ch {
            '\'' | '"' => quote = Some(ch),
            c if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
