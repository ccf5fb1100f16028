//! SQL content normalization for deployment scripts
//!
//! Strips `--` and `/* */` comments and collapses whitespace runs to one
//! space, while copying single-quoted literals verbatim (`''` is an escaped
//! quote). Scripts that differ only in formatting or comments normalize to
//! the same text.

/// Normalize SQL text. Blank input yields an empty string.
///
/// Comments count as whitespace, so `a/**/b` becomes `a b`; this keeps the
/// output stable when normalized again.
pub fn normalize_sql(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut chars = sql.chars().peekable();
    let mut in_literal = false;
    let mut pending_space = false;

    while let Some(c) = chars.next() {
        if in_literal {
            out.push(c);
            if c == '\'' {
                if chars.peek() == Some(&'\'') {
                    out.push('\'');
                    chars.next();
                } else {
                    in_literal = false;
                }
            }
            continue;
        }

        match c {
            '-' if chars.peek() == Some(&'-') => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        break;
                    }
                }
                pending_space = true;
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for skipped in chars.by_ref() {
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    prev = skipped;
                }
                pending_space = true;
            }
            c if c.is_whitespace() => pending_space = true,
            c => {
                if pending_space && !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
                out.push(c);
                if c == '\'' {
                    in_literal = true;
                }
            }
        }
    }

    // An unterminated literal can leave trailing whitespace behind.
    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out
}
