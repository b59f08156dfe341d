use std::borrow::Cow;

/// SEC-016: Strip control characters from text taken out of untrusted feed XML.
///
/// Feed titles end up in JSON responses and in `discover` CLI output, so a
/// hostile feed must not be able to smuggle terminal escape sequences through
/// them. ANSI CSI (`ESC [ ... final`) and OSC (`ESC ] ... BEL|ST`) sequences are
/// removed whole; any other C0 control or DEL is dropped.
///
/// Preserves: tab, newline, carriage return.
///
/// Returns `Cow::Borrowed` when there is nothing to strip (the common case).
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(is_stripped) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\x1b' {
            if !is_stripped(c) {
                out.push(c);
            }
            continue;
        }

        match chars.peek() {
            Some('[') => {
                chars.next();
                // Parameter and intermediate bytes run until a final byte in @..=~
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            Some(']') => {
                chars.next();
                while let Some(c) = chars.next() {
                    if c == '\x07' {
                        break;
                    }
                    if c == '\x1b' && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    Cow::Owned(out)
}

fn is_stripped(c: char) -> bool {
    c == '\x7f' || (c.is_ascii_control() && !matches!(c, '\t' | '\n' | '\r'))
}
