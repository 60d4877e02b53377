//! Response text cleanup

/// Zero-width no-break space some upstream providers prepend to every response
pub const ZERO_WIDTH_NO_BREAK_SPACE: char = '\u{FEFF}';

/// Remove every zero-width no-break space from a line
pub fn normalize(line: &str) -> String {
    line.replace(ZERO_WIDTH_NO_BREAK_SPACE, "")
}

/// Join a response body line by line.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`. Terminators are dropped and the
/// normalized lines are concatenated without a separator.
pub fn join_lines(body: &str) -> String {
    let mut output = String::with_capacity(body.len());
    let mut rest = body;

    while !rest.is_empty() {
        match rest.find(['\r', '\n']) {
            Some(idx) => {
                output.push_str(&normalize(&rest[..idx]));
                let terminator = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[idx + terminator..];
            }
            None => {
                output.push_str(&normalize(rest));
                break;
            }
        }
    }

    output
}
