//! Cross-reference rewriting and display escaping for documentation bodies.
//!
//! Documentation text links to other entries with `<@link kind name>` markers,
//! or to external pages with `<@link url https://...>`. Before display those
//! markers become plain text: URLs are left bare, everything else becomes an
//! inline-code lookup hint such as `` `!tag player.name` ``.

use std::borrow::Cow;

/// Opening token of a cross-reference marker.
pub const LINK_OPEN: &str = "<@link";

const URL_PREFIX: &str = "url";

/// Find the `>` that closes a marker, honouring nested `<...>` pairs.
///
/// `start` is the first byte after the marker's own `<`. Returns the byte index
/// of the closing `>`, or `None` if the marker is unterminated.
pub fn find_closing_mark(text: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, byte) in text.as_bytes()[start..].iter().enumerate() {
        match byte {
            b'<' => depth += 1,
            b'>' if depth == 0 => return Some(start + offset),
            b'>' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Rewrite every `<@link ...>` marker into its display form.
///
/// An unterminated marker stops processing; the rest of the text is passed
/// through untouched.
pub fn rewrite_links(text: &str) -> Cow<'_, str> {
    let Some(mut next) = text.find(LINK_OPEN) else {
        return Cow::Borrowed(text);
    };

    let mut output = String::with_capacity(text.len());
    let mut last = 0;

    loop {
        output.push_str(&text[last..next]);

        let Some(end) = find_closing_mark(text, next + 1) else {
            tracing::warn!("Unterminated cross-reference at byte {}", next);
            last = next;
            break;
        };

        let inner = &text[next + LINK_OPEN.len()..end];
        let inner = inner.strip_prefix(' ').unwrap_or(inner);
        match inner.strip_prefix(URL_PREFIX) {
            Some(url) => output.push_str(url.trim_start()),
            None => {
                output.push_str("`!");
                output.push_str(inner);
                output.push('`');
            }
        }

        last = end + 1;
        match text[last..].find(LINK_OPEN) {
            Some(offset) => next = last + offset,
            None => break,
        }
    }

    output.push_str(&text[last..]);
    Cow::Owned(output)
}

/// Escape `<` and `>` outside of code spans so the renderer shows them literally.
///
/// Triple-backtick fences and single-backtick inline code are copied verbatim.
/// An unclosed fence or inline span runs to the end of the text.
pub fn escape_for_display(text: &str) -> Cow<'_, str> {
    if !text.contains(['<', '>']) {
        return Cow::Borrowed(text);
    }

    let mut output = String::with_capacity(text.len() * 2);
    let mut rest = text;
    let mut in_inline = false;

    while !rest.is_empty() {
        if !in_inline && let Some(after_open) = rest.strip_prefix("```") {
            let close = after_open.find("```").map_or(rest.len(), |i| i + 6);
            output.push_str(&rest[..close]);
            rest = &rest[close..];
            continue;
        }

        let mut chars = rest.chars();
        let Some(c) = chars.next() else { break };
        match c {
            '`' => in_inline = !in_inline,
            '<' | '>' if !in_inline => output.push('\\'),
            _ => {}
        }
        output.push(c);
        rest = chars.as_str();
    }

    Cow::Owned(output)
}

/// Make user-supplied text safe to echo inside `backticks`.
pub fn escape_user_input(text: &str) -> String {
    text.replace('`', "'")
}

/// Percent-encode the characters that break documentation URLs.
pub fn url_escape(input: &str) -> String {
    input
        .replace(' ', "%20")
        .replace('<', "%3C")
        .replace('>', "%3E")
        .replace('[', "%5B")
        .replace(']', "%5D")
}
