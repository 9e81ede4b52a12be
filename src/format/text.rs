//! Plain markdown rendering of [`Reply`] values for the MCP surface.

use super::{Reply, Tone};
use std::fmt::{self, Write as _};

/// Render one reply as markdown.
pub fn render(reply: &Reply) -> String {
    let mut output = String::new();
    // Writing to a String cannot fail.
    let _ = write_reply(&mut output, reply);
    output
}

/// Render several replies separated by blank lines.
pub fn render_all(replies: &[Reply]) -> String {
    replies.iter().map(render).collect::<Vec<_>>().join("\n")
}

fn write_reply(output: &mut String, reply: &Reply) -> fmt::Result {
    let marker = match reply.tone {
        Tone::Entry | Tone::Positive => "",
        Tone::Negative => "(?) ",
        Tone::Error => "(!) ",
    };
    writeln!(output, "## {}{}", marker, reply.title)?;
    if let Some(url) = &reply.url {
        writeln!(output, "<{}>", url)?;
    }
    if !reply.description.is_empty() {
        writeln!(output, "\n{}", reply.description)?;
    }
    for field in &reply.fields {
        if field.value.contains('\n') {
            writeln!(output, "\n**{}**:\n{}", field.name, field.value)?;
        } else {
            writeln!(output, "\n**{}**: {}", field.name, field.value)?;
        }
    }
    Ok(())
}
