//! Structured replies and documentation entry rendering.
//!
//! The core produces [`Reply`] values; turning them into text for a particular
//! surface happens in [`text`].

pub mod text;

use crate::catalog::{DocEntry, KindDetails};
use crate::markup::{escape_for_display, rewrite_links, url_escape};

/// How a reply should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// A documentation entry.
    Entry,
    /// A helpful, non-error answer (e.g. "all commands are at ...").
    Positive,
    /// Search results that may or may not be what the user wanted.
    Negative,
    /// The query could not be satisfied.
    Error,
}

/// One labelled value inside a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: String,
}

/// A surface-independent message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub tone: Tone,
    pub title: String,
    pub url: Option<String>,
    pub description: String,
    pub fields: Vec<Field>,
}

impl Reply {
    pub fn new(tone: Tone, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            tone,
            title: title.into(),
            url: None,
            description: description.into(),
            fields: Vec::new(),
        }
    }

    pub fn positive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Tone::Positive, title, description)
    }

    pub fn negative(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Tone::Negative, title, description)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Tone::Error, title, description)
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Add a field unless the value is blank. Links are rewritten and the value escaped.
    pub fn auto_field(&mut self, name: &str, value: Option<&str>) {
        let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
            return;
        };
        self.fields.push(Field {
            name: name.to_string(),
            value: display_text(value),
        });
    }

    /// Append a paragraph to the description.
    pub fn append(&mut self, paragraph: &str) {
        if !self.description.is_empty() {
            self.description.push_str("\n\n");
        }
        self.description.push_str(paragraph);
    }
}

/// Rewrite cross-references, then escape for display.
pub fn display_text(raw: &str) -> String {
    escape_for_display(&rewrite_links(raw)).into_owned()
}

/// Documentation page URL for an entry.
pub fn entry_url(entry: &DocEntry, url_base: &str) -> String {
    format!(
        "{}{}/{}",
        url_base,
        entry.kind().web_path(),
        url_escape(entry.clean_name())
    )
}

/// Full rendering of a documentation entry.
pub fn entry_reply(entry: &DocEntry, url_base: &str) -> Reply {
    let mut reply = Reply::new(
        Tone::Entry,
        format!("{}: {}", entry.kind().name(), entry.name()),
        display_text(&entry.description),
    )
    .with_url(entry_url(entry, url_base));

    reply.auto_field("Required Plugin(s)", entry.plugin.as_deref());
    reply.auto_field("Group", entry.group.as_deref());
    for warning in &entry.warnings {
        reply.auto_field("**WARNING**", Some(warning));
    }

    match &entry.details {
        KindDetails::Command {
            syntax,
            short_description,
            required_args,
        } => {
            reply.auto_field("Syntax", Some(syntax));
            reply.auto_field("Short Description", Some(short_description));
            reply.auto_field("Required Arguments", required_args.as_deref());
        }
        KindDetails::Mechanism { object, input, tags } => {
            reply.auto_field("Object", Some(object));
            reply.auto_field("Input", Some(input));
            reply.auto_field("Related Tags", Some(&tags.join("\n")));
        }
        KindDetails::Tag { returns, mechanism } => {
            reply.auto_field("Returns", Some(returns));
            reply.auto_field("Mechanism", mechanism.as_deref());
        }
        KindDetails::Event { events, triggers } => {
            reply.auto_field("Event Lines", Some(&events.join("\n")));
            reply.auto_field("Triggers", Some(triggers));
        }
        KindDetails::Action { actions } => {
            reply.auto_field("Action Lines", Some(&actions.join("\n")));
        }
        KindDetails::Language => {}
    }

    reply
}
