//! Query normalization.

/// A normalized user query: lowercase, whitespace-delimited tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    tokens: Vec<String>,
    joined: String,
}

impl Query {
    /// Split raw text on whitespace and lowercase every token.
    pub fn parse(raw: &str) -> Self {
        Self::from_tokens(raw.split_whitespace())
    }

    /// Build from already-split tokens (e.g. chat command arguments).
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens: Vec<String> = tokens
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        let joined = tokens.join(" ");
        Self { tokens, joined }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The primary search term.
    pub fn first(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// All tokens joined by single spaces.
    pub fn joined(&self) -> &str {
        &self.joined
    }

    /// Rewrite the primary term, keeping the rest.
    ///
    /// Used by kinds whose names carry decoration users often type, like the
    /// angle brackets around tags.
    #[must_use]
    pub fn map_first(mut self, f: impl FnOnce(&str) -> String) -> Self {
        if let Some(first) = self.tokens.first_mut() {
            *first = f(first);
            if first.is_empty() {
                self.tokens.remove(0);
            }
            self.joined = self.tokens.join(" ");
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("Give", &["give"], "give")]
    #[case("  NPC   Health ", &["npc", "health"], "npc health")]
    #[case("", &[], "")]
    #[case("   \t ", &[], "")]
    fn parse_lowercases_and_splits(
        #[case] raw: &str,
        #[case] tokens: &[&str],
        #[case] joined: &str,
    ) {
        let query = Query::parse(raw);
        check!(query.tokens() == tokens);
        check!(query.joined() == joined);
        check!(query.is_empty() == tokens.is_empty());
    }

    #[test]
    fn map_first_rewrites_primary_term() {
        let query = Query::parse("<Player.Health> extra")
            .map_first(|t| t.trim_matches(['<', '>']).to_string());
        check!(query.first() == Some("player.health"));
        check!(query.joined() == "player.health extra");
    }

    #[test]
    fn map_first_drops_token_that_becomes_empty() {
        let query = Query::parse("<>").map_first(|t| t.trim_matches(['<', '>']).to_string());
        check!(query.is_empty());
    }
}
