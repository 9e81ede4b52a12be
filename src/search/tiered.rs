//! Catalog-wide search bucketed into relevance tiers.
//!
//! Every entry of every kind is checked once and lands in at most one tier,
//! most specific first:
//!
//! | Tier           | Condition                                                   |
//! |----------------|-------------------------------------------------------------|
//! | Strong         | name contains the whole query                               |
//! | PartialStrong  | name contains any one query token                           |
//! | Weak           | body text contains the whole query                          |
//! | PartialWeak    | query inside name, or body text contains any one token      |

use super::distance::rank_by_distance;
use super::query::Query;
use crate::catalog::{Catalog, DocEntry};
use crate::format::Reply;
use crate::markup::escape_user_input;

/// A relevance class for catalog-wide search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Strong,
    PartialStrong,
    Weak,
    PartialWeak,
}

impl Tier {
    /// Most specific first.
    pub const ALL: [Self; 4] = [
        Self::Strong,
        Self::PartialStrong,
        Self::Weak,
        Self::PartialWeak,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            Self::Strong => "Best Match",
            Self::PartialStrong => "Probable Match",
            Self::Weak => "Possible Match",
            Self::PartialWeak => "Weak Match",
        }
    }

    pub const fn blurb(self) -> &'static str {
        match self {
            Self::Strong => "very close",
            Self::PartialStrong => "close but imperfect",
            Self::Weak => "might be related",
            Self::PartialWeak => "if nothing else, some chance of being related",
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

fn classify(entry: &DocEntry, query: &Query) -> Option<Tier> {
    let name = entry.clean_name();
    let body = entry.searchable();
    let joined = query.joined();
    let tokens = query.tokens();

    if name.contains(joined) {
        Some(Tier::Strong)
    } else if tokens.iter().any(|t| name.contains(t.as_str())) {
        Some(Tier::PartialStrong)
    } else if body.contains(joined) {
        Some(Tier::Weak)
        // The name clause below never fires; Strong already took those entries.
    } else if name.contains(joined) || tokens.iter().any(|t| body.contains(t.as_str())) {
        Some(Tier::PartialWeak)
    } else {
        None
    }
}

/// One tier's share of the output, ranked and capped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierListing<'c> {
    pub tier: Tier,
    pub entries: Vec<&'c DocEntry>,
    pub truncated: bool,
}

impl TierListing<'_> {
    /// Message listing this tier's entries as lookup hints.
    pub fn reply(&self) -> Reply {
        let hints: Vec<String> = self
            .entries
            .iter()
            .map(|e| format!("`!{} {}`", e.kind().lower_name(), e.clean_name()))
            .collect();
        let mut description = format!("{}: {}", capitalize(self.tier.blurb()), hints.join(", "));
        if self.truncated {
            description.push_str(", ...");
        }
        Reply::negative(self.tier.title(), description)
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Raw tier membership for one query.
#[derive(Debug, Clone, Default)]
pub struct TieredResults<'c> {
    query: String,
    buckets: [Vec<&'c DocEntry>; 4],
}

impl<'c> TieredResults<'c> {
    /// Entries in a tier, in catalog order (unranked).
    pub fn bucket(&self, tier: Tier) -> &[&'c DocEntry] {
        &self.buckets[tier.slot()]
    }

    /// Which tier an entry landed in, if any.
    pub fn tier_of(&self, entry: &DocEntry) -> Option<Tier> {
        Tier::ALL
            .into_iter()
            .find(|&tier| self.bucket(tier).iter().any(|e| std::ptr::eq(*e, entry)))
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// The tiers that should be shown, after suppression, each ranked by
    /// distance to the whole query and capped at `max_display`.
    ///
    /// Strong is shown when present. Partial-strong is shown when present and
    /// ends the output if Strong was also present. Weak is shown when present
    /// and ends the output if either strong tier was present. Partial-weak is
    /// shown if the output gets that far.
    pub fn displayed(&self, max_display: usize) -> Vec<TierListing<'c>> {
        let has = |tier: Tier| !self.bucket(tier).is_empty();
        let mut shown = Vec::new();

        for tier in Tier::ALL {
            if has(tier) {
                shown.push(self.listing(tier, max_display));
            }
            let stop = match tier {
                Tier::Strong => false,
                Tier::PartialStrong => has(Tier::PartialStrong) && has(Tier::Strong),
                Tier::Weak => has(Tier::Weak) && (has(Tier::Strong) || has(Tier::PartialStrong)),
                Tier::PartialWeak => true,
            };
            if stop {
                break;
            }
        }
        shown
    }

    fn listing(&self, tier: Tier, max_display: usize) -> TierListing<'c> {
        let mut entries = self.bucket(tier).to_vec();
        rank_by_distance(&self.query, &mut entries);
        let truncated = entries.len() > max_display;
        entries.truncate(max_display);
        TierListing {
            tier,
            entries,
            truncated,
        }
    }

    /// Messages for display: one per shown tier, or a single "no results".
    pub fn replies(&self, max_display: usize) -> Vec<Reply> {
        let listings = self.displayed(max_display);
        if listings.is_empty() {
            return vec![Reply::error(
                "Search Results",
                format!("No results found for `{}`.", escape_user_input(&self.query)),
            )];
        }
        listings.iter().map(TierListing::reply).collect()
    }
}

/// Classify every catalog entry against `query`.
///
/// An empty query matches nothing.
pub fn search_all<'c>(catalog: &'c Catalog, query: &Query) -> TieredResults<'c> {
    let mut results = TieredResults {
        query: query.joined().to_string(),
        buckets: Default::default(),
    };
    if query.is_empty() {
        return results;
    }

    for entry in catalog.all_entries() {
        if let Some(tier) = classify(entry, query) {
            results.buckets[tier.slot()].push(entry);
        }
    }

    tracing::debug!(
        query = query.joined(),
        strong = results.bucket(Tier::Strong).len(),
        partial_strong = results.bucket(Tier::PartialStrong).len(),
        weak = results.bucket(Tier::Weak).len(),
        partial_weak = results.bucket(Tier::PartialWeak).len(),
        "Catalog search classified"
    );
    results
}
