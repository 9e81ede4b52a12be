//! Single-kind resolution: exact key, then substring, then suggestion.
//!
//! Every documentation kind is looked up with the same pipeline; what differs
//! per kind (aliases, extra weak matches, rendering, ordering) is supplied
//! through [`ResolveOptions`].

use super::distance::{closest_match, distance, rank_by_distance};
use super::query::Query;
use crate::catalog::{DocEntry, Kind, KindPartition};
use crate::format::{Reply, entry_reply};

/// Closeness reported when nothing in the kind resembles the query.
pub const NO_MATCH: usize = 1000;

/// Default cap on the "did you mean" edit distance.
pub const DEFAULT_MAX_SUGGEST_DISTANCE: usize = 20;

/// Default cap on how many candidates an ambiguous reply lists.
pub const DEFAULT_MAX_DISPLAY: usize = 20;

/// Default documentation site root.
pub const DEFAULT_DOCS_URL_BASE: &str = "https://meta.denizenscript.com/Docs/";

/// How closely the query matched, for callers deciding whether to point the
/// user at a different kind of lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closeness {
    /// No search happened (empty query, or the `all` index pointer).
    NotNeeded,
    /// The query is exactly an entry's key.
    Exact,
    /// Edit distance from the query to the best imperfect match.
    Near(usize),
    /// Nothing matched and no suggestion was within range.
    NoMatch,
}

impl Closeness {
    /// Numeric form: 0 exact, distance for near misses, [`NO_MATCH`] for nothing.
    /// `None` when no search was needed.
    pub const fn score(self) -> Option<usize> {
        match self {
            Self::NotNeeded => None,
            Self::Exact => Some(0),
            Self::Near(d) => Some(d),
            Self::NoMatch => Some(NO_MATCH),
        }
    }

    /// Something matched, but not perfectly.
    pub const fn is_imperfect(self) -> bool {
        matches!(self, Self::Near(d) if d > 0)
    }
}

/// What the resolver decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<'c> {
    /// The query had no tokens.
    NeedInput,
    /// The user asked for `all`.
    ShowAll,
    /// One entry, either by exact key or as the only surviving candidate.
    Found(&'c DocEntry),
    /// No candidates.
    NotFound { suggestion: Option<String> },
    /// Several candidates, ranked and capped.
    Ambiguous {
        candidates: Vec<&'c DocEntry>,
        truncated: bool,
    },
}

/// The resolver's full answer.
#[derive(Debug, Clone)]
pub struct MatchResult<'c> {
    pub kind: Kind,
    pub outcome: Outcome<'c>,
    pub closeness: Closeness,
    pub reply: Reply,
}

type Predicate<'a> = Box<dyn Fn(&DocEntry) -> bool + Send + Sync + 'a>;
type SingleAction<'a> = Box<dyn Fn(&DocEntry) -> Reply + Send + Sync + 'a>;
type ClosestFinder<'a> = Box<dyn Fn(&KindPartition, &str) -> Option<String> + Send + Sync + 'a>;
/// Ascending sort key for ranking candidates.
pub type RankKey = (usize, usize);

type RankOrderer<'a> = Box<dyn Fn(&str, &DocEntry) -> RankKey + Send + Sync + 'a>;

/// Kind-specific hooks and limits for [`resolve`]. Every hook is optional.
pub struct ResolveOptions<'a> {
    secondary_key: Option<String>,
    secondary_predicate: Option<Predicate<'a>>,
    single_match: Option<SingleAction<'a>>,
    closest_finder: Option<ClosestFinder<'a>>,
    rank_orderer: Option<RankOrderer<'a>>,
    docs_url_base: String,
    max_suggest_distance: usize,
    max_display: usize,
}

impl Default for ResolveOptions<'_> {
    fn default() -> Self {
        Self {
            secondary_key: None,
            secondary_predicate: None,
            single_match: None,
            closest_finder: None,
            rank_orderer: None,
            docs_url_base: DEFAULT_DOCS_URL_BASE.to_string(),
            max_suggest_distance: DEFAULT_MAX_SUGGEST_DISTANCE,
            max_display: DEFAULT_MAX_DISPLAY,
        }
    }
}

impl std::fmt::Debug for ResolveOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolveOptions")
            .field("secondary_key", &self.secondary_key)
            .field("secondary_predicate", &self.secondary_predicate.is_some())
            .field("single_match", &self.single_match.is_some())
            .field("closest_finder", &self.closest_finder.is_some())
            .field("rank_orderer", &self.rank_orderer.is_some())
            .field("docs_url_base", &self.docs_url_base)
            .field("max_suggest_distance", &self.max_suggest_distance)
            .field("max_display", &self.max_display)
            .finish()
    }
}

impl<'a> ResolveOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// An alternate normalized key tried after the primary term.
    #[must_use]
    pub fn secondary_key(mut self, key: impl Into<String>) -> Self {
        self.secondary_key = Some(key.into().to_lowercase());
        self
    }

    /// Extra weak matches beyond name containment.
    #[must_use]
    pub fn secondary_predicate(
        mut self,
        predicate: impl Fn(&DocEntry) -> bool + Send + Sync + 'a,
    ) -> Self {
        self.secondary_predicate = Some(Box::new(predicate));
        self
    }

    /// Rendering used when exactly one entry is found.
    #[must_use]
    pub fn single_match(mut self, action: impl Fn(&DocEntry) -> Reply + Send + Sync + 'a) -> Self {
        self.single_match = Some(Box::new(action));
        self
    }

    /// Suggestion search used when nothing matches.
    #[must_use]
    pub fn closest_finder(
        mut self,
        finder: impl Fn(&KindPartition, &str) -> Option<String> + Send + Sync + 'a,
    ) -> Self {
        self.closest_finder = Some(Box::new(finder));
        self
    }

    /// Sort key for ordering several candidates; receives the primary term.
    /// Computed once per candidate, ties keep catalog order.
    #[must_use]
    pub fn rank_orderer(
        mut self,
        orderer: impl Fn(&str, &DocEntry) -> RankKey + Send + Sync + 'a,
    ) -> Self {
        self.rank_orderer = Some(Box::new(orderer));
        self
    }

    #[must_use]
    pub fn docs_url_base(mut self, base: impl Into<String>) -> Self {
        self.docs_url_base = base.into();
        self
    }

    #[must_use]
    pub fn max_suggest_distance(mut self, max: usize) -> Self {
        self.max_suggest_distance = max;
        self
    }

    #[must_use]
    pub fn max_display(mut self, max: usize) -> Self {
        self.max_display = max.max(1);
        self
    }

    fn render_single(&self, entry: &DocEntry) -> Reply {
        match &self.single_match {
            Some(action) => action(entry),
            None => entry_reply(entry, &self.docs_url_base),
        }
    }

    fn find_closest(&self, partition: &KindPartition, term: &str) -> Option<String> {
        match &self.closest_finder {
            Some(finder) => finder(partition, term),
            None => closest_match(term, partition.keys(), self.max_suggest_distance)
                .map(str::to_string),
        }
    }

    fn order(&self, term: &str, candidates: &mut [&DocEntry]) {
        match &self.rank_orderer {
            Some(orderer) => candidates.sort_by_cached_key(|entry| orderer(term, *entry)),
            None => rank_by_distance(term, candidates),
        }
    }
}

/// Resolve `query` against one kind's partition.
pub fn resolve<'c>(
    partition: &'c KindPartition,
    query: &Query,
    options: &ResolveOptions<'_>,
) -> MatchResult<'c> {
    let kind = partition.kind();
    let result = |outcome: Outcome<'c>, closeness: Closeness, reply: Reply| MatchResult {
        kind,
        outcome,
        closeness,
        reply,
    };

    let Some(term) = query.first() else {
        return result(Outcome::NeedInput, Closeness::NotNeeded, need_input_reply(kind));
    };

    if term == "all" {
        let reply = Reply::positive(
            format!("All {}", kind.name()),
            format!("Find all {} at {}{}", kind.name(), options.docs_url_base, kind.web_path()),
        );
        return result(Outcome::ShowAll, Closeness::NotNeeded, reply);
    }

    let secondary = options.secondary_key.as_deref();
    let exact = partition
        .get(term)
        .or_else(|| secondary.and_then(|key| partition.get(key)));
    if let Some(entry) = exact {
        tracing::debug!(%kind, term, "Exact match: {}", entry.clean_name());
        return result(Outcome::Found(entry), Closeness::Exact, options.render_single(entry));
    }

    let mut strong = Vec::new();
    let mut weak = Vec::new();
    for entry in partition.entries() {
        let name = entry.clean_name();
        if name.contains(term) || secondary.is_some_and(|key| name.contains(key)) {
            strong.push(entry);
        } else if options
            .secondary_predicate
            .as_ref()
            .is_some_and(|predicate| predicate(entry))
        {
            weak.push(entry);
        }
    }
    let mut candidates = if strong.is_empty() { weak } else { strong };
    tracing::debug!(%kind, term, "{} candidate(s)", candidates.len());

    match candidates.len() {
        0 => {
            let suggestion = options.find_closest(partition, term);
            let closeness = suggestion
                .as_deref()
                .map_or(Closeness::NoMatch, |s| Closeness::Near(distance(term, s)));
            let reply = not_found_reply(kind, suggestion.as_deref());
            result(Outcome::NotFound { suggestion }, closeness, reply)
        }
        1 => {
            let entry = candidates[0];
            let closeness = Closeness::Near(distance(term, entry.clean_name()));
            result(Outcome::Found(entry), closeness, options.render_single(entry))
        }
        _ => {
            options.order(term, &mut candidates);
            let truncated = candidates.len() > options.max_display;
            candidates.truncate(options.max_display);
            let closeness = Closeness::Near(distance(term, candidates[0].clean_name()));
            let reply = ambiguous_reply(kind, &candidates, truncated);
            result(
                Outcome::Ambiguous {
                    candidates,
                    truncated,
                },
                closeness,
                reply,
            )
        }
    }
}

fn need_input_reply(kind: Kind) -> Reply {
    Reply::error(
        format!("Need input for '{}' command", kind.name()),
        format!(
            "Please specify a {name} to search, like `!{lower} Some{name}Here`. Or, use `!{lower} all` to view all documented {lower}s.",
            name = kind.name(),
            lower = kind.lower_name()
        ),
    )
}

fn not_found_reply(kind: Kind, suggestion: Option<&str>) -> Reply {
    let mut description = format!("Unknown {}.", kind.lower_name());
    if let Some(suggestion) = suggestion {
        description.push_str(&format!(" Did you mean `{}`?", suggestion));
    }
    Reply::error(format!("Cannot Find Searched {}", kind.name()), description)
}

fn ambiguous_reply(kind: Kind, candidates: &[&DocEntry], truncated: bool) -> Reply {
    let names: Vec<&str> = candidates.iter().map(|e| e.clean_name()).collect();
    Reply::error(
        format!("Cannot Specify Searched {}", kind.name()),
        format!(
            "Multiple possible {}s: `{}`{}",
            kind.lower_name(),
            names.join("`, `"),
            if truncated { ", ..." } else { "." }
        ),
    )
}
