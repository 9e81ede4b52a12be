//! Per-kind documentation lookup.
//!
//! Each kind feeds the shared resolver its own aliasing, weak matching and
//! ordering. When a lookup lands imperfectly, the other kinds are checked for
//! a closer name so the user can be pointed at the right command.

use crate::catalog::state::CatalogState;
use crate::catalog::{Catalog, DocEntry, Kind, KindDetails};
use crate::config::Config;
use crate::format::text::render;
use crate::markup::escape_user_input;
use crate::search::{
    Closeness, MatchResult, Query, ResolveOptions, closest_match, distance, resolve,
};
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LookupRequest {
    /// Kind of documentation object to look up
    pub kind: Kind,
    /// Name, or part of a name, to look up. Use `all` for a link to the full index.
    pub query: String,
}

/// Mechanism-style `object.property` rewritten into the tag object form
/// (`player.health` -> `playertag.health`). `None` if there is nothing to rewrite.
pub fn tag_style_alias(name: &str) -> Option<String> {
    let (object, property) = name.split_once('.')?;
    if object.is_empty() || object.ends_with("tag") {
        return None;
    }
    Some(format!("{}tag.{}", object, property))
}

fn last_segment(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

fn any_line_contains(lines: &[String], term: &str) -> bool {
    lines.iter().any(|line| line.to_lowercase().contains(term))
}

/// Normalize raw query text the way `kind` expects.
pub fn parse_query(kind: Kind, raw: &str) -> Query {
    let query = Query::parse(raw);
    match kind {
        Kind::Tag => query.map_first(|t| t.trim_matches(['<', '>']).to_string()),
        _ => query,
    }
}

/// The resolver configuration for one kind.
pub fn kind_options<'a>(kind: Kind, query: &Query, config: &Config) -> ResolveOptions<'a> {
    let term = query.first().unwrap_or_default().to_string();
    let options = ResolveOptions::new()
        .docs_url_base(config.docs_url_base.clone())
        .max_suggest_distance(config.max_suggest_distance)
        .max_display(config.max_display);

    match kind {
        Kind::Command => options.secondary_predicate(move |entry| {
            matches!(&entry.details, KindDetails::Command { short_description, .. }
                if short_description.to_lowercase().contains(&term))
        }),
        Kind::Mechanism => {
            let options = match tag_style_alias(&term) {
                Some(alias) => options.secondary_key(alias),
                None => options,
            };
            options.secondary_predicate(move |entry| {
                matches!(&entry.details, KindDetails::Mechanism { tags, .. }
                    if any_line_contains(tags, &term))
            })
        }
        Kind::Tag => {
            let options = match tag_style_alias(&term) {
                Some(alias) => options.secondary_key(alias),
                None => options,
            };
            options.rank_orderer(|term, entry| {
                (
                    distance(term, last_segment(entry.clean_name())),
                    distance(term, entry.clean_name()),
                )
            })
        }
        Kind::Event => options
            .secondary_predicate(move |entry| {
                matches!(&entry.details, KindDetails::Event { events, .. }
                    if any_line_contains(events, &term))
            })
            .rank_orderer(|term, entry| (event_distance(term, entry), 0)),
        Kind::Action => options.secondary_predicate(move |entry| {
            matches!(&entry.details, KindDetails::Action { actions }
                if any_line_contains(actions, &term))
        }),
        Kind::Language => {
            options.secondary_predicate(move |entry| entry.searchable().contains(&term))
        }
    }
}

/// Best distance from `term` to an event's name or any of its event lines.
fn event_distance(term: &str, entry: &DocEntry) -> usize {
    let by_name = distance(term, entry.clean_name());
    match &entry.details {
        KindDetails::Event { events, .. } => events
            .iter()
            .map(|line| distance(term, &line.to_lowercase()))
            .fold(by_name, usize::min),
        _ => by_name,
    }
}

/// A different kind holding a strictly closer name than `closeness`, if any.
pub fn other_kind_hint(
    catalog: &Catalog,
    kind: Kind,
    term: &str,
    closeness: Closeness,
    max_distance: usize,
) -> Option<(Kind, String)> {
    if !(closeness.is_imperfect() || closeness == Closeness::NoMatch) {
        return None;
    }
    let mut best_score = closeness.score()?;
    let mut best = None;

    for other in Kind::ALL.into_iter().filter(|&k| k != kind) {
        let partition = catalog.partition(other);
        if let Some(name) = closest_match(term, partition.keys(), max_distance) {
            let score = distance(term, name);
            if score < best_score {
                best_score = score;
                best = Some((other, name.to_string()));
            }
        }
    }
    best
}

/// Look up one kind and attach a cross-kind hint when useful.
pub fn lookup<'c>(
    catalog: &'c Catalog,
    kind: Kind,
    query: &Query,
    config: &Config,
) -> MatchResult<'c> {
    let options = kind_options(kind, query, config);
    let mut result = resolve(catalog.partition(kind), query, &options);

    if let Some(term) = query.first()
        && let Some((other, name)) =
            other_kind_hint(catalog, kind, term, result.closeness, config.max_suggest_distance)
    {
        tracing::debug!(%kind, %other, term, "Suggesting lookup in another kind");
        result.reply.append(&format!(
            "Did you mean to search for {} `{}`? Try `!{} {}`.",
            other.lower_name(),
            name,
            other.lower_name(),
            name
        ));
    }
    result
}

/// Handle a lookup request against the current catalog.
pub async fn handle_lookup(
    state: &CatalogState,
    config: &Config,
    request: LookupRequest,
) -> Result<String, String> {
    let catalog = state.snapshot().await;
    let query = parse_query(request.kind, &request.query);
    let result = lookup(&catalog, request.kind, &query, config);

    tracing::info!(
        kind = %request.kind,
        query = %escape_user_input(query.joined()),
        closeness = ?result.closeness,
        "Lookup"
    );
    Ok(render(&result.reply))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Outcome;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("player.health", Some("playertag.health"))]
    #[case("playertag.health", None)]
    #[case("health", None)]
    #[case(".health", None)]
    #[case("npc.flag.expire", Some("npctag.flag.expire"))]
    fn tag_alias_cases(#[case] input: &str, #[case] expected: Option<&str>) {
        check!(tag_style_alias(input).as_deref() == expected);
    }

    #[test]
    fn tag_query_strips_brackets() {
        let query = parse_query(Kind::Tag, "<PlayerTag.Name>");
        check!(query.first() == Some("playertag.name"));
        let query = parse_query(Kind::Command, "<give>");
        check!(query.first() == Some("<give>"));
    }

    #[test]
    fn event_distance_uses_best_line() {
        let entry = DocEntry::new(
            "Player Breaks Block",
            KindDetails::Event {
                events: vec![
                    "player breaks block".to_string(),
                    "player breaks <material>".to_string(),
                ],
                triggers: String::new(),
            },
        );
        check!(event_distance("player breaks block", &entry) == 0);
    }

    #[test]
    fn events_rank_by_closest_event_line() {
        let event = |name: &str, lines: &[&str]| {
            DocEntry::new(
                name,
                KindDetails::Event {
                    events: lines.iter().map(ToString::to_string).collect(),
                    triggers: String::new(),
                },
            )
        };
        let catalog = Catalog::builder()
            .entry(event(
                "Player Breaks Block",
                &["player breaks block", "player breaks <material>"],
            ))
            .and_then(|b| b.entry(event("Entity Breaks Hanging", &["Hanging Breaks"])))
            .unwrap()
            .build();

        let query = parse_query(Kind::Event, "breaks");
        let result = lookup(&catalog, Kind::Event, &query, &Config::default());
        let Outcome::Ambiguous { candidates, .. } = &result.outcome else {
            panic!("expected ambiguous outcome, got {:?}", result.outcome);
        };
        let names: Vec<_> = candidates.iter().map(|e| e.clean_name()).collect();
        check!(names == ["entity breaks hanging", "player breaks block"]);
    }

    #[test]
    fn hint_only_for_imperfect_or_missing() {
        let catalog = Catalog::builder()
            .entry(DocEntry::new(
                "flag",
                KindDetails::Command {
                    syntax: String::new(),
                    short_description: String::new(),
                    required_args: None,
                },
            ))
            .unwrap()
            .build();

        check!(other_kind_hint(&catalog, Kind::Tag, "flag", Closeness::Exact, 20).is_none());
        check!(other_kind_hint(&catalog, Kind::Tag, "flag", Closeness::NotNeeded, 20).is_none());
        check!(
            other_kind_hint(&catalog, Kind::Tag, "flag", Closeness::NoMatch, 20)
                == Some((Kind::Command, "flag".to_string()))
        );
        check!(
            other_kind_hint(&catalog, Kind::Tag, "flags", Closeness::Near(1), 20).is_none(),
            "equal distance is not an improvement"
        );
    }

    #[test]
    fn mechanism_alias_resolves_exactly() {
        let catalog = Catalog::builder()
            .entry(DocEntry::new(
                "PlayerTag.health",
                KindDetails::Mechanism {
                    object: "PlayerTag".to_string(),
                    input: "ElementTag(Decimal)".to_string(),
                    tags: vec!["<PlayerTag.health>".to_string()],
                },
            ))
            .unwrap()
            .build();
        let query = parse_query(Kind::Mechanism, "player.health");
        let result = lookup(&catalog, Kind::Mechanism, &query, &Config::default());
        check!(result.closeness == Closeness::Exact);
        check!(matches!(result.outcome, Outcome::Found(e) if e.name() == "PlayerTag.health"));
    }
}
