mod common;

use assert2::check;
use common::{catalog, config};
use meta_docs_mcp::tools::search::{SearchRequest, handle_search};
use meta_docs_mcp::{Catalog, CatalogState, Config, Query, Tier, search_all};
use rstest::rstest;

fn listed(catalog: &Catalog, query: &str) -> Vec<(Tier, Vec<String>)> {
    search_all(catalog, &Query::parse(query))
        .displayed(20)
        .into_iter()
        .map(|listing| {
            let names = listing
                .entries
                .iter()
                .map(|e| format!("{}:{}", e.kind().lower_name(), e.clean_name()))
                .collect();
            (listing.tier, names)
        })
        .collect()
}

#[rstest]
fn name_matches_are_strong_and_ranked(catalog: Catalog) {
    let shown = listed(&catalog, "health");
    check!(shown.len() == 1);
    let (tier, names) = &shown[0];
    check!(*tier == Tier::Strong);
    check!(
        names
            == &[
                "mechanism:npctag.health",
                "mechanism:playertag.health",
                "tag:playertag.health",
                "tag:entitytag.health_max"
            ]
    );
}

#[rstest]
fn token_matches_fall_to_partial_tiers(catalog: Catalog) {
    let shown = listed(&catalog, "player health");
    let tiers: Vec<_> = shown.iter().map(|(t, _)| *t).collect();
    check!(tiers == [Tier::PartialStrong, Tier::PartialWeak]);

    let partial_weak = &shown[1].1;
    check!(partial_weak.contains(&"command:give".to_string()));
    check!(partial_weak.contains(&"action:on click".to_string()));
    check!(!partial_weak.contains(&"command:drop".to_string()));
}

#[rstest]
fn every_entry_lands_in_at_most_one_tier(catalog: Catalog) {
    for text in ["health", "player health", "flag", "item player", "click"] {
        let results = search_all(&catalog, &Query::parse(text));
        let total: usize = Tier::ALL.iter().map(|&t| results.bucket(t).len()).sum();
        check!(total <= catalog.len(), "query {:?}", text);
        for entry in catalog.all_entries() {
            let hits = Tier::ALL
                .iter()
                .filter(|&&t| results.bucket(t).iter().any(|e| std::ptr::eq(*e, entry)))
                .count();
            check!(hits <= 1, "{} in {} tiers for {:?}", entry.name(), hits, text);
        }
    }
}

#[rstest]
fn unrelated_query_has_no_results(catalog: Catalog) {
    let results = search_all(&catalog, &Query::parse("zzqx"));
    check!(results.is_empty());
    let replies = results.replies(20);
    check!(replies.len() == 1);
    check!(replies[0].description == "No results found for `zzqx`.");
}

#[rstest]
#[tokio::test]
async fn handle_search_renders_tiers(catalog: Catalog, config: Config) {
    let state = CatalogState::new(catalog);
    let output = handle_search(
        &state,
        &config,
        SearchRequest {
            query: "Flag System".to_string(),
        },
    )
    .await;
    check!(output.is_ok(), "Search should succeed: {:?}", output);

    let output = output.unwrap();
    check!(output.starts_with("## (?) Best Match\n"));
    check!(output.contains("Very close: `!language flag system`"));
    check!(!output.contains("No results found"));
}

#[rstest]
#[tokio::test]
async fn handle_search_requires_input(catalog: Catalog, config: Config) {
    let state = CatalogState::new(catalog);
    let output = handle_search(
        &state,
        &config,
        SearchRequest {
            query: "   ".to_string(),
        },
    )
    .await
    .unwrap();
    check!(output.contains("Need input for 'Search' command"));
}
