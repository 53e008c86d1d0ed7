//! Pure aggregation over the parsed entities: ranking totals, per-round
//! standings, grouped highlights and grouped championship history.
//! Everything here operates on immutable snapshots; nothing fetches.

use crate::table::{fold, round_number};
use crate::{
    Category, ChampionEntry, HighlightItem, Player, RankingRow, RoundRecord,
};
use std::collections::HashMap;

/// Join active players with their round records and compute cumulative
/// totals. Sorted descending by total; ties keep player order (stable).
///
/// Only finite numeric scores count: `rounds_played` is the number of
/// rounds the player actually has a score for, and the average divides
/// by that, not by the number of round columns.
pub fn compute_ranking(players: &[Player], records: &[RoundRecord]) -> Vec<RankingRow> {
    let by_player: HashMap<String, &RoundRecord> =
        records.iter().map(|r| (fold(&r.player), r)).collect();

    let mut rows: Vec<RankingRow> = players
        .iter()
        .map(|p| {
            let scores = by_player.get(&fold(&p.name)).map(|r| &r.scores);
            let values: Vec<f64> = scores
                .map(|s| s.values().copied().filter(|n| n.is_finite()).collect())
                .unwrap_or_default();

            let total: f64 = values.iter().sum();
            let rounds_played = values.len();
            let average = if rounds_played > 0 { total / rounds_played as f64 } else { 0.0 };

            RankingRow {
                name: p.name.clone(),
                photo_url: p.photo_url.clone(),
                role: p.role.clone(),
                total,
                average,
                rounds_played,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.total.total_cmp(&a.total));
    rows
}

/// One player's score in a single round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundStanding {
    pub player: String,
    pub points: f64,
}

/// Standings for one round label: every player with a finite score in
/// that round, best first. Players with no score for the round are
/// excluded entirely, not sorted to the bottom.
pub fn round_standings(records: &[RoundRecord], round: &str) -> Vec<RoundStanding> {
    let mut rows: Vec<RoundStanding> = records
        .iter()
        .filter_map(|r| {
            r.score(round).map(|points| RoundStanding { player: r.player.clone(), points })
        })
        .collect();
    rows.sort_by(|a, b| b.points.total_cmp(&a.points));
    rows
}

/// Every canonical round label present in the dataset, ascending by
/// round number.
pub fn round_labels(records: &[RoundRecord]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for record in records {
        for key in record.scores.keys() {
            if !labels.contains(key) {
                labels.push(key.clone());
            }
        }
    }
    labels.sort_by_key(|l| round_number(l));
    labels
}

/// Highest round number with any score recorded — the league's current
/// round, estimated from the data.
pub fn latest_round(records: &[RoundRecord]) -> Option<u32> {
    records
        .iter()
        .flat_map(|r| r.scores.keys())
        .map(|l| round_number(l))
        .max()
}

/// Top scorer of one round, if anyone scored.
pub fn round_winner(records: &[RoundRecord], round: &str) -> Option<RoundStanding> {
    round_standings(records, round).into_iter().next()
}

/// Lowest finite score of one round — the "lanterninha" card.
pub fn round_low(records: &[RoundRecord], round: &str) -> Option<RoundStanding> {
    round_standings(records, round).into_iter().last()
}

/// Winner of each of the most recent `limit` rounds, newest first.
/// Rounds where nobody has a finite score are skipped.
pub fn round_winners(records: &[RoundRecord], limit: usize) -> Vec<(String, RoundStanding)> {
    let mut labels = round_labels(records);
    labels.reverse();
    labels
        .into_iter()
        .filter_map(|label| round_winner(records, &label).map(|w| (label, w)))
        .take(limit)
        .collect()
}

/// Highlights for one round, source order preserved within the group.
#[derive(Debug, Clone, Default)]
pub struct HighlightGroup {
    pub round: String,
    pub items: Vec<HighlightItem>,
}

/// Group highlight items by their round label, ordered by the numeric
/// portion of the label ascending. Items keep their source row order
/// inside each group.
pub fn group_highlights(items: &[HighlightItem]) -> Vec<HighlightGroup> {
    let mut groups: Vec<HighlightGroup> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|g| g.round == item.round) {
            Some(group) => group.items.push(item.clone()),
            None => groups.push(HighlightGroup {
                round: item.round.clone(),
                items: vec![item.clone()],
            }),
        }
    }
    groups.sort_by_key(|g| round_number(&g.round));
    groups
}

/// Championship results for one (year, category) cell, positions
/// ascending.
#[derive(Debug, Clone, Default)]
pub struct ChampionGroup {
    pub year: String,
    pub category: Category,
    pub entries: Vec<ChampionEntry>,
}

/// Group champion entries by year and normalized competition category.
/// Years descend (most recent season first); within a year the Liga
/// group precedes the Copa group; within a group positions ascend.
pub fn group_champions(entries: &[ChampionEntry]) -> Vec<ChampionGroup> {
    let mut groups: Vec<ChampionGroup> = Vec::new();
    for entry in entries {
        let year = entry.year.trim().to_string();
        if year.is_empty() {
            continue;
        }
        let category = Category::from_competition(&entry.competition);
        match groups.iter_mut().find(|g| g.year == year && g.category == category) {
            Some(group) => group.entries.push(entry.clone()),
            None => groups.push(ChampionGroup { year, category, entries: vec![entry.clone()] }),
        }
    }

    for group in &mut groups {
        group.entries.sort_by(|a, b| a.position.total_cmp(&b.position));
    }
    groups.sort_by(|a, b| {
        let ya = a.year.parse::<i64>().unwrap_or(i64::MIN);
        let yb = b.year.parse::<i64>().unwrap_or(i64::MIN);
        yb.cmp(&ya).then_with(|| a.category.cmp(&b.category))
    });
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str) -> Player {
        Player { name: name.into(), active: true, ..Default::default() }
    }

    fn record(name: &str, scores: &[(&str, f64)]) -> RoundRecord {
        RoundRecord {
            player: name.into(),
            scores: scores.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    #[test]
    fn ranking_totals_skip_absent_rounds() {
        // R2 was blank in the sheet, so it never entered the score map.
        let players = vec![player("Ana")];
        let records = vec![record("Ana", &[("R1", 10.0), ("R3", 20.0)])];
        let rows = compute_ranking(&players, &records);
        assert_eq!(rows[0].rounds_played, 2);
        assert_eq!(rows[0].total, 30.0);
        assert_eq!(rows[0].average, 15.0);
    }

    #[test]
    fn ranking_join_ignores_case_and_accents() {
        let players = vec![player("João")];
        let records = vec![record("  joao ", &[("R1", 7.0)])];
        let rows = compute_ranking(&players, &records);
        assert_eq!(rows[0].total, 7.0);
    }

    #[test]
    fn ranking_player_without_record_scores_zero() {
        let players = vec![player("Ana"), player("Bia")];
        let records = vec![record("Ana", &[("R1", 12.0), ("R2", 8.0)])];
        let rows = compute_ranking(&players, &records);
        assert_eq!(rows[0].name, "Ana");
        assert_eq!(rows[1].name, "Bia");
        assert_eq!(rows[1].total, 0.0);
        assert_eq!(rows[1].average, 0.0);
        assert_eq!(rows[1].rounds_played, 0);
    }

    #[test]
    fn ranking_sorts_descending_ties_stable() {
        let players = vec![player("Ana"), player("Bia"), player("Caio")];
        let records = vec![
            record("Ana", &[("R1", 5.0)]),
            record("Bia", &[("R1", 9.0)]),
            record("Caio", &[("R1", 5.0)]),
        ];
        let names: Vec<String> =
            compute_ranking(&players, &records).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Bia", "Ana", "Caio"]);
    }

    #[test]
    fn round_standings_exclude_absent_scores() {
        let records = vec![
            record("Ana", &[("R1", 10.0), ("R2", 3.0)]),
            record("Bia", &[("R2", 11.0)]),
            record("Caio", &[("R1", 22.0)]),
        ];
        let standings = round_standings(&records, "R1");
        assert_eq!(standings.len(), 2, "Bia has no R1 score and is excluded");
        assert_eq!(standings[0].player, "Caio");
        assert_eq!(standings[1].player, "Ana");
    }

    #[test]
    fn round_labels_sorted_numerically() {
        let records = vec![
            record("Ana", &[("R10", 1.0), ("R2", 1.0)]),
            record("Bia", &[("R1", 1.0)]),
        ];
        assert_eq!(round_labels(&records), vec!["R1", "R2", "R10"]);
        assert_eq!(latest_round(&records), Some(10));
        assert_eq!(latest_round(&[]), None);
    }

    #[test]
    fn round_winner_and_low() {
        let records = vec![
            record("Ana", &[("R1", 10.0)]),
            record("Bia", &[("R1", 2.5)]),
            record("Caio", &[("R2", 7.0)]),
        ];
        assert_eq!(round_winner(&records, "R1").unwrap().player, "Ana");
        assert_eq!(round_low(&records, "R1").unwrap().player, "Bia");
        assert!(round_winner(&records, "R9").is_none());
    }

    #[test]
    fn round_winners_newest_first() {
        let records = vec![
            record("Ana", &[("R1", 10.0), ("R2", 1.0)]),
            record("Bia", &[("R2", 8.0), ("R3", 4.0)]),
        ];
        let winners = round_winners(&records, 2);
        assert_eq!(winners.len(), 2);
        assert_eq!(winners[0].0, "R3");
        assert_eq!(winners[0].1.player, "Bia");
        assert_eq!(winners[1].0, "R2");
        assert_eq!(winners[1].1.player, "Bia");
    }

    fn highlight(round: &str, player: &str) -> HighlightItem {
        HighlightItem {
            round: round.into(),
            kind: "Mico".into(),
            player: player.into(),
            text: "...".into(),
            link: None,
        }
    }

    #[test]
    fn highlight_groups_ordered_by_round_number() {
        let items = vec![
            highlight("R10", "Ana"),
            highlight("R2", "Bia"),
            highlight("R2", "Caio"),
        ];
        let groups = group_highlights(&items);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].round, "R2");
        assert_eq!(groups[0].items[0].player, "Bia");
        assert_eq!(groups[0].items[1].player, "Caio");
        assert_eq!(groups[1].round, "R10");
    }

    fn champion(year: &str, competition: &str, position: f64) -> ChampionEntry {
        ChampionEntry {
            year: year.into(),
            competition: competition.into(),
            position,
            team: "Time".into(),
            ..Default::default()
        }
    }

    #[test]
    fn champions_group_by_year_and_category() {
        let entries = vec![
            champion("2023", "Copa dos Mestres", 2.0),
            champion("2024", "LIGA", 1.0),
            champion("2023", "Copa dos Mestres", 1.0),
            champion("2023", "Torneio Relâmpago", 1.0),
        ];
        let groups = group_champions(&entries);
        // 2024 Liga, 2023 Liga (unrecognized → Liga), 2023 Copa
        assert_eq!(groups.len(), 3);
        assert_eq!((groups[0].year.as_str(), groups[0].category), ("2024", Category::Liga));
        assert_eq!((groups[1].year.as_str(), groups[1].category), ("2023", Category::Liga));
        assert_eq!((groups[2].year.as_str(), groups[2].category), ("2023", Category::Copa));
        // positions ascend inside the group
        assert_eq!(groups[2].entries[0].position, 1.0);
        assert_eq!(groups[2].entries[1].position, 2.0);
    }
}
