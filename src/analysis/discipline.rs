//! Fouls and cards.

use serde::Serialize;

use crate::processing::filter;
use crate::types::DataSet;

use super::tables::{group_rows, Counts, CrossTab};
use super::{columns, Col, CARD_LABELS, FOUL, RED_CARD, SECOND_YELLOW_CARD, YELLOW_CARD};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisciplineSummary {
    pub total_fouls: usize,
    pub yellow_cards: usize,
    pub second_yellow_cards: usize,
    pub red_cards: usize,
    /// Yellow + second yellow + red.
    pub total_cards: usize,
    /// Cards per team, most first (`None` without a team column or without cards).
    pub most_cards_by_team: Option<Counts>,
    /// Team x card label.
    pub card_breakdown_by_team: Option<CrossTab>,
    /// Fouls per team, most first (`None` without a team column or without fouls).
    pub most_fouls_by_team: Option<Counts>,
}

/// Count fouls and cards from the event-type labels.
///
/// `None` when the table has no event-type label column.
pub fn disciplinary_analysis(dataset: &DataSet) -> Option<DisciplineSummary> {
    let label = Col::of(dataset, columns::EVENT_TYPE_LABEL);
    if !label.present() {
        return None;
    }
    let team = Col::of(dataset, columns::EVENT_TEAM);

    let cards = filter(dataset, |row| {
        label.str(row).is_some_and(|l| CARD_LABELS.contains(&l))
    });
    let fouls = filter(dataset, |row| label.is(row, FOUL));
    let count_label = |wanted: &str| cards.rows.iter().filter(|row| label.is(row, wanted)).count();

    let per_team = |events: &DataSet| -> Option<Counts> {
        if !team.present() || events.row_count() == 0 {
            return None;
        }
        let counts: Counts = group_rows(events, |row| team.key(row))
            .into_iter()
            .map(|(t, rows)| (t, rows.len()))
            .collect();
        Some(counts.sorted_desc())
    };

    let card_breakdown_by_team = (team.present() && cards.row_count() > 0).then(|| {
        CrossTab::from_pairs(
            cards
                .rows
                .iter()
                .filter_map(|row| Some((team.key(row)?, label.str(row)?.to_owned()))),
        )
    });

    Some(DisciplineSummary {
        total_fouls: fouls.row_count(),
        yellow_cards: count_label(YELLOW_CARD),
        second_yellow_cards: count_label(SECOND_YELLOW_CARD),
        red_cards: count_label(RED_CARD),
        total_cards: cards.row_count(),
        most_cards_by_team: per_team(&cards),
        card_breakdown_by_team,
        most_fouls_by_team: per_team(&fouls),
    })
}

#[cfg(test)]
mod tests {
    use super::disciplinary_analysis;
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn events(rows: &[(&str, &str)]) -> DataSet {
        let schema = Schema::new(vec![
            Field::new("event_team", DataType::Utf8),
            Field::new("event_type_label", DataType::Utf8),
        ]);
        let rows = rows
            .iter()
            .map(|(team, label)| {
                vec![Value::Utf8(team.to_string()), Value::Utf8(label.to_string())]
            })
            .collect();
        DataSet::new(schema, rows)
    }

    #[test]
    fn counts_cards_and_fouls_per_team() {
        let ds = events(&[
            ("Lyon", "Yellow card"),
            ("Nice", "Foul"),
            ("Nice", "Red card"),
            ("Nice", "Second yellow card"),
            ("Lyon", "Foul"),
            ("Nice", "Foul"),
            ("Lyon", "Attempt"),
        ]);
        let d = disciplinary_analysis(&ds).unwrap();
        assert_eq!(d.total_fouls, 3);
        assert_eq!(d.yellow_cards, 1);
        assert_eq!(d.second_yellow_cards, 1);
        assert_eq!(d.red_cards, 1);
        assert_eq!(d.total_cards, 3);

        let cards: Vec<_> = d
            .most_cards_by_team
            .unwrap()
            .iter()
            .map(|(t, n)| (t.to_string(), n))
            .collect();
        assert_eq!(cards, vec![("Nice".to_string(), 2), ("Lyon".to_string(), 1)]);

        let tab = d.card_breakdown_by_team.unwrap();
        assert_eq!(tab.get("Nice", "Red card"), 1);
        assert_eq!(tab.get("Lyon", "Red card"), 0);

        let fouls = d.most_fouls_by_team.unwrap();
        assert_eq!(fouls.iter().next(), Some(("Nice", 2)));
    }

    #[test]
    fn no_cards_means_no_team_card_tables() {
        let d = disciplinary_analysis(&events(&[("Lyon", "Corner")])).unwrap();
        assert_eq!(d.total_cards, 0);
        assert!(d.most_cards_by_team.is_none());
        assert!(d.card_breakdown_by_team.is_none());
        assert!(d.most_fouls_by_team.is_none());
    }

    #[test]
    fn missing_label_column_yields_none() {
        let ds = DataSet::new(Schema::new(vec![Field::new("event_team", DataType::Utf8)]), vec![]);
        assert!(disciplinary_analysis(&ds).is_none());
    }
}
