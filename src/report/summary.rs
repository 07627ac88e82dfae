//! Fixed-layout plain-text report.

use chrono::NaiveDateTime;

use crate::analysis::{
    analyze_events_overview, disciplinary_analysis, location_analysis, team_performance_analysis,
    time_analysis, Counts,
};
use crate::types::DataSet;

const RULE_WIDTH: usize = 70;
const TOP_EVENT_TYPES: usize = 10;
const TOP_TEAMS: usize = 5;
const TOP_LOCATIONS: usize = 5;
const FEWEST_CARD_TEAMS: usize = 3;

/// Render the summary report for a decoded event table.
///
/// Sections whose data is unavailable are left out.
pub fn generate_summary_report(dataset: &DataSet, generated_at: NaiveDateTime) -> String {
    let overview = analyze_events_overview(dataset);
    let teams = team_performance_analysis(dataset);
    let locations = location_analysis(dataset);
    let discipline = disciplinary_analysis(dataset);
    let times = time_analysis(dataset);

    let banner = "=".repeat(RULE_WIDTH);
    let mut out = Report::default();
    out.line(&banner);
    out.line("FOOTBALL MATCH ANALYSIS REPORT");
    out.line(&banner);
    out.line(&format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S")));
    out.line(&banner);

    out.line("\n📊 MATCH OVERVIEW:");
    out.line(&format!("{:<20} {:>10}", "Total Events:", overview.total_events));
    out.line(&format!("{:<20} {:>10}", "Total Teams:", overview.unique_teams));
    out.line(&format!("{:<20} {:>10}", "Total Players:", overview.unique_players));
    out.line(&format!("{:<20} {:>10}", "Total Goals:", overview.total_goals));

    if let Some(sides) = &overview.home_vs_away {
        out.line("\n🏠 HOME vs AWAY:");
        for (side, count) in sides.iter() {
            out.line(&format!("{:<20} {:>10} events", format!("  {side}:"), count));
        }
    }

    if let Some(events) = &overview.event_breakdown {
        out.line("\n⚽ EVENT BREAKDOWN (Top 10):");
        for (event, count) in events.clone().sorted_desc().top(TOP_EVENT_TYPES) {
            out.line(&format!("{:<25} {:>8}", format!("  {event}:"), count));
        }
    }

    if let Some(shots) = &overview.shot_analysis {
        out.line("\n🎯 SHOOTING ANALYSIS:");
        out.line(&format!("{:<20} {:>10}", "  Total Shots:", shots.total_shots));
        out.line(&format!("{:<20} {:>10}", "  Shots on Target:", shots.shots_on_target));
        out.line(&format!(
            "{:<20} {:>9}%",
            "  Conversion Rate:",
            decimal(shots.conversion_rate)
        ));

        if let Some(outcomes) = &overview.shot_outcome_breakdown {
            out.line("\n  Shot Outcome Details:");
            for (outcome, count) in outcomes.iter() {
                out.line(&format!("{:<22} {:>8}", format!("    {outcome}:"), count));
            }
        }
    }

    if !teams.is_empty() {
        out.line("\n🏆 TEAM PERFORMANCE:");
        out.line(&format!(
            "{:<15} {:<8} {:<8} {:<10} {:<10}",
            "Team", "Goals", "Shots", "Accuracy", "Conv.Rate"
        ));
        out.line(&"-".repeat(55));
        for team in teams.iter().take(TOP_TEAMS) {
            let (accuracy, conversion) = if team.total_shots > 0 {
                (
                    format!("{:.1}%", team.shooting_accuracy),
                    format!("{:.1}%", team.conversion_rate),
                )
            } else {
                ("N/A".to_string(), "N/A".to_string())
            };
            out.line(&format!(
                "{:<15} {:<8} {:<8} {:<10} {:<10}",
                team.event_team, team.goals_scored, team.total_shots, accuracy, conversion
            ));
        }
    }

    if !locations.is_empty() {
        if let Some(by_location) = &locations.goals_by_location {
            out.line("\n📍 TOP SCORING LOCATIONS:");
            for (location, goals) in by_location.top(TOP_LOCATIONS) {
                out.line(&format!("{:<35} {:>5} goals", format!("  {location}:"), goals));
            }
        }
        out.goal_section("\n🦵 GOALS BY BODY PART:", locations.goals_by_bodypart.as_ref());
        out.goal_section("\n⚡ GOALS BY SITUATION:", locations.goals_by_situation.as_ref());
    }

    if let Some(by_time) = times.as_ref().and_then(|t| t.goals_by_time_period.as_ref()) {
        out.line("\n⏰ GOALS BY TIME PERIOD:");
        for (period, goals) in by_time.iter() {
            out.line(&format!("{:<15} {:>5} goals", format!("  {period}:"), goals));
        }
    }

    if let Some(d) = &discipline {
        out.line("\n🟨 DISCIPLINE SUMMARY:");
        out.line(&format!("{:<20} {:>8}", "  Total Fouls:", d.total_fouls));
        out.line(&format!("{:<20} {:>8}", "  Yellow Cards:", d.yellow_cards));
        out.line(&format!("{:<20} {:>8}", "  Red Cards:", d.red_cards));
        out.line(&format!("{:<20} {:>8}", "  Total Cards:", d.total_cards));

        if let Some(cards) = &d.most_cards_by_team {
            out.line("\n  Most Disciplined Teams (Fewest Cards):");
            for (team, n) in cards.clone().sorted_asc().top(FEWEST_CARD_TEAMS) {
                out.line(&format!("{:<20} {:>5} cards", format!("    {team}:"), n));
            }
        }
    }

    out.line(&format!("\n{banner}"));
    out.line("END OF REPORT");
    out.line(&banner);
    out.finish()
}

/// Format a rounded rate the way the report prints it: at least one decimal (`50.0`, `33.33`).
pub fn decimal(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

#[derive(Default)]
struct Report {
    lines: Vec<String>,
}

impl Report {
    fn line(&mut self, s: &str) {
        self.lines.push(s.to_owned());
    }

    fn goal_section(&mut self, title: &str, counts: Option<&Counts>) {
        let Some(counts) = counts else {
            return;
        };
        self.line(title);
        for (label, goals) in counts.iter() {
            self.line(&format!("{:<20} {:>5} goals", format!("  {label}:"), goals));
        }
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}
