//! Plain-text views of results for the terminal.
//!
//! Every function takes the `Theme` it should render with; the theme is built
//! once at startup and never changed afterwards.

use std::collections::BTreeMap;

use standings::dto::{AthleteDetail, CompetitionDetail, SearchHit, SearchResult};
use standings::presentation::{self, AttemptCell, CellMark};
use standings::services::{
    self, category_classifier, record_check, CategoryRecord,
};
use standings::{AgeCategory, AgeCategoryFlags, Discipline, GradeTable, LiftRecord, RecordKind};

use crate::search::Suggestion;

const BOLD_GREEN: &str = "\x1b[1;32m";
const STRIKE: &str = "\x1b[9m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// ANSI styling. Without it, marks are shown with brackets and tildes.
    pub highlight: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self { highlight: true }
    }
}

impl Theme {
    pub fn plain() -> Self {
        Self { highlight: false }
    }

    /// The cell right-aligned to `width` visible characters. Padding goes
    /// inside the escape codes so columns line up in both modes.
    pub fn cell(&self, cell: &AttemptCell, width: usize) -> String {
        let (style, text) = match (cell.mark, self.highlight) {
            (CellMark::Best, true) => (Some(BOLD_GREEN), cell.text.clone()),
            (CellMark::Best, false) => (None, format!("[{}]", cell.text)),
            (CellMark::Struck, true) => (Some(STRIKE), cell.text.clone()),
            (CellMark::Struck, false) => (None, format!("~{}~", cell.text)),
            (CellMark::Placeholder, true) => (Some(DIM), cell.text.clone()),
            (CellMark::Good, _) | (CellMark::Placeholder, false) => (None, cell.text.clone()),
        };
        let padded = format!("{:>width$}", text, width = width);
        match style {
            Some(style) => format!("{}{}{}", style, padded, RESET),
            None => padded,
        }
    }
}

fn attempts_text(record: &LiftRecord, discipline: Discipline, theme: &Theme) -> String {
    presentation::attempt_cells(record.attempts(discipline), record.best(discipline))
        .iter()
        .map(|cell| theme.cell(cell, 5))
        .collect::<Vec<_>>()
        .join(" ")
}

fn sinclair_text(record: &LiftRecord) -> String {
    presentation::sinclair_display(record.sinclair)
        .map(|sinclair| sinclair.to_string())
        .unwrap_or_else(|| presentation::PLACEHOLDER.to_string())
}

fn categories_text(flags: AgeCategoryFlags) -> String {
    flags
        .iter()
        .map(|category| category.title())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One lift as a table row: placing, name, bodyweight, attempts, total and
/// sinclair.
pub fn lift_line(placing: &str, record: &LiftRecord, theme: &Theme) -> String {
    let bodyweight = record
        .bodyweight
        .map(|bw| bw.to_string())
        .unwrap_or_else(|| presentation::PLACEHOLDER.to_string());

    format!(
        "{:>5}  {:<28} {:>7}  | {} | {} | {:>4} | {:>7}",
        placing,
        record.athlete_name,
        bodyweight,
        attempts_text(record, Discipline::Snatch, theme),
        attempts_text(record, Discipline::CleanAndJerk, theme),
        presentation::total_display(record),
        sinclair_text(record),
    )
}

pub fn search_hit_line(result: &SearchResult) -> String {
    let detail = match &result.hit {
        SearchHit::Athlete(athlete) => athlete.display_name(),
        SearchHit::Competition(competition) => {
            format!("{} ({})", competition.name, competition.date_range())
        }
        SearchHit::Lift(lift) => format!(
            "{} at {}, total {}",
            lift.athlete_name,
            lift.competition_name,
            presentation::total_display(lift)
        ),
    };

    format!(
        "[{}] {}  ({})  id={}",
        result.hit.type_name(),
        result.headline_plain,
        detail,
        result.hit.reference_id()
    )
}

pub fn suggestion_line(suggestion: &Suggestion, theme: &Theme) -> String {
    if theme.highlight {
        suggestion
            .render
            .replace("<b>", BOLD_GREEN)
            .replace("</b>", RESET)
    } else {
        suggestion.label.clone()
    }
}

fn record_table(
    out: &mut Vec<String>,
    title: &str,
    records: &BTreeMap<AgeCategory, CategoryRecord<'_, u32>>,
) {
    out.push(format!("  {}", title));
    if let Some(master) = records.get(&AgeCategory::Master) {
        out.push(format!(
            "    {:<14} {:>4} kg  {} ({})",
            AgeCategory::Master.title(),
            master.value,
            master.record.competition_name,
            master.record.weight_category
        ));
    }
    for (category, held) in services::record_rows(records) {
        out.push(format!(
            "    {:<14} {:>4} kg  {} ({})",
            category.title(),
            held.value,
            held.record.competition_name,
            held.record.weight_category
        ));
    }
}

/// Records per age and weight category, as the source bucketed them, or
/// derived from the history when it sent none.
fn weight_class_records<'a>(
    detail: &'a AthleteDetail,
    lifts: &'a [LiftRecord],
    kind: RecordKind,
) -> BTreeMap<AgeCategory, Vec<CategoryRecord<'a, u32>>> {
    let Some(by_age) = detail.best_lifts.get(&kind).filter(|by_age| !by_age.is_empty()) else {
        return services::best_per_age_and_weight_category(lifts, kind);
    };

    by_age
        .iter()
        .filter_map(|(category, by_weight)| {
            let mut rows: Vec<_> = by_weight
                .values()
                .map(|record| CategoryRecord { record, value: record.value_for(kind) })
                .filter(|held| held.value > 0)
                .collect();
            rows.sort_by_key(|held| held.value);
            (!rows.is_empty()).then_some((*category, rows))
        })
        .collect()
}

fn weight_class_table(
    out: &mut Vec<String>,
    title: &str,
    records: &BTreeMap<AgeCategory, Vec<CategoryRecord<'_, u32>>>,
) {
    out.push(format!("  {} by weight category", title));
    for (category, rows) in records {
        for held in rows {
            out.push(format!(
                "    {:<14} {:<6} {:>4} kg  {}",
                category.title(),
                held.record.weight_category,
                held.value,
                held.record.competition_name
            ));
        }
    }
}

/// Classification for a lift, preferring what the record already carries.
fn classification(record: &LiftRecord, table: &GradeTable) -> (AgeCategoryFlags, String) {
    let local = category_classifier::classify_record(record, table);
    let flags = if record.age_categories.is_empty() {
        local.age_flags
    } else {
        record.age_categories
    };
    let grade = record
        .grade
        .or(local.grade)
        .map(|grade| grade.label().to_string())
        .unwrap_or_else(|| presentation::PLACEHOLDER.to_string());
    (flags, grade)
}

/// Copies of the history with age categories filled in locally wherever the
/// source left them out, so records can still be aggregated.
fn with_age_categories(lifts: &[LiftRecord], table: &GradeTable) -> Vec<LiftRecord> {
    lifts
        .iter()
        .map(|record| {
            let mut record = record.clone();
            if record.age_categories.is_empty() {
                record.age_categories = category_classifier::classify_record(&record, table).age_flags;
            }
            record
        })
        .collect()
}

/// Athlete history by year, most recent first, followed by category records.
pub fn athlete_report(detail: &AthleteDetail, table: &GradeTable, theme: &Theme) -> String {
    record_check::inspect_all(&detail.lift_set);
    let lifts = &with_age_categories(&detail.lift_set, table);

    let mut out = Vec::new();
    let summary = &detail.summary;
    out.push(format!(
        "{} (born {})",
        summary.display_name(),
        summary
            .yearborn
            .map(|year| year.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    ));

    let competed = if detail.age_categories_competed.is_empty() {
        services::age_categories_competed(lifts)
    } else {
        detail.age_categories_competed
    };
    out.push(format!("Age categories: {}", categories_text(competed)));
    out.push(format!(
        "Weight categories: {}",
        services::weight_categories_competed(lifts).join(", ")
    ));
    if let Some(grade) = summary.current_grade {
        out.push(format!("Current grade: {}", grade));
    }

    for bucket in services::group_by_competition_year(lifts) {
        out.push(String::new());
        out.push(format!("== {} ({} lifts)", bucket.key, bucket.len()));
        for record in &bucket.records {
            let (flags, grade) = classification(record, table);
            out.push(format!(
                "{} {} [{}] {}",
                record.competition_date_start,
                record.competition_name,
                record.weight_category,
                grade
            ));
            out.push(lift_line(&record.placing, record, theme));
            out.push(format!("       {}", categories_text(flags)));
        }
    }

    out.push(String::new());
    out.push("Records".to_string());
    for kind in RecordKind::ALL {
        let best = services::best_per_age_category(lifts, kind);
        if !best.is_empty() {
            record_table(&mut out, kind.title(), &best);
        }
    }

    for kind in RecordKind::ALL {
        let by_weight = weight_class_records(detail, lifts, kind);
        if !by_weight.is_empty() {
            weight_class_table(&mut out, kind.title(), &by_weight);
        }
    }

    let sinclair: BTreeMap<AgeCategory, &LiftRecord> = if detail.best_sinclair.is_empty() {
        services::best_sinclair_per_age_category(lifts)
    } else {
        detail
            .best_sinclair
            .iter()
            .map(|(category, record)| (*category, record))
            .collect()
    };
    if !sinclair.is_empty() {
        out.push("  Best Sinclair".to_string());
        for (category, record) in &sinclair {
            out.push(format!(
                "    {:<14} {:>7}  {}",
                category.title(),
                sinclair_text(record),
                record.competition_name
            ));
        }
    }

    out.join("\n")
}

/// Competition results grouped by weight category with local placings.
pub fn competition_report(detail: &CompetitionDetail, theme: &Theme) -> String {
    let lifts = &detail.lift_set;
    record_check::inspect_all(lifts);

    let summary = &detail.summary;
    let mut out = vec![
        summary.name.clone(),
        format!("{}  {}", summary.date_range(), summary.location),
    ];

    for bucket in services::group_by_weight_category(lifts) {
        out.push(String::new());
        out.push(format!("== {} ({} lifters)", bucket.key, bucket.len()));
        for placed in services::rank_weight_category(&bucket.records) {
            out.push(lift_line(&placed.placing, placed.record, theme));
        }
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lift(reference_id: &str, weight_category: &str, snatch: u32, cnj: u32) -> serde_json::Value {
        json!({
            "reference_id": reference_id,
            "athlete_name": format!("Lifter {}", reference_id),
            "competition_name": "State Open",
            "competition_date_start": "2022-05-07",
            "weight_category": weight_category,
            "athlete_yearborn": 1980,
            "snatch_first": "LIFT", "snatch_first_weight": snatch,
            "snatch_second": "NOLIFT", "snatch_second_weight": snatch + 5,
            "snatch_third": "DNA", "snatch_third_weight": 0,
            "cnj_first": "LIFT", "cnj_first_weight": cnj,
            "cnj_second": "NOLIFT", "cnj_second_weight": cnj + 5,
            "cnj_third": "NOLIFT", "cnj_third_weight": cnj + 5,
            "sinclair": 0
        })
    }

    #[test]
    fn test_plain_cells() {
        let theme = Theme::plain();
        let best = AttemptCell { text: "100".to_string(), mark: CellMark::Best };
        let struck = AttemptCell { text: "105".to_string(), mark: CellMark::Struck };

        assert_eq!(theme.cell(&best, 0), "[100]");
        assert_eq!(theme.cell(&struck, 0), "~105~");
        assert_eq!(theme.cell(&best, 6), " [100]");
    }

    #[test]
    fn test_highlighted_cells_pad_visible_text() {
        let theme = Theme::default();
        let best = AttemptCell { text: "95".to_string(), mark: CellMark::Best };
        let good = AttemptCell { text: "90".to_string(), mark: CellMark::Good };

        assert_eq!(theme.cell(&best, 5), format!("{}   95{}", BOLD_GREEN, RESET));
        assert_eq!(theme.cell(&good, 5), "   90");
    }

    #[test]
    fn test_competition_report_ranks_each_category() {
        let detail: CompetitionDetail = serde_json::from_value(json!({
            "name": "State Open",
            "date_start": "2022-05-07",
            "location": "Brisbane",
            "lift_set": [
                lift("a", "M96", 100, 120),
                lift("b", "M96", 110, 130),
                lift("c", "W64", 70, 90)
            ]
        }))
        .unwrap();

        let report = competition_report(&detail, &Theme::plain());
        let lines: Vec<_> = report.lines().collect();

        assert!(lines.contains(&"== M96 (2 lifters)"));
        let b = lines.iter().position(|l| l.contains("Lifter b")).unwrap();
        let a = lines.iter().position(|l| l.contains("Lifter a")).unwrap();
        assert!(b < a);
        assert!(lines[b].trim_start().starts_with("1st"));
        assert!(lines[a].contains("[100]"));
        assert!(lines[a].ends_with('-'));
    }

    #[test]
    fn test_athlete_report_derives_missing_categories() {
        let detail: AthleteDetail = serde_json::from_value(json!({
            "full_name": "Lifter a",
            "yearborn": 1980,
            "lift_set": [lift("a", "M96", 100, 120)]
        }))
        .unwrap();

        let report = athlete_report(&detail, &GradeTable::default(), &Theme::plain());

        assert!(report.contains("== 2022 (1 lifts)"));
        assert!(report.contains("Senior, Masters, Master 40-44"));
        assert!(report.contains("Age categories: Senior, Masters, Master 40-44"));
        assert!(report.contains("Weight categories: M96"));
        assert!(report.contains("Best Total"));
        assert!(report.contains("Best Total by weight category"));
        assert!(report.contains("M96     220 kg  State Open"));
    }

    #[test]
    fn test_athlete_report_prefers_source_records() {
        let mut youth = lift("y", "W49", 60, 75);
        youth["competition_name"] = json!("Youth Cup");
        youth["sinclair"] = json!("250.25");
        let detail: AthleteDetail = serde_json::from_value(json!({
            "full_name": "Lifter y",
            "lift_set": [lift("a", "W55", 70, 90)],
            "best_lifts": {"snatch": {"is_youth": {"W49": youth.clone()}}},
            "best_sinclair": {"is_youth": youth}
        }))
        .unwrap();

        let report = athlete_report(&detail, &GradeTable::default(), &Theme::plain());
        let line = |needle: &str| {
            report
                .lines()
                .find(|line| line.contains(needle) && line.contains("Youth"))
                .unwrap_or_default()
                .to_string()
        };

        assert!(line("W49").contains("60 kg  Youth Cup"));
        assert!(line("250.25").contains("Youth Cup"));
        assert!(report.contains("Best Total by weight category"));
    }
}
