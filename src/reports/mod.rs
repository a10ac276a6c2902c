use aptscore::analysis::ScoreAnalysis;
use aptscore::ranking::{RankingSummary, RelativeScore, ScoredEntity};
use aptscore::{Entity, ScoreResult};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, columns: std::ops::RangeInclusive<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn score_color(score: f64) -> Color {
    match score {
        s if s >= 80.0 => Color::Green,
        s if s >= 60.0 => Color::Yellow,
        _ => Color::Red,
    }
}

pub fn print_score_report(entity: &Entity, result: &ScoreResult, analysis: &ScoreAnalysis) {
    println!(
        "\n{} ({}) [{}]",
        entity.name, entity.id, entity.location
    );

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Factor").add_attribute(Attribute::Bold),
        Cell::new("Raw"),
        Cell::new("Weight"),
        Cell::new("Weighted").fg(Color::Cyan),
    ]);
    align_right(&mut table, 1..=3);

    for (factor, fs) in result.factors.iter() {
        let present = entity.scores.is_present(factor);
        table.add_row(vec![
            Cell::new(factor.display_name()),
            Cell::new(if present {
                fs.raw.to_string()
            } else {
                "-".to_string()
            })
            .fg(score_color(fs.raw.to_real())),
            Cell::new(fs.weight.to_string()),
            Cell::new(format!("{:.3}", fs.weighted)),
        ]);
    }
    println!("{}", table);

    println!(
        "Total: {:.2}  Grade: {}  Method: {}  vs baseline: {:+.1}",
        result.total_score,
        result.grade(),
        result.method,
        analysis.comparison_to_baseline
    );
    println!(
        "Internal: {:.1}  External: {:.1}",
        analysis.internal_score, analysis.external_score
    );
    if !analysis.strengths.is_empty() {
        let names: Vec<&str> = analysis.strengths.iter().map(|f| f.display_name()).collect();
        println!("Strengths: {}", names.join(", "));
    }
    if !analysis.weaknesses.is_empty() {
        let names: Vec<&str> = analysis.weaknesses.iter().map(|f| f.display_name()).collect();
        println!("Weaknesses: {}", names.join(", "));
    }
    for tip in &analysis.improvement_tips {
        println!("  - {}", tip);
    }
}

pub fn print_ranking_table(summary: &RankingSummary, limit: usize) {
    println!(
        "\n🏆 Rankings ({} strategy, {} entities)",
        summary.strategy, summary.total_entities
    );
    println!(
        "Score range: {:.1} - {:.1} (avg {:.1})",
        summary.score_range.min, summary.score_range.max, summary.score_range.avg
    );

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Rank").add_attribute(Attribute::Bold),
        Cell::new("Id"),
        Cell::new("Name"),
        Cell::new("Location"),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("Pct"),
        Cell::new("Grade"),
    ]);
    align_right(&mut table, 4..=5);

    let shown = summary.top(limit);
    for r in shown {
        table.add_row(vec![
            Cell::new(r.rank).add_attribute(Attribute::Bold),
            Cell::new(&r.entity.id),
            Cell::new(&r.entity.name),
            Cell::new(&r.entity.location),
            Cell::new(format!("{:.2}", r.score())).fg(score_color(r.score())),
            Cell::new(format!("{:.1}", r.percentile)),
            Cell::new(r.result.grade()),
        ]);
    }
    println!("{}", table);

    if shown.len() < summary.rankings.len() {
        println!("... and {} more", summary.rankings.len() - shown.len());
    }
}

pub fn print_relative_report(relative: &RelativeScore, similar: &[&ScoredEntity]) {
    let d = &relative.distribution;
    let c = &relative.comparison;
    println!(
        "\n🔎 {} scores {:.2}: percentile {:.1}, group rank {} of {}",
        relative.entity_id, relative.absolute_score, relative.percentile_rank, relative.group_rank, d.count
    );

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Mean"),
        Cell::new("Median"),
        Cell::new("StdDev"),
        Cell::new("Min"),
        Cell::new("Q1"),
        Cell::new("Q3"),
        Cell::new("Max"),
    ]);
    table.add_row(
        [d.mean, d.median, d.std_dev, d.min, d.q1, d.q3, d.max]
            .iter()
            .map(|v| Cell::new(format!("{:.2}", v)).set_alignment(CellAlignment::Right))
            .collect::<Vec<_>>(),
    );
    println!("{}", table);

    println!(
        "Higher: {}  Lower: {}  Similar: {}  Rank percentile: {:.1}",
        c.higher_count, c.lower_count, c.similar_count, c.rank_percentile
    );

    if similar.is_empty() {
        println!("No similar entities found.");
        return;
    }
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Similar").add_attribute(Attribute::Bold),
        Cell::new("Location"),
        Cell::new("Score"),
        Cell::new("Delta"),
    ]);
    align_right(&mut table, 2..=3);
    for s in similar {
        table.add_row(vec![
            Cell::new(&s.id),
            Cell::new(&s.location),
            Cell::new(format!("{:.2}", s.score)),
            Cell::new(format!("{:+.2}", s.score - relative.absolute_score)),
        ]);
    }
    println!("{}", table);
}

pub fn print_strategy_table(entity: &Entity, results: &[ScoreResult]) {
    println!("\n{} ({}) under every strategy", entity.name, entity.id);

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Strategy").add_attribute(Attribute::Bold),
        Cell::new("Total").fg(Color::Cyan),
        Cell::new("Grade"),
    ]);
    align_right(&mut table, 1..=1);
    for r in results {
        table.add_row(vec![
            Cell::new(&r.method),
            Cell::new(format!("{:.2}", r.total_score)).fg(score_color(r.total_score)),
            Cell::new(r.grade()),
        ]);
    }
    println!("{}", table);
}
