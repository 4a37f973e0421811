// Terminal rendering for the CLI.
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use yansi::Paint;

use pulseboard::dashboard::views::{
    AccessMapView, DrugSafetyView, RegionPanel, SentimentView, TelehealthView, TopicsView,
};
use pulseboard::dashboard::{SectionPage, SectionView};
use pulseboard::models::AdverseEventReport;

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

pub fn print_page(page: &SectionPage) {
    println!("\n{}", Paint::new(page.title).rgb(255, 0, 80).bold());
    println!("{}", Paint::new(page.subtitle).bold().underline());
    match &page.content {
        SectionView::PatientSentiment(v) => print_sentiment(v),
        SectionView::TelehealthTrends(v) => print_telehealth(v),
        SectionView::DrugSafetyEvents(v) => print_drug_safety(v),
        SectionView::CareAccessMap(v) => print_access_map(v),
        SectionView::OnlinePatientTopics(v) => print_topics(v),
    }
}

fn print_sentiment(view: &SentimentView) {
    let mut table = new_table();
    table.set_header(vec!["Feedback", "Sentiment Score", "Sentiment"]);
    for f in &view.feedback {
        table.add_row(vec![
            f.feedback.to_string(),
            format!("{:.1}", f.score),
            format!("{:?}", f.sentiment),
        ]);
    }
    println!("\n{table}");

    println!("\n{}", Paint::new("Top Words from Patient Feedback").bold());
    let words = view
        .top_words
        .iter()
        .map(|w| format!("{} ({})", w.word, w.count))
        .collect::<Vec<_>>()
        .join(", ");
    println!("{}\n", words);
}

fn print_telehealth(view: &TelehealthView) {
    let mut table = new_table();
    table.set_header(vec!["Month", "Visits (Thousands)"]);
    for v in &view.visits {
        table.add_row(vec![v.month.format("%Y-%m-%d").to_string(), v.visits_thousands.to_string()]);
    }
    println!("\n{}\n{table}\n", Paint::new(view.chart_title).dim());
}

fn print_topics(view: &TopicsView) {
    let mut table = new_table();
    table.set_header(vec!["Topic", "Mentions"]);
    for t in &view.topics {
        table.add_row(vec![t.topic.to_string(), t.mentions.to_string()]);
    }
    println!("\n{}\n{table}\n", Paint::new(view.chart_title).dim());
}

pub fn print_reports(reports: &[AdverseEventReport]) {
    if reports.is_empty() {
        println!("(no reports)");
        return;
    }
    for r in reports {
        let reactions = if r.reactions.is_empty() {
            "(none listed)".to_string()
        } else {
            r.reactions.join(", ")
        };
        println!("{}: {}", Paint::new("Reported Reactions").bold(), reactions);
    }
}

fn print_drug_safety(view: &DrugSafetyView) {
    println!("Drug: {}\n", Paint::new(&view.drug).cyan());
    if let Some(err) = view.error {
        eprintln!("{}", Paint::new(err).red());
        return;
    }
    print_reports(&view.reports);
    if !view.top_reactions.is_empty() {
        let mut table = new_table();
        table.set_header(vec!["Reaction", "Reports", "% of reports"]);
        for r in &view.top_reactions {
            table.add_row(vec![r.reaction.clone(), r.count.to_string(), format!("{:.0}%", r.percentage)]);
        }
        println!("\n{table}\n");
    }
}

pub fn print_region_panel(heading: &str, panel: &RegionPanel) {
    println!("\n{}", Paint::new(heading).bold());
    if let Some(banner) = panel.banner {
        println!("{}", Paint::new(banner).yellow());
    }
    let mut table = new_table();
    table.set_header(vec!["Region", "Code", "Interest"]);
    for r in &panel.rows {
        table.add_row(vec![
            r.name.clone(),
            r.code.clone().unwrap_or_default(),
            r.interest.to_string(),
        ]);
    }
    println!("{table}");
}

fn print_access_map(view: &AccessMapView) {
    println!("Keyword: {}", Paint::new(&view.keyword).cyan());
    println!("{} {}", Paint::new(view.caption).dim(), Paint::new(view.reference_image).underline());
    if let Some(top) = &view.top_state {
        println!(
            "{} {} ({})",
            Paint::new("Top state:").bold(),
            top.name,
            top.interest
        );
    }
    print_region_panel("Interest by state", &view.states);
    print_region_panel("Top metros", &view.top_metros);
    println!();
}
