use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::prompt::{storefront_links, AMAZON_TR_SEARCH, HEPSIBURADA_SEARCH, TRENDYOL_SEARCH};
use crate::wire::{ActivitySuggestion, GiftSuggestion, Source, Suggestions};

const BAR_WIDTH: usize = 40;

pub fn progress_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        percent.clamp(0.0, 100.0)
    )
}

pub fn print_progress(percent: f64) {
    println!("{}", progress_bar(percent).cyan());
}

pub fn print_heading(title: &str) {
    println!("\n{}", title.bold().underline());
}

pub fn spinner(text: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.magenta} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(text.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// Preview image for a gift, looked up by its image query.
pub fn image_preview_url(query: &str) -> String {
    format!("https://source.unsplash.com/random/400x300/?{}", urlencoding::encode(query))
}

/// Store links for a gift. A link that is empty or points off its store is
/// replaced with a search for the gift name.
pub fn gift_store_links(item: &GiftSuggestion) -> [String; 3] {
    let fallback = storefront_links(&item.gift_name);
    let given = [
        (&item.trendyol_link, TRENDYOL_SEARCH),
        (&item.amazon_link, AMAZON_TR_SEARCH),
        (&item.hepsiburada_link, HEPSIBURADA_SEARCH),
    ];
    let mut out = fallback;
    for (i, (link, base)) in given.into_iter().enumerate() {
        let link = link.trim();
        if link.starts_with(base) {
            out[i] = link.to_string();
        }
    }
    out
}

pub fn render_gift_card(item: &GiftSuggestion) -> String {
    let [trendyol, amazon, hepsiburada] = gift_store_links(item);
    let mut out = String::new();
    out.push_str(&format!("{}  {}\n", item.gift_name.bold(), format!("[{}]", item.category).magenta()));
    out.push_str(&format!("{}\n", item.description));
    out.push_str(&format!("{}\n", item.reason.italic()));
    out.push_str(&format!("{} {}\n", "Price:".bold(), item.price_range.green()));
    out.push_str(&format!("{} {}\n", "Image:".dimmed(), image_preview_url(&item.image_query)));
    out.push_str(&format!("  Search on Trendyol:    {}\n", trendyol.blue()));
    out.push_str(&format!("  Search on Amazon:      {}\n", amazon.blue()));
    out.push_str(&format!("  Search on Hepsiburada: {}", hepsiburada.blue()));
    out
}

pub fn render_activity_card(item: &ActivitySuggestion) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}  {}\n", item.activity_name.bold(), format!("[{}]", item.category).magenta()));
    out.push_str(&format!("{}\n", item.description));
    out.push_str(&item.reason.italic().to_string());
    if let Some(price) = item.display_price() {
        out.push_str(&format!("\n{} {}", "Price:".bold(), price.green()));
    }
    if let Some(link) = item.primary_link() {
        out.push_str(&format!("\n  Tickets & plan: {}", link.blue()));
    }
    out
}

pub fn render_sources(sources: &[Source]) -> String {
    let mut out = String::new();
    for s in sources {
        out.push_str(&format!(" - {} {}\n", s.label(), format!("<{}>", s.uri).dimmed()));
    }
    out
}

fn print_cards<T>(title: &str, data: &Suggestions<T>, render: impl Fn(&T) -> String) {
    print_heading(title);
    if data.suggestions.is_empty() {
        println!("(no suggestions returned)");
    }
    for (i, item) in data.suggestions.iter().enumerate() {
        println!("\n{}. {}", i + 1, indent(&render(item), 3).trim_start());
    }
    if !data.sources.is_empty() {
        print_heading("Sources");
        print!("{}", render_sources(&data.sources));
    }
    println!();
}

pub fn print_gift_results(data: &Suggestions<GiftSuggestion>) {
    print_cards("Here are the suggestions!", data, render_gift_card);
}

pub fn print_activity_results(data: &Suggestions<ActivitySuggestion>) {
    print_cards("Ideas for unforgettable moments!", data, render_activity_card);
}

pub fn print_error(message: &str) {
    println!("\n{} {}\n", "Error:".red().bold(), message.red());
}

fn indent(s: &str, n: usize) -> String {
    let pad = " ".repeat(n);
    s.lines()
        .map(|l| format!("{}{}", pad, l))
        .collect::<Vec<_>>()
        .join("\n")
}
