//! Classify command handler

use anyhow::{Context, Result};
use colored::*;

use super::ClassifyCommands;
use crate::services::classification::{Classification, classify, matching_domains};

pub fn handle_classify_command(args: ClassifyCommands) -> Result<()> {
    for label in &args.labels {
        let result = classify(label);

        if args.json {
            let line = serde_json::to_string(&ClassifyOutput::new(label, &result))
                .context("Failed to serialize classification")?;
            println!("{}", line);
            continue;
        }

        print_classification(label, &result);

        if args.explain {
            let candidates = matching_domains(&result.route_slug);
            if candidates.is_empty() {
                println!("  {}", "no table matched".dimmed());
            }
            for (domain, hit) in candidates {
                let marker = if domain == result.domain { "*" } else { " " };
                println!(
                    "  {} {:<16} {} ({})",
                    marker,
                    domain.key(),
                    hit.variant,
                    hit.kind.label().dimmed()
                );
            }
        }
    }

    Ok(())
}

fn print_classification(label: &str, result: &Classification) {
    let route = result.route_path();
    let route = if result.is_fallback() {
        route.yellow()
    } else {
        route.bright_green()
    };

    println!("{} {} {}", label.bold(), "→".dimmed(), route);
    println!(
        "  domain: {}  match: {}",
        result.domain.label().cyan(),
        result.match_kind.label()
    );
    if let Some(variant) = result.matched_variant {
        println!("  variant: {}", variant);
    }
    if let Some(group) = result.group() {
        println!("  industrial group: {} ({})", group.label.magenta(), group.key);
    }
}

#[derive(serde::Serialize)]
struct ClassifyOutput<'a> {
    label: &'a str,
    route: String,
    #[serde(flatten)]
    classification: &'a Classification,
}

impl<'a> ClassifyOutput<'a> {
    fn new(label: &'a str, classification: &'a Classification) -> Self {
        Self {
            label,
            route: classification.route_path(),
            classification,
        }
    }
}
