//! Categories command handler

use anyhow::Result;
use colored::*;

use super::CategoriesCommands;
use crate::services::classification::suggest_variants;
use crate::taxonomy::{Domain, INDUSTRIAL_GROUPS, table_for};

pub fn handle_categories_command(args: CategoriesCommands) -> Result<()> {
    let domain = args.domain.as_deref().map(parse_domain).transpose()?;

    if let Some(query) = args.search {
        let suggestions = suggest_variants(&query, domain, args.limit);
        if suggestions.is_empty() {
            println!("No variants match '{}'", query.yellow());
            return Ok(());
        }
        for suggestion in suggestions {
            println!(
                "{:>5}  {:<16} {}",
                suggestion.score.to_string().dimmed(),
                suggestion.domain.key().cyan(),
                suggestion.variant
            );
        }
        return Ok(());
    }

    let domains: Vec<Domain> = match domain {
        Some(domain) => vec![domain],
        None => Domain::all_variants().to_vec(),
    };

    for domain in domains {
        let table = table_for(domain);
        println!(
            "{} ({}, {} variants)",
            domain.label().bold(),
            domain.key().cyan(),
            table.variants().len()
        );
        for (variant, slug) in table.entries() {
            println!("  {:<32} {}", variant, slug.as_str().dimmed());
        }

        if domain == Domain::Industrial {
            println!("  {}", "groups:".bold());
            for group in INDUSTRIAL_GROUPS {
                println!("    {:<16} {}", group.key.magenta(), group.variants.join(", "));
            }
        }
        println!();
    }

    Ok(())
}

fn parse_domain(raw: &str) -> Result<Domain> {
    Domain::from_key(raw)
        .or_else(|| {
            Domain::all_variants()
                .iter()
                .copied()
                .find(|d| d.label().eq_ignore_ascii_case(raw.trim()))
        })
        .ok_or_else(|| {
            let keys: Vec<&str> = Domain::all_variants().iter().map(|d| d.key()).collect();
            anyhow::anyhow!("Unknown domain '{}' (expected one of: {})", raw, keys.join(", "))
        })
}
