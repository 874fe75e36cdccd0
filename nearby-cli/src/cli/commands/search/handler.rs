//! Search command handler running one composed screen visit

use anyhow::{Context, Result};
use colored::*;
use futures::StreamExt;
use std::sync::Arc;

use super::SearchCommands;
use crate::api::{HttpSearchBackend, ProviderRecord, SearchBackend};
use crate::catalog;
use crate::compose::{ComposerState, LiveEntry, LiveSection, ResultsView, compose_results};
use crate::config::{Config, global_config};
use crate::geo::{Coordinate, RadiusPreset, rank_by_distance};
use crate::location::FixedLocation;
use crate::services::classification::classify;

pub async fn handle_search_command(args: SearchCommands) -> Result<()> {
    let config = global_config();

    let radius = resolve_radius(config, args.radius)?;
    let origin = Coordinate::new(args.lat, args.lng).context("Invalid search origin")?;
    let route = classify(&args.label);
    let static_entries = catalog::static_for(&route);

    println!(
        "{} {} within {} of {}",
        route.route_path().bright_green().bold(),
        format!("({})", route.domain.label()).dimmed(),
        radius,
        origin
    );
    println!();

    let backend: Arc<dyn SearchBackend> = match (&args.backend, &config.backend.base_url) {
        (Some(url), _) => Arc::new(
            HttpSearchBackend::new(url, &config.backend.search_path, config.backend.timeout())
                .with_context(|| format!("Failed to create search client for {}", url))?,
        ),
        (None, Some(_)) => Arc::new(HttpSearchBackend::from_config(&config.backend)?),
        (None, None) => {
            print_static(&static_entries);
            println!();
            let notice =
                "Live search disabled: set backend.base_url, NEARBY_BACKEND_URL or --backend";
            println!("{}", notice.yellow());
            return Ok(());
        }
    };

    let stream = compose_results(
        route,
        static_entries,
        backend,
        Arc::new(FixedLocation(origin)),
        radius,
        &config.search,
    );
    let mut stream = Box::pin(stream);

    let mut last: Option<ResultsView> = None;
    while let Some(view) = stream.next().await {
        log::debug!("Screen {} is {}", view.screen, view.state.label());
        if view.state == ComposerState::FetchingLive {
            println!("{}", "Searching nearby...".dimmed());
        }
        last = Some(view);
    }

    let view = last.context("Composer produced no results view")?;
    print_view(view, args.nearest_first);
    Ok(())
}

fn resolve_radius(config: &Config, requested: Option<u32>) -> Result<RadiusPreset> {
    let Some(km) = requested else {
        return Ok(config.search.default_radius);
    };

    let radius = RadiusPreset::try_from(km).map_err(anyhow::Error::msg)?;
    if !config.search.is_offered(radius) {
        anyhow::bail!("{} is not one of the configured radius presets", radius);
    }
    Ok(radius)
}

fn print_view(view: ResultsView, nearest_first: bool) {
    print_static(&view.static_entries);
    println!();

    if let Some(banner) = &view.banner {
        println!("{}", banner.yellow());
        return;
    }

    println!("{}", format!("Nearby ({})", view.radius).bold());
    match view.live {
        LiveSection::Ready(mut entries) => {
            if entries.is_empty() {
                println!("  {}", "Nothing found within this radius".dimmed());
                return;
            }
            if nearest_first {
                rank_by_distance(&mut entries);
            }
            for entry in &entries {
                print_live(entry);
            }
        }
        LiveSection::Failed(message) => println!("  {}", message.red()),
        LiveSection::Idle | LiveSection::Loading => {
            println!("  {}", view.state.label().dimmed())
        }
    }
}

fn print_static(entries: &[ProviderRecord]) {
    println!("{}", "Featured".bold());
    if entries.is_empty() {
        println!("  {}", "No featured listings".dimmed());
    }
    for record in entries {
        println!("  {}", describe(record));
    }
}

fn print_live(entry: &LiveEntry) {
    let distance = entry
        .distance_text()
        .unwrap_or_else(|| "distance unknown".to_string());
    println!("  {}  {}", describe(&entry.item), distance.cyan());
}

fn describe(record: &ProviderRecord) -> String {
    let mut line = record.display_name().bold().to_string();
    if let Some(address) = &record.address {
        line.push_str(&format!(" · {}", address));
    }
    if let Some(rating) = record.rating {
        line.push_str(&format!(" · ★ {:.1}", rating));
    }
    if record.is_open.is_some() {
        line.push_str(&format!(" · {}", record.status_label()));
    }
    if let Some(phone) = record.primary_phone() {
        line.push_str(&format!(" · {}", phone.dimmed()));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_radius() {
        let config = Config::default();
        assert_eq!(resolve_radius(&config, None).unwrap(), RadiusPreset::Km5);
        assert_eq!(resolve_radius(&config, Some(25)).unwrap(), RadiusPreset::Km25);
        assert!(resolve_radius(&config, Some(7)).is_err());

        let mut narrow = Config::default();
        narrow.search.radius_presets = vec![RadiusPreset::Km5];
        assert!(resolve_radius(&narrow, Some(10)).is_err());
    }

    #[test]
    fn test_describe_includes_known_fields() {
        colored::control::set_override(false);
        let record = ProviderRecord {
            name: Some("Lakshmi Tiffins".to_string()),
            address: Some("Ameerpet".to_string()),
            rating: Some(4.25),
            ..Default::default()
        };
        let line = describe(&record);
        assert!(line.starts_with("Lakshmi Tiffins"));
        assert!(line.contains("Ameerpet"));
        assert!(line.contains("4.2") || line.contains("4.3"));
    }
}
