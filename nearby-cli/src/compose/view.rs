//! Screen state and the two-slot results view handed to presentation code

use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::ProviderRecord;
use crate::geo::{Coordinate, Placed, RadiusPreset};
use crate::services::classification::Classification;

/// Identity of one screen visit
pub type ScreenId = Uuid;

/// A live listing with its distance from the user
pub type LiveEntry = Placed<ProviderRecord>;

/// Lifecycle of one screen's nearby search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComposerState {
    /// Waiting for the device to report a coordinate
    AwaitingLocation,
    /// Live search in flight
    FetchingLive,
    /// Live results applied
    LiveReady,
    /// Live search failed, static section unaffected
    LiveFailed,
    /// No coordinate available, static section only
    LocationDenied,
}

impl ComposerState {
    /// Get display label for state
    pub fn label(&self) -> &'static str {
        match self {
            ComposerState::AwaitingLocation => "Waiting for location",
            ComposerState::FetchingLive => "Searching nearby",
            ComposerState::LiveReady => "Nearby results",
            ComposerState::LiveFailed => "Nearby search failed",
            ComposerState::LocationDenied => "Location unavailable",
        }
    }

    /// No further transition happens without new input
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ComposerState::LiveReady | ComposerState::LiveFailed | ComposerState::LocationDenied
        )
    }
}

/// Second slot of the view
#[derive(Debug, Clone, PartialEq)]
pub enum LiveSection {
    /// Nothing requested yet
    Idle,
    Loading,
    Ready(Vec<LiveEntry>),
    Failed(String),
}

impl LiveSection {
    pub fn entries(&self) -> &[LiveEntry] {
        match self {
            LiveSection::Ready(entries) => entries,
            _ => &[],
        }
    }

    /// Ready but nothing within the radius
    pub fn is_empty_result(&self) -> bool {
        matches!(self, LiveSection::Ready(entries) if entries.is_empty())
    }
}

/// One row of the rendered feed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderedEntry<'a> {
    Static(&'a ProviderRecord),
    Live(&'a LiveEntry),
}

impl<'a> RenderedEntry<'a> {
    pub fn record(&self) -> &'a ProviderRecord {
        match self {
            RenderedEntry::Static(record) => record,
            RenderedEntry::Live(entry) => &entry.item,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, RenderedEntry::Live(_))
    }
}

/// Everything a screen needs to render its results
#[derive(Debug, Clone)]
pub struct ResultsView {
    pub screen: ScreenId,
    pub route: Classification,
    pub radius: RadiusPreset,
    pub state: ComposerState,
    pub origin: Option<Coordinate>,
    /// First slot, populated synchronously and never reordered
    pub static_entries: Arc<[ProviderRecord]>,
    pub live: LiveSection,
    /// Non-fatal notice shown above the results (location problems)
    pub banner: Option<String>,
    pub(crate) generation: u64,
}

impl ResultsView {
    pub(crate) fn new(
        screen: ScreenId,
        route: Classification,
        static_entries: Arc<[ProviderRecord]>,
        radius: RadiusPreset,
    ) -> Self {
        Self {
            screen,
            route,
            radius,
            state: ComposerState::AwaitingLocation,
            origin: None,
            static_entries,
            live: LiveSection::Idle,
            banner: None,
            generation: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.live, LiveSection::Loading)
    }

    /// Section-local error of the live slot
    pub fn error(&self) -> Option<&str> {
        match &self.live {
            LiveSection::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn live_entries(&self) -> &[LiveEntry] {
        self.live.entries()
    }

    /// Static rows, then live rows in backend order
    pub fn rendered(&self) -> Vec<RenderedEntry<'_>> {
        self.static_entries
            .iter()
            .map(RenderedEntry::Static)
            .chain(self.live.entries().iter().map(RenderedEntry::Live))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::classification::classify;

    fn record(name: &str) -> ProviderRecord {
        ProviderRecord {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_rendered_lists_static_before_live() {
        let mut view = ResultsView::new(
            Uuid::new_v4(),
            classify("Biryani"),
            Arc::from(vec![record("s1"), record("s2")]),
            RadiusPreset::Km5,
        );
        view.live = LiveSection::Ready(vec![
            Placed {
                item: record("l1"),
                distance_km: Some(0.4),
            },
            Placed {
                item: record("l2"),
                distance_km: None,
            },
        ]);

        let rendered = view.rendered();
        let names: Vec<_> = rendered.iter().map(|r| r.record().display_name()).collect();
        assert_eq!(names, vec!["s1", "s2", "l1", "l2"]);
        assert!(!rendered[1].is_live());
        assert!(rendered[2].is_live());
    }

    #[test]
    fn test_slot_flags() {
        let mut view = ResultsView::new(
            Uuid::new_v4(),
            classify("Biryani"),
            Arc::from(Vec::new()),
            RadiusPreset::Km5,
        );
        assert_eq!(view.state, ComposerState::AwaitingLocation);
        assert!(!view.is_loading());
        assert!(view.rendered().is_empty());

        view.live = LiveSection::Loading;
        assert!(view.is_loading());

        view.live = LiveSection::Failed("HTTP 500".to_string());
        assert_eq!(view.error(), Some("HTTP 500"));
        assert!(view.live_entries().is_empty());

        view.live = LiveSection::Ready(Vec::new());
        assert!(view.live.is_empty_result());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!ComposerState::AwaitingLocation.is_terminal());
        assert!(!ComposerState::FetchingLive.is_terminal());
        assert!(ComposerState::LiveReady.is_terminal());
        assert!(ComposerState::LiveFailed.is_terminal());
        assert!(ComposerState::LocationDenied.is_terminal());
    }
}
