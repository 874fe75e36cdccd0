//! Two-slot results composition for a classified route
//!
//! The static slot is filled from the compiled-in catalog as soon as a
//! screen opens. The live slot follows the device location and the backend
//! search, and never disturbs the static slot.

pub mod composer;
pub mod view;

pub use composer::ResultsComposer;
pub use view::{ComposerState, LiveEntry, LiveSection, RenderedEntry, ResultsView, ScreenId};

use futures::stream::{self, Stream};
use std::sync::Arc;
use tokio::sync::watch;

use crate::api::{ProviderRecord, SearchBackend};
use crate::config::SearchConfig;
use crate::geo::RadiusPreset;
use crate::location::LocationProvider;
use crate::services::classification::Classification;

enum Phase {
    Initial(Arc<dyn LocationProvider>),
    Starting(Arc<dyn LocationProvider>),
    Running(watch::Receiver<ResultsView>),
    Done,
}

struct Session {
    composer: ResultsComposer,
    phase: Phase,
}

/// Run one screen visit to completion as a stream of views
///
/// Yields the `AwaitingLocation` view first, then every published view
/// until a terminal state is reached. Dropping the stream tears the screen
/// down.
pub fn compose_results(
    route: Classification,
    static_entries: Arc<[ProviderRecord]>,
    backend: Arc<dyn SearchBackend>,
    location: Arc<dyn LocationProvider>,
    radius: RadiusPreset,
    config: &SearchConfig,
) -> impl Stream<Item = ResultsView> + Send + use<> {
    let composer = ResultsComposer::new(route, static_entries, backend, radius, config);
    let session = Session {
        composer,
        phase: Phase::Initial(location),
    };

    stream::unfold(session, |mut session| async move {
        match std::mem::replace(&mut session.phase, Phase::Done) {
            Phase::Initial(location) => {
                let view = session.composer.view();
                session.phase = Phase::Starting(location);
                Some((view, session))
            }
            Phase::Starting(location) => {
                let mut rx = session.composer.subscribe();
                session.composer.start(location.as_ref()).await;
                let view = rx.borrow_and_update().clone();
                if !view.state.is_terminal() {
                    session.phase = Phase::Running(rx);
                }
                Some((view, session))
            }
            Phase::Running(mut rx) => {
                rx.changed().await.ok()?;
                let view = rx.borrow_and_update().clone();
                if !view.state.is_terminal() {
                    session.phase = Phase::Running(rx);
                }
                Some((view, session))
            }
            Phase::Done => None,
        }
    })
}
