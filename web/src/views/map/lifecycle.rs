use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MapError {
    #[error("The map library failed to load.")]
    LibraryMissing,
}

/// Map Host lifecycle. Listener registration and the first geolocation request
/// happen exactly once, on the `Loading -> Ready` transition.
///
/// The Leaflet script may still be in flight when the app hydrates. A missing
/// library only fails the map once the page `load` event has fired.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MapPhase {
    #[default]
    Uninitialized,
    WaitingForLibrary,
    Loading,
    Ready,
    Failed(MapError),
}

impl MapPhase {
    /// First check for the library. Returns true when loading has started.
    pub fn begin_loading(&mut self, library_available: bool) -> bool {
        if *self != Self::Uninitialized {
            return false;
        }
        *self = if library_available {
            Self::Loading
        } else {
            Self::WaitingForLibrary
        };
        library_available
    }

    /// Second and last check, once the page has finished loading.
    /// Returns true when loading has started.
    pub fn page_loaded(&mut self, library_available: bool) -> bool {
        if *self != Self::WaitingForLibrary {
            return false;
        }
        *self = if library_available {
            Self::Loading
        } else {
            Self::Failed(MapError::LibraryMissing)
        };
        library_available
    }

    pub fn is_waiting(&self) -> bool {
        *self == Self::WaitingForLibrary
    }

    /// True only for the call that completes `Loading -> Ready`.
    pub fn mark_ready(&mut self) -> bool {
        if *self != Self::Loading {
            return false;
        }
        *self = Self::Ready;
        true
    }

    pub fn shows_map(&self) -> bool {
        matches!(self, Self::Loading | Self::Ready)
    }

    pub fn error(&self) -> Option<&MapError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_fires_once() {
        let mut phase = MapPhase::default();
        assert!(!phase.mark_ready());

        assert!(phase.begin_loading(true));
        assert!(phase.shows_map());
        assert!(phase.mark_ready());
        assert_eq!(phase, MapPhase::Ready);

        assert!(!phase.mark_ready());
        assert!(!phase.begin_loading(true));
        assert_eq!(phase, MapPhase::Ready);
    }

    #[test]
    fn library_arriving_after_hydration_still_loads() {
        let mut phase = MapPhase::default();
        assert!(!phase.begin_loading(false));
        assert!(phase.is_waiting());
        assert!(!phase.shows_map());
        assert_eq!(phase.error(), None);

        assert!(phase.page_loaded(true));
        assert!(phase.mark_ready());
        assert_eq!(phase, MapPhase::Ready);
    }

    #[test]
    fn library_missing_after_page_load_is_terminal() {
        let mut phase = MapPhase::default();
        assert!(!phase.begin_loading(false));
        assert!(!phase.page_loaded(false));
        assert_eq!(phase.error(), Some(&MapError::LibraryMissing));
        assert!(!phase.shows_map());
        assert!(!phase.mark_ready());
        assert!(!phase.begin_loading(true));
        assert!(!phase.page_loaded(true));
    }

    #[test]
    fn page_load_is_ignored_unless_waiting() {
        let mut phase = MapPhase::default();
        assert!(!phase.page_loaded(true));
        assert_eq!(phase, MapPhase::Uninitialized);

        assert!(phase.begin_loading(true));
        assert!(!phase.page_loaded(false));
        assert_eq!(phase, MapPhase::Loading);
    }
}
