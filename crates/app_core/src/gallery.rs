//! Gallery phase machine
//!
//! Explicit states for the row preview lifecycle. The controller asks
//! this machine before building any gesture, so stale clicks during a
//! transition and double-opens fall out as no-ops.

/// Lifecycle of the row preview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Browsing; rows accept hover and open clicks
    Idle,
    /// Open transition in flight
    Opening { row: usize },
    /// Preview fully shown; only close is accepted
    Open { row: usize },
    /// Close transition in flight
    Closing { row: usize },
}

#[derive(Debug)]
pub struct GalleryState {
    phase: Phase,
    /// Last row opened; survives the close so the title cascade can
    /// radiate from it
    last_row: Option<usize>,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self::new()
    }
}

impl GalleryState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            last_row: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// A preview is showing or on its way in
    pub fn is_open(&self) -> bool {
        matches!(self.phase, Phase::Opening { .. } | Phase::Open { .. })
    }

    /// A transition is in flight; gestures are refused while true
    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Opening { .. } | Phase::Closing { .. })
    }

    /// Row owning the preview, if any phase names one
    pub fn active_row(&self) -> Option<usize> {
        match self.phase {
            Phase::Idle => None,
            Phase::Opening { row } | Phase::Open { row } | Phase::Closing { row } => Some(row),
        }
    }

    pub fn last_row(&self) -> Option<usize> {
        self.last_row
    }

    /// Hover plays while no preview is up, which includes the tail of a
    /// close still animating
    pub fn can_hover(&self) -> bool {
        !self.is_open()
    }

    /// Open begins only from a fully settled gallery
    pub fn try_begin_open(&mut self, row: usize) -> bool {
        if self.phase != Phase::Idle {
            tracing::debug!(?self.phase, row, "open refused");
            return false;
        }
        self.phase = Phase::Opening { row };
        self.last_row = Some(row);
        true
    }

    pub fn finish_open(&mut self) {
        if let Phase::Opening { row } = self.phase {
            self.phase = Phase::Open { row };
        } else {
            debug_assert!(false, "finish_open outside Opening: {:?}", self.phase);
        }
    }

    /// Close begins only from a fully open preview; returns the row to
    /// close over
    pub fn try_begin_close(&mut self) -> Option<usize> {
        match self.phase {
            Phase::Open { row } => {
                self.phase = Phase::Closing { row };
                Some(row)
            }
            _ => {
                tracing::debug!(?self.phase, "close refused");
                None
            }
        }
    }

    pub fn finish_close(&mut self) {
        if let Phase::Closing { .. } = self.phase {
            self.phase = Phase::Idle;
        } else {
            debug_assert!(false, "finish_close outside Closing: {:?}", self.phase);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_only_from_idle() {
        let mut gs = GalleryState::new();
        assert!(gs.try_begin_open(2));
        assert_eq!(gs.phase(), Phase::Opening { row: 2 });
        assert!(gs.is_open());
        assert!(gs.is_animating());

        // a second open is refused while the first is in flight or up
        assert!(!gs.try_begin_open(3));
        gs.finish_open();
        assert!(!gs.try_begin_open(3));
        assert_eq!(gs.active_row(), Some(2));
    }

    #[test]
    fn test_close_only_from_open() {
        let mut gs = GalleryState::new();
        assert_eq!(gs.try_begin_close(), None);

        gs.try_begin_open(1);
        // opening is not yet closable
        assert_eq!(gs.try_begin_close(), None);

        gs.finish_open();
        assert!(!gs.is_animating());
        assert_eq!(gs.try_begin_close(), Some(1));
        assert!(gs.is_animating());
        assert!(!gs.is_open());

        // and not closable twice
        assert_eq!(gs.try_begin_close(), None);
        gs.finish_close();
        assert_eq!(gs.phase(), Phase::Idle);
    }

    #[test]
    fn test_hover_allowed_in_idle_and_closing() {
        let mut gs = GalleryState::new();
        assert!(gs.can_hover());

        gs.try_begin_open(0);
        assert!(!gs.can_hover());
        gs.finish_open();
        assert!(!gs.can_hover());

        gs.try_begin_close();
        // the close is still animating, but rows already respond again
        assert!(gs.can_hover());
        gs.finish_close();
        assert!(gs.can_hover());
    }

    #[test]
    fn test_last_row_survives_close() {
        let mut gs = GalleryState::new();
        assert_eq!(gs.last_row(), None);

        gs.try_begin_open(3);
        gs.finish_open();
        gs.try_begin_close();
        gs.finish_close();
        assert_eq!(gs.last_row(), Some(3));
        assert_eq!(gs.active_row(), None);

        gs.try_begin_open(1);
        assert_eq!(gs.last_row(), Some(1));
    }
}
