/// Scroll depth past which the header tucks away.
pub const HIDE_AFTER_SCROLL: f64 = 300.0;
/// Pointer distance from the top edge that brings the header back.
pub const REVEAL_ZONE: f64 = 130.0;
/// Distance from the document end at which the scroll cue disappears.
pub const CUE_BOTTOM_MARGIN: f64 = 100.0;

/// Auto-hiding header driven by scroll depth and pointer position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderVisibility {
    hidden: bool,
}

impl HeaderVisibility {
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        self.set(scroll_y > HIDE_AFTER_SCROLL)
    }

    pub fn on_pointer(&mut self, client_y: f64, scroll_y: f64) -> bool {
        if client_y < REVEAL_ZONE {
            self.set(false)
        } else if client_y > REVEAL_ZONE && scroll_y > HIDE_AFTER_SCROLL {
            self.set(true)
        } else {
            false
        }
    }

    fn set(&mut self, hidden: bool) -> bool {
        let changed = self.hidden != hidden;
        self.hidden = hidden;
        changed
    }
}

/// Whether the "scroll down" cue should show for the given document metrics.
pub fn scroll_cue_visible(scroll_top: f64, window_height: f64, doc_height: f64) -> bool {
    if doc_height <= window_height {
        return false;
    }
    let to_bottom = doc_height - (scroll_top + window_height);
    to_bottom >= CUE_BOTTOM_MARGIN
}
