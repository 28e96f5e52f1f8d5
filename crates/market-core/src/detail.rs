//! Detail overlay state.
//!
//! A single overlay shows the card that was clicked last. It is either
//! hidden or visible with a copy of that card's attributes; closing it never
//! touches the records behind the card.

use crate::card::Card;

/// Where a pointer event on the overlay landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed background outside the panel
    Backdrop,
    /// Anything inside the panel
    Panel,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetailOverlay {
    #[default]
    Hidden,
    Visible(Card),
}

impl DetailOverlay {
    /// Copy `card` into the overlay and show it. Opening while visible
    /// replaces the shown card.
    pub fn open(&mut self, card: Card) {
        tracing::debug!("Opening detail view for {}", card.id);
        *self = Self::Visible(card);
    }

    pub fn close(&mut self) {
        *self = Self::Hidden;
    }

    /// Click-outside-to-dismiss: only a click on the backdrop itself closes.
    pub fn click(&mut self, target: ClickTarget) {
        if target == ClickTarget::Backdrop {
            self.close();
        }
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        matches!(self, Self::Visible(_))
    }

    #[must_use]
    pub const fn card(&self) -> Option<&Card> {
        match self {
            Self::Visible(card) => Some(card),
            Self::Hidden => None,
        }
    }
}
