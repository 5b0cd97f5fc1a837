//! Tab and card-expansion behavior of the interactive report.
//!
//! The embedded script in [`super::assets`] implements the same transitions;
//! this model is the reference the script is checked against.

use crate::config::ReportSettings;
use crate::workflows::market::domain::PropertyCategory;
use serde::Serialize;
use std::fmt;

/// A card in the report, addressed by category and display position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CardId {
    pub category: PropertyCategory,
    pub index: usize,
}

impl CardId {
    pub fn new(category: PropertyCategory, index: usize) -> Self {
        Self { category, index }
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.category.slug(), self.index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    SelectTab(PropertyCategory),
    PointerDown { card: CardId, y: f64 },
    PointerMove { y: f64 },
    PointerUp,
    PointerCancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEffect {
    /// Bring the card into view once layout has settled.
    ScrollIntoView { card: CardId, delay_ms: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GestureConfig {
    pub drag_threshold_px: f64,
    pub scroll_delay_ms: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: 10.0,
            scroll_delay_ms: 150,
        }
    }
}

impl From<&ReportSettings> for GestureConfig {
    fn from(settings: &ReportSettings) -> Self {
        Self {
            drag_threshold_px: settings.drag_threshold_px,
            scroll_delay_ms: settings.expand_scroll_delay_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Gesture {
    card: CardId,
    start_y: f64,
    dragged: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportUiState {
    active: PropertyCategory,
    expanded: Option<CardId>,
    gesture: Option<Gesture>,
    config: GestureConfig,
}

impl ReportUiState {
    pub fn new(active: PropertyCategory, config: GestureConfig) -> Self {
        Self {
            active,
            expanded: None,
            gesture: None,
            config,
        }
    }

    pub fn active(&self) -> PropertyCategory {
        self.active
    }

    pub fn expanded(&self) -> Option<CardId> {
        self.expanded
    }

    pub fn is_visible(&self, category: PropertyCategory) -> bool {
        self.active == category
    }

    pub fn handle(&mut self, event: UiEvent) -> Option<UiEffect> {
        match event {
            UiEvent::SelectTab(category) => {
                self.active = category;
                None
            }
            UiEvent::PointerDown { card, y } => {
                self.gesture = Some(Gesture {
                    card,
                    start_y: y,
                    dragged: false,
                });
                None
            }
            UiEvent::PointerMove { y } => {
                if let Some(gesture) = self.gesture.as_mut() {
                    if (y - gesture.start_y).abs() > self.config.drag_threshold_px {
                        gesture.dragged = true;
                    }
                }
                None
            }
            UiEvent::PointerUp => match self.gesture.take() {
                Some(gesture) if !gesture.dragged => self.tap(gesture.card),
                _ => None,
            },
            UiEvent::PointerCancel => {
                self.gesture = None;
                None
            }
        }
    }

    /// Toggles `card`; at most one card is expanded at any time.
    pub fn tap(&mut self, card: CardId) -> Option<UiEffect> {
        if self.expanded == Some(card) {
            self.expanded = None;
            return None;
        }

        self.expanded = Some(card);
        Some(UiEffect::ScrollIntoView {
            card,
            delay_ms: self.config.scroll_delay_ms,
        })
    }
}
