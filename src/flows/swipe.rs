// ABOUTME: Swipe cards: drag gesture tracking, the card deck it drives, and the
// delayed delivery of a swipe decision once the card animation has played

use crate::app::DeferredAction;
use serde::Serialize;
use std::time::Duration;
use tokio::runtime::TryCurrentError;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    /// Skip the card
    Left,
    /// Accept the card
    Right,
}

/// Horizontal drag tracking for a single card
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeGesture {
    threshold: f64,
    start_x: Option<f64>,
    offset_x: f64,
}

impl SwipeGesture {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start_x: None,
            offset_x: 0.0,
        }
    }

    pub fn press(&mut self, x: f64) {
        self.start_x = Some(x);
        self.offset_x = 0.0;
    }

    /// Moves without a prior press are ignored
    pub fn drag(&mut self, x: f64) {
        if let Some(start) = self.start_x {
            self.offset_x = x - start;
        }
    }

    /// Finish the gesture. Returns a direction when the card travelled past the threshold.
    pub fn release(&mut self) -> Option<SwipeDirection> {
        let direction = if self.start_x.is_none() {
            None
        } else if self.offset_x > self.threshold {
            Some(SwipeDirection::Right)
        } else if self.offset_x < -self.threshold {
            Some(SwipeDirection::Left)
        } else {
            None
        };
        self.start_x = None;
        self.offset_x = 0.0;
        direction
    }

    pub fn offset(&self) -> f64 {
        self.offset_x
    }

    pub fn is_dragging(&self) -> bool {
        self.start_x.is_some()
    }
}

/// Send `direction` on `sender` after `delay`, unless the returned action is
/// cancelled or dropped first
pub fn deliver_after(
    direction: SwipeDirection,
    delay: Duration,
    sender: UnboundedSender<SwipeDirection>,
) -> Result<DeferredAction, TryCurrentError> {
    DeferredAction::schedule(delay, move || {
        if sender.send(direction).is_err() {
            debug!("Swipe receiver gone, dropping {:?}", direction);
        }
    })
}

/// A stack of cards decided one at a time, remembering the accepted ones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwipeDeck<T> {
    cards: Vec<T>,
    position: usize,
    accepted: Vec<T>,
}

impl<T: Clone> SwipeDeck<T> {
    pub fn new(cards: Vec<T>) -> Self {
        Self {
            cards,
            position: 0,
            accepted: Vec::new(),
        }
    }

    pub fn current(&self) -> Option<&T> {
        self.cards.get(self.position)
    }

    /// Decide the current card. Returns the card, or `None` when the deck is exhausted.
    pub fn swipe(&mut self, direction: SwipeDirection) -> Option<T> {
        let card = self.cards.get(self.position)?.clone();
        if direction == SwipeDirection::Right {
            self.accepted.push(card.clone());
        }
        self.position += 1;
        Some(card)
    }

    pub fn accepted(&self) -> &[T] {
        &self.accepted
    }

    pub fn cards(&self) -> &[T] {
        &self.cards
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.cards.len() - self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.cards.len()
    }
}
