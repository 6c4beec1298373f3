//! Stroke and hole bookkeeping for a round.

use fairway_shot::{CourseProgression, StrokeCounter};
use tracing::info;

/// Strokes played on the current hole.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrokeTally {
    count: u32,
}

impl StrokeTally {
    pub fn reset(&mut self) {
        self.count = 0;
    }
}

impl StrokeCounter for StrokeTally {
    fn increment(&mut self) {
        self.count += 1;
    }

    fn current_count(&self) -> u32 {
        self.count
    }
}

/// One finished hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleCard {
    pub number: u32,
    pub strokes: u32,
    /// `false` when the hole was conceded.
    pub holed: bool,
}

/// Tracks which hole is in play and the cards of finished ones.
#[derive(Debug, Clone)]
pub struct CourseManager {
    hole_count: u32,
    current: u32,
    cards: Vec<HoleCard>,
    holed_out: bool,
}

impl CourseManager {
    pub fn new(hole_count: u32) -> Self {
        Self {
            hole_count: hole_count.max(1),
            current: 1,
            cards: Vec::new(),
            holed_out: false,
        }
    }

    /// Returns and clears the "ball is in the cup" notification.
    pub fn take_holed_out(&mut self) -> bool {
        std::mem::take(&mut self.holed_out)
    }

    /// Closes the current hole. Returns the next hole number, or `None` when
    /// the round is over.
    pub fn finish_hole(&mut self, strokes: u32, holed: bool) -> Option<u32> {
        let card = HoleCard {
            number: self.current,
            strokes,
            holed,
        };
        info!(hole = card.number, strokes, holed, "hole finished");
        self.cards.push(card);

        if self.current >= self.hole_count {
            return None;
        }
        self.current += 1;
        Some(self.current)
    }

    pub fn current_hole(&self) -> u32 {
        self.current
    }

    pub fn cards(&self) -> &[HoleCard] {
        &self.cards
    }

    pub fn total_strokes(&self) -> u32 {
        self.cards.iter().map(|c| c.strokes).sum()
    }
}

impl CourseProgression for CourseManager {
    fn on_hole_complete(&mut self) {
        info!(hole = self.current, "ball in the cup");
        self.holed_out = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_counts_and_resets() {
        let mut tally = StrokeTally::default();
        tally.increment();
        tally.increment();
        assert_eq!(tally.current_count(), 2);
        tally.reset();
        assert_eq!(tally.current_count(), 0);
    }

    #[test]
    fn test_holed_out_is_taken_once() {
        let mut course = CourseManager::new(2);
        assert!(!course.take_holed_out());
        course.on_hole_complete();
        assert!(course.take_holed_out());
        assert!(!course.take_holed_out());
    }

    #[test]
    fn test_round_of_two() {
        let mut course = CourseManager::new(2);
        assert_eq!(course.finish_hole(3, true), Some(2));
        assert_eq!(course.current_hole(), 2);
        assert_eq!(course.finish_hole(8, false), None);
        assert_eq!(course.total_strokes(), 11);
        assert_eq!(
            course.cards()[1],
            HoleCard {
                number: 2,
                strokes: 8,
                holed: false
            }
        );
    }

    #[test]
    fn test_zero_holes_plays_one() {
        let mut course = CourseManager::new(0);
        assert_eq!(course.finish_hole(2, true), None);
    }
}
