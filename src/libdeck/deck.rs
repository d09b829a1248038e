use crate::libdeck::dataset::Question;
use log::debug;
use rand::rng;
use rand::seq::{index, SliceRandom};
use rand::Rng;
use std::collections::HashSet;

// Placeholder image ids are drawn from picsum's 0..=500 range.
const IMAGE_ID_MAX: u32 = 500;

/// One study run: a deck shuffled once at start, a cursor walking it, and
/// the reveal flags of cards still in play. Reveal flags are keyed by
/// `Question::id` so a reordered deck would not leak answers across cards.
#[derive(Debug)]
pub struct Session {
    deck: Vec<Question>,
    image_ids: Vec<u32>,
    cursor: usize,
    revealed: HashSet<usize>,
}

impl Session {
    /// Shuffles a fresh copy of the class's questions (Fisher-Yates via
    /// `SliceRandom`) and assigns each card a unique placeholder image id.
    /// An empty question list yields an immediately-complete session.
    pub fn start(questions: &[Question]) -> Session {
        let mut deck = questions.to_vec();
        deck.shuffle(&mut rng());
        let image_ids = random_image_ids(deck.len());
        debug!("[Deck] Session started with {} cards", deck.len());
        Session {
            deck,
            image_ids,
            cursor: 0,
            revealed: HashSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn card(&self, index: usize) -> Option<&Question> {
        self.deck.get(index)
    }

    pub fn current(&self) -> Option<&Question> {
        self.deck.get(self.cursor)
    }

    pub fn image_id(&self, index: usize) -> Option<u32> {
        self.image_ids.get(index).copied()
    }

    /// Consumes the current card: drops its reveal flag and moves the cursor
    /// one step. Saturates at the deck end, so a stray extra call past the
    /// last card changes nothing.
    pub fn advance(&mut self) {
        if let Some(card) = self.deck.get(self.cursor) {
            self.revealed.remove(&card.id);
            self.cursor += 1;
            debug!("[Deck] Advanced to {}/{}", self.cursor, self.deck.len());
        }
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.deck.len()
    }

    /// Back to the first card with all answers hidden. The order is kept;
    /// the source app replays the same shuffle on reset.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.revealed.clear();
        debug!("[Deck] Session reset");
    }

    /// Flips answer visibility for the current card only. Back-stack cards
    /// never show answers, so there is nothing to toggle past the cursor.
    pub fn toggle_reveal(&mut self) {
        if let Some(card) = self.deck.get(self.cursor) {
            if !self.revealed.remove(&card.id) {
                self.revealed.insert(card.id);
            }
        }
    }

    pub fn is_revealed(&self, question: &Question) -> bool {
        self.revealed.contains(&question.id)
    }

    pub fn current_revealed(&self) -> bool {
        self.current().is_some_and(|q| self.is_revealed(q))
    }
}

fn random_image_ids(count: usize) -> Vec<u32> {
    let mut rng = rng();
    let pool = (IMAGE_ID_MAX + 1) as usize;
    let mut ids: Vec<u32> = index::sample(&mut rng, pool, count.min(pool))
        .into_iter()
        .map(|i| i as u32)
        .collect();
    // Decks larger than the image pool cannot stay unique; top up randomly.
    while ids.len() < count {
        ids.push(rng.random_range(0..=IMAGE_ID_MAX));
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn questions(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question {
                id: i,
                prompt: format!("Q{}", i),
                answer: format!("A{}", i),
            })
            .collect()
    }

    #[test]
    fn shuffle_keeps_every_card() {
        let qs = questions(10);
        let session = Session::start(&qs);
        assert_eq!(session.len(), 10);
        let mut ids: Vec<usize> = (0..10).filter_map(|i| session.card(i)).map(|q| q.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn shuffle_reaches_every_permutation() {
        // 3 cards, 600 sessions: each of the 6 orders is expected ~100 times.
        // A biased shuffle (or a missing one) fails the frequency band.
        let qs = questions(3);
        let mut seen: HashMap<Vec<usize>, usize> = HashMap::new();
        for _ in 0..600 {
            let session = Session::start(&qs);
            let order: Vec<usize> = (0..3).filter_map(|i| session.card(i)).map(|q| q.id).collect();
            *seen.entry(order).or_default() += 1;
        }
        assert_eq!(seen.len(), 6);
        for (order, count) in seen {
            assert!(
                (40..=180).contains(&count),
                "order {:?} seen {} times",
                order,
                count
            );
        }
    }

    #[test]
    fn advance_saturates_at_deck_end() {
        let qs = questions(4);
        let mut session = Session::start(&qs);
        for k in 1..=7 {
            session.advance();
            assert_eq!(session.cursor(), k.min(4));
            assert_eq!(session.is_complete(), k >= 4);
        }
    }

    #[test]
    fn empty_deck_is_immediately_complete() {
        let session = Session::start(&[]);
        assert!(session.is_complete());
        assert!(session.current().is_none());
        assert_eq!(session.len(), 0);
    }

    #[test]
    fn reveal_follows_the_current_card_only() {
        let qs = questions(3);
        let mut session = Session::start(&qs);
        session.toggle_reveal();
        assert!(session.current_revealed());

        // The consumed card's flag is discarded; the new top starts hidden.
        let consumed = session.current().cloned();
        session.advance();
        assert!(!session.current_revealed());
        if let Some(card) = consumed {
            assert!(!session.is_revealed(&card));
        }

        session.toggle_reveal();
        session.toggle_reveal();
        assert!(!session.current_revealed());
    }

    #[test]
    fn reset_restores_start_without_reshuffling() {
        let qs = questions(5);
        let mut session = Session::start(&qs);
        let order_before: Vec<usize> =
            (0..5).filter_map(|i| session.card(i)).map(|q| q.id).collect();

        session.toggle_reveal();
        session.advance();
        session.advance();
        session.toggle_reveal();
        session.reset();

        assert_eq!(session.cursor(), 0);
        assert!(!session.current_revealed());
        let order_after: Vec<usize> =
            (0..5).filter_map(|i| session.card(i)).map(|q| q.id).collect();
        assert_eq!(order_before, order_after);
    }

    #[test]
    fn image_ids_are_unique_per_session() {
        let qs = questions(50);
        let session = Session::start(&qs);
        let mut ids: Vec<u32> = (0..50).filter_map(|i| session.image_id(i)).collect();
        assert_eq!(ids.len(), 50);
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 50);
        assert!(ids.iter().all(|&id| id <= 500));
    }
}
