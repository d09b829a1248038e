//! Windowing of the card stack: which upcoming cards are drawn, how deep
//! cards recede, and which of them are allowed to fetch imagery.

pub const STACK_SIZE: usize = 3;
pub const CARDS_TO_LOAD_IMAGES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackCard {
    /// Index into the deck.
    pub index: usize,
    /// 0 is the interactive top card; deeper cards render beneath it.
    pub depth: usize,
    /// Deeper cards render without touching the network.
    pub loads_image: bool,
}

/// Resting transform of a back-stack card as a function of its depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthTransform {
    pub scale: f32,
    pub translate_y: f32,
    pub opacity: f32,
}

/// The up-to-`STACK_SIZE` cards at `[cursor, cursor + STACK_SIZE)`, clipped
/// to the deck. Empty when the session is complete, at which point the
/// frontend swaps the stack for the reset affordance.
pub fn visible_window(cursor: usize, deck_len: usize) -> Vec<StackCard> {
    (cursor..deck_len.min(cursor + STACK_SIZE))
        .enumerate()
        .map(|(depth, index)| StackCard {
            index,
            depth,
            loads_image: depth < CARDS_TO_LOAD_IMAGES,
        })
        .collect()
}

/// Depth 0 is the active card and keeps the identity transform; its visuals
/// come from the gesture, not from here.
pub fn depth_transform(depth: usize) -> DepthTransform {
    match depth {
        0 => DepthTransform {
            scale: 1.0,
            translate_y: 0.0,
            opacity: 1.0,
        },
        1 => DepthTransform {
            scale: 1.0,
            translate_y: 0.0,
            opacity: 0.8,
        },
        2 => DepthTransform {
            scale: 0.95,
            translate_y: 10.0,
            opacity: 0.65,
        },
        _ => DepthTransform {
            scale: 0.8,
            translate_y: (depth as f32 - 1.0) * 10.0,
            opacity: 0.5,
        },
    }
}
