pub mod dataset;
pub mod deck;
pub mod motion;
pub mod stack;
pub mod swipe;
