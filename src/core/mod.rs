//! Core entity types for Cadence.

pub mod item;

pub use item::{
    DifficultyTier, Quality, ReviewItem, ReviewState, INITIAL_EASE_FACTOR, MAX_LEITNER_BOX,
    MAX_MASTERY_LEVEL, MIN_EASE_FACTOR, MIN_LEITNER_BOX,
};
