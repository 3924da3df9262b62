pub mod game;
pub mod model;
pub mod play;

pub use model::card::{Card, CardError, parse_cards};
pub use model::rank::Rank;
pub use model::suit::Suit;
pub use model::trick::{FinalizeError, Trick, TrickBuilder, TrickError, TrickState};
pub use play::{Play, Shape, classify};
