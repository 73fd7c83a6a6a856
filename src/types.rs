// Card and bid datatypes shared by the wire API and the notation codecs.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Clubs,
    Diamonds,
    Hearts,
}

impl Suit {
    // In the order the server ranks them for bidding.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Clubs, Suit::Diamonds, Suit::Hearts];
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum BidSuit {
    Suit(Suit),
    NoTrumps,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Bid {
    Tricks(usize, BidSuit), // Invariant: first element in [6..10].
    Mis,
    OpenMis,
    Pass,
}

impl Bid {
    pub const MIN_TRICKS: usize = 6;
    pub const MAX_TRICKS: usize = 10;
}

#[derive(Clone, Debug, Copy, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct SuitedCard {
    // The number or face on the card. Invariant: in [4..14], with ace represented by 14.
    pub face: usize,
    pub suit: Suit,
}

impl SuitedCard {
    pub const MIN_FACE: usize = 4;
    pub const MAX_FACE: usize = 14;
}

#[derive(Clone, Debug, Copy, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Card {
    SuitedCard(SuitedCard),
    Joker,
}

impl Card {
    pub fn suited(face: usize, suit: Suit) -> Self {
        Card::SuitedCard(SuitedCard { face, suit })
    }
}
