// Card tokens: a face ("4".."10", "J", "Q", "K", "A") followed by a suit glyph, or a lone "★"
// for the joker.

use super::{parse_suit, split_prefix, suit_glyph};
use crate::error::{Error, Result};
use crate::types::{Card, Suit, SuitedCard};

pub const JOKER: &str = "★";

// The colour a card is drawn in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CardColour {
    Black,
    Red,
    Joker,
}

pub fn encode(card: &Card) -> Result<String> {
    let Card::SuitedCard(SuitedCard { face, suit }) = card else {
        return Ok(JOKER.to_string());
    };

    let face_text = match face {
        4..=10 => face.to_string(),
        11 => "J".to_string(),
        12 => "Q".to_string(),
        13 => "K".to_string(),
        14 => "A".to_string(),
        _ => return Err(Error::InvalidCard(*face)),
    };

    Ok(format!("{}{}", face_text, suit_glyph(*suit)))
}

pub fn decode(token: &str) -> Result<Card> {
    if token == JOKER {
        return Ok(Card::Joker);
    }

    let invalid = || Error::InvalidToken(token.to_string());

    let (face_text, suit_text) = split_prefix(token).ok_or_else(invalid)?;
    let face = match face_text {
        "J" => 11,
        "Q" => 12,
        "K" => 13,
        "A" => 14,
        numeral => match numeral.parse::<usize>() {
            Ok(n) if (SuitedCard::MIN_FACE..=10).contains(&n) => n,
            _ => return Err(invalid()),
        },
    };
    let suit = parse_suit(suit_text).ok_or_else(invalid)?;

    Ok(Card::SuitedCard(SuitedCard { face, suit }))
}

pub fn colour(card: &Card) -> CardColour {
    match card {
        Card::Joker => CardColour::Joker,
        Card::SuitedCard(SuitedCard { suit, .. }) => match suit {
            Suit::Diamonds | Suit::Hearts => CardColour::Red,
            Suit::Spades | Suit::Clubs => CardColour::Black,
        },
    }
}
