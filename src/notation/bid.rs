// Bid tokens: "P", "M" and "O" for pass, misère and open misère, otherwise a trick count followed
// by a suit glyph or "NT" (e.g. "6♠", "10NT").

use super::{parse_suit, split_prefix, suit_glyph};
use crate::error::{Error, Result};
use crate::types::{Bid, BidSuit, Suit};

const NO_TRUMPS: &str = "NT";

pub fn encode(bid: &Bid) -> Result<String> {
    match bid {
        Bid::Pass => Ok("P".to_string()),
        Bid::Mis => Ok("M".to_string()),
        Bid::OpenMis => Ok("O".to_string()),
        Bid::Tricks(count, _) if !(Bid::MIN_TRICKS..=Bid::MAX_TRICKS).contains(count) => {
            Err(Error::InvalidBid(*count))
        }
        Bid::Tricks(count, BidSuit::Suit(suit)) => Ok(format!("{}{}", count, suit_glyph(*suit))),
        Bid::Tricks(count, BidSuit::NoTrumps) => Ok(format!("{}{}", count, NO_TRUMPS)),
    }
}

pub fn decode(token: &str) -> Result<Bid> {
    match token {
        "P" => return Ok(Bid::Pass),
        "M" => return Ok(Bid::Mis),
        "O" => return Ok(Bid::OpenMis),
        _ => {}
    }

    let invalid = || Error::InvalidToken(token.to_string());

    // Only a count of ten is two digits wide.
    let (count_text, suit_text) = split_prefix(token).ok_or_else(invalid)?;
    let count = match count_text.parse::<usize>() {
        Ok(n) if (Bid::MIN_TRICKS..=Bid::MAX_TRICKS).contains(&n) => n,
        _ => return Err(invalid()),
    };
    let trump = if suit_text == NO_TRUMPS {
        BidSuit::NoTrumps
    } else {
        BidSuit::Suit(parse_suit(suit_text).ok_or_else(invalid)?)
    };

    Ok(Bid::Tricks(count, trump))
}

// Every bid a player could ever be offered, in the order a bid picker lists them.
pub fn displayable_tokens() -> Vec<String> {
    let trumps = Suit::ALL
        .into_iter()
        .map(BidSuit::Suit)
        .chain([BidSuit::NoTrumps]);

    let mut bids = vec![Bid::Pass];
    for count in Bid::MIN_TRICKS..=Bid::MAX_TRICKS {
        bids.extend(trumps.clone().map(|trump| Bid::Tricks(count, trump)));
    }
    bids.extend([Bid::Mis, Bid::OpenMis]);

    bids.iter().filter_map(|b| encode(b).ok()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_atomic_and_trick_bids() {
        assert_eq!(encode(&Bid::Pass).unwrap(), "P");
        assert_eq!(encode(&Bid::Mis).unwrap(), "M");
        assert_eq!(encode(&Bid::OpenMis).unwrap(), "O");
        assert_eq!(
            encode(&Bid::Tricks(6, BidSuit::Suit(Suit::Spades))).unwrap(),
            "6♠"
        );
        assert_eq!(
            encode(&Bid::Tricks(10, BidSuit::Suit(Suit::Spades))).unwrap(),
            "10♠"
        );
        assert_eq!(encode(&Bid::Tricks(8, BidSuit::NoTrumps)).unwrap(), "8NT");
    }

    #[test]
    fn encode_rejects_counts_outside_range() {
        assert!(matches!(
            encode(&Bid::Tricks(5, BidSuit::NoTrumps)),
            Err(Error::InvalidBid(5))
        ));
        assert!(matches!(
            encode(&Bid::Tricks(11, BidSuit::Suit(Suit::Hearts))),
            Err(Error::InvalidBid(11))
        ));
    }

    #[test]
    fn ten_and_six_are_not_confused() {
        assert_eq!(
            decode("10♠").unwrap(),
            Bid::Tricks(10, BidSuit::Suit(Suit::Spades))
        );
        assert_eq!(
            decode("6♠").unwrap(),
            Bid::Tricks(6, BidSuit::Suit(Suit::Spades))
        );
        assert_eq!(decode("10NT").unwrap(), Bid::Tricks(10, BidSuit::NoTrumps));
        assert_eq!(decode("7◆").unwrap(), Bid::Tricks(7, BidSuit::Suit(Suit::Diamonds)));
    }

    #[test]
    fn decode_rejects_other_shapes() {
        for token in [
            "", "p", "Pass", "5♠", "11♠", "1♠", "20NT", "6", "6N", "6NTX", "6♠♠", "♠6", "10",
        ] {
            assert!(
                matches!(decode(token), Err(Error::InvalidToken(_))),
                "{token:?} should be rejected"
            );
        }
    }

    #[test]
    fn displayable_tokens_cover_every_bid_once() {
        let tokens = displayable_tokens();

        assert_eq!(tokens.len(), 1 + 5 * 5 + 2);
        assert_eq!(tokens.first().map(String::as_str), Some("P"));
        assert_eq!(tokens[1], "6♠");
        assert_eq!(tokens[5], "6NT");
        assert!(tokens.contains(&"10◆".to_string()));
        assert_eq!(&tokens[tokens.len() - 2..], ["M", "O"]);
        for token in &tokens {
            assert_eq!(&encode(&decode(token).unwrap()).unwrap(), token);
        }
    }
}
