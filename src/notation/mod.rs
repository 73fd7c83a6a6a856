// Compact, human-legible notation for cards and bids (e.g. "10♠", "A♥", "★", "6NT").
//
// Tokens are only ever parsed in this module; the rest of the client works with the structured
// types.

pub mod bid;
pub mod card;

use crate::types::Suit;

pub fn suit_glyph(suit: Suit) -> char {
    match suit {
        Suit::Spades => '♠',
        Suit::Clubs => '♣',
        Suit::Diamonds => '◆',
        Suit::Hearts => '♥',
    }
}

// Accepts exactly one suit glyph.
pub fn parse_suit(text: &str) -> Option<Suit> {
    let mut chars = text.chars();
    let (Some(glyph), None) = (chars.next(), chars.next()) else {
        return None;
    };

    Suit::ALL.into_iter().find(|&s| suit_glyph(s) == glyph)
}

// Splits a token into its numeric-or-face prefix and the rest. Ten is the only value with a
// two-character prefix, so the prefix is two characters wide exactly when the second character
// is '0'.
fn split_prefix(token: &str) -> Option<(&str, &str)> {
    let width = if token.as_bytes().get(1) == Some(&b'0') {
        2
    } else {
        token.chars().next()?.len_utf8()
    };

    // `get` refuses to split inside a multi-byte character.
    Some((token.get(..width)?, token.get(width..)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suit_glyphs_are_distinct_and_parse_back() {
        for suit in Suit::ALL {
            assert_eq!(parse_suit(&suit_glyph(suit).to_string()), Some(suit));
        }
    }

    #[test]
    fn parse_suit_rejects_other_text() {
        assert_eq!(parse_suit(""), None);
        assert_eq!(parse_suit("♦"), None);
        assert_eq!(parse_suit("♠♠"), None);
        assert_eq!(parse_suit("S"), None);
    }

    #[test]
    fn prefix_width_sniffs_ten() {
        assert_eq!(split_prefix("10♠"), Some(("10", "♠")));
        assert_eq!(split_prefix("6♠"), Some(("6", "♠")));
        assert_eq!(split_prefix("6NT"), Some(("6", "NT")));
        assert_eq!(split_prefix("♠♠"), Some(("♠", "♠")));
        assert_eq!(split_prefix(""), None);
    }
}
