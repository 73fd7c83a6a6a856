// A bare-bones text front end: turns typed commands into actions and projections into lines to
// print. Anything fancier only needs to consume `Projection` the same way.

use crate::api::Action;
use crate::error::{Error, Result};
use crate::notation::card::{self, CardColour};
use crate::projector::{Banner, Projection};

pub const HELP: &str =
    "commands: poll | join <team> | bid <token> | discard <card> <card> <card> | quit";

// ANSI colours: red suits in red, the joker in blue.
const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";
const RESET: &str = "\x1b[0m";

// Names for the display slots, starting with yourself and going clockwise.
const SLOT_NAMES: [&str; 4] = ["bottom", "left", "top", "right"];

pub fn parse_command(line: &str) -> Result<Action> {
    let words: Vec<&str> = line.split_whitespace().collect();

    match words.as_slice() {
        ["poll"] => Ok(Action::Poll),
        ["quit"] => Ok(Action::Quit),
        ["join", team] => team
            .parse()
            .map(Action::join)
            .map_err(|_| Error::InvalidCommand(format!("team must be a number, got {:?}", team))),
        ["bid", token] => Action::bid(token),
        ["discard", a, b, c] => Action::discard([*a, *b, *c]),
        _ => Err(Error::InvalidCommand(line.trim().to_string())),
    }
}

pub fn render(projection: &Projection) -> Vec<String> {
    let mut lines = vec![
        format!("== {}", banner(&projection.stage_label)),
        banner(&projection.info_message),
    ];

    for (slot, seat) in &projection.seat_labels {
        let name = if seat.is_bold {
            format!("*{}*", seat.name)
        } else {
            seat.name.clone()
        };
        let position = SLOT_NAMES.get(*slot).copied().unwrap_or("away");
        let bid = seat
            .last_bid
            .as_ref()
            .map(|b| format!(" bid {}", b))
            .unwrap_or_default();
        lines.push(format!("  {:<6} {}{}", position, name, bid));
    }

    if !projection.visible_hand.is_empty() {
        let hand: Vec<String> = projection.visible_hand.iter().map(|t| paint(t)).collect();
        lines.push(format!("hand: {}", hand.join(" ")));
    }
    if let Some(bid) = &projection.winning_bid {
        lines.push(format!("winning bid: {}", bid));
    }
    if !projection.discarded.is_empty() {
        lines.push(format!("discarded: {}", projection.discarded.join(" ")));
    }

    // Illegal bids are shown in brackets.
    if !projection.legal_bid_tokens.is_empty() {
        let choices: Vec<String> = projection
            .bid_choices()
            .into_iter()
            .map(|(token, legal)| if legal { token } else { format!("({})", token) })
            .collect();
        lines.push(format!("bids: {}", choices.join(" ")));
    }

    lines
}

fn paint(token: &str) -> String {
    let colour = card::decode(token).map(|c| card::colour(&c));
    match colour {
        Ok(CardColour::Red) => format!("{}{}{}", RED, token, RESET),
        Ok(CardColour::Joker) => format!("{}{}{}", BLUE, token, RESET),
        Ok(CardColour::Black) | Err(_) => token.to_string(),
    }
}

fn banner(banner: &Banner) -> String {
    if banner.alert {
        format!("!! {}", banner.text)
    } else {
        banner.text.clone()
    }
}
