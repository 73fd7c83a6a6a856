// Projects a server snapshot into the handful of facts a UI displays: the stage, an info line,
// who sits where, the cards in hand and which bids are currently legal.
//
// Projection is a pure function. The only thing carried between snapshots is the player's own
// seat, which the caller threads through explicitly.

use std::collections::{BTreeMap, BTreeSet};

use crate::api::{History, LobbyHistory, SessionState, Snapshot};
use crate::notation;
use crate::types::{Bid, Card};

use log::warn;

// A line of display text. Alerts are errors, aborts and exclusions, drawn so they stand out.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Banner {
    pub text: String,
    pub alert: bool,
}

impl Banner {
    fn plain(text: impl Into<String>) -> Self {
        Banner {
            text: text.into(),
            alert: false,
        }
    }

    fn alert(text: impl Into<String>) -> Self {
        Banner {
            text: text.into(),
            alert: true,
        }
    }
}

// The player's own place at the table, as last reported by the lobby history.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KnownSeat {
    pub player_count: usize,
    pub your_player_index: usize,
}

impl From<&LobbyHistory> for KnownSeat {
    fn from(lobby: &LobbyHistory) -> Self {
        KnownSeat {
            player_count: lobby.player_count,
            your_player_index: lobby.your_player_index,
        }
    }
}

impl KnownSeat {
    // The display slot for a player. Slot 0 is always yourself; other players follow around the
    // table. None if the seat data is inconsistent or the player isn't at the table.
    pub fn slot_of(&self, player_index: usize) -> Option<usize> {
        let n = self.player_count;
        if self.your_player_index >= n || player_index >= n {
            return None;
        }

        Some((player_index + n - self.your_player_index) % n)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SeatLabel {
    pub player_index: usize,
    pub name: String,
    pub is_self: bool,
    pub is_bold: bool,

    // The most recent bid this player made in the current game.
    pub last_bid: Option<String>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Projection {
    pub stage_label: Banner,
    pub info_message: Banner,

    // Keyed by display slot.
    pub seat_labels: BTreeMap<usize, SeatLabel>,

    // Your hand in dealt order, followed by the kitty if you hold it.
    pub visible_hand: Vec<String>,

    // Empty unless you are choosing a bid.
    pub legal_bid_tokens: BTreeSet<String>,

    pub winning_bid: Option<String>,
    pub discarded: Vec<String>,
}

impl Projection {
    // Every displayable bid, paired with whether it can be chosen right now.
    pub fn bid_choices(&self) -> Vec<(String, bool)> {
        notation::bid::displayable_tokens()
            .into_iter()
            .map(|token| {
                let legal = self.legal_bid_tokens.contains(&token);
                (token, legal)
            })
            .collect()
    }
}

pub fn project(
    snapshot: &Snapshot,
    known_seat: Option<KnownSeat>,
) -> (Projection, Option<KnownSeat>) {
    let history = &snapshot.history;

    let seat = history
        .lobby_history
        .as_ref()
        .map(KnownSeat::from)
        .or(known_seat);

    let projection = Projection {
        stage_label: stage_label(&snapshot.state),
        info_message: info_message(&snapshot.state, history),
        seat_labels: seat.map(|s| seat_labels(&s, history)).unwrap_or_default(),
        visible_hand: visible_hand(history),
        legal_bid_tokens: legal_bid_tokens(&snapshot.state, history),
        winning_bid: winning_bid(history),
        discarded: discarded(history),
    };

    (projection, seat)
}

fn stage_label(state: &SessionState) -> Banner {
    match state {
        SessionState::PlayerJoined => Banner::plain("Lobby"),
        SessionState::WaitingForYourBid(_) | SessionState::WaitingForTheirBid => {
            Banner::plain("Bidding")
        }
        SessionState::WaitingForYourKitty | SessionState::WaitingForTheirKitty => {
            Banner::plain("Waiting for kitty")
        }
        SessionState::WaitingForYourPlay | SessionState::WaitingForTheirPlay => {
            Banner::plain("Playing")
        }
        SessionState::Error => Banner::alert("Error"),
        SessionState::Excluded => Banner::alert("Excluded"),
        SessionState::MatchAborted(_) => Banner::alert("Aborted"),
        SessionState::Unrecognized(_) => Banner::default(),
    }
}

fn info_message(state: &SessionState, history: &History) -> Banner {
    // Any error from the server trumps the usual message.
    if let Some(error) = &history.error {
        return Banner::alert(error.as_str());
    }

    let game = history.game_history.as_ref();

    match state {
        SessionState::PlayerJoined => Banner::plain("Waiting for other players to join"),
        SessionState::WaitingForYourBid(_) => Banner::plain("Make your bid"),
        SessionState::WaitingForTheirBid => {
            let bidder = game
                .and_then(|g| g.bidding_history.as_ref())
                .and_then(|b| b.current_bidder_index);
            match bidder {
                Some(i) => Banner::plain(format!("Waiting for player {} to bid", i + 1)),
                None => degraded("current bidder"),
            }
        }
        SessionState::WaitingForYourKitty => Banner::plain("Use the kitty"),
        SessionState::WaitingForTheirKitty => {
            let winner = game
                .and_then(|g| g.winning_bid_history.as_ref())
                .and_then(|w| w.winning_bidder_index);
            match winner {
                Some(i) => Banner::plain(format!("Waiting for player {} to use the kitty", i + 1)),
                None => degraded("winning bidder"),
            }
        }
        SessionState::Excluded => {
            Banner::alert(history.excluded_reason.clone().unwrap_or_default())
        }
        SessionState::MatchAborted(inline_reason) => {
            let reason = history
                .match_history
                .as_ref()
                .and_then(|m| m.match_aborted_reason.clone())
                .unwrap_or_else(|| inline_reason.clone());
            Banner::alert(reason)
        }
        SessionState::WaitingForYourPlay | SessionState::WaitingForTheirPlay => {
            Banner::plain("Waiting for player to play")
        }
        SessionState::Error | SessionState::Unrecognized(_) => Banner::default(),
    }
}

fn degraded(field: &str) -> Banner {
    warn!("Snapshot is missing the {}; leaving the info message blank.", field);
    Banner::default()
}

fn seat_labels(seat: &KnownSeat, history: &History) -> BTreeMap<usize, SeatLabel> {
    if seat.your_player_index >= seat.player_count {
        warn!(
            "Inconsistent lobby history: player {} of {}; leaving seats unlabeled.",
            seat.your_player_index, seat.player_count
        );
        return BTreeMap::new();
    }

    let bids = history
        .game_history
        .as_ref()
        .and_then(|g| g.bidding_history.as_ref())
        .map(|b| b.bids.as_slice())
        .unwrap_or_default();

    (0..seat.player_count)
        .filter_map(|i| {
            let slot = seat.slot_of(i)?;
            let is_self = slot == 0;
            let label = SeatLabel {
                player_index: i,
                name: format!("Player {}", i + 1),
                is_self,
                is_bold: is_self,
                last_bid: bids.get(i).copied().flatten().and_then(|b| bid_token(&b)),
            };
            Some((slot, label))
        })
        .collect()
}

fn visible_hand(history: &History) -> Vec<String> {
    let Some(game) = &history.game_history else {
        return Vec::new();
    };

    let kitty = game
        .winning_bid_history
        .as_ref()
        .and_then(|w| w.kitty.as_deref())
        .unwrap_or_default();

    card_tokens(game.hand.iter().chain(kitty))
}

fn legal_bid_tokens(state: &SessionState, history: &History) -> BTreeSet<String> {
    let from_history = history
        .game_history
        .as_ref()
        .and_then(|g| g.bidding_history.as_ref())
        .and_then(|b| b.bid_options.as_deref());

    let options: &[Bid] = match (from_history, state) {
        (Some(options), _) => options,
        (None, SessionState::WaitingForYourBid(inline)) => inline.as_slice(),
        (None, _) => &[],
    };

    options.iter().filter_map(bid_token).collect()
}

fn winning_bid(history: &History) -> Option<String> {
    history
        .game_history
        .as_ref()?
        .winning_bid_history
        .as_ref()?
        .winning_bid
        .as_ref()
        .and_then(bid_token)
}

fn discarded(history: &History) -> Vec<String> {
    let discarded = history
        .game_history
        .as_ref()
        .and_then(|g| g.winning_bid_history.as_ref())
        .and_then(|w| w.discarded.as_deref())
        .unwrap_or_default();

    card_tokens(discarded.iter())
}

// Cards the server sent that can't be written in notation are dropped so the rest still show.
fn card_tokens<'a>(cards: impl Iterator<Item = &'a Card>) -> Vec<String> {
    cards
        .filter_map(|card| match notation::card::encode(card) {
            Ok(token) => Some(token),
            Err(e) => {
                warn!("Skipping card {:?} from server: {}", card, e);
                None
            }
        })
        .collect()
}

fn bid_token(bid: &Bid) -> Option<String> {
    match notation::bid::encode(bid) {
        Ok(token) => Some(token),
        Err(e) => {
            warn!("Skipping bid {:?} from server: {}", bid, e);
            None
        }
    }
}
