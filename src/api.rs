// The API used for the server and this client to communicate. Mirrors the JSON the server emits:
// each message is a snapshot of the whole session, and each request is a single action.

use crate::error::{Error, Result};
use crate::notation;
use crate::types::{Bid, Card};

use log::{debug, warn};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// The actions a player can take.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    // Degenerate case: just ask to see state.
    Poll,

    // Ask to join.
    Join(isize), // The index of the team to join (i.e. in [0, 1]).

    // Make a bid.
    MakeBid(Bid),

    // Choose which three cards of the hand plus kitty to throw away.
    DiscardCards([Card; 3]),

    // Exit the match early.
    Quit,
}

impl Action {
    pub fn join(team: isize) -> Self {
        Action::Join(team)
    }

    // Builds a bid from a picked token, e.g. "6♠".
    pub fn bid(token: &str) -> Result<Self> {
        Ok(Action::MakeBid(notation::bid::decode(token)?))
    }

    // Builds a discard from three picked card tokens. Any bad token rejects the whole action.
    pub fn discard(tokens: [&str; 3]) -> Result<Self> {
        let [a, b, c] = tokens;
        Ok(Action::DiscardCards([
            notation::card::decode(a)?,
            notation::card::decode(b)?,
            notation::card::decode(c)?,
        ]))
    }
}

// The state that the session can be in.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionState {
    // You or another player have just joined.
    // Player count and your index are stored in the lobby history.
    PlayerJoined,

    // Your turn to bid.
    WaitingForYourBid(Vec<Bid>), // Bids available to you.

    // Waiting for another player to bid.
    // Current bidder stored in the bidding history.
    WaitingForTheirBid,

    // You have won the bid and must choose how to use the kitty.
    WaitingForYourKitty,

    // Another player must choose how to use the kitty.
    // Winning bidder stored in the winning bid history.
    WaitingForTheirKitty,

    // Waiting for you to choose a card to play.
    WaitingForYourPlay,

    // Waiting for another player to play.
    WaitingForTheirPlay,

    // Some in-game error (e.g. tried to play out of turn). Text is in the history.
    Error,

    // You have been rejected (e.g. because a game is ongoing).
    Excluded,

    // The match has unexpectedly ended (e.g. a player has left).
    MatchAborted(String), // Reason.

    // A state newer than this client. Carries the server's tag.
    Unrecognized(String),
}

impl SessionState {
    // Builds a state from its wire tag and (possibly null) payload.
    pub fn from_tagged(tag: &str, payload: Value) -> Result<Self> {
        Ok(match tag {
            "PlayerJoined" => SessionState::PlayerJoined,
            "WaitingForYourBid" => SessionState::WaitingForYourBid(payload_or_default(tag, payload)),
            "WaitingForTheirBid" => SessionState::WaitingForTheirBid,
            "WaitingForYourKitty" => SessionState::WaitingForYourKitty,
            "WaitingForTheirKitty" => SessionState::WaitingForTheirKitty,
            "WaitingForYourPlay" => SessionState::WaitingForYourPlay,
            "WaitingForTheirPlay" => SessionState::WaitingForTheirPlay,
            "Error" => SessionState::Error,
            "Excluded" => SessionState::Excluded,
            "MatchAborted" => SessionState::MatchAborted(payload_or_default(tag, payload)),
            other => return Err(Error::UnrecognizedStateVariant(other.to_string())),
        })
    }

    pub fn tag(&self) -> &str {
        match self {
            SessionState::PlayerJoined => "PlayerJoined",
            SessionState::WaitingForYourBid(_) => "WaitingForYourBid",
            SessionState::WaitingForTheirBid => "WaitingForTheirBid",
            SessionState::WaitingForYourKitty => "WaitingForYourKitty",
            SessionState::WaitingForTheirKitty => "WaitingForTheirKitty",
            SessionState::WaitingForYourPlay => "WaitingForYourPlay",
            SessionState::WaitingForTheirPlay => "WaitingForTheirPlay",
            SessionState::Error => "Error",
            SessionState::Excluded => "Excluded",
            SessionState::MatchAborted(_) => "MatchAborted",
            SessionState::Unrecognized(tag) => tag,
        }
    }
}

// A payload that is missing or malformed degrades to its empty value.
fn payload_or_default<T: DeserializeOwned + Default>(what: &str, payload: Value) -> T {
    if payload.is_null() {
        return T::default();
    }

    serde_json::from_value(payload).unwrap_or_else(|e| {
        warn!("Ignoring malformed {}: {}", what, e);
        T::default()
    })
}

// Field decoder for history: a null or wrongly typed value becomes the field's default instead of
// failing the whole snapshot.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(payload_or_default(std::any::type_name::<T>(), value))
}

// States use serde's externally-tagged layout: unit states are bare strings, states with a payload
// are single-key objects.
impl<'de> Deserialize<'de> for SessionState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let (tag, payload) = match Value::deserialize(deserializer)? {
            Value::String(tag) => (tag, Value::Null),
            Value::Object(map) => {
                let mut entries = map.into_iter();
                match (entries.next(), entries.next()) {
                    (Some(entry), None) => entry,
                    _ => return Err(D::Error::custom("state object must have exactly one key")),
                }
            }
            other => {
                return Err(D::Error::custom(format!(
                    "state must be a string or an object, got {}",
                    other
                )))
            }
        };

        match SessionState::from_tagged(&tag, payload) {
            Ok(state) => Ok(state),
            Err(e) => {
                debug!("{}", e);
                Ok(SessionState::Unrecognized(tag))
            }
        }
    }
}

// Sub-histories. Each is only present when it is relevant to the current stage of the session.
// Fields default when missing, null or malformed so that a partial history still decodes.

// Background information about the lobby.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LobbyHistory {
    // Number of players currently joined.
    #[serde(default, deserialize_with = "lenient")]
    pub player_count: usize,

    // Your index in the player list.
    #[serde(default, deserialize_with = "lenient")]
    pub your_player_index: usize,

    // Your index in the team list (i.e. in [0, 1]).
    #[serde(default, deserialize_with = "lenient")]
    pub your_team_index: usize,
}

// Background information about the match.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MatchHistory {
    // (team 1 score delta, team 1 score total, team 2 score delta, team 2 score total).
    #[serde(default, deserialize_with = "lenient")]
    pub past_games: Vec<(isize, isize, isize, isize)>,

    #[serde(default, deserialize_with = "lenient")]
    pub winning_team_index: Option<usize>,

    #[serde(default, deserialize_with = "lenient")]
    pub match_aborted_reason: Option<String>,
}

// Background information about the bidding.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct BiddingHistory {
    // The last bids made by each player, in player order.
    #[serde(default, deserialize_with = "lenient")]
    pub bids: Vec<Option<Bid>>,

    #[serde(default, deserialize_with = "lenient")]
    pub current_bidder_index: Option<usize>,

    // Only populated for the player whose turn it is to bid.
    #[serde(default, deserialize_with = "lenient")]
    pub bid_options: Option<Vec<Bid>>,
}

// Background information about the bid that won.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct WinningBidHistory {
    #[serde(default, deserialize_with = "lenient")]
    pub winning_bidder_index: Option<usize>,

    #[serde(default, deserialize_with = "lenient")]
    pub winning_bid: Option<Bid>, // Invariant: not a Pass.

    // Only populated for the winning bidder, until they discard.
    #[serde(default, deserialize_with = "lenient")]
    pub kitty: Option<Vec<Card>>,

    #[serde(default, deserialize_with = "lenient")]
    pub discarded: Option<Vec<Card>>,
}

// Background information about the current game (i.e. the current bidding, bidding-won, hands
// played cycle).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GameHistory {
    // The cards in your hand, in dealt order.
    #[serde(default, deserialize_with = "lenient")]
    pub hand: Vec<Card>,

    #[serde(default, deserialize_with = "lenient")]
    pub bidding_history: Option<BiddingHistory>,

    #[serde(default, deserialize_with = "lenient")]
    pub winning_bid_history: Option<WinningBidHistory>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct History {
    #[serde(default, deserialize_with = "lenient")]
    pub lobby_history: Option<LobbyHistory>,

    #[serde(default, deserialize_with = "lenient")]
    pub match_history: Option<MatchHistory>,

    #[serde(default, deserialize_with = "lenient")]
    pub game_history: Option<GameHistory>,

    #[serde(default, deserialize_with = "lenient")]
    pub excluded_reason: Option<String>,

    // Set when the server rejected your last action.
    #[serde(default, deserialize_with = "lenient")]
    pub error: Option<String>,
}

// One complete message from the server.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Snapshot {
    pub state: SessionState,

    #[serde(default, deserialize_with = "lenient")]
    pub history: History,
}

impl Snapshot {
    pub fn new(state: SessionState) -> Self {
        Snapshot {
            state,
            history: History::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BidSuit, Suit};

    #[test]
    fn decodes_server_snapshot() {
        let json = r#"{
            "state": "WaitingForTheirBid",
            "history": {
                "lobby_history": {"player_count": 4, "your_player_index": 2, "your_team_index": 0},
                "match_history": {"past_games": [], "winning_team_index": null, "match_aborted_reason": null},
                "game_history": {
                    "hand": ["Joker", {"SuitedCard": {"face": 10, "suit": "Clubs"}}],
                    "bidding_history": {
                        "bids": [{"Tricks": [6, {"Suit": "Spades"}]}, "Pass", null, null],
                        "current_bidder_index": 2,
                        "bid_options": null
                    },
                    "winning_bid_history": null,
                    "plays_history": null
                },
                "excluded_reason": null,
                "error": null
            }
        }"#;

        let snapshot = Snapshot::from_json(json).unwrap();
        assert_eq!(snapshot.state, SessionState::WaitingForTheirBid);

        let lobby = snapshot.history.lobby_history.unwrap();
        assert_eq!((lobby.player_count, lobby.your_player_index), (4, 2));

        let game = snapshot.history.game_history.unwrap();
        assert_eq!(game.hand, vec![Card::Joker, Card::suited(10, Suit::Clubs)]);
        let bidding = game.bidding_history.unwrap();
        assert_eq!(
            bidding.bids,
            vec![
                Some(Bid::Tricks(6, BidSuit::Suit(Suit::Spades))),
                Some(Bid::Pass),
                None,
                None
            ]
        );
        assert_eq!(bidding.current_bidder_index, Some(2));
    }

    #[test]
    fn decodes_states_with_inline_payloads() {
        let snapshot =
            Snapshot::from_json(r#"{"state": {"MatchAborted": "opponent disconnected"}}"#).unwrap();
        assert_eq!(
            snapshot.state,
            SessionState::MatchAborted("opponent disconnected".to_string())
        );
        assert_eq!(snapshot.history, History::default());

        let snapshot = Snapshot::from_json(
            r#"{"state": {"WaitingForYourBid": ["Pass", {"Tricks": [10, "NoTrumps"]}]}}"#,
        )
        .unwrap();
        assert_eq!(
            snapshot.state,
            SessionState::WaitingForYourBid(vec![Bid::Pass, Bid::Tricks(10, BidSuit::NoTrumps)])
        );
    }

    #[test]
    fn payload_states_sent_bare_get_empty_payloads() {
        let snapshot = Snapshot::from_json(r#"{"state": "WaitingForYourBid"}"#).unwrap();
        assert_eq!(snapshot.state, SessionState::WaitingForYourBid(Vec::new()));

        let snapshot = Snapshot::from_json(r#"{"state": "MatchAborted"}"#).unwrap();
        assert_eq!(snapshot.state, SessionState::MatchAborted(String::new()));
    }

    #[test]
    fn unknown_states_are_kept_not_rejected() {
        let snapshot = Snapshot::from_json(r#"{"state": "TrickWon"}"#).unwrap();
        assert_eq!(snapshot.state, SessionState::Unrecognized("TrickWon".to_string()));

        let snapshot = Snapshot::from_json(r#"{"state": {"GameWon": 1}}"#).unwrap();
        assert_eq!(snapshot.state, SessionState::Unrecognized("GameWon".to_string()));
    }

    #[test]
    fn rejects_states_of_the_wrong_shape() {
        assert!(Snapshot::from_json(r#"{"state": 3}"#).is_err());
        assert!(Snapshot::from_json(r#"{"state": {"Error": null, "Excluded": null}}"#).is_err());
        assert!(Snapshot::from_json(r#"{"history": {}}"#).is_err());
    }

    #[test]
    fn from_tagged_reports_unknown_tags() {
        assert!(matches!(
            SessionState::from_tagged("HandDealt", Value::Null),
            Err(Error::UnrecognizedStateVariant(tag)) if tag == "HandDealt"
        ));
    }

    #[test]
    fn null_or_malformed_history_fields_fall_back_to_defaults() {
        let json = r#"{
            "state": "WaitingForTheirBid",
            "history": {
                "lobby_history": "not a lobby",
                "match_history": {"past_games": null, "winning_team_index": "one"},
                "game_history": {
                    "hand": null,
                    "bidding_history": {"bids": 7, "current_bidder_index": 2}
                },
                "error": null
            }
        }"#;

        let snapshot = Snapshot::from_json(json).unwrap();
        assert_eq!(snapshot.state, SessionState::WaitingForTheirBid);
        assert_eq!(snapshot.history.lobby_history, None);
        assert_eq!(snapshot.history.match_history, Some(MatchHistory::default()));

        let game = snapshot.history.game_history.unwrap();
        assert!(game.hand.is_empty());
        let bidding = game.bidding_history.unwrap();
        assert!(bidding.bids.is_empty());
        assert_eq!(bidding.current_bidder_index, Some(2));
    }

    #[test]
    fn null_history_is_an_empty_history() {
        let snapshot = Snapshot::from_json(r#"{"state": "PlayerJoined", "history": null}"#).unwrap();
        assert_eq!(snapshot.history, History::default());

        let snapshot = Snapshot::from_json(
            r#"{"state": "PlayerJoined", "history": {"lobby_history": {"player_count": null, "your_player_index": 1}}}"#,
        )
        .unwrap();
        let lobby = snapshot.history.lobby_history.unwrap();
        assert_eq!((lobby.player_count, lobby.your_player_index), (0, 1));
    }

    #[test]
    fn actions_use_the_server_step_layout() {
        assert_eq!(serde_json::to_string(&Action::join(0)).unwrap(), r#"{"Join":0}"#);
        assert_eq!(serde_json::to_string(&Action::Poll).unwrap(), r#""Poll""#);
        assert_eq!(
            serde_json::to_string(&Action::bid("6♠").unwrap()).unwrap(),
            r#"{"MakeBid":{"Tricks":[6,{"Suit":"Spades"}]}}"#
        );
        assert_eq!(
            serde_json::to_string(&Action::discard(["★", "10◆", "4♥"]).unwrap()).unwrap(),
            r#"{"DiscardCards":["Joker",{"SuitedCard":{"face":10,"suit":"Diamonds"}},{"SuitedCard":{"face":4,"suit":"Hearts"}}]}"#
        );
    }

    #[test]
    fn bad_tokens_reject_the_action() {
        assert!(matches!(Action::bid("11♠"), Err(Error::InvalidToken(_))));
        assert!(matches!(
            Action::discard(["★", "3♠", "4♥"]),
            Err(Error::InvalidToken(t)) if t == "3♠"
        ));
    }
}
