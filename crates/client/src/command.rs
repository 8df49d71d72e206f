//! Line protocol of the terminal client.
//!
//! Each input line is `<user> <action> [args..]`. The first token is the
//! identity the chat platform would supply; the rest is parsed by clap.

use std::str::FromStr;

use arena_core::{Metric, PlayerId};
use clap::{Parser, Subcommand};

/// Which leaderboard `top` should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Board {
    Metric(Metric),
    /// The metric after the one shown last.
    Next,
}

fn parse_board(value: &str) -> Result<Board, String> {
    if value.eq_ignore_ascii_case("next") {
        return Ok(Board::Next);
    }
    Metric::from_str(value)
        .map(Board::Metric)
        .map_err(|_| format!("unknown leaderboard '{value}' (wins, size, winrate, next)"))
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Action {
    /// Grow attack and defense once per cooldown
    Grow,

    /// Show your character
    Profile,

    /// Open a challenge anyone can accept
    Fight,

    /// Accept an open challenge
    Accept { id: String },

    /// Withdraw your own challenge
    Cancel { id: String },

    /// List open challenges
    Challenges,

    /// Show a leaderboard
    Top {
        #[arg(value_parser = parse_board)]
        board: Option<Board>,
    },

    /// Tell the arena your display name
    Register {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Reset every character (admin)
    ResetAll,

    /// Reset one character (admin)
    Reset { id: String },

    /// Overwrite a character's stats (admin)
    #[command(allow_negative_numbers = true)]
    Set {
        id: String,
        attack: i64,
        defense: i64,
    },

    /// Write the roster to disk now (admin)
    Save,
}

impl Action {
    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Self::ResetAll | Self::Reset { .. } | Self::Set { .. } | Self::Save
        )
    }
}

#[derive(Parser, Debug)]
#[command(name = "arena", no_binary_name = true)]
struct ActionLine {
    #[command(subcommand)]
    action: Action,
}

/// One parsed input line.
#[derive(Debug, PartialEq, Eq)]
pub struct Request {
    pub user: PlayerId,
    pub action: Action,
}

impl Request {
    /// Parse a line; `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>, clap::Error> {
        let mut tokens = line.split_whitespace();
        let Some(user) = tokens.next() else {
            return Ok(None);
        };

        let ActionLine { action } = ActionLine::try_parse_from(tokens)?;

        Ok(Some(Self {
            user: PlayerId::from(user),
            action,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Request {
        Request::parse(line).unwrap().unwrap()
    }

    #[test]
    fn blank_line_is_skipped() {
        assert_eq!(Request::parse("   ").unwrap(), None);
    }

    #[test]
    fn first_token_is_the_user() {
        let request = parse("42 grow");
        assert_eq!(request.user, PlayerId::from("42"));
        assert_eq!(request.action, Action::Grow);
    }

    #[test]
    fn accept_takes_challenge_id() {
        let request = parse("7 accept fight_1_1000_0");
        assert_eq!(
            request.action,
            Action::Accept {
                id: "fight_1_1000_0".into()
            }
        );
    }

    #[test]
    fn top_parses_metric_or_next() {
        assert_eq!(parse("1 top").action, Action::Top { board: None });
        assert_eq!(
            parse("1 top Winrate").action,
            Action::Top {
                board: Some(Board::Metric(Metric::Winrate))
            }
        );
        assert_eq!(
            parse("1 top next").action,
            Action::Top {
                board: Some(Board::Next)
            }
        );
        assert!(Request::parse("1 top elo").is_err());
    }

    #[test]
    fn register_joins_words_later() {
        let request = parse("1 register Sir Lancelot");
        assert_eq!(
            request.action,
            Action::Register {
                name: vec!["Sir".into(), "Lancelot".into()]
            }
        );
        assert!(Request::parse("1 register").is_err());
    }

    #[test]
    fn set_accepts_negative_stats() {
        let request = parse("admin set 5 -3 -1");
        assert_eq!(
            request.action,
            Action::Set {
                id: "5".into(),
                attack: -3,
                defense: -1
            }
        );
        assert!(request.action.requires_admin());
    }

    #[test]
    fn missing_action_is_an_error() {
        assert!(Request::parse("42").is_err());
        assert!(Request::parse("42 dance").is_err());
    }
}
