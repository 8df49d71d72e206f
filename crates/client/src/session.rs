//! Executes parsed requests against the arena and renders the replies.

use std::fmt::Write as _;

use anyhow::Result;
use arena_core::{ChallengeId, Metric, PlayerId};
use arena_runtime::{ArenaHandle, RuntimeError, backfill_names};

use crate::command::{Action, Board, Request};
use crate::config::ClientConfig;
use crate::format;
use crate::names::NameBook;

pub struct Session {
    handle: ArenaHandle,
    config: ClientConfig,
    names: NameBook,
    last_metric: Metric,
}

impl Session {
    pub fn new(handle: ArenaHandle, config: ClientConfig) -> Self {
        Self {
            handle,
            config,
            names: NameBook::new(),
            last_metric: Metric::default(),
        }
    }

    /// Run one request and return the text to show the user.
    ///
    /// Rule rejections come back as text; only internal failures are errors.
    pub async fn execute(&mut self, request: Request) -> Result<String> {
        let Request { user, action } = request;

        if action.requires_admin() && !self.config.is_admin(&user) {
            tracing::warn!("Rejected admin command from {user}");
            return Ok("❌ Only the admin can do that.".to_owned());
        }

        match self.dispatch(user, action).await {
            Ok(text) => Ok(text),
            Err(err) => match format::rejection(&err) {
                Some(text) => Ok(text),
                None => Err(err.into()),
            },
        }
    }

    async fn dispatch(&mut self, user: PlayerId, action: Action) -> arena_runtime::Result<String> {
        let text = match action {
            Action::Grow => format::growth(&self.handle.grow(user).await?),
            Action::Profile => format::profile(&self.handle.profile(user).await?),
            Action::Fight => format::challenge(&self.handle.open_challenge(user).await?),
            Action::Accept { id } => {
                let report = self
                    .handle
                    .accept_challenge(ChallengeId::from(id), user)
                    .await?;
                let attacker = self.name_of(&report.attacker).await?;
                let defender = self.name_of(&report.defender).await?;
                format::combat(&report, &attacker, &defender)
            }
            Action::Cancel { id } => {
                let challenge = self
                    .handle
                    .cancel_challenge(ChallengeId::from(id), user)
                    .await?;
                format!("🏳 Challenge {} withdrawn.", challenge.id)
            }
            Action::Challenges => self.open_challenges().await?,
            Action::Top { board } => self.top(board).await?,
            Action::Register { name } => self.register(user, name.join(" ")).await?,
            Action::ResetAll => {
                let count = self.handle.reset_all().await?;
                format!("♻ Reset {count} characters.")
            }
            Action::Reset { id } => {
                let player = self.handle.reset_player(PlayerId::from(id.as_str())).await?;
                format!(
                    "♻ {id} reset to {} attack, {} defense.",
                    player.attack, player.defense
                )
            }
            Action::Set {
                id,
                attack,
                defense,
            } => {
                let player = self
                    .handle
                    .set_stats(PlayerId::from(id.as_str()), attack, defense)
                    .await?;
                format!(
                    "✏ {id} now has {} attack, {} defense.",
                    player.attack, player.defense
                )
            }
            Action::Save => {
                self.handle.flush().await?;
                "💾 Roster saved.".to_owned()
            }
        };

        Ok(text)
    }

    async fn open_challenges(&self) -> arena_runtime::Result<String> {
        let challenges = self.handle.open_challenges().await?;
        if challenges.is_empty() {
            return Ok("No open challenges.".to_owned());
        }

        let mut text = String::from("⚔ Open challenges:\n");
        for challenge in &challenges {
            let attacker = self.name_of(&challenge.attacker).await?;
            let _ = write!(text, "\n{} by {}", challenge.id, attacker);
        }
        Ok(text)
    }

    async fn top(&mut self, board: Option<Board>) -> arena_runtime::Result<String> {
        let metric = match board {
            None => Metric::default(),
            Some(Board::Metric(metric)) => metric,
            Some(Board::Next) => self.last_metric.next(),
        };
        self.last_metric = metric;

        let mut entries = self.handle.leaderboard(metric).await?;
        let resolved = backfill_names(&self.handle, &self.names, &mut entries).await?;
        if resolved > 0 {
            tracing::debug!("Resolved {resolved} display names");
        }

        Ok(format::leaderboard(metric, &entries))
    }

    async fn register(&self, user: PlayerId, name: String) -> arena_runtime::Result<String> {
        self.names.register(user.clone(), name.clone());
        self.handle.cache_name(user.clone(), name).await?;

        let profile = self.handle.profile(user).await?;
        Ok(format!(
            "👋 Welcome, {}!",
            format::display_name(&profile.id, profile.player.name.as_deref())
        ))
    }

    /// Registered name, else the one cached on the record.
    async fn name_of(&self, id: &PlayerId) -> arena_runtime::Result<String> {
        let name = match self.names.lookup(id) {
            Some(name) => Some(name),
            None => match self.handle.player(id.clone()).await {
                Ok(player) => player.name,
                Err(RuntimeError::NotFound(_)) => None,
                Err(err) => return Err(err),
            },
        };
        Ok(format::display_name(id, name.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arena_core::Player;
    use arena_runtime::{Arena, ManualClock};

    use super::*;

    const NOW: i64 = 1_700_000_000;

    async fn session(admin: Option<&str>) -> (Arena, Session) {
        let arena = Arena::builder()
            .clock(Arc::new(ManualClock::new(NOW)))
            .rng(arena_core::PcgRng::new(3))
            .build()
            .await
            .unwrap();
        let config = ClientConfig {
            admin_id: admin.map(PlayerId::from),
            log_dir: None,
        };
        let session = Session::new(arena.handle(), config);
        (arena, session)
    }

    async fn run(session: &mut Session, line: &str) -> String {
        let request = Request::parse(line).unwrap().unwrap();
        session.execute(request).await.unwrap()
    }

    #[tokio::test]
    async fn admin_commands_need_the_admin_identity() {
        let (_arena, mut session) = session(Some("root")).await;

        run(&mut session, "1 profile").await;
        assert_eq!(
            run(&mut session, "1 reset-all").await,
            "❌ Only the admin can do that."
        );
        assert_eq!(
            run(&mut session, "root reset-all").await,
            "♻ Reset 1 characters."
        );
        assert_eq!(
            run(&mut session, "root set 1 -4 7").await,
            "✏ 1 now has -4 attack, 7 defense."
        );
    }

    #[tokio::test]
    async fn second_growth_reports_cooldown() {
        let (_arena, mut session) = session(None).await;

        assert!(run(&mut session, "1 grow").await.starts_with("🌱"));
        assert_eq!(run(&mut session, "1 grow").await, "⏰ Wait 2h 0m 0s");
    }

    #[tokio::test]
    async fn leaderboard_uses_registered_names() {
        let (_arena, mut session) = session(None).await;

        assert_eq!(
            run(&mut session, "1 register Alice Liddell").await,
            "👋 Welcome, Alice Liddell!"
        );
        run(&mut session, "2 profile").await;

        let text = run(&mut session, "3 top").await;

        assert!(text.contains("1. Alice Liddell - 0 wins"));
        assert!(text.contains("2. ID:2 - 0 wins"));
    }

    #[tokio::test]
    async fn combat_and_listing_fall_back_to_stored_names() {
        let (_arena, mut session) = session(None).await;
        // cached on the record but unknown to this session, as after a restart
        session
            .handle
            .cache_name(PlayerId::from("1"), "Alice".to_owned())
            .await
            .unwrap();

        let opened = run(&mut session, "1 fight").await;
        assert!(opened.starts_with("⚔ Alice calls for a fight!"));
        let id = opened.rsplit(' ').next().unwrap().to_owned();

        let listing = run(&mut session, "2 challenges").await;
        assert!(listing.ends_with(&format!("{id} by Alice")));

        let combat = run(&mut session, &format!("2 accept {id}")).await;
        assert!(combat.contains("🔸 Alice:"));
        assert!(combat.contains("🔹 ID:2:"));
    }

    #[tokio::test]
    async fn register_creates_the_record_in_one_step() {
        let (_arena, mut session) = session(None).await;

        run(&mut session, "7 register Bob").await;

        let player = session.handle.player(PlayerId::from("7")).await.unwrap();
        assert_eq!(player.name.as_deref(), Some("Bob"));
        assert_eq!(player, Player::new().with_name("Bob"));
    }

    #[tokio::test]
    async fn top_next_cycles_metrics() {
        let (_arena, mut session) = session(None).await;
        run(&mut session, "1 profile").await;

        assert!(run(&mut session, "1 top").await.starts_with("🏆 Top 10 by wins"));
        assert!(run(&mut session, "1 top next").await.starts_with("⚔🛡 Top 10 by size"));
        assert!(
            run(&mut session, "1 top next")
                .await
                .starts_with("📊 Top 10 by winrate")
        );
        assert!(run(&mut session, "1 top next").await.starts_with("🏆 Top 10 by wins"));
    }

    #[tokio::test]
    async fn stale_challenge_is_reported_as_over() {
        let (_arena, mut session) = session(None).await;

        let opened = run(&mut session, "1 fight").await;
        let id = opened
            .rsplit(' ')
            .next()
            .unwrap()
            .to_owned();

        assert_eq!(
            run(&mut session, &format!("1 accept {id}")).await,
            "You cannot fight yourself! 🤪"
        );
        assert!(
            run(&mut session, &format!("2 accept {id}"))
                .await
                .starts_with("⚔️ Combat result")
        );
        assert_eq!(
            run(&mut session, &format!("3 accept {id}")).await,
            "This fight is already over!"
        );
    }
}
