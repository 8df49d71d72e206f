//! Authoritative reducer for [`ArenaState`].
//!
//! The [`ArenaEngine`] routes every caller action to the rules modules and
//! keeps the roster invariants: records are auto-created on first contact,
//! combats commit both records together or not at all, and every roster
//! mutation marks the state dirty so the owner knows a snapshot is due.

mod errors;

pub use errors::AcceptError;

use crate::challenge::{Challenge, ChallengeError, ChallengeId, ChallengeRegistry};
use crate::combat::{CombatReport, CombatSide, check_eligibility, resolve_combat};
use crate::config::GameConfig;
use crate::env::RngSource;
use crate::growth::{self, GrowthError, GrowthResult};
use crate::leaderboard::{self, LeaderboardEntry, Metric};
use crate::state::{NotFound, Player, PlayerId, Roster};

/// Everything the engine mutates: the persistent roster and the ephemeral
/// challenge registry.
#[derive(Clone, Debug, Default)]
pub struct ArenaState {
    pub roster: Roster,
    pub challenges: ChallengeRegistry,
    dirty: bool,
}

impl ArenaState {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            challenges: ChallengeRegistry::new(),
            dirty: false,
        }
    }

    /// Whether the roster changed since the last [`take_dirty`](Self::take_dirty).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Clear and return the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

/// Outcome of a caller action that may also have created records.
///
/// `created` lists identities that got a default record during the action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Touched<T> {
    pub value: T,
    pub created: Vec<PlayerId>,
}

impl<T> Touched<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            created: Vec::new(),
        }
    }

    fn with_created(mut self, created: Vec<PlayerId>) -> Self {
        self.created = created;
        self
    }
}

/// Engine that applies caller actions to an [`ArenaState`].
pub struct ArenaEngine<'a> {
    state: &'a mut ArenaState,
    config: &'a GameConfig,
    created: Vec<PlayerId>,
}

impl<'a> ArenaEngine<'a> {
    pub fn new(state: &'a mut ArenaState, config: &'a GameConfig) -> Self {
        Self {
            state,
            config,
            created: Vec::new(),
        }
    }

    /// Record of `id`, created with defaults on first contact.
    pub fn profile(mut self, id: &PlayerId) -> Touched<Player> {
        self.ensure(id);
        let player = self.state.roster.get_or_create(id).clone();
        self.finish(player)
    }

    /// Strict read that never creates a record.
    pub fn player(&self, id: &PlayerId) -> Result<Player, NotFound> {
        self.state.roster.get(id).cloned()
    }

    /// Seconds until `id` may grow again.
    pub fn remaining_cooldown(&self, id: &PlayerId, now: i64) -> Result<u64, NotFound> {
        let player = self.state.roster.get(id)?;
        Ok(growth::remaining_cooldown(self.config, now, player))
    }

    /// Grow the stats of `id`, auto-creating the record.
    pub fn grow(
        mut self,
        id: &PlayerId,
        now: i64,
        rng: &mut impl RngSource,
    ) -> Touched<Result<GrowthResult, GrowthError>> {
        self.ensure(id);
        let player = self.state.roster.get_or_create(id);
        let result = growth::grow(self.config, now, player, rng);
        if result.is_ok() {
            self.state.dirty = true;
        }
        self.finish(result)
    }

    /// Open a challenge from `attacker` and return it with the attacker's
    /// current record for rendering.
    pub fn open_challenge(mut self, attacker: &PlayerId, now: i64) -> Touched<(ChallengeId, Player)> {
        self.ensure(attacker);
        let id = self.state.challenges.open(attacker, now);
        let player = self.state.roster.get_or_create(attacker).clone();
        self.finish((id, player))
    }

    /// Accept challenge `id` as `respondent` and resolve the combat.
    ///
    /// Checks run in this order: unknown id, self-challenge, eligibility of
    /// the attacker, eligibility of the respondent. Any failure leaves the
    /// challenge open and both records untouched. On success the challenge
    /// is consumed and both records are committed together.
    pub fn accept_challenge(
        mut self,
        id: &ChallengeId,
        respondent: &PlayerId,
        rng: &mut impl RngSource,
    ) -> Touched<Result<CombatReport, AcceptError>> {
        let result = self.try_accept(id, respondent, rng);
        self.finish(result)
    }

    fn try_accept(
        &mut self,
        id: &ChallengeId,
        respondent: &PlayerId,
        rng: &mut impl RngSource,
    ) -> Result<CombatReport, AcceptError> {
        let attacker_id = self.state.challenges.attacker_of(id)?.clone();
        if &attacker_id == respondent {
            return Err(ChallengeError::SelfChallenge {
                player: respondent.clone(),
            }
            .into());
        }

        self.ensure(&attacker_id);
        self.ensure(respondent);
        let mut attacker = self.state.roster.get_or_create(&attacker_id).clone();
        let mut defender = self.state.roster.get_or_create(respondent).clone();

        check_eligibility(CombatSide::Attacker, &attacker)?;
        check_eligibility(CombatSide::Defender, &defender)?;

        self.state.challenges.accept(id, respondent)?;
        let report = resolve_combat(&attacker_id, &mut attacker, respondent, &mut defender, rng)?;

        self.state.roster.insert(attacker_id, attacker);
        self.state.roster.insert(respondent.clone(), defender);
        self.state.dirty = true;

        Ok(report)
    }

    /// Withdraw an open challenge on behalf of its attacker.
    pub fn cancel_challenge(
        &mut self,
        id: &ChallengeId,
        requester: &PlayerId,
    ) -> Result<Challenge, ChallengeError> {
        self.state.challenges.cancel(id, requester)
    }

    /// Remove challenges older than `ttl_secs`.
    pub fn prune_challenges(&mut self, now: i64, ttl_secs: u64) -> Vec<Challenge> {
        self.state.challenges.prune_expired(now, ttl_secs)
    }

    pub fn leaderboard(&self, metric: Metric) -> Vec<LeaderboardEntry> {
        leaderboard::rank(metric, &self.state.roster)
    }

    /// Reset every record to default stats.
    pub fn reset_all(&mut self) -> usize {
        self.state.dirty = true;
        self.state.roster.reset_all()
    }

    /// Reset one record to default stats, creating it if needed.
    pub fn reset_player(&mut self, id: &PlayerId) -> Player {
        self.state.dirty = true;
        self.state.roster.reset_one(id).clone()
    }

    /// Override both stats of `id`, creating the record if needed.
    pub fn set_stats(&mut self, id: &PlayerId, attack: i64, defense: i64) -> Player {
        self.state.dirty = true;
        self.state.roster.set_stats(id, attack, defense).clone()
    }

    /// Cache a display name resolved by the platform.
    pub fn cache_display_name(&mut self, id: &PlayerId, name: &str) -> Result<(), NotFound> {
        self.state.roster.set_display_name(id, name)?;
        self.state.dirty = true;
        Ok(())
    }

    fn ensure(&mut self, id: &PlayerId) {
        if self.state.roster.ensure(id) {
            self.state.dirty = true;
            self.created.push(id.clone());
        }
    }

    fn finish<T>(self, value: T) -> Touched<T> {
        Touched::new(value).with_created(self.created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRolls;
    use crate::error::GameError;

    const NOW: i64 = 1_700_000_000;

    fn alice() -> PlayerId {
        PlayerId::from("alice")
    }

    fn bob() -> PlayerId {
        PlayerId::from("bob")
    }

    /// Rolls for an 8 vs 5 combat with bonus 3/2.
    fn eight_vs_five() -> ScriptedRolls {
        ScriptedRolls::ints([3, 2])
            .then_floats([0.9, 0.5, 0.99, 0.99, 0.99])
            .then_floats([0.6, 0.5, 0.99, 0.99, 0.99])
    }

    #[test]
    fn profile_creates_on_first_contact() {
        let config = GameConfig::default();
        let mut state = ArenaState::default();

        let touched = ArenaEngine::new(&mut state, &config).profile(&alice());
        assert_eq!(touched.value, Player::new());
        assert_eq!(touched.created, vec![alice()]);
        assert!(state.take_dirty());

        let again = ArenaEngine::new(&mut state, &config).profile(&alice());
        assert!(again.created.is_empty());
        assert!(!state.is_dirty());
    }

    #[test]
    fn strict_reads_do_not_create() {
        let config = GameConfig::default();
        let mut state = ArenaState::default();
        let engine = ArenaEngine::new(&mut state, &config);

        assert!(engine.player(&alice()).is_err());
        assert!(engine.remaining_cooldown(&alice(), NOW).is_err());
        assert!(state.roster.is_empty());
    }

    #[test]
    fn growth_on_cooldown_is_not_dirty() {
        let config = GameConfig::default();
        let mut state = ArenaState::default();
        state.roster.insert(alice(), Player::new().with_last_grow(NOW - 10));

        let touched =
            ArenaEngine::new(&mut state, &config).grow(&alice(), NOW, &mut ScriptedRolls::default());

        assert!(matches!(touched.value, Err(GrowthError::CooldownActive { remaining_secs: 7190 })));
        assert!(!state.is_dirty());
    }

    #[test]
    fn accepted_challenge_resolves_and_commits_both_records() {
        let config = GameConfig::default();
        let mut state = ArenaState::default();

        let (id, card) = ArenaEngine::new(&mut state, &config)
            .open_challenge(&alice(), NOW)
            .value;
        assert_eq!(card, Player::new());
        state.take_dirty();

        let touched = ArenaEngine::new(&mut state, &config).accept_challenge(
            &id,
            &bob(),
            &mut eight_vs_five(),
        );

        let report = touched.value.unwrap();
        assert_eq!(report.winner(), Some(&alice()));
        assert_eq!(touched.created, vec![bob()]);
        assert!(state.take_dirty());
        assert_eq!(state.challenges.open_count(), 0);

        let a = state.roster.get(&alice()).unwrap();
        let b = state.roster.get(&bob()).unwrap();
        assert_eq!((a.wins, a.attack, a.defense), (1, 13, 4));
        assert_eq!((b.losses, b.attack, b.defense), (1, 7, 0));
    }

    #[test]
    fn unknown_challenge_mutates_nothing() {
        let config = GameConfig::default();
        let mut state = ArenaState::default();
        state.roster.insert(alice(), Player::new());
        let before = state.roster.clone();

        let touched = ArenaEngine::new(&mut state, &config).accept_challenge(
            &ChallengeId::from("fight_ghost_0_0"),
            &bob(),
            &mut ScriptedRolls::default(),
        );

        assert!(matches!(
            touched.value,
            Err(AcceptError::Challenge(ChallengeError::ChallengeNotFound(_)))
        ));
        assert_eq!(state.roster, before);
        assert!(!state.is_dirty());
    }

    #[test]
    fn self_challenge_keeps_challenge_open() {
        let config = GameConfig::default();
        let mut state = ArenaState::default();
        let (id, _) = ArenaEngine::new(&mut state, &config)
            .open_challenge(&alice(), NOW)
            .value;

        let touched = ArenaEngine::new(&mut state, &config).accept_challenge(
            &id,
            &alice(),
            &mut ScriptedRolls::default(),
        );

        assert_eq!(touched.value.unwrap_err().error_code(), "CHALLENGE_SELF");
        assert_eq!(state.challenges.open_count(), 1);
    }

    #[test]
    fn ineligible_respondent_leaves_challenge_open() {
        let config = GameConfig::default();
        let mut state = ArenaState::default();
        state.roster.insert(bob(), Player::new().with_stats(2, 1));
        let (id, _) = ArenaEngine::new(&mut state, &config)
            .open_challenge(&alice(), NOW)
            .value;

        let touched = ArenaEngine::new(&mut state, &config).accept_challenge(
            &id,
            &bob(),
            &mut ScriptedRolls::default(),
        );

        assert!(matches!(
            touched.value,
            Err(AcceptError::Combat(crate::combat::CombatError::IneligibleCombatant {
                side: CombatSide::Defender,
                ..
            }))
        ));
        assert_eq!(state.challenges.open_count(), 1);
        assert_eq!(state.roster.get(&bob()).unwrap().attack, 2);
        assert_eq!(state.roster.get(&alice()).unwrap(), &Player::new());
    }

    #[test]
    fn admin_overrides_mark_dirty() {
        let config = GameConfig::default();
        let mut state = ArenaState::default();
        let mut engine = ArenaEngine::new(&mut state, &config);

        assert_eq!(engine.set_stats(&alice(), 15, 3).attack, 15);
        assert_eq!(engine.reset_player(&alice()), Player::new());
        assert_eq!(engine.reset_all(), 1);
        engine.cache_display_name(&alice(), "Alice").unwrap();
        assert!(engine.cache_display_name(&bob(), "Bob").is_err());

        assert!(state.take_dirty());
        assert_eq!(state.roster.get(&alice()).unwrap().name.as_deref(), Some("Alice"));
    }
}
