use std::sync::Arc;

use arena_core::{
    AcceptError, ChallengeError, ChallengeId, CombatError, CombatSide, GrowthError, Metric,
    MetricValue, PcgRng, Player, PlayerId, RngSource, ScriptedRolls,
};
use arena_runtime::{
    Arena, ArenaConfig, ArenaEvent, ChallengeEvent, CloseReason, ManualClock, RosterEvent,
    RuntimeError, Topic,
};

const NOW: i64 = 1_700_000_000;

async fn start(clock: Arc<ManualClock>, rng: impl RngSource + Send + 'static) -> Arena {
    Arena::builder()
        .clock(clock)
        .rng(rng)
        .build()
        .await
        .expect("arena should start")
}

fn id(raw: &str) -> PlayerId {
    PlayerId::from(raw)
}

#[tokio::test]
async fn scripted_growth_applies_deltas_and_starts_cooldown() {
    let clock = Arc::new(ManualClock::new(NOW));
    let arena = start(clock.clone(), ScriptedRolls::ints([5, 3])).await;
    let handle = arena.handle();

    let result = handle.grow(id("alice")).await.unwrap();
    assert_eq!((result.attack, result.defense), (15, 5));
    assert_eq!(result.grown_at, NOW);

    let profile = handle.profile(id("alice")).await.unwrap();
    assert_eq!(profile.player.last_grow, NOW);
    assert_eq!(profile.cooldown_secs, 7_200);
}

#[tokio::test]
async fn cooldown_gates_growth_until_elapsed() {
    let clock = Arc::new(ManualClock::new(NOW));
    let arena = start(clock.clone(), PcgRng::new(11)).await;
    let handle = arena.handle();

    handle.grow(id("alice")).await.unwrap();

    clock.advance(7_199);
    let err = handle.grow(id("alice")).await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Growth(GrowthError::CooldownActive { remaining_secs: 1 })
    ));

    clock.advance(1);
    let result = handle.grow(id("alice")).await.unwrap();
    assert!((-2..=13).contains(&result.attack_delta));
    assert!((-2..=5).contains(&result.defense_delta));
}

#[tokio::test]
async fn accepted_challenge_transfers_bonus_to_winner() {
    let clock = Arc::new(ManualClock::new(NOW));
    // A deals 8, B deals 5, bonus 3/2
    let rolls = ScriptedRolls::ints([3, 2])
        .then_floats([0.9, 0.5, 0.99, 0.99, 0.99])
        .then_floats([0.6, 0.5, 0.99, 0.99, 0.99]);
    let arena = start(clock, rolls).await;
    let handle = arena.handle();
    let mut challenges = handle.subscribe(Topic::Challenge);

    let opened = handle.open_challenge(id("a")).await.unwrap();
    assert_eq!(opened.attacker, Player::new());

    let report = handle
        .accept_challenge(opened.challenge.id.clone(), id("b"))
        .await
        .unwrap();

    assert_eq!(report.winner(), Some(&id("a")));
    let a = handle.player(id("a")).await.unwrap();
    let b = handle.player(id("b")).await.unwrap();
    assert_eq!((a.wins, a.attack, a.defense), (1, 13, 4));
    assert_eq!((b.losses, b.attack, b.defense), (1, 7, 0));

    assert!(matches!(
        challenges.recv().await.unwrap(),
        ArenaEvent::Challenge(ChallengeEvent::ChallengeOpened { .. })
    ));
    assert_eq!(
        challenges.recv().await.unwrap(),
        ArenaEvent::Challenge(ChallengeEvent::ChallengeClosed {
            id: opened.challenge.id,
            reason: CloseReason::Accepted,
        })
    );
}

#[tokio::test]
async fn concurrent_accepts_resolve_exactly_once() {
    let clock = Arc::new(ManualClock::new(NOW));
    let arena = start(clock, PcgRng::new(3)).await;
    let handle = arena.handle();

    let challenge = handle.open_challenge(id("a")).await.unwrap().challenge;

    let first = tokio::spawn({
        let handle = handle.clone();
        let challenge_id = challenge.id.clone();
        async move { handle.accept_challenge(challenge_id, id("b")).await }
    });
    let second = tokio::spawn({
        let handle = handle.clone();
        let challenge_id = challenge.id.clone();
        async move { handle.accept_challenge(challenge_id, id("c")).await }
    });

    let results = [first.await.unwrap(), second.await.unwrap()];
    let successes = results.iter().filter(|result| result.is_ok()).count();
    assert_eq!(successes, 1);
    assert!(results.iter().any(|result| matches!(
        result,
        Err(RuntimeError::Accept(AcceptError::Challenge(
            ChallengeError::ChallengeNotFound(_)
        )))
    )));

    let a = handle.player(id("a")).await.unwrap();
    assert!(a.games() <= 1);
    assert!(handle.open_challenges().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_challenge_mutates_nothing() {
    let clock = Arc::new(ManualClock::new(NOW));
    let arena = start(clock, ScriptedRolls::default()).await;
    let handle = arena.handle();

    handle.profile(id("b")).await.unwrap();
    let before = handle.leaderboard(Default::default()).await.unwrap();

    let err = handle
        .accept_challenge(ChallengeId::from("fight_ghost_0_0"), id("b"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RuntimeError::Accept(AcceptError::Challenge(ChallengeError::ChallengeNotFound(_)))
    ));
    assert_eq!(handle.leaderboard(Default::default()).await.unwrap(), before);
    assert_eq!(handle.player(id("b")).await.unwrap(), Player::new());
}

#[tokio::test]
async fn ineligible_respondent_keeps_challenge_open() {
    let clock = Arc::new(ManualClock::new(NOW));
    let arena = start(clock, ScriptedRolls::default()).await;
    let handle = arena.handle();

    handle.set_stats(id("weak"), 2, 1).await.unwrap();
    let challenge = handle.open_challenge(id("a")).await.unwrap().challenge;

    let err = handle
        .accept_challenge(challenge.id.clone(), id("weak"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RuntimeError::Accept(AcceptError::Combat(CombatError::IneligibleCombatant {
            side: CombatSide::Defender,
            attack: 2,
            defense: 1,
        }))
    ));
    assert_eq!(handle.open_challenges().await.unwrap(), vec![challenge]);
}

#[tokio::test]
async fn self_accept_and_foreign_cancel_are_rejected() {
    let clock = Arc::new(ManualClock::new(NOW));
    let arena = start(clock, ScriptedRolls::default()).await;
    let handle = arena.handle();

    let challenge = handle.open_challenge(id("a")).await.unwrap().challenge;

    let err = handle
        .accept_challenge(challenge.id.clone(), id("a"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Accept(AcceptError::Challenge(ChallengeError::SelfChallenge { .. }))
    ));

    let err = handle
        .cancel_challenge(challenge.id.clone(), id("b"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Challenge(ChallengeError::NotOwner { .. })
    ));

    let cancelled = handle
        .cancel_challenge(challenge.id.clone(), id("a"))
        .await
        .unwrap();
    assert_eq!(cancelled.id, challenge.id);
    assert!(handle.open_challenges().await.unwrap().is_empty());
}

#[tokio::test]
async fn challenges_expire_only_with_ttl() {
    let clock = Arc::new(ManualClock::new(NOW));
    let config = ArenaConfig {
        challenge_ttl_secs: Some(60),
        ..ArenaConfig::default()
    };
    let arena = Arena::builder()
        .config(config)
        .clock(clock.clone())
        .rng(ScriptedRolls::default())
        .build()
        .await
        .unwrap();
    let handle = arena.handle();
    let mut challenges = handle.subscribe(Topic::Challenge);

    let challenge = handle.open_challenge(id("a")).await.unwrap().challenge;
    clock.advance(61);

    let err = handle
        .accept_challenge(challenge.id.clone(), id("b"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Accept(AcceptError::Challenge(ChallengeError::ChallengeNotFound(_)))
    ));

    challenges.recv().await.unwrap();
    assert_eq!(
        challenges.recv().await.unwrap(),
        ArenaEvent::Challenge(ChallengeEvent::ChallengeClosed {
            id: challenge.id,
            reason: CloseReason::Expired,
        })
    );
}

#[tokio::test]
async fn first_contact_publishes_player_created() {
    let clock = Arc::new(ManualClock::new(NOW));
    let arena = start(clock, ScriptedRolls::default()).await;
    let handle = arena.handle();
    let mut roster = handle.subscribe(Topic::Roster);

    let profile = handle.profile(id("newcomer")).await.unwrap();
    assert_eq!(profile.player, Player::new());
    assert_eq!(profile.cooldown_secs, 0);

    assert_eq!(
        roster.recv().await.unwrap(),
        ArenaEvent::Roster(RosterEvent::PlayerCreated { id: id("newcomer") })
    );

    let err = handle.player(id("stranger")).await.unwrap_err();
    assert!(matches!(err, RuntimeError::NotFound(_)));
}

#[tokio::test]
async fn caching_a_name_creates_the_record() {
    let clock = Arc::new(ManualClock::new(NOW));
    let arena = start(clock, ScriptedRolls::default()).await;
    let handle = arena.handle();
    let mut roster = handle.subscribe(Topic::Roster);

    handle
        .cache_name(id("quiet"), "Quiet One".to_owned())
        .await
        .unwrap();

    assert_eq!(
        roster.recv().await.unwrap(),
        ArenaEvent::Roster(RosterEvent::PlayerCreated { id: id("quiet") })
    );
    let player = handle.player(id("quiet")).await.unwrap();
    assert_eq!(player.name.as_deref(), Some("Quiet One"));
    assert_eq!(player.games(), 0);
}

#[tokio::test]
async fn admin_commands_reset_and_override() {
    let clock = Arc::new(ManualClock::new(NOW));
    let arena = start(clock, ScriptedRolls::ints([13, 5])).await;
    let handle = arena.handle();

    handle.grow(id("a")).await.unwrap();
    let overridden = handle.set_stats(id("b"), 15, 3).await.unwrap();
    assert_eq!((overridden.attack, overridden.defense), (15, 3));

    assert_eq!(handle.reset_player(id("b")).await.unwrap(), Player::new());
    assert_eq!(handle.reset_all().await.unwrap(), 2);
    assert_eq!(handle.player(id("a")).await.unwrap(), Player::new());

    drop(handle);
    arena.shutdown().await.unwrap();
}

#[tokio::test]
async fn extreme_admin_stats_keep_the_worker_alive() {
    let clock = Arc::new(ManualClock::new(NOW));
    let arena = start(clock, PcgRng::new(21)).await;
    let handle = arena.handle();

    handle.set_stats(id("big"), i64::MAX, 5).await.unwrap();
    handle.profile(id("small")).await.unwrap();

    let board = handle.leaderboard(Metric::Size).await.unwrap();
    assert_eq!(board[0].id, id("big"));
    assert_eq!(
        board[0].value,
        MetricValue::Size {
            attack: i64::MAX,
            defense: 5
        }
    );

    let grown = handle.grow(id("big")).await.unwrap();
    assert!(grown.attack >= i64::MAX - 2);

    let opened = handle.open_challenge(id("big")).await.unwrap();
    let report = handle
        .accept_challenge(opened.challenge.id, id("small"))
        .await
        .unwrap();
    assert!(report.attacker_roll.is_miss || report.attacker_roll.damage > 0);

    let profile = handle.profile(id("small")).await.unwrap();
    assert_eq!(profile.player.games(), if report.is_tie() { 0 } else { 1 });

    drop(handle);
    arena.shutdown().await.unwrap();
}
