//! Text rendering for replies printed by the terminal client.

use std::fmt::Write as _;

use arena_core::{
    CombatReport, DamageRoll, GameError, GrowthResult, LeaderboardEntry, Metric, PlayerId, Trend,
};
use arena_runtime::{OpenedChallenge, PlayerProfile, RuntimeError};

pub fn cooldown(remaining_secs: u64) -> String {
    if remaining_secs == 0 {
        return "Ready to grow!".to_owned();
    }

    let hours = remaining_secs / 3600;
    let minutes = (remaining_secs % 3600) / 60;
    let seconds = remaining_secs % 60;

    if hours > 0 {
        format!("Wait {hours}h {minutes}m {seconds}s")
    } else {
        format!("Wait {minutes}m {seconds}s")
    }
}

/// Cached name, or a placeholder built from the id.
pub fn display_name(id: &PlayerId, name: Option<&str>) -> String {
    match name {
        Some(name) => name.to_owned(),
        None => format!("ID:{id}"),
    }
}

fn trend_mark(trend: Trend) -> &'static str {
    match trend {
        Trend::Surge => "🚀",
        Trend::Up => "📈",
        Trend::Flat => "➡️",
        Trend::Down => "📉",
        Trend::Crash => "💥",
    }
}

pub fn growth(result: &GrowthResult) -> String {
    format!(
        "🌱 Growth result:\n\
         ⚔ Attack: {} {:+} (now {})\n\
         🛡 Defense: {} {:+} (now {})",
        trend_mark(result.attack_trend()),
        result.attack_delta,
        result.attack,
        trend_mark(result.defense_trend()),
        result.defense_delta,
        result.defense,
    )
}

pub fn profile(profile: &PlayerProfile) -> String {
    let player = &profile.player;
    format!(
        "👤 Profile {}\n\
         ⚔ Attack: {}\n\
         🛡 Defense: {}\n\
         🏆 Wins: {}\n\
         💀 Losses: {}\n\
         📊 Winrate: {:.1}%\n\n\
         🕐 Growth: {}",
        display_name(&profile.id, player.name.as_deref()),
        player.attack,
        player.defense,
        player.wins,
        player.losses,
        player.win_rate().unwrap_or(0.0),
        cooldown(profile.cooldown_secs),
    )
}

pub fn challenge(opened: &OpenedChallenge) -> String {
    let card = &opened.attacker;
    format!(
        "⚔ {} calls for a fight!\n\
         Attack: {}, Defense: {}\n\
         Wins: {}, Losses: {}\n\
         Accept with: accept {}",
        display_name(&opened.challenge.attacker, card.name.as_deref()),
        card.attack,
        card.defense,
        card.wins,
        card.losses,
        opened.challenge.id,
    )
}

fn damage_line(roll: &DamageRoll) -> String {
    if roll.is_miss {
        return "   💨 Miss! (0 damage)".to_owned();
    }

    let mut line = format!("   💥 {} damage", roll.damage);
    if roll.is_crit {
        line.push_str(" 🔥CRIT!");
    }
    if roll.is_lucky {
        line.push_str(" ⭐LUCKY!");
    }
    line
}

/// Full combat report. Names are resolved by the caller.
pub fn combat(report: &CombatReport, attacker_name: &str, defender_name: &str) -> String {
    let mut text = String::from("⚔️ Combat result:\n\n");

    let _ = writeln!(text, "🔸 {attacker_name}:");
    let _ = writeln!(text, "{}", damage_line(&report.attacker_roll));
    let _ = writeln!(text, "🔹 {defender_name}:");
    let _ = writeln!(text, "{}", damage_line(&report.defender_roll));
    text.push('\n');

    match report.winner() {
        Some(winner) => {
            let name = if winner == &report.attacker {
                attacker_name
            } else {
                defender_name
            };
            let _ = write!(
                text,
                "🏆 Winner: {name}\n🎁 Gains: +{} attack, +{} defense",
                report.bonus.attack, report.bonus.defense
            );
        }
        None => text.push_str("🤝 Tie! Nobody gets a reward."),
    }

    text
}

fn leaderboard_title(metric: Metric) -> &'static str {
    match metric {
        Metric::Wins => "🏆 Top 10 by wins:",
        Metric::Size => "⚔🛡 Top 10 by size:",
        Metric::Winrate => "📊 Top 10 by winrate:",
    }
}

pub fn leaderboard(metric: Metric, entries: &[LeaderboardEntry]) -> String {
    let mut text = format!("{}\n\n", leaderboard_title(metric));

    if entries.is_empty() {
        text.push_str("Nobody has played yet.");
        return text;
    }

    for entry in entries {
        let _ = writeln!(
            text,
            "{}. {} - {}",
            entry.position,
            display_name(&entry.id, entry.name.as_deref()),
            entry.value
        );
    }
    let _ = write!(text, "\nNext: top {}", metric.next());

    text
}

/// Player-facing text for recoverable and validation failures.
///
/// Internal failures are not rule outcomes and yield `None`.
pub fn rejection(error: &RuntimeError) -> Option<String> {
    use arena_core::{AcceptError, ChallengeError, CombatError, CombatSide, GrowthError};

    if error.severity().is_internal() {
        return None;
    }

    let text = match error {
        RuntimeError::NotFound(_) => "Use grow first!".to_owned(),
        RuntimeError::Growth(GrowthError::CooldownActive { remaining_secs }) => {
            format!("⏰ {}", cooldown(*remaining_secs))
        }
        RuntimeError::Challenge(ChallengeError::NotOwner { .. }) => {
            "❌ Only the challenger can cancel this fight.".to_owned()
        }
        RuntimeError::Challenge(ChallengeError::ChallengeNotFound(_))
        | RuntimeError::Accept(AcceptError::Challenge(ChallengeError::ChallengeNotFound(_))) => {
            "This fight is already over!".to_owned()
        }
        RuntimeError::Challenge(ChallengeError::SelfChallenge { .. })
        | RuntimeError::Accept(AcceptError::Challenge(ChallengeError::SelfChallenge { .. })) => {
            "You cannot fight yourself! 🤪".to_owned()
        }
        RuntimeError::Accept(AcceptError::Combat(CombatError::IneligibleCombatant {
            side, ..
        })) => match side {
            CombatSide::Attacker => "Your opponent is too weak to fight!".to_owned(),
            CombatSide::Defender => "You are too weak to fight!".to_owned(),
        },
        other => other.to_string(),
    };

    Some(text)
}
