//! Melee resolution. One call is one round: the player strikes, and a
//! surviving monster strikes back. Damage equals the attacker's attack
//! power; there is no randomness here, only in the loot that follows.

use super::errors::GameError;
use super::monster::Monster;
use super::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatResult {
    /// Monster dropped to zero; its reward has been credited.
    Victory { experience: u32 },
    /// Player dropped to zero.
    Defeat,
    /// Both still standing.
    Ongoing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundReport {
    pub player_hit: u32,
    /// `None` when the monster died before it could retaliate.
    pub monster_hit: Option<u32>,
    pub result: CombatResult,
}

pub fn resolve_round(player: &mut Player, monster: &mut Monster) -> Result<RoundReport, GameError> {
    if !player.is_alive() {
        return Err(GameError::InvalidState(
            "player is already defeated".to_string(),
        ));
    }
    if !monster.is_alive() {
        return Err(GameError::InvalidState(format!(
            "{} is already defeated",
            monster.name
        )));
    }

    let player_hit = player.attack_power;
    monster.health = monster.health.damaged(player_hit);
    if !monster.is_alive() {
        player.gain_experience(monster.experience_reward);
        return Ok(RoundReport {
            player_hit,
            monster_hit: None,
            result: CombatResult::Victory {
                experience: monster.experience_reward,
            },
        });
    }

    let monster_hit = monster.attack_power;
    player.health = player.health.damaged(monster_hit);
    let result = if player.is_alive() {
        CombatResult::Ongoing
    } else {
        CombatResult::Defeat
    };
    Ok(RoundReport {
        player_hit,
        monster_hit: Some(monster_hit),
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::monster::{create_goblin, Monster, MonsterKind};

    fn player(hp: u32, atk: u32) -> Player {
        Player::new(hp, atk, "arena")
    }

    #[test]
    fn three_rounds_kill_a_thirty_hp_monster() {
        let mut p = player(100, 10);
        let mut m = Monster::new(MonsterKind::Goblin, "Goblin", 30, 10, 15);

        let r1 = resolve_round(&mut p, &mut m).unwrap();
        assert_eq!(r1.result, CombatResult::Ongoing);
        assert_eq!(r1.monster_hit, Some(10));
        let r2 = resolve_round(&mut p, &mut m).unwrap();
        assert_eq!(r2.result, CombatResult::Ongoing);
        let r3 = resolve_round(&mut p, &mut m).unwrap();
        assert_eq!(r3.result, CombatResult::Victory { experience: 15 });
        assert_eq!(r3.monster_hit, None);

        assert_eq!(m.health.current(), 0);
        // two retaliations, none on the killing round
        assert_eq!(p.health.current(), 80);
        assert_eq!(p.experience, 15);
    }

    #[test]
    fn lethal_blow_gets_no_retaliation() {
        let mut p = player(100, 50);
        let mut m = Monster::new(MonsterKind::Orc, "Brute", 30, 30, 5);
        let r = resolve_round(&mut p, &mut m).unwrap();
        assert_eq!(r.result, CombatResult::Victory { experience: 5 });
        assert_eq!(p.health.current(), 100);
    }

    #[test]
    fn player_can_die() {
        let mut p = player(15, 1);
        let mut m = create_goblin();
        assert_eq!(resolve_round(&mut p, &mut m).unwrap().result, CombatResult::Ongoing);
        let r = resolve_round(&mut p, &mut m).unwrap();
        assert_eq!(r.result, CombatResult::Defeat);
        assert_eq!(p.health.current(), 0);
        assert_eq!(p.experience, 0);
    }

    #[test]
    fn defeated_combatants_are_rejected() {
        let mut p = player(10, 10);
        let mut m = create_goblin();
        m.health = m.health.damaged(1000);
        let err = resolve_round(&mut p, &mut m).unwrap_err();
        assert!(matches!(err, GameError::InvalidState(_)));
        assert_eq!(p.health.current(), 10);

        let mut dead = player(10, 10);
        dead.health = dead.health.damaged(10);
        let mut fresh = create_goblin();
        assert!(matches!(
            resolve_round(&mut dead, &mut fresh),
            Err(GameError::InvalidState(_))
        ));
        assert!(fresh.health.is_full());
    }
}
