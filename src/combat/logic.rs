use super::types::Monster;
use crate::character::hero::{Hero, SpecialOutcome};
use crate::character::stats::Combatant;
use crate::core::constants::*;
use crate::core::dice::RandomSource;
use crate::core::error::GameError;
use crate::items::{Item, ItemEffect};
use tracing::{debug, info};

/// Where a battle currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleState {
    PlayerTurn,
    PlayerWon,
    PlayerFled,
    PlayerDied,
}

impl BattleState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BattleState::PlayerTurn)
    }
}

/// One player decision during a battle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    Attack,
    Special,
    UseItem(String),
    Flee,
    Inspect,
}

impl PlayerAction {
    pub fn label(&self) -> String {
        match self {
            PlayerAction::Attack => "Attack".to_string(),
            PlayerAction::Special => "Special".to_string(),
            PlayerAction::UseItem(name) => format!("Use {}", crate::items::display_name(name)),
            PlayerAction::Flee => "Flee".to_string(),
            PlayerAction::Inspect => "Inspect".to_string(),
        }
    }
}

/// Spoils handed out when the monster falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Victory {
    pub gold: i64,
    pub healed: u32,
    pub potion_found: bool,
    pub boss: bool,
}

/// Structured record of everything that happened during one player action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleEvent {
    PlayerAttack {
        damage: u32,
    },
    Special(SpecialOutcome),
    /// The monster loses its next turn.
    MonsterStunned,
    ItemUsed {
        item: String,
        effect: ItemEffect,
    },
    ItemUseFailed(GameError),
    FleeSucceeded,
    FleeFailed,
    MonsterAttack {
        damage: u32,
        elemental_bonus: u32,
    },
    MonsterSkippedTurn,
    Inspected {
        name: String,
        current_hp: u32,
        max_hp: u32,
        attack: u32,
        defense: u32,
        boss: bool,
    },
    Victory(Victory),
    PlayerDefeated,
}

impl BattleEvent {
    /// Short stable identifier, used for tallies.
    pub fn kind(&self) -> &'static str {
        match self {
            BattleEvent::PlayerAttack { .. } => "player_attack",
            BattleEvent::Special(_) => "special",
            BattleEvent::MonsterStunned => "monster_stunned",
            BattleEvent::ItemUsed { .. } => "item_used",
            BattleEvent::ItemUseFailed(_) => "item_use_failed",
            BattleEvent::FleeSucceeded => "flee_succeeded",
            BattleEvent::FleeFailed => "flee_failed",
            BattleEvent::MonsterAttack { .. } => "monster_attack",
            BattleEvent::MonsterSkippedTurn => "monster_skipped_turn",
            BattleEvent::Inspected { .. } => "inspected",
            BattleEvent::Victory(_) => "victory",
            BattleEvent::PlayerDefeated => "player_defeated",
        }
    }
}

/// One encounter between the hero and a single monster.
///
/// The battle owns the monster; the hero is borrowed for each action only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Battle {
    monster: Monster,
    state: BattleState,
    monster_stunned: bool,
}

impl Battle {
    pub fn new(monster: Monster) -> Self {
        Self {
            monster,
            state: BattleState::PlayerTurn,
            monster_stunned: false,
        }
    }

    pub fn monster(&self) -> &Monster {
        &self.monster
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn monster_stunned(&self) -> bool {
        self.monster_stunned
    }

    pub fn flee_chance(&self) -> u32 {
        if self.monster.is_boss {
            FLEE_CHANCE_BOSS
        } else {
            FLEE_CHANCE_NORMAL
        }
    }

    /// Actions the hero may pick right now. Empty once the battle is over.
    pub fn legal_actions(&self, hero: &Hero) -> Vec<PlayerAction> {
        if self.is_over() {
            return Vec::new();
        }
        let mut actions = vec![PlayerAction::Attack, PlayerAction::Special];
        actions.extend(
            hero.inventory()
                .item_names()
                .into_iter()
                .map(PlayerAction::UseItem),
        );
        actions.push(PlayerAction::Flee);
        actions.push(PlayerAction::Inspect);
        actions
    }

    /// Resolves one player action and, unless the battle ended or the action
    /// was a free inspection, the monster's reply.
    ///
    /// Errors leave hero and monster untouched.
    pub fn act(
        &mut self,
        hero: &mut Hero,
        action: &PlayerAction,
        dice: &mut impl RandomSource,
    ) -> Result<Vec<BattleEvent>, GameError> {
        if self.is_over() {
            return Err(GameError::BattleOver);
        }
        if let PlayerAction::UseItem(name) = action {
            if !hero.inventory().has_item(name) {
                return Err(GameError::ItemNotFound(name.clone()));
            }
        }

        let mut events = Vec::new();
        debug!(?action, monster = %self.monster.stats.name, "player action");

        match action {
            PlayerAction::Inspect => {
                let stats = &self.monster.stats;
                events.push(BattleEvent::Inspected {
                    name: stats.name.clone(),
                    current_hp: stats.current_hp,
                    max_hp: stats.max_hp,
                    attack: stats.attack,
                    defense: stats.defense,
                    boss: self.monster.is_boss,
                });
                return Ok(events);
            }
            PlayerAction::Attack => {
                let outcome = hero.basic_attack(&mut self.monster, dice);
                events.push(BattleEvent::PlayerAttack {
                    damage: outcome.damage,
                });
            }
            PlayerAction::Special => {
                let outcome = hero.perform_special(&mut self.monster, dice);
                events.push(BattleEvent::Special(outcome));
                if hero.can_stun() && dice.chance(WIZARD_STUN_CHANCE) {
                    self.monster_stunned = true;
                    events.push(BattleEvent::MonsterStunned);
                }
            }
            PlayerAction::UseItem(name) => match hero.use_item(name) {
                Ok(effect) => events.push(BattleEvent::ItemUsed {
                    item: name.clone(),
                    effect,
                }),
                Err(err) => {
                    debug!(%err, "item use failed");
                    events.push(BattleEvent::ItemUseFailed(err));
                }
            },
            PlayerAction::Flee => {
                if dice.chance(self.flee_chance()) {
                    self.state = BattleState::PlayerFled;
                    events.push(BattleEvent::FleeSucceeded);
                    info!(monster = %self.monster.stats.name, "hero fled");
                    return Ok(events);
                }
                events.push(BattleEvent::FleeFailed);
                self.monster_attack(hero, dice, &mut events);
                if self.is_over() {
                    return Ok(events);
                }
            }
        }

        if !self.monster.is_alive() {
            let victory = self.award_victory(hero, dice);
            events.push(BattleEvent::Victory(victory));
            return Ok(events);
        }

        if self.monster_stunned {
            self.monster_stunned = false;
            events.push(BattleEvent::MonsterSkippedTurn);
        } else {
            self.monster_attack(hero, dice, &mut events);
        }

        Ok(events)
    }

    fn monster_attack(
        &mut self,
        hero: &mut Hero,
        dice: &mut impl RandomSource,
        events: &mut Vec<BattleEvent>,
    ) {
        let outcome = self.monster.basic_attack(hero, dice);
        events.push(BattleEvent::MonsterAttack {
            damage: outcome.damage,
            elemental_bonus: outcome.elemental_bonus,
        });
        if !hero.is_alive() {
            self.state = BattleState::PlayerDied;
            events.push(BattleEvent::PlayerDefeated);
            info!(monster = %self.monster.stats.name, "hero defeated");
        }
    }

    fn award_victory(&mut self, hero: &mut Hero, dice: &mut impl RandomSource) -> Victory {
        self.state = BattleState::PlayerWon;
        let boss = self.monster.is_boss;

        let bonus = if boss {
            VICTORY_GOLD_BONUS_BOSS
        } else {
            VICTORY_GOLD_BONUS
        };
        let gold = dice.roll(VICTORY_GOLD_DIE) as i64 + bonus;
        hero.inventory_mut().add_gold(gold);

        let heal_amount = (hero.stats().max_hp / VICTORY_HEAL_DIVISOR).max(1);
        let healed = hero.heal(heal_amount);

        let potion_found = !boss && dice.chance(VICTORY_POTION_CHANCE);
        if potion_found {
            hero.inventory_mut()
                .add_item(Item::healing_potion(LOOT_POTION_STRENGTH));
        }

        info!(
            monster = %self.monster.stats.name,
            gold,
            healed,
            potion_found,
            "monster defeated"
        );
        Victory {
            gold,
            healed,
            potion_found,
            boss,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::hero::HeroClass;
    use crate::combat::types::MonsterKind;
    use crate::core::dice::ScriptedDice;

    fn battle(kind: MonsterKind) -> Battle {
        Battle::new(Monster::new(kind))
    }

    fn assert_has_event(events: &[BattleEvent], name: &str, pred: impl Fn(&BattleEvent) -> bool) {
        assert!(events.iter().any(pred), "expected {name} in {events:?}");
    }

    #[test]
    fn test_knight_vs_demobat_golden_path() {
        let mut knight = Hero::new(HeroClass::Knight);
        let mut fight = battle(MonsterKind::Demobat);
        let mut dice = ScriptedDice::new([5, 10, 50, 1, 7, 30]);

        // Turn 1: (5 + 22 - 4) - 4 = 19 to the bat; (10 + 12 - 10) - 10 = 2 back.
        let events = fight.act(&mut knight, &PlayerAction::Attack, &mut dice).unwrap();
        assert_eq!(
            events,
            vec![
                BattleEvent::PlayerAttack { damage: 19 },
                BattleEvent::MonsterAttack {
                    damage: 2,
                    elemental_bonus: 0
                },
            ]
        );
        assert_eq!(fight.monster().stats.current_hp, 6);
        assert_eq!(knight.stats().current_hp, 88);
        assert_eq!(fight.state(), BattleState::PlayerTurn);

        // Turn 2: the bat only has 6 HP left.
        let events = fight.act(&mut knight, &PlayerAction::Attack, &mut dice).unwrap();
        assert_eq!(
            events,
            vec![
                BattleEvent::PlayerAttack { damage: 6 },
                BattleEvent::Victory(Victory {
                    gold: 17,
                    healed: 2,
                    potion_found: true,
                    boss: false,
                }),
            ]
        );
        assert_eq!(fight.state(), BattleState::PlayerWon);
        assert_eq!(knight.stats().current_hp, 90);
        assert_eq!(knight.gold(), 57);
        assert_eq!(knight.inventory().count(HEALING_POTION), 2);
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn test_act_after_battle_over_is_rejected() {
        let mut knight = Hero::new(HeroClass::Knight);
        let mut fight = battle(MonsterKind::Demobat);
        let mut dice = ScriptedDice::new([70]);
        fight.act(&mut knight, &PlayerAction::Flee, &mut dice).unwrap();
        assert_eq!(fight.state(), BattleState::PlayerFled);
        assert_eq!(
            fight.act(&mut knight, &PlayerAction::Attack, &mut dice),
            Err(GameError::BattleOver)
        );
        assert!(fight.legal_actions(&knight).is_empty());
    }

    #[test]
    fn test_failed_flee_gives_free_attack_then_normal_turn() {
        let mut knight = Hero::new(HeroClass::Knight);
        let mut fight = battle(MonsterKind::Demodog);
        // flee roll 71 > 70, free attack (10, no elemental), regular attack (10, no elemental)
        let mut dice = ScriptedDice::new([71, 10, 90, 10, 90]);

        let events = fight.act(&mut knight, &PlayerAction::Flee, &mut dice).unwrap();
        assert_eq!(events[0], BattleEvent::FleeFailed);
        let hits = events
            .iter()
            .filter(|e| matches!(e, BattleEvent::MonsterAttack { .. }))
            .count();
        assert_eq!(hits, 2);
        // (10 + 16 - 10) - 10 = 6 per hit
        assert_eq!(knight.stats().current_hp, 78);
        assert_eq!(fight.state(), BattleState::PlayerTurn);
    }

    #[test]
    fn test_boss_is_harder_to_flee() {
        let mut knight = Hero::new(HeroClass::Knight);
        let mut fight = Battle::new(Monster::boss());
        assert_eq!(fight.flee_chance(), 20);
        let mut dice = ScriptedDice::new([21, 1, 99, 1, 99]);
        let events = fight.act(&mut knight, &PlayerAction::Flee, &mut dice).unwrap();
        assert_eq!(events[0], BattleEvent::FleeFailed);

        let mut dice = ScriptedDice::new([20]);
        let events = fight.act(&mut knight, &PlayerAction::Flee, &mut dice).unwrap();
        assert_eq!(events, vec![BattleEvent::FleeSucceeded]);
    }

    #[test]
    fn test_wizard_stun_skips_exactly_one_monster_turn() {
        let mut wizard = Hero::new(HeroClass::Wizard);
        let mut fight = battle(MonsterKind::FlayedOne);
        // special d20 = 1, stun roll 25 -> stunned
        let mut dice = ScriptedDice::new([1, 25]);

        let events = fight.act(&mut wizard, &PlayerAction::Special, &mut dice).unwrap();
        assert_has_event(&events, "MonsterStunned", |e| *e == BattleEvent::MonsterStunned);
        assert_eq!(events.last(), Some(&BattleEvent::MonsterSkippedTurn));
        assert!(!fight.monster_stunned());
        assert_eq!(wizard.stats().current_hp, 120);

        // Next turn the monster swings again.
        let mut dice = ScriptedDice::new([1, 20, 100]);
        let events = fight.act(&mut wizard, &PlayerAction::Attack, &mut dice).unwrap();
        assert_has_event(&events, "MonsterAttack", |e| {
            matches!(e, BattleEvent::MonsterAttack { .. })
        });
    }

    #[test]
    fn test_non_wizard_special_never_rolls_stun() {
        let mut knight = Hero::new(HeroClass::Knight);
        let mut fight = battle(MonsterKind::FlayedOne);
        // holy strike d20 + crit roll, then monster d20 + elemental
        let mut dice = ScriptedDice::new([1, 100, 1, 100]);
        fight.act(&mut knight, &PlayerAction::Special, &mut dice).unwrap();
        assert_eq!(dice.requested(), &[20, 100, 20, 100]);
        assert!(!fight.monster_stunned());
    }

    #[test]
    fn test_sorcerer_fizzle_still_consumes_turn() {
        let mut sorcerer = Hero::new(HeroClass::Sorcerer);
        sorcerer.spend_mana(90);
        let mut fight = battle(MonsterKind::Demobat);
        let mut dice = ScriptedDice::new([1, 100]);

        let events = fight.act(&mut sorcerer, &PlayerAction::Special, &mut dice).unwrap();
        assert_eq!(
            events[0],
            BattleEvent::Special(SpecialOutcome::NotEnoughMana { have: 10, need: 30 })
        );
        assert_eq!(fight.monster().stats.current_hp, 25);
        assert_eq!(sorcerer.mana().current, 10);
        assert_has_event(&events, "MonsterAttack", |e| {
            matches!(e, BattleEvent::MonsterAttack { .. })
        });
    }

    #[test]
    fn test_use_potion_heals_and_consumes_turn() {
        let mut knight = Hero::new(HeroClass::Knight);
        knight.take_damage(50); // 40 lost
        let mut fight = battle(MonsterKind::Demobat);
        let mut dice = ScriptedDice::new([1, 100]);

        let action = PlayerAction::UseItem(HEALING_POTION.to_string());
        let events = fight.act(&mut knight, &action, &mut dice).unwrap();
        assert_eq!(
            events[0],
            BattleEvent::ItemUsed {
                item: HEALING_POTION.to_string(),
                effect: ItemEffect::Healed { restored: 25 },
            }
        );
        assert!(!knight.inventory().has_item(HEALING_POTION));
        // bat: (1 + 12 - 10) = 3 raw, fully absorbed by defense
        assert_eq!(knight.stats().current_hp, 75);
    }

    #[test]
    fn test_unusable_item_fails_but_consumes_turn() {
        let mut knight = Hero::new(HeroClass::Knight);
        knight.inventory_mut().add_item(Item::cursed_sword());
        let mut fight = battle(MonsterKind::Demobat);
        let mut dice = ScriptedDice::new([1, 100]);

        let action = PlayerAction::UseItem(CURSED_SWORD.to_string());
        let events = fight.act(&mut knight, &action, &mut dice).unwrap();
        assert!(matches!(
            events[0],
            BattleEvent::ItemUseFailed(GameError::ItemNotUsable { .. })
        ));
        assert!(knight.inventory().has_item(CURSED_SWORD));
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn test_missing_item_is_rejected_without_side_effects() {
        let mut knight = Hero::new(HeroClass::Knight);
        let mut fight = battle(MonsterKind::Demobat);
        let before = (knight.clone(), fight.clone());
        let mut dice = ScriptedDice::new([]);

        let action = PlayerAction::UseItem(MANA_POTION.to_string());
        assert_eq!(
            fight.act(&mut knight, &action, &mut dice),
            Err(GameError::ItemNotFound(MANA_POTION.to_string()))
        );
        assert_eq!((knight, fight), before);
    }

    #[test]
    fn test_inspect_is_free() {
        let mut knight = Hero::new(HeroClass::Knight);
        let mut fight = Battle::new(Monster::boss());
        let mut dice = ScriptedDice::new([]);

        let events = fight.act(&mut knight, &PlayerAction::Inspect, &mut dice).unwrap();
        assert_eq!(
            events,
            vec![BattleEvent::Inspected {
                name: "Mind Flayer".to_string(),
                current_hp: 250,
                max_hp: 250,
                attack: 35,
                defense: 18,
                boss: true,
            }]
        );
        assert_eq!(fight.state(), BattleState::PlayerTurn);
        assert_eq!(knight.stats().current_hp, 90);
    }

    #[test]
    fn test_hero_death_ends_battle() {
        let mut sorcerer = Hero::new(HeroClass::Sorcerer);
        sorcerer.stats_mut().current_hp = 1;
        let mut fight = Battle::new(Monster::boss());
        // hero misses for 0 (1 + 25 - 18 = 8, -18 = 0), boss hits hard
        let mut dice = ScriptedDice::new([1, 20, 100]);

        let events = fight.act(&mut sorcerer, &PlayerAction::Attack, &mut dice).unwrap();
        assert_eq!(events.last(), Some(&BattleEvent::PlayerDefeated));
        assert_eq!(fight.state(), BattleState::PlayerDied);
        assert_eq!(sorcerer.stats().current_hp, 0);
    }

    #[test]
    fn test_boss_victory_awards_bonus_without_potion_roll() {
        let mut bard = Hero::new(HeroClass::Bard);
        let mut boss = Monster::boss();
        boss.stats.current_hp = 1;
        let mut fight = Battle::new(boss);
        let mut dice = ScriptedDice::new([20, 5]);

        let events = fight.act(&mut bard, &PlayerAction::Attack, &mut dice).unwrap();
        assert_eq!(
            events.last(),
            Some(&BattleEvent::Victory(Victory {
                gold: 105,
                healed: 0,
                potion_found: false,
                boss: true,
            }))
        );
        assert_eq!(bard.gold(), 115);
        assert_eq!(dice.requested(), &[20, 20]);
    }

    #[test]
    fn test_legal_actions_list_each_item_once() {
        let wizard = Hero::new(HeroClass::Wizard);
        let fight = battle(MonsterKind::Demobat);
        assert_eq!(
            fight.legal_actions(&wizard),
            vec![
                PlayerAction::Attack,
                PlayerAction::Special,
                PlayerAction::UseItem(HEALING_POTION.to_string()),
                PlayerAction::Flee,
                PlayerAction::Inspect,
            ]
        );
    }
}
