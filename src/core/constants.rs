// Campaign pacing
pub const BOSS_TURN_THRESHOLD: u32 = 20;

// Event dispatch bands on a d100 (inclusive upper bounds)
pub const EVENT_COMBAT_MAX: u32 = 40;
pub const EVENT_TREASURE_MAX: u32 = 65;
pub const EVENT_HEALING_MAX: u32 = 80;
pub const EVENT_TRAP_MAX: u32 = 90;

// Monster spawn bands on a d100 (inclusive upper bounds); above the last is an early boss
pub const SPAWN_WEAKEST_MAX: u32 = 40;
pub const SPAWN_SECOND_MAX: u32 = 70;
pub const SPAWN_THIRD_MAX: u32 = 95;

// Attack dice
pub const ATTACK_DIE: u32 = 20;
pub const PERCENT_DIE: u32 = 100;

// Hero resources
pub const STARTING_MANA: u32 = 100;
pub const MAX_RAGE: u32 = 100;

// Special abilities
pub const WIZARD_STUN_CHANCE: u32 = 25;
pub const SORCERER_MANA_COST: u32 = 30;
pub const SORCERER_ELEMENTAL_BONUS: u32 = 10;
pub const KNIGHT_CRIT_CHANCE: u32 = 25;
pub const BARD_HP_PER_INSPIRATION: u32 = 10;
pub const BARD_RAGE_GAIN: u32 = 15;

// Monster attacks
pub const MONSTER_ELEMENTAL_CHANCE: u32 = 30;
pub const MONSTER_ELEMENTAL_DAMAGE: u32 = 15;

// Fleeing
pub const FLEE_CHANCE_NORMAL: u32 = 70;
pub const FLEE_CHANCE_BOSS: u32 = 20;

// Victory rewards
pub const VICTORY_GOLD_DIE: u32 = 20;
pub const VICTORY_GOLD_BONUS: i64 = 10;
pub const VICTORY_GOLD_BONUS_BOSS: i64 = 100;
pub const VICTORY_HEAL_DIVISOR: u32 = 5;
pub const VICTORY_POTION_CHANCE: u32 = 40;

// Items
pub const HEALING_POTION: &str = "healing_potion";
pub const MANA_POTION: &str = "mana_potion";
pub const CURSED_SWORD: &str = "cursed_sword_plus5";
pub const LOOT_POTION_STRENGTH: u32 = 30;
pub const CURSED_SWORD_BONUS: u32 = 5;

// Treasure rooms
pub const TREASURE_GOLD_DIE: u32 = 30;
pub const TREASURE_GOLD_BASE: i64 = 20;
pub const TREASURE_HEALING_CHANCE: u32 = 50;
pub const TREASURE_MANA_CHANCE: u32 = 20;

// Healing fountains
pub const FOUNTAIN_HEAL_PERCENT: u32 = 40;
pub const FOUNTAIN_HEAL_DIE: u32 = 10;
pub const FOUNTAIN_MANA: u32 = 20;

// Traps: d20 severity, then damage dice
pub const TRAP_SEVERITY_DIE: u32 = 20;
pub const TRAP_DODGE_MAX: u32 = 5;
pub const TRAP_LIGHT_MAX: u32 = 15;
pub const TRAP_LIGHT_DIE: u32 = 10;
pub const TRAP_LIGHT_BASE: u32 = 5;
pub const TRAP_HEAVY_DIE: u32 = 20;
pub const TRAP_HEAVY_BASE: u32 = 15;

// Narrative vignettes
pub const VIGNETTE_COUNT: u32 = 4;
pub const TRAVELER_REWARD_GOLD: i64 = 25;
pub const TRAVELER_REFUSAL_PENALTY: i64 = 10;
pub const WOLF_REWARD_GOLD: i64 = 15;
pub const SHRINE_COST: i64 = 10;
pub const SHRINE_HEAL: u32 = 20;
pub const SHRINE_MANA: u32 = 20;

// Presentation
pub const NARRATION_LOG_CAPACITY: usize = 200;
