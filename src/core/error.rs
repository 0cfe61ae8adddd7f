use thiserror::Error;

/// Every recoverable failure the game core can report.
///
/// None of these are fatal: the presentation layer shows the message and asks
/// for the next decision.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("You don't have '{0}'.")]
    ItemNotFound(String),

    #[error("Can't use '{name}': {reason}")]
    ItemNotUsable { name: String, reason: String },

    #[error("Not enough {resource}! ({have}/{need})")]
    InsufficientResource {
        resource: &'static str,
        have: u32,
        need: u32,
    },

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("The battle is already over.")]
    BattleOver,

    #[error("The campaign is over.")]
    CampaignOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_item() {
        let err = GameError::ItemNotFound("healing_potion".to_string());
        assert_eq!(err.to_string(), "You don't have 'healing_potion'.");

        let err = GameError::ItemNotUsable {
            name: "cursed_sword_plus5".to_string(),
            reason: "it can't be used right now".to_string(),
        };
        assert!(err.to_string().contains("cursed_sword_plus5"));
    }

    #[test]
    fn test_insufficient_resource_message() {
        let err = GameError::InsufficientResource {
            resource: "mana",
            have: 10,
            need: 30,
        };
        assert_eq!(err.to_string(), "Not enough mana! (10/30)");
    }
}
