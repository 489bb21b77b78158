//! Civilization cards: purchase cost, immediate effect, end-game scoring.
//!
//! A card costs `cost` resource units of freely chosen non-food types.
//! Buying it triggers the immediate effect once and adds the end-game
//! scoring entry to the buyer's collection.

use super::resource::Resource;

/// The immediate effect a card applies when purchased.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardEffect {
    /// Gain a fixed amount of one resource.
    AddResource { resource: Resource, amount: u8 },
    /// Roll one die per player; every player picks one and takes its reward.
    DiceRoll,
    /// Roll two dice and gather `resource` with the usual tool decision.
    ResourcesWithDice { resource: Resource },
    /// Gain victory points immediately.
    AddVp(u8),
    /// Upgrade a persistent tool slot.
    AddTool,
    /// Gain one wheat.
    AddWheat,
    /// Draw the top card of the deck and keep its scoring entry.
    DrawCard,
    /// Gain a one-use tool of the given value.
    OneUseTool(u8),
    /// Pick any two resources (one unit each).
    AnyTwoResources,
}

impl CardEffect {
    /// Numeric effect identifier for the observation encoding.
    pub fn code(self) -> u8 {
        match self {
            CardEffect::AddResource { .. } => 1,
            CardEffect::DiceRoll => 2,
            CardEffect::ResourcesWithDice { .. } => 3,
            CardEffect::AddVp(_) => 4,
            CardEffect::AddTool => 5,
            CardEffect::AddWheat => 6,
            CardEffect::DrawCard => 7,
            CardEffect::OneUseTool(_) => 8,
            CardEffect::AnyTwoResources => 9,
        }
    }

    /// Effect parameters `(a, b)` for the observation encoding; unused
    /// parameters are zero.
    pub fn params(self) -> (u8, u8) {
        match self {
            CardEffect::AddResource { resource, amount } => (resource as u8, amount),
            CardEffect::ResourcesWithDice { resource } => (resource as u8, 0),
            CardEffect::AddVp(vp) => (vp, 0),
            CardEffect::OneUseTool(value) => (value, 0),
            _ => (0, 0),
        }
    }
}

/// End-game scoring granted by a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardScoring {
    /// A painting symbol; sets of distinct symbols score size squared.
    Painting(u8),
    /// A stat multiplier: `kind` 1 = tool value, 2 = buildings, 3 = workers,
    /// 4 = wheat.
    Multiplier { kind: u8, amount: u8 },
}

/// A purchasable civilization card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub cost: u8,
    pub effect: CardEffect,
    pub scoring: CardScoring,
}

impl Card {
    pub fn new(cost: u8, effect: CardEffect, scoring: CardScoring) -> Self {
        Card { cost, effect, scoring }
    }

    /// A card is affordable when total non-food resources cover its cost.
    /// The payment's exact composition is chosen later via ResourceSpend.
    pub fn is_affordable(&self, spendable_total: u32) -> bool {
        spendable_total >= self.cost as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affordability_counts_totals() {
        let card = Card::new(
            3,
            CardEffect::AddWheat,
            CardScoring::Painting(2),
        );
        assert!(!card.is_affordable(2));
        assert!(card.is_affordable(3));
        assert!(card.is_affordable(10));
    }

    #[test]
    fn effect_codes_are_distinct() {
        let effects = [
            CardEffect::AddResource { resource: Resource::Food, amount: 1 },
            CardEffect::DiceRoll,
            CardEffect::ResourcesWithDice { resource: Resource::Gold },
            CardEffect::AddVp(3),
            CardEffect::AddTool,
            CardEffect::AddWheat,
            CardEffect::DrawCard,
            CardEffect::OneUseTool(4),
            CardEffect::AnyTwoResources,
        ];
        let mut codes: Vec<u8> = effects.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), effects.len());
    }

    #[test]
    fn effect_params_carry_data() {
        let e = CardEffect::AddResource { resource: Resource::Stone, amount: 2 };
        assert_eq!(e.params(), (4, 2));
        assert_eq!(CardEffect::OneUseTool(3).params(), (3, 0));
        assert_eq!(CardEffect::DiceRoll.params(), (0, 0));
    }
}
