//! Resource definitions for the Stone Age board.
//!
//! The five resource kinds keep the board game's numeric encoding (2..6)
//! because that number doubles as the dice divisor when gathering: wood
//! costs a dice sum of 3 per unit, gold a dice sum of 6 per unit.

/// The number of resource kinds.
pub const RESOURCE_COUNT: usize = 5;

/// The number of spendable (non-food) resource kinds.
pub const SPEND_RESOURCE_COUNT: usize = 4;

/// A resource kind.
///
/// Discriminants match the board game's numeric encoding; `#[repr(u8)]`
/// keeps them usable as dice divisors via [`Resource::divisor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Resource {
    Food = 2,
    Wood = 3,
    Stone = 4,
    Clay = 5,
    Gold = 6,
}

/// All resource kinds in encoding order.
pub const ALL_RESOURCES: [Resource; RESOURCE_COUNT] = [
    Resource::Food,
    Resource::Wood,
    Resource::Stone,
    Resource::Clay,
    Resource::Gold,
];

/// The four resources that can be spent on cards and buildings.
/// Food is never accepted as payment.
pub const SPEND_RESOURCES: [Resource; SPEND_RESOURCE_COUNT] = [
    Resource::Wood,
    Resource::Stone,
    Resource::Clay,
    Resource::Gold,
];

impl Resource {
    /// Returns the dice divisor for gathering this resource (its encoding).
    pub const fn divisor(self) -> u32 {
        self as u32
    }

    /// Returns the dense storage index (0..5) for inventory arrays.
    pub const fn index(self) -> usize {
        self as usize - 2
    }

    /// Parses a resource from its numeric board encoding (2..6).
    pub fn from_code(code: u8) -> Option<Resource> {
        match code {
            2 => Some(Resource::Food),
            3 => Some(Resource::Wood),
            4 => Some(Resource::Stone),
            5 => Some(Resource::Clay),
            6 => Some(Resource::Gold),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_roundtrip() {
        for r in ALL_RESOURCES {
            assert_eq!(Resource::from_code(r as u8), Some(r));
        }
        assert_eq!(Resource::from_code(0), None);
        assert_eq!(Resource::from_code(7), None);
    }

    #[test]
    fn indices_are_dense() {
        for (i, r) in ALL_RESOURCES.iter().enumerate() {
            assert_eq!(r.index(), i);
        }
    }

    #[test]
    fn divisors_match_encoding() {
        assert_eq!(Resource::Food.divisor(), 2);
        assert_eq!(Resource::Gold.divisor(), 6);
    }

    #[test]
    fn spend_resources_exclude_food() {
        assert!(!SPEND_RESOURCES.contains(&Resource::Food));
        assert_eq!(SPEND_RESOURCES.len(), 4);
    }
}
