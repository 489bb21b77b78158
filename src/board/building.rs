//! Building tiles: fixed-price and flexible-price variants.
//!
//! A certain building names an exact resource multiset as its price; a flex
//! building is priced by total unit count plus a distinct-type ("variety")
//! constraint. The count-7 flex building is open ended: any one to seven
//! units of any mix.

use super::resource::{Resource, SPEND_RESOURCES};

/// Marker count for the open-ended flex building (1..7 units, any mix).
pub const FLEX_OPEN_COUNT: u8 = 7;

/// A purchasable building tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Building {
    /// Exact price: one unit per listed resource (repeats allowed).
    /// Worth the sum of the listed resources' encodings in VP.
    Certain { cost: Vec<Resource> },
    /// Price by unit count with exactly `variety` distinct types.
    /// When `count == FLEX_OPEN_COUNT` the requirement is open ended.
    Flex { count: u8, variety: u8 },
}

impl Building {
    /// Checks affordability against a player's inventory, indexed by
    /// `Resource::index()`.
    pub fn is_affordable(&self, holdings: &[u8]) -> bool {
        match self {
            Building::Certain { cost } => {
                let mut needed = [0u8; 5];
                for &r in cost {
                    needed[r.index()] += 1;
                }
                SPEND_RESOURCES
                    .iter()
                    .all(|&r| holdings[r.index()] >= needed[r.index()])
            }
            Building::Flex { count, variety } => {
                if *count == FLEX_OPEN_COUNT {
                    return SPEND_RESOURCES.iter().any(|&r| holdings[r.index()] > 0);
                }
                // Take the `variety` largest holdings; all must be non-zero
                // and together cover the unit count.
                let mut counts: Vec<u8> =
                    SPEND_RESOURCES.iter().map(|&r| holdings[r.index()]).collect();
                counts.sort_unstable_by(|a, b| b.cmp(a));
                let top = &counts[..(*variety as usize).min(counts.len())];
                top.iter().all(|&c| c > 0)
                    && top.iter().map(|&c| c as u32).sum::<u32>() >= *count as u32
            }
        }
    }

    /// Victory points for a certain building: the sum of its listed
    /// resources' encodings. Flex buildings score the sum of whatever was
    /// actually paid, so they have no fixed value.
    pub fn certain_vp(&self) -> Option<i32> {
        match self {
            Building::Certain { cost } => {
                Some(cost.iter().map(|&r| r as i32).sum())
            }
            Building::Flex { .. } => None,
        }
    }

    /// Feature triple for the observation encoding.
    pub fn features(&self) -> [u8; 3] {
        match self {
            Building::Certain { cost } => {
                let mut f = [0u8; 3];
                for (slot, &r) in f.iter_mut().zip(cost.iter()) {
                    *slot = r as u8;
                }
                f
            }
            Building::Flex { count, variety } => [*count, *variety, 0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holdings(wood: u8, stone: u8, clay: u8, gold: u8) -> [u8; 5] {
        let mut h = [0u8; 5];
        h[Resource::Wood.index()] = wood;
        h[Resource::Stone.index()] = stone;
        h[Resource::Clay.index()] = clay;
        h[Resource::Gold.index()] = gold;
        h
    }

    #[test]
    fn certain_requires_exact_types() {
        let b = Building::Certain { cost: vec![Resource::Wood, Resource::Wood, Resource::Clay] };
        assert!(b.is_affordable(&holdings(2, 0, 1, 0)));
        assert!(!b.is_affordable(&holdings(1, 0, 1, 0)));
        assert!(!b.is_affordable(&holdings(2, 5, 0, 0)));
    }

    #[test]
    fn certain_vp_sums_encodings() {
        let b = Building::Certain { cost: vec![Resource::Gold, Resource::Gold, Resource::Wood] };
        assert_eq!(b.certain_vp(), Some(6 + 6 + 3));
    }

    #[test]
    fn flex_needs_variety_distinct_types() {
        let b = Building::Flex { count: 5, variety: 2 };
        // 5 units but only one type held.
        assert!(!b.is_affordable(&holdings(5, 0, 0, 0)));
        assert!(b.is_affordable(&holdings(3, 2, 0, 0)));
        // Two types held but too few units.
        assert!(!b.is_affordable(&holdings(2, 2, 0, 0)));
    }

    #[test]
    fn flex_open_accepts_any_resource() {
        let b = Building::Flex { count: FLEX_OPEN_COUNT, variety: 0 };
        assert!(!b.is_affordable(&holdings(0, 0, 0, 0)));
        assert!(b.is_affordable(&holdings(0, 0, 0, 1)));
    }

    #[test]
    fn flex_has_no_fixed_vp() {
        assert_eq!(Building::Flex { count: 4, variety: 2 }.certain_vp(), None);
    }

    #[test]
    fn features_encode_prices() {
        let c = Building::Certain { cost: vec![Resource::Wood, Resource::Stone, Resource::Gold] };
        assert_eq!(c.features(), [3, 4, 6]);
        let f = Building::Flex { count: 5, variety: 2 };
        assert_eq!(f.features(), [5, 2, 0]);
    }
}
