use crate::domain::model::{BinId, CLUSTERS};
use crate::utils::error::Result;
use crate::utils::validation::validate_letter_range;

pub const DEFAULT_START_LETTER: char = 'A';
pub const DEFAULT_END_LETTER: char = 'X';

/// The addressable bins for a closed letter range, in canonical order:
/// `A1, A2, B1, B2, ...`. That order is also the manifest row order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinSpace {
    start: char,
    end: char,
    bins: Vec<BinId>,
}

impl BinSpace {
    pub fn generate(start: char, end: char) -> Result<Self> {
        validate_letter_range(start, end)?;
        Ok(Self::enumerate(start, end))
    }

    fn enumerate(start: char, end: char) -> Self {
        let bins = (start..=end)
            .flat_map(|letter| CLUSTERS.iter().map(move |&cluster| BinId::new(letter, cluster)))
            .collect();
        Self { start, end, bins }
    }

    pub fn bins(&self) -> &[BinId] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Looks up a layout-declared bin id. `None` when the text is not a bin
    /// of this space, malformed ids included.
    pub fn resolve(&self, raw: &str) -> Option<BinId> {
        BinId::parse(raw).filter(|bin| self.contains(*bin))
    }

    pub fn contains(&self, bin: BinId) -> bool {
        (self.start..=self.end).contains(&bin.letter) && CLUSTERS.contains(&bin.cluster)
    }

    /// Human-readable range such as `A1..X2`.
    pub fn range_label(&self) -> String {
        format!("{}1..{}2", self.start, self.end)
    }
}

impl Default for BinSpace {
    fn default() -> Self {
        Self::enumerate(DEFAULT_START_LETTER, DEFAULT_END_LETTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_space_is_a_through_x() {
        let space = BinSpace::default();
        assert_eq!(space.len(), 48);
        assert_eq!(space.bins()[0], BinId::new('A', 1));
        assert_eq!(space.bins()[1], BinId::new('A', 2));
        assert_eq!(space.bins()[2], BinId::new('B', 1));
        assert_eq!(space.bins()[47], BinId::new('X', 2));
        assert_eq!(space.range_label(), "A1..X2");
        assert_eq!(space, BinSpace::generate('A', 'X').unwrap());
    }

    #[test]
    fn test_generate_subrange() {
        let space = BinSpace::generate('C', 'D').unwrap();
        let names: Vec<String> = space.bins().iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["C1", "C2", "D1", "D2"]);
    }

    #[test]
    fn test_generate_rejects_bad_range() {
        assert!(BinSpace::generate('D', 'C').is_err());
        assert!(BinSpace::generate('a', 'c').is_err());
    }

    #[test]
    fn test_resolve() {
        let space = BinSpace::generate('A', 'C').unwrap();
        assert_eq!(space.resolve("B2"), Some(BinId::new('B', 2)));
        assert_eq!(space.resolve("D1"), None);
        assert_eq!(space.resolve("b2"), None);
        assert_eq!(space.resolve("B3"), None);
        assert_eq!(space.resolve(""), None);
    }
}
