//! Karma points and power levels.

use serde::{Deserialize, Serialize};

/// One of the four named stats tracked alongside karma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Power {
  Strength,
  Invisibility,
  Healing,
  Telepathy,
}

/// The player's score. Values are not clamped by the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
  pub karma_points: i64,
  pub strength:     i64,
  pub invisibility: i64,
  pub healing:      i64,
  pub telepathy:    i64,
}

impl Score {
  pub fn power(&self, power: Power) -> i64 {
    match power {
      Power::Strength => self.strength,
      Power::Invisibility => self.invisibility,
      Power::Healing => self.healing,
      Power::Telepathy => self.telepathy,
    }
  }

  pub fn is_zero(&self) -> bool { *self == Self::default() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn power_lookup() {
    let score = Score {
      karma_points: 10,
      strength:     1,
      invisibility: 2,
      healing:      3,
      telepathy:    4,
    };
    assert_eq!(score.power(Power::Healing), 3);
    assert_eq!(score.power(Power::Telepathy), 4);
    assert!(!score.is_zero());
    assert!(Score::default().is_zero());
  }
}
