//! The player's avatar and its equipped accessories.

use serde::{Deserialize, Serialize};

use crate::accessory::{Accessory, AccessoryId, AccessoryType};

/// The game has exactly one profile; its avatar and score rows use this id.
pub const AVATAR_ID: i64 = 1;

/// Accessories currently worn by the avatar.
///
/// Mandatory slots always hold an accessory; an empty optional slot is
/// `None`, never a placeholder id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avatar {
  pub face:     Accessory,
  pub clothes:  Accessory,
  pub hair:     Accessory,
  pub eyes:     Accessory,
  pub necklace: Option<Accessory>,
  pub glasses:  Option<Accessory>,
  pub handbag:  Option<Accessory>,
  pub hat:      Option<Accessory>,
}

impl Avatar {
  /// An avatar wearing only the four mandatory accessories.
  pub fn new(
    face: Accessory,
    clothes: Accessory,
    hair: Accessory,
    eyes: Accessory,
  ) -> Self {
    Self {
      face,
      clothes,
      hair,
      eyes,
      necklace: None,
      glasses: None,
      handbag: None,
      hat: None,
    }
  }

  /// The accessory in the slot for `kind`, if any.
  pub fn slot(&self, kind: AccessoryType) -> Option<&Accessory> {
    match kind {
      AccessoryType::Face => Some(&self.face),
      AccessoryType::Clothes => Some(&self.clothes),
      AccessoryType::Hair => Some(&self.hair),
      AccessoryType::Eyes => Some(&self.eyes),
      AccessoryType::Necklace => self.necklace.as_ref(),
      AccessoryType::Glasses => self.glasses.as_ref(),
      AccessoryType::Handbag => self.handbag.as_ref(),
      AccessoryType::Hat => self.hat.as_ref(),
    }
  }

  /// Slot-by-slot accessory ids in column order, as written to storage.
  pub fn slot_ids(&self) -> [(AccessoryType, Option<AccessoryId>); 8] {
    [
      AccessoryType::Face,
      AccessoryType::Clothes,
      AccessoryType::Hair,
      AccessoryType::Eyes,
      AccessoryType::Necklace,
      AccessoryType::Glasses,
      AccessoryType::Handbag,
      AccessoryType::Hat,
    ]
    .map(|kind| (kind, self.slot(kind).map(|a| a.id)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn acc(kind: AccessoryType, id: AccessoryId) -> Accessory {
    Accessory::locked(kind, id, format!("{kind}_{id}"), 0)
  }

  #[test]
  fn new_avatar_has_empty_optional_slots() {
    let avatar = Avatar::new(
      acc(AccessoryType::Face, 1),
      acc(AccessoryType::Clothes, 2),
      acc(AccessoryType::Hair, 3),
      acc(AccessoryType::Eyes, 4),
    );

    for kind in AccessoryType::optional() {
      assert!(avatar.slot(kind).is_none());
    }
    assert_eq!(avatar.slot(AccessoryType::Hair).map(|a| a.id), Some(3));
  }

  #[test]
  fn slot_ids_follow_column_order() {
    let mut avatar = Avatar::new(
      acc(AccessoryType::Face, 1),
      acc(AccessoryType::Clothes, 2),
      acc(AccessoryType::Hair, 3),
      acc(AccessoryType::Eyes, 4),
    );
    avatar.hat = Some(acc(AccessoryType::Hat, 9));

    let ids = avatar.slot_ids();
    assert_eq!(ids[0], (AccessoryType::Face, Some(1)));
    assert_eq!(ids[3], (AccessoryType::Eyes, Some(4)));
    assert_eq!(ids[4], (AccessoryType::Necklace, None));
    assert_eq!(ids[7], (AccessoryType::Hat, Some(9)));
  }
}
