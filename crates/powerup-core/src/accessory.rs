//! Accessory catalog types.
//!
//! Each [`AccessoryType`] has its own catalog table. Accessories start locked
//! and are unlocked by purchase; only a full store reset locks them again.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator as _, IntoStaticStr};

pub type AccessoryId = i64;

// ─── AccessoryType ───────────────────────────────────────────────────────────

/// Catalog category, which is also the avatar slot an accessory fits into.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AccessoryType {
  Face,
  Clothes,
  Hair,
  Eyes,
  Necklace,
  Glasses,
  Handbag,
  Hat,
}

impl AccessoryType {
  /// Every avatar wears exactly one accessory of a mandatory type.
  pub fn is_mandatory(self) -> bool {
    matches!(self, Self::Face | Self::Clothes | Self::Hair | Self::Eyes)
  }

  /// Name of the catalog table, which is also the avatar column name.
  pub fn table(self) -> &'static str {
    match self {
      Self::Face => "Face",
      Self::Clothes => "Clothes",
      Self::Hair => "Hair",
      Self::Eyes => "Eyes",
      Self::Necklace => "Necklace",
      Self::Glasses => "Glasses",
      Self::Handbag => "Handbag",
      Self::Hat => "Hat",
    }
  }

  pub fn mandatory() -> impl Iterator<Item = Self> {
    Self::iter().filter(|k| k.is_mandatory())
  }

  pub fn optional() -> impl Iterator<Item = Self> {
    Self::iter().filter(|k| !k.is_mandatory())
  }
}

// ─── Accessory ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accessory {
  pub kind:       AccessoryType,
  /// Unique within `kind`.
  pub id:         AccessoryId,
  pub image_name: String,
  /// Purchase cost in karma points.
  pub points:     i64,
  pub purchased:  bool,
}

impl Accessory {
  /// A locked catalog entry, as shipped in the template.
  pub fn locked(
    kind: AccessoryType,
    id: AccessoryId,
    image_name: impl Into<String>,
    points: i64,
  ) -> Self {
    Self { kind, id, image_name: image_name.into(), points, purchased: false }
  }
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator;

  use super::*;

  #[test]
  fn four_mandatory_four_optional() {
    assert_eq!(AccessoryType::mandatory().count(), 4);
    assert_eq!(AccessoryType::optional().count(), 4);
    assert_eq!(AccessoryType::iter().count(), 8);
  }

  #[test]
  fn names_round_trip() {
    for kind in AccessoryType::iter() {
      let name: &'static str = kind.into();
      assert_eq!(name.parse::<AccessoryType>().unwrap(), kind);
      assert_eq!(kind.table().parse::<AccessoryType>().unwrap(), kind);
    }
  }

  #[test]
  fn display_is_lowercase() {
    assert_eq!(AccessoryType::Handbag.to_string(), "handbag");
  }
}
