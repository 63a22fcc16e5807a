use super::*;

/// Per-inscription attribute record. Absent until the first attribute is set;
/// today the only attribute is the burn flag.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InscriptionCharm {
  pub burned: bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_is_unburned() {
    assert!(!InscriptionCharm::default().burned);
  }
}
