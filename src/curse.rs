use super::*;

/// Why an envelope would have been cursed under pre-jubilee rules. The engine
/// only ever indexes post-jubilee blocks, so a curse never changes numbering;
/// it is surfaced for diagnostics.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Curse {
  DuplicateField,
  IncompleteField,
  NotAtOffsetZero,
  NotInFirstInput,
  Pointer,
  Pushnum,
  Reinscription,
  Stutter,
  UnrecognizedEvenField,
}

impl Curse {
  pub fn assess(envelope: &ParsedEnvelope) -> Option<Curse> {
    if envelope.payload.unrecognized_even_field {
      Some(Curse::UnrecognizedEvenField)
    } else if envelope.payload.duplicate_field {
      Some(Curse::DuplicateField)
    } else if envelope.payload.incomplete_field {
      Some(Curse::IncompleteField)
    } else if envelope.input != 0 {
      Some(Curse::NotInFirstInput)
    } else if envelope.offset != 0 {
      Some(Curse::NotAtOffsetZero)
    } else if envelope.payload.pointer.is_some() {
      Some(Curse::Pointer)
    } else if envelope.pushnum {
      Some(Curse::Pushnum)
    } else if envelope.stutter {
      Some(Curse::Stutter)
    } else {
      // TODO: detect reinscription of an already-inscribed satoshi once the
      // engine carries a satoshi index to scan.
      None
    }
  }
}

impl Display for Curse {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(
      f,
      "{}",
      match self {
        Self::DuplicateField => "DuplicateField",
        Self::IncompleteField => "IncompleteField",
        Self::NotAtOffsetZero => "NotAtOffsetZero",
        Self::NotInFirstInput => "NotInFirstInput",
        Self::Pointer => "Pointer",
        Self::Pushnum => "Pushnum",
        Self::Reinscription => "Reinscription",
        Self::Stutter => "Stutter",
        Self::UnrecognizedEvenField => "UnrecognizedEvenField",
      }
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clean_envelope_is_uncursed() {
    assert_eq!(Curse::assess(&ParsedEnvelope { ..default() }), None);
  }

  #[test]
  fn structural_flags_outrank_position() {
    assert_eq!(
      Curse::assess(&ParsedEnvelope {
        input: 1,
        payload: InscriptionRecord {
          duplicate_field: true,
          ..default()
        },
        ..default()
      }),
      Some(Curse::DuplicateField),
    );
  }

  #[test]
  fn position_flags() {
    assert_eq!(
      Curse::assess(&ParsedEnvelope {
        input: 1,
        ..default()
      }),
      Some(Curse::NotInFirstInput),
    );

    assert_eq!(
      Curse::assess(&ParsedEnvelope {
        offset: 1,
        ..default()
      }),
      Some(Curse::NotAtOffsetZero),
    );
  }

  #[test]
  fn pointer_pushnum_stutter() {
    assert_eq!(
      Curse::assess(&ParsedEnvelope {
        payload: InscriptionRecord {
          pointer: Some(vec![1]),
          ..default()
        },
        ..default()
      }),
      Some(Curse::Pointer),
    );

    assert_eq!(
      Curse::assess(&ParsedEnvelope {
        pushnum: true,
        ..default()
      }),
      Some(Curse::Pushnum),
    );

    assert_eq!(
      Curse::assess(&ParsedEnvelope {
        stutter: true,
        ..default()
      }),
      Some(Curse::Stutter),
    );
  }

  #[test]
  fn display_tokens() {
    assert_eq!(Curse::DuplicateField.to_string(), "DuplicateField");
    assert_eq!(Curse::Reinscription.to_string(), "Reinscription");
    assert_eq!(
      Curse::UnrecognizedEvenField.to_string(),
      "UnrecognizedEvenField"
    );
  }
}
