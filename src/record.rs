use {super::*, ciborium::Value};

/// A single inscription payload parsed out of an envelope, together with the
/// structural flags the parser raised along the way.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, Eq, Default)]
pub struct InscriptionRecord {
  pub body: Option<Vec<u8>>,
  pub content_encoding: Option<Vec<u8>>,
  pub content_type: Option<Vec<u8>>,
  pub duplicate_field: bool,
  pub incomplete_field: bool,
  pub metadata: Option<Vec<u8>>,
  pub metaprotocol: Option<Vec<u8>>,
  pub parents: Vec<Vec<u8>>,
  pub pointer: Option<Vec<u8>>,
  pub rune: Option<Vec<u8>>,
  pub unrecognized_even_field: bool,
}

impl InscriptionRecord {
  /// A record survives validation iff the parser raised no structural flag.
  pub fn is_valid(&self) -> bool {
    !self.duplicate_field && !self.incomplete_field && !self.unrecognized_even_field
  }

  pub(crate) fn pointer_value(pointer: u64) -> Vec<u8> {
    let mut bytes = pointer.to_le_bytes().to_vec();

    while bytes.last().copied() == Some(0) {
      bytes.pop();
    }

    bytes
  }

  pub fn pointer(&self) -> Option<u64> {
    let value = self.pointer.as_ref()?;

    if value.iter().skip(8).copied().any(|byte| byte != 0) {
      return None;
    }

    let pointer = [
      value.first().copied().unwrap_or(0),
      value.get(1).copied().unwrap_or(0),
      value.get(2).copied().unwrap_or(0),
      value.get(3).copied().unwrap_or(0),
      value.get(4).copied().unwrap_or(0),
      value.get(5).copied().unwrap_or(0),
      value.get(6).copied().unwrap_or(0),
      value.get(7).copied().unwrap_or(0),
    ];

    Some(u64::from_le_bytes(pointer))
  }

  pub fn body(&self) -> Option<&[u8]> {
    Some(self.body.as_ref()?)
  }

  pub fn content_type(&self) -> Option<&str> {
    str::from_utf8(self.content_type.as_ref()?).ok()
  }

  pub fn metaprotocol(&self) -> Option<&str> {
    str::from_utf8(self.metaprotocol.as_ref()?).ok()
  }

  pub fn metadata(&self) -> Option<Value> {
    ciborium::from_reader(self.metadata.as_ref()?.as_slice()).ok()
  }

  pub fn parents(&self) -> Vec<InscriptionId> {
    self
      .parents
      .iter()
      .filter_map(|parent| InscriptionId::from_value(parent))
      .collect()
  }

  pub fn append_reveal_script_to_builder(&self, mut builder: script::Builder) -> script::Builder {
    builder = builder
      .push_opcode(opcodes::OP_FALSE)
      .push_opcode(opcodes::all::OP_IF)
      .push_slice(envelope::PROTOCOL_ID);

    Tag::ContentType.append(&mut builder, &self.content_type);
    Tag::ContentEncoding.append(&mut builder, &self.content_encoding);
    Tag::Metaprotocol.append(&mut builder, &self.metaprotocol);
    Tag::Parent.append_array(&mut builder, &self.parents);
    Tag::Pointer.append(&mut builder, &self.pointer);
    Tag::Metadata.append(&mut builder, &self.metadata);
    Tag::Rune.append(&mut builder, &self.rune);

    if let Some(body) = &self.body {
      builder = builder.push_slice(envelope::BODY_TAG);
      for chunk in body.chunks(MAX_SCRIPT_ELEMENT_SIZE) {
        builder = builder.push_slice::<&script::PushBytes>(chunk.try_into().unwrap());
      }
    }

    builder.push_opcode(opcodes::all::OP_ENDIF)
  }

  pub fn to_witness(&self) -> Witness {
    let script = self
      .append_reveal_script_to_builder(script::Builder::new())
      .into_script();

    let mut witness = Witness::new();

    witness.push(script);
    witness.push([]);

    witness
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn pointer_value_trims_trailing_zeroes() {
    assert_eq!(InscriptionRecord::pointer_value(0), Vec::<u8>::new());
    assert_eq!(InscriptionRecord::pointer_value(1), vec![1]);
    assert_eq!(InscriptionRecord::pointer_value(256), vec![0, 1]);
    assert_eq!(
      InscriptionRecord::pointer_value(u64::MAX),
      vec![0xFF; 8],
    );
  }

  #[test]
  fn pointer_round_trips() {
    for pointer in [0, 1, 255, 256, 5_000_000_000, u64::MAX] {
      assert_eq!(
        InscriptionRecord {
          pointer: Some(InscriptionRecord::pointer_value(pointer)),
          ..default()
        }
        .pointer(),
        Some(pointer),
      );
    }
  }

  #[test]
  fn pointer_rejects_excess_significant_bytes() {
    assert_eq!(
      InscriptionRecord {
        pointer: Some(vec![0, 0, 0, 0, 0, 0, 0, 0, 1]),
        ..default()
      }
      .pointer(),
      None,
    );

    assert_eq!(
      InscriptionRecord {
        pointer: Some(vec![1, 0, 0, 0, 0, 0, 0, 0, 0]),
        ..default()
      }
      .pointer(),
      Some(1),
    );
  }

  #[test]
  fn validity_follows_structural_flags() {
    assert!(InscriptionRecord::default().is_valid());

    assert!(!InscriptionRecord {
      duplicate_field: true,
      ..default()
    }
    .is_valid());

    assert!(!InscriptionRecord {
      incomplete_field: true,
      ..default()
    }
    .is_valid());

    assert!(!InscriptionRecord {
      unrecognized_even_field: true,
      ..default()
    }
    .is_valid());
  }

  #[test]
  fn metadata_decodes_cbor() {
    let mut metadata = Vec::new();
    ciborium::into_writer(&Value::Text("ordcore".into()), &mut metadata).unwrap();

    assert_eq!(
      InscriptionRecord {
        metadata: Some(metadata),
        ..default()
      }
      .metadata(),
      Some(Value::Text("ordcore".into())),
    );

    assert_eq!(InscriptionRecord::default().metadata(), None);
  }

  #[test]
  fn parents_skips_undecodable_values() {
    let parent = inscription_id(1);

    assert_eq!(
      InscriptionRecord {
        parents: vec![parent.value(), vec![1, 2, 3]],
        ..default()
      }
      .parents(),
      vec![parent],
    );
  }

  #[test]
  fn metaprotocol_requires_utf8() {
    assert_eq!(
      InscriptionRecord {
        metaprotocol: Some(b"brc-20".to_vec()),
        ..default()
      }
      .metaprotocol(),
      Some("brc-20"),
    );

    assert_eq!(
      InscriptionRecord {
        metaprotocol: Some(vec![0x80]),
        ..default()
      }
      .metaprotocol(),
      None,
    );
  }
}
