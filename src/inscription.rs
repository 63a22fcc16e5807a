use super::*;

/// The indexed entity. Created once per surviving record; only the tracker
/// moves its `offset` afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inscription {
  pub txid: Txid,
  pub index: u32,
  pub offset: u64,
  pub sequence_number: u32,
  pub inscription_number: u32,
  pub is_curse: bool,
  pub body: Option<Vec<u8>>,
  pub content_encoding: Option<Vec<u8>>,
  pub content_type: Option<Vec<u8>>,
  pub metadata: Option<Vec<u8>>,
  pub metaprotocol: Option<String>,
  pub parents: Vec<ObjectId>,
  pub pointer: Option<u64>,
  pub rune: Option<Vec<u8>>,
}

impl Inscription {
  pub fn id(&self) -> InscriptionId {
    InscriptionId {
      txid: self.txid,
      index: self.index,
    }
  }

  /// The signed ordinal: cursed inscriptions count down from -1.
  pub fn number(&self) -> i64 {
    if self.is_curse {
      -i64::from(self.inscription_number) - 1
    } else {
      i64::from(self.inscription_number)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn inscription(inscription_number: u32, is_curse: bool) -> Inscription {
    Inscription {
      txid: txid(1),
      index: 0,
      offset: 0,
      sequence_number: 0,
      inscription_number,
      is_curse,
      body: None,
      content_encoding: None,
      content_type: None,
      metadata: None,
      metaprotocol: None,
      parents: Vec::new(),
      pointer: None,
      rune: None,
    }
  }

  #[test]
  fn id() {
    assert_eq!(
      inscription(0, false).id(),
      InscriptionId {
        txid: txid(1),
        index: 0,
      },
    );
  }

  #[test]
  fn number_is_signed_by_curse() {
    assert_eq!(inscription(0, false).number(), 0);
    assert_eq!(inscription(5, false).number(), 5);
    assert_eq!(inscription(0, true).number(), -1);
    assert_eq!(inscription(5, true).number(), -6);
  }
}
