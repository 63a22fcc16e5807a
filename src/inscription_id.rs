use super::*;

#[derive(
  Debug, PartialEq, Copy, Clone, Hash, Eq, PartialOrd, Ord, DeserializeFromStr, SerializeDisplay,
)]
pub struct InscriptionId {
  pub txid: Txid,
  pub index: u32,
}

impl Default for InscriptionId {
  fn default() -> Self {
    Self {
      txid: Txid::all_zeros(),
      index: 0,
    }
  }
}

impl InscriptionId {
  /// Decodes the tag-value form: txid bytes followed by the index in
  /// little-endian with trailing zeroes trimmed. A fixed four-byte index is
  /// also accepted.
  pub(crate) fn from_value(value: &[u8]) -> Option<Self> {
    if value.len() < Txid::LEN {
      return None;
    }

    if value.len() > Txid::LEN + 4 {
      return None;
    }

    let (txid, index) = value.split_at(Txid::LEN);

    if let Some(last) = index.last() {
      if index.len() != 4 && *last == 0 {
        return None;
      }
    }

    let txid = Txid::from_slice(txid).unwrap();

    let index = [
      index.first().copied().unwrap_or_default(),
      index.get(1).copied().unwrap_or_default(),
      index.get(2).copied().unwrap_or_default(),
      index.get(3).copied().unwrap_or_default(),
    ];

    Some(Self {
      txid,
      index: u32::from_le_bytes(index),
    })
  }

  pub(crate) fn value(self) -> Vec<u8> {
    let index = self.index.to_le_bytes();
    let mut index_slice = index.as_slice();

    while index_slice.last().copied() == Some(0) {
      index_slice = &index_slice[0..index_slice.len() - 1];
    }

    self
      .txid
      .to_byte_array()
      .iter()
      .chain(index_slice)
      .copied()
      .collect()
  }
}

impl Display for InscriptionId {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}i{}", self.txid, self.index)
  }
}

#[derive(Debug, Error)]
pub enum ParseError {
  #[error("invalid character: '{0}'")]
  Character(char),
  #[error("invalid length: {0}")]
  Length(usize),
  #[error("invalid separator: `{0}`")]
  Separator(char),
  #[error("invalid txid: {0}")]
  Txid(bitcoin::hashes::hex::Error),
  #[error("invalid index: {0}")]
  Index(ParseIntError),
}

impl FromStr for InscriptionId {
  type Err = ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if let Some(char) = s.chars().find(|char| !char.is_ascii()) {
      return Err(ParseError::Character(char));
    }

    const TXID_LEN: usize = 64;
    const MIN_LEN: usize = TXID_LEN + 2;

    if s.len() < MIN_LEN {
      return Err(ParseError::Length(s.len()));
    }

    let txid = &s[..TXID_LEN];

    let separator = s.chars().nth(TXID_LEN).unwrap();

    if separator != 'i' {
      return Err(ParseError::Separator(separator));
    }

    let index = &s[TXID_LEN + 1..];

    Ok(Self {
      txid: txid.parse().map_err(ParseError::Txid)?,
      index: index.parse().map_err(ParseError::Index)?,
    })
  }
}
