use super::*;

/// Where an inscription's satoshi sits after a transaction: the holding
/// output's index, the byte offset within that output, and the identity of
/// the inscription object that landed there.
#[derive(
  Debug, PartialEq, Copy, Clone, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SatPoint {
  pub output_index: u32,
  pub offset: u64,
  pub object_id: ObjectId,
}

impl Display for SatPoint {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}:{}:{}", self.output_index, self.offset, self.object_id)
  }
}
