use super::*;

/// An inscription whose satoshi was paid as fees; `offset` is its position
/// within the fee span, not a byte within an output. It rides along to the
/// block's coinbase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flotsam {
  pub output_index: u32,
  pub offset: u64,
  pub object_id: ObjectId,
}

/// Locates where the inscription at `offset` within the spent output of input
/// `input_index` lands among `tx`'s outputs.
///
/// The absolute satoshi index of the inscription across the transaction's
/// input sequence is the sum of the values of all prior inputs plus `offset`.
/// Scanning the outputs, the first output whose cumulative value strictly
/// exceeds that index holds the satoshi; an inscription on an exact output
/// boundary therefore belongs to the later output, at offset zero. If no
/// output reaches it, the satoshi was paid as fees and the returned sat-point
/// is the synthetic flotsam form: the spent input's index plus the position
/// within the fee span.
pub fn match_utxo_and_generate_sat_point(
  offset: u64,
  object_id: ObjectId,
  tx: &Transaction,
  input_utxo_values: &[u64],
  input_index: u32,
) -> (bool, SatPoint) {
  let input_acc = input_utxo_values
    .iter()
    .take(input_index as usize)
    .sum::<u64>()
    + offset;

  let mut output_acc = 0;
  for (vout, tx_out) in tx.output.iter().enumerate() {
    output_acc += tx_out.value;

    if output_acc > input_acc {
      return (
        true,
        SatPoint {
          output_index: vout.try_into().unwrap(),
          offset: tx_out.value - (output_acc - input_acc),
          object_id,
        },
      );
    }
  }

  (
    false,
    SatPoint {
      output_index: input_index,
      offset: input_acc - output_acc,
      object_id,
    },
  )
}

/// Locates where the flotsam at `flotsam_index` lands among the coinbase
/// outputs.
///
/// The block subsidy sits ahead of the fees in the coinbase value, so the
/// satoshi's index is the subsidy plus the cumulated carry-offsets of the
/// flotsams up to and including this one. The caller guarantees the coinbase
/// outputs cover the block's reward.
pub fn match_coinbase_and_generate_sat_point(
  flotsam_index: usize,
  tx: &Transaction,
  flotsams: &[Flotsam],
  block_height: Height,
) -> SatPoint {
  let reward_acc = block_height.subsidy()
    + flotsams[..=flotsam_index]
      .iter()
      .map(|flotsam| flotsam.offset)
      .sum::<u64>();

  let object_id = flotsams[flotsam_index].object_id;

  let mut output_acc = 0;
  for (vout, tx_out) in tx.output.iter().enumerate() {
    output_acc += tx_out.value;

    if output_acc > reward_acc {
      return SatPoint {
        output_index: vout.try_into().unwrap(),
        offset: tx_out.value - (output_acc - reward_acc),
        object_id,
      };
    }
  }

  unreachable!("coinbase outputs do not cover the block reward");
}
