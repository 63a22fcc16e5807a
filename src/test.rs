use {
  super::*,
  bitcoin::{absolute::LockTime, blockdata::script::PushBytesBuf, Sequence, TxIn, TxOut},
};

pub(crate) fn default<T: Default>() -> T {
  Default::default()
}

pub(crate) fn txid(n: u64) -> Txid {
  let hex = format!("{n:x}");

  if hex.is_empty() || hex.len() > 1 {
    panic!();
  }

  hex.repeat(64).parse().unwrap()
}

pub(crate) fn inscription_id(n: u32) -> InscriptionId {
  let hex = format!("{n:x}");

  if hex.is_empty() || hex.len() > 1 {
    panic!();
  }

  format!("{}i{n}", hex.repeat(64)).parse().unwrap()
}

pub(crate) fn inscription(content_type: &str, body: impl AsRef<[u8]>) -> InscriptionRecord {
  InscriptionRecord {
    content_type: Some(content_type.into()),
    body: Some(body.as_ref().to_vec()),
    ..default()
  }
}

pub(crate) fn envelope(payload: &[&[u8]]) -> Witness {
  let mut builder = script::Builder::new()
    .push_opcode(opcodes::OP_FALSE)
    .push_opcode(opcodes::all::OP_IF);

  for data in payload {
    let mut buf = PushBytesBuf::new();
    buf.extend_from_slice(data).unwrap();
    builder = builder.push_slice(buf);
  }

  let script = builder.push_opcode(opcodes::all::OP_ENDIF).into_script();

  Witness::from_slice(&[script.into_bytes(), Vec::new()])
}

pub(crate) fn recipient(n: u8) -> ScriptBuf {
  script::Builder::new().push_slice([n]).into_script()
}

pub(crate) fn op_return() -> ScriptBuf {
  script::Builder::new()
    .push_opcode(opcodes::all::OP_RETURN)
    .into_script()
}

pub(crate) fn outputs(values: &[u64]) -> Vec<TxOut> {
  values
    .iter()
    .enumerate()
    .map(|(vout, value)| TxOut {
      value: *value,
      script_pubkey: recipient(vout.try_into().unwrap()),
    })
    .collect()
}

pub(crate) fn transaction(witnesses: &[Witness], output_values: &[u64]) -> Transaction {
  transaction_with_outputs(witnesses, outputs(output_values))
}

pub(crate) fn transaction_with_outputs(witnesses: &[Witness], outputs: Vec<TxOut>) -> Transaction {
  Transaction {
    version: 2,
    lock_time: LockTime::ZERO,
    input: witnesses
      .iter()
      .enumerate()
      .map(|(vout, witness)| TxIn {
        previous_output: OutPoint {
          txid: txid(4),
          vout: vout.try_into().unwrap(),
        },
        script_sig: ScriptBuf::new(),
        sequence: Sequence::ENABLE_RBF_NO_LOCKTIME,
        witness: witness.clone(),
      })
      .collect(),
    output: outputs,
  }
}

pub(crate) fn coinbase_transaction(output_values: &[u64]) -> Transaction {
  Transaction {
    version: 2,
    lock_time: LockTime::ZERO,
    input: vec![TxIn {
      previous_output: OutPoint::null(),
      script_sig: ScriptBuf::new(),
      sequence: Sequence::MAX,
      witness: Witness::new(),
    }],
    output: outputs(output_values),
  }
}

pub(crate) fn updater() -> (InscriptionUpdater, SystemAuthority) {
  InscriptionUpdater::genesis_init(default(), Height(830_000)).unwrap()
}

pub(crate) fn index_inscription(
  updater: &mut InscriptionUpdater,
  metaprotocol: &str,
) -> InscriptionId {
  let record = InscriptionRecord {
    metaprotocol: Some(metaprotocol.into()),
    ..inscription("text/plain;charset=utf-8", "ord")
  };

  let tx = transaction(&[record.to_witness()], &[10_000]);
  let txid = tx.txid();

  updater.process_transaction(&tx, &[10_000]).unwrap();

  InscriptionId { txid, index: 0 }
}
