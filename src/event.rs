use super::*;

/// A record dropped for structural defects; observable, never fatal.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidInscriptionEvent {
  pub txid: Txid,
  pub input_index: u32,
  pub record: InscriptionRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InscriptionEventType {
  New = 0,
  Burn = 1,
}

impl InscriptionEventType {
  pub fn code(self) -> u8 {
    self as u8
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InscriptionEvent {
  pub metaprotocol: String,
  pub sequence_number: u32,
  pub inscription_obj_id: ObjectId,
  pub event_type: InscriptionEventType,
}

/// Process-wide log for invalid records plus one named queue per
/// metaprotocol.
#[derive(Default)]
pub(crate) struct EventQueues {
  invalid: Vec<InvalidInscriptionEvent>,
  metaprotocol: BTreeMap<String, VecDeque<InscriptionEvent>>,
}

impl EventQueues {
  pub(crate) fn emit_invalid(&mut self, event: InvalidInscriptionEvent) {
    self.invalid.push(event);
  }

  pub(crate) fn emit(&mut self, event: InscriptionEvent) {
    self
      .metaprotocol
      .entry(event.metaprotocol.clone())
      .or_default()
      .push_back(event);
  }

  pub(crate) fn drain_invalid(&mut self) -> Vec<InvalidInscriptionEvent> {
    mem::take(&mut self.invalid)
  }

  pub(crate) fn drain_metaprotocol(&mut self, metaprotocol: &str) -> Vec<InscriptionEvent> {
    self
      .metaprotocol
      .get_mut(metaprotocol)
      .map(|queue| queue.drain(..).collect())
      .unwrap_or_default()
  }
}
