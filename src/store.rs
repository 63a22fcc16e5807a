use super::*;

/// Shared singleton: the mint counters, the sequence-number index of every
/// inscription ever created, and the inscription objects themselves, parented
/// under the store's identity.
pub struct InscriptionStore {
  object_id: ObjectId,
  cursed_inscription_count: u32,
  blessed_inscription_count: u32,
  next_sequence_number: u32,
  sequence_number_to_id: BTreeMap<u32, InscriptionId>,
  objects: BTreeMap<InscriptionId, InscriptionObject>,
  locations: BTreeMap<ObjectId, InscriptionId>,
}

impl InscriptionStore {
  pub(crate) fn new() -> Self {
    Self {
      object_id: ObjectId::derive(ObjectId::NULL, b"inscription_store", "store"),
      cursed_inscription_count: 0,
      blessed_inscription_count: 0,
      next_sequence_number: 0,
      sequence_number_to_id: BTreeMap::new(),
      objects: BTreeMap::new(),
      locations: BTreeMap::new(),
    }
  }

  pub fn object_id(&self) -> ObjectId {
    self.object_id
  }

  pub fn blessed_inscription_count(&self) -> u32 {
    self.blessed_inscription_count
  }

  pub fn cursed_inscription_count(&self) -> u32 {
    self.cursed_inscription_count
  }

  pub fn next_sequence_number(&self) -> u32 {
    self.next_sequence_number
  }

  pub fn inscription_count(&self) -> usize {
    self.objects.len()
  }

  pub fn inscription_id(&self, sequence_number: u32) -> Option<InscriptionId> {
    self.sequence_number_to_id.get(&sequence_number).copied()
  }

  /// The identity an inscription object has, or would have, under this store.
  pub fn derive_inscription_id(&self, id: InscriptionId) -> ObjectId {
    ObjectId::derive(self.object_id, &id.value(), "inscription")
  }

  pub fn object(&self, id: InscriptionId) -> Option<&InscriptionObject> {
    self.objects.get(&id)
  }

  pub fn object_mut(&mut self, id: InscriptionId) -> Option<&mut InscriptionObject> {
    self.objects.get_mut(&id)
  }

  pub fn object_by_object_id(&self, object_id: ObjectId) -> Option<&InscriptionObject> {
    self.objects.get(self.locations.get(&object_id)?)
  }

  pub(crate) fn object_mut_by_object_id(
    &mut self,
    object_id: ObjectId,
  ) -> Option<&mut InscriptionObject> {
    let id = *self.locations.get(&object_id)?;
    self.objects.get_mut(&id)
  }

  /// Allocates a blessed `(inscription_number, sequence_number)` pair.
  pub(crate) fn allocate_blessed(&mut self) -> (u32, u32) {
    let inscription_number = self.blessed_inscription_count;
    self.blessed_inscription_count += 1;

    let sequence_number = self.next_sequence_number;
    self.next_sequence_number += 1;

    (inscription_number, sequence_number)
  }

  pub(crate) fn create(&mut self, inscription: Inscription, owner: ScriptBuf) -> Result<ObjectId> {
    let id = inscription.id();

    if self.objects.contains_key(&id) {
      bail!("inscription `{id}` already indexed");
    }

    let object_id = self.derive_inscription_id(id);

    self
      .sequence_number_to_id
      .insert(inscription.sequence_number, id);

    self
      .objects
      .insert(id, InscriptionObject::new(object_id, inscription, owner));

    self.locations.insert(object_id, id);

    Ok(object_id)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn inscription(sequence_number: u32) -> Inscription {
    Inscription {
      txid: txid(1),
      index: sequence_number,
      offset: 0,
      sequence_number,
      inscription_number: sequence_number,
      is_curse: false,
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
  fn allocation_is_monotonic() {
    let mut store = InscriptionStore::new();

    assert_eq!(store.allocate_blessed(), (0, 0));
    assert_eq!(store.allocate_blessed(), (1, 1));
    assert_eq!(store.blessed_inscription_count(), 2);
    assert_eq!(store.cursed_inscription_count(), 0);
    assert_eq!(store.next_sequence_number(), 2);
  }

  #[test]
  fn create_records_sequence_index() {
    let mut store = InscriptionStore::new();

    let (inscription_number, sequence_number) = store.allocate_blessed();
    assert_eq!((inscription_number, sequence_number), (0, 0));

    let object_id = store.create(inscription(0), ScriptBuf::new()).unwrap();

    assert_eq!(store.inscription_id(0), Some(inscription(0).id()));
    assert_eq!(store.inscription_id(1), None);
    assert_eq!(
      store.object_by_object_id(object_id).unwrap().object_id(),
      object_id,
    );
    assert_eq!(object_id, store.derive_inscription_id(inscription(0).id()));
  }

  #[test]
  fn create_refuses_duplicates() {
    let mut store = InscriptionStore::new();

    store.allocate_blessed();
    store.create(inscription(0), ScriptBuf::new()).unwrap();

    assert!(store.create(inscription(0), ScriptBuf::new()).is_err());
  }
}
