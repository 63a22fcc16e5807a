use super::*;

pub(crate) const PERMANENT_AREA: &str = "permanent_area";
pub(crate) const TEMPORARY_AREA: &str = "temporary_area";
pub(crate) const METAPROTOCOL_VALIDITY: &str = "metaprotocol_validity";
pub(crate) const INSCRIPTION_CHARM: &str = "inscription_charm";

/// Deterministic object identity: the digest of the parent's identity, the
/// child key, and a type tag. Stable across nodes; no counter involved.
#[derive(
  Debug, PartialEq, Copy, Clone, Hash, Eq, PartialOrd, Ord, DeserializeFromStr, SerializeDisplay,
)]
pub struct ObjectId([u8; 32]);

impl ObjectId {
  pub(crate) const NULL: ObjectId = ObjectId([0; 32]);

  pub(crate) fn derive(parent: ObjectId, key: &[u8], type_tag: &str) -> Self {
    let mut preimage = Vec::with_capacity(32 + 8 + key.len() + type_tag.len());
    preimage.extend(parent.0);
    preimage.extend(u64::try_from(key.len()).unwrap().to_le_bytes());
    preimage.extend(key);
    preimage.extend(type_tag.as_bytes());

    Self(sha256::Hash::hash(&preimage).to_byte_array())
  }
}

impl Display for ObjectId {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}", hex::encode(self.0))
  }
}

#[derive(Debug, Error)]
pub enum ParseObjectIdError {
  #[error("invalid object id length: {0}")]
  Length(usize),
  #[error("invalid object id: {0}")]
  Hex(hex::FromHexError),
}

impl FromStr for ObjectId {
  type Err = ParseObjectIdError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.len() != 64 {
      return Err(ParseObjectIdError::Length(s.len()));
    }

    let mut bytes = [0; 32];
    hex::decode_to_slice(s, &mut bytes).map_err(ParseObjectIdError::Hex)?;

    Ok(Self(bytes))
  }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ObjectError {
  #[error("inscription object `{0}` is frozen")]
  Frozen(ObjectId),
}

/// An inscription together with its ownership record and dynamic fields. Once
/// frozen every mutating accessor refuses.
pub struct InscriptionObject {
  object_id: ObjectId,
  owner: ScriptBuf,
  frozen: bool,
  inscription: Inscription,
  permanent: Option<PermanentArea>,
  temporary: Option<TemporaryArea>,
  validity: Option<MetaprotocolValidity>,
  charm: Option<InscriptionCharm>,
  attachments: BTreeMap<&'static str, Box<dyn Any + Send>>,
}

impl InscriptionObject {
  pub(crate) fn new(object_id: ObjectId, inscription: Inscription, owner: ScriptBuf) -> Self {
    Self {
      object_id,
      owner,
      frozen: false,
      inscription,
      permanent: None,
      temporary: None,
      validity: None,
      charm: None,
      attachments: BTreeMap::new(),
    }
  }

  pub fn object_id(&self) -> ObjectId {
    self.object_id
  }

  pub fn owner(&self) -> &Script {
    &self.owner
  }

  pub fn is_frozen(&self) -> bool {
    self.frozen
  }

  pub fn inscription(&self) -> &Inscription {
    &self.inscription
  }

  pub fn charm(&self) -> Option<&InscriptionCharm> {
    self.charm.as_ref()
  }

  pub fn metaprotocol_validity(&self) -> Option<&MetaprotocolValidity> {
    self.validity.as_ref()
  }

  /// Keys of the dynamic fields currently present, in the persisted layout's
  /// terms.
  pub fn dynamic_fields(&self) -> Vec<&'static str> {
    let mut fields = Vec::new();

    if self.permanent.is_some() {
      fields.push(PERMANENT_AREA);
    }

    if self.temporary.is_some() {
      fields.push(TEMPORARY_AREA);
    }

    if self.validity.is_some() {
      fields.push(METAPROTOCOL_VALIDITY);
    }

    if self.charm.is_some() {
      fields.push(INSCRIPTION_CHARM);
    }

    fields.extend(self.attachments.keys());

    fields
  }

  fn ensure_unfrozen(&self) -> Result<(), ObjectError> {
    if self.frozen {
      Err(ObjectError::Frozen(self.object_id))
    } else {
      Ok(())
    }
  }

  pub fn permanent_area(&self) -> Option<&PermanentArea> {
    self.permanent.as_ref()
  }

  pub fn permanent_area_mut(&mut self) -> Result<&mut PermanentArea, ObjectError> {
    self.ensure_unfrozen()?;
    Ok(self.permanent.get_or_insert_with(PermanentArea::default))
  }

  pub fn destroy_empty_permanent_area(&mut self) -> Result {
    self.ensure_unfrozen()?;

    if let Some(area) = &self.permanent {
      if !area.is_empty() {
        return Err(AreaError::NotEmpty(area.len()).into());
      }

      self.permanent = None;
    }

    Ok(())
  }

  pub fn temporary_area(&self) -> Option<&TemporaryArea> {
    self.temporary.as_ref()
  }

  pub fn temporary_area_mut(&mut self) -> Result<&mut TemporaryArea, ObjectError> {
    self.ensure_unfrozen()?;
    Ok(self.temporary.get_or_insert_with(TemporaryArea::default))
  }

  pub(crate) fn drop_temporary_area(&mut self) {
    self.temporary = None;
  }

  pub fn attachment<T: Any>(&self) -> Option<&T> {
    self.attachments.get(any::type_name::<T>())?.downcast_ref()
  }

  pub(crate) fn add_attachment<T: Any + Send>(&mut self, attachment: T) -> Result {
    self.ensure_unfrozen()?;

    let key = any::type_name::<T>();

    if self.attachments.contains_key(key) {
      return Err(AreaError::Occupied(key).into());
    }

    self.attachments.insert(key, Box::new(attachment));

    Ok(())
  }

  pub(crate) fn set_validity(&mut self, validity: MetaprotocolValidity) -> Result<(), ObjectError> {
    self.ensure_unfrozen()?;
    self.validity = Some(validity);
    Ok(())
  }

  pub(crate) fn set_offset(&mut self, offset: u64) -> Result<(), ObjectError> {
    self.ensure_unfrozen()?;
    self.inscription.offset = offset;
    Ok(())
  }

  pub(crate) fn transfer(&mut self, owner: ScriptBuf) -> Result<(), ObjectError> {
    self.ensure_unfrozen()?;
    self.owner = owner;
    Ok(())
  }

  /// Terminal: records the burn charm, then freezes the object for good.
  pub(crate) fn burn(&mut self) -> Result<(), ObjectError> {
    self.ensure_unfrozen()?;
    self.charm.get_or_insert_with(InscriptionCharm::default).burned = true;
    self.frozen = true;
    Ok(())
  }
}
