use super::*;

/// Capability handed out once, at genesis. Registration of metaprotocol
/// handlers requires a reference to it.
pub struct SystemAuthority(());

impl SystemAuthority {
  pub(crate) fn new() -> Self {
    Self(())
  }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetaprotocolError {
  #[error("metaprotocol `{0}` is already registered")]
  AlreadyRegistered(String),
  #[error("inscription `{inscription}` is not handled by protocol type `{protocol_type}`")]
  ProtocolMismatch {
    inscription: InscriptionId,
    protocol_type: &'static str,
  },
}

impl MetaprotocolError {
  pub fn code(&self) -> u32 {
    match self {
      Self::AlreadyRegistered(_) => 1,
      Self::ProtocolMismatch { .. } => 2,
    }
  }
}

/// Validity verdict sealed onto an inscription by its metaprotocol handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaprotocolValidity {
  pub protocol_type: &'static str,
  pub is_valid: bool,
  pub invalid_reason: Option<String>,
}

/// Insertion-unique mapping from metaprotocol name to the handler's protocol
/// type name.
#[derive(Default)]
pub struct MetaprotocolRegistry {
  protocols: BTreeMap<String, &'static str>,
}

impl MetaprotocolRegistry {
  pub(crate) fn register(
    &mut self,
    metaprotocol: String,
    protocol_type: &'static str,
  ) -> Result<(), MetaprotocolError> {
    if self.protocols.contains_key(&metaprotocol) {
      return Err(MetaprotocolError::AlreadyRegistered(metaprotocol));
    }

    self.protocols.insert(metaprotocol, protocol_type);

    Ok(())
  }

  pub fn protocol_type(&self, metaprotocol: &str) -> Option<&'static str> {
    self.protocols.get(metaprotocol).copied()
  }
}

impl InscriptionUpdater {
  pub fn register_metaprotocol<T: Any>(
    &mut self,
    _authority: &SystemAuthority,
    metaprotocol: impl Into<String>,
  ) -> Result<(), MetaprotocolError> {
    self
      .registry
      .register(metaprotocol.into(), any::type_name::<T>())
  }

  pub fn seal_metaprotocol_validity<T: Any>(
    &mut self,
    inscription: InscriptionId,
    is_valid: bool,
    invalid_reason: Option<String>,
  ) -> Result {
    let object = self.handled_object::<T>(inscription)?;

    object.set_validity(MetaprotocolValidity {
      protocol_type: any::type_name::<T>(),
      is_valid,
      invalid_reason,
    })?;

    Ok(())
  }

  pub fn add_metaprotocol_attachment<T: Any + Send>(
    &mut self,
    inscription: InscriptionId,
    attachment: T,
  ) -> Result {
    self
      .handled_object::<T>(inscription)?
      .add_attachment(attachment)
  }

  /// The inscription's object, provided it exists and declares a
  /// metaprotocol registered to exactly `T`.
  fn handled_object<T: Any>(
    &mut self,
    inscription: InscriptionId,
  ) -> Result<&mut InscriptionObject, MetaprotocolError> {
    let protocol_type = any::type_name::<T>();
    let mismatch = MetaprotocolError::ProtocolMismatch {
      inscription,
      protocol_type,
    };

    let declared = self
      .store
      .object(inscription)
      .and_then(|object| object.inscription().metaprotocol.clone())
      .ok_or_else(|| mismatch.clone())?;

    if self.registry.protocol_type(&declared) != Some(protocol_type) {
      return Err(mismatch);
    }

    self.store.object_mut(inscription).ok_or(mismatch)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  struct Names;
  struct Tokens;

  #[test]
  fn registration_is_insertion_unique() {
    let (mut updater, authority) = updater();

    updater
      .register_metaprotocol::<Names>(&authority, "sns")
      .unwrap();

    let err = updater
      .register_metaprotocol::<Tokens>(&authority, "sns")
      .unwrap_err();

    assert_eq!(err, MetaprotocolError::AlreadyRegistered("sns".into()));
    assert_eq!(err.code(), 1);
  }

  #[test]
  fn seal_requires_matching_protocol_type() {
    let (mut updater, authority) = updater();

    updater
      .register_metaprotocol::<Names>(&authority, "sns")
      .unwrap();

    let id = index_inscription(&mut updater, "sns");

    let err = updater
      .seal_metaprotocol_validity::<Tokens>(id, true, None)
      .unwrap_err()
      .downcast::<MetaprotocolError>()
      .unwrap();

    assert_eq!(err.code(), 2);

    updater
      .seal_metaprotocol_validity::<Names>(id, false, Some("name taken".into()))
      .unwrap();

    assert_eq!(
      updater
        .store()
        .object(id)
        .unwrap()
        .metaprotocol_validity(),
      Some(&MetaprotocolValidity {
        protocol_type: any::type_name::<Names>(),
        is_valid: false,
        invalid_reason: Some("name taken".into()),
      }),
    );
  }

  #[test]
  fn seal_requires_existing_inscription() {
    let (mut updater, authority) = updater();

    updater
      .register_metaprotocol::<Names>(&authority, "sns")
      .unwrap();

    let err = updater
      .seal_metaprotocol_validity::<Names>(inscription_id(9), true, None)
      .unwrap_err()
      .downcast::<MetaprotocolError>()
      .unwrap();

    assert_eq!(err.code(), 2);
  }

  #[test]
  fn attachments_are_keyed_by_protocol_type() {
    let (mut updater, authority) = updater();

    updater
      .register_metaprotocol::<Names>(&authority, "sns")
      .unwrap();

    let id = index_inscription(&mut updater, "sns");

    updater
      .add_metaprotocol_attachment::<Names>(id, Names)
      .unwrap();

    let object = updater.store().object(id).unwrap();

    assert!(object.attachment::<Names>().is_some());
    assert!(object.attachment::<Tokens>().is_none());
    assert!(object
      .dynamic_fields()
      .contains(&any::type_name::<Names>()));
  }
}
