use super::*;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AreaError {
  #[error("a value of type `{0}` is already present")]
  Occupied(&'static str),
  #[error("area still holds {0} value(s)")]
  NotEmpty(usize),
}

/// Type-keyed bag: at most one value per type, keyed by the fully-qualified
/// type name.
#[derive(Default)]
struct Bag {
  values: BTreeMap<&'static str, Box<dyn Any + Send>>,
}

impl fmt::Debug for Bag {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    f.debug_set().entries(self.values.keys()).finish()
  }
}

impl Bag {
  fn add<T: Any + Send>(&mut self, value: T) -> Result<(), AreaError> {
    let key = any::type_name::<T>();

    if self.values.contains_key(key) {
      return Err(AreaError::Occupied(key));
    }

    self.values.insert(key, Box::new(value));

    Ok(())
  }

  fn contains<T: Any>(&self) -> bool {
    self.values.contains_key(any::type_name::<T>())
  }

  fn borrow<T: Any>(&self) -> Option<&T> {
    self.values.get(any::type_name::<T>())?.downcast_ref()
  }

  fn borrow_mut<T: Any>(&mut self) -> Option<&mut T> {
    self.values.get_mut(any::type_name::<T>())?.downcast_mut()
  }

  fn remove<T: Any>(&mut self) -> Option<T> {
    self
      .values
      .remove(any::type_name::<T>())
      .and_then(|value| value.downcast().ok())
      .map(|value| *value)
  }

  fn len(&self) -> usize {
    self.values.len()
  }

  fn is_empty(&self) -> bool {
    self.values.is_empty()
  }
}

/// Per-inscription state that survives transfers. Values are removed one at a
/// time; the area itself can only be destroyed once empty.
#[derive(Default, Debug)]
pub struct PermanentArea(Bag);

impl PermanentArea {
  pub fn add<T: Any + Send>(&mut self, value: T) -> Result<(), AreaError> {
    self.0.add(value)
  }

  pub fn contains<T: Any>(&self) -> bool {
    self.0.contains::<T>()
  }

  pub fn borrow<T: Any>(&self) -> Option<&T> {
    self.0.borrow()
  }

  pub fn borrow_mut<T: Any>(&mut self) -> Option<&mut T> {
    self.0.borrow_mut()
  }

  pub fn remove<T: Any>(&mut self) -> Option<T> {
    self.0.remove()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

/// Per-inscription scratch state, wiped wholesale whenever the carrying
/// satoshi moves.
#[derive(Default, Debug)]
pub struct TemporaryArea(Bag);

impl TemporaryArea {
  pub fn add<T: Any + Send>(&mut self, value: T) -> Result<(), AreaError> {
    self.0.add(value)
  }

  pub fn contains<T: Any>(&self) -> bool {
    self.0.contains::<T>()
  }

  pub fn borrow<T: Any>(&self) -> Option<&T> {
    self.0.borrow()
  }

  pub fn borrow_mut<T: Any>(&mut self) -> Option<&mut T> {
    self.0.borrow_mut()
  }

  pub fn remove<T: Any>(&mut self) -> Option<T> {
    self.0.remove()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}
