#![allow(clippy::too_many_arguments, clippy::type_complexity)]

use {
  self::{event::EventQueues, tag::Tag},
  anyhow::{anyhow, bail, Error},
  bitcoin::{
    blockdata::{
      constants::{COIN_VALUE, MAX_SCRIPT_ELEMENT_SIZE, SUBSIDY_HALVING_INTERVAL},
      opcodes, script,
    },
    hashes::{sha256, Hash},
    OutPoint, Script, ScriptBuf, Transaction, Txid, Witness,
  },
  derive_more::Display,
  log::{debug, warn},
  serde::{Deserialize, Serialize},
  serde_with::{DeserializeFromStr, SerializeDisplay},
  std::{
    any::{self, Any},
    collections::{BTreeMap, VecDeque},
    fmt::{self, Display, Formatter},
    mem,
    num::ParseIntError,
    str::{self, FromStr},
  },
  thiserror::Error,
};

pub use crate::{
  areas::{AreaError, PermanentArea, TemporaryArea},
  chain::Chain,
  charm::InscriptionCharm,
  config::Config,
  curse::Curse,
  envelope::{Envelope, ParsedEnvelope},
  epoch::Epoch,
  event::{InscriptionEvent, InscriptionEventType, InvalidInscriptionEvent},
  height::Height,
  inscription::Inscription,
  inscription_id::InscriptionId,
  metaprotocol::{MetaprotocolError, MetaprotocolRegistry, MetaprotocolValidity, SystemAuthority},
  object::{InscriptionObject, ObjectError, ObjectId},
  record::InscriptionRecord,
  sat_point::SatPoint,
  store::InscriptionStore,
  tracker::{match_coinbase_and_generate_sat_point, match_utxo_and_generate_sat_point, Flotsam},
  updater::InscriptionUpdater,
  utxo::Utxo,
};

pub type Result<T = (), E = Error> = std::result::Result<T, E>;

#[macro_use]
mod macros;

mod areas;
mod chain;
mod charm;
mod config;
mod curse;
mod envelope;
mod epoch;
mod event;
mod height;
mod inscription;
mod inscription_id;
mod metaprotocol;
mod object;
mod record;
mod sat_point;
mod store;
mod tag;
mod tracker;
mod updater;
mod utxo;

#[cfg(test)]
mod test;

#[cfg(test)]
use self::test::*;
