use super::*;

/// Drives inscriptions through confirmed transactions: extraction and
/// numbering of new inscriptions, relocation of old ones on spend, and
/// coinbase pickup of anything that fell into fees.
///
/// The outer indexer calls, for each transaction in block order,
/// `process_transaction`, then `spend_utxo` per input, and finally
/// `handle_coinbase_tx` with the block's accumulated flotsams.
pub struct InscriptionUpdater {
  chain: Chain,
  pub(crate) store: InscriptionStore,
  pub(crate) registry: MetaprotocolRegistry,
  events: EventQueues,
}

impl InscriptionUpdater {
  /// Initializes the engine's shared state. `genesis_height` must sit at or
  /// after the chain's jubilee height: this engine never mints cursed
  /// inscriptions.
  pub fn genesis_init(config: Config, genesis_height: Height) -> Result<(Self, SystemAuthority)> {
    if genesis_height < config.chain.jubilee_height() {
      bail!(
        "genesis height {genesis_height} precedes the {} jubilee height {}",
        config.chain,
        config.chain.jubilee_height(),
      );
    }

    Ok((
      Self {
        chain: config.chain,
        store: InscriptionStore::new(),
        registry: MetaprotocolRegistry::default(),
        events: EventQueues::default(),
      },
      SystemAuthority::new(),
    ))
  }

  pub fn chain(&self) -> Chain {
    self.chain
  }

  pub fn store(&self) -> &InscriptionStore {
    &self.store
  }

  pub fn store_mut(&mut self) -> &mut InscriptionStore {
    &mut self.store
  }

  pub fn registry(&self) -> &MetaprotocolRegistry {
    &self.registry
  }

  pub fn take_invalid_events(&mut self) -> Vec<InvalidInscriptionEvent> {
    self.events.drain_invalid()
  }

  pub fn take_metaprotocol_events(&mut self, metaprotocol: &str) -> Vec<InscriptionEvent> {
    self.events.drain_metaprotocol(metaprotocol)
  }

  /// Indexes the inscriptions revealed by `tx` and returns where each one
  /// landed.
  ///
  /// When the transaction has exactly one output per inscription, each
  /// inscription is assigned its own output at offset zero, matching wallet
  /// separate-outputs sends. Otherwise all of them land in the first output,
  /// keeping the offsets computed from the input sequence, which covers both
  /// same-sat and shared-output sends.
  pub fn process_transaction(
    &mut self,
    tx: &Transaction,
    input_utxo_values: &[u64],
  ) -> Result<Vec<SatPoint>> {
    let inscriptions = self.build_inscriptions(tx, input_utxo_values);

    let separate_outputs = tx.output.len() == inscriptions.len();

    let mut sat_points = Vec::new();

    for (i, mut inscription) in inscriptions.into_iter().enumerate() {
      let output_index = if separate_outputs {
        inscription.offset = 0;
        i.try_into().unwrap()
      } else {
        0
      };

      let owner = tx
        .output
        .get(usize::try_from(output_index).unwrap())
        .map(|tx_out| tx_out.script_pubkey.clone())
        .unwrap_or_default();

      let offset = inscription.offset;
      let sequence_number = inscription.sequence_number;
      let metaprotocol = inscription.metaprotocol.clone();

      let object_id = self.store.create(inscription, owner)?;

      if let Some(metaprotocol) = metaprotocol {
        self.events.emit(InscriptionEvent {
          metaprotocol,
          sequence_number,
          inscription_obj_id: object_id,
          event_type: InscriptionEventType::New,
        });
      }

      sat_points.push(SatPoint {
        output_index,
        offset,
        object_id,
      });
    }

    Ok(sat_points)
  }

  /// Relocates every inscription sealed on `utxo`, spent by input
  /// `input_index` of `tx`. Inscriptions that land in an output are
  /// transferred there; an inscription landing in an `OP_RETURN` output is
  /// burned and frozen; inscriptions that overflow into fees come back as
  /// flotsams, still owned by their origin holder until the coinbase picks
  /// them up.
  pub fn spend_utxo(
    &mut self,
    utxo: &mut Utxo,
    tx: &Transaction,
    input_utxo_values: &[u64],
    input_index: u32,
  ) -> Result<(Vec<SatPoint>, Vec<Flotsam>)> {
    let mut sat_points = Vec::new();
    let mut flotsams = Vec::new();

    for object_id in utxo.take_seals() {
      let object = self
        .store
        .object_mut_by_object_id(object_id)
        .ok_or_else(|| anyhow!("sealed object `{object_id}` is not indexed"))?;

      let origin_owner = object.owner().to_owned();

      let (matched, sat_point) = match_utxo_and_generate_sat_point(
        object.inscription().offset,
        object_id,
        tx,
        input_utxo_values,
        input_index,
      );

      object.drop_temporary_area();

      if matched {
        object.set_offset(sat_point.offset)?;

        let script_pubkey = &tx.output[usize::try_from(sat_point.output_index).unwrap()]
          .script_pubkey;

        if script_pubkey.is_op_return() {
          let sequence_number = object.inscription().sequence_number;
          let metaprotocol = object.inscription().metaprotocol.clone();

          object.burn()?;

          if let Some(metaprotocol) = metaprotocol {
            self.events.emit(InscriptionEvent {
              metaprotocol,
              sequence_number,
              inscription_obj_id: object_id,
              event_type: InscriptionEventType::Burn,
            });
          }
        } else {
          object.transfer(script_pubkey.clone())?;
        }

        sat_points.push(sat_point);
      } else {
        object.transfer(origin_owner)?;

        flotsams.push(Flotsam {
          output_index: sat_point.output_index,
          offset: sat_point.offset,
          object_id,
        });
      }
    }

    Ok((sat_points, flotsams))
  }

  /// Settles the block's flotsams into the coinbase outputs. `flotsams` must
  /// be in spend order across the block. The temporary area survives here:
  /// the fee hop and the coinbase pickup are one transfer.
  pub fn handle_coinbase_tx(
    &mut self,
    coinbase_tx: &Transaction,
    flotsams: &[Flotsam],
    block_height: Height,
  ) -> Result<Vec<SatPoint>> {
    let mut sat_points = Vec::new();

    for (flotsam_index, flotsam) in flotsams.iter().enumerate() {
      let sat_point =
        match_coinbase_and_generate_sat_point(flotsam_index, coinbase_tx, flotsams, block_height);

      let object = self
        .store
        .object_mut_by_object_id(flotsam.object_id)
        .ok_or_else(|| anyhow!("flotsam object `{}` is not indexed", flotsam.object_id))?;

      object.set_offset(sat_point.offset)?;

      object.transfer(
        coinbase_tx.output[usize::try_from(sat_point.output_index).unwrap()]
          .script_pubkey
          .clone(),
      )?;

      sat_points.push(sat_point);
    }

    Ok(sat_points)
  }

  /// Folds the transaction's surviving records into inscriptions, assigning
  /// numbers in ascending `(input, envelope)` order. A record's pointer
  /// offsets it within its input's value; pointers past the input value fall
  /// back to zero.
  fn build_inscriptions(&mut self, tx: &Transaction, input_utxo_values: &[u64]) -> Vec<Inscription> {
    let txid = tx.txid();

    let mut inscriptions = Vec::new();
    let mut envelopes = ParsedEnvelope::from_transaction(tx).into_iter().peekable();
    let mut next_offset: u64 = 0;
    let mut index_counter = 0;

    for (input_index, _tx_in) in tx.input.iter().enumerate() {
      let input_value = input_utxo_values
        .get(input_index)
        .copied()
        .unwrap_or_default();

      while let Some(envelope) = envelopes.peek() {
        if envelope.input != u32::try_from(input_index).unwrap() {
          break;
        }

        let envelope = envelopes.next().unwrap();

        if let Some(curse) = Curse::assess(&envelope) {
          debug!(
            "envelope {} of input {} in {txid} would curse as {curse}",
            envelope.offset, envelope.input,
          );
        }

        if !envelope.payload.is_valid() {
          warn!("dropping structurally defective record in input {input_index} of {txid}");

          self.events.emit_invalid(InvalidInscriptionEvent {
            txid,
            input_index: envelope.input,
            record: envelope.payload,
          });

          continue;
        }

        let record = envelope.payload;

        let pointer_field = record.pointer();

        let mut pointer = pointer_field.unwrap_or(0);
        if pointer >= input_value {
          pointer = 0;
        }

        let metaprotocol = record.metaprotocol().map(str::to_string);

        let parents = record
          .parents()
          .into_iter()
          .map(|parent| self.store.derive_inscription_id(parent))
          .collect();

        let (inscription_number, sequence_number) = self.store.allocate_blessed();

        inscriptions.push(Inscription {
          txid,
          index: index_counter,
          offset: next_offset + pointer,
          sequence_number,
          inscription_number,
          is_curse: false,
          body: record.body,
          content_encoding: record.content_encoding,
          content_type: record.content_type,
          metadata: record.metadata,
          metaprotocol,
          parents,
          pointer: pointer_field,
          rune: None,
        });

        index_counter += 1;
      }

      next_offset += input_value;
    }

    inscriptions
  }
}
