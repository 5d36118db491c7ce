// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Metadata driven SCALE decoding of extrinsics and event records.

use super::value::ValueConverter;
use super::{DecodedEvent, DecodedExtrinsic, ExtrinsicCodec};
use crate::consts::pallets;
use crate::error::DecodeError;
use crate::runtime::RuntimeMetadataHandle;
use scale_info::PortableRegistry;
use scale_value::{Composite, Value, ValueDef};
use std::ops::Range;

const IMMORTAL_ERA: &str = "0x00";

/// [`ExtrinsicCodec`] on `frame-decode` for the extrinsic envelope and
/// `scale-value` for the values inside it.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScaleCodec;

fn decode_type(
    cursor: &mut &[u8],
    type_id: u32,
    types: &PortableRegistry,
    what: &'static str,
) -> Result<Value<u32>, DecodeError> {
    scale_value::scale::decode_as_type(cursor, type_id, types).map_err(|e| DecodeError::Type {
        what,
        type_id,
        reason: e.to_string(),
    })
}

/// Decode the value occupying exactly `range` of `bytes`.
fn decode_range(
    bytes: &[u8],
    range: Range<usize>,
    type_id: u32,
    types: &PortableRegistry,
    what: &'static str,
) -> Result<Value<u32>, DecodeError> {
    let slice = bytes
        .get(range)
        .ok_or_else(|| DecodeError::UnexpectedShape(format!("{what} range")))?;
    let cursor = &mut &slice[..];
    let value = decode_type(cursor, type_id, types, what)?;
    ensure_consumed(cursor, what)?;
    Ok(value)
}

fn ensure_consumed(cursor: &[u8], what: &'static str) -> Result<(), DecodeError> {
    if cursor.is_empty() {
        Ok(())
    } else {
        Err(DecodeError::TrailingBytes {
            what,
            remaining: cursor.len(),
        })
    }
}

fn named_field<'v>(
    fields: &'v [(String, Value<u32>)],
    name: &str,
) -> Result<&'v Value<u32>, DecodeError> {
    fields
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v)
        .ok_or_else(|| DecodeError::UnexpectedShape(format!("event record without '{name}'")))
}

impl ScaleCodec {
    fn event_record(
        converter: &ValueConverter<'_>,
        event_index: u32,
        record: &Value<u32>,
    ) -> Result<DecodedEvent, DecodeError> {
        let ValueDef::Composite(Composite::Named(fields)) = &record.value else {
            return Err(DecodeError::UnexpectedShape("event record".to_string()));
        };

        let phase = named_field(fields, "phase")?;
        let extrinsic_index = match &phase.value {
            ValueDef::Variant(v) if v.name == "ApplyExtrinsic" => v
                .values
                .values()
                .next()
                .and_then(|index| converter.convert(index).as_u128())
                .and_then(|index| u32::try_from(index).ok()),
            _ => None,
        };

        let event = named_field(fields, "event")?;
        let ValueDef::Variant(pallet) = &event.value else {
            return Err(DecodeError::UnexpectedShape("runtime event".to_string()));
        };
        let Some(inner) = pallet.values.values().next() else {
            return Err(DecodeError::UnexpectedShape(format!(
                "event of pallet {}",
                pallet.name
            )));
        };
        let ValueDef::Variant(variant) = &inner.value else {
            return Err(DecodeError::UnexpectedShape(format!(
                "event of pallet {}",
                pallet.name
            )));
        };

        Ok(DecodedEvent {
            module_id: pallet.name.clone(),
            event_id: variant.name.clone(),
            extrinsic_index,
            event_index,
            params: converter.variant_params(inner.context, variant),
        })
    }
}

impl ExtrinsicCodec for ScaleCodec {
    fn decode_extrinsic(
        &self,
        bytes: &[u8],
        metadata: &RuntimeMetadataHandle,
    ) -> Result<DecodedExtrinsic, DecodeError> {
        let types = metadata.types();
        let converter = ValueConverter::new(types, metadata.extrinsic().call_ty);

        let cursor = &mut &bytes[..];
        let envelope = metadata
            .decode_extrinsic_envelope(cursor)
            .map_err(|e| DecodeError::Extrinsic(e.to_string()))?;
        ensure_consumed(cursor, "extrinsic")?;

        let mut signer = None;
        let mut signature = None;
        let mut nonce = None;
        let mut era = IMMORTAL_ERA.to_string();

        if let Some(payload) = envelope.signature_payload() {
            let address = decode_range(
                bytes,
                payload.address_range(),
                *payload.address_type(),
                types,
                "extrinsic address",
            )?;
            signer = converter.convert(&address).account_id();

            let sig = decode_range(
                bytes,
                payload.signature_range(),
                *payload.signature_type(),
                types,
                "extrinsic signature",
            )?;
            signature = converter
                .convert(&sig)
                .as_bytes()
                .map(|b| format!("0x{}", hex::encode(b)));
        }

        if let Some(extensions) = envelope.transaction_extension_payload() {
            for extension in extensions.iter() {
                match extension.name() {
                    "CheckMortality" | "CheckEra" => {
                        let encoded = bytes.get(extension.range()).ok_or_else(|| {
                            DecodeError::UnexpectedShape("era extension range".to_string())
                        })?;
                        era = format!("0x{}", hex::encode(encoded));
                    }
                    "CheckNonce" => {
                        let value = decode_range(
                            bytes,
                            extension.range(),
                            *extension.ty(),
                            types,
                            "nonce extension",
                        )?;
                        nonce = converter
                            .convert(&value)
                            .as_u128()
                            .and_then(|n| u64::try_from(n).ok());
                    }
                    _ => {}
                }
            }
        }

        let call_value = decode_range(
            bytes,
            envelope.call_data_range(),
            metadata.extrinsic().call_ty,
            types,
            "call",
        )?;
        let call = converter.call(&call_value)?;

        tracing::trace!(
            module = %call.module,
            function = %call.function,
            signed = signer.is_some(),
            "Decoded extrinsic"
        );

        Ok(DecodedExtrinsic {
            call,
            signer,
            signature,
            nonce,
            era,
        })
    }

    fn decode_events(
        &self,
        bytes: &[u8],
        metadata: &RuntimeMetadataHandle,
    ) -> Result<Vec<DecodedEvent>, DecodeError> {
        let (_, entry) = metadata
            .storage_entry(pallets::SYSTEM, pallets::EVENTS_STORAGE)
            .map_err(|e| DecodeError::UnexpectedShape(e.to_string()))?;
        let types = metadata.types();
        let converter = ValueConverter::new(types, metadata.extrinsic().call_ty);

        let cursor = &mut &bytes[..];
        let records = decode_type(cursor, entry.value_ty(), types, "event records")?;
        ensure_consumed(cursor, "event records")?;

        let ValueDef::Composite(records) = &records.value else {
            return Err(DecodeError::UnexpectedShape("event records".to_string()));
        };

        records
            .values()
            .enumerate()
            .map(|(index, record)| {
                let index = u32::try_from(index)
                    .map_err(|_| DecodeError::UnexpectedShape("event log length".to_string()))?;
                Self::event_record(&converter, index, record)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{ParamValue, TypeTag};
    use crate::test_fixtures::{self, ALICE, BOB, CHARLIE, DAVE};
    use parity_scale_codec::Encode;
    use sp_runtime::generic::Era;

    #[test]
    fn decodes_signed_transfer() {
        let metadata = test_fixtures::metadata();
        let era = Era::mortal(64, 1_000);
        let bytes = test_fixtures::signed_extrinsic(
            ALICE,
            [0xAB; 64],
            7,
            era,
            test_fixtures::transfer(BOB, 1_000),
        );

        let decoded = ScaleCodec.decode_extrinsic(&bytes, &metadata).unwrap();

        assert_eq!(decoded.call.module, "Balances");
        assert_eq!(decoded.call.function, "transfer");
        assert_eq!(decoded.signer, Some(ALICE));
        assert_eq!(
            decoded.signature,
            Some(format!("0x{}", hex::encode([0xAB; 64])))
        );
        assert_eq!(decoded.nonce, Some(7));
        assert_eq!(decoded.era, format!("0x{}", hex::encode(era.encode())));

        let dest = decoded.call.param("dest").unwrap();
        assert_eq!(dest.tag, TypeTag::Address);
        assert_eq!(dest.value.account_id(), Some(BOB));

        let value = decoded.call.param("value").unwrap();
        assert_eq!(value.type_name, "Balance");
        assert_eq!(value.tag, TypeTag::Balance);
        assert_eq!(value.value, ParamValue::Uint(1_000));
    }

    #[test]
    fn decodes_unsigned_timestamp() {
        let metadata = test_fixtures::metadata();
        let bytes = test_fixtures::unsigned_extrinsic(test_fixtures::timestamp_set(1_700_000_000_123));

        let decoded = ScaleCodec.decode_extrinsic(&bytes, &metadata).unwrap();

        assert_eq!(decoded.call.module, "Timestamp");
        assert_eq!(decoded.call.function, "set");
        assert!(decoded.signer.is_none());
        assert!(decoded.signature.is_none());
        assert_eq!(decoded.era, "0x00");

        let now = decoded.call.param("now").unwrap();
        assert_eq!(now.tag, TypeTag::Moment);
        assert_eq!(now.value.as_u128(), Some(1_700_000_000_123));
    }

    #[test]
    fn decodes_nested_batch_calls() {
        let metadata = test_fixtures::metadata();
        let bytes = test_fixtures::signed_extrinsic(
            ALICE,
            [1; 64],
            0,
            Era::Immortal,
            test_fixtures::batch(vec![
                test_fixtures::transfer(CHARLIE, 5),
                test_fixtures::remark(b"hi".to_vec()),
                test_fixtures::transfer_keep_alive(DAVE, 6),
            ]),
        );

        let decoded = ScaleCodec.decode_extrinsic(&bytes, &metadata).unwrap();
        assert_eq!(decoded.call.module, "Utility");
        assert_eq!(decoded.era, "0x00");

        let calls = decoded.call.param("calls").unwrap();
        assert_eq!(calls.tag, TypeTag::Call);
        let ParamValue::Sequence(inner) = &calls.value else {
            panic!("expected a sequence of calls, got {:?}", calls.value);
        };
        let inner: Vec<_> = inner.iter().map(|c| c.as_call().unwrap()).collect();
        assert_eq!(inner.len(), 3);
        assert_eq!(inner[0].function, "transfer");
        assert_eq!(inner[0].param("dest").unwrap().value.account_id(), Some(CHARLIE));
        assert_eq!(inner[1].module, "System");
        assert_eq!(
            inner[1].param("remark").unwrap().value,
            ParamValue::Bytes(b"hi".to_vec())
        );
        assert_eq!(inner[2].function, "transfer_keep_alive");
    }

    #[test]
    fn rejects_truncated_and_padded_extrinsics() {
        let metadata = test_fixtures::metadata();
        let bytes = test_fixtures::unsigned_extrinsic(test_fixtures::transfer(BOB, 1));

        assert!(ScaleCodec.decode_extrinsic(&bytes[..bytes.len() - 1], &metadata).is_err());

        let mut padded = bytes.clone();
        padded.push(0);
        assert!(ScaleCodec.decode_extrinsic(&padded, &metadata).is_err());

        // Declares a signed extrinsic but carries garbage.
        assert!(ScaleCodec.decode_extrinsic(&[0x0c, 0x84, 0xff, 0xff], &metadata).is_err());
    }

    fn with_version_byte(version: u8, call: test_fixtures::RuntimeCall) -> Vec<u8> {
        let mut body = vec![version];
        call.encode_to(&mut body);
        body.encode()
    }

    #[test]
    fn decodes_bare_v5_extrinsic() {
        let metadata = test_fixtures::metadata();
        let bytes = with_version_byte(0x05, test_fixtures::transfer(BOB, 9));

        let decoded = ScaleCodec.decode_extrinsic(&bytes, &metadata).unwrap();

        assert_eq!(decoded.call.module, "Balances");
        assert_eq!(decoded.call.function, "transfer");
        assert_eq!(decoded.call.param("dest").unwrap().value.account_id(), Some(BOB));
        assert!(decoded.signer.is_none());
        assert_eq!(decoded.era, "0x00");
    }

    #[test]
    fn rejects_unknown_extrinsic_version() {
        let metadata = test_fixtures::metadata();
        let bytes = with_version_byte(0x03, test_fixtures::remark(vec![]));

        assert!(matches!(
            ScaleCodec.decode_extrinsic(&bytes, &metadata),
            Err(DecodeError::Extrinsic(_))
        ));
    }

    #[test]
    fn decodes_event_records() {
        let metadata = test_fixtures::metadata();
        let bytes = test_fixtures::events_bytes(vec![
            test_fixtures::record(Some(0), test_fixtures::extrinsic_success()),
            test_fixtures::record(Some(2), test_fixtures::balances_transfer(ALICE, BOB, 1_000)),
            test_fixtures::record(Some(2), test_fixtures::treasury_deposit(80)),
            test_fixtures::record(None, test_fixtures::balances_deposit(CHARLIE, 1)),
        ]);

        let events = ScaleCodec.decode_events(&bytes, &metadata).unwrap();
        assert_eq!(events.len(), 4);

        assert_eq!(events[0].module_id, "System");
        assert_eq!(events[0].event_id, "ExtrinsicSuccess");
        assert_eq!(events[0].extrinsic_index, Some(0));

        let transfer = &events[1];
        assert_eq!(transfer.module_id, "Balances");
        assert_eq!(transfer.event_id, "Transfer");
        assert_eq!(transfer.event_index, 1);
        assert_eq!(transfer.params[0].tag, TypeTag::AccountId);
        assert_eq!(transfer.params[0].value.account_id(), Some(ALICE));
        assert_eq!(transfer.params[1].value.account_id(), Some(BOB));
        assert_eq!(transfer.params[2].tag, TypeTag::Balance);
        assert_eq!(transfer.params[2].value.as_decimal_string().as_deref(), Some("1000"));

        assert_eq!(events[2].module_id, "Treasury");
        assert_eq!(events[3].extrinsic_index, None);
        assert_eq!(events[3].event_index, 3);
    }

    #[test]
    fn rejects_corrupt_event_log() {
        let metadata = test_fixtures::metadata();
        let mut bytes = test_fixtures::events_bytes(vec![test_fixtures::record(
            Some(0),
            test_fixtures::extrinsic_success(),
        )]);
        bytes.truncate(bytes.len() - 1);

        assert!(ScaleCodec.decode_events(&bytes, &metadata).is_err());
    }
}
