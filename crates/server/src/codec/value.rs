// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Typed view over decoded `scale_value::Value`s.
//!
//! Call and event params are converted into [`DecodedParam`]s carrying the
//! normalized Rust type name from the metadata, a [`TypeTag`] for the few
//! types the block pipeline cares about, and a [`ParamValue`].

use crate::error::DecodeError;
use primitive_types::U256;
use scale_info::{PortableRegistry, TypeDef, TypeDefPrimitive, form::PortableForm};
use scale_value::{Composite, Primitive, Value, ValueDef, Variant};

/// Closed set of param types the pipeline reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTag {
    AccountId,
    Address,
    Balance,
    Moment,
    Call,
    Other(String),
}

impl TypeTag {
    /// Classify a normalized type name.
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "AccountId" | "AccountId32" | "AccountIdOf" | "AccountId20" => Self::AccountId,
            "Address" | "MultiAddress" | "LookupSource" | "AccountIdLookupOf" | "Source" => {
                Self::Address
            }
            "Balance" | "BalanceOf" => Self::Balance,
            "Moment" | "MomentOf" => Self::Moment,
            n if n == "Call" || n.contains("RuntimeCall") || n.contains("<Call>") => Self::Call,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Bool(bool),
    Uint(u128),
    Int(i128),
    Text(String),
    Bytes(Vec<u8>),
    Sequence(Vec<ParamValue>),
    Composite(Vec<(Option<String>, ParamValue)>),
    Variant {
        name: String,
        fields: Vec<(Option<String>, ParamValue)>,
    },
    Call(DecodedCall),
}

impl ParamValue {
    /// The only inner value of a single field wrapper, if this is one.
    fn single_field(&self) -> Option<&ParamValue> {
        match self {
            Self::Composite(fields) | Self::Variant { fields, .. } if fields.len() == 1 => {
                Some(&fields[0].1)
            }
            _ => None,
        }
    }

    pub fn as_u128(&self) -> Option<u128> {
        match self {
            Self::Uint(n) => Some(*n),
            other => other.single_field()?.as_u128(),
        }
    }

    /// Decimal rendering of an integer value, looking through wrappers.
    pub fn as_decimal_string(&self) -> Option<String> {
        match self {
            Self::Uint(n) => Some(n.to_string()),
            Self::Int(n) => Some(n.to_string()),
            Self::Text(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
                Some(s.clone())
            }
            other => other.single_field()?.as_decimal_string(),
        }
    }

    /// A 32 byte account id, looking through `MultiAddress::Id` style wrappers.
    pub fn account_id(&self) -> Option<[u8; 32]> {
        match self {
            Self::Bytes(bytes) => <[u8; 32]>::try_from(bytes.as_slice()).ok(),
            other => other.single_field()?.account_id(),
        }
    }

    /// Raw bytes, looking through single field wrappers such as `MultiSignature::Sr25519`.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            other => other.single_field()?.as_bytes(),
        }
    }

    pub fn as_call(&self) -> Option<&DecodedCall> {
        match self {
            Self::Call(call) => Some(call),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedParam {
    pub name: String,
    pub type_name: String,
    pub tag: TypeTag,
    pub value: ParamValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCall {
    pub module: String,
    pub function: String,
    pub params: Vec<DecodedParam>,
}

impl DecodedCall {
    pub fn param(&self, name: &str) -> Option<&DecodedParam> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// Split `a, B<c, d>, e` on top level commas.
fn split_generic_args(args: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in args.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&args[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&args[start..]);
    parts
}

/// Normalize a metadata type name: `T::Balance` becomes `Balance`,
/// `BalanceOf<T>` becomes `BalanceOf`, `Compact<T::Balance>` becomes `Balance`.
pub fn normalize_type_name(raw: &str) -> String {
    let name: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    if let Some(inner) = name
        .strip_prefix("Compact<")
        .and_then(|n| n.strip_suffix('>'))
    {
        return normalize_type_name(inner);
    }

    // Qualified paths like `<T::Lookup as StaticLookup>::Source`.
    if name.starts_with('<') {
        return name.rsplit("::").next().unwrap_or_default().to_string();
    }

    let Some(open) = name.find('<') else {
        return name.rsplit("::").next().unwrap_or_default().to_string();
    };

    let head = name[..open].rsplit("::").next().unwrap_or_default();
    let args = name[open + 1..].strip_suffix('>').unwrap_or(&name[open + 1..]);
    let args = split_generic_args(args);

    if args.iter().all(|a| matches!(*a, "T" | "I")) {
        return head.to_string();
    }

    let args: Vec<String> = args.into_iter().map(normalize_type_name).collect();
    format!("{}<{}>", head, args.join(", "))
}

/// Converts decoded values into [`ParamValue`]s using the metadata registry.
pub struct ValueConverter<'a> {
    types: &'a PortableRegistry,
    call_ty: u32,
}

impl<'a> ValueConverter<'a> {
    pub fn new(types: &'a PortableRegistry, call_ty: u32) -> Self {
        Self { types, call_ty }
    }

    /// Interpret a value of the outer runtime call type.
    pub fn call(&self, value: &Value<u32>) -> Result<DecodedCall, DecodeError> {
        let ValueDef::Variant(pallet) = &value.value else {
            return Err(DecodeError::UnexpectedShape("runtime call".to_string()));
        };
        let mut inner = pallet.values.values();
        let (Some(call_value), None) = (inner.next(), inner.next()) else {
            return Err(DecodeError::UnexpectedShape(format!(
                "call of pallet {}",
                pallet.name
            )));
        };
        let ValueDef::Variant(call) = &call_value.value else {
            return Err(DecodeError::UnexpectedShape(format!(
                "call of pallet {}",
                pallet.name
            )));
        };

        Ok(DecodedCall {
            module: pallet.name.clone(),
            function: call.name.clone(),
            params: self.variant_params(call_value.context, call),
        })
    }

    /// Params of one variant of the enum type `enum_ty`, named and typed from the metadata.
    pub fn variant_params(&self, enum_ty: u32, variant: &Variant<u32>) -> Vec<DecodedParam> {
        let fields = self
            .types
            .resolve(enum_ty)
            .and_then(|ty| match &ty.type_def {
                TypeDef::Variant(def) => def.variants.iter().find(|v| v.name == variant.name),
                _ => None,
            })
            .map(|v| v.fields.as_slice())
            .unwrap_or_default();

        variant
            .values
            .values()
            .enumerate()
            .map(|(i, value)| {
                let field = fields.get(i);
                let name = field
                    .and_then(|f| f.name.clone())
                    .unwrap_or_else(|| i.to_string());
                let raw_type = field
                    .and_then(|f| f.type_name.clone())
                    .or_else(|| self.type_ident(value.context))
                    .unwrap_or_default();
                let type_name = normalize_type_name(&raw_type);

                DecodedParam {
                    name,
                    tag: TypeTag::from_type_name(&type_name),
                    type_name,
                    value: self.convert(value),
                }
            })
            .collect()
    }

    pub fn convert(&self, value: &Value<u32>) -> ParamValue {
        if value.context == self.call_ty
            && let Ok(call) = self.call(value)
        {
            return ParamValue::Call(call);
        }

        match &value.value {
            ValueDef::Primitive(primitive) => convert_primitive(primitive),
            ValueDef::BitSequence(bits) => {
                ParamValue::Text(bits.iter().map(|b| if b { '1' } else { '0' }).collect())
            }
            ValueDef::Variant(variant) => ParamValue::Variant {
                name: variant.name.clone(),
                fields: self.composite_fields(&variant.values),
            },
            ValueDef::Composite(composite) => {
                if let Some(element) = self.sequence_element(value.context) {
                    if self.is_u8(element)
                        && let Some(bytes) = composite_bytes(composite)
                    {
                        return ParamValue::Bytes(bytes);
                    }
                    return ParamValue::Sequence(
                        composite.values().map(|v| self.convert(v)).collect(),
                    );
                }
                ParamValue::Composite(self.composite_fields(composite))
            }
        }
    }

    fn composite_fields(&self, composite: &Composite<u32>) -> Vec<(Option<String>, ParamValue)> {
        match composite {
            Composite::Named(fields) => fields
                .iter()
                .map(|(name, value)| (Some(name.clone()), self.convert(value)))
                .collect(),
            Composite::Unnamed(values) => {
                values.iter().map(|value| (None, self.convert(value))).collect()
            }
        }
    }

    fn sequence_element(&self, ty: u32) -> Option<u32> {
        match &self.types.resolve(ty)?.type_def {
            TypeDef::Sequence(seq) => Some(seq.type_param.id),
            TypeDef::Array(array) => Some(array.type_param.id),
            _ => None,
        }
    }

    fn is_u8(&self, ty: u32) -> bool {
        matches!(
            self.types.resolve(ty).map(|t| &t.type_def),
            Some(TypeDef::Primitive(TypeDefPrimitive::U8))
        )
    }

    /// Last path segment of a type, e.g. `AccountId32`.
    fn type_ident(&self, ty: u32) -> Option<String> {
        let ty: &scale_info::Type<PortableForm> = self.types.resolve(ty)?;
        ty.path.segments.last().cloned()
    }
}

fn convert_primitive(primitive: &Primitive) -> ParamValue {
    match primitive {
        Primitive::Bool(b) => ParamValue::Bool(*b),
        Primitive::Char(c) => ParamValue::Text(c.to_string()),
        Primitive::String(s) => ParamValue::Text(s.clone()),
        Primitive::U128(n) => ParamValue::Uint(*n),
        Primitive::I128(n) => ParamValue::Int(*n),
        Primitive::U256(bytes) => ParamValue::Text(U256::from_little_endian(bytes).to_string()),
        Primitive::I256(bytes) => ParamValue::Text(format!("0x{}", hex::encode(bytes))),
    }
}

fn composite_bytes(composite: &Composite<u32>) -> Option<Vec<u8>> {
    composite
        .values()
        .map(|v| match &v.value {
            ValueDef::Primitive(Primitive::U128(n)) => u8::try_from(*n).ok(),
            _ => None,
        })
        .collect()
}
