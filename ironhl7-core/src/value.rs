/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/3/26
******************************************************************************/

//! HL7 datatype and value model.
//!
//! This module provides:
//! - [`Datatype`]: Enumeration of supported HL7 v2.x datatypes
//! - [`Value`]: One variant per datatype, each constructible empty
//! - Composite value structs: [`Cwe`], [`Ei`], [`Hd`], [`Cx`], [`Xon`],
//!   [`Cp`], [`Cq`], [`Mo`]
//! - [`Timestamp`]: Precision-preserving DTM value with chrono conversion
//!
//! ## Empty-But-Valid Semantics
//!
//! In HL7 an absent field is not an error: accessors hand back a typed,
//! empty value rather than failing. Every variant of [`Value`] therefore has
//! an empty representation reachable through [`Value::empty`], and cast
//! checks compare [`Value::datatype`] against the declared datatype rather
//! than inspecting contents.

use crate::error::{AccessError, SchemaError};
use crate::types::TableId;
use bytes::Bytes;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// HL7 v2.x datatype identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Datatype {
    /// String data.
    St,
    /// Text data.
    Tx,
    /// Formatted text.
    Ft,
    /// Coded value from an HL7-defined table.
    Id,
    /// Coded value from a user-defined table.
    Is,
    /// Sequence identifier.
    Si,
    /// Numeric.
    Nm,
    /// Date.
    Dt,
    /// Time.
    Tm,
    /// Date/time with variable precision.
    Dtm,
    /// Coded with exceptions.
    Cwe,
    /// Entity identifier.
    Ei,
    /// Hierarchic designator.
    Hd,
    /// Extended composite ID with check digit.
    Cx,
    /// Extended composite name and ID for organizations.
    Xon,
    /// Composite price.
    Cp,
    /// Composite quantity with units.
    Cq,
    /// Money.
    Mo,
    /// Encapsulated data.
    Ed,
    /// Variable datatype (e.g., OBX-5), resolved per instance.
    Varies,
}

impl Datatype {
    /// Returns the datatype name as written in HL7 specifications.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::St => "ST",
            Self::Tx => "TX",
            Self::Ft => "FT",
            Self::Id => "ID",
            Self::Is => "IS",
            Self::Si => "SI",
            Self::Nm => "NM",
            Self::Dt => "DT",
            Self::Tm => "TM",
            Self::Dtm => "DTM",
            Self::Cwe => "CWE",
            Self::Ei => "EI",
            Self::Hd => "HD",
            Self::Cx => "CX",
            Self::Xon => "XON",
            Self::Cp => "CP",
            Self::Cq => "CQ",
            Self::Mo => "MO",
            Self::Ed => "ED",
            Self::Varies => "Varies",
        }
    }

    /// Returns true if this datatype may be bound to a vocabulary table.
    #[must_use]
    pub const fn is_coded(&self) -> bool {
        matches!(self, Self::Id | Self::Is | Self::Cwe)
    }

    /// Returns true if this is a single-component datatype.
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::St
                | Self::Tx
                | Self::Ft
                | Self::Id
                | Self::Is
                | Self::Si
                | Self::Nm
                | Self::Dt
                | Self::Tm
                | Self::Dtm
        )
    }
}

impl std::str::FromStr for Datatype {
    type Err = SchemaError;

    /// Creates a Datatype from its HL7 specification name.
    ///
    /// # Arguments
    /// * `s` - The datatype name (e.g., "CWE")
    ///
    /// # Errors
    /// Returns [`SchemaError::UnknownDatatype`] for unrecognized names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_uppercase().as_str() {
            "ST" => Self::St,
            "TX" => Self::Tx,
            "FT" => Self::Ft,
            "ID" => Self::Id,
            "IS" => Self::Is,
            "SI" => Self::Si,
            "NM" => Self::Nm,
            "DT" => Self::Dt,
            "TM" => Self::Tm,
            "DTM" => Self::Dtm,
            "CWE" => Self::Cwe,
            "EI" => Self::Ei,
            "HD" => Self::Hd,
            "CX" => Self::Cx,
            "XON" => Self::Xon,
            "CP" => Self::Cp,
            "CQ" => Self::Cq,
            "MO" => Self::Mo,
            "ED" => Self::Ed,
            "VARIES" => Self::Varies,
            other => {
                return Err(SchemaError::UnknownDatatype {
                    name: other.to_string(),
                });
            }
        })
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coded value (ID or IS), optionally bound to a vocabulary table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coded {
    /// The code itself.
    pub value: String,
    /// Bound vocabulary table, if any.
    pub table: Option<TableId>,
}

impl Coded {
    /// Creates an empty coded value bound to the given table.
    #[must_use]
    pub const fn with_table(table: Option<TableId>) -> Self {
        Self {
            value: String::new(),
            table,
        }
    }

    /// Returns true if no code is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// CWE — coded with exceptions.
///
/// Only the leading triplet is modeled; alternate and second-alternate
/// triplets follow the same pattern and are not needed by this runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cwe {
    /// CWE-1: identifier (the code).
    pub identifier: String,
    /// CWE-2: text.
    pub text: String,
    /// CWE-3: name of coding system.
    pub name_of_coding_system: String,
    /// Bound vocabulary table, if any.
    pub table: Option<TableId>,
}

impl Cwe {
    /// Creates an empty CWE bound to the given table.
    #[must_use]
    pub const fn with_table(table: Option<TableId>) -> Self {
        Self {
            identifier: String::new(),
            text: String::new(),
            name_of_coding_system: String::new(),
            table,
        }
    }

    /// Returns true if no component is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identifier.is_empty() && self.text.is_empty() && self.name_of_coding_system.is_empty()
    }
}

/// EI — entity identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ei {
    /// EI-1: entity identifier.
    pub entity_identifier: String,
    /// EI-2: namespace ID.
    pub namespace_id: String,
    /// EI-3: universal ID.
    pub universal_id: String,
    /// EI-4: universal ID type.
    pub universal_id_type: String,
}

impl Ei {
    /// Returns true if no component is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entity_identifier.is_empty()
            && self.namespace_id.is_empty()
            && self.universal_id.is_empty()
            && self.universal_id_type.is_empty()
    }
}

/// HD — hierarchic designator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hd {
    /// HD-1: namespace ID.
    pub namespace_id: String,
    /// HD-2: universal ID.
    pub universal_id: String,
    /// HD-3: universal ID type.
    pub universal_id_type: String,
}

impl Hd {
    /// Returns true if no component is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.namespace_id.is_empty()
            && self.universal_id.is_empty()
            && self.universal_id_type.is_empty()
    }
}

/// CX — extended composite ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cx {
    /// CX-1: ID number.
    pub id_number: String,
    /// CX-4: assigning authority.
    pub assigning_authority: Hd,
    /// CX-5: identifier type code.
    pub identifier_type_code: String,
}

impl Cx {
    /// Returns true if no component is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id_number.is_empty()
            && self.assigning_authority.is_empty()
            && self.identifier_type_code.is_empty()
    }
}

/// XON — extended composite name and ID for organizations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Xon {
    /// XON-1: organization name.
    pub organization_name: String,
    /// XON-2: organization name type code.
    pub organization_name_type_code: String,
    /// XON-10: organization identifier.
    pub organization_identifier: String,
}

impl Xon {
    /// Returns true if no component is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.organization_name.is_empty()
            && self.organization_name_type_code.is_empty()
            && self.organization_identifier.is_empty()
    }
}

/// MO — money.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mo {
    /// MO-1: quantity.
    pub quantity: Option<Decimal>,
    /// MO-2: denomination (ISO 4217 currency code).
    pub denomination: String,
}

impl Mo {
    /// Returns true if no component is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quantity.is_none() && self.denomination.is_empty()
    }
}

/// CP — composite price.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cp {
    /// CP-1: price.
    pub price: Mo,
    /// CP-2: price type.
    pub price_type: String,
}

impl Cp {
    /// Returns true if no component is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.price.is_empty() && self.price_type.is_empty()
    }
}

/// CQ — composite quantity with units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cq {
    /// CQ-1: quantity.
    pub quantity: Option<Decimal>,
    /// CQ-2: units.
    pub units: Cwe,
}

impl Cq {
    /// Returns true if no component is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quantity.is_none() && self.units.is_empty()
    }
}

/// DTM — date/time with variable precision.
///
/// HL7 timestamps are transmitted at whatever precision the sender has
/// (`YYYY` through `YYYYMMDDHHMMSS[.S[S[S[S]]]][+/-ZZZZ]`). The raw text is
/// preserved so that precision survives a round trip; chrono conversion is
/// available for populated components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    raw: String,
}

impl Timestamp {
    /// Creates a timestamp from HL7 DTM text, validating its shape.
    ///
    /// # Arguments
    /// * `raw` - The DTM text (may be empty)
    ///
    /// # Errors
    /// Returns [`AccessError::InvalidFieldValue`] if the text is not a valid
    /// DTM at any precision.
    pub fn from_raw(raw: &str) -> Result<Self, AccessError> {
        if raw.is_empty() {
            return Ok(Self::default());
        }

        let invalid = |reason: &str| AccessError::InvalidFieldValue {
            datatype: Datatype::Dtm,
            reason: reason.to_string(),
        };

        // Split off a trailing +HHMM/-HHMM timezone offset.
        let body = match raw.char_indices().find(|(i, c)| *i > 0 && (*c == '+' || *c == '-')) {
            Some((i, _)) => {
                let offset = &raw[i + 1..];
                if offset.len() != 4 || !offset.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid("timezone offset must be +/-HHMM"));
                }
                &raw[..i]
            }
            None => raw,
        };

        let (digits, fraction) = match body.split_once('.') {
            Some((d, f)) => (d, Some(f)),
            None => (body, None),
        };

        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected digits"));
        }
        if !matches!(digits.len(), 4 | 6 | 8 | 10 | 12 | 14) {
            return Err(invalid("precision must end on a component boundary"));
        }
        if let Some(f) = fraction {
            if digits.len() != 14 {
                return Err(invalid("fractional seconds require full second precision"));
            }
            if f.is_empty() || f.len() > 4 || !f.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid("fraction must be 1-4 digits"));
            }
        }

        Ok(Self {
            raw: raw.to_string(),
        })
    }

    /// Returns the raw DTM text.
    #[inline]
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns true if no value is populated.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Converts to a chrono datetime, defaulting unpopulated components
    /// (month and day to 1, time components to 0).
    ///
    /// # Returns
    /// `None` if the timestamp is empty or the populated components do not
    /// form a real calendar date.
    #[must_use]
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        if self.raw.is_empty() {
            return None;
        }
        let digits: String = self.raw.chars().take_while(char::is_ascii_digit).collect();

        let component = |range: std::ops::Range<usize>, default: u32| -> u32 {
            digits
                .get(range)
                .and_then(|s| s.parse().ok())
                .unwrap_or(default)
        };

        let year: i32 = digits.get(0..4)?.parse().ok()?;
        let date = NaiveDate::from_ymd_opt(year, component(4..6, 1), component(6..8, 1))?;
        let time = NaiveTime::from_hms_opt(
            component(8..10, 0),
            component(10..12, 0),
            component(12..14, 0),
        )?;
        Some(NaiveDateTime::new(date, time))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// A typed HL7 field value.
///
/// One variant per supported [`Datatype`]. Every variant has an empty
/// representation; see [`Value::empty`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// ST string value.
    St(String),
    /// TX text value.
    Tx(String),
    /// FT formatted-text value.
    Ft(String),
    /// ID coded value (HL7-defined table).
    Id(Coded),
    /// IS coded value (user-defined table).
    Is(Coded),
    /// SI sequence identifier.
    Si(Option<u32>),
    /// NM numeric value.
    Nm(Option<Decimal>),
    /// DT date value.
    Dt(Option<NaiveDate>),
    /// TM time value.
    Tm(Option<NaiveTime>),
    /// DTM timestamp value.
    Dtm(Timestamp),
    /// CWE coded-with-exceptions value.
    Cwe(Cwe),
    /// EI entity identifier value.
    Ei(Ei),
    /// HD hierarchic designator value.
    Hd(Hd),
    /// CX extended composite ID value.
    Cx(Cx),
    /// XON organization value.
    Xon(Xon),
    /// CP composite price value.
    Cp(Cp),
    /// CQ composite quantity value.
    Cq(Cq),
    /// MO money value.
    Mo(Mo),
    /// ED encapsulated data value.
    Ed(Bytes),
    /// Varies value, resolved per instance.
    Varies(Option<Box<Value>>),
}

impl Value {
    /// Creates an empty value of the given datatype.
    ///
    /// # Arguments
    /// * `datatype` - The target datatype
    /// * `table` - Vocabulary table binding, applied to coded datatypes
    #[must_use]
    pub fn empty(datatype: Datatype, table: Option<TableId>) -> Self {
        match datatype {
            Datatype::St => Self::St(String::new()),
            Datatype::Tx => Self::Tx(String::new()),
            Datatype::Ft => Self::Ft(String::new()),
            Datatype::Id => Self::Id(Coded::with_table(table)),
            Datatype::Is => Self::Is(Coded::with_table(table)),
            Datatype::Si => Self::Si(None),
            Datatype::Nm => Self::Nm(None),
            Datatype::Dt => Self::Dt(None),
            Datatype::Tm => Self::Tm(None),
            Datatype::Dtm => Self::Dtm(Timestamp::default()),
            Datatype::Cwe => Self::Cwe(Cwe::with_table(table)),
            Datatype::Ei => Self::Ei(Ei::default()),
            Datatype::Hd => Self::Hd(Hd::default()),
            Datatype::Cx => Self::Cx(Cx::default()),
            Datatype::Xon => Self::Xon(Xon::default()),
            Datatype::Cp => Self::Cp(Cp::default()),
            Datatype::Cq => Self::Cq(Cq::default()),
            Datatype::Mo => Self::Mo(Mo::default()),
            Datatype::Ed => Self::Ed(Bytes::new()),
            Datatype::Varies => Self::Varies(None),
        }
    }

    /// Returns the datatype of this value.
    #[must_use]
    pub const fn datatype(&self) -> Datatype {
        match self {
            Self::St(_) => Datatype::St,
            Self::Tx(_) => Datatype::Tx,
            Self::Ft(_) => Datatype::Ft,
            Self::Id(_) => Datatype::Id,
            Self::Is(_) => Datatype::Is,
            Self::Si(_) => Datatype::Si,
            Self::Nm(_) => Datatype::Nm,
            Self::Dt(_) => Datatype::Dt,
            Self::Tm(_) => Datatype::Tm,
            Self::Dtm(_) => Datatype::Dtm,
            Self::Cwe(_) => Datatype::Cwe,
            Self::Ei(_) => Datatype::Ei,
            Self::Hd(_) => Datatype::Hd,
            Self::Cx(_) => Datatype::Cx,
            Self::Xon(_) => Datatype::Xon,
            Self::Cp(_) => Datatype::Cp,
            Self::Cq(_) => Datatype::Cq,
            Self::Mo(_) => Datatype::Mo,
            Self::Ed(_) => Datatype::Ed,
            Self::Varies(_) => Datatype::Varies,
        }
    }

    /// Returns true if no content is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::St(s) | Self::Tx(s) | Self::Ft(s) => s.is_empty(),
            Self::Id(c) | Self::Is(c) => c.is_empty(),
            Self::Si(v) => v.is_none(),
            Self::Nm(v) => v.is_none(),
            Self::Dt(v) => v.is_none(),
            Self::Tm(v) => v.is_none(),
            Self::Dtm(t) => t.is_empty(),
            Self::Cwe(v) => v.is_empty(),
            Self::Ei(v) => v.is_empty(),
            Self::Hd(v) => v.is_empty(),
            Self::Cx(v) => v.is_empty(),
            Self::Xon(v) => v.is_empty(),
            Self::Cp(v) => v.is_empty(),
            Self::Cq(v) => v.is_empty(),
            Self::Mo(v) => v.is_empty(),
            Self::Ed(b) => b.is_empty(),
            Self::Varies(v) => v.is_none(),
        }
    }

    /// Returns the value as a string slice, if it is a text variant
    /// (ST, TX, or FT).
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::St(s) | Self::Tx(s) | Self::Ft(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a mutable reference to the text payload, if it is a text
    /// variant (ST, TX, or FT).
    #[must_use]
    pub fn as_str_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::St(s) | Self::Tx(s) | Self::Ft(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a coded value, if it is an ID or IS variant.
    #[must_use]
    pub fn as_coded(&self) -> Option<&Coded> {
        match self {
            Self::Id(c) | Self::Is(c) => Some(c),
            _ => None,
        }
    }

    /// Returns a mutable coded value, if it is an ID or IS variant.
    #[must_use]
    pub fn as_coded_mut(&mut self) -> Option<&mut Coded> {
        match self {
            Self::Id(c) | Self::Is(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the value as a sequence ID, if it is an SI variant.
    #[must_use]
    pub const fn as_si(&self) -> Option<u32> {
        match self {
            Self::Si(Some(v)) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a Decimal, if it is an NM variant.
    #[must_use]
    pub const fn as_nm(&self) -> Option<Decimal> {
        match self {
            Self::Nm(Some(v)) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a date, if it is a DT variant.
    #[must_use]
    pub const fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Dt(Some(v)) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a time, if it is a TM variant.
    #[must_use]
    pub const fn as_time(&self) -> Option<NaiveTime> {
        match self {
            Self::Tm(Some(v)) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a timestamp, if it is a DTM variant.
    #[must_use]
    pub const fn as_timestamp(&self) -> Option<&Timestamp> {
        match self {
            Self::Dtm(t) => Some(t),
            _ => None,
        }
    }

    /// Returns a mutable timestamp, if it is a DTM variant.
    #[must_use]
    pub fn as_timestamp_mut(&mut self) -> Option<&mut Timestamp> {
        match self {
            Self::Dtm(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the value as a CWE, if it is a CWE variant.
    #[must_use]
    pub const fn as_cwe(&self) -> Option<&Cwe> {
        match self {
            Self::Cwe(v) => Some(v),
            _ => None,
        }
    }

    /// Returns a mutable CWE, if it is a CWE variant.
    #[must_use]
    pub fn as_cwe_mut(&mut self) -> Option<&mut Cwe> {
        match self {
            Self::Cwe(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value as an EI, if it is an EI variant.
    #[must_use]
    pub const fn as_ei(&self) -> Option<&Ei> {
        match self {
            Self::Ei(v) => Some(v),
            _ => None,
        }
    }

    /// Returns a mutable EI, if it is an EI variant.
    #[must_use]
    pub fn as_ei_mut(&mut self) -> Option<&mut Ei> {
        match self {
            Self::Ei(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value as an HD, if it is an HD variant.
    #[must_use]
    pub const fn as_hd(&self) -> Option<&Hd> {
        match self {
            Self::Hd(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value as a CX, if it is a CX variant.
    #[must_use]
    pub const fn as_cx(&self) -> Option<&Cx> {
        match self {
            Self::Cx(v) => Some(v),
            _ => None,
        }
    }

    /// Returns a mutable CX, if it is a CX variant.
    #[must_use]
    pub fn as_cx_mut(&mut self) -> Option<&mut Cx> {
        match self {
            Self::Cx(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value as an XON, if it is an XON variant.
    #[must_use]
    pub const fn as_xon(&self) -> Option<&Xon> {
        match self {
            Self::Xon(v) => Some(v),
            _ => None,
        }
    }

    /// Returns a mutable XON, if it is an XON variant.
    #[must_use]
    pub fn as_xon_mut(&mut self) -> Option<&mut Xon> {
        match self {
            Self::Xon(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value as a CP, if it is a CP variant.
    #[must_use]
    pub const fn as_cp(&self) -> Option<&Cp> {
        match self {
            Self::Cp(v) => Some(v),
            _ => None,
        }
    }

    /// Returns a mutable CP, if it is a CP variant.
    #[must_use]
    pub fn as_cp_mut(&mut self) -> Option<&mut Cp> {
        match self {
            Self::Cp(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value as a CQ, if it is a CQ variant.
    #[must_use]
    pub const fn as_cq(&self) -> Option<&Cq> {
        match self {
            Self::Cq(v) => Some(v),
            _ => None,
        }
    }

    /// Returns a mutable CQ, if it is a CQ variant.
    #[must_use]
    pub fn as_cq_mut(&mut self) -> Option<&mut Cq> {
        match self {
            Self::Cq(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value as an MO, if it is an MO variant.
    #[must_use]
    pub const fn as_mo(&self) -> Option<&Mo> {
        match self {
            Self::Mo(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the raw bytes, if it is an ED variant.
    #[must_use]
    pub const fn as_ed(&self) -> Option<&Bytes> {
        match self {
            Self::Ed(b) => Some(b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    /// Diagnostic rendering. Composite components are joined with `^`;
    /// this is not delimiter-aware wire encoding.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, components: &[&str]) -> fmt::Result {
            let last = components.iter().rposition(|c| !c.is_empty());
            match last {
                Some(last) => write!(f, "{}", components[..=last].join("^")),
                None => Ok(()),
            }
        }

        match self {
            Self::St(s) | Self::Tx(s) | Self::Ft(s) => write!(f, "{}", s),
            Self::Id(c) | Self::Is(c) => write!(f, "{}", c.value),
            Self::Si(v) => v.map_or(Ok(()), |v| write!(f, "{}", v)),
            Self::Nm(v) => v.map_or(Ok(()), |v| write!(f, "{}", v)),
            Self::Dt(v) => v.map_or(Ok(()), |v| write!(f, "{}", v.format("%Y%m%d"))),
            Self::Tm(v) => v.map_or(Ok(()), |v| write!(f, "{}", v.format("%H%M%S"))),
            Self::Dtm(t) => write!(f, "{}", t),
            Self::Cwe(v) => join(f, &[&v.identifier, &v.text, &v.name_of_coding_system]),
            Self::Ei(v) => join(
                f,
                &[
                    &v.entity_identifier,
                    &v.namespace_id,
                    &v.universal_id,
                    &v.universal_id_type,
                ],
            ),
            Self::Hd(v) => join(f, &[&v.namespace_id, &v.universal_id, &v.universal_id_type]),
            Self::Cx(v) => {
                let authority = v.assigning_authority.namespace_id.as_str();
                join(f, &[&v.id_number, "", "", authority, &v.identifier_type_code])
            }
            Self::Xon(v) => join(
                f,
                &[
                    &v.organization_name,
                    &v.organization_name_type_code,
                    &v.organization_identifier,
                ],
            ),
            Self::Cp(v) => {
                let quantity = v.price.quantity.map(|q| q.to_string()).unwrap_or_default();
                join(f, &[&quantity, &v.price.denomination, &v.price_type])
            }
            Self::Cq(v) => {
                let quantity = v.quantity.map(|q| q.to_string()).unwrap_or_default();
                join(f, &[&quantity, &v.units.identifier])
            }
            Self::Mo(v) => {
                let quantity = v.quantity.map(|q| q.to_string()).unwrap_or_default();
                join(f, &[&quantity, &v.denomination])
            }
            Self::Ed(b) => write!(f, "<{} bytes>", b.len()),
            Self::Varies(v) => v.as_ref().map_or(Ok(()), |v| write!(f, "{}", v)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datatype_from_str() {
        assert_eq!("CWE".parse::<Datatype>().unwrap(), Datatype::Cwe);
        assert_eq!("st".parse::<Datatype>().unwrap(), Datatype::St);
        assert!(matches!(
            "ZZZ".parse::<Datatype>(),
            Err(SchemaError::UnknownDatatype { .. })
        ));
    }

    #[test]
    fn test_datatype_is_coded() {
        assert!(Datatype::Id.is_coded());
        assert!(Datatype::Cwe.is_coded());
        assert!(!Datatype::St.is_coded());
        assert!(!Datatype::Ei.is_coded());
    }

    #[test]
    fn test_empty_value_is_typed_and_empty() {
        let value = Value::empty(Datatype::Cwe, Some(TableId::new(136)));
        assert_eq!(value.datatype(), Datatype::Cwe);
        assert!(value.is_empty());
        assert_eq!(value.as_cwe().unwrap().table, Some(TableId::new(136)));
    }

    #[test]
    fn test_every_datatype_constructs_empty() {
        for datatype in [
            Datatype::St,
            Datatype::Tx,
            Datatype::Ft,
            Datatype::Id,
            Datatype::Is,
            Datatype::Si,
            Datatype::Nm,
            Datatype::Dt,
            Datatype::Tm,
            Datatype::Dtm,
            Datatype::Cwe,
            Datatype::Ei,
            Datatype::Hd,
            Datatype::Cx,
            Datatype::Xon,
            Datatype::Cp,
            Datatype::Cq,
            Datatype::Mo,
            Datatype::Ed,
            Datatype::Varies,
        ] {
            let value = Value::empty(datatype, None);
            assert_eq!(value.datatype(), datatype);
            assert!(value.is_empty());
        }
    }

    #[test]
    fn test_timestamp_precision_levels() {
        for raw in ["2024", "202401", "20240115", "2024011509", "202401150930", "20240115093045"] {
            let ts = Timestamp::from_raw(raw).unwrap();
            assert_eq!(ts.raw(), raw);
            assert!(ts.to_datetime().is_some());
        }
    }

    #[test]
    fn test_timestamp_fraction_and_offset() {
        assert!(Timestamp::from_raw("20240115093045.1234").is_ok());
        assert!(Timestamp::from_raw("20240115093045+0100").is_ok());
        assert!(Timestamp::from_raw("20240115093045.12-0500").is_ok());
    }

    #[test]
    fn test_timestamp_rejects_malformed() {
        assert!(Timestamp::from_raw("202").is_err());
        assert!(Timestamp::from_raw("2024011").is_err());
        assert!(Timestamp::from_raw("20240115T0930").is_err());
        assert!(Timestamp::from_raw("202401.5").is_err());
        assert!(Timestamp::from_raw("20240115093045+01").is_err());
    }

    #[test]
    fn test_timestamp_to_datetime_defaults() {
        let ts = Timestamp::from_raw("2024").unwrap();
        let dt = ts.to_datetime().unwrap();
        assert_eq!(dt.format("%Y%m%d%H%M%S").to_string(), "20240101000000");
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::St("text".to_string()).to_string(), "text");
        let cwe = Value::Cwe(Cwe {
            identifier: "E10".to_string(),
            text: "Type 1 diabetes".to_string(),
            name_of_coding_system: String::new(),
            table: None,
        });
        assert_eq!(cwe.to_string(), "E10^Type 1 diabetes");
        assert_eq!(Value::empty(Datatype::Nm, None).to_string(), "");
    }
}
