/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/3/26
******************************************************************************/

//! Typed façade over the CDM (Charge Description Master) segment.

use crate::support;
use ironhl7_core::error::AccessError;
use ironhl7_core::value::{Coded, Cwe, Cx, Value, Xon};
use ironhl7_model::{Segment, Structure};
use rust_decimal::Decimal;

/// Named accessors for the CDM segment.
#[derive(Debug)]
pub struct Cdm<'m> {
    segment: &'m mut Segment,
}

impl<'m> Cdm<'m> {
    /// Wraps a segment, verifying it is a CDM.
    ///
    /// # Errors
    /// Returns [`AccessError::StructureMismatch`] for any other segment.
    pub fn new(segment: &'m mut Segment) -> Result<Self, AccessError> {
        if segment.name() != "CDM" {
            return Err(AccessError::StructureMismatch {
                expected: "CDM".to_string(),
                actual: segment.name().to_string(),
            });
        }
        Ok(Self { segment })
    }

    /// Wraps a structure, verifying it is a CDM segment.
    ///
    /// # Errors
    /// Returns [`AccessError::StructureMismatch`] otherwise.
    pub fn from_structure(structure: &'m mut Structure) -> Result<Self, AccessError> {
        match structure {
            Structure::Segment(s) => Self::new(s),
            Structure::Group(g) => Err(AccessError::StructureMismatch {
                expected: "CDM".to_string(),
                actual: g.name().to_string(),
            }),
        }
    }

    /// Returns the underlying generic segment.
    #[must_use]
    pub fn segment(&mut self) -> &mut Segment {
        self.segment
    }

    /// CDM-1: Primary Key Value.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn primary_key_value(&mut self) -> Result<&mut Cwe, AccessError> {
        support::expect_cwe(self.segment, 1, 0)
    }

    /// CDM-2: Charge Code Alias, one repetition.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement or a skipped index.
    pub fn get_charge_code_alias(&mut self, rep: usize) -> Result<&mut Cwe, AccessError> {
        support::expect_cwe(self.segment, 2, rep)
    }

    /// CDM-2: every populated Charge Code Alias repetition.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn charge_code_aliases(&self) -> Result<&[Value], AccessError> {
        self.segment.fields(2)
    }

    /// CDM-2: number of populated Charge Code Alias repetitions.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn charge_code_aliases_used(&self) -> Result<usize, AccessError> {
        self.segment.repetitions_used(2)
    }

    /// CDM-2: appends one Charge Code Alias repetition.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn add_charge_code_alias(&mut self) -> Result<&mut Cwe, AccessError> {
        let rep = self.segment.repetitions_used(2)?;
        support::expect_cwe(self.segment, 2, rep)
    }

    /// CDM-3: Charge Description Short.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn charge_description_short(&mut self) -> Result<&mut String, AccessError> {
        support::expect_st(self.segment, 3, 0)
    }

    /// CDM-4: Charge Description Long.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn charge_description_long(&mut self) -> Result<&mut String, AccessError> {
        support::expect_st(self.segment, 4, 0)
    }

    /// CDM-5: Description Override Indicator.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn description_override_indicator(&mut self) -> Result<&mut Coded, AccessError> {
        support::expect_is(self.segment, 5, 0)
    }

    /// CDM-6: Exploding Charges, one repetition.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement or a skipped index.
    pub fn get_exploding_charge(&mut self, rep: usize) -> Result<&mut Cwe, AccessError> {
        support::expect_cwe(self.segment, 6, rep)
    }

    /// CDM-6: number of populated Exploding Charges repetitions.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn exploding_charges_used(&self) -> Result<usize, AccessError> {
        self.segment.repetitions_used(6)
    }

    /// CDM-7: Procedure Code, one repetition.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement or a skipped index.
    pub fn get_procedure_code(&mut self, rep: usize) -> Result<&mut Cwe, AccessError> {
        support::expect_cwe(self.segment, 7, rep)
    }

    /// CDM-7: number of populated Procedure Code repetitions.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn procedure_codes_used(&self) -> Result<usize, AccessError> {
        self.segment.repetitions_used(7)
    }

    /// CDM-8: Active/Inactive Flag.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn active_inactive_flag(&mut self) -> Result<&mut Coded, AccessError> {
        support::expect_id(self.segment, 8, 0)
    }

    /// CDM-9: Inventory Number, one repetition.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement or a skipped index.
    pub fn get_inventory_number(&mut self, rep: usize) -> Result<&mut Cwe, AccessError> {
        support::expect_cwe(self.segment, 9, rep)
    }

    /// CDM-9: number of populated Inventory Number repetitions.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn inventory_numbers_used(&self) -> Result<usize, AccessError> {
        self.segment.repetitions_used(9)
    }

    /// CDM-10: Resource Load.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn resource_load(&mut self) -> Result<&mut Option<Decimal>, AccessError> {
        support::expect_nm(self.segment, 10, 0)
    }

    /// CDM-11: Contract Number, one repetition.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement or a skipped index.
    pub fn get_contract_number(&mut self, rep: usize) -> Result<&mut Cx, AccessError> {
        support::expect_cx(self.segment, 11, rep)
    }

    /// CDM-11: number of populated Contract Number repetitions.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn contract_numbers_used(&self) -> Result<usize, AccessError> {
        self.segment.repetitions_used(11)
    }

    /// CDM-12: Contract Organization, one repetition.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement or a skipped index.
    pub fn get_contract_organization(&mut self, rep: usize) -> Result<&mut Xon, AccessError> {
        support::expect_xon(self.segment, 12, rep)
    }

    /// CDM-12: number of populated Contract Organization repetitions.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn contract_organizations_used(&self) -> Result<usize, AccessError> {
        self.segment.repetitions_used(12)
    }

    /// CDM-13: Room Fee Indicator.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn room_fee_indicator(&mut self) -> Result<&mut Coded, AccessError> {
        support::expect_id(self.segment, 13, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironhl7_core::types::TableId;
    use ironhl7_dictionary::catalog;
    use ironhl7_model::MessageContext;
    use std::sync::Arc;

    fn cdm_segment() -> Segment {
        let ctx = Arc::new(MessageContext::new(Arc::new(catalog::v27())));
        let def = Arc::clone(ctx.registry().segment("CDM").unwrap());
        Segment::new(def, ctx)
    }

    #[test]
    fn test_unpopulated_alias_is_empty_sequence() {
        let mut seg = cdm_segment();
        let cdm = Cdm::new(&mut seg).unwrap();
        assert_eq!(cdm.charge_code_aliases_used().unwrap(), 0);
        assert!(cdm.charge_code_aliases().unwrap().is_empty());
    }

    #[test]
    fn test_alias_repetitions_accumulate_in_order() {
        let mut seg = cdm_segment();
        let mut cdm = Cdm::new(&mut seg).unwrap();

        cdm.add_charge_code_alias().unwrap().identifier = "LAB-001".to_string();
        cdm.add_charge_code_alias().unwrap().identifier = "LAB-001A".to_string();

        assert_eq!(cdm.charge_code_aliases_used().unwrap(), 2);
        assert_eq!(cdm.get_charge_code_alias(0).unwrap().identifier, "LAB-001");
        assert_eq!(cdm.get_charge_code_alias(1).unwrap().identifier, "LAB-001A");
    }

    #[test]
    fn test_room_fee_indicator_bound_to_yes_no_table() {
        let mut seg = cdm_segment();
        let mut cdm = Cdm::new(&mut seg).unwrap();
        let flag = cdm.room_fee_indicator().unwrap();
        assert_eq!(flag.table, Some(TableId::new(136)));
        flag.value = "Y".to_string();
        assert_eq!(cdm.room_fee_indicator().unwrap().value, "Y");
    }

    #[test]
    fn test_primary_key_and_descriptions() {
        let mut seg = cdm_segment();
        let mut cdm = Cdm::new(&mut seg).unwrap();
        cdm.primary_key_value().unwrap().identifier = "CHG-100".to_string();
        *cdm.charge_description_short().unwrap() = "CBC".to_string();
        *cdm.charge_description_long().unwrap() = "Complete blood count".to_string();
        cdm.resource_load().unwrap().replace(Decimal::new(25, 1));

        assert_eq!(cdm.primary_key_value().unwrap().identifier, "CHG-100");
        assert_eq!(*cdm.resource_load().unwrap(), Some(Decimal::new(25, 1)));
        assert!(cdm.segment().missing_required().is_empty());
    }
}
