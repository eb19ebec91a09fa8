/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/3/26
******************************************************************************/

//! Typed façade over the AUT (Authorization Information) segment.

use crate::support;
use ironhl7_core::error::AccessError;
use ironhl7_core::value::{Cp, Cq, Cwe, Ei, Timestamp, Value};
use ironhl7_model::{Segment, Structure};

/// Named accessors for the AUT segment.
///
/// Singular accessors materialize an empty typed value on first read, so
/// reading a field that was never populated yields an empty value rather
/// than an error. Reads that must not materialize go through the underlying
/// [`Segment`] directly.
#[derive(Debug)]
pub struct Aut<'m> {
    segment: &'m mut Segment,
}

impl<'m> Aut<'m> {
    /// Wraps a segment, verifying it is an AUT.
    ///
    /// # Errors
    /// Returns [`AccessError::StructureMismatch`] for any other segment.
    pub fn new(segment: &'m mut Segment) -> Result<Self, AccessError> {
        if segment.name() != "AUT" {
            return Err(AccessError::StructureMismatch {
                expected: "AUT".to_string(),
                actual: segment.name().to_string(),
            });
        }
        Ok(Self { segment })
    }

    /// Wraps a structure, verifying it is an AUT segment.
    ///
    /// # Errors
    /// Returns [`AccessError::StructureMismatch`] otherwise.
    pub fn from_structure(structure: &'m mut Structure) -> Result<Self, AccessError> {
        match structure {
            Structure::Segment(s) => Self::new(s),
            Structure::Group(g) => Err(AccessError::StructureMismatch {
                expected: "AUT".to_string(),
                actual: g.name().to_string(),
            }),
        }
    }

    /// Returns the underlying generic segment.
    #[must_use]
    pub fn segment(&mut self) -> &mut Segment {
        self.segment
    }

    /// AUT-1: Authorizing Payor, Plan ID.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn authorizing_payor_plan_id(&mut self) -> Result<&mut Cwe, AccessError> {
        support::expect_cwe(self.segment, 1, 0)
    }

    /// AUT-2: Authorizing Payor, Company ID.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn authorizing_payor_company_id(&mut self) -> Result<&mut Cwe, AccessError> {
        support::expect_cwe(self.segment, 2, 0)
    }

    /// AUT-3: Authorizing Payor, Company Name.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn authorizing_payor_company_name(&mut self) -> Result<&mut String, AccessError> {
        support::expect_st(self.segment, 3, 0)
    }

    /// AUT-4: Authorization Effective Date.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn authorization_effective_date(&mut self) -> Result<&mut Timestamp, AccessError> {
        support::expect_dtm(self.segment, 4, 0)
    }

    /// AUT-5: Authorization Expiration Date.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn authorization_expiration_date(&mut self) -> Result<&mut Timestamp, AccessError> {
        support::expect_dtm(self.segment, 5, 0)
    }

    /// AUT-6: Authorization Identifier.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn authorization_identifier(&mut self) -> Result<&mut Ei, AccessError> {
        support::expect_ei(self.segment, 6, 0)
    }

    /// AUT-7: Reimbursement Limit.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn reimbursement_limit(&mut self) -> Result<&mut Cp, AccessError> {
        support::expect_cp(self.segment, 7, 0)
    }

    /// AUT-8: Requested Number of Treatments.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn requested_number_of_treatments(&mut self) -> Result<&mut Cq, AccessError> {
        support::expect_cq(self.segment, 8, 0)
    }

    /// AUT-9: Authorized Number of Treatments.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn authorized_number_of_treatments(&mut self) -> Result<&mut Cq, AccessError> {
        support::expect_cq(self.segment, 9, 0)
    }

    /// AUT-10: Process Date.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn process_date(&mut self) -> Result<&mut Timestamp, AccessError> {
        support::expect_dtm(self.segment, 10, 0)
    }

    /// AUT-11: Requested Discipline(s), one repetition.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement or a skipped index.
    pub fn get_requested_discipline(&mut self, rep: usize) -> Result<&mut Cwe, AccessError> {
        support::expect_cwe(self.segment, 11, rep)
    }

    /// AUT-11: every populated Requested Discipline repetition.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn requested_disciplines(&self) -> Result<&[Value], AccessError> {
        self.segment.fields(11)
    }

    /// AUT-11: number of populated Requested Discipline repetitions.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn requested_disciplines_used(&self) -> Result<usize, AccessError> {
        self.segment.repetitions_used(11)
    }

    /// AUT-11: appends one Requested Discipline repetition.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn add_requested_discipline(&mut self) -> Result<&mut Cwe, AccessError> {
        let rep = self.segment.repetitions_used(11)?;
        support::expect_cwe(self.segment, 11, rep)
    }

    /// AUT-12: Authorized Discipline(s), one repetition.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement or a skipped index.
    pub fn get_authorized_discipline(&mut self, rep: usize) -> Result<&mut Cwe, AccessError> {
        support::expect_cwe(self.segment, 12, rep)
    }

    /// AUT-12: every populated Authorized Discipline repetition.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn authorized_disciplines(&self) -> Result<&[Value], AccessError> {
        self.segment.fields(12)
    }

    /// AUT-12: number of populated Authorized Discipline repetitions.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn authorized_disciplines_used(&self) -> Result<usize, AccessError> {
        self.segment.repetitions_used(12)
    }

    /// AUT-12: appends one Authorized Discipline repetition.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn add_authorized_discipline(&mut self) -> Result<&mut Cwe, AccessError> {
        let rep = self.segment.repetitions_used(12)?;
        support::expect_cwe(self.segment, 12, rep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironhl7_core::types::TableId;
    use ironhl7_dictionary::catalog;
    use ironhl7_model::MessageContext;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn aut_segment() -> Segment {
        let ctx = Arc::new(MessageContext::new(Arc::new(catalog::v27())));
        let def = Arc::clone(ctx.registry().segment("AUT").unwrap());
        Segment::new(def, ctx)
    }

    #[test]
    fn test_rejects_wrong_segment() {
        let ctx = Arc::new(MessageContext::new(Arc::new(catalog::v27())));
        let def = Arc::clone(ctx.registry().segment("CDM").unwrap());
        let mut seg = Segment::new(def, ctx);
        assert!(matches!(
            Aut::new(&mut seg),
            Err(AccessError::StructureMismatch { .. })
        ));
    }

    #[test]
    fn test_populate_and_read_every_field() {
        let mut seg = aut_segment();
        let mut aut = Aut::new(&mut seg).unwrap();

        aut.authorizing_payor_plan_id().unwrap().identifier = "PPO".to_string();
        aut.authorizing_payor_company_id().unwrap().identifier = "AET".to_string();
        *aut.authorizing_payor_company_name().unwrap() = "Aetna".to_string();
        *aut.authorization_effective_date().unwrap() = Timestamp::from_raw("20260301").unwrap();
        *aut.authorization_expiration_date().unwrap() = Timestamp::from_raw("20260901").unwrap();
        aut.authorization_identifier().unwrap().entity_identifier = "AUTH-778".to_string();
        aut.reimbursement_limit().unwrap().price.quantity = Some(Decimal::new(150000, 2));
        aut.requested_number_of_treatments().unwrap().quantity = Some(Decimal::from(12));
        aut.authorized_number_of_treatments().unwrap().quantity = Some(Decimal::from(10));
        *aut.process_date().unwrap() = Timestamp::from_raw("20260215").unwrap();
        aut.add_requested_discipline().unwrap().identifier = "PT".to_string();
        aut.add_authorized_discipline().unwrap().identifier = "PT".to_string();

        assert_eq!(*aut.authorizing_payor_company_name().unwrap(), "Aetna");
        assert_eq!(
            aut.authorization_effective_date().unwrap().raw(),
            "20260301"
        );
        assert_eq!(
            aut.reimbursement_limit().unwrap().price.quantity,
            Some(Decimal::new(150000, 2))
        );
        assert_eq!(aut.requested_disciplines_used().unwrap(), 1);
        assert_eq!(aut.authorized_disciplines_used().unwrap(), 1);
    }

    #[test]
    fn test_company_id_carries_table_binding() {
        let mut seg = aut_segment();
        let mut aut = Aut::new(&mut seg).unwrap();
        assert_eq!(
            aut.authorizing_payor_company_id().unwrap().table,
            Some(TableId::new(285))
        );
    }

    #[test]
    fn test_sparse_population_leaves_other_fields_absent() {
        let mut seg = aut_segment();
        {
            let mut aut = Aut::new(&mut seg).unwrap();
            *aut.authorizing_payor_company_name().unwrap() = "Cigna".to_string();
        }
        // Only the touched position is populated.
        assert_eq!(seg.repetitions_used(3).unwrap(), 1);
        for position in [1, 2, 4, 5, 6, 7, 8, 9, 10, 11, 12] {
            assert_eq!(seg.repetitions_used(position).unwrap(), 0);
        }
    }

    #[test]
    fn test_repeating_disciplines_preserve_order() {
        let mut seg = aut_segment();
        let mut aut = Aut::new(&mut seg).unwrap();
        for code in ["PT", "OT", "ST"] {
            aut.add_requested_discipline().unwrap().identifier = code.to_string();
        }
        assert_eq!(aut.requested_disciplines_used().unwrap(), 3);
        assert_eq!(
            aut.get_requested_discipline(1).unwrap().identifier,
            "OT"
        );
        let all = aut.requested_disciplines().unwrap();
        assert_eq!(all[2].as_cwe().unwrap().identifier, "ST");
    }
}
