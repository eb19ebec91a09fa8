/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/3/26
******************************************************************************/

//! Typed façades over the CCI_I22 (collaborative care information) message.

use crate::support;
use ironhl7_core::error::AccessError;
use ironhl7_model::{Group, Message, Segment, Structure};

/// Named accessors for the CCI_I22 message root.
#[derive(Debug)]
pub struct CciI22<'m> {
    group: &'m mut Group,
}

impl<'m> CciI22<'m> {
    /// Wraps a message, verifying its root is a CCI_I22.
    ///
    /// # Errors
    /// Returns [`AccessError::StructureMismatch`] for any other root.
    pub fn new(message: &'m mut Message) -> Result<Self, AccessError> {
        let root = message.root_mut();
        if root.name() != "CCI_I22" {
            return Err(AccessError::StructureMismatch {
                expected: "CCI_I22".to_string(),
                actual: root.name().to_string(),
            });
        }
        Ok(Self { group: root })
    }

    /// MSH: Message Header.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn msh(&mut self) -> Result<&mut Segment, AccessError> {
        support::segment_child(self.group, "MSH")
    }

    /// MSA: Message Acknowledgment.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn msa(&mut self) -> Result<&mut Segment, AccessError> {
        support::segment_child(self.group, "MSA")
    }

    /// RESOURCE_DETAIL group, one repetition.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement or a skipped index.
    pub fn get_resource_detail(
        &mut self,
        rep: usize,
    ) -> Result<CciI22ResourceDetail<'_>, AccessError> {
        CciI22ResourceDetail::new(support::group_child_rep(self.group, "RESOURCE_DETAIL", rep)?)
    }

    /// Number of populated RESOURCE_DETAIL repetitions.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn resource_details_used(&self) -> Result<usize, AccessError> {
        self.group.repetitions_used("RESOURCE_DETAIL")
    }

    /// Appends one RESOURCE_DETAIL repetition.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn add_resource_detail(&mut self) -> Result<CciI22ResourceDetail<'_>, AccessError> {
        let rep = self.group.repetitions_used("RESOURCE_DETAIL")?;
        self.get_resource_detail(rep)
    }

    /// Removes the RESOURCE_DETAIL repetition at `index`, compacting the
    /// rest.
    ///
    /// # Errors
    /// Returns an [`AccessError`] when the index is not populated.
    pub fn remove_resource_detail_at(&mut self, index: usize) -> Result<Structure, AccessError> {
        self.group.remove_repetition("RESOURCE_DETAIL", index)
    }
}

/// Named accessors for one CCI_I22 RESOURCE_DETAIL group.
///
/// All four appointment segments are singular; each accessor materializes an
/// empty instance on first read.
#[derive(Debug)]
pub struct CciI22ResourceDetail<'m> {
    group: &'m mut Group,
}

impl<'m> CciI22ResourceDetail<'m> {
    /// Wraps a group, verifying it is a CCI_I22_RESOURCE_DETAIL.
    ///
    /// # Errors
    /// Returns [`AccessError::StructureMismatch`] for any other group.
    pub fn new(group: &'m mut Group) -> Result<Self, AccessError> {
        if group.name() != "CCI_I22_RESOURCE_DETAIL" {
            return Err(AccessError::StructureMismatch {
                expected: "CCI_I22_RESOURCE_DETAIL".to_string(),
                actual: group.name().to_string(),
            });
        }
        Ok(Self { group })
    }

    /// Returns the underlying generic group.
    #[must_use]
    pub fn group(&mut self) -> &mut Group {
        self.group
    }

    /// AIS: Appointment Information - Service.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn ais(&mut self) -> Result<&mut Segment, AccessError> {
        support::segment_child(self.group, "AIS")
    }

    /// AIG: Appointment Information - General Resource.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn aig(&mut self) -> Result<&mut Segment, AccessError> {
        support::segment_child(self.group, "AIG")
    }

    /// AIL: Appointment Information - Location Resource.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn ail(&mut self) -> Result<&mut Segment, AccessError> {
        support::segment_child(self.group, "AIL")
    }

    /// AIP: Appointment Information - Personnel Resource.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn aip(&mut self) -> Result<&mut Segment, AccessError> {
        support::segment_child(self.group, "AIP")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironhl7_core::value::Value;
    use ironhl7_dictionary::catalog;
    use std::sync::Arc;

    fn cci_message() -> Message {
        Message::new(Arc::new(catalog::v28()), "CCI_I22").unwrap()
    }

    #[test]
    fn test_all_four_appointment_segments_materialize() {
        let mut message = cci_message();
        let mut cci = CciI22::new(&mut message).unwrap();
        let mut detail = cci.add_resource_detail().unwrap();

        assert_eq!(detail.ais().unwrap().name(), "AIS");
        assert_eq!(detail.aig().unwrap().name(), "AIG");
        assert_eq!(detail.ail().unwrap().name(), "AIL");
        assert_eq!(detail.aip().unwrap().name(), "AIP");
    }

    #[test]
    fn test_repeated_reads_return_same_instance() {
        let mut message = cci_message();
        let mut cci = CciI22::new(&mut message).unwrap();
        let mut detail = cci.add_resource_detail().unwrap();

        detail
            .ais()
            .unwrap()
            .set_field(1, 0, Value::Si(Some(1)))
            .unwrap();
        // The second read observes the earlier write.
        assert_eq!(detail.ais().unwrap().field(1, 0).unwrap().as_si(), Some(1));
        assert_eq!(detail.group().repetitions_used("AIS").unwrap(), 1);
    }

    #[test]
    fn test_resource_details_repeat() {
        let mut message = cci_message();
        let mut cci = CciI22::new(&mut message).unwrap();
        cci.add_resource_detail().unwrap();
        cci.add_resource_detail().unwrap();
        assert_eq!(cci.resource_details_used().unwrap(), 2);
        cci.remove_resource_detail_at(0).unwrap();
        assert_eq!(cci.resource_details_used().unwrap(), 1);
    }
}
