/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/3/26
******************************************************************************/

//! Typed façades over the RSP_K31 (dispense history response) message.

use crate::support;
use ironhl7_core::error::AccessError;
use ironhl7_model::{Group, Message, Segment, Structure};

/// Named accessors for the RSP_K31 message root.
#[derive(Debug)]
pub struct RspK31<'m> {
    group: &'m mut Group,
}

impl<'m> RspK31<'m> {
    /// Wraps a message, verifying its root is an RSP_K31.
    ///
    /// # Errors
    /// Returns [`AccessError::StructureMismatch`] for any other root.
    pub fn new(message: &'m mut Message) -> Result<Self, AccessError> {
        let root = message.root_mut();
        if root.name() != "RSP_K31" {
            return Err(AccessError::StructureMismatch {
                expected: "RSP_K31".to_string(),
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

    /// ORDER group, one repetition.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement or a skipped index.
    pub fn get_order(&mut self, rep: usize) -> Result<RspK31Order<'_>, AccessError> {
        RspK31Order::new(support::group_child_rep(self.group, "ORDER", rep)?)
    }

    /// Number of populated ORDER repetitions.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn orders_used(&self) -> Result<usize, AccessError> {
        self.group.repetitions_used("ORDER")
    }

    /// Appends one ORDER repetition.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn add_order(&mut self) -> Result<RspK31Order<'_>, AccessError> {
        let rep = self.group.repetitions_used("ORDER")?;
        self.get_order(rep)
    }

    /// Removes the ORDER repetition at `index`, compacting the rest.
    ///
    /// # Errors
    /// Returns an [`AccessError`] when the index is not populated.
    pub fn remove_order_at(&mut self, index: usize) -> Result<Structure, AccessError> {
        self.group.remove_repetition("ORDER", index)
    }
}

/// Named accessors for one RSP_K31 ORDER group.
#[derive(Debug)]
pub struct RspK31Order<'m> {
    group: &'m mut Group,
}

impl<'m> RspK31Order<'m> {
    /// Wraps a group, verifying it is an RSP_K31_ORDER.
    ///
    /// # Errors
    /// Returns [`AccessError::StructureMismatch`] for any other group.
    pub fn new(group: &'m mut Group) -> Result<Self, AccessError> {
        if group.name() != "RSP_K31_ORDER" {
            return Err(AccessError::StructureMismatch {
                expected: "RSP_K31_ORDER".to_string(),
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

    /// ORC: Common Order.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn orc(&mut self) -> Result<&mut Segment, AccessError> {
        support::segment_child(self.group, "ORC")
    }

    /// RXE: Pharmacy/Treatment Encoded Order.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn rxe(&mut self) -> Result<&mut Segment, AccessError> {
        support::segment_child(self.group, "RXE")
    }

    /// RXR: Pharmacy/Treatment Route, one repetition.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement or a skipped index.
    pub fn get_rxr(&mut self, rep: usize) -> Result<&mut Segment, AccessError> {
        support::segment_child_rep(self.group, "RXR", rep)
    }

    /// Number of populated RXR repetitions.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn rxrs_used(&self) -> Result<usize, AccessError> {
        self.group.repetitions_used("RXR")
    }

    /// OBSERVATION group, one repetition.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement or a skipped index.
    pub fn get_observation(&mut self, rep: usize) -> Result<RspK31Observation<'_>, AccessError> {
        RspK31Observation::new(support::group_child_rep(self.group, "OBSERVATION", rep)?)
    }

    /// Number of populated OBSERVATION repetitions.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn observations_used(&self) -> Result<usize, AccessError> {
        self.group.repetitions_used("OBSERVATION")
    }

    /// Appends one OBSERVATION repetition.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn add_observation(&mut self) -> Result<RspK31Observation<'_>, AccessError> {
        let rep = self.group.repetitions_used("OBSERVATION")?;
        self.get_observation(rep)
    }

    /// Removes the OBSERVATION repetition at `index`, compacting the rest.
    ///
    /// # Errors
    /// Returns an [`AccessError`] when the index is not populated.
    pub fn remove_observation_at(&mut self, index: usize) -> Result<Structure, AccessError> {
        self.group.remove_repetition("OBSERVATION", index)
    }
}

/// Named accessors for one RSP_K31 OBSERVATION group.
#[derive(Debug)]
pub struct RspK31Observation<'m> {
    group: &'m mut Group,
}

impl<'m> RspK31Observation<'m> {
    /// Wraps a group, verifying it is an RSP_K31_OBSERVATION.
    ///
    /// # Errors
    /// Returns [`AccessError::StructureMismatch`] for any other group.
    pub fn new(group: &'m mut Group) -> Result<Self, AccessError> {
        if group.name() != "RSP_K31_OBSERVATION" {
            return Err(AccessError::StructureMismatch {
                expected: "RSP_K31_OBSERVATION".to_string(),
                actual: group.name().to_string(),
            });
        }
        Ok(Self { group })
    }

    /// OBX: Observation/Result.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn obx(&mut self) -> Result<&mut Segment, AccessError> {
        support::segment_child(self.group, "OBX")
    }

    /// NTE: Notes and Comments, one repetition.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement or a skipped index.
    pub fn get_nte(&mut self, rep: usize) -> Result<&mut Segment, AccessError> {
        support::segment_child_rep(self.group, "NTE", rep)
    }

    /// Number of populated NTE repetitions.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn ntes_used(&self) -> Result<usize, AccessError> {
        self.group.repetitions_used("NTE")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironhl7_core::value::Value;
    use ironhl7_dictionary::catalog;
    use std::sync::Arc;

    fn rsp_message() -> Message {
        Message::new(Arc::new(catalog::v27()), "RSP_K31").unwrap()
    }

    #[test]
    fn test_add_then_remove_observation() {
        let mut message = rsp_message();
        let mut rsp = RspK31::new(&mut message).unwrap();
        let mut order = rsp.add_order().unwrap();

        for sub_id in ["1", "2", "3"] {
            let mut observation = order.add_observation().unwrap();
            observation
                .obx()
                .unwrap()
                .set_field(4, 0, Value::St(sub_id.to_string()))
                .unwrap();
        }
        assert_eq!(order.observations_used().unwrap(), 3);

        order.remove_observation_at(1).unwrap();
        assert_eq!(order.observations_used().unwrap(), 2);

        // The survivors keep their relative order; indices are re-assigned.
        let first = order
            .get_observation(0)
            .unwrap()
            .obx()
            .unwrap()
            .field(4, 0)
            .unwrap()
            .to_string();
        let second = order
            .get_observation(1)
            .unwrap()
            .obx()
            .unwrap()
            .field(4, 0)
            .unwrap()
            .to_string();
        assert_eq!(first, "1");
        assert_eq!(second, "3");
    }

    #[test]
    fn test_acknowledgment_path() {
        let mut message = rsp_message();
        let mut rsp = RspK31::new(&mut message).unwrap();
        let table = rsp.msa().unwrap().spec(1).unwrap().table;
        rsp.msa()
            .unwrap()
            .set_field(
                1,
                0,
                Value::Id(ironhl7_core::value::Coded {
                    value: "AA".to_string(),
                    table,
                }),
            )
            .unwrap();
        assert_eq!(rsp.msa().unwrap().field(1, 0).unwrap().to_string(), "AA");
    }

    #[test]
    fn test_repeating_rxr_child() {
        let mut message = rsp_message();
        let mut rsp = RspK31::new(&mut message).unwrap();
        let mut order = rsp.add_order().unwrap();
        order.get_rxr(0).unwrap();
        order.get_rxr(1).unwrap();
        assert_eq!(order.rxrs_used().unwrap(), 2);
    }
}
