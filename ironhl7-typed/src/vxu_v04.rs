/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/3/26
******************************************************************************/

//! Typed façades over the VXU_V04 (unsolicited vaccination update) message.

use crate::support;
use ironhl7_core::error::AccessError;
use ironhl7_model::{Group, Message, Segment, Structure};

/// Named accessors for the VXU_V04 message root.
#[derive(Debug)]
pub struct VxuV04<'m> {
    group: &'m mut Group,
}

impl<'m> VxuV04<'m> {
    /// Wraps a message, verifying its root is a VXU_V04.
    ///
    /// # Errors
    /// Returns [`AccessError::StructureMismatch`] for any other root.
    pub fn new(message: &'m mut Message) -> Result<Self, AccessError> {
        let root = message.root_mut();
        if root.name() != "VXU_V04" {
            return Err(AccessError::StructureMismatch {
                expected: "VXU_V04".to_string(),
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

    /// PID: Patient Identification.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn pid(&mut self) -> Result<&mut Segment, AccessError> {
        support::segment_child(self.group, "PID")
    }

    /// ORDER group, one repetition.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement or a skipped index.
    pub fn get_order(&mut self, rep: usize) -> Result<VxuV04Order<'_>, AccessError> {
        VxuV04Order::new(support::group_child_rep(self.group, "ORDER", rep)?)
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
    pub fn add_order(&mut self) -> Result<VxuV04Order<'_>, AccessError> {
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

/// Named accessors for one VXU_V04 ORDER group.
#[derive(Debug)]
pub struct VxuV04Order<'m> {
    group: &'m mut Group,
}

impl<'m> VxuV04Order<'m> {
    /// Wraps a group, verifying it is a VXU_V04_ORDER.
    ///
    /// # Errors
    /// Returns [`AccessError::StructureMismatch`] for any other group.
    pub fn new(group: &'m mut Group) -> Result<Self, AccessError> {
        if group.name() != "VXU_V04_ORDER" {
            return Err(AccessError::StructureMismatch {
                expected: "VXU_V04_ORDER".to_string(),
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

    /// RXA: Pharmacy/Treatment Administration.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn rxa(&mut self) -> Result<&mut Segment, AccessError> {
        support::segment_child(self.group, "RXA")
    }

    /// RXR: Pharmacy/Treatment Route.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement.
    pub fn rxr(&mut self) -> Result<&mut Segment, AccessError> {
        support::segment_child(self.group, "RXR")
    }

    /// OBSERVATION group, one repetition.
    ///
    /// # Errors
    /// Returns an [`AccessError`] on schema disagreement or a skipped index.
    pub fn get_observation(&mut self, rep: usize) -> Result<VxuV04Observation<'_>, AccessError> {
        VxuV04Observation::new(support::group_child_rep(self.group, "OBSERVATION", rep)?)
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
    pub fn add_observation(&mut self) -> Result<VxuV04Observation<'_>, AccessError> {
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

/// Named accessors for one VXU_V04 OBSERVATION group.
#[derive(Debug)]
pub struct VxuV04Observation<'m> {
    group: &'m mut Group,
}

impl<'m> VxuV04Observation<'m> {
    /// Wraps a group, verifying it is a VXU_V04_OBSERVATION.
    ///
    /// # Errors
    /// Returns [`AccessError::StructureMismatch`] for any other group.
    pub fn new(group: &'m mut Group) -> Result<Self, AccessError> {
        if group.name() != "VXU_V04_OBSERVATION" {
            return Err(AccessError::StructureMismatch {
                expected: "VXU_V04_OBSERVATION".to_string(),
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
    use ironhl7_core::value::{Value, Cwe};
    use ironhl7_dictionary::catalog;
    use std::sync::Arc;

    fn vxu_message() -> Message {
        Message::new(Arc::new(catalog::v27()), "VXU_V04").unwrap()
    }

    #[test]
    fn test_rejects_wrong_root() {
        let mut message = Message::new(Arc::new(catalog::v27()), "RSP_K31").unwrap();
        assert!(matches!(
            VxuV04::new(&mut message),
            Err(AccessError::StructureMismatch { .. })
        ));
    }

    #[test]
    fn test_header_segments_materialize_on_read() {
        let mut message = vxu_message();
        let mut vxu = VxuV04::new(&mut message).unwrap();
        assert_eq!(vxu.msh().unwrap().name(), "MSH");
        assert_eq!(vxu.pid().unwrap().name(), "PID");
    }

    #[test]
    fn test_order_administration_path() {
        let mut message = vxu_message();
        let mut vxu = VxuV04::new(&mut message).unwrap();
        assert_eq!(vxu.orders_used().unwrap(), 0);

        let mut order = vxu.add_order().unwrap();
        order
            .rxa()
            .unwrap()
            .set_field(6, 0, Value::Nm(Some(rust_decimal::Decimal::from(1))))
            .unwrap();
        let table = order.rxa().unwrap().spec(5).unwrap().table;
        order
            .rxa()
            .unwrap()
            .set_field(
                5,
                0,
                Value::Cwe(Cwe {
                    identifier: "08".to_string(),
                    text: "Hep B, adolescent or pediatric".to_string(),
                    name_of_coding_system: "CVX".to_string(),
                    table,
                }),
            )
            .unwrap();

        let mut observation = order.add_observation().unwrap();
        observation
            .obx()
            .unwrap()
            .set_field(4, 0, Value::St("1".to_string()))
            .unwrap();

        assert_eq!(vxu.orders_used().unwrap(), 1);
        assert_eq!(
            vxu.get_order(0).unwrap().observations_used().unwrap(),
            1
        );
    }

    #[test]
    fn test_remove_order() {
        let mut message = vxu_message();
        let mut vxu = VxuV04::new(&mut message).unwrap();
        vxu.add_order().unwrap();
        vxu.add_order().unwrap();
        let removed = vxu.remove_order_at(0).unwrap();
        assert_eq!(removed.name(), "VXU_V04_ORDER");
        assert_eq!(vxu.orders_used().unwrap(), 1);
    }
}
