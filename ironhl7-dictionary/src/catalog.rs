/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/3/26
******************************************************************************/

//! Embedded demonstration catalogs.
//!
//! Pre-built [`SchemaRegistry`] instances for HL7 v2.7, v2.7.1, and v2.8
//! covering the segments and groups the runtime tests exercise. AUT and CDM
//! carry their full published field lists; the remaining segments declare
//! their leading fields only. The structural differences between these three
//! versions live in vocabulary table contents, which the runtime does not
//! carry, so the catalogs share one definition set.
//!
//! These catalogs are demonstration data. Production deployments are
//! expected to build (or deserialize) their own registries.

use crate::schema::{ChildDef, FieldSpec, GroupDef, SchemaRegistry, SegmentDef};
use ironhl7_core::types::{TableId, Version};
use ironhl7_core::value::Datatype;

/// Returns the embedded catalog for a version, if one is available.
///
/// # Arguments
/// * `version` - The HL7 version
#[must_use]
pub fn for_version(version: Version) -> Option<SchemaRegistry> {
    match version {
        Version::V27 | Version::V271 | Version::V28 => Some(build(version)),
        _ => None,
    }
}

/// Returns the embedded HL7 v2.7 catalog.
#[must_use]
pub fn v27() -> SchemaRegistry {
    build(Version::V27)
}

/// Returns the embedded HL7 v2.7.1 catalog.
#[must_use]
pub fn v271() -> SchemaRegistry {
    build(Version::V271)
}

/// Returns the embedded HL7 v2.8 catalog.
#[must_use]
pub fn v28() -> SchemaRegistry {
    build(Version::V28)
}

fn build(version: Version) -> SchemaRegistry {
    let mut registry = SchemaRegistry::new(version);

    registry.add_segment(msh());
    registry.add_segment(msa());
    registry.add_segment(pid());
    registry.add_segment(aut());
    registry.add_segment(cdm());
    registry.add_segment(drg());
    registry.add_segment(in1());
    registry.add_segment(orc());
    registry.add_segment(obx());
    registry.add_segment(nte());
    registry.add_segment(rxa());
    registry.add_segment(rxr());
    registry.add_segment(rxe());
    registry.add_segment(ais());
    registry.add_segment(aig());
    registry.add_segment(ail());
    registry.add_segment(aip());

    registry.add_group(vxu_v04());
    registry.add_group(vxu_v04_order());
    registry.add_group(vxu_v04_observation());
    registry.add_group(rsp_k31());
    registry.add_group(rsp_k31_order());
    registry.add_group(rsp_k31_observation());
    registry.add_group(cci_i22());
    registry.add_group(cci_i22_resource_detail());

    registry
}

fn field(datatype: Datatype, required: bool, max_reps: u32, max_len: u32, desc: &str) -> FieldSpec {
    FieldSpec::new(datatype, required, max_reps, max_len, desc)
}

fn msh() -> SegmentDef {
    SegmentDef::new("MSH", "Message Header")
        .with_field(field(Datatype::St, true, 1, 1, "Field Separator"))
        .with_field(field(Datatype::St, true, 1, 5, "Encoding Characters"))
        .with_field(field(Datatype::Hd, false, 1, 0, "Sending Application"))
        .with_field(field(Datatype::Hd, false, 1, 0, "Sending Facility"))
        .with_field(field(Datatype::Hd, false, 1, 0, "Receiving Application"))
        .with_field(field(Datatype::Hd, false, 1, 0, "Receiving Facility"))
        .with_field(field(Datatype::Dtm, true, 1, 24, "Date/Time of Message"))
        .with_field(field(Datatype::St, false, 1, 40, "Security"))
}

fn msa() -> SegmentDef {
    SegmentDef::new("MSA", "Message Acknowledgment")
        .with_field(
            field(Datatype::Id, true, 1, 2, "Acknowledgment Code").with_table(TableId::new(8)),
        )
        .with_field(field(Datatype::St, true, 1, 199, "Message Control ID"))
}

fn pid() -> SegmentDef {
    SegmentDef::new("PID", "Patient Identification")
        .with_field(field(Datatype::Si, false, 1, 4, "Set ID - PID"))
        .with_field(field(Datatype::St, false, 1, 0, "Patient ID"))
        .with_field(field(Datatype::Cx, true, 0, 0, "Patient Identifier List"))
}

fn aut() -> SegmentDef {
    SegmentDef::new("AUT", "Authorization Information")
        .with_field(
            field(Datatype::Cwe, false, 1, 0, "Authorizing Payor, Plan ID")
                .with_table(TableId::new(72)),
        )
        .with_field(
            field(Datatype::Cwe, true, 1, 0, "Authorizing Payor, Company ID")
                .with_table(TableId::new(285)),
        )
        .with_field(field(Datatype::St, false, 1, 45, "Authorizing Payor, Company Name"))
        .with_field(field(Datatype::Dtm, false, 1, 24, "Authorization Effective Date"))
        .with_field(field(Datatype::Dtm, false, 1, 24, "Authorization Expiration Date"))
        .with_field(field(Datatype::Ei, false, 1, 0, "Authorization Identifier"))
        .with_field(field(Datatype::Cp, false, 1, 25, "Reimbursement Limit"))
        .with_field(field(Datatype::Cq, false, 1, 0, "Requested Number of Treatments"))
        .with_field(field(Datatype::Cq, false, 1, 0, "Authorized Number of Treatments"))
        .with_field(field(Datatype::Dtm, false, 1, 24, "Process Date"))
        .with_field(field(Datatype::Cwe, false, 0, 0, "Requested Discipline(s)"))
        .with_field(field(Datatype::Cwe, false, 0, 0, "Authorized Discipline(s)"))
}

fn cdm() -> SegmentDef {
    SegmentDef::new("CDM", "Charge Description Master")
        .with_field(
            field(Datatype::Cwe, true, 1, 0, "Primary Key Value - CDM")
                .with_table(TableId::new(132)),
        )
        .with_field(field(Datatype::Cwe, false, 0, 0, "Charge Code Alias"))
        .with_field(field(Datatype::St, true, 1, 20, "Charge Description Short"))
        .with_field(field(Datatype::St, false, 1, 250, "Charge Description Long"))
        .with_field(
            field(Datatype::Is, false, 1, 1, "Description Override Indicator")
                .with_table(TableId::new(268)),
        )
        .with_field(field(Datatype::Cwe, false, 0, 0, "Exploding Charges"))
        .with_field(
            field(Datatype::Cwe, false, 0, 0, "Procedure Code").with_table(TableId::new(88)),
        )
        .with_field(
            field(Datatype::Id, false, 1, 1, "Active/Inactive Flag").with_table(TableId::new(183)),
        )
        .with_field(
            field(Datatype::Cwe, false, 0, 0, "Inventory Number").with_table(TableId::new(184)),
        )
        .with_field(field(Datatype::Nm, false, 1, 12, "Resource Load"))
        .with_field(field(Datatype::Cx, false, 0, 0, "Contract Number"))
        .with_field(field(Datatype::Xon, false, 0, 0, "Contract Organization"))
        .with_field(
            field(Datatype::Id, false, 1, 1, "Room Fee Indicator").with_table(TableId::new(136)),
        )
}

fn drg() -> SegmentDef {
    SegmentDef::new("DRG", "Diagnosis Related Group")
        .with_field(
            field(Datatype::Cwe, false, 1, 0, "Diagnostic Related Group")
                .with_table(TableId::new(55)),
        )
        .with_field(field(Datatype::Dtm, false, 1, 24, "DRG Assigned Date/Time"))
        .with_field(
            field(Datatype::Id, false, 1, 1, "DRG Approval Indicator")
                .with_table(TableId::new(136)),
        )
        .with_field(
            field(Datatype::Cwe, false, 1, 0, "DRG Grouper Review Code")
                .with_table(TableId::new(56)),
        )
        .with_field(field(Datatype::Cwe, false, 1, 0, "Outlier Type").with_table(TableId::new(83)))
        .with_field(field(Datatype::Nm, false, 1, 3, "Outlier Days"))
        .with_field(field(Datatype::Cp, false, 1, 0, "Outlier Cost"))
        .with_field(field(Datatype::Cwe, false, 1, 0, "DRG Payor").with_table(TableId::new(229)))
}

fn in1() -> SegmentDef {
    SegmentDef::new("IN1", "Insurance")
        .with_field(field(Datatype::Si, true, 1, 4, "Set ID - IN1"))
        .with_field(
            field(Datatype::Cwe, true, 1, 0, "Health Plan ID").with_table(TableId::new(72)),
        )
        .with_field(field(Datatype::Cx, true, 0, 0, "Insurance Company ID"))
        .with_field(field(Datatype::Xon, false, 0, 0, "Insurance Company Name"))
}

fn orc() -> SegmentDef {
    SegmentDef::new("ORC", "Common Order")
        .with_field(field(Datatype::Id, true, 1, 2, "Order Control").with_table(TableId::new(119)))
        .with_field(field(Datatype::Ei, false, 1, 0, "Placer Order Number"))
        .with_field(field(Datatype::Ei, false, 1, 0, "Filler Order Number"))
        .with_field(field(Datatype::Ei, false, 1, 0, "Placer Group Number"))
        .with_field(field(Datatype::Id, false, 1, 2, "Order Status").with_table(TableId::new(38)))
}

fn obx() -> SegmentDef {
    SegmentDef::new("OBX", "Observation/Result")
        .with_field(field(Datatype::Si, false, 1, 4, "Set ID - OBX"))
        .with_field(field(Datatype::Id, false, 1, 3, "Value Type").with_table(TableId::new(125)))
        .with_field(field(Datatype::Cwe, true, 1, 0, "Observation Identifier"))
        .with_field(field(Datatype::St, false, 1, 20, "Observation Sub-ID"))
        .with_field(field(Datatype::Varies, false, 0, 0, "Observation Value"))
        .with_field(field(Datatype::Cwe, false, 1, 0, "Units"))
        .with_field(field(Datatype::St, false, 1, 60, "References Range"))
        .with_field(
            field(Datatype::Cwe, false, 0, 0, "Interpretation Codes").with_table(TableId::new(78)),
        )
}

fn nte() -> SegmentDef {
    SegmentDef::new("NTE", "Notes and Comments")
        .with_field(field(Datatype::Si, false, 1, 4, "Set ID - NTE"))
        .with_field(
            field(Datatype::Id, false, 1, 8, "Source of Comment").with_table(TableId::new(105)),
        )
        .with_field(field(Datatype::Ft, false, 0, 0, "Comment"))
        .with_field(field(Datatype::Cwe, false, 1, 0, "Comment Type").with_table(TableId::new(364)))
}

fn rxa() -> SegmentDef {
    SegmentDef::new("RXA", "Pharmacy/Treatment Administration")
        .with_field(field(Datatype::Nm, true, 1, 4, "Give Sub-ID Counter"))
        .with_field(field(Datatype::Nm, true, 1, 4, "Administration Sub-ID Counter"))
        .with_field(field(Datatype::Dtm, true, 1, 24, "Date/Time Start of Administration"))
        .with_field(field(Datatype::Dtm, false, 1, 24, "Date/Time End of Administration"))
        .with_field(
            field(Datatype::Cwe, true, 1, 0, "Administered Code").with_table(TableId::new(292)),
        )
        .with_field(field(Datatype::Nm, true, 1, 20, "Administered Amount"))
        .with_field(field(Datatype::Cwe, false, 1, 0, "Administered Units"))
        .with_field(field(Datatype::Cwe, false, 1, 0, "Administered Dosage Form"))
}

fn rxr() -> SegmentDef {
    SegmentDef::new("RXR", "Pharmacy/Treatment Route")
        .with_field(field(Datatype::Cwe, true, 1, 0, "Route").with_table(TableId::new(162)))
        .with_field(
            field(Datatype::Cwe, false, 1, 0, "Administration Site").with_table(TableId::new(550)),
        )
        .with_field(
            field(Datatype::Cwe, false, 1, 0, "Administration Device")
                .with_table(TableId::new(164)),
        )
        .with_field(
            field(Datatype::Cwe, false, 1, 0, "Administration Method")
                .with_table(TableId::new(165)),
        )
}

fn rxe() -> SegmentDef {
    SegmentDef::new("RXE", "Pharmacy/Treatment Encoded Order")
        .with_field(field(Datatype::St, false, 1, 0, "Quantity/Timing"))
        .with_field(field(Datatype::Cwe, true, 1, 0, "Give Code").with_table(TableId::new(292)))
        .with_field(field(Datatype::Nm, true, 1, 20, "Give Amount - Minimum"))
        .with_field(field(Datatype::Nm, false, 1, 20, "Give Amount - Maximum"))
        .with_field(field(Datatype::Cwe, true, 1, 0, "Give Units"))
}

fn ais() -> SegmentDef {
    SegmentDef::new("AIS", "Appointment Information - Service")
        .with_field(field(Datatype::Si, true, 1, 4, "Set ID - AIS"))
        .with_field(
            field(Datatype::Id, false, 1, 3, "Segment Action Code").with_table(TableId::new(206)),
        )
        .with_field(field(Datatype::Cwe, true, 1, 0, "Universal Service Identifier"))
        .with_field(field(Datatype::Dtm, false, 1, 24, "Start Date/Time"))
}

fn aig() -> SegmentDef {
    SegmentDef::new("AIG", "Appointment Information - General Resource")
        .with_field(field(Datatype::Si, true, 1, 4, "Set ID - AIG"))
        .with_field(
            field(Datatype::Id, false, 1, 3, "Segment Action Code").with_table(TableId::new(206)),
        )
        .with_field(field(Datatype::Cwe, false, 1, 0, "Resource ID"))
        .with_field(field(Datatype::Cwe, true, 1, 0, "Resource Type"))
}

fn ail() -> SegmentDef {
    SegmentDef::new("AIL", "Appointment Information - Location Resource")
        .with_field(field(Datatype::Si, true, 1, 4, "Set ID - AIL"))
        .with_field(
            field(Datatype::Id, false, 1, 3, "Segment Action Code").with_table(TableId::new(206)),
        )
        .with_field(field(Datatype::Hd, false, 0, 0, "Location Resource ID"))
        .with_field(
            field(Datatype::Cwe, false, 1, 0, "Location Type - AIL").with_table(TableId::new(305)),
        )
}

fn aip() -> SegmentDef {
    SegmentDef::new("AIP", "Appointment Information - Personnel Resource")
        .with_field(field(Datatype::Si, true, 1, 4, "Set ID - AIP"))
        .with_field(
            field(Datatype::Id, false, 1, 3, "Segment Action Code").with_table(TableId::new(206)),
        )
        .with_field(field(Datatype::Cx, false, 0, 0, "Personnel Resource ID"))
        .with_field(field(Datatype::Cwe, true, 1, 0, "Resource Type").with_table(TableId::new(182)))
}

fn vxu_v04() -> GroupDef {
    GroupDef::new("VXU_V04")
        .with_child(ChildDef::segment("MSH", true, false))
        .with_child(ChildDef::segment("PID", true, false))
        .with_child(ChildDef::new("ORDER", "VXU_V04_ORDER", false, true))
}

fn vxu_v04_order() -> GroupDef {
    GroupDef::new("VXU_V04_ORDER")
        .with_child(ChildDef::segment("ORC", true, false))
        .with_child(ChildDef::segment("RXA", true, false))
        .with_child(ChildDef::segment("RXR", false, false))
        .with_child(ChildDef::new("OBSERVATION", "VXU_V04_OBSERVATION", false, true))
}

fn vxu_v04_observation() -> GroupDef {
    GroupDef::new("VXU_V04_OBSERVATION")
        .with_child(ChildDef::segment("OBX", true, false))
        .with_child(ChildDef::segment("NTE", false, true))
}

fn rsp_k31() -> GroupDef {
    GroupDef::new("RSP_K31")
        .with_child(ChildDef::segment("MSH", true, false))
        .with_child(ChildDef::segment("MSA", true, false))
        .with_child(ChildDef::new("ORDER", "RSP_K31_ORDER", false, true))
}

fn rsp_k31_order() -> GroupDef {
    GroupDef::new("RSP_K31_ORDER")
        .with_child(ChildDef::segment("ORC", true, false))
        .with_child(ChildDef::segment("RXE", false, false))
        .with_child(ChildDef::segment("RXR", false, true))
        .with_child(ChildDef::new("OBSERVATION", "RSP_K31_OBSERVATION", false, true))
}

fn rsp_k31_observation() -> GroupDef {
    GroupDef::new("RSP_K31_OBSERVATION")
        .with_child(ChildDef::segment("OBX", true, false))
        .with_child(ChildDef::segment("NTE", false, true))
}

fn cci_i22() -> GroupDef {
    GroupDef::new("CCI_I22")
        .with_child(ChildDef::segment("MSH", true, false))
        .with_child(ChildDef::segment("MSA", true, false))
        .with_child(ChildDef::new(
            "RESOURCE_DETAIL",
            "CCI_I22_RESOURCE_DETAIL",
            false,
            true,
        ))
}

fn cci_i22_resource_detail() -> GroupDef {
    GroupDef::new("CCI_I22_RESOURCE_DETAIL")
        .with_child(ChildDef::segment("AIS", true, false))
        .with_child(ChildDef::segment("AIG", true, false))
        .with_child(ChildDef::segment("AIL", true, false))
        .with_child(ChildDef::segment("AIP", true, false))
}
