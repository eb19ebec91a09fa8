/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/3/26
******************************************************************************/

//! Builds a VXU_V04 vaccination update message and walks its tree.
//!
//! Run with `cargo run --example vxu_v04`.

use ironhl7::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ironhl7_model=debug".into()),
        )
        .init();

    let registry = Arc::new(catalog::v27());
    let mut message = Message::new(Arc::clone(&registry), "VXU_V04")?;
    info!(version = %message.version(), "created empty VXU_V04");

    let mut vxu = VxuV04::new(&mut message).map_err(Hl7Error::Access)?;

    // Patient identification. The first read materializes the segment.
    let pid = vxu.pid().map_err(Hl7Error::Access)?;
    let mut patient_id = Cx::default();
    patient_id.id_number = "123456".to_string();
    patient_id.assigning_authority.namespace_id = "MRN".to_string();
    pid.set_field(3, 0, Value::Cx(patient_id))
        .map_err(Hl7Error::Access)?;

    // One immunization order.
    let mut order = vxu.add_order().map_err(Hl7Error::Access)?;
    let rxa = order.rxa().map_err(Hl7Error::Access)?;
    rxa.set_field(1, 0, Value::Nm(Some(Decimal::ZERO)))
        .map_err(Hl7Error::Access)?;
    rxa.set_field(2, 0, Value::Nm(Some(Decimal::ONE)))
        .map_err(Hl7Error::Access)?;
    rxa.set_field(
        3,
        0,
        Value::Dtm(Timestamp::from_raw("20260312").map_err(Hl7Error::Access)?),
    )
    .map_err(Hl7Error::Access)?;
    rxa.set_field(
        5,
        0,
        Value::Cwe(Cwe {
            identifier: "08".to_string(),
            text: "Hep B, adolescent or pediatric".to_string(),
            name_of_coding_system: "CVX".to_string(),
            table: rxa.spec(5).map_err(Hl7Error::Access)?.table,
        }),
    )
    .map_err(Hl7Error::Access)?;
    rxa.set_field(6, 0, Value::Nm(Some(Decimal::new(5, 1))))
        .map_err(Hl7Error::Access)?;

    info!(
        missing = ?rxa.missing_required(),
        "RXA required-field check"
    );

    // An observation on the administration.
    let mut observation = order.add_observation().map_err(Hl7Error::Access)?;
    let obx = observation.obx().map_err(Hl7Error::Access)?;
    obx.set_field(
        3,
        0,
        Value::Cwe(Cwe {
            identifier: "30963-3".to_string(),
            text: "Vaccine funding source".to_string(),
            name_of_coding_system: "LN".to_string(),
            table: None,
        }),
    )
    .map_err(Hl7Error::Access)?;
    obx.set_field(5, 0, Value::St("PHC70".to_string()))
        .map_err(Hl7Error::Access)?;

    // Walk the tree back down through the generic layer.
    let root = message.root();
    for child in root.children() {
        let populated = root
            .repetitions_used(&child.name)
            .map_err(Hl7Error::Access)?;
        info!(
            child = %child.name,
            structure = %child.structure,
            populated,
            repeating = child.repeating,
            "root slot"
        );
    }

    Ok(())
}
