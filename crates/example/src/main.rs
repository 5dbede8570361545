//! Walks a sample bearing analysis through the bindings, then decodes a
//! user payload.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=debug demo
//! ```

use example::bearings::{
    BearingLoadCaseResultsLightweight, LoadedBallBearingResults, LoadedRollingBearingResults,
};
use example::clerk::User;
use example::{BearingsModule, sample_analysis};
use std::error::Error;
use veneer_core::{DefaultModules, TracingModule};
use veneer_dto::Dto;
use veneer_interop::{Bindings, ModuleGroup, TypeName, Wrapper};

const USER_PAYLOAD: &str = r#"{
    "id": "user_2x",
    "username": "ada",
    "email_addresses": [
        {"id": "idn_1", "email_address": "ada@example.com", "verified": true, "reserved": false}
    ],
    "primary_email_address_id": "idn_1",
    "created_at": 1700000000000,
    "totp_enabled": true
}"#;

fn main() {
    if let Err(e) = run() {
        tracing::error!(error = %e, "demo failed");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let bindings = Bindings::builder()
        .add_modules(
            DefaultModules
                .build()
                .disable::<TracingModule>()
                .add(TracingModule::new().with_env_filter(filter)),
        )
        .add_modules(BearingsModule)
        .finish()?;

    tracing::info!(
        modules = ?bindings.modules().collect::<Vec<_>>(),
        wrappers = bindings.registry().len(),
        "bindings ready"
    );

    bearings(&bindings)?;
    users()?;
    Ok(())
}

fn bearings(bindings: &Bindings) -> Result<(), Box<dyn Error>> {
    let wrapper = bindings.wrap(sample_analysis())?;
    tracing::info!(declared = %wrapper.declared_type(), "constructed from runtime type");

    let ball: LoadedBallBearingResults = wrapper.cast()?;
    tracing::info!(contact_angle = ball.contact_angle()?, "ball bearing");

    let rolling: LoadedRollingBearingResults = ball.cast()?;
    tracing::info!(
        duration = rolling.duration()?,
        l10 = rolling.life_at_reliability(0.9)?,
        stresses = ?rolling.element_stresses()?,
        element = ?rolling.element_kind()?,
        "rolling bearing"
    );

    let lightweight: BearingLoadCaseResultsLightweight = rolling.cast()?;
    tracing::info!(load_case = %lightweight.load_case_name()?, "summary view");
    let lattice = bindings.lattice();
    tracing::info!(
        targets = ?lattice.accessor_names(lightweight.proxy().declared_type()),
        "cast targets"
    );

    // Downcast back to the concrete view.
    let back: LoadedBallBearingResults = lightweight.cast()?;
    tracing::info!(same = back.proxy() == ball.proxy(), "round trip");

    if let Err(e) = ball.proxy().cast_to(&TypeName::parse("Shafts.ShaftResults")) {
        tracing::info!(error = %e, "rejected cast");
    }

    for row in rolling.proxy().objects::<BearingLoadCaseResultsLightweight>("Rows")? {
        let concrete = row.proxy().specialize()?;
        tracing::info!(row = %concrete.declared_type(), "row");
    }
    Ok(())
}

fn users() -> Result<(), Box<dyn Error>> {
    let user: User = serde_json::from_str(USER_PAYLOAD)?;
    tracing::info!(
        id = %user.id,
        primary = ?user.primary_email().and_then(|e| e.email_address.value()),
        extra = ?user.additional_properties.keys().collect::<Vec<_>>(),
        "decoded user"
    );

    let encoded = user.to_json();
    tracing::info!(json = %encoded, "re-encoded user");
    Ok(())
}
