use crate::bearings::{
    ElementKind, LoadedBallBearingResults, LoadedPlainBearingResults, LoadedRollerBearingResults,
    Orientations,
};
use veneer_interop::memory::MemoryObject;
use veneer_interop::{ForeignError, ForeignEnum, ForeignValue, Handle, Wrapper};

/// Builds an in-memory ball bearing result with two rows.
///
/// The first row is a roller bearing, the second a plain bearing.
/// `LifeAtReliability(r)` scales the rated life by `(1 - r) / 0.1`.
#[must_use]
pub fn sample_analysis() -> Handle {
    let roller = MemoryObject::builder(LoadedRollerBearingResults::type_name())
        .property("LoadCaseName", "Cruise")
        .property("RollerTilt", 0.001)
        .build();
    let plain = MemoryObject::builder(LoadedPlainBearingResults::type_name())
        .property("LoadCaseName", "Cruise")
        .property("MinimumFilmThickness", 4.2)
        .build();

    let duration = 1200.0;
    MemoryObject::builder(LoadedBallBearingResults::type_name())
        .read_only("LoadCaseName", "Cruise")
        .property("ForceOnInnerRace", 3150.0)
        .property("IsValid", true)
        .property("Orientation", Orientations::Left.to_foreign())
        .property("Duration", duration)
        .property("ElementType", ElementKind::Ball.to_foreign())
        .property(
            "ElementStresses",
            vec![
                ForeignValue::Float(1210.5),
                ForeignValue::Float(1188.0),
                ForeignValue::Null,
            ],
        )
        .property("ContactAngle", 15.0)
        .property(
            "Rows",
            vec![ForeignValue::Object(roller), ForeignValue::Object(plain)],
        )
        .method("LifeAtReliability", move |args| match args {
            [ForeignValue::Float(r)] => Ok(ForeignValue::Float(duration * (1.0 - r) / 0.1)),
            _ => Err(ForeignError::runtime("LifeAtReliability expects one float")),
        })
        .build()
}
