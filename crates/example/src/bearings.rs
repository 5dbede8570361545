//! Wrappers for the `Bearings` namespace of the analysis runtime.

use veneer_interop::{
    BindingModule, BindingsBuilder, ForeignEnum, ForeignValue, InteropError, Proxy, TypeName,
    Wrapper,
};

/// Qualified name of the duration interface, which has no wrapper.
pub const HAS_DURATION: &str = "Bearings.IHasDuration";

// ─────────────────────────────────────────────────────────────────────────────
// Enums
// ─────────────────────────────────────────────────────────────────────────────

/// Side of the housing a bearing is mounted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ForeignEnum)]
#[foreign_enum(namespace = "Bearings")]
pub enum Orientations {
    /// Mounted from the left.
    Left,
    /// Mounted from the right.
    Right,
    /// Mounted from both sides.
    #[foreign_enum(rename = "BOTH_SIDES")]
    Both,
}

/// Rolling element shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ForeignEnum)]
#[foreign_enum(namespace = "Bearings", name = "RollingElementType")]
pub enum ElementKind {
    /// Spherical balls.
    Ball,
    /// Cylindrical rollers.
    Cylindrical,
    /// Tapered rollers.
    Tapered,
}

// ─────────────────────────────────────────────────────────────────────────────
// Wrappers
// ─────────────────────────────────────────────────────────────────────────────

/// Summary results of a bearing for one load case.
#[derive(Debug, Clone, Wrapper)]
#[wrapper(namespace = "Bearings")]
pub struct BearingLoadCaseResultsLightweight(Proxy);

impl BearingLoadCaseResultsLightweight {
    /// Name of the load case.
    pub fn load_case_name(&self) -> Result<String, InteropError> {
        self.0.get("LoadCaseName")
    }
}

/// Full results of a loaded bearing.
#[derive(Debug, Clone, Wrapper)]
#[wrapper(namespace = "Bearings", extends = BearingLoadCaseResultsLightweight)]
pub struct LoadedBearingResults(Proxy);

impl LoadedBearingResults {
    /// Axial force on the inner ring, in newtons.
    pub fn force_on_inner_race(&self) -> Result<f64, InteropError> {
        self.0.get("ForceOnInnerRace")
    }

    /// Whether the bearing passed its checks.
    pub fn is_valid(&self) -> Result<bool, InteropError> {
        self.0.get("IsValid")
    }

    /// Mounting orientation.
    pub fn orientation(&self) -> Result<Option<Orientations>, InteropError> {
        self.0.enum_value("Orientation")
    }

    /// Changes the mounting orientation.
    pub fn set_orientation(&self, value: Orientations) -> Result<(), InteropError> {
        self.0.set_enum("Orientation", &value)
    }

    /// Per-row results of a multi-row bearing.
    pub fn rows(&self) -> Result<Vec<LoadedBearingResults>, InteropError> {
        self.0.objects("Rows")
    }
}

/// Results of a rolling element bearing.
#[derive(Debug, Clone, Wrapper)]
#[wrapper(
    namespace = "Bearings",
    extends = LoadedBearingResults,
    implements("Bearings.IHasDuration")
)]
pub struct LoadedRollingBearingResults(Proxy);

impl LoadedRollingBearingResults {
    /// Rated life, in hours.
    pub fn duration(&self) -> Result<f64, InteropError> {
        self.0.get("Duration")
    }

    /// Overrides the rated life. `None` resets it.
    pub fn set_duration(&self, value: Option<f64>) -> Result<(), InteropError> {
        self.0.set_or_absent("Duration", value)
    }

    /// Rolling element shape.
    pub fn element_kind(&self) -> Result<Option<ElementKind>, InteropError> {
        self.0.enum_value("ElementType")
    }

    /// Contact stresses per element, in megapascals.
    pub fn element_stresses(&self) -> Result<Vec<f64>, InteropError> {
        self.0.scalars("ElementStresses")
    }

    /// Life at a given reliability, in hours.
    pub fn life_at_reliability(&self, reliability: f64) -> Result<f64, InteropError> {
        self.0
            .invoke_scalar("LifeAtReliability", &[ForeignValue::Float(reliability)])
    }
}

/// Results of a ball bearing.
#[derive(Debug, Clone, Wrapper)]
#[wrapper(namespace = "Bearings", extends = LoadedRollingBearingResults)]
pub struct LoadedBallBearingResults {
    proxy: Proxy,
}

impl LoadedBallBearingResults {
    /// Contact angle under load, in degrees.
    pub fn contact_angle(&self) -> Result<f64, InteropError> {
        self.proxy.get("ContactAngle")
    }
}

/// Results of a roller bearing.
#[derive(Debug, Clone, Wrapper)]
#[wrapper(namespace = "Bearings", extends = LoadedRollingBearingResults)]
pub struct LoadedRollerBearingResults(Proxy);

impl LoadedRollerBearingResults {
    /// Roller tilt, in radians.
    pub fn roller_tilt(&self) -> Result<f64, InteropError> {
        self.0.get("RollerTilt")
    }
}

/// Results of a plain (journal) bearing.
#[derive(Debug, Clone, Wrapper)]
#[wrapper(namespace = "Bearings", extends = LoadedBearingResults)]
pub struct LoadedPlainBearingResults(Proxy);

impl LoadedPlainBearingResults {
    /// Minimum lubricant film thickness, in micrometres.
    pub fn minimum_film_thickness(&self) -> Result<f64, InteropError> {
        self.0.get("MinimumFilmThickness")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// BearingsModule
// ─────────────────────────────────────────────────────────────────────────────

/// Registers every wrapper of the `Bearings` namespace.
///
/// ```
/// use example::BearingsModule;
/// use example::bearings::LoadedBallBearingResults;
/// use veneer_interop::{Bindings, Wrapper};
///
/// let bindings = Bindings::builder().add_modules(BearingsModule).finish().unwrap();
/// assert!(bindings.registry().contains(&LoadedBallBearingResults::type_name()));
/// ```
pub struct BearingsModule;

impl BindingModule for BearingsModule {
    fn build(&self, builder: &mut BindingsBuilder) {
        builder
            .declare(TypeName::parse(HAS_DURATION), None, [])
            .register::<BearingLoadCaseResultsLightweight>()
            .register::<LoadedBearingResults>()
            .register::<LoadedRollingBearingResults>()
            .register::<LoadedBallBearingResults>()
            .register::<LoadedRollerBearingResults>()
            .register::<LoadedPlainBearingResults>();
    }
}
