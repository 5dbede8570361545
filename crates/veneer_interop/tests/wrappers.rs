use veneer_interop::memory::MemoryObject;
use veneer_interop::{
    AnyWrapper, Bindings, BindingsConfig, CastError, CastPolicy, ForeignEnum, ForeignError,
    ForeignValue, Handle, InteropError, Proxy, TypeName, Wrapper,
};

#[derive(Debug, Clone, Wrapper)]
#[wrapper(namespace = "Bearings")]
struct BearingLoadCaseResultsLightweight(Proxy);

#[derive(Debug, Clone, Wrapper)]
#[wrapper(namespace = "Bearings", extends = BearingLoadCaseResultsLightweight)]
struct LoadedBearingResults(Proxy);

#[derive(Debug, Clone, Wrapper)]
#[wrapper(
    namespace = "Bearings",
    extends = LoadedBearingResults,
    implements("Bearings.IHasDuration")
)]
struct LoadedRollingBearingResults(Proxy);

#[derive(Debug, Clone, Wrapper)]
#[wrapper(namespace = "Bearings", extends = LoadedRollingBearingResults)]
struct LoadedBallBearingResults {
    proxy: Proxy,
}

#[derive(Debug, Clone, Wrapper)]
#[wrapper(namespace = "Bearings", extends = LoadedRollingBearingResults)]
struct LoadedRollerBearingResults(Proxy);

#[derive(Debug, Clone, Wrapper)]
#[wrapper(namespace = "Shafts")]
struct ShaftResults(Proxy);

#[derive(Debug, Clone, Copy, PartialEq, ForeignEnum)]
#[foreign_enum(namespace = "Bearings")]
enum Orientations {
    Left,
    Right,
    #[foreign_enum(rename = "BOTH_SIDES")]
    Both,
}

impl LoadedRollingBearingResults {
    fn duration(&self) -> Result<f64, InteropError> {
        self.proxy().get("Duration")
    }

    fn set_duration(&self, value: f64) -> Result<(), InteropError> {
        self.proxy().set("Duration", value)
    }

    fn is_valid(&self) -> Result<bool, InteropError> {
        self.proxy().get("IsValid")
    }

    fn orientation(&self) -> Result<Option<Orientations>, InteropError> {
        self.proxy().enum_value("Orientation")
    }

    fn shaft(&self) -> Result<Option<ShaftResults>, InteropError> {
        self.proxy().object("Shaft")
    }

    fn rows(&self) -> Result<Vec<LoadedBearingResults>, InteropError> {
        self.proxy().objects("Rows")
    }
}

fn bindings(config: BindingsConfig) -> Bindings {
    let mut builder = Bindings::builder().with_config(config);
    builder
        .declare(TypeName::parse("Bearings.IHasDuration"), None, [])
        .register::<BearingLoadCaseResultsLightweight>()
        .register::<LoadedBearingResults>()
        .register::<LoadedRollingBearingResults>()
        .register::<LoadedBallBearingResults>()
        .register::<LoadedRollerBearingResults>()
        .register::<ShaftResults>();
    builder.finish().unwrap()
}

fn ball_bearing() -> Handle {
    let shaft = MemoryObject::builder(ShaftResults::type_name()).build();
    let row = MemoryObject::builder(LoadedRollerBearingResults::type_name()).build();
    MemoryObject::builder(LoadedBallBearingResults::type_name())
        .property("Duration", 12.5)
        .property("IsValid", ForeignValue::Null)
        .property(
            "Orientation",
            Orientations::Both.to_foreign(),
        )
        .property("Shaft", shaft)
        .property("Rows", vec![ForeignValue::Object(row), ForeignValue::Null])
        .read_only("Name", "B1")
        .build()
}

#[test]
fn constructs_most_specific_wrapper() {
    let bindings = bindings(BindingsConfig::new());
    let wrapper = bindings.wrap(ball_bearing()).unwrap();

    assert_eq!(
        wrapper.declared_type(),
        &TypeName::new("Bearings", "LoadedBallBearingResults")
    );
    assert!(wrapper.downcast_ref::<LoadedBallBearingResults>().is_some());
    assert!(wrapper.downcast_ref::<LoadedBearingResults>().is_none());
}

#[test]
fn unregistered_runtime_type_is_missing_wrapper() {
    let bindings = bindings(BindingsConfig::new());
    let handle = MemoryObject::builder("Bearings.LoadedNeedleBearingResults").build();

    let err = bindings.wrap(handle.clone()).unwrap_err();
    assert_eq!(
        err,
        InteropError::MissingWrapperType(TypeName::parse("Bearings.LoadedNeedleBearingResults"))
    );
    assert!(matches!(
        bindings.wrap_as::<LoadedBearingResults>(handle),
        Err(InteropError::MissingWrapperType(_))
    ));

    // Declared without a wrapper.
    let interface = MemoryObject::builder("Bearings.IHasDuration").build();
    assert!(matches!(
        bindings.wrap(interface),
        Err(InteropError::MissingWrapperType(_))
    ));
}

#[test]
fn construct_requires_a_supertype_of_the_runtime_type() {
    let bindings = bindings(BindingsConfig::new());

    let base = bindings
        .construct(ball_bearing(), &LoadedBearingResults::type_name())
        .unwrap();
    assert!(base.downcast_ref::<LoadedBearingResults>().is_some());
    assert_eq!(base.as_proxy().runtime_type(), LoadedBallBearingResults::type_name());

    let err = bindings
        .construct(ball_bearing(), &ShaftResults::type_name())
        .unwrap_err();
    assert_eq!(
        err,
        InteropError::Cast(CastError::IncompatibleRuntimeType {
            target: ShaftResults::type_name(),
            runtime: LoadedBallBearingResults::type_name(),
        })
    );

    // A sibling is rejected the same way.
    assert!(matches!(
        bindings.construct(ball_bearing(), &LoadedRollerBearingResults::type_name()),
        Err(InteropError::Cast(CastError::IncompatibleRuntimeType { .. }))
    ));
}

#[test]
#[should_panic(expected = "proxy declared type does not match the wrapper")]
fn from_proxy_rejects_mislabelled_proxy() {
    let bindings = bindings(BindingsConfig::new());
    let base: LoadedBearingResults = bindings.wrap_as(ball_bearing()).unwrap();
    let _ = LoadedBallBearingResults::from_proxy(base.proxy().clone());
}

#[test]
fn upcast_then_cast_back_is_identity() {
    let bindings = bindings(BindingsConfig::new());
    let ball: LoadedBallBearingResults = bindings.wrap_as(ball_bearing()).unwrap();

    let base: BearingLoadCaseResultsLightweight = ball.cast().unwrap();
    assert_eq!(base.proxy().declared_type(), &BearingLoadCaseResultsLightweight::type_name());
    assert!(base.proxy().handle().same_object(ball.proxy().handle()));

    let back: LoadedBallBearingResults = base.cast().unwrap();
    assert_eq!(back.proxy(), ball.proxy());
}

#[test]
fn cast_outside_lattice_names_target() {
    let bindings = bindings(BindingsConfig::new());
    let ball: LoadedBallBearingResults = bindings.wrap_as(ball_bearing()).unwrap();

    let err = ball.cast::<ShaftResults>().unwrap_err();
    assert_eq!(err.target(), "ShaftResults");
    assert_eq!(
        err.to_string(),
        "Detected an invalid cast. Cannot cast to type \"ShaftResults\""
    );

    // Siblings are not in each other's lattice.
    assert!(matches!(
        ball.cast::<LoadedRollerBearingResults>(),
        Err(CastError::InvalidTarget { .. })
    ));
}

#[test]
fn verified_downcast_checks_runtime_type() {
    let verified = bindings(BindingsConfig::new());
    let trusted = bindings(BindingsConfig::new().with_cast_policy(CastPolicy::Trusted));

    for bindings in [&verified, &trusted] {
        let rolling: LoadedRollingBearingResults = bindings.wrap_as(ball_bearing()).unwrap();
        assert!(rolling.cast::<LoadedBallBearingResults>().is_ok());
    }

    let rolling: LoadedRollingBearingResults = verified.wrap_as(ball_bearing()).unwrap();
    assert_eq!(
        rolling.cast::<LoadedRollerBearingResults>().unwrap_err(),
        CastError::IncompatibleRuntimeType {
            target: LoadedRollerBearingResults::type_name(),
            runtime: LoadedBallBearingResults::type_name(),
        }
    );

    let rolling: LoadedRollingBearingResults = trusted.wrap_as(ball_bearing()).unwrap();
    let roller: LoadedRollerBearingResults = rolling.cast().unwrap();
    assert_eq!(roller.proxy().runtime_type(), LoadedBallBearingResults::type_name());
}

#[test]
fn cast_by_accessor_instantiates_target() {
    let bindings = bindings(BindingsConfig::new());
    let ball: LoadedBallBearingResults = bindings.wrap_as(ball_bearing()).unwrap();

    let loaded = ball.cast_by_accessor("loaded_bearing_results").unwrap();
    assert!(loaded.downcast_ref::<LoadedBearingResults>().is_some());

    let err = ball.cast_by_accessor("shaft_results").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Detected an invalid cast. Cannot cast to type \"ShaftResults\""
    );

    // Interfaces are valid targets but have no wrapper.
    assert_eq!(
        ball.cast_by_accessor("i_has_duration").unwrap_err(),
        InteropError::MissingWrapperType(TypeName::parse("Bearings.IHasDuration"))
    );
}

#[test]
fn type_erased_wrappers_cast() {
    let bindings = bindings(BindingsConfig::new());
    let any: Box<dyn AnyWrapper> = bindings.wrap(ball_bearing()).unwrap();

    let rolling: LoadedRollingBearingResults = any.cast().unwrap();
    let specialized = rolling.proxy().specialize().unwrap();
    assert!(specialized.downcast_ref::<LoadedBallBearingResults>().is_some());
}

#[test]
fn scalar_properties_default_when_absent() {
    let bindings = bindings(BindingsConfig::new());
    let rolling: LoadedRollingBearingResults = bindings.wrap_as(ball_bearing()).unwrap();

    assert_eq!(rolling.duration().unwrap(), 12.5);
    assert!(!rolling.is_valid().unwrap());

    rolling.set_duration(3.0).unwrap();
    assert_eq!(rolling.duration().unwrap(), 3.0);

    rolling.proxy().set_or_absent::<f64>("Duration", None).unwrap();
    assert_eq!(rolling.duration().unwrap(), 0.0);

    assert!(matches!(
        rolling.proxy().get::<f64>("Name"),
        Err(InteropError::TypeMismatch { .. })
    ));
    assert!(matches!(
        rolling.proxy().set("Name", String::from("B2")),
        Err(InteropError::Foreign(ForeignError::ReadOnly { .. }))
    ));
}

#[test]
fn object_properties_wrap_by_runtime_type() {
    let bindings = bindings(BindingsConfig::new());
    let rolling: LoadedRollingBearingResults = bindings.wrap_as(ball_bearing()).unwrap();

    let shaft = rolling.shaft().unwrap().unwrap();
    assert_eq!(shaft.proxy().declared_type(), &ShaftResults::type_name());

    let rows = rolling.rows().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].proxy().runtime_type(), LoadedRollerBearingResults::type_name());

    rolling.proxy().set_object::<ShaftResults>("Shaft", None).unwrap();
    assert!(rolling.shaft().unwrap().is_none());
}

#[test]
fn enum_properties() {
    let strict = bindings(BindingsConfig::new());
    let rolling: LoadedRollingBearingResults = strict.wrap_as(ball_bearing()).unwrap();
    assert_eq!(rolling.orientation().unwrap(), Some(Orientations::Both));

    rolling.proxy().set_enum("Orientation", &Orientations::Left).unwrap();
    assert_eq!(rolling.orientation().unwrap(), Some(Orientations::Left));

    let unknown = ForeignValue::Enum(veneer_interop::EnumValue::new(Orientations::enum_type(), "Up"));
    rolling.proxy().handle().set_property("Orientation", unknown.clone()).unwrap();
    assert!(matches!(
        rolling.orientation(),
        Err(InteropError::UnknownEnumMember { .. })
    ));

    let lenient = bindings(BindingsConfig::new().with_strict_enums(false));
    let handle = ball_bearing();
    handle.set_property("Orientation", unknown).unwrap();
    let rolling: LoadedRollingBearingResults = lenient.wrap_as(handle).unwrap();
    assert_eq!(rolling.orientation().unwrap(), None);
}

#[test]
fn methods_marshal_arguments() {
    let bindings = bindings(BindingsConfig::new());
    let handle = MemoryObject::builder(ShaftResults::type_name())
        .method("Scale", |args| match args {
            [ForeignValue::Float(f), ForeignValue::Int(n)] => Ok(ForeignValue::Float(f * *n as f64)),
            _ => Err(ForeignError::runtime("bad arguments")),
        })
        .build();
    let shaft: ShaftResults = bindings.wrap_as(handle).unwrap();

    let scaled: f64 = shaft
        .proxy()
        .invoke_scalar("Scale", &[ForeignValue::Float(2.5), ForeignValue::Int(4)])
        .unwrap();
    assert_eq!(scaled, 10.0);

    assert_eq!(
        shaft.proxy().invoke("Scale", &[]).unwrap_err(),
        InteropError::Foreign(ForeignError::runtime("bad arguments"))
    );
}

#[test]
fn wrappers_are_shareable_across_threads() {
    let bindings = bindings(BindingsConfig::new());
    let rolling: LoadedRollingBearingResults = bindings.wrap_as(ball_bearing()).unwrap();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let view = rolling.clone();
            scope.spawn(move || {
                let base: BearingLoadCaseResultsLightweight = view.cast().unwrap();
                assert!(base.proxy().handle().same_object(view.proxy().handle()));
                assert_eq!(view.duration().unwrap(), 12.5);
            });
        }
    });
}
