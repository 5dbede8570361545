use proptest::prelude::*;
use serde_json::{Map, Value, json};
use veneer_dto::{AdditionalProperties, Dto, Field};

#[derive(Debug, Clone, PartialEq, Dto)]
struct Profile {
    name: Field<String>,
    age: Field<i64>,
    tags: Field<Vec<String>>,
    score: Field<f64>,
    #[dto(additional)]
    extra: AdditionalProperties,
}

fn field<T: Clone + core::fmt::Debug>(value: impl Strategy<Value = T>) -> impl Strategy<Value = Field<T>> {
    prop_oneof![
        Just(Field::Unset),
        Just(Field::Null),
        value.prop_map(Field::Value),
    ]
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|v| json!(v)),
        "[a-z]{0,8}".prop_map(Value::String),
    ]
}

fn extra() -> impl Strategy<Value = Vec<(String, Value)>> {
    prop::collection::vec(("x_[a-z]{1,6}", scalar()), 0..4)
}

/// Finite and infinite floats; `NaN` is covered separately since it is not
/// equal to itself.
fn float() -> impl Strategy<Value = f64> {
    use proptest::num::f64::{INFINITE, NEGATIVE, NORMAL, POSITIVE, SUBNORMAL, ZERO};
    POSITIVE | NEGATIVE | NORMAL | SUBNORMAL | ZERO | INFINITE
}

prop_compose! {
    fn profile()(
        name in field("[a-z ]{0,12}"),
        age in field(any::<i64>()),
        tags in field(prop::collection::vec("[a-z]{1,5}", 0..3)),
        score in field(float()),
        extra in extra(),
    ) -> Profile {
        let mut profile = Profile {
            name,
            age,
            tags,
            score,
            extra: AdditionalProperties::new(),
        };
        for (key, value) in extra {
            profile.set_additional(key, value).unwrap();
        }
        profile
    }
}

proptest! {
    #[test]
    fn decode_inverts_encode(x in profile()) {
        let mapping = x.to_mapping();
        prop_assert_eq!(mapping.contains_key("name"), !x.name.is_unset());
        prop_assert_eq!(mapping.contains_key("age"), !x.age.is_unset());

        let back = Profile::from_mapping(mapping).unwrap();
        prop_assert_eq!(back, x);
    }

    #[test]
    fn undeclared_keys_pass_through(entries in prop::collection::vec(("k_[a-z]{1,6}", scalar()), 0..5)) {
        let mut input = Map::new();
        for (key, value) in &entries {
            input.insert(key.clone(), value.clone());
        }

        let profile = Profile::from_mapping(input.clone()).unwrap();
        for (key, value) in &input {
            prop_assert_eq!(&profile[key.as_str()], value);
        }
        prop_assert_eq!(profile.to_mapping(), input);
    }
}

#[test]
fn non_finite_scores_round_trip() {
    let mut profile = Profile {
        name: Field::Unset,
        age: Field::Unset,
        tags: Field::Unset,
        score: Field::Value(f64::INFINITY),
        extra: AdditionalProperties::new(),
    };
    assert_eq!(profile.to_json(), json!({"score": "Infinity"}));
    assert_eq!(Profile::from_json(profile.to_json()).unwrap(), profile);

    profile.score = Field::Value(f64::NAN);
    let back = Profile::from_json(profile.to_json()).unwrap();
    assert!(back.score.value().is_some_and(|score| score.is_nan()));
}
