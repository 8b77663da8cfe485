use zoo_core::model::animal::{AnimalRecord, AnimalValidationError};

fn valid() -> AnimalRecord {
    AnimalRecord {
        catalog_number: "00HNTWXTQSH4".to_string(),
        name: "Puppi".to_string(),
        breed: "Cape fox".to_string(),
        animal_type: "Mammal".to_string(),
        age: 3,
        gender: "Male".to_string(),
        is_healthy: true,
    }
}

#[test]
fn valid_record_passes() {
    assert_eq!(valid().validate(), Ok(()));
    assert!(valid().is_valid());
}

#[test]
fn boundary_values_are_accepted() {
    let mut animal = valid();
    animal.name = "Al".to_string();
    animal.breed = "b".repeat(30);
    animal.animal_type = "Ox".to_string();
    animal.gender = "Female".to_string();
    animal.is_healthy = false;

    animal.age = 0;
    assert_eq!(animal.validate(), Ok(()));
    animal.age = 300;
    assert_eq!(animal.validate(), Ok(()));
}

#[test]
fn catalog_number_rules() {
    let mut animal = valid();

    animal.catalog_number = String::new();
    assert_eq!(
        animal.validate(),
        Err(AnimalValidationError::BlankField {
            field: "catalogNumber"
        })
    );

    for bad in ["00HNTWXTQSH4wwwww", "00HNTWXTQSH", "00hntwxtqsh4", "00HNTWXTQS-4"] {
        animal.catalog_number = bad.to_string();
        assert_eq!(
            animal.validate(),
            Err(AnimalValidationError::InvalidCatalogNumber),
            "accepted `{bad}`"
        );
    }
}

#[test]
fn text_length_rules() {
    let mut animal = valid();
    animal.name = "P".to_string();
    assert_eq!(
        animal.validate(),
        Err(AnimalValidationError::FieldLength {
            field: "name",
            len: 1,
            min: 2,
            max: 30,
        })
    );

    let mut animal = valid();
    animal.animal_type = "M".repeat(31);
    let err = animal.validate().unwrap_err();
    assert_eq!(err.field(), "type");
}

#[test]
fn age_rules() {
    let mut animal = valid();
    animal.age = -1;
    assert_eq!(
        animal.validate(),
        Err(AnimalValidationError::AgeOutOfRange { age: -1 })
    );
    animal.age = 301;
    assert_eq!(
        animal.validate(),
        Err(AnimalValidationError::AgeOutOfRange { age: 301 })
    );
}

#[test]
fn gender_rules() {
    let mut animal = valid();

    animal.gender = "Malesssssssssssssssssssssss".to_string();
    assert_eq!(
        animal.validate(),
        Err(AnimalValidationError::GenderTooLong { len: 27 })
    );

    for bad in ["male", "FEMALE", "Other"] {
        animal.gender = bad.to_string();
        assert_eq!(
            animal.validate(),
            Err(AnimalValidationError::UnrecognizedGender)
        );
    }

    animal.gender = "  ".to_string();
    assert_eq!(
        animal.validate(),
        Err(AnimalValidationError::BlankField { field: "gender" })
    );
}

#[test]
fn first_violation_in_field_order_wins() {
    let mut animal = valid();
    animal.gender = "Malesssssssssssssssssssssss".to_string();
    animal.age = 999;
    animal.catalog_number = "00HNTWXTQSH4wwwww".to_string();

    assert_eq!(
        animal.validate(),
        Err(AnimalValidationError::InvalidCatalogNumber)
    );
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let json = serde_json::to_value(valid()).unwrap();
    assert_eq!(json["catalogNumber"], "00HNTWXTQSH4");
    assert_eq!(json["type"], "Mammal");
    assert_eq!(json["isHealthy"], true);
    assert_eq!(json["age"], 3);

    let decoded: AnimalRecord = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, valid());
}

#[test]
fn deserialize_requires_is_healthy() {
    let value = serde_json::json!({
        "catalogNumber": "00HNTWXTQSH4",
        "name": "Puppi",
        "breed": "Cape fox",
        "type": "Mammal",
        "age": 3,
        "gender": "Male"
    });

    let err = serde_json::from_value::<AnimalRecord>(value).unwrap_err();
    assert!(
        err.to_string().contains("missing field `isHealthy`"),
        "unexpected error: {err}"
    );
}
