use animal_core::{Animal, AnimalValidationError};
use uuid::Uuid;

fn valid_animal() -> Animal {
    Animal::new("01HNTWXTQSH4", "Rex", "Labrador", "Dog", 3, "Male", true)
}

#[test]
fn animal_new_generates_stable_id_and_keeps_fields() {
    let animal = valid_animal();

    assert!(!animal.id.is_nil());
    assert_eq!(animal.catalog_number, "01HNTWXTQSH4");
    assert_eq!(animal.name, "Rex");
    assert_eq!(animal.breed, "Labrador");
    assert_eq!(animal.kind, "Dog");
    assert_eq!(animal.age, 3);
    assert_eq!(animal.gender, "Male");
    assert!(animal.is_healthy);
    assert!(animal.is_valid());
    assert_ne!(animal.id, valid_animal().id);
}

#[test]
fn validate_rejects_blank_required_fields() {
    let cases: [(&str, fn(&mut Animal)); 5] = [
        ("catalog_number", |a| a.catalog_number = String::new()),
        ("name", |a| a.name = "   ".to_string()),
        ("breed", |a| a.breed = "\t".to_string()),
        ("type", |a| a.kind = String::new()),
        ("gender", |a| a.gender = " \n ".to_string()),
    ];

    for (field, blank_out) in cases {
        let mut animal = valid_animal();
        blank_out(&mut animal);
        assert_eq!(
            animal.validate().unwrap_err(),
            AnimalValidationError::BlankField(field),
            "field {field}"
        );
    }
}

#[test]
fn validate_rejects_malformed_catalog_number() {
    let mut animal = valid_animal();
    animal.catalog_number = "invalidNumber".to_string();

    let err = animal.validate().unwrap_err();
    assert_eq!(
        err,
        AnimalValidationError::MalformedCatalogNumber("invalidNumber".to_string())
    );
    assert!(err.to_string().contains("12"));
}

#[test]
fn validate_rejects_negative_age_and_accepts_zero() {
    let mut animal = valid_animal();
    animal.age = -1;
    assert_eq!(
        animal.validate().unwrap_err(),
        AnimalValidationError::NegativeAge(-1)
    );

    animal.age = 0;
    animal.validate().unwrap();
}

#[test]
fn validate_rejects_nil_id() {
    let mut animal = valid_animal();
    animal.id = Uuid::nil();
    assert_eq!(animal.validate().unwrap_err(), AnimalValidationError::NilId);
}

#[test]
fn animal_serialization_uses_expected_wire_fields() {
    let mut animal = valid_animal();
    animal.id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    animal.is_healthy = false;

    let json = serde_json::to_value(&animal).unwrap();
    assert_eq!(json["id"], "11111111-2222-4333-8444-555555555555");
    assert_eq!(json["catalog_number"], "01HNTWXTQSH4");
    assert_eq!(json["type"], "Dog");
    assert_eq!(json["age"], 3);
    assert_eq!(json["is_healthy"], false);
    assert!(json.get("kind").is_none());

    let decoded: Animal = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, animal);
}

#[test]
fn deserialized_invalid_animal_is_representable_but_not_valid() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "catalog_number": "01HNTWXTQSH4",
        "name": "",
        "breed": "Siamese",
        "type": "Cat",
        "age": 2,
        "gender": "Female",
        "is_healthy": true
    });

    let animal: Animal = serde_json::from_value(value).unwrap();
    assert_eq!(
        animal.validate().unwrap_err(),
        AnimalValidationError::BlankField("name")
    );
}
