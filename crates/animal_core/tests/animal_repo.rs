use animal_core::db::migrations::latest_version;
use animal_core::{Animal, AnimalRepository, AnimalStore, RepoError, SqliteAnimalRepository};
use rusqlite::Connection;

fn open_repo() -> SqliteAnimalRepository {
    SqliteAnimalRepository::try_new(AnimalStore::open_in_memory().unwrap()).unwrap()
}

fn animal(catalog_number: &str, name: &str, kind: &str) -> Animal {
    Animal::new(catalog_number, name, "Mixed", kind, 4, "Female", true)
}

#[test]
fn add_and_get_roundtrip() {
    let repo = open_repo();
    let rex = Animal::new("01HNTWXTQSH4", "Rex", "Labrador", "Dog", 3, "Male", false);

    repo.add_animal(&rex).unwrap();

    let loaded = repo.get_animal("01HNTWXTQSH4").unwrap().unwrap();
    assert_eq!(loaded, rex);
}

#[test]
fn get_missing_returns_none() {
    let repo = open_repo();
    repo.add_animal(&animal("01HNTWXTQSH4", "Rex", "Dog"))
        .unwrap();

    assert!(repo.get_animal("01HNTWXZZZZZ").unwrap().is_none());
}

#[test]
fn list_returns_insertion_order() {
    let repo = open_repo();
    let first = animal("01HNTWXAAAA1", "Zed", "Cat");
    let second = animal("01HNTWXAAAA2", "Amy", "Dog");
    let third = animal("01HNTWXAAAA3", "Bob", "Cat");
    repo.add_animal(&first).unwrap();
    repo.add_animal(&second).unwrap();
    repo.add_animal(&third).unwrap();

    let all = repo.list_animals().unwrap();
    assert_eq!(all, vec![first, second, third]);
}

#[test]
fn duplicate_catalog_numbers_are_stored() {
    let repo = open_repo();
    let first = animal("01HNTWXTQSH4", "Rex", "Dog");
    let second = animal("01HNTWXTQSH4", "Max", "Dog");
    repo.add_animal(&first).unwrap();
    repo.add_animal(&second).unwrap();

    assert_eq!(repo.list_animals().unwrap().len(), 2);
    // Lookup by key resolves to the earliest row.
    assert_eq!(repo.get_animal("01HNTWXTQSH4").unwrap().unwrap(), first);
}

#[test]
fn delete_removes_all_matching_rows_and_tolerates_absence() {
    let repo = open_repo();
    repo.add_animal(&animal("01HNTWXTQSH4", "Rex", "Dog"))
        .unwrap();
    repo.add_animal(&animal("01HNTWXTQSH4", "Max", "Dog"))
        .unwrap();
    let kept = animal("01HNTWXKEEP1", "Tom", "Cat");
    repo.add_animal(&kept).unwrap();

    assert_eq!(repo.delete_animal("01HNTWXTQSH4").unwrap(), 2);
    assert_eq!(repo.delete_animal("01HNTWXTQSH4").unwrap(), 0);
    assert_eq!(repo.list_animals().unwrap(), vec![kept]);
}

#[test]
fn search_by_type_is_exact_match() {
    let repo = open_repo();
    let dog = animal("01HNTWXAAAA1", "Rex", "Dog");
    let cat = animal("01HNTWXAAAA2", "Tom", "Cat");
    let other_dog = animal("01HNTWXAAAA3", "Max", "Dog");
    let lowercase_dog = animal("01HNTWXAAAA4", "Ace", "dog");
    for item in [&dog, &cat, &other_dog, &lowercase_dog] {
        repo.add_animal(item).unwrap();
    }

    assert_eq!(repo.search_by_type("Dog").unwrap(), vec![dog, other_dog]);
    assert_eq!(repo.search_by_type("Cat").unwrap(), vec![cat]);
    assert!(repo.search_by_type("Do").unwrap().is_empty());
}

#[test]
fn update_overwrites_fields_and_can_rekey() {
    let repo = open_repo();
    let mut rex = animal("01HNTWXTQSH4", "Rex", "Dog");
    repo.add_animal(&rex).unwrap();

    rex.catalog_number = "01HNTWXUPDET".to_string();
    rex.name = "Rexy".to_string();
    rex.age = 5;
    rex.is_healthy = false;
    repo.update_animal(&rex).unwrap();

    assert!(repo.get_animal("01HNTWXTQSH4").unwrap().is_none());
    assert_eq!(repo.get_animal("01HNTWXUPDET").unwrap().unwrap(), rex);
    assert_eq!(repo.list_animals().unwrap().len(), 1);
}

#[test]
fn update_unknown_id_returns_not_found() {
    let repo = open_repo();
    let ghost = animal("01HNTWXTQSH4", "Ghost", "Dog");

    let err = repo.update_animal(&ghost).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == ghost.id));
}

#[test]
fn repository_does_not_validate() {
    let repo = open_repo();
    let invalid = Animal::new("bad", "", " ", "", -2, "", true);

    repo.add_animal(&invalid).unwrap();
    assert_eq!(repo.get_animal("bad").unwrap().unwrap(), invalid);
}

#[test]
fn clones_share_one_store() {
    let repo = open_repo();
    let clone = repo.clone();
    repo.add_animal(&animal("01HNTWXTQSH4", "Rex", "Dog"))
        .unwrap();

    assert_eq!(clone.list_animals().unwrap().len(), 1);
    assert_eq!(repo.store().handle_count(), 2);
}

#[test]
fn corrupted_rows_are_reported_as_invalid_data() {
    let repo = open_repo();
    repo.store()
        .lock()
        .unwrap()
        .execute_batch(
            "INSERT INTO animals (uuid, catalog_number, name, breed, type, age, gender, is_healthy)
             VALUES ('not-a-uuid', '01HNTWXTQSH4', 'Rex', 'Labrador', 'Dog', 3, 'Male', 1);",
        )
        .unwrap();

    let err = repo.list_animals().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("not-a-uuid")));
}

#[test]
fn out_of_range_health_flag_is_invalid_data() {
    let repo = open_repo();
    repo.store()
        .lock()
        .unwrap()
        .execute_batch(
            "INSERT INTO animals (uuid, catalog_number, name, breed, type, age, gender, is_healthy)
             VALUES ('11111111-2222-4333-8444-555555555555', '01HNTWXTQSH4', 'Rex', 'Labrador', 'Dog', 3, 'Male', 7);",
        )
        .unwrap();

    let err = repo.get_animal("01HNTWXTQSH4").unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("is_healthy")));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let store = AnimalStore::from_connection(Connection::open_in_memory().unwrap());

    match SqliteAnimalRepository::try_new(store) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_animals_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteAnimalRepository::try_new(AnimalStore::from_connection(conn));
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("animals"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE animals (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            uuid TEXT NOT NULL UNIQUE,
            catalog_number TEXT NOT NULL,
            name TEXT NOT NULL,
            breed TEXT NOT NULL,
            type TEXT NOT NULL,
            age INTEGER NOT NULL,
            gender TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteAnimalRepository::try_new(AnimalStore::from_connection(conn));
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "animals",
            column: "is_healthy"
        })
    ));
}
