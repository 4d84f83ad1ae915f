use chrono::NaiveDate;
use rust_decimal::Decimal;
use staffbook_core::{
    BusinessTrip, Department, Employee, Post, RepoError, Repository, StorageTarget, UnitOfWork,
};
use uuid::Uuid;

#[test]
fn staged_changes_are_invisible_until_save() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let department = department("Accounting");

    uow.departments().create(&department);
    assert_eq!(uow.pending_changes(), 1);
    assert!(uow.departments().get_all().unwrap().is_empty());

    assert_eq!(uow.save().unwrap(), 1);
    assert_eq!(uow.pending_changes(), 0);
    assert_eq!(
        uow.departments().find_by_id(department.id).unwrap(),
        department
    );
}

#[test]
fn save_without_changes_is_a_no_op() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    assert_eq!(uow.save().unwrap(), 0);
}

#[test]
fn repositories_are_created_once_per_unit() {
    let uow = UnitOfWork::open_in_memory().unwrap();

    assert!(std::ptr::eq(uow.employees(), uow.employees()));
    assert!(std::ptr::eq(uow.business_trips(), uow.business_trips()));
}

#[test]
fn failed_save_rolls_back_every_staged_change() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let department = department("IT");
    let first = employee("T-001", "Ivanov", None);
    let duplicate = employee("T-001", "Petrov", None);

    uow.departments().create(&department);
    uow.employees().create_series(&[first, duplicate]);
    assert_eq!(uow.pending_changes(), 3);

    let err = uow.save().unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
    assert!(err.is_constraint_violation());
    assert_eq!(uow.pending_changes(), 0);
    assert!(uow.departments().get_all().unwrap().is_empty());
    assert!(uow.employees().get_all().unwrap().is_empty());
}

#[test]
fn discard_changes_drops_staged_set() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    uow.departments().create(&department("Sales"));

    assert_eq!(uow.discard_changes(), 1);
    assert_eq!(uow.save().unwrap(), 0);
    assert!(uow.departments().get_first().unwrap().is_none());
}

#[test]
fn dropping_unit_discards_unsaved_changes() {
    let dir = tempfile::tempdir().unwrap();
    let target = StorageTarget::File(dir.path().join("staffbook.db"));

    let uow = UnitOfWork::open(&target).unwrap();
    uow.departments().create(&department("Legal"));
    drop(uow);

    let reopened = UnitOfWork::open(&target).unwrap();
    assert!(reopened.departments().get_all().unwrap().is_empty());
}

#[test]
fn committed_changes_are_visible_to_other_units() {
    let dir = tempfile::tempdir().unwrap();
    let target = StorageTarget::File(dir.path().join("staffbook.db"));
    let department = department("Logistics");

    let writer = UnitOfWork::open(&target).unwrap();
    writer.departments().create(&department);
    writer.save().unwrap();

    let reader = UnitOfWork::open(&target).unwrap();
    assert_eq!(
        reader.departments().get_all().unwrap(),
        vec![department]
    );
}

#[test]
fn update_and_remove_of_missing_record_fail_at_save() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let ghost = department("Ghost");

    uow.departments().update(&ghost);
    let err = uow.save().unwrap_err();
    assert!(!err.is_constraint_violation());
    assert!(matches!(
        err,
        RepoError::NotFound { entity: "department", id } if id == ghost.id
    ));

    uow.departments().remove(&ghost);
    assert!(matches!(
        uow.save().unwrap_err(),
        RepoError::NotFound { .. }
    ));
}

#[test]
fn get_applies_predicate_and_keeps_insertion_order() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let names = ["Finance", "IT", "Facilities", "HR"];
    let departments: Vec<Department> = names.iter().map(|name| department(name)).collect();
    uow.departments().create_series(&departments);
    uow.save().unwrap();

    let starting_with_f = uow
        .departments()
        .get(&|item: &Department| item.name.starts_with('F'))
        .unwrap();
    let found: Vec<&str> = starting_with_f.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(found, vec!["Finance", "Facilities"]);

    assert_eq!(
        uow.departments().get_first().unwrap().map(|item| item.name),
        Some("Finance".to_string())
    );
}

#[test]
fn remove_series_and_remove_all() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let departments = vec![department("A"), department("B"), department("C")];
    uow.departments().create_series(&departments);
    uow.save().unwrap();

    uow.departments().remove_series(&departments[..2]);
    uow.save().unwrap();
    assert_eq!(uow.departments().get_all().unwrap(), vec![departments[2].clone()]);

    uow.departments().remove_all();
    uow.save().unwrap();
    assert!(uow.departments().get_all().unwrap().is_empty());
}

#[test]
fn decimal_amounts_survive_storage_exactly() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let post = Post {
        id: Uuid::new_v4(),
        title: "Programmer".to_string(),
        unit_count: 3,
        salary: Decimal::new(123_456_78, 2),
        premium: Decimal::new(5, 1),
        leave_days: 28,
        department_id: None,
    };

    uow.posts().create(&post);
    uow.save().unwrap();

    let stored = uow.posts().find_by_id(post.id).unwrap();
    assert_eq!(stored.salary, Decimal::new(123_456_78, 2));
    assert_eq!(stored, post);
}

#[test]
fn business_trip_participants_are_stored_in_order_and_replaced_on_update() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let first = employee("E-1", "Smirnova", None);
    let second = employee("E-2", "Kuznetsov", None);
    uow.employees().create_series(&[first.clone(), second.clone()]);

    let mut trip = BusinessTrip {
        id: Uuid::new_v4(),
        name: "Supplier audit".to_string(),
        code: Some("BT-7".to_string()),
        start_date: date(2024, 3, 4),
        end_date: date(2024, 3, 8),
        destination: Some("Kazan".to_string()),
        purpose: None,
        employee_ids: vec![second.id, first.id],
    };
    uow.business_trips().create(&trip);
    uow.save().unwrap();

    let stored = uow.business_trips().find_by_id(trip.id).unwrap();
    assert_eq!(stored.employee_ids, vec![second.id, first.id]);

    trip.employee_ids = vec![first.id];
    uow.business_trips().update(&trip);
    uow.save().unwrap();
    assert_eq!(
        uow.business_trips().find_by_id(trip.id).unwrap().employee_ids,
        vec![first.id]
    );
}

#[test]
fn removing_employee_drops_trip_participation() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let staying = employee("E-10", "Orlova", None);
    let leaving = employee("E-11", "Popov", None);
    uow.employees().create_series(&[staying.clone(), leaving.clone()]);
    let trip = BusinessTrip {
        id: Uuid::new_v4(),
        name: "Conference".to_string(),
        code: None,
        start_date: date(2024, 5, 1),
        end_date: date(2024, 5, 2),
        destination: None,
        purpose: None,
        employee_ids: vec![staying.id, leaving.id],
    };
    uow.business_trips().create(&trip);
    uow.save().unwrap();

    uow.employees().remove(&leaving);
    uow.save().unwrap();

    let stored = uow.business_trips().find_by_id(trip.id).unwrap();
    assert_eq!(stored.employee_ids, vec![staying.id]);
}

fn department(name: &str) -> Department {
    Department {
        id: Uuid::new_v4(),
        name: name.to_string(),
        manager: None,
        code: None,
        organization_id: None,
    }
}

fn employee(personnel_number: &str, last_name: &str, post_id: Option<Uuid>) -> Employee {
    Employee {
        id: Uuid::new_v4(),
        personnel_number: personnel_number.to_string(),
        last_name: last_name.to_string(),
        first_name: "Anna".to_string(),
        middle_name: None,
        gender: None,
        age: Some(30),
        hire_date: Some(date(2020, 1, 15)),
        birth: Default::default(),
        passport: Default::default(),
        contacts: Default::default(),
        education: Default::default(),
        post_id,
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
