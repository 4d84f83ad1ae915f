use chrono::NaiveDate;
use staffbook_core::{
    export_all, BusinessTripDto, BusinessTripService, EmployeeDto, EmployeeService,
    LeaveScheduleDto, LeaveScheduleService, StorageTarget, UnitOfWork,
};
use std::fs;
use std::path::Path;

#[test]
fn export_all_writes_one_file_per_collection() {
    let uow = UnitOfWork::open_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();

    let written = export_all(&uow, dir.path()).unwrap();
    let names: Vec<String> = written
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "Organizations.json",
            "Departments.json",
            "Posts.json",
            "Employees.json",
            "LeaveSchedules.json",
            "AnnualLeaves.json",
            "BusinessTrips.json",
        ]
    );
    for path in &written {
        assert_eq!(read_json(path), serde_json::json!([]));
    }
}

#[test]
fn service_export_uses_dto_field_names() {
    let service = LeaveScheduleService::connect(&StorageTarget::InMemory).unwrap();
    service
        .create(&LeaveScheduleDto {
            id: None,
            number: "LS-2024".to_string(),
            year: 2024,
            preparation_date: Some(date(2023, 12, 1)),
            approval_date: Some(date(2023, 12, 15)),
        })
        .unwrap();
    let dir = tempfile::tempdir().unwrap();

    let path = service.export_json(dir.path()).unwrap();
    assert_eq!(path, dir.path().join("LeaveSchedules.json"));

    let json = read_json(&path);
    let record = &json.as_array().unwrap()[0];
    assert_eq!(record["number"], "LS-2024");
    assert_eq!(record["year"], 2024);
    assert_eq!(record["preparation_date"], "2023-12-01");
    assert!(record["id"].is_string());
}

#[test]
fn nested_value_groups_and_participants_are_exported() {
    let dir = tempfile::tempdir().unwrap();
    let target = StorageTarget::File(dir.path().join("staffbook.db"));
    let employees = EmployeeService::connect(&target).unwrap();
    let trips = BusinessTripService::connect(&target).unwrap();

    let mut dto = EmployeeDto {
        id: None,
        personnel_number: "X-1".to_string(),
        last_name: "Fedorova".to_string(),
        first_name: "Olga".to_string(),
        middle_name: None,
        gender: None,
        age: None,
        hire_date: None,
        birth: Default::default(),
        passport: Default::default(),
        contacts: Default::default(),
        education: Default::default(),
        post_id: None,
    };
    dto.contacts.email = Some("olga@example.com".to_string());
    let employee_id = employees.create(&dto).unwrap().id.unwrap();
    trips
        .create(&BusinessTripDto {
            id: None,
            name: "Branch visit".to_string(),
            code: Some("BT-1".to_string()),
            start_date: date(2024, 2, 5),
            end_date: date(2024, 2, 9),
            destination: Some("Samara".to_string()),
            purpose: None,
            employee_ids: vec![employee_id],
        })
        .unwrap();

    let out = dir.path().join("out");
    let employees_json = read_json(&employees.export_json(&out).unwrap());
    assert_eq!(employees_json[0]["contacts"]["email"], "olga@example.com");
    assert!(employees_json[0]["passport"]["series"].is_null());

    let trips_json = read_json(&trips.export_json(&out).unwrap());
    assert_eq!(
        trips_json[0]["employee_ids"],
        serde_json::json!([employee_id.to_string()])
    );
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
