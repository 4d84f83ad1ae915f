use rust_decimal::Decimal;
use staffbook_core::{
    AnnualLeaveDto, AnnualLeaveService, DepartmentDto, DepartmentService, EmployeeDto,
    EmployeeService, ErrorKind, OrganizationDto, OrganizationService, PostDto, PostService,
    ServiceError, StorageTarget,
};
use tempfile::TempDir;
use uuid::Uuid;

struct Staff {
    _dir: TempDir,
    organizations: OrganizationService,
    departments: DepartmentService,
    posts: PostService,
    employees: EmployeeService,
    leaves: AnnualLeaveService,
}

impl Staff {
    fn open() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let target = StorageTarget::File(dir.path().join("staffbook.db"));
        Self {
            organizations: OrganizationService::connect(&target).unwrap(),
            departments: DepartmentService::connect(&target).unwrap(),
            posts: PostService::connect(&target).unwrap(),
            employees: EmployeeService::connect(&target).unwrap(),
            leaves: AnnualLeaveService::connect(&target).unwrap(),
            _dir: dir,
        }
    }

    /// IT department with one Programmer post held by one employee.
    fn seed(&self) -> (Uuid, Uuid, Uuid) {
        let department = self
            .departments
            .create(&DepartmentDto {
                id: None,
                name: "IT".to_string(),
                manager: Some("Chief Engineer".to_string()),
                code: Some("D-IT".to_string()),
                organization_id: None,
            })
            .unwrap();
        let department_id = department.id.unwrap();

        let post = self.posts.create(&programmer(Some(department_id))).unwrap();
        let post_id = post.id.unwrap();

        let employee = self
            .employees
            .create(&EmployeeDto {
                id: None,
                personnel_number: "P-100".to_string(),
                last_name: "Sokolov".to_string(),
                first_name: "Ilya".to_string(),
                middle_name: None,
                gender: None,
                age: Some(34),
                hire_date: None,
                birth: Default::default(),
                passport: Default::default(),
                contacts: Default::default(),
                education: Default::default(),
                post_id: Some(post_id),
            })
            .unwrap();

        (department_id, post_id, employee.id.unwrap())
    }
}

#[test]
fn department_with_posts_cannot_be_deleted() {
    let staff = Staff::open();
    let (department_id, post_id, _) = staff.seed();
    let department_before = staff.departments.find_by_id(Some(department_id)).unwrap();
    let post_before = staff.posts.find_by_id(Some(post_id)).unwrap();

    let err = staff.departments.delete(department_id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DependencyConflict);
    assert!(matches!(
        err,
        ServiceError::DependencyConflict {
            entity: "department",
            dependent: "post",
            count: 1,
            ..
        }
    ));
    assert_eq!(
        staff.departments.find_by_id(Some(department_id)).unwrap(),
        department_before
    );
    assert_eq!(staff.posts.find_by_id(Some(post_id)).unwrap(), post_before);
}

#[test]
fn post_with_employees_cannot_be_deleted() {
    let staff = Staff::open();
    let (_, post_id, employee_id) = staff.seed();
    let post_before = staff.posts.find_by_id(Some(post_id)).unwrap();
    let employee_before = staff.employees.find_by_id(Some(employee_id)).unwrap();

    let err = staff.posts.delete(post_id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DependencyConflict);
    assert_eq!(staff.posts.find_by_id(Some(post_id)).unwrap(), post_before);
    assert_eq!(
        staff.employees.find_by_id(Some(employee_id)).unwrap(),
        employee_before
    );
}

#[test]
fn employee_with_annual_leave_can_be_deleted() {
    let staff = Staff::open();
    let (_, _, employee_id) = staff.seed();
    let leave = staff.leaves.create(&annual_leave(Some(employee_id))).unwrap();

    staff.employees.delete(employee_id).unwrap();

    assert_eq!(staff.employees.count().unwrap(), 0);
    let kept = staff.leaves.find_by_id(leave.id).unwrap();
    assert_eq!(kept.employee_id, None);
    assert_eq!(kept.scheduled_days, leave.scheduled_days);
}

#[test]
fn delete_all_employees_clears_leave_references() {
    let staff = Staff::open();
    let (_, _, employee_id) = staff.seed();
    staff.leaves.create(&annual_leave(Some(employee_id))).unwrap();

    assert_eq!(staff.employees.delete_all().unwrap(), 1);

    assert!(staff.employees.get_all().unwrap().is_empty());
    assert_eq!(staff.employees.count().unwrap(), 0);
    assert!(staff
        .leaves
        .get_all()
        .unwrap()
        .iter()
        .all(|leave| leave.employee_id.is_none()));
}

#[test]
fn organization_owning_department_can_be_deleted() {
    let staff = Staff::open();
    let organization = staff
        .organizations
        .create(&OrganizationDto {
            id: None,
            name: "Northwind".to_string(),
            short_name: None,
            legal_address: None,
            actual_address: None,
            phone: None,
            email: None,
            requisites: Default::default(),
            bank: Default::default(),
        })
        .unwrap();
    let organization_id = organization.id.unwrap();
    let department = staff
        .departments
        .create(&DepartmentDto {
            id: None,
            name: "Finance".to_string(),
            manager: None,
            code: None,
            organization_id: Some(organization_id),
        })
        .unwrap();

    staff.organizations.delete(organization_id).unwrap();

    assert_eq!(staff.organizations.count().unwrap(), 0);
    let kept = staff.departments.find_by_id(department.id).unwrap();
    assert_eq!(kept.organization_id, None);
    assert_eq!(kept.name, "Finance");
}

#[test]
fn removing_dependents_bottom_up_unblocks_deletes() {
    let staff = Staff::open();
    let (department_id, post_id, employee_id) = staff.seed();

    staff.employees.delete(employee_id).unwrap();
    staff.posts.delete(post_id).unwrap();
    staff.departments.delete(department_id).unwrap();

    assert_eq!(staff.departments.count().unwrap(), 0);
    assert_eq!(staff.posts.count().unwrap(), 0);
}

#[test]
fn delete_all_with_live_dependents_fails_in_storage_and_keeps_rows() {
    let staff = Staff::open();
    staff.seed();

    let err = staff.posts.delete_all().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StorageFailure);
    assert_eq!(staff.posts.count().unwrap(), 1);
    assert_eq!(staff.employees.count().unwrap(), 1);
}

#[test]
fn post_referencing_missing_department_is_rejected() {
    let staff = Staff::open();

    let err = staff.posts.create(&programmer(Some(Uuid::new_v4()))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    assert_eq!(staff.posts.count().unwrap(), 0);
}

#[test]
fn negative_salary_is_rejected() {
    let staff = Staff::open();
    let mut post = programmer(None);
    post.salary = Decimal::new(-1, 0);

    assert_eq!(
        staff.posts.create(&post).unwrap_err().kind(),
        ErrorKind::ValidationFailed
    );
}

fn annual_leave(employee_id: Option<Uuid>) -> AnnualLeaveDto {
    AnnualLeaveDto {
        id: None,
        scheduled_days: 28,
        actual_days: None,
        scheduled_date: None,
        actual_date: None,
        employee_id,
        leave_schedule_id: None,
    }
}

fn programmer(department_id: Option<Uuid>) -> PostDto {
    PostDto {
        id: None,
        title: "Programmer".to_string(),
        unit_count: 2,
        salary: Decimal::new(150_000, 0),
        premium: Decimal::new(10_000, 0),
        leave_days: 28,
        department_id,
    }
}
