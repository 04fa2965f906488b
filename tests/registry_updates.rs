use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use campusd::db;
use campusd::domain::error::DomainError;
use campusd::domain::students::{self, NewStudent, StudentPatch, DEFAULT_PASSWORD};
use campusd::domain::teachers::{self, NewTeacher, TeacherPatch};

fn temp_workspace(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "campusd-{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

#[test]
fn create_assigns_default_credential_and_department() {
    let conn = db::open_db(&temp_workspace("reg-create")).expect("open db");

    let student = students::create(
        &conn,
        NewStudent {
            name: "Noor Haddad".to_string(),
            email: "noor@campus.edu".to_string(),
            department: Some("CS".to_string()),
            ..Default::default()
        },
    )
    .expect("create");

    assert_eq!(student.password, DEFAULT_PASSWORD);
    assert_eq!(student.department.as_deref(), Some("CS"));
    assert!(student.gpa.is_none());
}

#[test]
fn create_rejects_blank_fields() {
    let conn = db::open_db(&temp_workspace("reg-blank")).expect("open db");

    let err = students::create(
        &conn,
        NewStudent {
            name: " ".to_string(),
            email: "x@campus.edu".to_string(),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[test]
fn patching_only_the_email_preserves_everything_else() {
    let conn = db::open_db(&temp_workspace("reg-patch-email")).expect("open db");

    let created = students::create(
        &conn,
        NewStudent {
            name: "Priya Nair".to_string(),
            email: "priya@campus.edu".to_string(),
            gpa: Some(3.4),
            department: Some("Physics".to_string()),
            ..Default::default()
        },
    )
    .expect("create");

    let updated = students::update(
        &conn,
        created.id,
        StudentPatch {
            email: Some("priya.nair@campus.edu".to_string()),
            ..Default::default()
        },
    )
    .expect("update");

    assert_eq!(updated.email, "priya.nair@campus.edu");
    assert_eq!(updated.name, "Priya Nair");
    assert_eq!(updated.department.as_deref(), Some("Physics"));
    assert_eq!(updated.gpa, Some(3.4));
}

#[test]
fn blank_patch_values_are_treated_as_absent() {
    let conn = db::open_db(&temp_workspace("reg-patch-blank")).expect("open db");

    let created = students::create(
        &conn,
        NewStudent {
            name: "Tomas Lindgren".to_string(),
            email: "tomas@campus.edu".to_string(),
            ..Default::default()
        },
    )
    .expect("create");

    let updated = students::update(
        &conn,
        created.id,
        StudentPatch {
            name: Some("   ".to_string()),
            ..Default::default()
        },
    )
    .expect("update");
    assert_eq!(updated.name, "Tomas Lindgren");
}

#[test]
fn patching_the_department_creates_it_on_demand() {
    let conn = db::open_db(&temp_workspace("reg-patch-dept")).expect("open db");

    let created = students::create(
        &conn,
        NewStudent {
            name: "Lena Fischer".to_string(),
            email: "lena@campus.edu".to_string(),
            ..Default::default()
        },
    )
    .expect("create");
    assert!(created.department.is_none());

    let updated = students::update(
        &conn,
        created.id,
        StudentPatch {
            department: Some("Chemistry".to_string()),
            ..Default::default()
        },
    )
    .expect("update");
    assert_eq!(updated.department.as_deref(), Some("Chemistry"));

    let listed = students::list_by_department(&conn, "Chemistry").expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
}

#[test]
fn update_and_gpa_write_fail_on_missing_ids() {
    let conn = db::open_db(&temp_workspace("reg-missing")).expect("open db");

    let err = students::update(&conn, 41, StudentPatch::default()).unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
    let err = students::update_gpa(&conn, 41, Some(3.9)).unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[test]
fn update_gpa_writes_the_value_directly() {
    let conn = db::open_db(&temp_workspace("reg-gpa")).expect("open db");

    let created = students::create(
        &conn,
        NewStudent {
            name: "Omar Said".to_string(),
            email: "omar@campus.edu".to_string(),
            ..Default::default()
        },
    )
    .expect("create");

    let updated = students::update_gpa(&conn, created.id, Some(3.75)).expect("set gpa");
    assert_eq!(updated.gpa, Some(3.75));

    let cleared = students::update_gpa(&conn, created.id, None).expect("clear gpa");
    assert!(cleared.gpa.is_none());
}

#[test]
fn teacher_registry_mirrors_the_student_shape() {
    let conn = db::open_db(&temp_workspace("reg-teacher")).expect("open db");

    let created = teachers::create(
        &conn,
        NewTeacher {
            name: "Dr. Ana Costa".to_string(),
            email: "ana@campus.edu".to_string(),
            designation: Some("Professor".to_string()),
            department: Some("CS".to_string()),
            ..Default::default()
        },
    )
    .expect("create");
    assert_eq!(created.password, DEFAULT_PASSWORD);
    assert_eq!(created.designation.as_deref(), Some("Professor"));

    let updated = teachers::update(
        &conn,
        created.id,
        TeacherPatch {
            designation: Some("Head of Department".to_string()),
            ..Default::default()
        },
    )
    .expect("update");
    assert_eq!(updated.designation.as_deref(), Some("Head of Department"));
    assert_eq!(updated.name, "Dr. Ana Costa");
    assert_eq!(updated.department.as_deref(), Some("CS"));

    teachers::delete(&conn, created.id).expect("delete");
    let err = teachers::get_by_id(&conn, created.id).unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
    let err = teachers::delete(&conn, created.id).unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}
