//! Organizational record service tests over in-memory repositories

mod common;

use campus_admin::contract::{
    Board, BoardKind, BoardPatch, CampusError, Class, CourseTerm, Lecturer, Major, Position,
    PositionPatch, Specialist, SpecialistPatch,
};
use campus_admin::domain::NoOpEventPublisher;
use campus_admin::{CampusServices, Config};
use chrono::Utc;
use common::{print_test_header, TestStores};
use std::sync::Arc;

fn create_services() -> (CampusServices, TestStores) {
    let stores = TestStores::new();
    stores.seed_faculty("CNTT", "Information Technology");
    stores.seed_faculty("KT", "Economics");
    let services = stores.services(Arc::new(NoOpEventPublisher));
    (services, stores)
}

fn board(id: &str, name: &str, kind: BoardKind, faculty_id: Option<&str>) -> Board {
    Board {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        description: None,
        faculty_id: faculty_id.map(str::to_string),
        faculty_name: None,
        is_active: true,
    }
}

fn lecturer(id: &str, name: &str, email: &str) -> Lecturer {
    Lecturer {
        id: id.to_string(),
        full_name: name.to_string(),
        email: email.to_string(),
        faculty_id: "CNTT".to_string(),
        is_active: true,
    }
}

fn specialist(id: &str, name: &str, email: Option<&str>, faculty_id: Option<&str>) -> Specialist {
    let now = Utc::now();
    Specialist {
        id: id.to_string(),
        full_name: name.to_string(),
        email: email.map(str::to_string),
        phone: None,
        title: None,
        faculty_id: faculty_id.map(str::to_string),
        faculty_name: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

fn term(id: &str, start: i32, is_current: bool) -> CourseTerm {
    CourseTerm {
        id: id.to_string(),
        name: format!("Cohort {}", start),
        start_year: Some(start),
        end_year: Some(start + 4),
        is_current,
        is_active: true,
    }
}

fn major(id: &str, name: &str) -> Major {
    Major {
        id: id.to_string(),
        name: name.to_string(),
        faculty_id: "CNTT".to_string(),
        faculty_name: None,
        is_active: true,
        student_count: 0,
    }
}

fn class(id: &str, major_id: &str, term_id: &str) -> Class {
    Class {
        id: id.to_string(),
        name: format!("Class {}", id),
        major_id: major_id.to_string(),
        course_term_id: term_id.to_string(),
        is_active: true,
    }
}

// ===== Boards =====

#[tokio::test]
async fn test_board_lifecycle() {
    let (services, _stores) = create_services();

    print_test_header(
        "test_board_lifecycle",
        &[
            "Create resolves the faculty name; duplicate id and name conflict.",
            "Patch changes only the given fields; delete hides the board from listings.",
        ],
    );

    let created = services
        .boards
        .create(board("B01", "Media Board", BoardKind::Union, Some("CNTT")))
        .await
        .expect("create board");
    assert_eq!(created.faculty_name.as_deref(), Some("Information Technology"));

    let err = services
        .boards
        .create(board("B01", "Other", BoardKind::Union, None))
        .await
        .expect_err("duplicate id");
    assert!(matches!(err, CampusError::Conflict { .. }));

    let err = services
        .boards
        .create(board("B02", "Media Board", BoardKind::Association, None))
        .await
        .expect_err("duplicate name");
    assert!(matches!(err, CampusError::Conflict { .. }));

    let err = services
        .boards
        .create(board("B03", "Orphan", BoardKind::Union, Some("NOPE")))
        .await
        .expect_err("unknown faculty");
    assert_eq!(err, CampusError::not_found("faculty", "NOPE"));

    let updated = services
        .boards
        .update(
            "B01",
            BoardPatch {
                kind: Some(BoardKind::ClubOrTeam),
                description: Some("  photos and video ".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("patch board");
    assert_eq!(updated.name, "Media Board");
    assert_eq!(updated.kind, BoardKind::ClubOrTeam);
    assert_eq!(updated.description.as_deref(), Some("photos and video"));

    services.boards.delete("B01").await.expect("delete");
    assert!(services.boards.list_active().await.expect("list").is_empty());
    assert!(!services.boards.get("B01").await.expect("still readable").is_active);
}

#[tokio::test]
async fn test_board_filters_and_statistics() {
    let (services, _stores) = create_services();

    print_test_header(
        "test_board_filters_and_statistics",
        &["Kind and faculty filters and per-kind counts only consider active boards."],
    );

    for b in [
        board("B1", "Union Exec", BoardKind::Union, Some("CNTT")),
        board("B2", "Student Assoc", BoardKind::Association, Some("KT")),
        board("B3", "Football Club", BoardKind::ClubOrTeam, Some("CNTT")),
        board("B4", "Chess Club", BoardKind::ClubOrTeam, None),
    ] {
        services.boards.create(b).await.expect("create");
    }
    services.boards.delete("B4").await.expect("delete B4");

    let clubs = services
        .boards
        .list_by_kind(BoardKind::ClubOrTeam)
        .await
        .expect("by kind");
    assert_eq!(clubs.len(), 1);
    assert_eq!(clubs[0].id, "B3");

    let it: Vec<String> = services
        .boards
        .list_by_faculty("CNTT")
        .await
        .expect("by faculty")
        .into_iter()
        .map(|b| b.name)
        .collect();
    assert_eq!(it, vec!["Football Club", "Union Exec"]);

    let stats = services.boards.statistics().await.expect("stats");
    assert_eq!(stats.total, 3);
    assert_eq!(stats.by_kind.get(&BoardKind::ClubOrTeam), Some(&1));
    assert_eq!(stats.by_kind.get(&BoardKind::Union), Some(&1));
}

// ===== Positions =====

#[tokio::test]
async fn test_positions_by_unit_follow_display_order() {
    let (services, _stores) = create_services();

    print_test_header(
        "test_positions_by_unit_follow_display_order",
        &["Positions of a unit are listed by display order; unit match ignores case."],
    );

    for (id, name, order) in [("P2", "Deputy Secretary", 2), ("P1", "Secretary", 1)] {
        services
            .positions
            .create(Position {
                id: id.to_string(),
                name: name.to_string(),
                unit: Some("DOAN".to_string()),
                description: None,
                display_order: Some(order),
                is_active: true,
            })
            .await
            .expect("create position");
    }

    let names: Vec<String> = services
        .positions
        .list_by_unit("doan")
        .await
        .expect("by unit")
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Secretary", "Deputy Secretary"]);

    let err = services
        .positions
        .update(
            "P2",
            PositionPatch {
                name: Some("Secretary".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect_err("name taken");
    assert!(matches!(err, CampusError::Conflict { .. }));

    let stats = services.positions.statistics().await.expect("stats");
    assert_eq!(stats.total, 2);
    assert_eq!(stats.by_unit.get("DOAN"), Some(&2));
}

// ===== Specialists =====

#[tokio::test]
async fn test_specialist_email_uniqueness_and_search() {
    let (services, _stores) = create_services();

    print_test_header(
        "test_specialist_email_uniqueness_and_search",
        &[
            "Specialist emails are normalized and unique regardless of case.",
            "Search matches id, name or email among active specialists.",
        ],
    );

    let first = services
        .specialists
        .create(specialist("CV01", "Ngo Thanh Tam", Some(" Tam@Vnkgu.edu.vn "), Some("CNTT")))
        .await
        .expect("create CV01");
    assert_eq!(first.email.as_deref(), Some("tam@vnkgu.edu.vn"));
    assert_eq!(first.faculty_name.as_deref(), Some("Information Technology"));

    let err = services
        .specialists
        .create(specialist("CV02", "Other", Some("TAM@vnkgu.edu.vn"), None))
        .await
        .expect_err("email taken");
    assert!(matches!(err, CampusError::Conflict { .. }));

    services
        .specialists
        .create(specialist("CV02", "Dang Van Long", None, Some("KT")))
        .await
        .expect("create CV02");

    let hits = services.specialists.search("tam@").await.expect("search");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "CV01");

    // Keeping one's own email is not a conflict
    services
        .specialists
        .update(
            "CV01",
            SpecialistPatch {
                email: Some("tam@vnkgu.edu.vn".to_string()),
                title: Some("Officer".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("update own email");

    services.specialists.delete("CV02").await.expect("delete");
    assert_eq!(services.specialists.count_active().await.expect("count"), 1);

    let stats = services.specialists.statistics().await.expect("stats");
    assert_eq!((stats.total, stats.active, stats.inactive), (2, 1, 1));
    assert_eq!(stats.by_faculty.get("Information Technology"), Some(&1));
    assert_eq!(stats.by_faculty.get("Economics"), None);
}

// ===== Lecturers =====

#[tokio::test]
async fn test_lecturer_soft_delete_and_restore() {
    let (services, _stores) = create_services();

    print_test_header(
        "test_lecturer_soft_delete_and_restore",
        &["Deleting flags the lecturer inactive; restore brings it back; counts follow."],
    );

    services
        .lecturers
        .create(lecturer("GV01", "Tran Quoc Bao", "gv_bao@vnkgu.edu.vn"))
        .await
        .expect("create GV01");
    services
        .lecturers
        .create(lecturer("GV02", "Ly Thi Mai", "gv_mai@vnkgu.edu.vn"))
        .await
        .expect("create GV02");

    services.lecturers.delete("GV01").await.expect("delete");
    let counts = services.lecturers.count_by_status().await.expect("count");
    assert_eq!((counts.active, counts.inactive, counts.total()), (1, 1, 2));
    assert_eq!(services.lecturers.list_inactive().await.expect("inactive")[0].id, "GV01");

    let restored = services.lecturers.restore("GV01").await.expect("restore");
    assert!(restored.is_active);

    assert!(services
        .lecturers
        .is_email_taken("GV_MAI@vnkgu.edu.vn", None)
        .await
        .expect("taken"));
    assert!(!services
        .lecturers
        .is_email_taken("gv_mai@vnkgu.edu.vn", Some("GV02"))
        .await
        .expect("own email"));

    let err = services
        .lecturers
        .update("GV01", lecturer("ignored", "Tran Quoc Bao", "gv_mai@vnkgu.edu.vn"))
        .await
        .expect_err("email held by GV02");
    assert!(matches!(err, CampusError::Conflict { .. }));
}

#[tokio::test]
async fn test_lecturer_email_domain_enforced_when_configured() {
    let stores = TestStores::new();
    stores.seed_faculty("CNTT", "Information Technology");
    let config = Config {
        enforce_email_domain: true,
        ..Config::default()
    };
    let services = stores.services_with_config(&config, Arc::new(NoOpEventPublisher));

    print_test_header(
        "test_lecturer_email_domain_enforced_when_configured",
        &["With domain enforcement on, outside addresses are InvalidInput."],
    );

    let err = services
        .lecturers
        .create(lecturer("GV09", "Outside", "someone@gmail.com"))
        .await
        .expect_err("outside domain");
    assert!(matches!(err, CampusError::InvalidInput { .. }));
    assert_eq!(stores.lecturers.count(), 0);

    services
        .lecturers
        .create(lecturer("GV09", "Inside", "gv_inside@vnkgu.edu.vn"))
        .await
        .expect("institution address");
}

// ===== Course terms, classes, majors =====

#[tokio::test]
async fn test_course_terms_current_and_hard_delete() {
    let (services, stores) = create_services();

    print_test_header(
        "test_course_terms_current_and_hard_delete",
        &[
            "The current term is the active current term with the latest start year.",
            "Year ranges must increase; deleting removes the row.",
        ],
    );

    services.course_terms.create(term("K2021", 2021, true)).await.expect("K2021");
    services.course_terms.create(term("K2023", 2023, true)).await.expect("K2023");
    services.course_terms.create(term("K2024", 2024, false)).await.expect("K2024");

    let current = services.course_terms.current().await.expect("current");
    assert_eq!(current.map(|t| t.id).as_deref(), Some("K2023"));

    let mut bad = term("K2030", 2030, false);
    bad.end_year = Some(2029);
    let err = services.course_terms.create(bad).await.expect_err("bad range");
    assert!(matches!(err, CampusError::InvalidInput { .. }));

    services.course_terms.delete("K2024").await.expect("delete");
    assert!(stores.course_terms.get("K2024").is_none());
    let err = services.course_terms.delete("K2024").await.expect_err("gone");
    assert!(matches!(err, CampusError::NotFound { .. }));
}

#[tokio::test]
async fn test_class_references_restore_and_purge() {
    let (services, stores) = create_services();

    print_test_header(
        "test_class_references_restore_and_purge",
        &[
            "A class must reference an existing major and course term.",
            "Soft delete and restore flip the flag; purge removes the row.",
        ],
    );

    services.majors.create(major("7480201", "Software Engineering")).await.expect("major");
    services.course_terms.create(term("K2022", 2022, true)).await.expect("term");

    let err = services
        .classes
        .create(class("L01", "0000000", "K2022"))
        .await
        .expect_err("unknown major");
    assert_eq!(err, CampusError::not_found("major", "0000000"));

    services
        .classes
        .create(class("L01", "7480201", "K2022"))
        .await
        .expect("class");
    stores.directory.add_member_in_class("S001", "Nguyen Van An", "L01", true);
    stores.directory.add_member_in_class("S002", "Tran Thi Binh", "L01", false);
    assert_eq!(services.classes.count_students("L01").await.expect("students"), 1);

    services.classes.delete("L01").await.expect("soft delete");
    assert_eq!(services.classes.list_deleted().await.expect("deleted").len(), 1);
    let counts = services.classes.count_by_status().await.expect("counts");
    assert_eq!((counts.active, counts.inactive), (0, 1));

    services.classes.restore("L01").await.expect("restore");
    assert_eq!(services.classes.list_active().await.expect("active").len(), 1);

    services.classes.hard_delete("L01").await.expect("purge");
    assert_eq!(stores.classes.count(), 0);
}

#[tokio::test]
async fn test_referenced_major_and_term_are_not_purged() {
    let (services, stores) = create_services();

    print_test_header(
        "test_referenced_major_and_term_are_not_purged",
        &[
            "Purging a major or deleting a course term that a class uses is a Conflict.",
            "The class keeps working; once it is purged both deletes go through.",
        ],
    );

    services.majors.create(major("N1", "Networking")).await.expect("major");
    services.course_terms.create(term("K1", 2021, false)).await.expect("term");
    services.classes.create(class("L1", "N1", "K1")).await.expect("class");
    services.classes.delete("L1").await.expect("soft delete class");

    let err = services.majors.hard_delete("N1").await.expect_err("major in use");
    assert!(matches!(err, CampusError::Conflict { .. }));
    let err = services.course_terms.delete("K1").await.expect_err("term in use");
    assert!(matches!(err, CampusError::Conflict { .. }));
    assert!(stores.majors.get("N1").is_some());
    assert!(stores.course_terms.get("K1").is_some());

    let mut renamed = class("L1", "N1", "K1");
    renamed.name = "Networking 1".to_string();
    let updated = services.classes.update("L1", renamed).await.expect("update class");
    assert_eq!(updated.major_id, "N1");

    services.classes.hard_delete("L1").await.expect("purge class");
    services.majors.hard_delete("N1").await.expect("purge major");
    services.course_terms.delete("K1").await.expect("delete term");
    assert_eq!(stores.majors.count(), 0);
}

#[tokio::test]
async fn test_major_student_counts() {
    let (services, stores) = create_services();

    print_test_header(
        "test_major_student_counts",
        &["Majors report active students of their classes and class counts."],
    );

    services.majors.create(major("7480201", "Software Engineering")).await.expect("major");
    services.course_terms.create(term("K2022", 2022, true)).await.expect("term");
    services.classes.create(class("L01", "7480201", "K2022")).await.expect("L01");
    services.classes.create(class("L02", "7480201", "K2022")).await.expect("L02");
    services.classes.delete("L02").await.expect("deactivate L02");

    stores.directory.add_member_in_class("S001", "A", "L01", true);
    stores.directory.add_member_in_class("S002", "B", "L02", true);
    stores.directory.add_member_in_class("S003", "C", "L02", false);

    let fetched = services.majors.get("7480201").await.expect("get");
    assert_eq!(fetched.student_count, 2);
    assert_eq!(fetched.faculty_name.as_deref(), Some("Information Technology"));

    let stats = services.majors.statistics("7480201").await.expect("stats");
    assert_eq!(stats.active_students, 2);
    assert_eq!(stats.total_students, 3);
    assert_eq!(stats.active_classes, 1);

    assert_eq!(services.majors.list_by_faculty("CNTT").await.expect("by faculty").len(), 1);
    assert!(services.majors.list_by_faculty("KT").await.expect("none").is_empty());
}

#[tokio::test]
async fn test_blank_fields_are_invalid_input() {
    let (services, _stores) = create_services();

    print_test_header(
        "test_blank_fields_are_invalid_input",
        &["Blank ids and names are rejected before any storage access."],
    );

    let err = services
        .majors
        .create(major("  ", "Nameless"))
        .await
        .expect_err("blank id");
    assert!(matches!(err, CampusError::InvalidInput { .. }));

    let err = services
        .lecturers
        .create(lecturer("GV10", "   ", "gv_x@vnkgu.edu.vn"))
        .await
        .expect_err("blank name");
    assert!(matches!(err, CampusError::InvalidInput { .. }));
}
