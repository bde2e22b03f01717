//! Enrollment registry integration tests over in-memory repositories

mod common;

use campus_admin::contract::CampusError;
use campus_admin::domain::{ChangeKind, EnrollmentRegistry, NoOpEventPublisher};
use common::{print_test_header, FailingEventPublisher, RecordingEventPublisher, TestStores};
use std::sync::Arc;

fn create_registry(stores: &TestStores) -> EnrollmentRegistry {
    EnrollmentRegistry::new(
        Arc::new(stores.directory.clone()),
        Arc::new(stores.enrollments.clone()),
        Arc::new(NoOpEventPublisher),
    )
}

fn create_registry_with_events(stores: &TestStores) -> (EnrollmentRegistry, RecordingEventPublisher) {
    let publisher = RecordingEventPublisher::new();
    let registry = EnrollmentRegistry::new(
        Arc::new(stores.directory.clone()),
        Arc::new(stores.enrollments.clone()),
        Arc::new(publisher.clone()),
    );
    (registry, publisher)
}

#[tokio::test]
async fn test_register_creates_active_enrollment() {
    let stores = TestStores::new();
    stores.seed_registration();
    let (registry, events) = create_registry_with_events(&stores);

    print_test_header(
        "test_register_creates_active_enrollment",
        &["Registering S001 into LHP-A stores an active link for course MH-101."],
    );

    let enrollment = registry
        .register("S001", "LHP-A")
        .await
        .expect("register S001 into LHP-A");
    stores.enrollments.print_state("After register");

    assert_eq!(enrollment.member_id(), "S001");
    assert_eq!(enrollment.section_id(), "LHP-A");
    assert_eq!(enrollment.course_id, "MH-101");
    assert!(enrollment.is_active);
    assert!(stores.enrollments.is_active("S001", "LHP-A"));

    let published = events.events();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].kind, ChangeKind::EnrollmentChanged);
    assert_eq!(published[0].section_or_activity_id, "LHP-A");
}

#[tokio::test]
async fn test_register_second_section_of_same_course_conflicts() {
    let stores = TestStores::new();
    stores.seed_registration();
    let registry = create_registry(&stores);

    print_test_header(
        "test_register_second_section_of_same_course_conflicts",
        &[
            "A member may hold one active section per course.",
            "Registering S001 into LHP-B while active in LHP-A must fail and name LHP-A.",
        ],
    );

    registry.register("S001", "LHP-A").await.expect("first registration");

    let err = registry
        .register("S001", "LHP-B")
        .await
        .expect_err("second section of MH-101");
    match err {
        CampusError::Conflict { reason } => assert!(reason.contains("LHP-A"), "reason: {}", reason),
        other => panic!("expected Conflict, got {:?}", other),
    }
    assert!(!stores.enrollments.is_active("S001", "LHP-B"));
    assert_eq!(stores.enrollments.count_active(), 1);
}

#[tokio::test]
async fn test_register_other_course_is_allowed() {
    let stores = TestStores::new();
    stores.seed_registration();
    let registry = create_registry(&stores);

    print_test_header(
        "test_register_other_course_is_allowed",
        &["The one-section rule is per course; LHP-C belongs to MH-202."],
    );

    registry.register("S001", "LHP-A").await.expect("MH-101");
    registry.register("S001", "LHP-C").await.expect("MH-202");

    let items = registry.list_by_member("S001").await.expect("list");
    let sections: Vec<&str> = items.iter().map(|e| e.section_id()).collect();
    assert_eq!(sections, vec!["LHP-A", "LHP-C"]);
}

#[tokio::test]
async fn test_register_unknown_member_or_section() {
    let stores = TestStores::new();
    stores.seed_registration();
    let registry = create_registry(&stores);

    print_test_header(
        "test_register_unknown_member_or_section",
        &["Unknown member and unknown section are both NotFound and write nothing."],
    );

    let err = registry.register("S999", "LHP-A").await.expect_err("unknown member");
    assert_eq!(err, CampusError::not_found("member", "S999"));

    let err = registry.register("S001", "LHP-X").await.expect_err("unknown section");
    assert_eq!(err, CampusError::not_found("section", "LHP-X"));

    assert_eq!(stores.enrollments.count(), 0);
}

#[tokio::test]
async fn test_reregister_after_unenroll_reactivates_row() {
    let stores = TestStores::new();
    stores.seed_registration();
    let registry = create_registry(&stores);

    print_test_header(
        "test_reregister_after_unenroll_reactivates_row",
        &[
            "Unenrolling flags the link inactive.",
            "Registering again reactivates the same row and keeps the first enrollment time.",
        ],
    );

    let first = registry.register("S001", "LHP-A").await.expect("register");
    registry.unenroll("S001", "LHP-A").await.expect("unenroll");
    assert!(!stores.enrollments.is_active("S001", "LHP-A"));

    // Freed course slot can be taken by another section
    registry.register("S001", "LHP-B").await.expect("LHP-B after unenroll");
    registry.unenroll("S001", "LHP-B").await.expect("unenroll LHP-B");

    let again = registry.register("S001", "LHP-A").await.expect("re-register");
    stores.enrollments.print_state("After re-register");

    assert!(again.is_active);
    assert_eq!(again.enrolled_at, first.enrolled_at);
    assert_eq!(stores.enrollments.count(), 2);
}

#[tokio::test]
async fn test_unenroll_without_active_link_is_not_found() {
    let stores = TestStores::new();
    stores.seed_registration();
    let registry = create_registry(&stores);

    print_test_header(
        "test_unenroll_without_active_link_is_not_found",
        &["Unenrolling twice fails the second time."],
    );

    registry.register("S002", "LHP-A").await.expect("register");
    registry.unenroll("S002", "LHP-A").await.expect("first unenroll");

    let err = registry.unenroll("S002", "LHP-A").await.expect_err("second unenroll");
    assert!(matches!(err, CampusError::NotFound { .. }));
}

#[tokio::test]
async fn test_transfer_within_course() {
    let stores = TestStores::new();
    stores.seed_registration();
    let (registry, events) = create_registry_with_events(&stores);

    print_test_header(
        "test_transfer_within_course",
        &[
            "S001 active in LHP-A (MH-101) transfers to LHP-B (MH-101).",
            "Afterwards the member's only active enrollment is LHP-B.",
        ],
    );

    registry.register("S001", "LHP-A").await.expect("register");
    stores.enrollments.print_state("Before transfer");

    let moved = registry
        .transfer("S001", "LHP-A", "LHP-B")
        .await
        .expect("transfer");
    stores.enrollments.print_state("After transfer");

    assert_eq!(moved.section_id(), "LHP-B");
    assert!(moved.is_active);

    let active: Vec<String> = registry
        .list_by_member("S001")
        .await
        .expect("list")
        .into_iter()
        .filter(|e| e.is_active)
        .map(|e| e.key.section_id)
        .collect();
    assert_eq!(active, vec!["LHP-B".to_string()]);

    let last = events.events().pop().expect("transfer event");
    assert_eq!(last.section_or_activity_id, "LHP-B");
}

#[tokio::test]
async fn test_transfer_across_courses_is_rejected() {
    let stores = TestStores::new();
    stores.seed_registration();
    let registry = create_registry(&stores);

    print_test_header(
        "test_transfer_across_courses_is_rejected",
        &["LHP-A (MH-101) and LHP-C (MH-202) belong to different courses."],
    );

    registry.register("S001", "LHP-A").await.expect("register");

    let err = registry
        .transfer("S001", "LHP-A", "LHP-C")
        .await
        .expect_err("cross-course transfer");
    assert!(matches!(err, CampusError::InvalidOperation { .. }));
    assert!(stores.enrollments.is_active("S001", "LHP-A"));
    assert!(!stores.enrollments.is_active("S001", "LHP-C"));
}

#[tokio::test]
async fn test_transfer_requires_active_source() {
    let stores = TestStores::new();
    stores.seed_registration();
    let registry = create_registry(&stores);

    print_test_header(
        "test_transfer_requires_active_source",
        &["Transferring from a section the member is not in is NotFound."],
    );

    let err = registry
        .transfer("S001", "LHP-A", "LHP-B")
        .await
        .expect_err("no source enrollment");
    assert!(matches!(err, CampusError::NotFound { .. }));
    assert_eq!(stores.enrollments.count(), 0);
}

#[tokio::test]
async fn test_transfer_into_current_section_conflicts() {
    let stores = TestStores::new();
    stores.seed_registration();
    let (registry, events) = create_registry_with_events(&stores);

    print_test_header(
        "test_transfer_into_current_section_conflicts",
        &[
            "S001 is active in LHP-A; transferring LHP-A -> LHP-A is a Conflict.",
            "The LHP-A enrollment stays active and no event is emitted.",
        ],
    );

    registry.register("S001", "LHP-A").await.expect("register");
    let before = events.events().len();

    let err = registry
        .transfer("S001", "LHP-A", "LHP-A")
        .await
        .expect_err("already in target");
    stores.enrollments.print_state("After rejected transfer");

    assert!(matches!(err, CampusError::Conflict { .. }));
    assert!(stores.enrollments.is_active("S001", "LHP-A"));
    assert_eq!(stores.enrollments.count(), 1);
    assert_eq!(events.events().len(), before);
}

#[tokio::test]
async fn test_transfer_unknown_section_is_not_found() {
    let stores = TestStores::new();
    stores.seed_registration();
    let registry = create_registry(&stores);

    print_test_header(
        "test_transfer_unknown_section_is_not_found",
        &["Course comparison needs both sections to exist."],
    );

    registry.register("S001", "LHP-A").await.expect("register");
    let err = registry
        .transfer("S001", "LHP-A", "LHP-Z")
        .await
        .expect_err("unknown target");
    assert_eq!(err, CampusError::not_found("section", "LHP-Z"));
}

#[tokio::test]
async fn test_transfer_storage_failure_leaves_source_active() {
    let stores = TestStores::new();
    stores.seed_registration();
    let registry = create_registry(&stores);

    print_test_header(
        "test_transfer_storage_failure_leaves_source_active",
        &[
            "A transfer is one atomic unit.",
            "When storage fails the source stays active and no target row appears.",
        ],
    );

    registry.register("S001", "LHP-A").await.expect("register");
    stores.enrollments.fail_transfers();

    let err = registry
        .transfer("S001", "LHP-A", "LHP-B")
        .await
        .expect_err("storage failure");
    stores.enrollments.print_state("After failed transfer");

    assert_eq!(err, CampusError::Internal);
    assert!(stores.enrollments.is_active("S001", "LHP-A"));
    assert!(!stores.enrollments.is_active("S001", "LHP-B"));
    assert_eq!(stores.enrollments.count(), 1);
}

#[tokio::test]
async fn test_list_by_section_orders_by_member_name() {
    let stores = TestStores::new();
    stores.seed_registration();
    let registry = create_registry(&stores);

    print_test_header(
        "test_list_by_section_orders_by_member_name",
        &["Section listings are ordered by member display name."],
    );

    for member in ["S001", "S002", "S003"] {
        registry.register(member, "LHP-A").await.expect("register");
    }

    let members: Vec<String> = registry
        .list_by_section("LHP-A")
        .await
        .expect("list")
        .into_iter()
        .map(|e| e.key.member_id)
        .collect();
    // Le Van Cuong, Nguyen Van An, Tran Thi Binh
    assert_eq!(members, vec!["S003", "S001", "S002"]);
}

#[tokio::test]
async fn test_eligible_members_exclude_enrolled_and_inactive() {
    let stores = TestStores::new();
    stores.seed_registration();
    stores.directory.add_inactive_member("S004", "Vo Thi Dao");
    let registry = create_registry(&stores);

    print_test_header(
        "test_eligible_members_exclude_enrolled_and_inactive",
        &[
            "Eligible members are active and hold no active section of the course.",
            "An enrollment in a sibling section of the same course also excludes the member.",
        ],
    );

    registry.register("S001", "LHP-B").await.expect("S001 in LHP-B");
    registry.register("S002", "LHP-C").await.expect("S002 in other course");

    let eligible: Vec<String> = registry
        .list_eligible_members("LHP-A")
        .await
        .expect("eligible")
        .into_iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(eligible, vec!["S003".to_string(), "S002".to_string()]);

    let err = registry
        .list_eligible_members("LHP-X")
        .await
        .expect_err("unknown section");
    assert!(matches!(err, CampusError::NotFound { .. }));
}

#[tokio::test]
async fn test_publisher_failure_does_not_fail_write() {
    let stores = TestStores::new();
    stores.seed_registration();
    let registry = EnrollmentRegistry::new(
        Arc::new(stores.directory.clone()),
        Arc::new(stores.enrollments.clone()),
        Arc::new(FailingEventPublisher),
    );

    print_test_header(
        "test_publisher_failure_does_not_fail_write",
        &["Event delivery is best effort; the registration still succeeds."],
    );

    registry.register("S001", "LHP-A").await.expect("register despite publisher");
    assert!(stores.enrollments.is_active("S001", "LHP-A"));
}

#[tokio::test]
async fn test_concurrent_registrations_keep_one_section_per_course() {
    let stores = TestStores::new();
    stores.seed_registration();
    let registry = Arc::new(create_registry(&stores));

    print_test_header(
        "test_concurrent_registrations_keep_one_section_per_course",
        &["Racing registrations for the same member and course admit exactly one."],
    );

    let a = {
        let registry = registry.clone();
        tokio::spawn(async move { registry.register("S001", "LHP-A").await })
    };
    let b = {
        let registry = registry.clone();
        tokio::spawn(async move { registry.register("S001", "LHP-B").await })
    };

    let results = [a.await.expect("join a"), b.await.expect("join b")];
    let ok = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(CampusError::Conflict { .. })))
        .count();

    assert_eq!(ok, 1);
    assert_eq!(conflicts, 1);
    assert_eq!(stores.enrollments.count_active(), 1);
}
