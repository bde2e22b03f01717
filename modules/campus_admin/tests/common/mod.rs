//! Shared mocks and fixtures for campus admin integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use campus_admin::contract::{
    Activity, Assignment, Board, Class, CourseTerm, DutyMember, Enrollment, EnrollmentKey,
    Faculty, Lecturer, Major, Member, Position, Section, Specialist,
};
use campus_admin::domain::repository::{
    AssignmentRepository, BoardRepository, ClassRepository, CourseTermRepository, DutyDirectory,
    EnrollmentRepository, FacultyRepository, LecturerRepository, MajorRepository,
    MemberDirectory, PositionRepository, SpecialistRepository,
};
use campus_admin::domain::{ChangeEvent, EventPublisher};
use campus_admin::{CampusServices, Config, Repositories};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

/// Print a test banner with its purpose
pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n{}", "=".repeat(80));
    println!("🧪 TEST: {}", test_name);
    println!("📋 PURPOSE:");
    for line in purpose {
        println!("   {}", line);
    }
    println!("{}", "=".repeat(80));
}

// ===== Lookup directory =====

/// Members, sections, activities and duty members seeded by the test
#[derive(Clone, Default)]
pub struct MockDirectory {
    members: Arc<RwLock<HashMap<String, Member>>>,
    sections: Arc<RwLock<HashMap<String, Section>>>,
    activities: Arc<RwLock<HashMap<String, Activity>>>,
    duty_members: Arc<RwLock<HashMap<String, DutyMember>>>,
}

impl MockDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_member(&self, id: &str, full_name: &str) {
        self.put_member(id, full_name, None, true);
    }

    pub fn add_inactive_member(&self, id: &str, full_name: &str) {
        self.put_member(id, full_name, None, false);
    }

    pub fn add_member_in_class(&self, id: &str, full_name: &str, class_id: &str, is_active: bool) {
        self.put_member(id, full_name, Some(class_id), is_active);
    }

    fn put_member(&self, id: &str, full_name: &str, class_id: Option<&str>, is_active: bool) {
        self.members.write().insert(
            id.to_string(),
            Member {
                id: id.to_string(),
                full_name: full_name.to_string(),
                email: None,
                class_id: class_id.map(str::to_string),
                is_active,
            },
        );
    }

    pub fn add_section(&self, id: &str, course_id: &str) {
        self.sections.write().insert(
            id.to_string(),
            Section {
                id: id.to_string(),
                course_id: course_id.to_string(),
                course_name: format!("Course {}", course_id),
                group: None,
            },
        );
    }

    pub fn add_activity(&self, id: &str, name: &str) {
        self.activities.write().insert(
            id.to_string(),
            Activity {
                id: id.to_string(),
                name: name.to_string(),
                is_active: true,
            },
        );
    }

    pub fn add_duty_member(&self, id: &str, full_name: &str) {
        self.duty_members.write().insert(
            id.to_string(),
            DutyMember {
                id: id.to_string(),
                full_name: full_name.to_string(),
                is_active: true,
            },
        );
    }
}

#[async_trait]
impl MemberDirectory for MockDirectory {
    async fn find_member(&self, member_id: &str) -> anyhow::Result<Option<Member>> {
        Ok(self.members.read().get(member_id).cloned())
    }

    async fn list_members(&self) -> anyhow::Result<Vec<Member>> {
        Ok(self.members.read().values().cloned().collect())
    }

    async fn find_section(&self, section_id: &str) -> anyhow::Result<Option<Section>> {
        Ok(self.sections.read().get(section_id).cloned())
    }
}

#[async_trait]
impl DutyDirectory for MockDirectory {
    async fn find_activity(&self, activity_id: &str) -> anyhow::Result<Option<Activity>> {
        Ok(self.activities.read().get(activity_id).cloned())
    }

    async fn find_duty_member(&self, member_id: &str) -> anyhow::Result<Option<DutyMember>> {
        Ok(self.duty_members.read().get(member_id).cloned())
    }
}

// ===== Enrollment repository =====

#[derive(Clone, Default)]
pub struct MockEnrollmentRepo {
    data: Arc<RwLock<BTreeMap<EnrollmentKey, Enrollment>>>,
    fail_transfer: Arc<AtomicBool>,
}

impl MockEnrollmentRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next transfers fail before touching any row
    pub fn fail_transfers(&self) {
        self.fail_transfer.store(true, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.data.read().len()
    }

    pub fn count_active(&self) -> usize {
        self.data.read().values().filter(|e| e.is_active).count()
    }

    pub fn is_active(&self, member_id: &str, section_id: &str) -> bool {
        self.data
            .read()
            .get(&EnrollmentKey::new(member_id, section_id))
            .is_some_and(|e| e.is_active)
    }

    pub fn print_state(&self, label: &str) {
        println!("\n📊 Enrollments: {}", label);
        for e in self.data.read().values() {
            let marker = if e.is_active { "✅" } else { "❌" };
            println!("   {} {} (course {})", marker, e.key, e.course_id);
        }
    }

    fn activate_locked(data: &mut BTreeMap<EnrollmentKey, Enrollment>, enrollment: &Enrollment) -> Enrollment {
        let row = match data.get(&enrollment.key) {
            Some(previous) => Enrollment {
                enrolled_at: previous.enrolled_at,
                ..enrollment.clone()
            },
            None => enrollment.clone(),
        };
        data.insert(row.key.clone(), row.clone());
        row
    }

    fn deactivate_locked(data: &mut BTreeMap<EnrollmentKey, Enrollment>, key: &EnrollmentKey) -> bool {
        match data.get_mut(key) {
            Some(e) if e.is_active => {
                e.is_active = false;
                e.updated_at = chrono::Utc::now();
                true
            }
            _ => false,
        }
    }
}

#[async_trait]
impl EnrollmentRepository for MockEnrollmentRepo {
    async fn find(&self, key: &EnrollmentKey) -> anyhow::Result<Option<Enrollment>> {
        Ok(self.data.read().get(key).cloned())
    }

    async fn list_by_member(&self, member_id: &str) -> anyhow::Result<Vec<Enrollment>> {
        Ok(self
            .data
            .read()
            .values()
            .filter(|e| e.member_id() == member_id)
            .cloned()
            .collect())
    }

    async fn list_by_section(&self, section_id: &str) -> anyhow::Result<Vec<Enrollment>> {
        Ok(self
            .data
            .read()
            .values()
            .filter(|e| e.section_id() == section_id)
            .cloned()
            .collect())
    }

    async fn find_active_in_course(
        &self,
        member_id: &str,
        course_id: &str,
    ) -> anyhow::Result<Option<Enrollment>> {
        Ok(self
            .data
            .read()
            .values()
            .find(|e| e.is_active && e.member_id() == member_id && e.course_id == course_id)
            .cloned())
    }

    async fn active_member_ids_in_course(&self, course_id: &str) -> anyhow::Result<Vec<String>> {
        Ok(self
            .data
            .read()
            .values()
            .filter(|e| e.is_active && e.course_id == course_id)
            .map(|e| e.key.member_id.clone())
            .collect())
    }

    async fn activate(&self, enrollment: &Enrollment) -> anyhow::Result<Enrollment> {
        Ok(Self::activate_locked(&mut self.data.write(), enrollment))
    }

    async fn deactivate(&self, key: &EnrollmentKey) -> anyhow::Result<bool> {
        Ok(Self::deactivate_locked(&mut self.data.write(), key))
    }

    async fn transfer(&self, from: &EnrollmentKey, to: &Enrollment) -> anyhow::Result<Enrollment> {
        if self.fail_transfer.load(Ordering::SeqCst) {
            anyhow::bail!("simulated storage failure");
        }
        let mut data = self.data.write();
        if !Self::deactivate_locked(&mut data, from) {
            anyhow::bail!("enrollment {} is no longer active", from);
        }
        Ok(Self::activate_locked(&mut data, to))
    }
}

// ===== Assignment repository =====

#[derive(Clone)]
pub struct MockAssignmentRepo {
    data: Arc<RwLock<Vec<Assignment>>>,
    next_id: Arc<AtomicI64>,
}

impl MockAssignmentRepo {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    pub fn count(&self) -> usize {
        self.data.read().len()
    }

    pub fn count_active(&self) -> usize {
        self.data.read().iter().filter(|a| a.is_active).count()
    }

    pub fn print_state(&self, label: &str) {
        println!("\n📊 Assignments: {}", label);
        for a in self.data.read().iter() {
            let marker = if a.is_active { "✅" } else { "❌" };
            println!(
                "   {} #{} {} -> {} ({})",
                marker,
                a.id,
                a.member_id,
                a.activity_id,
                a.role.code()
            );
        }
    }
}

impl Default for MockAssignmentRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssignmentRepository for MockAssignmentRepo {
    async fn list_active_by_activity(&self, activity_id: &str) -> anyhow::Result<Vec<Assignment>> {
        Ok(self
            .data
            .read()
            .iter()
            .filter(|a| a.is_active && a.activity_id == activity_id)
            .cloned()
            .collect())
    }

    async fn list_active_by_member(&self, member_id: &str) -> anyhow::Result<Vec<Assignment>> {
        Ok(self
            .data
            .read()
            .iter()
            .filter(|a| a.is_active && a.member_id == member_id)
            .cloned()
            .collect())
    }

    async fn exists_active(&self, activity_id: &str, member_id: &str) -> anyhow::Result<bool> {
        Ok(self
            .data
            .read()
            .iter()
            .any(|a| a.is_active && a.activity_id == activity_id && a.member_id == member_id))
    }

    async fn insert_batch(&self, assignments: &[Assignment]) -> anyhow::Result<Vec<Assignment>> {
        let saved: Vec<Assignment> = assignments
            .iter()
            .map(|a| Assignment {
                id: self.next_id.fetch_add(1, Ordering::SeqCst),
                ..a.clone()
            })
            .collect();
        self.data.write().extend(saved.iter().cloned());
        Ok(saved)
    }

    async fn deactivate(&self, activity_id: &str, member_id: &str) -> anyhow::Result<bool> {
        let mut data = self.data.write();
        let mut changed = false;
        for a in data
            .iter_mut()
            .filter(|a| a.is_active && a.activity_id == activity_id && a.member_id == member_id)
        {
            a.is_active = false;
            changed = true;
        }
        Ok(changed)
    }
}

// ===== Organizational record tables =====

/// Records stored by string id
pub trait Keyed: Clone + Send + Sync + 'static {
    fn key(&self) -> &str;
}

macro_rules! keyed {
    ($($ty:ty),* $(,)?) => {
        $(impl Keyed for $ty {
            fn key(&self) -> &str {
                &self.id
            }
        })*
    };
}

keyed!(Faculty, Board, Position, Specialist, Lecturer, CourseTerm, Class, Major);

/// In-memory table keyed by record id
#[derive(Clone)]
pub struct MockTable<T> {
    data: Arc<RwLock<HashMap<String, T>>>,
}

impl<T: Keyed> MockTable<T> {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn insert(&self, record: T) {
        self.data.write().insert(record.key().to_string(), record);
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.data.read().get(id).cloned()
    }

    pub fn count(&self) -> usize {
        self.data.read().len()
    }

    fn all(&self) -> Vec<T> {
        self.data.read().values().cloned().collect()
    }

    fn find_where(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.data.read().values().find(|r| pred(r)).cloned()
    }

    fn save_record(&self, record: &T) -> T {
        self.insert(record.clone());
        record.clone()
    }

    fn remove(&self, id: &str) -> bool {
        self.data.write().remove(id).is_some()
    }
}

impl<T: Keyed> Default for MockTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn same_email(stored: Option<&str>, wanted: &str) -> bool {
    stored.is_some_and(|e| e.eq_ignore_ascii_case(wanted))
}

#[async_trait]
impl FacultyRepository for MockTable<Faculty> {
    async fn list(&self) -> anyhow::Result<Vec<Faculty>> {
        Ok(self.all())
    }
    async fn find(&self, id: &str) -> anyhow::Result<Option<Faculty>> {
        Ok(self.get(id))
    }
    async fn save(&self, faculty: &Faculty) -> anyhow::Result<Faculty> {
        Ok(self.save_record(faculty))
    }
}

#[async_trait]
impl BoardRepository for MockTable<Board> {
    async fn list(&self) -> anyhow::Result<Vec<Board>> {
        Ok(self.all())
    }
    async fn find(&self, id: &str) -> anyhow::Result<Option<Board>> {
        Ok(self.get(id))
    }
    async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<Board>> {
        Ok(self.find_where(|b| b.name == name))
    }
    async fn save(&self, board: &Board) -> anyhow::Result<Board> {
        Ok(self.save_record(board))
    }
}

#[async_trait]
impl PositionRepository for MockTable<Position> {
    async fn list(&self) -> anyhow::Result<Vec<Position>> {
        Ok(self.all())
    }
    async fn find(&self, id: &str) -> anyhow::Result<Option<Position>> {
        Ok(self.get(id))
    }
    async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<Position>> {
        Ok(self.find_where(|p| p.name == name))
    }
    async fn save(&self, position: &Position) -> anyhow::Result<Position> {
        Ok(self.save_record(position))
    }
}

#[async_trait]
impl SpecialistRepository for MockTable<Specialist> {
    async fn list(&self) -> anyhow::Result<Vec<Specialist>> {
        Ok(self.all())
    }
    async fn find(&self, id: &str) -> anyhow::Result<Option<Specialist>> {
        Ok(self.get(id))
    }
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Specialist>> {
        Ok(self.find_where(|s| same_email(s.email.as_deref(), email)))
    }
    async fn save(&self, specialist: &Specialist) -> anyhow::Result<Specialist> {
        Ok(self.save_record(specialist))
    }
}

#[async_trait]
impl LecturerRepository for MockTable<Lecturer> {
    async fn list(&self) -> anyhow::Result<Vec<Lecturer>> {
        Ok(self.all())
    }
    async fn find(&self, id: &str) -> anyhow::Result<Option<Lecturer>> {
        Ok(self.get(id))
    }
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Lecturer>> {
        Ok(self.find_where(|l| same_email(Some(&l.email), email)))
    }
    async fn save(&self, lecturer: &Lecturer) -> anyhow::Result<Lecturer> {
        Ok(self.save_record(lecturer))
    }
}

#[async_trait]
impl CourseTermRepository for MockTable<CourseTerm> {
    async fn list(&self) -> anyhow::Result<Vec<CourseTerm>> {
        Ok(self.all())
    }
    async fn find(&self, id: &str) -> anyhow::Result<Option<CourseTerm>> {
        Ok(self.get(id))
    }
    async fn save(&self, term: &CourseTerm) -> anyhow::Result<CourseTerm> {
        Ok(self.save_record(term))
    }
    async fn delete(&self, id: &str) -> anyhow::Result<bool> {
        Ok(self.remove(id))
    }
}

#[async_trait]
impl ClassRepository for MockTable<Class> {
    async fn list(&self) -> anyhow::Result<Vec<Class>> {
        Ok(self.all())
    }
    async fn find(&self, id: &str) -> anyhow::Result<Option<Class>> {
        Ok(self.get(id))
    }
    async fn save(&self, class: &Class) -> anyhow::Result<Class> {
        Ok(self.save_record(class))
    }
    async fn delete(&self, id: &str) -> anyhow::Result<bool> {
        Ok(self.remove(id))
    }
}

#[async_trait]
impl MajorRepository for MockTable<Major> {
    async fn list(&self) -> anyhow::Result<Vec<Major>> {
        Ok(self.all())
    }
    async fn find(&self, id: &str) -> anyhow::Result<Option<Major>> {
        Ok(self.get(id))
    }
    async fn save(&self, major: &Major) -> anyhow::Result<Major> {
        Ok(self.save_record(major))
    }
    async fn delete(&self, id: &str) -> anyhow::Result<bool> {
        Ok(self.remove(id))
    }
}

// ===== Event publishers =====

/// Keeps every published event for later inspection
#[derive(Clone, Default)]
pub struct RecordingEventPublisher {
    events: Arc<RwLock<Vec<ChangeEvent>>>,
}

impl RecordingEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ChangeEvent> {
        self.events.read().clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingEventPublisher {
    async fn publish(&self, event: ChangeEvent) -> anyhow::Result<()> {
        self.events.write().push(event);
        Ok(())
    }
}

/// Rejects every event
pub struct FailingEventPublisher;

#[async_trait]
impl EventPublisher for FailingEventPublisher {
    async fn publish(&self, _event: ChangeEvent) -> anyhow::Result<()> {
        anyhow::bail!("event bus unavailable")
    }
}

// ===== Fixtures =====

/// Every mock store, shared with the services built from it
#[derive(Clone, Default)]
pub struct TestStores {
    pub directory: MockDirectory,
    pub enrollments: MockEnrollmentRepo,
    pub assignments: MockAssignmentRepo,
    pub faculties: MockTable<Faculty>,
    pub boards: MockTable<Board>,
    pub positions: MockTable<Position>,
    pub specialists: MockTable<Specialist>,
    pub lecturers: MockTable<Lecturer>,
    pub course_terms: MockTable<CourseTerm>,
    pub classes: MockTable<Class>,
    pub majors: MockTable<Major>,
}

impl TestStores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repositories(&self) -> Repositories {
        Repositories {
            members: Arc::new(self.directory.clone()),
            duty: Arc::new(self.directory.clone()),
            enrollments: Arc::new(self.enrollments.clone()),
            assignments: Arc::new(self.assignments.clone()),
            faculties: Arc::new(self.faculties.clone()),
            boards: Arc::new(self.boards.clone()),
            positions: Arc::new(self.positions.clone()),
            specialists: Arc::new(self.specialists.clone()),
            lecturers: Arc::new(self.lecturers.clone()),
            course_terms: Arc::new(self.course_terms.clone()),
            classes: Arc::new(self.classes.clone()),
            majors: Arc::new(self.majors.clone()),
        }
    }

    pub fn services(&self, publisher: Arc<dyn EventPublisher>) -> CampusServices {
        self.services_with_config(&Config::default(), publisher)
    }

    pub fn services_with_config(
        &self,
        config: &Config,
        publisher: Arc<dyn EventPublisher>,
    ) -> CampusServices {
        CampusServices::new(self.repositories(), config, publisher)
            .expect("default email domain is valid")
    }

    /// Seed the registration scenario: S001/S002/S003 and sections of MH-101 and MH-202
    pub fn seed_registration(&self) {
        self.directory.add_member("S001", "Nguyen Van An");
        self.directory.add_member("S002", "Tran Thi Binh");
        self.directory.add_member("S003", "Le Van Cuong");
        self.directory.add_section("LHP-A", "MH-101");
        self.directory.add_section("LHP-B", "MH-101");
        self.directory.add_section("LHP-C", "MH-202");
    }

    /// Seed the duty scenario: activity HD01 and duty members BCH01/BCH02
    pub fn seed_duty(&self) {
        self.directory.add_activity("HD01", "Orientation day");
        self.directory.add_duty_member("BCH01", "Pham Minh Duc");
        self.directory.add_duty_member("BCH02", "Hoang Thu Ha");
    }

    pub fn seed_faculty(&self, id: &str, name: &str) {
        self.faculties.insert(Faculty {
            id: id.to_string(),
            name: name.to_string(),
            is_active: true,
        });
    }
}
