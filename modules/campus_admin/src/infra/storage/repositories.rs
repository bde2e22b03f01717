//! SeaORM repository implementations

use crate::contract::{
    Activity, Assignment, Board, Class, CourseTerm, DutyMember, Enrollment, EnrollmentKey,
    Faculty, Lecturer, Major, Member, Position, Section, Specialist,
};
use crate::domain::repository::{
    AssignmentRepository, BoardRepository, ClassRepository, CourseTermRepository,
    DutyDirectory, EnrollmentRepository, FacultyRepository, LecturerRepository, MajorRepository,
    MemberDirectory, PositionRepository, SpecialistRepository,
};
use anyhow::{bail, Result};
use async_trait::async_trait;
use sea_orm::{
    prelude::Expr, ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ConnectionTrait,
    DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};
use std::collections::HashMap;
use std::sync::Arc;

use super::entity;
use super::mapper::assignment_from_row;

/// Insert a new row or overwrite the existing one
async fn save_row<A, C>(
    conn: &C,
    active: A,
    exists: bool,
) -> Result<<A::Entity as EntityTrait>::Model>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    C: ConnectionTrait,
{
    let row = if exists {
        active.update(conn).await?
    } else {
        active.insert(conn).await?
    };
    Ok(row)
}

// ===== Lookup directory =====

/// Read access to members, sections, activities and duty members
pub struct SeaOrmDirectory {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmDirectory {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MemberDirectory for SeaOrmDirectory {
    async fn find_member(&self, member_id: &str) -> Result<Option<Member>> {
        let result = entity::member::Entity::find_by_id(member_id.to_string())
            .one(&*self.db)
            .await?;

        Ok(result.map(Into::into))
    }

    async fn list_members(&self) -> Result<Vec<Member>> {
        let results = entity::member::Entity::find()
            .order_by_asc(entity::member::Column::FullName)
            .order_by_asc(entity::member::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn find_section(&self, section_id: &str) -> Result<Option<Section>> {
        let result = entity::section::Entity::find_by_id(section_id.to_string())
            .find_also_related(entity::course::Entity)
            .one(&*self.db)
            .await?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl DutyDirectory for SeaOrmDirectory {
    async fn find_activity(&self, activity_id: &str) -> Result<Option<Activity>> {
        let result = entity::activity::Entity::find_by_id(activity_id.to_string())
            .one(&*self.db)
            .await?;

        Ok(result.map(Into::into))
    }

    async fn find_duty_member(&self, member_id: &str) -> Result<Option<DutyMember>> {
        let result = entity::duty_member::Entity::find_by_id(member_id.to_string())
            .one(&*self.db)
            .await?;

        Ok(result.map(Into::into))
    }
}

// ===== Enrollment Repository =====

pub struct SeaOrmEnrollmentRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmEnrollmentRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn enrollment_pk(key: &EnrollmentKey) -> (String, String) {
    (key.member_id.clone(), key.section_id.clone())
}

async fn activate_row<C: ConnectionTrait>(conn: &C, enrollment: &Enrollment) -> Result<Enrollment> {
    use entity::enrollment;

    let existing = enrollment::Entity::find_by_id(enrollment_pk(&enrollment.key))
        .one(conn)
        .await?;

    let mut active: enrollment::ActiveModel = enrollment.into();
    if let Some(previous) = &existing {
        // Reactivation keeps the first registration time
        active.enrolled_at = sea_orm::ActiveValue::Set(previous.enrolled_at);
    }
    let row = save_row(conn, active, existing.is_some()).await?;
    Ok(row.into())
}

async fn deactivate_row<C: ConnectionTrait>(conn: &C, key: &EnrollmentKey) -> Result<bool> {
    use entity::enrollment;

    let result = enrollment::Entity::update_many()
        .col_expr(enrollment::Column::IsActive, Expr::value(false))
        .col_expr(enrollment::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
        .filter(enrollment::Column::MemberId.eq(key.member_id.as_str()))
        .filter(enrollment::Column::SectionId.eq(key.section_id.as_str()))
        .filter(enrollment::Column::IsActive.eq(true))
        .exec(conn)
        .await?;

    Ok(result.rows_affected > 0)
}

#[async_trait]
impl EnrollmentRepository for SeaOrmEnrollmentRepository {
    async fn find(&self, key: &EnrollmentKey) -> Result<Option<Enrollment>> {
        let result = entity::enrollment::Entity::find_by_id(enrollment_pk(key))
            .one(&*self.db)
            .await?;

        Ok(result.map(Into::into))
    }

    async fn list_by_member(&self, member_id: &str) -> Result<Vec<Enrollment>> {
        let results = entity::enrollment::Entity::find()
            .filter(entity::enrollment::Column::MemberId.eq(member_id))
            .order_by_asc(entity::enrollment::Column::SectionId)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn list_by_section(&self, section_id: &str) -> Result<Vec<Enrollment>> {
        let results = entity::enrollment::Entity::find()
            .filter(entity::enrollment::Column::SectionId.eq(section_id))
            .order_by_asc(entity::enrollment::Column::MemberId)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn find_active_in_course(
        &self,
        member_id: &str,
        course_id: &str,
    ) -> Result<Option<Enrollment>> {
        let result = entity::enrollment::Entity::find()
            .filter(entity::enrollment::Column::MemberId.eq(member_id))
            .filter(entity::enrollment::Column::CourseId.eq(course_id))
            .filter(entity::enrollment::Column::IsActive.eq(true))
            .order_by_asc(entity::enrollment::Column::SectionId)
            .one(&*self.db)
            .await?;

        Ok(result.map(Into::into))
    }

    async fn active_member_ids_in_course(&self, course_id: &str) -> Result<Vec<String>> {
        let ids = entity::enrollment::Entity::find()
            .select_only()
            .column(entity::enrollment::Column::MemberId)
            .filter(entity::enrollment::Column::CourseId.eq(course_id))
            .filter(entity::enrollment::Column::IsActive.eq(true))
            .into_tuple::<String>()
            .all(&*self.db)
            .await?;

        Ok(ids)
    }

    async fn activate(&self, enrollment: &Enrollment) -> Result<Enrollment> {
        activate_row(&*self.db, enrollment).await
    }

    async fn deactivate(&self, key: &EnrollmentKey) -> Result<bool> {
        deactivate_row(&*self.db, key).await
    }

    async fn transfer(&self, from: &EnrollmentKey, to: &Enrollment) -> Result<Enrollment> {
        let txn = self.db.begin().await?;

        // Dropping `txn` on an early return rolls both steps back
        if !deactivate_row(&txn, from).await? {
            bail!("enrollment {} is no longer active", from);
        }
        let moved = activate_row(&txn, to).await?;

        txn.commit().await?;
        Ok(moved)
    }
}

// ===== Assignment Repository =====

pub struct SeaOrmAssignmentRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmAssignmentRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Attach activity and member display names to assignment rows
    async fn hydrate(&self, rows: Vec<entity::assignment::Model>) -> Result<Vec<Assignment>> {
        let activity_ids: Vec<String> = rows.iter().map(|r| r.activity_id.clone()).collect();
        let member_ids: Vec<String> = rows.iter().map(|r| r.member_id.clone()).collect();

        let activities: HashMap<String, String> = entity::activity::Entity::find()
            .filter(entity::activity::Column::Id.is_in(activity_ids))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|a| (a.id, a.name))
            .collect();
        let members: HashMap<String, String> = entity::duty_member::Entity::find()
            .filter(entity::duty_member::Column::Id.is_in(member_ids))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|m| (m.id, m.full_name))
            .collect();

        rows.into_iter()
            .map(|row| {
                let activity = activities.get(&row.activity_id).cloned();
                let member = members.get(&row.member_id).cloned();
                assignment_from_row(row, activity.as_deref(), member.as_deref())
            })
            .collect()
    }
}

#[async_trait]
impl AssignmentRepository for SeaOrmAssignmentRepository {
    async fn list_active_by_activity(&self, activity_id: &str) -> Result<Vec<Assignment>> {
        let rows = entity::assignment::Entity::find()
            .filter(entity::assignment::Column::ActivityId.eq(activity_id))
            .filter(entity::assignment::Column::IsActive.eq(true))
            .order_by_asc(entity::assignment::Column::Id)
            .all(&*self.db)
            .await?;

        self.hydrate(rows).await
    }

    async fn list_active_by_member(&self, member_id: &str) -> Result<Vec<Assignment>> {
        let rows = entity::assignment::Entity::find()
            .filter(entity::assignment::Column::MemberId.eq(member_id))
            .filter(entity::assignment::Column::IsActive.eq(true))
            .order_by_asc(entity::assignment::Column::ActivityId)
            .all(&*self.db)
            .await?;

        self.hydrate(rows).await
    }

    async fn exists_active(&self, activity_id: &str, member_id: &str) -> Result<bool> {
        let count = entity::assignment::Entity::find()
            .filter(entity::assignment::Column::ActivityId.eq(activity_id))
            .filter(entity::assignment::Column::MemberId.eq(member_id))
            .filter(entity::assignment::Column::IsActive.eq(true))
            .count(&*self.db)
            .await?;

        Ok(count > 0)
    }

    async fn insert_batch(&self, assignments: &[Assignment]) -> Result<Vec<Assignment>> {
        let txn = self.db.begin().await?;

        let mut rows = Vec::with_capacity(assignments.len());
        for assignment in assignments {
            let active: entity::assignment::ActiveModel = assignment.into();
            rows.push(active.insert(&txn).await?);
        }

        txn.commit().await?;

        // Names are already known to the caller; keep them instead of re-reading
        rows.into_iter()
            .zip(assignments)
            .map(|(row, source)| {
                assignment_from_row(
                    row,
                    Some(source.activity_name.as_str()),
                    Some(source.member_name.as_str()),
                )
            })
            .collect()
    }

    async fn deactivate(&self, activity_id: &str, member_id: &str) -> Result<bool> {
        let result = entity::assignment::Entity::update_many()
            .col_expr(entity::assignment::Column::IsActive, Expr::value(false))
            .filter(entity::assignment::Column::ActivityId.eq(activity_id))
            .filter(entity::assignment::Column::MemberId.eq(member_id))
            .filter(entity::assignment::Column::IsActive.eq(true))
            .exec(&*self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

// ===== Organizational record repositories =====

pub struct SeaOrmFacultyRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmFacultyRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FacultyRepository for SeaOrmFacultyRepository {
    async fn list(&self) -> Result<Vec<Faculty>> {
        let results = entity::faculty::Entity::find()
            .order_by_asc(entity::faculty::Column::Name)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn find(&self, id: &str) -> Result<Option<Faculty>> {
        let result = entity::faculty::Entity::find_by_id(id.to_string())
            .one(&*self.db)
            .await?;

        Ok(result.map(Into::into))
    }

    async fn save(&self, faculty: &Faculty) -> Result<Faculty> {
        let exists = self.find(&faculty.id).await?.is_some();
        let row = save_row(&*self.db, entity::faculty::ActiveModel::from(faculty), exists).await?;
        Ok(row.into())
    }
}

pub struct SeaOrmBoardRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmBoardRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BoardRepository for SeaOrmBoardRepository {
    async fn list(&self) -> Result<Vec<Board>> {
        entity::board::Entity::find()
            .order_by_asc(entity::board::Column::Name)
            .all(&*self.db)
            .await?
            .into_iter()
            .map(Board::try_from)
            .collect()
    }

    async fn find(&self, id: &str) -> Result<Option<Board>> {
        let result = entity::board::Entity::find_by_id(id.to_string())
            .one(&*self.db)
            .await?;

        result.map(Board::try_from).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Board>> {
        let result = entity::board::Entity::find()
            .filter(entity::board::Column::Name.eq(name))
            .one(&*self.db)
            .await?;

        result.map(Board::try_from).transpose()
    }

    async fn save(&self, board: &Board) -> Result<Board> {
        let exists = entity::board::Entity::find_by_id(board.id.clone())
            .count(&*self.db)
            .await?
            > 0;
        let row = save_row(&*self.db, entity::board::ActiveModel::from(board), exists).await?;
        row.try_into()
    }
}

pub struct SeaOrmPositionRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmPositionRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PositionRepository for SeaOrmPositionRepository {
    async fn list(&self) -> Result<Vec<Position>> {
        let results = entity::position::Entity::find()
            .order_by_asc(entity::position::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn find(&self, id: &str) -> Result<Option<Position>> {
        let result = entity::position::Entity::find_by_id(id.to_string())
            .one(&*self.db)
            .await?;

        Ok(result.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Position>> {
        let result = entity::position::Entity::find()
            .filter(entity::position::Column::Name.eq(name))
            .one(&*self.db)
            .await?;

        Ok(result.map(Into::into))
    }

    async fn save(&self, position: &Position) -> Result<Position> {
        let exists = self.find(&position.id).await?.is_some();
        let row = save_row(&*self.db, entity::position::ActiveModel::from(position), exists).await?;
        Ok(row.into())
    }
}

pub struct SeaOrmSpecialistRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmSpecialistRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SpecialistRepository for SeaOrmSpecialistRepository {
    async fn list(&self) -> Result<Vec<Specialist>> {
        let results = entity::specialist::Entity::find()
            .order_by_asc(entity::specialist::Column::FullName)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn find(&self, id: &str) -> Result<Option<Specialist>> {
        let result = entity::specialist::Entity::find_by_id(id.to_string())
            .one(&*self.db)
            .await?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Specialist>> {
        let result = entity::specialist::Entity::find()
            .filter(entity::specialist::Column::Email.eq(email.to_lowercase()))
            .one(&*self.db)
            .await?;

        Ok(result.map(Into::into))
    }

    async fn save(&self, specialist: &Specialist) -> Result<Specialist> {
        let exists = self.find(&specialist.id).await?.is_some();
        let row =
            save_row(&*self.db, entity::specialist::ActiveModel::from(specialist), exists).await?;
        Ok(row.into())
    }
}

pub struct SeaOrmLecturerRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmLecturerRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LecturerRepository for SeaOrmLecturerRepository {
    async fn list(&self) -> Result<Vec<Lecturer>> {
        let results = entity::lecturer::Entity::find()
            .order_by_asc(entity::lecturer::Column::FullName)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn find(&self, id: &str) -> Result<Option<Lecturer>> {
        let result = entity::lecturer::Entity::find_by_id(id.to_string())
            .one(&*self.db)
            .await?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Lecturer>> {
        let result = entity::lecturer::Entity::find()
            .filter(entity::lecturer::Column::Email.eq(email.to_lowercase()))
            .one(&*self.db)
            .await?;

        Ok(result.map(Into::into))
    }

    async fn save(&self, lecturer: &Lecturer) -> Result<Lecturer> {
        let exists = self.find(&lecturer.id).await?.is_some();
        let row = save_row(&*self.db, entity::lecturer::ActiveModel::from(lecturer), exists).await?;
        Ok(row.into())
    }
}

pub struct SeaOrmCourseTermRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCourseTermRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseTermRepository for SeaOrmCourseTermRepository {
    async fn list(&self) -> Result<Vec<CourseTerm>> {
        let results = entity::course_term::Entity::find()
            .order_by_asc(entity::course_term::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn find(&self, id: &str) -> Result<Option<CourseTerm>> {
        let result = entity::course_term::Entity::find_by_id(id.to_string())
            .one(&*self.db)
            .await?;

        Ok(result.map(Into::into))
    }

    async fn save(&self, term: &CourseTerm) -> Result<CourseTerm> {
        let exists = self.find(&term.id).await?.is_some();
        let row = save_row(&*self.db, entity::course_term::ActiveModel::from(term), exists).await?;
        Ok(row.into())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = entity::course_term::Entity::delete_by_id(id.to_string())
            .exec(&*self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

pub struct SeaOrmClassRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmClassRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ClassRepository for SeaOrmClassRepository {
    async fn list(&self) -> Result<Vec<Class>> {
        let results = entity::class::Entity::find()
            .order_by_asc(entity::class::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn find(&self, id: &str) -> Result<Option<Class>> {
        let result = entity::class::Entity::find_by_id(id.to_string())
            .one(&*self.db)
            .await?;

        Ok(result.map(Into::into))
    }

    async fn save(&self, class: &Class) -> Result<Class> {
        let exists = self.find(&class.id).await?.is_some();
        let row = save_row(&*self.db, entity::class::ActiveModel::from(class), exists).await?;
        Ok(row.into())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = entity::class::Entity::delete_by_id(id.to_string())
            .exec(&*self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

pub struct SeaOrmMajorRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmMajorRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MajorRepository for SeaOrmMajorRepository {
    async fn list(&self) -> Result<Vec<Major>> {
        let results = entity::major::Entity::find()
            .order_by_asc(entity::major::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn find(&self, id: &str) -> Result<Option<Major>> {
        let result = entity::major::Entity::find_by_id(id.to_string())
            .one(&*self.db)
            .await?;

        Ok(result.map(Into::into))
    }

    async fn save(&self, major: &Major) -> Result<Major> {
        let exists = self.find(&major.id).await?.is_some();
        let row = save_row(&*self.db, entity::major::ActiveModel::from(major), exists).await?;
        Ok(row.into())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = entity::major::Entity::delete_by_id(id.to_string())
            .exec(&*self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
