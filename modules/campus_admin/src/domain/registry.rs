//! Enrollment registry - member/section links with the one-section-per-course rule

use super::events::{publish_best_effort, ChangeEvent, EventPublisher};
use super::locks::KeyedLocks;
use super::repository::{EnrollmentRepository, MemberDirectory};
use crate::contract::{CampusError, Enrollment, EnrollmentKey, Member, Section};
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Domain service maintaining member/section links
///
/// Invariant: a member holds at most one active enrollment per course.
/// Writes for the same member are serialized through a per-member lock, and
/// multi-step writes run as one storage transaction.
pub struct EnrollmentRegistry {
    directory: Arc<dyn MemberDirectory>,
    enrollments: Arc<dyn EnrollmentRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    member_locks: KeyedLocks,
}

impl EnrollmentRegistry {
    pub fn new(
        directory: Arc<dyn MemberDirectory>,
        enrollments: Arc<dyn EnrollmentRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            directory,
            enrollments,
            event_publisher,
            member_locks: KeyedLocks::new(),
        }
    }

    // ===== Queries =====

    /// All enrollments of a member, ordered by section id
    pub async fn list_by_member(&self, member_id: &str) -> Result<Vec<Enrollment>, CampusError> {
        let mut items = self
            .enrollments
            .list_by_member(member_id)
            .await
            .map_err(CampusError::storage)?;
        items.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(items)
    }

    /// All enrollments of a section, ordered by member display name
    pub async fn list_by_section(&self, section_id: &str) -> Result<Vec<Enrollment>, CampusError> {
        let mut items = self
            .enrollments
            .list_by_section(section_id)
            .await
            .map_err(CampusError::storage)?;

        let names: HashMap<String, String> = self
            .directory
            .list_members()
            .await
            .map_err(CampusError::storage)?
            .into_iter()
            .map(|m| (m.id, m.full_name))
            .collect();

        items.sort_by(|a, b| {
            let name_a = names.get(a.member_id()).map_or(a.member_id(), String::as_str);
            let name_b = names.get(b.member_id()).map_or(b.member_id(), String::as_str);
            name_a.cmp(name_b).then_with(|| a.key.cmp(&b.key))
        });
        Ok(items)
    }

    /// Fetch one link, active or not
    pub async fn get(&self, member_id: &str, section_id: &str) -> Result<Enrollment, CampusError> {
        let key = EnrollmentKey::new(member_id, section_id);
        self.enrollments
            .find(&key)
            .await
            .map_err(CampusError::storage)?
            .ok_or_else(|| CampusError::not_found("enrollment", key.to_string()))
    }

    /// Active members without an active enrollment in the section's course
    pub async fn list_eligible_members(&self, section_id: &str) -> Result<Vec<Member>, CampusError> {
        let section = self.require_section(section_id).await?;

        let enrolled: HashSet<String> = self
            .enrollments
            .active_member_ids_in_course(&section.course_id)
            .await
            .map_err(CampusError::storage)?
            .into_iter()
            .collect();

        let mut members: Vec<Member> = self
            .directory
            .list_members()
            .await
            .map_err(CampusError::storage)?
            .into_iter()
            .filter(|m| m.is_active && !enrolled.contains(&m.id))
            .collect();
        members.sort_by(|a, b| a.full_name.cmp(&b.full_name).then_with(|| a.id.cmp(&b.id)));
        Ok(members)
    }

    // ===== Writes =====

    /// Enroll a member into a section
    ///
    /// Fails with `Conflict` naming the section that already holds the member
    /// for the same course.
    pub async fn register(&self, member_id: &str, section_id: &str) -> Result<Enrollment, CampusError> {
        let _guard = self.member_locks.acquire(member_id).await;

        self.require_member(member_id).await?;
        let section = self.require_section(section_id).await?;

        if let Some(existing) = self
            .enrollments
            .find_active_in_course(member_id, &section.course_id)
            .await
            .map_err(CampusError::storage)?
        {
            return Err(CampusError::conflict(format!(
                "member {} is already enrolled in section {} of course {}",
                member_id,
                existing.section_id(),
                section.course_id
            )));
        }

        let now = Utc::now();
        let enrollment = Enrollment {
            key: EnrollmentKey::new(member_id, section_id),
            course_id: section.course_id.clone(),
            is_active: true,
            enrolled_at: now,
            updated_at: now,
        };
        let saved = self
            .enrollments
            .activate(&enrollment)
            .await
            .map_err(CampusError::storage)?;

        tracing::info!(member_id, section_id, course_id = %section.course_id, "member enrolled");
        publish_best_effort(
            self.event_publisher.as_ref(),
            ChangeEvent::enrollment(member_id, section_id),
        )
        .await;
        Ok(saved)
    }

    /// Deactivate the active link between a member and a section
    pub async fn unenroll(&self, member_id: &str, section_id: &str) -> Result<(), CampusError> {
        let _guard = self.member_locks.acquire(member_id).await;

        let key = EnrollmentKey::new(member_id, section_id);
        let removed = self
            .enrollments
            .deactivate(&key)
            .await
            .map_err(CampusError::storage)?;
        if !removed {
            return Err(CampusError::not_found("enrollment", key.to_string()));
        }

        tracing::info!(member_id, section_id, "member unenrolled");
        publish_best_effort(
            self.event_publisher.as_ref(),
            ChangeEvent::enrollment(member_id, section_id),
        )
        .await;
        Ok(())
    }

    /// Move a member between two sections of the same course
    ///
    /// Both changes commit together or not at all.
    pub async fn transfer(
        &self,
        member_id: &str,
        from_section_id: &str,
        to_section_id: &str,
    ) -> Result<Enrollment, CampusError> {
        let _guard = self.member_locks.acquire(member_id).await;

        let from = self.require_section(from_section_id).await?;
        let to = self.require_section(to_section_id).await?;

        if from.course_id != to.course_id {
            return Err(CampusError::invalid_operation(format!(
                "cannot transfer between sections of different courses ({} is {}, {} is {})",
                from.id, from.course_id, to.id, to.course_id
            )));
        }

        let from_key = EnrollmentKey::new(member_id, from_section_id);
        if !self.is_active(&from_key).await? {
            return Err(CampusError::not_found("enrollment", from_key.to_string()));
        }

        let to_key = EnrollmentKey::new(member_id, to_section_id);
        if self.is_active(&to_key).await? {
            return Err(CampusError::conflict(format!(
                "member {} is already enrolled in section {}",
                member_id, to_section_id
            )));
        }

        let now = Utc::now();
        let target = Enrollment {
            key: to_key,
            course_id: to.course_id.clone(),
            is_active: true,
            enrolled_at: now,
            updated_at: now,
        };
        let moved = self
            .enrollments
            .transfer(&from_key, &target)
            .await
            .map_err(CampusError::storage)?;

        tracing::info!(
            member_id,
            from = from_section_id,
            to = to_section_id,
            "member transferred"
        );
        publish_best_effort(
            self.event_publisher.as_ref(),
            ChangeEvent::enrollment(member_id, to_section_id),
        )
        .await;
        Ok(moved)
    }

    // ===== Helpers =====

    async fn is_active(&self, key: &EnrollmentKey) -> Result<bool, CampusError> {
        Ok(self
            .enrollments
            .find(key)
            .await
            .map_err(CampusError::storage)?
            .is_some_and(|e| e.is_active))
    }

    async fn require_member(&self, member_id: &str) -> Result<Member, CampusError> {
        self.directory
            .find_member(member_id)
            .await
            .map_err(CampusError::storage)?
            .ok_or_else(|| CampusError::not_found("member", member_id))
    }

    async fn require_section(&self, section_id: &str) -> Result<Section, CampusError> {
        self.directory
            .find_section(section_id)
            .await
            .map_err(CampusError::storage)?
            .ok_or_else(|| CampusError::not_found("section", section_id))
    }
}
