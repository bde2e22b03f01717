//! Module wiring: repositories, services, REST router and migrations

use crate::api::native::NativeClient;
use crate::config::Config;
use crate::contract::{AssignmentApi, EnrollmentApi};
use crate::domain::catalog::{
    BoardService, ClassService, CourseTermService, EmailPolicy, FacultyService, LecturerService,
    MajorService, PositionService, SpecialistService,
};
use crate::domain::repository::{
    AssignmentRepository, BoardRepository, ClassRepository, CourseTermRepository, DutyDirectory,
    EnrollmentRepository, FacultyRepository, LecturerRepository, MajorRepository,
    MemberDirectory, PositionRepository, SpecialistRepository,
};
use crate::domain::{
    AssignmentRegistrar, EmailValidator, EnrollmentRegistry, EventPublisher,
    RecognitionConfigService,
};
use crate::infra::broadcast::{
    BroadcastEventPublisher, LiveBroadcaster, RoomEventDispatcher, TopicHub,
};
use crate::infra::storage::repositories::{
    SeaOrmAssignmentRepository, SeaOrmBoardRepository, SeaOrmClassRepository,
    SeaOrmCourseTermRepository, SeaOrmDirectory, SeaOrmEnrollmentRepository,
    SeaOrmFacultyRepository, SeaOrmLecturerRepository, SeaOrmMajorRepository,
    SeaOrmPositionRepository, SeaOrmSpecialistRepository,
};
use anyhow::{Context, Result};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Every storage port the services depend on
#[derive(Clone)]
pub struct Repositories {
    pub members: Arc<dyn MemberDirectory>,
    pub duty: Arc<dyn DutyDirectory>,
    pub enrollments: Arc<dyn EnrollmentRepository>,
    pub assignments: Arc<dyn AssignmentRepository>,
    pub faculties: Arc<dyn FacultyRepository>,
    pub boards: Arc<dyn BoardRepository>,
    pub positions: Arc<dyn PositionRepository>,
    pub specialists: Arc<dyn SpecialistRepository>,
    pub lecturers: Arc<dyn LecturerRepository>,
    pub course_terms: Arc<dyn CourseTermRepository>,
    pub classes: Arc<dyn ClassRepository>,
    pub majors: Arc<dyn MajorRepository>,
}

impl Repositories {
    /// SeaORM-backed repositories sharing one connection pool
    pub fn sea_orm(conn: Arc<DatabaseConnection>) -> Self {
        let directory = Arc::new(SeaOrmDirectory::new(conn.clone()));
        Self {
            members: directory.clone(),
            duty: directory,
            enrollments: Arc::new(SeaOrmEnrollmentRepository::new(conn.clone())),
            assignments: Arc::new(SeaOrmAssignmentRepository::new(conn.clone())),
            faculties: Arc::new(SeaOrmFacultyRepository::new(conn.clone())),
            boards: Arc::new(SeaOrmBoardRepository::new(conn.clone())),
            positions: Arc::new(SeaOrmPositionRepository::new(conn.clone())),
            specialists: Arc::new(SeaOrmSpecialistRepository::new(conn.clone())),
            lecturers: Arc::new(SeaOrmLecturerRepository::new(conn.clone())),
            course_terms: Arc::new(SeaOrmCourseTermRepository::new(conn.clone())),
            classes: Arc::new(SeaOrmClassRepository::new(conn.clone())),
            majors: Arc::new(SeaOrmMajorRepository::new(conn)),
        }
    }
}

/// Domain services shared by the REST handlers and the native client
pub struct CampusServices {
    pub faculties: Arc<FacultyService>,
    pub boards: Arc<BoardService>,
    pub positions: Arc<PositionService>,
    pub specialists: Arc<SpecialistService>,
    pub lecturers: Arc<LecturerService>,
    pub course_terms: Arc<CourseTermService>,
    pub classes: Arc<ClassService>,
    pub majors: Arc<MajorService>,
    pub enrollments: Arc<EnrollmentRegistry>,
    pub assignments: Arc<AssignmentRegistrar>,
    pub recognition: Arc<RecognitionConfigService>,
    pub email: EmailValidator,
}

impl CampusServices {
    pub fn new(
        repos: Repositories,
        config: &Config,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Result<Self> {
        let email = EmailValidator::new(&config.email_domain)
            .with_context(|| format!("invalid email domain '{}'", config.email_domain))?;
        let policy = EmailPolicy::new(email.clone(), config.enforce_email_domain);

        let faculties = Arc::new(FacultyService::new(repos.faculties));

        Ok(Self {
            boards: Arc::new(BoardService::new(repos.boards, faculties.clone())),
            positions: Arc::new(PositionService::new(repos.positions)),
            specialists: Arc::new(SpecialistService::new(
                repos.specialists,
                faculties.clone(),
                policy.clone(),
            )),
            lecturers: Arc::new(LecturerService::new(
                repos.lecturers,
                faculties.clone(),
                policy,
            )),
            course_terms: Arc::new(CourseTermService::new(
                repos.course_terms.clone(),
                repos.classes.clone(),
            )),
            classes: Arc::new(ClassService::new(
                repos.classes.clone(),
                repos.majors.clone(),
                repos.course_terms,
                repos.members.clone(),
            )),
            majors: Arc::new(MajorService::new(
                repos.majors,
                faculties.clone(),
                repos.classes,
                repos.members.clone(),
            )),
            enrollments: Arc::new(EnrollmentRegistry::new(
                repos.members.clone(),
                repos.enrollments,
                event_publisher.clone(),
            )),
            assignments: Arc::new(AssignmentRegistrar::new(
                repos.duty,
                repos.assignments,
                event_publisher,
            )),
            recognition: Arc::new(RecognitionConfigService::new(
                config.recognition.clone(),
                repos.members,
            )),
            faculties,
            email,
        })
    }
}

/// Campus admin module: owns the services, the broadcast hub and the native client
pub struct CampusAdminModule {
    config: Config,
    services: Arc<CampusServices>,
    hub: TopicHub,
    client: Arc<NativeClient>,
}

impl CampusAdminModule {
    /// Build the module over a live database connection
    pub fn init(conn: Arc<DatabaseConnection>, config: Config) -> Result<Self> {
        Self::with_repositories(Repositories::sea_orm(conn), config)
    }

    /// Build the module over arbitrary repository implementations
    pub fn with_repositories(repos: Repositories, config: Config) -> Result<Self> {
        let hub = TopicHub::new(config.broadcast_capacity);
        let event_publisher = Arc::new(BroadcastEventPublisher::new(hub.clone()));
        let services = Arc::new(CampusServices::new(repos, &config, event_publisher)?);
        let client = Arc::new(NativeClient::new(
            services.enrollments.clone(),
            services.assignments.clone(),
        ));

        tracing::info!(
            email_domain = %config.email_domain,
            enforce_email_domain = config.enforce_email_domain,
            "Campus admin module initialized"
        );
        Ok(Self {
            config,
            services,
            hub,
            client,
        })
    }

    /// Apply pending schema migrations
    pub async fn migrate(conn: &DatabaseConnection) -> Result<()> {
        use crate::infra::storage::migrations::Migrator;
        use sea_orm_migration::MigratorTrait;

        Migrator::up(conn, None).await?;
        tracing::info!("Campus admin migrations completed");
        Ok(())
    }

    /// REST routes of the module
    pub fn router(&self) -> axum::Router {
        crate::api::rest::routes::router(self.services.clone())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn services(&self) -> Arc<CampusServices> {
        self.services.clone()
    }

    pub fn hub(&self) -> &TopicHub {
        &self.hub
    }

    pub fn enrollment_api(&self) -> Arc<dyn EnrollmentApi> {
        self.client.clone()
    }

    pub fn assignment_api(&self) -> Arc<dyn AssignmentApi> {
        self.client.clone()
    }

    pub fn live_broadcaster(&self) -> LiveBroadcaster {
        LiveBroadcaster::new(self.hub.clone())
    }

    pub fn room_dispatcher(&self) -> RoomEventDispatcher {
        RoomEventDispatcher::new(self.hub.clone())
    }
}
