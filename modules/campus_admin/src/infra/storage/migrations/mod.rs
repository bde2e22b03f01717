//! Database migrations for the campus admin module

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251001_000001_create_lookup_tables::Migration),
            Box::new(m20251001_000002_create_registration_tables::Migration),
            Box::new(m20251001_000003_create_organization_tables::Migration),
        ]
    }
}

mod m20251001_000001_create_lookup_tables {
    use super::*;

    // Named explicitly: every migration lives in this one file
    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20251001_000001_create_lookup_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Faculties::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Faculties::Id).string().not_null().primary_key())
                        .col(ColumnDef::new(Faculties::Name).string().not_null())
                        .col(
                            ColumnDef::new(Faculties::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Members::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Members::Id).string().not_null().primary_key())
                        .col(ColumnDef::new(Members::FullName).string().not_null())
                        .col(ColumnDef::new(Members::Email).string())
                        .col(ColumnDef::new(Members::ClassId).string())
                        .col(
                            ColumnDef::new(Members::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Courses::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Courses::Id).string().not_null().primary_key())
                        .col(ColumnDef::new(Courses::Name).string().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Sections::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Sections::Id).string().not_null().primary_key())
                        .col(ColumnDef::new(Sections::CourseId).string().not_null())
                        .col(ColumnDef::new(Sections::GroupLabel).string())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sections_course")
                                .from(Sections::Table, Sections::CourseId)
                                .to(Courses::Table, Courses::Id)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Activities::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Activities::Id).string().not_null().primary_key())
                        .col(ColumnDef::new(Activities::Name).string().not_null())
                        .col(
                            ColumnDef::new(Activities::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(DutyMembers::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(DutyMembers::Id).string().not_null().primary_key())
                        .col(ColumnDef::new(DutyMembers::FullName).string().not_null())
                        .col(
                            ColumnDef::new(DutyMembers::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(DutyMembers::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Activities::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Sections::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Courses::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Members::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Faculties::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Faculties {
        Table,
        Id,
        Name,
        IsActive,
    }

    #[derive(DeriveIden)]
    enum Members {
        Table,
        Id,
        FullName,
        Email,
        ClassId,
        IsActive,
    }

    #[derive(DeriveIden)]
    enum Courses {
        Table,
        Id,
        Name,
    }

    #[derive(DeriveIden)]
    enum Sections {
        Table,
        Id,
        CourseId,
        GroupLabel,
    }

    #[derive(DeriveIden)]
    enum Activities {
        Table,
        Id,
        Name,
        IsActive,
    }

    #[derive(DeriveIden)]
    enum DutyMembers {
        Table,
        Id,
        FullName,
        IsActive,
    }
}

mod m20251001_000002_create_registration_tables {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20251001_000002_create_registration_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Enrollments::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Enrollments::MemberId).string().not_null())
                        .col(ColumnDef::new(Enrollments::SectionId).string().not_null())
                        .col(ColumnDef::new(Enrollments::CourseId).string().not_null())
                        .col(
                            ColumnDef::new(Enrollments::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Enrollments::EnrolledAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(Enrollments::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .primary_key(
                            Index::create()
                                .col(Enrollments::MemberId)
                                .col(Enrollments::SectionId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_enrollments_member")
                                .from(Enrollments::Table, Enrollments::MemberId)
                                .to(Members::Table, Members::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_enrollments_section")
                                .from(Enrollments::Table, Enrollments::SectionId)
                                .to(Sections::Table, Sections::Id)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_enrollments_member_course")
                        .table(Enrollments::Table)
                        .col(Enrollments::MemberId)
                        .col(Enrollments::CourseId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_enrollments_section")
                        .table(Enrollments::Table)
                        .col(Enrollments::SectionId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(DutyAssignments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(DutyAssignments::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(DutyAssignments::ActivityId).string().not_null())
                        .col(ColumnDef::new(DutyAssignments::MemberId).string().not_null())
                        .col(
                            ColumnDef::new(DutyAssignments::Role)
                                .string()
                                .not_null()
                                .default("CHINH"),
                        )
                        .col(ColumnDef::new(DutyAssignments::Note).text())
                        .col(
                            ColumnDef::new(DutyAssignments::AssignedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(DutyAssignments::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_duty_assignments_activity")
                                .from(DutyAssignments::Table, DutyAssignments::ActivityId)
                                .to(Activities::Table, Activities::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_duty_assignments_member")
                                .from(DutyAssignments::Table, DutyAssignments::MemberId)
                                .to(DutyMembers::Table, DutyMembers::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_duty_assignments_activity_member")
                        .table(DutyAssignments::Table)
                        .col(DutyAssignments::ActivityId)
                        .col(DutyAssignments::MemberId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(DutyAssignments::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Enrollments::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Enrollments {
        Table,
        MemberId,
        SectionId,
        CourseId,
        IsActive,
        EnrolledAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum DutyAssignments {
        Table,
        Id,
        ActivityId,
        MemberId,
        Role,
        Note,
        AssignedAt,
        IsActive,
    }

    #[derive(DeriveIden)]
    enum Members {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum Sections {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum Activities {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum DutyMembers {
        Table,
        Id,
    }
}

mod m20251001_000003_create_organization_tables {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20251001_000003_create_organization_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Boards::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Boards::Id).string().not_null().primary_key())
                        .col(ColumnDef::new(Boards::Name).string().not_null().unique_key())
                        .col(ColumnDef::new(Boards::Kind).string().not_null())
                        .col(ColumnDef::new(Boards::Description).text())
                        .col(ColumnDef::new(Boards::FacultyId).string())
                        .col(ColumnDef::new(Boards::IsActive).boolean().not_null().default(true))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Positions::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Positions::Id).string().not_null().primary_key())
                        .col(ColumnDef::new(Positions::Name).string().not_null().unique_key())
                        .col(ColumnDef::new(Positions::Unit).string())
                        .col(ColumnDef::new(Positions::Description).text())
                        .col(ColumnDef::new(Positions::DisplayOrder).integer())
                        .col(
                            ColumnDef::new(Positions::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Specialists::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Specialists::Id).string().not_null().primary_key())
                        .col(ColumnDef::new(Specialists::FullName).string().not_null())
                        .col(ColumnDef::new(Specialists::Email).string())
                        .col(ColumnDef::new(Specialists::Phone).string())
                        .col(ColumnDef::new(Specialists::Title).string())
                        .col(ColumnDef::new(Specialists::FacultyId).string())
                        .col(
                            ColumnDef::new(Specialists::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Specialists::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(Specialists::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Lecturers::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Lecturers::Id).string().not_null().primary_key())
                        .col(ColumnDef::new(Lecturers::FullName).string().not_null())
                        .col(ColumnDef::new(Lecturers::Email).string().not_null().unique_key())
                        .col(ColumnDef::new(Lecturers::FacultyId).string().not_null())
                        .col(
                            ColumnDef::new(Lecturers::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(CourseTerms::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(CourseTerms::Id).string().not_null().primary_key())
                        .col(ColumnDef::new(CourseTerms::Name).string().not_null())
                        .col(ColumnDef::new(CourseTerms::StartYear).integer())
                        .col(ColumnDef::new(CourseTerms::EndYear).integer())
                        .col(
                            ColumnDef::new(CourseTerms::IsCurrent)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(CourseTerms::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Majors::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Majors::Id).string().not_null().primary_key())
                        .col(ColumnDef::new(Majors::Name).string().not_null())
                        .col(ColumnDef::new(Majors::FacultyId).string().not_null())
                        .col(ColumnDef::new(Majors::IsActive).boolean().not_null().default(true))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Classes::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Classes::Id).string().not_null().primary_key())
                        .col(ColumnDef::new(Classes::Name).string().not_null())
                        .col(ColumnDef::new(Classes::MajorId).string().not_null())
                        .col(ColumnDef::new(Classes::CourseTermId).string().not_null())
                        .col(ColumnDef::new(Classes::IsActive).boolean().not_null().default(true))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_classes_major")
                                .from(Classes::Table, Classes::MajorId)
                                .to(Majors::Table, Majors::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_classes_course_term")
                                .from(Classes::Table, Classes::CourseTermId)
                                .to(CourseTerms::Table, CourseTerms::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_classes_major")
                        .table(Classes::Table)
                        .col(Classes::MajorId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Classes::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Majors::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(CourseTerms::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Lecturers::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Specialists::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Positions::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Boards::Table).to_owned())
                .await?;
            Ok(())
        }
    }

    #[derive(DeriveIden)]
    enum Boards {
        Table,
        Id,
        Name,
        Kind,
        Description,
        FacultyId,
        IsActive,
    }

    #[derive(DeriveIden)]
    enum Positions {
        Table,
        Id,
        Name,
        Unit,
        Description,
        DisplayOrder,
        IsActive,
    }

    #[derive(DeriveIden)]
    enum Specialists {
        Table,
        Id,
        FullName,
        Email,
        Phone,
        Title,
        FacultyId,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Lecturers {
        Table,
        Id,
        FullName,
        Email,
        FacultyId,
        IsActive,
    }

    #[derive(DeriveIden)]
    enum CourseTerms {
        Table,
        Id,
        Name,
        StartYear,
        EndYear,
        IsCurrent,
        IsActive,
    }

    #[derive(DeriveIden)]
    enum Majors {
        Table,
        Id,
        Name,
        FacultyId,
        IsActive,
    }

    #[derive(DeriveIden)]
    enum Classes {
        Table,
        Id,
        Name,
        MajorId,
        CourseTermId,
        IsActive,
    }
}
