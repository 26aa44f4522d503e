//! Schema management, run at startup and by the test harness.

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreateTables)]
    }
}

struct CreateTables;

impl MigrationName for CreateTables {
    fn name(&self) -> &'static str {
        "m20260801_000001_create_tables"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateTables {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pays::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pays::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Pays::Name).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Niveau::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Niveau::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Niveau::Name).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Filiere::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Filiere::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Filiere::Name).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Etudiant::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Etudiant::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Etudiant::LastName).string())
                    .col(ColumnDef::new(Etudiant::FirstName).string())
                    .col(ColumnDef::new(Etudiant::RegistrationNumber).big_integer())
                    .col(ColumnDef::new(Etudiant::EnrollmentDate).date())
                    .col(ColumnDef::new(Etudiant::CountryId).big_integer())
                    .col(ColumnDef::new(Etudiant::LevelId).big_integer())
                    .col(ColumnDef::new(Etudiant::TrackId).big_integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_etudiant_country")
                            .from(Etudiant::Table, Etudiant::CountryId)
                            .to(Pays::Table, Pays::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_etudiant_level")
                            .from(Etudiant::Table, Etudiant::LevelId)
                            .to(Niveau::Table, Niveau::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_etudiant_track")
                            .from(Etudiant::Table, Etudiant::TrackId)
                            .to(Filiere::Table, Filiere::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_etudiant_country")
                    .table(Etudiant::Table)
                    .col(Etudiant::CountryId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_etudiant_level")
                    .table(Etudiant::Table)
                    .col(Etudiant::LevelId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_etudiant_track")
                    .table(Etudiant::Table)
                    .col(Etudiant::TrackId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Etudiant::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Filiere::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Niveau::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pays::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Pays {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Niveau {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Filiere {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Etudiant {
    Table,
    Id,
    LastName,
    FirstName,
    RegistrationNumber,
    EnrollmentDate,
    CountryId,
    LevelId,
    TrackId,
}
