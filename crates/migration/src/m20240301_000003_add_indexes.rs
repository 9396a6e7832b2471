use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Group: unique group_number
        manager
            .create_index(
                Index::create()
                    .name("uniq_group_number")
                    .table(Group::Table)
                    .col(Group::GroupNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Student: unique email
        manager
            .create_index(
                Index::create()
                    .name("uniq_student_email")
                    .table(Student::Table)
                    .col(Student::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Student: lookup by group reference
        manager
            .create_index(
                Index::create()
                    .name("idx_student_group_number")
                    .table(Student::Table)
                    .col(Student::GroupNumber)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_student_group_number")
                    .table(Student::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_student_email").table(Student::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_group_number").table(Group::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Group { Table, GroupNumber }

#[derive(DeriveIden)]
enum Student { Table, Email, GroupNumber }
