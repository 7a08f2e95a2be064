//! 标签字段迁移
//!
//! history_links 和 templates 添加 tag_name / tag_color 列，
//! 用于前端给记录打彩色标签。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. history_links 添加 tag_name 列
        manager
            .alter_table(
                Table::alter()
                    .table(HistoryLink::Table)
                    .add_column(ColumnDef::new(HistoryLink::TagName).string_len(100).null())
                    .to_owned(),
            )
            .await?;

        // 2. history_links 添加 tag_color 列
        manager
            .alter_table(
                Table::alter()
                    .table(HistoryLink::Table)
                    .add_column(
                        ColumnDef::new(HistoryLink::TagColor)
                            .string_len(20)
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 3. templates 添加 tag_name 列
        manager
            .alter_table(
                Table::alter()
                    .table(Template::Table)
                    .add_column(ColumnDef::new(Template::TagName).string_len(100).null())
                    .to_owned(),
            )
            .await?;

        // 4. templates 添加 tag_color 列
        manager
            .alter_table(
                Table::alter()
                    .table(Template::Table)
                    .add_column(ColumnDef::new(Template::TagColor).string_len(20).null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Template::Table)
                    .drop_column(Template::TagColor)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Template::Table)
                    .drop_column(Template::TagName)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(HistoryLink::Table)
                    .drop_column(HistoryLink::TagColor)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(HistoryLink::Table)
                    .drop_column(HistoryLink::TagName)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum HistoryLink {
    #[sea_orm(iden = "history_links")]
    Table,
    TagName,
    TagColor,
}

#[derive(DeriveIden)]
enum Template {
    #[sea_orm(iden = "templates")]
    Table,
    TagName,
    TagColor,
}
