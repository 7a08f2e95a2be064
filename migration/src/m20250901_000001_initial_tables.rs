use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 history_links 表
        manager
            .create_table(
                Table::create()
                    .table(HistoryLink::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HistoryLink::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(HistoryLink::Owner)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HistoryLink::BaseUrl)
                            .string_len(2000)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HistoryLink::FullUrl)
                            .string_len(4000)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HistoryLink::UtmSource)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(HistoryLink::UtmMedium)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(HistoryLink::UtmCampaign)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(HistoryLink::UtmContent)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(HistoryLink::UtmTerm)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(HistoryLink::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建 templates 表
        manager
            .create_table(
                Table::create()
                    .table(Template::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Template::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Template::Owner).string_len(255).not_null())
                    .col(ColumnDef::new(Template::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Template::UtmSource).string_len(255).null())
                    .col(ColumnDef::new(Template::UtmMedium).string_len(255).null())
                    .col(
                        ColumnDef::new(Template::UtmCampaign)
                            .string_len(255)
                            .null(),
                    )
                    .col(ColumnDef::new(Template::UtmContent).string_len(255).null())
                    .col(ColumnDef::new(Template::UtmTerm).string_len(255).null())
                    .col(
                        ColumnDef::new(Template::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // owner 索引（所有查询都按 owner 过滤）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_history_owner")
                    .table(HistoryLink::Table)
                    .col(HistoryLink::Owner)
                    .to_owned(),
            )
            .await?;

        // created_at 索引（列表按创建时间倒序）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_history_created_at")
                    .table(HistoryLink::Table)
                    .col(HistoryLink::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_templates_owner")
                    .table(Template::Table)
                    .col(Template::Owner)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_templates_created_at")
                    .table(Template::Table)
                    .col(Template::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除索引
        manager
            .drop_index(Index::drop().name("idx_templates_created_at").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_templates_owner").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_history_created_at").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_history_owner").to_owned())
            .await?;

        // 删除表
        manager
            .drop_table(Table::drop().table(Template::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(HistoryLink::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum HistoryLink {
    #[sea_orm(iden = "history_links")]
    Table,
    Id,
    Owner,
    BaseUrl,
    FullUrl,
    UtmSource,
    UtmMedium,
    UtmCampaign,
    UtmContent,
    UtmTerm,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Template {
    #[sea_orm(iden = "templates")]
    Table,
    Id,
    Owner,
    Name,
    UtmSource,
    UtmMedium,
    UtmCampaign,
    UtmContent,
    UtmTerm,
    CreatedAt,
}
