//! 短链接回填字段迁移
//!
//! history_links 添加 short_url 列，保存外部缩短服务返回的链接。
//! 只能在记录创建后通过单独的更新接口写入。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(HistoryLink::Table)
                    .add_column(
                        ColumnDef::new(HistoryLink::ShortUrl)
                            .string_len(500)
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(HistoryLink::Table)
                    .drop_column(HistoryLink::ShortUrl)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum HistoryLink {
    #[sea_orm(iden = "history_links")]
    Table,
    ShortUrl,
}
