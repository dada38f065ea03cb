use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(ChatMessage::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(ChatMessage::Id)
              .integer()
              .not_null()
              .primary_key()
              .auto_increment(),
          )
          .col(
            ColumnDef::new(ChatMessage::ReceivedAt)
              .timestamp()
              .not_null(),
          )
          .col(ColumnDef::new(ChatMessage::Author).string().not_null())
          .col(ColumnDef::new(ChatMessage::ChannelName).string().not_null())
          .col(
            ColumnDef::new(ChatMessage::Body)
              .text()
              .not_null()
              .extra("CHARACTER SET utf8mb4 COLLATE utf8mb4_unicode_ci"),
          )
          .col(ColumnDef::new(ChatMessage::HasLink).boolean().not_null())
          .col(
            ColumnDef::new(ChatMessage::RawLine)
              .text()
              .null()
              .extra("CHARACTER SET utf8mb4 COLLATE utf8mb4_unicode_ci"),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx-chat_message-channel_name-received_at")
          .table(ChatMessage::Table)
          .col(ChatMessage::ChannelName)
          .col(ChatMessage::ReceivedAt)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(ChatMessage::Table).to_owned())
      .await
  }
}

#[derive(Iden)]
enum ChatMessage {
  Table,
  Id,
  ReceivedAt,
  Author,
  ChannelName,
  Body,
  HasLink,
  RawLine,
}
