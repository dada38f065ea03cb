use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "chat_message")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub received_at: DateTimeUtc,
  pub author: String,
  pub channel_name: String,
  #[sea_orm(column_type = "Text")]
  pub body: String,
  pub has_link: bool,
  #[sea_orm(column_type = "Text", nullable)]
  pub raw_line: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
