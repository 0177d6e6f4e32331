use chrono::NaiveDateTime;
use diesel::{AsChangeset, Identifiable, Insertable, Queryable, Selectable};
use std::fmt;

use crate::infrastructure::repositories::sqlite::schema::{
    alerts, audit_logs, service_tags, services, tags,
};

#[derive(Queryable, Selectable, Identifiable, Clone, Debug)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DbTag {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub created_at: NaiveDateTime,
}

impl fmt::Display for DbTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id: {}, name: {}, color: {}, created_at: {}",
            self.id, self.name, self.color, self.created_at
        )
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = tags)]
pub struct NewDbTag {
    pub name: String,
    pub color: String,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug)]
#[diesel(table_name = tags)]
pub struct DbTagChanges {
    pub name: String,
    pub color: String,
}

#[derive(Insertable, Debug, Clone, Copy)]
#[diesel(table_name = service_tags)]
pub struct DbServiceTag {
    pub service_id: i32,
    pub tag_id: i32,
}

#[derive(Queryable, Selectable, Identifiable, Clone, Debug)]
#[diesel(table_name = services)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DbService {
    pub id: i32,
    pub name: String,
    pub provider_id: i32,
    pub service_type: String,
    pub status: String,
    pub external_url: Option<String>,
    pub created_at: NaiveDateTime,
}

impl fmt::Display for DbService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id: {}, name: {}, provider_id: {}, type: {}, status: {}, external_url: {}, created_at: {}",
            self.id,
            self.name,
            self.provider_id,
            self.service_type,
            self.status,
            self.external_url.as_deref().unwrap_or("None"),
            self.created_at
        )
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = services)]
pub struct NewDbService {
    pub name: String,
    pub provider_id: i32,
    pub service_type: String,
    pub status: String,
    pub external_url: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Queryable, Selectable, Identifiable, Clone, Debug)]
#[diesel(table_name = alerts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DbAlert {
    pub id: i32,
    pub service_id: Option<i32>,
    pub tag_name: String,
    pub title: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = alerts)]
pub struct NewDbAlert {
    pub service_id: Option<i32>,
    pub tag_name: String,
    pub title: String,
    pub created_at: NaiveDateTime,
}

#[derive(Queryable, Selectable, Identifiable, Clone, Debug)]
#[diesel(table_name = audit_logs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DbAuditLog {
    pub id: i32,
    pub action_type: String,
    pub resource_type: String,
    pub resource_id: String,
    pub user_id: i32,
    pub user_name: String,
    pub resource_name: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = audit_logs)]
pub struct NewDbAuditLog {
    pub action_type: String,
    pub resource_type: String,
    pub resource_id: String,
    pub user_id: i32,
    pub user_name: String,
    pub resource_name: String,
    pub created_at: NaiveDateTime,
}
