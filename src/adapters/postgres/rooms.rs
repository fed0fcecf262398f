//! PostgreSQL implementation of RoomRepository.
//!
//! Members live in a `TEXT[]` column on `rooms`; items have their own table
//! keyed by uuid with a cascading foreign key to the room.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::foundation::{DomainError, ItemId, Login, RoomId};
use crate::domain::room::Room;
use crate::domain::shop_list::{ItemFilter, ItemPatch, ListQuery, ShopListItem, Tag};
use crate::ports::RoomRepository;

use super::{db_error, get};

#[derive(Clone)]
pub struct PostgresRoomRepository {
    pool: PgPool,
}

impl PostgresRoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for PostgresRoomRepository {
    async fn insert(&self, room: &Room) -> Result<(), DomainError> {
        let users: Vec<String> = room.users().iter().map(Login::to_string).collect();
        let result = sqlx::query("INSERT INTO rooms (id, owner, name, users) VALUES ($1, $2, $3, $4)")
            .bind(room.id().as_uuid())
            .bind(room.owner().as_str())
            .bind(room.name())
            .bind(&users)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                DomainError::conflict(format!("Room already exists: {}", room.id())),
            ),
            Err(e) => Err(db_error("insert room", e)),
        }
    }

    async fn find(&self, id: &RoomId) -> Result<Option<Room>, DomainError> {
        let row = sqlx::query("SELECT id, owner, name, users FROM rooms WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch room", e))?;

        row.map(row_to_room).transpose()
    }

    async fn list_for_member(&self, login: &Login) -> Result<Vec<Room>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, owner, name, users FROM rooms WHERE $1 = ANY(users) ORDER BY name",
        )
        .bind(login.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list rooms", e))?;

        rows.into_iter().map(row_to_room).collect()
    }

    async fn member_has_room_named(
        &self,
        login: &Login,
        name: &str,
    ) -> Result<bool, DomainError> {
        let row = sqlx::query(
            "SELECT EXISTS (SELECT 1 FROM rooms WHERE $1 = ANY(users) AND name = $2) AS taken",
        )
        .bind(login.as_str())
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("check room name", e))?;

        get(&row, "taken")
    }

    async fn delete(&self, id: &RoomId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete room", e))?;
        Ok(())
    }

    async fn add_member(&self, id: &RoomId, login: &Login) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE rooms
            SET users = CASE WHEN $2 = ANY(users) THEN users ELSE array_append(users, $2) END
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(login.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("add room member", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_member(&self, id: &RoomId, login: &Login) -> Result<(), DomainError> {
        sqlx::query("UPDATE rooms SET users = array_remove(users, $2) WHERE id = $1")
            .bind(id.as_uuid())
            .bind(login.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("remove room member", e))?;
        Ok(())
    }

    async fn list_items(
        &self,
        id: &RoomId,
        query: &ListQuery,
    ) -> Result<Vec<ShopListItem>, DomainError> {
        let mut builder = items_query(id, query);
        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list items", e))?;

        let items = rows
            .into_iter()
            .map(row_to_item)
            .collect::<Result<Vec<_>, _>>()?;

        // Name regexes and ordering are applied in-process so that they
        // follow the same regex dialect and byte order everywhere.
        Ok(query.evaluate(items))
    }

    async fn add_item(&self, id: &RoomId, item: &ShopListItem) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO shop_list_items (uuid, room_id, name, price, checked, emoji, tags)
            SELECT $1, $2, $3, $4, $5, $6, $7
            WHERE EXISTS (SELECT 1 FROM rooms WHERE id = $2)
            ON CONFLICT (uuid) DO NOTHING
            "#,
        )
        .bind(item.uuid.as_uuid())
        .bind(id.as_uuid())
        .bind(&item.name)
        .bind(item.price)
        .bind(item.checked)
        .bind(&item.emoji)
        .bind(item.tags.as_ref().map(Json))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert item", e))?;
        Ok(())
    }

    async fn update_item(
        &self,
        id: &RoomId,
        item_id: &ItemId,
        patch: &ItemPatch,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE shop_list_items SET
                name = COALESCE($3, name),
                price = COALESCE($4, price),
                checked = COALESCE($5, checked),
                emoji = COALESCE($6, emoji),
                tags = COALESCE($7, tags)
            WHERE room_id = $1 AND uuid = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(item_id.as_uuid())
        .bind(&patch.name)
        .bind(patch.price)
        .bind(patch.checked)
        .bind(&patch.emoji)
        .bind(patch.tags.as_ref().map(Json))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update item", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_item(&self, id: &RoomId, item_id: &ItemId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM shop_list_items WHERE room_id = $1 AND uuid = $2")
            .bind(id.as_uuid())
            .bind(item_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete item", e))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Selects a room's items, pushing the price and checked filters down.
fn items_query(id: &RoomId, query: &ListQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(
        "SELECT uuid, name, price, checked, emoji, tags FROM shop_list_items WHERE room_id = ",
    );
    builder.push_bind(*id.as_uuid());

    for filter in query.filters() {
        match filter {
            ItemFilter::PriceRange { low, high } => {
                builder
                    .push(" AND price BETWEEN ")
                    .push_bind(*low)
                    .push(" AND ")
                    .push_bind(*high);
            }
            ItemFilter::CheckedEquals(checked) => {
                builder
                    .push(" AND checked = ")
                    .push_bind(*checked);
            }
            ItemFilter::NameMatches(_) => {}
        }
    }
    builder
}

fn row_to_room(row: sqlx::postgres::PgRow) -> Result<Room, DomainError> {
    let id: uuid::Uuid = get(&row, "id")?;
    let owner: String = get(&row, "owner")?;
    let name: String = get(&row, "name")?;
    let users: Vec<String> = get(&row, "users")?;

    let owner = stored_login(owner)?;
    let users = users
        .into_iter()
        .map(stored_login)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Room::reconstitute(RoomId::from_uuid(id), owner, name, users))
}

fn row_to_item(row: sqlx::postgres::PgRow) -> Result<ShopListItem, DomainError> {
    let uuid: uuid::Uuid = get(&row, "uuid")?;
    let tags: Option<Json<Vec<Tag>>> = get(&row, "tags")?;

    Ok(ShopListItem {
        uuid: ItemId::from_uuid(uuid),
        name: get(&row, "name")?,
        price: get(&row, "price")?,
        checked: get(&row, "checked")?,
        emoji: get(&row, "emoji")?,
        tags: tags.map(|Json(tags)| tags),
    })
}

fn stored_login(raw: String) -> Result<Login, DomainError> {
    Login::new(raw).map_err(|e| DomainError::database(format!("stored login is invalid: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_query_pushes_down_price_and_checked_only() {
        let id = RoomId::new();
        let query = ListQuery::parse("price:1..5;checked:true;name:milk;");
        let builder = items_query(&id, &query);

        let sql = builder.sql();
        assert!(sql.contains("price BETWEEN $2 AND $3"));
        assert!(sql.contains("checked = $4"));
        assert!(!sql.contains(" ~ "));
    }

    #[test]
    fn unfiltered_query_selects_whole_room() {
        let id = RoomId::new();
        let builder = items_query(&id, &ListQuery::all());
        assert!(builder.sql().ends_with("WHERE room_id = $1"));
    }
}
