//! Shared storage operations for name-keyed reference entities.
//!
//! Manufacturers and categories have the same shape (opaque id, unique
//! name) and the same lifecycle. The operations are written once here,
//! generic over any entity implementing [`NamedEntity`], and the concrete
//! stores delegate to them.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use super::entities::{category, manufacturer};
use crate::domain::{Category, Manufacturer};
use crate::infra::StorageResult;
use crate::types::PaginationParams;

/// Entity with an opaque string id and a unique name.
pub trait NamedEntity: EntityTrait {
    /// Domain value loaded from a row
    type Domain: From<Self::Model> + Send;

    fn id_column() -> Self::Column;

    fn name_column() -> Self::Column;

    fn active_model(id: String, name: String) -> Self::ActiveModel;
}

impl NamedEntity for manufacturer::Entity {
    type Domain = Manufacturer;

    fn id_column() -> Self::Column {
        manufacturer::Column::Id
    }

    fn name_column() -> Self::Column {
        manufacturer::Column::Name
    }

    fn active_model(id: String, name: String) -> Self::ActiveModel {
        use sea_orm::Set;
        manufacturer::ActiveModel {
            id: Set(id),
            name: Set(name),
        }
    }
}

impl NamedEntity for category::Entity {
    type Domain = Category;

    fn id_column() -> Self::Column {
        category::Column::Id
    }

    fn name_column() -> Self::Column {
        category::Column::Name
    }

    fn active_model(id: String, name: String) -> Self::ActiveModel {
        use sea_orm::Set;
        category::ActiveModel {
            id: Set(id),
            name: Set(name),
        }
    }
}

/// Page of rows ordered by name, optionally filtered by a name substring.
pub async fn list<E, C>(
    conn: &C,
    name_fragment: Option<String>,
    page: PaginationParams,
) -> StorageResult<(Vec<E::Domain>, u64)>
where
    E: NamedEntity,
    E::Model: Sync,
    C: ConnectionTrait,
{
    let mut select = E::find();
    if let Some(fragment) = name_fragment.filter(|f| !f.trim().is_empty()) {
        select = select.filter(E::name_column().contains(fragment.as_str()));
    }

    let paginator = select
        .order_by_asc(E::name_column())
        .order_by_asc(E::id_column())
        .paginate(conn, page.limit());
    let total = paginator.num_items().await?;
    let rows = paginator.fetch_page(page.page_index()).await?;

    Ok((rows.into_iter().map(E::Domain::from).collect(), total))
}

/// Point lookup on the id column.
pub async fn find_by_id<E, C>(conn: &C, id: &str) -> StorageResult<Option<E::Domain>>
where
    E: NamedEntity,
    E::Model: Sync,
    C: ConnectionTrait,
{
    let row = E::find()
        .filter(E::id_column().eq(id))
        .one(conn)
        .await?;
    Ok(row.map(E::Domain::from))
}

/// Exact lookup on the unique name column.
pub async fn find_by_name<E, C>(conn: &C, name: &str) -> StorageResult<Option<E::Domain>>
where
    E: NamedEntity,
    E::Model: Sync,
    C: ConnectionTrait,
{
    let row = E::find()
        .filter(E::name_column().eq(name))
        .one(conn)
        .await?;
    Ok(row.map(E::Domain::from))
}

/// Insert a new row. A taken name surfaces as a constraint violation.
pub async fn insert<E, C>(conn: &C, id: String, name: String) -> StorageResult<()>
where
    E: NamedEntity,
    E::Model: Sync + IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: ActiveModelTrait<Entity = E> + Send,
    C: ConnectionTrait,
{
    E::insert(E::active_model(id, name))
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

/// Rename the row addressed by `id`; a missing row is a stale write.
pub async fn update<E, C>(conn: &C, id: &str, name: String) -> StorageResult<()>
where
    E: NamedEntity,
    E::Model: Sync,
    C: ConnectionTrait,
{
    let result = E::update_many()
        .col_expr(E::name_column(), Expr::value(name))
        .filter(E::id_column().eq(id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(DbErr::RecordNotUpdated.into());
    }
    Ok(())
}

/// Delete by id. Deleting a missing row is not an error; deleting a
/// row still referenced by a car surfaces as a constraint violation.
pub async fn delete_by_id<E, C>(conn: &C, id: &str) -> StorageResult<()>
where
    E: NamedEntity,
    E::Model: Sync,
    C: ConnectionTrait,
{
    E::delete_many()
        .filter(E::id_column().eq(id))
        .exec(conn)
        .await?;
    Ok(())
}
