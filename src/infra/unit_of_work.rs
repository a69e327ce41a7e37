//! Unit of Work pattern implementation.
//!
//! The Unit of Work:
//! - Centralizes access to all repositories
//! - Hands out database transactions exposing the same repositories
//! - Commits explicitly; a transaction dropped without commit rolls back
//!
//! Writes that span several repositories (resolve references, then write
//! the aggregate) run on one [`Transaction`], so they persist together or
//! not at all.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend, DbErr,
    IsolationLevel, TransactionTrait,
};

use super::repositories::{
    CarRepository, CarStore, CategoryRepository, CategoryStore, ManufacturerRepository,
    ManufacturerStore,
};
use super::{StorageError, StorageResult};

/// Unit of Work trait for dependency injection.
///
/// Repositories returned here run each call on its own pooled connection.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get car repository
    fn cars(&self) -> Arc<dyn CarRepository>;

    /// Get manufacturer repository
    fn manufacturers(&self) -> Arc<dyn ManufacturerRepository>;

    /// Get category repository
    fn categories(&self) -> Arc<dyn CategoryRepository>;

    /// Begin a read-write transaction.
    async fn begin(&self) -> StorageResult<Box<dyn Transaction>>;
}

/// Repository access within one database transaction.
///
/// Dropping the transaction without calling [`Transaction::commit`]
/// rolls it back.
#[async_trait]
pub trait Transaction: Send + Sync {
    /// Get car repository for this transaction
    fn cars(&self) -> &dyn CarRepository;

    /// Get manufacturer repository for this transaction
    fn manufacturers(&self) -> &dyn ManufacturerRepository;

    /// Get category repository for this transaction
    fn categories(&self) -> &dyn CategoryRepository;

    /// Commit every write made through this transaction.
    async fn commit(self: Box<Self>) -> StorageResult<()>;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: Arc<DatabaseConnection>,
    cars: Arc<CarStore<DatabaseConnection>>,
    manufacturers: Arc<ManufacturerStore<DatabaseConnection>>,
    categories: Arc<CategoryStore<DatabaseConnection>>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let db = Arc::new(db);
        Self {
            cars: Arc::new(CarStore::new(db.clone())),
            manufacturers: Arc::new(ManufacturerStore::new(db.clone())),
            categories: Arc::new(CategoryStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn cars(&self) -> Arc<dyn CarRepository> {
        self.cars.clone()
    }

    fn manufacturers(&self) -> Arc<dyn ManufacturerRepository> {
        self.manufacturers.clone()
    }

    fn categories(&self) -> Arc<dyn CategoryRepository> {
        self.categories.clone()
    }

    async fn begin(&self) -> StorageResult<Box<dyn Transaction>> {
        // SQLite has no per-transaction isolation setting
        let (isolation, access) = match self.db.get_database_backend() {
            DbBackend::Sqlite => (None, None),
            _ => (Some(IsolationLevel::ReadCommitted), Some(AccessMode::ReadWrite)),
        };

        let txn = self.db.begin_with_config(isolation, access).await?;
        Ok(Box::new(DbTransaction::new(txn)))
    }
}

/// Transaction-scoped repositories sharing one [`DatabaseTransaction`].
pub struct DbTransaction {
    txn: Arc<DatabaseTransaction>,
    cars: CarStore<DatabaseTransaction>,
    manufacturers: ManufacturerStore<DatabaseTransaction>,
    categories: CategoryStore<DatabaseTransaction>,
}

impl DbTransaction {
    fn new(txn: DatabaseTransaction) -> Self {
        let txn = Arc::new(txn);
        Self {
            cars: CarStore::new(txn.clone()),
            manufacturers: ManufacturerStore::new(txn.clone()),
            categories: CategoryStore::new(txn.clone()),
            txn,
        }
    }
}

#[async_trait]
impl Transaction for DbTransaction {
    fn cars(&self) -> &dyn CarRepository {
        &self.cars
    }

    fn manufacturers(&self) -> &dyn ManufacturerRepository {
        &self.manufacturers
    }

    fn categories(&self) -> &dyn CategoryRepository {
        &self.categories
    }

    async fn commit(self: Box<Self>) -> StorageResult<()> {
        let DbTransaction {
            txn,
            cars,
            manufacturers,
            categories,
        } = *self;
        // Release the stores' handles so the transaction can be owned again
        drop((cars, manufacturers, categories));

        let txn = Arc::try_unwrap(txn).map_err(|_| {
            StorageError::Backend(DbErr::Custom(
                "transaction is still shared at commit".to_string(),
            ))
        })?;
        txn.commit().await?;
        Ok(())
    }
}
