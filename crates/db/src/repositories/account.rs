//! Account repository for chart-of-accounts database operations.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use saldo_core::journal::{AccountInfo, AccountType};

use crate::entities::accounts;

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(Uuid),

    /// Another live account in the branch already uses the code.
    #[error("Account code already in use: {0}")]
    DuplicateCode(String),

    /// The account type string is not recognized.
    #[error("Unknown account type: {0}")]
    UnknownAccountType(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Branch the account belongs to.
    pub branch_id: Uuid,
    /// Optional parent account for rollup trees.
    pub parent_id: Option<Uuid>,
    /// Account code, unique among live accounts in the branch.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
}

/// Input for updating an account.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountInput {
    /// New name, if changing.
    pub name: Option<String>,
    /// New active flag, if changing.
    pub is_active: Option<bool>,
}

/// Account repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::DuplicateCode`] if a live account in the
    /// branch already uses the code.
    pub async fn create(&self, input: CreateAccountInput) -> Result<accounts::Model, AccountError> {
        let existing = accounts::Entity::find()
            .filter(accounts::Column::BranchId.eq(input.branch_id))
            .filter(accounts::Column::Code.eq(&input.code))
            .filter(accounts::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(AccountError::DuplicateCode(input.code));
        }

        let now = Utc::now();
        let account = accounts::ActiveModel {
            id: Set(Uuid::now_v7()),
            branch_id: Set(input.branch_id),
            parent_id: Set(input.parent_id),
            code: Set(input.code),
            name: Set(input.name),
            account_type: Set(input.account_type.as_str().to_string()),
            normal_balance: Set(input.account_type.normal_balance().as_str().to_string()),
            is_active: Set(true),
            deleted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(account.insert(&self.db).await?)
    }

    /// Finds a live account by id.
    pub async fn find(&self, id: Uuid) -> Result<accounts::Model, AccountError> {
        accounts::Entity::find_by_id(id)
            .filter(accounts::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?
            .ok_or(AccountError::NotFound(id))
    }

    /// Lists live accounts in a branch, ordered by code.
    pub async fn list(&self, branch_id: Uuid) -> Result<Vec<accounts::Model>, AccountError> {
        Ok(accounts::Entity::find()
            .filter(accounts::Column::BranchId.eq(branch_id))
            .filter(accounts::Column::DeletedAt.is_null())
            .order_by_asc(accounts::Column::Code)
            .all(&self.db)
            .await?)
    }

    /// Updates an account's name or active flag.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        let account = self.find(id).await?;

        let mut active: accounts::ActiveModel = account.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now());

        Ok(active.update(&self.db).await?)
    }

    /// Soft-deletes an account. Its ledger history stays intact and its
    /// code becomes reusable.
    pub async fn delete(&self, id: Uuid) -> Result<(), AccountError> {
        let account = self.find(id).await?;
        let now = Utc::now();

        let mut active: accounts::ActiveModel = account.into();
        active.is_active = Set(false);
        active.deleted_at = Set(Some(now));
        active.updated_at = Set(now);
        active.update(&self.db).await?;

        Ok(())
    }

    /// Resolves a set of account ids into the view journal validation
    /// needs. Tombstoned accounts resolve as inactive.
    pub async fn resolve_for_validation(
        &self,
        account_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, AccountInfo>, AccountError> {
        let models = accounts::Entity::find()
            .filter(accounts::Column::Id.is_in(account_ids.to_vec()))
            .all(&self.db)
            .await?;

        Ok(models
            .into_iter()
            .map(|m| {
                (
                    m.id,
                    AccountInfo {
                        id: m.id,
                        branch_id: m.branch_id,
                        is_active: m.is_active && m.deleted_at.is_none(),
                    },
                )
            })
            .collect())
    }

    /// Parses a stored account type string.
    pub fn parse_account_type(raw: &str) -> Result<AccountType, AccountError> {
        AccountType::parse(raw).ok_or_else(|| AccountError::UnknownAccountType(raw.to_string()))
    }
}
