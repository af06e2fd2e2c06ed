//! PostgreSQL implementation of the AccountStore port.
//!
//! Accounts and billing intents are written in a single transaction; the
//! unique indexes on email and student id are the hard enforcement behind
//! the application-level uniqueness checks.

use crate::domain::foundation::AccountId;
use crate::domain::registration::{BillingIntent, PendingAccount};
use crate::ports::{AccountStore, StoreError, UniqueField};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Constraint names from the schema migration; the mapping back to fields
/// lives here and nowhere else.
const EMAIL_CONSTRAINT: &str = "accounts_email_key";
const STUDENT_ID_CONSTRAINT: &str = "accounts_student_id_key";

pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps a violated constraint name to the unique field it guards.
fn unique_field_for_constraint(constraint: Option<&str>) -> Option<UniqueField> {
    match constraint {
        Some(EMAIL_CONSTRAINT) => Some(UniqueField::Email),
        Some(STUDENT_ID_CONSTRAINT) => Some(UniqueField::StudentId),
        _ => None,
    }
}

fn map_write_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &e {
        if let Some(field) = unique_field_for_constraint(db_err.constraint()) {
            return StoreError::UniqueViolation(field);
        }
    }
    StoreError::Unavailable(e.to_string())
}

fn map_read_error(e: sqlx::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

#[async_trait]
impl AccountStore for PostgresAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<AccountId>, StoreError> {
        let id: Option<Uuid> = sqlx::query_scalar("SELECT id FROM accounts WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_read_error)?;

        Ok(id.map(AccountId::from_uuid))
    }

    async fn find_by_student_id(
        &self,
        student_id: &str,
    ) -> Result<Option<AccountId>, StoreError> {
        let id: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM accounts WHERE student_id = $1")
                .bind(student_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_read_error)?;

        Ok(id.map(AccountId::from_uuid))
    }

    async fn create_account_and_billing_intent(
        &self,
        account: &PendingAccount,
        intent: &BillingIntent,
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(map_read_error)?;

        sqlx::query(
            r#"
            INSERT INTO accounts (
                id, email, password_hash, first_name, last_name, student_id,
                role, membership_type, status, payment_status, payment_method,
                payment_reference, phone, emergency_contact_name,
                emergency_contact_phone, emergency_contact_relationship,
                billing_address, expiry_date, created_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, 'student', $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18
            )
            "#,
        )
        .bind(account.id.as_uuid())
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.student_id)
        .bind(account.membership_type.as_str())
        .bind(account.status.as_str())
        .bind(account.payment_status.as_str())
        .bind(account.payment_method.as_str())
        .bind(account.payment_reference.as_str())
        .bind(&account.phone)
        .bind(account.emergency_contact.as_ref().map(|c| c.name.as_str()))
        .bind(account.emergency_contact.as_ref().map(|c| c.phone.as_str()))
        .bind(
            account
                .emergency_contact
                .as_ref()
                .map(|c| c.relationship.as_str()),
        )
        .bind(&account.billing_address)
        .bind(account.expiry_date.as_datetime())
        .bind(account.registered_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(map_write_error)?;

        sqlx::query(
            r#"
            INSERT INTO billing_intents (
                id, account_id, transaction_type, amount_cents, currency,
                payment_method, payment_reference, description, status, created_at
            ) VALUES ($1, $2, 'payment', $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(intent.id.as_uuid())
        .bind(intent.account_id.as_uuid())
        .bind(intent.amount_cents)
        .bind(intent.currency)
        .bind(intent.payment_method.as_str())
        .bind(intent.payment_reference.as_str())
        .bind(&intent.description)
        .bind(intent.status.as_str())
        .bind(intent.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(map_write_error)?;

        tx.commit().await.map_err(map_read_error)?;
        Ok(())
    }
}
