use crate::domain::otp::{NewOtp, OtpPurpose, OtpRecord, OtpRepository};
use crate::domain::principal::PrincipalKind;
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::otps::OtpDbModel;
use anyhow::Result;
use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

pub struct PostgresOtpRepository {
    pool: DbPool,
}

impl PostgresOtpRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OtpRepository for PostgresOtpRepository {
    async fn create(&self, otp: NewOtp) -> Result<OtpRecord> {
        let record = sqlx::query_as::<_, OtpDbModel>(
            r#"
            INSERT INTO otps (principal_kind, address, code, purpose, issued_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, principal_kind, address, code, purpose, issued_at, consumed_at
            "#,
        )
        .bind(otp.principal_kind.as_str())
        .bind(&otp.address)
        .bind(&otp.code)
        .bind(otp.purpose.as_str())
        .bind(otp.issued_at)
        .fetch_one(&self.pool)
        .await?;

        record.try_into()
    }

    async fn find_live(
        &self,
        kind: PrincipalKind,
        address: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpRecord>> {
        let record = sqlx::query_as::<_, OtpDbModel>(
            r#"
            SELECT id, principal_kind, address, code, purpose, issued_at, consumed_at
            FROM otps
            WHERE principal_kind = $1 AND address = $2 AND purpose = $3
              AND consumed_at IS NULL
            ORDER BY issued_at DESC
            LIMIT 1
            "#,
        )
        .bind(kind.as_str())
        .bind(address)
        .bind(purpose.as_str())
        .fetch_optional(&self.pool)
        .await?;

        record.map(OtpRecord::try_from).transpose()
    }

    async fn consume(&self, id: Uuid, at: OffsetDateTime) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE otps SET consumed_at = $2
            WHERE id = $1 AND consumed_at IS NULL
            "#,
        )
        .bind(id)
        .bind(at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn supersede(
        &self,
        kind: PrincipalKind,
        address: &str,
        purpose: OtpPurpose,
        at: OffsetDateTime,
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE otps SET consumed_at = $4
            WHERE principal_kind = $1 AND address = $2 AND purpose = $3
              AND consumed_at IS NULL
            "#,
        )
        .bind(kind.as_str())
        .bind(address)
        .bind(purpose.as_str())
        .bind(at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_by_address(&self, kind: PrincipalKind, address: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM otps WHERE principal_kind = $1 AND address = $2")
            .bind(kind.as_str())
            .bind(address)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
