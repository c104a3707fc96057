use crate::domain::otp::OtpRecord;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct OtpDbModel {
    pub id: Uuid,
    pub principal_kind: String,
    pub address: String,
    pub code: String,
    pub purpose: String,
    pub issued_at: OffsetDateTime,
    pub consumed_at: Option<OffsetDateTime>,
}

impl TryFrom<OtpDbModel> for OtpRecord {
    type Error = anyhow::Error;

    fn try_from(model: OtpDbModel) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            principal_kind: model.principal_kind.parse()?,
            address: model.address,
            code: model.code,
            purpose: model.purpose.parse()?,
            issued_at: model.issued_at,
            consumed_at: model.consumed_at,
        })
    }
}
