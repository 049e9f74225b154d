use shared::{
    error::ApiError,
    protocol::{OsDistribution, OsFamilyDistribution},
};

use crate::{internal, ApiContext};

pub async fn os_distribution(ctx: &ApiContext) -> Result<OsDistribution, ApiError> {
    let entries = ctx.storage.os_distribution().await.map_err(internal)?;
    Ok(OsDistribution(entries))
}

pub async fn os_family_distribution(ctx: &ApiContext) -> Result<OsFamilyDistribution, ApiError> {
    let entries = ctx
        .storage
        .os_family_distribution()
        .await
        .map_err(internal)?;
    Ok(OsFamilyDistribution(entries))
}
