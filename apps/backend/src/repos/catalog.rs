//! Master catalog repository.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::adapters::catalog_sea::{self as catalog_adapter, IdeologyRow, PolicyRow};
use crate::domain::{Catalog, MasterIdeology, MasterPolicy};
use crate::errors::domain::{DomainError, InfraErrorKind};

fn corrupt(table: &str, id: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::infra(
        InfraErrorKind::DataCorruption,
        format!("{table} row {id} is malformed: {err}"),
    )
}

/// Read the whole catalog in display order.
pub async fn load_catalog<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Catalog, DomainError> {
    let policies = catalog_adapter::list_policies(conn)
        .await?
        .into_iter()
        .map(|row| {
            Ok(MasterPolicy {
                category: row
                    .category
                    .parse()
                    .map_err(|e| corrupt("master_policies", &row.id, e))?,
                effects: serde_json::from_value(row.effects)
                    .map_err(|e| corrupt("master_policies", &row.id, e))?,
                id: row.id,
                title: row.title,
                description: row.description,
                news_flash: row.news_flash,
            })
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    let ideologies = catalog_adapter::list_ideologies(conn)
        .await?
        .into_iter()
        .map(|row| {
            Ok(MasterIdeology {
                coefficients: serde_json::from_value(row.coefficients)
                    .map_err(|e| corrupt("master_ideologies", &row.id, e))?,
                id: row.id,
                name: row.name,
                description: row.description,
            })
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    Ok(Catalog::new(policies, ideologies))
}

/// Insert `catalog` into whichever master table is still empty.
///
/// Returns the number of rows written.
pub async fn seed_if_empty<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    catalog: &Catalog,
) -> Result<usize, DomainError> {
    let mut written = 0;

    if catalog_adapter::count_policies(conn).await? == 0 {
        for (order, policy) in catalog.policies.iter().enumerate() {
            let row = PolicyRow {
                id: policy.id.clone(),
                category: policy.category.as_str().to_string(),
                title: policy.title.clone(),
                description: policy.description.clone(),
                news_flash: policy.news_flash.clone(),
                effects: serde_json::to_value(&policy.effects)
                    .map_err(|e| corrupt("master_policies", &policy.id, e))?,
                sort_order: i32::try_from(order).unwrap_or(i32::MAX),
            };
            catalog_adapter::insert_policy(conn, row).await?;
            written += 1;
        }
    }

    if catalog_adapter::count_ideologies(conn).await? == 0 {
        for (order, ideology) in catalog.ideologies.iter().enumerate() {
            let row = IdeologyRow {
                id: ideology.id.clone(),
                name: ideology.name.clone(),
                description: ideology.description.clone(),
                coefficients: serde_json::to_value(ideology.coefficients)
                    .map_err(|e| corrupt("master_ideologies", &ideology.id, e))?,
                sort_order: i32::try_from(order).unwrap_or(i32::MAX),
            };
            catalog_adapter::insert_ideology(conn, row).await?;
            written += 1;
        }
    }

    if written > 0 {
        info!(rows = written, "Seeded master catalog");
    }
    Ok(written)
}
