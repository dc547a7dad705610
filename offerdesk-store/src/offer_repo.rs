use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use offerdesk_core::{Offer, OfferRepository, RepositoryError, RepositoryResult};

pub struct PostgresOfferRepository {
    pool: PgPool,
}

impl PostgresOfferRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct OfferRow {
    id: i32,
    product: String,
    price: Option<Decimal>,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl From<OfferRow> for Offer {
    fn from(row: OfferRow) -> Self {
        Offer {
            id: Some(row.id),
            product: row.product,
            price: row.price,
            start: Some(row.start_date),
            end: Some(row.end_date),
        }
    }
}

#[async_trait]
impl OfferRepository for PostgresOfferRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Offer>> {
        let rows = sqlx::query_as::<_, OfferRow>(
            "SELECT id, product, price, start_date, end_date FROM offers ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::backend)?;

        Ok(rows.into_iter().map(Offer::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Offer>> {
        let row = sqlx::query_as::<_, OfferRow>(
            "SELECT id, product, price, start_date, end_date FROM offers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::backend)?;

        Ok(row.map(Offer::from))
    }

    async fn save(&self, offer: &Offer) -> RepositoryResult<Offer> {
        let id = offer.id.ok_or(RepositoryError::MissingId)?;

        // Whole-row replace; columns left unset by the caller fail the NOT NULL constraints.
        let row = sqlx::query_as::<_, OfferRow>(
            r#"
            INSERT INTO offers (id, product, price, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET product = EXCLUDED.product,
                price = EXCLUDED.price,
                start_date = EXCLUDED.start_date,
                end_date = EXCLUDED.end_date
            RETURNING id, product, price, start_date, end_date
            "#,
        )
        .bind(id)
        .bind(&offer.product)
        .bind(offer.price)
        .bind(offer.start)
        .bind(offer.end)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::backend)?;

        tracing::debug!(offer_id = id, "Saved offer");
        Ok(row.into())
    }

    async fn delete_by_id(&self, id: i32) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM offers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::backend)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id));
        }

        tracing::debug!(offer_id = id, "Deleted offer");
        Ok(())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM offers")
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::backend)?;

        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{app_config::DatabaseConfig, DbClient};
    use rust_decimal_macros::dec;

    async fn repository() -> PostgresOfferRepository {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a scratch database");
        let db = DbClient::new(&url, &DatabaseConfig::default()).await.unwrap();
        db.migrate().await.unwrap();
        PostgresOfferRepository::new(db.pool.clone())
    }

    #[tokio::test]
    #[ignore = "needs a Postgres database in DATABASE_URL"]
    async fn test_save_replace_and_delete() {
        let repo = repository().await;
        let id = 900_001;
        let _ = repo.delete_by_id(id).await;

        let offer = Offer::default_offer().with_id(id);
        assert_eq!(repo.save(&offer).await.unwrap(), offer);
        assert_eq!(repo.find_by_id(id).await.unwrap(), Some(offer.clone()));

        let replacement = Offer {
            product: "smart".to_string(),
            price: None,
            ..offer
        };
        assert_eq!(repo.save(&replacement).await.unwrap(), replacement);
        assert_eq!(repo.find_by_id(id).await.unwrap(), Some(replacement));

        repo.delete_by_id(id).await.unwrap();
        assert!(repo.find_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore = "needs a Postgres database in DATABASE_URL"]
    async fn test_delete_non_existent_id() {
        let repo = repository().await;
        let err = repo.delete_by_id(900_002).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(900_002)));
    }

    #[tokio::test]
    #[ignore = "needs a Postgres database in DATABASE_URL"]
    async fn test_price_round_trips_exactly() {
        let repo = repository().await;
        let mut offer = Offer::default_offer().with_id(900_003);
        offer.price = Some(dec!(19.99));

        repo.save(&offer).await.unwrap();
        let fetched = repo.find_by_id(900_003).await.unwrap().unwrap();
        assert_eq!(fetched.price, Some(dec!(19.99)));

        repo.delete_by_id(900_003).await.unwrap();
    }
}
