use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;
use uuid::Uuid;

use crate::config::database::IsolationLevel;
use crate::models::{
    MaintenanceHistoryEntry, MaintenanceItem, MaintenanceRow, NewHistoryEntry, NewMaintenance,
    Vehicle,
};
use crate::repositories::{MaintenanceStore, MaintenanceTx};
use crate::utils::errors::{not_found_error, AppResult};

pub struct PgMaintenanceStore {
    pool: PgPool,
    isolation: IsolationLevel,
}

impl PgMaintenanceStore {
    pub fn new(pool: PgPool, isolation: IsolationLevel) -> Self {
        Self { pool, isolation }
    }
}

#[async_trait]
impl MaintenanceStore for PgMaintenanceStore {
    async fn begin(&self) -> AppResult<Box<dyn MaintenanceTx>> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("SET TRANSACTION ISOLATION LEVEL {}", self.isolation.to_sql());
        sqlx::query(&sql).execute(&mut *tx).await?;

        Ok(Box::new(PgMaintenanceTx { tx }))
    }
}

/// Transacción PostgreSQL. Si se descarta sin commit, sqlx hace rollback.
pub struct PgMaintenanceTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl MaintenanceTx for PgMaintenanceTx {
    async fn get_vehicle(&mut self, owner_id: Uuid, id: Uuid) -> AppResult<Option<Vehicle>> {
        // FOR UPDATE: dos registros de servicio concurrentes no pueden pisarse current_km
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE id = $1 AND owner_id = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(vehicle)
    }

    async fn update_vehicle_km(&mut self, owner_id: Uuid, id: Uuid, km: i64) -> AppResult<()> {
        let result = sqlx::query("UPDATE vehicles SET current_km = $3 WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .bind(km)
            .execute(&mut *self.tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Vehicle", &id.to_string()));
        }
        Ok(())
    }

    async fn get_maintenance(&mut self, owner_id: Uuid, id: Uuid) -> AppResult<Option<MaintenanceItem>> {
        let row = sqlx::query_as::<_, MaintenanceRow>(
            "SELECT * FROM maintenances WHERE id = $1 AND owner_id = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(row.map(MaintenanceItem::from))
    }

    async fn list_maintenances(&mut self, owner_id: Uuid, vehicle_id: Uuid) -> AppResult<Vec<MaintenanceItem>> {
        let rows = sqlx::query_as::<_, MaintenanceRow>(
            "SELECT * FROM maintenances WHERE owner_id = $1 AND vehicle_id = $2 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .bind(vehicle_id)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(rows.into_iter().map(MaintenanceItem::from).collect())
    }

    async fn create_maintenance(&mut self, new: &NewMaintenance) -> AppResult<MaintenanceItem> {
        let now = Utc::now();
        let schedule = &new.schedule;

        let row = sqlx::query_as::<_, MaintenanceRow>(
            r#"
            INSERT INTO maintenances (
                id, owner_id, vehicle_id, item_name, control_by, control_value,
                last_changed_km, next_change_km, last_changed_date, next_change_date,
                cost, status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.owner_id)
        .bind(new.vehicle_id)
        .bind(&new.item_name)
        .bind(schedule.control_by())
        .bind(schedule.control_value())
        .bind(schedule.last_changed_km())
        .bind(schedule.next_change_km())
        .bind(schedule.last_changed_date())
        .bind(schedule.next_change_date())
        .bind(new.cost)
        .bind(new.status)
        .bind(now)
        .fetch_one(&mut *self.tx)
        .await?;

        debug!("💾 Maintenance {} insertado", row.id);
        Ok(row.into())
    }

    async fn update_maintenance(&mut self, item: &MaintenanceItem) -> AppResult<MaintenanceItem> {
        let schedule = &item.schedule;

        let row = sqlx::query_as::<_, MaintenanceRow>(
            r#"
            UPDATE maintenances
            SET vehicle_id = $2, item_name = $3, control_by = $4, control_value = $5,
                last_changed_km = $6, next_change_km = $7,
                last_changed_date = $8, next_change_date = $9,
                cost = $10, status = $11, updated_at = $12
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(item.id)
        .bind(item.vehicle_id)
        .bind(&item.item_name)
        .bind(schedule.control_by())
        .bind(schedule.control_value())
        .bind(schedule.last_changed_km())
        .bind(schedule.next_change_km())
        .bind(schedule.last_changed_date())
        .bind(schedule.next_change_date())
        .bind(item.cost)
        .bind(item.status)
        .bind(Utc::now())
        .fetch_optional(&mut *self.tx)
        .await?
        .ok_or_else(|| not_found_error("Maintenance", &item.id.to_string()))?;

        Ok(row.into())
    }

    async fn delete_maintenance(&mut self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM maintenances WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Maintenance", &id.to_string()));
        }
        Ok(())
    }

    async fn list_history(&mut self, owner_id: Uuid, maintenance_id: Uuid) -> AppResult<Vec<MaintenanceHistoryEntry>> {
        let entries = sqlx::query_as::<_, MaintenanceHistoryEntry>(
            r#"
            SELECT h.*
            FROM maintenance_history h
            JOIN maintenances m ON m.id = h.maintenance_id
            WHERE h.maintenance_id = $1 AND m.owner_id = $2
            ORDER BY h.created_at DESC
            "#,
        )
        .bind(maintenance_id)
        .bind(owner_id)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(entries)
    }

    async fn get_history(&mut self, owner_id: Uuid, id: Uuid) -> AppResult<Option<MaintenanceHistoryEntry>> {
        let entry = sqlx::query_as::<_, MaintenanceHistoryEntry>(
            r#"
            SELECT h.*
            FROM maintenance_history h
            JOIN maintenances m ON m.id = h.maintenance_id
            WHERE h.id = $1 AND m.owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(entry)
    }

    async fn create_history(&mut self, new: &NewHistoryEntry) -> AppResult<MaintenanceHistoryEntry> {
        let entry = sqlx::query_as::<_, MaintenanceHistoryEntry>(
            r#"
            INSERT INTO maintenance_history (
                id, maintenance_id, paid_price, informed_km, mechanic_shop_name, observation, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.maintenance_id)
        .bind(new.paid_price)
        .bind(new.informed_km)
        .bind(&new.mechanic_shop_name)
        .bind(&new.observation)
        .bind(new.created_at)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(entry)
    }

    async fn update_history(&mut self, entry: &MaintenanceHistoryEntry) -> AppResult<MaintenanceHistoryEntry> {
        let updated = sqlx::query_as::<_, MaintenanceHistoryEntry>(
            r#"
            UPDATE maintenance_history
            SET paid_price = $2, informed_km = $3, mechanic_shop_name = $4, observation = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(entry.id)
        .bind(entry.paid_price)
        .bind(entry.informed_km)
        .bind(&entry.mechanic_shop_name)
        .bind(&entry.observation)
        .fetch_optional(&mut *self.tx)
        .await?
        .ok_or_else(|| not_found_error("History", &entry.id.to_string()))?;

        Ok(updated)
    }

    async fn delete_history(&mut self, maintenance_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM maintenance_history WHERE maintenance_id = $1")
            .bind(maintenance_id)
            .execute(&mut *self.tx)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete_history_entry(&mut self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM maintenance_history WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("History", &id.to_string()));
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let PgMaintenanceTx { tx } = *self;
        tx.commit().await?;
        Ok(())
    }
}
