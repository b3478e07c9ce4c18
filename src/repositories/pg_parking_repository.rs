use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, info};

use crate::models::{
    NewParkingSpot, NewReservation, ParkingSpot, ParkingSpotUpdate, Reservation,
    ReservationUpdate,
};
use crate::repositories::{
    occupancy_mismatch, spot_has_reservations, spot_occupied, ParkingRepository,
};
use crate::utils::errors::{conflict_error, not_found_error, AppError, AppResult};

type PgTransaction<'a> = Transaction<'a, Postgres>;

pub struct PgParkingRepository {
    pool: PgPool,
}

impl PgParkingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Leer una plaza bloqueando su fila hasta el fin de la transacción
    async fn lock_spot(tx: &mut PgTransaction<'_>, id: i32) -> AppResult<Option<ParkingSpot>> {
        let spot = sqlx::query_as::<_, ParkingSpot>(
            "SELECT id, spot_number, is_occupied FROM parking_spots WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(spot)
    }

    async fn lock_reservation(
        tx: &mut PgTransaction<'_>,
        id: i32,
    ) -> AppResult<Option<Reservation>> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT id, name, car_number, spot_id, start_time, duration
            FROM reservations
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(reservation)
    }

    async fn count_reservations(tx: &mut PgTransaction<'_>, spot_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reservations WHERE spot_id = $1")
            .bind(spot_id)
            .fetch_one(&mut **tx)
            .await?;

        Ok(count)
    }

    async fn set_occupied(tx: &mut PgTransaction<'_>, spot_id: i32, occupied: bool) -> AppResult<()> {
        sqlx::query("UPDATE parking_spots SET is_occupied = $2 WHERE id = $1")
            .bind(spot_id)
            .bind(occupied)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    async fn spot_number_taken(
        tx: &mut PgTransaction<'_>,
        spot_number: &str,
        except_id: Option<i32>,
    ) -> AppResult<bool> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM parking_spots WHERE spot_number = $1 AND id IS DISTINCT FROM $2)",
        )
        .bind(spot_number)
        .bind(except_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(taken)
    }
}

/// Traducir violaciones de unicidad a conflicto de número de plaza
fn map_unique_violation(spot_number: &str) -> impl FnOnce(sqlx::Error) -> AppError + '_ {
    move |e| {
        if matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation()) {
            conflict_error("Parking spot", "spot_number", spot_number)
        } else {
            AppError::Database(e)
        }
    }
}

#[async_trait]
impl ParkingRepository for PgParkingRepository {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_spots(&self) -> AppResult<Vec<ParkingSpot>> {
        let spots = sqlx::query_as::<_, ParkingSpot>(
            "SELECT id, spot_number, is_occupied FROM parking_spots ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(spots)
    }

    async fn create_spot(&self, spot: NewParkingSpot) -> AppResult<ParkingSpot> {
        let mut tx = self.pool.begin().await?;

        if Self::spot_number_taken(&mut tx, &spot.spot_number, None).await? {
            return Err(conflict_error("Parking spot", "spot_number", &spot.spot_number));
        }

        let created = sqlx::query_as::<_, ParkingSpot>(
            r#"
            INSERT INTO parking_spots (spot_number, is_occupied)
            VALUES ($1, FALSE)
            RETURNING id, spot_number, is_occupied
            "#,
        )
        .bind(&spot.spot_number)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_unique_violation(&spot.spot_number))?;

        tx.commit().await?;
        info!(spot_id = created.id, spot_number = %created.spot_number, "Parking spot created");
        Ok(created)
    }

    async fn update_spot(&self, id: i32, update: ParkingSpotUpdate) -> AppResult<ParkingSpot> {
        let mut tx = self.pool.begin().await?;

        let current = Self::lock_spot(&mut tx, id)
            .await?
            .ok_or_else(|| not_found_error("Parking spot", id))?;

        if update.spot_number != current.spot_number
            && Self::spot_number_taken(&mut tx, &update.spot_number, Some(id)).await?
        {
            return Err(conflict_error("Parking spot", "spot_number", &update.spot_number));
        }

        let is_occupied = match update.is_occupied {
            Some(requested) => {
                let has_reservations = Self::count_reservations(&mut tx, id).await? > 0;
                if requested != has_reservations {
                    return Err(occupancy_mismatch(requested));
                }
                requested
            }
            None => current.is_occupied,
        };

        let updated = sqlx::query_as::<_, ParkingSpot>(
            r#"
            UPDATE parking_spots
            SET spot_number = $2, is_occupied = $3
            WHERE id = $1
            RETURNING id, spot_number, is_occupied
            "#,
        )
        .bind(id)
        .bind(&update.spot_number)
        .bind(is_occupied)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_unique_violation(&update.spot_number))?;

        tx.commit().await?;
        info!(spot_id = id, "Parking spot updated");
        Ok(updated)
    }

    async fn delete_spot(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        Self::lock_spot(&mut tx, id)
            .await?
            .ok_or_else(|| not_found_error("Parking spot", id))?;

        if Self::count_reservations(&mut tx, id).await? > 0 {
            return Err(spot_has_reservations());
        }

        sqlx::query("DELETE FROM parking_spots WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!(spot_id = id, "Parking spot deleted");
        Ok(())
    }

    async fn list_reservations(&self) -> AppResult<Vec<Reservation>> {
        let reservations = sqlx::query_as::<_, Reservation>(
            "SELECT id, name, car_number, spot_id, start_time, duration FROM reservations ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(reservations)
    }

    async fn book(&self, reservation: NewReservation) -> AppResult<Reservation> {
        let mut tx = self.pool.begin().await?;

        let spot = Self::lock_spot(&mut tx, reservation.spot_id)
            .await?
            .ok_or_else(|| not_found_error("Parking spot", reservation.spot_id))?;

        if spot.is_occupied {
            debug!(spot_id = spot.id, "Booking rejected, spot occupied");
            return Err(spot_occupied());
        }

        let created = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (name, car_number, spot_id, start_time, duration)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, car_number, spot_id, start_time, duration
            "#,
        )
        .bind(&reservation.name)
        .bind(&reservation.car_number)
        .bind(reservation.spot_id)
        .bind(reservation.start_time)
        .bind(reservation.duration)
        .fetch_one(&mut *tx)
        .await?;

        Self::set_occupied(&mut tx, spot.id, true).await?;

        tx.commit().await?;
        info!(reservation_id = created.id, spot_id = spot.id, "Parking spot reserved");
        Ok(created)
    }

    async fn update_reservation(&self, update: ReservationUpdate) -> AppResult<Reservation> {
        let mut tx = self.pool.begin().await?;

        let current = Self::lock_reservation(&mut tx, update.id)
            .await?
            .ok_or_else(|| not_found_error("Reservation", update.id))?;

        let moved = current.spot_id != update.spot_id;
        if moved {
            // Orden fijo de bloqueo entre las dos plazas
            let (first, second) = if current.spot_id < update.spot_id {
                (current.spot_id, update.spot_id)
            } else {
                (update.spot_id, current.spot_id)
            };
            let first_spot = Self::lock_spot(&mut tx, first).await?;
            let second_spot = Self::lock_spot(&mut tx, second).await?;
            let target = if first == update.spot_id { first_spot } else { second_spot };

            let target = target.ok_or_else(|| not_found_error("Parking spot", update.spot_id))?;
            if target.is_occupied {
                return Err(spot_occupied());
            }
        }

        let updated = sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations
            SET name = $2, car_number = $3, spot_id = $4, start_time = $5, duration = $6
            WHERE id = $1
            RETURNING id, name, car_number, spot_id, start_time, duration
            "#,
        )
        .bind(update.id)
        .bind(&update.name)
        .bind(&update.car_number)
        .bind(update.spot_id)
        .bind(update.start_time)
        .bind(update.duration)
        .fetch_one(&mut *tx)
        .await?;

        if moved {
            Self::set_occupied(&mut tx, update.spot_id, true).await?;
            if Self::count_reservations(&mut tx, current.spot_id).await? == 0 {
                Self::set_occupied(&mut tx, current.spot_id, false).await?;
            }
        }

        tx.commit().await?;
        info!(reservation_id = updated.id, spot_id = updated.spot_id, moved, "Reservation updated");
        Ok(updated)
    }

    async fn delete_reservation(&self, id: i32) -> AppResult<Reservation> {
        let mut tx = self.pool.begin().await?;

        let existing = Self::lock_reservation(&mut tx, id)
            .await?
            .ok_or_else(|| not_found_error("Reservation", id))?;

        Self::lock_spot(&mut tx, existing.spot_id).await?;

        sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let remaining = Self::count_reservations(&mut tx, existing.spot_id).await?;
        if remaining == 0 {
            Self::set_occupied(&mut tx, existing.spot_id, false).await?;
        } else {
            debug!(spot_id = existing.spot_id, remaining, "Spot keeps other reservations");
        }

        tx.commit().await?;
        info!(reservation_id = id, spot_id = existing.spot_id, "Reservation deleted");
        Ok(existing)
    }
}
